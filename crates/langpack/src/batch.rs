use tracing::info;

use crate::pack::{LanguageCode, ModuleKey, PackIdentity, SyncOutcome};
use crate::sync::{PackSynchronizer, SyncError};

/// Outcome of one pack within a batch update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackResult {
    pub identity: PackIdentity,
    pub outcome: SyncOutcome,
}

/// Summary of a batch update.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// Base URL resolved at the start of the batch.
    pub base_url: String,
    pub languages: Vec<LanguageCode>,
    pub results: Vec<PackResult>,
}

impl UpdateReport {
    pub fn count(&self, outcome: SyncOutcome) -> usize {
        self.results
            .iter()
            .filter(|result| result.outcome == outcome)
            .count()
    }

    /// True if packs were attempted and none of them succeeded.
    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && self.count(SyncOutcome::Failed) == self.results.len()
    }
}

impl PackSynchronizer {
    /// Refresh the mirror, sync every selected pack and stamp the languages.
    ///
    /// Empty `languages` selects every active language; empty `modules`
    /// selects every active module that ships translations. Selections are
    /// validated before anything is downloaded. Packs are synced one after
    /// another; failed packs do not stop the batch.
    pub async fn update_all(
        &self,
        languages: &[LanguageCode],
        modules: &[ModuleKey],
    ) -> Result<UpdateReport, SyncError> {
        let languages: Vec<LanguageCode> = if languages.is_empty() {
            self.active_languages().as_slice().to_vec()
        } else {
            for language in languages {
                self.validate_language(language)?;
            }
            languages.to_vec()
        };

        let modules: Vec<ModuleKey> = if modules.is_empty() {
            self.modules_with_translations()
                .into_iter()
                .map(|module| module.key)
                .collect()
        } else {
            for module in modules {
                self.validate_module(module)?;
            }
            modules.to_vec()
        };

        let base_url = self.mirror_resolver().resolve_base_url().await?;

        let mut results = Vec::with_capacity(modules.len() * languages.len());
        for module in &modules {
            for language in &languages {
                let outcome = self.sync_pack(module, language).await?;
                results.push(PackResult {
                    identity: PackIdentity::new(module.clone(), language.clone()),
                    outcome,
                });
            }
        }

        self.mark_languages_updated(&languages)?;

        let report = UpdateReport {
            base_url,
            languages,
            results,
        };
        info!(
            new = report.count(SyncOutcome::New),
            updated = report.count(SyncOutcome::Updated),
            failed = report.count(SyncOutcome::Failed),
            "language pack update finished"
        );
        Ok(report)
    }
}
