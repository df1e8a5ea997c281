use crate::catalog::InstalledModule;
use crate::pack::{LanguageCode, ModuleKey, PackIdentity};
use crate::state::{PackState, StateError};
use crate::sync::PackSynchronizer;

/// Catalog code that stands for the host's source language.
const DEFAULT_LANGUAGE: &str = "default";

/// One catalog language and its whole-language update time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDetails {
    pub code: LanguageCode,
    pub name: String,
    pub active: bool,
    pub last_update: Option<i64>,
    pub dependencies: Vec<LanguageCode>,
}

/// State of one module's pack in one active language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackDetails {
    pub language: LanguageCode,
    /// The pack has been extracted to the labels root.
    pub exists: bool,
    /// Time of the last failed attempt, if any.
    pub last_update: Option<i64>,
}

/// A module with translatable resources and its packs per active language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePackDetails {
    pub key: ModuleKey,
    pub title: Option<String>,
    pub packs: Vec<PackDetails>,
}

impl PackSynchronizer {
    /// Every catalog language except the source language, sorted by name.
    pub fn language_details(&self) -> Result<Vec<LanguageDetails>, StateError> {
        let mut details = Vec::new();

        for language in self.catalog().available_languages() {
            if language.code.as_str() == DEFAULT_LANGUAGE {
                continue;
            }
            details.push(LanguageDetails {
                active: self.active_languages().contains(&language.code),
                last_update: self.state().language_updated_at(&language.code)?,
                dependencies: self.catalog().locale_dependencies(&language.code),
                code: language.code,
                name: language.name,
            });
        }

        details.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(details)
    }

    /// Active modules that ship `.xlf` files, sorted by key.
    pub fn modules_with_translations(&self) -> Vec<InstalledModule> {
        let mut modules: Vec<InstalledModule> = self
            .modules()
            .active_modules()
            .into_iter()
            .filter(InstalledModule::has_translations)
            .collect();
        modules.sort_by(|a, b| a.key.cmp(&b.key));
        modules
    }

    /// Pack state of every translatable module in every active language.
    pub fn module_pack_details(&self) -> Result<Vec<ModulePackDetails>, StateError> {
        let mut details = Vec::new();

        for module in self.modules_with_translations() {
            let mut packs = Vec::with_capacity(self.active_languages().len());
            for language in self.active_languages().iter() {
                let identity = PackIdentity::new(module.key.clone(), language.clone());
                packs.push(PackDetails {
                    language: language.clone(),
                    exists: self.target_dir(&identity).is_dir(),
                    last_update: self.state().pack_updated_at(&identity)?,
                });
            }
            details.push(ModulePackDetails {
                key: module.key,
                title: module.title,
                packs,
            });
        }

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use crate::catalog::{ActiveLanguages, LANGUAGE_RESOURCES_DIR, Language};
    use crate::state::StateStore;
    use crate::sync::SyncSettings;
    use crate::test_support::{FakeTransport, MemoryState, StaticCatalog, StaticModules};

    use super::*;

    fn module_with_xlf(root: &Path, key: &str) -> InstalledModule {
        let dir = root.join("ext").join(key);
        let language_dir = dir.join(LANGUAGE_RESOURCES_DIR);
        std::fs::create_dir_all(&language_dir).unwrap();
        std::fs::write(language_dir.join("locallang.xlf"), "<xliff/>").unwrap();
        let mut module = InstalledModule::new(key, dir);
        module.title = Some(format!("The {key} module"));
        module
    }

    fn synchronizer(root: &Path, state: Arc<MemoryState>) -> PackSynchronizer {
        let catalog = StaticCatalog::new(vec![
            Language::new("default", "English"),
            Language::new("fr", "French"),
            Language::new("de", "German"),
            Language::new("da", "Danish"),
        ])
        .with_dependency("fr_CA", "fr");
        let modules = StaticModules::new(vec![
            module_with_xlf(root, "news"),
            module_with_xlf(root, "backend"),
            InstalledModule::new("no_labels", root.join("ext/no_labels")),
        ]);
        PackSynchronizer::new(
            SyncSettings {
                labels_root: root.join("labels"),
                var_root: root.join("var"),
                builtin_modules_root: root.join("sysext"),
                host_version: "12.4.0".into(),
                beta_channel: false,
            },
            Arc::new(catalog),
            ActiveLanguages::new(["fr", "de"]),
            Arc::new(modules),
            state as Arc<dyn StateStore>,
            Arc::new(FakeTransport::default()),
        )
    }

    #[test]
    fn language_details_skip_default_and_sort_by_name() {
        let root = tempfile::tempdir().unwrap();
        let state = Arc::new(MemoryState::default());
        state.mark_language_updated(&LanguageCode::new("de"), 1_700_000_000).unwrap();

        let details = synchronizer(root.path(), state).language_details().unwrap();

        let names: Vec<&str> = details.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Danish", "French", "German"]);

        let german = &details[2];
        assert!(german.active);
        assert_eq!(german.last_update, Some(1_700_000_000));
        assert!(!details[0].active);
        assert_eq!(details[0].last_update, None);
    }

    #[test]
    fn module_pack_details_list_translatable_modules_only() {
        let root = tempfile::tempdir().unwrap();
        let state = Arc::new(MemoryState::default());
        let failed = PackIdentity::new(ModuleKey::new("news"), LanguageCode::new("de"));
        state.record_pack_attempt(&failed, 42).unwrap();
        std::fs::create_dir_all(root.path().join("labels/fr/news")).unwrap();

        let details = synchronizer(root.path(), state).module_pack_details().unwrap();

        let keys: Vec<&str> = details.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["backend", "news"]);

        let news = &details[1];
        assert_eq!(news.title.as_deref(), Some("The news module"));
        assert_eq!(
            news.packs,
            vec![
                PackDetails {
                    language: LanguageCode::new("fr"),
                    exists: true,
                    last_update: None,
                },
                PackDetails {
                    language: LanguageCode::new("de"),
                    exists: false,
                    last_update: Some(42),
                },
            ]
        );
    }
}
