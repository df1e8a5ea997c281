use anyhow::Result;
use langpack::{LanguageCode, ModuleKey, PackSynchronizer, StateError, SyncError, SyncOutcome};

use super::format;

/// Sync one pack and print its outcome. Resolves the mirror first when no
/// base URL has been stored yet.
pub async fn run(sync: &PackSynchronizer, module: &str, language: &str) -> Result<()> {
    let module = ModuleKey::new(module);
    let language = LanguageCode::new(language);

    let outcome = match sync.sync_pack(&module, &language).await {
        Err(SyncError::State(StateError::BaseUrlMissing)) => {
            eprintln!("No base URL stored yet. Resolving mirror...");
            sync.mirror_resolver().resolve_base_url().await?;
            sync.sync_pack(&module, &language).await?
        }
        other => other?,
    };

    println!("{module}/{language}: {}", format::outcome_label(outcome));

    if outcome == SyncOutcome::Failed {
        anyhow::bail!("language pack {module}/{language} could not be installed");
    }
    Ok(())
}
