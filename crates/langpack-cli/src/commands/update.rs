use anyhow::Result;
use langpack::{LanguageCode, ModuleKey, PackSynchronizer, SyncOutcome};

use super::format;

/// Update every selected pack and print one line per pack plus a summary.
pub async fn run(sync: &PackSynchronizer, languages: &[String], modules: &[String]) -> Result<()> {
    let languages: Vec<LanguageCode> = languages.iter().map(LanguageCode::new).collect();
    let modules: Vec<ModuleKey> = modules.iter().map(ModuleKey::new).collect();

    let report = sync.update_all(&languages, &modules).await?;

    println!("Using {}", report.base_url);
    for result in &report.results {
        println!(
            "  {:<40}  {}",
            result.identity.to_string(),
            format::outcome_label(result.outcome)
        );
    }
    println!(
        "\n{} installed, {} updated, {} failed",
        report.count(SyncOutcome::New),
        report.count(SyncOutcome::Updated),
        report.count(SyncOutcome::Failed)
    );

    if report.all_failed() {
        anyhow::bail!("all {} language packs failed", report.results.len());
    }
    Ok(())
}
