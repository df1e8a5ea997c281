use anyhow::{Context, Result};
use langpack::PackSynchronizer;

/// Resolve the download base URL, store it and print it.
pub async fn run(sync: &PackSynchronizer) -> Result<()> {
    let base_url = sync
        .mirror_resolver()
        .resolve_base_url()
        .await
        .context("failed to store the base URL")?;

    println!("{base_url}");
    Ok(())
}
