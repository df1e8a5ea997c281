use anyhow::Result;
use langpack::PackSynchronizer;

use super::format;

/// Print every translatable module with the state of its packs.
pub fn run(sync: &PackSynchronizer) -> Result<()> {
    let details = sync.module_pack_details()?;

    if sync.active_languages().is_empty() {
        eprintln!("No active languages configured.");
    }

    for module in &details {
        println!("{}  {}", module.key, format::title(module.title.as_deref()));
        for pack in &module.packs {
            let state = if pack.exists { "installed" } else { "missing" };
            let failure = match pack.last_update {
                Some(_) => format!("last failure {}", format::age(pack.last_update)),
                None => String::new(),
            };
            println!("  {:<6}  {:<9}  {failure}", pack.language.as_str(), state);
        }
    }

    println!("\n{} modules with translations", details.len());
    Ok(())
}
