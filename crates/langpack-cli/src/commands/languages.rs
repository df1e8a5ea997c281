use anyhow::Result;
use langpack::PackSynchronizer;

use super::format;

/// Print every known language with its activation and update state.
pub fn run(sync: &PackSynchronizer) -> Result<()> {
    let details = sync.language_details()?;

    let name_width = details
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(0);

    for language in &details {
        let marker = if language.active { "*" } else { " " };
        println!(
            "{marker} {:<6}  {:<width$}  {:<12}  {}",
            language.code.as_str(),
            language.name,
            format::age(language.last_update),
            format::code_list(&language.dependencies),
            width = name_width
        );
    }

    let active = details.iter().filter(|d| d.active).count();
    println!("\n{} languages ({active} active)", details.len());
    Ok(())
}
