use std::path::{Path, PathBuf};

use langpack::{InstalledModule, ModuleRegistry};
use serde::Deserialize;
use tracing::{debug, warn};

/// The subset of `composer.json` used to title a module.
#[derive(Debug, Deserialize)]
struct ComposerManifest {
    description: Option<String>,
}

/// Modules found by scanning the configured module directories. Every
/// subdirectory of a root is an installed module named after the directory.
pub struct FsModuleRegistry {
    modules: Vec<InstalledModule>,
}

impl FsModuleRegistry {
    /// Scan `roots` in order. A key found in several roots keeps its first
    /// location; missing roots are skipped.
    pub fn scan(roots: &[PathBuf]) -> Self {
        let mut modules: Vec<InstalledModule> = Vec::new();

        for root in roots {
            let entries = match std::fs::read_dir(root) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!(root = %root.display(), error = %e, "skipping module root");
                    continue;
                }
            };

            for entry in entries.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().into_owned();
                if !path.is_dir() || name.starts_with('.') {
                    continue;
                }
                if modules.iter().any(|m| m.key.as_str() == name) {
                    continue;
                }

                let mut module = InstalledModule::new(name, &path);
                module.title = read_title(&path);
                modules.push(module);
            }
        }

        modules.sort_by(|a, b| a.key.cmp(&b.key));
        Self { modules }
    }
}

impl ModuleRegistry for FsModuleRegistry {
    fn active_modules(&self) -> Vec<InstalledModule> {
        self.modules.clone()
    }
}

fn read_title(module_dir: &Path) -> Option<String> {
    let path = module_dir.join("composer.json");
    let contents = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<ComposerManifest>(&contents) {
        Ok(manifest) => manifest.description.filter(|d| !d.trim().is_empty()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable composer.json");
            None
        }
    }
}
