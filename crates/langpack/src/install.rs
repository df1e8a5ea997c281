use std::path::{Path, PathBuf};

use tracing::warn;

use crate::pack::ModuleKey;

/// Errors that can occur while moving an extracted pack into place.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("could not clear previous content at {}: {source}", path.display())]
    Retire {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not move extracted content to {}: {source}", path.display())]
    Promote {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("archive has no {0}/ directory")]
    MissingModule(ModuleKey),

    #[error("archive for {module} contains unexpected top-level entry {name:?}")]
    ForeignEntry { module: ModuleKey, name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory an archive is unpacked into before it replaces anything.
///
/// It sits inside the language directory so the final move is a rename on
/// the same filesystem. One staging directory exists per module, so packs of
/// different modules never collide.
pub fn staging_dir(language_dir: &Path, module: &ModuleKey) -> PathBuf {
    language_dir.join(format!(".{module}.staging"))
}

fn retired_path(language_dir: &Path, name: &str) -> PathBuf {
    language_dir.join(format!(".{name}.retired"))
}

/// Remove whatever an interrupted earlier run left at `path`.
pub fn clear(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else if path.exists() {
        std::fs::remove_file(path)
    } else {
        Ok(())
    }
}

/// Swap `staging/{module}` onto `language_dir/{module}`, then remove
/// `staging`.
///
/// The staging tree must hold the module directory and nothing else, so a
/// pack never touches another module's labels. The previous directory is
/// renamed aside, the new one renamed in and only then is the old one
/// deleted, so readers see either the old or the new tree. If the new tree
/// cannot be moved in, the old one is put back.
pub fn promote(
    staging: &Path,
    language_dir: &Path,
    module: &ModuleKey,
) -> Result<PathBuf, InstallError> {
    let mut incoming = None;
    for entry in std::fs::read_dir(staging)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name != module.as_str() || !entry.path().is_dir() {
            return Err(InstallError::ForeignEntry {
                module: module.clone(),
                name,
            });
        }
        incoming = Some(entry.path());
    }
    let incoming = incoming.ok_or_else(|| InstallError::MissingModule(module.clone()))?;

    let target = language_dir.join(module.as_str());
    replace(
        &incoming,
        &target,
        &retired_path(language_dir, module.as_str()),
    )?;

    std::fs::remove_dir(staging)?;
    Ok(target)
}

fn replace(incoming: &Path, target: &Path, retired: &Path) -> Result<(), InstallError> {
    clear(retired).map_err(|source| InstallError::Retire {
        path: retired.to_path_buf(),
        source,
    })?;

    let had_previous = target.exists();
    if had_previous {
        std::fs::rename(target, retired).map_err(|source| InstallError::Retire {
            path: target.to_path_buf(),
            source,
        })?;
    }

    if let Err(e) = std::fs::rename(incoming, target) {
        if had_previous && let Err(restore) = std::fs::rename(retired, target) {
            warn!(
                path = %target.display(),
                error = %restore,
                "could not restore previous content"
            );
        }
        return Err(InstallError::Promote {
            path: target.to_path_buf(),
            source: e,
        });
    }

    if had_previous && let Err(e) = clear(retired) {
        warn!(
            path = %retired.display(),
            error = %e,
            "could not remove replaced content; it will be removed on the next sync"
        );
    }

    Ok(())
}
