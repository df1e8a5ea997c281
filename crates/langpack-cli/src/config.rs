use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use langpack::{BaseUrlRewrite, Language, ModuleKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Top-level application configuration.
///
/// Relative paths are resolved against the working directory, which is
/// expected to be the root of the host installation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Extracted packs go to `{labels_root}/{language}/{module}/`.
    pub labels_root: PathBuf,
    /// Scratch space; downloads are staged in `{var_root}/transient/`.
    pub var_root: PathBuf,
    /// SQLite file holding the base URL and update timestamps.
    pub database: PathBuf,
    pub host_version: String,
    /// Modules below this directory download major-versioned packs.
    pub builtin_modules_dir: PathBuf,
    /// Directories whose subdirectories are the installed modules.
    pub module_roots: Vec<PathBuf>,
    pub active_languages: Vec<String>,
    pub beta_translation_server: bool,
    pub request_timeout_secs: u64,
    /// Module key to base URL, for modules served from somewhere else.
    pub mirror_overrides: BTreeMap<String, String>,
    /// Languages in addition to the built-in table.
    pub languages: Vec<LanguageEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            labels_root: PathBuf::from("var/labels"),
            var_root: PathBuf::from("var"),
            database: PathBuf::from("var/langpack.db"),
            host_version: "12.4.0".into(),
            builtin_modules_dir: PathBuf::from("typo3/sysext"),
            module_roots: vec![PathBuf::from("typo3/sysext"), PathBuf::from("typo3conf/ext")],
            active_languages: Vec::new(),
            beta_translation_server: false,
            request_timeout_secs: 30,
            mirror_overrides: BTreeMap::new(),
            languages: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn extra_languages(&self) -> Vec<Language> {
        self.languages
            .iter()
            .map(|entry| Language::new(entry.code.as_str(), entry.name.as_str()))
            .collect()
    }
}

/// An extra catalog language.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageEntry {
    pub code: String,
    pub name: String,
}

/// Sends the listed modules to their own base URL and leaves the rest alone.
pub struct MirrorOverrides(BTreeMap<String, String>);

impl MirrorOverrides {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self(overrides)
    }
}

impl BaseUrlRewrite for MirrorOverrides {
    fn rewrite(&self, base_url: &str, module: &ModuleKey) -> String {
        match self.0.get(module.as_str()) {
            Some(url) => url.clone(),
            None => base_url.to_owned(),
        }
    }
}

/// Config file path: `~/.config/langpack/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("langpack").join("config.toml"))
}

/// Load config from `path` (or the default location), falling back to
/// defaults if the file is missing or cannot be parsed.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => config_path(),
    };

    if let Some(path) = path
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded configuration");
                return config;
            }
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config, using defaults"
            ),
        }
    }

    AppConfig::default()
}
