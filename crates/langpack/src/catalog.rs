use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::pack::{LanguageCode, ModuleKey};

/// Directory, relative to a module's root, holding its translatable resources.
pub const LANGUAGE_RESOURCES_DIR: &str = "Resources/Private/Language";

/// A language known to the locale catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: LanguageCode,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: LanguageCode::new(code),
            name: name.into(),
        }
    }
}

/// Enumerates the human languages the host application knows about.
pub trait LocaleCatalog: Send + Sync {
    fn available_languages(&self) -> Vec<Language>;

    fn is_available(&self, code: &LanguageCode) -> bool {
        self.available_languages()
            .iter()
            .any(|language| &language.code == code)
    }

    /// Languages whose labels are used as fallback for `code`.
    fn locale_dependencies(&self, _code: &LanguageCode) -> Vec<LanguageCode> {
        Vec::new()
    }
}

impl<T: LocaleCatalog + ?Sized> LocaleCatalog for Arc<T> {
    fn available_languages(&self) -> Vec<Language> {
        (**self).available_languages()
    }

    fn is_available(&self, code: &LanguageCode) -> bool {
        (**self).is_available(code)
    }

    fn locale_dependencies(&self, code: &LanguageCode) -> Vec<LanguageCode> {
        (**self).locale_dependencies(code)
    }
}

/// The languages enabled for this installation, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveLanguages(Vec<LanguageCode>);

impl ActiveLanguages {
    /// Empty codes are dropped, duplicates keep their first position.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut active: Vec<LanguageCode> = Vec::new();
        for code in codes {
            let code = code.into();
            if code.is_empty() {
                continue;
            }
            let code = LanguageCode::new(code);
            if !active.contains(&code) {
                active.push(code);
            }
        }
        Self(active)
    }

    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.0.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageCode> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[LanguageCode] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// An installed, active module of the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledModule {
    pub key: ModuleKey,
    /// Root directory of the module's installation.
    pub path: PathBuf,
    pub title: Option<String>,
}

impl InstalledModule {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: ModuleKey::new(key),
            path: path.into(),
            title: None,
        }
    }

    /// Built-in modules live below the host's built-in modules directory and
    /// have their packs versioned against the host's major release.
    pub fn is_builtin(&self, builtin_root: &Path) -> bool {
        self.path.starts_with(builtin_root)
    }

    /// True if the module ships at least one `.xlf` file below
    /// `Resources/Private/Language/`.
    pub fn has_translations(&self) -> bool {
        let dir = self.path.join(LANGUAGE_RESOURCES_DIR);
        if !dir.is_dir() {
            return false;
        }

        WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .any(|entry| {
                entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "xlf")
            })
    }
}

/// Enumerates the modules currently active in the host application.
pub trait ModuleRegistry: Send + Sync {
    fn active_modules(&self) -> Vec<InstalledModule>;

    fn find(&self, key: &ModuleKey) -> Option<InstalledModule> {
        self.active_modules()
            .into_iter()
            .find(|module| &module.key == key)
    }
}

impl<T: ModuleRegistry + ?Sized> ModuleRegistry for Arc<T> {
    fn active_modules(&self) -> Vec<InstalledModule> {
        (**self).active_modules()
    }

    fn find(&self, key: &ModuleKey) -> Option<InstalledModule> {
        (**self).find(key)
    }
}
