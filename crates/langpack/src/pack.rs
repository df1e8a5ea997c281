use std::fmt;

/// ISO identifier of a human language, e.g. `de` or `pt_BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of an installed module, e.g. `backend`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(String);

impl ModuleKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The unit of synchronization: one module's translations in one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackIdentity {
    pub module: ModuleKey,
    pub language: LanguageCode,
}

impl PackIdentity {
    pub fn new(module: ModuleKey, language: LanguageCode) -> Self {
        Self { module, language }
    }

    /// State store key of the per-pack attempt timestamp: `{language}-{module}`.
    pub fn record_key(&self) -> String {
        format!("{}-{}", self.language, self.module)
    }

    /// File name of the downloaded archive: `{module}-l10n-{language}.zip`.
    pub fn archive_name(&self) -> String {
        format!("{}-l10n-{}.zip", self.module, self.language)
    }
}

impl fmt::Display for PackIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module, self.language)
    }
}

/// Result of a single pack synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncOutcome {
    /// No previous extraction existed; the pack is now installed.
    New,
    /// A previous extraction was replaced.
    Updated,
    Failed,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Updated => "update",
            Self::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed)
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input rejected before any I/O takes place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("language {0} is not available")]
    UnknownLanguage(LanguageCode),

    #[error("language {0} is not active")]
    InactiveLanguage(LanguageCode),

    #[error("module {0} is not loaded")]
    InactiveModule(ModuleKey),

    #[error("module key {0:?} needs at least two characters")]
    MalformedModuleKey(String),
}
