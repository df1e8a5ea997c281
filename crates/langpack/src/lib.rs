pub mod batch;
pub mod catalog;
pub mod extract;
pub mod install;
pub mod locales;
pub mod locator;
pub mod mirror;
pub mod pack;
pub mod report;
pub mod state;
pub mod sync;
pub mod transport;

pub use batch::{PackResult, UpdateReport};
pub use catalog::{ActiveLanguages, InstalledModule, Language, LocaleCatalog, ModuleRegistry};
pub use extract::{ExtractionError, extract, extract_file};
pub use install::InstallError;
pub use locales::BuiltinLocales;
pub use locator::{build_package_url, major_version};
pub use mirror::{BETA_BASE_URL, DEFAULT_BASE_URL, DecodeError, MIRRORS_INDEX_URL, MirrorResolver};
pub use pack::{LanguageCode, ModuleKey, PackIdentity, SyncOutcome, ValidationError};
pub use report::{LanguageDetails, ModulePackDetails, PackDetails};
pub use state::{PackState, StateError, StateStore, days_since, now_epoch_secs};
pub use sync::{BaseUrlRewrite, KeepBaseUrl, PackSynchronizer, SyncError, SyncSettings};
pub use transport::{Response, Transport, TransportError};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
