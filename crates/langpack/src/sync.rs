use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::catalog::{ActiveLanguages, InstalledModule, LocaleCatalog, ModuleRegistry};
use crate::extract::{ExtractionError, extract_file};
use crate::install::{self, InstallError};
use crate::locator::{build_package_url, major_version};
use crate::mirror::{BETA_BASE_URL, DEFAULT_BASE_URL, MirrorResolver};
use crate::pack::{LanguageCode, ModuleKey, PackIdentity, SyncOutcome, ValidationError};
use crate::state::{PackState, StateError, StateStore, now_epoch_secs};
use crate::transport::{Transport, TransportError};

/// Errors surfaced to callers of the synchronizer. Download and extraction
/// problems are not errors; they turn into [`SyncOutcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Rewrites the download base URL per module, e.g. to point one module at a
/// private mirror.
pub trait BaseUrlRewrite: Send + Sync {
    fn rewrite(&self, base_url: &str, module: &ModuleKey) -> String;
}

impl<F> BaseUrlRewrite for F
where
    F: Fn(&str, &ModuleKey) -> String + Send + Sync,
{
    fn rewrite(&self, base_url: &str, module: &ModuleKey) -> String {
        self(base_url, module)
    }
}

/// The rewrite used when none is registered: returns the base URL unchanged.
pub struct KeepBaseUrl;

impl BaseUrlRewrite for KeepBaseUrl {
    fn rewrite(&self, base_url: &str, _module: &ModuleKey) -> String {
        base_url.to_owned()
    }
}

/// Installation layout and host facts the synchronizer works against.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Extracted packs live in `{labels_root}/{language}/{module}/`.
    pub labels_root: PathBuf,
    /// Downloads are staged in `{var_root}/transient/`.
    pub var_root: PathBuf,
    /// Modules installed below this directory are built-in.
    pub builtin_modules_root: PathBuf,
    /// Full host version, e.g. `12.4.3`.
    pub host_version: String,
    /// Use the beta translation server in place of the default one.
    pub beta_channel: bool,
}

/// Why a single pack attempt failed.
#[derive(Debug, thiserror::Error)]
enum PackFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("server returned an empty archive")]
    EmptyArchive,

    #[error("could not stage archive at {}: {source}", path.display())]
    Staging {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Downloads and installs language packs for one host installation.
///
/// Holds no mutable state of its own: packs of different (module, language)
/// pairs may be synced concurrently. Callers must not sync the same pair
/// twice at once.
pub struct PackSynchronizer {
    settings: SyncSettings,
    catalog: Arc<dyn LocaleCatalog>,
    active: ActiveLanguages,
    modules: Arc<dyn ModuleRegistry>,
    state: Arc<dyn StateStore>,
    transport: Arc<dyn Transport>,
    rewrite: Arc<dyn BaseUrlRewrite>,
}

impl PackSynchronizer {
    pub fn new(
        settings: SyncSettings,
        catalog: Arc<dyn LocaleCatalog>,
        active: ActiveLanguages,
        modules: Arc<dyn ModuleRegistry>,
        state: Arc<dyn StateStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            settings,
            catalog,
            active,
            modules,
            state,
            transport,
            rewrite: Arc::new(KeepBaseUrl),
        }
    }

    /// Register the hook that may rewrite the base URL per module.
    pub fn with_rewrite(mut self, rewrite: impl BaseUrlRewrite + 'static) -> Self {
        self.rewrite = Arc::new(rewrite);
        self
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn active_languages(&self) -> &ActiveLanguages {
        &self.active
    }

    pub(crate) fn catalog(&self) -> &dyn LocaleCatalog {
        self.catalog.as_ref()
    }

    pub(crate) fn modules(&self) -> &dyn ModuleRegistry {
        self.modules.as_ref()
    }

    pub(crate) fn state(&self) -> &dyn StateStore {
        self.state.as_ref()
    }

    /// A mirror resolver sharing this synchronizer's transport and state.
    pub fn mirror_resolver(&self) -> MirrorResolver {
        MirrorResolver::new(Arc::clone(&self.transport), Arc::clone(&self.state))
    }

    /// Directory holding the extracted files of one pack.
    pub fn target_dir(&self, identity: &PackIdentity) -> PathBuf {
        self.language_dir(&identity.language)
            .join(identity.module.as_str())
    }

    /// Where the downloaded archive is kept while it is being unpacked.
    pub fn staging_archive(&self, identity: &PackIdentity) -> PathBuf {
        self.settings
            .var_root
            .join("transient")
            .join(identity.archive_name())
    }

    fn language_dir(&self, language: &LanguageCode) -> PathBuf {
        self.settings.labels_root.join(language.as_str())
    }

    /// Check that `language` is known and active.
    pub fn validate_language(&self, language: &LanguageCode) -> Result<(), ValidationError> {
        if !self.catalog.is_available(language) {
            return Err(ValidationError::UnknownLanguage(language.clone()));
        }
        if !self.active.contains(language) {
            return Err(ValidationError::InactiveLanguage(language.clone()));
        }
        Ok(())
    }

    /// Look up an active module by key.
    pub fn validate_module(&self, module: &ModuleKey) -> Result<InstalledModule, ValidationError> {
        self.modules
            .find(module)
            .ok_or_else(|| ValidationError::InactiveModule(module.clone()))
    }

    /// Base URL for `module`: the stored one, swapped for the beta channel
    /// if enabled, then passed through the rewrite hook.
    fn base_url_for(&self, module: &ModuleKey) -> Result<String, StateError> {
        let mut base_url = self.state.base_url()?.ok_or(StateError::BaseUrlMissing)?;

        if base_url == DEFAULT_BASE_URL && self.settings.beta_channel {
            base_url = BETA_BASE_URL.to_owned();
        }

        Ok(self.rewrite.rewrite(&base_url, module))
    }

    /// Download and install the pack of `module` in `language`.
    ///
    /// Invalid input and a missing base URL are returned as errors before
    /// any I/O. Everything after that is reported through the outcome; a
    /// failed attempt stores its time under `{language}-{module}`.
    pub async fn sync_pack(
        &self,
        module: &ModuleKey,
        language: &LanguageCode,
    ) -> Result<SyncOutcome, SyncError> {
        self.validate_language(language)?;
        let installed = self.validate_module(module)?;
        let base_url = self.base_url_for(module)?;

        let package_url = build_package_url(
            &base_url,
            module,
            language,
            major_version(&self.settings.host_version),
            installed.is_builtin(&self.settings.builtin_modules_root),
        )?;

        let identity = PackIdentity::new(module.clone(), language.clone());
        let attempted = if self.target_dir(&identity).is_dir() {
            SyncOutcome::Updated
        } else {
            SyncOutcome::New
        };

        match self.download_and_install(&identity, &package_url).await {
            Ok(()) => {
                info!(pack = %identity, outcome = %attempted, "language pack installed");
                Ok(attempted)
            }
            Err(failure) => {
                match &failure {
                    PackFailure::Transport(e) => {
                        warn!(pack = %identity, error = %e, "language pack download failed")
                    }
                    other => {
                        error!(pack = %identity, error = %other, "language pack install failed")
                    }
                }
                self.state.record_pack_attempt(&identity, now_epoch_secs())?;
                Ok(SyncOutcome::Failed)
            }
        }
    }

    async fn download_and_install(
        &self,
        identity: &PackIdentity,
        url: &str,
    ) -> Result<(), PackFailure> {
        debug!(pack = %identity, %url, "downloading language pack");

        let response = self.transport.get(url).await?;
        if !response.is_ok() {
            return Err(TransportError::Status {
                url: url.to_owned(),
                status: response.status,
            }
            .into());
        }
        if response.body.is_empty() {
            return Err(PackFailure::EmptyArchive);
        }

        let archive = self.staging_archive(identity);
        stage_archive(&archive, &response.body)?;

        let language_dir = self.language_dir(&identity.language);
        let staging = install::staging_dir(&language_dir, &identity.module);

        let unpacked = install::clear(&staging)
            .map_err(|source| PackFailure::Staging {
                path: staging.clone(),
                source,
            })
            .and_then(|()| extract_file(&archive, &staging).map_err(PackFailure::from));
        let removed = std::fs::remove_file(&archive).map_err(|source| PackFailure::Staging {
            path: archive.clone(),
            source,
        });

        if let Err(failure) = unpacked.and(removed) {
            discard_staging(&staging);
            return Err(failure);
        }

        match install::promote(&staging, &language_dir, &identity.module) {
            Ok(installed) => {
                debug!(pack = %identity, path = %installed.display(), "staged content promoted");
                Ok(())
            }
            Err(e) => {
                discard_staging(&staging);
                Err(e.into())
            }
        }
    }

    /// Stamp each of `languages` as updated now.
    ///
    /// Languages are processed in order; the first inactive one aborts the
    /// call, leaving the ones before it stamped.
    pub fn mark_languages_updated(&self, languages: &[LanguageCode]) -> Result<(), SyncError> {
        let now = now_epoch_secs();
        for language in languages {
            if !self.active.contains(language) {
                return Err(ValidationError::InactiveLanguage(language.clone()).into());
            }
            self.state.mark_language_updated(language, now)?;
        }
        Ok(())
    }
}

fn discard_staging(staging: &std::path::Path) {
    if let Err(e) = install::clear(staging) {
        warn!(
            path = %staging.display(),
            error = %e,
            "could not remove staging directory; it will be cleared on the next sync"
        );
    }
}

fn stage_archive(path: &std::path::Path, bytes: &[u8]) -> Result<(), PackFailure> {
    let staging = |source| PackFailure::Staging {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(staging)?;
    }
    std::fs::write(path, bytes).map_err(staging)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::catalog::Language;
    use crate::state::NAMESPACE;
    use crate::test_support::{
        FakeTransport, MemoryState, StaticCatalog, StaticModules, zip_archive,
    };
    use crate::transport::Response;

    use super::*;

    const BACKEND_FR: &str = "https://typo3.org/fileadmin/ter/b/a/backend-l10n/backend-l10n-fr.v12.zip";
    const NEWS_FR: &str = "https://typo3.org/fileadmin/ter/n/e/news-l10n/news-l10n-fr.zip";

    struct Fixture {
        root: tempfile::TempDir,
        state: Arc<MemoryState>,
        transport: Arc<FakeTransport>,
    }

    impl Fixture {
        fn new(transport: FakeTransport) -> Self {
            let state = Arc::new(MemoryState::default());
            state.set_base_url(DEFAULT_BASE_URL).unwrap();
            Self {
                root: tempfile::tempdir().unwrap(),
                state,
                transport: Arc::new(transport),
            }
        }

        fn labels(&self) -> PathBuf {
            self.root.path().join("labels")
        }

        fn settings(&self, beta_channel: bool) -> SyncSettings {
            SyncSettings {
                labels_root: self.labels(),
                var_root: self.root.path().join("var"),
                builtin_modules_root: self.root.path().join("sysext"),
                host_version: "12.4.3".into(),
                beta_channel,
            }
        }

        fn synchronizer(&self) -> PackSynchronizer {
            self.synchronizer_with(false)
        }

        fn synchronizer_with(&self, beta_channel: bool) -> PackSynchronizer {
            let catalog = StaticCatalog::new(vec![
                Language::new("de", "German"),
                Language::new("fr", "French"),
                Language::new("it", "Italian"),
            ]);
            let modules = StaticModules::new(vec![
                InstalledModule::new("backend", self.root.path().join("sysext/backend")),
                InstalledModule::new("news", self.root.path().join("ext/news")),
            ]);
            PackSynchronizer::new(
                self.settings(beta_channel),
                Arc::new(catalog),
                ActiveLanguages::new(["de", "fr"]),
                Arc::new(modules),
                Arc::clone(&self.state) as Arc<dyn StateStore>,
                Arc::clone(&self.transport) as Arc<dyn Transport>,
            )
        }

        fn attempt(&self, key: &str) -> Option<serde_json::Value> {
            self.state.get(NAMESPACE, key).unwrap()
        }
    }

    fn backend_pack() -> Vec<u8> {
        zip_archive(&[
            ("backend/", ""),
            ("backend/Resources/Private/Language/fr.locallang.xlf", "<xliff>fr</xliff>"),
            ("backend/Resources/Private/Language/fr.locallang_core.xlf", "<xliff>core</xliff>"),
        ])
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn fr() -> LanguageCode {
        LanguageCode::new("fr")
    }

    fn backend() -> ModuleKey {
        ModuleKey::new("backend")
    }

    #[tokio::test]
    async fn inactive_language_is_rejected_without_io() {
        let fixture = Fixture::new(FakeTransport::default());
        let sync = fixture.synchronizer();

        let result = sync.sync_pack(&backend(), &LanguageCode::new("it")).await;

        assert!(matches!(
            result,
            Err(SyncError::Validation(ValidationError::InactiveLanguage(_)))
        ));
        assert!(fixture.transport.requests().is_empty());
        assert!(!fixture.labels().exists());
        assert!(fixture.attempt("it-backend").is_none());
    }

    #[tokio::test]
    async fn unknown_language_is_rejected() {
        let fixture = Fixture::new(FakeTransport::default());
        let result = fixture
            .synchronizer()
            .sync_pack(&backend(), &LanguageCode::new("xx"))
            .await;

        assert!(matches!(
            result,
            Err(SyncError::Validation(ValidationError::UnknownLanguage(_)))
        ));
    }

    #[tokio::test]
    async fn inactive_module_is_rejected() {
        let fixture = Fixture::new(FakeTransport::default());
        let result = fixture
            .synchronizer()
            .sync_pack(&ModuleKey::new("felogin"), &fr())
            .await;

        assert!(matches!(
            result,
            Err(SyncError::Validation(ValidationError::InactiveModule(_)))
        ));
        assert!(fixture.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_base_url_is_a_state_error() {
        let fixture = Fixture::new(FakeTransport::default());
        fixture
            .state
            .set(NAMESPACE, crate::state::BASE_URL_KEY, serde_json::Value::Null)
            .unwrap();

        let result = fixture.synchronizer().sync_pack(&backend(), &fr()).await;

        assert!(matches!(result, Err(SyncError::State(StateError::BaseUrlMissing))));
        assert!(fixture.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn new_pack_is_extracted_and_staging_removed() {
        let fixture = Fixture::new(
            FakeTransport::default().respond(BACKEND_FR, Response::new(200, backend_pack())),
        );
        let sync = fixture.synchronizer();

        let outcome = sync.sync_pack(&backend(), &fr()).await.unwrap();

        assert_eq!(outcome, SyncOutcome::New);
        let target = fixture.labels().join("fr/backend/Resources/Private/Language");
        assert_eq!(
            std::fs::read_to_string(target.join("fr.locallang.xlf")).unwrap(),
            "<xliff>fr</xliff>"
        );
        assert!(target.join("fr.locallang_core.xlf").is_file());

        let identity = PackIdentity::new(backend(), fr());
        assert!(!sync.staging_archive(&identity).exists());
        assert!(!fixture.labels().join("fr/.backend.staging").exists());
        assert!(fixture.attempt("fr-backend").is_none());
        assert!(fixture.attempt("fr").is_none());
    }

    #[tokio::test]
    async fn existing_pack_is_replaced() {
        let fixture = Fixture::new(
            FakeTransport::default().respond(BACKEND_FR, Response::new(200, backend_pack())),
        );
        let stale = fixture.labels().join("fr/backend/stale.xlf");
        write(&stale, "old");

        let outcome = fixture
            .synchronizer()
            .sync_pack(&backend(), &fr())
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Updated);
        assert!(!stale.exists());
        assert!(
            fixture
                .labels()
                .join("fr/backend/Resources/Private/Language/fr.locallang.xlf")
                .is_file()
        );
    }

    #[tokio::test]
    async fn not_found_keeps_previous_extraction_and_records_attempt() {
        let fixture = Fixture::new(
            FakeTransport::default().respond(BACKEND_FR, Response::new(404, Vec::new())),
        );
        let previous = fixture.labels().join("fr/backend/locallang.xlf");
        write(&previous, "keep me");

        let outcome = fixture
            .synchronizer()
            .sync_pack(&backend(), &fr())
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Failed);
        assert_eq!(std::fs::read_to_string(&previous).unwrap(), "keep me");
        assert!(fixture.attempt("fr-backend").and_then(|v| v.as_i64()).is_some());
    }

    #[tokio::test]
    async fn unreachable_transport_fails_every_time_and_restamps() {
        let fixture = Fixture::new(FakeTransport::default());
        let previous = fixture.labels().join("fr/backend/locallang.xlf");
        write(&previous, "keep me");
        let sync = fixture.synchronizer();

        for _ in 0..2 {
            fixture
                .state
                .set(NAMESPACE, "fr-backend", serde_json::Value::from(0))
                .unwrap();

            let outcome = sync.sync_pack(&backend(), &fr()).await.unwrap();

            assert_eq!(outcome, SyncOutcome::Failed);
            let stamped = fixture.attempt("fr-backend").and_then(|v| v.as_i64()).unwrap();
            assert!(stamped > 0);
            assert_eq!(std::fs::read_to_string(&previous).unwrap(), "keep me");
        }
        assert_eq!(fixture.transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn empty_body_fails() {
        let fixture = Fixture::new(
            FakeTransport::default().respond(BACKEND_FR, Response::new(200, Vec::new())),
        );

        let outcome = fixture
            .synchronizer()
            .sync_pack(&backend(), &fr())
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Failed);
        assert!(!fixture.labels().join("fr/backend").exists());
    }

    #[tokio::test]
    async fn malformed_archive_keeps_previous_extraction() {
        let broken = zip_archive(&[("backend/locallang.xlf", "new"), ("nofile.xlf", "bad")]);
        let fixture =
            Fixture::new(FakeTransport::default().respond(BACKEND_FR, Response::new(200, broken)));
        let previous = fixture.labels().join("fr/backend/locallang.xlf");
        write(&previous, "keep me");
        let sync = fixture.synchronizer();

        let outcome = sync.sync_pack(&backend(), &fr()).await.unwrap();

        assert_eq!(outcome, SyncOutcome::Failed);
        assert_eq!(std::fs::read_to_string(&previous).unwrap(), "keep me");
        assert!(!fixture.labels().join("fr/nofile.xlf").exists());
        assert!(!fixture.labels().join("fr/.backend.staging").exists());
        assert!(!sync.staging_archive(&PackIdentity::new(backend(), fr())).exists());
        assert!(fixture.attempt("fr-backend").is_some());
    }

    #[tokio::test]
    async fn pack_with_other_module_directories_fails_and_leaves_them_alone() {
        let pack = zip_archive(&[("backend/a.xlf", "b"), ("news/extra.xlf", "x")]);
        let fixture =
            Fixture::new(FakeTransport::default().respond(BACKEND_FR, Response::new(200, pack)));
        let news = fixture.labels().join("fr/news/locallang.xlf");
        write(&news, "news pack");

        let outcome = fixture
            .synchronizer()
            .sync_pack(&backend(), &fr())
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Failed);
        assert_eq!(std::fs::read_to_string(&news).unwrap(), "news pack");
        assert!(!fixture.labels().join("fr/news/extra.xlf").exists());
        assert!(!fixture.labels().join("fr/backend").exists());
        assert!(!fixture.labels().join("fr/.backend.staging").exists());
    }

    #[tokio::test]
    async fn pack_without_its_module_directory_is_not_reported_as_updated() {
        let pack = zip_archive(&[("other/locallang.xlf", "x")]);
        let fixture =
            Fixture::new(FakeTransport::default().respond(BACKEND_FR, Response::new(200, pack)));
        let previous = fixture.labels().join("fr/backend/locallang.xlf");
        write(&previous, "keep me");

        let outcome = fixture
            .synchronizer()
            .sync_pack(&backend(), &fr())
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Failed);
        assert_eq!(std::fs::read_to_string(&previous).unwrap(), "keep me");
        assert!(!fixture.labels().join("fr/other").exists());
        assert!(fixture.attempt("fr-backend").is_some());
    }

    #[tokio::test]
    async fn non_builtin_modules_use_unversioned_url() {
        let pack = zip_archive(&[("news/locallang.xlf", "actualités")]);
        let fixture =
            Fixture::new(FakeTransport::default().respond(NEWS_FR, Response::new(200, pack)));

        let outcome = fixture
            .synchronizer()
            .sync_pack(&ModuleKey::new("news"), &fr())
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::New);
        assert_eq!(fixture.transport.requests(), vec![NEWS_FR.to_owned()]);
    }

    #[tokio::test]
    async fn beta_channel_replaces_default_base_url() {
        let beta_url = format!("{BETA_BASE_URL}b/a/backend-l10n/backend-l10n-fr.v12.zip");
        let fixture = Fixture::new(
            FakeTransport::default().respond(&beta_url, Response::new(200, backend_pack())),
        );

        let outcome = fixture
            .synchronizer_with(true)
            .sync_pack(&backend(), &fr())
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::New);
        assert_eq!(fixture.transport.requests(), vec![beta_url]);
    }

    #[tokio::test]
    async fn beta_channel_leaves_mirrors_alone() {
        let fixture = Fixture::new(FakeTransport::default());
        fixture.state.set_base_url("https://mirror.example.org/ter/").unwrap();

        fixture
            .synchronizer_with(true)
            .sync_pack(&backend(), &fr())
            .await
            .unwrap();

        assert_eq!(
            fixture.transport.requests(),
            vec!["https://mirror.example.org/ter/b/a/backend-l10n/backend-l10n-fr.v12.zip".to_owned()]
        );
    }

    #[tokio::test]
    async fn rewrite_hook_sees_module_and_changes_base() {
        let fixture = Fixture::new(FakeTransport::default());
        let sync = fixture
            .synchronizer()
            .with_rewrite(|base: &str, module: &ModuleKey| {
                if module.as_str() == "news" {
                    "https://cdn.example.org/l10n/".to_owned()
                } else {
                    base.to_owned()
                }
            });

        sync.sync_pack(&ModuleKey::new("news"), &fr()).await.unwrap();
        sync.sync_pack(&backend(), &fr()).await.unwrap();

        assert_eq!(
            fixture.transport.requests(),
            vec![
                "https://cdn.example.org/l10n/n/e/news-l10n/news-l10n-fr.zip".to_owned(),
                BACKEND_FR.to_owned(),
            ]
        );
    }

    #[test]
    fn mark_languages_updated_stamps_bare_language_keys() {
        let fixture = Fixture::new(FakeTransport::default());
        let sync = fixture.synchronizer();

        sync.mark_languages_updated(&[LanguageCode::new("de"), fr()]).unwrap();

        assert!(fixture.state.language_updated_at(&LanguageCode::new("de")).unwrap().is_some());
        assert!(fixture.state.language_updated_at(&fr()).unwrap().is_some());
        assert!(fixture.attempt("fr-backend").is_none());
    }

    #[test]
    fn mark_languages_updated_rejects_inactive_language() {
        let fixture = Fixture::new(FakeTransport::default());
        let sync = fixture.synchronizer();

        let result = sync.mark_languages_updated(&[fr(), LanguageCode::new("it")]);

        assert!(matches!(
            result,
            Err(SyncError::Validation(ValidationError::InactiveLanguage(code))) if code.as_str() == "it"
        ));
        assert!(fixture.state.language_updated_at(&LanguageCode::new("it")).unwrap().is_none());
    }
}
