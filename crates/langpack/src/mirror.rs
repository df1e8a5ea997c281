use std::io::Read;
use std::sync::Arc;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::state::{PackState, StateError, StateStore};
use crate::transport::Transport;

/// Gzip-compressed XML index listing the distribution mirrors.
pub const MIRRORS_INDEX_URL: &str = "https://repositories.typo3.org/mirrors.xml.gz";

/// Base URL used whenever no mirror can be discovered.
pub const DEFAULT_BASE_URL: &str = "https://typo3.org/fileadmin/ter/";

/// Base URL of the beta translation channel.
pub const BETA_BASE_URL: &str = "https://beta-translation.typo3.org/fileadmin/ter/";

/// Errors that can occur while reading the mirror index.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("mirror index is not valid gzip: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("mirror index is not valid XML: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("mirror index names no mirror with both host and path")]
    NoMirror,
}

/// `<mirrors><mirror><host/><path/>...</mirror>...</mirrors>`
#[derive(Debug, Deserialize)]
struct MirrorIndex {
    #[serde(rename = "mirror", default)]
    mirrors: Vec<MirrorEntry>,
}

#[derive(Debug, Deserialize)]
struct MirrorEntry {
    #[serde(default)]
    host: String,
    #[serde(default)]
    path: String,
}

/// Parse a gzip-compressed mirror index into a download base URL.
pub fn decode_mirror_index(compressed: &[u8]) -> Result<String, DecodeError> {
    let mut xml = String::new();
    GzDecoder::new(compressed).read_to_string(&mut xml)?;

    let index: MirrorIndex = quick_xml::de::from_str(&xml)?;

    index
        .mirrors
        .iter()
        .map(|mirror| (mirror.host.trim(), mirror.path.trim()))
        .find(|(host, path)| !host.is_empty() && !path.is_empty())
        .map(|(host, path)| format!("https://{host}{path}"))
        .ok_or(DecodeError::NoMirror)
}

/// Discovers the download base URL and caches it in the state store.
pub struct MirrorResolver {
    transport: Arc<dyn Transport>,
    state: Arc<dyn StateStore>,
    index_url: String,
}

impl MirrorResolver {
    pub fn new(transport: Arc<dyn Transport>, state: Arc<dyn StateStore>) -> Self {
        Self {
            transport,
            state,
            index_url: MIRRORS_INDEX_URL.to_owned(),
        }
    }

    /// Read the mirror index from somewhere other than the public default.
    pub fn with_index_url(mut self, index_url: impl Into<String>) -> Self {
        self.index_url = index_url.into();
        self
    }

    /// Resolve the base URL and persist it.
    ///
    /// Mirror discovery problems never surface: they are logged and the
    /// default base URL is used instead. Only a failure to persist the
    /// result is returned.
    pub async fn resolve_base_url(&self) -> Result<String, StateError> {
        let base_url = match self.discover().await {
            Some(url) => url,
            None => DEFAULT_BASE_URL.to_owned(),
        };

        self.state.set_base_url(&base_url)?;
        info!(%base_url, "language pack base URL updated");
        Ok(base_url)
    }

    async fn discover(&self) -> Option<String> {
        debug!(url = %self.index_url, "requesting mirror index");

        let response = match self.transport.get(&self.index_url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "failed to download list of mirrors");
                return None;
            }
        };

        if !response.is_ok() {
            warn!(
                url = %self.index_url,
                status = response.status,
                "requesting mirror index was not successful"
            );
            return None;
        }

        match decode_mirror_index(&response.body) {
            Ok(url) => Some(url),
            Err(e) => {
                error!(error = %e, "failed to read list of mirrors");
                None
            }
        }
    }
}
