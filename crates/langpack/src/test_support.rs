use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Mutex;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::Value;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::catalog::{InstalledModule, Language, LocaleCatalog, ModuleRegistry};
use crate::pack::LanguageCode;
use crate::state::{StateError, StateStore};
use crate::transport::{Response, Transport, TransportError};

/// In-memory state store for testing.
#[derive(Default)]
pub struct MemoryState {
    values: Mutex<HashMap<(String, String), Value>>,
}

impl StateStore for MemoryState {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StateError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StateError::Storage(e.to_string()))?;
        Ok(values.get(&(namespace.to_owned(), key.to_owned())).cloned())
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<(), StateError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StateError::Storage(e.to_string()))?;
        values.insert((namespace.to_owned(), key.to_owned()), value);
        Ok(())
    }
}

/// Transport that answers from canned responses and records every request.
///
/// URLs without a canned response fail with a network error.
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn respond(mut self, url: &str, response: Response) -> Self {
        self.responses.insert(url.to_owned(), response);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_owned());
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Network {
                url: url.to_owned(),
                message: "connection refused".to_owned(),
            })
    }
}

/// Fixed language catalog.
pub struct StaticCatalog {
    languages: Vec<Language>,
    dependencies: HashMap<LanguageCode, Vec<LanguageCode>>,
}

impl StaticCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self {
            languages,
            dependencies: HashMap::new(),
        }
    }

    pub fn with_dependency(mut self, code: &str, dependency: &str) -> Self {
        self.dependencies
            .entry(LanguageCode::new(code))
            .or_default()
            .push(LanguageCode::new(dependency));
        self
    }
}

impl LocaleCatalog for StaticCatalog {
    fn available_languages(&self) -> Vec<Language> {
        self.languages.clone()
    }

    fn locale_dependencies(&self, code: &LanguageCode) -> Vec<LanguageCode> {
        self.dependencies.get(code).cloned().unwrap_or_default()
    }
}

/// Fixed set of active modules.
pub struct StaticModules {
    modules: Vec<InstalledModule>,
}

impl StaticModules {
    pub fn new(modules: Vec<InstalledModule>) -> Self {
        Self { modules }
    }
}

impl ModuleRegistry for StaticModules {
    fn active_modules(&self) -> Vec<InstalledModule> {
        self.modules.clone()
    }
}

/// Build a zip archive in memory. Names ending in `/` become directories.
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("add directory entry");
        } else {
            writer.start_file(*name, options).expect("start file entry");
            writer
                .write_all(content.as_bytes())
                .expect("write file entry");
        }
    }

    writer.finish().expect("finish archive").into_inner()
}

/// Gzip-compress `text`.
pub fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .expect("write gzip payload");
    encoder.finish().expect("finish gzip stream")
}
