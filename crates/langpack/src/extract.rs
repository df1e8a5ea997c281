use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

/// Errors that can occur while unpacking a pack archive.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unable to open archive: {0}")]
    Open(#[source] ZipError),

    #[error("failed to read archive entry #{index}: {source}")]
    Entry { index: usize, source: ZipError },

    #[error("module directory missing in archive entry {0:?}")]
    MissingDirectory(String),

    #[error("archive entry {0:?} escapes the destination directory")]
    UnsafePath(String),

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where a single archive entry lands, relative to the destination.
#[derive(Debug, PartialEq, Eq)]
enum EntryTarget {
    Directory(PathBuf),
    File(PathBuf),
}

/// Unpack the zip archive at `archive` into `destination`.
pub fn extract_file(archive: &Path, destination: &Path) -> Result<(), ExtractionError> {
    let file = File::open(archive).map_err(|source| ExtractionError::Read {
        path: archive.to_path_buf(),
        source,
    })?;
    extract(BufReader::new(file), destination)
}

/// Unpack a zip archive into `destination`, creating it if absent.
///
/// Every entry must sit below at least one named directory. Names ending
/// in `/` only create directories. All names are checked before anything is written, so an
/// archive with a malformed or escaping entry leaves nothing behind.
pub fn extract<R: Read + Seek>(reader: R, destination: &Path) -> Result<(), ExtractionError> {
    let mut archive = ZipArchive::new(reader).map_err(ExtractionError::Open)?;

    let mut targets = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let name = archive
            .name_for_index(index)
            .ok_or(ExtractionError::Entry {
                index,
                source: ZipError::FileNotFound,
            })?;
        targets.push(entry_target(name)?);
    }

    create_dir(destination)?;

    for (index, target) in targets.into_iter().enumerate() {
        match target {
            EntryTarget::Directory(relative) => create_dir(&destination.join(relative))?,
            EntryTarget::File(relative) => {
                let path = destination.join(relative);
                if let Some(parent) = path.parent() {
                    create_dir(parent)?;
                }

                let mut entry = archive
                    .by_index(index)
                    .map_err(|source| ExtractionError::Entry { index, source })?;
                let mut out = File::create(&path).map_err(|source| ExtractionError::Write {
                    path: path.clone(),
                    source,
                })?;
                std::io::copy(&mut entry, &mut out)
                    .map_err(|source| ExtractionError::Write { path, source })?;
            }
        }
    }

    Ok(())
}

fn create_dir(path: &Path) -> Result<(), ExtractionError> {
    std::fs::create_dir_all(path).map_err(|source| ExtractionError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Map an entry name onto a path below the destination root.
/// Empty and `.` segments are dropped; anything that could climb out of the
/// root is rejected.
fn entry_target(name: &str) -> Result<EntryTarget, ExtractionError> {
    if name.starts_with('/') || name.contains('\\') {
        return Err(ExtractionError::UnsafePath(name.to_owned()));
    }

    let Some((directories, file_name)) = name.rsplit_once('/') else {
        return Err(ExtractionError::MissingDirectory(name.to_owned()));
    };

    let mut relative = PathBuf::new();
    for segment in directories.split('/') {
        match segment {
            "" | "." => continue,
            segment => relative.push(safe_segment(name, segment)?),
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(ExtractionError::MissingDirectory(name.to_owned()));
    }

    if file_name.is_empty() {
        return Ok(EntryTarget::Directory(relative));
    }

    relative.push(safe_segment(name, file_name)?);
    Ok(EntryTarget::File(relative))
}

fn safe_segment<'a>(name: &str, segment: &'a str) -> Result<&'a str, ExtractionError> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(segment),
        _ => Err(ExtractionError::UnsafePath(name.to_owned())),
    }
}
