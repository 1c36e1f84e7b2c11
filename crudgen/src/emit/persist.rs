//! Atomic file writes
//!
//! Content goes to a temporary file next to the target and is renamed over it,
//! so a failed write leaves the previous file (or no file) in place.

use crate::error::{GeneratorError, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// What a write did to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    /// The file did not exist
    Created,
    /// The file existed with different content
    Updated,
    /// The file existed with identical content (it is still rewritten)
    Unchanged,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        })
    }
}

/// Read a file if it exists
///
/// # Errors
///
/// Returns an error for any failure other than the file being absent.
pub fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(GeneratorError::io(path, err)),
    }
}

/// Write `contents` to `path`, creating parent directories as needed
///
/// The target is always overwritten; the returned status only reports how the
/// new content relates to what was there.
///
/// # Errors
///
/// Returns an [`GeneratorError::Io`] naming the failing path if a directory
/// cannot be created or the file cannot be written or moved into place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<WriteStatus> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| GeneratorError::io(parent, err))?;

    let previous = fs::metadata(path).ok();
    let status = match read_existing(path)? {
        None => WriteStatus::Created,
        Some(existing) if existing == contents => WriteStatus::Unchanged,
        Some(_) => WriteStatus::Updated,
    };

    let mut file = NamedTempFile::new_in(parent).map_err(|err| GeneratorError::io(parent, err))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|err| GeneratorError::io(file.path(), err))?;

    // Temp files are created owner-only; give the result normal file permissions.
    let permissions = match previous {
        Some(metadata) => metadata.permissions(),
        None => default_permissions(file.as_file())?,
    };
    file.as_file()
        .set_permissions(permissions)
        .map_err(|err| GeneratorError::io(file.path(), err))?;

    file.persist(path)
        .map_err(|err| GeneratorError::io(path, err.error))?;

    tracing::debug!(path = %path.display(), %status, bytes = contents.len(), "Wrote file");
    Ok(status)
}

#[cfg(unix)]
fn default_permissions(_file: &fs::File) -> Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(file: &fs::File) -> Result<fs::Permissions> {
    let mut permissions = file
        .metadata()
        .map_err(|err| GeneratorError::io(".", err))?
        .permissions();
    permissions.set_readonly(false);
    Ok(permissions)
}
