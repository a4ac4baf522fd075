// StashFS
// Copyright (C) 2025 StashFS Contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

/// Storage backend abstraction
///
/// A backend stores named files under caller-chosen relative paths. All
/// operations are synchronous; richer failure modes than the container
/// layer's sentinels are reported through [`BackendError`].
pub mod local; // Local-filesystem backend

pub use local::{LocalBackend, LocalConfig};

use std::io::{self, Read};
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Error types specific to storage backends
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("path {0} does not exist")]
    NotFound(PathBuf),

    #[error("path {0} is not valid UTF-8 text")]
    NotUtf8(PathBuf),

    #[error("invalid backend configuration: {0}")]
    Config(String),
}

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Metadata for one stored file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FileInfo {
    pub last_modified: DateTime<Utc>,
    /// Content hash where the backend provides one; empty otherwise.
    pub etag: String,
    /// Guessed from the file extension.
    pub content_type: String,
    pub size: u64,
}

/// An open file handed out for streaming reads.
pub struct FileStream {
    pub size: u64,
    pub content_type: String,
    pub content: Box<dyn Read + Send>,
}

/// Synchronous file-storage operations over backend-relative paths.
pub trait Backend: Send + Sync {
    /// Lists stored files below `path`, relative to the backend root.
    /// Directories are walked but not reported. When `recursive` is false
    /// only direct children are returned.
    fn list(&self, path: &str, recursive: bool) -> BackendResult<Vec<String>>;

    /// Metadata for one stored file.
    fn stat(&self, path: &str) -> BackendResult<FileInfo>;

    /// Reads a whole file into memory.
    fn read(&self, path: &str) -> BackendResult<Vec<u8>>;

    /// Reads a whole file as UTF-8 text.
    fn read_to_string(&self, path: &str) -> BackendResult<String> {
        let data = self.read(path)?;
        String::from_utf8(data).map_err(|_| BackendError::NotUtf8(PathBuf::from(path)))
    }

    /// Opens a file for streaming, with its size and content type.
    fn read_stream(&self, path: &str) -> BackendResult<FileStream>;

    /// Writes a whole file, creating missing parent directories and
    /// replacing any existing content.
    fn write(&self, path: &str, data: &[u8]) -> BackendResult<()>;

    /// Writes UTF-8 text, convenience over [`Backend::write`].
    fn write_str(&self, path: &str, content: &str) -> BackendResult<()> {
        self.write(path, content.as_bytes())
    }

    /// Writes `len` bytes drained from `stream`.
    fn write_stream(&self, path: &str, stream: &mut dyn Read, len: u64) -> BackendResult<()>;

    /// Moves a stored file to a new relative path.
    fn rename(&self, src: &str, dst: &str) -> BackendResult<()>;

    /// Removes a stored file.
    fn delete(&self, path: &str) -> BackendResult<()>;
}
