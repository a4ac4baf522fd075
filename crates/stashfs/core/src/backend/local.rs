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

// Local-filesystem backend
// Stores files under a configured base directory; relative paths map 1:1
// onto paths below it.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;
use walkdir::WalkDir;

use crate::backend::{Backend, BackendError, BackendResult, FileInfo, FileStream};

pub const BACKEND_NAME: &str = "local";

/// Content type used when nothing can be guessed from the extension.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Configuration for the local backend.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LocalConfig {
    /// Directory all stored files live under; created when missing.
    pub base_path: PathBuf,
}

/// Backend storing files directly on the local filesystem.
pub struct LocalBackend {
    config: LocalConfig,
    /// Serializes mutating operations; readers go straight to the fs.
    write_lock: Mutex<()>,
}

impl LocalBackend {
    /// Creates the backend, bootstrapping the base directory when missing.
    pub fn new(config: LocalConfig) -> BackendResult<Self> {
        if config.base_path.as_os_str().is_empty() {
            return Err(BackendError::Config("base_path must not be empty".to_string()));
        }

        let existed = config.base_path.exists();
        if !existed {
            fs::create_dir_all(&config.base_path)?;
        }

        debug!(backend = BACKEND_NAME, basepath = %config.base_path.display(), existed, "starting backend");

        Ok(Self {
            config,
            write_lock: Mutex::new(()),
        })
    }

    /// Resolves a backend-relative path below the base directory.
    fn full_path(&self, path: &str) -> PathBuf {
        self.config.base_path.join(path.trim_start_matches('/'))
    }
}

impl Backend for LocalBackend {
    fn list(&self, path: &str, recursive: bool) -> BackendResult<Vec<String>> {
        let root = self.full_path(path);
        debug!(backend = BACKEND_NAME, action = "list", path = %root.display(), recursive);

        let mut walker = WalkDir::new(&root).min_depth(1);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker.into_iter().filter_map(Result::ok) {
            if entry.file_type().is_file() {
                let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                files.push(relative.to_string_lossy().into_owned());
            }
        }

        Ok(files)
    }

    fn stat(&self, path: &str) -> BackendResult<FileInfo> {
        let full = self.full_path(path);
        debug!(backend = BACKEND_NAME, action = "stat", path = %full.display());

        let metadata = match fs::metadata(&full) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BackendError::NotFound(full));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(FileInfo {
            last_modified: DateTime::<Utc>::from(metadata.modified()?),
            etag: String::new(),
            content_type: guess_content_type(&full),
            size: metadata.len(),
        })
    }

    fn read(&self, path: &str) -> BackendResult<Vec<u8>> {
        let full = self.full_path(path);
        debug!(backend = BACKEND_NAME, action = "read", path = %full.display());

        if !full.is_file() {
            return Err(BackendError::NotFound(full));
        }
        Ok(fs::read(&full)?)
    }

    fn read_stream(&self, path: &str) -> BackendResult<FileStream> {
        let full = self.full_path(path);
        debug!(backend = BACKEND_NAME, action = "read_stream", path = %full.display());

        let info = self.stat(path)?;
        let file = File::open(&full)?;

        Ok(FileStream {
            size: info.size,
            content_type: info.content_type,
            content: Box::new(file),
        })
    }

    fn write(&self, path: &str, data: &[u8]) -> BackendResult<()> {
        let full = self.full_path(path);
        debug!(backend = BACKEND_NAME, action = "write", path = %full.display(), size = data.len());

        let _guard = self.write_lock.lock();
        create_parent_dirs(&full)?;
        fs::write(&full, data)?;
        Ok(())
    }

    fn write_stream(&self, path: &str, stream: &mut dyn Read, len: u64) -> BackendResult<()> {
        let full = self.full_path(path);
        debug!(backend = BACKEND_NAME, action = "write_stream", path = %full.display(), len);

        let _guard = self.write_lock.lock();
        create_parent_dirs(&full)?;
        let mut file = File::create(&full)?;
        io::copy(&mut stream.take(len), &mut file)?;
        Ok(())
    }

    fn rename(&self, src: &str, dst: &str) -> BackendResult<()> {
        let full_src = self.full_path(src);
        let full_dst = self.full_path(dst);
        debug!(backend = BACKEND_NAME, action = "rename", src = %full_src.display(), dst = %full_dst.display());

        let _guard = self.write_lock.lock();
        if !full_src.exists() {
            return Err(BackendError::NotFound(full_src));
        }
        create_parent_dirs(&full_dst)?;
        fs::rename(&full_src, &full_dst)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> BackendResult<()> {
        let full = self.full_path(path);
        debug!(backend = BACKEND_NAME, action = "delete", path = %full.display());

        let _guard = self.write_lock.lock();
        match fs::remove_file(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BackendError::NotFound(full)),
            Err(e) => Err(e.into()),
        }
    }
}

fn create_parent_dirs(path: &Path) -> BackendResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Guesses the content type from the file extension.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}
