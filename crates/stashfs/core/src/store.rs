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

// Store facade
// One entry point over a pluggable backend, plus the reply producers that
// package operation outcomes into the container layer.

use std::io::Read;

use tracing::{debug, warn};

use crate::backend::{Backend, BackendResult, FileInfo, FileStream, LocalBackend, LocalConfig};
use crate::retlist::Reply;

/// Reply status code for a successful operation.
pub const CODE_OK: i32 = 0;
/// Reply status code for a failed operation.
pub const CODE_ERR: i32 = 1;

/// Timestamp layout used for the last-modified entry of a stat reply.
const STAT_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Kind of backend a store was built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
}

/// Facade over one owned storage backend.
///
/// Delegates the storage operations to the backend and, for consumers that
/// want result objects instead of `Result`s, packages list/read/stat
/// outcomes into [`Reply`] values.
pub struct Store {
    kind: BackendKind,
    backend: Box<dyn Backend>,
}

impl Store {
    /// Builds a store over a local-filesystem backend.
    pub fn local(config: LocalConfig) -> BackendResult<Self> {
        debug!(backend = "local", "initializing store");
        Ok(Self {
            kind: BackendKind::Local,
            backend: Box::new(LocalBackend::new(config)?),
        })
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn list(&self, path: &str, recursive: bool) -> BackendResult<Vec<String>> {
        self.backend.list(path, recursive)
    }

    pub fn stat(&self, path: &str) -> BackendResult<FileInfo> {
        self.backend.stat(path)
    }

    pub fn read(&self, path: &str) -> BackendResult<Vec<u8>> {
        self.backend.read(path)
    }

    pub fn read_to_string(&self, path: &str) -> BackendResult<String> {
        self.backend.read_to_string(path)
    }

    pub fn read_stream(&self, path: &str) -> BackendResult<FileStream> {
        self.backend.read_stream(path)
    }

    pub fn write(&self, path: &str, data: &[u8]) -> BackendResult<()> {
        self.backend.write(path, data)
    }

    pub fn write_str(&self, path: &str, content: &str) -> BackendResult<()> {
        self.backend.write_str(path, content)
    }

    pub fn write_stream(&self, path: &str, stream: &mut dyn Read, len: u64) -> BackendResult<()> {
        self.backend.write_stream(path, stream, len)
    }

    pub fn rename(&self, src: &str, dst: &str) -> BackendResult<()> {
        self.backend.rename(src, dst)
    }

    pub fn delete(&self, path: &str) -> BackendResult<()> {
        self.backend.delete(path)
    }

    /// Lists files below `prefix` as a reply, one entry per path, code
    /// [`CODE_OK`]. A backend failure yields an absent reply; an
    /// allocation failure while building the reply does too.
    pub fn list_reply(&self, prefix: &str, recursive: bool) -> Option<Reply> {
        let files = match self.list(prefix, recursive) {
            Ok(files) => files,
            Err(e) => {
                warn!(prefix, error = %e, "unable to list files");
                return None;
            }
        };

        let mut reply = Reply::with_capacity(files.len(), CODE_OK)?;
        for file in &files {
            if reply.push_str(file) == 0 {
                return None;
            }
        }
        Some(reply)
    }

    /// Reads one file as a reply: code [`CODE_OK`] with a single entry
    /// holding the file bytes, or code [`CODE_ERR`] with a single entry
    /// holding the error text.
    pub fn read_reply(&self, path: &str) -> Option<Reply> {
        match self.read(path) {
            Ok(content) => {
                let mut reply = Reply::with_capacity(1, CODE_OK)?;
                if reply.push(&content) == 0 {
                    return None;
                }
                Some(reply)
            }
            Err(e) => {
                warn!(path, error = %e, "unable to read file");
                error_reply(path, &e.to_string(), false)
            }
        }
    }

    /// Stats one file as a reply. On success, code [`CODE_OK`] with five
    /// entries: the path, the last-modified time as `dd/mm/yyyy HH:MM:SS`,
    /// the etag, the content type, and the decimal size. On failure, code
    /// [`CODE_ERR`] with the path and the error text.
    pub fn stat_reply(&self, path: &str) -> Option<Reply> {
        match self.stat(path) {
            Ok(info) => {
                let mut reply = Reply::with_capacity(5, CODE_OK)?;
                let entries = [
                    path.to_string(),
                    info.last_modified.format(STAT_TIME_FORMAT).to_string(),
                    info.etag,
                    info.content_type,
                    info.size.to_string(),
                ];
                for entry in &entries {
                    if reply.push_str(entry) == 0 {
                        return None;
                    }
                }
                Some(reply)
            }
            Err(e) => {
                warn!(path, error = %e, "unable to stat file");
                error_reply(path, &e.to_string(), true)
            }
        }
    }
}

/// Failure reply: optionally the offending path, then the error text.
fn error_reply(path: &str, message: &str, include_path: bool) -> Option<Reply> {
    let mut reply = Reply::with_capacity(1, CODE_ERR)?;
    if include_path && reply.push_str(path) == 0 {
        return None;
    }
    if reply.push_str(message) == 0 {
        return None;
    }
    Some(reply)
}
