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

//! StashFS core library
//!
//! Synchronous file storage behind a pluggable backend, with the
//! result-passing containers its operations report through:
//! - `retlist`: the growable byte-buffer list and its status-code reply
//! - `backend`: the storage trait and the local-filesystem implementation
//! - `store`: the facade wiring the two together

pub mod backend;
pub mod retlist;
pub mod store;

// Re-export main components for easier access
pub use backend::{Backend, BackendError, BackendResult, FileInfo, FileStream, LocalBackend, LocalConfig};
pub use retlist::{ByteList, ListHandle, Reply, ReplyHandle};
pub use store::{BackendKind, CODE_ERR, CODE_OK, Store};
