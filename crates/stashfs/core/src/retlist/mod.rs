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

/// Result-passing containers for the storage operations
///
/// This module provides the container layer the storage layer reports
/// through:
/// - A growable ordered list of owned, binary-safe byte buffers
/// - A reply pairing that list with an integer status code
/// - Handle traits lifting both over `Option`, so an absent or destroyed
///   handle resolves every operation to a harmless neutral default
pub mod byte_list; // Growable byte-buffer list
pub mod reply; // Status code + owned list

// Re-export main components for easier access
pub use byte_list::{ByteList, DEFAULT_CAPACITY};
pub use reply::Reply;

/// List operations lifted over an optional handle.
///
/// Writes fail soft-but-local: `push` on an absent handle returns the 0
/// failure sentinel and mutates nothing. Reads never fail: an absent
/// handle yields the same neutral defaults as an out-of-range index
/// (zero count, zero length, the shared empty entry). `destroy` releases
/// the contents and leaves the handle absent; destroying an already
/// absent handle is a no-op, so a redundant destroy is always safe and
/// every later operation keeps resolving to the neutral defaults.
pub trait ListHandle {
    /// Number of entries, 0 when absent.
    fn count(&self) -> usize;

    /// Entry bytes at `index`; the shared empty placeholder when absent
    /// or out of range.
    fn get(&self, index: i64) -> &[u8];

    /// Entry length at `index`; 0 when absent or out of range.
    fn len_at(&self, index: i64) -> usize;

    /// Appends a copied entry; 1-based position on success, 0 when absent
    /// or on allocation failure.
    fn push(&mut self, bytes: &[u8]) -> usize;

    /// Releases the contents and leaves the handle absent. Idempotent.
    fn destroy(&mut self);
}

impl ListHandle for Option<ByteList> {
    fn count(&self) -> usize {
        match self {
            Some(list) => list.count(),
            None => 0,
        }
    }

    fn get(&self, index: i64) -> &[u8] {
        match self {
            Some(list) => list.get(index),
            None => &[],
        }
    }

    fn len_at(&self, index: i64) -> usize {
        match self {
            Some(list) => list.len_at(index),
            None => 0,
        }
    }

    fn push(&mut self, bytes: &[u8]) -> usize {
        match self {
            Some(list) => list.push(bytes),
            None => 0,
        }
    }

    fn destroy(&mut self) {
        *self = None;
    }
}

impl ListHandle for Option<Reply> {
    fn count(&self) -> usize {
        match self {
            Some(reply) => reply.count(),
            None => 0,
        }
    }

    fn get(&self, index: i64) -> &[u8] {
        match self {
            Some(reply) => reply.get(index),
            None => &[],
        }
    }

    fn len_at(&self, index: i64) -> usize {
        match self {
            Some(reply) => reply.len_at(index),
            None => 0,
        }
    }

    fn push(&mut self, bytes: &[u8]) -> usize {
        match self {
            Some(reply) => reply.push(bytes),
            None => 0,
        }
    }

    fn destroy(&mut self) {
        *self = None;
    }
}

/// Status-code accessor lifted over an optional reply handle.
pub trait ReplyHandle {
    /// The stored status code, or 0 when the handle is absent.
    ///
    /// A reply created with code 0 and an absent handle are therefore
    /// indistinguishable through this accessor alone; callers that need
    /// the distinction must check presence first or reserve nonzero
    /// codes. Kept deliberately, existing consumers read 0 as success.
    fn code(&self) -> i32;
}

impl ReplyHandle for Option<Reply> {
    fn code(&self) -> i32 {
        match self {
            Some(reply) => reply.code(),
            None => 0,
        }
    }
}
