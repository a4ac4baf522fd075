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

// Status code paired with one exclusively owned ByteList
// The unit the storage operations hand back to their callers.

use super::byte_list::ByteList;

/// A status code plus one exclusively owned [`ByteList`].
///
/// Storage operations build a `Reply`, set its code at creation, append
/// zero or more entries, and return it. Every list operation delegates to
/// the inner list with an identical contract; the inner list lives exactly
/// as long as the reply and is never shared outside it.
#[derive(Debug)]
pub struct Reply {
    code: i32,
    entries: ByteList,
}

impl Reply {
    /// Creates an empty reply with the given capacity hint and status code.
    ///
    /// Returns `None` when the inner list cannot be allocated; the failure
    /// propagates one level up without leaking anything.
    pub fn with_capacity(capacity: usize, code: i32) -> Option<Self> {
        Some(Self {
            code,
            entries: ByteList::with_capacity(capacity)?,
        })
    }

    /// The status code this reply was created with.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Number of entries in the owned list.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Appends a copied byte entry; see [`ByteList::push`].
    pub fn push(&mut self, bytes: &[u8]) -> usize {
        self.entries.push(bytes)
    }

    /// Appends a string entry, convenience over [`Reply::push`].
    pub fn push_str(&mut self, text: &str) -> usize {
        self.entries.push(text.as_bytes())
    }

    /// Entry bytes at `index`, or the shared empty placeholder out of range.
    pub fn get(&self, index: i64) -> &[u8] {
        self.entries.get(index)
    }

    /// Entry length at `index`, or 0 out of range.
    pub fn len_at(&self, index: i64) -> usize {
        self.entries.len_at(index)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_stable_until_destruction() {
        let mut reply = Reply::with_capacity(0, 42).unwrap();
        assert_eq!(reply.code(), 42);

        reply.push(b"entry");
        reply.push_str("another");
        assert_eq!(reply.code(), 42);
    }

    #[test]
    fn test_delegates_to_inner_list() {
        let mut reply = Reply::with_capacity(2, 0).unwrap();
        assert_eq!(reply.count(), 0);

        assert_eq!(reply.push(b"bytes"), 1);
        assert_eq!(reply.push_str("text"), 2);
        assert_eq!(reply.count(), 2);

        assert_eq!(reply.get(0), b"bytes");
        assert_eq!(reply.get(1), b"text");
        assert_eq!(reply.len_at(1), 4);

        // Out-of-range reads resolve to neutral defaults, same as the list.
        assert_eq!(reply.get(-3), b"");
        assert_eq!(reply.len_at(99), 0);
    }

    #[test]
    fn test_negative_code_round_trips() {
        let reply = Reply::with_capacity(0, -7).unwrap();
        assert_eq!(reply.code(), -7);
    }
}
