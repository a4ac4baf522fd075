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

// Growable ordered list of independently owned byte buffers
// Entries are binary-safe and length-tracked; insertion order is the only order.

/// Capacity used when a list is created with a requested capacity of zero.
pub const DEFAULT_CAPACITY: usize = 8;

/// Shared immutable placeholder handed out for out-of-range reads.
/// Returned by reference, never owned by the caller.
const EMPTY_ENTRY: &[u8] = &[];

/// One element of a [`ByteList`]: an owned buffer plus its exact length.
#[derive(Debug, Clone)]
struct Entry {
    bytes: Box<[u8]>,
}

/// Growable ordered collection of independently owned byte buffers.
///
/// Entries are appended one at a time, never reordered or mutated in place.
/// Capacity only grows, doubling each time it is exhausted. Writes signal
/// allocation failure through a sentinel return and leave the list
/// untouched; reads never fail, resolving out-of-range indices to neutral
/// defaults instead.
#[derive(Debug)]
pub struct ByteList {
    entries: Vec<Entry>,
}

impl ByteList {
    /// Creates an empty list with room for `capacity` entries.
    ///
    /// A requested capacity of zero is coerced to [`DEFAULT_CAPACITY`].
    /// Returns `None` only when the backing allocation fails; nothing is
    /// leaked in that case.
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
        let mut entries = Vec::new();
        if entries.try_reserve_exact(capacity).is_err() {
            return None;
        }
        Some(Self { entries })
    }

    /// Number of populated entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Current slot capacity. Grows by doubling, never shrinks.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Copies `bytes` into a newly owned entry and appends it.
    ///
    /// On success returns the new count, i.e. the 1-based position of the
    /// entry just inserted. On allocation failure returns 0 and the
    /// previously visible entries are untouched: both the doubled backing
    /// store and the entry buffer are staged with fallible reservations
    /// before anything is committed.
    pub fn push(&mut self, bytes: &[u8]) -> usize {
        if self.entries.len() == self.entries.capacity() {
            // Double the backing store; on failure the vec is left as-is.
            let grow_by = self.entries.len();
            if self.entries.try_reserve_exact(grow_by).is_err() {
                return 0;
            }
        }

        let mut buf = Vec::new();
        if buf.try_reserve_exact(bytes.len()).is_err() {
            return 0;
        }
        buf.extend_from_slice(bytes);

        // Capacity was ensured above, so this cannot reallocate.
        self.entries.push(Entry { bytes: buf.into_boxed_slice() });
        self.entries.len()
    }

    /// Returns the entry at `index`, or the shared empty placeholder for
    /// any out-of-range index, negative indices included.
    pub fn get(&self, index: i64) -> &[u8] {
        match self.entry_at(index) {
            Some(entry) => &entry.bytes,
            None => EMPTY_ENTRY,
        }
    }

    /// Returns the exact byte length of the entry at `index`, or 0 for any
    /// out-of-range index.
    pub fn len_at(&self, index: i64) -> usize {
        self.entry_at(index).map_or(0, |entry| entry.bytes.len())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|entry| &*entry.bytes)
    }

    fn entry_at(&self, index: i64) -> Option<&Entry> {
        usize::try_from(index).ok().and_then(|i| self.entries.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_is_empty() {
        for capacity in [0, 1, 8, 100] {
            let list = ByteList::with_capacity(capacity).unwrap();
            assert_eq!(list.count(), 0);
        }
    }

    #[test]
    fn test_zero_capacity_defaults_to_eight() {
        let list = ByteList::with_capacity(0).unwrap();
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);

        let explicit = ByteList::with_capacity(8).unwrap();
        assert_eq!(list.capacity(), explicit.capacity());
    }

    #[test]
    fn test_push_returns_one_based_position() {
        let mut list = ByteList::with_capacity(4).unwrap();
        assert_eq!(list.push(b"first"), 1);
        assert_eq!(list.push(b"second"), 2);
        assert_eq!(list.count(), 2);
    }

    #[test]
    fn test_entries_survive_growth_unchanged() {
        let mut list = ByteList::with_capacity(2).unwrap();
        list.push(b"alpha");
        list.push(b"beta");
        assert_eq!(list.capacity(), 2);

        // Third push exhausts the initial capacity and doubles it.
        assert_eq!(list.push(b"gamma"), 3);
        assert_eq!(list.capacity(), 4);

        assert_eq!(list.get(0), b"alpha");
        assert_eq!(list.get(1), b"beta");
        assert_eq!(list.get(2), b"gamma");
        assert_eq!(list.len_at(0), 5);
    }

    #[test]
    fn test_growth_scenario_from_default_capacity() {
        let mut list = ByteList::with_capacity(0).unwrap();
        assert_eq!(list.push(b"ab"), 1);
        for _ in 0..7 {
            list.push(b"c");
        }
        // Eighth entry fills the default capacity without growing it.
        assert_eq!(list.count(), 8);
        assert_eq!(list.capacity(), 8);

        // Ninth entry triggers exactly one doubling.
        assert_eq!(list.push(b"c"), 9);
        assert_eq!(list.capacity(), 16);
        assert_eq!(list.get(0), b"ab");
        assert_eq!(list.len_at(0), 2);
    }

    #[test]
    fn test_embedded_zero_bytes_are_preserved() {
        let mut list = ByteList::with_capacity(0).unwrap();
        list.push(&[0x41, 0x00, 0x42]);
        assert_eq!(list.len_at(0), 3);
        assert_eq!(list.get(0), &[0x41, 0x00, 0x42]);
    }

    #[test]
    fn test_empty_entry_is_allowed() {
        let mut list = ByteList::with_capacity(0).unwrap();
        assert_eq!(list.push(b""), 1);
        assert_eq!(list.len_at(0), 0);
        assert_eq!(list.get(0), b"");
    }

    #[test]
    fn test_out_of_range_reads_return_neutral_defaults() {
        let mut list = ByteList::with_capacity(0).unwrap();
        list.push(b"only");

        for index in [-1, -100, 1, 2, i64::MAX] {
            assert_eq!(list.get(index), b"");
            assert_eq!(list.len_at(index), 0);
        }

        let empty = ByteList::with_capacity(0).unwrap();
        assert_eq!(empty.get(0), b"");
        assert_eq!(empty.len_at(0), 0);
    }

    #[test]
    fn test_iter_follows_insertion_order() {
        let mut list = ByteList::with_capacity(2).unwrap();
        list.push(b"one");
        list.push(b"two");
        list.push(b"three");

        let collected: Vec<&[u8]> = list.iter().collect();
        assert_eq!(collected, vec![&b"one"[..], &b"two"[..], &b"three"[..]]);
    }
}
