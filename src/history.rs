//! Command history stored in a fixed-capacity circular byte arena.
//!
//! Every entry is stored as one length byte followed by the entry bytes, written
//! contiguously in ring order (a record may wrap past the physical end of the
//! arena). A record therefore costs `len + 1` bytes. Bytes from `tail` up to
//! `head` always form complete records; bytes outside that region are zero.
//!
//! The ring never truncates an entry: committing a record that does not fit in
//! the free space evicts whole records, oldest first, until it does.

use crate::error::ShellError;
use crate::ring_index::RingIndex;
use tracing::debug;

/// Arena size used when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 512;

/// Longest entry a single length byte can describe.
pub const MAX_ENTRY_LEN: usize = u8::MAX as usize;

/// FIFO of command lines with navigation.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    arena: Box<[u8]>,
    /// Next write position.
    head: RingIndex,
    /// Start of the oldest retained record.
    tail: RingIndex,
    /// Number of retained records.
    count: usize,
    /// Bytes occupied by retained records.
    used: usize,
    /// Navigation cursor: `0` is the oldest entry, `count` is the new empty line.
    this: usize,
}

impl HistoryRing {
    /// Creates an empty ring.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidConfig`] if `capacity` cannot hold even a
    /// one-byte entry.
    pub fn new(capacity: usize) -> Result<Self, ShellError> {
        if capacity < 2 {
            return Err(ShellError::InvalidConfig(format!(
                "history capacity must be at least 2 bytes, got {capacity}"
            )));
        }
        let start = RingIndex::new(capacity);
        Ok(Self {
            arena: vec![0u8; capacity].into_boxed_slice(),
            head: start,
            tail: start,
            count: 0,
            used: 0,
            this: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.arena.len()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Appends `entry` as the newest record and resets navigation to the new
    /// empty line.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::EntryTooLarge`] when the record can never fit; the
    /// ring is left untouched in that case.
    pub fn commit(&mut self, entry: &[u8]) -> Result<(), ShellError> {
        let too_large = ShellError::EntryTooLarge {
            len: entry.len(),
            capacity: self.capacity(),
        };
        let Ok(len_byte) = u8::try_from(entry.len()) else {
            return Err(too_large);
        };
        let record = entry.len() + 1;
        if record > self.capacity() {
            return Err(too_large);
        }

        while self.capacity() - self.used < record {
            self.evict_oldest();
        }

        self.arena[self.head.get()] = len_byte;
        self.head = self.head.advance(1);
        for &byte in entry {
            self.arena[self.head.get()] = byte;
            self.head = self.head.advance(1);
        }

        self.count += 1;
        self.used += record;
        self.this = self.count;
        debug_assert_eq!(self.tail.distance_to(self.head), self.used % self.capacity());
        debug!(
            len = entry.len(),
            entries = self.count,
            used = self.used,
            "history commit"
        );
        Ok(())
    }

    /// Drops the oldest record and zero-fills the bytes it occupied.
    fn evict_oldest(&mut self) {
        let record = usize::from(self.arena[self.tail.get()]) + 1;
        for _ in 0..record {
            self.arena[self.tail.get()] = 0;
            self.tail = self.tail.advance(1);
        }
        self.count -= 1;
        self.used -= record;
        if self.this > 0 {
            self.this -= 1;
        }
        debug!(record, entries = self.count, "history evict");
    }

    /// Moves navigation one entry towards the oldest. Returns whether it moved.
    pub fn navigate_previous(&mut self) -> bool {
        if self.this == 0 {
            return false;
        }
        self.this -= 1;
        true
    }

    /// Moves navigation one entry towards the new empty line. Returns whether it
    /// moved.
    pub fn navigate_next(&mut self) -> bool {
        if self.this >= self.count {
            return false;
        }
        self.this += 1;
        true
    }

    /// Puts navigation back on the new empty line.
    pub fn reset_navigation(&mut self) {
        self.this = self.count;
    }

    /// The entry under the navigation cursor; empty on the new empty line.
    pub fn recall(&self) -> Vec<u8> {
        if self.this >= self.count {
            return Vec::new();
        }
        let mut start = self.tail;
        for _ in 0..self.this {
            start = self.next_record(start);
        }
        self.read_record(start)
    }

    /// Entries from oldest to newest.
    pub fn list(&self) -> Entries<'_> {
        Entries {
            ring: self,
            at: self.tail,
            remaining: self.count,
        }
    }

    fn next_record(&self, start: RingIndex) -> RingIndex {
        start.advance(usize::from(self.arena[start.get()]) + 1)
    }

    fn read_record(&self, start: RingIndex) -> Vec<u8> {
        let len = usize::from(self.arena[start.get()]);
        let mut at = start.advance(1);
        let mut entry = Vec::with_capacity(len);
        for _ in 0..len {
            entry.push(self.arena[at.get()]);
            at = at.advance(1);
        }
        entry
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self {
            arena: vec![0u8; DEFAULT_HISTORY_CAPACITY].into_boxed_slice(),
            head: RingIndex::new(DEFAULT_HISTORY_CAPACITY),
            tail: RingIndex::new(DEFAULT_HISTORY_CAPACITY),
            count: 0,
            used: 0,
            this: 0,
        }
    }
}

/// Iterator over the retained entries, oldest first. See [`HistoryRing::list`].
#[derive(Debug)]
pub struct Entries<'a> {
    ring: &'a HistoryRing,
    at: RingIndex,
    remaining: usize,
}

impl Iterator for Entries<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.ring.read_record(self.at);
        self.at = self.ring.next_record(self.at);
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Entries<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listed(ring: &HistoryRing) -> Vec<String> {
        ring.list()
            .map(|entry| String::from_utf8(entry).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_ring_lists_nothing() {
        let ring = HistoryRing::default();
        assert!(ring.is_empty());
        assert_eq!(ring.list().count(), 0);
        assert!(ring.recall().is_empty());
    }

    #[test]
    fn test_commits_are_listed_in_order() {
        let mut ring = HistoryRing::default();
        for line in ["date", "log 3", "help"] {
            ring.commit(line.as_bytes()).unwrap();
        }
        assert_eq!(listed(&ring), vec!["date", "log 3", "help"]);
        // list is restartable
        assert_eq!(listed(&ring), vec!["date", "log 3", "help"]);
    }

    #[test]
    fn test_exact_fill_keeps_every_entry() {
        // 4 records of 3 + 1 bytes fill a 16 byte ring exactly.
        let mut ring = HistoryRing::new(16).unwrap();
        for line in ["aaa", "bbb", "ccc", "ddd"] {
            ring.commit(line.as_bytes()).unwrap();
        }
        assert_eq!(listed(&ring), vec!["aaa", "bbb", "ccc", "ddd"]);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_overflow_evicts_oldest_whole_entries() {
        let mut ring = HistoryRing::new(16).unwrap();
        for line in ["aaa", "bbb", "ccc", "ddd"] {
            ring.commit(line.as_bytes()).unwrap();
        }
        // needs 7 bytes: "aaa" and "bbb" must both go
        ring.commit(b"eeeeee").unwrap();
        assert_eq!(listed(&ring), vec!["ccc", "ddd", "eeeeee"]);
    }

    #[test]
    fn test_entries_survive_wrapping_past_arena_end() {
        let mut ring = HistoryRing::new(10).unwrap();
        ring.commit(b"abcd").unwrap();
        ring.commit(b"efg").unwrap();
        // head is at 9, this record wraps around to the start
        ring.commit(b"hijk").unwrap();
        assert_eq!(listed(&ring), vec!["efg", "hijk"]);
        ring.commit(b"lm").unwrap();
        assert_eq!(listed(&ring), vec!["hijk", "lm"]);
    }

    #[test]
    fn test_evicted_bytes_are_zero_filled() {
        let mut ring = HistoryRing::new(8).unwrap();
        ring.commit(b"abc").unwrap();
        ring.commit(b"de").unwrap();
        ring.commit(b"fghij").unwrap();
        assert_eq!(listed(&ring), vec!["fghij"]);
        let live = ring.tail.distance_to(ring.head);
        assert_eq!(live, 6);
        let mut at = ring.head;
        for _ in 0..ring.capacity() - live {
            assert_eq!(ring.arena[at.get()], 0);
            at = at.advance(1);
        }
    }

    #[test]
    fn test_oversize_entry_is_rejected_without_change() {
        let mut ring = HistoryRing::new(8).unwrap();
        ring.commit(b"ok").unwrap();
        let err = ring.commit(b"12345678").unwrap_err();
        assert_eq!(err, ShellError::EntryTooLarge { len: 8, capacity: 8 });
        assert_eq!(listed(&ring), vec!["ok"]);

        let mut big = HistoryRing::new(1024).unwrap();
        assert!(big.commit(&[b'x'; 256]).is_err());
        assert!(big.commit(&[b'x'; 255]).is_ok());
    }

    #[test]
    fn test_tiny_capacity_is_invalid() {
        assert!(HistoryRing::new(1).is_err());
        assert!(HistoryRing::new(2).is_ok());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut ring = HistoryRing::default();
        assert!(!ring.navigate_previous());
        assert!(!ring.navigate_next());

        ring.commit(b"one").unwrap();
        ring.commit(b"two").unwrap();
        assert!(!ring.navigate_next());
        assert!(ring.navigate_previous());
        assert_eq!(ring.recall(), b"two");
        assert!(ring.navigate_previous());
        assert_eq!(ring.recall(), b"one");
        assert!(!ring.navigate_previous());
        assert_eq!(ring.recall(), b"one");
    }

    #[test]
    fn test_previous_then_next_returns_to_empty_line() {
        let mut ring = HistoryRing::default();
        for line in ["a", "bb", "ccc", "dddd"] {
            ring.commit(line.as_bytes()).unwrap();
        }
        for k in 0..=ring.len() {
            for _ in 0..k {
                ring.navigate_previous();
            }
            for _ in 0..k {
                ring.navigate_next();
            }
            assert!(ring.recall().is_empty(), "k = {k}");
        }
    }

    #[test]
    fn test_commit_resets_navigation() {
        let mut ring = HistoryRing::default();
        ring.commit(b"first").unwrap();
        ring.navigate_previous();
        assert_eq!(ring.recall(), b"first");
        ring.commit(b"second").unwrap();
        assert!(ring.recall().is_empty());
        ring.navigate_previous();
        assert_eq!(ring.recall(), b"second");
    }

    #[test]
    fn test_navigation_after_eviction_sees_only_complete_entries() {
        let mut ring = HistoryRing::new(8).unwrap();
        ring.commit(b"ab").unwrap();
        ring.commit(b"cd").unwrap();
        ring.navigate_previous();
        ring.navigate_previous();
        assert_eq!(ring.recall(), b"ab");
        ring.commit(b"efgh").unwrap();
        // commit resets, then walking back never yields a truncated entry
        let mut seen = Vec::new();
        while ring.navigate_previous() {
            seen.push(String::from_utf8(ring.recall()).unwrap());
        }
        assert_eq!(seen, vec!["efgh", "cd"]);
    }

    #[test]
    fn test_many_commits_never_list_truncated_entries() {
        let mut ring = HistoryRing::new(64).unwrap();
        let lines: Vec<String> = (0..200).map(|i| format!("cmd{}", "x".repeat(i % 11))).collect();
        for (i, line) in lines.iter().enumerate() {
            ring.commit(line.as_bytes()).unwrap();
            let listed = listed(&ring);
            assert!(lines[..=i].ends_with(&listed));
            let bytes: usize = listed.iter().map(|l| l.len() + 1).sum();
            assert!(bytes <= ring.capacity());
        }
    }
}
