//! Offsets into a circular arena.
//!
//! All wraparound arithmetic of the history ring goes through [`RingIndex`], so
//! no other code does its own `% capacity`.

/// Position inside a ring of `capacity` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingIndex {
    pos: usize,
    capacity: usize,
}

impl RingIndex {
    /// Index `0` of a ring with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self { pos: 0, capacity }
    }

    /// Physical offset in `[0, capacity)`.
    pub fn get(self) -> usize {
        self.pos
    }

    pub fn capacity(self) -> usize {
        self.capacity
    }

    /// Moves forward by `n`, wrapping at the end of the arena.
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        Self {
            pos: (self.pos + n % self.capacity) % self.capacity,
            capacity: self.capacity,
        }
    }

    /// Moves backward by `n`, wrapping at the start of the arena.
    #[must_use]
    pub fn retreat(self, n: usize) -> Self {
        Self {
            pos: (self.pos + self.capacity - n % self.capacity) % self.capacity,
            capacity: self.capacity,
        }
    }

    /// Forward distance from `self` to `other`, in `[0, capacity)`.
    pub fn distance_to(self, other: RingIndex) -> usize {
        debug_assert_eq!(self.capacity, other.capacity);
        (other.pos + self.capacity - self.pos) % self.capacity
    }
}
