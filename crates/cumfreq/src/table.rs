#![forbid(unsafe_code)]

//! Fenwick-tree frequency table with rank inversion and rescaling.
//!
//! Maintains per-position occurrence counts in a contiguous `Vec<u64>` and
//! answers both directions of the cumulative-frequency question in
//! O(log n): "what is the running sum up to position p?" and "at which
//! position does the running sum first reach t?". The second form is what
//! an adaptive decoder asks on every symbol.
//!
//! # Layout
//!
//! The tree is stored 1-indexed in a `Vec<u64>` of length `capacity + 1`
//! (index 0 unused). `tree[i]` holds the sum of the `lowbit(i)` frequencies
//! ending at 1-based position `i` — after the first update propagates, no
//! cell holds a plain per-position value. The public API is 0-based over
//! `[0, capacity)`; the 1-based shift never leaks to callers.
//!
//! # Operations
//!
//! | Operation | Time |
//! |-----------|------|
//! | `new(n)` / `from_frequencies` | O(n) |
//! | `add_value(p, delta)` | O(log n) |
//! | `cumulative(p)` / `range(l, r)` | O(log n) |
//! | `frequency(p)` | O(log n) |
//! | `position_of_cumulative(t)` | O(log n) |
//! | `rescale(d)` | O(n log n) |
//! | `resized(n')` | O(n log n) |
//!
//! # Invariants
//!
//! 1. `cumulative(p)` equals the sum of all deltas applied to positions
//!    `0..=p` since construction (or the last `clear`).
//! 2. `frequency(p)` recovers the exact net delta applied at `p`, even
//!    though no single cell stores it.
//! 3. `top_bit` is the largest power of two ≤ `capacity` (0 when empty)
//!    and seeds every rank-inversion descent.

/// Fenwick tree over `u64` frequencies, keyed by 0-based position.
///
/// Capacity is fixed at construction; there is no in-place resize. To grow,
/// use [`resized`](Self::resized), which rebuilds by replaying point
/// frequencies into a fresh table (restructuring a Fenwick tree in place is
/// not a well-defined operation).
///
/// Frequencies are conceptually non-negative. Negative deltas are supported
/// so that callers (and `rescale`) can decrement previously added counts,
/// with the caller responsible for never driving a materialized frequency
/// below zero.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    /// 1-indexed tree storage. `tree[0]` is unused.
    tree: Vec<u64>,
    /// Number of positions (not including index 0).
    capacity: usize,
    /// Largest power of two ≤ `capacity`; initial mask of every
    /// rank-inversion search.
    top_bit: usize,
}

impl FrequencyTable {
    /// Create a table of `capacity` positions, all frequencies zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0u64; capacity + 1],
            capacity,
            top_bit: highest_power_of_two(capacity),
        }
    }

    /// Create a table from initial frequencies in O(n).
    ///
    /// Faster than `capacity` calls to `add_value` (which would be
    /// O(n log n)).
    #[must_use]
    pub fn from_frequencies(values: &[u64]) -> Self {
        let capacity = values.len();
        let mut tree = vec![0u64; capacity + 1];

        for (i, &v) in values.iter().enumerate() {
            tree[i + 1] = v;
        }

        // Parent propagation builds the tree in a single pass.
        for i in 1..=capacity {
            let parent = i + lowbit(i);
            if parent <= capacity {
                tree[parent] = tree[parent].wrapping_add(tree[i]);
            }
        }

        Self {
            tree,
            capacity,
            top_bit: highest_power_of_two(capacity),
        }
    }

    /// Number of positions the table can represent.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the table has zero positions.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Add `delta` to the frequency at `position`. O(log n), zero alloc.
    ///
    /// Walks the implicit tree upward, adding `delta` to every cell whose
    /// range contains `position`. Repeated calls are additive and
    /// commutative in their effect on any cumulative query.
    ///
    /// # Panics
    /// Panics if `position >= capacity`.
    pub fn add_value(&mut self, position: usize, delta: i64) {
        // Cast to u64 directly: two's complement makes wrapping_add correct
        // for both positive and negative deltas, and avoids a panic on
        // negating i64::MIN.
        self.apply_delta(position, delta as u64);
    }

    /// Internal: add a `u64` delta at `position` with wrapping arithmetic.
    fn apply_delta(&mut self, position: usize, delta: u64) {
        assert!(
            position < self.capacity,
            "position {position} out of bounds (capacity={})",
            self.capacity
        );
        let mut idx = position + 1; // convert to 1-indexed
        while idx <= self.capacity {
            self.tree[idx] = self.tree[idx].wrapping_add(delta);
            idx += lowbit(idx);
        }
    }

    /// Cumulative frequency of positions `0..=position`. O(log n).
    ///
    /// # Panics
    /// Panics if `position >= capacity`.
    #[must_use]
    pub fn cumulative(&self, position: usize) -> u64 {
        assert!(
            position < self.capacity,
            "position {position} out of bounds (capacity={})",
            self.capacity
        );
        let mut sum = 0u64;
        let mut idx = position + 1; // convert to 1-indexed
        while idx > 0 {
            sum = sum.wrapping_add(self.tree[idx]);
            idx &= idx - 1; // strip lowest set bit
        }
        sum
    }

    /// Individual (non-cumulative) frequency at `position`. O(log n) worst
    /// case, bounded by the bit-distance between the index and its Fenwick
    /// parent rather than a full prefix-sum walk.
    ///
    /// Derived by subtracting the cells strictly between the 1-based index
    /// and its parent `idx & (idx - 1)` from `tree[idx]`; no dense shadow
    /// array is kept.
    ///
    /// # Panics
    /// Panics if `position >= capacity`.
    #[must_use]
    pub fn frequency(&self, position: usize) -> u64 {
        assert!(
            position < self.capacity,
            "position {position} out of bounds (capacity={})",
            self.capacity
        );
        let idx = position + 1;
        let mut value = self.tree[idx];
        let parent = idx & (idx - 1);
        let mut walk = idx - 1;
        while walk != parent {
            value = value.wrapping_sub(self.tree[walk]);
            walk &= walk - 1;
        }
        value
    }

    /// Sum of frequencies over positions `left..=right`. O(log n).
    ///
    /// This is the symbol-interval query an entropy coder uses to widen a
    /// cumulative range to a span of positions.
    ///
    /// # Panics
    /// Panics if `left > right` or `right >= capacity`.
    #[must_use]
    pub fn range(&self, left: usize, right: usize) -> u64 {
        assert!(left <= right, "left {left} > right {right}");
        if left == 0 {
            self.cumulative(right)
        } else {
            self.cumulative(right).wrapping_sub(self.cumulative(left - 1))
        }
    }

    /// Total of all frequencies. O(log n).
    #[must_use]
    pub fn total(&self) -> u64 {
        if self.capacity == 0 {
            0
        } else {
            self.cumulative(self.capacity - 1)
        }
    }

    /// Rank inversion: the smallest position whose cumulative frequency is
    /// ≥ `target`, or `None` when `target` exceeds [`total`](Self::total).
    /// O(log n), zero alloc.
    ///
    /// A `target` of zero behaves as a target of one, so the result is
    /// always the first position with nonzero cumulative frequency.
    /// Positions with zero frequency are never returned for targets that
    /// land on their (unchanged) running sum; the strict comparison in the
    /// descent skips past them to the position that actually supplied the
    /// count.
    ///
    /// This is the decode-direction query: given a value drawn inside the
    /// coder's current range, find which symbol owns it — an order
    /// statistic computed without a linear scan.
    #[must_use]
    pub fn position_of_cumulative(&self, target: u64) -> Option<usize> {
        let mut remaining = target.max(1);
        let mut pos = 0usize;
        let mut mask = self.top_bit;

        // Binary lifting: commit each power-of-two step whose subtree sum
        // still lies strictly below the remaining target. Afterwards `pos`
        // counts the positions whose cumulative frequency is < target.
        while mask != 0 {
            let trial = pos + mask;
            if trial <= self.capacity && self.tree[trial] < remaining {
                remaining -= self.tree[trial];
                pos = trial;
            }
            mask >>= 1;
        }

        if pos == self.capacity { None } else { Some(pos) }
    }

    /// Divide every frequency by `divisor` (truncating), in place.
    ///
    /// Adaptive models call this periodically to keep the total below the
    /// precision their coder can represent. Positions are processed from
    /// highest to lowest so that each point read still sees un-rescaled
    /// ancestor cells; an ascending pass would corrupt later reads. There
    /// is no mid-pass atomicity: interrupting the loop leaves a partially
    /// rescaled but structurally valid table.
    ///
    /// # Panics
    /// Panics if `divisor == 0`.
    pub fn rescale(&mut self, divisor: u64) {
        assert!(divisor != 0, "rescale divisor must be nonzero");
        if divisor == 1 || self.capacity == 0 {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(divisor, capacity = self.capacity, "rescaling frequency table");
        for position in (0..self.capacity).rev() {
            let current = self.frequency(position);
            let scaled = current / divisor;
            self.apply_delta(position, scaled.wrapping_sub(current));
        }
    }

    /// Reset every frequency to zero, keeping the capacity. O(n).
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(capacity = self.capacity, "clearing frequency table");
        self.tree.fill(0);
    }

    /// Build a table of `new_capacity` positions carrying this table's
    /// frequencies. O(n log n).
    ///
    /// Growth replays every point frequency into the fresh table; shrinking
    /// drops positions `new_capacity..`.
    #[must_use]
    pub fn resized(&self, new_capacity: usize) -> Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            old_capacity = self.capacity,
            new_capacity,
            "rebuilding frequency table"
        );
        let keep = self.capacity.min(new_capacity);
        let mut values: Vec<u64> = (0..keep).map(|p| self.frequency(p)).collect();
        values.resize(new_capacity, 0);
        Self::from_frequencies(&values)
    }
}

/// Lowest set bit of `x`. E.g., `lowbit(6) = 2`, `lowbit(4) = 4`.
#[inline]
fn lowbit(x: usize) -> usize {
    x & x.wrapping_neg()
}

/// Largest power of two ≤ `n`, or 0 when `n == 0`.
#[inline]
fn highest_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1 << (usize::BITS - 1 - n.leading_zeros())
}
