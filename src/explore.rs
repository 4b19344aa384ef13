//! Explore-mode annotation overlay.
//!
//! Explore mode lets the player paint hypothetical per-cell states over
//! the board without consuming a real guess. The overlay is purely
//! client-side; its only trip across the system boundary is the row
//! extracted by [`ExploreOverlay::row_states`] when an explore guess is
//! submitted.

use std::collections::BTreeMap;

/// Sparse per-cell annotation map keyed by `(row, col)`.
///
/// Values are always in `{0, 1, 2}` (neutral, present-style,
/// correct-style). Cells never written are implicitly 0. A sparse map
/// rather than a grown nested array keeps unseen rows and columns
/// out-of-bounds-proof by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExploreOverlay {
    cells: BTreeMap<(usize, usize), u8>,
}

impl ExploreOverlay {
    /// Creates an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the annotated value at `(row, col)`, if any.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(&(row, col)).copied()
    }

    /// Advances the cell at `(row, col)` through the 3-cycle `0 → 1 → 2 → 0`.
    ///
    /// Missing cells start at 0. Other cells are untouched.
    pub fn cycle(&mut self, row: usize, col: usize) {
        let value = self.cells.entry((row, col)).or_insert(0);
        *value = (*value + 1) % 3;
    }

    /// Extracts one row as exactly `word_length` values.
    ///
    /// Missing cells default to 0; annotations at columns past
    /// `word_length` are dropped. This is the payload attached to an
    /// explore submission.
    pub fn row_states(&self, row: usize, word_length: usize) -> Vec<u8> {
        (0..word_length)
            .map(|col| self.get(row, col).unwrap_or(0))
            .collect()
    }

    /// Whether the overlay holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Removes every annotation, all rows included.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
