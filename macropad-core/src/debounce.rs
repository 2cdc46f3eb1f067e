//! Per-key debounce counters.
//!
//! Every key carries a confidence counter in `[0, DEBOUNCE_THRESHOLD]` that is
//! incremented on a closed raw sample and decremented on an open one,
//! saturating at both ends. A key counts as pressed only while its counter
//! sits exactly at the threshold, so registering a press takes
//! `DEBOUNCE_THRESHOLD` consecutive closed samples while any single open
//! sample starts the decay. Rise and fall share the threshold, there is no
//! hysteresis band.

use crate::matrix::{ColIndex, RowIndex};

/// Scan cycles of agreement needed before a key state registers.
/// At the 500µs scan period this puts press and release latency at ~5ms.
pub const DEBOUNCE_THRESHOLD: u8 = 10;

pub struct DebounceMatrix<const ROWS: usize, const COLS: usize> {
    counters: [[u8; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> DebounceMatrix<ROWS, COLS> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counters: [[0; COLS]; ROWS],
        }
    }

    /// Feed one raw sample for the key at `(row, col)`.
    ///
    /// Returns `Some(new_state)` exactly when the debounced state flipped on
    /// this sample, rising to the threshold or falling off it, `None`
    /// otherwise. Coordinates are in range by construction.
    pub fn sample(
        &mut self,
        row: RowIndex<ROWS>,
        col: ColIndex<COLS>,
        raw_closed: bool,
    ) -> Option<bool> {
        let counter = &mut self.counters[row.index()][col.index()];
        if raw_closed {
            if *counter < DEBOUNCE_THRESHOLD {
                *counter += 1;
                if *counter == DEBOUNCE_THRESHOLD {
                    return Some(true);
                }
            }
        } else if *counter > 0 {
            let was_pressed = *counter == DEBOUNCE_THRESHOLD;
            *counter -= 1;
            if was_pressed {
                return Some(false);
            }
        }
        None
    }

    #[inline]
    #[must_use]
    pub fn is_pressed(&self, row: RowIndex<ROWS>, col: ColIndex<COLS>) -> bool {
        self.counters[row.index()][col.index()] == DEBOUNCE_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn at<const R: usize, const C: usize>(row: u8, col: u8) -> (RowIndex<R>, ColIndex<C>) {
        (RowIndex::from_value(row), ColIndex::from_value(col))
    }

    #[test]
    fn press_registers_at_threshold() {
        let mut matrix: DebounceMatrix<2, 3> = DebounceMatrix::new();
        let (row, col) = at(1, 2);
        for _ in 0..DEBOUNCE_THRESHOLD - 1 {
            assert_eq!(None, matrix.sample(row, col, true));
            assert!(!matrix.is_pressed(row, col));
        }
        assert_eq!(Some(true), matrix.sample(row, col, true));
        assert!(matrix.is_pressed(row, col));
    }

    #[test]
    fn counter_saturates_while_held() {
        let mut matrix: DebounceMatrix<2, 3> = DebounceMatrix::new();
        let (row, col) = at(0, 1);
        for _ in 0..100 {
            let _ = matrix.sample(row, col, true);
        }
        assert!(matrix.is_pressed(row, col));
        // One open sample releases, it does not take a full threshold of decay
        assert_eq!(Some(false), matrix.sample(row, col, false));
        assert!(!matrix.is_pressed(row, col));
        // ... but re-registering takes only the single decremented step back
        assert_eq!(Some(true), matrix.sample(row, col, true));
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut matrix: DebounceMatrix<2, 3> = DebounceMatrix::new();
        let (row, col) = at(0, 0);
        for _ in 0..20 {
            assert_eq!(None, matrix.sample(row, col, false));
        }
        assert!(!matrix.is_pressed(row, col));
        // Still takes a full threshold of closed samples after the long idle
        for _ in 0..DEBOUNCE_THRESHOLD - 1 {
            assert_eq!(None, matrix.sample(row, col, true));
        }
        assert_eq!(Some(true), matrix.sample(row, col, true));
    }

    #[test]
    fn bounce_delays_registration() {
        let mut matrix: DebounceMatrix<2, 3> = DebounceMatrix::new();
        let (row, col) = at(0, 2);
        // Noisy contact: every open sample undoes one closed sample
        for _ in 0..DEBOUNCE_THRESHOLD - 1 {
            let _ = matrix.sample(row, col, true);
        }
        assert_eq!(None, matrix.sample(row, col, false));
        assert_eq!(None, matrix.sample(row, col, true));
        assert!(!matrix.is_pressed(row, col));
        assert_eq!(Some(true), matrix.sample(row, col, true));
    }

    #[test]
    fn keys_are_independent() {
        let mut matrix: DebounceMatrix<2, 3> = DebounceMatrix::new();
        let (closed_row, closed_col) = at(0, 0);
        let (open_row, open_col) = at(1, 1);
        for _ in 0..DEBOUNCE_THRESHOLD {
            let _ = matrix.sample(closed_row, closed_col, true);
            let _ = matrix.sample(open_row, open_col, false);
        }
        assert!(matrix.is_pressed(closed_row, closed_col));
        assert!(!matrix.is_pressed(open_row, open_col));
    }
}
