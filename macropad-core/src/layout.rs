//! Keycode table and layer resolution.
//!
//! A layout is the immutable keycode table, `[layer][row][col]`, plus a
//! companion metadata table flagging which coordinates act as layer-hold
//! keys. Layer-hold keys never emit a keycode, their debounced state only
//! selects the active layer. Flagging is per coordinate rather than a
//! hardcoded position so a second layer-hold key is a one-line keymap edit.

use crate::debounce::DebounceMatrix;
use crate::matrix::{ColIndex, RowIndex};

/// A USB HID usage code from the keyboard/keypad page.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Keycode(pub u8);

impl Keycode {
    /// Empty slot. Also the table entry under layer-hold keys, which is
    /// defined but never read.
    pub const NONE: Self = Self(0);
}

#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LayerIndex(u8);

impl LayerIndex {
    pub const BASE: Self = Self(0);
    pub const HELD: Self = Self(1);

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

pub struct Layout<const ROWS: usize, const COLS: usize, const LAYERS: usize> {
    keycodes: [[[Keycode; COLS]; ROWS]; LAYERS],
    layer_hold: [[bool; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize, const LAYERS: usize> Layout<ROWS, COLS, LAYERS> {
    #[must_use]
    pub const fn new(
        keycodes: [[[Keycode; COLS]; ROWS]; LAYERS],
        layer_hold: [[bool; COLS]; ROWS],
    ) -> Self {
        Self {
            keycodes,
            layer_hold,
        }
    }

    /// Pure query, must be evaluated freshly for every report build so a
    /// layer flip takes effect the same cycle its key crosses the debounce
    /// threshold.
    #[must_use]
    pub fn active_layer(&self, debounce: &DebounceMatrix<ROWS, COLS>) -> LayerIndex {
        for row in RowIndex::<ROWS>::all() {
            for col in ColIndex::<COLS>::all() {
                if self.layer_hold[row.index()][col.index()] && debounce.is_pressed(row, col) {
                    return LayerIndex::HELD;
                }
            }
        }
        LayerIndex::BASE
    }

    #[inline]
    #[must_use]
    pub const fn is_layer_hold(&self, row: RowIndex<ROWS>, col: ColIndex<COLS>) -> bool {
        self.layer_hold[row.index()][col.index()]
    }

    #[inline]
    #[must_use]
    pub const fn keycode(
        &self,
        layer: LayerIndex,
        row: RowIndex<ROWS>,
        col: ColIndex<COLS>,
    ) -> Keycode {
        self.keycodes[layer.index()][row.index()][col.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::DEBOUNCE_THRESHOLD;

    fn two_layer_layout() -> Layout<2, 3, 2> {
        Layout::new(
            [
                [
                    [Keycode::NONE, Keycode(0x21), Keycode(0x22)],
                    [Keycode(0x1E), Keycode(0x1F), Keycode(0x20)],
                ],
                [
                    [Keycode::NONE, Keycode(0x26), Keycode(0x27)],
                    [Keycode(0x23), Keycode(0x24), Keycode(0x25)],
                ],
            ],
            [[true, false, false], [false, false, false]],
        )
    }

    const HOLD_ROW: RowIndex<2> = RowIndex::from_value(0);
    const HOLD_COL: ColIndex<3> = ColIndex::from_value(0);

    #[test]
    fn layer_flips_the_cycle_threshold_is_reached() {
        let layout = two_layer_layout();
        let mut debounce = DebounceMatrix::new();
        for _ in 0..DEBOUNCE_THRESHOLD - 1 {
            let _ = debounce.sample(HOLD_ROW, HOLD_COL, true);
            assert_eq!(LayerIndex::BASE, layout.active_layer(&debounce));
        }
        let _ = debounce.sample(HOLD_ROW, HOLD_COL, true);
        assert_eq!(LayerIndex::HELD, layout.active_layer(&debounce));
        // A single open sample drops the hold key below threshold again
        let _ = debounce.sample(HOLD_ROW, HOLD_COL, false);
        assert_eq!(LayerIndex::BASE, layout.active_layer(&debounce));
    }

    #[test]
    fn non_hold_keys_do_not_change_layer() {
        let layout = two_layer_layout();
        let mut debounce = DebounceMatrix::new();
        let row = RowIndex::from_value(1);
        let col = ColIndex::from_value(1);
        for _ in 0..DEBOUNCE_THRESHOLD {
            let _ = debounce.sample(row, col, true);
        }
        assert_eq!(LayerIndex::BASE, layout.active_layer(&debounce));
    }

    #[test]
    fn lookup_follows_layer() {
        let layout = two_layer_layout();
        let row = RowIndex::from_value(1);
        let col = ColIndex::from_value(1);
        assert_eq!(Keycode(0x1F), layout.keycode(LayerIndex::BASE, row, col));
        assert_eq!(Keycode(0x24), layout.keycode(LayerIndex::HELD, row, col));
    }
}
