//! Device keymap: two layers of digit keys behind one layer-hold key.
//!
//! Layout, as a diagram (`!` is the layer-hold key, only base-layer keys
//! shown):
//!
//! ```text
//! +-----------------+
//! |  !  |  4  |  5  |      held:   !  9  0
//! |  1  |  2  |  3  |              6  7  8
//! +-----------------+
//! ```

use macropad_core::layout::{Keycode, Layout};

use crate::hid::keycodes::{KC_0, KC_1, KC_2, KC_3, KC_4, KC_5, KC_6, KC_7, KC_8, KC_9};

pub const NUM_ROWS: usize = 2;
pub const NUM_COLS: usize = 3;
pub const NUM_LAYERS: usize = 2;
pub const NUM_KEYS: usize = NUM_ROWS * NUM_COLS;

pub type MacropadLayout = Layout<NUM_ROWS, NUM_COLS, NUM_LAYERS>;

// The keycode under the layer-hold position is defined but never sent
pub static LAYOUT: MacropadLayout = Layout::new(
    [
        [
            [Keycode::NONE, KC_4, KC_5],
            [KC_1, KC_2, KC_3],
        ],
        [
            [Keycode::NONE, KC_9, KC_0],
            [KC_6, KC_7, KC_8],
        ],
    ],
    [
        [true, false, false],
        [false, false, false],
    ],
);
