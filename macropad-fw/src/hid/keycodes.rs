//! Usage codes from the USB HID keyboard/keypad page (0x07) that the keymap
//! uses.

use macropad_core::layout::Keycode;

pub const KC_1: Keycode = Keycode(0x1E);
pub const KC_2: Keycode = Keycode(0x1F);
pub const KC_3: Keycode = Keycode(0x20);
pub const KC_4: Keycode = Keycode(0x21);
pub const KC_5: Keycode = Keycode(0x22);
pub const KC_6: Keycode = Keycode(0x23);
pub const KC_7: Keycode = Keycode(0x24);
pub const KC_8: Keycode = Keycode(0x25);
pub const KC_9: Keycode = Keycode(0x26);
pub const KC_0: Keycode = Keycode(0x27);
