use macropad_core::report::KeyReport;
use usbd_hid::descriptor::KeyboardReport;

/// Expand a core report into the 8-byte boot keyboard report.
#[must_use]
pub fn into_keyboard_report(report: &KeyReport) -> KeyboardReport {
    KeyboardReport {
        modifier: 0,
        reserved: 0,
        leds: 0,
        keycodes: *report.keycodes(),
    }
}
