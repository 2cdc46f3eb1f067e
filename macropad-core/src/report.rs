//! Report assembly and the send decision.

use crate::debounce::DebounceMatrix;
use crate::idle::IdleTimer;
use crate::layout::Layout;
use crate::matrix::{ColIndex, RowIndex};

/// Hard limit of the 8-byte boot keyboard report format.
pub const MAX_REPORT_KEYS: usize = 6;

/// Keycodes of the currently pressed keys in row-major press order, padded
/// with zeroes.
///
/// Equality is positional, matching how the wire report is compared by
/// hosts: two reports carrying the same keycodes in different slots are
/// different reports.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyReport {
    keycodes: [u8; MAX_REPORT_KEYS],
}

impl KeyReport {
    pub const EMPTY: Self = Self {
        keycodes: [0; MAX_REPORT_KEYS],
    };

    #[must_use]
    pub const fn from_keycodes(keycodes: [u8; MAX_REPORT_KEYS]) -> Self {
        Self { keycodes }
    }

    #[inline]
    #[must_use]
    pub const fn keycodes(&self) -> &[u8; MAX_REPORT_KEYS] {
        &self.keycodes
    }
}

/// Assemble the report for the current debounced state.
///
/// Walks all coordinates row-major, skips layer-hold keys unconditionally
/// and fills at most [`MAX_REPORT_KEYS`] slots, keys pressed beyond that are
/// silently dropped. Pure given the debounce state, performs no scanning.
#[must_use]
pub fn build_report<const ROWS: usize, const COLS: usize, const LAYERS: usize>(
    debounce: &DebounceMatrix<ROWS, COLS>,
    layout: &Layout<ROWS, COLS, LAYERS>,
) -> KeyReport {
    let active_layer = layout.active_layer(debounce);
    let mut report = KeyReport::EMPTY;
    let mut used = 0;
    'rows: for row in RowIndex::<ROWS>::all() {
        for col in ColIndex::<COLS>::all() {
            if layout.is_layer_hold(row, col) || !debounce.is_pressed(row, col) {
                continue;
            }
            if used == MAX_REPORT_KEYS {
                break 'rows;
            }
            report.keycodes[used] = layout.keycode(active_layer, row, col).0;
            used += 1;
        }
    }
    report
}

/// Whether `current` must go to the host now.
///
/// An enabled, fully elapsed idle period forces a send (and rearms the
/// countdown) even when nothing changed. Otherwise a send happens only when
/// the report differs from `previous`, which must be the last report actually
/// handed to the transport, not merely the last one this function approved.
#[must_use]
pub fn should_send(current: &KeyReport, previous: &KeyReport, idle: &IdleTimer) -> bool {
    if idle.poll_elapsed() {
        return true;
    }
    current != previous
}
