//! Matrix pin handling and the row scan.
//!
//! Row pins idle as pull-up inputs so an inactive row floats high impedance
//! and cannot backfeed another row's read. Scanning a row reconfigures its
//! pin to a push-pull output driven low, waits for the line to settle, reads
//! every column (pull-up input, low means the switch connects it to the
//! driven row) and returns the pin to input. Rows are scanned strictly in
//! order, the matrix is a shared electrical bus.

#[cfg(feature = "serial")]
pub(crate) mod usb_serial;

use embedded_hal::digital::InputPin;
use heapless::Vec;
use macropad_core::debounce::DebounceMatrix;
use macropad_core::matrix::{ColIndex, MatrixIndex, RowIndex};
use rp2040_hal::gpio::bank0::{Gpio16, Gpio17, Gpio18, Gpio19, Gpio20};
use rp2040_hal::gpio::{
    DynPinId, FunctionSio, Pin, PinId, PinState, PullUp, SioInput, SioOutput, ValidFunction,
};
use rp2040_hal::Timer;

use crate::keymap::{NUM_COLS, NUM_KEYS, NUM_ROWS};
use crate::timer::wait_micros;

pub type ButtonPin<Id> = Pin<Id, FunctionSio<SioInput>, PullUp>;
type ColPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;

/// Settle time between driving a row low and sampling its columns,
/// covers the line capacitance on the reference PCB.
const ROW_SETTLE_MICROS: u64 = 20;

/// One key's debounced state change picked up during a scan.
#[derive(Debug, Copy, Clone)]
pub struct KeyStateChange {
    pub index: MatrixIndex<NUM_ROWS, NUM_COLS>,
    pub pressed: bool,
}

pub struct MatrixPins {
    rows: (Option<ButtonPin<Gpio16>>, Option<ButtonPin<Gpio17>>),
    cols: [ColPin; NUM_COLS],
}

impl MatrixPins {
    pub fn new(
        rows: (ButtonPin<Gpio16>, ButtonPin<Gpio17>),
        cols: (ButtonPin<Gpio18>, ButtonPin<Gpio19>, ButtonPin<Gpio20>),
    ) -> Self {
        Self {
            rows: (Some(rows.0), Some(rows.1)),
            cols: [
                cols.0.into_dyn_pin(),
                cols.1.into_dyn_pin(),
                cols.2.into_dyn_pin(),
            ],
        }
    }

    /// Drive each row in turn and feed one raw sample per key into the
    /// debounce matrix, mutating every counter exactly once.
    ///
    /// Returns the debounced state changes seen during this scan, for
    /// diagnostics.
    pub fn scan_matrix(
        &mut self,
        debounce: &mut DebounceMatrix<NUM_ROWS, NUM_COLS>,
        timer: Timer,
    ) -> Vec<KeyStateChange, NUM_KEYS> {
        let mut changes = Vec::new();
        scan_row::<0, _>(&mut self.rows.0, &mut self.cols, debounce, &mut changes, timer);
        scan_row::<1, _>(&mut self.rows.1, &mut self.cols, debounce, &mut changes, timer);
        changes
    }
}

#[expect(clippy::cast_possible_truncation)]
fn scan_row<
    const R: usize,
    Id: PinId + ValidFunction<FunctionSio<SioInput>> + ValidFunction<FunctionSio<SioOutput>>,
>(
    slot: &mut Option<ButtonPin<Id>>,
    cols: &mut [ColPin; NUM_COLS],
    debounce: &mut DebounceMatrix<NUM_ROWS, NUM_COLS>,
    changes: &mut Vec<KeyStateChange, NUM_KEYS>,
    timer: Timer,
) {
    let row_index = RowIndex::from_value(R as u8);
    let row = slot.take().unwrap();
    let driven = row.into_push_pull_output_in_state(PinState::Low);
    wait_micros(timer, ROW_SETTLE_MICROS);
    for (col_ind, col_pin) in cols.iter_mut().enumerate() {
        let col_index = ColIndex::from_value(col_ind as u8);
        let raw_closed = matches!(col_pin.is_low(), Ok(true));
        if let Some(pressed) = debounce.sample(row_index, col_index, raw_closed) {
            let _ = changes.push(KeyStateChange {
                index: MatrixIndex::from_row_col(row_index, col_index),
                pressed,
            });
        }
    }
    // Back to high impedance before the next row gets driven
    *slot = Some(driven.into_pull_up_input());
}
