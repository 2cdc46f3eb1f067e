//! The scan/report loop.
//!
//! One cooperative loop, forever: scan the matrix, build the report, decide
//! whether it must go out, hand it to the transport, wait out the scan
//! period. USB polling and the idle tick run from interrupts.

#[cfg(feature = "serial")]
use core::fmt::Write;

use macropad_core::debounce::DebounceMatrix;
use macropad_core::report::{build_report, should_send, KeyReport};
use rp2040_hal::pac::interrupt;
#[cfg(feature = "serial")]
use rp2040_hal::rom_data::reset_to_usb_boot;
use rp2040_hal::timer::Alarm0;
use rp2040_hal::Timer;
#[cfg(any(feature = "serial", feature = "hiddev"))]
use usb_device::bus::UsbBusAllocator;

use crate::keyboard::{KeyStateChange, MatrixPins};
use crate::keymap::{LAYOUT, NUM_COLS, NUM_ROWS};
use crate::runtime::shared;
use crate::timer::wait_micros;

/// Delay between full matrix scans. With the debounce threshold of 10 a key
/// registers roughly 5ms after its contact goes quiet.
const SCAN_PERIOD_MICROS: u64 = 500;

pub fn run(
    #[cfg(any(feature = "serial", feature = "hiddev"))] usb_bus: UsbBusAllocator<
        rp2040_hal::usb::UsbBus,
    >,
    mut matrix: MatrixPins,
    timer: Timer,
    tick_alarm: Alarm0,
) -> ! {
    #[cfg(any(feature = "serial", feature = "hiddev"))]
    unsafe {
        shared::usb::init_usb(usb_bus);
    }
    shared::tick::start(tick_alarm);
    unsafe {
        rp2040_hal::pac::NVIC::unmask(rp2040_hal::pac::Interrupt::TIMER_IRQ_0);
        #[cfg(feature = "hiddev")]
        rp2040_hal::pac::NVIC::unmask(rp2040_hal::pac::Interrupt::USBCTRL_IRQ);
    }

    let mut debounce: DebounceMatrix<NUM_ROWS, NUM_COLS> = DebounceMatrix::new();
    let mut last_sent = KeyReport::EMPTY;
    let mut pending: Option<KeyReport> = None;
    #[cfg(feature = "serial")]
    let mut last_chars = [0u8; 64];

    loop {
        let changes = matrix.scan_matrix(&mut debounce, timer);
        log_changes(&changes);

        if pending.is_none() {
            let report = build_report(&debounce, &LAYOUT);
            if should_send(&report, &last_sent, &shared::tick::IDLE_TIMER) {
                pending = Some(report);
            }
        }
        // The comparison baseline only advances when the transport actually
        // took the report, an undelivered report parks in `pending` and gets
        // retried next cycle.
        #[cfg(feature = "hiddev")]
        if let Some(report) = pending {
            if shared::usb::push_hid_report(&crate::hid::transform::into_keyboard_report(&report))
            {
                last_sent = report;
                pending = None;
            }
        }
        #[cfg(not(feature = "hiddev"))]
        if let Some(report) = pending.take() {
            // No HID endpoint in this build, accept locally so change
            // detection keeps behaving
            last_sent = report;
        }

        #[cfg(feature = "serial")]
        handle_usb(&mut last_chars);

        wait_micros(timer, SCAN_PERIOD_MICROS);
    }
}

#[cfg(feature = "serial")]
fn log_changes(changes: &[KeyStateChange]) {
    for change in changes {
        let _ = shared::usb::acquire_usb().write_fmt(format_args!(
            "R{}, C{} -> {}\r\n",
            change.index.row().index(),
            change.index.col().index(),
            u8::from(change.pressed)
        ));
    }
}

#[cfg(not(feature = "serial"))]
fn log_changes(_changes: &[KeyStateChange]) {}

#[cfg(feature = "serial")]
fn handle_usb(last_chars: &mut [u8]) -> Option<()> {
    let usb = shared::usb::acquire_usb();
    let serial = usb.serial?;
    let dev = usb.dev?;
    let output = usb.output?;
    if dev.inner.poll(&mut [&mut serial.inner]) {
        let last_chars_len = last_chars.len();
        let mut buf = [0u8; 64];
        match serial.inner.read(&mut buf) {
            Err(_e) | Ok(0) => {
                // Do nothing
            }
            Ok(count) => {
                for byte in &buf[..count] {
                    last_chars.copy_within(1..last_chars_len, 0);
                    last_chars[last_chars_len - 1] = *byte;
                    if last_chars.ends_with(b"boot") {
                        let _ = serial.write_str("BOOT\r\n");
                        reset_to_usb_boot(0, 0);
                    } else if last_chars.ends_with(b"output") {
                        *output = true;
                        let _ = serial.write_str("OUTPUT ON\r\n");
                    }
                }
            }
        }
    }
    Some(())
}

/// Safety: polls statics initialized before the interrupt is unmasked
#[interrupt]
#[allow(non_snake_case)]
#[cfg(feature = "hiddev")]
unsafe fn USBCTRL_IRQ() {
    shared::usb::usb_hid_interrupt_poll();
}

#[interrupt]
#[allow(non_snake_case)]
unsafe fn TIMER_IRQ_0() {
    shared::tick::on_tick();
}
