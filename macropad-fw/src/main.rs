//! USB macropad firmware for the RP2040.
//!
//! A 2×3 key matrix is scanned every 500µs, debounced through the per-key
//! confidence counters in [`macropad_core`], mapped through a two-layer
//! keymap and reported over USB HID with up to six keys per report. Holding
//! the layer key swaps the remaining five keys to the second layer.
//!
//! Build with the `hiddev` feature (default) for the real keyboard, or with
//! `serial` for a debug build that prints key events over USB CDC instead of
//! enumerating as a keyboard.
#![cfg_attr(not(test), no_std)]
#![no_main]

mod hid;
pub(crate) mod keyboard;
mod keymap;
pub(crate) mod runtime;
mod timer;

use rp2040_hal as hal;
use rp2040_hal::entry;

#[cfg(all(feature = "serial", feature = "hiddev"))]
const _ILLEGAL_FEATURES: () = assert!(false, "Can't compile as both serial and hiddev");

/// Crystal frequency of the board's oscillator.
const XOSC_CRYSTAL_FREQ: u32 = 12_000_000;

/// Second-stage bootloader for the W25Q-series flash most RP2040 boards carry.
#[link_section = ".boot2"]
#[no_mangle]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

#[entry]
fn main() -> ! {
    setup_macropad()
}

fn setup_macropad() -> ! {
    // Grab our singleton objects
    let mut pac = hal::pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    let clocks = hal::clocks::init_clocks_and_plls(
        XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let tick_alarm = timer.alarm_0().unwrap();

    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(pac.IO_BANK0, pac.PADS_BANK0, sio.gpio_bank0, &mut pac.RESETS);

    // Set up the USB driver
    #[cfg(any(feature = "serial", feature = "hiddev"))]
    let usb_bus = usb_device::bus::UsbBusAllocator::new(hal::usb::UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));

    let matrix = keyboard::MatrixPins::new(
        (
            pins.gpio16.into_pull_up_input(),
            pins.gpio17.into_pull_up_input(),
        ),
        (
            pins.gpio18.into_pull_up_input(),
            pins.gpio19.into_pull_up_input(),
            pins.gpio20.into_pull_up_input(),
        ),
    );

    runtime::main_loop::run(
        #[cfg(any(feature = "serial", feature = "hiddev"))]
        usb_bus,
        matrix,
        timer,
        tick_alarm,
    )
}

#[panic_handler]
#[inline(never)]
fn halt(_info: &core::panic::PanicInfo) -> ! {
    loop {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}
