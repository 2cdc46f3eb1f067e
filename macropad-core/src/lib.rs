//! Algorithmic core of the macropad firmware.
//!
//! Everything in here is hardware-free and fixed-size: the firmware crate
//! feeds raw pin samples in and takes finished key reports out. Kept apart
//! from the binary crate so it can be unit tested on the host.
#![cfg_attr(not(test), no_std)]

pub mod debounce;
pub mod idle;
pub mod layout;
pub mod matrix;
pub mod report;
