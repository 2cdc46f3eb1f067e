//! The 1ms idle tick.
//!
//! A self-rescheduling timer alarm stands in for the USB start-of-frame
//! signal and decrements the idle countdown once per millisecond,
//! independently of how many matrix scans happen in between.

use fugit::MicrosDurationU32;
use macropad_core::idle::IdleTimer;
use rp2040_hal::timer::{Alarm, Alarm0};

use super::SyncUnsafeOnce;

/// Boot-time idle period in ticks, ~500ms, the value this class of device
/// starts with before a host reconfigures it.
pub const DEFAULT_IDLE_TICKS: u16 = 500;

/// Idle reporting countdown, shared between the tick interrupt and the
/// report loop.
pub static IDLE_TIMER: IdleTimer = IdleTimer::new(DEFAULT_IDLE_TICKS);

const TICK_PERIOD: MicrosDurationU32 = MicrosDurationU32::millis(1);

static TICK_ALARM: SyncUnsafeOnce<Alarm0> = SyncUnsafeOnce::new();

/// Arm the tick. Call once, before unmasking `TIMER_IRQ_0`.
pub fn start(mut alarm: Alarm0) {
    let _ = alarm.schedule(TICK_PERIOD);
    alarm.enable_interrupt();
    TICK_ALARM.set(alarm);
}

/// # Safety
/// Only called from the `TIMER_IRQ_0` handler, after [`start`]
pub unsafe fn on_tick() {
    if let Some(alarm) = TICK_ALARM.as_mut() {
        alarm.clear_interrupt();
        let _ = alarm.schedule(TICK_PERIOD);
    }
    IDLE_TIMER.tick();
}
