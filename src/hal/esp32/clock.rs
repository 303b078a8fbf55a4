//! Monotonic millisecond clock backed by `esp_timer`.

use esp_idf_hal::sys::esp_timer_get_time;

use crate::traits::Clock;

/// Milliseconds elapsed since the clock was created.
///
/// Reads the 64-bit `esp_timer` counter, which keeps running through light
/// sleep, so step pacing is unaffected by idle ticks.
///
/// ```ignore
/// use valve_actuator::hal::esp32::Esp32Clock;
/// use valve_actuator::profile::RampProfile;
///
/// let profile = RampProfile::new(Esp32Clock::new());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Esp32Clock {
    origin_us: i64,
}

impl Esp32Clock {
    /// Start a clock at 0 ms.
    pub fn new() -> Self {
        Self { origin_us: timer_us() }
    }
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

fn timer_us() -> i64 {
    // SAFETY: read-only query of the high resolution timer
    unsafe { esp_timer_get_time() }
}

impl Clock for Esp32Clock {
    fn now_ms(&self) -> u64 {
        let elapsed_us = timer_us().saturating_sub(self.origin_us).max(0);
        elapsed_us as u64 / 1000
    }
}
