//! Code-speed calibration.
//!
//! A dit cycle is two units long and the PARIS convention makes one unit
//! 1.2/wpm seconds, so the contact has to swing at ω = 2π·wpm/2.4 rad/s.
//! The simulation is scaled so a spring constant `k` oscillates at √k
//! rad/s (see [`crate::spring`]), which makes k = ω².

use micromath::F32Ext;

/// Slowest supported code speed.
pub const MIN_WPM: u32 = 5;

/// Fastest supported code speed. Also the overflow ceiling: the spring
/// constant for 60 wpm (24674) times the largest representable
/// displacement still fits the wide force product.
pub const MAX_WPM: u32 = 60;

/// Spring constant the model resets to: 20 wpm.
pub const DEFAULT_SPRING_K: i16 = 2740;

/// Spring constant producing dits at `wpm` words per minute. Speeds
/// outside [`MIN_WPM`]..=[`MAX_WPM`] are clamped into the supported band.
pub fn spring_k_for_wpm(wpm: u32) -> i16 {
    let wpm = wpm.clamp(MIN_WPM, MAX_WPM) as f32;
    let omega = 2.0 * core::f32::consts::PI * wpm / 2.4;
    F32Ext::round(omega * omega) as i16
}
