//! Top-level dispatch: paddles in, tone out, once per tick.

use crate::hal::KeyerHal;
use crate::spring::DitSpring;

/// The complete keyer: a simulated dit contact plus the pass-through dah
/// path.
#[derive(Debug, Default)]
pub struct Keyer {
    spring: DitSpring,
}

impl Keyer {
    pub const fn new() -> Self {
        Self {
            spring: DitSpring::new(),
        }
    }

    pub fn spring(&self) -> &DitSpring {
        &self.spring
    }

    /// The runtime adjustment seam: speed changes go through
    /// [`DitSpring::set_spring_k`] on the returned handle.
    pub fn spring_mut(&mut self) -> &mut DitSpring {
        &mut self.spring
    }

    /// One tick's worth of work: advance the dit simulation with the dit
    /// paddle, OR in the dah paddle, drive the tone output. Returns the
    /// combined tone level.
    pub fn step<H: KeyerHal>(&mut self, hal: &mut H) -> bool {
        let dit_tone = self.spring.tick(hal.dit_pressed());
        let dah_tone = hal.dah_pressed();
        let tone = dit_tone | dah_tone;
        hal.set_tone(tone);
        tone
    }

    /// Runs the keyer for the life of the device: sleep until the next
    /// wake event, dispatch one tick, repeat.
    pub async fn run<H: KeyerHal>(mut self, hal: &mut H) -> ! {
        loop {
            hal.wait_for_tick().await;
            self.step(hal);
        }
    }
}
