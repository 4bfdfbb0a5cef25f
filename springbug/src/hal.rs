//! Capability boundary between the keyer and the board.
//!
//! Everything the dispatch loop needs from hardware fits in four
//! operations; the firmware implements them against real pins and a
//! hardware timer, [`FakeKeyerHal`] implements them in memory for
//! deterministic tests.

/// Board capabilities consumed by [`crate::Keyer`].
///
/// The keyer runs in a single execution context; implementations may
/// assume the methods are never invoked concurrently.
pub trait KeyerHal {
    /// Completes when the next fixed-rate wake event arrives. Exactly one
    /// 1024 Hz interval ([`crate::TICK_RATE_HZ`]) elapses per call.
    #[allow(async_fn_in_trait)]
    async fn wait_for_tick(&mut self);

    /// Level of the dit paddle, polled once per tick.
    fn dit_pressed(&mut self) -> bool;

    /// Level of the dah paddle. Dahs are a straight key and bypass the
    /// simulation entirely.
    fn dah_pressed(&mut self) -> bool;

    /// Drives the tone output. Called every tick with the current level;
    /// implementations should only touch the output on a level change.
    fn set_tone(&mut self, active: bool);
}

/// In-memory stand-in for the board.
///
/// Paddle levels are plain fields for tests to script. Wake events
/// complete immediately, so a test advances the keyer as fast as it can
/// call it. Tone writes are counted per transition, which lets tests pin
/// down the write-on-change contract.
#[derive(Debug, Default)]
pub struct FakeKeyerHal {
    pub dit: bool,
    pub dah: bool,
    tone: bool,
    tone_transitions: u32,
}

impl FakeKeyerHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of the tone output.
    pub fn tone(&self) -> bool {
        self.tone
    }

    /// Number of level changes the tone output has seen.
    pub fn tone_transitions(&self) -> u32 {
        self.tone_transitions
    }
}

impl KeyerHal for FakeKeyerHal {
    async fn wait_for_tick(&mut self) {}

    fn dit_pressed(&mut self) -> bool {
        self.dit
    }

    fn dah_pressed(&mut self) -> bool {
        self.dah
    }

    fn set_tone(&mut self, active: bool) {
        if active != self.tone {
            self.tone = active;
            self.tone_transitions += 1;
        }
    }
}
