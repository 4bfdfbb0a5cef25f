//! Spring-mass simulation of the dit contact.
//!
//! The dit contact is modeled as a unit point mass oscillating about a
//! center. The center follows the paddle: an open paddle parks it at the
//! neutral stop, a held paddle moves it to the dit stop. Each tick applies
//! the spring force for the contact's current distance from the center,
//! then integrates velocity and position.
//!
//! All contact quantities are Q8.8 ([`fixed::types::I8F8`]): an `i16`
//! holding 256ths of a unit, covering roughly ±128 units at 1/256
//! resolution. The spring constant is a plain integer, not Q-format.
//! Products are taken in `i32` and shifted back down; the shifts restore
//! the Q8.8 scale and fold in the 1/1024 s timestep, multiplying out to
//! k/2²⁰ per tick² so that a spring constant `k` swings the contact at
//! √k rad/s.

use fixed::types::I8F8;
use fixed_macro::fixed;

use crate::calib::DEFAULT_SPRING_K;

/// Rate of the periodic wake signal driving [`DitSpring::tick`].
pub const TICK_RATE_HZ: u32 = 1024;

/// Center of oscillation while the dit paddle is open.
pub const CENTER_NEUTRAL: I8F8 = fixed!(-100.0: I8F8);

/// Center of oscillation while the dit paddle is held. The contact is
/// closed at and above this point.
pub const CENTER_DIT: I8F8 = I8F8::ZERO;

/// Center travel per tick under [`CenterTransition::Ramp`]: the full
/// neutral-to-dit distance in 10 ticks, about a quarter phase at the top
/// supported speed.
pub const DEFAULT_PADDLE_RATE: I8F8 = fixed!(10.0: I8F8);

// 8 bits restore the Q8.8 scale of the k·displacement product, 10 more are
// one dt factor; the remaining dt factor lands on the position update.
const FORCE_TO_VELOCITY_SHIFT: u32 = 18;
const VELOCITY_TO_POSITION_SHIFT: u32 = 2;

/// How the oscillation center tracks the paddle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CenterTransition {
    /// The center lands on the paddle's stop the same tick the level
    /// changes.
    Snap,
    /// The center moves at most `per_tick` toward the paddle's stop each
    /// tick, modeling the travel time of a physical paddle.
    Ramp { per_tick: I8F8 },
}

/// Oscillator state of the simulated dit contact.
///
/// Exclusively owned by its caller; `tick` mutates it exactly once per
/// invocation and must not be re-entered from a second context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DitSpring {
    position: I8F8,
    velocity: I8F8,
    center: I8F8,
    spring_k: i16,
    transition: CenterTransition,
}

impl DitSpring {
    /// A contact at rest on the neutral stop, sprung for 20 wpm.
    pub const fn new() -> Self {
        Self {
            position: CENTER_NEUTRAL,
            velocity: I8F8::ZERO,
            center: CENTER_NEUTRAL,
            spring_k: DEFAULT_SPRING_K,
            transition: CenterTransition::Snap,
        }
    }

    /// Re-establishes the rest state: position and center on the neutral
    /// stop, no velocity, default spring constant. The center-transition
    /// policy is configuration and is left alone.
    pub fn reset(&mut self) {
        self.position = CENTER_NEUTRAL;
        self.velocity = I8F8::ZERO;
        self.center = CENTER_NEUTRAL;
        self.spring_k = DEFAULT_SPRING_K;
    }

    /// Advances the contact by one 1/1024 s step and reports whether it is
    /// closed, i.e. whether the tone should sound.
    pub fn tick(&mut self, dit_pressed: bool) -> bool {
        let target = if dit_pressed { CENTER_DIT } else { CENTER_NEUTRAL };
        self.center = match self.transition {
            CenterTransition::Snap => target,
            CenterTransition::Ramp { per_tick } => step_toward(self.center, target, per_tick),
        };

        // F = -k (x - c); unit mass, so the force is the acceleration.
        let displacement = i32::from(self.position.to_bits()) - i32::from(self.center.to_bits());
        let force = i32::from(self.spring_k) * displacement;

        // The wide product must be shifted as a whole: shifting force and
        // dt separately discards low bits that carry the entire force at
        // the softest spring settings.
        self.velocity = saturate(
            i32::from(self.velocity.to_bits()) - (force >> FORCE_TO_VELOCITY_SHIFT),
        );
        self.position = saturate(
            i32::from(self.position.to_bits())
                + (i32::from(self.velocity.to_bits()) >> VELOCITY_TO_POSITION_SHIFT),
        );

        // The arm rests against a mechanical stop at the neutral extreme.
        // The stop is inelastic: remaining momentum is discarded rather
        // than reflected.
        if self.position < CENTER_NEUTRAL {
            self.position = CENTER_NEUTRAL;
            self.velocity = I8F8::ZERO;
        }

        self.position >= CENTER_DIT
    }

    pub fn position(&self) -> I8F8 {
        self.position
    }

    pub fn velocity(&self) -> I8F8 {
        self.velocity
    }

    pub fn center(&self) -> I8F8 {
        self.center
    }

    pub fn spring_k(&self) -> i16 {
        self.spring_k
    }

    /// Sets the spring stiffness. See [`crate::calib`] for the mapping
    /// from code speed; `tick` itself never changes this value.
    pub fn set_spring_k(&mut self, spring_k: i16) {
        self.spring_k = spring_k;
    }

    pub fn center_transition(&self) -> CenterTransition {
        self.transition
    }

    pub fn set_center_transition(&mut self, transition: CenterTransition) {
        self.transition = transition;
    }

    /// Places the contact at an arbitrary point on the phase plane, for
    /// tests and bring-up diagnostics. Positions below the neutral stop
    /// are floored to it.
    pub fn set_state(&mut self, position: I8F8, velocity: I8F8) {
        self.position = position.max(CENTER_NEUTRAL);
        self.velocity = velocity;
    }
}

impl Default for DitSpring {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DitSpring {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DitSpring {{ pos: {=i16}, vel: {=i16}, center: {=i16}, k: {=i16} }}",
            self.position.to_bits(),
            self.velocity.to_bits(),
            self.center.to_bits(),
            self.spring_k,
        );
    }
}

fn saturate(wide: i32) -> I8F8 {
    I8F8::from_bits(wide.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16)
}

fn step_toward(current: I8F8, target: I8F8, per_tick: I8F8) -> I8F8 {
    if current < target {
        target.min(current.saturating_add(per_tick))
    } else {
        target.max(current.saturating_sub(per_tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_position_is_stable() {
        let mut spring = DitSpring::new();
        for _ in 0..10_000 {
            assert!(!spring.tick(false));
        }
        assert_eq!(spring.position(), CENTER_NEUTRAL);
        assert_eq!(spring.velocity(), I8F8::ZERO);
    }

    #[test]
    fn center_snaps_with_the_paddle() {
        let mut spring = DitSpring::new();
        spring.tick(true);
        assert_eq!(spring.center(), CENTER_DIT);
        spring.tick(false);
        assert_eq!(spring.center(), CENTER_NEUTRAL);
    }

    #[test]
    fn neutral_stop_is_inelastic() {
        let mut spring = DitSpring::new();
        spring.set_state(CENTER_NEUTRAL + I8F8::from_bits(4), I8F8::from_bits(-2000));
        spring.tick(false);
        assert_eq!(spring.position(), CENTER_NEUTRAL);
        assert_eq!(spring.velocity(), I8F8::ZERO);
    }

    #[test]
    fn set_state_floors_at_the_neutral_stop() {
        let mut spring = DitSpring::new();
        spring.set_state(I8F8::from_num(-110), I8F8::ZERO);
        assert_eq!(spring.position(), CENTER_NEUTRAL);
    }

    #[test]
    fn closure_tracks_zero_crossings() {
        let mut spring = DitSpring::new();
        spring.set_state(I8F8::from_num(-5), I8F8::from_bits(3000));

        let (mut seen_up, mut seen_down) = (false, false);
        for _ in 0..400 {
            let before = spring.position();
            let closed = spring.tick(true);
            assert_eq!(closed, spring.position() >= CENTER_DIT);
            if before < CENTER_DIT && spring.position() >= CENTER_DIT {
                seen_up = true;
                assert!(closed);
            }
            if before >= CENTER_DIT && spring.position() < CENTER_DIT {
                seen_down = true;
                assert!(!closed);
            }
        }
        assert!(seen_up && seen_down);
    }

    // The stiffest supported spring against the largest representable
    // displacement: the wide force product stays inside i32 and one step
    // comes out exact.
    #[test]
    fn stiffest_spring_at_max_displacement_does_not_wrap() {
        let mut spring = DitSpring::new();
        spring.set_spring_k(24_674);
        spring.set_state(I8F8::MAX, I8F8::ZERO);

        spring.tick(false);
        assert_eq!(spring.velocity().to_bits(), -5493);
        assert_eq!(spring.position().to_bits(), 31_393);
    }

    #[test]
    fn ramped_center_travels_and_clamps() {
        let mut spring = DitSpring::new();
        spring.set_center_transition(CenterTransition::Ramp {
            per_tick: DEFAULT_PADDLE_RATE,
        });

        for _ in 0..4 {
            spring.tick(true);
        }
        assert_eq!(spring.center(), I8F8::from_num(-60));

        // Released mid-travel the center turns straight around.
        spring.tick(false);
        assert_eq!(spring.center(), I8F8::from_num(-70));

        for _ in 0..20 {
            spring.tick(true);
        }
        assert_eq!(spring.center(), CENTER_DIT);
        spring.tick(true);
        assert_eq!(spring.center(), CENTER_DIT);
    }

    #[test]
    fn reset_restores_the_rest_state() {
        let mut spring = DitSpring::new();
        spring.set_spring_k(171);
        for _ in 0..500 {
            spring.tick(true);
        }
        spring.reset();
        assert_eq!(spring, DitSpring::new());
    }
}
