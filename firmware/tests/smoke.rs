#![no_std]
#![no_main]

use defmt_rtt as _;
use embassy_rp as _; // critical-section provider
use panic_probe as _;

#[defmt_test::tests]
mod tests {
    use defmt::{assert, assert_eq, info};
    use fixed::types::I8F8;
    use micromath::F32Ext;
    use springbug::{DitSpring, CENTER_NEUTRAL, TICK_RATE_HZ};

    #[test]
    fn rest_is_silent() {
        let mut spring = DitSpring::new();
        for _ in 0..1000 {
            assert!(!spring.tick(false));
        }
        assert_eq!(spring.position().to_bits(), CENTER_NEUTRAL.to_bits());
        assert_eq!(spring.velocity().to_bits(), I8F8::ZERO.to_bits());
        info!("settled: {}", spring);
    }

    #[test]
    fn dit_closes_a_quarter_period_after_the_press() {
        let mut spring = DitSpring::new();
        let quarter =
            core::f32::consts::TAU / (spring.spring_k() as f32).sqrt() * TICK_RATE_HZ as f32 / 4.0;

        let mut onset = 0u32;
        while !spring.tick(true) {
            onset += 1;
            assert!(onset < 1000);
        }
        let error = (onset as f32 - quarter).abs() / quarter;
        assert!(error < 0.10);
    }
}
