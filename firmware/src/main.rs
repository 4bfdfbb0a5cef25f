//! RP2040 board binding for the springbug keyer.
//!
//! Pin map:
//!   PIN_2  - dit paddle, closes to ground
//!   PIN_3  - dah paddle, closes to ground
//!   PIN_4  - speed select, wired but not yet consumed
//!   PIN_15 - tone output, drives the sidetone oscillator
//!   PIN_25 - onboard LED, mirrors the tone

#![no_std]
#![no_main]

use defmt::{debug, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Ticker};
use panic_probe as _;
use springbug::calib::spring_k_for_wpm;
use springbug::hal::KeyerHal;
use springbug::{Keyer, TICK_RATE_HZ};

const WPM: u32 = 20;

struct Board {
    dit: Input<'static>,
    dah: Input<'static>,
    tone: Output<'static>,
    led: Output<'static>,
    ticker: Ticker,
    tone_active: bool,
}

impl KeyerHal for Board {
    async fn wait_for_tick(&mut self) {
        self.ticker.next().await;
    }

    fn dit_pressed(&mut self) -> bool {
        self.dit.is_low()
    }

    fn dah_pressed(&mut self) -> bool {
        self.dah.is_low()
    }

    fn set_tone(&mut self, active: bool) {
        if active == self.tone_active {
            return;
        }
        self.tone_active = active;
        debug!("tone {}", active);
        if active {
            self.tone.set_high();
            self.led.set_high();
        } else {
            self.tone.set_low();
            self.led.set_low();
        }
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // Reserved for runtime speed control: sample this input and feed it
    // through `spring_k_for_wpm` once the speed pot is fitted.
    let _speed_select = Input::new(p.PIN_4, Pull::Up);

    let mut board = Board {
        dit: Input::new(p.PIN_2, Pull::Up),
        dah: Input::new(p.PIN_3, Pull::Up),
        tone: Output::new(p.PIN_15, Level::Low),
        led: Output::new(p.PIN_25, Level::Low),
        ticker: Ticker::every(Duration::from_hz(u64::from(TICK_RATE_HZ))),
        tone_active: false,
    };

    let mut keyer = Keyer::new();
    keyer.spring_mut().set_spring_k(spring_k_for_wpm(WPM));
    debug!("at rest: {}", keyer.spring());
    info!("springbug keyer ready – {} wpm", WPM);

    keyer.run(&mut board).await
}
