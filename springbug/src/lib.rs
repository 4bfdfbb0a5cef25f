#![cfg_attr(not(test), no_std)]

//! Electronic emulation of a Vibroplex-style semi-automatic key ("bug").
//!
//! A mechanical bug generates dits by letting a sprung pendulum arm bounce a
//! contact while the paddle is held; dahs are keyed by hand. This crate
//! replaces the pendulum with a fixed-point spring-mass simulation stepped
//! at 1024 Hz, so a microcontroller with two paddle inputs and a tone
//! output behaves like the real instrument. The mechanics being imitated
//! are laid out at <https://kbsriram.github.io/vibroplex-bug-analysis>.
//!
//! [`spring`] holds the simulation itself, [`calib`] maps code speed to a
//! spring constant, [`hal`] is the capability boundary to the board, and
//! [`keyer`] wires paddle state to the tone output once per tick.

pub mod calib;
pub mod hal;
pub mod keyer;
pub mod spring;

pub use keyer::Keyer;
pub use spring::{CenterTransition, DitSpring, CENTER_DIT, CENTER_NEUTRAL, TICK_RATE_HZ};
