//! Keypad-driven song jukebox for an ATmega2560 with a 16x2 character LCD and a piezo speaker.
//!
//! Browse with A/B, play with A, stop/replay with B, C cycles tempo and D cycles pitch. Tones are
//! bit-banged: the speaker pin is toggled by busy-waiting, with the keypad polled every
//! millisecond so a stop lands immediately.
#![cfg_attr(not(test), no_std)]

#[macro_use]
pub mod log;

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod jukebox;
pub mod keypad;
pub mod lcd1602;
pub mod pitch;
pub mod playback;
pub mod settings;
pub mod songs;
pub mod tempo;

#[cfg(test)]
mod sim;

pub use crate::error::JukeboxError;
pub use crate::jukebox::{Jukebox, NavState};
