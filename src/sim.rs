//! Host-side stand-ins for the board: a simulated millisecond clock, a speaker that records how
//! long it sat at each level, a keypad that replays a timed script, a display that remembers what
//! it was told, and a string log.

use core::cell::RefCell;
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::display::TextDisplay;
use crate::keypad::{Key, KeySource};

#[derive(Debug, Default)]
struct Trace {
    now_ns: u64,
    level: bool,
    runs: Vec<(bool, u32)>,
}

impl Trace {
    fn advance_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        self.now_ns += ms as u64 * 1_000_000;
        match self.runs.last_mut() {
            Some((level, len)) if *level == self.level => *len += ms,
            _ => self.runs.push((self.level, ms)),
        }
    }
}

/// Shared clock + speaker trace. Clones see the same state.
#[derive(Debug, Clone, Default)]
pub struct Sim(Rc<RefCell<Trace>>);

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speaker(&self) -> SimSpeaker {
        SimSpeaker(self.clone())
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay { sim: self.clone(), pending_ns: 0 }
    }

    pub fn now_ms(&self) -> u32 {
        (self.0.borrow().now_ns / 1_000_000) as u32
    }

    pub fn level(&self) -> bool {
        self.0.borrow().level
    }

    /// `(level, ms)` for each stretch of time the speaker held one level.
    pub fn runs(&self) -> Vec<(bool, u32)> {
        self.0.borrow().runs.clone()
    }

    pub fn high_ms(&self) -> u32 {
        self.0.borrow().runs.iter().filter(|(l, _)| *l).map(|(_, ms)| ms).sum()
    }
}

pub struct SimSpeaker(Sim);

impl ErrorType for SimSpeaker {
    type Error = Infallible;
}

impl OutputPin for SimSpeaker {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().level = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().level = true;
        Ok(())
    }
}

pub struct SimDelay {
    sim: Sim,
    pending_ns: u64,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.pending_ns += ns as u64;
        let ms = self.pending_ns / 1_000_000;
        self.pending_ns %= 1_000_000;
        self.sim.0.borrow_mut().advance_ms(ms as u32);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sim.0.borrow_mut().advance_ms(ms);
    }
}

/// Hands out each scripted key once the clock reaches its time.
pub struct ScriptedKeys {
    sim: Sim,
    script: VecDeque<(u32, Key)>,
}

impl ScriptedKeys {
    pub fn new(sim: &Sim, script: &[(u32, Key)]) -> Self {
        Self { sim: sim.clone(), script: script.iter().copied().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> Option<Key> {
        match self.script.front() {
            Some(&(at, key)) if self.sim.now_ms() >= at => {
                self.script.pop_front();
                Some(key)
            }
            _ => None,
        }
    }
}

/// Screen contents plus every string ever written.
#[derive(Debug, Default)]
pub struct ScreenRecorder {
    pub rows: [String; 2],
    pub history: Vec<String>,
    row: usize,
}

impl ScreenRecorder {
    pub fn saw(&self, text: &str) -> bool {
        self.history.iter().any(|h| h == text)
    }
}

impl TextDisplay for ScreenRecorder {
    fn clear(&mut self) {
        self.rows = Default::default();
        self.row = 0;
    }

    fn set_cursor(&mut self, row: u8, col: u8) {
        self.row = row as usize;
        self.rows[self.row].truncate(col as usize);
    }

    fn write_text(&mut self, text: &str) {
        self.rows[self.row].push_str(text);
        self.history.push(text.into());
    }
}

#[derive(Debug, Default)]
pub struct LogBuf(pub String);

impl ufmt::uWrite for LogBuf {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.push_str(s);
        Ok(())
    }
}
