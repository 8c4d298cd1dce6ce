//! 4x4 matrix keypad.
//!
//! ```text
//!        c0  c1  c2  c3
//!   r0    1   2   3   A
//!   r1    4   5   6   B
//!   r2    7   8   9   C
//!   r3    *   0   #   D
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{DEBOUNCE_SCANS, KEYPAD_SETTLE_US};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    A,
    B,
    C,
    D,
    Star,
    Hash,
}

const LAYOUT: [[Key; 4]; 4] = [
    [Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::A],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::B],
    [Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::C],
    [Key::Star, Key::Digit(0), Key::Hash, Key::D],
];

impl Key {
    pub fn at(row: usize, col: usize) -> Option<Key> {
        LAYOUT.get(row)?.get(col).copied()
    }
}

/// Non-blocking key source. Each press is reported once.
pub trait KeySource {
    fn poll_key(&mut self) -> Option<Key>;
}

/// Rows are driven (idle high, scanned low); columns are pulled-up inputs.
pub struct Keypad4x4<R, C, D> {
    rows: [R; 4],
    cols: [C; 4],
    delay: D,
    last_raw: Option<Key>,
    streak: u8,
    held: Option<Key>,
}

impl<R: OutputPin, C: InputPin, D: DelayNs> Keypad4x4<R, C, D> {
    pub fn new(mut rows: [R; 4], cols: [C; 4], delay: D) -> Self {
        for r in rows.iter_mut() {
            r.set_high().ok();
        }
        Self { rows, cols, delay, last_raw: None, streak: 0, held: None }
    }

    /// One pass over the matrix; first pressed key in row-major order.
    pub fn scan(&mut self) -> Option<Key> {
        let mut found = None;

        for r in 0..self.rows.len() {
            self.rows[r].set_low().ok();
            self.delay.delay_us(KEYPAD_SETTLE_US);

            for c in 0..self.cols.len() {
                if self.cols[c].is_low().unwrap_or(false) {
                    found = Key::at(r, c);
                    break;
                }
            }

            self.rows[r].set_high().ok();
            if found.is_some() {
                break;
            }
        }

        found
    }
}

impl<R: OutputPin, C: InputPin, D: DelayNs> KeySource for Keypad4x4<R, C, D> {
    fn poll_key(&mut self) -> Option<Key> {
        let raw = self.scan();

        if raw == self.last_raw {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.last_raw = raw;
            self.streak = 1;
        }

        // Settled on something new: a press (or a release, which reports nothing).
        if self.streak == DEBOUNCE_SCANS && raw != self.held {
            self.held = raw;
            return raw;
        }
        None
    }
}
