//! What the player shows on the 16x2 LCD.

use heapless::String;

use crate::catalog::Song;
use crate::config::LCD_COLS;

/// Anything that can show text at a row/column.
pub trait TextDisplay {
    fn clear(&mut self);
    fn set_cursor(&mut self, row: u8, col: u8);
    fn write_text(&mut self, text: &str);
}

pub const SPLASH: &str = "Loading.....";
pub const NO_SONG_PLAYING: &str = "No song playing";
pub const NO_SONG_SAVED: &str = "No song saved";
pub const BROWSE_HINT: &str = "A. Play  B. Next";
pub const PLAYING: &str = "playing...";

/// Clear and write up to two rows.
pub fn show<Dsp: TextDisplay>(display: &mut Dsp, top: &str, bottom: Option<&str>) {
    display.clear();
    display.set_cursor(0, 0);
    display.write_text(top);
    if let Some(bottom) = bottom {
        display.set_cursor(1, 0);
        display.write_text(bottom);
    }
}

/// Rewrite just the second row.
pub fn show_status<Dsp: TextDisplay>(display: &mut Dsp, status: &str) {
    let mut row: String<LCD_COLS> = String::new();
    for c in status.chars() {
        if row.push(c).is_err() {
            break;
        }
    }
    while row.push(' ').is_ok() {} // ← pad out whatever the old status left behind

    display.set_cursor(1, 0);
    display.write_text(&row);
}

pub fn show_idle<Dsp: TextDisplay>(display: &mut Dsp) {
    show(display, NO_SONG_PLAYING, None);
}

pub fn show_browse<Dsp: TextDisplay>(display: &mut Dsp, index: usize, song: &Song) {
    show(display, &browse_line(index, song), Some(BROWSE_HINT));
}

pub fn show_playing<Dsp: TextDisplay>(display: &mut Dsp, song: &Song) {
    show(display, song.title, Some(PLAYING));
}

/// "<n> - <title>", 1-based, cut at the LCD width.
pub fn browse_line(index: usize, song: &Song) -> String<LCD_COLS> {
    let mut line: String<LCD_COLS> = String::new();
    let _ = ufmt::uwrite!(line, "{} - ", index + 1);

    for c in song.title.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}
