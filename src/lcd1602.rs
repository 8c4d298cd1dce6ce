use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{LCD_COLS, LCD_ROWS};
use crate::display::TextDisplay;

// Adapted from https://www.waveshare.com/datasheet/LCD_en_PDF/LCD1602.pdf, https://cdn.sparkfun.com/assets/9/5/f/7/b/HD44780.pdf
// ROM A00 is ASCII for 0x20-0x7D apart from a handful of symbols.
fn hd44780_code(c: char) -> u8 {
    match c {
        '¥' => 0b0101_1100, // ← where '\' would be
        '→' => 0b0111_1110,
        '←' => 0b0111_1111,
        '\\' | '~' => 0b1111_1111,
        ' '..='}' => c as u8,
        _ => 0b1111_1111, // ← full block for anything unmapped
    }
}

const CMD_CLEAR: u8 = 0b0000_0001;
const CMD_ENTRY_MODE: u8 = 0b0000_0100;
const CMD_DISPLAY: u8 = 0b0000_1000;
const CMD_FUNCTION: u8 = 0b0010_0000;
const CMD_DDRAM: u8 = 0b1000_0000;

const ROW_OFFSET: [u8; 2] = [0x00, 0x40];

/// HD44780 16x2 in 8-bit mode. RW is tied to ground, so the busy flag is never read; every
/// command just waits out its datasheet execution time instead.
///
/// Pin writes are fire-and-forget (AVR GPIO can't fail).
pub struct Lcd1602<P, D> {
    rs: P,
    en: P,
    db: [P; 8], // ← NOTE... little endian (0-7)
    delay: D,
    col: usize,
}

impl<P: OutputPin, D: DelayNs> Lcd1602<P, D> {
    pub fn new(rs: P, en: P, db: [P; 8], delay: D) -> Self {
        Self { rs, en, db, delay, col: 0 }
    }

    pub fn register(&mut self, mut byte: u8) { // ← write to DB register
        for dbi in self.db.iter_mut() {
            dbi.set_state(PinState::from(byte & 0x1 == 1)).ok();
            byte >>= 1;
        }
    }

    pub fn enp(&mut self) { // ← enable (E) pulse; data latches on the falling edge
        self.en.set_high().ok();
        self.delay.delay_us(1);
        self.en.set_low().ok();
        self.delay.delay_us(1);
    }

    fn send(&mut self, byte: u8, rs: bool) {
        self.rs.set_state(PinState::from(rs)).ok();
        self.register(byte);
        self.enp();
    }

    pub fn cmd(&mut self, reg: u8) {
        self.send(reg, false);
        self.delay.delay_us(50); // ← 37us max for everything but clear/home
    }

    pub fn dtw(&mut self, data: u8) { // ← Data write (dds 1st!)
        self.send(data, true);
        self.delay.delay_us(50);
    }

    pub fn clr(&mut self) { // ← screen clear
        self.send(CMD_CLEAR, false);
        self.delay.delay_ms(2); // ← 1.52ms
        self.col = 0;
    }

    pub fn ems(&mut self, id: bool, s: bool) { // ← entry mode set
        self.cmd(CMD_ENTRY_MODE | ((id as u8) << 1) | (s as u8));
    }

    pub fn dsw(&mut self, d: bool, c: bool, b: bool) { // ← display switch
        self.cmd(CMD_DISPLAY | ((d as u8) << 2) | ((c as u8) << 1) | (b as u8));
    }

    pub fn fns(&mut self, dl: bool, n: bool, f: bool) { // ← function set
        self.cmd(CMD_FUNCTION | ((dl as u8) << 4) | ((n as u8) << 3) | ((f as u8) << 2));
    }

    pub fn dds(&mut self, add: u8) { // ← DDRAM set address
        self.cmd(CMD_DDRAM | (add & 0b0111_1111));
    }

    // Datasheet p45, "Initializing by Instruction" for 8-bit interface.
    pub fn init(&mut self) {
        self.en.set_low().ok();
        self.delay.delay_ms(16);

        self.send(0b0011_0000, false);
        self.delay.delay_ms(5);
        self.send(0b0011_0000, false);
        self.delay.delay_us(150);
        self.send(0b0011_0000, false);
        self.delay.delay_us(50);

        self.fns(true, true, false);   // 8-bit, 2 lines, 5x8
        self.dsw(true, false, false);  // on, no cursor, no blink
        self.ems(true, false);         // increment, no shift
        self.clr();
    }

    pub fn disp_str(&mut self, str: &str) {
        for c in str.chars() {
            if self.col >= LCD_COLS {
                break; // ← past column 16 is off-screen DDRAM
            }
            self.dtw(hd44780_code(c));
            self.col += 1;
        }
    }
}

impl<P: OutputPin, D: DelayNs> TextDisplay for Lcd1602<P, D> {
    fn clear(&mut self) {
        self.clr();
    }

    fn set_cursor(&mut self, row: u8, col: u8) {
        let row = row.min(LCD_ROWS - 1);
        self.dds(ROW_OFFSET[row as usize] + col);
        self.col = col as usize;
    }

    fn write_text(&mut self, text: &str) {
        self.disp_str(text);
    }
}
