//! Hard-wired device constants. Pin assignment lives in the firmware binary.

/// LCD geometry (HD44780 16x2).
pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: u8 = 2;

/// Serial log baud rate (USART0).
pub const SERIAL_BAUD: u32 = 57600;

/// How long the "Loading....." splash stays up.
pub const SPLASH_MS: u32 = 1000;

/// How long an Idle notice (settings label, "No song saved") stays up before the Idle screen returns.
pub const NOTICE_MS: u32 = 1000;

/// Idle/browse loop wait between keypad polls when nothing was pressed.
pub const KEY_POLL_MS: u32 = 1;

/// Consecutive identical scans before a key counts as pressed (or released).
pub const DEBOUNCE_SCANS: u8 = 3;

/// Row-drive settle time before the columns are sampled.
pub const KEYPAD_SETTLE_US: u32 = 10;
