//! Serial text log. Lines look like `OK: ...`, `WARN: ...`, `ERR: ...`; a failed write is dropped
//! (the log must never stall the player).

use core::convert::Infallible;
use ufmt::uWrite;

#[macro_export]
macro_rules! log_ok {
    ($w:expr, $($arg:tt)*) => {{
        let _ = ufmt::uwrite!($w, "OK: ");
        let _ = ufmt::uwriteln!($w, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($w:expr, $($arg:tt)*) => {{
        let _ = ufmt::uwrite!($w, "WARN: ");
        let _ = ufmt::uwriteln!($w, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_err {
    ($w:expr, $($arg:tt)*) => {{
        let _ = ufmt::uwrite!($w, "ERR: ");
        let _ = ufmt::uwriteln!($w, $($arg)*);
    }};
}

/// Sink for boards without a serial line attached.
#[derive(Debug, Default)]
pub struct NullLog;

impl uWrite for NullLog {
    type Error = Infallible;

    fn write_str(&mut self, _: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}
