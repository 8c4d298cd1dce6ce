use ufmt::derive::uDebug;
use ufmt::{uDisplay, uWrite, Formatter};

#[derive(Debug, uDebug, Clone, Copy, PartialEq, Eq)]
pub enum JukeboxError {
    /// Catalog index past the end; the browse cursor and catalog have gone out of sync.
    OutOfRange { index: usize, len: usize },
    /// Replay requested before any song was picked.
    NoSongSaved,
}

impl uDisplay for JukeboxError {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            JukeboxError::OutOfRange { index, len } => {
                ufmt::uwrite!(f, "song {} out of range (catalog has {})", index, len)
            }
            JukeboxError::NoSongSaved => f.write_str("no song saved"),
        }
    }
}
