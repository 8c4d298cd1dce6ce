use crate::error::JukeboxError;
use crate::pitch::Note;
use crate::tempo::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayingNote {
    pub note: Note,
    pub duration: Duration,
}

impl PlayingNote {
    pub const fn new(note: Note, duration: Duration) -> Self {
        Self { note, duration }
    }
}

/// A title plus its notes, in the order they are played.
#[derive(Debug)]
pub struct Song {
    pub title: &'static str,
    pub notes: &'static [PlayingNote],
}

impl Song {
    pub const fn new(title: &'static str, notes: &'static [PlayingNote]) -> Self {
        Self { title, notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Fixed song list; never empty, never reordered.
#[derive(Debug)]
pub struct SongCatalog {
    songs: &'static [Song],
}

impl SongCatalog {
    pub const fn new(songs: &'static [Song]) -> Self {
        assert!(!songs.is_empty(), "catalog needs at least one song");
        Self { songs }
    }

    pub fn song_at(&self, index: usize) -> Result<&'static Song, JukeboxError> {
        let songs: &'static [Song] = self.songs;
        songs.get(index).ok_or(JukeboxError::OutOfRange { index, len: self.songs.len() })
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    // Always false; kept for the len/is_empty pair.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Song> {
        let songs: &'static [Song] = self.songs;
        songs.iter()
    }
}
