//! Built-in songs. Rests between notes keep repeated notes from running together.

use crate::catalog::{PlayingNote, Song, SongCatalog};
use crate::pitch::Note::{self, *};
use crate::tempo::Duration::{self, Half as H, Quarter as Q, Whole as W};

const fn n(note: Note, duration: Duration) -> PlayingNote {
    PlayingNote::new(note, duration)
}

static SHOOTING_STARS: [PlayingNote; 8] = [
    n(Ds, W),
    n(Rest, H),
    n(Ds, H),
    n(E, H),
    n(Rest, H),
    n(B, Q),
    n(Rest, Q),
    n(Gs, Q),
];

// Twinkle Twinkle, first two phrases.
static STARS: [PlayingNote; 28] = [
    n(C, Q), n(Rest, Q),
    n(C, Q), n(Rest, Q),
    n(G, Q), n(Rest, Q),
    n(G, Q), n(Rest, Q),
    n(A, Q), n(Rest, Q),
    n(A, Q), n(Rest, Q),
    n(G, H), n(Rest, H),

    n(F, Q), n(Rest, Q),
    n(F, Q), n(Rest, Q),
    n(E, Q), n(Rest, Q),
    n(E, Q), n(Rest, Q),
    n(D, Q), n(Rest, Q),
    n(D, Q), n(Rest, Q),
    n(C, H), n(Rest, H),
];

static SONGS: [Song; 2] = [
    Song::new("Shooting Stars", &SHOOTING_STARS),
    Song::new("STARS", &STARS),
];

pub static CATALOG: SongCatalog = SongCatalog::new(&SONGS);
