//! Note → frequency → square-wave half-period.

/// Twelve pitch classes from A3 up to G#4, plus a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    A,
    As,
    B,
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    Rest,
}

impl Note {
    pub const PITCHED: [Note; 12] = [
        Note::A, Note::As, Note::B, Note::C, Note::Cs, Note::D,
        Note::Ds, Note::E, Note::F, Note::Fs, Note::G, Note::Gs,
    ];

    pub fn is_rest(self) -> bool {
        self == Note::Rest
    }

    // Equal-tempered, A3 = 220 Hz.
    fn base_hz(self) -> f64 {
        match self {
            Note::A => 220.00,
            Note::As => 233.08,
            Note::B => 246.94,
            Note::C => 261.63,
            Note::Cs => 277.18,
            Note::D => 293.66,
            Note::Ds => 311.13,
            Note::E => 329.63,
            Note::F => 349.23,
            Note::Fs => 369.99,
            Note::G => 392.00,
            Note::Gs => 415.30,
            Note::Rest => 0.0,
        }
    }
}

/// Whole-octave transposition applied to every note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PitchShift {
    Low,
    #[default]
    Normal,
    High,
}

impl PitchShift {
    /// Low → Normal → High → Low.
    pub fn next(self) -> Self {
        match self {
            PitchShift::Low => PitchShift::Normal,
            PitchShift::Normal => PitchShift::High,
            PitchShift::High => PitchShift::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PitchShift::Low => "Low pitch",
            PitchShift::Normal => "Normal pitch",
            PitchShift::High => "High pitch",
        }
    }
}

pub fn frequency_hz(note: Note, shift: PitchShift) -> f64 {
    let base = note.base_hz();
    match shift {
        PitchShift::Low => base / 2.0,
        PitchShift::Normal => base,
        PitchShift::High => base * 2.0,
    }
}

/// Milliseconds the speaker sits at one level for a 50% duty square wave, rounded to nearest and
/// never below 1. `None` for a rest.
pub fn half_period_ms(note: Note, shift: PitchShift) -> Option<u32> {
    if note.is_rest() {
        return None;
    }

    let freq = frequency_hz(note, shift);
    let p = 1000.0 / (2.0 * freq);
    let p = (p + 0.5) as u32; // ← no f64::round in core

    Some(p.max(1))
}
