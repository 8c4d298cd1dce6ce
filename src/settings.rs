use crate::pitch::PitchShift;
use crate::tempo::TempoFactor;

/// Everything the device remembers until power-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceSettings {
    tempo: TempoFactor,
    pitch: PitchShift,
    last_played: Option<usize>,
}

impl DeviceSettings {
    pub fn tempo_factor(&self) -> TempoFactor {
        self.tempo
    }

    pub fn pitch_shift(&self) -> PitchShift {
        self.pitch
    }

    pub fn last_played(&self) -> Option<usize> {
        self.last_played
    }

    pub fn set_tempo(&mut self, tempo: TempoFactor) {
        self.tempo = tempo;
    }

    pub fn set_pitch(&mut self, pitch: PitchShift) {
        self.pitch = pitch;
    }

    /// Only ever called with an index the catalog just resolved.
    pub fn remember(&mut self, index: usize) {
        self.last_played = Some(index);
    }

    pub fn cycle_tempo(&mut self) -> TempoFactor {
        self.tempo = self.tempo.next();
        self.tempo
    }

    pub fn cycle_pitch(&mut self) -> PitchShift {
        self.pitch = self.pitch.next();
        self.pitch
    }
}
