//! Bit-banged square-wave player.
//!
//! There are no interrupts: every millisecond of waiting is a suspension point where the caller's
//! `should_cancel` is asked whether to stop, so a stop key is noticed within about a millisecond.
//! Whatever the exit path, the speaker is left low.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::catalog::{PlayingNote, Song};
use crate::pitch::{half_period_ms, Note, PitchShift};
use crate::settings::DeviceSettings;
use crate::tempo::duration_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    Cancelled,
}

pub struct PlaybackEngine<S, D> {
    speaker: S,
    delay: D,
}

impl<S: OutputPin, D: DelayNs> PlaybackEngine<S, D> {
    pub fn new(speaker: S, delay: D) -> Self {
        let mut engine = Self { speaker, delay };
        engine.drive(false);
        engine
    }

    /// Sound (or rest) one note for about `total_ms`.
    ///
    /// A tone plays `total_ms / (2 * half_period)` whole cycles, truncated, so it can run a little
    /// short. A note too short for even one cycle still gets one, where bare truncation would
    /// give zero cycles and leave the note silent.
    pub fn play_note<F>(&mut self, note: Note, shift: PitchShift, total_ms: u32, mut should_cancel: F) -> PlaybackOutcome
    where
        F: FnMut() -> bool,
    {
        let Some(half) = half_period_ms(note, shift) else {
            return self.hold(false, total_ms, &mut should_cancel);
        };

        let cycles = (total_ms / (2 * half)).max(1);
        for _ in 0..cycles {
            if self.hold(true, half, &mut should_cancel) == PlaybackOutcome::Cancelled
                || self.hold(false, half, &mut should_cancel) == PlaybackOutcome::Cancelled
            {
                return PlaybackOutcome::Cancelled;
            }
        }

        PlaybackOutcome::Completed
    }

    /// Play a whole song with the given settings. Stops at the first cancelled note.
    pub fn play_song<F>(&mut self, song: &Song, settings: &DeviceSettings, mut should_cancel: F) -> PlaybackOutcome
    where
        F: FnMut() -> bool,
    {
        for pn in song.notes {
            if self.play_playing_note(pn, settings, &mut should_cancel) == PlaybackOutcome::Cancelled {
                return PlaybackOutcome::Cancelled;
            }
        }

        PlaybackOutcome::Completed
    }

    /// Resolve one authored note against the current settings and play it.
    pub fn play_playing_note<F>(&mut self, pn: &PlayingNote, settings: &DeviceSettings, should_cancel: F) -> PlaybackOutcome
    where
        F: FnMut() -> bool,
    {
        let ms = duration_ms(pn.duration, settings.tempo_factor());
        self.play_note(pn.note, settings.pitch_shift(), ms, should_cancel)
    }

    /// Plain wait with the speaker off; not cancellable.
    pub fn pause(&mut self, ms: u32) {
        self.drive(false);
        self.delay.delay_ms(ms);
    }

    pub fn release(mut self) -> (S, D) {
        self.drive(false);
        (self.speaker, self.delay)
    }

    // Hold `level` for `ms` one-millisecond ticks, polling before each. Drops the line on cancel.
    fn hold<F>(&mut self, level: bool, ms: u32, should_cancel: &mut F) -> PlaybackOutcome
    where
        F: FnMut() -> bool,
    {
        self.drive(level);
        for _ in 0..ms {
            if should_cancel() {
                self.drive(false);
                return PlaybackOutcome::Cancelled;
            }
            self.delay.delay_ms(1);
        }

        if level {
            self.drive(false);
        }
        PlaybackOutcome::Completed
    }

    fn drive(&mut self, level: bool) {
        self.speaker.set_state(PinState::from(level)).ok(); // ← GPIO writes can't fail on AVR
    }
}

/// The song currently sounding and how far into it we are.
#[derive(Debug)]
pub struct PlaybackSession {
    song: &'static Song,
    index: usize,
    cursor: usize,
    cancelled: bool,
}

impl PlaybackSession {
    pub fn new(song: &'static Song, index: usize) -> Self {
        Self { song, index, cursor: 0, cancelled: false }
    }

    pub fn song(&self) -> &'static Song {
        self.song
    }

    /// Catalog position of the song.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Next note to play, or `None` once the song is exhausted or cancelled.
    pub fn next_note(&mut self) -> Option<&'static PlayingNote> {
        if self.cancelled {
            return None;
        }

        let song: &'static Song = self.song;
        let pn = song.notes.get(self.cursor)?;
        self.cursor += 1;
        Some(pn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchShift::Normal;
    use crate::sim::{Sim, SimDelay, SimSpeaker};
    use crate::tempo::{Duration, TempoFactor};

    fn engine(sim: &Sim) -> PlaybackEngine<SimSpeaker, SimDelay> {
        PlaybackEngine::new(sim.speaker(), sim.delay())
    }

    static SCENARIO_NOTES: [PlayingNote; 2] = [
        PlayingNote::new(Note::C, Duration::Quarter),
        PlayingNote::new(Note::Rest, Duration::Quarter),
    ];
    static SCENARIO: Song = Song::new("A", &SCENARIO_NOTES);

    #[test]
    fn pe_rest_waits() {
        let sim = Sim::new();
        let mut pe = engine(&sim);

        assert_eq!(pe.play_note(Note::Rest, Normal, 250, || false), PlaybackOutcome::Completed);
        assert_eq!(sim.runs(), [(false, 250)]);
    }

    #[test]
    fn pe_tone_cycles() {
        let sim = Sim::new();
        let mut pe = engine(&sim);

        // C: half-period 2ms → 250 / 4 = 62 cycles
        assert_eq!(pe.play_note(Note::C, Normal, 250, || false), PlaybackOutcome::Completed);

        let runs = sim.runs();
        assert_eq!(runs.len(), 124);
        assert!(runs.chunks(2).all(|c| c == [(true, 2), (false, 2)]));
        assert_eq!(sim.now_ms(), 248);
        assert!(!sim.level());
    }

    #[test]
    fn pe_short_note_one_cycle() {
        let sim = Sim::new();
        let mut pe = engine(&sim);

        // 3ms can't hold a 4ms cycle; still plays one.
        pe.play_note(Note::C, Normal, 3, || false);

        assert_eq!(sim.runs(), [(true, 2), (false, 2)]);
    }

    #[test]
    fn pe_scenario_song() {
        let sim = Sim::new();
        let mut pe = engine(&sim);
        let settings = DeviceSettings::default();

        assert_eq!(pe.play_song(&SCENARIO, &settings, || false), PlaybackOutcome::Completed);

        let runs = sim.runs();
        // 62 cycles of C, the last low half-wave merging into the 250ms rest.
        assert_eq!(runs.len(), 124);
        assert!(runs[..122].chunks(2).all(|c| c == [(true, 2), (false, 2)]));
        assert_eq!(runs[122], (true, 2));
        assert_eq!(runs[123], (false, 2 + 250));
        assert_eq!(sim.now_ms(), 248 + 250);
    }

    #[test]
    fn pe_song_deterministic() {
        let first = Sim::new();
        let second = Sim::new();
        let settings = DeviceSettings::default();

        engine(&first).play_song(&SCENARIO, &settings, || false);
        engine(&second).play_song(&SCENARIO, &settings, || false);

        assert_eq!(first.runs(), second.runs());
    }

    #[test]
    fn pe_song_uses_settings() {
        let sim = Sim::new();
        let mut pe = engine(&sim);
        let mut settings = DeviceSettings::default();
        settings.set_tempo(TempoFactor::new(2).unwrap());
        settings.set_pitch(PitchShift::Low);

        pe.play_song(&SCENARIO, &settings, || false);

        // C low: 130.8Hz → 3.82 → 4ms; 125 / 8 = 15 cycles, then a 125ms rest.
        let runs = sim.runs();
        assert_eq!(runs[0], (true, 4));
        assert_eq!(runs.len(), 30);
        assert_eq!(sim.now_ms(), 15 * 8 + 125);
    }

    #[test]
    fn pe_cancel_mid_tone() {
        for t in [0, 1, 3, 77, 130, 247, 249, 300, 497] {
            let sim = Sim::new();
            let mut pe = engine(&sim);
            let clock = sim.clone();

            let out = pe.play_song(&SCENARIO, &DeviceSettings::default(), || clock.now_ms() >= t);

            assert_eq!(out, PlaybackOutcome::Cancelled, "cancel at {}", t);
            assert!(!sim.level(), "speaker left high after cancel at {}", t);
            assert_eq!(sim.now_ms(), t, "cancel at {} noticed late", t);
        }
    }

    #[test]
    fn pe_cancel_stops_song() {
        let sim = Sim::new();
        let mut pe = engine(&sim);
        let mut polls = 0;

        // Trip on the very first poll of the second note.
        let out = pe.play_song(&SCENARIO, &DeviceSettings::default(), || {
            polls += 1;
            polls > 248
        });

        assert_eq!(out, PlaybackOutcome::Cancelled);
        assert_eq!(sim.now_ms(), 248);
    }

    #[test]
    fn pe_pause_and_release_low() {
        let sim = Sim::new();
        let mut pe = engine(&sim);
        pe.pause(10);

        let (_, _) = pe.release();
        assert_eq!(sim.runs(), [(false, 10)]);
        assert!(!sim.level());
    }

    #[test]
    fn ps_walks_in_order() {
        let mut ps = PlaybackSession::new(&SCENARIO, 0);

        assert_eq!(ps.next_note().map(|pn| pn.note), Some(Note::C));
        assert_eq!(ps.next_note().map(|pn| pn.note), Some(Note::Rest));
        assert_eq!(ps.next_note(), None);
        assert_eq!(ps.cursor(), 2);
    }

    #[test]
    fn ps_cancel_ends() {
        let mut ps = PlaybackSession::new(&SCENARIO, 0);
        ps.next_note();
        ps.cancel();

        assert!(ps.is_cancelled());
        assert_eq!(ps.next_note(), None);
    }
}
