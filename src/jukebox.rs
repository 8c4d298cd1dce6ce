//! Top-level loop: keypad in, screens out, one note per step while playing.
//!
//! | state          | A            | B                          | C / D          |
//! |----------------|--------------|----------------------------|----------------|
//! | Idle           | browse       | replay last song (or warn) | cycle + notice |
//! | SelectingSong  | play browsed | next song                  | -              |
//! | Playing        | -            | stop                       | cycle          |

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use ufmt::uWrite;

use crate::catalog::SongCatalog;
use crate::config::{KEY_POLL_MS, NOTICE_MS, SPLASH_MS};
use crate::display::{self, TextDisplay};
use crate::error::JukeboxError;
use crate::keypad::{Key, KeySource};
use crate::playback::{PlaybackEngine, PlaybackOutcome, PlaybackSession};
use crate::settings::DeviceSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    SelectingSong,
    Playing,
}

pub struct Jukebox<'c, Dsp, K, S, D, W> {
    catalog: &'c SongCatalog,
    settings: DeviceSettings,
    state: NavState,
    browse: usize,
    session: Option<PlaybackSession>,
    display: Dsp,
    keypad: K,
    engine: PlaybackEngine<S, D>,
    log: W,
}

impl<'c, Dsp, K, S, D, W> Jukebox<'c, Dsp, K, S, D, W>
where
    Dsp: TextDisplay,
    K: KeySource,
    S: OutputPin,
    D: DelayNs,
    W: uWrite,
{
    pub fn new(catalog: &'c SongCatalog, display: Dsp, keypad: K, engine: PlaybackEngine<S, D>, log: W) -> Self {
        Self {
            catalog,
            settings: DeviceSettings::default(),
            state: NavState::Idle,
            browse: 0,
            session: None,
            display,
            keypad,
            engine,
            log,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    pub fn browse_index(&self) -> usize {
        self.browse
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn display(&self) -> &Dsp {
        &self.display
    }

    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    pub fn log(&self) -> &W {
        &self.log
    }

    /// Splash, then the Idle screen.
    pub fn start(&mut self) {
        log_ok!(&mut self.log, "jukebox up, {} songs", self.catalog.len());
        display::show(&mut self.display, display::SPLASH, None);
        self.engine.pause(SPLASH_MS);
        display::show_idle(&mut self.display);
    }

    /// Step forever. Only comes back with an error the device can't recover from.
    pub fn run(&mut self) -> JukeboxError {
        loop {
            if let Err(e) = self.tick() {
                log_err!(&mut self.log, "{}", e);
                display::show(&mut self.display, "ERR: halted", None);
                return e;
            }
        }
    }

    /// One cooperative step: a single note while playing, otherwise a single keypad poll.
    pub fn tick(&mut self) -> Result<(), JukeboxError> {
        if self.state == NavState::Playing {
            return self.play_step();
        }

        match self.keypad.poll_key() {
            Some(key) => self.on_key(key),
            None => {
                self.engine.pause(KEY_POLL_MS);
                Ok(())
            }
        }
    }

    pub fn on_key(&mut self, key: Key) -> Result<(), JukeboxError> {
        match (self.state, key) {
            (NavState::Idle, Key::A) => self.open_browse(),
            (NavState::Idle, Key::B) => match self.replay_target() {
                Ok(index) => self.start_playback(index)?,
                Err(e) => {
                    log_warn!(&mut self.log, "{}", e);
                    self.notice(display::NO_SONG_SAVED);
                }
            },
            (NavState::Idle, Key::C) => {
                let label = self.settings.cycle_tempo().label();
                log_ok!(&mut self.log, "{}", label);
                self.notice(label);
            }
            (NavState::Idle, Key::D) => {
                let label = self.settings.cycle_pitch().label();
                log_ok!(&mut self.log, "{}", label);
                self.notice(label);
            }

            (NavState::SelectingSong, Key::A) => {
                let index = self.browse;
                self.start_playback(index)?;
            }
            (NavState::SelectingSong, Key::B) => {
                self.browse = (self.browse + 1) % self.catalog.len();
                let song = self.catalog.song_at(self.browse)?;
                display::show_browse(&mut self.display, self.browse, song);
            }

            (NavState::Playing, Key::B) => self.stop(),
            (NavState::Playing, Key::C) => {
                let label = self.settings.cycle_tempo().label();
                log_ok!(&mut self.log, "{}", label);
                display::show_status(&mut self.display, label);
            }
            (NavState::Playing, Key::D) => {
                let label = self.settings.cycle_pitch().label();
                log_ok!(&mut self.log, "{}", label);
                display::show_status(&mut self.display, label);
            }

            _ => {}
        }

        Ok(())
    }

    fn replay_target(&self) -> Result<usize, JukeboxError> {
        self.settings.last_played().ok_or(JukeboxError::NoSongSaved)
    }

    fn open_browse(&mut self) {
        self.browse = 0;
        self.state = NavState::SelectingSong;
        log_ok!(&mut self.log, "browse");

        // Catalog is never empty.
        if let Ok(song) = self.catalog.song_at(0) {
            display::show_browse(&mut self.display, 0, song);
        }
    }

    fn start_playback(&mut self, index: usize) -> Result<(), JukeboxError> {
        let song = self.catalog.song_at(index)?;

        self.settings.remember(index);
        self.session = Some(PlaybackSession::new(song, index));
        self.state = NavState::Playing;

        log_ok!(&mut self.log, "play {} - {}", index + 1, song.title);
        display::show_playing(&mut self.display, song);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
            log_ok!(&mut self.log, "stopped {} at note {}", session.song().title, session.cursor());
        }
        self.finish();
    }

    fn finish(&mut self) {
        self.session = None;
        self.state = NavState::Idle;
        display::show_idle(&mut self.display);
    }

    // Blocking; only used while Idle.
    fn notice(&mut self, text: &str) {
        display::show(&mut self.display, text, None);
        self.engine.pause(NOTICE_MS);
        display::show_idle(&mut self.display);
    }

    fn play_step(&mut self) -> Result<(), JukeboxError> {
        let Some(session) = self.session.as_mut() else {
            self.state = NavState::Idle;
            return Ok(());
        };

        let Some(pn) = session.next_note() else {
            if !session.is_cancelled() {
                log_ok!(&mut self.log, "done {}", session.song().title);
            }
            self.finish();
            return Ok(());
        };

        // Settings keys wait until the note is over so they only touch the next one.
        // Both settings cycle with period 3, so only the press count mod 3 matters.
        let keypad = &mut self.keypad;
        let mut tempo_steps: u8 = 0;
        let mut pitch_steps: u8 = 0;
        let outcome = self.engine.play_playing_note(pn, &self.settings, || match keypad.poll_key() {
            Some(Key::B) => true,
            Some(Key::C) => {
                tempo_steps = (tempo_steps + 1) % 3;
                false
            }
            Some(Key::D) => {
                pitch_steps = (pitch_steps + 1) % 3;
                false
            }
            _ => false,
        });

        for _ in 0..tempo_steps {
            self.on_key(Key::C)?;
        }
        for _ in 0..pitch_steps {
            self.on_key(Key::D)?;
        }
        if outcome == PlaybackOutcome::Cancelled {
            self.on_key(Key::B)?;
        }
        Ok(())
    }
}
