//! Session flow: menu -> playing -> game over
//!
//! Owns the round, the countdown and the collaborators, and forwards the
//! round's events to them after each tick.

use crate::audio::AudioSink;
use crate::highscores::{LedgerError, ScoreLedger, ScoreRecord};
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GameEvent, GameMode, RoundState, TickInput, tick};
use crate::timer::RoundTimer;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Menu,
    Playing,
    /// Playing with the clock and the simulation stopped
    Paused,
    GameOver,
}

/// Choice offered on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverAction {
    Restart,
    Menu,
}

pub struct Session<L: ScoreLedger, A: AudioSink> {
    phase: SessionPhase,
    round: RoundState,
    timer: RoundTimer,
    settings: Settings,
    ledger: L,
    audio: A,
    last_record: Option<ScoreRecord>,
}

impl<L: ScoreLedger, A: AudioSink> Session<L, A> {
    pub fn new(settings: Settings, ledger: L, audio: A, seed: u64, mode: GameMode) -> Self {
        let round = RoundState::new(seed, mode, &settings.player_name);
        let timer = RoundTimer::new(settings.round_seconds);
        Self {
            phase: SessionPhase::Menu,
            round,
            timer,
            settings,
            ledger,
            audio,
            last_record: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Direct access for frontends that edit the round (debug tools)
    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Record saved for the most recent finished round
    pub fn last_record(&self) -> Option<&ScoreRecord> {
        self.last_record.as_ref()
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.round.set_player_name(name);
        self.settings.player_name = self.round.player_name.clone();
    }

    /// New round: full reset, clock restarted
    pub fn start_round(&mut self) {
        self.round.start_round();
        self.last_record = None;
        self.timer.reset();
        self.timer.start();
        self.phase = SessionPhase::Playing;
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.round.set_mode(mode);
    }

    /// Mode button in the top bar
    pub fn toggle_mode(&mut self) {
        self.round.toggle_mode();
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Playing => {
                self.timer.pause();
                self.phase = SessionPhase::Paused;
            }
            SessionPhase::Paused => {
                self.timer.start();
                self.phase = SessionPhase::Playing;
            }
            _ => {}
        }
    }

    /// Leave the round without finishing it; it is simply no longer ticked
    pub fn return_to_menu(&mut self) {
        self.timer.pause();
        self.phase = SessionPhase::Menu;
    }

    pub fn game_over_action(&mut self, action: GameOverAction) {
        if self.phase != SessionPhase::GameOver {
            return;
        }
        match action {
            GameOverAction::Restart => self.start_round(),
            GameOverAction::Menu => {
                self.timer.reset();
                self.phase = SessionPhase::Menu;
            }
        }
    }

    /// Run one frame. Returns the round's events after they have been
    /// forwarded to audio and the ledger.
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        if self.phase != SessionPhase::Playing {
            return Vec::new();
        }

        tick(&mut self.round, input);
        self.timer.advance(1);
        // The tick that uses up the clock is the round's last
        if self.timer.is_expired() {
            self.round.end_round();
        }

        let events = self.round.drain_events();
        for event in &events {
            self.dispatch(event);
        }

        if self.round.terminated {
            self.timer.pause();
            self.phase = SessionPhase::GameOver;
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ImpactSound => self.audio.play_impact_sound(),
            GameEvent::RoundEnded(result) => match self.ledger.append(result.clone()) {
                Ok(record) => self.last_record = Some(record),
                Err(e) => log::error!("Could not save score: {}", e),
            },
            _ => {}
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.round.snapshot()
    }

    pub fn scores(&self) -> Result<Vec<ScoreRecord>, LedgerError> {
        self.ledger.load()
    }

    pub fn clear_scores(&mut self) -> Result<(), LedgerError> {
        self.ledger.clear()
    }
}
