//! Round state and core simulation types
//!
//! Everything a single round needs lives on `RoundState`: counters, the
//! seeded RNG, the spawn catalogue and the object table. Collaborators
//! (audio, ledger, renderer) only see it through events and snapshots.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::object::ActiveObject;
use super::spawner::{self, CatalogueEntry};
use crate::consts::*;
use crate::highscores::{Outcome, RoundResult};

/// How the player hits objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Click/tap on objects
    #[default]
    Pointer,
    /// Type the letter shown on objects
    Keyboard,
}

impl GameMode {
    /// Label written to the score ledger
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Pointer => "Mode 1",
            GameMode::Keyboard => "Mode 2",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "jeu1" | "mode 1" | "pointer" | "mouse" => Some(GameMode::Pointer),
            "2" | "jeu2" | "mode 2" | "keyboard" | "keys" => Some(GameMode::Keyboard),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            GameMode::Pointer => GameMode::Keyboard,
            GameMode::Keyboard => GameMode::Pointer,
        }
    }
}

/// Side effects and notifications produced by the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A fruit or the ice cube was sliced
    ImpactSound,
    HazardExploded { identifier: String },
    FruitMissed { identifier: String },
    SlowMotionStarted { ticks: u32 },
    ModeChanged { from: GameMode, to: GameMode },
    /// Emitted exactly once per round
    RoundEnded(RoundResult),
}

/// Default name when none was entered
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// State of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub mode: GameMode,
    /// Clamped to 0 once the round has ended
    pub lives: i32,
    pub score: u64,
    /// Score multiplier, 1..=MAX_COMBO
    pub combo: u32,
    /// Ticks of frozen play left
    pub slow_motion_ticks: u32,
    /// Displacement multiplier applied on the last tick
    pub speed_factor: f32,
    pub terminated: bool,
    /// Ticks simulated since the round started
    pub elapsed_ticks: u64,
    pub max_score_reached: u64,
    /// Object table in catalogue order
    pub objects: Vec<ActiveObject>,
    catalogue: Vec<CatalogueEntry>,
    pub player_name: String,
    pub debug: bool,
    /// Set by a mode switch, cleared when events are drained
    pub mode_changed: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl RoundState {
    /// Create a round with the given seed and start it
    pub fn new(seed: u64, mode: GameMode, player_name: &str) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode,
            lives: MAX_LIVES,
            score: 0,
            combo: 1,
            slow_motion_ticks: 0,
            speed_factor: NORMAL_SPEED_FACTOR,
            terminated: false,
            elapsed_ticks: 0,
            max_score_reached: 0,
            objects: Vec::new(),
            catalogue: Vec::new(),
            player_name: String::new(),
            debug: false,
            mode_changed: false,
            events: Vec::new(),
        };
        state.set_player_name(player_name);
        state.start_round();
        state
    }

    /// Reset every counter and throw a fresh set of objects
    pub fn start_round(&mut self) {
        self.lives = MAX_LIVES;
        self.score = 0;
        self.combo = 1;
        self.max_score_reached = 0;
        self.slow_motion_ticks = 0;
        self.speed_factor = NORMAL_SPEED_FACTOR;
        self.terminated = false;
        self.elapsed_ticks = 0;
        self.events.clear();
        self.rebuild_catalogue();
        log::info!(
            "Round started: {} as {} ({} objects)",
            self.mode.label(),
            self.player_name,
            self.objects.len()
        );
    }

    /// Switch input mode. Discards every object and timer of the old mode;
    /// lives and score carry over.
    pub fn set_mode(&mut self, mode: GameMode) {
        if mode == self.mode {
            return;
        }
        let from = self.mode;
        self.mode = mode;
        self.mode_changed = true;
        self.combo = 1;
        self.slow_motion_ticks = 0;
        self.speed_factor = NORMAL_SPEED_FACTOR;
        self.rebuild_catalogue();
        self.events.push(GameEvent::ModeChanged { from, to: mode });
        log::info!("Game mode changed: {} -> {}", from.label(), mode.label());
    }

    /// Switch mode by label; unknown labels are ignored
    pub fn set_mode_label(&mut self, label: &str) {
        match GameMode::from_label(label) {
            Some(mode) => self.set_mode(mode),
            None => log::warn!("Invalid mode '{}', keeping {}", label, self.mode.label()),
        }
    }

    /// Cycle to the other mode (HUD mode button)
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    /// Finish the round and publish its result. Only the first call has any effect.
    pub fn end_round(&mut self) -> bool {
        if self.terminated {
            return false;
        }
        self.terminated = true;
        let outcome = if self.lives > 0 {
            Outcome::Win
        } else {
            Outcome::Lose
        };
        self.lives = self.lives.max(0);
        let result = RoundResult {
            player_name: self.player_name.clone(),
            mode_label: self.mode.label().to_string(),
            outcome,
            attempts: (MAX_LIVES - self.lives) as u32,
            max_attempts: MAX_LIVES as u32,
            final_score: self.score,
        };
        log::info!(
            "Round over: {} {} with {} points",
            result.player_name,
            outcome.as_str(),
            result.final_score
        );
        self.events.push(GameEvent::RoundEnded(result));
        true
    }

    pub fn set_player_name(&mut self, name: &str) {
        let name = name.trim();
        self.player_name = if name.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            name.to_string()
        };
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
    }

    /// Take all pending events (clears the mode-changed flag)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.mode_changed = false;
        std::mem::take(&mut self.events)
    }

    /// Identifiers in rotation, in catalogue order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.catalogue.iter().map(|e| e.identifier.as_str())
    }

    pub fn object(&self, identifier: &str) -> Option<&ActiveObject> {
        self.objects.iter().find(|o| o.identifier == identifier)
    }

    pub fn airborne_count(&self) -> usize {
        self.objects.iter().filter(|o| o.airborne).count()
    }

    pub fn is_slow_motion(&self) -> bool {
        self.slow_motion_ticks > 0
    }

    /// Throw the object at `index` again with fresh kinematics
    pub(crate) fn respawn(&mut self, index: usize) {
        let size = spawner::bounding_size(self.mode);
        if let Some(entry) = self.catalogue.get(index) {
            self.objects[index] = spawner::spawn(entry, size, &mut self.rng);
        }
    }

    fn rebuild_catalogue(&mut self) {
        let size = spawner::bounding_size(self.mode);
        self.catalogue = spawner::active_identifiers(self.mode, &mut self.rng);
        self.objects = self
            .catalogue
            .iter()
            .map(|entry| spawner::spawn(entry, size, &mut self.rng))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::KEYBOARD_SYMBOLS;

    #[test]
    fn test_new_round_defaults() {
        let state = RoundState::new(1, GameMode::Pointer, "  ");
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 1);
        assert_eq!(state.player_name, DEFAULT_PLAYER_NAME);
        assert_eq!(state.objects.len(), 6);
        assert!(state.objects.iter().all(|o| o.airborne && !o.resolved));
    }

    #[test]
    fn test_mode_switch_replaces_catalogue_and_keeps_score() {
        let mut state = RoundState::new(3, GameMode::Pointer, "Ana");
        state.score = 12;
        state.lives = 2;
        state.combo = 5;
        state.slow_motion_ticks = 20;

        state.set_mode(GameMode::Keyboard);
        assert!(state.mode_changed);
        assert_eq!(state.objects.len(), KEYBOARD_SYMBOLS.len() + 2);
        assert!(state.objects.iter().all(|o| o.symbol.is_some()));
        let ids: Vec<&str> = state.identifiers().collect();
        let object_ids: Vec<&str> = state.objects.iter().map(|o| o.identifier.as_str()).collect();
        assert_eq!(ids, object_ids);
        assert_eq!((state.score, state.lives), (12, 2));
        assert_eq!((state.combo, state.slow_motion_ticks), (1, 0));
        assert_eq!(state.player_name, "Ana");

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ModeChanged {
            from: GameMode::Pointer,
            to: GameMode::Keyboard
        }));
        assert!(!state.mode_changed);
    }

    #[test]
    fn test_same_mode_is_noop() {
        let mut state = RoundState::new(3, GameMode::Pointer, "Ana");
        let before: Vec<_> = state.objects.iter().map(|o| o.position).collect();
        state.set_mode(GameMode::Pointer);
        state.set_mode_label("not-a-mode");
        let after: Vec<_> = state.objects.iter().map(|o| o.position).collect();
        assert_eq!(before, after);
        assert!(!state.mode_changed);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(GameMode::from_label("jeu2"), Some(GameMode::Keyboard));
        assert_eq!(GameMode::from_label(" Pointer "), Some(GameMode::Pointer));
        assert_eq!(GameMode::from_label("3"), None);
        assert_eq!(GameMode::Pointer.next(), GameMode::Keyboard);
    }

    #[test]
    fn test_end_round_fires_once() {
        let mut state = RoundState::new(1, GameMode::Pointer, "Bo");
        state.score = 7;
        state.lives = 1;
        assert!(state.end_round());
        assert!(!state.end_round());
        let results: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::RoundEnded(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].outcome, Outcome::Win);
        assert_eq!(results[0].attempts, 2);
        assert_eq!(results[0].final_score, 7);
    }

    #[test]
    fn test_zero_score_with_lives_left_is_a_win() {
        let mut state = RoundState::new(1, GameMode::Pointer, "Bo");
        state.end_round();
        let ended = state.drain_events().into_iter().find_map(|e| match e {
            GameEvent::RoundEnded(r) => Some(r),
            _ => None,
        });
        let result = ended.unwrap();
        assert_eq!(result.final_score, 0);
        assert_eq!(result.outcome, Outcome::Win);
    }

    #[test]
    fn test_start_round_resets_everything() {
        let mut state = RoundState::new(2, GameMode::Keyboard, "Bo");
        state.score = 40;
        state.lives = 0;
        state.end_round();
        state.start_round();
        assert!(!state.terminated);
        assert_eq!((state.lives, state.score, state.combo), (3, 0, 1));
        assert_eq!(state.mode, GameMode::Keyboard);
        assert!(state.drain_events().is_empty());
    }
}
