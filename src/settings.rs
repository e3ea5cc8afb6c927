//! Game settings and preferences
//!
//! Persisted as JSON next to the score ledger. A missing or unreadable
//! file falls back to defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::ROUND_SECONDS;
use crate::sim::DEFAULT_PLAYER_NAME;

/// Background music selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MusicTrack {
    Zelda,
    #[default]
    FinalFantasy,
    Primal,
    NierAutomata,
    NoMusic,
}

impl MusicTrack {
    pub const ALL: [MusicTrack; 5] = [
        MusicTrack::Zelda,
        MusicTrack::FinalFantasy,
        MusicTrack::Primal,
        MusicTrack::NierAutomata,
        MusicTrack::NoMusic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicTrack::Zelda => "Zelda",
            MusicTrack::FinalFantasy => "Final Fantasy",
            MusicTrack::Primal => "Primal",
            MusicTrack::NierAutomata => "NieR:Automata",
            MusicTrack::NoMusic => "No Music",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "zelda" => Some(MusicTrack::Zelda),
            "final fantasy" | "ff" => Some(MusicTrack::FinalFantasy),
            "primal" => Some(MusicTrack::Primal),
            "nier" | "nier:automata" => Some(MusicTrack::NierAutomata),
            "none" | "no music" => Some(MusicTrack::NoMusic),
            _ => None,
        }
    }

    /// Audio file for the track, `None` for silence
    pub fn file(&self) -> Option<&'static str> {
        match self {
            MusicTrack::Zelda => Some("musique/Zelda_Main_Theme_Song.mp3"),
            MusicTrack::FinalFantasy => Some("musique/Liberi_Fatali.mp3"),
            MusicTrack::Primal => Some("musique/Primal_Judgment.mp3"),
            MusicTrack::NierAutomata => Some("musique/Birth_of_a_Wish.mp3"),
            MusicTrack::NoMusic => None,
        }
    }

    /// Next track in the menu list (wraps)
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings i/o failed: {e}"),
            Self::Encode(e) => write!(f, "settings could not be encoded: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub screen_width: u32,
    pub screen_height: u32,
    pub fullscreen: bool,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
    pub music_track: MusicTrack,
    pub muted: bool,

    // === Gameplay ===
    /// Last name entered on the menu
    pub player_name: String,
    /// Length of a timed round
    pub round_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            fullscreen: false,

            music_volume: 0.5,
            sound_volume: 0.7,
            music_track: MusicTrack::default(),
            muted: false,

            player_name: DEFAULT_PLAYER_NAME.to_string(),
            round_seconds: ROUND_SECONDS,
        }
    }
}

impl Settings {
    /// Default file name
    pub const DEFAULT_FILE: &'static str = "settings.json";

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_sound_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sound_volume }
    }

    /// Pull out-of-range values read from disk back into range
    fn sanitize(mut self) -> Self {
        self.set_music_volume(self.music_volume);
        self.set_sound_volume(self.sound_volume);
        if self.round_seconds == 0 {
            self.round_seconds = ROUND_SECONDS;
        }
        if self.player_name.trim().is_empty() {
            self.player_name = DEFAULT_PLAYER_NAME.to_string();
        }
        self
    }

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", path.display(), e);
                }
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitize()
            }
            Err(e) => {
                log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
