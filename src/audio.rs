//! Sound triggers
//!
//! The simulation only asks for "play the impact sound". `AudioManager`
//! turns that into a queued play request for whatever backend drains it;
//! a missing clip means the trigger is dropped silently.

use std::path::Path;

use crate::assets::{Asset, Placeholder, load_or_placeholder};
use crate::settings::{MusicTrack, Settings};

/// Receiver of fire-and-forget sound triggers
pub trait AudioSink {
    fn play_impact_sound(&mut self);
}

/// Sink that ignores every trigger
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_impact_sound(&mut self) {}
}

/// A queued playback request
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub clip: String,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    impact: Asset,
    music: Asset,
    track: MusicTrack,
    sound_volume: f32,
    music_volume: f32,
    muted: bool,
    queue: Vec<PlayRequest>,
}

impl AudioManager {
    /// Impact clip path relative to the asset root
    const IMPACT_FILE: &'static str = "musique/impact.mp3";

    pub fn new(root: &Path, settings: &Settings) -> Self {
        let impact = load_or_placeholder(&root.join(Self::IMPACT_FILE), Placeholder::Silence);
        if impact.is_placeholder() {
            log::warn!("Impact sound unavailable - slicing will be silent");
        }
        let music = Self::load_track(root, settings.music_track);
        Self {
            impact,
            music,
            track: settings.music_track,
            sound_volume: settings.sound_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            queue: Vec::new(),
        }
    }

    fn load_track(root: &Path, track: MusicTrack) -> Asset {
        match track.file() {
            Some(file) => load_or_placeholder(&root.join(file), Placeholder::Silence),
            None => Asset::Placeholder(Placeholder::Silence),
        }
    }

    /// Switch background music
    pub fn set_track(&mut self, root: &Path, track: MusicTrack) {
        self.track = track;
        self.music = Self::load_track(root, track);
        log::info!("Music: {}", track.as_str());
    }

    pub fn track(&self) -> MusicTrack {
        self.track
    }

    /// Whether the selected track has anything to play
    pub fn has_music(&self) -> bool {
        !self.music.is_placeholder()
    }

    pub fn set_sound_volume(&mut self, vol: f32) {
        self.sound_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sound_volume }
    }

    /// Take the pending play requests (backend side)
    pub fn drain(&mut self) -> Vec<PlayRequest> {
        std::mem::take(&mut self.queue)
    }
}

impl AudioSink for AudioManager {
    fn play_impact_sound(&mut self) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Asset::File { path, .. } = &self.impact else {
            return;
        };
        self.queue.push(PlayRequest {
            clip: path.display().to_string(),
            volume: vol,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_clip_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let mut audio = AudioManager::new(dir.path(), &Settings::default());
        audio.play_impact_sound();
        assert!(audio.drain().is_empty());
        assert!(!audio.has_music());
    }

    #[test]
    fn test_impact_queued_at_sound_volume() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("musique")).unwrap();
        fs::write(dir.path().join("musique/impact.mp3"), b"mp3").unwrap();

        let mut audio = AudioManager::new(dir.path(), &Settings::default());
        audio.play_impact_sound();
        let queued = audio.drain();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].volume, 0.7);

        audio.set_muted(true);
        audio.play_impact_sound();
        assert!(audio.drain().is_empty());
    }

    #[test]
    fn test_no_music_track() {
        let dir = tempfile::tempdir().unwrap();
        let mut audio = AudioManager::new(dir.path(), &Settings::default());
        audio.set_track(dir.path(), MusicTrack::NoMusic);
        assert_eq!(audio.track(), MusicTrack::NoMusic);
        assert!(!audio.has_music());
    }
}
