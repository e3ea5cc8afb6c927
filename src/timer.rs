//! Round countdown shown in the top bar
//!
//! Counted in whole simulation ticks, so a round lasts exactly
//! `seconds * TICK_RATE` ticks on every machine.

use crate::consts::{ROUND_SECONDS, TICK_RATE};

/// Colour band for the countdown bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    /// 30 seconds or less
    Warning,
    /// 10 seconds or less
    Critical,
}

#[derive(Debug, Clone)]
pub struct RoundTimer {
    total_ticks: u32,
    ticks_left: u32,
    running: bool,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(ROUND_SECONDS)
    }
}

impl RoundTimer {
    pub fn new(total_secs: u32) -> Self {
        let total_ticks = total_secs.max(1) * TICK_RATE;
        Self {
            total_ticks,
            ticks_left: total_ticks,
            running: false,
        }
    }

    pub fn start(&mut self) {
        if !self.is_expired() {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Full time again, stopped
    pub fn reset(&mut self) {
        self.ticks_left = self.total_ticks;
        self.running = false;
    }

    /// Count down `ticks` while running; stops at zero
    pub fn advance(&mut self, ticks: u32) {
        if !self.running {
            return;
        }
        self.ticks_left = self.ticks_left.saturating_sub(ticks);
        if self.ticks_left == 0 {
            self.running = false;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ticks_left == 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks_left(&self) -> u32 {
        self.ticks_left
    }

    /// Remaining time in seconds
    pub fn time_left(&self) -> f32 {
        self.ticks_left as f32 / TICK_RATE as f32
    }

    /// Remaining fraction, 1.0 at start
    pub fn progress(&self) -> f32 {
        self.ticks_left as f32 / self.total_ticks as f32
    }

    /// Whole seconds shown on screen (rounded up so "0:00" only appears at expiry)
    fn display_secs(&self) -> u32 {
        self.ticks_left.div_ceil(TICK_RATE)
    }

    /// "M:SS"
    pub fn format_time(&self) -> String {
        let secs = self.display_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    pub fn urgency(&self) -> Urgency {
        match self.display_secs() {
            0..=10 => Urgency::Critical,
            11..=30 => Urgency::Warning,
            _ => Urgency::Calm,
        }
    }
}
