//! Score ledger
//!
//! Append-only history of finished rounds. Stored as one JSON record per
//! line so a damaged line only loses that record. Listed by score
//! (highest first), newest first among equal scores.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "WIN")]
    Win,
    #[serde(rename = "LOSE")]
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Lose => "LOSE",
        }
    }
}

/// What a round reports when it ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub player_name: String,
    pub mode_label: String,
    pub outcome: Outcome,
    /// Lives lost
    pub attempts: u32,
    pub max_attempts: u32,
    pub final_score: u64,
}

/// A stored ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub mode: String,
    pub outcome: Outcome,
    pub score: u64,
    pub attempts: u32,
    pub max_attempts: u32,
    /// Unix timestamp (ms) when recorded
    pub timestamp: f64,
}

impl ScoreRecord {
    pub fn from_result(result: RoundResult, timestamp: f64) -> Self {
        Self {
            player: result.player_name,
            mode: result.mode_label,
            outcome: result.outcome,
            score: result.final_score,
            attempts: result.attempts,
            max_attempts: result.max_attempts,
            timestamp,
        }
    }
}

#[derive(Debug)]
pub enum LedgerError {
    Io(io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "score ledger i/o failed: {e}"),
            Self::Encode(e) => write!(f, "score record could not be encoded: {e}"),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
        }
    }
}

impl From<io::Error> for LedgerError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Persistent store for finished rounds
pub trait ScoreLedger {
    /// Stamp and store a result
    fn append(&mut self, result: RoundResult) -> Result<ScoreRecord, LedgerError>;
    /// All records, best first
    fn load(&self) -> Result<Vec<ScoreRecord>, LedgerError>;
    /// Remove every record
    fn clear(&mut self) -> Result<(), LedgerError>;
}

/// Current time as a Unix timestamp in ms
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Display order: score descending, then newest first
pub fn sort_records(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.timestamp.total_cmp(&a.timestamp))
    });
}

/// In-memory ledger (tests, sessions without a save file)
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    records: Vec<ScoreRecord>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ScoreLedger for MemoryLedger {
    fn append(&mut self, result: RoundResult) -> Result<ScoreRecord, LedgerError> {
        let record = ScoreRecord::from_result(result, now_ms());
        self.records.push(record.clone());
        Ok(record)
    }

    fn load(&self) -> Result<Vec<ScoreRecord>, LedgerError> {
        let mut records = self.records.clone();
        sort_records(&mut records);
        Ok(records)
    }

    fn clear(&mut self) -> Result<(), LedgerError> {
        self.records.clear();
        Ok(())
    }
}

/// Flat-file ledger, one JSON record per line
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    /// Default file name next to the working directory
    pub const DEFAULT_FILE: &'static str = "scores.jsonl";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreLedger for FileLedger {
    fn append(&mut self, result: RoundResult) -> Result<ScoreRecord, LedgerError> {
        let record = ScoreRecord::from_result(result, now_ms());
        let line = serde_json::to_string(&record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        log::info!(
            "Score saved: {} - {} - {} - {} points",
            record.player,
            record.mode,
            record.outcome.as_str(),
            record.score
        );
        Ok(record)
    }

    fn load(&self) -> Result<Vec<ScoreRecord>, LedgerError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<ScoreRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!(
                    "Skipping malformed score row {} in {}: {}",
                    line_no + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        sort_records(&mut records);
        Ok(records)
    }

    fn clear(&mut self) -> Result<(), LedgerError> {
        fs::write(&self.path, "")?;
        log::info!("Scores cleared");
        Ok(())
    }
}

/// UTC calendar date (year, month, day) of a Unix-ms timestamp
fn civil_date(timestamp: f64) -> (i64, u32, u32) {
    let days = (timestamp / 86_400_000.0).floor() as i64 + 719_468;
    let era = days.div_euclid(146_097);
    let doe = days.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Format a timestamp relative to `now` (both Unix ms).
/// Rows a week old or more show the date as dd/mm/yyyy.
pub fn format_date(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 1000.0 / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            let (year, month, day) = civil_date(timestamp);
            format!("{:02}/{:02}/{}", day, month, year)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, score: u64, outcome: Outcome) -> RoundResult {
        RoundResult {
            player_name: name.to_string(),
            mode_label: "Mode 1".to_string(),
            outcome,
            attempts: 1,
            max_attempts: 3,
            final_score: score,
        }
    }

    fn record(score: u64, timestamp: f64) -> ScoreRecord {
        ScoreRecord::from_result(result("p", score, Outcome::Win), timestamp)
    }

    #[test]
    fn test_sort_by_score_then_newest() {
        let mut records = vec![record(5, 1.0), record(9, 2.0), record(5, 3.0), record(0, 4.0)];
        sort_records(&mut records);
        let order: Vec<(u64, f64)> = records.iter().map(|r| (r.score, r.timestamp)).collect();
        assert_eq!(order, vec![(9, 2.0), (5, 3.0), (5, 1.0), (0, 4.0)]);
    }

    #[test]
    fn test_memory_ledger_roundtrip() {
        let mut ledger = MemoryLedger::new();
        ledger.append(result("ana", 3, Outcome::Win)).unwrap();
        ledger.append(result("bo", 8, Outcome::Lose)).unwrap();
        let records = ledger.load().unwrap();
        assert_eq!(records[0].player, "bo");
        assert_eq!(records[0].outcome, Outcome::Lose);
        ledger.clear().unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_file_ledger_append_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = FileLedger::new(dir.path().join("scores.jsonl"));
        assert!(ledger.load().unwrap().is_empty());

        let stored = ledger.append(result("ana", 4, Outcome::Win)).unwrap();
        assert!(stored.timestamp > 0.0);
        ledger.append(result("bo", 12, Outcome::Lose)).unwrap();

        let records = ledger.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].player, "bo");
        assert_eq!(records[1].score, 4);

        ledger.clear().unwrap();
        assert!(ledger.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_ledger_skips_malformed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.jsonl");
        let good = serde_json::to_string(&record(7, 10.0)).unwrap();
        fs::write(&path, format!("{good}\nnot json\n{{\"player\":\"x\"}}\n\n{good}\n")).unwrap();

        let records = FileLedger::new(&path).load().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.score == 7));
    }

    #[test]
    fn test_outcome_serializes_as_label() {
        let json = serde_json::to_string(&Outcome::Lose).unwrap();
        assert_eq!(json, "\"LOSE\"");
    }

    #[test]
    fn test_format_date() {
        let now = 10.0 * 24.0 * 3600.0 * 1000.0;
        assert_eq!(format_date(now - 5_000.0, now), "Just now");
        assert_eq!(format_date(now - 90_000.0, now), "1 min ago");
        assert_eq!(format_date(now - 3.0 * 3600_000.0, now), "3 hours ago");
        assert_eq!(format_date(now - 30.0 * 3600_000.0, now), "Yesterday");
        assert_eq!(format_date(now - 4.0 * 86_400_000.0, now), "4 days ago");
    }

    #[test]
    fn test_format_date_old_rows_show_calendar_date() {
        let now = 1_800_000_000_000.0;
        assert_eq!(format_date(1_700_000_000_000.0, now), "14/11/2023");
        assert_eq!(format_date(951_782_400_000.0, now), "29/02/2000");
        assert_eq!(format_date(0.0, now), "01/01/1970");
        // Six days is still relative
        assert_eq!(format_date(now - 6.5 * 86_400_000.0, now), "6 days ago");
    }
}
