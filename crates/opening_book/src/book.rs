use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use selfplay_core::{Color, GameOutcome, PositionKey};

use crate::error::BookError;
use crate::record::GameRecord;
use crate::stats::BookStats;

/// Only the opening phase feeds move statistics: the first 30 plies of each
/// game.
pub const LEARN_WINDOW_PLIES: usize = 30;

/// A move's first games are always recorded.
pub const LEARN_MIN_SAMPLES: u32 = 5;
/// From this many games on, recording stops once the win rate has settled
/// outside the uncertain band.
pub const LEARN_STABLE_SAMPLES: u32 = 10;
/// No move accumulates more games than this.
pub const LEARN_HARD_CAP: u32 = 20;

/// Outcome statistics for one move played from one position, from the
/// perspective of the side that played it.
///
/// `our_games == our_wins + our_losses + our_draws` after every update; a
/// loaded book that violates this is rejected as corrupt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveStats {
    pub our_games: u32,
    pub our_wins: u32,
    pub our_losses: u32,
    pub our_draws: u32,
}

impl MoveStats {
    pub fn is_consistent(&self) -> bool {
        self.our_games == self.our_wins + self.our_losses + self.our_draws
    }

    /// Wins over games. Callers guard `our_games > 0`.
    fn win_rate(&self) -> f64 {
        f64::from(self.our_wins) / f64::from(self.our_games)
    }
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Everything the book knows about one position: candidate moves with their
/// statistics, plus how games that reached this position ended by absolute
/// color. The aggregates land on the position a move led to, so they answer
/// "how did games go after arriving here".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionEntry {
    /// Candidate move text as produced by the engine, sorted for stable
    /// serialization.
    pub moves: BTreeMap<String, MoveStats>,
    #[serde(skip_serializing_if = "is_zero")]
    pub white_wins: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub black_wins: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub draws: u32,
}

impl PositionEntry {
    fn has_learning(&self) -> bool {
        self.moves.values().any(|stats| stats.our_games > 0)
    }
}

/// Per-session tallies of how many per-move updates were applied versus
/// skipped as redundant. Reset on load; not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearningCounters {
    pub recorded: u64,
    pub skipped: u64,
}

impl LearningCounters {
    /// Share of attempted updates that were skipped, as a percentage.
    pub fn redundancy_pct(&self) -> f64 {
        let total = self.recorded + self.skipped;
        if total == 0 {
            return 0.0;
        }
        self.skipped as f64 * 100.0 / total as f64
    }
}

/// Persistent store mapping canonical position keys to per-move outcome
/// statistics, plus a log of completed games.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpeningBook {
    /// RFC 3339 stamp of the last save.
    #[serde(default)]
    generated: String,
    #[serde(default)]
    positions: HashMap<PositionKey, PositionEntry>,
    #[serde(default)]
    games: Vec<GameRecord>,

    #[serde(skip)]
    path: PathBuf,
    #[serde(skip)]
    counters: LearningCounters,
}

impl OpeningBook {
    /// Empty book that will persist to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        OpeningBook {
            generated: String::new(),
            positions: HashMap::new(),
            games: Vec::new(),
            path: path.into(),
            counters: LearningCounters::default(),
        }
    }

    /// Load the book from `path`. A missing file is a fresh start and yields
    /// an empty book; an unreadable or inconsistent file is an error, so a
    /// damaged book is never silently overwritten.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, BookError> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no opening book at {}, starting empty", path.display());
                return Ok(Self::empty(path));
            }
            Err(err) => return Err(BookError::Io { path, source: err }),
        };
        let mut book: OpeningBook =
            serde_json::from_str(&data).map_err(|err| BookError::Corrupt {
                path: path.clone(),
                detail: err.to_string(),
            })?;
        book.validate().map_err(|detail| BookError::Corrupt {
            path: path.clone(),
            detail,
        })?;
        book.path = path;
        Ok(book)
    }

    fn validate(&self) -> Result<(), String> {
        for (key, entry) in &self.positions {
            for (mv, stats) in &entry.moves {
                if !stats.is_consistent() {
                    return Err(format!(
                        "move {mv} from {key} has {} games but {}+{}+{} outcomes",
                        stats.our_games, stats.our_wins, stats.our_losses, stats.our_draws
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn entry(&self, key: &PositionKey) -> Option<&PositionEntry> {
        self.positions.get(key)
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// The last `n` completed games, oldest first.
    pub fn recent_games(&self, n: usize) -> &[GameRecord] {
        let start = self.games.len().saturating_sub(n);
        &self.games[start..]
    }

    pub fn learning_counters(&self) -> LearningCounters {
        self.counters
    }

    pub fn reset_learning_counters(&mut self) {
        self.counters = LearningCounters::default();
    }

    /// Fold one finished game into the book.
    ///
    /// `moves` is the full game in play order; `positions[i]` is the key of
    /// the position `moves[i]` was played from, with `positions` one longer
    /// than `moves` when the terminal position was snapshotted too. Both
    /// sides learn in this single pass: the mover of ply `i` is derived from
    /// parity, and the outcome is credited from that mover's perspective.
    ///
    /// Whether an individual move update is applied is adaptive: young moves
    /// are always recorded, settled ones are skipped, and nothing exceeds the
    /// hard cap. Skips only suppress that move's statistics; the position
    /// aggregates and the game log always advance.
    pub fn learn_from_game(
        &mut self,
        moves: &[String],
        positions: &[PositionKey],
        outcome: GameOutcome,
    ) {
        if moves.is_empty() {
            return;
        }

        let plies = moves.len().min(positions.len()).min(LEARN_WINDOW_PLIES);
        for i in 0..plies {
            let entry = self.positions.entry(positions[i].clone()).or_default();
            let stats = entry.moves.entry(moves[i].clone()).or_default();
            if should_record(stats) {
                apply_outcome(stats, Color::mover_at(i), outcome);
                self.counters.recorded += 1;
            } else {
                self.counters.skipped += 1;
            }

            // Aggregate the result onto the position the move led to.
            if i + 1 < positions.len() {
                let reached = self.positions.entry(positions[i + 1].clone()).or_default();
                match outcome {
                    GameOutcome::WhiteWins => reached.white_wins += 1,
                    GameOutcome::BlackWins => reached.black_wins += 1,
                    GameOutcome::Draw => reached.draws += 1,
                }
            }
        }

        self.games.push(GameRecord::new(moves.to_vec(), outcome));
    }

    /// Scan the book into an aggregate snapshot.
    pub fn stats(&self) -> BookStats {
        let mut stats = BookStats {
            total_positions: self.positions.len(),
            ..BookStats::default()
        };
        for entry in self.positions.values() {
            if entry.has_learning() {
                stats.positions_with_learning += 1;
            }
            for move_stats in entry.moves.values() {
                stats.our_games += u64::from(move_stats.our_games);
                stats.our_wins += u64::from(move_stats.our_wins);
                stats.our_losses += u64::from(move_stats.our_losses);
                stats.our_draws += u64::from(move_stats.our_draws);
            }
        }
        stats
    }

    /// Write the book to its configured path. The JSON lands in a `.tmp`
    /// sibling first and is renamed over the target, so a crash mid-write
    /// leaves the previous book intact.
    pub fn save(&mut self) -> Result<(), BookError> {
        self.generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let path = self.path.clone();
        self.write_to(&path)
    }

    /// Save to the configured path, falling back to the system temp directory
    /// when the primary location cannot be written. Returns the path actually
    /// written so the caller can tell the operator where the learning went.
    pub fn save_anywhere(&mut self) -> Result<PathBuf, BookError> {
        match self.save() {
            Ok(()) => Ok(self.path.clone()),
            Err(err) => {
                let name = self
                    .path
                    .file_name()
                    .map(OsStr::to_os_string)
                    .unwrap_or_else(|| OsString::from("opening_book.json"));
                let fallback = std::env::temp_dir().join(name);
                error!(
                    "failed to save opening book to {}: {err}; retrying at {}",
                    self.path.display(),
                    fallback.display()
                );
                self.write_to(&fallback)?;
                Ok(fallback)
            }
        }
    }

    fn write_to(&self, path: &Path) -> Result<(), BookError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|err| BookError::Io {
                    path: dir.to_path_buf(),
                    source: err,
                })?;
            }
        }
        let tmp = tmp_path(path);
        fs::write(&tmp, json).map_err(|err| BookError::Io {
            path: tmp.clone(),
            source: err,
        })?;
        fs::rename(&tmp, path).map_err(|err| BookError::Io {
            path: path.to_path_buf(),
            source: err,
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn should_record(stats: &MoveStats) -> bool {
    if stats.our_games < LEARN_MIN_SAMPLES {
        return true;
    }
    if stats.our_games >= LEARN_HARD_CAP {
        return false;
    }
    if stats.our_games >= LEARN_STABLE_SAMPLES {
        let rate = stats.win_rate();
        if rate > 0.60 || rate < 0.40 {
            return false;
        }
    }
    true
}

fn apply_outcome(stats: &mut MoveStats, mover: Color, outcome: GameOutcome) {
    stats.our_games += 1;
    match outcome.winner() {
        Some(winner) if winner == mover => stats.our_wins += 1,
        Some(_) => stats.our_losses += 1,
        None => stats.our_draws += 1,
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
