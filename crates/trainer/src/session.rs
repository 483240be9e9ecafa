use std::path::PathBuf;

use log::{error, info, warn};

use opening_book::{BookError, BookStats, GameRecord, LearningCounters, OpeningBook};
use selfplay_core::{contempt_centipawns, GameOutcome, GameRules, SearchEngine};

use crate::error::Result;
use crate::selfplay::{GameEnd, SelfPlayRunner, TrainingConfig};

/// Session-level configuration: how many games to play, where the book
/// lives, and the per-game knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub games: u32,
    pub book_path: PathBuf,
    /// Start from an empty book instead of aborting when the book file is
    /// corrupt. The damaged file stays on disk until the first save.
    pub start_fresh_on_corrupt: bool,
    pub training: TrainingConfig,
}

impl SessionConfig {
    pub fn new(book_path: impl Into<PathBuf>) -> Self {
        SessionConfig {
            games: 5,
            book_path: book_path.into(),
            start_fresh_on_corrupt: false,
            training: TrainingConfig::default(),
        }
    }
}

/// What a finished session accomplished.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Games that reached a rules-level conclusion.
    pub games_played: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    /// Games discarded after the engine returned no move.
    pub abandoned: u32,
    pub before: BookStats,
    pub after: BookStats,
    pub recorded: u64,
    pub skipped: u64,
    pub recent_games: Vec<GameRecord>,
    /// Where the book was saved; the temp-directory fallback when the
    /// primary path was unwritable.
    pub book_path: PathBuf,
}

/// Run a full training session: load the book, play the configured number of
/// games, save after each one, and summarize what the book gained.
///
/// A search error aborts the session but never discards learning: the book is
/// saved best-effort before the error is returned. An engine that merely
/// returns no move costs only that game.
pub fn run_session<R, E>(rules: &R, engine: &mut E, config: &SessionConfig) -> Result<SessionReport>
where
    R: GameRules,
    E: SearchEngine<R>,
{
    let mut book = match OpeningBook::load(&config.book_path) {
        Ok(book) => book,
        Err(err @ BookError::Corrupt { .. }) if config.start_fresh_on_corrupt => {
            warn!("{err}; starting with a fresh book");
            OpeningBook::empty(&config.book_path)
        }
        Err(err) => return Err(err.into()),
    };
    info!(
        "book loaded: {} positions, {} games on record",
        book.position_count(),
        book.game_count()
    );

    let before = book.stats();
    book.reset_learning_counters();

    let mut runner = SelfPlayRunner::new(rules, engine, &config.training);
    runner.apply_contempt();
    info!(
        "training: {} games, depth {}/{}, contempt {:+}cp/{:+}cp, {} workers",
        config.games,
        config.training.depth_white,
        config.training.depth_black,
        contempt_centipawns(config.training.draw_value_white),
        contempt_centipawns(config.training.draw_value_black),
        config.training.workers
    );

    let mut games_played = 0u32;
    let mut white_wins = 0u32;
    let mut black_wins = 0u32;
    let mut draws = 0u32;
    let mut abandoned = 0u32;

    let total = config.games;
    for game_index in 1..=total {
        match runner.play_game(game_index, &mut book) {
            Ok(GameEnd::Finished { termination, plies }) => {
                games_played += 1;
                let outcome = termination.outcome();
                match outcome {
                    GameOutcome::WhiteWins => white_wins += 1,
                    GameOutcome::BlackWins => black_wins += 1,
                    GameOutcome::Draw => draws += 1,
                }
                info!(
                    "game {game_index}/{total}: {} by {} after {plies} plies",
                    outcome.label(),
                    termination.label()
                );
            }
            Ok(GameEnd::Abandoned { ply }) => {
                abandoned += 1;
                info!("game {game_index}/{total}: abandoned at ply {ply}, nothing learned");
            }
            Err(err) => {
                error!("game {game_index}/{total} failed: {err}");
                // Keep what the earlier games taught before giving up.
                match book.save_anywhere() {
                    Ok(path) => info!("book preserved at {}", path.display()),
                    Err(save_err) => error!("could not preserve book: {save_err}"),
                }
                return Err(err);
            }
        }

        // A save per game keeps a later crash from costing the whole session.
        if let Err(err) = book.save() {
            warn!("mid-session save failed: {err}");
        }
    }

    let saved_to = book.save_anywhere()?;

    let counters = book.learning_counters();
    let report = SessionReport {
        games_played,
        white_wins,
        black_wins,
        draws,
        abandoned,
        before,
        after: book.stats(),
        recorded: counters.recorded,
        skipped: counters.skipped,
        recent_games: book.recent_games(3).to_vec(),
        book_path: saved_to,
    };
    log_summary(&report);
    Ok(report)
}

fn log_summary(report: &SessionReport) {
    let new_positions = report.after.total_positions as i64 - report.before.total_positions as i64;
    let new_learning =
        report.after.positions_with_learning as i64 - report.before.positions_with_learning as i64;
    let new_games = report.after.our_games as i64 - report.before.our_games as i64;
    let counters = LearningCounters {
        recorded: report.recorded,
        skipped: report.skipped,
    };

    info!("training summary");
    info!(
        "  games: {} played, {} abandoned ({} white, {} black, {} draws)",
        report.games_played, report.abandoned, report.white_wins, report.black_wins, report.draws
    );
    info!(
        "  book: {} positions ({new_positions:+}), {} with learning ({new_learning:+})",
        report.after.total_positions, report.after.positions_with_learning
    );
    info!(
        "  learned games: {} ({new_games:+}), {}-{}-{} W-L-D",
        report.after.our_games, report.after.our_wins, report.after.our_losses,
        report.after.our_draws
    );
    info!(
        "  updates: {} recorded, {} skipped ({:.1}% redundant)",
        report.recorded,
        report.skipped,
        counters.redundancy_pct()
    );
    for game in &report.recent_games {
        info!(
            "  {} {} in {} moves: {}",
            game.date,
            game.result.label(),
            game.move_count,
            game.excerpt(8)
        );
    }
    info!("book saved to {}", report.book_path.display());
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
