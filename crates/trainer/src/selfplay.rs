use std::num::NonZeroUsize;
use std::time::Instant;

use log::{debug, warn};

use opening_book::OpeningBook;
use selfplay_core::{contempt_centipawns, Color, GameRules, PositionKey, SearchEngine, Termination};

use crate::error::{Result, TrainerError};
use crate::game::GameState;
use crate::termination::TerminationCheck;

/// Per-game knobs for a training session. Depth and draw value are per color
/// so the two sides can be trained against each other asymmetrically.
///
/// The draw value is the engine's valuation of a draw in [0, 1]: below 0.5
/// the engine avoids draws, above 0.5 it steers into them.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub depth_white: u8,
    pub depth_black: u8,
    pub draw_value_white: f64,
    pub draw_value_black: f64,
    /// Worker-thread hint passed through to the engine's search.
    pub workers: usize,
    /// Hard ply cap; games still running here are scored as draws.
    pub max_plies: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        TrainingConfig {
            depth_white: 6,
            depth_black: 6,
            draw_value_white: 0.5,
            draw_value_black: 0.5,
            workers,
            max_plies: 200,
        }
    }
}

impl TrainingConfig {
    pub fn depth_for(&self, color: Color) -> u8 {
        match color {
            Color::White => self.depth_white,
            Color::Black => self.depth_black,
        }
    }

    pub fn draw_value_for(&self, color: Color) -> f64 {
        match color {
            Color::White => self.draw_value_white,
            Color::Black => self.draw_value_black,
        }
    }
}

/// How one self-play game ended.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEnd {
    /// The game reached a rules-level conclusion and was learned from.
    Finished { termination: Termination, plies: u32 },
    /// The engine reported no best move even though legal moves existed. The
    /// game is discarded without learning and the session moves on.
    Abandoned { ply: u32 },
}

/// Plays one game at a time: search, apply, snapshot, until a termination
/// rule fires, then feeds the finished game to the book.
pub struct SelfPlayRunner<'a, R: GameRules, E: SearchEngine<R>> {
    rules: &'a R,
    engine: &'a mut E,
    config: &'a TrainingConfig,
}

impl<'a, R: GameRules, E: SearchEngine<R>> SelfPlayRunner<'a, R, E> {
    pub fn new(rules: &'a R, engine: &'a mut E, config: &'a TrainingConfig) -> Self {
        SelfPlayRunner {
            rules,
            engine,
            config,
        }
    }

    /// Translate the configured draw values to centipawn biases and push
    /// them into the engine, once per session. Symmetric values use the
    /// simpler engine call.
    pub fn apply_contempt(&mut self) {
        self.engine.set_training_mode(true);
        let white = self.config.draw_value_for(Color::White);
        let black = self.config.draw_value_for(Color::Black);
        if white == black {
            self.engine.set_contempt(contempt_centipawns(white));
        } else {
            self.engine
                .set_asymmetric_contempt(contempt_centipawns(white), contempt_centipawns(black));
        }
    }

    /// Play one game to its end. Finished games are folded into `book`;
    /// abandoned games are not. `game_index` is 1-based and only used for
    /// logs and error context.
    pub fn play_game(&mut self, game_index: u32, book: &mut OpeningBook) -> Result<GameEnd> {
        let mut board = self.rules.new_board();
        let mut state = GameState::new();

        let (termination, plies) = loop {
            let key = PositionKey::from_position(&self.rules.serialize(&board));
            let repetition_count = state.visit(key.clone());
            let legal = self.rules.legal_moves(&board);
            let side_to_move = Color::mover_at(state.plies() as usize);

            let verdict = TerminationCheck {
                key: &key,
                repetition_count,
                halfmove_clock: state.halfmove_clock(),
                plies_played: state.plies(),
                legal_moves: legal.len(),
                in_check: self.rules.in_check(&board),
                side_to_move,
                max_plies: self.config.max_plies,
            }
            .evaluate();
            if let Some(termination) = verdict {
                break (termination, state.plies());
            }

            // 1-based ply about to be played.
            let ply = state.plies() + 1;
            let started = Instant::now();
            let outcome = self
                .engine
                .search(&board, ply, self.config.depth_for(side_to_move), self.config.workers)
                .map_err(|err| TrainerError::Search {
                    game: game_index,
                    ply,
                    source: Box::new(err),
                })?;

            let Some(mv) = outcome.best_move else {
                warn!(
                    "game {game_index}: engine returned no move at ply {ply} with {} legal moves, abandoning game",
                    legal.len()
                );
                return Ok(GameEnd::Abandoned { ply });
            };

            let resets_clock = self.rules.is_pawn_move_or_capture(&board, &mv);
            let move_text = mv.to_string();
            self.rules.apply(&mut board, &mv);
            debug!(
                "game {game_index} move {ply}: {move_text} (score {:+.2}, rep {}, depth {}, {}ms)",
                f64::from(outcome.score) / 100.0,
                self.rules.repetition_count(&board),
                outcome.depth,
                started.elapsed().as_millis()
            );
            state.record_move(move_text, resets_clock);
        };

        book.learn_from_game(state.moves(), state.keys(), termination.outcome());
        Ok(GameEnd::Finished { termination, plies })
    }
}

#[cfg(test)]
#[path = "selfplay_tests.rs"]
mod selfplay_tests;
