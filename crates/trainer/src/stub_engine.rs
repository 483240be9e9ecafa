//! Scripted rules and search for orchestration tests. The board is an index
//! into a list of scripted positions; applying any move advances it.

use std::collections::HashSet;

use thiserror::Error;

use selfplay_core::{GameRules, SearchEngine, SearchOutcome};

pub struct StubPosition {
    pub fen: String,
    pub legal: Vec<String>,
    pub in_check: bool,
}

impl StubPosition {
    /// Ongoing position with moves available.
    pub fn open(fen: &str) -> Self {
        StubPosition {
            fen: fen.to_string(),
            legal: vec!["any".to_string(), "other".to_string()],
            in_check: false,
        }
    }

    /// No legal moves, side to move in check.
    pub fn mate(fen: &str) -> Self {
        StubPosition {
            fen: fen.to_string(),
            legal: Vec::new(),
            in_check: true,
        }
    }

    /// No legal moves, side to move not in check.
    pub fn stalemate(fen: &str) -> Self {
        StubPosition {
            fen: fen.to_string(),
            legal: Vec::new(),
            in_check: false,
        }
    }
}

pub struct ScriptedRules {
    positions: Vec<StubPosition>,
    /// Cycle back to the first position after the last.
    wrap: bool,
    /// Moves that count as pawn moves or captures.
    pub clock_resets: HashSet<String>,
}

impl ScriptedRules {
    pub fn new(positions: Vec<StubPosition>) -> Self {
        ScriptedRules {
            positions,
            wrap: false,
            clock_resets: HashSet::new(),
        }
    }

    pub fn cycling(positions: Vec<StubPosition>) -> Self {
        ScriptedRules {
            positions,
            wrap: true,
            clock_resets: HashSet::new(),
        }
    }

    fn at(&self, board: usize) -> &StubPosition {
        &self.positions[board]
    }
}

impl GameRules for ScriptedRules {
    type Board = usize;
    type Move = String;

    fn new_board(&self) -> usize {
        0
    }

    fn legal_moves(&self, board: &usize) -> Vec<String> {
        self.at(*board).legal.clone()
    }

    fn in_check(&self, board: &usize) -> bool {
        self.at(*board).in_check
    }

    fn apply(&self, board: &mut usize, _mv: &String) {
        let next = *board + 1;
        *board = if self.wrap {
            next % self.positions.len()
        } else {
            next.min(self.positions.len() - 1)
        };
    }

    fn serialize(&self, board: &usize) -> String {
        self.at(*board).fen.clone()
    }

    fn repetition_count(&self, _board: &usize) -> u32 {
        0
    }

    fn is_pawn_move_or_capture(&self, _board: &usize, mv: &String) -> bool {
        self.clock_resets.contains(mv)
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct StubSearchError(pub String);

/// Search stub replaying scripted move lists, one list per game. A `None`
/// entry reproduces an engine that returns without a best move.
pub struct ScriptedSearch {
    games: Vec<Vec<Option<String>>>,
    game: usize,
    started: bool,
    /// Fail with an error at (0-based game, 1-based ply).
    pub fail_at: Option<(usize, u32)>,
    pub contempt_calls: Vec<i32>,
    pub asymmetric_calls: Vec<(i32, i32)>,
    pub training_mode: Option<bool>,
    pub depths_seen: Vec<u8>,
    pub workers_seen: Vec<usize>,
}

impl ScriptedSearch {
    pub fn single(moves: &[&str]) -> Self {
        Self::multi(vec![Self::script(moves)])
    }

    pub fn multi(games: Vec<Vec<Option<String>>>) -> Self {
        ScriptedSearch {
            games,
            game: 0,
            started: false,
            fail_at: None,
            contempt_calls: Vec::new(),
            asymmetric_calls: Vec::new(),
            training_mode: None,
            depths_seen: Vec::new(),
            workers_seen: Vec::new(),
        }
    }

    pub fn script(moves: &[&str]) -> Vec<Option<String>> {
        moves.iter().map(|m| Some((*m).to_string())).collect()
    }
}

impl SearchEngine<ScriptedRules> for ScriptedSearch {
    type Error = StubSearchError;

    fn search(
        &mut self,
        _board: &usize,
        ply: u32,
        depth: u8,
        workers: usize,
    ) -> Result<SearchOutcome<String>, StubSearchError> {
        // Ply 1 marks the start of the next scripted game.
        if ply == 1 {
            if self.started {
                self.game += 1;
            }
            self.started = true;
        }
        if self.fail_at == Some((self.game, ply)) {
            return Err(StubSearchError(format!("scripted failure at ply {ply}")));
        }
        self.depths_seen.push(depth);
        self.workers_seen.push(workers);
        let best_move = self
            .games
            .get(self.game)
            .and_then(|script| script.get(ply as usize - 1))
            .cloned()
            .flatten();
        Ok(SearchOutcome {
            best_move,
            score: 12,
            depth,
        })
    }

    fn set_contempt(&mut self, centipawns: i32) {
        self.contempt_calls.push(centipawns);
    }

    fn set_asymmetric_contempt(&mut self, white: i32, black: i32) {
        self.asymmetric_calls.push((white, black));
    }

    fn set_training_mode(&mut self, enabled: bool) {
        self.training_mode = Some(enabled);
    }
}
