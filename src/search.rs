//! Minimax tree search with optional alpha-beta pruning, depth limiting and
//! diagonal symmetry skipping.
//! @see https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

use std::str::FromStr;
use std::string::ToString;

use crate::eval::{self, Heuristic};
use crate::game::{Board, Cell, Outcome, Player};

/// Complete engine configuration.
/// Every agent variant is one assignment of these fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The player the engine plays for.
    pub ai: Player,
    /// Enables alpha-beta pruning.
    pub pruning: bool,
    /// Stops descending at this depth and falls back to the heuristic.
    pub depth_limit: Option<usize>,
    /// Static evaluation below the search horizon.
    pub heuristic: Heuristic,
    /// Skips all but the first untried main diagonal cell per node.
    pub symmetry_skip: bool,
    /// Takes the heuristic's priority cell without searching.
    pub immediate_heuristic_move: bool,
    /// Takes immediate wins and blocks immediate losses before searching.
    pub win_block_prepass: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ai: Player::X,
            pruning: false,
            depth_limit: None,
            heuristic: Heuristic::None,
            symmetry_skip: false,
            immediate_heuristic_move: false,
            win_block_prepass: false,
        }
    }
}

impl FromStr for SearchConfig {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl ToString for SearchConfig {
    fn to_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Counters accumulated over a single decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Visited search nodes, including terminal ones.
    pub nodes: u64,
    /// Enumerations stopped by an alpha-beta cutoff.
    pub cutoffs: u64,
    /// Candidate moves skipped by the diagonal symmetry rule.
    pub skipped: u64,
}

/// Evaluates the position reached by the previous ply.
/// `maximizing` is true when it is the engine's turn to move.
/// The value is from the engine's perspective, higher is better.
pub fn search(
    board: &mut Board,
    config: &SearchConfig,
    depth: usize,
    maximizing: bool,
    stats: &mut SearchStats,
) -> i32 {
    search_rec(board, config, depth, maximizing, i32::MIN, i32::MAX, stats)
}

fn search_rec(
    board: &mut Board,
    config: &SearchConfig,
    depth: usize,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    // Wins score higher the earlier they occur.
    match board.outcome() {
        Outcome::Winner(player) if player == config.ai => return 10 - depth as i32,
        Outcome::Winner(_) => return depth as i32 - 10,
        Outcome::Draw => return 0,
        Outcome::Ongoing => {}
    }

    if let Some(limit) = config.depth_limit {
        if depth >= limit {
            return eval::score(board, config.heuristic, config.ai);
        }
    }

    let player = if maximizing {
        config.ai
    } else {
        config.ai.opponent()
    };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    let mut diagonal_tried = false;

    for row in 0..3 {
        for col in 0..3 {
            if board[(row, col)] != Cell::Empty {
                continue;
            }
            // The first diagonal cell is always searched, so a node never
            // runs out of candidates.
            if config.symmetry_skip && row == col {
                if diagonal_tried {
                    stats.skipped += 1;
                    continue;
                }
                diagonal_tried = true;
            }

            board.put(row, col, player);
            let value = search_rec(board, config, depth + 1, !maximizing, alpha, beta, stats);
            board.clear(row, col);

            if maximizing {
                best = best.max(value);
                if config.pruning {
                    alpha = alpha.max(best);
                    if beta <= alpha {
                        stats.cutoffs += 1;
                        return best;
                    }
                }
            } else {
                best = best.min(value);
                if config.pruning {
                    beta = beta.min(best);
                    if beta <= alpha {
                        stats.cutoffs += 1;
                        return best;
                    }
                }
            }
        }
    }
    best
}
