//! Static evaluation of nonterminal positions.

use crate::game::{Board, Cell, Outcome, Player, CORNERS, LINES};

/// Scoring strategy for positions below the search horizon.
/// All values are from the AI player's perspective, higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Heuristic {
    /// Scores every nonterminal position as zero.
    #[default]
    None,
    /// Rewards holding the center cell.
    Center,
    /// Rewards holding corner cells.
    Corner,
    /// Weighted corners plus a penalty for every cell that would complete a
    /// line for the opponent.
    CornerThreats,
    /// Rewards lines holding two own marks and one empty cell.
    Lines,
}

/// Scores the position for `ai`. The board is unchanged afterwards.
pub fn score(board: &mut Board, heuristic: Heuristic, ai: Player) -> i32 {
    match heuristic {
        Heuristic::None => 0,
        Heuristic::Center => occupant_value(board[(1, 1)], ai),
        Heuristic::Corner => CORNERS
            .into_iter()
            .map(|p| occupant_value(board[p], ai))
            .sum(),
        Heuristic::CornerThreats => corner_threats(board, ai),
        Heuristic::Lines => line_potential(board, ai),
    }
}

fn occupant_value(cell: Cell, ai: Player) -> i32 {
    match cell.player() {
        Some(owner) if owner == ai => 1,
        Some(_) => -1,
        None => 0,
    }
}

/// Corners count double and every cell handing the opponent a completed line
/// costs 5. The hypothetical placements are undone before returning.
fn corner_threats(board: &mut Board, ai: Player) -> i32 {
    let mut value = 0;
    for corner in CORNERS {
        value += match board[corner].player() {
            Some(owner) if owner == ai => 2,
            Some(_) => -1,
            None => 0,
        };
    }

    let opponent = ai.opponent();
    for row in 0..3 {
        for col in 0..3 {
            if board[(row, col)] != Cell::Empty {
                continue;
            }
            board.put(row, col, opponent);
            if board.outcome() == Outcome::Winner(opponent) {
                value -= 5;
            }
            board.clear(row, col);
        }
    }
    value
}

fn line_potential(board: &Board, ai: Player) -> i32 {
    let mut value = 0;
    for line in LINES {
        let mut own = 0;
        let mut other = 0;
        let mut empty = 0;
        for p in line {
            match board[p].player() {
                Some(owner) if owner == ai => own += 1,
                Some(_) => other += 1,
                None => empty += 1,
            }
        }
        if own == 2 && empty == 1 {
            value += 5;
        } else if other == 2 && empty == 1 {
            value -= 5;
        }
    }
    value
}
