use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::eval::Heuristic;
use crate::game::{Board, Cell, Outcome, Player, CORNERS};
use crate::search::{self, SearchConfig, SearchStats};

/// The named engine presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Center,
    CenterMinimax,
    CenterAlphaBeta,
    Corner,
    CornerMinimax,
    CornerAlphaBeta,
    Minimax,
    MinimaxAlphaBeta,
    Symmetry,
    Heuristic,
}

impl Variant {
    pub const ALL: [Variant; 10] = [
        Variant::Center,
        Variant::CenterMinimax,
        Variant::CenterAlphaBeta,
        Variant::Corner,
        Variant::CornerMinimax,
        Variant::CornerAlphaBeta,
        Variant::Minimax,
        Variant::MinimaxAlphaBeta,
        Variant::Symmetry,
        Variant::Heuristic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Center => "center",
            Variant::CenterMinimax => "center-minimax",
            Variant::CenterAlphaBeta => "center-alpha-beta",
            Variant::Corner => "corner",
            Variant::CornerMinimax => "corner-minimax",
            Variant::CornerAlphaBeta => "corner-alpha-beta",
            Variant::Minimax => "minimax",
            Variant::MinimaxAlphaBeta => "minimax-alpha-beta",
            Variant::Symmetry => "symmetry",
            Variant::Heuristic => "heuristic",
        }
    }

    /// The engine configuration behind this preset.
    pub fn config(self) -> SearchConfig {
        match self {
            Variant::Center => SearchConfig {
                heuristic: Heuristic::Center,
                depth_limit: Some(0),
                immediate_heuristic_move: true,
                ..SearchConfig::default()
            },
            Variant::CenterMinimax => SearchConfig {
                heuristic: Heuristic::Center,
                immediate_heuristic_move: true,
                ..SearchConfig::default()
            },
            Variant::CenterAlphaBeta => SearchConfig {
                heuristic: Heuristic::Center,
                pruning: true,
                immediate_heuristic_move: true,
                ..SearchConfig::default()
            },
            Variant::Corner => SearchConfig {
                heuristic: Heuristic::CornerThreats,
                immediate_heuristic_move: true,
                win_block_prepass: true,
                ..SearchConfig::default()
            },
            Variant::CornerMinimax => SearchConfig {
                heuristic: Heuristic::Corner,
                immediate_heuristic_move: true,
                ..SearchConfig::default()
            },
            Variant::CornerAlphaBeta => SearchConfig {
                heuristic: Heuristic::Corner,
                pruning: true,
                immediate_heuristic_move: true,
                ..SearchConfig::default()
            },
            Variant::Minimax => SearchConfig::default(),
            Variant::MinimaxAlphaBeta => SearchConfig {
                pruning: true,
                ..SearchConfig::default()
            },
            Variant::Symmetry => SearchConfig {
                symmetry_skip: true,
                ..SearchConfig::default()
            },
            Variant::Heuristic => SearchConfig {
                heuristic: Heuristic::Lines,
                depth_limit: Some(3),
                ..SearchConfig::default()
            },
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| Error::UnknownVariant { name: s.into() })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A move provider: an engine preset or a uniformly random player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    Search(Variant),
    Random,
}

impl Agent {
    /// Chooses a move for `seat` on the given board.
    pub fn act(
        self,
        board: &mut Board,
        seat: Player,
        rng: &mut impl Rng,
    ) -> Result<(usize, usize)> {
        match self {
            Agent::Search(variant) => {
                let config = SearchConfig {
                    ai: seat,
                    ..variant.config()
                };
                choose_move(board, &config)
            }
            Agent::Random => (0..3)
                .flat_map(|row| (0..3).map(move |col| (row, col)))
                .filter(|&p| board[p] == Cell::Empty)
                .choose(rng)
                .ok_or(Error::NoMoveAvailable),
        }
    }
}

impl FromStr for Agent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "random" {
            Ok(Agent::Random)
        } else {
            s.parse().map(Agent::Search)
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agent::Search(variant) => fmt::Display::fmt(variant, f),
            Agent::Random => f.write_str("random"),
        }
    }
}

/// The chosen move together with search diagnostics.
#[derive(Debug, Clone)]
pub struct Decision {
    pub cell: (usize, usize),
    /// Backed up value of the chosen move.
    /// `None` when a fast path answered without searching.
    pub score: Option<i32>,
    pub stats: SearchStats,
    pub time: Duration,
}

/// Chooses the engine's move. See [`decide`] for diagnostics.
pub fn choose_move(board: &mut Board, config: &SearchConfig) -> Result<(usize, usize)> {
    decide(board, config).map(|decision| decision.cell)
}

/// Chooses the engine's move for the configured player.
/// The board is left unchanged, applying the move is up to the caller.
pub fn decide(board: &mut Board, config: &SearchConfig) -> Result<Decision> {
    let start = Instant::now();
    let mut stats = SearchStats::default();

    if board.is_full() {
        return Err(Error::NoMoveAvailable);
    }

    if config.immediate_heuristic_move {
        if let Some(cell) = priority_cell(board, config.heuristic) {
            debug!("fast path {:?}", cell);
            return Ok(Decision {
                cell,
                score: None,
                stats,
                time: start.elapsed(),
            });
        }
    }

    if config.win_block_prepass {
        for player in [config.ai, config.ai.opponent()] {
            if let Some(cell) = winning_cell(board, player) {
                debug!("prepass {:?} for {:?}", cell, player);
                return Ok(Decision {
                    cell,
                    score: None,
                    stats,
                    time: start.elapsed(),
                });
            }
        }
    }

    let mut best: Option<((usize, usize), i32)> = None;
    let mut diagonal_tried = false;
    for row in 0..3 {
        for col in 0..3 {
            if board[(row, col)] != Cell::Empty {
                continue;
            }
            if config.symmetry_skip && row == col {
                if diagonal_tried {
                    stats.skipped += 1;
                    continue;
                }
                diagonal_tried = true;
            }

            board.put(row, col, config.ai);
            let value = search::search(board, config, 0, false, &mut stats);
            board.clear(row, col);

            // ties keep the earliest cell in row major order
            match best {
                Some((_, v)) if value <= v => {}
                _ => best = Some(((row, col), value)),
            }
        }
    }

    let (cell, score) = best.ok_or(Error::NoMoveAvailable)?;
    let time = start.elapsed();
    debug!(
        "{:?} score {} after {} nodes, {} cutoffs, {} skipped in {:?}",
        cell, score, stats.nodes, stats.cutoffs, stats.skipped, time
    );
    Ok(Decision {
        cell,
        score: Some(score),
        stats,
        time,
    })
}

/// The cell a heuristic takes outright when free.
fn priority_cell(board: &Board, heuristic: Heuristic) -> Option<(usize, usize)> {
    match heuristic {
        Heuristic::Center if board[(1, 1)] == Cell::Empty => Some((1, 1)),
        Heuristic::Corner | Heuristic::CornerThreats => {
            CORNERS.into_iter().find(|&p| board[p] == Cell::Empty)
        }
        _ => None,
    }
}

/// The first empty cell completing a line for `player`.
fn winning_cell(board: &mut Board, player: Player) -> Option<(usize, usize)> {
    for row in 0..3 {
        for col in 0..3 {
            if board[(row, col)] != Cell::Empty {
                continue;
            }
            board.put(row, col, player);
            let wins = board.outcome() == Outcome::Winner(player);
            board.clear(row, col);
            if wins {
                return Some((row, col));
            }
        }
    }
    None
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    fn play(x: Agent, o: Agent, rng: &mut SmallRng) -> Outcome {
        let mut board = Board::new();
        let mut current = Player::X;
        loop {
            let agent = match current {
                Player::X => x,
                Player::O => o,
            };
            let (row, col) = agent.act(&mut board, current, rng).unwrap();
            board.place(row, col, current).unwrap();
            match board.outcome() {
                Outcome::Ongoing => current = current.opponent(),
                outcome => return outcome,
            }
        }
    }

    #[test]
    fn takes_winning_row() {
        let board = Board::parse(
            r#"
            X X -
            O O -
            - - -"#,
        )
        .unwrap();

        for heuristic in [
            Heuristic::None,
            Heuristic::Center,
            Heuristic::Corner,
            Heuristic::CornerThreats,
            Heuristic::Lines,
        ] {
            for pruning in [false, true] {
                let config = SearchConfig {
                    heuristic,
                    pruning,
                    ..SearchConfig::default()
                };
                let mut board = board.clone();
                assert_eq!(choose_move(&mut board, &config).unwrap(), (0, 2));
            }
        }
    }

    #[test]
    fn blocks_opponent_win() {
        let mut board = Board::parse(
            r#"
            O O -
            - X -
            - - -"#,
        )
        .unwrap();
        let config = SearchConfig::default();
        assert_eq!(choose_move(&mut board, &config).unwrap(), (0, 2));

        let config = SearchConfig {
            pruning: true,
            ..SearchConfig::default()
        };
        assert_eq!(choose_move(&mut board, &config).unwrap(), (0, 2));
    }

    #[test]
    fn center_fast_path() {
        let mut board = Board::new();
        let decision = decide(&mut board, &Variant::Center.config()).unwrap();
        assert_eq!(decision.cell, (1, 1));
        assert_eq!(decision.score, None);
        assert_eq!(decision.stats.nodes, 0);
    }

    #[test]
    fn center_greedy_takes_win() {
        // the center is taken, so the one ply search runs
        let mut board = Board::parse(
            r#"
            X X -
            O O -
            - - -"#,
        )
        .unwrap();
        let decision = decide(&mut board, &Variant::Center.config()).unwrap();
        assert_eq!(decision.cell, (0, 2));
        assert_eq!(decision.score, Some(10));
    }

    #[test]
    fn corner_fast_path() {
        let config = Variant::Corner.config();

        let mut board = Board::new();
        let decision = decide(&mut board, &config).unwrap();
        assert_eq!(decision.cell, (0, 0));
        assert_eq!(decision.stats.nodes, 0);

        let mut board = Board::parse("X - - - O - - - -").unwrap();
        assert_eq!(choose_move(&mut board, &config).unwrap(), (0, 2));
    }

    #[test]
    fn prepass_takes_win() {
        // all corners are taken, the win at (1, 1) is found by the prepass
        let mut board = Board::parse(
            r#"
            X - O
            - - -
            O - X"#,
        )
        .unwrap();
        let decision = decide(&mut board, &Variant::Corner.config()).unwrap();
        assert_eq!(decision.cell, (1, 1));
        assert_eq!(decision.score, None);
        assert_eq!(decision.stats.nodes, 0);
    }

    #[test]
    fn prepass_blocks_loss() {
        // no own win exists, so the opposing row is blocked at (2, 1)
        let mut board = Board::parse(
            r#"
            X O X
            - X -
            O - O"#,
        )
        .unwrap();
        let decision = decide(&mut board, &Variant::Corner.config()).unwrap();
        assert_eq!(decision.cell, (2, 1));
        assert_eq!(decision.score, None);
    }

    #[test]
    fn board_restored() {
        let board = Board::parse(
            r#"
            X - O
            - X -
            - - O"#,
        )
        .unwrap();

        for variant in Variant::ALL {
            let mut probe = board.clone();
            let (row, col) = choose_move(&mut probe, &variant.config()).unwrap();
            assert_eq!(probe, board);
            assert_eq!(board[(row, col)], Cell::Empty);
        }
    }

    #[test]
    fn full_board_errors() {
        let mut board = Board::parse(
            r#"
            O O X
            X X O
            O X X"#,
        )
        .unwrap();
        for variant in Variant::ALL {
            assert!(matches!(
                decide(&mut board, &variant.config()),
                Err(Error::NoMoveAvailable)
            ));
        }
    }

    #[test]
    fn pruning_preserves_decisions() {
        let boards = [
            Board::new(),
            Board::parse("X - - - O - - - -").unwrap(),
            Board::parse("X O X - O - - - -").unwrap(),
            Board::parse("O - X X O - - - -").unwrap(),
        ];
        for board in boards {
            let mut plain = board.clone();
            let mut pruned = board.clone();
            let a = decide(&mut plain, &Variant::Minimax.config()).unwrap();
            let b = decide(&mut pruned, &Variant::MinimaxAlphaBeta.config()).unwrap();
            assert_eq!(a.cell, b.cell);
            assert_eq!(a.score, b.score);
            assert!(b.stats.nodes <= a.stats.nodes);
        }
    }

    #[test]
    fn optimal_self_play_draws() {
        let mut rng = SmallRng::seed_from_u64(42);
        let outcome = play(
            Agent::Search(Variant::Minimax),
            Agent::Search(Variant::MinimaxAlphaBeta),
            &mut rng,
        );
        assert_eq!(outcome, Outcome::Draw);
    }

    #[test]
    fn never_loses_vs_random() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = play(
                Agent::Search(Variant::MinimaxAlphaBeta),
                Agent::Random,
                &mut rng,
            );
            assert_ne!(outcome, Outcome::Winner(Player::O), "seed {}", seed);

            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = play(
                Agent::Random,
                Agent::Search(Variant::MinimaxAlphaBeta),
                &mut rng,
            );
            assert_ne!(outcome, Outcome::Winner(Player::X), "seed {}", seed);
        }
    }

    #[test]
    fn symmetry_skips_are_never_chosen() {
        let config = Variant::Symmetry.config();

        let mut board = Board::new();
        let decision = decide(&mut board, &config).unwrap();
        assert!(decision.stats.skipped > 0);
        // (1, 1) and (2, 2) were skipped at the top level
        assert_ne!(decision.cell, (1, 1));
        assert_ne!(decision.cell, (2, 2));

        let mut board = Board::parse("X O - - - - - - -").unwrap();
        let decision = decide(&mut board, &config).unwrap();
        // (0, 0) is taken, so (1, 1) is the first diagonal candidate
        assert_ne!(decision.cell, (2, 2));
    }

    #[test]
    fn variant_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(variant.name().parse::<Variant>().unwrap(), variant);
            assert_eq!(format!("{}", variant), variant.name());
        }
        assert!(matches!(
            "does-not-exist".parse::<Variant>(),
            Err(Error::UnknownVariant { .. })
        ));

        assert_eq!("random".parse::<Agent>().unwrap(), Agent::Random);
        assert_eq!(
            "corner".parse::<Agent>().unwrap(),
            Agent::Search(Variant::Corner)
        );
        assert_eq!(format!("{}", Agent::Random), "random");
    }
}
