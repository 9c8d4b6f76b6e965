use std::time::Instant;

use clap::Parser;
use owo_colors::OwoColorize;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use tactix::agents::{Agent, Variant};
use tactix::game::{Board, Outcome, Player};
use tactix::logging;

#[derive(Parser)]
#[command(
    name = "tactix simulate",
    about = "Play two agents against each other."
)]
struct Opts {
    #[arg(short, long, default_value_t = 1)]
    game_count: usize,
    #[arg(short, long)]
    verbose: bool,

    /// Agents for X and O: a preset name or `random`.
    #[arg(default_values_t = [
        Agent::Search(Variant::MinimaxAlphaBeta),
        Agent::Random,
    ])]
    agents: Vec<Agent>,
}

fn main() {
    logging();

    let Opts {
        game_count,
        verbose,
        agents,
    } = Opts::parse();

    assert!(agents.len() == 2, "Exactly two agents are required");

    let start = Instant::now();
    let mut rng = SmallRng::from_entropy();

    let mut tally = [0; 3];
    for i in 0..game_count {
        let outcome = play_game(&agents, verbose, &mut rng);
        match outcome {
            Outcome::Winner(Player::X) => tally[0] += 1,
            Outcome::Winner(Player::O) => tally[1] += 1,
            _ => tally[2] += 1,
        }
        println!(
            "{}: {} {:?} {}ms",
            "Finish Game".bright_green(),
            i,
            outcome,
            start.elapsed().as_millis()
        );
    }

    println!(
        "Result: {}/{}/{} (X wins/O wins/draws)",
        tally[0], tally[1], tally[2]
    );
}

fn play_game(agents: &[Agent], verbose: bool, rng: &mut SmallRng) -> Outcome {
    let mut board = Board::new();
    let mut current = Player::X;

    if verbose {
        println!("init: {:?}", board);
    }

    for turn in 0..9 {
        let agent = match current {
            Player::X => agents[0],
            Player::O => agents[1],
        };
        let (row, col) = agent.act(&mut board, current, rng).unwrap();
        board.place(row, col, current).unwrap();

        if verbose {
            println!("{:?} -> ({}, {})", current, row, col);
            println!("{}: {:?}", turn, board);
        }

        match board.outcome() {
            Outcome::Ongoing => current = current.opponent(),
            outcome => return outcome,
        }
    }
    unreachable!("a game ends after at most 9 moves")
}
