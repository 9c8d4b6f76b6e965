use clap::Parser;
use log::info;

use tactix::agents::{self, Variant};
use tactix::game::Board;
use tactix::logging;
use tactix::search::SearchConfig;

#[derive(Parser)]
#[command(name = "tactix move", about = "Choose a move for a given position.")]
struct Opts {
    /// Engine preset.
    #[arg(long, default_value_t = Variant::MinimaxAlphaBeta)]
    variant: Variant,
    /// Raw JSON engine configuration, overriding the preset.
    #[arg(long)]
    config: Option<SearchConfig>,
    /// Nine cells in row order: `X`, `O` or `-`.
    #[arg(value_parser = parse_board)]
    board: Board,
}

fn parse_board(txt: &str) -> Result<Board, String> {
    Board::parse(txt).ok_or_else(|| format!("malformed board '{txt}'"))
}

fn main() {
    logging();

    let Opts {
        variant,
        config,
        mut board,
    } = Opts::parse();
    let config = config.unwrap_or_else(|| variant.config());

    info!("{:?}", board);

    match agents::decide(&mut board, &config) {
        Ok(decision) => {
            info!("Decision: {:?}", decision);
            println!("{} {}", decision.cell.0, decision.cell.1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
