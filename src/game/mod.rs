mod board;
pub use board::*;
mod cell;
pub use cell::*;
