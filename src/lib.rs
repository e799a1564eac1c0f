//! Agents for playing the board game 'Connect383', a generalized
//! Connect 4 played until the board is full.
//!
//! The agents select moves with a game tree search: exact minimax,
//! depth-limited minimax with a static evaluation at the cutoff, or
//! depth-limited minimax with alpha-beta pruning.
//!
//! # Basic Usage
//!
//! ```
//! use connect383::{board::GameState, search::SearchAgent};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let state = GameState::new(3, 2)?;
//! let mut agent = SearchAgent::exact();
//! let (column, _next_state) = agent.get_move(&state)?;
//!
//! assert!(column < 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod eval;

pub mod search;

pub mod agent;

mod test;

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

// a zero-dimension default board would make every state terminal
const_assert!(DEFAULT_WIDTH > 0);
const_assert!(DEFAULT_HEIGHT > 0);
