//! Static evaluation of non-terminal Connect383 positions

use crate::board::{streaks, Cell, GameState};

/// The flat bonus for a streak of exactly two tiles
const PAIR_BONUS: i64 = 2;

/// Estimates the utility of a position from its streaks, without any
/// look-ahead
///
/// Every row, column and diagonal is partitioned into maximal runs.
/// A run of three or more same-player tiles contributes the square of
/// its length, matching the terminal scoring rule, and a run of exactly
/// two contributes a flat bonus. Player -1 runs count symmetrically
/// against the total, so the estimate is positive when player +1 is
/// ahead. The scan cost depends only on the board dimensions, never on
/// the number of empty cells.
pub fn evaluation(state: &GameState) -> f64 {
    let mut one_points = 0i64;
    let mut two_points = 0i64;

    let lines = state
        .get_all_rows()
        .into_iter()
        .chain(state.get_all_cols())
        .chain(state.get_all_diags());
    for line in lines {
        for (cell, length) in streaks(&line) {
            let points = match length {
                0..=1 => continue,
                2 => PAIR_BONUS,
                _ => (length * length) as i64,
            };
            match cell {
                Cell::PlayerOne => one_points += points,
                Cell::PlayerTwo => two_points += points,
                Cell::Empty => {}
            }
        }
    }

    (one_points - two_points) as f64
}
