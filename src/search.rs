//! Minimax game tree search over Connect383 positions

use anyhow::{anyhow, Result};
use rayon::prelude::*;

use crate::board::GameState;
use crate::eval::evaluation;

/// How many plies a search may descend before falling back to the
/// static evaluation
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SearchDepth {
    /// Search all the way to terminal states
    Unbounded,
    /// At most this many plies remain before the evaluation is used
    Limited(u32),
}

impl SearchDepth {
    /// The budget left after descending one ply
    ///
    /// Depth is a per-call value: it only ever decrements one ply at a
    /// time, never shared or mutated across sibling branches.
    fn next(self) -> Self {
        match self {
            SearchDepth::Unbounded => SearchDepth::Unbounded,
            SearchDepth::Limited(plies) => SearchDepth::Limited(plies.saturating_sub(1)),
        }
    }
}

/// The search variant a [`SearchAgent`] runs
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Full-depth minimax, terminal states only
    Exact,
    /// Depth-limited minimax with the static evaluation at the cutoff
    Heuristic,
    /// Depth-limited minimax with alpha-beta pruning; returns the same
    /// value as `Heuristic` while visiting fewer nodes
    AlphaBeta,
}

/// An agent that selects moves by searching the game tree
///
/// # Notes
/// All three strategies share one recursive kernel; they differ only in
/// the depth budget and in whether the alpha-beta window is allowed to
/// cut off siblings. Pruning never changes a computed value, only the
/// number of nodes visited.
///
/// # Utility
/// Values follow the zero-sum convention: positive favours player +1,
/// negative favours player -1. Terminal boards score exactly, cutoff
/// boards are estimated by [`evaluation`].
#[derive(Clone)]
pub struct SearchAgent {
    strategy: Strategy,
    depth: SearchDepth,

    /// The number of nodes searched by this agent so far (for diagnostics only)
    pub node_count: usize,
}

impl SearchAgent {
    pub fn new(strategy: Strategy, depth: SearchDepth) -> Self {
        let depth = match strategy {
            // exact search ignores any configured limit
            Strategy::Exact => SearchDepth::Unbounded,
            _ => depth,
        };
        Self {
            strategy,
            depth,
            node_count: 0,
        }
    }

    /// Creates an agent performing exact full-depth minimax
    pub fn exact() -> Self {
        Self::new(Strategy::Exact, SearchDepth::Unbounded)
    }

    /// Creates a depth-limited agent without pruning
    pub fn heuristic(depth: SearchDepth) -> Self {
        Self::new(Strategy::Heuristic, depth)
    }

    /// Creates a depth-limited agent with alpha-beta pruning
    pub fn alpha_beta(depth: SearchDepth) -> Self {
        Self::new(Strategy::AlphaBeta, depth)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn depth(&self) -> SearchDepth {
        self.depth
    }

    /// Determines the minimax utility of a state under the given depth
    /// budget
    pub fn minimax(&mut self, state: &GameState, depth: SearchDepth) -> Result<f64> {
        self.search(state, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// The shared recursive kernel
    ///
    /// A terminal board returns its exact score before anything else,
    /// even at depth 0. A depth budget of 0 on a live board returns the
    /// static evaluation without recursing. Otherwise every successor
    /// is searched in column order and folded with max for player +1,
    /// min for player -1.
    ///
    /// `alpha` is the value the maximizer can already guarantee, `beta`
    /// the minimizer's counterpart. Only the `AlphaBeta` strategy
    /// inspects or tightens the window: a child value falling outside
    /// it is returned immediately, as the ancestor guaranteeing the
    /// bound will never route play through this node at that value.
    fn search(
        &mut self,
        state: &GameState,
        depth: SearchDepth,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64> {
        self.node_count += 1;

        if state.is_full() {
            return state.score();
        }
        if depth == SearchDepth::Limited(0) {
            return Ok(evaluation(state));
        }

        let prune = self.strategy == Strategy::AlphaBeta;
        let maximizing = state.next_player() == 1;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        // children must be visited in successors() order, pruning
        // decisions depend on it
        for (_column, child) in state.successors() {
            let value = self.search(&child, depth.next(), alpha, beta)?;

            if maximizing {
                if prune && value > beta {
                    // the minimizing ancestor already has a better option
                    return Ok(value);
                }
                if prune && value > alpha {
                    alpha = value;
                }
                best = best.max(value);
            } else {
                if prune && value < alpha {
                    // the maximizing ancestor already has a better option
                    return Ok(value);
                }
                if prune && value < beta {
                    beta = value;
                }
                best = best.min(value);
            }
        }

        Ok(best)
    }

    /// Selects the best available move for the player to move
    ///
    /// Every successor is searched with the configured depth budget;
    /// ties keep the first move in `successors()` order. Fails if the
    /// board is already full.
    pub fn get_move(&mut self, state: &GameState) -> Result<(usize, GameState)> {
        let maximizing = state.next_player() == 1;
        let mut successors = state.successors().into_iter();

        let (first_column, first_child) = successors
            .next()
            .ok_or_else(|| anyhow!("no legal moves, the board is full"))?;
        let mut best_value = self.minimax(&first_child, self.depth)?;
        let mut best = (first_column, first_child);

        for (column, child) in successors {
            let value = self.minimax(&child, self.depth)?;
            if (maximizing && value > best_value) || (!maximizing && value < best_value) {
                best_value = value;
                best = (column, child);
            }
        }
        Ok(best)
    }

    /// Selects the best available move, searching the top-level
    /// branches in parallel
    ///
    /// Sibling subtrees share no mutable state, so each branch gets its
    /// own worker agent. The fold over branch values stays sequential
    /// to keep the first-move tie-break identical to [`get_move`].
    pub fn get_move_parallel(&mut self, state: &GameState) -> Result<(usize, GameState)> {
        let maximizing = state.next_player() == 1;
        let successors = state.successors();
        if successors.is_empty() {
            return Err(anyhow!("no legal moves, the board is full"));
        }

        let strategy = self.strategy;
        let depth = self.depth;
        let searched = successors
            .into_par_iter()
            .map(|(column, child)| {
                let mut worker = SearchAgent::new(strategy, depth);
                let value = worker.minimax(&child, depth)?;
                Ok((column, child, value, worker.node_count))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut branches = searched.into_iter();
        // non-empty by the check above
        let (first_column, first_child, first_value, nodes) = branches
            .next()
            .ok_or_else(|| anyhow!("no legal moves, the board is full"))?;
        self.node_count += nodes;
        let mut best_value = first_value;
        let mut best = (first_column, first_child);

        for (column, child, value, nodes) in branches {
            self.node_count += nodes;
            if (maximizing && value > best_value) || (!maximizing && value < best_value) {
                best_value = value;
                best = (column, child);
            }
        }
        Ok(best)
    }
}
