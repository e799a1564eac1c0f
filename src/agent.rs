//! A uniform capability contract for move-selecting agents

use anyhow::{anyhow, Result};
use rand::seq::SliceRandom;

use std::io::{stdin, stdout, Write};

use crate::board::GameState;
use crate::search::SearchAgent;

/// Anything that can pick one legal move for the player to move
///
/// The match runner treats all agents uniformly through this trait.
pub trait Agent {
    /// Returns a `(column, resulting state)` pair drawn from
    /// `state.successors()`, or fails if no move exists
    fn get_move(&mut self, state: &GameState) -> Result<(usize, GameState)>;
}

impl Agent for SearchAgent {
    fn get_move(&mut self, state: &GameState) -> Result<(usize, GameState)> {
        SearchAgent::get_move(self, state)
    }
}

/// Baseline agent that picks a uniformly random legal move
#[derive(Default)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RandomAgent {
    fn get_move(&mut self, state: &GameState) -> Result<(usize, GameState)> {
        state
            .successors()
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| anyhow!("no legal moves, the board is full"))
    }
}

/// Agent that prompts a person at the terminal for a valid move
#[derive(Default)]
pub struct HumanAgent;

impl HumanAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for HumanAgent {
    fn get_move(&mut self, state: &GameState) -> Result<(usize, GameState)> {
        let successors = state.successors();
        if successors.is_empty() {
            return Err(anyhow!("no legal moves, the board is full"));
        }
        let legal: Vec<usize> = successors.iter().map(|(column, _)| column + 1).collect();

        let stdin = stdin();
        loop {
            print!("Kindly enter your move {:?}: ", legal);
            stdout().flush()?;

            let mut buffer = String::new();
            stdin.read_line(&mut buffer)?;
            let chosen = match buffer.trim().parse::<usize>() {
                Ok(column) => column,
                Err(_) => continue,
            };
            if let Some(pair) = successors.iter().find(|(column, _)| column + 1 == chosen) {
                return Ok(pair.clone());
            }
        }
    }
}
