use anyhow::{Context, Result};

use std::cmp::Ordering;
use std::io::{stdin, stdout, Write};

use connect383::agent::{Agent, HumanAgent, RandomAgent};
use connect383::board::GameState;
use connect383::search::{SearchAgent, SearchDepth};
use connect383::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let width = match args.next() {
        Some(arg) => arg.parse().context("invalid board width")?,
        None => DEFAULT_WIDTH,
    };
    let height = match args.next() {
        Some(arg) => arg.parse().context("invalid board height")?,
        None => DEFAULT_HEIGHT,
    };

    let mut state = GameState::new(width, height)?;

    println!("Welcome to Connect383 on a {}x{} board\n", width, height);

    let mut player_one_agent = choose_agent(1)?;
    let mut player_two_agent = choose_agent(2)?;

    // game loop
    loop {
        state.display().expect("Failed to draw board!");

        if state.is_full() {
            let score = state.score()?;
            match score.partial_cmp(&0.0) {
                Some(Ordering::Greater) => println!("Player 1 wins, {:+} points!", score),
                Some(Ordering::Less) => println!("Player 2 wins, {:+} points!", score),
                _ => println!("Draw!"),
            }
            break;
        }

        let (player, agent): (u32, &mut dyn Agent) = if state.next_player() == 1 {
            (1, player_one_agent.as_mut())
        } else {
            (2, player_two_agent.as_mut())
        };
        let (column, next_state) = agent.get_move(&state)?;
        println!("Player {} plays column {}", player, column + 1);
        state = next_state;
    }
    Ok(())
}

fn choose_agent(player: u32) -> Result<Box<dyn Agent>> {
    let stdin = stdin();
    loop {
        print!(
            "Select agent for player {} (minimax/heuristic/prune/random/human): ",
            player
        );
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        match buffer.trim().to_lowercase().as_str() {
            "minimax" => return Ok(Box::new(SearchAgent::exact())),
            "heuristic" => return Ok(Box::new(SearchAgent::heuristic(read_depth()?))),
            "prune" => return Ok(Box::new(SearchAgent::alpha_beta(read_depth()?))),
            "random" => return Ok(Box::new(RandomAgent::new())),
            "human" => return Ok(Box::new(HumanAgent::new())),
            _ => println!("Unknown agent type"),
        }
    }
}

fn read_depth() -> Result<SearchDepth> {
    let stdin = stdin();
    loop {
        print!("Search depth in plies (blank for unbounded): ");
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return Ok(SearchDepth::Unbounded);
        }
        match trimmed.parse::<u32>() {
            Ok(plies) => return Ok(SearchDepth::Limited(plies)),
            Err(_) => println!("Invalid depth: {}", trimmed),
        }
    }
}
