use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }
}

/// An immutable snapshot of a Connect383 board and the player to move next
///
/// Applying a move never mutates a state; each legal move produces a fresh
/// child state, so parents stay valid while sibling branches are explored.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    width: usize,
    height: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    next: i32,
}

impl GameState {
    /// Creates an empty board with player +1 to move
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(anyhow!(
                "invalid board dimensions {}x{}, both must be non-zero",
                width,
                height
            ));
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            heights: vec![0; width],
            next: 1,
        })
    }

    /// Creates a board by replaying a string of 1-indexed column digits
    pub fn from_moves<S: AsRef<str>>(width: usize, height: usize, moves: S) -> Result<Self> {
        let mut board = Self::new(width, height)?;

        for column_char in moves.as_ref().chars() {
            // only play available moves
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if (1..=width).contains(&column) => {
                    let column = column - 1;
                    if !board.playable(column) {
                        return Err(anyhow!("Invalid move, column {} full", column + 1));
                    }
                    board.play(column);
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Creates a board from text rows given top to bottom
    ///
    /// `X` is a player +1 tile, `O` a player -1 tile and `.` an empty cell.
    /// The position must be reachable under gravity: no tile may sit above
    /// an empty cell. The player to move is derived from the tile counts.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut board = Self::new(width, height)?;

        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(anyhow!("row '{}' does not match board width {}", row, width));
            }
            let row_index = height - 1 - i;
            for (column, tile) in row.chars().enumerate() {
                let cell = match tile {
                    'X' => Cell::PlayerOne,
                    'O' => Cell::PlayerTwo,
                    '.' => Cell::Empty,
                    _ => return Err(anyhow!("could not parse '{}' as a board cell", tile)),
                };
                board.cells[column + width * row_index] = cell;
            }
        }

        let mut ones = 0;
        let mut twos = 0;
        for column in 0..width {
            let mut filled = 0;
            for row in 0..height {
                let cell = board.cell(column, row);
                if cell.is_empty() {
                    continue;
                }
                if row != filled {
                    return Err(anyhow!(
                        "tile floating above an empty cell in column {}",
                        column + 1
                    ));
                }
                match cell {
                    Cell::PlayerOne => ones += 1,
                    Cell::PlayerTwo => twos += 1,
                    Cell::Empty => {}
                }
                filled += 1;
            }
            board.heights[column] = filled;
        }
        board.next = if ones <= twos { 1 } else { -1 };

        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[column + self.width * row]
    }

    /// The player to move next, `+1` or `-1`
    pub fn next_player(&self) -> i32 {
        self.next
    }

    pub fn playable(&self, column: usize) -> bool {
        self.heights[column] < self.height
    }

    fn play(&mut self, column: usize) {
        let player = if self.next == 1 {
            Cell::PlayerOne
        } else {
            Cell::PlayerTwo
        };
        self.cells[column + self.width * self.heights[column]] = player;
        self.heights[column] += 1;
        self.next = -self.next;
    }

    /// All `(column, child state)` pairs reachable in one move, in
    /// ascending column order
    ///
    /// The order is fixed and load-bearing: alpha-beta pruning explores
    /// children in exactly this order.
    pub fn successors(&self) -> Vec<(usize, GameState)> {
        let mut successors = Vec::with_capacity(self.width);
        for column in 0..self.width {
            if self.playable(column) {
                let mut child = self.clone();
                child.play(column);
                successors.push((column, child));
            }
        }
        successors
    }

    /// Whether the game is over, i.e. no empty cells remain
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h >= self.height)
    }

    /// The exact final score of a full board, positive favouring player +1
    ///
    /// Every maximal streak of three or more tiles in a row, column or
    /// diagonal earns its owner the square of its length. Fails if the
    /// board still has empty cells, as the game is not over yet.
    pub fn score(&self) -> Result<f64> {
        if !self.is_full() {
            return Err(anyhow!("score is only defined for a full board"));
        }

        let mut one_points = 0i64;
        let mut two_points = 0i64;
        let lines = self
            .get_all_rows()
            .into_iter()
            .chain(self.get_all_cols())
            .chain(self.get_all_diags());
        for line in lines {
            for (cell, length) in streaks(&line) {
                if length >= 3 {
                    match cell {
                        Cell::PlayerOne => one_points += (length * length) as i64,
                        Cell::PlayerTwo => two_points += (length * length) as i64,
                        Cell::Empty => {}
                    }
                }
            }
        }
        Ok((one_points - two_points) as f64)
    }

    /// Every row of the board, bottom to top
    pub fn get_all_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.height)
            .map(|row| (0..self.width).map(|column| self.cell(column, row)).collect())
            .collect()
    }

    /// Every column of the board, left to right
    pub fn get_all_cols(&self) -> Vec<Vec<Cell>> {
        (0..self.width)
            .map(|column| (0..self.height).map(|row| self.cell(column, row)).collect())
            .collect()
    }

    /// Every maximal diagonal of the board, in both directions
    pub fn get_all_diags(&self) -> Vec<Vec<Cell>> {
        let mut diags = Vec::with_capacity(2 * (self.width + self.height - 1));

        // rising diagonals: column - row is constant
        for offset in 0..(self.width + self.height - 1) {
            let mut line = Vec::new();
            for column in 0..self.width {
                let row = column as isize + self.height as isize - 1 - offset as isize;
                if row >= 0 && (row as usize) < self.height {
                    line.push(self.cell(column, row as usize));
                }
            }
            diags.push(line);
        }

        // falling diagonals: column + row is constant
        for offset in 0..(self.width + self.height - 1) {
            let mut line = Vec::new();
            for column in 0..self.width {
                let row = offset as isize - column as isize;
                if row >= 0 && (row as usize) < self.height {
                    line.push(self.cell(column, row as usize));
                }
            }
            diags.push(line);
        }

        diags
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        for row in (0..self.height).rev() {
            for column in 0..self.width {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match self.cell(column, row) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        let labels: String = (1..=self.width).map(|c| (c % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(labels + "\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

/// Partitions a line into its maximal runs of identical cells with a
/// single left-to-right scan
pub fn streaks(line: &[Cell]) -> Vec<(Cell, usize)> {
    let mut runs = Vec::new();
    let mut current = match line.first() {
        Some(&cell) => cell,
        None => return runs,
    };
    let mut length = 1;
    for &cell in &line[1..] {
        if cell == current {
            length += 1;
        } else {
            runs.push((current, length));
            current = cell;
            length = 1;
        }
    }
    runs.push((current, length));
    runs
}
