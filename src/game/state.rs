use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::command::{Command, Direction};
use super::program::CommandQueue;
use super::replay::ReplayCursor;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one cell in `direction`, staying inside a `width` x `height` grid
    pub fn stepped_within(&self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx).clamp(0, last_index(width)),
            y: self.y.saturating_add(dy).clamp(0, last_index(height)),
        }
    }
}

/// Highest coordinate along a side of `len` cells, never below zero
fn last_index(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX).saturating_sub(1).max(0)
}

/// The programmable robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
    pub position: Position,
    pub direction: Direction,
}

impl Robot {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Robot at the top-left corner facing right
    pub fn at_origin() -> Self {
        Self::new(Position::ORIGIN, Direction::Right)
    }

    /// Move one cell forward; walking into a wall leaves the robot in place
    pub fn advance(&mut self, grid_width: usize, grid_height: usize) {
        self.position = self
            .position
            .stepped_within(self.direction, grid_width, grid_height);
    }

    pub fn turn_right(&mut self) {
        self.direction = self.direction.clockwise();
    }

    pub fn turn_left(&mut self) {
        self.direction = self.direction.counter_clockwise();
    }

    /// Apply one program instruction
    pub fn execute(&mut self, command: Command, grid_width: usize, grid_height: usize) {
        match command {
            Command::Forward => self.advance(grid_width, grid_height),
            Command::TurnLeft => self.turn_left(),
            Command::TurnRight => self.turn_right(),
        }
    }
}

/// Cells that still hold an uncollected treasure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreasureSet {
    cells: HashSet<Position>,
}

impl TreasureSet {
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Place `count` distinct treasures on the grid, never on `avoid`.
    ///
    /// Each treasure is drawn uniformly at random and redrawn on collision.
    /// After `max_attempts` failed draws for one treasure the remaining free
    /// cells are enumerated and one is picked from them, so the call always
    /// terminates. If the grid runs out of free cells fewer than `count`
    /// treasures are placed.
    pub fn generate<R: Rng>(
        rng: &mut R,
        count: usize,
        grid_width: usize,
        grid_height: usize,
        avoid: Position,
        max_attempts: usize,
    ) -> Self {
        let mut cells = HashSet::with_capacity(count);

        'placing: for _ in 0..count {
            for _ in 0..max_attempts {
                let x = rng.gen_range(0..grid_width) as i32;
                let y = rng.gen_range(0..grid_height) as i32;
                let pos = Position::new(x, y);

                if pos != avoid && cells.insert(pos) {
                    continue 'placing;
                }
            }

            let free: Vec<Position> = (0..grid_height as i32)
                .flat_map(|y| (0..grid_width as i32).map(move |x| Position::new(x, y)))
                .filter(|pos| *pos != avoid && !cells.contains(pos))
                .collect();
            match free.choose(&mut *rng) {
                Some(pos) => {
                    cells.insert(*pos);
                }
                None => break,
            }
        }

        Self { cells }
    }

    /// Remove the treasure at `pos`, returning whether there was one
    pub fn try_collect(&mut self, pos: Position) -> bool {
        self.cells.remove(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub robot: Robot,
    pub treasures: TreasureSet,
    pub program: CommandQueue,
    pub cursor: ReplayCursor,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Treasures collected this round
    pub score: usize,
    /// Treasures placed at the start of the round
    pub treasure_total: usize,
}

impl GameState {
    /// Create a new round with the robot at the origin
    pub fn new(treasures: TreasureSet, grid_width: usize, grid_height: usize) -> Self {
        Self {
            robot: Robot::at_origin(),
            treasure_total: treasures.len(),
            treasures,
            program: CommandQueue::new(),
            cursor: ReplayCursor::default(),
            grid_width,
            grid_height,
            score: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.cursor.running
    }

    pub fn is_won(&self) -> bool {
        self.treasure_total > 0 && self.score == self.treasure_total
    }

    /// Append a command to the program; ignored while the replay runs
    pub fn push_command(&mut self, command: Command) -> bool {
        if self.is_running() {
            return false;
        }
        self.program.append(command);
        true
    }

    /// Drop the last command; ignored while the replay runs or when empty
    pub fn undo_command(&mut self) -> Option<Command> {
        if self.is_running() {
            return None;
        }
        self.program.undo()
    }

    /// Begin replaying the program from its first command.
    ///
    /// Returns false when already running, when there is nothing to run, or
    /// when the round is already won.
    pub fn start_replay(&mut self) -> bool {
        if self.is_running() || self.program.is_empty() || self.is_won() {
            return false;
        }
        self.cursor.start();
        true
    }

    /// Pick up a treasure under the robot, if any
    pub fn collect_treasure(&mut self) -> Option<Position> {
        let pos = self.robot.position;
        if self.treasures.try_collect(pos) {
            self.score += 1;
            Some(pos)
        } else {
            None
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }
}
