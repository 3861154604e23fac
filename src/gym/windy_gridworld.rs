use std::fmt;

use log::info;
use strum::{EnumCount, FromRepr};

use crate::{
    env::{EnvError, Environment, Step},
    error::Error,
};

/// Grid coordinates as `(column, row)`, row 0 at the top
pub type Pos = (i32, i32);

const COLS: i32 = 10;
const ROWS: i32 = 7;
const START: Pos = (0, 3);
const GOAL: Pos = (7, 3);
/// Upward push applied in each column
const WIND: [i32; COLS as usize] = [0, 0, 0, 1, 1, 1, 2, 2, 1, 0];

/// Moves available in the gridworld, indexed by action
#[derive(FromRepr, EnumCount, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
    UpLeft,
    DownLeft,
    DownRight,
    UpRight,
    Stay,
}

impl Move {
    fn delta(self) -> Pos {
        match self {
            Move::Up => (0, -1),
            Move::Left => (-1, 0),
            Move::Down => (0, 1),
            Move::Right => (1, 0),
            Move::UpLeft => (-1, -1),
            Move::DownLeft => (-1, 1),
            Move::DownRight => (1, 1),
            Move::UpRight => (1, -1),
            Move::Stay => (0, 0),
        }
    }
}

/// Windy gridworld with king's moves
///
/// A 10x7 grid where a crosswind in the middle columns pushes the agent upward. Every
/// step costs -1 and the episode ends on reaching the goal.
#[derive(Debug, Clone)]
pub struct WindyGridworld {
    pos: Pos,
}

impl Default for WindyGridworld {
    fn default() -> Self {
        Self::new()
    }
}

impl WindyGridworld {
    pub fn new() -> Self {
        Self { pos: START }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Environment for WindyGridworld {
    type State = Pos;
    type Info = ();

    fn action_space_size(&self) -> usize {
        Move::COUNT
    }

    fn reset(&mut self) -> Result<Self::State, EnvError> {
        self.pos = START;
        Ok(self.pos)
    }

    fn step(&mut self, action: usize) -> Result<Step<Self::State, Self::Info>, EnvError> {
        let Some(change) = Move::from_repr(action).map(Move::delta) else {
            return Err(Box::new(Error::InvalidAction {
                action,
                size: Move::COUNT,
            }));
        };

        let wind = WIND[self.pos.0 as usize];
        self.pos = (
            (self.pos.0 + change.0).clamp(0, COLS - 1),
            (self.pos.1 + change.1 - wind).clamp(0, ROWS - 1),
        );

        Ok(Step {
            next_state: self.pos,
            reward: -1.0,
            done: self.pos == GOAL,
            info: (),
        })
    }

    fn render(&self) {
        info!("\n{}", self);
    }
}

impl fmt::Display for WindyGridworld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                let c = match (col, row) {
                    p if p == self.pos => 'A',
                    p if p == GOAL => 'G',
                    _ => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        let wind: String = WIND.iter().map(|w| w.to_string()).collect();
        write!(f, "{wind}")
    }
}
