use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: u8 = 8;

/// One of the two players. White starts and moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Wire code used by the wasm API: 1 = white, 2 = black.
    pub fn code(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 2,
        }
    }

    /// The opponent's back rank, where this side's men are crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => BOARD_WIDTH - 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("White"),
            Side::Black => f.write_str("Black"),
        }
    }
}

/// A board coordinate. Row 0 is black's home edge, row 7 is white's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns `None` when the coordinate falls outside the 8x8 grid.
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        let width = BOARD_WIDTH as i32;
        if (0..width).contains(&row) && (0..width).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        let width = BOARD_WIDTH as usize;
        if idx < width * width {
            Some(Self::new((idx / width) as u8, (idx % width) as u8))
        } else {
            None
        }
    }

    pub fn is_on_board(self) -> bool {
        self.row < BOARD_WIDTH && self.col < BOARD_WIDTH
    }

    /// Flat `row * 8 + col` index. Only meaningful for on-board positions.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_WIDTH as usize + self.col as usize
    }

    pub fn is_dark(self) -> bool {
        (self.row ^ self.col) & 1 == 1
    }

    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        Self::checked(self.row as i32 + dr, self.col as i32 + dc)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = b'a'.wrapping_add(self.col) as char;
        write!(f, "{}{}", file, BOARD_WIDTH.saturating_sub(self.row))
    }
}

/// A single diagonal step, either a quiet slide or one jump of a capture.
///
/// Two moves are the same move exactly when all fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub is_capture: bool,
}

impl Move {
    pub const fn new(from: Position, to: Position, is_capture: bool) -> Self {
        Self {
            from,
            to,
            is_capture,
        }
    }

    pub const fn quiet(from: Position, to: Position) -> Self {
        Self::new(from, to, false)
    }

    pub const fn capture(from: Position, to: Position) -> Self {
        Self::new(from, to, true)
    }

    /// Unit step `(dr, dc)` from origin toward destination.
    pub fn direction(&self) -> (i32, i32) {
        (
            (self.to.row as i32 - self.from.row as i32).signum(),
            (self.to.col as i32 - self.from.col as i32).signum(),
        )
    }

    /// Number of diagonal steps between origin and destination.
    pub fn distance(&self) -> u8 {
        self.from.row.abs_diff(self.to.row)
    }

    /// Cells strictly between origin and destination, nearest first.
    pub fn passed_squares(&self) -> Vec<Position> {
        let (dr, dc) = self.direction();
        (1..self.distance() as i32)
            .filter_map(|step| self.from.offset(dr * step, dc * step))
            .collect()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture { ':' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// Move as handed to a presentation layer, with the path to highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveView {
    pub from: Position,
    pub to: Position,
    pub is_capture: bool,
    pub path: Vec<Position>,
}

impl From<&Move> for MoveView {
    fn from(mv: &Move) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            is_capture: mv.is_capture,
            path: mv.passed_squares(),
        }
    }
}

/// What happened to the turn after a step was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The same piece must keep capturing from `at`; the turn does not pass.
    ChainContinues { at: Position },
    TurnPassed { next: Side },
    GameOver { winner: Side },
}

/// Result of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub mv: Move,
    pub captured: Option<Position>,
    pub promoted: bool,
    pub outcome: MoveOutcome,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Cell codes, `row * 8 + col`: 0=empty, 1=white man, 2=black man,
    /// 3=white king, 4=black king.
    pub board: Vec<u8>,
    pub side_to_move: Side,
    pub selected: Option<Position>,
    /// Moves of the selected piece; empty when nothing is selected.
    pub legal_moves: Vec<MoveView>,
    /// Origins of every legal move this turn.
    pub movable: Vec<Position>,
    pub white_count: u8,
    pub black_count: u8,
    pub white_kings: u8,
    pub black_kings: u8,
    pub in_capture_chain: bool,
    pub winner: Option<Side>,
    pub is_game_over: bool,
}
