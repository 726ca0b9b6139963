use once_cell::sync::Lazy;

use crate::types::{BOARD_WIDTH, Move, Position, Side};

const BOARD_SIZE: usize = BOARD_WIDTH as usize;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const STARTING_ROWS: usize = 3;
/// Diagonals as `(dr, dc)`. The first two point toward row 0 (white's
/// forward), the last two toward row 7 (black's forward).
const DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Squares along each diagonal from every square, nearest first.
static DIAGONAL_RAYS: Lazy<Vec<[Vec<usize>; 4]>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|sq| {
            let (row, col) = sq_to_row_col(sq);
            DIRECTIONS.map(|(dr, dc)| {
                let mut ray = Vec::new();
                let (mut r, mut c) = (row + dr, col + dc);
                while in_bounds(r, c) {
                    ray.push(r as usize * BOARD_SIZE + c as usize);
                    r += dr;
                    c += dc;
                }
                ray
            })
        })
        .collect()
});

/// Contents of a single square.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty = 0,
    WhiteMan = 1,
    BlackMan = 2,
    WhiteKing = 3,
    BlackKing = 4,
}

impl Cell {
    pub fn man(side: Side) -> Self {
        match side {
            Side::White => Cell::WhiteMan,
            Side::Black => Cell::BlackMan,
        }
    }

    pub fn king(side: Side) -> Self {
        match side {
            Side::White => Cell::WhiteKing,
            Side::Black => Cell::BlackKing,
        }
    }

    pub fn is_white(self) -> bool {
        matches!(self, Cell::WhiteMan | Cell::WhiteKing)
    }

    pub fn is_black(self) -> bool {
        matches!(self, Cell::BlackMan | Cell::BlackKing)
    }

    pub fn is_king(self) -> bool {
        matches!(self, Cell::WhiteKing | Cell::BlackKing)
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Cell::WhiteMan | Cell::WhiteKing => Some(Side::White),
            Cell::BlackMan | Cell::BlackKing => Some(Side::Black),
            Cell::Empty => None,
        }
    }

    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// Kings keep their color; men are crowned.
    pub fn promoted(self) -> Self {
        self.side().map_or(self, Cell::king)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Side effects of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepEffects {
    pub captured: Option<Position>,
    pub promoted: bool,
}

/// Russian draughts board stored as a flat `row * 8 + col` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the standard starting position: three rows of men per side
    /// on the dark squares, black on rows 0-2 and white on rows 5-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for sq in 0..NUM_SQUARES {
            let (row, col) = sq_to_row_col(sq);
            if (row + col) % 2 == 0 {
                continue;
            }
            let row = row as usize;
            if row < STARTING_ROWS {
                board.cells[sq] = Cell::man(Side::Black);
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                board.cells[sq] = Cell::man(Side::White);
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    /// Builds a custom position. Off-board entries are ignored.
    pub fn from_pieces(pieces: &[(Position, Cell)]) -> Self {
        let mut board = Self::empty();
        for &(pos, cell) in pieces {
            board.set(pos, cell);
        }
        board
    }

    /// Returns `None` for off-board positions.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        square(pos).map(|sq| self.cells[sq])
    }

    /// Returns `false` and leaves the board untouched for off-board positions.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match square(pos) {
            Some(sq) => {
                self.cells[sq] = cell;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, side: Side) -> u8 {
        self.cells.iter().filter(|cell| cell.belongs_to(side)).count() as u8
    }

    pub fn king_count(&self, side: Side) -> u8 {
        self.cells
            .iter()
            .filter(|cell| cell.belongs_to(side) && cell.is_king())
            .count() as u8
    }

    pub fn has_pieces(&self, side: Side) -> bool {
        self.cells.iter().any(|cell| cell.belongs_to(side))
    }

    /// Positions of every piece of `side`, in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.belongs_to(side))
            .filter_map(|(sq, _)| Position::from_index(sq))
    }

    /// Converts board to `[u8; 64]` of `Cell::code` values.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        self.cells.map(Cell::code)
    }

    /// One diagonal step forward into an empty square.
    pub fn man_quiet_moves(&self, from: Position) -> Vec<Move> {
        let Some((sq, side)) = self.occupied(from) else {
            return Vec::new();
        };
        let forward = match side {
            Side::White => &DIAGONAL_RAYS[sq][..2],
            Side::Black => &DIAGONAL_RAYS[sq][2..],
        };

        forward
            .iter()
            .filter_map(|ray| ray.first().copied())
            .filter(|&to| self.cells[to].is_empty())
            .filter_map(|to| Some(Move::quiet(from, Position::from_index(to)?)))
            .collect()
    }

    /// Short jumps over an adjacent enemy piece, in all four directions.
    pub fn man_captures(&self, from: Position) -> Vec<Move> {
        let Some((sq, side)) = self.occupied(from) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        for ray in &DIAGONAL_RAYS[sq] {
            if let [over, landing, ..] = ray.as_slice()
                && self.cells[*over].belongs_to(side.opponent())
                && self.cells[*landing].is_empty()
                && let Some(to) = Position::from_index(*landing)
            {
                moves.push(Move::capture(from, to));
            }
        }
        moves
    }

    /// Slides through consecutive empty squares along every diagonal.
    pub fn king_quiet_moves(&self, from: Position) -> Vec<Move> {
        let Some((sq, _)) = self.occupied(from) else {
            return Vec::new();
        };

        DIAGONAL_RAYS[sq]
            .iter()
            .flat_map(|ray| {
                ray.iter()
                    .copied()
                    .take_while(|&to| self.cells[to].is_empty())
            })
            .filter_map(|to| Some(Move::quiet(from, Position::from_index(to)?)))
            .collect()
    }

    /// Flying captures: the first piece met on a diagonal must be an enemy,
    /// and every empty square behind it up to the next piece is a landing.
    pub fn king_captures(&self, from: Position) -> Vec<Move> {
        let Some((sq, side)) = self.occupied(from) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        for ray in &DIAGONAL_RAYS[sq] {
            let mut squares = ray
                .iter()
                .copied()
                .skip_while(|&s| self.cells[s].is_empty());

            match squares.next() {
                Some(target) if self.cells[target].belongs_to(side.opponent()) => {
                    moves.extend(
                        squares
                            .take_while(|&s| self.cells[s].is_empty())
                            .filter_map(Position::from_index)
                            .map(|to| Move::capture(from, to)),
                    );
                }
                _ => {}
            }
        }
        moves
    }

    /// Captures for whatever piece stands on `from`.
    pub fn captures_from(&self, from: Position) -> Vec<Move> {
        match self.get(from) {
            Some(cell) if cell.is_king() => self.king_captures(from),
            Some(cell) if !cell.is_empty() => self.man_captures(from),
            _ => Vec::new(),
        }
    }

    /// Non-capturing moves for whatever piece stands on `from`.
    pub fn quiet_moves_from(&self, from: Position) -> Vec<Move> {
        match self.get(from) {
            Some(cell) if cell.is_king() => self.king_quiet_moves(from),
            Some(cell) if !cell.is_empty() => self.man_quiet_moves(from),
            _ => Vec::new(),
        }
    }

    pub fn side_has_capture(&self, side: Side) -> bool {
        self.pieces(side)
            .any(|pos| !self.captures_from(pos).is_empty())
    }

    /// Every legal move for `side` this turn. Captures are mandatory: when any
    /// piece can capture, only captures are returned.
    pub fn legal_moves_for(&self, side: Side) -> Vec<Move> {
        let captures: Vec<Move> = self
            .pieces(side)
            .flat_map(|pos| self.captures_from(pos))
            .collect();
        if !captures.is_empty() {
            return captures;
        }

        self.pieces(side)
            .flat_map(|pos| self.quiet_moves_from(pos))
            .collect()
    }

    /// Executes one step without checking legality. A capture removes the
    /// single piece between origin and destination; a man ending on the far
    /// rank is crowned.
    pub fn apply_step(&mut self, mv: &Move) -> StepEffects {
        let (Some(from), Some(to)) = (square(mv.from), square(mv.to)) else {
            return StepEffects::default();
        };
        let piece = self.cells[from];
        self.cells[from] = Cell::Empty;

        let captured = if mv.is_capture {
            let jumped = mv
                .passed_squares()
                .into_iter()
                .find(|&pos| self.get(pos).is_some_and(|cell| !cell.is_empty()));
            if let Some(pos) = jumped {
                self.set(pos, Cell::Empty);
            }
            jumped
        } else {
            None
        };

        let promoted = !piece.is_king()
            && piece
                .side()
                .is_some_and(|side| mv.to.row == side.promotion_row());
        self.cells[to] = if promoted { piece.promoted() } else { piece };

        StepEffects { captured, promoted }
    }

    fn occupied(&self, pos: Position) -> Option<(usize, Side)> {
        let sq = square(pos)?;
        self.cells[sq].side().map(|side| (sq, side))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn square(pos: Position) -> Option<usize> {
    pos.is_on_board().then(|| pos.index())
}

fn sq_to_row_col(sq: usize) -> (i32, i32) {
    ((sq / BOARD_SIZE) as i32, (sq % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
