use tracing::{debug, info, trace};

use crate::ai::{MoveSelector, RandomMoveSelector};
use crate::board::{Board, Cell};
use crate::config::GameConfig;
use crate::error::MoveError;
use crate::types::{GameState, Move, MoveOutcome, MoveView, Position, Side, StepReport};

/// Which piece, if any, is picked up and where it may go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected {
        origin: Position,
        moves: Vec<Move>,
    },
    /// Mid-capture: only this piece may move, and only by capturing again.
    CaptureChain {
        origin: Position,
        moves: Vec<Move>,
    },
}

impl Selection {
    pub fn origin(&self) -> Option<Position> {
        match self {
            Selection::None => None,
            Selection::Selected { origin, .. } | Selection::CaptureChain { origin, .. } => {
                Some(*origin)
            }
        }
    }

    pub fn moves(&self) -> &[Move] {
        match self {
            Selection::None => &[],
            Selection::Selected { moves, .. } | Selection::CaptureChain { moves, .. } => moves,
        }
    }

    pub fn is_chain(&self) -> bool {
        matches!(self, Selection::CaptureChain { .. })
    }
}

/// Russian draughts rules engine: board, turn, selection and the legal
/// move set, driven by cell clicks or a pluggable move chooser.
pub struct RulesEngine {
    board: Board,
    side_to_move: Side,
    selection: Selection,
    turn_moves: Vec<Move>,
    selector: Box<dyn MoveSelector>,
}

impl RulesEngine {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self::from_position(Board::new(), Side::White, selector)
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self::new(Box::new(RandomMoveSelector::from_config(config)))
    }

    pub fn new_with_default_selector() -> Self {
        Self::new(Box::new(RandomMoveSelector::new()))
    }

    /// Starts from an arbitrary position with `side` to move.
    pub fn from_position(board: Board, side: Side, selector: Box<dyn MoveSelector>) -> Self {
        let mut engine = Self {
            board,
            side_to_move: side,
            selection: Selection::None,
            turn_moves: Vec::new(),
            selector,
        };
        engine.begin_turn();
        engine
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.side_to_move = Side::White;
        self.begin_turn();
        debug!("game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns `None` for off-board coordinates.
    pub fn cell(&self, row: u8, col: u8) -> Option<Cell> {
        self.board.get(Position::new(row, col))
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection.origin()
    }

    pub fn selection_state(&self) -> &Selection {
        &self.selection
    }

    /// Moves of the selected piece; empty when nothing is selected.
    pub fn legal_moves(&self) -> &[Move] {
        self.selection.moves()
    }

    /// Every move the side to move may make right now. While a capture chain
    /// is active this is just the chain's continuations.
    pub fn turn_moves(&self) -> &[Move] {
        match &self.selection {
            Selection::CaptureChain { moves, .. } => moves,
            _ => &self.turn_moves,
        }
    }

    pub fn in_capture_chain(&self) -> bool {
        self.selection.is_chain()
    }

    /// Picks up the piece on `(row, col)`. Returns whether a piece is
    /// selected afterwards.
    ///
    /// During a capture chain only the chaining piece counts; any other cell
    /// is ignored. Otherwise an empty cell, an enemy piece, or a piece that
    /// cannot move clears the selection.
    pub fn select_cell(&mut self, row: u8, col: u8) -> bool {
        let Some(pos) = Position::checked(row as i32, col as i32) else {
            return false;
        };

        if let Selection::CaptureChain { origin, .. } = &self.selection {
            return *origin == pos;
        }

        let Some(cell) = self.board.get(pos).filter(|cell| cell.belongs_to(self.side_to_move))
        else {
            self.selection = Selection::None;
            trace!(%pos, "selection cleared");
            return false;
        };

        let must_capture = self.board.side_has_capture(self.side_to_move);
        let mut moves = self.board.captures_from(pos);
        if !must_capture {
            moves.extend(self.board.quiet_moves_from(pos));
        }

        if moves.is_empty() {
            self.selection = Selection::None;
            trace!(%pos, ?cell, must_capture, "piece has no legal moves");
            return false;
        }

        trace!(%pos, ?cell, count = moves.len(), "piece selected");
        self.selection = Selection::Selected { origin: pos, moves };
        true
    }

    /// Moves the selected piece to `(row, col)`.
    ///
    /// The destination is matched against the selected piece's legal moves;
    /// the matched move decides whether this is a capture. On error nothing
    /// changes and the selection is kept.
    pub fn attempt_move(&mut self, row: u8, col: u8) -> Result<StepReport, MoveError> {
        let origin = self.selection.origin().ok_or(MoveError::NoSelection)?;
        let to = Position::checked(row as i32, col as i32)
            .ok_or(MoveError::OutOfBounds { row, col })?;

        let mv = self
            .selection
            .moves()
            .iter()
            .copied()
            .find(|mv| mv.from == origin && mv.to == to)
            .ok_or(MoveError::IllegalDestination { row, col })?;

        Ok(self.execute(mv))
    }

    /// Single entry point for a board click: with a piece selected, try to
    /// move it there; if that fails (or nothing was selected), select the
    /// clicked cell instead.
    pub fn click(&mut self, row: u8, col: u8) -> Option<StepReport> {
        if self.selection.origin().is_some()
            && let Ok(report) = self.attempt_move(row, col)
        {
            return Some(report);
        }
        self.select_cell(row, col);
        None
    }

    /// Lets the configured chooser play one step for the side to move, through
    /// the same select-then-move path as a click. A capture chain needs one
    /// call per jump.
    pub fn ai_move(&mut self) -> Result<StepReport, MoveError> {
        if let Some(winner) = self.winner() {
            return Err(MoveError::GameOver(winner));
        }
        let moves = self.turn_moves().to_vec();
        if moves.is_empty() {
            return Err(MoveError::NoLegalMoves);
        }

        let chosen = self
            .selector
            .select_move(&self.board, self.side_to_move, &moves)
            .ok_or(MoveError::SelectorDeclined)?;
        if !moves.contains(&chosen) {
            return Err(MoveError::SelectorChoseIllegal(chosen));
        }

        if !self.select_cell(chosen.from.row, chosen.from.col) {
            return Err(MoveError::SelectorChoseIllegal(chosen));
        }
        self.attempt_move(chosen.to.row, chosen.to.col)
    }

    /// The winner, if the game is decided: a side with no pieces loses, and
    /// so does a side to move with no legal move.
    pub fn winner(&self) -> Option<Side> {
        if !self.board.has_pieces(Side::White) {
            return Some(Side::Black);
        }
        if !self.board.has_pieces(Side::Black) {
            return Some(Side::White);
        }
        if self.turn_moves().is_empty() {
            return Some(self.side_to_move.opponent());
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn to_game_state(&self) -> GameState {
        let winner = self.winner();
        let mut movable: Vec<Position> = self.turn_moves().iter().map(|mv| mv.from).collect();
        movable.sort();
        movable.dedup();

        GameState {
            board: self.board.to_array().to_vec(),
            side_to_move: self.side_to_move,
            selected: self.selection(),
            legal_moves: self.legal_moves().iter().map(MoveView::from).collect(),
            movable,
            white_count: self.board.count(Side::White),
            black_count: self.board.count(Side::Black),
            white_kings: self.board.king_count(Side::White),
            black_kings: self.board.king_count(Side::Black),
            in_capture_chain: self.in_capture_chain(),
            winner,
            is_game_over: winner.is_some(),
        }
    }

    fn execute(&mut self, mv: Move) -> StepReport {
        let effects = self.board.apply_step(&mv);
        debug!(
            %mv,
            side = %self.side_to_move,
            captured = ?effects.captured,
            promoted = effects.promoted,
            "step executed"
        );

        if mv.is_capture {
            let further = self.board.captures_from(mv.to);
            if !further.is_empty() {
                debug!(at = %mv.to, count = further.len(), "capture chain continues");
                self.selection = Selection::CaptureChain {
                    origin: mv.to,
                    moves: further,
                };
                return StepReport {
                    mv,
                    captured: effects.captured,
                    promoted: effects.promoted,
                    outcome: MoveOutcome::ChainContinues { at: mv.to },
                };
            }
        }

        self.side_to_move = self.side_to_move.opponent();
        self.begin_turn();

        let outcome = match self.winner() {
            Some(winner) => {
                info!(%winner, "game over");
                MoveOutcome::GameOver { winner }
            }
            None => MoveOutcome::TurnPassed {
                next: self.side_to_move,
            },
        };

        StepReport {
            mv,
            captured: effects.captured,
            promoted: effects.promoted,
            outcome,
        }
    }

    fn begin_turn(&mut self) {
        self.selection = Selection::None;
        self.turn_moves = self.board.legal_moves_for(self.side_to_move);
        debug!(
            side = %self.side_to_move,
            moves = self.turn_moves.len(),
            "turn started"
        );
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new_with_default_selector()
    }
}
