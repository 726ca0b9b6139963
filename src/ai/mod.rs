//! Move choosers that can drive one side of a game.

mod random;

pub use random::RandomMoveSelector;

use crate::board::Board;
use crate::types::{Move, Side};

/// Picks one move out of the legal set for the side to move.
///
/// `moves` is never empty when the engine calls this. Returning a move that is
/// not in `moves` makes the engine reject the ply.
pub trait MoveSelector: Send {
    fn select_move(&mut self, board: &Board, side: Side, moves: &[Move]) -> Option<Move>;
}

/// Deterministic chooser: the first capture in generation order, otherwise
/// the first move.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, _board: &Board, _side: Side, moves: &[Move]) -> Option<Move> {
        moves
            .iter()
            .find(|mv| mv.is_capture)
            .or_else(|| moves.first())
            .copied()
    }
}
