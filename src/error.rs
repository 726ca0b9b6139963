use thiserror::Error;

use crate::types::{Move, Side};

/// Why a move request was rejected. The game state is never changed by a
/// rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece is selected")]
    NoSelection,
    #[error("square ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
    #[error("({row}, {col}) is not a legal destination for the selected piece")]
    IllegalDestination { row: u8, col: u8 },
    #[error("side to move has no legal moves")]
    NoLegalMoves,
    #[error("move selector returned no move")]
    SelectorDeclined,
    #[error("move selector chose {0}, which is not legal")]
    SelectorChoseIllegal(Move),
    #[error("game is already over, {0} won")]
    GameOver(Side),
}
