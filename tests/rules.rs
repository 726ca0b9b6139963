//! Game-level rule tests driven through the public engine API.

use russian_draughts::ai::{FirstLegalMoveSelector, RandomMoveSelector};
use russian_draughts::board::{Board, Cell};
use russian_draughts::error::MoveError;
use russian_draughts::game::RulesEngine;
use russian_draughts::types::{MoveOutcome, Position, Side};

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

fn engine_at(pieces: &[(Position, Cell)], side: Side) -> RulesEngine {
    RulesEngine::from_position(
        Board::from_pieces(pieces),
        side,
        Box::new(FirstLegalMoveSelector),
    )
}

fn assert_starting_invariants(game: &RulesEngine) {
    let board = game.board();
    assert_eq!(board.count(Side::White), 12);
    assert_eq!(board.count(Side::Black), 12);
    assert_eq!(board.king_count(Side::White) + board.king_count(Side::Black), 0);
    assert!(board.pieces(Side::White).chain(board.pieces(Side::Black)).all(Position::is_dark));
    assert_eq!(game.side_to_move(), Side::White);
    assert_eq!(game.selection(), None);
    assert!(!game.in_capture_chain());
    assert_eq!(game.turn_moves().len(), 7);
    assert!(game.turn_moves().iter().all(|mv| !mv.is_capture));
    assert_eq!(game.winner(), None);
}

// =============================================================================
// Starting position
// =============================================================================

#[test]
fn starting_position_matches_the_standard_setup() {
    let game = RulesEngine::new(Box::new(FirstLegalMoveSelector));

    assert_starting_invariants(&game);
}

#[test]
fn reset_after_a_played_game_restores_the_start() {
    let mut game = RulesEngine::new(Box::new(RandomMoveSelector::seeded(11)));
    for _ in 0..40 {
        if game.ai_move().is_err() {
            break;
        }
    }

    game.reset();

    assert_starting_invariants(&game);
}

// =============================================================================
// Mandatory capture
// =============================================================================

#[test]
fn only_pieces_with_a_capture_are_selectable() {
    let mut game = engine_at(
        &[
            (pos(7, 0), Cell::WhiteKing),
            (pos(5, 6), Cell::WhiteMan),
            (pos(3, 4), Cell::BlackMan),
            (pos(0, 1), Cell::BlackMan),
        ],
        Side::White,
    );

    // The king can take on e5 from a1; the man on g3 has only quiet steps.
    assert!(game.turn_moves().iter().all(|mv| mv.is_capture));
    assert!(!game.select_cell(5, 6));
    assert!(game.select_cell(7, 0));
    assert!(!game.legal_moves().is_empty());
    assert!(game.legal_moves().iter().all(|mv| mv.is_capture));
}

#[test]
fn quiet_destination_is_refused_while_a_capture_is_pending() {
    let mut game = engine_at(
        &[
            (pos(5, 2), Cell::WhiteMan),
            (pos(4, 3), Cell::BlackMan),
            (pos(0, 7), Cell::BlackMan),
        ],
        Side::White,
    );

    assert!(game.select_cell(5, 2));
    assert_eq!(
        game.attempt_move(4, 1),
        Err(MoveError::IllegalDestination { row: 4, col: 1 })
    );
    assert_eq!(game.cell(5, 2), Some(Cell::WhiteMan));
}

// =============================================================================
// Captures, chains and promotion
// =============================================================================

#[test]
fn black_man_captures_backward() {
    let mut game = engine_at(
        &[
            (pos(4, 3), Cell::BlackMan),
            (pos(3, 2), Cell::WhiteMan),
            (pos(7, 6), Cell::WhiteMan),
        ],
        Side::Black,
    );

    assert!(game.select_cell(4, 3));
    let report = game.attempt_move(2, 1).expect("backward capture is legal");

    assert_eq!(report.captured, Some(pos(3, 2)));
    assert_eq!(game.cell(3, 2), Some(Cell::Empty));
    assert_eq!(game.side_to_move(), Side::White);
}

#[test]
fn triple_jump_keeps_the_turn_until_the_last_capture() {
    let mut game = engine_at(
        &[
            (pos(7, 0), Cell::WhiteMan),
            (pos(6, 1), Cell::BlackMan),
            (pos(4, 3), Cell::BlackMan),
            (pos(4, 5), Cell::BlackMan),
            (pos(0, 1), Cell::BlackMan),
        ],
        Side::White,
    );

    assert!(game.select_cell(7, 0));
    let hops = [(5, 2), (3, 4), (5, 6)];
    for (i, &(row, col)) in hops.iter().enumerate() {
        let report = game.attempt_move(row, col).expect("hop is legal");
        if i + 1 < hops.len() {
            assert_eq!(report.outcome, MoveOutcome::ChainContinues { at: pos(row, col) });
            assert_eq!(game.side_to_move(), Side::White);
            assert_eq!(game.selection(), Some(pos(row, col)));
            assert!(game.legal_moves().iter().all(|mv| mv.is_capture && mv.from == pos(row, col)));
        } else {
            assert_eq!(report.outcome, MoveOutcome::TurnPassed { next: Side::Black });
        }
    }

    assert_eq!(game.board().count(Side::Black), 1);
    assert_eq!(game.cell(5, 6), Some(Cell::WhiteMan));
}

#[test]
fn man_capturing_onto_the_back_rank_is_crowned_in_one_step() {
    let mut game = engine_at(
        &[
            (pos(5, 4), Cell::BlackMan),
            (pos(6, 3), Cell::WhiteMan),
            (pos(2, 7), Cell::WhiteMan),
        ],
        Side::Black,
    );

    assert!(game.select_cell(5, 4));
    let report = game.attempt_move(7, 2).expect("capture is legal");

    assert!(report.promoted);
    assert_eq!(report.captured, Some(pos(6, 3)));
    assert_eq!(game.cell(7, 2), Some(Cell::BlackKing));
}

#[test]
fn king_long_capture_removes_one_piece_and_offers_each_landing() {
    let mut game = engine_at(
        &[
            (pos(3, 4), Cell::BlackKing),
            (pos(4, 3), Cell::WhiteMan),
            (pos(2, 1), Cell::WhiteMan),
        ],
        Side::Black,
    );

    assert!(game.select_cell(3, 4));
    let mut landings: Vec<Position> = game.legal_moves().iter().map(|mv| mv.to).collect();
    landings.sort();
    assert_eq!(landings, vec![pos(5, 2), pos(6, 1), pos(7, 0)]);

    let report = game.attempt_move(7, 0).expect("far landing is legal");

    assert_eq!(report.captured, Some(pos(4, 3)));
    assert_eq!(game.board().count(Side::White), 1);
    assert_eq!(game.cell(7, 0), Some(Cell::BlackKing));
}

// =============================================================================
// Termination
// =============================================================================

#[test]
fn capturing_the_last_piece_ends_the_game() {
    let mut game = engine_at(
        &[(pos(5, 2), Cell::WhiteMan), (pos(4, 3), Cell::BlackMan)],
        Side::White,
    );

    assert!(game.select_cell(5, 2));
    let report = game.attempt_move(3, 4).expect("capture is legal");

    assert_eq!(report.outcome, MoveOutcome::GameOver { winner: Side::White });
    assert_eq!(game.winner(), Some(Side::White));
    assert!(game.is_game_over());
}

#[test]
fn missing_color_loses_regardless_of_turn() {
    for side in [Side::White, Side::Black] {
        let game = engine_at(&[(pos(2, 3), Cell::BlackMan)], side);
        assert_eq!(game.winner(), Some(Side::Black));
    }
}

#[test]
fn blocked_black_loses_on_its_turn() {
    let mut game = engine_at(
        &[
            (pos(0, 7), Cell::BlackMan),
            (pos(1, 6), Cell::WhiteMan),
            (pos(2, 5), Cell::WhiteMan),
        ],
        Side::Black,
    );

    assert_eq!(game.winner(), Some(Side::White));
    assert!(!game.select_cell(0, 7));
    assert_eq!(game.ai_move(), Err(MoveError::GameOver(Side::White)));
}

// =============================================================================
// Self-play
// =============================================================================

#[test]
fn random_self_play_respects_engine_invariants() {
    for seed in 0..8 {
        let mut game = RulesEngine::new(Box::new(RandomMoveSelector::seeded(seed)));

        for _ in 0..300 {
            if game.is_game_over() {
                break;
            }
            let before = game.board().count(Side::White) + game.board().count(Side::Black);
            let any_capture = game.turn_moves().iter().any(|mv| mv.is_capture);

            let report = game.ai_move().expect("a move exists while the game runs");

            assert_eq!(report.mv.is_capture, any_capture);
            let after = game.board().count(Side::White) + game.board().count(Side::Black);
            assert_eq!(after + report.mv.is_capture as u8, before);

            if game.in_capture_chain() {
                let anchor = game.selection().expect("chain keeps a selection");
                assert!(!game.legal_moves().is_empty());
                assert!(game.legal_moves().iter().all(|mv| mv.is_capture && mv.from == anchor));
            } else {
                assert_eq!(game.selection(), None);
            }

            let board = game.board();
            assert!(board.pieces(Side::White).chain(board.pieces(Side::Black)).all(Position::is_dark));
        }
    }
}
