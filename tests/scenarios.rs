//! Behavioural scenarios and randomized properties over the public API.

use dropfour::board::{Board, Move, Position, Side, Turn, CELL_COUNT, COLS, ROWS};
use dropfour::engine::{Engine, EngineError};
use dropfour::movegen::legal_moves;
use dropfour::protocol::buffer::{decode_result, BufferError};
use dropfour::protocol::notation::parse_position;
use dropfour::resolve::Outcome;
use dropfour::rules::{compact_column, has_n_in_a_row, Variant, ALL_VARIANTS};
use dropfour::search::{choose_move, Decision, SearchParams};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn params(depth: u32) -> SearchParams {
    SearchParams {
        depth,
        ..SearchParams::default()
    }
}

/// Plays `plies` random legal moves from the start, stopping early if the
/// game ends.
fn random_position(rng: &mut StdRng, variant: Variant, plies: usize) -> Position {
    let mut pos = Position::start();
    for _ in 0..plies {
        if variant.is_terminal(&pos) {
            break;
        }
        let moves = legal_moves(&pos, variant);
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        pos = pos.play(mv, variant).unwrap();
    }
    pos
}

#[test]
fn empty_board_classic_depth_four_plays_center() {
    let mut engine = Engine::new();
    let result = engine.best_move_buffer(&[0; CELL_COUNT], 4, 0).unwrap();
    assert_eq!(result, &[3]);
}

#[test]
fn classic_blocks_bottom_row_three() {
    let pos = parse_position("7/7/7/7/xx5/ooo4/0,0/r").unwrap();
    let result = choose_move(&pos, Variant::Classic, &params(4));
    assert_eq!(result.turn, Some(Turn::Drop { col: 3 }));
    assert_eq!(result.decision, Decision::ForcedBlock);
}

#[test]
fn classic_blocks_even_with_own_win_available() {
    let pos = parse_position("7/7/7/6o/6o/xxx3o/0,0/r").unwrap();
    let result = choose_move(&pos, Variant::Classic, &params(4));
    assert_eq!(result.decision, Decision::ForcedBlock);
    assert_eq!(result.turn, Some(Turn::Drop { col: 6 }));
}

#[test]
fn stock_without_charge_offers_drops_only() {
    let pos = parse_position("7/7/7/7/7/3o3/0,0/r").unwrap();
    let moves = legal_moves(&pos, Variant::Stock);
    assert_eq!(moves.len(), COLS);
    assert!(moves.iter().all(|m| m.is_drop()));
}

#[test]
fn three_for_one_bonus_is_offered_then_gone() {
    let pos = parse_position("7/7/7/7/7/xx4o/0,0/r").unwrap();
    let after_drop = pos.play(Move::Drop { col: 2 }, Variant::ThreeForOne).unwrap();

    assert_eq!(after_drop.to_move, Side::Red);
    let bonus = legal_moves(&after_drop, Variant::ThreeForOne);
    assert_eq!(bonus, vec![Move::Destroy { row: 5, col: 6 }]);

    let after_destroy = after_drop.play(bonus[0], Variant::ThreeForOne).unwrap();
    assert_eq!(after_destroy.to_move, Side::Yellow);
    assert!(legal_moves(&after_destroy, Variant::ThreeForOne)
        .iter()
        .all(|m| m.is_drop()));

    let after_reply = after_destroy
        .play(Move::Drop { col: 6 }, Variant::ThreeForOne)
        .unwrap();
    assert!(legal_moves(&after_reply, Variant::ThreeForOne)
        .iter()
        .all(|m| m.is_drop()));
}

#[test]
fn forced_defense_blocks_every_single_threat() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut checked = 0;

    for _ in 0..400 {
        let plies = rng.gen_range(4..20);
        let pos = random_position(&mut rng, Variant::Classic, plies);
        if Variant::Classic.is_terminal(&pos) {
            continue;
        }

        let result = choose_move(&pos, Variant::Classic, &params(2));

        // Columns where the opponent would complete four by dropping next.
        let opponent = pos.to_move.opponent();
        let probe = Position::new(pos.board, opponent);
        let threats: Vec<usize> = legal_moves(&probe, Variant::Classic)
            .into_iter()
            .filter_map(|mv| match mv {
                Move::Drop { col } => {
                    let next = probe.play(mv, Variant::Classic).ok()?;
                    has_n_in_a_row(&next.board, opponent, 4).then_some(col)
                }
                _ => None,
            })
            .collect();

        if let Some(&first) = threats.first() {
            assert_eq!(result.decision, Decision::ForcedBlock);
            assert_eq!(result.turn, Some(Turn::Drop { col: first }));
            checked += 1;
        }
    }
    assert!(checked > 0, "no threat positions were generated");
}

#[test]
fn chosen_turns_are_always_legal() {
    let mut rng = StdRng::seed_from_u64(42);
    for variant in ALL_VARIANTS {
        for _ in 0..30 {
            let plies = rng.gen_range(0..24);
            let pos = random_position(&mut rng, variant, plies);
            if variant.is_terminal(&pos) {
                continue;
            }
            let result = choose_move(&pos, variant, &params(3));
            let turn = result.turn.expect("non-terminal position has a move");
            let mut next = pos;
            for ply in turn.plies() {
                next = next.play(ply, variant).unwrap();
            }
        }
    }
}

#[test]
fn compaction_is_idempotent_on_random_boards() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..100 {
        let pos = random_position(&mut rng, Variant::Stock, 30);
        let mut board = pos.board;
        for col in 0..COLS {
            compact_column(&mut board, col);
        }
        assert_eq!(board, pos.board);
        assert!(board.floating_piece().is_none());
    }
}

#[test]
fn buffer_rejects_unknown_variant() {
    let mut engine = Engine::new();
    let err = engine.best_move_buffer(&[0; CELL_COUNT], 4, 3).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Buffer(BufferError::UnknownVariant(3))
    ));
}

#[test]
fn buffer_depth_zero_still_moves() {
    let mut engine = Engine::new();
    let result = engine.best_move_buffer(&[0; CELL_COUNT], 0, 1).unwrap();
    assert_eq!(decode_result(result), Ok(Turn::Drop { col: 3 }));
}

#[test]
fn buffer_result_is_reused_between_calls() {
    let mut engine = Engine::new();
    let first = engine.best_move_buffer(&[0; CELL_COUNT], 2, 0).unwrap().to_vec();

    let mut input = vec![0; CELL_COUNT];
    for row in 0..ROWS {
        input[row * COLS + 3] = if row % 2 == 0 { 1 } else { -1 };
    }
    let second = engine.best_move_buffer(&input, 2, 0).unwrap();
    assert_eq!(first, vec![3]);
    assert_eq!(second.len(), 1);
    assert_ne!(second, &[3]);
}

#[test]
fn both_sides_completing_four_is_a_draw() {
    // Removing the yellow piece at the bottom of column 3 drops Red's piece
    // into the bottom row and Yellow's piece into row 4, completing a line
    // for each side at once.
    let mut board = Board::empty();
    for col in [0, 1, 2, 4, 5, 6] {
        board.set(5, col, Some(Side::Red));
    }
    for col in [4, 5, 6] {
        board.set(4, col, Some(Side::Yellow));
    }
    board.set(5, 3, Some(Side::Yellow));
    board.set(4, 3, Some(Side::Red));
    board.set(3, 3, Some(Side::Yellow));
    board.stock = [1, 0];
    let pos = Position::new(board, Side::Red);
    assert!(!Variant::Stock.is_terminal(&pos));

    let next = pos.play(Move::Destroy { row: 5, col: 3 }, Variant::Stock).unwrap();
    assert!(has_n_in_a_row(&next.board, Side::Red, 4));
    assert!(has_n_in_a_row(&next.board, Side::Yellow, 4));
    assert_eq!(Variant::Stock.outcome(&next), Some(Outcome::Draw));
}
