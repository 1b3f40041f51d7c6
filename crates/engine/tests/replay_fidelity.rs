use hatetris_core::{trace, Board, Piece, WellConfig};
use hatetris_engine::{replay, worst_piece};

/// First 27 lines of a known 30-line game.
const PREFIX_27: &str = include_str!("data/prefix_27.hex");

fn prefix_log() -> hatetris_engine::ReplayLog {
    let moves = trace::decode(PREFIX_27).expect("fixture is valid hex");
    replay(Board::empty(&WellConfig::hatetris()), &moves)
}

#[test]
fn test_prefix_decodes_to_even_length() {
    let moves = trace::decode(PREFIX_27).unwrap();
    assert_eq!(moves.len(), 1348);
}

#[test]
fn test_prefix_reencodes_to_itself() {
    let moves = trace::decode(PREFIX_27).unwrap();
    let normalized: String = PREFIX_27.split_whitespace().collect();
    assert_eq!(trace::encode(&moves).replace(' ', ""), normalized);
}

#[test]
fn test_prefix_reaches_27_lines_without_game_over() {
    let log = prefix_log();
    assert_eq!(log.game_over_at, None);
    assert_eq!(log.locks.len(), 93);
    assert_eq!(log.score(), 27);
    // the trace ends exactly on its last lock
    assert_eq!(log.locks.last().map(|l| l.move_index), Some(1347));
}

#[test]
fn test_score_grows_only_at_locks_by_cleared_lines() {
    let log = prefix_log();
    let mut score = 0;
    let mut scoring_locks = 0;
    for lock in &log.locks {
        assert!(lock.lines <= 4);
        assert_eq!(lock.score, score + lock.lines);
        score = lock.score;
        if lock.lines > 0 {
            scoring_locks += 1;
        }
        assert!((0..4).all(|y| lock.board.is_row_empty(y)));
    }
    assert_eq!(scoring_locks, 27);
    let first_scoring = log.locks.iter().find(|l| l.lines > 0).unwrap();
    assert_eq!(first_scoring.move_index, 175);
}

#[test]
fn test_segments_concatenate_to_the_trace() {
    let moves = trace::decode(PREFIX_27).unwrap();
    let log = prefix_log();
    let joined: Vec<_> = log.locks.iter().flat_map(|l| l.segment.iter().copied()).collect();
    assert_eq!(joined, moves);
}

#[test]
fn test_final_board() {
    let log = prefix_log();
    let board = &log.locks.last().unwrap().board;
    let expected: [u16; 20] = [
        0x000, 0x000, 0x000, 0x000, 0x010, 0x030, 0x170, 0x3f0, 0x3f9, 0x1aa, 0x3fe, 0x3f6, 0x3ea,
        0x3fe, 0x1aa, 0x3fe, 0x3f6, 0x3ea, 0x3fe, 0x1aa,
    ];
    assert_eq!(board.rows(), &expected[..]);
    assert_eq!(board.height(), 16);
}

#[test]
fn test_adversary_only_deals_s_and_i_along_the_prefix() {
    let log = prefix_log();
    assert_eq!(log.locks[0].piece, Piece::S);
    assert!(log
        .locks
        .iter()
        .all(|l| matches!(l.piece, Piece::S | Piece::I)));
    let last = &log.locks.last().unwrap().board;
    assert_eq!(worst_piece(last), Piece::S);
}
