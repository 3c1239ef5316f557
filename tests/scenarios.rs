use tabuleiro::board::Board;
use tabuleiro::config::EngineConfig;
use tabuleiro::engine::Engine;
use tabuleiro::moves::execute::generate_legal;
use tabuleiro::moves::square_control::square_attacked;
use tabuleiro::moves::types::MoveList;
use tabuleiro::square::{square_of, Color};

#[test]
fn initial_position_search_returns_a_sound_opening_move() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.set_move_time_seconds(2);
    engine.set_depth_limit(4);
    let (best, info) = engine.search();

    assert!(!info.is_empty(), "search should emit at least one PV line");
    let plausible = ["e2e4", "d2d4", "g1f3", "c2c4", "b1c3"];
    assert!(
        plausible.contains(&best.as_str()) || best.len() == 4,
        "engine returned a syntactically invalid move: {best}"
    );
}

#[test]
fn finds_the_scholars_mate_shot() {
    let mut engine = Engine::new(EngineConfig::default());
    engine
        .set_position("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 0 1")
        .unwrap();
    engine.set_move_time_seconds(2);
    engine.set_depth_limit(4);
    let (best, _) = engine.search();
    assert_eq!(best, "f3f7");
}

#[test]
fn repeated_knight_shuffle_is_detected_as_threefold() {
    let mut engine = Engine::new(EngineConfig::default());
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        engine.apply_move(mv).unwrap();
    }
    assert!(engine.ctx.board.is_threefold());
}

#[test]
fn fifty_move_clock_reaches_draw_after_one_more_quiet_ply() {
    let mut board = Board::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 99 1").unwrap();
    assert!(!board.is_fifty_move_draw());

    let mut moves = MoveList::new();
    generate_legal(&mut board, &mut moves);
    let quiet_king_move = moves
        .iter()
        .find(|m| !m.is_capture())
        .expect("a quiet king move exists");
    tabuleiro::moves::execute::make_move(&mut board, *quiet_king_move);

    assert!(board.is_fifty_move_draw());
}

#[test]
fn en_passant_capture_is_generated_from_the_fifth_rank() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let mut moves = MoveList::new();
    generate_legal(&mut board, &mut moves);
    let ep = moves
        .iter()
        .find(|m| m.from == square_of(5, 5) && m.to == square_of(6, 6))
        .expect("e5f6 en passant should be legal");
    assert!(ep.is_en_passant());
    assert_eq!(ep.en_passant_victim, square_of(6, 5));
}

#[test]
fn both_castles_legal_with_open_path_illegal_when_path_attacked() {
    let mut clear = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mut moves = MoveList::new();
    generate_legal(&mut clear, &mut moves);
    assert!(moves.iter().any(|m| m.from == square_of(5, 1) && m.to == square_of(7, 1)));
    assert!(moves.iter().any(|m| m.from == square_of(5, 1) && m.to == square_of(3, 1)));

    let attacked = Board::from_fen("r3k2r/4r3/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(square_attacked(&attacked, square_of(5, 1), Color::Black));
    let mut moves = MoveList::new();
    let mut attacked = attacked;
    generate_legal(&mut attacked, &mut moves);
    assert!(!moves.iter().any(|m| m.from == square_of(5, 1) && m.to == square_of(7, 1)));
    assert!(!moves.iter().any(|m| m.from == square_of(5, 1) && m.to == square_of(3, 1)));
}
