//! Hint subsystem tests

use memory_tiles::core::{Board, BoardConfig, ClickOutcome, GridLayout, IgnoreReason};
use memory_tiles::types::{BoardEvent, Rect, TileFace, FRAME_SECONDS};

fn board_with(keys: &[u32], config: BoardConfig) -> Board {
    let layout = GridLayout::fit(2, keys.len() / 2, Rect::new(0.0, 0.0, 800.0, 600.0), 10.0);
    Board::with_keys(layout, keys.to_vec(), config, 1).unwrap()
}

fn board(keys: &[u32]) -> Board {
    board_with(keys, BoardConfig::default())
}

fn run(board: &mut Board, seconds: f32) {
    let frames = (seconds / FRAME_SECONDS).ceil() as usize;
    for _ in 0..frames {
        board.update(FRAME_SECONDS);
    }
}

fn click(board: &mut Board, index: usize) -> ClickOutcome {
    let p = board.tiles()[index].bounds().center();
    board.handle_click(p)
}

#[test]
fn test_hint_is_deterministic_first_pair() {
    let mut board = board(&[2, 0, 1, 0, 2, 1]);
    assert!(board.show_hint());
    assert_eq!(board.hint_pair(), Some((0, 4)));
    let events: Vec<_> = board.take_events().collect();
    assert_eq!(
        events.last(),
        Some(&BoardEvent::HintShown {
            first: 0,
            second: 4
        })
    );
}

#[test]
fn test_hint_lifecycle() {
    let mut board = board(&[0, 1, 0, 1]);
    assert!(board.can_use_hint());
    assert!(board.show_hint());
    assert!(board.is_hint_active());
    assert_eq!(board.hints_remaining(), 2);
    assert_eq!(board.hint_cooldown(), 10.0);
    assert!(board.snapshot().tiles[0].hinted);

    assert_eq!(
        click(&mut board, 1),
        ClickOutcome::Ignored(IgnoreReason::HintShowing)
    );

    run(&mut board, 1.6);
    assert!(!board.is_hint_active());
    run(&mut board, 0.2);
    assert_eq!(board.tiles()[0].face(), TileFace::FaceDown);
    assert_eq!(board.tiles()[2].face(), TileFace::FaceDown);
    assert!(matches!(click(&mut board, 1), ClickOutcome::Revealed { .. }));
}

#[test]
fn test_hint_noop_when_on_cooldown() {
    let mut board = board(&[0, 1, 0, 1, 2, 2]);
    assert!(board.show_hint());
    run(&mut board, 2.0);
    assert!(board.hint_cooldown() > 0.0);
    assert!(!board.show_hint());
    assert_eq!(board.hints_remaining(), 2);

    run(&mut board, 8.5);
    assert_eq!(board.hint_cooldown(), 0.0);
    assert!(board.show_hint());
    assert_eq!(board.hints_remaining(), 1);
}

#[test]
fn test_hint_noop_when_exhausted() {
    let config = BoardConfig {
        initial_hints: 1,
        hint_cooldown_seconds: 0.0,
        ..BoardConfig::default()
    };
    let mut board = board_with(&[0, 1, 0, 1], config);
    assert!(board.show_hint());
    run(&mut board, 2.0);
    assert_eq!(board.hints_remaining(), 0);
    assert!(!board.show_hint());
    assert!(!board.is_hint_active());
}

#[test]
fn test_hint_noop_with_selected_tile() {
    let mut board = board(&[0, 1, 0, 1]);
    click(&mut board, 0);
    board.take_events().count();
    assert!(!board.show_hint());
    assert_eq!(board.hints_remaining(), 3);
    assert_eq!(board.hint_cooldown(), 0.0);
    assert_eq!(board.take_events().count(), 0);
}

#[test]
fn test_hint_noop_while_flipping_back() {
    let mut board = board(&[0, 1, 0, 1]);
    click(&mut board, 0);
    click(&mut board, 1);
    assert!(!board.show_hint());
    assert_eq!(board.hints_remaining(), 3);
}

#[test]
fn test_hint_skips_revealed_and_matched() {
    let mut board = board(&[0, 0, 1, 2, 1, 2]);
    click(&mut board, 0);
    click(&mut board, 1);
    assert!(board.show_hint());
    assert_eq!(board.hint_pair(), Some((2, 4)));
}

#[test]
fn test_hint_breaks_combo() {
    let mut board = board(&[0, 0, 1, 1, 2, 2]);
    click(&mut board, 0);
    click(&mut board, 1);
    assert_eq!(board.combo_count(), 1);
    board.show_hint();
    assert_eq!(board.combo_count(), 0);
    assert_eq!(board.combo_display_time(), 0.0);
}

#[test]
fn test_shuffle_cancels_hint() {
    let mut board = board(&[0, 1, 0, 1]);
    board.show_hint();
    run(&mut board, 0.3);
    assert!(board.start_shuffle(0.5));
    assert!(!board.is_hint_active());
    run(&mut board, 2.0);
    assert!(board.tiles().iter().all(|t| t.face() == TileFace::FaceDown));
    assert_eq!(board.hints_remaining(), 2, "a cancelled hint is still spent");
}
