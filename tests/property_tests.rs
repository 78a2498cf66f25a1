//! Property tests for board invariants under arbitrary play

use memory_tiles::core::{Board, BoardConfig, ClickOutcome, GridLayout};
use memory_tiles::types::{Difficulty, Rect, TileFace, FRAME_SECONDS};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Click(usize),
    Wait(u8),
    Hint,
    Shuffle,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => (0usize..16).prop_map(Action::Click),
        4 => (1u8..40).prop_map(Action::Wait),
        1 => Just(Action::Hint),
        1 => Just(Action::Shuffle),
    ]
}

fn layout(difficulty: Difficulty) -> GridLayout {
    let (rows, cols) = difficulty.grid();
    GridLayout::fit(rows, cols, Rect::new(0.0, 80.0, 1024.0, 688.0), 10.0)
}

fn open_face_up(board: &Board) -> usize {
    board
        .tiles()
        .iter()
        .filter(|t| t.face() == TileFace::FaceUp)
        .count()
}

proptest! {
    #[test]
    fn deal_has_exactly_two_of_each_key(seed in any::<u32>(), level in 0usize..3) {
        let difficulty = Difficulty::ALL[level];
        let board = Board::new(layout(difficulty), BoardConfig::default(), seed).unwrap();
        let mut counts = vec![0u32; difficulty.pair_count()];
        for tile in board.tiles() {
            counts[tile.key() as usize] += 1;
        }
        prop_assert!(counts.iter().all(|&c| c == 2));
    }

    #[test]
    fn shuffle_permutes_unmatched_positions(seed in any::<u32>(), matched_pairs in 0u32..6) {
        let mut board = Board::new(layout(Difficulty::Easy), BoardConfig::default(), seed).unwrap();

        for key in 0..matched_pairs {
            let pair: Vec<usize> = (0..16).filter(|&i| board.tiles()[i].key() == key).collect();
            for i in pair {
                let p = board.tiles()[i].bounds().center();
                board.handle_click(p);
            }
        }

        let matched_before: Vec<_> = board
            .tiles()
            .iter()
            .map(|t| t.is_matched().then(|| t.position()))
            .collect();
        let mut free_before: Vec<(i64, i64)> = board
            .tiles()
            .iter()
            .filter(|t| !t.is_matched())
            .map(|t| (t.position().x as i64, t.position().y as i64))
            .collect();

        prop_assert!(board.start_shuffle(1.0));
        let mut frames = 0;
        while board.is_shuffling() {
            board.update(FRAME_SECONDS);
            frames += 1;
            prop_assert!(frames < 600);
        }

        for (tile, before) in board.tiles().iter().zip(&matched_before) {
            if let Some(pos) = before {
                prop_assert_eq!(tile.position(), *pos);
            }
        }
        let mut free_after: Vec<(i64, i64)> = board
            .tiles()
            .iter()
            .filter(|t| !t.is_matched())
            .map(|t| (t.position().x as i64, t.position().y as i64))
            .collect();
        free_before.sort_unstable();
        free_after.sort_unstable();
        prop_assert_eq!(free_before, free_after);
    }

    #[test]
    fn invariants_hold_under_random_play(
        seed in any::<u32>(),
        actions in prop::collection::vec(action(), 1..200),
    ) {
        let mut board = Board::new(layout(Difficulty::Easy), BoardConfig::default(), seed).unwrap();
        let mut matched = vec![false; 16];

        for action in actions {
            match action {
                Action::Click(i) => {
                    let p = board.tiles()[i].bounds().center();
                    match board.handle_click(p) {
                        ClickOutcome::Matched { multiplier, .. } => {
                            prop_assert_eq!(multiplier, board.combo_count().min(5));
                            prop_assert!(multiplier >= 1);
                        }
                        ClickOutcome::Mismatched { .. } => {
                            prop_assert_eq!(board.combo_count(), 0);
                        }
                        ClickOutcome::Revealed { .. } | ClickOutcome::Ignored(_) => {}
                    }
                }
                Action::Wait(frames) => {
                    for _ in 0..frames {
                        board.update(FRAME_SECONDS);
                        prop_assert!(open_face_up(&board) <= 2);
                    }
                }
                Action::Hint => {
                    let remaining = board.hints_remaining();
                    if board.show_hint() {
                        prop_assert_eq!(board.combo_count(), 0);
                        prop_assert_eq!(board.hints_remaining(), remaining - 1);
                    } else {
                        prop_assert_eq!(board.hints_remaining(), remaining);
                    }
                }
                Action::Shuffle => {
                    if board.start_shuffle(0.5) {
                        prop_assert_eq!(board.combo_count(), 0);
                        prop_assert!(board.selected().is_empty());
                    }
                }
            }

            prop_assert!(open_face_up(&board) <= 2);
            prop_assert!(board.selected().len() <= 2);

            for (i, tile) in board.tiles().iter().enumerate() {
                if matched[i] {
                    prop_assert_eq!(tile.face(), TileFace::Matched);
                }
                matched[i] = tile.is_matched();
            }
            let matched_tiles = matched.iter().filter(|&&m| m).count() as u32;
            prop_assert_eq!(matched_tiles, board.matches_found() * 2);
            board.take_events().for_each(drop);
        }
    }
}
