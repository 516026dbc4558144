// Integration tests for the connections game
// These drive the public controller and the plain CLI loop end to end

use connections::cli::CliInterface;
use connections::*;
use std::io::Cursor;

const SEED: u64 = 2024;

fn seeded(start: usize) -> PuzzleSession {
    PuzzleSession::seeded(embedded_puzzles(), start, SEED).unwrap()
}

fn slot_of(session: &PuzzleSession, term: &str) -> usize {
    session.slots().iter().position(|s| s.term == term).unwrap()
}

/// 1-based tile numbers, as the plain interface shows them, for `terms`.
fn tile_numbers(session: &PuzzleSession, terms: &[&str]) -> String {
    let visible: Vec<&str> = session
        .visible_slots()
        .map(|(_, s)| s.term.as_str())
        .collect();
    terms
        .iter()
        .map(|t| (visible.iter().position(|v| v == t).unwrap() + 1).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Applies a guess to `shadow` and returns the input lines that make the
/// plain interface do the same thing.
fn plan_guess(shadow: &mut PuzzleSession, terms: &[&str]) -> String {
    let line = format!("{}\nsubmit\n", tile_numbers(shadow, terms));
    for term in terms {
        let slot = slot_of(shadow, term);
        apply_action(shadow, UserAction::Toggle(slot));
    }
    apply_action(shadow, UserAction::Submit);
    line
}

fn category_terms(session: &PuzzleSession, idx: usize) -> Vec<String> {
    session.puzzle().categories[idx].terms.to_vec()
}

fn as_strs(terms: &[String]) -> Vec<&str> {
    terms.iter().map(String::as_str).collect()
}

#[test]
fn test_spec_example_correct_group() {
    let mut session = seeded(0);
    for term in ["TAXONOMY", "FRAMEWORK", "SCHEMA", "SYSTEM"] {
        let slot = slot_of(&session, term);
        session.toggle_select(slot);
    }
    assert_eq!(session.submit(), SubmitOutcome::Solved(0));
    assert!(session.solved().contains(&0));
    assert_eq!(session.message().map(|m| m.kind), Some(MessageKind::Correct));
}

#[test]
fn test_spec_example_one_from_each_category() {
    let mut session = seeded(0);
    for term in ["TAXONOMY", "CONSTRAINT", "SCOPE", "NARRATIVE"] {
        let slot = slot_of(&session, term);
        session.toggle_select(slot);
    }
    assert_eq!(session.submit(), SubmitOutcome::NotQuite);
    assert_eq!(session.mistakes(), 1);
    assert!(session.solved().is_empty());
    assert_eq!(
        session.message().map(|m| m.kind),
        Some(MessageKind::NotQuite)
    );
}

#[test]
fn test_plain_cli_full_game_win() {
    let mut shadow = seeded(0);
    let mut input = String::new();
    for idx in [2, 0, 3, 1] {
        let terms = category_terms(&shadow, idx);
        input.push_str(&plan_guess(&mut shadow, &as_strs(&terms)));
    }
    assert!(shadow.is_won());

    let mut session = seeded(0);
    let mut ui = CliInterface::new(Cursor::new(input));
    game_loop(&mut session, &mut ui);

    assert!(session.is_won());
    assert_eq!(session.solved(), &[2, 0, 3, 1]);
    assert_eq!(session.mistakes(), 0);
    assert_eq!(session.phase(), Phase::Won);
}

#[test]
fn test_plain_cli_mistakes_then_hint() {
    let mut shadow = seeded(1);
    let mut input = String::new();
    let miss = ["EXAMPLE", "CONTRAST", "REVIEW", "RUBRIC"];
    for _ in 0..4 {
        input.push_str("clear\n");
        shadow.clear_selection();
        input.push_str(&plan_guess(&mut shadow, &miss));
    }
    assert_eq!(shadow.mistakes(), 4);
    assert!(shadow.solved().is_empty());

    input.push_str("clear\n");
    shadow.clear_selection();
    let near = ["EXAMPLE", "PRINCIPLE", "CONTEXT", "STORY"];
    input.push_str(&plan_guess(&mut shadow, &near));
    assert_eq!(shadow.solved().len(), 1);

    let mut session = seeded(1);
    let mut ui = CliInterface::new(Cursor::new(input));
    game_loop(&mut session, &mut ui);

    assert_eq!(session.puzzle().id, 2);
    assert_eq!(session.mistakes(), 4);
    assert_eq!(session.solved(), shadow.solved());
    assert!(session.selected().is_empty());
    assert_eq!(
        session.message().map(|m| m.kind),
        Some(MessageKind::HintRevealed)
    );
}

#[test]
fn test_plain_cli_next_and_again() {
    let mut session = seeded(2);
    let input = "next\nagain\n";
    let mut ui = CliInterface::new(Cursor::new(input));
    game_loop(&mut session, &mut ui);

    // Puzzle 3 is the last one, so next wraps to the first.
    assert_eq!(session.puzzle_index(), 0);
    assert_eq!(session.puzzle().id, 1);
    assert_eq!(session.mistakes(), 0);
}

#[test]
fn test_plain_cli_invalid_input_then_exit() {
    let mut session = seeded(0);
    let input = "banana\n42\n\n1 2\nexit\n3\n";
    let mut ui = CliInterface::new(Cursor::new(input));
    game_loop(&mut session, &mut ui);

    // Only "1 2" applied; nothing after exit is read.
    assert_eq!(session.selected().len(), 2);
}

#[test]
fn test_plain_cli_end_of_input_exits() {
    let mut session = seeded(0);
    let mut ui = CliInterface::new(Cursor::new(""));
    game_loop(&mut session, &mut ui);
    assert!(session.selected().is_empty());
}

#[test]
fn test_plain_cli_shuffle_keeps_selection() {
    let mut session = seeded(0);
    let picked = tile_numbers(&session, &["SCOPE", "VOICE", "BRAND"]);
    let input = format!("{picked}\nshuffle\n");
    let mut ui = CliInterface::new(Cursor::new(input));
    game_loop(&mut session, &mut ui);

    let mut selected: Vec<&str> = session
        .selected()
        .iter()
        .map(|&i| session.slots()[i].term.as_str())
        .collect();
    selected.sort_unstable();
    assert_eq!(selected, vec!["BRAND", "SCOPE", "VOICE"]);
}

#[test]
fn test_fifth_selection_is_ignored() {
    let mut session = seeded(0);
    for term in ["TAXONOMY", "FRAMEWORK", "SCHEMA", "SYSTEM", "PROMPT"] {
        let slot = slot_of(&session, term);
        session.toggle_select(slot);
    }
    assert_eq!(session.selected().len(), 4);
    assert!(!session.is_selected(slot_of(&session, "PROMPT")));
}

#[test]
fn test_seeded_sessions_play_identically() {
    let mut a = seeded(0);
    let mut b = seeded(0);
    assert_eq!(a.slots(), b.slots());

    for s in [&mut a, &mut b] {
        for term in ["TAXONOMY", "CONSTRAINT", "SCOPE", "NARRATIVE"] {
            let slot = slot_of(s, term);
            s.toggle_select(slot);
        }
        for _ in 0..5 {
            s.submit();
        }
        s.shuffle();
    }
    assert_eq!(a.solved(), b.solved());
    assert_eq!(a.slots(), b.slots());
}

#[test]
fn test_advance_cycles_through_every_puzzle() {
    let mut session = seeded(0);
    let mut ids = Vec::new();
    for _ in 0..session.puzzle_count() {
        ids.push(session.puzzle().id);
        session.advance_puzzle();
    }
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(session.puzzle_index(), 0);
}

#[test]
fn test_custom_puzzle_pack() {
    let pack = vec![Puzzle {
        id: 10,
        categories: [
            Category::new("A", "first", ["A1", "A2", "A3", "A4"]),
            Category::new("B", "second", ["B1", "B2", "B3", "B4"]),
            Category::new("C", "third", ["C1", "C2", "C3", "C4"]),
            Category::new("D", "fourth", ["D1", "D2", "D3", "D4"]),
        ],
    }];
    let mut session = PuzzleSession::seeded(pack, 5, 1).unwrap();
    assert_eq!(session.puzzle().id, 10);
    session.advance_puzzle();
    assert_eq!(session.puzzle_index(), 0);
}

#[test]
fn test_invalid_pack_is_rejected() {
    let pack = vec![Puzzle {
        id: 11,
        categories: [
            Category::new("A", "first", ["X", "A2", "A3", "A4"]),
            Category::new("B", "second", ["B1", "B2", "B3", "B4"]),
            Category::new("C", "third", ["C1", "C2", "C3", "C4"]),
            Category::new("D", "fourth", ["D1", "D2", "D3", "X"]),
        ],
    }];
    assert!(matches!(
        PuzzleSession::seeded(pack, 0, 1),
        Err(ContentError::DuplicateTerm { puzzle_id: 11, .. })
    ));
}
