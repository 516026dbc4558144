use crate::session::{PuzzleSession, SubmitOutcome};
use crate::{debug_log, info_log};
use rand::Rng;
use std::time::Instant;

/// Player intent, as produced by an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Toggle(usize),
    Submit,
    Shuffle,
    ClearSelection,
    PlayAgain,
    NextPuzzle,
    Exit,
}

/// A presentation layer the game loop can drive.
///
/// `read_action` returns `None` when there is nothing to apply yet
/// (invalid input, poll timeout); the loop simply renders again.
pub trait GameInterface {
    fn render<R>(&mut self, session: &PuzzleSession<R>);
    fn read_action<R>(&mut self, session: &PuzzleSession<R>) -> Option<UserAction>;
    fn display_exit_message(&mut self) {}
}

impl<T: GameInterface> GameInterface for &mut T {
    fn render<R>(&mut self, session: &PuzzleSession<R>) {
        (**self).render(session);
    }

    fn read_action<R>(&mut self, session: &PuzzleSession<R>) -> Option<UserAction> {
        (**self).read_action(session)
    }

    fn display_exit_message(&mut self) {
        (**self).display_exit_message();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub fn game_loop<R: Rng, I: GameInterface>(session: &mut PuzzleSession<R>, mut interface: I) {
    info_log!("game_loop() - starting on puzzle {}", session.puzzle().id);
    loop {
        session.expire_message(Instant::now());
        interface.render(&*session);

        let Some(action) = interface.read_action(&*session) else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        if let LoopControl::Exit = apply_action(session, action) {
            interface.display_exit_message();
            break;
        }
    }
}

/// Apply a single action to the session.
pub fn apply_action<R: Rng>(session: &mut PuzzleSession<R>, action: UserAction) -> LoopControl {
    match action {
        UserAction::Toggle(slot) => session.toggle_select(slot),
        UserAction::Submit => {
            if let SubmitOutcome::Ignored = session.submit() {
                debug_log!("apply_action() - submit ignored");
            }
        }
        UserAction::Shuffle => session.shuffle(),
        UserAction::ClearSelection => session.clear_selection(),
        UserAction::PlayAgain => session.restart(),
        UserAction::NextPuzzle => session.advance_puzzle(),
        UserAction::Exit => return LoopControl::Exit,
    }
    LoopControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles::embedded_puzzles;
    use crate::puzzles::CATEGORIES_PER_PUZZLE;
    use std::collections::VecDeque;

    /// Feeds a fixed list of actions and counts renders.
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        renders: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                renders: 0,
                exited: false,
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn render<R>(&mut self, _session: &PuzzleSession<R>) {
            self.renders += 1;
        }

        fn read_action<R>(&mut self, _session: &PuzzleSession<R>) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn session() -> PuzzleSession {
        PuzzleSession::seeded(embedded_puzzles(), 0, 7).unwrap()
    }

    fn slots_for(session: &PuzzleSession, category: usize) -> Vec<usize> {
        session
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.category == category)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let mut s = session();
        let mut ui = ScriptedInterface::new(vec![Some(UserAction::Exit)]);
        game_loop(&mut s, &mut ui);
        assert!(ui.exited);
        assert_eq!(ui.renders, 1);
    }

    #[test]
    fn test_game_loop_skips_empty_reads() {
        let mut s = session();
        let mut ui = ScriptedInterface::new(vec![None, None, Some(UserAction::Exit)]);
        game_loop(&mut s, &mut ui);
        assert_eq!(ui.renders, 3);
    }

    #[test]
    fn test_game_loop_solves_group() {
        let mut s = session();
        let mut script: Vec<Option<UserAction>> = slots_for(&s, 1)
            .into_iter()
            .map(|i| Some(UserAction::Toggle(i)))
            .collect();
        script.push(Some(UserAction::Submit));
        let mut ui = ScriptedInterface::new(script);
        game_loop(&mut s, &mut ui);
        assert_eq!(s.solved(), &[1]);
        assert!(ui.exited);
    }

    #[test]
    fn test_apply_action_exit() {
        let mut s = session();
        assert_eq!(apply_action(&mut s, UserAction::Exit), LoopControl::Exit);
        assert_eq!(
            apply_action(&mut s, UserAction::Shuffle),
            LoopControl::Continue
        );
    }

    #[test]
    fn test_apply_action_clear_and_submit_ignored() {
        let mut s = session();
        apply_action(&mut s, UserAction::Toggle(0));
        apply_action(&mut s, UserAction::Submit);
        assert_eq!(s.selected(), &[0]);
        assert_eq!(s.mistakes(), 0);
        apply_action(&mut s, UserAction::ClearSelection);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_apply_action_play_again_and_next() {
        let mut s = session();
        for cat in 0..CATEGORIES_PER_PUZZLE {
            let slot = slots_for(&s, cat)[0];
            apply_action(&mut s, UserAction::Toggle(slot));
        }
        apply_action(&mut s, UserAction::Submit);
        assert_eq!(s.mistakes(), 1);

        apply_action(&mut s, UserAction::PlayAgain);
        assert_eq!(s.mistakes(), 0);
        assert_eq!(s.puzzle_index(), 0);

        apply_action(&mut s, UserAction::NextPuzzle);
        assert_eq!(s.puzzle_index(), 1);
    }
}
