// Library interface for the connections game
// This allows integration tests to access internal modules

pub mod cli;
pub mod game_state;
pub mod logging;
pub mod puzzles;
pub mod session;
pub mod tui;

// Re-export commonly used items for easier testing
pub use game_state::{GameInterface, UserAction, apply_action, game_loop};
pub use puzzles::{Category, ContentError, Puzzle, embedded_puzzles, validate_puzzles};
pub use session::{MessageKind, Phase, PuzzleSession, SubmitOutcome, TermSlot};
