use connections::cli::{CliInterface, parse_cli};
use connections::logging::{self, LogTarget};
use connections::tui::TuiInterface;
use connections::{PuzzleSession, embedded_puzzles, game_loop, info_log};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let log_target = match logging::default_log_path() {
        Some(path) if !cli.plain => LogTarget::File(path),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(log_target) {
        eprintln!("Failed to set up logging: {e}");
    }

    let puzzles = embedded_puzzles();
    let start = cli.start_index();
    let session = match cli.seed {
        Some(seed) => PuzzleSession::seeded(puzzles, start, seed),
        None => PuzzleSession::new(puzzles, start),
    };
    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid puzzle content: {e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("main() - {} puzzles loaded", session.puzzle_count());

    if cli.plain {
        game_loop(&mut session, CliInterface::new(io::stdin().lock()));
        return ExitCode::SUCCESS;
    }

    match TuiInterface::new() {
        Ok(tui) => {
            game_loop(&mut session, tui);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to start the terminal interface: {e}");
            eprintln!("Try again with --plain.");
            ExitCode::FAILURE
        }
    }
}
