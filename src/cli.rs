use crate::game_state::{GameInterface, UserAction};
use crate::puzzles::{WIN_BLURB, WIN_HEADLINE};
use crate::session::PuzzleSession;
use crate::{debug_log, info_log};
use clap::Parser;
use std::collections::VecDeque;
use std::io::BufRead;

const TILES_PER_ROW: usize = 4;

/// Connections puzzle game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Puzzle to start on (1-based, wraps around the pack)
    #[arg(short = 'p', long = "puzzle", default_value_t = 1)]
    pub puzzle: usize,

    /// Seed for tile shuffling and hint picks, for reproducible sessions
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long = "plain")]
    pub plain: bool,
}

impl Cli {
    pub fn start_index(&self) -> usize {
        self.puzzle.saturating_sub(1)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandInput {
    Actions(Vec<UserAction>),
    Invalid(String),
    Empty,
}

/// Parse one line of player input. Tile numbers are 1-based positions in
/// `visible`, which maps them to slot indices.
pub fn parse_command(line: &str, visible: &[usize]) -> CommandInput {
    let input = line.trim().to_lowercase();
    if input.is_empty() {
        return CommandInput::Empty;
    }

    let action = match input.as_str() {
        "s" | "submit" => Some(UserAction::Submit),
        "shuffle" => Some(UserAction::Shuffle),
        "c" | "clear" | "reset" => Some(UserAction::ClearSelection),
        "again" => Some(UserAction::PlayAgain),
        "n" | "next" => Some(UserAction::NextPuzzle),
        "q" | "quit" | "exit" => Some(UserAction::Exit),
        _ => None,
    };
    if let Some(action) = action {
        return CommandInput::Actions(vec![action]);
    }

    let mut actions = Vec::new();
    for token in input.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        match token.parse::<usize>() {
            Ok(n) if (1..=visible.len()).contains(&n) => {
                actions.push(UserAction::Toggle(visible[n - 1]));
            }
            Ok(n) => {
                return CommandInput::Invalid(format!(
                    "No tile {n}. Pick a number from 1 to {}.",
                    visible.len()
                ));
            }
            Err(_) => return CommandInput::Invalid(format!("Unknown command '{token}'.")),
        }
    }
    CommandInput::Actions(actions)
}

pub fn format_tile(number: usize, term: &str, selected: bool) -> String {
    let label = if selected {
        format!("[{term}]")
    } else {
        format!(" {term} ")
    };
    format!("{number:>2}.{label:<16}")
}

pub fn display_board<R>(session: &PuzzleSession<R>) {
    println!(
        "\nPuzzle {} of {}",
        session.puzzle_index() + 1,
        session.puzzle_count()
    );

    for (idx, category) in session.puzzle().categories.iter().enumerate() {
        if session.solved().contains(&idx) {
            println!("== {} == {}", category.name, category.description);
            println!("   {}", category.terms.join(", "));
        }
    }

    let tiles: Vec<String> = session
        .visible_slots()
        .enumerate()
        .map(|(n, (slot, s))| format_tile(n + 1, &s.term, session.is_selected(slot)))
        .collect();
    for row in tiles.chunks(TILES_PER_ROW) {
        println!("{}", row.join(""));
    }

    if let Some(message) = session.message() {
        println!("{}", message.text());
    }
    println!("Mistakes remaining: {}", session.mistakes_remaining());

    if session.is_won() {
        println!("\n{WIN_HEADLINE}");
        println!("{WIN_BLURB}");
        println!("Type 'again' to replay or 'next' for the next puzzle.");
    }
}

pub fn display_prompt() {
    println!(
        "Enter tile numbers to toggle, or: submit, shuffle, clear, again, next, exit"
    );
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Line-based implementation of [`GameInterface`] over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<UserAction>,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<B: BufRead> GameInterface for CliInterface<B> {
    fn render<R>(&mut self, session: &PuzzleSession<R>) {
        // Several toggles typed on one line only need one redraw.
        if self.pending.is_empty() {
            display_board(session);
        }
    }

    fn read_action<R>(&mut self, session: &PuzzleSession<R>) -> Option<UserAction> {
        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        display_prompt();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                info_log!("read_action() - end of input");
                return Some(UserAction::Exit);
            }
            Ok(_) => {}
            Err(e) => {
                info_log!("read_action() - read error: {}", e);
                return Some(UserAction::Exit);
            }
        }

        let visible: Vec<usize> = session.visible_slots().map(|(slot, _)| slot).collect();
        match parse_command(&line, &visible) {
            CommandInput::Actions(actions) => {
                debug_log!("read_action() - parsed {:?}", actions);
                self.pending.extend(actions);
                self.pending.pop_front()
            }
            CommandInput::Invalid(reason) => {
                println!("{reason}");
                None
            }
            CommandInput::Empty => None,
        }
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
