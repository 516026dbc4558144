//! TUI (Terminal User Interface) module for the Connections game
//!
//! This module provides a full-screen interface using Ratatui.
//!
//! # Layout
//! Title, solved category bands, the 4-wide grid of remaining tiles, a status
//! line (message, mistakes, puzzle number), the win panel once every group is
//! found, and a key help line.
//!
//! # Input
//! - Playing: arrows/hjkl move, SPACE toggles, ENTER submits, R shuffles, C clears
//! - Won: P plays again, N moves to the next puzzle
//! - ESC/Q quits in either state

use crate::game_state::{GameInterface, UserAction};
use crate::puzzles::{Puzzle, WIN_BLURB, WIN_HEADLINE};
use crate::session::{MAX_SELECTION, MessageKind, PuzzleSession};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const GRID_COLUMNS: usize = 4;
const TILE_HEIGHT: u16 = 3;
const BAND_HEIGHT: u16 = 4;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const TILE_STYLE: Style = Style::new().fg(Color::White);
const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::White)
    .add_modifier(Modifier::BOLD);
const CURSOR_BORDER_STYLE: Style = Style::new().fg(Color::Yellow);
const TILE_BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

const CATEGORY_COLORS: [Color; 4] = [Color::Blue, Color::Green, Color::Yellow, Color::Magenta];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

/// New cursor position within a grid of `len` tiles laid out
/// `GRID_COLUMNS` wide. Moves that would leave the grid are ignored.
pub fn move_cursor(cursor: usize, len: usize, direction: Move) -> usize {
    if len == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1);
    match direction {
        Move::Left => cursor.saturating_sub(1),
        Move::Right if cursor + 1 < len => cursor + 1,
        Move::Up if cursor >= GRID_COLUMNS => cursor - GRID_COLUMNS,
        Move::Down if cursor + GRID_COLUMNS < len => cursor + GRID_COLUMNS,
        _ => cursor,
    }
}

pub fn category_color(category: usize) -> Color {
    CATEGORY_COLORS[category % CATEGORY_COLORS.len()]
}

/// What a key press means for the interface.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyResult {
    Action(UserAction),
    Cursor(Move),
    ToggleAtCursor,
    Error(&'static str),
    Ignored,
}

pub fn interpret_key(key: KeyEvent, won: bool) -> KeyResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyResult::Action(UserAction::Exit);
    }
    if key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    {
        return KeyResult::Ignored;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => KeyResult::Action(UserAction::Exit),
        KeyCode::Char('p' | 'P') if won => KeyResult::Action(UserAction::PlayAgain),
        KeyCode::Char('n' | 'N') if won => KeyResult::Action(UserAction::NextPuzzle),
        _ if won => KeyResult::Ignored,
        KeyCode::Left | KeyCode::Char('h') => KeyResult::Cursor(Move::Left),
        KeyCode::Right | KeyCode::Char('l') => KeyResult::Cursor(Move::Right),
        KeyCode::Up | KeyCode::Char('k') => KeyResult::Cursor(Move::Up),
        KeyCode::Down | KeyCode::Char('j') => KeyResult::Cursor(Move::Down),
        KeyCode::Char(' ') => KeyResult::ToggleAtCursor,
        KeyCode::Enter | KeyCode::Char('s' | 'S') => KeyResult::Action(UserAction::Submit),
        KeyCode::Char('r' | 'R') => KeyResult::Action(UserAction::Shuffle),
        KeyCode::Char('c' | 'C') => KeyResult::Action(UserAction::ClearSelection),
        KeyCode::Char(_) => KeyResult::Error("Unknown key - see the help line below"),
        _ => KeyResult::Ignored,
    }
}

struct Tile<'a> {
    term: &'a str,
    selected: bool,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    puzzle: &'a Puzzle,
    puzzle_number: usize,
    puzzle_count: usize,
    solved: Vec<usize>,
    tiles: Vec<Tile<'a>>,
    cursor: usize,
    message: Option<MessageKind>,
    mistakes_remaining: usize,
    won: bool,
    error_message: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input handling for one game session.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    cursor: usize,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            cursor: 0,
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw<R>(&mut self, session: &PuzzleSession<R>) -> Result<(), io::Error> {
        let tiles: Vec<Tile> = session
            .visible_slots()
            .map(|(slot, s)| Tile {
                term: &s.term,
                selected: session.is_selected(slot),
            })
            .collect();
        self.cursor = self.cursor.min(tiles.len().saturating_sub(1));

        let mut solved = session.solved().to_vec();
        solved.sort_unstable();

        let ctx = RenderContext {
            puzzle: session.puzzle(),
            puzzle_number: session.puzzle_index() + 1,
            puzzle_count: session.puzzle_count(),
            solved,
            tiles,
            cursor: self.cursor,
            message: session.message().map(|m| m.kind),
            mistakes_remaining: session.mistakes_remaining(),
            won: session.is_won(),
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log<R>(&mut self, session: &PuzzleSession<R>) {
        if let Err(e) = self.draw(session) {
            debug_log!("Draw error: {}", e);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let grid_rows = ctx.tiles.len().div_ceil(GRID_COLUMNS) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),                                     // Title
                Constraint::Length(ctx.solved.len() as u16 * BAND_HEIGHT), // Solved bands
                Constraint::Length(grid_rows * TILE_HEIGHT),               // Tiles
                Constraint::Length(3),                                     // Status line
                Constraint::Min(0),                                        // Win panel
                Constraint::Length(3),                                     // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_solved(f, chunks[1], ctx);
        Self::render_grid(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx);
        if ctx.won {
            Self::render_win(f, chunks[4]);
        }
        Self::render_instructions(f, chunks[5], ctx.won);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("STRUCTURE YOUR THINKING", HEADER_STYLE)),
            Line::from("Find the four groups. Refine your methodology."),
        ];
        let title = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_solved(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        if ctx.solved.is_empty() {
            return;
        }
        let bands = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(BAND_HEIGHT); ctx.solved.len()])
            .split(area);

        for (band, &idx) in bands.iter().zip(&ctx.solved) {
            let category = &ctx.puzzle.categories[idx];
            let style = Style::new().fg(Color::Black).bg(category_color(idx));
            let lines = vec![
                Line::from(Span::styled(
                    category.name.as_str(),
                    Style::new().add_modifier(Modifier::BOLD),
                )),
                Line::from(category.description.as_str()),
                Line::from(category.terms.join("  ")),
            ];
            let paragraph = Paragraph::new(lines)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, *band);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_grid(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let row_count = ctx.tiles.len().div_ceil(GRID_COLUMNS);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(TILE_HEIGHT); row_count])
            .split(area);

        for (row_index, (row_area, row_tiles)) in
            rows.iter().zip(ctx.tiles.chunks(GRID_COLUMNS)).enumerate()
        {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(*row_area);

            for (col, tile) in row_tiles.iter().enumerate() {
                let position = row_index * GRID_COLUMNS + col;
                let border_style = if position == ctx.cursor {
                    CURSOR_BORDER_STYLE
                } else {
                    TILE_BORDER_STYLE
                };
                let style = if tile.selected {
                    SELECTED_STYLE
                } else {
                    TILE_STYLE
                };
                let paragraph = Paragraph::new(tile.term)
                    .style(style)
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(border_style),
                    );
                f.render_widget(paragraph, cells[col]);
            }
        }
    }

    fn render_status(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut spans = Vec::new();
        if let Some(kind) = ctx.message {
            let style = if kind == MessageKind::Correct {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            spans.push(Span::styled(kind.text(), style));
            spans.push(Span::raw("   "));
        }
        if !ctx.error_message.is_empty() {
            spans.push(Span::styled(ctx.error_message, ERROR_STYLE));
            spans.push(Span::raw("   "));
        }
        spans.push(Span::raw("Mistakes remaining: "));
        spans.push(Span::styled(
            ctx.mistakes_remaining.to_string(),
            Style::new().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(
            "   Puzzle {} of {}",
            ctx.puzzle_number, ctx.puzzle_count
        )));

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_win(f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(WIN_HEADLINE, SUCCESS_STYLE)),
            Line::from(""),
            Line::from(WIN_BLURB),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, won: bool) {
        let text = if won {
            "P: Play Again | N: Next Puzzle | ESC: Quit"
        } else {
            "ARROWS: Move | SPACE: Select | ENTER: Submit | R: Shuffle | C: Clear | ESC: Quit"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input<R>(
        &mut self,
        session: &PuzzleSession<R>,
    ) -> Result<Option<UserAction>, io::Error> {
        // Return on timeout so the game loop can expire the status message.
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(None);
        };
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        debug_log!("handle_input() - Key event: {:?}", key.code);
        self.error_message.clear();

        let visible: Vec<usize> = session.visible_slots().map(|(slot, _)| slot).collect();
        match interpret_key(key, session.is_won()) {
            KeyResult::ToggleAtCursor => {
                Ok(visible.get(self.cursor).map(|&slot| UserAction::Toggle(slot)))
            }
            KeyResult::Action(UserAction::Submit) if !session.can_submit() => {
                self.error_message = format!("Select {MAX_SELECTION} terms to submit");
                Ok(None)
            }
            KeyResult::Action(action) => Ok(Some(action)),
            KeyResult::Cursor(direction) => {
                self.cursor = move_cursor(self.cursor, visible.len(), direction);
                Ok(None)
            }
            KeyResult::Error(message) => {
                self.error_message = message.to_string();
                Ok(None)
            }
            KeyResult::Ignored => Ok(None),
        }
    }
}

impl GameInterface for TuiInterface {
    fn render<R>(&mut self, session: &PuzzleSession<R>) {
        self.draw_or_log(session);
    }

    fn read_action<R>(&mut self, session: &PuzzleSession<R>) -> Option<UserAction> {
        match self.handle_input(session) {
            Ok(Some(action)) => {
                info_log!("read_action() - Action received: {:?}", action);
                if matches!(action, UserAction::PlayAgain | UserAction::NextPuzzle) {
                    self.cursor = 0;
                }
                Some(action)
            }
            Ok(None) => None,
            Err(e) => {
                info_log!("read_action() - Error handling input, exiting: {}", e);
                Some(UserAction::Exit)
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
