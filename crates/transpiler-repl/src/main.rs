//! sqlmongo - SQL to MongoDB transpiler front end
//!
//! Runs one query with -e/-f, otherwise starts an interactive terminal UI.

mod cli;
mod phase;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{CliArgs, run_non_interactive};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use phase::{OutputFormat, Phase, run_phase};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use tracing_subscriber::EnvFilter;
use transpiler::Transpiler;

struct App {
    transpiler: Option<Transpiler>,
    mode: Phase,
    input: String,
    /// Cursor position in chars, not bytes
    cursor_pos: usize,
    history: Vec<HistoryEntry>,
    scroll_offset: usize,
    show_help: bool,
}

struct HistoryEntry {
    mode: Phase,
    query: String,
    result: String,
    is_error: bool,
}

impl App {
    fn new(transpiler: Option<Transpiler>) -> Self {
        Self {
            transpiler,
            mode: Phase::Mongo,
            input: String::new(),
            cursor_pos: 0,
            history: Vec::new(),
            scroll_offset: 0,
            show_help: false,
        }
    }

    fn execute_query(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }

        let query = self.input.clone();
        let (result, is_error) = match run_phase(
            self.mode,
            &query,
            self.transpiler.as_ref(),
            OutputFormat::Shell,
        ) {
            Ok(output) => (output, false),
            Err(e) => (e.to_string(), true),
        };

        self.history.push(HistoryEntry {
            mode: self.mode,
            query,
            result,
            is_error,
        });

        self.input.clear();
        self.cursor_pos = 0;
        self.scroll_offset = 0;
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_pos);
        self.input.insert(at, c);
        self.cursor_pos += 1;
    }

    fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_offset(self.cursor_pos);
            self.input.remove(at);
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor_pos < self.input_len() {
            let at = self.byte_offset(self.cursor_pos);
            self.input.remove(at);
        }
    }

    fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.input_len() {
            self.cursor_pos += 1;
        }
    }

    fn move_cursor_start(&mut self) {
        self.cursor_pos = 0;
    }

    fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_len();
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }
}

fn mode_color(mode: Phase) -> Color {
    match mode {
        Phase::Tokens => Color::Magenta,
        Phase::Ast => Color::Yellow,
        Phase::Mongo => Color::Cyan,
    }
}

fn init_tracing() {
    // stderr only; stdout carries query results
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    if args.is_non_interactive() {
        init_tracing();
        std::process::exit(run_non_interactive(&args));
    }

    let transpiler = args.load_transpiler().context("failed to load schema")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(transpiler);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }

            match (key.code, key.modifiers) {
                // Exit
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Ok(()),
                (KeyCode::Char('d'), KeyModifiers::CONTROL) if app.input.is_empty() => {
                    return Ok(());
                }

                // Cycle phase
                (KeyCode::Tab, _) => app.mode = app.mode.next(),

                (KeyCode::Enter, _) => app.execute_query(),

                // Help
                (KeyCode::F(1), _) => app.show_help = true,

                // Cursor movement
                (KeyCode::Left, _) => app.move_cursor_left(),
                (KeyCode::Right, _) => app.move_cursor_right(),
                (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                    app.move_cursor_start()
                }
                (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                    app.move_cursor_end()
                }

                // Editing
                (KeyCode::Backspace, _) => app.delete_char(),
                (KeyCode::Delete, _) => app.delete_char_forward(),
                (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.clear_input(),

                // Scrolling history
                (KeyCode::Up, _) | (KeyCode::PageUp, _) => {
                    if app.scroll_offset < app.history.len().saturating_sub(1) {
                        app.scroll_offset += 1;
                    }
                }
                (KeyCode::Down, _) | (KeyCode::PageDown, _) => {
                    app.scroll_offset = app.scroll_offset.saturating_sub(1);
                }

                (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                    app.insert_char(c);
                }

                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // History
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let schema_note = match &app.transpiler {
        Some(t) => format!(" {} table(s) loaded", t.schema().len()),
        None => " no schema".to_string(),
    };
    let title = Line::from(vec![
        Span::raw(" sqlmongo "),
        Span::styled(
            format!("[{}]", app.mode.name()),
            Style::default()
                .fg(mode_color(app.mode))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" -{} - Tab cycles phases, F1 for help", schema_note)),
    ]);
    let title_bar =
        Paragraph::new(title).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(title_bar, chunks[0]);

    render_history(f, app, chunks[1]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(mode_color(app.mode)))
        .title(format!(" SQL -> {} ", app.mode.name()));

    let input_area = input_block.inner(chunks[2]);
    f.render_widget(input_block, chunks[2]);

    let input_text = Paragraph::new(app.input.as_str());
    f.render_widget(input_text, input_area);

    f.set_cursor_position((input_area.x + app.cursor_pos as u16, input_area.y));

    let status = Line::from(vec![
        Span::styled(" Ctrl+C ", Style::default().bg(Color::DarkGray)),
        Span::raw(" Exit "),
        Span::styled(" Tab ", Style::default().bg(Color::DarkGray)),
        Span::raw(" Next phase "),
        Span::styled(" Enter ", Style::default().bg(Color::DarkGray)),
        Span::raw(" Run "),
        Span::styled(" ↑/↓ ", Style::default().bg(Color::DarkGray)),
        Span::raw(" Scroll "),
    ]);
    f.render_widget(Paragraph::new(status), chunks[3]);

    if app.show_help {
        render_help_popup(f);
    }
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" History ");

    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.history.is_empty() {
        let example = Style::default().fg(Color::Cyan);
        let welcome = Text::from(vec![
            Line::from(""),
            Line::from("  Welcome to sqlmongo!"),
            Line::from(""),
            Line::from("  Type a SELECT statement below and press Enter."),
            Line::from("  Press Tab to choose how far the query is taken."),
            Line::from(""),
            Line::from("  Examples:"),
            Line::styled("    SELECT * FROM users;", example),
            Line::styled("    SELECT name, age FROM users WHERE age > 18;", example),
            Line::styled(
                "    SELECT * FROM users WHERE a = 1 OR b = 2 AND c = 3;",
                example,
            ),
        ]);
        f.render_widget(Paragraph::new(welcome), inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    for entry in app.history.iter().rev().skip(app.scroll_offset) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", entry.mode.name()),
                Style::default()
                    .fg(mode_color(entry.mode))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(&entry.query, Style::default().fg(Color::Yellow)),
        ]));

        let result_style = if entry.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        for line in entry.result.lines() {
            lines.push(Line::styled(format!("  {}", line), result_style));
        }

        lines.push(Line::from(""));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, inner);
}

fn render_help_popup(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());

    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        Line::styled("sqlmongo Help", Style::default().add_modifier(Modifier::BOLD)).centered(),
        Line::from(""),
        Line::from("  Keybindings:"),
        Line::from(""),
        Line::from("    Tab          Cycle Tokens -> AST -> MongoDB"),
        Line::from("    Enter        Run query"),
        Line::from("    Ctrl+C       Exit"),
        Line::from("    Ctrl+D       Exit (when input is empty)"),
        Line::from("    ↑/↓          Scroll through history"),
        Line::from("    Ctrl+A/Home  Move cursor to start"),
        Line::from("    Ctrl+E/End   Move cursor to end"),
        Line::from("    Ctrl+U       Clear input"),
        Line::from("    F1           Show this help"),
        Line::from(""),
        Line::from("  Grammar:"),
        Line::from("    SELECT * | col, ... FROM table [WHERE cond];"),
        Line::from("    cond: col op value, joined with AND / OR"),
        Line::from("    op: =  !=  >  <  >=  <="),
        Line::from(""),
        Line::from("  The MongoDB phase needs a schema (--schema FILE)."),
        Line::from(""),
        Line::styled(
            "  Press any key to close",
            Style::default().fg(Color::DarkGray),
        )
        .centered(),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
