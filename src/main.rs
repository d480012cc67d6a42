use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use matchday_terminal::controller::Controller;
use matchday_terminal::fetch;
use matchday_terminal::render;
use matchday_terminal::state::{AppState, Delta, View};

struct App {
    controller: Controller,
    should_quit: bool,
}

impl App {
    fn new(controller: Controller) -> Self {
        Self {
            controller,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.controller.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.controller.state.select_prev(),
            KeyCode::Enter | KeyCode::Char('d') => match self.controller.state.view {
                View::Competitions => self.controller.select_competition(),
                View::Fixtures => self.controller.select_fixture(),
                View::Details => {}
            },
            KeyCode::Char('b') | KeyCode::Esc => self.controller.go_back(),
            KeyCode::Char('r') => self.controller.refresh(),
            KeyCode::Char('?') => {
                self.controller.state.help_overlay = !self.controller.state.help_overlay;
            }
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    fetch::spawn_provider(tx, cmd_rx);

    let mut app = App::new(Controller::new(Some(cmd_tx)));
    app.controller.initialize();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            app.controller.apply(delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let state = &app.controller.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    if state.is_loading() {
        render_loading(frame, chunks[1]);
    } else if let Some(message) = &state.error {
        render_error(frame, chunks[1], message);
    } else {
        match state.view {
            View::Competitions => render_competitions(frame, chunks[1], state),
            View::Fixtures => render_fixtures(frame, chunks[1], state),
            View::Details => render_details(frame, chunks[1], state),
        }
    }

    let footer = Paragraph::new(footer_text(state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.view {
        View::Competitions => "MATCHDAY | Competitions",
        View::Fixtures => "MATCHDAY | Fixtures",
        View::Details => "MATCHDAY | Match Details",
    };
    format!("{}\n{}", title, render::subtitle(state))
}

fn footer_text(state: &AppState) -> String {
    let hints = render::footer_hints(state.view);
    match state.last_log() {
        Some(line) => format!("{hints}  |  {line}"),
        None => hints.to_string(),
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(loading, area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let error = Paragraph::new(format!("Error: {message}"))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false });
    frame.render_widget(error, area);
}

fn render_competitions(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = render::competition_rows(state);
    if rows.is_empty() {
        let empty = Paragraph::new(render::EMPTY_COMPETITIONS_MESSAGE)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    if area.height == 0 {
        return;
    }
    let visible = area.height as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + i as u16,
            width: area.width,
            height: 1,
        };
        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(competition_columns())
            .split(row_area);

        let row = &rows[idx];
        render_cell_text(frame, cols[0], &row.name, row_style);
        render_cell_text(frame, cols[1], &row.country, row_style);
        render_cell_text(
            frame,
            cols[2],
            &row.emblem,
            row_style.fg(Color::DarkGray),
        );
    }
}

fn competition_columns() -> [Constraint; 3] {
    [
        Constraint::Length(30),
        Constraint::Length(18),
        Constraint::Min(10),
    ]
}

fn render_fixtures(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.fixtures.is_empty() {
        let empty = Paragraph::new(render::EMPTY_FIXTURES_MESSAGE)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let days = render::fixture_days(&state.fixtures);
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    for day in &days {
        lines.push(Line::from(Span::styled(
            day.date_label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for row in &day.rows {
            let selected = row.index == state.selected;
            if selected {
                selected_line = lines.len();
            }
            let style = if selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("  {:<6} {} vs {}", row.time, row.home_name, row.away_name),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    if area.height == 0 {
        return;
    }
    let visible = area.height as usize;
    let max_start = lines.len().saturating_sub(visible);
    let start = selected_line.saturating_sub(visible / 2).min(max_start);
    let window: Vec<Line> = lines.into_iter().skip(start).take(visible).collect();
    frame.render_widget(Paragraph::new(window), area);
}

fn render_details(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(header) = render::details_header(state) {
        lines.push(Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    match &state.details {
        Some(details) => {
            lines.push(section_heading("Prediction"));
            for line in render::prediction_lines(&details.prediction) {
                lines.push(Line::from(line));
            }
            lines.push(Line::from(""));
            lines.push(section_heading("News"));
            for line in render::news_lines(details) {
                lines.push(Line::from(line));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No details available.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(details, area);
}

fn section_heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchday Terminal - Help",
        "",
        "Global:",
        "  Enter / d    Open selection",
        "  b / Esc      Back",
        "  j/k or ↑/↓   Move",
        "  r            Refresh current view",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Views:",
        "  Competitions → Fixtures → Match Details",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
