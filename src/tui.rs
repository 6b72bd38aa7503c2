use crate::client::{SearchQuery, SpotifyClient};
use crate::filter::FilterSelection;
use crate::session::DashboardSession;
use crate::view::DashboardView;
use crate::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

/// Month selector display names. The charts themselves use the short
/// [`MONTH_LABELS`](crate::view::MONTH_LABELS).
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Loading,
    Dashboard,
    Error(String),
}

/// State for the terminal dashboard.
///
/// The app owns the session and the two selector cursors. Every cursor change
/// rebuilds a fresh [`FilterSelection`] and the next draw recomputes the whole
/// view from it; nothing about a filtered view is cached between frames.
pub struct DashboardApp {
    pub session: DashboardSession,
    pub genre_options: Vec<String>,
    pub genre_cursor: Option<usize>,
    pub month_cursor: Option<usize>,
    pub mode: AppMode,
    pub status_message: String,
}

impl DashboardApp {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            session: DashboardSession::new(query),
            genre_options: Vec::new(),
            genre_cursor: None,
            month_cursor: None,
            mode: AppMode::Loading,
            status_message: String::new(),
        }
    }

    pub async fn load(&mut self, client: &dyn SpotifyClient) {
        self.mode = AppMode::Loading;
        match self.session.load(client).await {
            Ok(count) => {
                self.genre_options = self.session.genre_options();
                self.mode = AppMode::Dashboard;
                self.status_message = format!("{count} tracks loaded");
            }
            Err(e) => {
                // the session stayed unloaded; no partial dashboard
                self.mode = AppMode::Error(format!("Failed to load dashboard: {e}"));
            }
        }
    }

    /// The selection described by the current cursor positions.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            genre: self.genre_cursor.map(|i| self.genre_options[i].clone()),
            month: self.month_cursor.map(|m| m as u32),
        }
    }

    pub fn current_view(&self) -> Option<DashboardView> {
        self.session.view(&self.selection())
    }

    fn cycle_genre(&mut self, forward: bool) {
        if self.genre_options.is_empty() {
            return;
        }
        let last = self.genre_options.len() - 1;
        self.genre_cursor = match (self.genre_cursor, forward) {
            (None, true) => Some(0),
            (Some(i), true) if i == last => None,
            (Some(i), true) => Some(i + 1),
            (None, false) => Some(last),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }

    fn cycle_month(&mut self, forward: bool) {
        self.month_cursor = match (self.month_cursor, forward) {
            (None, true) => Some(0),
            (Some(11), true) => None,
            (Some(i), true) => Some(i + 1),
            (None, false) => Some(11),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }

    fn clear_filters(&mut self) {
        self.genre_cursor = None;
        self.month_cursor = None;
    }

    /// Handle a key press; returns `true` when the app should quit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        match self.mode {
            AppMode::Dashboard => self.handle_dashboard_keys(key),
            AppMode::Loading => false,
            AppMode::Error(_) => matches!(key.code, KeyCode::Char('q') | KeyCode::Esc),
        }
    }

    fn handle_dashboard_keys(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Char('l') => self.cycle_genre(true),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_genre(false),
            KeyCode::Down | KeyCode::Char('j') => self.cycle_month(true),
            KeyCode::Up | KeyCode::Char('k') => self.cycle_month(false),
            KeyCode::Char('c') => self.clear_filters(),
            _ => {}
        }
        false
    }

    fn genre_label(&self) -> &str {
        match self.genre_cursor {
            Some(i) => &self.genre_options[i],
            None => "All",
        }
    }

    fn month_label(&self) -> &str {
        match self.month_cursor {
            Some(m) => MONTH_NAMES[m],
            None => "All",
        }
    }
}

pub fn render_ui(f: &mut Frame, app: &DashboardApp) {
    let size = f.area();

    match &app.mode {
        AppMode::Loading => render_loading_screen(f, size),
        AppMode::Error(error) => render_error_screen(f, size, error),
        AppMode::Dashboard => render_dashboard(f, app, size),
    }
}

fn render_loading_screen(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title("Loading")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new("Loading track data...\n\nPlease wait...")
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let centered = centered_rect(60, 20, area);
    f.render_widget(paragraph, centered);
}

fn render_error_screen(f: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(format!("{error}\n\nPress r to retry, q to quit"))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let centered = centered_rect(80, 30, area);
    f.render_widget(paragraph, centered);
}

fn render_dashboard(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let view = match app.current_view() {
        Some(view) => view,
        None => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter bar
            Constraint::Percentage(50), // Popularity chart
            Constraint::Min(0),    // Genre + month charts
            Constraint::Length(3), // Help
        ])
        .split(area);

    render_filter_bar(f, app, chunks[0]);
    render_popularity_chart(f, &view, chunks[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    render_genre_chart(f, &view, bottom[0]);
    render_month_chart(f, &view, bottom[1]);

    let help_text = "←/→: Genre  ↑/↓: Month  c: Clear filters  r: Reload  q: Quit";
    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

fn render_filter_bar(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let text = format!(
        "Genre: [{}]   Month: [{}]   {}",
        app.genre_label(),
        app.month_label(),
        app.status_message
    );
    let bar = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Spotify Stats - {}", app.session.query().query)),
    );
    f.render_widget(bar, area);
}

fn render_popularity_chart(f: &mut Frame, view: &DashboardView, area: Rect) {
    let bars: Vec<Bar> = view
        .popularity
        .iter()
        .map(|(name, popularity)| {
            Bar::default()
                .label(Line::from(truncate_label(name, 16)))
                .value(u64::from(*popularity))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Track Popularity ({} tracks)", view.popularity.len())),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));
    f.render_widget(chart, area);
}

fn render_genre_chart(f: &mut Frame, view: &DashboardView, area: Rect) {
    let bars: Vec<Bar> = view
        .genres
        .iter()
        .map(|(genre, count)| {
            Bar::default()
                .label(Line::from(truncate_label(genre, 16)))
                .value(count as u64)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Genre Distribution"),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Magenta))
        .value_style(Style::default().fg(Color::Black).bg(Color::Magenta));
    f.render_widget(chart, area);
}

fn render_month_chart(f: &mut Frame, view: &DashboardView, area: Rect) {
    let data: Vec<(&str, u64)> = view
        .months
        .iter()
        .map(|(label, count)| (*label, *count as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Monthly Releases"),
        )
        .data(BarGroup::from(&data[..]))
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, area);
}

fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let truncated: String = label.chars().take(max.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
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

/// Run the interactive dashboard until the user quits.
///
/// Sets up the terminal, loads the session, then drives the draw/input loop.
/// Filter changes recompute synchronously on the next draw; `r` resets the
/// session and reloads.
pub async fn run_dashboard(client: &dyn SpotifyClient, query: SearchQuery) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardApp::new(query);
    app.load(client).await;

    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|f| render_ui(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key_event(key) {
                    should_quit = true;
                    continue;
                }
                if key.code == KeyCode::Char('r') && app.mode != AppMode::Loading {
                    app.session.reset();
                    app.clear_filters();
                    app.load(client).await;
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_genres(genres: &[&str]) -> DashboardApp {
        let mut app = DashboardApp::new(SearchQuery::default());
        app.genre_options = genres.iter().map(|g| g.to_string()).collect();
        app.mode = AppMode::Dashboard;
        app
    }

    #[test]
    fn test_genre_cursor_cycles_through_all() {
        let mut app = app_with_genres(&["Pop", "Rock"]);
        assert_eq!(app.selection(), FilterSelection::none());

        app.cycle_genre(true);
        assert_eq!(app.selection().genre.as_deref(), Some("Pop"));
        app.cycle_genre(true);
        assert_eq!(app.selection().genre.as_deref(), Some("Rock"));
        app.cycle_genre(true);
        assert_eq!(app.selection().genre, None);

        // and backwards wraps to the last option
        app.cycle_genre(false);
        assert_eq!(app.selection().genre.as_deref(), Some("Rock"));
    }

    #[test]
    fn test_month_cursor_wraps_at_december() {
        let mut app = app_with_genres(&[]);
        app.cycle_month(false);
        assert_eq!(app.selection().month, Some(11));
        app.cycle_month(true);
        assert_eq!(app.selection().month, None);
    }

    #[test]
    fn test_clear_filters_builds_unrestricted_selection() {
        let mut app = app_with_genres(&["Pop"]);
        app.cycle_genre(true);
        app.cycle_month(true);
        assert!(!app.selection().is_unrestricted());

        app.clear_filters();
        assert!(app.selection().is_unrestricted());
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 16), "short");
        assert_eq!(truncate_label("a very long track name", 8), "a very …");
    }
}
