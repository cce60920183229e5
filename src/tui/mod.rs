//! Ratatui-based terminal form.
//!
//! One screen: language / country / platform / category selectors, the four
//! numeric inputs, and Calculate / Save as TXT actions. All work is delegated
//! to a [`QuoteSession`]; this module only handles keys and drawing.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::warn;

use crate::app::QuoteSession;
use crate::domain::{Category, Country, LabelKey, Language, Platform, QuoteForm};
use crate::error::AppError;
use crate::gateway::{RateSource, Translator};

/// Start the TUI.
pub fn run<R: RateSource, T: Translator>(session: QuoteSession<R, T>, language: Language) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session);
    if language != Language::BASE {
        app.set_language(language);
    }
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Rows of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Language,
    Country,
    Platform,
    Category,
    Hours,
    Profit,
    Lines,
    Files,
    Calculate,
    Save,
}

impl Field {
    const ALL: [Field; 10] = [
        Field::Language,
        Field::Country,
        Field::Platform,
        Field::Category,
        Field::Hours,
        Field::Profit,
        Field::Lines,
        Field::Files,
        Field::Calculate,
        Field::Save,
    ];

    fn label_key(self) -> LabelKey {
        match self {
            Field::Language => LabelKey::SelectLanguage,
            Field::Country => LabelKey::Country,
            Field::Platform => LabelKey::Platform,
            Field::Category => LabelKey::Category,
            Field::Hours => LabelKey::Hours,
            Field::Profit => LabelKey::Profit,
            Field::Lines => LabelKey::Lines,
            Field::Files => LabelKey::Files,
            Field::Calculate => LabelKey::Calculate,
            Field::Save => LabelKey::SaveTxt,
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Field::Hours | Field::Profit | Field::Lines | Field::Files)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

struct App<R, T> {
    session: QuoteSession<R, T>,
    selected: usize,
    language_idx: usize,
    country_idx: usize,
    platform_idx: usize,
    category_idx: usize,
    hours: String,
    profit: String,
    lines: String,
    files: String,
    /// `Some` while the save-path prompt is open.
    save_path: Option<String>,
    status: String,
    status_kind: StatusKind,
}

impl<R: RateSource, T: Translator> App<R, T> {
    fn new(session: QuoteSession<R, T>) -> Self {
        Self {
            session,
            selected: 0,
            language_idx: 0,
            country_idx: 0,
            platform_idx: 0,
            category_idx: 0,
            hours: String::new(),
            profit: String::new(),
            lines: String::new(),
            files: String::new(),
            save_path: None,
            status: String::new(),
            status_kind: StatusKind::Info,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                        break;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn field(&self) -> Field {
        Field::ALL[self.selected]
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.save_path.is_some() {
            self.handle_save_prompt(code);
            return false;
        }

        match code {
            KeyCode::Esc => return true,
            KeyCode::Char('q') if !self.field().is_text() => return true,
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.selected + 1 < Field::ALL.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.cycle(-1),
            KeyCode::Right => self.cycle(1),
            KeyCode::Enter => match self.field() {
                Field::Calculate => self.calculate(),
                Field::Save => self.open_save_prompt(),
                _ if self.field().is_text() => self.calculate(),
                _ => {}
            },
            KeyCode::Backspace => {
                if let Some(buf) = self.text_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = self.text_mut() {
                    if !c.is_control() {
                        buf.push(c);
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn handle_save_prompt(&mut self, code: KeyCode) {
        let Some(buf) = self.save_path.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.save_path = None;
                self.set_status(StatusKind::Info, "");
            }
            KeyCode::Enter => {
                let raw = buf.trim().to_string();
                self.save_path = None;
                if !raw.is_empty() {
                    self.save(PathBuf::from(raw));
                }
            }
            KeyCode::Backspace => {
                buf.pop();
            }
            KeyCode::Char(c) if !c.is_control() => buf.push(c),
            _ => {}
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field() {
            Field::Hours => Some(&mut self.hours),
            Field::Profit => Some(&mut self.profit),
            Field::Lines => Some(&mut self.lines),
            Field::Files => Some(&mut self.files),
            _ => None,
        }
    }

    fn cycle(&mut self, delta: isize) {
        match self.field() {
            Field::Language => {
                let idx = step(self.language_idx, delta, Language::ALL.len());
                self.set_language(Language::ALL[idx]);
            }
            Field::Country => self.country_idx = step(self.country_idx, delta, Country::ALL.len()),
            Field::Platform => self.platform_idx = step(self.platform_idx, delta, Platform::ALL.len()),
            Field::Category => self.category_idx = step(self.category_idx, delta, Category::ALL.len()),
            _ => {}
        }
    }

    fn set_language(&mut self, language: Language) {
        if let Some(idx) = Language::ALL.iter().position(|l| *l == language) {
            self.language_idx = idx;
        }
        let fallbacks = self.session.change_language(language);
        if fallbacks.is_empty() {
            self.set_status(StatusKind::Info, language.display_name());
        } else {
            warn!(language = language.code(), count = fallbacks.len(), "labels partially translated");
            self.set_status(
                StatusKind::Info,
                format!(
                    "{} ({}/{} English)",
                    language.display_name(),
                    fallbacks.len(),
                    LabelKey::ALL.len()
                ),
            );
        }
    }

    fn form(&self) -> QuoteForm {
        QuoteForm {
            country: Country::ALL[self.country_idx].display_name().to_string(),
            platform: Platform::ALL[self.platform_idx].display_name().to_string(),
            category: Category::ALL[self.category_idx].display_name().to_string(),
            hours: self.hours.clone(),
            profit: self.profit.clone(),
            lines: self.lines.clone(),
            files: self.files.clone(),
        }
    }

    fn calculate(&mut self) {
        let form = self.form();
        match self.session.calculate(&form) {
            Ok(_) => {
                let line = self.session.price_line().unwrap_or_default();
                self.set_status(StatusKind::Info, line);
            }
            Err(err) => {
                let msg = format!(
                    "{}: {}",
                    self.session.label(LabelKey::Error),
                    self.session.message_for(&err)
                );
                self.set_status(StatusKind::Error, msg);
            }
        }
    }

    fn open_save_prompt(&mut self) {
        let default = crate::io::export::default_export_path();
        self.save_path = Some(default.display().to_string());
        let hint = format!("{} (Enter / Esc)", self.session.label(LabelKey::SaveTxt));
        self.set_status(StatusKind::Info, hint);
    }

    fn save(&mut self, path: PathBuf) {
        match self.session.export(&path) {
            Ok(()) => {
                let msg = format!("{} {}", self.session.label(LabelKey::TxtSaved), path.display());
                self.set_status(StatusKind::Info, msg);
            }
            Err(err) => {
                let msg = self.session.message_for(&err).to_string();
                self.set_status(StatusKind::Error, msg);
            }
        }
    }

    fn set_status(&mut self, kind: StatusKind, msg: impl Into<String>) {
        self.status_kind = kind;
        self.status = msg.into();
    }

    /// Current value shown for a form row.
    fn value_of(&self, field: Field) -> String {
        match field {
            Field::Language => Language::ALL[self.language_idx].display_name().to_string(),
            Field::Country => Country::ALL[self.country_idx].display_name().to_string(),
            Field::Platform => Platform::ALL[self.platform_idx].display_name().to_string(),
            Field::Category => Category::ALL[self.category_idx].display_name().to_string(),
            Field::Hours => self.hours.clone(),
            Field::Profit => self.profit.clone(),
            Field::Lines => self.lines.clone(),
            Field::Files => self.files.clone(),
            Field::Calculate | Field::Save => String::new(),
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_result(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("fq", Style::default().fg(Color::Cyan)),
            Span::raw(" - Freelance Rate Calculator"),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let width = Field::ALL
            .iter()
            .filter(|f| !matches!(f, Field::Calculate | Field::Save))
            .map(|f| self.session.label(f.label_key()).chars().count())
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem> = Field::ALL
            .iter()
            .map(|&field| {
                let label = self.session.label(field.label_key());
                let text = match field {
                    Field::Calculate | Field::Save => format!("[ {label} ]"),
                    f if f.is_text() => format!("{label:<width$}  {}_", self.value_of(f)),
                    f => format!("{label:<width$}  ‹ {} ›", self.value_of(f)),
                };
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = match &self.save_path {
            Some(path) => Text::from(Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Yellow)),
                Span::raw(path.as_str()),
            ])),
            None => {
                let line = self.session.price_line().unwrap_or_default();
                Text::from(Span::styled(line, Style::default().add_modifier(Modifier::BOLD)))
            }
        };
        let p = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  Enter run  Esc quit";
        let status_style = match self.status_kind {
            StatusKind::Info => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), status_style),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Wrap-around index step.
fn step(idx: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    ((idx as isize + delta).rem_euclid(len)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyCode;
    use crate::gateway::Gateway;
    use crate::gateway::fakes::{FixedRates, Shouty};

    fn app() -> App<FixedRates, Shouty> {
        let gateway = Gateway::new(FixedRates::new(&[(CurrencyCode::Jpy, 150.0)]), Shouty::new(&[]));
        App::new(QuoteSession::new(gateway))
    }

    fn select(app: &mut App<FixedRates, Shouty>, field: Field) {
        app.selected = Field::ALL.iter().position(|f| *f == field).unwrap();
    }

    fn type_text(app: &mut App<FixedRates, Shouty>, field: Field, text: &str) {
        select(app, field);
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step(0, -1, 6), 5);
        assert_eq!(step(5, 1, 6), 0);
        assert_eq!(step(2, 1, 6), 3);
    }

    #[test]
    fn typing_and_calculating_shows_price() {
        let mut app = app();
        select(&mut app, Field::Country);
        for _ in 0..5 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.form().country, "Japan");

        type_text(&mut app, Field::Hours, "10");
        type_text(&mut app, Field::Profit, "20");
        type_text(&mut app, Field::Lines, "5000");
        type_text(&mut app, Field::Files, "33");
        app.handle_key(KeyCode::Backspace);

        select(&mut app, Field::Calculate);
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.status, "Estimated Price: 39750.00 JPY");
        assert_eq!(app.status_kind, StatusKind::Info);
    }

    #[test]
    fn invalid_input_shows_generic_error() {
        let mut app = app();
        type_text(&mut app, Field::Hours, "abc");
        select(&mut app, Field::Calculate);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.status, "Error: Please enter valid numeric values.");
        assert_eq!(app.status_kind, StatusKind::Error);
        assert!(app.session.result().is_none());
    }

    #[test]
    fn q_types_into_text_fields_but_quits_elsewhere() {
        let mut app = app();
        select(&mut app, Field::Hours);
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.hours, "q");
        select(&mut app, Field::Platform);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn language_selector_relabels_form() {
        let mut app = app();
        select(&mut app, Field::Language);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.session.language(), Language::Tr);
        assert_eq!(app.session.label(LabelKey::Calculate), "tr:CALCULATE");
    }

    #[test]
    fn save_prompt_writes_file() {
        let mut app = app();
        type_text(&mut app, Field::Hours, "10");
        type_text(&mut app, Field::Profit, "20");
        type_text(&mut app, Field::Lines, "5000");
        type_text(&mut app, Field::Files, "3");
        select(&mut app, Field::Calculate);
        app.handle_key(KeyCode::Enter);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        select(&mut app, Field::Save);
        app.handle_key(KeyCode::Enter);
        assert!(app.save_path.is_some());
        app.save_path = Some(path.display().to_string());
        app.handle_key(KeyCode::Enter);

        assert!(app.save_path.is_none());
        assert_eq!(app.status_kind, StatusKind::Info);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("Estimated Price: 265.00 USD\n"));
    }

    #[test]
    fn save_prompt_escape_cancels() {
        let mut app = app();
        select(&mut app, Field::Save);
        app.handle_key(KeyCode::Enter);
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(app.save_path.is_none());
    }
}
