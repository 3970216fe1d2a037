use crossterm::event::{self, Event, KeyCode};
use pipegeo_core::{format_distance, PipeSession, SessionEvent, ToggleOutcome};
use ratatui::widgets::TableState;
use std::time::Duration;

const PAGE: usize = 10;

pub struct App {
    pub session: PipeSession,
    pub table_state: TableState,
    pub source: String,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: PipeSession, source: impl Into<String>) -> App {
        let mut table_state = TableState::default();
        if !session.pipes().is_empty() {
            table_state.select(Some(0));
        }
        let status = match session.last_error() {
            Some(err) => format!("Load failed: {}", err),
            None => format!("Loaded {} pipes. Press 'm' to measure.", session.pipes().len()),
        };
        App {
            session,
            table_state,
            source: source.into(),
            status,
            should_quit: false,
        }
    }

    pub fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE as isize)),
            KeyCode::PageDown => self.move_by(PAGE as isize),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(usize::MAX),
            KeyCode::Char('t') => self.cycle_tag(true),
            KeyCode::Char('T') => self.cycle_tag(false),
            KeyCode::Char('a') => self.set_filter(None),
            KeyCode::Char('m') => self.toggle_measurement(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_highlighted(),
            KeyCode::Char('c') => {
                self.session.apply(SessionEvent::ClearSelection);
                self.status = "Selection cleared.".to_string();
            }
            _ => {}
        }
    }

    /// Index into the visible pipes of the highlighted row.
    pub fn highlighted(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn visible_len(&self) -> usize {
        self.session.visible_pipes().len()
    }

    fn move_by(&mut self, delta: isize) {
        let current = self.highlighted().unwrap_or(0);
        let target = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize)
        };
        self.move_to(target);
    }

    fn move_to(&mut self, index: usize) {
        let len = self.visible_len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(index.min(len - 1)));
        }
    }

    /// Step through the distinct tags, with "all" before the first and
    /// after the last.
    fn cycle_tag(&mut self, forward: bool) {
        let tags = self.session.distinct_tags();
        if tags.is_empty() {
            self.status = "No tags to filter by.".to_string();
            return;
        }

        let current = self
            .session
            .active_tag()
            .and_then(|t| tags.iter().position(|x| x == t));
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(tags.len() - 1),
            (Some(i), true) if i + 1 < tags.len() => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
        self.set_filter(next.map(|i| tags[i].clone()));
    }

    fn set_filter(&mut self, tag: Option<String>) {
        self.status = match &tag {
            Some(t) => format!("Showing pipes tagged '{}'.", t),
            None => "Showing all pipes.".to_string(),
        };
        self.session.apply(SessionEvent::SetFilter(tag));
        self.move_to(0);
    }

    fn toggle_measurement(&mut self) {
        self.session.apply(SessionEvent::ToggleMeasurement);
        self.status = if self.session.is_measuring() {
            "Measurement mode on. Space selects the highlighted pipe.".to_string()
        } else {
            "Measurement mode off.".to_string()
        };
    }

    fn toggle_highlighted(&mut self) {
        let Some(index) = self.highlighted() else {
            return;
        };
        let Some((id, name)) = self
            .session
            .visible_pipes()
            .get(index)
            .map(|p| (p.id, p.name.clone()))
        else {
            return;
        };

        self.status = match self.session.apply(SessionEvent::TogglePipe(id)) {
            Some(ToggleOutcome::Added) => format!(
                "Added {}. Total {}.",
                name,
                format_distance(self.session.measurement().total_length)
            ),
            Some(ToggleOutcome::Removed) => format!("Removed {}.", name),
            _ => "Press 'm' to start measuring first.".to_string(),
        };
    }
}
