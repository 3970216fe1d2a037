//! The interactive session: pipes, filter and selection behind one owner.

use crate::filter::{distinct_tags, FilterState};
use crate::measure::MeasurementReport;
use crate::models::{Pipe, PipeId};
use crate::selection::{SelectionState, ToggleOutcome};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Everything that can change a [`PipeSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoadStarted,
    /// Replace the whole collection.
    PipesLoaded(Vec<Pipe>),
    LoadFailed(String),
    SetFilter(Option<String>),
    EnableMeasurement,
    DisableMeasurement,
    ToggleMeasurement,
    TogglePipe(PipeId),
    ClearSelection,
}

/// State for one viewing session.
///
/// Consumers read through the accessors and change state only with
/// [`PipeSession::apply`].
#[derive(Debug, Clone, Default)]
pub struct PipeSession {
    pipes: Vec<Pipe>,
    loading: bool,
    last_error: Option<String>,
    filter: FilterState,
    selection: SelectionState,
}

impl PipeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipes(pipes: Vec<Pipe>) -> Self {
        let mut session = Self::new();
        session.apply(SessionEvent::PipesLoaded(pipes));
        session
    }

    /// Apply one event. Returns the toggle outcome for `TogglePipe`.
    pub fn apply(&mut self, event: SessionEvent) -> Option<ToggleOutcome> {
        trace!(?event, "session event");
        match event {
            SessionEvent::LoadStarted => {
                self.loading = true;
            }
            SessionEvent::PipesLoaded(pipes) => {
                self.loading = false;
                self.last_error = None;
                self.replace_pipes(pipes);
            }
            SessionEvent::LoadFailed(message) => {
                warn!(%message, "pipe load failed");
                self.loading = false;
                self.last_error = Some(message);
            }
            SessionEvent::SetFilter(tag) => self.filter.set(tag),
            SessionEvent::EnableMeasurement => self.selection.enable(),
            SessionEvent::DisableMeasurement => self.selection.disable(),
            SessionEvent::ToggleMeasurement => self.selection.toggle_mode(),
            SessionEvent::TogglePipe(id) => return Some(self.selection.toggle(id)),
            SessionEvent::ClearSelection => self.selection.clear(),
        }
        None
    }

    fn replace_pipes(&mut self, pipes: Vec<Pipe>) {
        let present: HashSet<PipeId> = pipes.iter().map(|p| p.id).collect();
        let pruned = self.selection.retain(|id| present.contains(id));
        if pruned > 0 {
            debug!(pruned, "dropped selected ids missing from new collection");
        }
        debug!(count = pipes.len(), "pipes loaded");
        self.pipes = pipes;
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.iter().find(|p| p.id == id)
    }

    pub fn visible_pipes(&self) -> Vec<&Pipe> {
        self.filter.visible(&self.pipes)
    }

    pub fn distinct_tags(&self) -> Vec<String> {
        distinct_tags(&self.pipes)
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.filter.tag()
    }

    pub fn selected_ids(&self) -> &[PipeId] {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: PipeId) -> bool {
        self.selection.contains(id)
    }

    /// Selected pipes in selection order, looked up in the full collection
    /// so the active filter does not hide picks.
    pub fn selected_pipes(&self) -> Vec<&Pipe> {
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.pipe(id))
            .collect()
    }

    pub fn is_measuring(&self) -> bool {
        self.selection.is_measuring()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn measurement(&self) -> MeasurementReport {
        MeasurementReport::from_selection(&self.selected_pipes())
    }
}
