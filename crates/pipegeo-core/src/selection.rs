//! Measurement mode and the ordered set of selected pipes.

use crate::models::PipeId;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementMode {
    /// Mode off; the selection is always empty here.
    #[default]
    Idle,
    Measuring,
}

/// What a [`SelectionState::toggle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Called while idle; nothing changed.
    Ignored,
}

/// Selection state machine.
///
/// `Idle` ⇄ `Measuring`. Leaving measurement mode clears the selection.
/// Entering it keeps whatever is selected, so enabling twice is harmless.
/// Ids are kept in the order they were picked, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: MeasurementMode,
    ids: Vec<PipeId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> MeasurementMode {
        self.mode
    }

    pub fn is_measuring(&self) -> bool {
        self.mode == MeasurementMode::Measuring
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[PipeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: PipeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn enable(&mut self) {
        if self.mode != MeasurementMode::Measuring {
            trace!("measurement mode on");
        }
        self.mode = MeasurementMode::Measuring;
    }

    pub fn disable(&mut self) {
        trace!(cleared = self.ids.len(), "measurement mode off");
        self.mode = MeasurementMode::Idle;
        self.ids.clear();
    }

    /// Flip the mode, honouring the clear-on-disable rule.
    pub fn toggle_mode(&mut self) {
        match self.mode {
            MeasurementMode::Idle => self.enable(),
            MeasurementMode::Measuring => self.disable(),
        }
    }

    pub fn toggle(&mut self, id: PipeId) -> ToggleOutcome {
        if !self.is_measuring() {
            trace!(id, "toggle ignored while idle");
            return ToggleOutcome::Ignored;
        }

        if let Some(pos) = self.ids.iter().position(|&x| x == id) {
            self.ids.remove(pos);
            ToggleOutcome::Removed
        } else {
            self.ids.push(id);
            ToggleOutcome::Added
        }
    }

    /// Empty the selection without touching the mode.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids for which `keep` is false. Order of the rest is preserved.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&PipeId) -> bool,
    {
        let before = self.ids.len();
        self.ids.retain(keep);
        before - self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measuring_with(ids: &[PipeId]) -> SelectionState {
        let mut s = SelectionState::new();
        s.enable();
        for &id in ids {
            s.toggle(id);
        }
        s
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let s = SelectionState::new();
        assert_eq!(s.mode(), MeasurementMode::Idle);
        assert!(s.is_empty());
    }

    #[test]
    fn test_toggle_while_idle_is_ignored() {
        let mut s = SelectionState::new();
        assert_eq!(s.toggle(1), ToggleOutcome::Ignored);
        assert!(s.is_empty());
        assert!(!s.is_measuring());
    }

    #[test]
    fn test_toggle_pair_returns_to_empty() {
        let mut s = measuring_with(&[]);
        assert_eq!(s.toggle(9), ToggleOutcome::Added);
        assert_eq!(s.toggle(9), ToggleOutcome::Removed);
        assert!(s.is_empty());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut s = measuring_with(&[3, 1, 2]);
        assert_eq!(s.ids(), &[3, 1, 2]);
        s.toggle(1);
        assert_eq!(s.ids(), &[3, 2]);
        s.toggle(1);
        assert_eq!(s.ids(), &[3, 2, 1]);
    }

    #[test]
    fn test_disable_clears() {
        let mut s = measuring_with(&[1, 2]);
        s.disable();
        assert_eq!(s.mode(), MeasurementMode::Idle);
        assert!(s.is_empty());
    }

    #[test]
    fn test_enable_twice_preserves_picks() {
        let mut s = measuring_with(&[4, 5]);
        s.enable();
        assert!(s.is_measuring());
        assert_eq!(s.ids(), &[4, 5]);
    }

    #[test]
    fn test_toggle_mode_round_trip_starts_fresh() {
        let mut s = measuring_with(&[4]);
        s.toggle_mode();
        s.toggle_mode();
        assert!(s.is_measuring());
        assert!(s.is_empty());
    }

    #[test]
    fn test_clear_keeps_mode() {
        let mut s = measuring_with(&[1, 2, 3]);
        s.clear();
        assert!(s.is_measuring());
        assert!(s.is_empty());
    }

    #[test]
    fn test_retain_reports_pruned() {
        let mut s = measuring_with(&[1, 2, 3, 4]);
        let pruned = s.retain(|id| id % 2 == 0);
        assert_eq!(pruned, 2);
        assert_eq!(s.ids(), &[2, 4]);
    }
}
