// ActionManager - Owns the chart and the undo/redo stacks

use crate::action::edit::EditAction;
use crate::action::kind::ActionKind;
use crate::chart::Chart;
use crate::event::bus::{ChangeBus, SubscriptionId};
use crate::event::change::ChangeEvent;
use std::collections::VecDeque;

/// Default maximum number of history entries to keep
const DEFAULT_MAX_HISTORY: usize = 100;

/// Performs actions against the chart and manages undo/redo
///
/// The manager owns the chart for the lifetime of an editing session and
/// maintains two stacks:
/// - Undo stack: actions that have been performed and can be undone
/// - Redo stack: actions that have been undone and can be redone
///
/// Performing a new action clears the redo stack; history is one linear
/// timeline. Every perform/undo/redo mutates first and then notifies, in
/// that order, on the calling thread.
///
/// # Memory Management
/// The undo stack is trimmed to a maximum length to prevent unbounded
/// growth. When the limit is reached, the oldest entry is dropped.
pub struct ActionManager {
    /// The chart being edited
    chart: Chart,

    /// Actions that can be undone (most recent at the back)
    undo_stack: VecDeque<EditAction>,

    /// Actions that can be redone (most recent at the back)
    redo_stack: VecDeque<EditAction>,

    /// Maximum number of history entries to keep
    max_history: usize,

    /// Observers notified after every mutation
    bus: ChangeBus,
}

impl ActionManager {
    /// Create a manager owning `chart`, with the default history limit
    pub fn new(chart: Chart) -> Self {
        Self::with_capacity(chart, DEFAULT_MAX_HISTORY)
    }

    /// Create a manager with a custom history limit
    pub fn with_capacity(chart: Chart, max_history: usize) -> Self {
        Self {
            chart,
            undo_stack: VecDeque::with_capacity(max_history),
            redo_stack: VecDeque::with_capacity(max_history),
            max_history,
            bus: ChangeBus::new(),
        }
    }

    /// Read access to the chart
    ///
    /// This is the public API for reading document state; mutation goes
    /// through [`perform`](Self::perform).
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Hand the chart back when the editing session ends
    pub fn into_chart(self) -> Chart {
        self.chart
    }

    /// Perform an action and record it in history
    ///
    /// Applies the action, emits its change notification, pushes it onto
    /// the undo stack, and clears the redo stack.
    pub fn perform(&mut self, action: EditAction) {
        log::debug!("perform: {}", action.description());

        action.apply(&mut self.chart, &mut self.bus);

        self.undo_stack.push_back(action);

        // New timeline: anything previously undone can no longer be redone
        self.redo_stack.clear();

        if self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
    }

    /// Undo the most recent action
    ///
    /// Returns the description of the undone action, or `None` (with no
    /// state change and no notification) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<String> {
        let Some(action) = self.undo_stack.pop_back() else {
            log::debug!("undo requested with empty history");
            return None;
        };

        debug_assert!(
            action.is_applied(&self.chart),
            "chart no longer matches the action being undone; \
             it was mutated outside the action subsystem"
        );

        let description = action.description();
        log::debug!("undo: {description}");

        action.inverse().apply(&mut self.chart, &mut self.bus);
        self.redo_stack.push_back(action);

        Some(description)
    }

    /// Redo the most recently undone action
    ///
    /// Re-applies the same action value, so inserts restore the identical
    /// object identities. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<String> {
        let Some(action) = self.redo_stack.pop_back() else {
            log::debug!("redo requested with empty history");
            return None;
        };

        let description = action.description();
        log::debug!("redo: {description}");

        action.apply(&mut self.chart, &mut self.bus);
        self.undo_stack.push_back(action);

        Some(description)
    }

    /// Register an observer for one action kind
    pub fn subscribe<F>(&mut self, kind: ActionKind, observer: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.bus.subscribe(kind, observer)
    }

    /// Remove a previously registered observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Fan an event out to observers
    ///
    /// Used internally after every mutation; also available to
    /// collaborators signalling derived-state changes through the same
    /// channel (e.g. a difficulty recompute after a batch of edits).
    pub fn trigger(&mut self, event: ChangeEvent) {
        self.bus.emit(&event);
    }

    /// Check if there are actions that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are actions that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the action that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|a| a.description())
    }

    /// Description of the action that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(|a| a.description())
    }

    /// Number of entries on the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries on the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history, leaving the chart untouched
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
