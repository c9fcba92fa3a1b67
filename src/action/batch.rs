// BatchBuilder - Groups primitive actions into one atomic history entry
//
// Grouped multi-object edits (a drag-select recolor, a paste) accumulate
// here without touching history; finish() performs them as a single batch,
// so one undo reverses the whole gesture.

use crate::action::edit::EditAction;
use crate::action::manager::ActionManager;

/// Accumulates actions for one grouped edit
pub struct BatchBuilder {
    label: String,
    children: Vec<EditAction>,
}

impl BatchBuilder {
    /// Start a batch labeled for the history menu
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Append an already-constructed action
    ///
    /// The action is not performed yet; children run in push order when the
    /// batch is finished.
    pub fn push(&mut self, action: EditAction) {
        self.children.push(action);
    }

    /// Number of accumulated actions
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Wrap the accumulated actions into one batch and perform it
    ///
    /// The batch becomes a single history entry even when empty; callers
    /// that want no entry for an empty gesture check `is_empty` first.
    pub fn finish(self, manager: &mut ActionManager) {
        manager.perform(EditAction::batch(self.label, self.children));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, HitObject, generate_object_id};

    fn test_manager() -> ActionManager {
        let objects = (0..3)
            .map(|i| HitObject::new(generate_object_id(), i as u8, i * 500, 0))
            .collect();

        ActionManager::new(Chart::with_objects(4, objects))
    }

    #[test]
    fn test_batch_is_one_history_entry() {
        let mut manager = test_manager();
        let mut builder = BatchBuilder::new("Recolor Selection");

        for (i, object) in manager.chart().objects().iter().enumerate() {
            let action =
                EditAction::set_color(manager.chart(), &[object.id], i as i32 + 1).unwrap();
            builder.push(action);
        }

        assert_eq!(builder.len(), 3);
        builder.finish(&mut manager);

        let colors: Vec<i32> = manager.chart().objects().iter().map(|o| o.color).collect();
        assert_eq!(colors, vec![1, 2, 3]);
        assert_eq!(manager.undo_count(), 1);
        assert_eq!(
            manager.undo_description(),
            Some("Recolor Selection (3 actions)".to_string())
        );

        // One undo reverses the whole gesture
        manager.undo().unwrap();
        assert!(manager.chart().objects().iter().all(|o| o.color == 0));
    }

    #[test]
    fn test_empty_batch_still_recorded() {
        let mut manager = test_manager();
        let builder = BatchBuilder::new("Noop Gesture");

        assert!(builder.is_empty());
        builder.finish(&mut manager);

        assert_eq!(manager.undo_count(), 1);
    }
}
