// Change events emitted after every perform/undo/redo

use crate::action::kind::ActionKind;
use crate::chart::{HitObject, HitObjectId, Placement};

/// A single object's color transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorChange {
    pub id: HitObjectId,
    pub old: i32,
    pub new: i32,
}

/// A single object's placement transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementChange {
    pub id: HitObjectId,
    pub from: Placement,
    pub to: Placement,
}

/// A change to the chart, carrying enough data for incremental view updates
///
/// Each event names the affected object ids together with old and new
/// values. Undo emits the same event shapes as perform, with the values in
/// the restoring direction.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// One color was applied to a set of objects
    ColorSet { changes: Vec<ColorChange> },

    /// Individual colors were applied per object
    ColorsSet { changes: Vec<ColorChange> },

    /// Objects moved in time and/or lane
    ObjectsMoved { changes: Vec<PlacementChange> },

    /// Objects were inserted into the chart
    ObjectsPlaced { objects: Vec<HitObject> },

    /// Objects were removed from the chart (snapshots of their last state)
    ObjectsRemoved { objects: Vec<HitObject> },
}

impl ChangeEvent {
    /// The action kind this event is keyed under
    pub fn kind(&self) -> ActionKind {
        match self {
            ChangeEvent::ColorSet { .. } => ActionKind::SetColor,
            ChangeEvent::ColorsSet { .. } => ActionKind::SetColors,
            ChangeEvent::ObjectsMoved { .. } => ActionKind::Move,
            ChangeEvent::ObjectsPlaced { .. } => ActionKind::Place,
            ChangeEvent::ObjectsRemoved { .. } => ActionKind::Remove,
        }
    }

    /// Ids of the objects this event touches
    pub fn target_ids(&self) -> Vec<HitObjectId> {
        match self {
            ChangeEvent::ColorSet { changes } | ChangeEvent::ColorsSet { changes } => {
                changes.iter().map(|c| c.id).collect()
            }
            ChangeEvent::ObjectsMoved { changes } => changes.iter().map(|c| c.id).collect(),
            ChangeEvent::ObjectsPlaced { objects } | ChangeEvent::ObjectsRemoved { objects } => {
                objects.iter().map(|o| o.id).collect()
            }
        }
    }
}
