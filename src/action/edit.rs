// Edit actions - reversible chart mutations
//
// Each variant captures, at construction time, the original values it needs
// for exact inversion. Undo builds the inverse action and runs it through
// the same apply path, so mutation and notification never diverge between
// do and undo.

use crate::action::kind::ActionKind;
use crate::chart::{Chart, HitObject, HitObjectId, Placement, generate_object_id};
use crate::event::bus::ChangeBus;
use crate::event::change::{ChangeEvent, ColorChange, PlacementChange};

/// Result type for action construction
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors raised when constructing an action against the current chart
///
/// Construction is the validation point: an action that constructs
/// successfully performs without failure. Nothing enters history on error.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ActionError {
    #[error("hit object {0} does not exist in the chart")]
    UnknownObject(HitObjectId),

    #[error("lane {lane} is outside the playfield ({lane_count} lanes)")]
    LaneOutOfBounds { lane: i32, lane_count: u8 },

    #[error("start time {0}ms is before the start of the track")]
    NegativeStartTime(i32),
}

/// One reversible unit of chart mutation
///
/// The closed set of edit kinds. Every variant owns the data it needs to
/// apply the edit and to build its inverse: color changes carry per-object
/// original colors, moves carry from/to placements, and remove owns full
/// snapshots of the removed objects so undo re-inserts the identical
/// objects, ids included.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Apply one color to a set of objects
    SetColor { color: i32, changes: Vec<ColorChange> },

    /// Apply individual colors per object
    SetColors { changes: Vec<ColorChange> },

    /// Shift objects in time and/or lane
    Move { changes: Vec<PlacementChange> },

    /// Insert fully-formed objects into the chart
    Place { objects: Vec<HitObject> },

    /// Remove objects, keeping their snapshots alive for undo
    Remove { objects: Vec<HitObject> },

    /// An ordered group of edits treated as one history entry
    Batch {
        label: String,
        children: Vec<EditAction>,
    },
}

impl EditAction {
    /// Recolor `targets` to a single color
    ///
    /// Captures each target's current color so undo can restore
    /// heterogeneous originals. An empty target set is a valid (no-op)
    /// action and still becomes a history entry when performed.
    pub fn set_color(chart: &Chart, targets: &[HitObjectId], color: i32) -> ActionResult<Self> {
        let changes = capture_colors(chart, targets.iter().map(|&id| (id, color)))?;
        Ok(Self::SetColor { color, changes })
    }

    /// Recolor objects individually, one `(id, color)` pair per target
    pub fn set_colors(chart: &Chart, colors: &[(HitObjectId, i32)]) -> ActionResult<Self> {
        let changes = capture_colors(chart, colors.iter().copied())?;
        Ok(Self::SetColors { changes })
    }

    /// Shift `targets` by a time and lane offset
    ///
    /// Rejects moves that would push any target before time zero or outside
    /// the playfield.
    pub fn move_objects(
        chart: &Chart,
        targets: &[HitObjectId],
        time_offset: i32,
        lane_offset: i32,
    ) -> ActionResult<Self> {
        let mut changes = Vec::with_capacity(targets.len());

        for &id in targets {
            let object = chart.object(id).ok_or(ActionError::UnknownObject(id))?;

            let start_time = object.start_time + time_offset;
            if start_time < 0 {
                return Err(ActionError::NegativeStartTime(start_time));
            }

            let lane = i32::from(object.lane) + lane_offset;
            if lane < 0 || lane >= i32::from(chart.lane_count()) {
                return Err(ActionError::LaneOutOfBounds {
                    lane,
                    lane_count: chart.lane_count(),
                });
            }

            changes.push(PlacementChange {
                id,
                from: object.placement(),
                to: Placement::new(lane as u8, start_time),
            });
        }

        Ok(Self::Move { changes })
    }

    /// Place new objects, one `(placement, color)` pair each
    ///
    /// Identities are assigned here, at construction, so redo re-inserts
    /// the same objects rather than equivalent clones with fresh ids.
    pub fn place(chart: &Chart, placements: &[(Placement, i32)]) -> ActionResult<Self> {
        for &(placement, _) in placements {
            if !chart.is_valid_lane(placement.lane) {
                return Err(ActionError::LaneOutOfBounds {
                    lane: i32::from(placement.lane),
                    lane_count: chart.lane_count(),
                });
            }
            if placement.start_time < 0 {
                return Err(ActionError::NegativeStartTime(placement.start_time));
            }
        }

        let objects = placements
            .iter()
            .map(|&(placement, color)| {
                HitObject::new(
                    generate_object_id(),
                    placement.lane,
                    placement.start_time,
                    color,
                )
            })
            .collect();

        Ok(Self::Place { objects })
    }

    /// Remove `targets`, snapshotting their full state for undo
    pub fn remove(chart: &Chart, targets: &[HitObjectId]) -> ActionResult<Self> {
        let objects = targets
            .iter()
            .map(|&id| chart.object(id).copied().ok_or(ActionError::UnknownObject(id)))
            .collect::<ActionResult<Vec<_>>>()?;

        Ok(Self::Remove { objects })
    }

    /// Group already-constructed actions into one history entry
    pub fn batch(label: impl Into<String>, children: Vec<EditAction>) -> Self {
        Self::Batch {
            label: label.into(),
            children,
        }
    }

    /// The kind tag of this action
    pub fn kind(&self) -> ActionKind {
        match self {
            EditAction::SetColor { .. } => ActionKind::SetColor,
            EditAction::SetColors { .. } => ActionKind::SetColors,
            EditAction::Move { .. } => ActionKind::Move,
            EditAction::Place { .. } => ActionKind::Place,
            EditAction::Remove { .. } => ActionKind::Remove,
            EditAction::Batch { .. } => ActionKind::Batch,
        }
    }

    /// Human-readable label for history menus
    pub fn description(&self) -> String {
        match self {
            EditAction::SetColor { color, changes } => {
                format!("Set Color to {} ({} objects)", color, changes.len())
            }
            EditAction::SetColors { changes } => format!("Set Colors ({} objects)", changes.len()),
            EditAction::Move { changes } => format!("Move {} objects", changes.len()),
            EditAction::Place { objects } => format!("Place {} objects", objects.len()),
            EditAction::Remove { objects } => format!("Remove {} objects", objects.len()),
            EditAction::Batch { label, children } => {
                format!("{} ({} actions)", label, children.len())
            }
        }
    }

    /// Build the action that exactly reverses this one
    ///
    /// A single-color recolor inverts into a bulk recolor built from the
    /// captured originals, since the targets may have held different colors
    /// before. Batches invert their children in reverse order.
    pub fn inverse(&self) -> EditAction {
        match self {
            EditAction::SetColor { changes, .. } | EditAction::SetColors { changes } => {
                EditAction::SetColors {
                    changes: changes.iter().map(|c| c.swapped()).collect(),
                }
            }
            EditAction::Move { changes } => EditAction::Move {
                changes: changes.iter().map(|c| c.swapped()).collect(),
            },
            EditAction::Place { objects } => EditAction::Remove {
                objects: objects.clone(),
            },
            EditAction::Remove { objects } => EditAction::Place {
                objects: objects.clone(),
            },
            EditAction::Batch { label, children } => EditAction::Batch {
                label: label.clone(),
                children: children.iter().rev().map(EditAction::inverse).collect(),
            },
        }
    }

    /// Apply the forward edit and emit its change event
    ///
    /// Primitives emit exactly one event each; a batch applies its children
    /// in order and the children emit their own events. Targets are
    /// guaranteed present by construction-time validation plus the linear
    /// history discipline.
    pub(crate) fn apply(&self, chart: &mut Chart, bus: &mut ChangeBus) {
        match self {
            EditAction::SetColor { changes, .. } => {
                apply_color_changes(chart, changes);
                bus.emit(&ChangeEvent::ColorSet {
                    changes: changes.clone(),
                });
            }
            EditAction::SetColors { changes } => {
                apply_color_changes(chart, changes);
                bus.emit(&ChangeEvent::ColorsSet {
                    changes: changes.clone(),
                });
            }
            EditAction::Move { changes } => {
                for change in changes {
                    let object = chart.object_mut(change.id);
                    debug_assert!(object.is_some(), "move target missing from chart");
                    if let Some(object) = object {
                        object.set_placement(change.to);
                    }
                }
                chart.resort();
                bus.emit(&ChangeEvent::ObjectsMoved {
                    changes: changes.clone(),
                });
            }
            EditAction::Place { objects } => {
                for object in objects {
                    chart.add_object(*object);
                }
                bus.emit(&ChangeEvent::ObjectsPlaced {
                    objects: objects.clone(),
                });
            }
            EditAction::Remove { objects } => {
                for object in objects {
                    let removed = chart.remove_object(object.id);
                    debug_assert!(removed.is_some(), "remove target missing from chart");
                }
                bus.emit(&ChangeEvent::ObjectsRemoved {
                    objects: objects.clone(),
                });
            }
            EditAction::Batch { children, .. } => {
                for child in children {
                    child.apply(chart, bus);
                }
            }
        }
    }

    /// Whether the chart currently reflects this action's outcome
    ///
    /// Used by debug assertions before undo to catch charts mutated outside
    /// the action subsystem.
    pub(crate) fn is_applied(&self, chart: &Chart) -> bool {
        match self {
            EditAction::SetColor { changes, .. } | EditAction::SetColors { changes } => changes
                .iter()
                .all(|c| chart.object(c.id).is_some_and(|o| o.color == c.new)),
            EditAction::Move { changes } => changes
                .iter()
                .all(|c| chart.object(c.id).is_some_and(|o| o.placement() == c.to)),
            EditAction::Place { objects } => {
                objects.iter().all(|o| chart.object(o.id) == Some(o))
            }
            EditAction::Remove { objects } => objects.iter().all(|o| !chart.contains(o.id)),
            // Children may target overlapping objects; their individual
            // outcomes are not all visible in the final state.
            EditAction::Batch { .. } => true,
        }
    }
}

fn capture_colors(
    chart: &Chart,
    colors: impl Iterator<Item = (HitObjectId, i32)>,
) -> ActionResult<Vec<ColorChange>> {
    colors
        .map(|(id, new)| {
            let object = chart.object(id).ok_or(ActionError::UnknownObject(id))?;
            Ok(ColorChange {
                id,
                old: object.color,
                new,
            })
        })
        .collect()
}

fn apply_color_changes(chart: &mut Chart, changes: &[ColorChange]) {
    for change in changes {
        let object = chart.object_mut(change.id);
        debug_assert!(object.is_some(), "color target missing from chart");
        if let Some(object) = object {
            object.color = change.new;
        }
    }
}

impl ColorChange {
    fn swapped(&self) -> ColorChange {
        ColorChange {
            id: self.id,
            old: self.new,
            new: self.old,
        }
    }
}

impl PlacementChange {
    fn swapped(&self) -> PlacementChange {
        PlacementChange {
            id: self.id,
            from: self.to,
            to: self.from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with_colors(colors: &[i32]) -> Chart {
        let objects = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                HitObject::new(generate_object_id(), (i % 4) as u8, i as i32 * 500, color)
            })
            .collect();

        Chart::with_objects(4, objects)
    }

    fn ids(chart: &Chart) -> Vec<HitObjectId> {
        chart.objects().iter().map(|o| o.id).collect()
    }

    #[test]
    fn test_set_color_captures_each_original() {
        let chart = chart_with_colors(&[1, 2]);
        let action = EditAction::set_color(&chart, &ids(&chart), 9).unwrap();

        let EditAction::SetColor { color, changes } = &action else {
            panic!("expected SetColor");
        };

        assert_eq!(*color, 9);
        assert_eq!(changes[0].old, 1);
        assert_eq!(changes[1].old, 2);
        assert!(changes.iter().all(|c| c.new == 9));
    }

    #[test]
    fn test_unknown_target_rejected() {
        let chart = chart_with_colors(&[0]);
        let missing = ids(&chart)[0] + 10_000;

        let result = EditAction::set_color(&chart, &[missing], 1);

        assert_eq!(result.unwrap_err(), ActionError::UnknownObject(missing));
        assert_eq!(
            EditAction::remove(&chart, &[missing]).unwrap_err(),
            ActionError::UnknownObject(missing)
        );
    }

    #[test]
    fn test_move_rejects_leaving_playfield() {
        let chart = chart_with_colors(&[0]);
        let targets = ids(&chart);

        let result = EditAction::move_objects(&chart, &targets, 0, 7);
        assert!(matches!(
            result,
            Err(ActionError::LaneOutOfBounds { lane: 7, .. })
        ));

        let result = EditAction::move_objects(&chart, &targets, -10_000, 0);
        assert!(matches!(result, Err(ActionError::NegativeStartTime(_))));
    }

    #[test]
    fn test_inverse_of_set_color_is_bulk_restore() {
        let mut chart = chart_with_colors(&[1, 2]);
        let mut bus = ChangeBus::new();
        let action = EditAction::set_color(&chart, &ids(&chart), 9).unwrap();

        action.apply(&mut chart, &mut bus);
        assert!(chart.objects().iter().all(|o| o.color == 9));

        let inverse = action.inverse();
        assert_eq!(inverse.kind(), ActionKind::SetColors);

        inverse.apply(&mut chart, &mut bus);
        let colors: Vec<i32> = chart.objects().iter().map(|o| o.color).collect();
        assert_eq!(colors, vec![1, 2]);
    }

    #[test]
    fn test_place_assigns_unique_ids_at_construction() {
        let chart = Chart::new(4);
        let action = EditAction::place(
            &chart,
            &[(Placement::new(0, 100), 1), (Placement::new(1, 100), 1)],
        )
        .unwrap();

        let EditAction::Place { objects } = &action else {
            panic!("expected Place");
        };

        assert_ne!(objects[0].id, objects[1].id);

        // Re-applying after an undo must reuse the captured identities
        let mut chart = chart;
        let mut bus = ChangeBus::new();
        action.apply(&mut chart, &mut bus);
        let first_ids: Vec<_> = chart.objects().iter().map(|o| o.id).collect();

        action.inverse().apply(&mut chart, &mut bus);
        action.apply(&mut chart, &mut bus);
        let second_ids: Vec<_> = chart.objects().iter().map(|o| o.id).collect();

        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_place_validates_before_assigning_ids() {
        let chart = Chart::new(4);

        let result = EditAction::place(&chart, &[(Placement::new(9, 0), 0)]);
        assert!(matches!(result, Err(ActionError::LaneOutOfBounds { .. })));

        let result = EditAction::place(&chart, &[(Placement::new(0, -5), 0)]);
        assert_eq!(result.unwrap_err(), ActionError::NegativeStartTime(-5));
    }

    #[test]
    fn test_batch_inverse_reverses_children() {
        let chart = chart_with_colors(&[0, 0]);
        let targets = ids(&chart);

        let batch = EditAction::batch(
            "Paste",
            vec![
                EditAction::set_color(&chart, &targets, 3).unwrap(),
                EditAction::move_objects(&chart, &targets, 100, 0).unwrap(),
            ],
        );

        let EditAction::Batch { children, .. } = batch.inverse() else {
            panic!("expected Batch");
        };

        let kinds: Vec<ActionKind> = children.iter().map(EditAction::kind).collect();
        assert_eq!(kinds, vec![ActionKind::Move, ActionKind::SetColors]);
    }

    #[test]
    fn test_remove_owns_snapshots() {
        let mut chart = chart_with_colors(&[5]);
        let mut bus = ChangeBus::new();
        let target = ids(&chart)[0];

        let action = EditAction::remove(&chart, &[target]).unwrap();
        action.apply(&mut chart, &mut bus);
        assert!(chart.is_empty());

        // The removed object lives on inside the action until undo
        action.inverse().apply(&mut chart, &mut bus);
        assert_eq!(chart.object(target).map(|o| o.color), Some(5));
    }

    #[test]
    fn test_descriptions() {
        let chart = chart_with_colors(&[0, 0]);
        let targets = ids(&chart);

        let action = EditAction::set_color(&chart, &targets, 4).unwrap();
        assert_eq!(action.description(), "Set Color to 4 (2 objects)");

        let batch = EditAction::batch("Mirror Selection", vec![action]);
        assert_eq!(batch.description(), "Mirror Selection (1 actions)");
    }
}
