// Chart - Collection of hit objects being edited
// Objects are kept sorted by (start_time, id) so views can scan in time order

use crate::chart::object::{HitObject, HitObjectId};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Global object ID generator (atomic for thread-safety)
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a unique hit object ID
pub fn generate_object_id() -> HitObjectId {
    NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)
}

/// The chart being edited
///
/// The chart owns its hit objects. Read access is public; mutation methods
/// are crate-private so that edits only happen through actions dispatched by
/// the [`ActionManager`](crate::action::ActionManager). Bypassing the action
/// subsystem would invalidate the snapshots captured for undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Number of playfield lanes (e.g. 4 for 4K, 7 for 7K)
    lane_count: u8,

    /// All hit objects, sorted by (start_time, id)
    objects: Vec<HitObject>,
}

impl Chart {
    /// Create a new empty chart
    pub fn new(lane_count: u8) -> Self {
        assert!(lane_count > 0, "Chart must have at least one lane");

        Self {
            lane_count,
            objects: Vec::new(),
        }
    }

    /// Create a chart from objects loaded by an external collaborator
    ///
    /// Bumps the id generator past the highest loaded id so that objects
    /// placed later never collide with loaded ones.
    pub fn with_objects(lane_count: u8, mut objects: Vec<HitObject>) -> Self {
        assert!(lane_count > 0, "Chart must have at least one lane");

        let max_id = objects.iter().map(|o| o.id).max().unwrap_or(0);
        NEXT_OBJECT_ID.fetch_max(max_id + 1, Ordering::Relaxed);

        objects.sort_by_key(|o| (o.start_time, o.id));

        Self {
            lane_count,
            objects,
        }
    }

    /// Number of playfield lanes
    pub fn lane_count(&self) -> u8 {
        self.lane_count
    }

    /// Whether a lane index is inside the playfield
    pub fn is_valid_lane(&self, lane: u8) -> bool {
        lane < self.lane_count
    }

    /// Get all objects, sorted by start time
    pub fn objects(&self) -> &[HitObject] {
        &self.objects
    }

    /// Get an object by ID
    pub fn object(&self, id: HitObjectId) -> Option<&HitObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable object by ID
    pub(crate) fn object_mut(&mut self, id: HitObjectId) -> Option<&mut HitObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Check whether an object with this ID exists
    pub fn contains(&self, id: HitObjectId) -> bool {
        self.object(id).is_some()
    }

    /// Add an object, keeping the collection sorted
    pub(crate) fn add_object(&mut self, object: HitObject) {
        let insert_pos = self
            .objects
            .binary_search_by(|o| (o.start_time, o.id).cmp(&(object.start_time, object.id)))
            .unwrap_or_else(|pos| pos);

        self.objects.insert(insert_pos, object);
    }

    /// Remove an object by ID
    pub(crate) fn remove_object(&mut self, id: HitObjectId) -> Option<HitObject> {
        if let Some(index) = self.objects.iter().position(|o| o.id == id) {
            Some(self.objects.remove(index))
        } else {
            None
        }
    }

    /// Restore sort order after object start times changed
    pub(crate) fn resort(&mut self) {
        self.objects.sort_by_key(|o| (o.start_time, o.id));
    }

    /// Find objects whose start time falls in `[start, end)`
    pub fn objects_in_range(&self, start: i32, end: i32) -> Vec<&HitObject> {
        self.objects
            .iter()
            .filter(|o| o.start_time >= start && o.start_time < end)
            .collect()
    }

    /// Get the number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Check if the chart has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
