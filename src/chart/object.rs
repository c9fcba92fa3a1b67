// Hit object representation for the chart editor
// A hit object is a timed note with a lane, a start time, and a color

use serde::{Deserialize, Serialize};

/// Unique identifier for hit objects
pub type HitObjectId = u64;

/// Where a hit object sits on the playfield: lane plus start time.
///
/// Start times are integral milliseconds from the beginning of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Playfield lane (0-based)
    pub lane: u8,

    /// Start time in milliseconds
    pub start_time: i32,
}

impl Placement {
    /// Creates a new placement
    pub fn new(lane: u8, start_time: i32) -> Self {
        Self { lane, start_time }
    }
}

/// A hit object in the chart
///
/// Objects are owned exclusively by the [`Chart`](crate::chart::Chart);
/// the editing code refers to them by id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    /// Unique identifier for this object
    pub id: HitObjectId,

    /// Playfield lane (0-based)
    pub lane: u8,

    /// Start time in milliseconds
    pub start_time: i32,

    /// Color index used by skins and snap highlighting
    pub color: i32,
}

impl HitObject {
    /// Creates a new hit object
    pub fn new(id: HitObjectId, lane: u8, start_time: i32, color: i32) -> Self {
        assert!(start_time >= 0, "start time must not be negative");

        Self {
            id,
            lane,
            start_time,
            color,
        }
    }

    /// Get the placement (lane + start time) of this object
    pub fn placement(&self) -> Placement {
        Placement::new(self.lane, self.start_time)
    }

    /// Move this object to a new placement
    pub fn set_placement(&mut self, placement: Placement) {
        self.lane = placement.lane;
        self.start_time = placement.start_time;
    }
}
