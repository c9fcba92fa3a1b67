// Chart document model
//
// The in-memory collection of timed hit objects being edited. Everything
// may read the chart; mutation happens only through the action subsystem.

pub mod chart;
pub mod object;

pub use chart::{Chart, generate_object_id};
pub use object::{HitObject, HitObjectId, Placement};
