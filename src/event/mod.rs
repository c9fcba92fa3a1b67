// Change notification channel
//
// Typed events describing which objects changed and how, delivered
// synchronously to observers registered per action kind. Views use these to
// update incrementally instead of re-scanning the whole chart.

pub mod bus;
pub mod change;

pub use bus::{ChangeBus, SubscriptionId};
pub use change::{ChangeEvent, ColorChange, PlacementChange};
