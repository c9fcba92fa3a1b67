// Action kind tags
// Used to key event subscriptions and to label history entries

/// The kind of edit an action performs
///
/// Every [`EditAction`](crate::action::EditAction) variant and every
/// [`ChangeEvent`](crate::event::ChangeEvent) maps to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// One color applied to a set of objects
    SetColor,
    /// Individual colors applied per object
    SetColors,
    /// Objects moved in time and/or lane
    Move,
    /// Objects inserted into the chart
    Place,
    /// Objects removed from the chart
    Remove,
    /// An ordered group of edits treated as one history entry
    Batch,
}
