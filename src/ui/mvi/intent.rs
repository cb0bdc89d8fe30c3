//! Base trait for intents (user edits) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent field edits and form resets. They are processed by
/// reducers to produce new form states.
pub trait Intent: Send + 'static {}
