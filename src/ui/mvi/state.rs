//! Base trait for UI state in MVI architecture.

/// Marker trait for UI state objects.
///
/// States are replaced wholesale, never mutated in place, and must be
/// comparable so observers can skip redundant renders.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
