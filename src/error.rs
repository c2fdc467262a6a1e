//! Error types for topology conversion.

use thiserror::Error;

/// Recoverable diagnostics raised by topology conversion.
///
/// The converter itself never fails: both conditions are logged through
/// the `log` facade using these variants' display text, and a best-effort
/// geometry is returned. Only [`Geometry::generate_sequential_index`]
/// surfaces [`TopologyError::MissingPositionAttribute`] as a `Result`,
/// because there is no best-effort value to return from it.
///
/// The display strings are stable; downstream tooling matches on them.
///
/// [`Geometry::generate_sequential_index`]: crate::Geometry::generate_sequential_index
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// No index present and no `position` attribute to synthesize one from.
    #[error("Undefined position attribute. Processing not possible.")]
    MissingPositionAttribute,
    /// Post-hoc sanity check on the generated index count failed.
    #[error("Unable to generate correct amount of triangles.")]
    TriangleCountMismatch {
        /// Triangle count implied by the source index length.
        expected: i64,
        /// Triangle count actually emitted.
        produced: i64,
    },
}
