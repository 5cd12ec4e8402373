//! Gauge errors.
//!
//! Only two conditions are rejected: asking for a gauge whose id has no
//! attached surface, and attaching a surface that cannot host 2D drawing.
//! Everything else is clamped or defaulted instead of failing - see the
//! value clamp in [`crate::angle`] and the override merge in
//! [`crate::config`].

use thiserror::Error;

/// Errors surfaced by [`crate::registry::GaugeRegistry`] operations.
///
/// Both variants abort the operation with no state mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GaugeError {
    /// No drawing surface has been attached for the requested gauge id.
    #[error("no drawing surface attached for gauge '{id}'")]
    SurfaceMissing { id: String },

    /// The attached surface has zero area, so it cannot host 2D drawing
    /// and the view transform would be degenerate.
    #[error("surface for gauge '{id}' has zero area, cannot draw")]
    EmptySurface { id: String },
}
