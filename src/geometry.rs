//! Planar math helpers for gauge drawing.
//!
//! Everything the layer renderers emit is expressed in the logical design
//! space: f32 coordinates relative to the needle pivot, with the needle-angle
//! convention used throughout the crate:
//!
//! ```text
//! angle   0 deg -> left horizontal   (-r,  0)
//! angle  90 deg -> straight up       ( 0, -r)
//! angle 180 deg -> right horizontal  ( r,  0)
//! ```
//!
//! y grows downward (screen convention), so points above the pivot have
//! negative y. [`polar_point`] encodes this mapping in one place.

use embedded_graphics::pixelcolor::Rgb565;

/// Convert degrees to radians.
#[inline]
pub const fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Convert radians to degrees.
#[inline]
pub const fn rad_to_deg(radians: f32) -> f32 {
    radians * (180.0 / std::f32::consts::PI)
}

/// A point or vector in logical (or device) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Point at `radius` from the pivot along needle angle `angle_deg`.
#[inline]
pub fn polar_point(angle_deg: f32, radius: f32) -> Vec2 {
    let rad = deg_to_rad(angle_deg);
    Vec2::new(-radius * rad.cos(), -radius * rad.sin())
}

/// One stroke operation: a straight line plus the attributes to draw it with.
///
/// Transient value object - built by a layer renderer, consumed by the
/// dispatcher, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Rgb565,
    pub width: f32,
    pub alpha: f32,
}

impl Segment {
    /// Build a segment from raw endpoint coordinates.
    ///
    /// No validation - callers guarantee finite values.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb565, width: f32, alpha: f32) -> Self {
        Self {
            from: Vec2::new(x0, y0),
            to: Vec2::new(x1, y1),
            color,
            width,
            alpha,
        }
    }
}
