//! Analog speedometer gauge widget with incremental needle animation.
//!
//! The crate turns a scalar value into a rendered gauge face - beveled
//! rim, gradient background, alternating graduations, colored warning
//! bands, numeric labels, and a needle - and animates the needle toward
//! a target value one discrete step per frame.
//!
//! # Pipeline
//!
//! Layer renderers in [`layers`] are pure: they translate the resolved
//! [`config::GaugeConfig`] (and the displayed value) into an ordered
//! [`frame::Frame`] of drawing commands in logical coordinates. The frame
//! dispatcher maps the commands through the gauge's view transform onto a
//! [`surface::Surface`]; [`surface::Canvas`] is the bundled framebuffer
//! implementation and doubles as an `embedded-graphics` draw target for
//! presentation.
//!
//! # Driving an animation
//!
//! [`registry::GaugeRegistry`] owns the per-gauge state and never
//! schedules anything itself. An animated draw returns a
//! [`registry::FrameRequest`]; the caller advances it from its own loop:
//!
//! ```
//! use speedo_gauge::{Canvas, DrawOutcome, GaugeRegistry};
//!
//! let mut registry = GaugeRegistry::new();
//! registry.attach_surface("demo", Canvas::new(440, 220));
//!
//! let mut outcome = registry.draw(80.0, "demo", true)?;
//! while let DrawOutcome::Scheduled(request) = outcome {
//!     // a real caller would present the surface and wait for its
//!     // frame tick here
//!     outcome = registry.advance(&request)?;
//! }
//! assert_eq!(registry.displayed_value("demo"), Some(80.0));
//! # Ok::<(), speedo_gauge::GaugeError>(())
//! ```

// Pixel math casts f32 <-> integer deliberately throughout
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod angle;
pub mod animation;
pub mod colors;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod layers;
pub mod registry;
pub mod surface;

pub use angle::value_to_angle;
pub use config::{ColorBand, GaugeConfig, GaugeOverrides, ViewTransform};
pub use error::GaugeError;
pub use frame::{DrawCommand, Frame, Paint};
pub use registry::{DrawOutcome, FrameRequest, GaugeRegistry};
pub use surface::{Canvas, Surface};
