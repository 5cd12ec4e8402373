//! Pure layer renderers and their fixed composition order.
//!
//! Each layer is a pure function from the resolved config (and, for the
//! needle, the displayed value) to commands pushed onto a [`Frame`]. No
//! layer touches a surface; [`Frame::render`] replays the commands later.
//!
//! [`compose`] fixes the z-order. Later layers paint over earlier ones,
//! and the order is load-bearing: the background wash must sit on the rim
//! to blend its edge, the color arc must sit on the ticks, and the hub
//! must cover the needle base.

mod bezel;
mod needle;
mod scale;

pub use bezel::{face_wash, rim};
pub use needle::needle_and_hub;
pub use scale::{color_bands, labels, ticks};

use crate::{config::GaugeConfig, frame::Frame};

/// Compose one complete gauge image for `displayed`.
///
/// Order: rim, background wash, ticks, color arc, labels, needle + hub.
pub fn compose(config: &GaugeConfig, displayed: f32) -> Frame {
    let mut frame = Frame::new();
    rim(config, &mut frame);
    face_wash(config, &mut frame);
    ticks(config, &mut frame);
    color_bands(config, &mut frame);
    labels(config, &mut frame);
    needle_and_hub(config, displayed, &mut frame);
    frame
}
