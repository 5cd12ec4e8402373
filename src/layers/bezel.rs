//! Metallic rim and background wash.

use crate::{
    colors::{BLACK, GAUGE_GRAY},
    config::GaugeConfig,
    frame::{DrawCommand, Frame, Paint},
};

/// Alpha of each background wash pass. Ten passes accumulate to a nearly
/// opaque face with a soft outer edge.
const WASH_ALPHA: f32 = 0.2;

/// Beveled metallic border: a gray half-disc with a white half-disc
/// overlapping it at 90% radius.
///
/// Both fills run at the default alpha; the translucent stacking over the
/// cleared background is what reads as a bevel.
pub fn rim(config: &GaugeConfig, frame: &mut Frame) {
    frame.push(DrawCommand::HalfDisc {
        radius: config.rim_radius,
        paint: Paint {
            color: GAUGE_GRAY,
            ..Paint::default()
        },
    });
    frame.push(DrawCommand::HalfDisc {
        radius: config.rim_radius * 0.9,
        paint: Paint::default(),
    });
}

/// Soft gradient face: one low-alpha black half-disc per integer radius in
/// `back_start..back_stop`.
///
/// Deliberately a multi-pass blend rather than a single gradient fill.
/// Radii inside the innermost disc receive every pass and go nearly
/// black; each ring outward receives one pass fewer, fading the face into
/// the rim.
pub fn face_wash(config: &GaugeConfig, frame: &mut Frame) {
    for radius in config.back_start..config.back_stop {
        frame.push(DrawCommand::HalfDisc {
            radius: radius as f32,
            paint: Paint {
                color: BLACK,
                alpha: WASH_ALPHA,
                ..Paint::default()
            },
        });
    }
}
