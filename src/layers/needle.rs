//! Needle and hub.

use embedded_graphics::pixelcolor::Rgb565;

use crate::{
    angle::value_to_angle,
    colors::{GAUGE_GRAY, RED, WHITE},
    config::GaugeConfig,
    frame::{DrawCommand, Frame, Paint},
    geometry::{Segment, polar_point},
};

/// Alpha of the needle stroke and the first hub pass.
const NEEDLE_ALPHA: f32 = 0.6;

/// Alpha of the second hub pass.
const HUB_SHADE_ALPHA: f32 = 0.2;

/// Logical units the needle base sits away from the pivot.
const NEEDLE_BASE_RADIUS: f32 = 20.0;

/// The needle at `value_to_angle(displayed)` plus the two-pass hub that
/// anchors its base.
///
/// The hub works like the background wash: many translucent discs stacked
/// per pass. Pass one fills white with gray outlines, pass two shades the
/// same discs gray, which darkens the hub center where the passes overlap
/// the needle base.
pub fn needle_and_hub(config: &GaugeConfig, displayed: f32, frame: &mut Frame) {
    let angle = value_to_angle(displayed, config);
    let base = polar_point(angle, NEEDLE_BASE_RADIUS);
    let tip = polar_point(angle, config.radius);
    frame.push(DrawCommand::Stroke(Segment::new(
        base.x,
        base.y,
        tip.x,
        tip.y,
        RED,
        config.needle_width,
        NEEDLE_ALPHA,
    )));

    hub_pass(config, WHITE, NEEDLE_ALPHA, frame);
    hub_pass(config, GAUGE_GRAY, HUB_SHADE_ALPHA, frame);
}

/// One hub pass: for each integer radius in `hub_start..hub_stop`, a fill
/// disc followed by a gray half-circle outline.
fn hub_pass(config: &GaugeConfig, fill: Rgb565, alpha: f32, frame: &mut Frame) {
    for radius in config.hub_start..config.hub_stop {
        frame.push(DrawCommand::HalfDisc {
            radius: radius as f32,
            paint: Paint {
                color: fill,
                alpha,
                ..Paint::default()
            },
        });
        frame.push(DrawCommand::Band {
            radius: radius as f32,
            start_deg: 0.0,
            end_deg: 180.0,
            paint: Paint {
                color: GAUGE_GRAY,
                alpha,
                width: config.hub_line_width,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GaugeConfig, GaugeOverrides};
    use embedded_graphics::geometry::Size;

    const EPSILON: f32 = 1e-3;

    fn default_config() -> GaugeConfig {
        GaugeConfig::build(Size::new(440, 220), &GaugeOverrides::default(), true)
    }

    fn needle_segment(frame: &Frame) -> &Segment {
        match &frame.commands()[0] {
            DrawCommand::Stroke(segment) => segment,
            other => panic!("needle stroke must come first, got {other:?}"),
        }
    }

    #[test]
    fn test_needle_points_up_at_domain_midpoint() {
        // 40 over the default 0..80 domain maps to 90 degrees
        let config = default_config();
        let mut frame = Frame::new();
        needle_and_hub(&config, 40.0, &mut frame);

        let needle = needle_segment(&frame);
        assert!(needle.from.x.abs() < EPSILON, "base on the vertical axis");
        assert!((needle.from.y + 20.0).abs() < EPSILON, "base 20 units above the pivot");
        assert!(needle.to.x.abs() < EPSILON, "tip on the vertical axis");
        assert!((needle.to.y + 140.0).abs() < EPSILON, "tip at the dial radius");
        assert_eq!(needle.color, RED, "needle is red");
        assert!((needle.alpha - NEEDLE_ALPHA).abs() < 1e-6, "needle alpha");
    }

    #[test]
    fn test_needle_tracks_displayed_value() {
        let config = default_config();

        let mut low = Frame::new();
        needle_and_hub(&config, 0.0, &mut low);
        let mut high = Frame::new();
        needle_and_hub(&config, 80.0, &mut high);

        // Low values lean left, high values lean right
        assert!(needle_segment(&low).to.x < 0.0, "low needle tip leans left");
        assert!(needle_segment(&high).to.x > 0.0, "high needle tip leans right");
    }

    #[test]
    fn test_needle_clamps_out_of_domain() {
        let config = default_config();
        let mut frame = Frame::new();
        needle_and_hub(&config, 1e6, &mut frame);

        // Clamped to 175 degrees: tip near the right horizontal
        let needle = needle_segment(&frame);
        assert!(needle.to.x > 130.0, "clamped needle rests near the right horizontal");
        assert!(needle.to.y < 0.0, "clamped needle still above the pivot");
    }

    #[test]
    fn test_hub_pass_structure() {
        let config = default_config();
        let mut frame = Frame::new();
        needle_and_hub(&config, 40.0, &mut frame);
        let commands = frame.commands();

        // 1 needle stroke + 2 passes * 30 radii * (fill + outline)
        assert_eq!(commands.len(), 1 + 2 * 30 * 2, "hub command count");

        // Each pass alternates fill disc then outline arc
        match (&commands[1], &commands[2]) {
            (DrawCommand::HalfDisc { paint: fill, .. }, DrawCommand::Band { start_deg, end_deg, paint: line, .. }) => {
                assert_eq!(fill.color, WHITE, "first pass fills white");
                assert!((start_deg - 0.0).abs() < EPSILON && (end_deg - 180.0).abs() < EPSILON, "outline is a half circle");
                assert_eq!(line.color, GAUGE_GRAY, "outline is gray");
            }
            other => panic!("hub pass must alternate fill and outline, got {other:?}"),
        }

        // Second pass shades gray at low alpha
        match &commands[1 + 60] {
            DrawCommand::HalfDisc { paint, .. } => {
                assert_eq!(paint.color, GAUGE_GRAY, "second pass fills gray");
                assert!((paint.alpha - HUB_SHADE_ALPHA).abs() < 1e-6, "second pass alpha");
            }
            other => panic!("second hub pass expected, got {other:?}"),
        }
    }

    #[test]
    fn test_hub_respects_overridden_radii() {
        let overrides = GaugeOverrides {
            hub_start: Some(5),
            hub_stop: Some(8),
            ..GaugeOverrides::default()
        };
        let config = GaugeConfig::build(Size::new(440, 220), &overrides, true);
        let mut frame = Frame::new();
        needle_and_hub(&config, 40.0, &mut frame);
        assert_eq!(frame.len(), 1 + 2 * 3 * 2, "hub band follows the overridden radii");
    }
}
