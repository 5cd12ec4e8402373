//! Graduations: tick marks, color-band arcs, numeric labels.

use core::fmt::Write;

use crate::{
    angle::{SWEEP_SPAN_DEG, SWEEP_START_DEG, value_to_angle},
    colors::GAUGE_GRAY,
    config::GaugeConfig,
    frame::{DrawCommand, Frame, Paint},
    geometry::{Segment, polar_point},
};

/// Alpha of the tick strokes.
const TICK_ALPHA: f32 = 0.6;

/// Logical units each label anchor is lifted above its arc position.
const LABEL_LIFT: f32 = 5.0;

/// Radial graduation marks, alternating major and minor starting with a
/// major at 10 degrees.
///
/// Each tick is a line through the tick band center (the outer edge of
/// the color arc), extending its half-length to each side.
pub fn ticks(config: &GaugeConfig, frame: &mut Frame) {
    let deg_step = SWEEP_SPAN_DEG / (2 * config.num_major_ticks) as f32;
    let band_center = config.color_arc_radius + 0.5 * config.color_arc_width;

    for i in 0..=2 * config.num_major_ticks {
        let angle = SWEEP_START_DEG + i as f32 * deg_step;
        let major = i % 2 == 0;
        let (width, half_length) = if major {
            (config.major_tick_width, config.major_tick_length)
        } else {
            (config.minor_tick_width, config.minor_tick_length)
        };

        let inner = polar_point(angle, band_center - half_length);
        let outer = polar_point(angle, band_center + half_length);
        frame.push(DrawCommand::Stroke(Segment::new(
            inner.x, inner.y, outer.x, outer.y, GAUGE_GRAY, width, TICK_ALPHA,
        )));
    }
}

/// One arc stroke per configured [`ColorBand`](crate::config::ColorBand),
/// in declared order.
///
/// Band endpoints go through the same value-to-angle mapping as the
/// needle, so out-of-domain band values clamp to the sweep ends instead
/// of spilling past them. Later bands paint over earlier ones where they
/// overlap.
pub fn color_bands(config: &GaugeConfig, frame: &mut Frame) {
    for band in &config.bands {
        frame.push(DrawCommand::Band {
            radius: config.color_arc_radius,
            start_deg: value_to_angle(band.from_value, config),
            end_deg: value_to_angle(band.to_value, config),
            paint: Paint {
                color: band.color,
                alpha: band.alpha,
                width: config.color_arc_width,
            },
        });
    }
}

/// Numeric value labels at the major tick positions.
///
/// Values start at `start_value` and advance by `tick_delta` per major
/// tick; anchors sit outside the dial radius and are lifted slightly so
/// the text clears the tick ends.
pub fn labels(config: &GaugeConfig, frame: &mut Frame) {
    let deg_step = SWEEP_SPAN_DEG / config.num_major_ticks as f32;
    let arc_offset = config.radius + config.text_arc_offset;

    for i in 0..=config.num_major_ticks {
        let angle = SWEEP_START_DEG + i as f32 * deg_step;
        let value = config.start_value + i as f32 * config.tick_delta;

        let mut anchor = polar_point(angle, arc_offset);
        anchor.y -= LABEL_LIFT;

        let mut text = heapless::String::new();
        write!(text, "{value}").ok();
        frame.push(DrawCommand::Label {
            text,
            anchor,
            paint: Paint::default(),
        });
    }
}
