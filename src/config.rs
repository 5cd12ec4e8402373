//! Gauge configuration: default profile, user overrides, view fitting.
//!
//! A [`GaugeConfig`] is immutable after construction. [`GaugeConfig::build`]
//! starts from the default profile below, applies any [`GaugeOverrides`]
//! fields that are present (shallow - the color-band list is replaced
//! wholesale, never merged element-wise), then recomputes the derived
//! `color_arc_radius` and fits the [`ViewTransform`] to the device surface.
//!
//! # Logical Design Canvas
//!
//! All layer geometry is authored against a fixed 440x220 logical canvas
//! with the needle pivot at its bottom center. The [`ViewTransform`] maps
//! that canvas onto whatever surface the gauge actually draws to,
//! preserving the 2:1 aspect ratio and optionally centering the slack.

use embedded_graphics::{
    geometry::Size,
    mono_font::{MonoFont, ascii::FONT_6X10},
    pixelcolor::Rgb565,
};

use crate::{
    colors::{BAND_AMBER, BAND_GREEN, RED},
    geometry::Vec2,
};

// =============================================================================
// Logical Design Canvas
// =============================================================================

/// Width of the logical canvas the gauge is designed against.
pub const LOGICAL_WIDTH: f32 = 440.0;

/// Height of the logical canvas the gauge is designed against.
pub const LOGICAL_HEIGHT: f32 = 220.0;

/// Needle pivot x in logical canvas coordinates (bottom center).
pub const PIVOT_X: f32 = LOGICAL_WIDTH * 0.5;

/// Needle pivot y in logical canvas coordinates (bottom center).
pub const PIVOT_Y: f32 = LOGICAL_HEIGHT;

// =============================================================================
// Default Profile
// =============================================================================

/// Value at the first major graduation.
pub const DEFAULT_START_VALUE: f32 = 0.0;

/// Number of major graduations across the sweep.
pub const DEFAULT_NUM_MAJOR_TICKS: u32 = 8;

/// Numerical increase per major graduation.
pub const DEFAULT_TICK_DELTA: f32 = 10.0;

/// Radius of the dial (needle length, label reference).
pub const DEFAULT_RADIUS: f32 = 140.0;

/// Outer radius of the metallic rim.
pub const DEFAULT_RIM_RADIUS: f32 = 200.0;

/// First radius of the background wash band.
pub const DEFAULT_BACK_START: u32 = 170;

/// One past the last radius of the background wash band.
pub const DEFAULT_BACK_STOP: u32 = 180;

/// Line width commands fall back to when a layer does not override it.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Stroke width of minor ticks.
pub const DEFAULT_MINOR_TICK_WIDTH: f32 = 3.0;

/// Half-length of minor ticks (they extend this far to each side of the
/// tick band center).
pub const DEFAULT_MINOR_TICK_LENGTH: f32 = 5.0;

/// Stroke width of major ticks.
pub const DEFAULT_MAJOR_TICK_WIDTH: f32 = 3.0;

/// Half-length of major ticks.
pub const DEFAULT_MAJOR_TICK_LENGTH: f32 = 10.0;

/// Distance from the dial radius down to the color arc center line.
pub const DEFAULT_COLOR_ARC_OFFSET: f32 = 10.0;

/// Stroke width of the color arc.
pub const DEFAULT_COLOR_ARC_WIDTH: f32 = 5.0;

/// Distance from the dial radius out to the label anchors.
pub const DEFAULT_TEXT_ARC_OFFSET: f32 = 10.0;

/// Stroke width of the needle.
pub const DEFAULT_NEEDLE_WIDTH: f32 = 3.0;

/// Stroke width of the hub disc outlines.
pub const DEFAULT_HUB_LINE_WIDTH: f32 = 3.0;

/// First radius of the hub disc stack.
pub const DEFAULT_HUB_START: u32 = 0;

/// One past the last radius of the hub disc stack.
pub const DEFAULT_HUB_STOP: u32 = 30;

/// Font used for the numeric tick labels.
pub const DEFAULT_LABEL_FONT: &MonoFont<'static> = &FONT_6X10;

/// A colored arc segment over a sub-range of the value domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBand {
    pub alpha: f32,
    pub color: Rgb565,
    pub from_value: f32,
    pub to_value: f32,
}

impl ColorBand {
    #[inline]
    pub const fn new(alpha: f32, color: Rgb565, from_value: f32, to_value: f32) -> Self {
        Self {
            alpha,
            color,
            from_value,
            to_value,
        }
    }
}

/// Default warning zones: green up to 45, amber to 65, red above.
/// The green band deliberately starts far below the domain so it always
/// clamps to the sweep floor.
pub const DEFAULT_BANDS: [ColorBand; 3] = [
    ColorBand::new(1.0, BAND_GREEN, -100.0, 45.0),
    ColorBand::new(1.0, BAND_AMBER, 45.0, 65.0),
    ColorBand::new(1.0, RED, 65.0, 100.0),
];

// =============================================================================
// View Transform
// =============================================================================

/// Scale + offset mapping the logical design canvas onto a device surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Uniform scale from logical units to device pixels.
    pub scale: f32,
    /// Device pixels of slack distributed left of the gauge.
    pub x_offset: f32,
    /// Device pixels of slack distributed above the gauge.
    pub y_offset: f32,
}

impl ViewTransform {
    /// Fit the logical canvas into `surface`, preserving aspect ratio.
    ///
    /// Surfaces wider than the 2:1 logical ratio scale by height and leave
    /// slack width; others scale by width and leave slack height. With
    /// `center` the slack is split evenly, otherwise the gauge hugs the
    /// top-left corner.
    pub fn fit(surface: Size, center: bool) -> Self {
        let width = surface.width as f32;
        let height = surface.height as f32;

        if width / height > LOGICAL_WIDTH / LOGICAL_HEIGHT {
            let scale = height / LOGICAL_HEIGHT;
            let x_offset = if center { (width - LOGICAL_WIDTH * scale) * 0.5 } else { 0.0 };
            Self {
                scale,
                x_offset,
                y_offset: 0.0,
            }
        } else {
            let scale = width / LOGICAL_WIDTH;
            let y_offset = if center { (height - LOGICAL_HEIGHT * scale) * 0.5 } else { 0.0 };
            Self {
                scale,
                x_offset: 0.0,
                y_offset,
            }
        }
    }

    /// Map a pivot-relative logical point into device pixels.
    #[inline]
    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            (point.x + PIVOT_X) * self.scale + self.x_offset,
            (point.y + PIVOT_Y) * self.scale + self.y_offset,
        )
    }

    /// Scale a logical length (radius, stroke width) into device pixels.
    #[inline]
    pub fn scale_len(&self, length: f32) -> f32 {
        length * self.scale
    }
}

// =============================================================================
// Configuration Builder
// =============================================================================

/// Partial configuration: every field that is `Some` replaces the default.
///
/// Absent fields keep their defaults, so callers only spell out what they
/// change:
///
/// ```
/// use speedo_gauge::config::GaugeOverrides;
///
/// let overrides = GaugeOverrides {
///     num_major_ticks: Some(10),
///     ..GaugeOverrides::default()
/// };
/// # let _ = overrides;
/// ```
#[derive(Clone, Default)]
pub struct GaugeOverrides {
    pub start_value: Option<f32>,
    pub num_major_ticks: Option<u32>,
    pub tick_delta: Option<f32>,
    pub radius: Option<f32>,
    pub rim_radius: Option<f32>,
    pub back_start: Option<u32>,
    pub back_stop: Option<u32>,
    pub default_line_width: Option<f32>,
    pub minor_tick_width: Option<f32>,
    pub minor_tick_length: Option<f32>,
    pub major_tick_width: Option<f32>,
    pub major_tick_length: Option<f32>,
    pub color_arc_offset: Option<f32>,
    pub color_arc_width: Option<f32>,
    pub text_arc_offset: Option<f32>,
    pub needle_width: Option<f32>,
    pub hub_line_width: Option<f32>,
    pub hub_start: Option<u32>,
    pub hub_stop: Option<u32>,
    pub label_font: Option<&'static MonoFont<'static>>,
    pub bands: Option<Vec<ColorBand>>,
}

/// Complete resolved gauge profile. Immutable after [`GaugeConfig::build`].
#[derive(Clone)]
pub struct GaugeConfig {
    pub start_value: f32,
    pub num_major_ticks: u32,
    pub tick_delta: f32,
    pub radius: f32,
    pub rim_radius: f32,
    pub back_start: u32,
    pub back_stop: u32,
    pub default_line_width: f32,
    pub minor_tick_width: f32,
    pub minor_tick_length: f32,
    pub major_tick_width: f32,
    pub major_tick_length: f32,
    pub color_arc_offset: f32,
    pub color_arc_width: f32,
    /// Derived: `radius - (color_arc_offset + 0.5 * color_arc_width)`.
    /// Always recomputed after overrides, never set directly.
    pub color_arc_radius: f32,
    pub text_arc_offset: f32,
    pub needle_width: f32,
    pub hub_line_width: f32,
    pub hub_start: u32,
    pub hub_stop: u32,
    pub label_font: &'static MonoFont<'static>,
    pub bands: Vec<ColorBand>,
    pub transform: ViewTransform,
}

impl GaugeConfig {
    /// Resolve a complete configuration for a surface of the given size.
    pub fn build(surface: Size, overrides: &GaugeOverrides, center: bool) -> Self {
        let mut config = Self {
            start_value: DEFAULT_START_VALUE,
            num_major_ticks: DEFAULT_NUM_MAJOR_TICKS,
            tick_delta: DEFAULT_TICK_DELTA,
            radius: DEFAULT_RADIUS,
            rim_radius: DEFAULT_RIM_RADIUS,
            back_start: DEFAULT_BACK_START,
            back_stop: DEFAULT_BACK_STOP,
            default_line_width: DEFAULT_LINE_WIDTH,
            minor_tick_width: DEFAULT_MINOR_TICK_WIDTH,
            minor_tick_length: DEFAULT_MINOR_TICK_LENGTH,
            major_tick_width: DEFAULT_MAJOR_TICK_WIDTH,
            major_tick_length: DEFAULT_MAJOR_TICK_LENGTH,
            color_arc_offset: DEFAULT_COLOR_ARC_OFFSET,
            color_arc_width: DEFAULT_COLOR_ARC_WIDTH,
            color_arc_radius: 0.0, // recomputed below
            text_arc_offset: DEFAULT_TEXT_ARC_OFFSET,
            needle_width: DEFAULT_NEEDLE_WIDTH,
            hub_line_width: DEFAULT_HUB_LINE_WIDTH,
            hub_start: DEFAULT_HUB_START,
            hub_stop: DEFAULT_HUB_STOP,
            label_font: DEFAULT_LABEL_FONT,
            bands: DEFAULT_BANDS.to_vec(),
            transform: ViewTransform::fit(surface, center),
        };
        config.apply_overrides(overrides);
        config
    }

    /// Total span of the value domain.
    #[inline]
    pub fn domain_range(&self) -> f32 {
        self.num_major_ticks as f32 * self.tick_delta
    }

    fn apply_overrides(&mut self, overrides: &GaugeOverrides) {
        if let Some(value) = overrides.start_value {
            self.start_value = value;
        }
        if let Some(value) = overrides.num_major_ticks {
            self.num_major_ticks = value;
        }
        if let Some(value) = overrides.tick_delta {
            self.tick_delta = value;
        }
        if let Some(value) = overrides.radius {
            self.radius = value;
        }
        if let Some(value) = overrides.rim_radius {
            self.rim_radius = value;
        }
        if let Some(value) = overrides.back_start {
            self.back_start = value;
        }
        if let Some(value) = overrides.back_stop {
            self.back_stop = value;
        }
        if let Some(value) = overrides.default_line_width {
            self.default_line_width = value;
        }
        if let Some(value) = overrides.minor_tick_width {
            self.minor_tick_width = value;
        }
        if let Some(value) = overrides.minor_tick_length {
            self.minor_tick_length = value;
        }
        if let Some(value) = overrides.major_tick_width {
            self.major_tick_width = value;
        }
        if let Some(value) = overrides.major_tick_length {
            self.major_tick_length = value;
        }
        if let Some(value) = overrides.color_arc_offset {
            self.color_arc_offset = value;
        }
        if let Some(value) = overrides.color_arc_width {
            self.color_arc_width = value;
        }
        if let Some(value) = overrides.text_arc_offset {
            self.text_arc_offset = value;
        }
        if let Some(value) = overrides.needle_width {
            self.needle_width = value;
        }
        if let Some(value) = overrides.hub_line_width {
            self.hub_line_width = value;
        }
        if let Some(value) = overrides.hub_start {
            self.hub_start = value;
        }
        if let Some(value) = overrides.hub_stop {
            self.hub_stop = value;
        }
        if let Some(font) = overrides.label_font {
            self.label_font = font;
        }
        if let Some(bands) = &overrides.bands {
            self.bands = bands.clone();
        }

        // Derived field: depends on radius-related overrides above
        self.color_arc_radius = self.radius - (self.color_arc_offset + 0.5 * self.color_arc_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BAND_GREEN;
    use embedded_graphics::mono_font::ascii::FONT_10X20;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_default_profile() {
        let config = GaugeConfig::build(Size::new(440, 220), &GaugeOverrides::default(), true);
        assert!((config.start_value - 0.0).abs() < EPSILON, "start value");
        assert_eq!(config.num_major_ticks, 8, "major tick count");
        assert!((config.tick_delta - 10.0).abs() < EPSILON, "tick delta");
        assert!((config.radius - 140.0).abs() < EPSILON, "radius");
        assert!((config.rim_radius - 200.0).abs() < EPSILON, "rim radius");
        assert_eq!(config.bands.len(), 3, "default band count");
        assert!((config.domain_range() - 80.0).abs() < EPSILON, "domain range");
    }

    #[test]
    fn test_default_derived_color_arc_radius() {
        // 140 - (10 + 0.5 * 5) = 127.5
        let config = GaugeConfig::build(Size::new(440, 220), &GaugeOverrides::default(), true);
        assert!(
            (config.color_arc_radius - 127.5).abs() < EPSILON,
            "color_arc_radius should derive from radius and arc fields, got {}",
            config.color_arc_radius
        );
    }

    #[test]
    fn test_override_replaces_field_and_recomputes_derived() {
        let overrides = GaugeOverrides {
            num_major_ticks: Some(10),
            radius: Some(200.0),
            ..GaugeOverrides::default()
        };
        let config = GaugeConfig::build(Size::new(440, 220), &overrides, true);
        assert_eq!(config.num_major_ticks, 10, "overridden tick count");
        assert!((config.radius - 200.0).abs() < EPSILON, "overridden radius");
        // 200 - (10 + 2.5) = 187.5
        assert!(
            (config.color_arc_radius - 187.5).abs() < EPSILON,
            "derived radius must follow the overridden radius"
        );
        // Untouched fields keep their defaults
        assert!((config.tick_delta - 10.0).abs() < EPSILON, "tick delta untouched");
    }

    #[test]
    fn test_band_list_replaced_wholesale() {
        let overrides = GaugeOverrides {
            bands: Some(vec![ColorBand::new(0.8, BAND_GREEN, 0.0, 80.0)]),
            ..GaugeOverrides::default()
        };
        let config = GaugeConfig::build(Size::new(440, 220), &overrides, true);
        assert_eq!(config.bands.len(), 1, "band list should be replaced, not merged");
        assert!((config.bands[0].alpha - 0.8).abs() < EPSILON, "band alpha");
    }

    #[test]
    fn test_label_font_override() {
        let overrides = GaugeOverrides {
            label_font: Some(&FONT_10X20),
            ..GaugeOverrides::default()
        };
        let config = GaugeConfig::build(Size::new(440, 220), &overrides, true);
        assert_eq!(
            config.label_font.character_size,
            Size::new(10, 20),
            "overridden label font should be the 10x20 face"
        );
    }

    // -------------------------------------------------------------------------
    // View Transform Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_fit_exact_ratio_is_identity() {
        let transform = ViewTransform::fit(Size::new(440, 220), true);
        assert!((transform.scale - 1.0).abs() < EPSILON, "scale");
        assert!(transform.x_offset.abs() < EPSILON, "x offset");
        assert!(transform.y_offset.abs() < EPSILON, "y offset");
    }

    #[test]
    fn test_fit_wide_surface_scales_by_height() {
        let transform = ViewTransform::fit(Size::new(880, 220), true);
        assert!((transform.scale - 1.0).abs() < EPSILON, "scale from height");
        assert!(
            (transform.x_offset - 220.0).abs() < EPSILON,
            "centered slack width should split evenly"
        );
        assert!(transform.y_offset.abs() < EPSILON, "no vertical slack");

        let uncentered = ViewTransform::fit(Size::new(880, 220), false);
        assert!(uncentered.x_offset.abs() < EPSILON, "uncentered slack stays left");
    }

    #[test]
    fn test_fit_tall_surface_scales_by_width() {
        let transform = ViewTransform::fit(Size::new(440, 440), true);
        assert!((transform.scale - 1.0).abs() < EPSILON, "scale from width");
        assert!(transform.x_offset.abs() < EPSILON, "no horizontal slack");
        assert!(
            (transform.y_offset - 110.0).abs() < EPSILON,
            "centered slack height should split evenly"
        );
    }

    #[test]
    fn test_fit_half_size_surface() {
        let transform = ViewTransform::fit(Size::new(220, 110), true);
        assert!((transform.scale - 0.5).abs() < EPSILON, "half-size scale");
        assert!(transform.x_offset.abs() < EPSILON, "no x slack at exact ratio");
        assert!(transform.y_offset.abs() < EPSILON, "no y slack at exact ratio");
    }

    #[test]
    fn test_apply_maps_pivot_to_device() {
        let transform = ViewTransform::fit(Size::new(220, 110), true);
        let pivot = transform.apply(Vec2::new(0.0, 0.0));
        assert!((pivot.x - 110.0).abs() < EPSILON, "pivot x at half scale");
        assert!((pivot.y - 110.0).abs() < EPSILON, "pivot y at half scale");

        let tip = transform.apply(Vec2::new(0.0, -140.0));
        assert!((tip.y - 40.0).abs() < EPSILON, "point above pivot maps upward");
    }

    #[test]
    fn test_scale_len() {
        let transform = ViewTransform::fit(Size::new(220, 110), true);
        assert!((transform.scale_len(140.0) - 70.0).abs() < EPSILON, "length scaling");
    }
}
