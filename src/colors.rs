//! Color constants for the gauge layers.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! Standard colors come from the `RgbColor` trait constants where possible;
//! the band/rim shades are converted from the 8-bit sRGB values the gauge
//! face was designed with (value * channel_max / 255, rounded).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Background wash and canvas clear color.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Inner rim disc, labels, hub fill.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Needle and the top warning band.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Demo readout accent.
pub const GREEN: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Gauge Face Colors (application-specific)
// =============================================================================

/// Mid gray, from sRGB (127, 127, 127). Outer rim disc, ticks, hub outlines.
/// RGB565: (15, 31, 15).
pub const GAUGE_GRAY: Rgb565 = Rgb565::new(15, 31, 15);

/// Band green, from sRGB (82, 240, 55). Default low-range band.
/// RGB565: (10, 59, 7).
pub const BAND_GREEN: Rgb565 = Rgb565::new(10, 59, 7);

/// Band amber, from sRGB (198, 111, 0). Default mid-range band.
/// RGB565: (24, 27, 0).
pub const BAND_AMBER: Rgb565 = Rgb565::new(24, 27, 0);
