//! Drawing surface abstraction and the bundled framebuffer implementation.
//!
//! The dispatcher in [`crate::frame`] talks to a [`Surface`]: a small set of
//! alpha-aware primitives (half-disc fill, arc stroke, line stroke, centered
//! label) in device pixel coordinates. [`Canvas`] is the crate's own
//! implementation - an owned Rgb565 framebuffer - and doubles as an
//! `embedded-graphics` [`DrawTarget`] so callers can draw extra content on
//! top of a rendered gauge and blit the result to any display.
//!
//! # Alpha Compositing
//!
//! The gauge face relies on translucent stacking (the background wash is
//! ten low-alpha discs, the rim is two half-alpha fills), so every
//! primitive blends instead of overwriting. Blending uses fixed-point
//! integer math on the unpacked 5-6-5 components:
//!
//! ```text
//! out = dst + ((src - dst) * (alpha * 256)) >> 8    per component
//! ```
//!
//! # Edge Coverage
//!
//! The rasterizers compute a signed distance per pixel and fade alpha over
//! the last pixel at a shape's edge, which reads as one pixel of
//! anti-aliasing. Angular cuts at the ends of an arc stay hard (butt
//! caps).

use core::convert::Infallible;

use embedded_graphics::{
    Drawable, Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::IntoStorage,
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};

use crate::{
    colors::BLACK,
    geometry::{Vec2, rad_to_deg},
};

/// Labels are centered horizontally on their anchor and hang below it.
const LABEL_POSITION: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

/// Alpha-aware drawing primitives in device pixel coordinates.
///
/// Implementors report their size through [`OriginDimensions`]; the
/// registry uses it to fit the view transform and to reject unusable
/// zero-area surfaces.
pub trait Surface: OriginDimensions {
    /// Wipe the whole surface back to its background.
    fn clear_frame(&mut self);

    /// Fill the half-disc above `center` (the chord lies on the row of
    /// `center`, nothing below it is touched).
    fn fill_half_disc(&mut self, center: Vec2, radius: f32, color: Rgb565, alpha: f32);

    /// Stroke an arc about `center` spanning `[start_deg, end_deg]` in
    /// needle-angle degrees (0 = left horizontal, 90 = up), `width` thick,
    /// centered on `radius`.
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        width: f32,
        color: Rgb565,
        alpha: f32,
    );

    /// Stroke a straight line between two points.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb565, alpha: f32);

    /// Draw `text` centered horizontally on `anchor`, top-aligned.
    fn draw_label(&mut self, anchor: Vec2, text: &str, font: &'static MonoFont<'static>, color: Rgb565, alpha: f32);
}

// =============================================================================
// Framebuffer Canvas
// =============================================================================

/// Owned Rgb565 framebuffer implementing [`Surface`].
pub struct Canvas {
    width: u32,
    height: u32,
    background: Rgb565,
    pixels: Vec<Rgb565>,
}

impl Canvas {
    /// Create a canvas cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, BLACK)
    }

    /// Create a canvas cleared to `background`.
    pub fn with_background(width: u32, height: u32, background: Rgb565) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; (width * height) as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, or `None` outside the framebuffer.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Row-major iterator over every pixel, for blitting to a display.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb565> + '_ {
        self.pixels.iter().copied()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Blend `color` over the pixel at `(x, y)`. Out-of-bounds writes and
    /// non-positive alpha are no-ops; alpha above 1.0 saturates.
    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb565, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = blend_rgb565(self.pixels[index], color, alpha.min(1.0));
        }
    }
}

/// Blend `src` over `dst` at `alpha` in Rgb565 space.
///
/// Components are unpacked from the 5-6-5 layout, mixed with 8-bit
/// fixed-point math, clamped and reassembled. `alpha` must already be
/// clamped to [0, 1].
fn blend_rgb565(dst: Rgb565, src: Rgb565, alpha: f32) -> Rgb565 {
    let dst_raw = dst.into_storage();
    let src_raw = src.into_storage();

    let dst_r = i32::from((dst_raw >> 11) & 0x1F);
    let dst_g = i32::from((dst_raw >> 5) & 0x3F);
    let dst_b = i32::from(dst_raw & 0x1F);

    let src_r = i32::from((src_raw >> 11) & 0x1F);
    let src_g = i32::from((src_raw >> 5) & 0x3F);
    let src_b = i32::from(src_raw & 0x1F);

    let alpha_fixed = (alpha * 256.0) as i32; // 8 bits fractional

    let mix = |from: i32, to: i32| -> i32 { from + (((to - from) * alpha_fixed) >> 8) };

    let r = mix(dst_r, src_r).clamp(0, 31) as u8;
    let g = mix(dst_g, src_g).clamp(0, 63) as u8;
    let b = mix(dst_b, src_b).clamp(0, 31) as u8;

    Rgb565::new(r, g, b)
}

impl Surface for Canvas {
    fn clear_frame(&mut self) {
        self.pixels.fill(self.background);
    }

    fn fill_half_disc(&mut self, center: Vec2, radius: f32, color: Rgb565, alpha: f32) {
        let reach = radius + 1.0;
        let x_min = ((center.x - reach).floor() as i32).max(0);
        let x_max = ((center.x + reach).ceil() as i32).min(self.width as i32 - 1);
        let y_min = ((center.y - reach).floor() as i32).max(0);
        let y_max = (center.y.floor() as i32).min(self.height as i32 - 1);

        for y in y_min..=y_max {
            let dy = y as f32 + 0.5 - center.y;
            if dy > 0.0 {
                continue;
            }
            for x in x_min..=x_max {
                let dx = x as f32 + 0.5 - center.x;
                let distance = (dx * dx + dy * dy).sqrt();
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        width: f32,
        color: Rgb565,
        alpha: f32,
    ) {
        let half = width * 0.5;
        let reach = radius + half + 1.0;
        let x_min = ((center.x - reach).floor() as i32).max(0);
        let x_max = ((center.x + reach).ceil() as i32).min(self.width as i32 - 1);
        let y_min = ((center.y - reach).floor() as i32).max(0);
        let y_max = (center.y.floor() as i32).min(self.height as i32 - 1);

        for y in y_min..=y_max {
            let dy = y as f32 + 0.5 - center.y;
            if dy > 0.0 {
                continue;
            }
            for x in x_min..=x_max {
                let dx = x as f32 + 0.5 - center.x;
                let angle = rad_to_deg((-dy).atan2(-dx));
                if angle < start_deg || angle > end_deg {
                    continue;
                }
                let distance = (dx * dx + dy * dy).sqrt();
                let coverage = (half + 0.5 - (distance - radius).abs()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb565, alpha: f32) {
        let half = width * 0.5;
        let reach = half + 1.0;
        let x_min = ((from.x.min(to.x) - reach).floor() as i32).max(0);
        let x_max = ((from.x.max(to.x) + reach).ceil() as i32).min(self.width as i32 - 1);
        let y_min = ((from.y.min(to.y) - reach).floor() as i32).max(0);
        let y_max = ((from.y.max(to.y) + reach).ceil() as i32).min(self.height as i32 - 1);

        let direction_x = to.x - from.x;
        let direction_y = to.y - from.y;
        let length_sq = direction_x * direction_x + direction_y * direction_y;

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let px = x as f32 + 0.5 - from.x;
                let py = y as f32 + 0.5 - from.y;

                // Project onto the segment, clamped to the endpoints
                let t = if length_sq > 0.0 {
                    ((px * direction_x + py * direction_y) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let ex = px - t * direction_x;
                let ey = py - t * direction_y;
                let distance = (ex * ex + ey * ey).sqrt();

                let coverage = (half + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }

    fn draw_label(&mut self, anchor: Vec2, text: &str, font: &'static MonoFont<'static>, color: Rgb565, alpha: f32) {
        let position = Point::new(anchor.x.round() as i32, anchor.y.round() as i32);
        let character_style = MonoTextStyle::new(font, color);
        let mut layer = AlphaLayer { canvas: self, alpha };
        Text::with_text_style(text, position, character_style, LABEL_POSITION)
            .draw(&mut layer)
            .ok();
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = self.index(point.x, point.y) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}

/// Borrowed view of a [`Canvas`] that blends every drawn pixel at a fixed
/// alpha. Lets `embedded-graphics` text rendering participate in the same
/// compositing model as the shape rasterizers.
struct AlphaLayer<'a> {
    canvas: &'a mut Canvas,
    alpha: f32,
}

impl OriginDimensions for AlphaLayer<'_> {
    fn size(&self) -> Size {
        self.canvas.size()
    }
}

impl DrawTarget for AlphaLayer<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.canvas.blend_pixel(point.x, point.y, color, self.alpha);
        }
        Ok(())
    }
}
