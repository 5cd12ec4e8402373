//! Retained-mode frame: drawing commands and the dispatcher that replays
//! them onto a surface.
//!
//! Layer renderers never touch a surface directly. They push
//! [`DrawCommand`]s - expressed in logical, pivot-relative coordinates -
//! onto a [`Frame`], and [`Frame::render`] replays the list through the
//! [`ViewTransform`]. Every command carries a complete [`Paint`], so a
//! stateful surface can never leak stroke/fill attributes from one layer
//! into the next: what a command draws with is decided when it is built,
//! starting from [`Paint::default`].

use embedded_graphics::{mono_font::MonoFont, pixelcolor::Rgb565};
use heapless::String;

use crate::{
    colors::WHITE,
    config::{DEFAULT_LINE_WIDTH, ViewTransform},
    geometry::{Segment, Vec2},
    surface::Surface,
};

/// Maximum characters in one tick label.
pub const LABEL_MAX_LEN: usize = 12;

/// Alpha every command starts from unless a layer overrides it.
pub const DEFAULT_ALPHA: f32 = 0.5;

/// Drawing attributes for one command.
///
/// [`Paint::default`] is the shared reset - white, half alpha, the default
/// line width - and layers override only the attributes they care about:
///
/// ```
/// use speedo_gauge::frame::Paint;
/// use speedo_gauge::colors::GAUGE_GRAY;
///
/// let tick_paint = Paint {
///     color: GAUGE_GRAY,
///     alpha: 0.6,
///     ..Paint::default()
/// };
/// # let _ = tick_paint;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb565,
    pub alpha: f32,
    /// Stroke width in logical units. Ignored by fills and labels.
    pub width: f32,
}

impl Paint {
    #[inline]
    pub const fn new(color: Rgb565, alpha: f32, width: f32) -> Self {
        Self { color, alpha, width }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new(WHITE, DEFAULT_ALPHA, DEFAULT_LINE_WIDTH)
    }
}

/// One primitive drawing operation in logical, pivot-relative coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled half-disc above the pivot (the chord lies on the pivot line).
    HalfDisc { radius: f32, paint: Paint },
    /// Stroked arc about the pivot spanning `[start_deg, end_deg]` in
    /// needle-angle degrees, centered on `radius`.
    Band {
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        paint: Paint,
    },
    /// Straight stroke between two logical points.
    Stroke(Segment),
    /// Text centered horizontally on `anchor`, top-aligned vertically.
    Label {
        text: String<LABEL_MAX_LEN>,
        anchor: Vec2,
        paint: Paint,
    },
}

/// An ordered list of drawing commands composing one gauge image.
#[derive(Debug, Default)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear the surface and replay every command through `transform`.
    ///
    /// Positions are mapped from pivot-relative logical coordinates into
    /// device pixels; radii and stroke widths scale by the same factor, so
    /// the gauge renders identically at any surface size. `font` is the
    /// face used for label commands (the configured label font).
    pub fn render<S: Surface>(&self, transform: &ViewTransform, font: &'static MonoFont<'static>, surface: &mut S) {
        surface.clear_frame();
        let pivot = transform.apply(Vec2::new(0.0, 0.0));

        for command in &self.commands {
            match command {
                DrawCommand::HalfDisc { radius, paint } => {
                    surface.fill_half_disc(pivot, transform.scale_len(*radius), paint.color, paint.alpha);
                }
                DrawCommand::Band {
                    radius,
                    start_deg,
                    end_deg,
                    paint,
                } => {
                    surface.stroke_arc(
                        pivot,
                        transform.scale_len(*radius),
                        *start_deg,
                        *end_deg,
                        transform.scale_len(paint.width),
                        paint.color,
                        paint.alpha,
                    );
                }
                DrawCommand::Stroke(segment) => {
                    surface.stroke_line(
                        transform.apply(segment.from),
                        transform.apply(segment.to),
                        transform.scale_len(segment.width),
                        segment.color,
                        segment.alpha,
                    );
                }
                DrawCommand::Label { text, anchor, paint } => {
                    surface.draw_label(transform.apply(*anchor), text, font, paint.color, paint.alpha);
                }
            }
        }
    }
}
