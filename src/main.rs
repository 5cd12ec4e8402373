// Pixel math casts f32 <-> integer deliberately throughout
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

//! Desktop simulator demo for the speedometer gauge.
//!
//! Hosts one gauge in an `embedded-graphics-simulator` window with a
//! digital readout underneath, and acts as the reference caller-driven
//! scheduler: the main loop holds the latest [`FrameRequest`] and
//! advances it once per frame tick.
//!
//! # Controls
//!
//! - **Up / Down** - move the target by one major tick, animated
//! - **0-9** - jump the target across the value domain
//! - **R** - re-create the gauge (outstanding animation frames go stale)
//! - **Esc** or window close - quit
//!
//! Set `RUST_LOG=trace` to watch the draw/advance stream.

use core::fmt::Write as _;
use std::{
    thread,
    time::{Duration, Instant},
};

use embedded_graphics::{
    Drawable, Pixel,
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use profont::PROFONT_24_POINT;
use speedo_gauge::{
    Canvas, DrawOutcome, FrameRequest, GaugeError, GaugeOverrides, GaugeRegistry,
    colors::{BLACK, GREEN},
};
use tracing_subscriber::EnvFilter;

/// Id the demo gauge is registered under.
const GAUGE_ID: &str = "demo";

/// Gauge canvas size (the logical design ratio at 1:1).
const GAUGE_WIDTH: u32 = 440;
const GAUGE_HEIGHT: u32 = 220;

/// Extra rows under the gauge for the digital readout.
const READOUT_HEIGHT: u32 = 44;

/// Target frame rate pacing (~50 FPS).
const FRAME_TIME: Duration = Duration::from_millis(20);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        eprintln!("speedo-sim: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GaugeError> {
    let mut registry = GaugeRegistry::new();
    registry.attach_surface(GAUGE_ID, Canvas::new(GAUGE_WIDTH, GAUGE_HEIGHT));
    registry.create_gauge(GAUGE_ID, &GaugeOverrides::default(), true)?;

    // Domain bounds for the target controls
    let (domain_start, domain_range, tick_delta) = {
        let config = registry.config(GAUGE_ID).ok_or_else(|| GaugeError::SurfaceMissing {
            id: GAUGE_ID.to_owned(),
        })?;
        (config.start_value, config.domain_range(), config.tick_delta)
    };

    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(GAUGE_WIDTH, GAUGE_HEIGHT + READOUT_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Speedometer", &output_settings);

    let mut target = domain_start;
    // The one live continuation frame; advancing it drives the animation
    let mut pending: Option<FrameRequest> = None;

    // First frame before the event loop so the window has content
    registry.draw(target, GAUGE_ID, false)?;
    present(&registry, target, &mut display);
    window.update(&display);

    loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    let mut retarget = false;
                    match keycode {
                        Keycode::Escape => return Ok(()),
                        Keycode::Up => {
                            target = (target + tick_delta).min(domain_start + domain_range);
                            retarget = true;
                        }
                        Keycode::Down => {
                            target = (target - tick_delta).max(domain_start);
                            retarget = true;
                        }
                        Keycode::R => {
                            // Re-create: needle snaps home, old frames go stale
                            registry.create_gauge(GAUGE_ID, &GaugeOverrides::default(), true)?;
                            retarget = true;
                        }
                        _ => {
                            if let Some(digit) = digit_of(keycode) {
                                target = domain_start + domain_range * (digit as f32 / 9.0);
                                retarget = true;
                            }
                        }
                    }
                    if retarget {
                        pending = match registry.draw(target, GAUGE_ID, true)? {
                            DrawOutcome::Scheduled(request) => Some(request),
                            DrawOutcome::Settled | DrawOutcome::Stale => None,
                        };
                    }
                }
                _ => {}
            }
        }

        // One animation step per frame tick
        if let Some(request) = pending.take() {
            pending = match registry.advance(&request)? {
                DrawOutcome::Scheduled(next) => Some(next),
                DrawOutcome::Settled | DrawOutcome::Stale => None,
            };
        }

        present(&registry, target, &mut display);
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}

/// Blit the gauge canvas to the display and draw the readout under it.
fn present(registry: &GaugeRegistry<Canvas>, target: f32, display: &mut SimulatorDisplay<Rgb565>) {
    display.clear(BLACK).ok();

    if let Some(canvas) = registry.surface(GAUGE_ID) {
        let width = canvas.width() as i32;
        display
            .draw_iter(canvas.pixels().enumerate().map(|(i, color)| {
                Pixel(Point::new(i as i32 % width, i as i32 / width), color)
            }))
            .ok();
    }

    let displayed = registry.displayed_value(GAUGE_ID).unwrap_or(0.0);
    let mut text: heapless::String<24> = heapless::String::new();
    write!(text, "{displayed:.0} / {target:.0}").ok();

    let style = MonoTextStyle::new(&PROFONT_24_POINT, GREEN);
    let position = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(
        &text,
        Point::new(GAUGE_WIDTH as i32 / 2, GAUGE_HEIGHT as i32 + 6),
        style,
        position,
    )
    .draw(display)
    .ok();
}

/// Map the number-row keys to a digit.
fn digit_of(keycode: Keycode) -> Option<u32> {
    match keycode {
        Keycode::Num0 => Some(0),
        Keycode::Num1 => Some(1),
        Keycode::Num2 => Some(2),
        Keycode::Num3 => Some(3),
        Keycode::Num4 => Some(4),
        Keycode::Num5 => Some(5),
        Keycode::Num6 => Some(6),
        Keycode::Num7 => Some(7),
        Keycode::Num8 => Some(8),
        Keycode::Num9 => Some(9),
        _ => None,
    }
}
