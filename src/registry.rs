//! Gauge instances: per-id state, the draw entry point, and the
//! caller-driven animation loop.
//!
//! A [`GaugeRegistry`] is an explicit context object owned by the caller -
//! there is no process-wide table, so independent registries (and tests)
//! never interfere. It maps widget ids to an attached [`Surface`] and to
//! the [`GaugeState`] mutated by [`draw`](GaugeRegistry::draw).
//!
//! # Scheduling
//!
//! The registry never blocks, sleeps, or owns a timer. When a draw has
//! not converged it returns [`DrawOutcome::Scheduled`] carrying a
//! [`FrameRequest`]; the caller feeds that handle back through
//! [`advance`](GaugeRegistry::advance) whenever its own loop permits (a
//! frame callback, a timer tick, a task queue). Each request is stamped
//! with the state's generation and a fresh sequence number, and `advance`
//! no-ops on any handle whose stamps no longer match - so re-creating a
//! gauge or starting a new draw invalidates every outstanding handle and
//! at most one animation is ever live per id.

use std::collections::HashMap;

use tracing::{debug, error, trace};

use crate::{
    animation::{self, Direction},
    config::{GaugeConfig, GaugeOverrides},
    error::GaugeError,
    frame::Frame,
    layers,
    surface::Surface,
};

/// Handle for one scheduled continuation frame.
///
/// Opaque to callers: hold it, hand it back to
/// [`GaugeRegistry::advance`], or drop it to abandon the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRequest {
    id: String,
    target: f32,
    generation: u64,
    seq: u64,
}

impl FrameRequest {
    /// Id of the gauge this frame belongs to.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Target value the animation is converging toward.
    #[inline]
    pub const fn target(&self) -> f32 {
        self.target
    }
}

/// Result of one draw or advance call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// The displayed value is within one unit of the target; the
    /// animation run is over and no frame is pending.
    Settled,
    /// A frame was rendered and the animation wants a continuation.
    Scheduled(FrameRequest),
    /// The handle was stale (superseded or from a re-created gauge);
    /// nothing was rendered and no state changed.
    Stale,
}

/// Per-id gauge state. Owned exclusively by the registry.
struct GaugeState {
    /// Value the needle currently points at.
    displayed_value: f32,
    /// Travel direction, re-evaluated on every animated frame.
    direction: Direction,
    /// Bumped each time the gauge is re-created; requests stamped with
    /// an older generation are stale.
    generation: u64,
    /// Sequence number of the one live scheduled frame, if any.
    pending: Option<u64>,
    /// Monotonic counter backing the sequence stamps.
    next_seq: u64,
    /// Resolved configuration.
    config: GaugeConfig,
}

impl GaugeState {
    fn new(config: GaugeConfig, generation: u64) -> Self {
        Self {
            displayed_value: 0.0,
            direction: Direction::default(),
            generation,
            pending: None,
            next_seq: 0,
            config,
        }
    }
}

/// Widget-id keyed context: attached surfaces plus per-gauge state.
pub struct GaugeRegistry<S: Surface> {
    surfaces: HashMap<String, S>,
    states: HashMap<String, GaugeState>,
}

impl<S: Surface> Default for GaugeRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> GaugeRegistry<S> {
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
            states: HashMap::new(),
        }
    }

    /// Attach the drawing surface for `id`, returning any surface that
    /// was previously attached under the same id.
    pub fn attach_surface(&mut self, id: impl Into<String>, surface: S) -> Option<S> {
        self.surfaces.insert(id.into(), surface)
    }

    /// The surface attached for `id`, for presentation (blitting).
    #[inline]
    pub fn surface(&self, id: &str) -> Option<&S> {
        self.surfaces.get(id)
    }

    /// Mutable access to the surface attached for `id`.
    #[inline]
    pub fn surface_mut(&mut self, id: &str) -> Option<&mut S> {
        self.surfaces.get_mut(id)
    }

    /// Value the needle of `id` currently points at.
    #[inline]
    pub fn displayed_value(&self, id: &str) -> Option<f32> {
        self.states.get(id).map(|state| state.displayed_value)
    }

    /// Resolved configuration of `id`, if it has been created.
    #[inline]
    pub fn config(&self, id: &str) -> Option<&GaugeConfig> {
        self.states.get(id).map(|state| &state.config)
    }

    /// Create (or fully re-create) the gauge state for `id`.
    ///
    /// The surface must already be attached and have a non-zero area;
    /// on error nothing is mutated. Re-creation resets the displayed
    /// value to zero and bumps the generation, so every outstanding
    /// [`FrameRequest`] for the id goes stale.
    pub fn create_gauge(&mut self, id: &str, overrides: &GaugeOverrides, center: bool) -> Result<(), GaugeError> {
        let surface = self.surfaces.get(id).ok_or_else(|| {
            let err = GaugeError::SurfaceMissing { id: id.to_owned() };
            error!(%id, "create failed: {err}");
            err
        })?;
        let size = surface.size();
        if size.width == 0 || size.height == 0 {
            let err = GaugeError::EmptySurface { id: id.to_owned() };
            error!(%id, "create failed: {err}");
            return Err(err);
        }

        let config = GaugeConfig::build(size, overrides, center);
        let generation = self.states.get(id).map_or(0, |state| state.generation + 1);
        debug!(
            %id,
            generation,
            scale = config.transform.scale,
            x_offset = config.transform.x_offset,
            y_offset = config.transform.y_offset,
            "gauge created"
        );
        self.states.insert(id.to_owned(), GaugeState::new(config, generation));
        Ok(())
    }

    /// Render one frame of `id` at the current displayed value and step
    /// toward `target`.
    ///
    /// With `animate` false the displayed value jumps straight to the
    /// target before rendering. A gauge that was never created is
    /// auto-created with defaults, centered. Starting a new draw
    /// supersedes any pending frame for the id.
    pub fn draw(&mut self, target: f32, id: &str, animate: bool) -> Result<DrawOutcome, GaugeError> {
        if !self.states.contains_key(id) {
            self.create_gauge(id, &GaugeOverrides::default(), true)?;
        }
        // Both lookups succeed: create_gauge just ran or the state already
        // existed, and surfaces are never detached
        let (Some(state), Some(surface)) = (self.states.get_mut(id), self.surfaces.get_mut(id)) else {
            return Err(GaugeError::SurfaceMissing { id: id.to_owned() });
        };
        Ok(Self::render_and_step(state, surface, target, id, animate))
    }

    /// Run the continuation frame described by `request`.
    ///
    /// Equivalent to an animated [`draw`](Self::draw) if the request is
    /// still the live one for its id; otherwise a no-op returning
    /// [`DrawOutcome::Stale`].
    pub fn advance(&mut self, request: &FrameRequest) -> Result<DrawOutcome, GaugeError> {
        let live = self.states.get(&request.id).is_some_and(|state| {
            state.generation == request.generation && state.pending == Some(request.seq)
        });
        if !live {
            debug!(id = %request.id, seq = request.seq, "stale frame dropped");
            return Ok(DrawOutcome::Stale);
        }
        self.draw(request.target, &request.id, true)
    }

    /// The draw pipeline proper: render, then converge or schedule.
    fn render_and_step(state: &mut GaugeState, surface: &mut S, target: f32, id: &str, animate: bool) -> DrawOutcome {
        if !animate {
            state.displayed_value = target;
        }

        let frame: Frame = layers::compose(&state.config, state.displayed_value);
        frame.render(&state.config.transform, state.config.label_font, surface);

        if animation::converged(state.displayed_value, target) {
            trace!(%id, target, displayed = state.displayed_value, "settled");
            state.pending = None;
            return DrawOutcome::Settled;
        }

        state.direction = animation::direction_of(state.displayed_value, target);
        state.displayed_value = animation::step(state.displayed_value, target);

        state.next_seq += 1;
        let seq = state.next_seq;
        state.pending = Some(seq);
        trace!(
            %id,
            target,
            displayed = state.displayed_value,
            direction = ?state.direction,
            seq,
            "scheduled"
        );
        DrawOutcome::Scheduled(FrameRequest {
            id: id.to_owned(),
            target,
            generation: state.generation,
            seq,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;
    use embedded_graphics::geometry::{OriginDimensions, Size};

    const ID: &str = "gauge";

    fn registry_with_surface() -> GaugeRegistry<Canvas> {
        let mut registry = GaugeRegistry::new();
        registry.attach_surface(ID, Canvas::new(440, 220));
        registry
    }

    /// Drive an animated draw to completion, returning the advance count.
    fn run_to_convergence(registry: &mut GaugeRegistry<Canvas>, target: f32, limit: u32) -> u32 {
        let mut outcome = registry.draw(target, ID, true).expect("draw");
        let mut steps = 0;
        while let DrawOutcome::Scheduled(request) = outcome {
            outcome = registry.advance(&request).expect("advance");
            steps += 1;
            assert!(steps <= limit, "animation exceeded {limit} advances");
        }
        assert_eq!(outcome, DrawOutcome::Settled, "run must end settled");
        steps
    }

    #[test]
    fn test_create_without_surface_fails_cleanly() {
        let mut registry: GaugeRegistry<Canvas> = GaugeRegistry::new();
        let err = registry
            .create_gauge("missing-id", &GaugeOverrides::default(), true)
            .unwrap_err();
        assert_eq!(
            err,
            GaugeError::SurfaceMissing {
                id: "missing-id".to_owned()
            }
        );
        assert!(registry.config("missing-id").is_none(), "failed create must not add state");
    }

    #[test]
    fn test_create_on_empty_surface_fails_cleanly() {
        let mut registry = GaugeRegistry::new();
        registry.attach_surface(ID, Canvas::new(0, 220));
        let err = registry.create_gauge(ID, &GaugeOverrides::default(), true).unwrap_err();
        assert_eq!(err, GaugeError::EmptySurface { id: ID.to_owned() });
        assert!(registry.config(ID).is_none(), "failed create must not add state");
    }

    #[test]
    fn test_create_applies_overrides() {
        let mut registry = registry_with_surface();
        let overrides = GaugeOverrides {
            num_major_ticks: Some(10),
            ..GaugeOverrides::default()
        };
        registry.create_gauge(ID, &overrides, true).expect("create");

        let config = registry.config(ID).expect("config");
        assert_eq!(config.num_major_ticks, 10, "override applied");
        assert!(
            (config.color_arc_radius - 127.5).abs() < 1e-4,
            "derived radius recomputed from the effective radius fields"
        );
    }

    #[test]
    fn test_draw_auto_creates_default_state() {
        let mut registry = registry_with_surface();
        let outcome = registry.draw(40.0, ID, false).expect("draw");
        assert_eq!(outcome, DrawOutcome::Settled, "jump-cut settles immediately");
        assert_eq!(registry.displayed_value(ID), Some(40.0), "displayed jumps to target");
        assert_eq!(registry.config(ID).map(|c| c.num_major_ticks), Some(8), "defaults used");
    }

    #[test]
    fn test_draw_without_surface_fails() {
        let mut registry: GaugeRegistry<Canvas> = GaugeRegistry::new();
        let err = registry.draw(40.0, "nowhere", false).unwrap_err();
        assert_eq!(err, GaugeError::SurfaceMissing { id: "nowhere".to_owned() });
    }

    #[test]
    fn test_jump_cut_is_idempotent() {
        let mut registry = registry_with_surface();
        assert_eq!(registry.draw(80.0, ID, false).expect("draw"), DrawOutcome::Settled);
        assert_eq!(registry.draw(80.0, ID, false).expect("draw"), DrawOutcome::Settled);
        assert_eq!(registry.displayed_value(ID), Some(80.0), "displayed stays exactly 80");
    }

    #[test]
    fn test_animated_draw_converges_within_bound() {
        let mut registry = registry_with_surface();
        // Range 80 at coarse step 5, plus the fine settle
        let steps = run_to_convergence(&mut registry, 80.0, 80 / 5 + 10);
        assert!(steps > 0, "animation must take at least one advance");
        let displayed = registry.displayed_value(ID).expect("state");
        assert!((80.0 - displayed).abs() < 1.0, "displayed within one unit of target");
    }

    #[test]
    fn test_animated_steps_are_monotonic_rising() {
        let mut registry = registry_with_surface();
        let mut previous = 0.0f32;
        let mut outcome = registry.draw(60.0, ID, true).expect("draw");
        while let DrawOutcome::Scheduled(request) = outcome {
            let displayed = registry.displayed_value(ID).expect("state");
            assert!(displayed >= previous, "rising run must not move backward");
            previous = displayed;
            outcome = registry.advance(&request).expect("advance");
        }
    }

    #[test]
    fn test_falling_after_rising() {
        let mut registry = registry_with_surface();
        registry.draw(80.0, ID, false).expect("jump to 80");
        run_to_convergence(&mut registry, 20.0, 80 / 5 + 10);
        let displayed = registry.displayed_value(ID).expect("state");
        assert!((20.0 - displayed).abs() < 1.0, "falling run converges too");
    }

    #[test]
    fn test_new_draw_supersedes_pending_frame() {
        let mut registry = registry_with_surface();
        let DrawOutcome::Scheduled(first) = registry.draw(80.0, ID, true).expect("draw") else {
            panic!("far target must schedule a frame");
        };

        // Retarget before the first continuation runs
        let DrawOutcome::Scheduled(second) = registry.draw(10.0, ID, true).expect("draw") else {
            panic!("retarget must schedule a frame");
        };

        let displayed_before = registry.displayed_value(ID).expect("state");
        assert_eq!(registry.advance(&first).expect("advance"), DrawOutcome::Stale);
        assert_eq!(
            registry.displayed_value(ID),
            Some(displayed_before),
            "stale advance must not move the needle"
        );

        // The live handle still works
        assert!(matches!(
            registry.advance(&second).expect("advance"),
            DrawOutcome::Scheduled(_) | DrawOutcome::Settled
        ));
    }

    #[test]
    fn test_recreation_invalidates_pending_frame() {
        let mut registry = registry_with_surface();
        let DrawOutcome::Scheduled(request) = registry.draw(80.0, ID, true).expect("draw") else {
            panic!("far target must schedule a frame");
        };

        registry.create_gauge(ID, &GaugeOverrides::default(), true).expect("re-create");
        assert_eq!(registry.displayed_value(ID), Some(0.0), "re-creation resets the needle");
        assert_eq!(
            registry.advance(&request).expect("advance"),
            DrawOutcome::Stale,
            "old generation must no-op"
        );
        assert_eq!(registry.displayed_value(ID), Some(0.0), "stale advance leaves the fresh state alone");
    }

    #[test]
    fn test_jump_cut_cancels_pending_frame() {
        let mut registry = registry_with_surface();
        let DrawOutcome::Scheduled(request) = registry.draw(80.0, ID, true).expect("draw") else {
            panic!("far target must schedule a frame");
        };

        assert_eq!(registry.draw(80.0, ID, false).expect("jump"), DrawOutcome::Settled);
        assert_eq!(
            registry.advance(&request).expect("advance"),
            DrawOutcome::Stale,
            "settling clears the pending slot"
        );
    }

    #[test]
    fn test_advance_for_unknown_id_is_stale() {
        let mut registry = registry_with_surface();
        let DrawOutcome::Scheduled(request) = registry.draw(80.0, ID, true).expect("draw") else {
            panic!("far target must schedule a frame");
        };
        let mut other: GaugeRegistry<Canvas> = GaugeRegistry::new();
        assert_eq!(
            other.advance(&request).expect("advance"),
            DrawOutcome::Stale,
            "a foreign registry never ran this gauge"
        );
    }

    #[test]
    fn test_independent_registries_do_not_interfere() {
        let mut left = registry_with_surface();
        let mut right = registry_with_surface();
        left.draw(30.0, ID, false).expect("left draw");
        right.draw(70.0, ID, false).expect("right draw");
        assert_eq!(left.displayed_value(ID), Some(30.0));
        assert_eq!(right.displayed_value(ID), Some(70.0));
    }

    #[test]
    fn test_attach_surface_returns_previous() {
        let mut registry: GaugeRegistry<Canvas> = GaugeRegistry::new();
        assert!(registry.attach_surface(ID, Canvas::new(10, 10)).is_none());
        let old = registry.attach_surface(ID, Canvas::new(20, 20)).expect("previous surface");
        assert_eq!(old.size(), Size::new(10, 10), "first surface handed back");
        assert_eq!(
            registry.surface(ID).map(|surface| surface.size()),
            Some(Size::new(20, 20)),
            "second surface now attached"
        );
    }

    #[test]
    fn test_draw_renders_onto_the_surface() {
        let mut registry = registry_with_surface();
        registry.draw(0.0, ID, false).expect("draw");
        let canvas = registry.surface(ID).expect("surface");

        // The rim fill reaches the bottom corners of the half-disc;
        // the exact color depends on blending, but it is no longer the
        // cleared background
        let center_top = canvas.pixel(220, 30).expect("pixel");
        assert_ne!(center_top, crate::colors::BLACK, "rim area painted");
    }
}
