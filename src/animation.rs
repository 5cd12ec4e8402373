//! Incremental needle animation: direction, convergence, step policy.
//!
//! The animation does not tween over a fixed duration. Each frame the
//! displayed value takes one discrete step toward the target:
//!
//! ```text
//! |target - displayed| < 1   ->  converged, stop
//! within 10 units of target  ->  step by 1
//! otherwise                  ->  step by 5
//! ```
//!
//! The coarse/fine split gives a fast approach and a fine final settle.
//! The velocity discontinuity at the 10-unit boundary is intentional and
//! kept exactly; no easing curve is applied on top.
//!
//! Direction is re-evaluated every frame, not latched at the start of a
//! run, so retargeting mid-animation simply turns the needle around.

/// Displayed and target count as converged when closer than this.
pub const CONVERGENCE_EPSILON: f32 = 1.0;

/// Within this distance of the target the fine step takes over.
pub const FINE_STEP_WINDOW: f32 = 10.0;

/// Per-frame step close to the target.
pub const FINE_STEP: f32 = 1.0;

/// Per-frame step far from the target.
pub const COARSE_STEP: f32 = 5.0;

/// Which way the displayed value is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Rising,
    Falling,
}

/// True once the displayed value is within [`CONVERGENCE_EPSILON`] of the
/// target. Terminal for an animation run.
#[inline]
pub fn converged(displayed: f32, target: f32) -> bool {
    (target - displayed).abs() < CONVERGENCE_EPSILON
}

/// Direction of travel for this frame. Exact equality counts as rising,
/// but callers check [`converged`] first so the case never steps.
#[inline]
pub fn direction_of(displayed: f32, target: f32) -> Direction {
    if target < displayed { Direction::Falling } else { Direction::Rising }
}

/// One animation step: the displayed value for the next frame.
///
/// Fine step strictly inside the 10-unit window, coarse step at and
/// beyond it. Exactly 10 units out still takes a coarse step, which
/// overshoots into the window and settles from the other side.
#[inline]
pub fn step(displayed: f32, target: f32) -> f32 {
    match direction_of(displayed, target) {
        Direction::Falling => {
            if displayed - FINE_STEP_WINDOW < target {
                displayed - FINE_STEP
            } else {
                displayed - COARSE_STEP
            }
        }
        Direction::Rising => {
            if displayed + FINE_STEP_WINDOW > target {
                displayed + FINE_STEP
            } else {
                displayed + COARSE_STEP
            }
        }
    }
}
