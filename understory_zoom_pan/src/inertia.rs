// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::bounds::PanBounds;

/// Post‑release drift of the pan offset.
///
/// Velocity is in view pixels per frame. Each [`Inertia::step`] first decays
/// the velocity by `friction`, then adds it to the pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inertia {
    velocity: Vec2,
    friction: f64,
    threshold: f64,
}

/// Outcome of one [`Inertia::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaStep {
    /// Pan after this frame.
    pub pan: Vec2,
    /// Whether the drift should continue on the next frame.
    pub moving: bool,
}

impl Inertia {
    /// Creates an inertia job.
    ///
    /// `friction` must lie in `(0, 1)` and `threshold` must be positive for the
    /// drift to terminate; [`crate::ZoomPanConfig`] guarantees both.
    #[must_use]
    pub fn new(velocity: Vec2, friction: f64, threshold: f64) -> Self {
        Self {
            velocity,
            friction,
            threshold,
        }
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` once both velocity components are below the threshold.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !(self.velocity.x.abs() >= self.threshold || self.velocity.y.abs() >= self.threshold)
    }

    /// Advances one frame from `pan`.
    ///
    /// With `bounds`, the result is clamped per axis and the velocity of any
    /// clamped axis is zeroed so the drift stops at the edge.
    pub fn step(&mut self, pan: Vec2, bounds: Option<&PanBounds>) -> InertiaStep {
        if self.is_settled() {
            return InertiaStep { pan, moving: false };
        }
        self.velocity *= self.friction;
        let mut pan = pan + self.velocity;
        if let Some(bounds) = bounds {
            let clamped = bounds.clamp(pan);
            if clamped.hit_x {
                self.velocity.x = 0.0;
            }
            if clamped.hit_y {
                self.velocity.y = 0.0;
            }
            pan = clamped.pan;
        }
        InertiaStep {
            pan,
            moving: !self.is_settled(),
        }
    }
}
