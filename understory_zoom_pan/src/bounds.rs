// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan limits derived from content size, viewport size and zoom.

use kurbo::{Size, Vec2};

use crate::transform::clamp_between;

/// Allowed pan range for one zoom level.
///
/// Along each axis the scaled content may not leave a gap inside the viewport
/// when it is larger than the viewport, and may not leave the viewport when
/// it is smaller. With `a = viewport - content * zoom` the range is
/// `[min(a, 0), max(a, 0)]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanBounds {
    /// Smallest allowed pan per axis.
    pub min: Vec2,
    /// Largest allowed pan per axis.
    pub max: Vec2,
}

/// Result of clamping a pan offset into [`PanBounds`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamped {
    /// The clamped pan.
    pub pan: Vec2,
    /// Whether the X component was moved.
    pub hit_x: bool,
    /// Whether the Y component was moved.
    pub hit_y: bool,
}

impl PanBounds {
    /// Derives the pan range for `content` shown at `zoom` inside `viewport`.
    #[must_use]
    pub fn new(viewport: Size, content: Size, zoom: f64) -> Self {
        let ax = viewport.width - content.width * zoom;
        let ay = viewport.height - content.height * zoom;
        Self {
            min: Vec2::new(ax.min(0.0), ay.min(0.0)),
            max: Vec2::new(ax.max(0.0), ay.max(0.0)),
        }
    }

    /// Clamps each axis of `pan` independently.
    ///
    /// An axis whose `min` exceeds its `max` is clamped to the swapped range.
    #[must_use]
    pub fn clamp(&self, pan: Vec2) -> Clamped {
        let x = clamp_between(pan.x, self.min.x, self.max.x);
        let y = clamp_between(pan.y, self.min.y, self.max.y);
        Clamped {
            pan: Vec2::new(x, y),
            hit_x: x != pan.x,
            hit_y: y != pan.y,
        }
    }

    /// Returns `true` if `pan` lies inside the range on both axes.
    #[must_use]
    pub fn contains(&self, pan: Vec2) -> bool {
        let c = self.clamp(pan);
        !c.hit_x && !c.hit_y
    }
}
