// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Uniform pan+zoom transform applied to the hosted content.
///
/// Content coordinates map into view (container‑local) coordinates as
/// `view = pan + content * zoom`; the content is anchored at its top‑left
/// corner, so the rendered transform is `translate(pan) * scale(zoom)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation applied before scaling, in view pixels.
    pub pan: Vec2,
    /// Uniform scale factor.
    pub zoom: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No pan, unit zoom.
    pub const IDENTITY: Self = Self {
        pan: Vec2::ZERO,
        zoom: 1.0,
    };

    /// Creates a transform from a pan offset and zoom factor.
    #[must_use]
    pub const fn new(pan: Vec2, zoom: f64) -> Self {
        Self { pan, zoom }
    }

    /// Returns the affine transform used to render content.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Converts a view‑space point into content coordinates.
    #[must_use]
    pub fn view_to_content(&self, pt: Point) -> Point {
        ((pt.to_vec2() - self.pan) / self.zoom).to_point()
    }

    /// Converts a content‑space point into view coordinates.
    #[must_use]
    pub fn content_to_view(&self, pt: Point) -> Point {
        (self.pan + pt.to_vec2() * self.zoom).to_point()
    }

    /// Returns `true` if both pan components and the zoom are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.pan.is_finite() && self.zoom.is_finite()
    }
}

/// Computes the pan that keeps `anchor` over the same content point when the
/// zoom changes from `zoom` to `new_zoom`.
///
/// `new_zoom` is expected to be clamped already.
///
/// ```
/// use kurbo::{Point, Vec2};
/// use understory_zoom_pan::anchored_pan;
///
/// let pan = anchored_pan(Point::new(50.0, 50.0), Vec2::ZERO, 1.0, 1.1);
/// assert!((pan.x + 5.0).abs() < 1e-9);
/// assert!((pan.y + 5.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn anchored_pan(anchor: Point, pan: Vec2, zoom: f64, new_zoom: f64) -> Vec2 {
    let anchor = anchor.to_vec2();
    let content = (anchor - pan) / zoom;
    anchor - content * new_zoom
}

/// Inclusive zoom range.
///
/// [`ZoomLimits::new`] swaps inverted limits. Fields set by hand are not
/// checked, but [`ZoomLimits::clamp`] never panics on them.
/// [`crate::ZoomPanConfig`] validates limits before they reach a controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    /// Smallest allowed zoom.
    pub min: f64,
    /// Largest allowed zoom.
    pub max: f64,
}

impl ZoomLimits {
    /// Creates a zoom range, swapping `min` and `max` if they are inverted.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Clamps `zoom` into the range. NaN input resolves to the lower limit.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        let (lo, hi) = ordered(self.min, self.max);
        if zoom.is_nan() {
            return lo;
        }
        clamp_between(zoom, lo, hi)
    }

    /// Returns `true` if `zoom` lies in the range.
    #[must_use]
    pub fn contains(&self, zoom: f64) -> bool {
        self.min <= zoom && zoom <= self.max
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a > b { (b, a) } else { (a, b) }
}

/// Clamps `value` between `a` and `b` in either order.
///
/// Unlike [`f64::clamp`] this never panics: a NaN bound is ignored.
pub(crate) fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    let (lo, hi) = ordered(a, b);
    value.max(lo).min(hi)
}
