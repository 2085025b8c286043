// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to tween progress.
///
/// Every curve is monotonic on `[0, 1]` with `ease(0) == 0` and
/// `ease(1) == 1` exactly. Progress outside `[0, 1]` is clamped first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Piecewise cubic ease‑in‑out: `4t³` for the first half, mirrored for
    /// the second.
    #[default]
    CubicInOut,
    /// One‑dimensional cubic Bézier with control values `0, 0.001, 0.999, 1`.
    ///
    /// Slower at both ends and steeper in the middle than [`Easing::CubicInOut`].
    CubicBezier,
    /// No easing.
    Linear,
}

impl Easing {
    /// Maps linear progress to eased progress.
    #[must_use]
    pub fn ease(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::CubicBezier => {
                const P1: f64 = 0.001;
                const P2: f64 = 0.999;
                let u = 1.0 - t;
                3.0 * u * u * t * P1 + 3.0 * u * t * t * P2 + t * t * t
            }
            Self::Linear => t,
        }
    }
}
