// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Vec2;

use crate::easing::Easing;
use crate::transform::ZoomLimits;

/// How pan is kept inside the content bounds.
///
/// Bounds only apply once both a viewport and a content size are known; see
/// [`crate::ZoomPanController::set_layout`] and
/// [`crate::ZoomPanController::set_content_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Pan moves freely.
    #[default]
    None,
    /// Pan is clamped on every drag, pinch, wheel and inertia frame. Inertia
    /// stops dead on an axis that hits an edge.
    Live,
    /// Pan may overshoot while the user interacts; once a gesture or
    /// animation settles, pan is tweened back inside the bounds.
    Settle,
}

/// Reasons a [`ZoomPanConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A numeric option is NaN or infinite.
    NonFinite(&'static str),
    /// `min_zoom` or `max_zoom` is zero or negative.
    NonPositiveZoom {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// `min_zoom` is greater than `max_zoom`.
    InvertedZoomLimits {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// `initial_zoom` lies outside `[min_zoom, max_zoom]`.
    InitialZoomOutOfRange(f64),
    /// `friction` is not strictly between 0 and 1.
    FrictionOutOfRange(f64),
    /// `stop_threshold` is not positive.
    NonPositiveThreshold(f64),
    /// `zoom_step` is not greater than 1.
    ZoomStepTooSmall(f64),
    /// A duration is negative.
    NegativeDuration(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite(name) => write!(f, "`{name}` must be finite"),
            Self::NonPositiveZoom { min, max } => {
                write!(f, "zoom limits must be positive, got [{min}, {max}]")
            }
            Self::InvertedZoomLimits { min, max } => {
                write!(f, "min_zoom {min} is greater than max_zoom {max}")
            }
            Self::InitialZoomOutOfRange(zoom) => {
                write!(f, "initial_zoom {zoom} lies outside the zoom limits")
            }
            Self::FrictionOutOfRange(friction) => {
                write!(f, "friction {friction} must lie strictly between 0 and 1")
            }
            Self::NonPositiveThreshold(threshold) => {
                write!(f, "stop_threshold {threshold} must be positive")
            }
            Self::ZoomStepTooSmall(step) => write!(f, "zoom_step {step} must be greater than 1"),
            Self::NegativeDuration(name) => write!(f, "`{name}` must not be negative"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Options for a [`crate::ZoomPanController`].
///
/// Start from [`ZoomPanConfig::default`] and adjust with the `with_*`
/// methods. Validation happens when the controller is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPanConfig {
    /// Smallest zoom. Default `0.25`.
    pub min_zoom: f64,
    /// Largest zoom. Default `2.0`.
    pub max_zoom: f64,
    /// Zoom at construction and the target of zoom reset. Default `1.0`.
    pub initial_zoom: f64,
    /// Pan at construction. Default zero.
    pub initial_pan: Vec2,
    /// Wheel sensitivity: a wheel delta `d` scales zoom by `1 - d * zoom_factor`.
    /// Default `0.001`.
    pub zoom_factor: f64,
    /// Duration of programmatic tweens and bounds corrections, in
    /// milliseconds. Default `600`.
    pub duration_ms: f64,
    /// Easing for every tween. Default [`Easing::CubicInOut`].
    pub easing: Easing,
    /// Per‑frame velocity multiplier during inertia. Default `0.975`.
    pub friction: f64,
    /// Inertia stops once both velocity components fall below this, in
    /// pixels per frame. Default `0.01`.
    pub stop_threshold: f64,
    /// A release this long after the last drag move carries no velocity.
    /// Default `100`.
    pub velocity_timeout_ms: f64,
    /// Multiplier used by zoom in/out commands. Default `2.0`.
    pub zoom_step: f64,
    /// Pan bounds handling. Default [`BoundsPolicy::None`].
    pub bounds_policy: BoundsPolicy,
}

impl Default for ZoomPanConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.25,
            max_zoom: 2.0,
            initial_zoom: 1.0,
            initial_pan: Vec2::ZERO,
            zoom_factor: 0.001,
            duration_ms: 600.0,
            easing: Easing::CubicInOut,
            friction: 0.975,
            stop_threshold: 0.01,
            velocity_timeout_ms: 100.0,
            zoom_step: 2.0,
            bounds_policy: BoundsPolicy::None,
        }
    }
}

impl ZoomPanConfig {
    /// Sets the zoom limits.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Sets the initial zoom and pan.
    #[must_use]
    pub fn with_initial(mut self, zoom: f64, pan: Vec2) -> Self {
        self.initial_zoom = zoom;
        self.initial_pan = pan;
        self
    }

    /// Sets the wheel sensitivity.
    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    /// Sets the tween duration in milliseconds.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the tween easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets inertia friction and stop threshold.
    #[must_use]
    pub fn with_inertia(mut self, friction: f64, stop_threshold: f64) -> Self {
        self.friction = friction;
        self.stop_threshold = stop_threshold;
        self
    }

    /// Sets the velocity timeout in milliseconds.
    #[must_use]
    pub fn with_velocity_timeout_ms(mut self, timeout_ms: f64) -> Self {
        self.velocity_timeout_ms = timeout_ms;
        self
    }

    /// Sets the zoom in/out multiplier.
    #[must_use]
    pub fn with_zoom_step(mut self, zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    /// Sets the bounds policy.
    #[must_use]
    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }

    /// Returns the configured zoom range.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.min_zoom, self.max_zoom)
    }

    /// Checks every option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("initial_zoom", self.initial_zoom),
            ("initial_pan.x", self.initial_pan.x),
            ("initial_pan.y", self.initial_pan.y),
            ("zoom_factor", self.zoom_factor),
            ("duration_ms", self.duration_ms),
            ("friction", self.friction),
            ("stop_threshold", self.stop_threshold),
            ("velocity_timeout_ms", self.velocity_timeout_ms),
            ("zoom_step", self.zoom_step),
        ];
        if let Some(&(name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite(name));
        }
        validate_zoom_limits(self.min_zoom, self.max_zoom)?;
        if !self.zoom_limits().contains(self.initial_zoom) {
            return Err(ConfigError::InitialZoomOutOfRange(self.initial_zoom));
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::FrictionOutOfRange(self.friction));
        }
        if self.stop_threshold <= 0.0 {
            return Err(ConfigError::NonPositiveThreshold(self.stop_threshold));
        }
        if self.zoom_step <= 1.0 {
            return Err(ConfigError::ZoomStepTooSmall(self.zoom_step));
        }
        if self.duration_ms < 0.0 {
            return Err(ConfigError::NegativeDuration("duration_ms"));
        }
        if self.velocity_timeout_ms < 0.0 {
            return Err(ConfigError::NegativeDuration("velocity_timeout_ms"));
        }
        Ok(())
    }
}

pub(crate) fn validate_zoom_limits(min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() {
        return Err(ConfigError::NonFinite("min_zoom"));
    }
    if !max.is_finite() {
        return Err(ConfigError::NonFinite("max_zoom"));
    }
    if min <= 0.0 || max <= 0.0 {
        return Err(ConfigError::NonPositiveZoom { min, max });
    }
    if min > max {
        return Err(ConfigError::InvertedZoomLimits { min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use kurbo::Vec2;

    use super::{ConfigError, ZoomPanConfig};

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ZoomPanConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_limits() {
        let cfg = ZoomPanConfig::default().with_zoom_limits(3.0, 1.0);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvertedZoomLimits { min: 3.0, max: 1.0 })
        );
    }

    #[test]
    fn rejects_non_finite_values_by_name() {
        let cfg = ZoomPanConfig::default().with_initial(1.0, Vec2::new(f64::NAN, 0.0));
        assert_eq!(cfg.validate(), Err(ConfigError::NonFinite("initial_pan.x")));
        let cfg = ZoomPanConfig::default().with_zoom_limits(0.5, f64::INFINITY);
        assert_eq!(cfg.validate(), Err(ConfigError::NonFinite("max_zoom")));
    }

    #[test]
    fn rejects_out_of_range_options() {
        let base = ZoomPanConfig::default();
        assert!(matches!(
            base.with_zoom_limits(0.0, 1.0).validate(),
            Err(ConfigError::NonPositiveZoom { .. })
        ));
        assert_eq!(
            base.with_initial(3.0, Vec2::ZERO).validate(),
            Err(ConfigError::InitialZoomOutOfRange(3.0))
        );
        assert_eq!(
            base.with_inertia(1.0, 0.01).validate(),
            Err(ConfigError::FrictionOutOfRange(1.0))
        );
        assert_eq!(
            base.with_inertia(0.9, 0.0).validate(),
            Err(ConfigError::NonPositiveThreshold(0.0))
        );
        assert_eq!(
            base.with_zoom_step(1.0).validate(),
            Err(ConfigError::ZoomStepTooSmall(1.0))
        );
        assert_eq!(
            base.with_duration_ms(-1.0).validate(),
            Err(ConfigError::NegativeDuration("duration_ms"))
        );
    }

    #[test]
    fn errors_display_the_offending_value() {
        let msg = ConfigError::FrictionOutOfRange(1.5).to_string();
        assert!(msg.contains("1.5"));
    }
}
