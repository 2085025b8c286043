// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture session state: idle, single‑pointer drag, or multi‑touch pinch.
//!
//! The session only records what the gesture started from. Turning pointer
//! movement into a new pan/zoom is done by [`GestureSession::drag_to`] and
//! [`GestureSession::pinch_to`]; applying the result is up to the caller.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_zoom_pan::GestureSession;
//!
//! let mut session = GestureSession::drag(Point::new(10.0, 10.0), Vec2::ZERO, 0.0);
//! let pan = session.drag_to(Point::new(15.0, 12.0)).unwrap();
//! assert_eq!(pan, Vec2::new(5.0, 2.0));
//! ```

use kurbo::{Point, Vec2};

use crate::transform::{Transform, ZoomLimits};

/// Active gesture, if any.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum GestureSession {
    /// No pointer is down.
    #[default]
    Idle,
    /// One pointer drags the content.
    Dragging {
        /// Pointer position when the drag started.
        start_point: Point,
        /// Pan when the drag started.
        start_pan: Vec2,
        /// Pan after the latest move.
        last_pan: Vec2,
        /// Host timestamp of the latest move, in milliseconds.
        last_timestamp: f64,
    },
    /// Two or more touches pinch the content.
    Pinching {
        /// Centroid of the touches when the pinch started.
        initial_centroid: Point,
        /// Mean touch distance from `initial_centroid`.
        initial_avg_distance: f64,
        /// Zoom when the pinch started.
        initial_zoom: f64,
        /// Pan when the pinch started.
        initial_pan: Vec2,
    },
}

impl GestureSession {
    /// Starts a drag from `point` with the current `pan`.
    #[must_use]
    pub fn drag(point: Point, pan: Vec2, now_ms: f64) -> Self {
        Self::Dragging {
            start_point: point,
            start_pan: pan,
            last_pan: pan,
            last_timestamp: now_ms,
        }
    }

    /// Starts a pinch over `points` from the current `transform`.
    ///
    /// Returns `None` for an empty point set.
    #[must_use]
    pub fn pinch(points: &[Point], transform: Transform) -> Option<Self> {
        let c = centroid(points)?;
        Some(Self::Pinching {
            initial_centroid: c,
            initial_avg_distance: average_distance(points, c),
            initial_zoom: transform.zoom,
            initial_pan: transform.pan,
        })
    }

    /// Returns `true` when no gesture is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` while dragging.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns `true` while pinching.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    /// Pan for a drag pointer at `point`, or `None` outside a drag.
    #[must_use]
    pub fn drag_to(&self, point: Point) -> Option<Vec2> {
        match *self {
            Self::Dragging {
                start_point,
                start_pan,
                ..
            } => Some(start_pan + (point - start_point)),
            _ => None,
        }
    }

    /// Records a committed drag pan and returns the per‑event velocity.
    ///
    /// Returns `None` outside a drag.
    pub fn record_drag(&mut self, pan: Vec2, now_ms: f64) -> Option<Vec2> {
        match self {
            Self::Dragging {
                last_pan,
                last_timestamp,
                ..
            } => {
                let velocity = pan - *last_pan;
                *last_pan = pan;
                *last_timestamp = now_ms;
                Some(velocity)
            }
            _ => None,
        }
    }

    /// Transform for a pinch whose touches are now at `points`, or `None`
    /// outside a pinch or for an empty point set.
    ///
    /// The content point that was under the initial centroid stays under the
    /// current centroid. A degenerate initial distance means no scale change.
    #[must_use]
    pub fn pinch_to(&self, points: &[Point], limits: &ZoomLimits) -> Option<Transform> {
        let Self::Pinching {
            initial_centroid,
            initial_avg_distance,
            initial_zoom,
            initial_pan,
        } = *self
        else {
            return None;
        };
        let c = centroid(points)?;
        let distance = average_distance(points, c);
        let scale = if initial_avg_distance > f64::EPSILON && distance.is_finite() {
            distance / initial_avg_distance
        } else {
            1.0
        };
        let zoom = limits.clamp(initial_zoom * scale);
        let ratio = zoom / initial_zoom;
        let pan = c.to_vec2() - (initial_centroid.to_vec2() - initial_pan) * ratio;
        Some(Transform::new(pan, zoom))
    }
}

/// Arithmetic mean of `points`, or `None` if empty.
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let n = points.len() as f64;
    Some((sum / n).to_point())
}

/// Mean distance of `points` from `center`; zero for an empty set.
#[must_use]
pub fn average_distance(points: &[Point], center: Point) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points.iter().map(|p| (*p - center).hypot()).sum();
    let n = points.len() as f64;
    total / n
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{GestureSession, average_distance, centroid};
    use crate::transform::{Transform, ZoomLimits};

    const LIMITS: ZoomLimits = ZoomLimits::new(0.5, 4.0);

    #[test]
    fn centroid_and_distance_of_two_touches() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let c = centroid(&pts).unwrap();
        assert_eq!(c, Point::new(5.0, 0.0));
        assert_eq!(average_distance(&pts, c), 5.0);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn drag_velocity_is_per_event_delta() {
        let mut s = GestureSession::drag(Point::new(0.0, 0.0), Vec2::new(100.0, 0.0), 0.0);
        let p1 = s.drag_to(Point::new(4.0, 1.0)).unwrap();
        assert_eq!(s.record_drag(p1, 16.0), Some(Vec2::new(4.0, 1.0)));
        let p2 = s.drag_to(Point::new(10.0, 1.0)).unwrap();
        assert_eq!(p2, Vec2::new(110.0, 1.0));
        assert_eq!(s.record_drag(p2, 32.0), Some(Vec2::new(6.0, 0.0)));
    }

    #[test]
    fn drag_helpers_ignore_other_sessions() {
        let mut idle = GestureSession::Idle;
        assert!(idle.drag_to(Point::ZERO).is_none());
        assert!(idle.record_drag(Vec2::ZERO, 0.0).is_none());
        assert!(idle.pinch_to(&[Point::ZERO], &LIMITS).is_none());
    }

    #[test]
    fn unchanged_spread_keeps_zoom() {
        let start = [Point::new(10.0, 10.0), Point::new(30.0, 10.0)];
        let s = GestureSession::pinch(&start, Transform::new(Vec2::new(5.0, 5.0), 1.5)).unwrap();
        // Same spread, rotated and translated.
        let moved = [Point::new(50.0, 40.0), Point::new(50.0, 60.0)];
        let t = s.pinch_to(&moved, &LIMITS).unwrap();
        assert!((t.zoom - 1.5).abs() < 1e-12);
    }

    #[test]
    fn pinch_keeps_content_under_moving_centroid() {
        let start = [Point::new(40.0, 40.0), Point::new(60.0, 60.0)];
        let before = Transform::new(Vec2::new(-12.0, 7.0), 1.0);
        let s = GestureSession::pinch(&start, before).unwrap();
        let now = [Point::new(60.0, 50.0), Point::new(100.0, 90.0)];
        let after = s.pinch_to(&now, &LIMITS).unwrap();
        assert!((after.zoom - 2.0).abs() < 1e-12);

        let anchor_content = before.view_to_content(centroid(&start).unwrap());
        let under_new = after.view_to_content(centroid(&now).unwrap());
        assert!((anchor_content - under_new).hypot() < 1e-9);
    }

    #[test]
    fn pinch_zoom_is_clamped() {
        let start = [Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
        let s = GestureSession::pinch(&start, Transform::IDENTITY).unwrap();
        let wide = [Point::new(-500.0, 0.0), Point::new(500.0, 0.0)];
        assert_eq!(s.pinch_to(&wide, &LIMITS).unwrap().zoom, 4.0);
    }

    #[test]
    fn coincident_touches_do_not_produce_nan() {
        let start = [Point::new(20.0, 20.0), Point::new(20.0, 20.0)];
        let s = GestureSession::pinch(&start, Transform::IDENTITY).unwrap();
        let t = s
            .pinch_to(&[Point::new(0.0, 0.0), Point::new(40.0, 0.0)], &LIMITS)
            .unwrap();
        assert_eq!(t.zoom, 1.0);
        assert!(t.is_finite());
    }

    #[test]
    fn pinch_with_inverted_limits_stays_in_range() {
        let start = [Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
        let s = GestureSession::pinch(&start, Transform::IDENTITY).unwrap();
        let wide = [Point::new(-500.0, 0.0), Point::new(500.0, 0.0)];
        let inverted = ZoomLimits { min: 2.0, max: 1.0 };
        let t = s.pinch_to(&wide, &inverted).unwrap();
        assert_eq!(t.zoom, 2.0);
        assert!(t.is_finite());
    }
}
