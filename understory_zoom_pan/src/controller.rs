// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};
use tracing::{debug, trace, warn};

use crate::bounds::PanBounds;
use crate::config::{BoundsPolicy, ConfigError, ZoomPanConfig, validate_zoom_limits};
use crate::gesture::GestureSession;
use crate::inertia::Inertia;
use crate::transform::{Transform, ZoomLimits, anchored_pan};
use crate::tween::{AnimationHandle, AnimationSlot, Tween};

/// Receives committed transform changes from a [`ZoomPanController`].
///
/// Calls are synchronous. Changes are not coalesced beyond one call per input
/// event and one call per [`ZoomPanController::tick`].
pub trait TransformObserver {
    /// Called after every committed pan/zoom change.
    fn on_transform_change(&mut self, transform: &Transform);

    /// Called once when a programmatic transition (target request or zoom
    /// command) runs to completion, with the final transform.
    ///
    /// Not called for cancelled transitions, bounds corrections or inertia.
    fn on_animation_end(&mut self, transform: &Transform) {
        let _ = transform;
    }
}

impl TransformObserver for () {
    fn on_transform_change(&mut self, _transform: &Transform) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    Request,
    Correction,
}

#[derive(Clone, Copy, Debug)]
struct Anchor {
    point: Point,
    pan: Vec2,
    zoom: f64,
}

#[derive(Clone, Debug)]
struct ZoomJob {
    tween: Tween,
    anchor: Option<Anchor>,
}

#[derive(Clone, Debug)]
struct PanJob {
    progress: Tween,
    from: Vec2,
    to: Vec2,
    origin: Origin,
}

/// Interactive pan/zoom state driven by pointer input, commands and frames.
///
/// The controller is headless: the host forwards container‑local input,
/// calls [`ZoomPanController::tick`] once per display frame while
/// [`ZoomPanController::is_animating`] is `true`, and renders content with
/// [`Transform::to_affine`]. Exactly one of {gesture, inertia, tween} moves
/// the transform at a time; user input cancels every running animation.
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_zoom_pan::{ZoomPanConfig, ZoomPanController};
///
/// let config = ZoomPanConfig::default().with_zoom_limits(0.5, 2.0);
/// let mut zp = ZoomPanController::new(config).unwrap();
/// zp.set_layout(Size::new(400.0, 300.0));
///
/// zp.on_wheel(Point::new(50.0, 50.0), -100.0);
/// assert!((zp.zoom() - 1.1).abs() < 1e-9);
///
/// zp.zoom_in();
/// let mut now = 0.0;
/// while zp.tick(now) {
///     now += 16.0;
/// }
/// assert_eq!(zp.zoom(), 2.0);
/// ```
#[derive(Debug)]
pub struct ZoomPanController<O = ()> {
    config: ZoomPanConfig,
    limits: ZoomLimits,
    transform: Transform,
    viewport: Option<Size>,
    content: Option<Size>,
    session: GestureSession,
    velocity: Vec2,
    inertia: AnimationSlot<Inertia>,
    zoom_tween: AnimationSlot<ZoomJob>,
    pan_tween: AnimationSlot<PanJob>,
    target_zoom: Option<f64>,
    target_pan: Option<Vec2>,
    observer: O,
}

impl ZoomPanController {
    /// Creates a controller without an observer.
    pub fn new(config: ZoomPanConfig) -> Result<Self, ConfigError> {
        Self::with_observer(config, ())
    }
}

impl<O: TransformObserver> ZoomPanController<O> {
    /// Creates a controller reporting changes to `observer`.
    ///
    /// Fails if `config` does not validate.
    pub fn with_observer(config: ZoomPanConfig, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            limits: config.zoom_limits(),
            transform: Transform::new(config.initial_pan, config.initial_zoom),
            viewport: None,
            content: None,
            session: GestureSession::Idle,
            velocity: Vec2::ZERO,
            inertia: AnimationSlot::new(),
            zoom_tween: AnimationSlot::new(),
            pan_tween: AnimationSlot::new(),
            target_zoom: None,
            target_pan: None,
            observer,
        })
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Current zoom.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    /// Current pan.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.transform.pan
    }

    /// Configuration the controller was built with.
    #[must_use]
    pub fn config(&self) -> &ZoomPanConfig {
        &self.config
    }

    /// Current zoom range.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Active gesture session.
    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Drag velocity while dragging, drift velocity during inertia, zero
    /// otherwise. Pixels per frame.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` while inertia or a tween still needs frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inertia.is_active() || self.zoom_tween.is_active() || self.pan_tween.is_active()
    }

    /// Pan limits for the current zoom, if viewport and content sizes are known.
    #[must_use]
    pub fn pan_bounds(&self) -> Option<PanBounds> {
        self.bounds_at(self.transform.zoom)
    }

    /// Observer receiving changes.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the controller, returning its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Updates the viewport (container) size.
    ///
    /// Zoom commands and bounds need a viewport; until one is set they are
    /// skipped. Non‑finite or negative sizes clear the viewport.
    pub fn set_layout(&mut self, size: Size) {
        let viewport = valid_size(size);
        if viewport.is_none() {
            warn!(?size, "ignoring invalid viewport size");
        }
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        debug!(?viewport, "layout changed");
        self.refresh_bounds();
    }

    /// Sets or clears the unscaled content size used to derive pan bounds.
    pub fn set_content_size(&mut self, content: Option<Size>) {
        let content = content.and_then(valid_size);
        if self.content == content {
            return;
        }
        self.content = content;
        debug!(?content, "content size changed");
        self.refresh_bounds();
    }

    /// Replaces the zoom range and clamps the current zoom into it.
    ///
    /// When the zoom changes it is anchored at the viewport center, or at the
    /// content origin without a layout. Under [`BoundsPolicy::Settle`] an
    /// out‑of‑bounds pan is then tweened back.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) -> Result<(), ConfigError> {
        validate_zoom_limits(min_zoom, max_zoom)?;
        self.limits = ZoomLimits::new(min_zoom, max_zoom);
        self.config.min_zoom = min_zoom;
        self.config.max_zoom = max_zoom;
        let zoom = self.limits.clamp(self.transform.zoom);
        if zoom != self.transform.zoom {
            let pan = match self.viewport_center() {
                Some(center) => anchored_pan(center, self.transform.pan, self.transform.zoom, zoom),
                None => self.transform.pan,
            };
            let next = self.constrain(Transform::new(pan, zoom));
            self.commit(next);
        }
        self.settle();
        Ok(())
    }

    /// Jumps to `transform` without animating.
    ///
    /// Zoom is clamped first. Ends any gesture and cancels every animation.
    /// Under [`BoundsPolicy::Settle`] an out‑of‑bounds pan is then tweened back.
    pub fn set_transform(&mut self, transform: Transform) {
        if !transform.is_finite() {
            warn!(?transform, "ignoring non-finite transform");
            return;
        }
        self.cancel_animations();
        self.end_session_for_request();
        let next = Transform::new(transform.pan, self.limits.clamp(transform.zoom));
        let next = self.constrain(next);
        self.commit(next);
        self.settle();
    }

    /// Cancels inertia and every tween. Returns `true` if anything was running.
    pub fn cancel_animations(&mut self) -> bool {
        let inertia = self.inertia.cancel();
        let zoom = self.zoom_tween.cancel();
        let pan = self.pan_tween.cancel();
        if inertia {
            self.velocity = Vec2::ZERO;
        }
        let any = inertia || zoom || pan;
        if any {
            debug!(inertia, zoom, pan, "animations cancelled");
        }
        any
    }

    // --- pointer input ---

    /// One or more pointers went down; `points` lists every active pointer.
    ///
    /// One pointer starts a drag, two or more start a pinch. Any running
    /// animation is cancelled first.
    pub fn on_pointer_down(&mut self, points: &[Point], now_ms: f64) {
        if !valid_points(points) {
            warn!(count = points.len(), "ignoring non-finite pointer down");
            return;
        }
        self.cancel_animations();
        self.begin_session(points, now_ms);
    }

    /// Active pointers moved; `points` lists every active pointer.
    pub fn on_pointer_move(&mut self, points: &[Point], now_ms: f64) {
        if !valid_points(points) {
            warn!(count = points.len(), "ignoring non-finite pointer move");
            return;
        }
        match self.session {
            GestureSession::Idle => {}
            GestureSession::Dragging { .. } => {
                if points.len() != 1 {
                    if points.len() > 1 {
                        self.begin_session(points, now_ms);
                    }
                    return;
                }
                let Some(raw) = self.session.drag_to(points[0]) else {
                    return;
                };
                let next = self.constrain(Transform::new(raw, self.transform.zoom));
                if let Some(velocity) = self.session.record_drag(next.pan, now_ms) {
                    self.velocity = velocity;
                }
                trace!(pan = ?next.pan, velocity = ?self.velocity, "drag");
                self.commit(next);
            }
            GestureSession::Pinching { .. } => {
                if points.len() < 2 {
                    if points.len() == 1 {
                        self.begin_session(points, now_ms);
                    }
                    return;
                }
                let Some(next) = self.session.pinch_to(points, &self.limits) else {
                    return;
                };
                let next = self.constrain(next);
                trace!(zoom = next.zoom, pan = ?next.pan, "pinch");
                self.commit(next);
            }
        }
    }

    /// Pointers were released; `remaining` lists the pointers still down.
    ///
    /// Releasing the last pointer after a drag hands the drag velocity to
    /// inertia. A pinch that drops to one pointer continues as a fresh drag.
    pub fn on_pointer_up(&mut self, remaining: &[Point], now_ms: f64) {
        if !valid_points(remaining) {
            warn!(count = remaining.len(), "ignoring non-finite pointer up");
            return;
        }
        if remaining.is_empty() {
            self.release(Some(now_ms));
        } else if !self.session.is_idle() {
            self.begin_session(remaining, now_ms);
        }
    }

    /// The platform cancelled the gesture. No inertia is started.
    pub fn on_pointer_cancel(&mut self) {
        self.release(None);
    }

    /// Wheel input at `position` with vertical delta `delta_y`.
    ///
    /// Zooms by `1 - delta_y * zoom_factor` around `position`. Ignored while a
    /// gesture is active; cancels running animations otherwise.
    pub fn on_wheel(&mut self, position: Point, delta_y: f64) {
        if !position.is_finite() || !delta_y.is_finite() {
            warn!(?position, delta_y, "ignoring non-finite wheel event");
            return;
        }
        if !self.session.is_idle() {
            return;
        }
        self.cancel_animations();
        let zoom = self.transform.zoom;
        let new_zoom = self
            .limits
            .clamp(zoom * (1.0 - delta_y * self.config.zoom_factor));
        if new_zoom == zoom {
            return;
        }
        let pan = anchored_pan(position, self.transform.pan, zoom, new_zoom);
        let next = self.constrain(Transform::new(pan, new_zoom));
        trace!(zoom = new_zoom, pan = ?next.pan, "wheel");
        self.commit(next);
        self.settle();
    }

    // --- commands ---

    /// Animates to `zoom * zoom_step` around the viewport center.
    ///
    /// Returns `None` without a layout or when the zoom is already at its
    /// maximum.
    pub fn zoom_in(&mut self) -> Option<AnimationHandle> {
        self.zoom_about_center(self.transform.zoom * self.config.zoom_step)
    }

    /// Animates to `zoom / zoom_step` around the viewport center.
    pub fn zoom_out(&mut self) -> Option<AnimationHandle> {
        self.zoom_about_center(self.transform.zoom / self.config.zoom_step)
    }

    /// Animates back to the initial zoom around the viewport center.
    pub fn zoom_reset(&mut self) -> Option<AnimationHandle> {
        self.zoom_about_center(self.config.initial_zoom)
    }

    /// Drives the zoom toward `target`, or stops driving it with `None`.
    ///
    /// Repeating the current target does nothing. A new target that differs
    /// from the current zoom starts a tween; pan is left alone.
    pub fn set_target_zoom(&mut self, target: Option<f64>) -> Option<AnimationHandle> {
        if self.target_zoom == target {
            return None;
        }
        let Some(zoom) = target else {
            self.target_zoom = None;
            return None;
        };
        if !zoom.is_finite() {
            warn!(zoom, "ignoring non-finite target zoom");
            return None;
        }
        self.target_zoom = target;
        let end = self.limits.clamp(zoom);
        if end == self.transform.zoom {
            self.zoom_tween.cancel();
            return None;
        }
        self.inertia.cancel();
        self.end_session_for_request();
        debug!(from = self.transform.zoom, to = end, "zoom tween");
        Some(self.zoom_tween.replace(ZoomJob {
            tween: Tween::new(
                self.transform.zoom,
                end,
                self.config.duration_ms,
                self.config.easing,
            ),
            anchor: None,
        }))
    }

    /// Drives the pan toward `target`, or stops driving it with `None`.
    ///
    /// Runs on its own channel, so it can overlap a zoom tween.
    pub fn set_target_pan(&mut self, target: Option<Vec2>) -> Option<AnimationHandle> {
        if self.target_pan == target {
            return None;
        }
        let Some(pan) = target else {
            self.target_pan = None;
            return None;
        };
        if !pan.is_finite() {
            warn!(?pan, "ignoring non-finite target pan");
            return None;
        }
        self.target_pan = target;
        if pan == self.transform.pan {
            self.pan_tween.cancel();
            return None;
        }
        self.inertia.cancel();
        self.end_session_for_request();
        // A running zoom command stops steering pan; this channel owns it now.
        if let Some(job) = self.zoom_tween.live_mut() {
            job.anchor = None;
        }
        debug!(from = ?self.transform.pan, to = ?pan, "pan tween");
        Some(self.start_pan_tween(pan, Origin::Request))
    }

    /// Sets both targets; see [`Self::set_target_zoom`] and
    /// [`Self::set_target_pan`]. Returns `true` if a tween started.
    pub fn set_targets(&mut self, zoom: Option<f64>, pan: Option<Vec2>) -> bool {
        let zoom = self.set_target_zoom(zoom);
        let pan = self.set_target_pan(pan);
        zoom.is_some() || pan.is_some()
    }

    // --- frames ---

    /// Starts the clock of every tween that has not produced a frame yet.
    ///
    /// Requests and commands take no timestamp, so by default a tween's
    /// duration counts from its first [`Self::tick`]. Hosts that know the
    /// request time can call this right after the request so the duration
    /// counts from then instead. Tweens that already started are unaffected.
    pub fn start_pending_tweens(&mut self, now_ms: f64) {
        if !now_ms.is_finite() {
            warn!(now_ms, "ignoring non-finite start time");
            return;
        }
        if let Some(job) = self.zoom_tween.live_mut() {
            job.tween.start_at(now_ms);
        }
        if let Some(job) = self.pan_tween.live_mut() {
            job.progress.start_at(now_ms);
        }
    }

    /// Advances inertia and tweens to host time `now_ms`.
    ///
    /// Returns `true` if another frame is needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            warn!(now_ms, "ignoring non-finite frame time");
            return self.is_animating();
        }
        let mut next = self.transform;
        let mut settled = false;
        let mut request_done = false;

        let live_bounds = self.live_bounds(next.zoom);
        if let Some(inertia) = self.inertia.live_mut() {
            let step = inertia.step(next.pan, live_bounds.as_ref());
            next.pan = step.pan;
            self.velocity = inertia.velocity();
            if !step.moving {
                self.inertia.finish();
                self.velocity = Vec2::ZERO;
                settled = true;
                debug!(pan = ?next.pan, "inertia settled");
            }
        }

        let zoom_frame = self
            .zoom_tween
            .live_mut()
            .map(|job| (job.tween.sample(now_ms), job.anchor));
        if let Some((sample, anchor)) = zoom_frame {
            next.zoom = self.limits.clamp(sample.value);
            if let Some(a) = anchor {
                next.pan = anchored_pan(a.point, a.pan, a.zoom, next.zoom);
            }
            if sample.done {
                self.zoom_tween.finish();
                settled = true;
                request_done = true;
                debug!(zoom = next.zoom, "zoom tween finished");
            }
        }

        let pan_frame = self.pan_tween.live_mut().map(|job| {
            let sample = job.progress.sample(now_ms);
            (sample, job.from, job.to, job.origin)
        });
        if let Some((sample, from, to, origin)) = pan_frame {
            next.pan = if sample.done {
                to
            } else {
                from.lerp(to, sample.value)
            };
            if sample.done {
                self.pan_tween.finish();
                settled = true;
                request_done |= origin == Origin::Request;
                debug!(pan = ?to, ?origin, "pan tween finished");
            }
        }

        let next = self.constrain(next);
        self.commit(next);

        if request_done && !self.zoom_tween.is_active() && !self.pan_request_active() {
            self.observer.on_animation_end(&self.transform);
        }
        if settled {
            self.settle();
        }
        self.is_animating()
    }

    // --- internals ---

    fn begin_session(&mut self, points: &[Point], now_ms: f64) {
        self.velocity = Vec2::ZERO;
        self.session = match points {
            [] => GestureSession::Idle,
            [point] => GestureSession::drag(*point, self.transform.pan, now_ms),
            _ => GestureSession::pinch(points, self.transform).unwrap_or_default(),
        };
        debug!(session = ?self.session, "gesture");
    }

    fn release(&mut self, now_ms: Option<f64>) {
        let session = core::mem::take(&mut self.session);
        let velocity = core::mem::take(&mut self.velocity);
        match (session, now_ms) {
            (GestureSession::Idle, _) => return,
            (GestureSession::Dragging { last_timestamp, .. }, Some(now_ms)) => {
                let fresh = now_ms - last_timestamp <= self.config.velocity_timeout_ms;
                let inertia = Inertia::new(
                    if fresh { velocity } else { Vec2::ZERO },
                    self.config.friction,
                    self.config.stop_threshold,
                );
                if !inertia.is_settled() {
                    debug!(velocity = ?inertia.velocity(), "inertia started");
                    self.velocity = inertia.velocity();
                    self.inertia.replace(inertia);
                    return;
                }
            }
            _ => {}
        }
        debug!("gesture ended");
        self.settle();
    }

    fn end_session_for_request(&mut self) {
        if !self.session.is_idle() {
            debug!(session = ?self.session, "programmatic request ends gesture");
            self.session = GestureSession::Idle;
        }
        self.velocity = Vec2::ZERO;
    }

    fn zoom_about_center(&mut self, requested: f64) -> Option<AnimationHandle> {
        let Some(center) = self.viewport_center() else {
            debug!("zoom command skipped without layout");
            return None;
        };
        let end = self.limits.clamp(requested);
        if end == self.transform.zoom {
            return None;
        }
        self.cancel_animations();
        self.end_session_for_request();
        debug!(from = self.transform.zoom, to = end, "zoom command");
        Some(self.zoom_tween.replace(ZoomJob {
            tween: Tween::new(
                self.transform.zoom,
                end,
                self.config.duration_ms,
                self.config.easing,
            ),
            anchor: Some(Anchor {
                point: center,
                pan: self.transform.pan,
                zoom: self.transform.zoom,
            }),
        }))
    }

    fn start_pan_tween(&mut self, to: Vec2, origin: Origin) -> AnimationHandle {
        self.pan_tween.replace(PanJob {
            progress: Tween::new(0.0, 1.0, self.config.duration_ms, self.config.easing),
            from: self.transform.pan,
            to,
            origin,
        })
    }

    fn pan_request_active(&mut self) -> bool {
        self.pan_tween
            .live_mut()
            .is_some_and(|job| job.origin == Origin::Request)
    }

    /// Tweens pan back inside the bounds when nothing else owns the transform.
    fn settle(&mut self) {
        if self.config.bounds_policy != BoundsPolicy::Settle
            || !self.session.is_idle()
            || self.is_animating()
        {
            return;
        }
        let Some(bounds) = self.pan_bounds() else {
            return;
        };
        let clamped = bounds.clamp(self.transform.pan);
        if clamped.hit_x || clamped.hit_y {
            debug!(from = ?self.transform.pan, to = ?clamped.pan, "bounds correction");
            self.start_pan_tween(clamped.pan, Origin::Correction);
        }
    }

    fn refresh_bounds(&mut self) {
        match self.config.bounds_policy {
            BoundsPolicy::None => {}
            BoundsPolicy::Live => {
                let next = self.constrain(self.transform);
                self.commit(next);
            }
            BoundsPolicy::Settle => self.settle(),
        }
    }

    fn bounds_at(&self, zoom: f64) -> Option<PanBounds> {
        Some(PanBounds::new(self.viewport?, self.content?, zoom))
    }

    fn live_bounds(&self, zoom: f64) -> Option<PanBounds> {
        if self.config.bounds_policy == BoundsPolicy::Live {
            self.bounds_at(zoom)
        } else {
            None
        }
    }

    fn constrain(&self, transform: Transform) -> Transform {
        match self.live_bounds(transform.zoom) {
            Some(bounds) => Transform::new(bounds.clamp(transform.pan).pan, transform.zoom),
            None => transform,
        }
    }

    fn viewport_center(&self) -> Option<Point> {
        self.viewport
            .map(|size| Point::new(size.width / 2.0, size.height / 2.0))
    }

    fn commit(&mut self, next: Transform) -> bool {
        if !next.is_finite() {
            warn!(?next, "dropping non-finite transform");
            return false;
        }
        if next == self.transform {
            return false;
        }
        self.transform = next;
        self.observer.on_transform_change(&self.transform);
        true
    }
}

fn valid_size(size: Size) -> Option<Size> {
    (size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0)
        .then_some(size)
}

fn valid_points(points: &[Point]) -> bool {
    points.iter().all(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Size, Vec2};

    use super::{TransformObserver, ZoomPanController};
    use crate::config::{BoundsPolicy, ZoomPanConfig};
    use crate::transform::Transform;

    #[derive(Debug, Default)]
    struct Record {
        changes: Vec<Transform>,
        ends: Vec<Transform>,
    }

    impl TransformObserver for Record {
        fn on_transform_change(&mut self, transform: &Transform) {
            self.changes.push(*transform);
        }

        fn on_animation_end(&mut self, transform: &Transform) {
            self.ends.push(*transform);
        }
    }

    fn controller(config: ZoomPanConfig) -> ZoomPanController<Record> {
        let mut zp = ZoomPanController::with_observer(config, Record::default()).unwrap();
        zp.set_layout(Size::new(200.0, 100.0));
        zp
    }

    fn run(zp: &mut ZoomPanController<Record>, start: f64) -> f64 {
        let mut now = start;
        let mut frames = 0;
        while zp.tick(now) {
            now += 16.0;
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        now
    }

    #[test]
    fn drag_commits_once_per_move() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.on_pointer_down(&[Point::new(10.0, 10.0)], 0.0);
        zp.on_pointer_move(&[Point::new(20.0, 15.0)], 16.0);
        zp.on_pointer_move(&[Point::new(25.0, 15.0)], 32.0);
        assert_eq!(zp.pan(), Vec2::new(15.0, 5.0));
        assert_eq!(zp.velocity(), Vec2::new(5.0, 0.0));
        assert_eq!(zp.observer().changes.len(), 2);
    }

    #[test]
    fn release_after_drag_starts_inertia() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.on_pointer_down(&[Point::new(0.0, 0.0)], 0.0);
        zp.on_pointer_move(&[Point::new(10.0, 0.0)], 16.0);
        zp.on_pointer_up(&[], 20.0);
        assert!(zp.is_animating());
        run(&mut zp, 32.0);
        assert!(zp.pan().x > 10.0);
        assert_eq!(zp.velocity(), Vec2::ZERO);
        assert!(zp.observer().ends.is_empty());
    }

    #[test]
    fn stale_release_has_no_inertia() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.on_pointer_down(&[Point::new(0.0, 0.0)], 0.0);
        zp.on_pointer_move(&[Point::new(10.0, 0.0)], 16.0);
        zp.on_pointer_up(&[], 500.0);
        assert!(!zp.is_animating());
    }

    #[test]
    fn cancel_never_starts_inertia() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.on_pointer_down(&[Point::new(0.0, 0.0)], 0.0);
        zp.on_pointer_move(&[Point::new(10.0, 0.0)], 16.0);
        zp.on_pointer_cancel();
        assert!(!zp.is_animating());
        assert!(zp.session().is_idle());
    }

    #[test]
    fn pinch_release_has_no_inertia() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.on_pointer_down(&[Point::new(40.0, 50.0), Point::new(60.0, 50.0)], 0.0);
        zp.on_pointer_move(&[Point::new(30.0, 50.0), Point::new(70.0, 50.0)], 16.0);
        assert!((zp.zoom() - 2.0).abs() < 1e-12);
        zp.on_pointer_up(&[], 20.0);
        assert!(!zp.is_animating());
    }

    #[test]
    fn pinch_to_single_touch_reseeds_drag() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.on_pointer_down(&[Point::new(40.0, 50.0), Point::new(60.0, 50.0)], 0.0);
        zp.on_pointer_move(&[Point::new(30.0, 50.0), Point::new(70.0, 50.0)], 16.0);
        let pan = zp.pan();
        zp.on_pointer_up(&[Point::new(70.0, 50.0)], 20.0);
        assert!(zp.session().is_dragging());
        assert_eq!(zp.velocity(), Vec2::ZERO);
        zp.on_pointer_move(&[Point::new(75.0, 52.0)], 36.0);
        assert_eq!(zp.pan(), pan + Vec2::new(5.0, 2.0));
    }

    #[test]
    fn gesture_start_cancels_tween_frames() {
        let mut zp = controller(ZoomPanConfig::default());
        let handle = zp.zoom_in().unwrap();
        zp.tick(0.0);
        zp.tick(100.0);
        let frames = zp.observer().changes.len();
        zp.on_pointer_down(&[Point::new(5.0, 5.0)], 120.0);
        assert!(!handle.is_live());
        zp.tick(140.0);
        zp.tick(700.0);
        assert_eq!(zp.observer().changes.len(), frames);
        assert!(zp.observer().ends.is_empty());
    }

    #[test]
    fn external_cancel_stops_tween() {
        let mut zp = controller(ZoomPanConfig::default());
        let handle = zp.set_target_pan(Some(Vec2::new(100.0, 0.0))).unwrap();
        zp.tick(0.0);
        zp.tick(200.0);
        handle.cancel();
        let pan = zp.pan();
        assert!(!zp.tick(1_000.0));
        assert_eq!(zp.pan(), pan);
    }

    #[test]
    fn live_bounds_stop_drag_at_edge() {
        let mut zp = controller(ZoomPanConfig::default().with_bounds_policy(BoundsPolicy::Live));
        zp.set_content_size(Some(Size::new(400.0, 100.0)));
        zp.on_pointer_down(&[Point::new(100.0, 50.0)], 0.0);
        zp.on_pointer_move(&[Point::new(150.0, 80.0)], 16.0);
        assert_eq!(zp.pan(), Vec2::ZERO);
        zp.on_pointer_move(&[Point::new(-500.0, 50.0)], 32.0);
        assert_eq!(zp.pan(), Vec2::new(-200.0, 0.0));
    }

    #[test]
    fn settle_policy_corrects_after_release() {
        let mut zp =
            controller(ZoomPanConfig::default().with_bounds_policy(BoundsPolicy::Settle));
        zp.set_content_size(Some(Size::new(400.0, 100.0)));
        zp.on_pointer_down(&[Point::new(100.0, 50.0)], 0.0);
        zp.on_pointer_move(&[Point::new(150.0, 50.0)], 16.0);
        assert_eq!(zp.pan(), Vec2::new(50.0, 0.0));
        zp.on_pointer_up(&[], 500.0);
        assert!(zp.is_animating());
        run(&mut zp, 520.0);
        assert_eq!(zp.pan(), Vec2::ZERO);
        assert!(zp.observer().ends.is_empty());
    }

    #[test]
    fn target_zoom_change_semantics() {
        let mut zp = controller(ZoomPanConfig::default());
        assert!(zp.set_target_zoom(Some(1.5)).is_some());
        assert!(zp.set_target_zoom(Some(1.5)).is_none());
        run(&mut zp, 0.0);
        assert_eq!(zp.zoom(), 1.5);
        assert_eq!(zp.observer().ends, [Transform::new(Vec2::ZERO, 1.5)]);
        assert!(zp.set_target_zoom(None).is_none());
        assert!(zp.set_target_zoom(Some(1.5)).is_none());
    }

    #[test]
    fn commands_need_a_layout() {
        let mut zp = ZoomPanController::new(ZoomPanConfig::default()).unwrap();
        assert!(zp.zoom_in().is_none());
        zp.set_layout(Size::new(100.0, 100.0));
        assert!(zp.zoom_in().is_some());
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.on_wheel(Point::new(f64::NAN, 0.0), 10.0);
        zp.on_wheel(Point::new(0.0, 0.0), f64::INFINITY);
        zp.on_pointer_down(&[Point::new(f64::INFINITY, 0.0)], 0.0);
        assert_eq!(zp.transform(), Transform::IDENTITY);
        assert!(zp.session().is_idle());
        assert!(zp.set_target_zoom(Some(f64::NAN)).is_none());
    }

    #[test]
    fn shrinking_limits_reclamps_zoom() {
        let mut zp = controller(ZoomPanConfig::default());
        zp.set_zoom_limits(1.5, 3.0).unwrap();
        assert_eq!(zp.zoom(), 1.5);
        assert!(zp.set_zoom_limits(2.0, 1.0).is_err());
        assert_eq!(zp.zoom_limits().min, 1.5);
    }
}
