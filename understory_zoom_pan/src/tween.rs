// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time‑based scalar tweens and cancellable animation slots.
//!
//! ## Usage
//!
//! 1) Create a [`Tween`] with start/end values, a duration in milliseconds and
//!    an [`Easing`].
//! 2) On each frame call [`Tween::sample`] with the host's timestamp. The
//!    first sample latches the start time, unless [`Tween::start_at`] fixed
//!    it earlier.
//! 3) Stop once [`TweenSample::done`] is `true`; the final sample carries the
//!    exact end value.
//!
//! Jobs live in an [`AnimationSlot`], which holds at most one job per channel
//! and hands out an [`AnimationHandle`] per job. Cancelling a handle turns the
//! next access to the slot into a no‑op that drops the job.
//!
//! ```
//! use understory_zoom_pan::{Easing, Tween};
//!
//! let mut tween = Tween::new(1.0, 2.0, 100.0, Easing::Linear);
//! assert_eq!(tween.sample(1_000.0).value, 1.0);
//! assert_eq!(tween.sample(1_050.0).value, 1.5);
//! let last = tween.sample(1_200.0);
//! assert!(last.done);
//! assert_eq!(last.value, 2.0);
//! ```

use alloc::rc::Rc;
use core::cell::Cell;

use crate::easing::Easing;

/// Eased interpolation of one scalar over a fixed wall‑clock duration.
#[derive(Clone, Debug)]
pub struct Tween {
    start: f64,
    end: f64,
    duration: f64,
    easing: Easing,
    start_time: Option<f64>,
    progress: f64,
}

/// One frame of a [`Tween`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample {
    /// Interpolated value; exactly the end value once `done`.
    pub value: f64,
    /// Linear progress in `[0, 1]`, non‑decreasing across samples.
    pub progress: f64,
    /// Whether the tween reached its end on this sample.
    pub done: bool,
}

impl Tween {
    /// Creates a tween from `start` to `end` over `duration_ms`.
    ///
    /// A zero (or negative) duration completes on the first sample.
    #[must_use]
    pub fn new(start: f64, end: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration: duration_ms,
            easing,
            start_time: None,
            progress: 0.0,
        }
    }

    /// Start value.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End value.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Progress reached by the latest sample.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Fixes the start time at `now_ms` unless it is already latched.
    ///
    /// Without this the first [`Tween::sample`] latches the start time.
    pub fn start_at(&mut self, now_ms: f64) {
        if now_ms.is_finite() {
            self.start_time.get_or_insert(now_ms);
        }
    }

    /// Returns `true` once the start time is latched.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Samples the tween at host time `now_ms`.
    ///
    /// Timestamps earlier than a previous sample never move progress
    /// backwards.
    pub fn sample(&mut self, now_ms: f64) -> TweenSample {
        let start_time = *self.start_time.get_or_insert(now_ms);
        let raw = if self.duration > 0.0 {
            (now_ms - start_time) / self.duration
        } else {
            1.0
        };
        let raw = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
        self.progress = self.progress.max(raw);

        if self.progress >= 1.0 {
            return TweenSample {
                value: self.end,
                progress: 1.0,
                done: true,
            };
        }
        let eased = self.easing.ease(self.progress);
        TweenSample {
            value: self.start + (self.end - self.start) * eased,
            progress: self.progress,
            done: false,
        }
    }
}

/// Shared liveness flag for one animation job.
///
/// Clones refer to the same job. Cancelling is idempotent and takes effect
/// before the job's next frame.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    live: Rc<Cell<bool>>,
}

impl AnimationHandle {
    fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(true)),
        }
    }

    /// Stops the job; its next scheduled frame does nothing.
    pub fn cancel(&self) {
        self.live.set(false);
    }

    /// Returns `true` until the job is cancelled or finishes.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.get()
    }
}

/// Holds at most one live animation job for a channel.
#[derive(Debug)]
pub struct AnimationSlot<J> {
    current: Option<(J, AnimationHandle)>,
}

impl<J> Default for AnimationSlot<J> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<J> AnimationSlot<J> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the current job, if any, and installs `job` in its place.
    pub fn replace(&mut self, job: J) -> AnimationHandle {
        self.cancel();
        let handle = AnimationHandle::new();
        self.current = Some((job, handle.clone()));
        handle
    }

    /// Cancels and drops the current job. Returns `true` if a live job was
    /// stopped.
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some((_, handle)) => {
                let was_live = handle.is_live();
                handle.cancel();
                was_live
            }
            None => false,
        }
    }

    /// Returns the live job, dropping it first if its handle was cancelled.
    pub fn live_mut(&mut self) -> Option<&mut J> {
        if self
            .current
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_live())
        {
            self.current = None;
        }
        self.current.as_mut().map(|(job, _)| job)
    }

    /// Removes the current job after it ran to completion.
    pub fn finish(&mut self) -> Option<J> {
        self.current.take().map(|(job, handle)| {
            handle.cancel();
            job
        })
    }

    /// Returns `true` if a job is installed and has not been cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|(_, handle)| handle.is_live())
    }
}
