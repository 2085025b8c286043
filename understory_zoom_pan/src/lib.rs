// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_pan --heading-base-level=0

//! Understory Zoom Pan: a headless, interactive pan/zoom controller.
//!
//! This crate turns raw input into a uniform pan + zoom [`Transform`] for a
//! scrollable, zoomable content area. It handles:
//! - Single‑pointer drag with per‑event velocity and inertial drift on release.
//! - Two‑finger pinch that keeps the content under the touch centroid fixed.
//! - Wheel zoom anchored at the cursor.
//! - Zoom in/out/reset commands and externally requested target zoom/pan,
//!   animated with eased, time‑based tweens.
//! - Optional pan bounds derived from content and viewport size, enforced
//!   either live or by a post‑gesture correction ([`BoundsPolicy`]).
//!
//! It does **not** render anything or own an event loop. Callers are
//! expected to:
//! - Forward container‑local pointer, touch and wheel input.
//! - Call [`ZoomPanController::tick`] once per display frame while
//!   [`ZoomPanController::is_animating`] is `true`.
//! - Apply [`Transform::to_affine`] to their content, anchored at its
//!   top‑left corner.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_zoom_pan::{ZoomPanConfig, ZoomPanController};
//!
//! let mut zp = ZoomPanController::new(ZoomPanConfig::default()).unwrap();
//! zp.set_layout(Size::new(800.0, 600.0));
//!
//! // Drag the content 30px to the right.
//! zp.on_pointer_down(&[Point::new(100.0, 100.0)], 0.0);
//! zp.on_pointer_move(&[Point::new(130.0, 100.0)], 16.0);
//! assert_eq!(zp.pan(), Vec2::new(30.0, 0.0));
//!
//! // Release; the drag velocity keeps the content moving for a while.
//! zp.on_pointer_up(&[], 20.0);
//! let mut now = 32.0;
//! while zp.tick(now) {
//!     now += 16.0;
//! }
//! assert!(zp.pan().x > 30.0);
//! ```
//!
//! ## Observing changes
//!
//! Implement [`TransformObserver`] to be told about every committed change
//! and about finished programmatic transitions:
//!
//! ```rust
//! use kurbo::Size;
//! use understory_zoom_pan::{Transform, TransformObserver, ZoomPanConfig, ZoomPanController};
//!
//! #[derive(Default)]
//! struct Frames(usize, Option<Transform>);
//!
//! impl TransformObserver for Frames {
//!     fn on_transform_change(&mut self, _: &Transform) {
//!         self.0 += 1;
//!     }
//!     fn on_animation_end(&mut self, t: &Transform) {
//!         self.1 = Some(*t);
//!     }
//! }
//!
//! let mut zp = ZoomPanController::with_observer(ZoomPanConfig::default(), Frames::default())
//!     .unwrap();
//! zp.set_layout(Size::new(400.0, 400.0));
//! zp.zoom_out();
//! let mut now = 0.0;
//! while zp.tick(now) {
//!     now += 16.0;
//! }
//! assert_eq!(zp.observer().1.map(|t| t.zoom), Some(0.5));
//! assert!(zp.observer().0 > 1);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is always clamped to the configured limits before it is applied,
//!   including every intermediate tween frame.
//! - All zoom paths share one anchor formula ([`anchored_pan`]): the content
//!   point under the anchor before the change is under it afterwards.
//! - Drag velocity is the per‑event pan delta (pixels per move event), and
//!   inertia applies it per frame. Irregular event delivery therefore skews
//!   the release velocity.
//! - Release hands the latest drag velocity to inertia only if the last move
//!   happened within [`ZoomPanConfig::velocity_timeout_ms`]; a pointer held
//!   still before release does not fling.
//! - Requests and commands take no timestamp, so a tween's duration counts
//!   from its first [`ZoomPanController::tick`] unless the host calls
//!   [`ZoomPanController::start_pending_tweens`] at request time.
//! - Animations are cooperative: each job lives in an [`AnimationSlot`] and
//!   can be stopped through its [`AnimationHandle`]; a cancelled job produces
//!   no further frames.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod bounds;
mod config;
mod controller;
mod easing;
mod gesture;
mod inertia;
mod transform;
mod tween;

pub use bounds::{Clamped, PanBounds};
pub use config::{BoundsPolicy, ConfigError, ZoomPanConfig};
pub use controller::{TransformObserver, ZoomPanController};
pub use easing::Easing;
pub use gesture::{GestureSession, average_distance, centroid};
pub use inertia::{Inertia, InertiaStep};
pub use transform::{Transform, ZoomLimits, anchored_pan};
pub use tween::{AnimationHandle, AnimationSlot, Tween, TweenSample};
