// Copyright 2025 the Slideshow Authors
// SPDX-License-Identifier: Apache-2.0

//! Drag gestures.
//!
//! A press only becomes a drag once the pointer has travelled past
//! `offset_threshold`; below that it may still turn out to be a click.
//!
//! - `DragMode::Xy` (gallery): the first axis to cross the threshold owns
//!   the gesture. Horizontal swipes change slides, vertical ones close.
//! - `DragMode::Free` (pan & zoom): 2-D panning that keeps its offset
//!   between gestures and coasts with inertia on release.

use crate::config::DragSettings;
use crate::input::Timestamp;
use kurbo::{Point, Size, Vec2};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Free,
    Xy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn of(self, v: Vec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    fn project(self, v: Vec2) -> Vec2 {
        match self {
            Axis::X => Vec2::new(v.x, 0.0),
            Axis::Y => Vec2::new(0.0, v.y),
        }
    }
}

/// What the drag module needs to know about its surroundings
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    pub settings: &'a DragSettings,
    pub mode: DragMode,
    pub viewport: Size,
    pub at_first: bool,
    pub at_last: bool,
    /// Current viewer allows swiping between slides
    pub allow_horizontal: bool,
}

/// Result of feeding a pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Nothing to do (idle, or still below threshold)
    None,
    /// Crossed the threshold; the gesture is now a real drag
    Started { offset: Vec2 },
    Moved { offset: Vec2 },
}

/// How a gallery-mode drag should end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XyOutcome {
    SnapBack { duration: Duration },
    ChangeSlide { forward: bool, duration: Duration },
    Close { offset: Vec2 },
}

/// Read-only snapshot for other modules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragView {
    pub pan_offset: Vec2,
    pub gesture_offset: Vec2,
    pub dragging: bool,
    pub axis: Option<Axis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Pressed, below threshold
    Pending,
    Dragging,
}

/// Velocity estimate from throttled samples
#[derive(Debug, Clone, Copy, Default)]
struct SpeedTracker {
    reference: Option<(Timestamp, Vec2)>,
    velocity: Vec2,
    measured_at: Option<Timestamp>,
}

impl SpeedTracker {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn sample(&mut self, at: Timestamp, offset: Vec2, interval: Duration) {
        let Some((ref_at, ref_offset)) = self.reference else {
            self.reference = Some((at, offset));
            return;
        };
        let elapsed = at.saturating_sub(ref_at);
        if elapsed.is_zero() {
            return;
        }
        self.velocity = (offset - ref_offset) / (elapsed.as_secs_f64() * 1000.0);
        self.measured_at = Some(at);
        if elapsed >= interval {
            self.reference = Some((at, offset));
        }
    }

    /// px/ms; zero when the last measurement is stale
    fn velocity(&self, now: Timestamp, stale_after: Duration) -> Vec2 {
        match self.measured_at {
            Some(at) if now.saturating_sub(at) <= stale_after => self.velocity,
            _ => Vec2::ZERO,
        }
    }
}

/// Coasting after a free-mode release
#[derive(Debug, Clone, Copy, PartialEq)]
struct Inertia {
    from: Vec2,
    travel: Vec2,
    started: Timestamp,
    duration: Duration,
}

#[derive(Debug, Clone)]
pub struct Drag {
    phase: Phase,
    mode: DragMode,
    press: Point,
    origin: Point,
    axis: Option<Axis>,
    /// Free-mode offset at gesture start
    base_offset: Vec2,
    /// Persistent free-mode pan offset
    pan_offset: Vec2,
    /// Xy-mode offset of the running gesture (after edge resistance)
    gesture_offset: Vec2,
    speed: SpeedTracker,
    inertia: Option<Inertia>,
}

impl Default for Drag {
    fn default() -> Self {
        Self::new()
    }
}

impl Drag {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            mode: DragMode::Xy,
            press: Point::ORIGIN,
            origin: Point::ORIGIN,
            axis: None,
            base_offset: Vec2::ZERO,
            pan_offset: Vec2::ZERO,
            gesture_offset: Vec2::ZERO,
            speed: SpeedTracker::default(),
            inertia: None,
        }
    }

    pub fn view(&self) -> DragView {
        DragView {
            pan_offset: self.pan_offset,
            gesture_offset: self.gesture_offset,
            dragging: self.is_dragging(),
            axis: self.axis,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Past the threshold
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    /// Replace the free-mode offset (pan & zoom entry, origin compensation)
    pub fn set_pan_offset(&mut self, offset: Vec2) {
        self.pan_offset = offset;
        self.base_offset = offset;
    }

    pub fn press(&mut self, position: Point, at: Timestamp, mode: DragMode) {
        self.stop_inertia();
        self.phase = Phase::Pending;
        self.mode = mode;
        self.press = position;
        self.origin = position;
        self.axis = None;
        self.base_offset = self.pan_offset;
        self.gesture_offset = Vec2::ZERO;
        self.speed.reset();
        self.speed.sample(at, Vec2::ZERO, Duration::ZERO);
    }

    pub fn move_to(&mut self, position: Point, at: Timestamp, ctx: &DragContext<'_>) -> DragUpdate {
        match self.phase {
            Phase::Idle => DragUpdate::None,
            Phase::Pending => {
                if !self.try_start(position, ctx) {
                    return DragUpdate::None;
                }
                self.phase = Phase::Dragging;
                let offset = self.apply_move(position, at, ctx);
                tracing::debug!(
                    "[Drag] started ({:?}, axis {:?}) at offset {:?}",
                    self.mode,
                    self.axis,
                    offset
                );
                DragUpdate::Started { offset }
            }
            Phase::Dragging => DragUpdate::Moved {
                offset: self.apply_move(position, at, ctx),
            },
        }
    }

    /// End the gesture. Returns the release velocity (px/ms) when the press
    /// had turned into a drag.
    pub fn release(&mut self, at: Timestamp, ctx: &DragContext<'_>) -> Option<Vec2> {
        let was_dragging = self.phase == Phase::Dragging;
        self.phase = Phase::Idle;
        if !was_dragging {
            return None;
        }
        let velocity = self.speed.velocity(at, ctx.settings.speed_stale_after());
        Some(match (self.mode, self.axis) {
            (DragMode::Xy, Some(axis)) => axis.project(velocity),
            _ => velocity,
        })
    }

    /// Drop the gesture without committing anything
    pub fn cancel(&mut self) {
        if self.phase == Phase::Dragging && self.mode == DragMode::Free {
            self.pan_offset = self.base_offset;
        }
        self.phase = Phase::Idle;
        self.axis = None;
        self.gesture_offset = Vec2::ZERO;
    }

    /// Forget everything, including the pan offset (slide change, clean-up)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Decide how a gallery-mode release ends
    pub fn resolve_xy(&self, velocity: Vec2, ctx: &DragContext<'_>) -> XyOutcome {
        let settings = ctx.settings;
        let Some(axis) = self.axis else {
            return XyOutcome::SnapBack {
                duration: settings.snap_duration(0.0),
            };
        };
        let offset = axis.of(self.gesture_offset);
        let extent = axis.extent(ctx.viewport).max(1.0);
        let ratio = (offset.abs() / extent).min(1.0);
        let speed = axis.of(velocity);
        // A fast flick only counts when it goes the same way as the drag
        let fast = speed.abs() > settings.commit_speed && speed.signum() == offset.signum();
        let commit = offset != 0.0 && (ratio > settings.commit_ratio || fast);

        if !commit {
            return XyOutcome::SnapBack {
                duration: settings.snap_duration(ratio),
            };
        }

        match axis {
            Axis::Y => XyOutcome::Close {
                offset: self.gesture_offset,
            },
            Axis::X => {
                let forward = offset < 0.0;
                let blocked = settings.pan_resistance
                    && ((forward && ctx.at_last) || (!forward && ctx.at_first));
                if blocked {
                    XyOutcome::SnapBack {
                        duration: settings.snap_duration(ratio),
                    }
                } else {
                    XyOutcome::ChangeSlide {
                        forward,
                        duration: settings.snap_duration(1.0 - ratio),
                    }
                }
            }
        }
    }

    // ===== Inertia =====

    /// Start coasting after a free-mode release. Returns the coast duration,
    /// or `None` when the release was too slow to bother.
    pub fn start_inertia(
        &mut self,
        velocity: Vec2,
        at: Timestamp,
        settings: &DragSettings,
    ) -> Option<Duration> {
        let speed = velocity.hypot();
        if speed < 0.01 {
            return None;
        }
        let duration_ms = speed.sqrt() * settings.inertia_duration_factor;
        let travel = velocity * duration_ms * settings.inertia_travel_factor;
        let duration = Duration::from_millis(duration_ms.round() as u64);
        self.inertia = Some(Inertia {
            from: self.pan_offset,
            travel,
            started: at,
            duration,
        });
        tracing::debug!(
            "[Drag] inertia: speed {:.3}px/ms, {:?}, travel {:?}",
            speed,
            duration,
            travel
        );
        Some(duration)
    }

    pub fn has_inertia(&self) -> bool {
        self.inertia.is_some()
    }

    /// Advance the coast. Returns the new pan offset and whether the coast
    /// is finished.
    pub fn inertia_frame(&mut self, now: Timestamp) -> Option<(Vec2, bool)> {
        let inertia = self.inertia?;
        let elapsed = now.saturating_sub(inertia.started);
        let t = if inertia.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / inertia.duration.as_secs_f64()).min(1.0)
        };
        self.pan_offset = inertia.from + inertia.travel * ease_out_cubic(t);
        self.base_offset = self.pan_offset;
        let done = t >= 1.0;
        if done {
            self.inertia = None;
        }
        Some((self.pan_offset, done))
    }

    /// Freeze the coast where it is
    pub fn stop_inertia(&mut self) {
        self.inertia = None;
    }

    // ===== Internals =====

    fn try_start(&mut self, position: Point, ctx: &DragContext<'_>) -> bool {
        let threshold = ctx.settings.offset_threshold;
        let delta = position - self.press;
        match ctx.mode {
            DragMode::Free => {
                let distance = delta.hypot();
                if distance <= threshold {
                    return false;
                }
                // Move the origin toward the pointer so the slide does not
                // jump by the threshold
                self.origin = self.press + delta * (threshold / distance);
                true
            }
            DragMode::Xy => {
                let horizontal = delta.x.abs() > threshold && ctx.allow_horizontal;
                let vertical = delta.y.abs() > threshold;
                let axis = match (horizontal, vertical) {
                    (true, true) if delta.x.abs() >= delta.y.abs() => Axis::X,
                    (true, true) => Axis::Y,
                    (true, false) => Axis::X,
                    (false, true) => Axis::Y,
                    (false, false) => return false,
                };
                let shift = axis.of(delta).signum() * threshold;
                self.origin = match axis {
                    Axis::X => Point::new(self.press.x + shift, self.press.y),
                    Axis::Y => Point::new(self.press.x, self.press.y + shift),
                };
                self.axis = Some(axis);
                true
            }
        }
    }

    fn apply_move(&mut self, position: Point, at: Timestamp, ctx: &DragContext<'_>) -> Vec2 {
        let raw = position - self.origin;
        let interval = ctx.settings.speed_sample_interval();
        match (self.mode, self.axis) {
            (DragMode::Xy, Some(axis)) => {
                let mut offset = axis.project(raw);
                if axis == Axis::X && ctx.settings.pan_resistance {
                    let resisted = (offset.x > 0.0 && ctx.at_first) || (offset.x < 0.0 && ctx.at_last);
                    if resisted {
                        offset.x = edge_resistance(
                            offset.x,
                            ctx.viewport.width,
                            ctx.settings.edge_resistance,
                        );
                    }
                }
                self.speed.sample(at, axis.project(raw), interval);
                self.gesture_offset = offset;
                offset
            }
            _ => {
                self.pan_offset = self.base_offset + raw;
                self.speed.sample(at, raw, interval);
                self.pan_offset
            }
        }
    }
}

/// Rubber-band damping: linear for small offsets, saturating at
/// `strength * extent`
pub fn edge_resistance(offset: f64, extent: f64, strength: f64) -> f64 {
    let limit = (extent * strength).max(1.0);
    offset.signum() * limit * (1.0 - (-offset.abs() / limit).exp())
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
