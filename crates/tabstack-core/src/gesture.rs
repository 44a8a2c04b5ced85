#![forbid(unsafe_code)]

//! Per-axis gesture primitives: threshold tracking and velocity estimation.
//!
//! [`DragTracker`] decides when movement along one axis becomes a drag and
//! measures the distance travelled since then. [`VelocityTracker`] keeps a
//! short history of pointer samples and reports release velocities for fling
//! and swipe decisions.
//!
//! # Invariants
//!
//! 1. Once a tracker's threshold has been reached it stays reached until
//!    `reset()`.
//! 2. `DragTracker::distance()` is zero at the sample that reached the
//!    threshold, so a drag never starts with a jump.
//! 3. `VelocityTracker` keeps at most one sample at or beyond its horizon
//!    from the newest sample, so a release velocity reflects recent motion.

use std::collections::VecDeque;
use std::time::Duration;

use crate::geometry::AxisPoint;

// ---------------------------------------------------------------------------
// DragTracker
// ---------------------------------------------------------------------------

/// Tracks movement along one axis against a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTracker {
    threshold: f32,
    start: Option<f32>,
    reached_at: Option<f32>,
    current: f32,
}

impl DragTracker {
    /// Create a tracker that starts dragging once movement exceeds `threshold`.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
            reached_at: None,
            current: 0.0,
        }
    }

    /// Record a new position.
    ///
    /// The first update after a reset becomes the start position. Returns
    /// true if this update is the one that reached the threshold.
    pub fn update(&mut self, position: f32) -> bool {
        self.current = position;
        let Some(start) = self.start else {
            self.start = Some(position);
            return false;
        };
        if self.reached_at.is_none() && (position - start).abs() > self.threshold {
            self.reached_at = Some(position);
            return true;
        }
        false
    }

    /// Whether movement has exceeded the threshold since the last reset.
    #[inline]
    #[must_use]
    pub fn threshold_reached(&self) -> bool {
        self.reached_at.is_some()
    }

    /// Distance travelled since the threshold was reached (0 before that).
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.reached_at.map_or(0.0, |reached| self.current - reached)
    }

    /// Distance travelled since the start position.
    #[must_use]
    pub fn total_distance(&self) -> f32 {
        self.start.map_or(0.0, |start| self.current - start)
    }

    /// The first position recorded after the last reset.
    #[inline]
    #[must_use]
    pub fn start_position(&self) -> Option<f32> {
        self.start
    }

    /// The most recently recorded position.
    #[inline]
    #[must_use]
    pub fn current_position(&self) -> f32 {
        self.current
    }

    /// Whether no position has been recorded since the last reset.
    #[inline]
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.start.is_none()
    }

    /// Forget all recorded positions.
    pub fn reset(&mut self) {
        self.start = None;
        self.reached_at = None;
        self.current = 0.0;
    }
}

// ---------------------------------------------------------------------------
// VelocityTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Duration,
    point: AxisPoint,
}

/// Which component of a sample a velocity is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// The dragging axis.
    Axis,
    /// The orthogonal axis.
    Orthogonal,
}

/// Estimates the current pointer velocity from recent samples.
///
/// Only the motion of the last `horizon` counts: the tracker keeps every
/// sample younger than the horizon plus one anchor sample at or before it, and
/// reports the velocity from that anchor to the newest sample. Sparse input
/// (a single sample inside the horizon) falls back to the last pair, so a
/// release after a long pause reflects the pause rather than the motion
/// before it.
///
/// # Invariants
///
/// - Every retained sample except the oldest lies strictly within the horizon
///   of the newest one.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    horizon: Duration,
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    /// Create a tracker measuring motion over the last `horizon`.
    #[must_use]
    pub fn new(horizon: Duration) -> Self {
        Self {
            horizon,
            samples: VecDeque::with_capacity(16),
        }
    }

    /// Record a sample.
    ///
    /// A sample older than the newest one means the caller's clock restarted;
    /// the history is discarded in that case.
    pub fn add(&mut self, time: Duration, point: AxisPoint) {
        if self.samples.back().is_some_and(|last| time < last.time) {
            self.samples.clear();
        }
        self.samples.push_back(Sample { time, point });
        // Drop the anchor while the next sample can take its place.
        while self
            .samples
            .get(1)
            .is_some_and(|next| time.saturating_sub(next.time) >= self.horizon)
        {
            self.samples.pop_front();
        }
    }

    /// Velocity in pixels per second from the anchor to the newest sample.
    ///
    /// Returns 0 with fewer than two samples or no elapsed time.
    #[must_use]
    pub fn velocity(&self, component: Component) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let elapsed = last.time.saturating_sub(first.time).as_secs_f32();
        if elapsed <= 0.0 {
            return 0.0;
        }
        let delta = match component {
            Component::Axis => last.point.axis - first.point.axis,
            Component::Orthogonal => last.point.orthogonal - first.point.orthogonal,
        };
        delta / elapsed
    }

    /// Time covered by the retained samples.
    #[must_use]
    pub fn span(&self) -> Duration {
        match (self.samples.front(), self.samples.back()) {
            (Some(first), Some(last)) => last.time.saturating_sub(first.time),
            _ => Duration::ZERO,
        }
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Discard all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
