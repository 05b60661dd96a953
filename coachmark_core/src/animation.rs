// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path interpolation over time.
//!
//! A [`RevealAnimation`] moves a mask path from a `from` path to a `to` path
//! and, with auto-reverse, back again. One forward pass lasts
//! [`duration`](crate::config::AnimationConfig::duration); a *cycle* is the
//! forward pass plus the optional reverse pass. Timing is linear.
//!
//! ```text
//!   progress
//!   1.0 ┤    ╱╲    ╱╲
//!       │   ╱  ╲  ╱  ╲        auto_reverse = true
//!   0.0 ┼──╱────╲╱────╲──►
//!          │ d  │ d  │        one cycle = 2 × duration
//! ```
//!
//! Animations are data: they hold a begin time and compute their state from
//! whatever `now` the caller passes in. Pausing freezes the elapsed time;
//! resuming shifts the begin time so playback continues where it stopped.

use core::time::Duration;

use kurbo::{BezPath, PathEl};

use crate::config::{AnimationConfig, Repeat};
use crate::time::HostTime;

/// Looping interpolation between two mask paths.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealAnimation {
    from: BezPath,
    to: BezPath,
    duration: Duration,
    repeat: Repeat,
    auto_reverse: bool,
    begin: HostTime,
    /// Elapsed time frozen by [`pause`](Self::pause).
    paused: Option<Duration>,
}

impl RevealAnimation {
    /// Creates an animation from `from` to `to` that starts at `begin`.
    #[must_use]
    pub fn new(from: BezPath, to: BezPath, config: &AnimationConfig, begin: HostTime) -> Self {
        Self {
            from,
            to,
            duration: config.duration,
            repeat: config.repeat,
            auto_reverse: config.auto_reverse,
            begin,
            paused: None,
        }
    }

    /// Returns a running copy of this animation that starts over at `begin`.
    #[must_use]
    pub fn restarted(&self, begin: HostTime) -> Self {
        Self {
            begin,
            paused: None,
            ..self.clone()
        }
    }

    /// The path at progress 0.
    #[must_use]
    pub fn from_path(&self) -> &BezPath {
        &self.from
    }

    /// The path at progress 1.
    #[must_use]
    pub fn to_path(&self) -> &BezPath {
        &self.to
    }

    /// When playback (re)started.
    #[must_use]
    pub fn begin(&self) -> HostTime {
        self.begin
    }

    /// Returns whether the animation is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    /// Duration of one cycle.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        if self.auto_reverse {
            self.duration.saturating_mul(2)
        } else {
            self.duration
        }
    }

    /// Total running time, or `None` if the animation repeats forever.
    #[must_use]
    pub fn active_duration(&self) -> Option<Duration> {
        self.repeat
            .cycles()
            .map(|cycles| self.cycle_duration().saturating_mul(cycles))
    }

    /// Time spent playing at `now`, frozen while paused.
    #[must_use]
    pub fn elapsed(&self, now: HostTime) -> Duration {
        self.paused
            .unwrap_or_else(|| now.saturating_duration_since(self.begin))
    }

    /// Returns whether the animation has run all of its cycles at `now`.
    #[must_use]
    pub fn is_finished(&self, now: HostTime) -> bool {
        self.active_duration()
            .is_some_and(|total| self.elapsed(now) >= total)
    }

    /// Interpolation factor at `now`, in `0.0..=1.0`, or `None` once finished.
    #[must_use]
    pub fn progress(&self, now: HostTime) -> Option<f64> {
        if self.is_finished(now) {
            return None;
        }
        let pass = self.duration.as_secs_f64();
        if pass <= 0.0 {
            return Some(0.0);
        }
        let cycle = self.cycle_duration().as_secs_f64();
        let local = self.elapsed(now).as_secs_f64() % cycle;
        let t = if local < pass {
            local / pass
        } else {
            1.0 - (local - pass) / pass
        };
        Some(t.clamp(0.0, 1.0))
    }

    /// The interpolated path at `now`, or `None` once finished.
    ///
    /// Falls back to the `from` path if the two paths cannot be interpolated.
    #[must_use]
    pub fn sample(&self, now: HostTime) -> Option<BezPath> {
        let t = self.progress(now)?;
        Some(lerp_path(&self.from, &self.to, t).unwrap_or_else(|| self.from.clone()))
    }

    /// Freezes playback at its state at `now`. No-op if already paused.
    pub fn pause(&mut self, now: HostTime) {
        if self.paused.is_none() {
            self.paused = Some(self.elapsed(now));
        }
    }

    /// Continues playback from the frozen state at `now`. No-op if running.
    pub fn resume(&mut self, now: HostTime) {
        if let Some(elapsed) = self.paused.take() {
            self.begin = now.saturating_sub(elapsed);
        }
    }
}

/// Interpolates two paths element by element.
///
/// Returns `None` unless both paths have the same number of elements with
/// matching kinds.
#[must_use]
pub fn lerp_path(from: &BezPath, to: &BezPath, t: f64) -> Option<BezPath> {
    let (a, b) = (from.elements(), to.elements());
    if a.len() != b.len() {
        return None;
    }
    let mut out = BezPath::new();
    for (x, y) in a.iter().zip(b) {
        let el = match (*x, *y) {
            (PathEl::MoveTo(p), PathEl::MoveTo(q)) => PathEl::MoveTo(p.lerp(q, t)),
            (PathEl::LineTo(p), PathEl::LineTo(q)) => PathEl::LineTo(p.lerp(q, t)),
            (PathEl::QuadTo(p1, p2), PathEl::QuadTo(q1, q2)) => {
                PathEl::QuadTo(p1.lerp(q1, t), p2.lerp(q2, t))
            }
            (PathEl::CurveTo(p1, p2, p3), PathEl::CurveTo(q1, q2, q3)) => {
                PathEl::CurveTo(p1.lerp(q1, t), p2.lerp(q2, t), p3.lerp(q3, t))
            }
            (PathEl::ClosePath, PathEl::ClosePath) => PathEl::ClosePath,
            _ => return None,
        };
        out.push(el);
    }
    Some(out)
}
