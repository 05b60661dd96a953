// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal animation configuration.

use core::time::Duration;

/// How many times a reveal animation cycle runs.
///
/// A *cycle* is one forward pass, plus the reverse pass when
/// [`auto_reverse`](AnimationConfig::auto_reverse) is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Repeat {
    /// Loop until the animation is removed.
    Forever,
    /// Run this many cycles, then finish. `Count(0)` runs once.
    Count(u32),
}

impl Repeat {
    /// Returns the number of cycles, or `None` for [`Repeat::Forever`].
    #[must_use]
    pub const fn cycles(self) -> Option<u32> {
        match self {
            Self::Forever => None,
            Self::Count(0) => Some(1),
            Self::Count(n) => Some(n),
        }
    }
}

/// Parameters of the breathing reveal effect.
///
/// Values are taken as-is; there is no validation. Each
/// [`Sequencer`](crate::sequencer::Sequencer) starts from
/// [`AnimationConfig::DEFAULT`] and exposes its copy through
/// [`config_mut`](crate::sequencer::Sequencer::config_mut).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// How far the cutout moves at the peak of the effect, in layer units.
    ///
    /// Circles grow their radius by this amount; rectangles shift upward by
    /// it.
    pub effect_height: f64,
    /// Duration of one forward pass.
    pub duration: Duration,
    /// How many cycles to run.
    pub repeat: Repeat,
    /// Whether each forward pass is followed by a reverse pass.
    pub auto_reverse: bool,
}

impl AnimationConfig {
    /// 10 units of travel, 0.4 s per pass, auto-reversing, looping forever.
    pub const DEFAULT: Self = Self {
        effect_height: 10.0,
        duration: Duration::from_millis(400),
        repeat: Repeat::Forever,
        auto_reverse: true,
    };
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
