// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the marker sequence.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Sequencer`](crate::sequencer::Sequencer) calls at each step of a
//! walkthrough. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.

use crate::layer::LayerId;
use crate::marker::ShapeKind;
use crate::sequencer::{FinishReason, SequencerState};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// A sequencer entry point that can be ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Call {
    /// [`Sequencer::show`](crate::sequencer::Sequencer::show) or
    /// [`Sequencer::advance`](crate::sequencer::Sequencer::advance).
    Advance,
    /// [`Sequencer::skip`](crate::sequencer::Sequencer::skip).
    Skip,
}

/// Host lifecycle notifications seen by the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    /// The host moved to the background; the reveal animation is frozen.
    Suspended,
    /// The host returned to the foreground; a frozen animation continues.
    Resumed,
    /// The host returned to the foreground and the reveal animation had been
    /// evicted, so a fresh one was registered.
    AnimationRestored,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the current overlay starts fading out.
#[derive(Clone, Copy, Debug)]
pub struct FadeBeginEvent {
    /// Index of the marker being left.
    pub index: usize,
    /// The fading overlay.
    pub layer: LayerId,
    /// Host time at the start of the fade.
    pub timestamp: HostTime,
}

/// Emitted when an overlay is attached for a marker.
#[derive(Clone, Copy, Debug)]
pub struct OverlayAttachedEvent {
    /// Index of the marker now presented.
    pub index: usize,
    /// The new overlay.
    pub layer: LayerId,
    /// Shape of the cutout.
    pub shape: ShapeKind,
    /// Whether the data source returned no content view.
    pub placeholder: bool,
    /// Host time of the attach.
    pub timestamp: HostTime,
}

/// Emitted when an overlay is removed from the container.
#[derive(Clone, Copy, Debug)]
pub struct OverlayDetachedEvent {
    /// Index of the marker the overlay belonged to.
    pub index: usize,
    /// The removed overlay (stale after this event).
    pub layer: LayerId,
    /// Host time of the detach.
    pub timestamp: HostTime,
}

/// Emitted once per walkthrough, when the sequence ends.
#[derive(Clone, Copy, Debug)]
pub struct SequenceFinishedEvent {
    /// Why the sequence ended.
    pub reason: FinishReason,
    /// How many markers were presented.
    pub presented: usize,
    /// Host time at the end.
    pub timestamp: HostTime,
}

/// Emitted when an entry point is called in a state that ignores it.
#[derive(Clone, Copy, Debug)]
pub struct CallIgnoredEvent {
    /// Which entry point was ignored.
    pub call: Call,
    /// The state that ignored it.
    pub state: SequencerState,
    /// Host time of the call.
    pub timestamp: HostTime,
}

/// Emitted on host lifecycle transitions.
#[derive(Clone, Copy, Debug)]
pub struct LifecycleEvent {
    /// Which transition.
    pub kind: LifecycleKind,
    /// The overlay on screen at the time, if any.
    pub overlay: Option<LayerId>,
    /// Host time of the transition.
    pub timestamp: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the sequencer.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an overlay starts fading out.
    fn on_fade_begin(&mut self, e: &FadeBeginEvent) {
        _ = e;
    }

    /// Called when an overlay is attached.
    fn on_overlay_attached(&mut self, e: &OverlayAttachedEvent) {
        _ = e;
    }

    /// Called when an overlay is detached.
    fn on_overlay_detached(&mut self, e: &OverlayDetachedEvent) {
        _ = e;
    }

    /// Called when the sequence ends.
    fn on_sequence_finished(&mut self, e: &SequenceFinishedEvent) {
        _ = e;
    }

    /// Called when an entry point is ignored.
    fn on_call_ignored(&mut self, e: &CallIgnoredEvent) {
        _ = e;
    }

    /// Called on host lifecycle transitions.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FadeBeginEvent`].
    #[inline]
    pub fn fade_begin(&mut self, e: &FadeBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fade_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OverlayAttachedEvent`].
    #[inline]
    pub fn overlay_attached(&mut self, e: &OverlayAttachedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_overlay_attached(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OverlayDetachedEvent`].
    #[inline]
    pub fn overlay_detached(&mut self, e: &OverlayDetachedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_overlay_detached(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SequenceFinishedEvent`].
    #[inline]
    pub fn sequence_finished(&mut self, e: &SequenceFinishedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sequence_finished(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CallIgnoredEvent`].
    #[inline]
    pub fn call_ignored(&mut self, e: &CallIgnoredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_call_ignored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, e: &LifecycleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
