// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Layer handles are recorded as their slot index and generation
//! ([`RecordedLayer`]); they cannot be turned back into live handles.

use coachmark_core::layer::LayerId;
use coachmark_core::marker::ShapeKind;
use coachmark_core::sequencer::{FinishReason, SequencerState};
use coachmark_core::time::HostTime;
use coachmark_core::trace::{
    Call, CallIgnoredEvent, FadeBeginEvent, LifecycleEvent, LifecycleKind, OverlayAttachedEvent,
    OverlayDetachedEvent, SequenceFinishedEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FADE_BEGIN: u8 = 1;
const TAG_OVERLAY_ATTACHED: u8 = 2;
const TAG_OVERLAY_DETACHED: u8 = 3;
const TAG_SEQUENCE_FINISHED: u8 = 4;
const TAG_CALL_IGNORED: u8 = 5;
const TAG_LIFECYCLE: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_index(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    fn write_layer(&mut self, id: LayerId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_option_layer(&mut self, id: Option<LayerId>) {
        match id {
            Some(id) => {
                self.write_u8(1);
                self.write_layer(id);
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
                self.write_u32(0);
            }
        }
    }

    fn write_time(&mut self, t: HostTime) {
        self.write_u64(t.nanos());
    }
}

impl TraceSink for RecorderSink {
    fn on_fade_begin(&mut self, e: &FadeBeginEvent) {
        self.write_u8(TAG_FADE_BEGIN);
        self.write_index(e.index);
        self.write_layer(e.layer);
        self.write_time(e.timestamp);
    }

    fn on_overlay_attached(&mut self, e: &OverlayAttachedEvent) {
        self.write_u8(TAG_OVERLAY_ATTACHED);
        self.write_index(e.index);
        self.write_layer(e.layer);
        self.write_u8(match e.shape {
            ShapeKind::Circle => 0,
            ShapeKind::Rectangle => 1,
        });
        self.write_u8(u8::from(e.placeholder));
        self.write_time(e.timestamp);
    }

    fn on_overlay_detached(&mut self, e: &OverlayDetachedEvent) {
        self.write_u8(TAG_OVERLAY_DETACHED);
        self.write_index(e.index);
        self.write_layer(e.layer);
        self.write_time(e.timestamp);
    }

    fn on_sequence_finished(&mut self, e: &SequenceFinishedEvent) {
        self.write_u8(TAG_SEQUENCE_FINISHED);
        self.write_u8(match e.reason {
            FinishReason::Exhausted => 0,
            FinishReason::Skipped => 1,
        });
        self.write_index(e.presented);
        self.write_time(e.timestamp);
    }

    fn on_call_ignored(&mut self, e: &CallIgnoredEvent) {
        self.write_u8(TAG_CALL_IGNORED);
        self.write_u8(match e.call {
            Call::Advance => 0,
            Call::Skip => 1,
        });
        self.write_u8(match e.state {
            SequencerState::Idle => 0,
            SequencerState::Presenting => 1,
            SequencerState::Transitioning => 2,
            SequencerState::Finished => 3,
        });
        self.write_time(e.timestamp);
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.write_u8(TAG_LIFECYCLE);
        self.write_u8(match e.kind {
            LifecycleKind::Suspended => 0,
            LifecycleKind::Resumed => 1,
            LifecycleKind::AnimationRestored => 2,
        });
        self.write_option_layer(e.overlay);
        self.write_time(e.timestamp);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A layer handle as recorded: slot index and generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordedLayer {
    /// Slot index.
    pub index: u32,
    /// Generation at the time of the event.
    pub generation: u32,
}

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`FadeBeginEvent`].
    FadeBegin {
        /// Marker index being left.
        index: u64,
        /// The fading overlay.
        layer: RecordedLayer,
        /// Start of the fade.
        timestamp: HostTime,
    },
    /// An [`OverlayAttachedEvent`].
    OverlayAttached {
        /// Marker index now presented.
        index: u64,
        /// The new overlay.
        layer: RecordedLayer,
        /// Shape of the cutout.
        shape: ShapeKind,
        /// Whether a placeholder was attached.
        placeholder: bool,
        /// Time of the attach.
        timestamp: HostTime,
    },
    /// An [`OverlayDetachedEvent`].
    OverlayDetached {
        /// Marker index the overlay belonged to.
        index: u64,
        /// The removed overlay.
        layer: RecordedLayer,
        /// Time of the detach.
        timestamp: HostTime,
    },
    /// A [`SequenceFinishedEvent`].
    SequenceFinished {
        /// Why the sequence ended.
        reason: FinishReason,
        /// Markers presented.
        presented: u64,
        /// Time of the end.
        timestamp: HostTime,
    },
    /// A [`CallIgnoredEvent`].
    CallIgnored {
        /// Ignored entry point.
        call: Call,
        /// State that ignored it.
        state: SequencerState,
        /// Time of the call.
        timestamp: HostTime,
    },
    /// A [`LifecycleEvent`].
    Lifecycle {
        /// Which transition.
        kind: LifecycleKind,
        /// The overlay on screen, if any.
        overlay: Option<RecordedLayer>,
        /// Time of the transition.
        timestamp: HostTime,
    },
}

impl RecordedEvent {
    /// Host time at which the event was emitted.
    #[must_use]
    pub fn timestamp(&self) -> HostTime {
        match *self {
            Self::FadeBegin { timestamp, .. }
            | Self::OverlayAttached { timestamp, .. }
            | Self::OverlayDetached { timestamp, .. }
            | Self::SequenceFinished { timestamp, .. }
            | Self::CallIgnored { timestamp, .. }
            | Self::Lifecycle { timestamp, .. } => timestamp,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_layer(&mut self) -> Option<RecordedLayer> {
        let index = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(RecordedLayer { index, generation })
    }

    fn read_option_layer(&mut self) -> Option<Option<RecordedLayer>> {
        let present = self.read_u8()?;
        let layer = self.read_layer()?;
        Some((present != 0).then_some(layer))
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn decode_fade_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FadeBegin {
            index: self.read_u64()?,
            layer: self.read_layer()?,
            timestamp: self.read_time()?,
        })
    }

    fn decode_overlay_attached(&mut self) -> Option<RecordedEvent> {
        let index = self.read_u64()?;
        let layer = self.read_layer()?;
        let shape = match self.read_u8()? {
            0 => ShapeKind::Circle,
            1 => ShapeKind::Rectangle,
            _ => return None,
        };
        let placeholder = self.read_u8()? != 0;
        let timestamp = self.read_time()?;
        Some(RecordedEvent::OverlayAttached {
            index,
            layer,
            shape,
            placeholder,
            timestamp,
        })
    }

    fn decode_overlay_detached(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::OverlayDetached {
            index: self.read_u64()?,
            layer: self.read_layer()?,
            timestamp: self.read_time()?,
        })
    }

    fn decode_sequence_finished(&mut self) -> Option<RecordedEvent> {
        let reason = match self.read_u8()? {
            0 => FinishReason::Exhausted,
            1 => FinishReason::Skipped,
            _ => return None,
        };
        Some(RecordedEvent::SequenceFinished {
            reason,
            presented: self.read_u64()?,
            timestamp: self.read_time()?,
        })
    }

    fn decode_call_ignored(&mut self) -> Option<RecordedEvent> {
        let call = match self.read_u8()? {
            0 => Call::Advance,
            1 => Call::Skip,
            _ => return None,
        };
        let state = match self.read_u8()? {
            0 => SequencerState::Idle,
            1 => SequencerState::Presenting,
            2 => SequencerState::Transitioning,
            3 => SequencerState::Finished,
            _ => return None,
        };
        Some(RecordedEvent::CallIgnored {
            call,
            state,
            timestamp: self.read_time()?,
        })
    }

    fn decode_lifecycle(&mut self) -> Option<RecordedEvent> {
        let kind = match self.read_u8()? {
            0 => LifecycleKind::Suspended,
            1 => LifecycleKind::Resumed,
            2 => LifecycleKind::AnimationRestored,
            _ => return None,
        };
        Some(RecordedEvent::Lifecycle {
            kind,
            overlay: self.read_option_layer()?,
            timestamp: self.read_time()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FADE_BEGIN => self.decode_fade_begin(),
            TAG_OVERLAY_ATTACHED => self.decode_overlay_attached(),
            TAG_OVERLAY_DETACHED => self.decode_overlay_detached(),
            TAG_SEQUENCE_FINISHED => self.decode_sequence_finished(),
            TAG_CALL_IGNORED => self.decode_call_ignored(),
            TAG_LIFECYCLE => self.decode_lifecycle(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
