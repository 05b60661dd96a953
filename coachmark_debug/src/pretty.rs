// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use coachmark_core::layer::LayerId;
use coachmark_core::time::HostTime;
use coachmark_core::trace::{
    CallIgnoredEvent, FadeBeginEvent, LifecycleEvent, OverlayAttachedEvent, OverlayDetachedEvent,
    SequenceFinishedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.nanos() as f64 / 1_000_000.0
}

fn layer(id: LayerId) -> String {
    format!("{}@{}", id.index(), id.generation())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_fade_begin(&mut self, e: &FadeBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[fade] index={} layer={} at {:.1}ms",
            e.index,
            layer(e.layer),
            ms(e.timestamp),
        );
    }

    fn on_overlay_attached(&mut self, e: &OverlayAttachedEvent) {
        let placeholder = if e.placeholder { " placeholder" } else { "" };
        let _ = writeln!(
            self.writer,
            "[attach] index={} layer={} shape={:?}{placeholder} at {:.1}ms",
            e.index,
            layer(e.layer),
            e.shape,
            ms(e.timestamp),
        );
    }

    fn on_overlay_detached(&mut self, e: &OverlayDetachedEvent) {
        let _ = writeln!(
            self.writer,
            "[detach] index={} layer={} at {:.1}ms",
            e.index,
            layer(e.layer),
            ms(e.timestamp),
        );
    }

    fn on_sequence_finished(&mut self, e: &SequenceFinishedEvent) {
        let _ = writeln!(
            self.writer,
            "[finished] reason={:?} presented={} at {:.1}ms",
            e.reason,
            e.presented,
            ms(e.timestamp),
        );
    }

    fn on_call_ignored(&mut self, e: &CallIgnoredEvent) {
        let _ = writeln!(
            self.writer,
            "[ignored] call={:?} state={:?} at {:.1}ms",
            e.call,
            e.state,
            ms(e.timestamp),
        );
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let overlay = e.overlay.map_or_else(|| "-".to_owned(), layer);
        let _ = writeln!(
            self.writer,
            "[lifecycle] {:?} overlay={overlay} at {:.1}ms",
            e.kind,
            ms(e.timestamp),
        );
    }
}
