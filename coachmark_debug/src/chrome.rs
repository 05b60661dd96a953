// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Each overlay's time on screen becomes a duration slice on thread 1 and
//! each fade a slice on thread 2; everything else is an instant event.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use coachmark_core::time::HostTime;

use crate::recorder::{RecordedEvent, decode};

const TID_SEQUENCER: u32 = 0;
const TID_OVERLAY: u32 = 1;
const TID_FADE: u32 = 2;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut fading: Option<u64> = None;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FadeBegin {
                index,
                layer,
                timestamp,
            } => {
                fading = Some(index);
                events.push(json!({
                    "ph": "B",
                    "name": "Fade",
                    "cat": "Transition",
                    "ts": to_us(timestamp),
                    "pid": 0,
                    "tid": TID_FADE,
                    "args": {
                        "index": index,
                        "layer": layer.index,
                    }
                }));
            }
            RecordedEvent::OverlayAttached {
                index,
                layer,
                shape,
                placeholder,
                timestamp,
            } => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("Marker {index}"),
                    "cat": "Overlay",
                    "ts": to_us(timestamp),
                    "pid": 0,
                    "tid": TID_OVERLAY,
                    "args": {
                        "layer": layer.index,
                        "generation": layer.generation,
                        "shape": format!("{shape:?}"),
                        "placeholder": placeholder,
                    }
                }));
            }
            RecordedEvent::OverlayDetached {
                index, timestamp, ..
            } => {
                if fading.take_if(|fade| *fade == index).is_some() {
                    events.push(json!({
                        "ph": "E",
                        "name": "Fade",
                        "cat": "Transition",
                        "ts": to_us(timestamp),
                        "pid": 0,
                        "tid": TID_FADE,
                    }));
                }
                events.push(json!({
                    "ph": "E",
                    "name": format!("Marker {index}"),
                    "cat": "Overlay",
                    "ts": to_us(timestamp),
                    "pid": 0,
                    "tid": TID_OVERLAY,
                }));
            }
            RecordedEvent::SequenceFinished {
                reason,
                presented,
                timestamp,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "SequenceFinished",
                    "cat": "Sequencer",
                    "ts": to_us(timestamp),
                    "pid": 0,
                    "tid": TID_SEQUENCER,
                    "s": "g",
                    "args": {
                        "reason": format!("{reason:?}"),
                        "presented": presented,
                    }
                }));
            }
            RecordedEvent::CallIgnored {
                call,
                state,
                timestamp,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "CallIgnored",
                    "cat": "Sequencer",
                    "ts": to_us(timestamp),
                    "pid": 0,
                    "tid": TID_SEQUENCER,
                    "s": "t",
                    "args": {
                        "call": format!("{call:?}"),
                        "state": format!("{state:?}"),
                    }
                }));
            }
            RecordedEvent::Lifecycle {
                kind,
                overlay,
                timestamp,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{kind:?}"),
                    "cat": "Lifecycle",
                    "ts": to_us(timestamp),
                    "pid": 0,
                    "tid": TID_SEQUENCER,
                    "s": "p",
                    "args": {
                        "overlay": overlay.map(|layer| layer.index),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_us(t: HostTime) -> f64 {
    t.nanos() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use coachmark_core::layer::LayerStore;
    use coachmark_core::marker::ShapeKind;
    use coachmark_core::sequencer::FinishReason;
    use coachmark_core::trace::{
        FadeBeginEvent, OverlayAttachedEvent, OverlayDetachedEvent, SequenceFinishedEvent,
        TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let layer = LayerStore::new().create_layer();
        let mut rec = RecorderSink::new();
        rec.on_overlay_attached(&OverlayAttachedEvent {
            index: 0,
            layer,
            shape: ShapeKind::Circle,
            placeholder: false,
            timestamp: HostTime(1_000_000),
        });
        rec.on_fade_begin(&FadeBeginEvent {
            index: 0,
            layer,
            timestamp: HostTime(2_000_000),
        });
        rec.on_overlay_detached(&OverlayDetachedEvent {
            index: 0,
            layer,
            timestamp: HostTime(2_250_000),
        });
        rec.on_sequence_finished(&SequenceFinishedEvent {
            reason: FinishReason::Exhausted,
            presented: 1,
            timestamp: HostTime(3_000_000),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 5);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "Marker 0");
        assert_eq!(parsed[0]["ts"], 1000.0);

        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "Fade");

        // The fade closes before the overlay slice it belongs to.
        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["name"], "Fade");
        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[3]["name"], "Marker 0");

        assert_eq!(parsed[4]["ph"], "i");
        assert_eq!(parsed[4]["args"]["reason"], "Exhausted");
    }

    #[test]
    fn detach_without_fade_closes_only_the_overlay() {
        let layer = LayerStore::new().create_layer();
        let mut rec = RecorderSink::new();
        rec.on_overlay_detached(&OverlayDetachedEvent {
            index: 3,
            layer,
            timestamp: HostTime(0),
        });
        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["name"], "Marker 3");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
