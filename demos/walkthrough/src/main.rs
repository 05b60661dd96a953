// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated walkthrough that exercises the sequencer, the reveal animation
//! and the tracing pipeline.
//!
//! Runs a 60 Hz frame loop over three markers with scripted taps (including a
//! double tap during a fade) and a trip to the background. Events go to both a
//! [`PrettyPrintSink`](coachmark_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](coachmark_debug::recorder::RecorderSink), and the recording
//! is exported as a Chrome trace JSON file.

use std::cell::Cell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::{Rc, Weak};

use coachmark_core::backend::Presenter;
use coachmark_core::layer::{FrameChanges, LayerStore, SurfaceId};
use coachmark_core::marker::MarkerDescriptor;
use coachmark_core::sequencer::{
    ContentView, DataSource, Delegate, FinishReason, Sequencer, SequencerState,
};
use coachmark_core::time::HostTime;
use coachmark_core::trace::{
    CallIgnoredEvent, FadeBeginEvent, LifecycleEvent, OverlayAttachedEvent, OverlayDetachedEvent,
    SequenceFinishedEvent, TraceSink, Tracer,
};
use coachmark_debug::pretty::PrettyPrintSink;
use coachmark_debug::recorder::RecorderSink;
use kurbo::{Point, Rect};

/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;
const FRAME_COUNT: u64 = 480;
const SCREEN: Rect = Rect::new(0.0, 0.0, 375.0, 667.0);

/// Host input scripted by frame number.
#[derive(Clone, Copy, Debug)]
enum Input {
    Next,
    Background,
    Foreground,
}

const SCRIPT: &[(u64, Input)] = &[
    (60, Input::Next),
    // Second tap lands mid-fade and is ignored.
    (64, Input::Next),
    (150, Input::Background),
    (210, Input::Foreground),
    (300, Input::Next),
    (420, Input::Next),
];

// -- host screen ----------------------------------------------------------

struct Screen {
    markers: [MarkerDescriptor; 3],
    texts: [&'static str; 3],
}

impl DataSource for Screen {
    fn marker_count(&self) -> usize {
        self.texts.len()
    }

    fn marker(&self, index: usize) -> MarkerDescriptor {
        self.markers[index]
    }

    fn content_view(&self, index: usize) -> Option<ContentView> {
        let surface = u32::try_from(index).ok()?;
        println!("  content {index}: {:?}", self.texts[index]);
        Some(ContentView::new(SurfaceId(surface), SCREEN))
    }
}

#[derive(Default)]
struct Finished {
    reason: Cell<Option<FinishReason>>,
}

impl Delegate for Finished {
    fn sequence_finished(&self, sequencer: &Sequencer, reason: FinishReason) {
        println!(
            "  delegate: finished ({reason:?}) after {} markers",
            sequencer.current_index()
        );
        self.reason.set(Some(reason));
    }
}

// -- presenter ------------------------------------------------------------

/// Stands in for a native tree: counts updates and probes mask coverage.
#[derive(Debug, Default)]
struct ProbePresenter {
    frames: u64,
    mask_updates: u64,
    opacity_updates: u64,
}

impl Presenter for ProbePresenter {
    fn apply(&mut self, store: &LayerStore, changes: &FrameChanges) {
        self.frames += 1;
        self.mask_updates += changes.masks.len() as u64;
        self.opacity_updates += changes.opacities.len() as u64;
        for &idx in &changes.added {
            println!("  presenter: layer {idx} added");
        }
        for &idx in &changes.removed {
            println!("  presenter: layer {idx} removed");
        }
        if changes.topology_changed {
            let masked = store
                .traversal_order()
                .iter()
                .filter(|&&idx| store.presented_mask_at(idx).is_some())
                .count();
            println!("  presenter: {masked} masked layer(s) on screen");
        }
    }
}

// -- fan-out sink ----------------------------------------------------------

/// Forwards every event to both sinks.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_fade_begin(&mut self, e: &FadeBeginEvent) {
        self.pretty.on_fade_begin(e);
        self.recorder.on_fade_begin(e);
    }

    fn on_overlay_attached(&mut self, e: &OverlayAttachedEvent) {
        self.pretty.on_overlay_attached(e);
        self.recorder.on_overlay_attached(e);
    }

    fn on_overlay_detached(&mut self, e: &OverlayDetachedEvent) {
        self.pretty.on_overlay_detached(e);
        self.recorder.on_overlay_detached(e);
    }

    fn on_sequence_finished(&mut self, e: &SequenceFinishedEvent) {
        self.pretty.on_sequence_finished(e);
        self.recorder.on_sequence_finished(e);
    }

    fn on_call_ignored(&mut self, e: &CallIgnoredEvent) {
        self.pretty.on_call_ignored(e);
        self.recorder.on_call_ignored(e);
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.pretty.on_lifecycle(e);
        self.recorder.on_lifecycle(e);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- host --------------------------------------------------------------
    let screen = Rc::new(Screen {
        markers: [
            MarkerDescriptor::circle((10.0, 10.0), 30.0),
            MarkerDescriptor::circle((300.0, 50.0), 60.0),
            MarkerDescriptor::rectangle((100.0, 100.0), (200.0, 50.0)),
        ],
        texts: [
            "Two driven jocks help fax my big quiz.",
            "Pack my box with five dozen liquor jugs.",
            "The five boxing wizards jump quickly.",
        ],
    });
    let finished = Rc::new(Finished::default());

    let mut store = LayerStore::new();
    let root = store.create_layer();
    store.set_frame(root, SCREEN);

    let mut sequencer = Sequencer::new(root, Rc::downgrade(&screen) as Weak<dyn DataSource>);
    sequencer.set_delegate(Rc::downgrade(&finished) as Weak<dyn Delegate>);

    let mut presenter = ProbePresenter::default();
    let mut changes = FrameChanges::default();

    // -- simulated loop ----------------------------------------------------
    let mut now = HostTime(1_000_000_000); // start at 1s
    {
        let mut tee = Tee {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);

        sequencer.show(&mut store, now, &mut tracer);

        for frame_index in 0..FRAME_COUNT {
            for &(_, input) in SCRIPT.iter().filter(|(at, _)| *at == frame_index) {
                println!("frame {frame_index}: {input:?}");
                match input {
                    Input::Next => sequencer.advance(&mut store, now, &mut tracer),
                    Input::Background => sequencer.on_suspend(&mut store, now, &mut tracer),
                    Input::Foreground => sequencer.on_resume(&mut store, now, &mut tracer),
                }
            }

            sequencer.tick(&mut store, now, &mut tracer);
            store.animate(now);
            store.evaluate_into(&mut changes);
            presenter.apply(&store, &changes);

            if frame_index % 30 == 0
                && let Some(overlay) = sequencer.current_overlay()
                && let Some(mask) = store.presented_mask_at(overlay.index())
            {
                let probe = Point::new(10.0, 45.0);
                println!(
                    "frame {frame_index}: overlay {:?} opacity={:.2} probe {probe:?} revealed={}",
                    overlay,
                    store.effective_opacity(overlay),
                    !mask.covers(probe),
                );
            }

            if sequencer.state() == SequencerState::Finished {
                break;
            }
            now = HostTime(now.nanos() + REFRESH_INTERVAL_NS);
        }
    }

    println!(
        "presented {} frames, {} mask updates, {} opacity updates, finished={:?}",
        presenter.frames,
        presenter.mask_updates,
        presenter.opacity_updates,
        finished.reason.get(),
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    coachmark_debug::chrome::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path}");
}
