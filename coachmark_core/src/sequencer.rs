// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The marker state machine.
//!
//! A [`Sequencer`] is bound to one container layer and one [`DataSource`]. It
//! shows the data source's markers one at a time, each as an overlay layer
//! under the container whose mask cuts a breathing hole over the highlighted
//! target:
//!
//! ```text
//!   Idle ──show()──► Presenting ──advance()──► Transitioning ──tick(): fade done──► Presenting
//!                        │                          │
//!                        └──── skip() / exhausted ──┴──────────────────────────► Finished
//! ```
//!
//! Moving to the next marker fades the current overlay to
//! [`FADE_RESIDUAL_OPACITY`] over [`FADE_DURATION`], then destroys it and
//! attaches the next one. The fade is driven by [`Sequencer::tick`], which the
//! host calls every frame. While a fade is running, further `advance()` calls
//! are ignored; `skip()` always wins and detaches immediately.
//!
//! The sequencer never owns the store. Each entry point borrows the
//! [`LayerStore`], the current [`HostTime`] and a [`Tracer`].

use alloc::rc::Weak;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::Rect;

use crate::animation::RevealAnimation;
use crate::config::AnimationConfig;
use crate::layer::{LayerFlags, LayerId, LayerStore, SurfaceId};
use crate::marker::MarkerDescriptor;
use crate::mask::{RevealMask, reveal_animation};
use crate::time::HostTime;
use crate::trace::{
    Call, CallIgnoredEvent, FadeBeginEvent, LifecycleEvent, LifecycleKind, OverlayAttachedEvent,
    OverlayDetachedEvent, SequenceFinishedEvent, Tracer,
};

/// Key under which the reveal animation is registered on each overlay.
pub const ANIMATION_KEY: &str = "coachmark.reveal";

/// How long the outgoing overlay fades before it is removed.
pub const FADE_DURATION: Duration = Duration::from_millis(250);

/// Opacity the outgoing overlay fades to.
pub const FADE_RESIDUAL_OPACITY: f32 = 0.1;

/// Supplies markers and their content to a [`Sequencer`].
///
/// Methods take `&self`; hosts that need to mutate use interior mutability.
pub trait DataSource {
    /// Number of markers in the walkthrough.
    fn marker_count(&self) -> usize;

    /// The marker at `index`, for `index < marker_count()`.
    fn marker(&self, index: usize) -> MarkerDescriptor;

    /// The content shown for the marker at `index`.
    ///
    /// Called once per transition into `index`. Returning `None` attaches an
    /// empty placeholder so the walkthrough can continue.
    fn content_view(&self, index: usize) -> Option<ContentView>;
}

/// Receives the end of a walkthrough.
pub trait Delegate {
    /// Called exactly once, when the sequence ends.
    fn sequence_finished(&self, sequencer: &Sequencer, reason: FinishReason);
}

/// Host content presented for one marker.
///
/// The overlay layer takes the view's frame, and marker coordinates are
/// relative to the frame's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentView {
    /// Host-rendered content, if any.
    pub surface: Option<SurfaceId>,
    /// Frame of the overlay in the container's coordinates.
    pub frame: Rect,
}

impl ContentView {
    /// An empty view with a zero frame and no content.
    pub const PLACEHOLDER: Self = Self {
        surface: None,
        frame: Rect::ZERO,
    };

    /// Creates a view showing `surface` in `frame`.
    #[must_use]
    pub const fn new(surface: SurfaceId, frame: Rect) -> Self {
        Self {
            surface: Some(surface),
            frame,
        }
    }
}

/// Observable sequencer states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SequencerState {
    /// Nothing shown yet.
    Idle,
    /// An overlay is attached and no transition is running.
    Presenting,
    /// The current overlay is fading out before the next one is attached.
    Transitioning,
    /// The walkthrough is over. Terminal.
    Finished,
}

/// Why a walkthrough ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FinishReason {
    /// `advance()` was called after the last marker.
    Exhausted,
    /// `skip()` was called.
    Skipped,
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle,
    Presenting,
    Transitioning {
        fade_start: HostTime,
        next: MarkerDescriptor,
    },
    Finished,
}

/// The overlay this sequencer attached.
#[derive(Clone, Debug)]
struct Overlay {
    layer: LayerId,
    index: usize,
    /// Template for re-registering the reveal animation after eviction.
    /// `None` for placeholders.
    animation: Option<RevealAnimation>,
}

/// Walks a user through the markers of a [`DataSource`].
///
/// The sequencer borrows the [`LayerStore`] per call and cannot clean up on
/// drop: call [`dispose`](Self::dispose) before dropping it, or the current
/// overlay stays in the store.
pub struct Sequencer {
    parent: LayerId,
    data_source: Option<Weak<dyn DataSource>>,
    delegate: Option<Weak<dyn Delegate>>,
    config: AnimationConfig,
    current_index: usize,
    overlay: Option<Overlay>,
    phase: Phase,
    suspended: bool,
}

impl fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("parent", &self.parent)
            .field("state", &self.state())
            .field("current_index", &self.current_index)
            .field("overlay", &self.current_overlay())
            .field("suspended", &self.suspended)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Sequencer {
    /// Creates a sequencer that adds overlays under `parent`.
    #[must_use]
    pub fn new(parent: LayerId, data_source: Weak<dyn DataSource>) -> Self {
        Self {
            parent,
            data_source: Some(data_source),
            delegate: None,
            config: AnimationConfig::DEFAULT,
            current_index: 0,
            overlay: None,
            phase: Phase::Idle,
            suspended: false,
        }
    }

    /// Sets the delegate notified when the walkthrough ends.
    pub fn set_delegate(&mut self, delegate: Weak<dyn Delegate>) {
        self.delegate = Some(delegate);
    }

    /// Replaces the data source.
    pub fn set_data_source(&mut self, data_source: Weak<dyn DataSource>) {
        self.data_source = Some(data_source);
    }

    /// Returns the animation settings used for the next overlay.
    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Returns the animation settings for mutation.
    ///
    /// Changes apply to overlays attached afterwards.
    pub fn config_mut(&mut self) -> &mut AnimationConfig {
        &mut self.config
    }

    /// Returns the container layer.
    #[must_use]
    pub fn parent(&self) -> LayerId {
        self.parent
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SequencerState {
        match self.phase {
            Phase::Idle => SequencerState::Idle,
            Phase::Presenting => SequencerState::Presenting,
            Phase::Transitioning { .. } => SequencerState::Transitioning,
            Phase::Finished => SequencerState::Finished,
        }
    }

    /// Returns the index of the next marker to show.
    ///
    /// Equals the number of markers presented so far.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the overlay attached under the container, if any.
    ///
    /// While transitioning this is the overlay that is fading out.
    #[must_use]
    pub fn current_overlay(&self) -> Option<LayerId> {
        self.overlay.as_ref().map(|overlay| overlay.layer)
    }

    /// Returns whether the host is in the background.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Shows the first marker. Same as [`advance`](Self::advance).
    pub fn show(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        self.advance(store, now, tracer);
    }

    /// Moves to the next marker, or finishes after the last one.
    ///
    /// Ignored while a transition is running or after the walkthrough ended.
    /// A no-op when the data source is gone or the container layer is dead.
    pub fn advance(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        if matches!(self.phase, Phase::Transitioning { .. } | Phase::Finished) {
            tracer.call_ignored(&CallIgnoredEvent {
                call: Call::Advance,
                state: self.state(),
                timestamp: now,
            });
            return;
        }
        let Some(source) = self.data_source.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        if !store.is_alive(self.parent) {
            return;
        }

        if self.current_index >= source.marker_count() {
            self.finish(store, FinishReason::Exhausted, now, tracer);
            return;
        }

        let next = source.marker(self.current_index);
        let fading = self
            .overlay
            .as_ref()
            .filter(|overlay| store.is_alive(overlay.layer))
            .map(|overlay| (overlay.index, overlay.layer));
        if let Some((index, layer)) = fading {
            tracer.fade_begin(&FadeBeginEvent {
                index,
                layer,
                timestamp: now,
            });
            self.phase = Phase::Transitioning {
                fade_start: now,
                next,
            };
        } else {
            self.detach(store, now, tracer);
            self.attach(store, Some(&*source), next, now, tracer);
        }
    }

    /// Ends the walkthrough immediately.
    ///
    /// Detaches whatever overlay is attached, fading or not, and notifies the
    /// delegate with [`FinishReason::Skipped`]. Ignored once finished.
    pub fn skip(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        if matches!(self.phase, Phase::Finished) {
            tracer.call_ignored(&CallIgnoredEvent {
                call: Call::Skip,
                state: SequencerState::Finished,
                timestamp: now,
            });
            return;
        }
        self.finish(store, FinishReason::Skipped, now, tracer);
    }

    /// Drives a running fade. Call once per frame.
    ///
    /// Lowers the outgoing overlay's opacity linearly; once the fade has run
    /// for [`FADE_DURATION`], destroys it and attaches the next overlay.
    pub fn tick(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        let Phase::Transitioning { fade_start, next } = self.phase else {
            return;
        };

        let elapsed = now.saturating_duration_since(fade_start);
        if elapsed < FADE_DURATION {
            if let Some(overlay) = &self.overlay
                && store.is_alive(overlay.layer)
            {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "fade progress is in 0..1"
                )]
                let t = (elapsed.as_secs_f64() / FADE_DURATION.as_secs_f64()) as f32;
                store.set_opacity(overlay.layer, 1.0 + (FADE_RESIDUAL_OPACITY - 1.0) * t);
            }
            return;
        }

        self.detach(store, now, tracer);
        if !store.is_alive(self.parent) {
            self.phase = Phase::Idle;
            return;
        }
        let source = self.data_source.as_ref().and_then(Weak::upgrade);
        self.attach(store, source.as_deref(), next, now, tracer);
    }

    /// Freezes the reveal animation while the host is in the background.
    pub fn on_suspend(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        if self.suspended {
            return;
        }
        self.suspended = true;
        let overlay = self.live_overlay(store);
        if let Some(layer) = overlay {
            store.pause_animations(layer, now);
        }
        tracer.lifecycle(&LifecycleEvent {
            kind: LifecycleKind::Suspended,
            overlay,
            timestamp: now,
        });
    }

    /// Continues the reveal animation when the host returns to the
    /// foreground.
    ///
    /// If nothing is registered under [`ANIMATION_KEY`] any more, a fresh
    /// animation for the same marker is registered in its place, whether or
    /// not [`on_suspend`](Self::on_suspend) was called first.
    pub fn on_resume(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        let was_suspended = core::mem::replace(&mut self.suspended, false);
        let mut kind = was_suspended.then_some(LifecycleKind::Resumed);
        let overlay = self.live_overlay(store);
        if let Some(layer) = overlay {
            let template = self
                .overlay
                .as_ref()
                .and_then(|overlay| overlay.animation.as_ref());
            match template {
                Some(template) if store.animation(layer, ANIMATION_KEY).is_none() => {
                    store.add_animation(layer, ANIMATION_KEY, template.restarted(now));
                    kind = Some(LifecycleKind::AnimationRestored);
                }
                _ if was_suspended => store.resume_animations(layer, now),
                _ => {}
            }
        }
        if let Some(kind) = kind {
            tracer.lifecycle(&LifecycleEvent {
                kind,
                overlay,
                timestamp: now,
            });
        }
    }

    /// Detaches the overlay and drops the data source and delegate.
    ///
    /// The delegate is not notified. Every later call is ignored.
    pub fn dispose(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        self.detach(store, now, tracer);
        self.data_source = None;
        self.delegate = None;
        self.phase = Phase::Finished;
    }

    fn live_overlay(&self, store: &LayerStore) -> Option<LayerId> {
        self.overlay
            .as_ref()
            .map(|overlay| overlay.layer)
            .filter(|&layer| store.is_alive(layer))
    }

    /// Builds and attaches the overlay for `marker` at `current_index`.
    fn attach(
        &mut self,
        store: &mut LayerStore,
        source: Option<&dyn DataSource>,
        marker: MarkerDescriptor,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) {
        let index = self.current_index;
        let view = source.and_then(|source| source.content_view(index));
        let placeholder = view.is_none();
        let view = view.unwrap_or(ContentView::PLACEHOLDER);

        let layer = store.create_layer();
        store.set_frame(layer, view.frame);
        store.set_content(layer, view.surface);

        let animation = if placeholder {
            None
        } else {
            let size = view.frame.size();
            store.set_flags(
                layer,
                LayerFlags {
                    clips_to_bounds: true,
                },
            );
            store.set_mask(layer, Some(RevealMask::resting(&marker, size).to_mask()));
            let animation = reveal_animation(&marker, size, &self.config, now);
            let mut registered = animation.clone();
            if self.suspended {
                registered.pause(now);
            }
            store.add_animation(layer, ANIMATION_KEY, registered);
            Some(animation)
        };

        store.add_child(self.parent, layer);
        self.overlay = Some(Overlay {
            layer,
            index,
            animation,
        });
        self.current_index += 1;
        self.phase = Phase::Presenting;

        tracer.overlay_attached(&OverlayAttachedEvent {
            index,
            layer,
            shape: marker.kind(),
            placeholder,
            timestamp: now,
        });
    }

    /// Removes and destroys the current overlay, if any.
    fn detach(&mut self, store: &mut LayerStore, now: HostTime, tracer: &mut Tracer<'_>) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        if store.is_alive(overlay.layer) {
            // Host layers added under the overlay survive as roots.
            let children: Vec<LayerId> = store.children(overlay.layer).collect();
            for child in children {
                store.remove_from_parent(child);
            }
            if store.parent(overlay.layer).is_some() {
                store.remove_from_parent(overlay.layer);
            }
            store.destroy_layer(overlay.layer);
        }
        tracer.overlay_detached(&OverlayDetachedEvent {
            index: overlay.index,
            layer: overlay.layer,
            timestamp: now,
        });
    }

    fn finish(
        &mut self,
        store: &mut LayerStore,
        reason: FinishReason,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) {
        self.detach(store, now, tracer);
        self.phase = Phase::Finished;
        tracer.sequence_finished(&SequenceFinishedEvent {
            reason,
            presented: self.current_index,
            timestamp: now,
        });
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            delegate.sequence_finished(self, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use kurbo::{Point, Size};

    use super::*;

    const MS: u64 = 1_000_000;
    const VIEW: Rect = Rect::new(0.0, 0.0, 320.0, 480.0);

    struct Script {
        markers: Vec<MarkerDescriptor>,
        with_views: bool,
        requested: RefCell<Vec<usize>>,
    }

    impl Script {
        fn new(with_views: bool) -> Self {
            Self {
                markers: vec![
                    MarkerDescriptor::circle((10.0, 10.0), 30.0),
                    MarkerDescriptor::circle((300.0, 50.0), 60.0),
                    MarkerDescriptor::rectangle((100.0, 100.0), (200.0, 50.0)),
                ],
                with_views,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl DataSource for Script {
        fn marker_count(&self) -> usize {
            self.markers.len()
        }

        fn marker(&self, index: usize) -> MarkerDescriptor {
            self.markers[index]
        }

        fn content_view(&self, index: usize) -> Option<ContentView> {
            self.requested.borrow_mut().push(index);
            self.with_views
                .then(|| ContentView::new(SurfaceId(u32::try_from(index).unwrap()), VIEW))
        }
    }

    #[derive(Default)]
    struct Finished {
        reasons: RefCell<Vec<FinishReason>>,
        overlay_at_finish: RefCell<Vec<Option<LayerId>>>,
    }

    impl Delegate for Finished {
        fn sequence_finished(&self, sequencer: &Sequencer, reason: FinishReason) {
            assert_eq!(sequencer.state(), SequencerState::Finished);
            self.reasons.borrow_mut().push(reason);
            self.overlay_at_finish
                .borrow_mut()
                .push(sequencer.current_overlay());
        }
    }

    struct Harness {
        store: LayerStore,
        parent: LayerId,
        seq: Sequencer,
        source: Option<Rc<Script>>,
        delegate: Rc<Finished>,
        now: HostTime,
        max_children: usize,
    }

    impl Harness {
        fn new(with_views: bool) -> Self {
            let mut store = LayerStore::new();
            let parent = store.create_layer();
            let source = Rc::new(Script::new(with_views));
            let weak: Weak<dyn DataSource> = Rc::downgrade(&source) as Weak<dyn DataSource>;
            let delegate = Rc::new(Finished::default());
            let mut seq = Sequencer::new(parent, weak);
            seq.set_delegate(Rc::downgrade(&delegate) as Weak<dyn Delegate>);
            Self {
                store,
                parent,
                seq,
                source: Some(source),
                delegate,
                now: HostTime(0),
                max_children: 0,
            }
        }

        fn advance(&mut self) {
            self.seq
                .advance(&mut self.store, self.now, &mut Tracer::none());
            self.observe();
        }

        fn skip(&mut self) {
            self.seq.skip(&mut self.store, self.now, &mut Tracer::none());
            self.observe();
        }

        /// Ticks at ~60 Hz for `ms` milliseconds.
        fn run(&mut self, ms: u64) {
            let end = self.now.nanos() + ms * MS;
            while self.now.nanos() < end {
                self.now = HostTime((self.now.nanos() + 16 * MS).min(end));
                self.seq
                    .tick(&mut self.store, self.now, &mut Tracer::none());
                self.store.animate(self.now);
                let _ = self.store.evaluate();
                self.observe();
            }
        }

        fn children(&self) -> usize {
            self.store.children(self.parent).count()
        }

        fn observe(&mut self) {
            self.max_children = self.max_children.max(self.children());
        }

        fn overlay(&self) -> LayerId {
            self.seq.current_overlay().expect("an overlay is attached")
        }

        fn reasons(&self) -> Vec<FinishReason> {
            self.delegate.reasons.borrow().clone()
        }
    }

    #[test]
    fn show_attaches_first_marker_immediately() {
        let mut h = Harness::new(true);
        h.seq.show(&mut h.store, h.now, &mut Tracer::none());

        assert_eq!(h.seq.state(), SequencerState::Presenting);
        assert_eq!(h.seq.current_index(), 1);
        assert_eq!(h.children(), 1);

        let overlay = h.overlay();
        assert_eq!(h.store.parent(overlay), Some(h.parent));
        assert_eq!(h.store.frame(overlay), VIEW);
        assert_eq!(h.store.content(overlay), Some(SurfaceId(0)));
        assert!(h.store.flags(overlay).clips_to_bounds);
        assert_eq!(h.store.animation_count(overlay), 1);
        assert!(h.store.animation(overlay, ANIMATION_KEY).is_some());

        let marker = MarkerDescriptor::circle((10.0, 10.0), 30.0);
        let resting = RevealMask::resting(&marker, VIEW.size()).to_mask();
        assert_eq!(h.store.mask(overlay), Some(&resting));
    }

    #[test]
    fn full_walkthrough_finishes_once() {
        let mut h = Harness::new(true);
        h.advance();
        let mut overlays = vec![h.overlay()];
        for expected_index in 2..=3 {
            h.advance();
            assert_eq!(h.seq.state(), SequencerState::Transitioning);
            h.run(300);
            assert_eq!(h.seq.state(), SequencerState::Presenting);
            assert_eq!(h.seq.current_index(), expected_index);
            overlays.push(h.overlay());
        }
        assert!(h.reasons().is_empty(), "not finished before the last advance");

        assert_ne!(overlays[0], overlays[1], "each step gets its own overlay");
        assert_ne!(overlays[1], overlays[2], "each step gets its own overlay");
        assert_ne!(overlays[0], overlays[2], "each step gets its own overlay");
        let rectangle = MarkerDescriptor::rectangle((100.0, 100.0), (200.0, 50.0));
        let resting = RevealMask::resting(&rectangle, VIEW.size()).to_mask();
        assert_eq!(
            h.store.mask(overlays[2]),
            Some(&resting),
            "last step cuts a rounded rectangle"
        );

        h.advance();
        assert_eq!(h.seq.state(), SequencerState::Finished);
        assert_eq!(h.reasons(), vec![FinishReason::Exhausted]);
        assert_eq!(h.children(), 0, "overlay detached on exhaustion");
        assert_eq!(*h.delegate.overlay_at_finish.borrow(), vec![None]);

        h.advance();
        h.skip();
        assert_eq!(h.reasons().len(), 1, "delegate fires exactly once");
        assert_eq!(h.max_children, 1, "never more than one overlay");
        assert_eq!(*h.source.as_ref().unwrap().requested.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn fade_lowers_opacity_then_replaces_overlay() {
        let mut h = Harness::new(true);
        h.advance();
        let first = h.overlay();

        h.advance();
        h.run(125);
        assert_eq!(h.seq.state(), SequencerState::Transitioning);
        assert_eq!(h.overlay(), first, "old overlay stays during the fade");
        let mid = h.store.opacity(first);
        assert!((mid - 0.55).abs() < 0.01, "halfway opacity, got {mid}");
        assert!(
            (h.store.effective_opacity(first) - mid).abs() < f32::EPSILON,
            "evaluated"
        );

        h.run(150);
        assert!(!h.store.is_alive(first), "faded overlay is destroyed");
        let second = h.overlay();
        assert_ne!(second, first);
        assert_eq!(h.store.opacity(second), 1.0);
        assert_eq!(h.children(), 1);
    }

    #[test]
    fn rapid_taps_during_fade_are_ignored() {
        let mut h = Harness::new(true);
        h.advance();
        h.advance();
        h.run(50);
        h.advance();
        h.advance();
        h.run(300);

        assert_eq!(h.seq.current_index(), 2, "only one transition ran");
        assert_eq!(h.seq.state(), SequencerState::Presenting);
        assert_eq!(h.max_children, 1);
    }

    #[test]
    fn skip_mid_fade_detaches_immediately() {
        let mut h = Harness::new(true);
        h.advance();
        let first = h.overlay();
        h.advance();
        h.run(100);

        h.skip();
        assert_eq!(h.seq.state(), SequencerState::Finished);
        assert!(!h.store.is_alive(first));
        assert_eq!(h.children(), 0);
        assert_eq!(h.reasons(), vec![FinishReason::Skipped]);

        h.run(500);
        assert_eq!(h.children(), 0, "no overlay attached after skip");
        assert_eq!(h.seq.current_index(), 1);
        h.advance();
        h.skip();
        assert_eq!(h.reasons().len(), 1);
    }

    #[test]
    fn skip_before_show_finishes() {
        let mut h = Harness::new(true);
        h.skip();
        assert_eq!(h.seq.state(), SequencerState::Finished);
        assert_eq!(h.reasons(), vec![FinishReason::Skipped]);
        assert_eq!(h.max_children, 0);
    }

    #[test]
    fn dropped_data_source_makes_advance_a_noop() {
        let mut h = Harness::new(true);
        h.source = None;
        h.advance();
        assert_eq!(h.seq.state(), SequencerState::Idle);
        assert_eq!(h.children(), 0);
        assert!(h.reasons().is_empty());
    }

    #[test]
    fn dead_parent_makes_advance_a_noop() {
        let mut h = Harness::new(true);
        h.store.destroy_layer(h.parent);
        h.seq.show(&mut h.store, h.now, &mut Tracer::none());
        assert_eq!(h.seq.state(), SequencerState::Idle);
    }

    #[test]
    fn missing_content_view_attaches_placeholder() {
        let mut h = Harness::new(false);
        h.advance();
        let overlay = h.overlay();
        assert_eq!(h.store.frame(overlay), Rect::ZERO);
        assert_eq!(h.store.content(overlay), None);
        assert_eq!(h.store.animation_count(overlay), 0);
        assert_eq!(h.children(), 1, "placeholder is still attached");

        h.advance();
        h.run(300);
        assert_eq!(h.seq.current_index(), 2, "sequence continues");
    }

    #[test]
    fn suspend_freezes_and_resume_continues() {
        let mut h = Harness::new(true);
        h.advance();
        let overlay = h.overlay();
        h.run(100);

        h.seq.on_suspend(&mut h.store, h.now, &mut Tracer::none());
        assert!(h.seq.is_suspended());
        let frozen = h.store.presented_mask(overlay).cloned();
        h.run(1_000);
        assert_eq!(h.store.presented_mask(overlay).cloned(), frozen);

        h.seq.on_resume(&mut h.store, h.now, &mut Tracer::none());
        assert!(!h.seq.is_suspended());
        assert_eq!(h.store.animation_count(overlay), 1, "no duplicates");
        h.run(100);
        assert_ne!(h.store.presented_mask(overlay).cloned(), frozen);
    }

    #[test]
    fn evicted_animation_is_restored_on_resume() {
        let mut h = Harness::new(true);
        h.advance();
        let overlay = h.overlay();

        h.seq.on_suspend(&mut h.store, h.now, &mut Tracer::none());
        h.store.remove_all_animations(overlay);
        h.run(500);
        h.seq.on_resume(&mut h.store, h.now, &mut Tracer::none());

        let restored = h.store.animation(overlay, ANIMATION_KEY);
        assert!(restored.is_some_and(|anim| anim.begin() == h.now && !anim.is_paused()));
        assert_eq!(h.store.animation_count(overlay), 1);

        h.seq.on_resume(&mut h.store, h.now, &mut Tracer::none());
        assert_eq!(h.store.animation_count(overlay), 1, "resume is idempotent");
    }

    #[test]
    fn resume_without_suspend_restores_evicted_animation() {
        let mut h = Harness::new(true);
        h.seq.show(&mut h.store, h.now, &mut Tracer::none());
        let overlay = h.overlay();

        h.store.remove_all_animations(overlay);
        assert_eq!(h.store.animation_count(overlay), 0);
        h.run(100);
        h.seq.on_resume(&mut h.store, h.now, &mut Tracer::none());

        assert_eq!(h.store.animation_count(overlay), 1, "animation re-registered");
        let restored = h.store.animation(overlay, ANIMATION_KEY);
        assert!(restored.is_some_and(|anim| anim.begin() == h.now && !anim.is_paused()));
        assert!(!h.seq.is_suspended());

        h.run(100);
        let resting = h.store.mask(overlay).map(|mask| mask.path.clone());
        assert_ne!(
            h.store.presented_mask(overlay).cloned(),
            resting,
            "mask is breathing again"
        );
    }

    #[test]
    fn overlay_attached_while_suspended_starts_paused() {
        let mut h = Harness::new(true);
        h.advance();
        h.advance();
        h.seq.on_suspend(&mut h.store, h.now, &mut Tracer::none());
        h.run(300);

        let overlay = h.overlay();
        assert_eq!(h.seq.current_index(), 2);
        assert!(
            h.store
                .animation(overlay, ANIMATION_KEY)
                .is_some_and(RevealAnimation::is_paused)
        );
    }

    #[test]
    fn effect_height_comes_from_config() {
        let mut h = Harness::new(true);
        h.seq.config_mut().effect_height = 20.0;
        h.advance();
        let overlay = h.overlay();

        let marker = MarkerDescriptor::circle((10.0, 10.0), 30.0);
        let expanded = RevealMask::expanded(&marker, Size::new(320.0, 480.0), 20.0);
        let anim = h.store.animation(overlay, ANIMATION_KEY).unwrap();
        assert_eq!(anim.to_path(), &expanded.to_path());
        assert!(expanded.reveals(Point::new(10.0, 55.0)), "radius 50 reaches y = 55");
    }

    #[test]
    fn dispose_detaches_silently() {
        let mut h = Harness::new(true);
        h.advance();
        let overlay = h.overlay();
        h.seq.dispose(&mut h.store, h.now, &mut Tracer::none());

        assert!(!h.store.is_alive(overlay));
        assert_eq!(h.children(), 0);
        assert!(h.reasons().is_empty(), "delegate not notified");
        h.advance();
        h.skip();
        assert!(h.reasons().is_empty());
        assert_eq!(h.seq.state(), SequencerState::Finished);
    }
}
