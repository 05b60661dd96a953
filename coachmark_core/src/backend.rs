// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presenter contract for host integrations.
//!
//! `coachmark_core` owns the layer tree, the reveal geometry and the marker
//! state machine. It never touches a native view hierarchy. A host provides:
//!
//! - **A frame callback** that produces a monotonic [`HostTime`] and drives
//!   the per-frame pipeline below. How the callback is scheduled (display
//!   link, `requestAnimationFrame`, a timer) is host-specific and not
//!   abstracted.
//!
//! - **Lifecycle hooks** that forward "moved to background" and "returned to
//!   foreground" to [`Sequencer::on_suspend`] and [`Sequencer::on_resume`].
//!
//! - **A presenter** implementing [`Presenter`] to mirror frame changes into
//!   the native tree (view frames, alpha, mask layers, attached content).
//!
//! [`HostTime`]: crate::time::HostTime
//! [`Sequencer::on_suspend`]: crate::sequencer::Sequencer::on_suspend
//! [`Sequencer::on_resume`]: crate::sequencer::Sequencer::on_resume

use crate::layer::{FrameChanges, LayerStore};

/// Applies evaluated frame changes to a host-native presentation tree.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: HostTime) {
///     // Advance fades and attach pending overlays.
///     sequencer.tick(&mut store, now, &mut tracer);
///
///     // Sample reveal animations into presented masks.
///     store.animate(now);
///
///     // Drain dirty channels, recompute effective opacity.
///     let changes = store.evaluate();
///
///     // Apply incremental changes to the native tree.
///     presenter.apply(&store, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`FrameChanges`] to the backing presentation tree,
    /// reading current property values from `store` as needed.
    fn apply(&mut self, store: &LayerStore, changes: &FrameChanges);
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use kurbo::{Point, Rect, Shape};

    use super::*;
    use crate::mask::{FillRule, Mask};

    /// Mirrors the properties a native tree would hold, keyed by slot.
    #[derive(Default)]
    struct MirrorPresenter {
        opacity: BTreeMap<u32, f32>,
        frames: BTreeMap<u32, Rect>,
        masks: BTreeMap<u32, Option<Mask>>,
        applied: usize,
    }

    impl Presenter for MirrorPresenter {
        fn apply(&mut self, store: &LayerStore, changes: &FrameChanges) {
            self.applied += 1;
            for &idx in &changes.removed {
                self.opacity.remove(&idx);
                self.frames.remove(&idx);
                self.masks.remove(&idx);
            }
            for &idx in &changes.opacities {
                self.opacity.insert(idx, store.effective_opacity_at(idx));
            }
            for &idx in &changes.frames {
                self.frames.insert(idx, store.frame_at(idx));
            }
            for &idx in &changes.masks {
                self.masks.insert(idx, store.presented_mask_at(idx));
            }
        }
    }

    #[test]
    fn presenter_mirrors_incremental_changes() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let overlay = store.create_layer();
        store.add_child(root, overlay);

        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        let path = frame.to_path(0.1);
        store.set_frame(overlay, frame);
        store.set_opacity(overlay, 0.5);
        store.set_mask(overlay, Some(Mask::new(path, FillRule::EvenOdd)));

        let mut presenter = MirrorPresenter::default();
        let changes = store.evaluate();
        presenter.apply(&store, &changes);

        let idx = overlay.index();
        assert_eq!(presenter.frames.get(&idx), Some(&frame));
        assert_eq!(presenter.opacity.get(&idx), Some(&0.5));
        let mask = presenter.masks.get(&idx).cloned().flatten();
        assert!(
            mask.is_some_and(|m| m.covers(Point::new(50.0, 50.0))),
            "mask reaches the presenter"
        );

        store.remove_from_parent(overlay);
        store.destroy_layer(overlay);
        let changes = store.evaluate();
        presenter.apply(&store, &changes);
        assert!(presenter.frames.is_empty(), "removed layer is dropped");
        assert_eq!(presenter.applied, 2);
    }
}
