// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation and change tracking.
//!
//! Evaluation drains each dirty channel in turn:
//!
//! 1. **OPACITY**: recompute each affected layer's `effective_opacity` as
//!    `parent_effective * local_opacity`, parents before children.
//! 2. **FRAME** / **MASK** / **CONTENT**: collect indices only; presenters
//!    read the current values from the store.
//! 3. **TOPOLOGY**: drain and discard (the traversal order was already
//!    rebuilt at the start of evaluation if needed).
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) so presenters can read the
//! store through the `*_at()` accessors (e.g.
//! [`presented_mask_at`](super::LayerStore::presented_mask_at)).

use alloc::vec::Vec;

use super::id::INVALID;
use super::store::LayerStore;
use crate::dirty;

/// The set of changes produced by a single [`LayerStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Layers whose effective opacity was recomputed.
    pub opacities: Vec<u32>,
    /// Layers whose frame or flags changed.
    pub frames: Vec<u32>,
    /// Layers whose presented mask changed.
    pub masks: Vec<u32>,
    /// Layers whose content surface changed.
    pub content: Vec<u32>,
    /// Layers added since the last evaluate.
    pub added: Vec<u32>,
    /// Layers removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.opacities.clear();
        self.frames.clear();
        self.masks.clear();
        self.content.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opacities.is_empty()
            && self.frames.is_empty()
            && self.masks.is_empty()
            && self.content.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl LayerStore {
    /// Evaluates the layer tree, recomputing dirty properties and returning
    /// the set of changes.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        let dirty_opacities: Vec<u32> = self
            .dirty
            .drain(dirty::OPACITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_opacities {
            let parent = self.parent[idx as usize];
            let parent_opacity = if parent != INVALID {
                self.effective_opacity[parent as usize]
            } else {
                1.0
            };
            self.effective_opacity[idx as usize] = parent_opacity * self.opacity[idx as usize];
        }
        changes.opacities = dirty_opacities;

        changes.frames = self
            .dirty
            .drain(dirty::FRAME)
            .deterministic()
            .run()
            .collect();

        changes.masks = self
            .dirty
            .drain(dirty::MASK)
            .deterministic()
            .run()
            .collect();

        changes.content = self
            .dirty
            .drain(dirty::CONTENT)
            .deterministic()
            .run()
            .collect();

        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                self.dfs_collect(idx);
            }
        }
    }

    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Rect, Size};

    use super::*;
    use crate::config::AnimationConfig;
    use crate::layer::SurfaceId;
    use crate::marker::MarkerDescriptor;
    use crate::mask::{RevealMask, reveal_animation};
    use crate::time::HostTime;

    #[test]
    fn evaluate_computes_effective_opacity() {
        let mut store = LayerStore::new();
        let parent = store.create_layer();
        let child = store.create_layer();

        store.set_opacity(parent, 0.5);
        store.set_opacity(child, 0.8);
        store.add_child(parent, child);

        let _changes = store.evaluate();

        assert!((store.effective_opacity(parent) - 0.5).abs() < f32::EPSILON);
        assert!((store.effective_opacity(child) - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn fading_parent_propagates_to_children() {
        let mut store = LayerStore::new();
        let overlay = store.create_layer();
        let content = store.create_layer();
        store.add_child(overlay, content);
        let _ = store.evaluate();

        store.set_opacity(overlay, 0.1);
        let changes = store.evaluate();

        assert!(changes.opacities.contains(&overlay.idx));
        assert!(changes.opacities.contains(&content.idx));
        assert!((store.effective_opacity(content) - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn second_evaluate_is_empty() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        store.set_frame(a, Rect::new(0.0, 0.0, 10.0, 10.0));
        let first = store.evaluate();
        assert!(!first.is_empty());
        let second = store.evaluate();
        assert!(second.is_empty(), "nothing changed: {second:?}");
    }

    #[test]
    fn local_channels_are_reported() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let _ = store.evaluate();

        store.set_frame(a, Rect::new(0.0, 0.0, 10.0, 10.0));
        store.set_content(b, Some(SurfaceId(7)));
        let changes = store.evaluate();

        assert_eq!(changes.frames, vec![a.idx]);
        assert_eq!(changes.content, vec![b.idx]);
        assert!(changes.masks.is_empty());
        assert!(!changes.topology_changed);
    }

    #[test]
    fn animate_reports_mask_changes() {
        let mut store = LayerStore::new();
        let marker = MarkerDescriptor::circle((40.0, 40.0), 10.0);
        let size = Size::new(100.0, 100.0);
        let id = store.create_layer();
        store.set_mask(id, Some(RevealMask::resting(&marker, size).to_mask()));
        store.add_animation(
            id,
            "reveal",
            reveal_animation(&marker, size, &AnimationConfig::DEFAULT, HostTime(0)),
        );
        let _ = store.evaluate();

        store.animate(HostTime(100_000_000));
        let changes = store.evaluate();
        assert_eq!(changes.masks, vec![id.idx]);
    }

    #[test]
    fn lifecycle_lists_are_moved_out() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let changes = store.evaluate();
        assert_eq!(changes.added, vec![a.idx, b.idx]);

        store.destroy_layer(b);
        let changes = store.evaluate();
        assert!(changes.added.is_empty());
        assert_eq!(changes.removed, vec![b.idx]);
        assert!(changes.topology_changed);
    }

    #[test]
    fn traversal_order_is_depth_first() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let a = store.create_layer();
        let b = store.create_layer();
        let a1 = store.create_layer();

        store.add_child(root, a);
        store.add_child(root, b);
        store.add_child(a, a1);

        let _ = store.evaluate();
        assert_eq!(store.traversal_order(), &[root.idx, a.idx, a1.idx, b.idx]);
    }
}
