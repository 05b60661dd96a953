// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, properties and
//! animations.

use alloc::vec::Vec;

use kurbo::{BezPath, Rect};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, LayerId, SurfaceId};
use super::traverse::Children;
use crate::animation::RevealAnimation;
use crate::dirty;
use crate::mask::Mask;
use crate::time::HostTime;

/// Per-layer boolean flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether content and descendants are clipped to the layer's frame.
    pub clips_to_bounds: bool,
}

#[derive(Clone, Debug)]
struct KeyedAnimation {
    key: &'static str,
    animation: RevealAnimation,
}

/// Struct-of-arrays storage for all layers.
///
/// Layers are addressed by [`LayerId`] handles. Destroyed layers are recycled
/// via a free list, and generation counters reject stale handles.
#[derive(Debug)]
pub struct LayerStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Model properties (set by callers) --
    pub(crate) frame: Vec<Rect>,
    pub(crate) opacity: Vec<f32>,
    pub(crate) content: Vec<Option<SurfaceId>>,
    pub(crate) flags: Vec<LayerFlags>,
    pub(crate) mask: Vec<Option<Mask>>,
    animations: Vec<Vec<KeyedAnimation>>,

    // -- Presented properties (written by animate / evaluate) --
    pub(crate) presented_mask: Vec<Option<BezPath>>,
    pub(crate) effective_opacity: Vec<f32>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            frame: Vec::new(),
            opacity: Vec::new(),
            content: Vec::new(),
            flags: Vec::new(),
            mask: Vec::new(),
            animations: Vec::new(),
            presented_mask: Vec::new(),
            effective_opacity: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new layer and returns its handle.
    ///
    /// The layer starts with a zero frame, full opacity, no content, no mask,
    /// no animations, default flags and no parent.
    pub fn create_layer(&mut self) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let slot = idx as usize;
            self.generation[slot] += 1;
            self.parent[slot] = INVALID;
            self.first_child[slot] = INVALID;
            self.next_sibling[slot] = INVALID;
            self.prev_sibling[slot] = INVALID;
            self.frame[slot] = Rect::ZERO;
            self.opacity[slot] = 1.0;
            self.content[slot] = None;
            self.flags[slot] = LayerFlags::default();
            self.mask[slot] = None;
            self.animations[slot].clear();
            self.presented_mask[slot] = None;
            self.effective_opacity[slot] = 1.0;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.frame.push(Rect::ZERO);
            self.opacity.push(1.0);
            self.content.push(None);
            self.flags.push(LayerFlags::default());
            self.mask.push(None);
            self.animations.push(Vec::new());
            self.presented_mask.push(None);
            self.effective_opacity.push(1.0);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        self.handle(idx)
    }

    /// Destroys a layer, dropping its animations and freeing its slot.
    ///
    /// # Panics
    ///
    /// Panics if the layer has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy layer with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        self.dirty.remove_key(idx);
        self.animations[idx as usize].clear();
        self.mask[idx as usize] = None;
        self.presented_mask[idx as usize] = None;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the topmost child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // Effective opacity is inherited from the parent.
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);
        self.dirty.mark_with(c, dirty::OPACITY, &EagerPolicy);

        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the layer has no parent.
    pub fn remove_from_parent(&mut self, child: LayerId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "layer has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);

        self.dirty.remove_dependency(c, p, dirty::OPACITY);
        self.dirty.mark_with(c, dirty::OPACITY, &EagerPolicy);

        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of a layer, if any.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a layer.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the live layers that have no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx))
            .map(|idx| self.handle(idx))
            .collect()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the frame of a layer in its parent's coordinates.
    #[must_use]
    pub fn frame(&self, id: LayerId) -> Rect {
        self.validate(id);
        self.frame[id.idx as usize]
    }

    /// Returns the local opacity of a layer.
    #[must_use]
    pub fn opacity(&self, id: LayerId) -> f32 {
        self.validate(id);
        self.opacity[id.idx as usize]
    }

    /// Returns the content surface of a layer.
    #[must_use]
    pub fn content(&self, id: LayerId) -> Option<SurfaceId> {
        self.validate(id);
        self.content[id.idx as usize]
    }

    /// Returns the flags of a layer.
    #[must_use]
    pub fn flags(&self, id: LayerId) -> LayerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the model mask of a layer.
    #[must_use]
    pub fn mask(&self, id: LayerId) -> Option<&Mask> {
        self.validate(id);
        self.mask[id.idx as usize].as_ref()
    }

    /// Returns the mask path as currently presented.
    ///
    /// This is the sampled animation path while an animation is registered,
    /// otherwise the model mask path. Updated by [`animate`](Self::animate).
    #[must_use]
    pub fn presented_mask(&self, id: LayerId) -> Option<&BezPath> {
        self.validate(id);
        self.presented_mask[id.idx as usize].as_ref()
    }

    /// Returns the computed effective opacity of a layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_opacity(&self, id: LayerId) -> f32 {
        self.validate(id);
        self.effective_opacity[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the frame of a layer.
    pub fn set_frame(&mut self, id: LayerId, frame: Rect) {
        self.validate(id);
        self.frame[id.idx as usize] = frame;
        self.dirty.mark(id.idx, dirty::FRAME);
    }

    /// Sets the local opacity of a layer.
    ///
    /// Marks the OPACITY channel dirty with eager propagation to descendants.
    pub fn set_opacity(&mut self, id: LayerId, opacity: f32) {
        self.validate(id);
        self.opacity[id.idx as usize] = opacity;
        self.dirty.mark_with(id.idx, dirty::OPACITY, &EagerPolicy);
    }

    /// Sets the content surface of a layer.
    pub fn set_content(&mut self, id: LayerId, content: Option<SurfaceId>) {
        self.validate(id);
        self.content[id.idx as usize] = content;
        self.dirty.mark(id.idx, dirty::CONTENT);
    }

    /// Sets the flags of a layer.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
        self.dirty.mark(id.idx, dirty::FRAME);
    }

    /// Sets the model mask of a layer.
    ///
    /// The presented mask snaps to the new model path until the next
    /// [`animate`](Self::animate) call samples a registered animation.
    pub fn set_mask(&mut self, id: LayerId, mask: Option<Mask>) {
        self.validate(id);
        let slot = id.idx as usize;
        self.presented_mask[slot] = mask.as_ref().map(|m| m.path.clone());
        self.mask[slot] = mask;
        self.dirty.mark(id.idx, dirty::MASK);
    }

    // -- Animation API --

    /// Registers `animation` on a layer's mask under `key`.
    ///
    /// An animation already registered under `key` is replaced, so a key never
    /// holds more than one animation.
    pub fn add_animation(&mut self, id: LayerId, key: &'static str, animation: RevealAnimation) {
        self.validate(id);
        let registry = &mut self.animations[id.idx as usize];
        if let Some(existing) = registry.iter_mut().find(|keyed| keyed.key == key) {
            existing.animation = animation;
        } else {
            registry.push(KeyedAnimation { key, animation });
        }
    }

    /// Returns the animation registered under `key`, if any.
    #[must_use]
    pub fn animation(&self, id: LayerId, key: &str) -> Option<&RevealAnimation> {
        self.validate(id);
        self.animations[id.idx as usize]
            .iter()
            .find(|keyed| keyed.key == key)
            .map(|keyed| &keyed.animation)
    }

    /// Returns how many animations are registered on a layer.
    #[must_use]
    pub fn animation_count(&self, id: LayerId) -> usize {
        self.validate(id);
        self.animations[id.idx as usize].len()
    }

    /// Unregisters and returns the animation under `key`.
    pub fn remove_animation(&mut self, id: LayerId, key: &str) -> Option<RevealAnimation> {
        self.validate(id);
        let registry = &mut self.animations[id.idx as usize];
        let pos = registry.iter().position(|keyed| keyed.key == key)?;
        let removed = registry.remove(pos).animation;
        if registry.is_empty() {
            self.revert_presented_mask(id.idx);
        }
        Some(removed)
    }

    /// Unregisters every animation on a layer; the presented mask reverts to
    /// the model mask.
    pub fn remove_all_animations(&mut self, id: LayerId) {
        self.validate(id);
        self.animations[id.idx as usize].clear();
        self.revert_presented_mask(id.idx);
    }

    /// Freezes every animation on a layer at its state at `now`.
    pub fn pause_animations(&mut self, id: LayerId, now: HostTime) {
        self.validate(id);
        for keyed in &mut self.animations[id.idx as usize] {
            keyed.animation.pause(now);
        }
    }

    /// Continues every paused animation on a layer from where it stopped.
    pub fn resume_animations(&mut self, id: LayerId, now: HostTime) {
        self.validate(id);
        for keyed in &mut self.animations[id.idx as usize] {
            keyed.animation.resume(now);
        }
    }

    /// Samples every registered animation at `now` into the presented masks.
    ///
    /// Finished animations are unregistered. When several animations are
    /// registered on one layer, the most recently added one wins. Layers whose
    /// presented mask changed are marked on the MASK channel.
    pub fn animate(&mut self, now: HostTime) {
        for idx in 0..self.len {
            let slot = idx as usize;
            if self.animations[slot].is_empty() {
                continue;
            }
            self.animations[slot].retain(|keyed| !keyed.animation.is_finished(now));
            let presented = self.animations[slot]
                .last()
                .and_then(|keyed| keyed.animation.sample(now))
                .or_else(|| self.mask[slot].as_ref().map(|m| m.path.clone()));
            if presented != self.presented_mask[slot] {
                self.presented_mask[slot] = presented;
                self.dirty.mark(idx, dirty::MASK);
            }
        }
    }

    // -- Raw-index accessors for backends --
    //
    // These accept raw slot indices (as found in `FrameChanges`) rather than
    // `LayerId` handles, skipping generation validation. Only use with indices
    // that came from `FrameChanges` or `traversal_order()`.

    /// Returns the frame at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn frame_at(&self, idx: u32) -> Rect {
        self.check_slot(idx);
        self.frame[idx as usize]
    }

    /// Returns the effective opacity at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn effective_opacity_at(&self, idx: u32) -> f32 {
        self.check_slot(idx);
        self.effective_opacity[idx as usize]
    }

    /// Returns the content surface at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn content_at(&self, idx: u32) -> Option<SurfaceId> {
        self.check_slot(idx);
        self.content[idx as usize]
    }

    /// Returns the flags at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn flags_at(&self, idx: u32) -> LayerFlags {
        self.check_slot(idx);
        self.flags[idx as usize]
    }

    /// Returns the presented mask path and the model fill rule at raw slot
    /// `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn presented_mask_at(&self, idx: u32) -> Option<Mask> {
        self.check_slot(idx);
        let fill_rule = self.mask[idx as usize].as_ref()?.fill_rule;
        let path = self.presented_mask[idx as usize].clone()?;
        Some(Mask::new(path, fill_rule))
    }

    // -- Internal helpers --

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    fn revert_presented_mask(&mut self, idx: u32) {
        let slot = idx as usize;
        let model = self.mask[slot].as_ref().map(|m| m.path.clone());
        if model != self.presented_mask[slot] {
            self.presented_mask[slot] = model;
            self.dirty.mark(idx, dirty::MASK);
        }
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Size};

    use super::*;
    use crate::config::{AnimationConfig, Repeat};
    use crate::marker::MarkerDescriptor;
    use crate::mask::{RevealMask, reveal_animation};

    const KEY: &str = "reveal";
    const MS: u64 = 1_000_000;

    fn masked_layer(store: &mut LayerStore) -> (LayerId, RevealAnimation) {
        let marker = MarkerDescriptor::circle((50.0, 50.0), 20.0);
        let size = Size::new(200.0, 200.0);
        let id = store.create_layer();
        store.set_mask(id, Some(RevealMask::resting(&marker, size).to_mask()));
        let anim = reveal_animation(&marker, size, &AnimationConfig::DEFAULT, HostTime(0));
        (id, anim)
    }

    #[test]
    fn create_and_destroy() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        assert!(store.is_alive(id));
        store.destroy_layer(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = LayerStore::new();
        let id1 = store.create_layer();
        store.destroy_layer(id1);
        let id2 = store.create_layer();
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx, "slot is reused");
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn reused_slot_starts_clean() {
        let mut store = LayerStore::new();
        let (id, anim) = masked_layer(&mut store);
        store.set_opacity(id, 0.1);
        store.add_animation(id, KEY, anim);
        store.destroy_layer(id);

        let fresh = store.create_layer();
        assert_eq!(fresh.idx, id.idx);
        assert_eq!(store.opacity(fresh), 1.0);
        assert!(store.mask(fresh).is_none());
        assert_eq!(store.animation_count(fresh), 0);
    }

    #[test]
    fn add_child_and_query() {
        let mut store = LayerStore::new();
        let parent = store.create_layer();
        let child1 = store.create_layer();
        let child2 = store.create_layer();

        store.add_child(parent, child1);
        store.add_child(parent, child2);

        assert_eq!(store.parent(child1), Some(parent));
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
    }

    #[test]
    fn remove_from_parent_works() {
        let mut store = LayerStore::new();
        let parent = store.create_layer();
        let child = store.create_layer();

        store.add_child(parent, child);
        store.remove_from_parent(child);
        assert_eq!(store.parent(child), None);
        assert!(store.children(parent).next().is_none());
    }

    #[test]
    fn roots_returns_parentless_layers() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let c = store.create_layer();
        store.add_child(a, c);

        let roots = store.roots();
        assert!(roots.contains(&a));
        assert!(roots.contains(&b));
        assert!(!roots.contains(&c));
    }

    #[test]
    #[should_panic(expected = "cannot destroy layer with children")]
    fn destroy_with_children_panics() {
        let mut store = LayerStore::new();
        let parent = store.create_layer();
        let child = store.create_layer();
        store.add_child(parent, child);
        store.destroy_layer(parent);
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_set_opacity() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        store.destroy_layer(id);
        store.set_opacity(id, 0.5);
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn double_attach_panics() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let child = store.create_layer();
        store.add_child(a, child);
        store.add_child(b, child);
    }

    #[test]
    fn set_mask_resets_presented_path() {
        let mut store = LayerStore::new();
        let (id, _) = masked_layer(&mut store);
        assert_eq!(
            store.presented_mask(id),
            store.mask(id).map(|m| &m.path),
            "presented starts at the model"
        );
        store.set_mask(id, None);
        assert!(store.presented_mask(id).is_none());
    }

    #[test]
    fn same_key_replaces() {
        let mut store = LayerStore::new();
        let (id, anim) = masked_layer(&mut store);
        store.add_animation(id, KEY, anim.clone());
        store.add_animation(id, KEY, anim.restarted(HostTime(500 * MS)));
        assert_eq!(store.animation_count(id), 1);
        assert_eq!(
            store.animation(id, KEY).map(RevealAnimation::begin),
            Some(HostTime(500 * MS))
        );
        store.add_animation(id, "other", anim);
        assert_eq!(store.animation_count(id), 2);
    }

    #[test]
    fn animate_presents_sampled_path() {
        let mut store = LayerStore::new();
        let (id, anim) = masked_layer(&mut store);
        store.add_animation(id, KEY, anim.clone());

        store.animate(HostTime(400 * MS));
        assert_ne!(
            store.presented_mask(id),
            Some(anim.from_path()),
            "peak at 0.4s"
        );
        // Point between the resting (20) and expanded (30) radius.
        let ring = Point::new(50.0 + 17.0, 50.0 + 18.0);
        let presented = store.presented_mask_at(id.idx).unwrap();
        assert!(!presented.covers(ring), "expanded spotlight reveals the ring");
        assert!(store.mask(id).unwrap().covers(ring), "model mask stays at rest");
    }

    #[test]
    fn finished_animation_reverts_to_model() {
        let mut store = LayerStore::new();
        let marker = MarkerDescriptor::circle((50.0, 50.0), 20.0);
        let size = Size::new(200.0, 200.0);
        let id = store.create_layer();
        store.set_mask(id, Some(RevealMask::resting(&marker, size).to_mask()));
        let config = AnimationConfig {
            repeat: Repeat::Count(1),
            ..AnimationConfig::DEFAULT
        };
        store.add_animation(id, KEY, reveal_animation(&marker, size, &config, HostTime(0)));

        store.animate(HostTime(200 * MS));
        assert_ne!(store.presented_mask(id), store.mask(id).map(|m| &m.path));

        store.animate(HostTime(900 * MS));
        assert_eq!(store.animation_count(id), 0, "finished animation is dropped");
        assert_eq!(store.presented_mask(id), store.mask(id).map(|m| &m.path));
    }

    #[test]
    fn paused_animation_holds_its_frame() {
        let mut store = LayerStore::new();
        let (id, anim) = masked_layer(&mut store);
        store.add_animation(id, KEY, anim);

        store.animate(HostTime(100 * MS));
        let before = store.presented_mask(id).cloned();
        store.pause_animations(id, HostTime(100 * MS));
        store.animate(HostTime(5_000 * MS));
        assert_eq!(store.presented_mask(id).cloned(), before);

        store.resume_animations(id, HostTime(5_000 * MS));
        store.animate(HostTime(5_100 * MS));
        assert_ne!(store.presented_mask(id).cloned(), before, "moving again");
    }

    #[test]
    fn remove_all_animations_reverts() {
        let mut store = LayerStore::new();
        let (id, anim) = masked_layer(&mut store);
        store.add_animation(id, KEY, anim);
        store.animate(HostTime(200 * MS));

        store.remove_all_animations(id);
        assert!(store.animation(id, KEY).is_none());
        assert_eq!(store.presented_mask(id), store.mask(id).map(|m| &m.path));
        assert!(store.remove_animation(id, KEY).is_none());
    }
}
