// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The layer store uses multi-channel dirty tracking (via
//! [`understory_dirty`]) so each frame only reports what actually changed.
//!
//! - **Propagating**: [`OPACITY`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) with child-to-parent
//!   dependency edges, because effective opacity is inherited. Fading an
//!   overlay marks its whole subtree.
//!
//! - **Local-only**: [`FRAME`], [`MASK`] and [`CONTENT`] only report the
//!   layer that was touched. A running reveal animation marks [`MASK`] every
//!   time [`LayerStore::animate`](crate::layer::LayerStore::animate) samples
//!   it.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on attach/detach and on layer
//!   creation/destruction, and triggers a traversal-order rebuild.
//!
//! Callers never query dirty state directly; each
//! [`LayerStore::evaluate`](crate::layer::LayerStore::evaluate) drains all
//! channels into [`FrameChanges`](crate::layer::FrameChanges).

use understory_dirty::Channel;

/// Opacity changed: requires effective opacity recomputation for descendants.
pub const OPACITY: Channel = Channel::new(0);

/// Frame or flags changed.
pub const FRAME: Channel = Channel::new(1);

/// Model or presented mask changed.
pub const MASK: Channel = Channel::new(2);

/// Content surface changed.
pub const CONTENT: Channel = Channel::new(3);

/// Tree topology changed: triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(4);
