// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained layer tree.
//!
//! The host's screen is a tree of layers. The host creates a container layer
//! and hands its [`LayerId`] to a [`Sequencer`](crate::sequencer::Sequencer),
//! which adds one overlay layer under it per marker. Each layer has:
//!
//! - An identity ([`LayerId`]): a generational handle that becomes stale when
//!   the layer is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//! - **Model properties** set by the caller: [`frame`](LayerStore::set_frame),
//!   [`opacity`](LayerStore::set_opacity),
//!   [`content`](LayerStore::set_content), [`flags`](LayerStore::set_flags)
//!   and [`mask`](LayerStore::set_mask).
//! - **Animations** registered under string keys
//!   ([`add_animation`](LayerStore::add_animation)). Registering under a key
//!   that is already taken replaces the previous animation.
//! - **Presented properties** computed by the store:
//!   [`presented_mask`](LayerStore::presented_mask) (written by
//!   [`animate`](LayerStore::animate)) and
//!   [`effective_opacity`](LayerStore::effective_opacity) (written by
//!   [`evaluate`](LayerStore::evaluate)).
//!
//! Layers are stored in struct-of-arrays layout with index-based handles.

mod evaluate;
mod id;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use id::{INVALID, LayerId, SurfaceId};
pub use store::{LayerFlags, LayerStore};
pub use traverse::Children;
