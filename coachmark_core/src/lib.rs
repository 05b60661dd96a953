// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coach-mark sequencing and animated reveal masks over a retained layer tree.
//!
//! `coachmark_core` walks a user through a list of *markers*: one at a time,
//! it places an overlay over the host's content, cuts a circular or
//! rounded-rectangle hole into that overlay where the highlighted target
//! sits, and makes the hole "breathe" by looping between a resting and an
//! expanded mask path. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! Host events drive the [`Sequencer`](sequencer::Sequencer); a per-frame loop
//! turns the resulting layer mutations into incremental native updates:
//!
//! ```text
//!   tap / lifecycle ──► Sequencer::{show, advance, skip, on_suspend, on_resume}
//!                              │ queries DataSource, notifies Delegate
//!                              ▼
//!   every frame:        Sequencer::tick() ──► fade-out, pending attach
//!                              │
//!                              ▼
//!                       LayerStore::animate() ──► presented mask paths
//!                              │
//!                              ▼
//!                       LayerStore::evaluate() ──► FrameChanges ──► Presenter::apply()
//! ```
//!
//! **[`sequencer`]**: The marker state machine (`Idle`, `Presenting`,
//! `Transitioning`, `Finished`) plus the [`DataSource`](sequencer::DataSource)
//! and [`Delegate`](sequencer::Delegate) contracts.
//!
//! **[`mask`]**: Reveal-mask geometry: resting and expanded cutouts for each
//! [`MarkerDescriptor`](marker::MarkerDescriptor) variant, path construction,
//! and even-odd coverage.
//!
//! **[`animation`]**: [`RevealAnimation`](animation::RevealAnimation), the
//! auto-reversing looping interpolation between two mask paths, with
//! pause/resume.
//!
//! **[`layer`]**: Struct-of-arrays layer tree with generational handles,
//! keyed animation registries and model/presented masks.
//!
//! **[`dirty`]**: Multi-channel dirty tracking via `understory_dirty`.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait that host
//! backends implement to apply frame changes to native trees.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! sequencer instrumentation, with the zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod backend;
pub mod config;
pub mod dirty;
pub mod layer;
pub mod marker;
pub mod mask;
pub mod sequencer;
pub mod time;
pub mod trace;
