// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data model and render surface for the Hearth chart engine.
//!
//! This crate holds the pieces every other Hearth crate agrees on:
//! - **Records and datasets**: the tabular rows fetched from the clustering and prediction
//!   services, plus the user's category [`Selection`].
//! - **Marks and scenes**: the vector draw commands a render pass produces. A [`Scene`] is
//!   cleared and rebuilt on every pass; there is no incremental patching.
//! - **Request gating**: [`RequestGate`] keeps a stale fetch response from overwriting fresher
//!   state.
//!
//! Chart semantics (scales, geometry, interaction, animation) live in `hearth_charts`.

#![no_std]

extern crate alloc;

mod dataset;
mod error;
mod mark;
mod record;
mod request;
mod scene;
mod selection;

pub use dataset::Dataset;
pub use error::{FetchFailure, MissingFieldWarning, RenderError};
pub use mark::{
    CircleMark, Mark, MarkId, MarkPayload, PathMark, RectMark, StrokeDash, TextAnchor,
    TextBaseline, TextMark,
};
pub use record::{Field, FieldLabels, Record, Value};
pub use request::{RequestGate, RequestTicket};
pub use scene::Scene;
pub use selection::Selection;
