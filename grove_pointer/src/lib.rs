// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Pointer: pointer capture state for a document.
//!
//! - [`CapturedPointer`] tracks one captured pointer: where the capture
//!   started, its offset inside the capturing element, the latest position,
//!   velocity, and timestamps.
//! - [`PointerTable`] is the document-wide state keyed by pointer id: which
//!   element holds each capture, which element was last under each pointer,
//!   and the last sample per pointer (used to synthesize hover transitions).
//!
//! The table is plain state. Policy (when to capture, which events to fire)
//! lives with the document that owns it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod captured;
mod table;

pub use captured::CapturedPointer;
pub use table::{PointerTable, Purged};
