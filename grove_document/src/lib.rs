// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Document: a small retained-mode DOM for 2D surfaces.
//!
//! A [`Document`] ties together the pieces of the other Grove crates:
//!
//! - the element tree from `grove_tree`, rooted at a document element that
//!   can track the host window's size;
//! - one `grove_events` listener registry per node, driven by the three-phase
//!   dispatcher;
//! - the `grove_pointer` table holding pointer capture and hover state.
//!
//! The host feeds raw input through [`Document::on_pointer_event`],
//! [`Document::on_key_event`], and [`Document::on_file_drag`], and drives
//! frames with [`Document::update`] and [`Document::draw`].
//!
//! ## Pointer routing
//!
//! A free pointer is hit-tested every sample. When the hit element changes
//! the document synthesizes, in order, out and leave on the old element and
//! over and enter on the new one. A captured pointer skips hit-testing and
//! goes straight to its capturing element until an up or cancel releases it.
//! Capture is requested with [`Document::set_pointer_capture`], or happens
//! implicitly on pointer down for elements that opt in.
//!
//! ## Structural notifications
//!
//! Tree changes are logged by the tree and turned into at-target
//! notifications (added, removed, reordered, moved, resized, attribute and
//! flag changes) by [`Document::flush`]. Removing an element from the
//! document drops any pointer capture or hover state it held.
//!
//! ## Focus
//!
//! One element at a time holds keyboard focus. Key events go to it, or to
//! the root when nothing is focused. [`Document::focus_next`] and
//! [`Document::focus_previous`] walk focusable elements in depth-first order.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod behavior;
mod config;
mod document;
mod error;
mod focus;
mod lifecycle;
mod routing;


pub use behavior::{Behavior, Painter};
pub use config::{DocumentConfig, WrapMode};
pub use document::{Document, Registry};
pub use error::{DomError, ErrorKind};
