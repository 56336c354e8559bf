// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Tree: a retained-mode element tree for 2D surfaces.
//!
//! The tree owns a hierarchy of rectangular elements positioned relative to
//! their parents. It is the geometric half of a small DOM: events and routing
//! live in `grove_events` and `grove_document`, which build on this crate.
//!
//! - Parents own their children; children hold a back-reference that is
//!   cleared in the same step that detaches them. The mutation API never
//!   builds a cycle.
//! - Insertion order is paint order. The last child is on top and wins hit tests.
//! - Each node caches the union of its children's bounds. Any geometry change
//!   marks the node and its ancestors dirty; the cache is rebuilt on the next query.
//! - A node can own a [`Layout`] strategy that arranges its children lazily.
//! - Every structural or geometric change is logged as a [`Mutation`] for the
//!   owner to turn into notifications.
//!
//! ## API overview
//!
//! - [`Tree`]: arena holding every node.
//! - [`NodeId`]: generational handle of a node.
//! - [`ElementDesc`]: construction data (id, bounds, flags, kind, hit shape).
//! - [`NodeFlags`]: enabled, hidden, locked, focusable, focused, implicit capture.
//! - [`HitShape`]: the shape a node's own hit test uses.
//! - [`Attributes`]: typed per-node key/value data read by layouts.
//! - [`FlowLayout`] and [`BoxLayout`]: the bundled [`Layout`] strategies.
//!
//! Key operations:
//! - [`Tree::create`] / [`Tree::add_child`] / [`Tree::remove_child`] / [`Tree::destroy`]
//! - [`Tree::move_child_to_front`] and friends for sibling order.
//! - [`Tree::recursive_hit_test`] resolves the deepest, topmost node under a point.
//! - [`Tree::screen_position`], [`Tree::local_to_screen`], [`Tree::screen_to_local`].
//! - [`Tree::update_layouts`] runs pending layouts children first.
//! - [`Tree::take_mutations`] drains the change log.
//!
//! Coordinates are pure translations: a node's screen position is the sum of
//! the positions on its parent chain. There is no scale or rotation.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attributes;
mod error;
mod layout;
mod mutation;
mod tree;
mod types;

pub use attributes::{AttributeValue, Attributes, FromAttribute};
pub use error::TreeError;
pub use layout::{BoxLayout, FlowLayout, Layout, Orientation};
pub use mutation::Mutation;
pub use tree::Tree;
pub use types::{ElementDesc, ElementKind, HitShape, NodeFlags, NodeId};
