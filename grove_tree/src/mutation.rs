// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural change records produced by tree mutations.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::NodeId;

/// One structural change, recorded in the order it happened.
///
/// The tree only records changes; drain them with
/// [`Tree::take_mutations`](crate::Tree::take_mutations) and turn them into
/// notifications for whoever listens.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// `child` was appended to `parent`.
    ChildAdded {
        /// New parent.
        parent: NodeId,
        /// Attached node.
        child: NodeId,
        /// Children `parent` already had when `child` arrived.
        siblings: Vec<NodeId>,
    },
    /// `child` was detached from `parent`. The subtree is still alive.
    ChildRemoved {
        /// Former parent.
        parent: NodeId,
        /// Detached node.
        child: NodeId,
        /// Children `parent` kept after `child` left.
        siblings: Vec<NodeId>,
    },
    /// `child` moved within `parent`'s child order.
    Reordered {
        /// Parent whose children were reordered.
        parent: NodeId,
        /// Node that moved.
        child: NodeId,
        /// Index before the move.
        old_index: usize,
        /// Index after the move.
        new_index: usize,
    },
    /// A node's position changed.
    Moved {
        /// The node.
        node: NodeId,
        /// New parent-space position.
        position: Point,
    },
    /// A node's size changed.
    Resized {
        /// The node.
        node: NodeId,
        /// New parent-space bounds.
        bounds: Rect,
    },
    /// An attribute was set.
    AttributeSet {
        /// The node.
        node: NodeId,
        /// Attribute key.
        key: String,
    },
    /// An attribute was cleared.
    AttributeCleared {
        /// The node.
        node: NodeId,
        /// Attribute key.
        key: String,
    },
    /// The enabled flag changed.
    Enabled {
        /// The node.
        node: NodeId,
        /// New value.
        value: bool,
    },
    /// The hidden flag changed.
    Hidden {
        /// The node.
        node: NodeId,
        /// New value.
        value: bool,
    },
    /// The locked flag changed.
    Locked {
        /// The node.
        node: NodeId,
        /// New value.
        value: bool,
    },
    /// The node was destroyed; its id is now stale.
    Destroyed {
        /// The stale id.
        node: NodeId,
    },
}

impl Mutation {
    /// The node a change is primarily about.
    pub fn node(&self) -> NodeId {
        match self {
            Self::ChildAdded { child, .. }
            | Self::ChildRemoved { child, .. }
            | Self::Reordered { child, .. } => *child,
            Self::Moved { node, .. }
            | Self::Resized { node, .. }
            | Self::AttributeSet { node, .. }
            | Self::AttributeCleared { node, .. }
            | Self::Enabled { node, .. }
            | Self::Hidden { node, .. }
            | Self::Locked { node, .. }
            | Self::Destroyed { node } => *node,
        }
    }
}
