// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by structural tree operations.

use alloc::string::String;

use crate::types::NodeId;

/// Structural invariant violations.
///
/// These signal caller bugs against the tree's invariants; they are never
/// silently ignored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The id does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// The node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent that was searched.
        parent: NodeId,
        /// The node that was expected to be a child.
        child: NodeId,
    },
    /// Attaching would make a node its own ancestor.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The requested parent.
        parent: NodeId,
        /// The requested child.
        child: NodeId,
    },
    /// A strict attribute read found no value of the requested type.
    #[error("invalid attribute key `{0}`")]
    InvalidAttributeKey(String),
}
