// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node lifecycle hooks and the drawing seam.

use grove_tree::NodeId;
use kurbo::{Size, Vec2};

use crate::document::Document;

/// Lifecycle hooks attached to one node.
///
/// All methods default to doing nothing. Hooks receive the document mutably
/// (except `draw`) and may restructure the tree; the behavior is detached
/// from the document while its hook runs.
pub trait Behavior {
    /// Called once from [`Document::setup`], children before parents.
    fn setup(&mut self, doc: &mut Document, node: NodeId) {
        let _ = (doc, node);
    }

    /// Called every frame from [`Document::update`] for enabled, visible
    /// nodes, children before parents, before the node's layout runs.
    fn update(&mut self, doc: &mut Document, node: NodeId) {
        let _ = (doc, node);
    }

    /// Called from [`Document::draw`] with the painter translated to the node's origin.
    fn draw(&self, doc: &Document, node: NodeId, painter: &mut dyn Painter) {
        let _ = (doc, node, painter);
    }

    /// Called once from [`Document::exit`], children before parents.
    fn exit(&mut self, doc: &mut Document, node: NodeId) {
        let _ = (doc, node);
    }
}

/// Rendering backend seam.
///
/// The document walks visible nodes back to front and keeps the painter's
/// origin at the current node's top-left corner.
pub trait Painter {
    /// Translate the origin by `offset` until the matching pop.
    fn push_translation(&mut self, offset: Vec2);

    /// Undo the latest [`Painter::push_translation`].
    fn pop_translation(&mut self);

    /// A node is about to draw at the current origin with `size`.
    ///
    /// Called before the node's [`Behavior::draw`], whether or not it has one.
    fn element(&mut self, node: NodeId, size: Size) {
        let _ = (node, size);
    }
}
