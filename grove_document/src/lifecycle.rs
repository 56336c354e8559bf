// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame lifecycle: setup, update, draw, exit, window resize.

use grove_tree::NodeId;
use kurbo::Size;
use smallvec::SmallVec;

use crate::behavior::Painter;
use crate::document::Document;
use crate::error::DomError;

type Children = SmallVec<[NodeId; 16]>;

impl Document {
    fn children_snapshot(&self, node: NodeId) -> Children {
        self.tree.children_of(node).iter().copied().collect()
    }

    /// Run every node's setup hook, children before parents.
    pub fn setup(&mut self) -> Result<(), DomError> {
        self.flush()?;
        self.setup_node(self.root);
        self.flush()
    }

    fn setup_node(&mut self, node: NodeId) {
        for child in self.children_snapshot(node) {
            self.setup_node(child);
        }
        self.with_behavior(node, |b, doc| b.setup(doc, node));
    }

    /// Per-frame update.
    ///
    /// Enabled, visible nodes run their update hook and then their pending
    /// layout, children before parents. Notifications caused along the way
    /// are delivered before this returns.
    pub fn update(&mut self) -> Result<(), DomError> {
        self.flush()?;
        self.update_node(self.root);
        self.flush()
    }

    fn update_node(&mut self, node: NodeId) {
        if !self.tree.is_enabled(node) || self.tree.is_hidden(node) {
            return;
        }
        for child in self.children_snapshot(node) {
            self.update_node(child);
        }
        self.with_behavior(node, |b, doc| b.update(doc, node));
        self.tree.run_layout(node);
    }

    /// Paint enabled, visible nodes back to front.
    ///
    /// Each node is drawn with the painter translated to its origin, before
    /// its children, which are visited in insertion order.
    pub fn draw(&self, painter: &mut dyn Painter) {
        self.draw_node(self.root, painter);
    }

    fn draw_node(&self, node: NodeId, painter: &mut dyn Painter) {
        if !self.tree.is_enabled(node) || self.tree.is_hidden(node) {
            return;
        }
        let Some(bounds) = self.tree.bounds(node) else {
            return;
        };
        painter.push_translation(bounds.origin().to_vec2());
        painter.element(node, bounds.size());
        if let Some(behavior) = self.behaviors.get(&node) {
            behavior.draw(self, node, painter);
        }
        for &child in self.tree.children_of(node) {
            self.draw_node(child, painter);
        }
        painter.pop_translation();
    }

    /// Run every node's exit hook, children before parents.
    pub fn exit(&mut self) -> Result<(), DomError> {
        self.flush()?;
        self.exit_node(self.root);
        self.flush()
    }

    fn exit_node(&mut self, node: NodeId) {
        for child in self.children_snapshot(node) {
            self.exit_node(child);
        }
        self.with_behavior(node, |b, doc| b.exit(doc, node));
    }

    /// The host window changed size. Resizes the root when configured to fill the window.
    pub fn window_resized(&mut self, size: Size) -> Result<(), DomError> {
        self.window_size = size;
        if self.config.auto_fill_window {
            self.tree.set_size(self.root, size);
        }
        self.flush()
    }

    /// Latest window size reported by the host.
    pub fn window_size(&self) -> Size {
        self.window_size
    }
}
