// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, geometry, queries.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::cell::Cell;
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::attributes::{AttributeValue, Attributes, FromAttribute};
use crate::error::TreeError;
use crate::layout::Layout;
use crate::mutation::Mutation;
use crate::types::{ElementDesc, ElementKind, HitShape, NodeFlags, NodeId};

/// Arena holding every node, attached or not.
///
/// Nodes are created detached with [`Tree::create`] and join a hierarchy with
/// [`Tree::add_child`]. Each parent exclusively owns its children; a child only
/// keeps a back-reference that is cleared in the same step that removes it from
/// its parent. Detached subtrees stay alive (ownership returns to the caller)
/// until [`Tree::destroy`] frees them.
///
/// Insertion order is paint order: the last child is painted last and so sits
/// on top, which is why hit testing walks children in reverse.
///
/// Every structural or geometric change is appended to a mutation log that
/// the owner drains with [`Tree::take_mutations`].
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use grove_tree::{ElementDesc, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.create(ElementDesc::new("root", 0.0, 0.0, 200.0, 200.0));
/// let a = tree.create(ElementDesc::new("a", 10.0, 10.0, 50.0, 50.0));
/// let b = tree.create(ElementDesc::new("b", 10.0, 10.0, 50.0, 50.0));
/// tree.add_child(root, a).unwrap();
/// tree.add_child(root, b).unwrap();
///
/// // Later children are on top.
/// assert_eq!(tree.recursive_hit_test(root, Point::new(20.0, 20.0)), Some(b));
/// // Outside every child the parent itself is hit.
/// assert_eq!(tree.recursive_hit_test(root, Point::new(150.0, 150.0)), Some(root));
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    mutations: Vec<Mutation>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("pending_mutations", &self.mutations.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    id: String,
    bounds: Rect,
    flags: NodeFlags,
    kind: ElementKind,
    hit_shape: HitShape,
    attributes: Attributes,
    layout: Option<Box<dyn Layout>>,
    layout_dirty: bool,
    /// Union of the children's total bounds in local space. `None` means dirty.
    child_bounds: Cell<Option<Rect>>,
}

impl Node {
    fn new(generation: u32, desc: ElementDesc) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            id: desc.id,
            bounds: desc.bounds,
            flags: desc.flags,
            kind: desc.kind,
            hit_shape: desc.hit_shape,
            attributes: Attributes::default(),
            layout: None,
            layout_dirty: false,
            child_bounds: Cell::new(None),
        }
    }

    fn is_active(&self) -> bool {
        self.flags.contains(NodeFlags::ENABLED) && !self.flags.contains(NodeFlags::HIDDEN)
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            mutations: Vec::new(),
        }
    }

    // --- lifecycle ---

    /// Create a detached node.
    pub fn create(&mut self, desc: ElementDesc) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, desc));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, desc)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create a node and, if `parent` is given, attach it as that parent's last child.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        desc: ElementDesc,
    ) -> Result<NodeId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleNode(p));
        }
        let id = self.create(desc);
        if let Some(p) = parent {
            self.add_child(p, id)?;
        }
        Ok(id)
    }

    /// Destroy a node and its whole subtree.
    ///
    /// The node is detached first (recording a removal), then every node of
    /// the subtree is freed and recorded as [`Mutation::Destroyed`].
    pub fn destroy(&mut self, id: NodeId) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleNode(id));
        }
        if let Some(parent) = self.node(id).parent {
            self.remove_child(parent, id)?;
        }
        let mut stack = alloc::vec![id];
        while let Some(n) = stack.pop() {
            stack.extend(self.node(n).children.iter().copied());
            self.nodes[n.idx()] = None;
            self.free_list.push(n.idx());
            self.mutations.push(Mutation::Destroyed { node: n });
        }
        Ok(())
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Drain the recorded mutations, oldest first.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        core::mem::take(&mut self.mutations)
    }

    /// Returns `true` if mutations are waiting to be drained.
    pub fn has_pending_mutations(&self) -> bool {
        !self.mutations.is_empty()
    }

    // --- structure ---

    /// Append `child` to `parent`'s children, on top of its existing siblings.
    ///
    /// A child attached elsewhere is detached from its old parent first. Fails
    /// if either id is stale or if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::StaleNode(parent));
        }
        if !self.is_alive(child) {
            return Err(TreeError::StaleNode(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle { parent, child });
        }
        if let Some(old_parent) = self.node(child).parent {
            self.remove_child(old_parent, child)?;
        }
        let siblings = self.node(parent).children.to_vec();
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        self.invalidate_child_bounds(parent);
        self.mutations.push(Mutation::ChildAdded {
            parent,
            child,
            siblings,
        });
        Ok(())
    }

    /// Detach `child` from `parent` and hand it back to the caller.
    ///
    /// The detached subtree stays alive as its own root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, TreeError> {
        let index = self.child_index(parent, child)?;
        self.node_mut(parent).children.remove(index);
        self.node_mut(child).parent = None;
        self.invalidate_child_bounds(parent);
        let siblings = self.node(parent).children.to_vec();
        self.mutations.push(Mutation::ChildRemoved {
            parent,
            child,
            siblings,
        });
        Ok(child)
    }

    /// Detach a node from whatever parent it has. Returns the former parent.
    pub fn detach(&mut self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleNode(id));
        }
        match self.node(id).parent {
            Some(parent) => self.remove_child(parent, id).map(|_| Some(parent)),
            None => Ok(None),
        }
    }

    /// Position of `child` within `parent`'s children.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Result<usize, TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::StaleNode(parent));
        }
        if !self.is_alive(child) {
            return Err(TreeError::StaleNode(child));
        }
        self.node(parent)
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(TreeError::NotAChild { parent, child })
    }

    /// Move `child` to the top of its siblings (painted last, hit first).
    pub fn move_child_to_front(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let old = self.child_index(parent, child)?;
        let last = self.node(parent).children.len() - 1;
        self.reorder(parent, child, old, last);
        Ok(())
    }

    /// Move `child` one step towards the top.
    pub fn move_child_forward(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let old = self.child_index(parent, child)?;
        let last = self.node(parent).children.len() - 1;
        self.reorder(parent, child, old, (old + 1).min(last));
        Ok(())
    }

    /// Move `child` to the bottom of its siblings (painted first, hit last).
    pub fn move_child_to_back(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let old = self.child_index(parent, child)?;
        self.reorder(parent, child, old, 0);
        Ok(())
    }

    /// Move `child` one step towards the bottom.
    pub fn move_child_backward(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let old = self.child_index(parent, child)?;
        self.reorder(parent, child, old, old.saturating_sub(1));
        Ok(())
    }

    /// Move `child` to `index`, clamped to the last position.
    pub fn move_child_to_index(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), TreeError> {
        let old = self.child_index(parent, child)?;
        let last = self.node(parent).children.len() - 1;
        self.reorder(parent, child, old, index.min(last));
        Ok(())
    }

    /// Move a node to the top of its siblings. No-op for detached nodes.
    pub fn move_to_front(&mut self, id: NodeId) -> Result<(), TreeError> {
        match self.live_parent(id)? {
            Some(parent) => self.move_child_to_front(parent, id),
            None => Ok(()),
        }
    }

    /// Move a node one step towards the top. No-op for detached nodes.
    pub fn move_forward(&mut self, id: NodeId) -> Result<(), TreeError> {
        match self.live_parent(id)? {
            Some(parent) => self.move_child_forward(parent, id),
            None => Ok(()),
        }
    }

    /// Move a node to the bottom of its siblings. No-op for detached nodes.
    pub fn move_to_back(&mut self, id: NodeId) -> Result<(), TreeError> {
        match self.live_parent(id)? {
            Some(parent) => self.move_child_to_back(parent, id),
            None => Ok(()),
        }
    }

    /// Move a node one step towards the bottom. No-op for detached nodes.
    pub fn move_backward(&mut self, id: NodeId) -> Result<(), TreeError> {
        match self.live_parent(id)? {
            Some(parent) => self.move_child_backward(parent, id),
            None => Ok(()),
        }
    }

    // --- queries ---

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|node| node.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Children whose [`ElementKind`] matches `kind`, in insertion order.
    pub fn children_of_kind(&self, id: NodeId, kind: ElementKind) -> Vec<NodeId> {
        self.children_of(id)
            .iter()
            .copied()
            .filter(|c| self.node(*c).kind == kind)
            .collect()
    }

    /// Number of children; zero for stale ids.
    pub fn num_children(&self, id: NodeId) -> usize {
        self.children_of(id).len()
    }

    /// Siblings of a node, excluding the node itself.
    pub fn siblings_of(&self, id: NodeId) -> Vec<NodeId> {
        match self.parent_of(id) {
            Some(parent) => self
                .children_of(parent)
                .iter()
                .copied()
                .filter(|s| *s != id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Siblings whose [`ElementKind`] matches `kind`.
    pub fn siblings_of_kind(&self, id: NodeId, kind: ElementKind) -> Vec<NodeId> {
        let mut out = self.siblings_of(id);
        out.retain(|s| self.node(*s).kind == kind);
        out
    }

    /// Number of siblings, not counting the node itself.
    pub fn num_siblings(&self, id: NodeId) -> usize {
        self.parent_of(id)
            .map(|p| self.num_children(p) - 1)
            .unwrap_or(0)
    }

    /// Returns `true` if `child`'s parent is `parent`.
    pub fn is_child(&self, parent: NodeId, child: NodeId) -> bool {
        self.is_alive(parent) && self.parent_of(child) == Some(parent)
    }

    /// Returns `true` if `candidate` is `id`'s parent.
    pub fn is_parent(&self, id: NodeId, candidate: NodeId) -> bool {
        self.is_child(candidate, id)
    }

    /// Returns `true` if both nodes share a parent.
    pub fn is_sibling(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.parent_of(a).is_some() && self.parent_of(a) == self.parent_of(b)
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Topmost ancestor of a node (the node itself when detached).
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut current = id;
        while let Some(p) = self.parent_of(current) {
            current = p;
        }
        Some(current)
    }

    /// Number of ancestors above a node.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            depth += 1;
            current = self.parent_of(p);
        }
        depth
    }

    /// Returns the [`ElementKind`] of a live node.
    pub fn kind(&self, id: NodeId) -> Option<ElementKind> {
        self.node_opt(id).map(|node| node.kind)
    }

    /// Returns the string id of a live node.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|node| node.id.as_str())
    }

    /// Replace the string id of a live node.
    pub fn set_element_id(&mut self, id: NodeId, element_id: impl Into<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.id = element_id.into();
        }
    }

    /// First direct child with the given string id.
    pub fn find_first_child_by_id(&self, id: NodeId, element_id: &str) -> Option<NodeId> {
        self.children_of(id)
            .iter()
            .copied()
            .find(|c| self.node(*c).id == element_id)
    }

    /// All direct children with the given string id.
    pub fn find_children_by_id(&self, id: NodeId, element_id: &str) -> Vec<NodeId> {
        self.children_of(id)
            .iter()
            .copied()
            .filter(|c| self.node(*c).id == element_id)
            .collect()
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` if no next node exists or if the current node is stale.
    /// This is a standard tree traversal that does not wrap around.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Get the previous node in reverse depth-first traversal order.
    ///
    /// Returns `None` if no previous node exists or if the current node is stale.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(prev_sibling) = self.prev_sibling(current) {
            return Some(self.last_in_subtree(prev_sibling));
        }
        self.parent_of(current)
    }

    /// Last node of a subtree in depth-first order.
    pub fn last_in_subtree(&self, id: NodeId) -> NodeId {
        let mut node = id;
        while let Some(&last_child) = self.children_of(node).last() {
            node = last_child;
        }
        node
    }

    // --- flags ---

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|node| node.flags)
    }

    /// Returns `true` if the node is live and has the [`NodeFlags::ENABLED`] flag.
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::ENABLED)
    }

    /// Enable or disable a node.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        if self.set_flag(id, NodeFlags::ENABLED, enabled) {
            self.mutations.push(Mutation::Enabled {
                node: id,
                value: enabled,
            });
        }
    }

    /// Returns `true` if the node is live and hidden.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::HIDDEN)
    }

    /// Hide or show a node.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if self.set_flag(id, NodeFlags::HIDDEN, hidden) {
            self.mutations.push(Mutation::Hidden {
                node: id,
                value: hidden,
            });
        }
    }

    /// Returns `true` if the node is live and locked.
    pub fn is_locked(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::LOCKED)
    }

    /// Lock or unlock a node.
    pub fn set_locked(&mut self, id: NodeId, locked: bool) {
        if self.set_flag(id, NodeFlags::LOCKED, locked) {
            self.mutations.push(Mutation::Locked {
                node: id,
                value: locked,
            });
        }
    }

    /// Returns `true` if the node can take keyboard focus.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::FOCUSABLE)
    }

    /// Allow or forbid keyboard focus.
    pub fn set_focusable(&mut self, id: NodeId, focusable: bool) {
        self.set_flag(id, NodeFlags::FOCUSABLE, focusable);
    }

    /// Returns `true` if the node currently holds focus.
    pub fn is_focused(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::FOCUSED)
    }

    /// Set the focused flag. Focus ownership itself is managed by the document.
    pub fn set_focused(&mut self, id: NodeId, focused: bool) {
        self.set_flag(id, NodeFlags::FOCUSED, focused);
    }

    /// Returns `true` if a pointer down on this node captures the pointer.
    pub fn implicit_capture(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::IMPLICIT_CAPTURE)
    }

    /// Opt in or out of implicit pointer capture.
    pub fn set_implicit_capture(&mut self, id: NodeId, implicit: bool) {
        self.set_flag(id, NodeFlags::IMPLICIT_CAPTURE, implicit);
    }

    /// Returns `true` if the node and all of its ancestors are enabled and visible.
    pub fn is_effectively_active(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            match self.node_opt(n) {
                Some(node) if node.is_active() => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Shape used by the node's own hit test.
    pub fn hit_shape(&self, id: NodeId) -> Option<HitShape> {
        self.node_opt(id).map(|node| node.hit_shape)
    }

    /// Replace the shape used by the node's own hit test.
    pub fn set_hit_shape(&mut self, id: NodeId, shape: HitShape) {
        if let Some(n) = self.node_opt_mut(id) {
            n.hit_shape = shape;
        }
    }

    // --- geometry ---

    /// Bounds in parent coordinates.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|node| node.bounds)
    }

    /// Position (top-left) in parent coordinates.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.bounds(id).map(|b| b.origin())
    }

    /// Size of a node.
    pub fn size(&self, id: NodeId) -> Option<Size> {
        self.bounds(id).map(|b| b.size())
    }

    /// Center of a node in parent coordinates.
    pub fn center_position(&self, id: NodeId) -> Option<Point> {
        self.bounds(id).map(|b| b.center())
    }

    /// Move a node to `position` in parent coordinates.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        if n.bounds.origin() == position {
            return;
        }
        n.bounds = n.bounds.with_origin(position);
        self.invalidate_child_bounds(id);
        self.mutations.push(Mutation::Moved { node: id, position });
    }

    /// Move a node so that its center lands on `center`.
    pub fn set_center_position(&mut self, id: NodeId, center: Point) {
        if let Some(size) = self.size(id) {
            let origin = center - Vec2::new(size.width * 0.5, size.height * 0.5);
            self.set_position(id, origin);
        }
    }

    /// Resize a node.
    ///
    /// The size is clamped by the node's `min-width`, `max-width`,
    /// `min-height`, and `max-height` attributes, then standardized: a
    /// negative extent flips the rectangle around its origin.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let attrs = &n.attributes;
        let mut width = size.width;
        width = attrs.get_or("min-width", width).max(width);
        width = attrs.get_or("max-width", width).min(width);
        let mut height = size.height;
        height = attrs.get_or("min-height", height).max(height);
        height = attrs.get_or("max-height", height).min(height);

        let bounds = Rect::from_origin_size(n.bounds.origin(), Size::new(width, height));
        if bounds == n.bounds {
            return;
        }
        let moved = bounds.origin() != n.bounds.origin();
        n.bounds = bounds;
        self.invalidate_child_bounds(id);
        if moved {
            self.mutations.push(Mutation::Moved {
                node: id,
                position: bounds.origin(),
            });
        }
        self.mutations.push(Mutation::Resized { node: id, bounds });
    }

    /// Set position and size in one step.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.set_position(id, bounds.origin());
        self.set_size(id, bounds.size());
    }

    /// Position of a node's origin in screen coordinates.
    ///
    /// Positions accumulate up the parent chain; a root's screen position is
    /// its own position.
    pub fn screen_position(&self, id: NodeId) -> Option<Point> {
        let node = self.node_opt(id)?;
        let mut pos = node.bounds.origin();
        let mut current = node.parent;
        while let Some(p) = current {
            let parent = self.node(p);
            pos += parent.bounds.origin().to_vec2();
            current = parent.parent;
        }
        Some(pos)
    }

    /// Center of a node in screen coordinates.
    pub fn screen_center_position(&self, id: NodeId) -> Option<Point> {
        let center = self.center_position(id)?;
        Some(self.parent_to_screen(id, center))
    }

    /// Convert a point in the node's local space to screen space.
    pub fn local_to_screen(&self, id: NodeId, local: Point) -> Option<Point> {
        self.screen_position(id).map(|s| local + s.to_vec2())
    }

    /// Convert a screen point to the node's local space.
    pub fn screen_to_local(&self, id: NodeId, screen: Point) -> Option<Point> {
        self.screen_position(id).map(|s| screen - s.to_vec2())
    }

    /// Convert a point in the node's parent space to screen space.
    pub fn parent_to_screen(&self, id: NodeId, point: Point) -> Point {
        match self.parent_of(id).and_then(|p| self.screen_position(p)) {
            Some(origin) => point + origin.to_vec2(),
            None => point,
        }
    }

    /// Convert a screen point to the node's parent space.
    pub fn screen_to_parent(&self, id: NodeId, screen: Point) -> Point {
        match self.parent_of(id).and_then(|p| self.screen_position(p)) {
            Some(origin) => screen - origin.to_vec2(),
            None => screen,
        }
    }

    /// Union of all children's total bounds, in the node's local space.
    ///
    /// The value is cached and recomputed lazily after any geometry change in
    /// the subtree. Returns `None` for stale ids and childless nodes.
    pub fn child_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        if node.children.is_empty() {
            return None;
        }
        if let Some(cached) = node.child_bounds.get() {
            return Some(cached);
        }
        let mut union: Option<Rect> = None;
        for &child in &node.children {
            if let Some(total) = self.total_bounds(child) {
                union = Some(union.map_or(total, |u| u.union(total)));
            }
        }
        node.child_bounds.set(union);
        union
    }

    /// A node's own bounds grown to include its children, in parent space.
    pub fn total_bounds(&self, id: NodeId) -> Option<Rect> {
        let bounds = self.bounds(id)?;
        Some(match self.child_bounds(id) {
            Some(children) => bounds.union(children + bounds.origin().to_vec2()),
            None => bounds,
        })
    }

    // --- hit testing ---

    /// Test a point in parent space against the node's own hit shape.
    pub fn hit_test(&self, id: NodeId, parent_point: Point) -> bool {
        self.node_opt(id)
            .is_some_and(|node| node.hit_shape.contains(node.bounds, parent_point))
    }

    /// Gate for descending into children: the local point must fall inside
    /// the union of the children's bounds.
    pub fn child_hit_test(&self, id: NodeId, local_point: Point) -> bool {
        self.child_bounds(id)
            .is_some_and(|bounds| bounds.contains(local_point))
    }

    /// Find the deepest, topmost enabled and visible node under a point.
    ///
    /// `point` is in `id`'s parent space. Children are tested front to back
    /// (reverse insertion order) and win over the node itself; the node is
    /// only returned when no descendant claims the point and its own shape
    /// contains it. Disabled or hidden nodes exclude their whole subtree.
    pub fn recursive_hit_test(&self, id: NodeId, point: Point) -> Option<NodeId> {
        let node = self.node_opt(id)?;
        if !node.is_active() {
            return None;
        }
        let local = point - node.bounds.origin().to_vec2();
        if !node.children.is_empty() && self.child_hit_test(id, local) {
            for &child in node.children.iter().rev() {
                if let Some(target) = self.recursive_hit_test(child, local) {
                    return Some(target);
                }
            }
        }
        self.hit_test(id, point).then_some(id)
    }

    // --- attributes ---

    /// Returns `true` if the node has an attribute named `key`.
    pub fn has_attribute(&self, id: NodeId, key: &str) -> bool {
        self.node_opt(id)
            .is_some_and(|node| node.attributes.contains(key))
    }

    /// Strict typed read.
    ///
    /// Fails with [`TreeError::InvalidAttributeKey`] when the key is missing
    /// or holds another type.
    pub fn attribute<T: FromAttribute>(&self, id: NodeId, key: &str) -> Result<T, TreeError> {
        let node = self.node_opt(id).ok_or(TreeError::StaleNode(id))?;
        node.attributes
            .get_as(key)
            .ok_or_else(|| TreeError::InvalidAttributeKey(String::from(key)))
    }

    /// Typed read falling back to `default` for missing or mistyped values.
    pub fn attribute_or<T: FromAttribute>(&self, id: NodeId, key: &str, default: T) -> T {
        match self.node_opt(id) {
            Some(node) => node.attributes.get_or(key, default),
            None => default,
        }
    }

    /// All attributes of a live node.
    pub fn attributes(&self, id: NodeId) -> Option<&Attributes> {
        self.node_opt(id).map(|node| &node.attributes)
    }

    /// Set an attribute.
    ///
    /// Attributes feed the parent's layout, so the parent's layout is invalidated.
    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: impl Into<AttributeValue>) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        n.attributes.set(key, value.into());
        let parent = n.parent;
        if let Some(p) = parent {
            self.invalidate_child_bounds(p);
        }
        self.mutations.push(Mutation::AttributeSet {
            node: id,
            key: String::from(key),
        });
    }

    /// Remove an attribute. Records a mutation even if the key was absent.
    pub fn clear_attribute(&mut self, id: NodeId, key: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        n.attributes.remove(key);
        let parent = n.parent;
        if let Some(p) = parent {
            self.invalidate_child_bounds(p);
        }
        self.mutations.push(Mutation::AttributeCleared {
            node: id,
            key: String::from(key),
        });
    }

    // --- layout ---

    /// Install a layout strategy on a node, returning the previous one.
    pub fn set_layout(&mut self, id: NodeId, layout: Box<dyn Layout>) -> Option<Box<dyn Layout>> {
        let n = self.node_opt_mut(id)?;
        let old = n.layout.replace(layout);
        self.invalidate_child_bounds(id);
        old
    }

    /// Remove a node's layout strategy.
    pub fn remove_layout(&mut self, id: NodeId) -> Option<Box<dyn Layout>> {
        self.node_opt_mut(id)?.layout.take()
    }

    /// Returns `true` if the node has a layout strategy installed.
    pub fn has_layout(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|node| node.layout.is_some())
    }

    /// Returns `true` if the node's layout is waiting to run.
    pub fn needs_layout(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|node| node.layout_dirty)
    }

    /// Run pending layouts in the subtree rooted at `id`, children first.
    ///
    /// Children of disabled or hidden nodes are skipped; the node's own
    /// layout still runs.
    pub fn update_layouts(&mut self, id: NodeId) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        if node.is_active() {
            let children: SmallVec<[NodeId; 16]> = node.children.iter().copied().collect();
            for child in children {
                self.update_layouts(child);
            }
        }
        self.run_layout(id);
    }

    /// Run a node's layout if it is dirty. Returns `true` if it was dirty.
    ///
    /// The layout is detached from the node while it runs, so it cannot
    /// re-enter itself.
    pub fn run_layout(&mut self, id: NodeId) -> bool {
        let Some(n) = self.node_opt_mut(id) else {
            return false;
        };
        if !n.layout_dirty {
            return false;
        }
        if let Some(mut layout) = n.layout.take() {
            layout.arrange(self, id);
            if let Some(n) = self.node_opt_mut(id)
                && n.layout.is_none()
            {
                n.layout = Some(layout);
            }
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.layout_dirty = false;
        }
        true
    }

    // --- internals ---

    /// Drop the cached child bounds of `id` and every ancestor, and mark their layouts dirty.
    fn invalidate_child_bounds(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(n) = current {
            let node = self.node_mut(n);
            node.child_bounds.set(None);
            node.layout_dirty = true;
            current = node.parent;
        }
    }

    fn reorder(&mut self, parent: NodeId, child: NodeId, old_index: usize, new_index: usize) {
        if old_index == new_index {
            return;
        }
        let children = &mut self.node_mut(parent).children;
        let moved = children.remove(old_index);
        children.insert(new_index, moved);
        self.invalidate_child_bounds(parent);
        self.mutations.push(Mutation::Reordered {
            parent,
            child,
            old_index,
            new_index,
        });
    }

    fn live_parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleNode(id));
        }
        Ok(self.node(id).parent)
    }

    fn has_flag(&self, id: NodeId, flag: NodeFlags) -> bool {
        self.node_opt(id)
            .is_some_and(|node| node.flags.contains(flag))
    }

    /// Returns `true` if the flag changed.
    fn set_flag(&mut self, id: NodeId, flag: NodeFlags, value: bool) -> bool {
        match self.node_opt_mut(id) {
            Some(n) if n.flags.contains(flag) != value => {
                n.flags.set(flag, value);
                true
            }
            _ => false,
        }
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        if pos > 0 {
            siblings.get(pos - 1).copied()
        } else {
            None
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn desc(id: &str, x: f64, y: f64, w: f64, h: f64) -> ElementDesc {
        ElementDesc::new(id, x, y, w, h)
    }

    /// root (0,0 200x200) with two overlapping children a, b at (10,10 50x50).
    fn overlapping() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 200.0, 200.0));
        let a = tree.insert(Some(root), desc("a", 10.0, 10.0, 50.0, 50.0)).unwrap();
        let b = tree.insert(Some(root), desc("b", 10.0, 10.0, 50.0, 50.0)).unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn later_child_wins_overlap() {
        let (mut tree, root, a, b) = overlapping();
        assert_eq!(tree.recursive_hit_test(root, Point::new(20.0, 20.0)), Some(b));

        // Shrink b so only a covers the lower-right corner.
        tree.set_size(b, Size::new(20.0, 20.0));
        assert_eq!(tree.recursive_hit_test(root, Point::new(50.0, 50.0)), Some(a));
        assert_eq!(tree.recursive_hit_test(root, Point::new(15.0, 15.0)), Some(b));
    }

    #[test]
    fn parent_hits_itself_inside_child_region_without_child_hit() {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 100.0, 100.0));
        // Two children leave a gap between them; the gap lies inside the child union.
        tree.insert(Some(root), desc("l", 0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.insert(Some(root), desc("r", 50.0, 50.0, 10.0, 10.0)).unwrap();
        assert_eq!(
            tree.child_bounds(root),
            Some(Rect::new(0.0, 0.0, 60.0, 60.0))
        );
        assert_eq!(tree.recursive_hit_test(root, Point::new(30.0, 30.0)), Some(root));
        assert_eq!(tree.recursive_hit_test(root, Point::new(150.0, 150.0)), None);
    }

    #[test]
    fn disabled_and_hidden_exclude_subtree() {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 100.0, 100.0));
        let panel = tree.insert(Some(root), desc("panel", 10.0, 10.0, 50.0, 50.0)).unwrap();
        let button = tree.insert(Some(panel), desc("button", 5.0, 5.0, 10.0, 10.0)).unwrap();
        let p = Point::new(17.0, 17.0);
        assert_eq!(tree.recursive_hit_test(root, p), Some(button));

        tree.set_enabled(panel, false);
        assert_eq!(tree.recursive_hit_test(root, p), Some(root));
        tree.set_enabled(panel, true);
        assert_eq!(tree.recursive_hit_test(root, p), Some(button));

        tree.set_hidden(button, true);
        assert_eq!(tree.recursive_hit_test(root, p), Some(panel));
        tree.set_hidden(button, false);
        assert_eq!(tree.recursive_hit_test(root, p), Some(button));

        tree.set_hidden(root, true);
        assert_eq!(tree.recursive_hit_test(root, p), None);
    }

    #[test]
    fn nested_points_are_local() {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 500.0, 500.0));
        let outer = tree.insert(Some(root), desc("outer", 100.0, 100.0, 200.0, 200.0)).unwrap();
        let inner = tree.insert(Some(outer), desc("inner", 50.0, 50.0, 20.0, 20.0)).unwrap();
        assert_eq!(tree.recursive_hit_test(root, Point::new(155.0, 155.0)), Some(inner));
        assert_eq!(tree.recursive_hit_test(root, Point::new(105.0, 105.0)), Some(outer));
        assert_eq!(tree.screen_position(inner), Some(Point::new(150.0, 150.0)));
        assert_eq!(
            tree.screen_to_local(inner, Point::new(155.0, 160.0)),
            Some(Point::new(5.0, 10.0))
        );
        assert_eq!(
            tree.local_to_screen(inner, Point::new(5.0, 10.0)),
            Some(Point::new(155.0, 160.0))
        );
        assert_eq!(
            tree.parent_to_screen(inner, Point::new(50.0, 50.0)),
            Point::new(150.0, 150.0)
        );
        assert_eq!(
            tree.screen_to_parent(inner, Point::new(150.0, 150.0)),
            Point::new(50.0, 50.0)
        );
        assert_eq!(
            tree.screen_center_position(inner),
            Some(Point::new(160.0, 160.0))
        );
        assert_eq!(tree.parent_to_screen(root, Point::new(1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn child_bounds_follow_descendant_changes() {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 100.0, 100.0));
        let mid = tree.insert(Some(root), desc("mid", 10.0, 10.0, 10.0, 10.0)).unwrap();
        let leaf = tree.insert(Some(mid), desc("leaf", 0.0, 0.0, 5.0, 5.0)).unwrap();
        assert_eq!(
            tree.child_bounds(root),
            Some(Rect::new(10.0, 10.0, 20.0, 20.0))
        );

        tree.set_position(leaf, Point::new(40.0, 0.0));
        let expected = Rect::new(10.0, 10.0, 55.0, 20.0);
        assert_eq!(tree.child_bounds(root), Some(expected));
        // Repeated queries without mutation are stable.
        assert_eq!(tree.child_bounds(root), Some(expected));

        tree.set_size(leaf, Size::new(5.0, 30.0));
        assert_eq!(
            tree.child_bounds(root),
            Some(Rect::new(10.0, 10.0, 55.0, 40.0))
        );
        assert_eq!(tree.total_bounds(root), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn add_child_reparents_and_records() {
        let mut tree = Tree::new();
        let a = tree.create(desc("a", 0.0, 0.0, 10.0, 10.0));
        let b = tree.create(desc("b", 0.0, 0.0, 10.0, 10.0));
        let c = tree.create(desc("c", 0.0, 0.0, 10.0, 10.0));
        tree.add_child(a, c).unwrap();
        tree.add_child(b, c).unwrap();
        assert_eq!(tree.parent_of(c), Some(b));
        assert!(tree.children_of(a).is_empty());
        assert_eq!(
            tree.take_mutations(),
            vec![
                Mutation::ChildAdded {
                    parent: a,
                    child: c,
                    siblings: vec![],
                },
                Mutation::ChildRemoved {
                    parent: a,
                    child: c,
                    siblings: vec![],
                },
                Mutation::ChildAdded {
                    parent: b,
                    child: c,
                    siblings: vec![],
                },
            ]
        );
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = Tree::new();
        let a = tree.create(desc("a", 0.0, 0.0, 10.0, 10.0));
        let b = tree.insert(Some(a), desc("b", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let c = tree.insert(Some(b), desc("c", 0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(
            tree.add_child(c, a),
            Err(TreeError::WouldCycle { parent: c, child: a })
        );
        assert_eq!(
            tree.add_child(a, a),
            Err(TreeError::WouldCycle { parent: a, child: a })
        );
        assert_eq!(tree.parent_of(a), None);
    }

    #[test]
    fn remove_child_returns_live_detached_subtree() {
        let (mut tree, root, a, b) = overlapping();
        let leaf = tree.insert(Some(a), desc("leaf", 0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(tree.remove_child(root, a), Ok(a));
        assert!(tree.is_alive(a));
        assert_eq!(tree.parent_of(a), None);
        assert_eq!(tree.root_of(leaf), Some(a));
        assert_eq!(tree.children_of(root), &[b]);
        assert_eq!(
            tree.remove_child(root, a),
            Err(TreeError::NotAChild { parent: root, child: a })
        );
    }

    #[test]
    fn destroy_frees_subtree() {
        let (mut tree, root, a, b) = overlapping();
        let leaf = tree.insert(Some(a), desc("leaf", 0.0, 0.0, 1.0, 1.0)).unwrap();
        tree.take_mutations();
        tree.destroy(a).unwrap();
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(leaf));
        let muts = tree.take_mutations();
        assert_eq!(
            muts[0],
            Mutation::ChildRemoved {
                parent: root,
                child: a,
                siblings: vec![b],
            }
        );
        assert!(muts.contains(&Mutation::Destroyed { node: a }));
        assert!(muts.contains(&Mutation::Destroyed { node: leaf }));
        assert_eq!(tree.destroy(a), Err(TreeError::StaleNode(a)));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 1.0, 1.0));
        let a = tree.insert(Some(root), desc("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        tree.destroy(a).unwrap();
        assert!(!tree.is_alive(a));

        let b = tree.insert(Some(root), desc("b", 0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn reorder_moves_and_reports_indices() {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 10.0, 10.0));
        let a = tree.insert(Some(root), desc("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        let b = tree.insert(Some(root), desc("b", 0.0, 0.0, 1.0, 1.0)).unwrap();
        let c = tree.insert(Some(root), desc("c", 0.0, 0.0, 1.0, 1.0)).unwrap();
        tree.take_mutations();

        tree.move_child_to_front(root, a).unwrap();
        assert_eq!(tree.children_of(root), &[b, c, a]);
        tree.move_child_backward(root, a).unwrap();
        assert_eq!(tree.children_of(root), &[b, a, c]);
        tree.move_to_back(a).unwrap();
        assert_eq!(tree.children_of(root), &[a, b, c]);
        tree.move_forward(a).unwrap();
        assert_eq!(tree.children_of(root), &[b, a, c]);
        tree.move_child_to_index(root, b, 99).unwrap();
        assert_eq!(tree.children_of(root), &[a, c, b]);

        let muts = tree.take_mutations();
        assert_eq!(muts.len(), 5);
        assert_eq!(
            muts[0],
            Mutation::Reordered {
                parent: root,
                child: a,
                old_index: 0,
                new_index: 2
            }
        );
    }

    #[test]
    fn reorder_at_extreme_is_silent() {
        let (mut tree, root, a, b) = overlapping();
        tree.take_mutations();
        tree.move_child_to_front(root, b).unwrap();
        tree.move_child_forward(root, b).unwrap();
        tree.move_child_to_back(root, a).unwrap();
        tree.move_child_backward(root, a).unwrap();
        assert!(!tree.has_pending_mutations());

        let stray = tree.create(desc("stray", 0.0, 0.0, 1.0, 1.0));
        assert_eq!(
            tree.move_child_to_front(root, stray),
            Err(TreeError::NotAChild { parent: root, child: stray })
        );
        // Detached nodes have nowhere to move.
        assert_eq!(tree.move_to_front(stray), Ok(()));
    }

    #[test]
    fn set_size_respects_attribute_limits() {
        let mut tree = Tree::new();
        let n = tree.create(desc("n", 0.0, 0.0, 10.0, 10.0));
        tree.set_attribute(n, "min-width", 20.0);
        tree.set_attribute(n, "max-height", 5_i64);
        tree.set_size(n, Size::new(10.0, 10.0));
        assert_eq!(tree.size(n), Some(Size::new(20.0, 5.0)));
    }

    #[test]
    fn negative_size_flips_around_origin() {
        let mut tree = Tree::new();
        let n = tree.create(desc("n", 10.0, 10.0, 10.0, 10.0));
        tree.take_mutations();
        tree.set_size(n, Size::new(-4.0, 10.0));
        assert_eq!(tree.bounds(n), Some(Rect::new(6.0, 10.0, 10.0, 20.0)));
        let muts = tree.take_mutations();
        assert!(matches!(muts[0], Mutation::Moved { .. }));
        assert!(matches!(muts[1], Mutation::Resized { .. }));
    }

    #[test]
    fn geometry_mutations_only_on_change() {
        let mut tree = Tree::new();
        let n = tree.create(desc("n", 0.0, 0.0, 10.0, 10.0));
        tree.set_position(n, Point::ZERO);
        tree.set_size(n, Size::new(10.0, 10.0));
        tree.set_enabled(n, true);
        assert!(!tree.has_pending_mutations());
        tree.set_center_position(n, Point::new(50.0, 50.0));
        assert_eq!(tree.position(n), Some(Point::new(45.0, 45.0)));
        assert_eq!(
            tree.take_mutations(),
            vec![Mutation::Moved {
                node: n,
                position: Point::new(45.0, 45.0)
            }]
        );
    }

    #[test]
    fn strict_attribute_reads() {
        let mut tree = Tree::new();
        let n = tree.create(desc("n", 0.0, 0.0, 10.0, 10.0));
        tree.set_attribute(n, "position", "absolute");
        assert_eq!(
            tree.attribute::<String>(n, "position").as_deref(),
            Ok("absolute")
        );
        assert_eq!(
            tree.attribute::<f64>(n, "position"),
            Err(TreeError::InvalidAttributeKey(String::from("position")))
        );
        assert_eq!(tree.attribute_or(n, "left", 3.0), 3.0);
        tree.clear_attribute(n, "position");
        assert!(!tree.has_attribute(n, "position"));
    }

    #[test]
    fn typed_and_id_queries() {
        const BUTTON: ElementKind = ElementKind(7);
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 10.0, 10.0));
        let a = tree
            .insert(Some(root), desc("ok", 0.0, 0.0, 1.0, 1.0).with_kind(BUTTON))
            .unwrap();
        let b = tree.insert(Some(root), desc("label", 0.0, 0.0, 1.0, 1.0)).unwrap();
        let c = tree
            .insert(Some(root), desc("ok", 0.0, 0.0, 1.0, 1.0).with_kind(BUTTON))
            .unwrap();
        assert_eq!(tree.children_of_kind(root, BUTTON), vec![a, c]);
        assert_eq!(tree.siblings_of_kind(a, BUTTON), vec![c]);
        assert_eq!(tree.find_first_child_by_id(root, "ok"), Some(a));
        assert_eq!(tree.find_children_by_id(root, "ok"), vec![a, c]);
        assert_eq!(tree.siblings_of(b), vec![a, c]);
        assert_eq!(tree.num_siblings(b), 2);
        assert!(tree.is_sibling(a, b));
        assert!(tree.is_child(root, b));
        assert_eq!(tree.depth(b), 1);
    }

    #[test]
    fn depth_first_traversal() {
        let mut tree = Tree::new();
        let root = tree.create(desc("root", 0.0, 0.0, 10.0, 10.0));
        let a = tree.insert(Some(root), desc("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        let a1 = tree.insert(Some(a), desc("a1", 0.0, 0.0, 1.0, 1.0)).unwrap();
        let b = tree.insert(Some(root), desc("b", 0.0, 0.0, 1.0, 1.0)).unwrap();

        let mut order = vec![root];
        let mut cur = root;
        while let Some(next) = tree.next_depth_first(cur) {
            order.push(next);
            cur = next;
        }
        assert_eq!(order, vec![root, a, a1, b]);
        assert_eq!(tree.prev_depth_first(b), Some(a1));
        assert_eq!(tree.prev_depth_first(a1), Some(a));
        assert_eq!(tree.prev_depth_first(root), None);
    }

    #[test]
    fn effective_activity_checks_ancestors() {
        let (mut tree, root, a, _b) = overlapping();
        assert!(tree.is_effectively_active(a));
        tree.set_hidden(root, true);
        assert!(!tree.is_effectively_active(a));
    }
}
