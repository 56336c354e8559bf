// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable layout strategies.
//!
//! A [`Layout`] is owned by one node and arranges that node's direct
//! children. The tree runs it lazily from [`Tree::update_layouts`] once the
//! node's geometry has been invalidated; while it runs it is detached from
//! its node, so setting child positions from inside `arrange` is safe.

use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::tree::Tree;
use crate::types::NodeId;

/// Arranges the children of a single owner node.
pub trait Layout: core::fmt::Debug {
    /// Position the owner's children and, if the strategy wants, resize the owner.
    fn arrange(&mut self, tree: &mut Tree, owner: NodeId);
}

fn children(tree: &Tree, owner: NodeId) -> SmallVec<[NodeId; 16]> {
    tree.children_of(owner).iter().copied().collect()
}

/// Vertical flow driven by child attributes.
///
/// Children with `position: "absolute"` are placed at their `left`/`top`
/// attributes and take no space in the flow. Every other child is
/// `"static"`: it is stacked below the previous static child using its
/// `width`/`height` attributes (falling back to its current size), clamped by
/// `min-*`/`max-*`. The owner is resized to the widest static child and the
/// total stacked height.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlowLayout;

impl Layout for FlowLayout {
    fn arrange(&mut self, tree: &mut Tree, owner: NodeId) {
        let mut total_width = 0.0_f64;
        let mut y = 0.0_f64;
        for child in children(tree, owner) {
            let position: alloc::string::String =
                tree.attribute_or(child, "position", "static".into());
            if position == "absolute" {
                let left = tree.attribute_or(child, "left", 0.0);
                let top = tree.attribute_or(child, "top", 0.0);
                tree.set_position(child, Point::new(left, top));
                continue;
            }
            let size = tree.size(child).unwrap_or(Size::ZERO);
            let mut width = tree.attribute_or(child, "width", size.width);
            width = tree.attribute_or(child, "min-width", width).max(width);
            width = tree.attribute_or(child, "max-width", width).min(width);
            let mut height = tree.attribute_or(child, "height", size.height);
            height = tree.attribute_or(child, "min-height", height).max(height);
            height = tree.attribute_or(child, "max-height", height).min(height);

            tree.set_position(child, Point::new(0.0, y));
            total_width = total_width.max(width);
            y += height;
        }
        log::trace!("flow layout {owner:?}: {total_width}x{y}");
        tree.set_size(owner, Size::new(total_width, y));
    }
}

/// Axis along which [`BoxLayout`] packs children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Packs children edge to edge by their actual size.
///
/// ```rust
/// use kurbo::{Point, Size};
/// use grove_tree::{BoxLayout, ElementDesc, Orientation, Tree};
///
/// let mut tree = Tree::new();
/// let row = tree.create(ElementDesc::new("row", 0.0, 0.0, 0.0, 0.0));
/// let a = tree.insert(Some(row), ElementDesc::new("a", 0.0, 0.0, 10.0, 5.0)).unwrap();
/// let b = tree.insert(Some(row), ElementDesc::new("b", 0.0, 0.0, 20.0, 8.0)).unwrap();
/// tree.set_layout(row, Box::new(BoxLayout::new(Orientation::Horizontal)));
/// tree.update_layouts(row);
///
/// assert_eq!(tree.position(b), Some(Point::new(10.0, 0.0)));
/// assert_eq!(tree.size(row), Some(Size::new(30.0, 8.0)));
/// # let _ = a;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxLayout {
    orientation: Orientation,
}

impl BoxLayout {
    /// Create a box layout packing along `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Packing axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl Layout for BoxLayout {
    fn arrange(&mut self, tree: &mut Tree, owner: NodeId) {
        let mut cursor = Point::ZERO;
        let mut extent = Size::ZERO;
        for child in children(tree, owner) {
            tree.set_position(child, cursor);
            let size = tree.size(child).unwrap_or(Size::ZERO);
            match self.orientation {
                Orientation::Horizontal => {
                    cursor.x += size.width;
                    extent = Size::new(cursor.x, extent.height.max(size.height));
                }
                Orientation::Vertical => {
                    cursor.y += size.height;
                    extent = Size::new(extent.width.max(size.width), cursor.y);
                }
            }
        }
        tree.set_size(owner, extent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementDesc;
    use alloc::boxed::Box;

    #[test]
    fn flow_stacks_static_and_places_absolute() {
        let mut tree = Tree::new();
        let owner = tree.create(ElementDesc::new("owner", 5.0, 5.0, 1.0, 1.0));
        let a = tree.insert(Some(owner), ElementDesc::new("a", 9.0, 9.0, 40.0, 10.0)).unwrap();
        let b = tree.insert(Some(owner), ElementDesc::new("b", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let abs = tree
            .insert(Some(owner), ElementDesc::new("abs", 0.0, 0.0, 500.0, 500.0))
            .unwrap();
        tree.set_attribute(b, "height", 25.0);
        tree.set_attribute(b, "min-width", 60.0);
        tree.set_attribute(abs, "position", "absolute");
        tree.set_attribute(abs, "left", 70_i64);
        tree.set_attribute(abs, "top", 3.0);

        tree.set_layout(owner, Box::new(FlowLayout));
        assert!(tree.needs_layout(owner));
        tree.update_layouts(owner);

        assert_eq!(tree.position(a), Some(Point::new(0.0, 0.0)));
        assert_eq!(tree.position(b), Some(Point::new(0.0, 10.0)));
        assert_eq!(tree.position(abs), Some(Point::new(70.0, 3.0)));
        assert_eq!(tree.size(owner), Some(Size::new(60.0, 35.0)));
        assert_eq!(tree.position(owner), Some(Point::new(5.0, 5.0)));
        assert!(!tree.needs_layout(owner));
        assert!(tree.has_layout(owner));
    }

    #[test]
    fn vertical_box_packs_by_height() {
        let mut tree = Tree::new();
        let col = tree.create(ElementDesc::new("col", 0.0, 0.0, 0.0, 0.0));
        let a = tree.insert(Some(col), ElementDesc::new("a", 3.0, 3.0, 10.0, 5.0)).unwrap();
        let b = tree.insert(Some(col), ElementDesc::new("b", 3.0, 3.0, 20.0, 8.0)).unwrap();
        tree.set_layout(col, Box::new(BoxLayout::new(Orientation::Vertical)));
        tree.update_layouts(col);
        assert_eq!(tree.position(a), Some(Point::ZERO));
        assert_eq!(tree.position(b), Some(Point::new(0.0, 5.0)));
        assert_eq!(tree.size(col), Some(Size::new(20.0, 13.0)));
    }

    #[test]
    fn layouts_rerun_after_child_change() {
        let mut tree = Tree::new();
        let root = tree.create(ElementDesc::new("root", 0.0, 0.0, 100.0, 100.0));
        let row = tree.insert(Some(root), ElementDesc::new("row", 0.0, 0.0, 0.0, 0.0)).unwrap();
        let a = tree.insert(Some(row), ElementDesc::new("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = tree.insert(Some(row), ElementDesc::new("b", 0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.set_layout(row, Box::new(BoxLayout::default()));
        tree.update_layouts(root);
        assert_eq!(tree.position(b), Some(Point::new(10.0, 0.0)));

        tree.set_size(a, Size::new(30.0, 10.0));
        assert!(tree.needs_layout(row));
        tree.update_layouts(root);
        assert_eq!(tree.position(b), Some(Point::new(30.0, 0.0)));
        assert_eq!(tree.size(row), Some(Size::new(40.0, 10.0)));
    }
}
