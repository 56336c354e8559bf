// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, kinds, and hit shapes.

use alloc::string::String;
use kurbo::{Ellipse, Point, Rect, RoundedRect, Shape};

/// Identifier for a node in the tree (generational).
///
/// A `NodeId` stays valid until the node is destroyed. Once its slot is reused
/// the generation moves forward, so stale ids never alias a newer node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node takes part in hit testing, updates, and drawing.
        const ENABLED          = 0b0000_0001;
        /// Node (and its subtree) is hidden: not hit, not updated, not drawn.
        const HIDDEN           = 0b0000_0010;
        /// Node is locked against user manipulation. Purely informational for the tree.
        const LOCKED           = 0b0000_0100;
        /// Node can receive keyboard focus.
        const FOCUSABLE        = 0b0000_1000;
        /// Node currently holds keyboard focus.
        const FOCUSED          = 0b0001_0000;
        /// A pointer down that hits this node captures the pointer to it.
        const IMPLICIT_CAPTURE = 0b0010_0000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::ENABLED
    }
}

/// Small tag describing what sort of element a node is.
///
/// Hosts assign their own values; the tree only compares them, which keeps
/// typed child queries such as [`Tree::children_of_kind`](crate::Tree::children_of_kind)
/// free of runtime type identification.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementKind(pub u32);

impl ElementKind {
    /// A plain element with no particular role.
    pub const GENERIC: Self = Self(0);
    /// The tree root owned by a document.
    pub const DOCUMENT: Self = Self(1);
}

/// Shape used by a node's own hit test.
///
/// The shape is always fitted to the node's bounds in parent space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum HitShape {
    /// Axis-aligned bounds (half-open, see [`Rect::contains`]).
    #[default]
    Bounds,
    /// Bounds with uniformly rounded corners.
    RoundedRect(f64),
    /// Ellipse inscribed in the bounds.
    Ellipse,
    /// Never hits itself. Children are still tested.
    Transparent,
}

impl HitShape {
    /// Returns `true` if `point` (in the same space as `bounds`) hits this shape.
    pub fn contains(&self, bounds: Rect, point: Point) -> bool {
        match *self {
            Self::Bounds => bounds.contains(point),
            Self::RoundedRect(radius) => {
                bounds.contains(point) && RoundedRect::from_rect(bounds, radius).contains(point)
            }
            Self::Ellipse => bounds.contains(point) && Ellipse::from_rect(bounds).contains(point),
            Self::Transparent => false,
        }
    }
}

/// Construction data for a node.
#[derive(Clone, Debug)]
pub struct ElementDesc {
    /// Host-facing string id. Not required to be unique.
    pub id: String,
    /// Position and size in parent coordinates.
    pub bounds: Rect,
    /// Initial state flags.
    pub flags: NodeFlags,
    /// Kind tag for typed queries.
    pub kind: ElementKind,
    /// Shape used by the node's own hit test.
    pub hit_shape: HitShape,
}

impl Default for ElementDesc {
    fn default() -> Self {
        Self {
            id: String::new(),
            bounds: Rect::ZERO,
            flags: NodeFlags::default(),
            kind: ElementKind::GENERIC,
            hit_shape: HitShape::default(),
        }
    }
}

impl ElementDesc {
    /// Describe an element with an id and a parent-space rectangle at `(x, y)`
    /// of size `width × height`.
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            bounds: Rect::new(x, y, x + width, y + height).abs(),
            ..Self::default()
        }
    }

    /// Builder-style kind setter.
    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder-style flags setter.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder-style hit shape setter.
    pub fn with_hit_shape(mut self, hit_shape: HitShape) -> Self {
        self.hit_shape = hit_shape;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_rejects_corners() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(HitShape::Ellipse.contains(bounds, Point::new(50.0, 25.0)));
        assert!(!HitShape::Ellipse.contains(bounds, Point::new(2.0, 2.0)));
        assert!(HitShape::Bounds.contains(bounds, Point::new(2.0, 2.0)));
    }

    #[test]
    fn transparent_never_hits() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!HitShape::Transparent.contains(bounds, Point::new(5.0, 5.0)));
    }

    #[test]
    fn desc_standardizes_negative_sizes() {
        let desc = ElementDesc::new("a", 10.0, 10.0, -5.0, 5.0);
        assert_eq!(desc.bounds, Rect::new(5.0, 10.0, 10.0, 15.0));
    }
}
