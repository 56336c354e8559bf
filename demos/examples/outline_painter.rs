// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame lifecycle with a text painter.
//!
//! Builds a toolbar laid out by `BoxLayout`, gives one button a behavior
//! that counts frames, and prints the painted outline after each frame.
//!
//! Run:
//! - `cargo run -p grove_demos --example outline_painter`

use grove_document::{Behavior, Document, DocumentConfig, Painter};
use grove_tree::{BoxLayout, ElementDesc, NodeId};
use kurbo::{Point, Size, Vec2};

/// Prints one indented line per painted element.
struct Outline<'a> {
    doc: &'a Document,
    origin: Vec<Point>,
}

impl Painter for Outline<'_> {
    fn push_translation(&mut self, offset: Vec2) {
        let base = self.origin.last().copied().unwrap_or(Point::ZERO);
        self.origin.push(base + offset);
    }

    fn pop_translation(&mut self) {
        self.origin.pop();
    }

    fn element(&mut self, node: NodeId, size: Size) {
        let at = self.origin.last().copied().unwrap_or(Point::ZERO);
        let id = self.doc.tree().element_id(node).unwrap_or("?");
        let indent = "  ".repeat(self.origin.len().saturating_sub(1));
        println!(
            "{indent}{id} at ({}, {}) size {}x{}",
            at.x, at.y, size.width, size.height
        );
    }
}

/// Grows its node a little every frame.
#[derive(Default)]
struct Pulse {
    frames: u32,
}

impl Behavior for Pulse {
    fn update(&mut self, doc: &mut Document, node: NodeId) {
        self.frames += 1;
        let width = 40.0 + f64::from(self.frames) * 10.0;
        doc.tree_mut().set_size(node, Size::new(width, 24.0));
    }
}

fn main() {
    let mut doc = Document::new(DocumentConfig::default(), Size::new(320.0, 240.0));
    let root = doc.root();
    let toolbar = doc
        .insert(root, ElementDesc::new("toolbar", 8.0, 8.0, 0.0, 0.0))
        .unwrap();
    for id in ["open", "save", "share"] {
        doc.insert(toolbar, ElementDesc::new(id, 0.0, 0.0, 48.0, 24.0))
            .unwrap();
    }
    doc.tree_mut().set_layout(toolbar, Box::new(BoxLayout::default()));
    let save = doc.tree().find_first_child_by_id(toolbar, "save").unwrap();
    doc.set_behavior(save, Box::new(Pulse::default())).unwrap();

    doc.setup().unwrap();
    for frame in 0..2 {
        doc.update().unwrap();
        println!("frame {frame}");
        doc.draw(&mut Outline {
            doc: &doc,
            origin: Vec::new(),
        });
    }

    doc.window_resized(Size::new(640.0, 480.0)).unwrap();
    println!("after resize: {:?}", doc.bounds());
    doc.exit().unwrap();
}
