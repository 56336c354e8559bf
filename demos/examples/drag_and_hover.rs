// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing: hover transitions, implicit capture, and dragging.
//!
//! A card opts into implicit capture. Pressing on it captures the pointer,
//! so the drag keeps reaching the card even when the pointer races past its
//! edge onto a neighbouring drop zone.
//!
//! Run:
//! - `cargo run -p grove_demos --example drag_and_hover`

use std::cell::RefCell;
use std::rc::Rc;

use grove_document::{Document, DocumentConfig};
use grove_events::{Buttons, EventType, PointerAction, PointerInput};
use grove_tree::ElementDesc;
use kurbo::{Point, Size};

fn main() {
    let mut doc = Document::new(DocumentConfig::default(), Size::new(400.0, 200.0));
    let root = doc.root();
    let card = doc
        .insert(root, ElementDesc::new("card", 20.0, 20.0, 80.0, 60.0))
        .unwrap();
    let zone = doc
        .insert(root, ElementDesc::new("zone", 200.0, 20.0, 150.0, 150.0))
        .unwrap();
    doc.tree_mut().set_implicit_capture(card, true);

    let trace = Rc::new(RefCell::new(Vec::new()));
    for (node, name) in [(card, "card"), (zone, "zone")] {
        for ty in [
            EventType::PointerOver,
            EventType::PointerOut,
            EventType::PointerEnter,
            EventType::PointerLeave,
            EventType::GotPointerCapture,
            EventType::LostPointerCapture,
        ] {
            let trace = trace.clone();
            doc.add_event_listener(node, ty, false, move |_, e| {
                if e.is_target(node) {
                    trace.borrow_mut().push(format!("{name}: {}", e.event_type()));
                }
            })
            .unwrap();
        }
    }

    // Drag the card by the captured pointer's offset.
    doc.add_event_listener(card, EventType::PointerMove, false, move |doc, _| {
        let Some(grab) = doc.captured_pointer(0) else {
            return;
        };
        let origin = grab.position() - grab.offset();
        doc.mutate(|tree| tree.set_position(card, origin)).unwrap();
    })
    .unwrap();

    let samples = [
        (PointerAction::Move, 30.0, 30.0),
        (PointerAction::Down, 30.0, 30.0),
        (PointerAction::Move, 150.0, 40.0),
        (PointerAction::Move, 260.0, 60.0),
        (PointerAction::Up, 260.0, 60.0),
        (PointerAction::Move, 300.0, 150.0),
    ];
    for (ts, (action, x, y)) in samples.into_iter().enumerate() {
        let mut input = PointerInput::mouse(action, Point::new(x, y), ts as u64 * 16);
        if action == PointerAction::Move && doc.captured_pointer(0).is_some() {
            input = input.with_buttons(Buttons::PRIMARY);
        }
        let handled = doc.on_pointer_event(input).unwrap();
        println!("{action:?} at ({x}, {y}) handled={handled}");
        for line in trace.borrow_mut().drain(..) {
            println!("  {line}");
        }
    }

    println!("card ends at {:?}", doc.tree().position(card).unwrap());
}
