// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event record carried through a dispatch.

use alloc::string::String;
use kurbo::{Point, Rect};

use crate::input::{FileDrag, KeyInput, PointerInput, Timestamp};
use crate::types::{EventClass, EventType, Phase};

/// Payload specific to an event's type.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EventDetail {
    /// No payload.
    #[default]
    None,
    /// Pointer sample that caused or was synthesized for the event.
    Pointer(PointerInput),
    /// Key sample.
    Key(KeyInput),
    /// Dragged files.
    Drag(FileDrag),
    /// Reorder indices within the parent.
    Reorder {
        /// Index before the move.
        old_index: usize,
        /// Index after the move.
        new_index: usize,
    },
    /// New parent-space position.
    Move(Point),
    /// New parent-space bounds.
    Resize(Rect),
    /// Attribute key that changed.
    Attribute(String),
    /// New value of a toggled flag.
    Toggle(bool),
}

/// An event travelling through a tree of nodes keyed by `K`.
///
/// Events are created per dispatch and discarded afterwards. Listeners see
/// `&mut Event` and may stop propagation or prevent the default action;
/// both only take effect on cancelable events.
#[derive(Clone, Debug)]
pub struct Event<K> {
    event_type: EventType,
    class: EventClass,
    source: Option<K>,
    target: Option<K>,
    current_target: Option<K>,
    related_target: Option<K>,
    phase: Phase,
    bubbles: bool,
    cancelable: bool,
    cancelled: bool,
    immediate_stopped: bool,
    default_prevented: bool,
    timestamp: Timestamp,
    detail: EventDetail,
}

impl<K: Copy + PartialEq> Event<K> {
    /// A built-in event aimed at `target` with its type's default flags.
    ///
    /// For [`EventType::Custom`] types the class defaults to
    /// [`EventClass::Custom`]; use [`Event::with_class`] to pick another.
    pub fn new(event_type: EventType, target: K, timestamp: Timestamp) -> Self {
        Self {
            event_type,
            class: event_type.builtin_class().unwrap_or(EventClass::Custom),
            source: Some(target),
            target: Some(target),
            current_target: None,
            related_target: None,
            phase: Phase::None,
            bubbles: event_type.default_bubbles(),
            cancelable: event_type.default_cancelable(),
            cancelled: false,
            immediate_stopped: false,
            default_prevented: false,
            timestamp,
            detail: EventDetail::None,
        }
    }

    /// A pointer event built from a host sample.
    pub fn pointer(event_type: EventType, target: K, input: PointerInput) -> Self {
        Self::new(event_type, target, input.timestamp).with_detail(EventDetail::Pointer(input))
    }

    /// Builder-style source setter.
    pub fn with_source(mut self, source: Option<K>) -> Self {
        self.source = source;
        self
    }

    /// Builder-style related target setter.
    pub fn with_related_target(mut self, related: Option<K>) -> Self {
        self.related_target = related;
        self
    }

    /// Builder-style bubbling override.
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Builder-style cancelability override.
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Builder-style class override, for custom events.
    pub fn with_class(mut self, class: EventClass) -> Self {
        self.class = class;
        self
    }

    /// Builder-style payload setter.
    pub fn with_detail(mut self, detail: EventDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Type tag.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Event class.
    pub fn class(&self) -> EventClass {
        self.class
    }

    /// Node that originated the event.
    pub fn source(&self) -> Option<K> {
        self.source
    }

    /// Node the event is aimed at.
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// Node whose listeners are currently running.
    pub fn current_target(&self) -> Option<K> {
        self.current_target
    }

    /// Secondary node: the node left for over/enter, the node entered for
    /// out/leave, the other side of a focus change, the affected child or
    /// sibling for structural notifications.
    pub fn related_target(&self) -> Option<K> {
        self.related_target
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the event runs a bubble pass.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether listeners can stop it or prevent its default.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Returns `true` once propagation has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Returns `true` once immediate propagation has been stopped.
    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_stopped
    }

    /// Returns `true` if a listener prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Host timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Type-specific payload.
    pub fn detail(&self) -> &EventDetail {
        &self.detail
    }

    /// Pointer sample, for pointer and capture events.
    pub fn pointer_input(&self) -> Option<&PointerInput> {
        match &self.detail {
            EventDetail::Pointer(input) => Some(input),
            _ => None,
        }
    }

    /// Key sample, for keyboard events.
    pub fn key_input(&self) -> Option<&KeyInput> {
        match &self.detail {
            EventDetail::Key(input) => Some(input),
            _ => None,
        }
    }

    /// Stop after the listeners of the current node.
    pub fn stop_propagation(&mut self) {
        if self.cancelable {
            self.cancelled = true;
        }
    }

    /// Stop now, skipping the current node's remaining listeners as well.
    pub fn stop_immediate_propagation(&mut self) {
        if self.cancelable {
            self.cancelled = true;
            self.immediate_stopped = true;
        }
    }

    /// Ask the host to skip its default action.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_current_target(&mut self, node: K) {
        self.current_target = Some(node);
    }

    /// Returns `true` if this event's target is `node`.
    pub fn is_target(&self, node: K) -> bool {
        self.target == Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_cancelable_events_ignore_stop_and_prevent() {
        let mut ev: Event<u32> = Event::new(EventType::PointerEnter, 1, 0);
        ev.stop_propagation();
        ev.stop_immediate_propagation();
        ev.prevent_default();
        assert!(!ev.is_cancelled());
        assert!(!ev.is_immediate_propagation_stopped());
        assert!(!ev.default_prevented());
    }

    #[test]
    fn immediate_stop_implies_stop() {
        let mut ev: Event<u32> = Event::new(EventType::PointerDown, 1, 0);
        ev.stop_immediate_propagation();
        assert!(ev.is_cancelled());
        assert!(ev.is_immediate_propagation_stopped());
    }

    #[test]
    fn custom_events_default_to_custom_class() {
        let ev: Event<u32> = Event::new(EventType::Custom("tap"), 1, 0);
        assert_eq!(ev.class(), EventClass::Custom);
        assert!(ev.bubbles());
        let ev = ev.with_class(EventClass::Pointer);
        assert_eq!(ev.class(), EventClass::Pointer);
    }
}
