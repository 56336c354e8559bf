// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event type tags, classes, and dispatch phases.

/// Dispatch phase of an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not being dispatched.
    #[default]
    None,
    /// Travelling from the root towards the target.
    Capturing,
    /// Delivered at the target itself.
    AtTarget,
    /// Travelling from the target's parent back to the root.
    Bubbling,
}

/// Broad family of an event, used to check that a channel and an event agree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// Pointer input and hover transitions.
    Pointer,
    /// Got/lost pointer capture.
    PointerCapture,
    /// Key down/up.
    Keyboard,
    /// Focus changes.
    Focus,
    /// Tree structure, geometry, attribute, and flag changes.
    Structural,
    /// Host file drag-and-drop.
    DragDrop,
    /// Host-defined events.
    Custom,
}

/// Type tag of an event.
///
/// Every built-in type has a channel on every node. [`EventType::Custom`]
/// types must be registered on a node before they can be dispatched to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EventType {
    /// Pointer moved onto a node.
    PointerOver,
    /// Pointer entered a node or one of its descendants.
    PointerEnter,
    /// Button pressed or contact made.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Button released or contact lifted.
    PointerUp,
    /// The platform cancelled the pointer.
    PointerCancel,
    /// Pointer moved off a node.
    PointerOut,
    /// Pointer left a node and all of its descendants.
    PointerLeave,
    /// Wheel or trackpad scroll.
    PointerScroll,
    /// A node captured a pointer.
    GotPointerCapture,
    /// A node lost a pointer capture.
    LostPointerCapture,
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Node gained focus.
    Focus,
    /// Node lost focus.
    Blur,
    /// Node is about to gain focus.
    FocusIn,
    /// Node is about to lose focus.
    FocusOut,
    /// Node was attached to a parent.
    AddedTo,
    /// Node was detached from its parent.
    RemovedFrom,
    /// Node moved within its parent's child order.
    Reordered,
    /// A child was attached.
    ChildAdded,
    /// A child was detached.
    ChildRemoved,
    /// A child moved within the child order.
    ChildReordered,
    /// A sibling was attached.
    SiblingAdded,
    /// A sibling was detached.
    SiblingRemoved,
    /// A sibling moved within the child order.
    SiblingReordered,
    /// Node position changed.
    Move,
    /// Node size changed.
    Resize,
    /// An attribute was set.
    AttributeSet,
    /// An attribute was cleared.
    AttributeCleared,
    /// Enabled flag changed.
    Enabled,
    /// Hidden flag changed.
    Hidden,
    /// Locked flag changed.
    Locked,
    /// Files dragged over or dropped on a node.
    DragDrop,
    /// Host-defined type.
    Custom(&'static str),
}

impl EventType {
    /// Every built-in type, in declaration order.
    pub const BUILTIN: [Self; 34] = [
        Self::PointerOver,
        Self::PointerEnter,
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::PointerCancel,
        Self::PointerOut,
        Self::PointerLeave,
        Self::PointerScroll,
        Self::GotPointerCapture,
        Self::LostPointerCapture,
        Self::KeyDown,
        Self::KeyUp,
        Self::Focus,
        Self::Blur,
        Self::FocusIn,
        Self::FocusOut,
        Self::AddedTo,
        Self::RemovedFrom,
        Self::Reordered,
        Self::ChildAdded,
        Self::ChildRemoved,
        Self::ChildReordered,
        Self::SiblingAdded,
        Self::SiblingRemoved,
        Self::SiblingReordered,
        Self::Move,
        Self::Resize,
        Self::AttributeSet,
        Self::AttributeCleared,
        Self::Enabled,
        Self::Hidden,
        Self::Locked,
        Self::DragDrop,
    ];

    /// DOM-style name of the type.
    pub fn name(&self) -> &'static str {
        match *self {
            Self::PointerOver => "pointerover",
            Self::PointerEnter => "pointerenter",
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerCancel => "pointercancel",
            Self::PointerOut => "pointerout",
            Self::PointerLeave => "pointerleave",
            Self::PointerScroll => "pointerscroll",
            Self::GotPointerCapture => "gotpointercapture",
            Self::LostPointerCapture => "lostpointercapture",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
            Self::AddedTo => "addedto",
            Self::RemovedFrom => "removedfrom",
            Self::Reordered => "reordered",
            Self::ChildAdded => "childadded",
            Self::ChildRemoved => "childremoved",
            Self::ChildReordered => "childreordered",
            Self::SiblingAdded => "siblingadded",
            Self::SiblingRemoved => "siblingremoved",
            Self::SiblingReordered => "siblingreordered",
            Self::Move => "move",
            Self::Resize => "resize",
            Self::AttributeSet => "attributeset",
            Self::AttributeCleared => "attributecleared",
            Self::Enabled => "enabled",
            Self::Hidden => "hidden",
            Self::Locked => "locked",
            Self::DragDrop => "dragdrop",
            Self::Custom(name) => name,
        }
    }

    /// Returns `true` for every type except [`EventType::Custom`].
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Class of a built-in type; `None` for custom types, whose class is
    /// chosen at registration.
    pub fn builtin_class(&self) -> Option<EventClass> {
        Some(match self {
            Self::PointerOver
            | Self::PointerEnter
            | Self::PointerDown
            | Self::PointerMove
            | Self::PointerUp
            | Self::PointerCancel
            | Self::PointerOut
            | Self::PointerLeave
            | Self::PointerScroll => EventClass::Pointer,
            Self::GotPointerCapture | Self::LostPointerCapture => EventClass::PointerCapture,
            Self::KeyDown | Self::KeyUp => EventClass::Keyboard,
            Self::Focus | Self::Blur | Self::FocusIn | Self::FocusOut => EventClass::Focus,
            Self::DragDrop => EventClass::DragDrop,
            Self::Custom(_) => return None,
            _ => EventClass::Structural,
        })
    }

    /// Default bubbling behavior.
    ///
    /// Enter/leave and focus/blur never bubble; structural notifications are
    /// delivered at the target only.
    pub fn default_bubbles(&self) -> bool {
        match self {
            Self::PointerEnter | Self::PointerLeave | Self::Focus | Self::Blur => false,
            Self::Custom(_) => true,
            _ => !matches!(self.builtin_class(), Some(EventClass::Structural)),
        }
    }

    /// Default cancelability.
    pub fn default_cancelable(&self) -> bool {
        match self {
            Self::PointerEnter
            | Self::PointerLeave
            | Self::PointerCancel
            | Self::GotPointerCapture
            | Self::LostPointerCapture
            | Self::Focus
            | Self::Blur => false,
            Self::Custom(_) => true,
            _ => !matches!(self.builtin_class(), Some(EventClass::Structural)),
        }
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_flags_match_dom_conventions() {
        assert!(EventType::PointerDown.default_bubbles());
        assert!(EventType::PointerDown.default_cancelable());
        assert!(!EventType::PointerEnter.default_bubbles());
        assert!(!EventType::PointerLeave.default_cancelable());
        assert!(EventType::PointerOut.default_bubbles());
        assert!(EventType::GotPointerCapture.default_bubbles());
        assert!(!EventType::GotPointerCapture.default_cancelable());
        assert!(EventType::FocusIn.default_bubbles());
        assert!(!EventType::Blur.default_bubbles());
        assert!(!EventType::ChildAdded.default_bubbles());
        assert!(!EventType::Resize.default_cancelable());
    }

    #[test]
    fn builtin_list_covers_every_non_custom_type() {
        for ty in EventType::BUILTIN {
            assert!(ty.is_builtin());
            assert!(ty.builtin_class().is_some());
        }
        assert_eq!(EventType::Custom("tap").builtin_class(), None);
        assert_eq!(EventType::Custom("tap").name(), "tap");
    }
}
