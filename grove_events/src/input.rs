// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input payloads delivered by the host.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Vec2};

use crate::types::EventType;

/// Identifier of an active pointer (a mouse, a touch contact, a pen).
pub type PointerId = u64;

/// Milliseconds on the host's clock.
pub type Timestamp = u64;

/// Kind of device behind a pointer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A mouse or trackpad.
    #[default]
    Mouse,
    /// A touch contact.
    Touch,
    /// A stylus.
    Pen,
}

impl DeviceKind {
    /// Whether the device reports position without contact.
    pub fn can_hover(self) -> bool {
        matches!(self, Self::Mouse)
    }
}

bitflags::bitflags! {
    /// Pressed buttons or active contacts.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// Left mouse button, touch contact, or pen tip.
        const PRIMARY   = 0b0000_0001;
        /// Right mouse button or pen barrel button.
        const SECONDARY = 0b0000_0010;
        /// Middle mouse button.
        const AUXILIARY = 0b0000_0100;
        /// Back button.
        const BACK      = 0b0000_1000;
        /// Forward button.
        const FORWARD   = 0b0001_0000;
        /// Pen eraser.
        const ERASER    = 0b0010_0000;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during an input.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0001;
        /// Control.
        const CONTROL = 0b0010;
        /// Alt or Option.
        const ALT     = 0b0100;
        /// Command, Windows, or Super.
        const META    = 0b1000;
    }
}

/// What a pointer input reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Button pressed or contact made.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or contact lifted.
    Up,
    /// The platform cancelled the pointer.
    Cancel,
    /// Scroll wheel or gesture.
    Scroll,
}

/// One pointer sample from the host, in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer identifier.
    pub pointer_id: PointerId,
    /// Device behind the pointer.
    pub device: DeviceKind,
    /// What happened.
    pub action: PointerAction,
    /// Screen-space position.
    pub position: Point,
    /// Buttons or contacts active after this sample.
    pub buttons: Buttons,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Click count for down/up (1 for single, 2 for double, ...).
    pub press_count: u32,
    /// Scroll amount for [`PointerAction::Scroll`].
    pub scroll_delta: Vec2,
    /// Host timestamp.
    pub timestamp: Timestamp,
    /// Whether the device can hover. Defaults from [`DeviceKind::can_hover`].
    pub can_hover: bool,
}

impl PointerInput {
    /// A sample with no buttons, no modifiers, and hover capability derived from `device`.
    ///
    /// A [`PointerAction::Down`] sample starts with [`Buttons::PRIMARY`] pressed.
    pub fn new(
        pointer_id: PointerId,
        device: DeviceKind,
        action: PointerAction,
        position: Point,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            pointer_id,
            device,
            action,
            position,
            buttons: if action == PointerAction::Down {
                Buttons::PRIMARY
            } else {
                Buttons::empty()
            },
            modifiers: Modifiers::empty(),
            press_count: u32::from(matches!(action, PointerAction::Down | PointerAction::Up)),
            scroll_delta: Vec2::ZERO,
            timestamp,
            can_hover: device.can_hover(),
        }
    }

    /// Mouse sample shorthand.
    pub fn mouse(action: PointerAction, position: Point, timestamp: Timestamp) -> Self {
        Self::new(0, DeviceKind::Mouse, action, position, timestamp)
    }

    /// Builder-style buttons setter.
    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Builder-style modifiers setter.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Builder-style press count setter.
    pub fn with_press_count(mut self, press_count: u32) -> Self {
        self.press_count = press_count;
        self
    }

    /// Builder-style scroll delta setter.
    pub fn with_scroll_delta(mut self, delta: Vec2) -> Self {
        self.scroll_delta = delta;
        self
    }

    /// Builder-style hover capability override.
    pub fn with_can_hover(mut self, can_hover: bool) -> Self {
        self.can_hover = can_hover;
        self
    }

    /// Event type this sample is dispatched as.
    pub fn event_type(&self) -> EventType {
        match self.action {
            PointerAction::Down => EventType::PointerDown,
            PointerAction::Move => EventType::PointerMove,
            PointerAction::Up => EventType::PointerUp,
            PointerAction::Cancel => EventType::PointerCancel,
            PointerAction::Scroll => EventType::PointerScroll,
        }
    }

    /// Returns `true` for samples that end a press (up or cancel).
    pub fn is_release(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::Cancel)
    }
}

/// Key press or release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key pressed (possibly auto-repeated).
    Down,
    /// Key released.
    Up,
}

/// Raw platform key sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    /// Press or release.
    pub action: KeyAction,
    /// Platform key code.
    pub key_code: u32,
    /// Platform scan code.
    pub scan_code: u32,
    /// Character produced, if any.
    pub codepoint: Option<char>,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Auto-repeat.
    pub repeat: bool,
    /// Host timestamp.
    pub timestamp: Timestamp,
}

impl KeyInput {
    /// A sample with no modifiers and no scan code.
    pub fn new(
        action: KeyAction,
        key_code: u32,
        codepoint: Option<char>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            action,
            key_code,
            scan_code: 0,
            codepoint,
            modifiers: Modifiers::empty(),
            repeat: false,
            timestamp,
        }
    }

    /// Builder-style modifiers setter.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Event type this sample is dispatched as.
    pub fn event_type(&self) -> EventType {
        match self.action {
            KeyAction::Down => EventType::KeyDown,
            KeyAction::Up => EventType::KeyUp,
        }
    }
}

/// Files dragged over the surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileDrag {
    /// Screen-space drop position.
    pub position: Point,
    /// Paths of the dragged files.
    pub files: Vec<String>,
    /// Host timestamp.
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_starts_with_primary_pressed() {
        let down = PointerInput::new(3, DeviceKind::Touch, PointerAction::Down, Point::ZERO, 5);
        assert_eq!(down.buttons, Buttons::PRIMARY);
        assert!(!down.can_hover);
        assert_eq!(down.press_count, 1);
        let mv = PointerInput::mouse(PointerAction::Move, Point::ZERO, 6);
        assert!(mv.buttons.is_empty());
        assert!(mv.can_hover);
        assert_eq!(mv.press_count, 0);
        assert_eq!(mv.event_type(), EventType::PointerMove);
    }
}
