// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus and key routing.

use alloc::vec::Vec;
use grove_events::dispatcher;
use grove_events::{Event, EventDetail, EventType, KeyInput};
use grove_tree::NodeId;

use crate::config::WrapMode;
use crate::document::Document;
use crate::error::DomError;

impl Document {
    /// The focused element, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus to `node`.
    ///
    /// Returns `Ok(false)` if `node` is not focusable, or is disabled or
    /// hidden (itself or through an ancestor). Fails with
    /// [`DomError::InvalidState`] if `node` is not in this document.
    pub fn focus(&mut self, node: NodeId) -> Result<bool, DomError> {
        if !self.contains(node) {
            return Err(DomError::invalid_state("focus target is not in this document"));
        }
        if !self.can_focus(node) {
            return Ok(false);
        }
        if self.focused != Some(node) {
            self.change_focus(Some(node))?;
        }
        Ok(true)
    }

    /// Clear focus.
    pub fn blur(&mut self) -> Result<(), DomError> {
        if self.focused.is_some() {
            self.change_focus(None)?;
        }
        Ok(())
    }

    /// Focus the next focusable element in depth-first order.
    ///
    /// Starts from the first element when nothing is focused. Returns the
    /// newly focused element.
    pub fn focus_next(&mut self) -> Result<Option<NodeId>, DomError> {
        let order = self.focus_order();
        let next = match self.focused.and_then(|f| order.iter().position(|n| *n == f)) {
            Some(i) if i + 1 < order.len() => Some(order[i + 1]),
            Some(_) if self.config.focus_wrap == WrapMode::Never => None,
            _ => order.first().copied(),
        };
        self.focus_step(next)
    }

    /// Focus the previous focusable element in depth-first order.
    ///
    /// Starts from the last element when nothing is focused.
    pub fn focus_previous(&mut self) -> Result<Option<NodeId>, DomError> {
        let order = self.focus_order();
        let prev = match self.focused.and_then(|f| order.iter().position(|n| *n == f)) {
            Some(i) if i > 0 => Some(order[i - 1]),
            Some(_) if self.config.focus_wrap == WrapMode::Never => None,
            _ => order.last().copied(),
        };
        self.focus_step(prev)
    }

    fn focus_step(&mut self, next: Option<NodeId>) -> Result<Option<NodeId>, DomError> {
        match next {
            Some(node) => {
                self.focus(node)?;
                Ok(Some(node))
            }
            None => Ok(None),
        }
    }

    /// Focusable, enabled, visible elements in depth-first order.
    fn focus_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(self.root);
        while let Some(node) = cur {
            if self.can_focus(node) {
                out.push(node);
            }
            cur = self.tree.next_depth_first(node);
        }
        out
    }

    fn can_focus(&self, node: NodeId) -> bool {
        self.tree.is_focusable(node) && self.tree.is_effectively_active(node)
    }

    /// Click-to-focus: focus the nearest focusable ancestor-or-self, or blur.
    pub(crate) fn focus_from_pointer(&mut self, target: NodeId) -> Result<(), DomError> {
        let mut cur = Some(target);
        while let Some(node) = cur {
            if self.can_focus(node) {
                self.focus(node)?;
                return Ok(());
            }
            cur = self.tree.parent_of(node);
        }
        self.blur()
    }

    /// Blur then focusout on the old element, focus then focusin on the new one.
    fn change_focus(&mut self, new: Option<NodeId>) -> Result<(), DomError> {
        let old = self.focused;
        log::debug!("focus {old:?} -> {new:?}");
        if let Some(old) = old {
            self.tree.set_focused(old, false);
        }
        if let Some(new) = new {
            self.tree.set_focused(new, true);
        }
        self.focused = new;

        if let Some(old) = old.filter(|n| self.tree.is_alive(*n)) {
            self.focus_event(EventType::Blur, old, new)?;
            self.focus_event(EventType::FocusOut, old, new)?;
        }
        if let Some(new) = new.filter(|n| self.tree.is_alive(*n)) {
            self.focus_event(EventType::Focus, new, old)?;
            self.focus_event(EventType::FocusIn, new, old)?;
        }
        Ok(())
    }

    fn focus_event(
        &mut self,
        event_type: EventType,
        target: NodeId,
        related: Option<NodeId>,
    ) -> Result<(), DomError> {
        let mut event = Event::new(event_type, target, self.clock).with_related_target(related);
        dispatcher::dispatch(self, &mut event)?;
        Ok(())
    }

    /// Route a key sample to the focused element, or the root if nothing has focus.
    ///
    /// Returns `true` if a focused element received it.
    pub fn on_key_event(&mut self, input: KeyInput) -> Result<bool, DomError> {
        self.flush()?;
        self.clock = input.timestamp;
        let focused = self.focused.filter(|f| self.contains(*f));
        let target = focused.unwrap_or(self.root);
        let mut event = Event::new(input.event_type(), target, input.timestamp)
            .with_detail(EventDetail::Key(input));
        dispatcher::dispatch(self, &mut event)?;
        Ok(focused.is_some())
    }
}
