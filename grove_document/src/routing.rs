// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing and pointer capture.
//!
//! Per pointer id the document is either *free* (events go to whatever is
//! hit, with over/out/enter/leave synthesized as the hit target changes) or
//! *captured* (events go straight to the capturing element, whatever is
//! under the pointer). An up or cancel returns a captured pointer to free.

use grove_events::dispatcher;
use grove_events::{
    Event, EventDetail, EventType, FileDrag, PointerAction, PointerId, PointerInput,
};
use grove_pointer::CapturedPointer;
use grove_tree::NodeId;

use crate::document::Document;
use crate::error::DomError;

impl Document {
    /// Route one pointer sample from the host.
    ///
    /// Returns `true` if an element received the event: the capturing
    /// element, or the element under the pointer.
    pub fn on_pointer_event(&mut self, input: PointerInput) -> Result<bool, DomError> {
        self.flush()?;
        self.clock = input.timestamp;
        let id = input.pointer_id;
        self.pointers.record_input(input.clone());

        if let Some(owner) = self.pointers.capture_target(id) {
            if self.contains(owner) {
                self.route_captured(owner, &input)?;
                self.finish_pointer(&input)?;
                return Ok(true);
            }
            log::warn!("pointer {id}: capturing {owner:?} is no longer in the document");
            self.pointers.release(id);
        }

        let hit = self.element_at(input.position);
        let last = self.pointers.active_target(id);
        log::trace!("pointer {id} {:?}: hit {hit:?}, last {last:?}", input.action);
        if hit != last {
            self.transition(id, last, hit, &input)?;
        }

        let mut handled = false;
        if let Some(target) = hit.filter(|t| self.contains(*t)) {
            if input.action == PointerAction::Down {
                if self.config.focus_on_pointer_down {
                    self.focus_from_pointer(target)?;
                }
                // An implicit capture takes the down itself through the capture path.
                if self.tree.implicit_capture(target)
                    && self.contains(target)
                    && self.set_pointer_capture(target, id)?
                {
                    self.route_captured(target, &input)?;
                    self.finish_pointer(&input)?;
                    return Ok(true);
                }
            }
            if self.contains(target) {
                let mut event = Event::pointer(input.event_type(), target, input.clone());
                dispatcher::dispatch(self, &mut event)?;
                handled = true;
            }
        }
        self.finish_pointer(&input)?;
        Ok(handled)
    }

    fn route_captured(&mut self, owner: NodeId, input: &PointerInput) -> Result<(), DomError> {
        let id = input.pointer_id;
        if let Some(record) = self.pointers.captured_mut(id) {
            record.update(input.position, input.timestamp);
        }
        log::trace!("pointer {id} {:?}: captured by {owner:?}", input.action);
        let mut event = Event::pointer(input.event_type(), owner, input.clone());
        dispatcher::dispatch_at_target(self, owner, &mut event)?;
        // Listeners may have released the capture or destroyed the captor.
        if input.is_release() && self.pointers.capture_target(id) == Some(owner) {
            self.release_pointer_capture(owner, id)?;
        }
        Ok(())
    }

    /// Synthesize out/leave on `from` and over/enter on `to`, then make `to`
    /// the pointer's active target.
    fn transition(
        &mut self,
        id: PointerId,
        from: Option<NodeId>,
        to: Option<NodeId>,
        input: &PointerInput,
    ) -> Result<(), DomError> {
        if let Some(from) = from.filter(|n| self.tree.is_alive(*n)) {
            log::trace!("pointer {id}: out/leave {from:?}");
            let mut out = Event::pointer(EventType::PointerOut, from, input.clone())
                .with_related_target(to);
            dispatcher::dispatch_at_target(self, from, &mut out)?;
            let mut leave = Event::pointer(EventType::PointerLeave, from, input.clone())
                .with_related_target(to)
                .with_bubbles(false);
            dispatcher::dispatch(self, &mut leave)?;
        }
        if let Some(to) = to.filter(|n| self.tree.is_alive(*n)) {
            log::trace!("pointer {id}: over/enter {to:?}");
            let mut over = Event::pointer(EventType::PointerOver, to, input.clone())
                .with_related_target(from);
            dispatcher::dispatch_at_target(self, to, &mut over)?;
            let mut enter = Event::pointer(EventType::PointerEnter, to, input.clone())
                .with_related_target(from)
                .with_bubbles(false);
            dispatcher::dispatch(self, &mut enter)?;
        }
        self.pointers.set_active_target(id, to);
        Ok(())
    }

    /// Drop bookkeeping for pointers that cannot hover once they lift.
    fn finish_pointer(&mut self, input: &PointerInput) -> Result<(), DomError> {
        if !self.config.release_non_hover_pointers || input.can_hover || !input.is_release() {
            return Ok(());
        }
        let id = input.pointer_id;
        if let Some(last) = self.pointers.active_target(id) {
            self.transition(id, Some(last), None, input)?;
        }
        self.pointers.forget(id);
        Ok(())
    }

    /// Bind pointer `id` to `element` until it is released.
    ///
    /// Fails with [`DomError::InvalidState`] if `element` is not in this
    /// document and with [`DomError::InvalidPointerId`] if the pointer is not
    /// active. Returns `Ok(false)` without changing anything if the pointer
    /// has no pressed buttons or is already captured; captures are never stolen.
    /// On success dispatches a got-capture event to `element`.
    pub fn set_pointer_capture(
        &mut self,
        element: NodeId,
        id: PointerId,
    ) -> Result<bool, DomError> {
        if !self.contains(element) {
            return Err(DomError::invalid_state("capture element is not in this document"));
        }
        let input = self
            .pointers
            .last_input(id)
            .ok_or(DomError::InvalidPointerId(id))?
            .clone();
        if input.buttons.is_empty() {
            log::debug!("pointer {id}: no buttons pressed, capture ignored");
            return Ok(false);
        }
        if let Some(owner) = self.pointers.capture_target(id) {
            log::debug!("pointer {id}: already captured by {owner:?}");
            return Ok(false);
        }
        let origin = self.tree.screen_position(element).unwrap_or_default();
        let record = CapturedPointer::new(id, element, input.position, origin, input.timestamp);
        self.pointers.capture(record);
        let mut event = Event::pointer(EventType::GotPointerCapture, element, input);
        dispatcher::dispatch(self, &mut event)?;
        Ok(true)
    }

    /// Release `element`'s capture of pointer `id`.
    ///
    /// Fails with [`DomError::InvalidState`] if `element` is not alive and
    /// with [`DomError::InvalidPointerId`] if the pointer is not active.
    /// Returns `Ok(false)` if `element` does not hold the capture. On success
    /// dispatches a lost-capture event to `element`.
    pub fn release_pointer_capture(
        &mut self,
        element: NodeId,
        id: PointerId,
    ) -> Result<bool, DomError> {
        if !self.tree.is_alive(element) {
            return Err(DomError::invalid_state("capture element is not alive"));
        }
        let Some(input) = self.pointers.last_input(id).cloned() else {
            return Err(DomError::InvalidPointerId(id));
        };
        if self.pointers.capture_target(id) != Some(element) {
            return Ok(false);
        }
        self.pointers.release(id);
        let mut event = Event::pointer(EventType::LostPointerCapture, element, input);
        dispatcher::dispatch(self, &mut event)?;
        Ok(true)
    }

    /// Returns `true` if `element` holds the capture of pointer `id`.
    pub fn has_pointer_capture(&self, element: NodeId, id: PointerId) -> bool {
        self.pointers.capture_target(id) == Some(element)
    }

    /// Capture record of pointer `id`.
    pub fn captured_pointer(&self, id: PointerId) -> Option<&CapturedPointer<NodeId>> {
        self.pointers.captured(id)
    }

    /// Element last hit-tested under pointer `id`.
    pub fn active_target(&self, id: PointerId) -> Option<NodeId> {
        self.pointers.active_target(id)
    }

    /// Route a host file drag to the element under it.
    ///
    /// Returns `true` if an element was hit.
    pub fn on_file_drag(&mut self, drag: FileDrag) -> Result<bool, DomError> {
        self.flush()?;
        self.clock = drag.timestamp;
        let Some(target) = self.element_at(drag.position) else {
            return Ok(false);
        };
        let mut event = Event::new(EventType::DragDrop, target, drag.timestamp)
            .with_detail(EventDetail::Drag(drag));
        dispatcher::dispatch(self, &mut event)?;
        Ok(true)
    }
}
