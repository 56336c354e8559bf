// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-document pointer bookkeeping.
//!
//! Three maps keyed by [`PointerId`]:
//!
//! - capture: the element bound to a pointer, with its [`CapturedPointer`] record;
//! - active target: the element last hit-tested under a pointer;
//! - last input: the latest sample seen for a pointer.
//!
//! A pointer is *active* while it has a last input. Every change to these
//! maps goes through [`PointerTable`]'s methods, so capture, release, and
//! subtree purges cannot drift apart.

use alloc::vec::Vec;
use grove_events::{PointerId, PointerInput};
use hashbrown::HashMap;

use crate::captured::CapturedPointer;

/// Pointer state owned by one document. `K` is the element key.
#[derive(Clone, Debug)]
pub struct PointerTable<K> {
    captures: HashMap<PointerId, CapturedPointer<K>>,
    active_targets: HashMap<PointerId, K>,
    last_inputs: HashMap<PointerId, PointerInput>,
}

impl<K> Default for PointerTable<K> {
    fn default() -> Self {
        Self {
            captures: HashMap::new(),
            active_targets: HashMap::new(),
            last_inputs: HashMap::new(),
        }
    }
}

/// Entries removed by [`PointerTable::purge`].
#[derive(Clone, Debug, PartialEq)]
pub struct Purged<K> {
    /// Captures that were dropped.
    pub captures: Vec<CapturedPointer<K>>,
    /// Active targets that were cleared, with their pointer.
    pub active_targets: Vec<(PointerId, K)>,
}

impl<K> Purged<K> {
    /// Returns `true` if nothing was removed.
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty() && self.active_targets.is_empty()
    }
}

impl<K: Copy + PartialEq + core::fmt::Debug> PointerTable<K> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `input` as the latest sample for its pointer, returning the previous one.
    pub fn record_input(&mut self, input: PointerInput) -> Option<PointerInput> {
        self.last_inputs.insert(input.pointer_id, input)
    }

    /// Latest sample for a pointer.
    pub fn last_input(&self, id: PointerId) -> Option<&PointerInput> {
        self.last_inputs.get(&id)
    }

    /// Returns `true` if the pointer has been seen and not forgotten.
    pub fn is_active(&self, id: PointerId) -> bool {
        self.last_inputs.contains_key(&id)
    }

    /// Ids of every active pointer, in no particular order.
    pub fn active_pointers(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.last_inputs.keys().copied()
    }

    /// Element last hit-tested under a pointer.
    pub fn active_target(&self, id: PointerId) -> Option<K> {
        self.active_targets.get(&id).copied()
    }

    /// Replace the active target of a pointer, returning the previous one.
    pub fn set_active_target(&mut self, id: PointerId, target: Option<K>) -> Option<K> {
        match target {
            Some(t) => self.active_targets.insert(id, t),
            None => self.active_targets.remove(&id),
        }
    }

    /// Element holding a pointer's capture.
    pub fn capture_target(&self, id: PointerId) -> Option<K> {
        self.captures.get(&id).map(CapturedPointer::element)
    }

    /// Capture record of a pointer.
    pub fn captured(&self, id: PointerId) -> Option<&CapturedPointer<K>> {
        self.captures.get(&id)
    }

    /// Mutable capture record of a pointer.
    pub fn captured_mut(&mut self, id: PointerId) -> Option<&mut CapturedPointer<K>> {
        self.captures.get_mut(&id)
    }

    /// Capture records held by `element`.
    pub fn captures_of(&self, element: K) -> impl Iterator<Item = &CapturedPointer<K>> + '_ {
        self.captures.values().filter(move |c| c.element() == element)
    }

    /// Install a capture. Returns `false` and changes nothing if the pointer
    /// is already captured.
    pub fn capture(&mut self, record: CapturedPointer<K>) -> bool {
        let id = record.pointer_id();
        if self.captures.contains_key(&id) {
            return false;
        }
        log::debug!("pointer {id} captured by {:?}", record.element());
        self.captures.insert(id, record);
        true
    }

    /// Drop a pointer's capture, returning its record.
    pub fn release(&mut self, id: PointerId) -> Option<CapturedPointer<K>> {
        let record = self.captures.remove(&id)?;
        log::debug!("pointer {id} released by {:?}", record.element());
        Some(record)
    }

    /// Forget everything about a pointer except its capture.
    ///
    /// Used for devices that cannot hover once their contact lifts.
    pub fn forget(&mut self, id: PointerId) {
        self.active_targets.remove(&id);
        self.last_inputs.remove(&id);
    }

    /// Drop every capture and active target whose element satisfies `doomed`.
    pub fn purge(&mut self, mut doomed: impl FnMut(K) -> bool) -> Purged<K> {
        let mut captures = Vec::new();
        self.captures.retain(|_, c| {
            if doomed(c.element()) {
                captures.push(c.clone());
                false
            } else {
                true
            }
        });
        let mut active_targets = Vec::new();
        self.active_targets.retain(|id, t| {
            if doomed(*t) {
                active_targets.push((*id, *t));
                false
            } else {
                true
            }
        });
        if !captures.is_empty() || !active_targets.is_empty() {
            log::debug!(
                "purged {} capture(s) and {} active target(s)",
                captures.len(),
                active_targets.len()
            );
        }
        Purged {
            captures,
            active_targets,
        }
    }

    /// Drop all state.
    pub fn clear(&mut self) {
        self.captures.clear();
        self.active_targets.clear();
        self.last_inputs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_events::{DeviceKind, PointerAction};
    use kurbo::Point;

    fn down(id: PointerId) -> PointerInput {
        PointerInput::new(id, DeviceKind::Touch, PointerAction::Down, Point::ZERO, 0)
    }

    fn record(id: PointerId, element: u32) -> CapturedPointer<u32> {
        CapturedPointer::new(id, element, Point::ZERO, Point::ZERO, 0)
    }

    #[test]
    fn captures_are_not_stolen() {
        let mut table: PointerTable<u32> = PointerTable::new();
        assert!(table.capture(record(7, 1)));
        assert!(!table.capture(record(7, 2)));
        assert_eq!(table.capture_target(7), Some(1));
        assert_eq!(table.release(7).map(|c| c.element()), Some(1));
        assert_eq!(table.release(7), None);
    }

    #[test]
    fn purge_drops_matching_entries_only() {
        let mut table: PointerTable<u32> = PointerTable::new();
        table.record_input(down(1));
        table.record_input(down(2));
        table.capture(record(1, 10));
        table.capture(record(2, 20));
        table.set_active_target(1, Some(10));
        table.set_active_target(2, Some(21));

        let purged = table.purge(|k| k / 10 == 1);
        assert_eq!(purged.captures.len(), 1);
        assert_eq!(purged.active_targets, [(1, 10)]);
        assert_eq!(table.capture_target(1), None);
        assert_eq!(table.capture_target(2), Some(20));
        assert_eq!(table.active_target(2), Some(21));
        // Inputs survive; the pointer itself is still active.
        assert!(table.is_active(1));
        assert!(table.purge(|_| false).is_empty());
    }

    #[test]
    fn forget_keeps_capture() {
        let mut table: PointerTable<u32> = PointerTable::new();
        table.record_input(down(3));
        table.set_active_target(3, Some(1));
        table.capture(record(3, 1));
        table.forget(3);
        assert!(!table.is_active(3));
        assert_eq!(table.active_target(3), None);
        assert_eq!(table.capture_target(3), Some(1));
        assert_eq!(table.captures_of(1).count(), 1);
    }
}
