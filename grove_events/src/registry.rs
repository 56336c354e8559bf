// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node listener registry.
//!
//! A node's [`EventRegistry`] maps each [`EventType`] to a channel with two
//! independent listener lists: one for the capture phase, one for the bubble
//! phase. At the target both run, capture first.
//!
//! Listeners receive a mutable context `C` (usually the document that owns
//! the registry) alongside the event. To make that possible the registry
//! never lends out its own storage during a call: [`EventRegistry::listeners_for`]
//! returns a snapshot of shared handles, the caller drops its borrow of the
//! registry, and only then runs [`Listeners::invoke`] with the context.
//! Listeners added during a dispatch therefore wait for the next one, and
//! listeners removed during a dispatch are skipped from then on.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::EventError;
use crate::event::Event;
use crate::types::{EventClass, EventType, Phase};

/// Handle returned when adding a listener, used to remove it again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listener callback signature.
pub type Callback<C, K> = dyn FnMut(&mut C, &mut Event<K>);

struct ListenerEntry<C, K> {
    id: ListenerId,
    removed: Cell<bool>,
    callback: RefCell<Box<Callback<C, K>>>,
}

impl<C, K> fmt::Debug for ListenerEntry<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("id", &self.id)
            .field("removed", &self.removed.get())
            .finish_non_exhaustive()
    }
}

struct Channel<C, K> {
    class: EventClass,
    capture: Vec<Rc<ListenerEntry<C, K>>>,
    bubble: Vec<Rc<ListenerEntry<C, K>>>,
}

impl<C, K> Channel<C, K> {
    fn new(class: EventClass) -> Self {
        Self {
            class,
            capture: Vec::new(),
            bubble: Vec::new(),
        }
    }

    fn list(&self, use_capture: bool) -> &Vec<Rc<ListenerEntry<C, K>>> {
        if use_capture { &self.capture } else { &self.bubble }
    }
}

/// Listener channels of one node.
pub struct EventRegistry<C, K> {
    /// Channels with listeners or explicit registrations. Built-in types
    /// without an entry behave as empty channels of their own class.
    channels: HashMap<EventType, Channel<C, K>>,
    next_id: u64,
}

impl<C, K> fmt::Debug for EventRegistry<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: usize = self
            .channels
            .values()
            .map(|c| c.capture.len() + c.bubble.len())
            .sum();
        f.debug_struct("EventRegistry")
            .field("channels", &self.channels.len())
            .field("listeners", &listeners)
            .finish_non_exhaustive()
    }
}

impl<C, K> Default for EventRegistry<C, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, K> EventRegistry<C, K> {
    /// A registry with every built-in type available and no listeners.
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            next_id: 1,
        }
    }

    /// Class of the channel for `event_type`, if one is available.
    pub fn channel_class(&self, event_type: EventType) -> Option<EventClass> {
        match self.channels.get(&event_type) {
            Some(channel) => Some(channel.class),
            None => event_type.builtin_class(),
        }
    }

    /// Returns `true` if a channel exists for `event_type`.
    pub fn is_registered(&self, event_type: EventType) -> bool {
        self.channel_class(event_type).is_some()
    }

    /// Register a channel for `event_type` carrying `class` events.
    ///
    /// Registering an existing type again is fine as long as the class agrees.
    pub fn register_event_type(
        &mut self,
        event_type: EventType,
        class: EventClass,
    ) -> Result<(), EventError> {
        if let Some(expected) = self.channel_class(event_type)
            && expected != class
        {
            return Err(EventError::ClassMismatch {
                event_type,
                expected,
                found: class,
            });
        }
        self.channels
            .entry(event_type)
            .or_insert_with(|| Channel::new(class));
        Ok(())
    }

    /// Add a listener on the capture (`use_capture`) or bubble channel.
    pub fn add_listener(
        &mut self,
        event_type: EventType,
        use_capture: bool,
        callback: Box<Callback<C, K>>,
    ) -> Result<ListenerId, EventError> {
        let class = self
            .channel_class(event_type)
            .ok_or(EventError::UnregisteredEvent(event_type))?;
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let entry = Rc::new(ListenerEntry {
            id,
            removed: Cell::new(false),
            callback: RefCell::new(callback),
        });
        let channel = self
            .channels
            .entry(event_type)
            .or_insert_with(|| Channel::new(class));
        if use_capture {
            channel.capture.push(entry);
        } else {
            channel.bubble.push(entry);
        }
        Ok(id)
    }

    /// Remove a listener. Returns `false` if it was not found.
    ///
    /// A listener removed while a dispatch is running does not fire again,
    /// even if it was part of that dispatch's snapshot.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        for channel in self.channels.values_mut() {
            for list in [&mut channel.capture, &mut channel.bubble] {
                if let Some(pos) = list.iter().position(|e| e.id == id) {
                    let entry = list.remove(pos);
                    entry.removed.set(true);
                    return true;
                }
            }
        }
        false
    }

    /// Returns `true` if at least one listener is on the given channel.
    pub fn is_listener(&self, event_type: EventType, use_capture: bool) -> bool {
        self.channels
            .get(&event_type)
            .is_some_and(|c| !c.list(use_capture).is_empty())
    }

    /// Total number of listeners across all channels.
    pub fn len(&self) -> usize {
        self.channels
            .values()
            .map(|c| c.capture.len() + c.bubble.len())
            .sum()
    }

    /// Returns `true` if there are no listeners at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every listener, keeping registrations.
    pub fn clear(&mut self) {
        for channel in self.channels.values_mut() {
            for entry in channel.capture.drain(..).chain(channel.bubble.drain(..)) {
                entry.removed.set(true);
            }
        }
    }

    /// Snapshot the listeners that should see `event` in its current phase.
    ///
    /// Capturing selects the capture channel, bubbling the bubble channel,
    /// at-target both (capture first).
    pub fn listeners_for(&self, event: &Event<K>) -> Result<Listeners<C, K>, EventError>
    where
        K: Copy + PartialEq,
    {
        let event_type = event.event_type();
        let expected = self
            .channel_class(event_type)
            .ok_or(EventError::UnregisteredEvent(event_type))?;
        if expected != event.class() {
            return Err(EventError::ClassMismatch {
                event_type,
                expected,
                found: event.class(),
            });
        }
        let mut entries = SmallVec::new();
        if let Some(channel) = self.channels.get(&event_type) {
            match event.phase() {
                Phase::None => return Err(EventError::NoPhase(event_type)),
                Phase::Capturing => entries.extend(channel.capture.iter().cloned()),
                Phase::AtTarget => {
                    entries.extend(channel.capture.iter().cloned());
                    entries.extend(channel.bubble.iter().cloned());
                }
                Phase::Bubbling => entries.extend(channel.bubble.iter().cloned()),
            }
        } else if event.phase() == Phase::None {
            return Err(EventError::NoPhase(event_type));
        }
        Ok(Listeners { entries })
    }
}

/// Snapshot of listeners taken by [`EventRegistry::listeners_for`].
pub struct Listeners<C, K> {
    entries: SmallVec<[Rc<ListenerEntry<C, K>>; 4]>,
}

impl<C, K> fmt::Debug for Listeners<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<C, K: Copy + PartialEq> Listeners<C, K> {
    /// Number of listeners in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the listeners in order.
    ///
    /// Stops early once immediate propagation is stopped. A listener that is
    /// already running further up the stack is skipped rather than re-entered.
    pub fn invoke(self, ctx: &mut C, event: &mut Event<K>) {
        for entry in self.entries {
            if event.is_immediate_propagation_stopped() {
                break;
            }
            if entry.removed.get() {
                continue;
            }
            let Ok(mut callback) = entry.callback.try_borrow_mut() else {
                log::warn!(
                    "listener {:?} for `{}` is already running; skipped",
                    entry.id,
                    event.event_type()
                );
                continue;
            };
            let f: &mut Callback<C, K> = &mut **callback;
            f(ctx, event);
        }
    }
}
