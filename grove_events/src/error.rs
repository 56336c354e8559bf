// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while routing events to listeners.

use crate::types::{EventClass, EventType};

/// Event-routing misconfiguration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// No channel exists for the event's type on the node.
    #[error("no channel registered for event type `{0}`")]
    UnregisteredEvent(EventType),
    /// A channel exists but was registered for another class of event.
    #[error("channel for `{event_type}` expects {expected:?} events, got {found:?}")]
    ClassMismatch {
        /// The event type looked up.
        event_type: EventType,
        /// Class the channel was registered with.
        expected: EventClass,
        /// Class carried by the event.
        found: EventClass,
    },
    /// The event was handed to listeners outside of a dispatch.
    #[error("event `{0}` delivered with no phase set")]
    NoPhase(EventType),
    /// The event has no target to dispatch to.
    #[error("event `{0}` has no target")]
    NoTarget(EventType),
}
