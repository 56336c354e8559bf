// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced to the host.

use alloc::string::{String, ToString};
use grove_events::{EventError, EventType, PointerId};
use grove_tree::TreeError;

/// Programmer-error class failures raised by document operations.
///
/// None of these are recoverable data errors. Hosts are expected to log them
/// and carry on with the next frame.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// A node was not where the operation expected it.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// The pointer id is not currently active.
    #[error("pointer {0} is not active")]
    InvalidPointerId(PointerId),
    /// No channel exists for the event type.
    #[error("no channel registered for event type `{0}`")]
    UnregisteredEvent(EventType),
    /// A strict attribute read found no value of the requested type.
    #[error("invalid attribute key `{0}`")]
    InvalidAttributeKey(String),
}

/// Flat classification of a [`DomError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DomError::InvalidState`].
    InvalidState,
    /// See [`DomError::InvalidPointerId`].
    InvalidPointerId,
    /// See [`DomError::UnregisteredEvent`].
    UnregisteredEvent,
    /// See [`DomError::InvalidAttributeKey`].
    InvalidAttributeKey,
}

impl DomError {
    /// Classification without the payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::InvalidPointerId(_) => ErrorKind::InvalidPointerId,
            Self::UnregisteredEvent(_) => ErrorKind::UnregisteredEvent,
            Self::InvalidAttributeKey(_) => ErrorKind::InvalidAttributeKey,
        }
    }

    pub(crate) fn invalid_state(message: &str) -> Self {
        Self::InvalidState(String::from(message))
    }
}

impl From<TreeError> for DomError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::InvalidAttributeKey(key) => Self::InvalidAttributeKey(key),
            other => Self::InvalidState(other.to_string()),
        }
    }
}

impl From<EventError> for DomError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::UnregisteredEvent(event_type) => Self::UnregisteredEvent(event_type),
            other => Self::InvalidState(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_events::EventClass;

    #[test]
    fn conversions_keep_their_kind() {
        let err: DomError = TreeError::InvalidAttributeKey(String::from("left")).into();
        assert_eq!(err.kind(), ErrorKind::InvalidAttributeKey);

        let err: DomError = EventError::UnregisteredEvent(EventType::Custom("tap")).into();
        assert_eq!(err, DomError::UnregisteredEvent(EventType::Custom("tap")));

        let err: DomError = EventError::ClassMismatch {
            event_type: EventType::KeyDown,
            expected: EventClass::Keyboard,
            found: EventClass::Pointer,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
