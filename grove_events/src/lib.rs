// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Events: DOM-style events and a deterministic, `no_std` dispatcher.
//!
//! ## Overview
//!
//! - [`Event`] is the record carried through a dispatch: type, target,
//!   current target, related target, phase, bubbling and cancelation state,
//!   timestamp, and a typed [`EventDetail`] payload.
//! - [`EventRegistry`] holds one node's listeners. Every [`EventType`] has a
//!   capture channel and a bubble channel.
//! - [`dispatcher::dispatch`] walks root → target → root over any tree that
//!   implements [`Dispatchable`].
//! - [`input`] holds the raw samples a host feeds in: [`PointerInput`],
//!   [`KeyInput`], [`FileDrag`].
//!
//! ## Phases
//!
//! | phase | channels run |
//! |---|---|
//! | [`Phase::Capturing`] | capture |
//! | [`Phase::AtTarget`] | capture, then bubble |
//! | [`Phase::Bubbling`] | bubble |
//!
//! Stopping propagation takes effect after the current node's listeners;
//! stopping immediate propagation also skips the rest of the current node.
//! Both are ignored on events that are not cancelable.
//!
//! ## Errors
//!
//! Dispatching a type with no channel fails with
//! [`EventError::UnregisteredEvent`]. Built-in types always have a channel;
//! [`EventType::Custom`] types must be registered first. A channel and an
//! event that disagree on [`EventClass`] fail with [`EventError::ClassMismatch`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod input;

mod error;
mod event;
mod registry;
mod types;

pub use dispatcher::Dispatchable;
pub use error::EventError;
pub use event::{Event, EventDetail};
pub use input::{
    Buttons, DeviceKind, FileDrag, KeyAction, KeyInput, Modifiers, PointerAction, PointerId,
    PointerInput, Timestamp,
};
pub use registry::{Callback, EventRegistry, ListenerId, Listeners};
pub use types::{EventClass, EventType, Phase};
