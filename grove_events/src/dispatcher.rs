// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path-based three-phase dispatch: capture → target → bubble.
//!
//! [`dispatch`] builds the root→target path from [`Dispatchable::parent_of`]
//! and walks it twice:
//!
//! 1. Root to target. Each node runs its capture listeners; the target runs
//!    capture then bubble listeners ([`Phase::AtTarget`]).
//! 2. Target's parent back to root, bubble listeners only. This pass only
//!    happens when the event bubbles and the path has more than one node.
//!
//! Listeners may mutate the tree while the walk is in progress. Nodes that
//! are no longer alive, or that no longer hang below the path's root, are
//! skipped rather than visited.
//!
//! ## Example
//!
//! ```
//! use grove_events::{dispatcher, Dispatchable, Event, EventError, EventType, Phase};
//!
//! // A two-node chain 0 → 1 that records who saw the event in which phase.
//! struct Chain(Vec<(u32, Phase)>);
//!
//! impl Dispatchable<u32> for Chain {
//!     fn parent_of(&self, node: u32) -> Option<u32> {
//!         (node == 1).then_some(0)
//!     }
//!     fn is_live(&self, node: u32) -> bool {
//!         node < 2
//!     }
//!     fn handle_event(&mut self, node: u32, event: &mut Event<u32>) -> Result<(), EventError> {
//!         self.0.push((node, event.phase()));
//!         Ok(())
//!     }
//!     fn is_listener(&self, _: u32, _: EventType, _: Phase) -> bool {
//!         true
//!     }
//! }
//!
//! let mut chain = Chain(Vec::new());
//! let mut ev = Event::new(EventType::PointerDown, 1, 0);
//! let prevented = dispatcher::dispatch(&mut chain, &mut ev).unwrap();
//! assert!(!prevented);
//! assert_eq!(
//!     chain.0,
//!     [(0, Phase::Capturing), (1, Phase::AtTarget), (0, Phase::Bubbling)]
//! );
//! ```

use smallvec::SmallVec;

use crate::error::EventError;
use crate::event::Event;
use crate::types::{EventType, Phase};

/// A tree of nodes keyed by `K` that can receive events.
pub trait Dispatchable<K> {
    /// Parent of a node, or `None` for roots and unknown nodes.
    fn parent_of(&self, node: K) -> Option<K>;

    /// Whether `node` still exists.
    fn is_live(&self, node: K) -> bool;

    /// Run `node`'s listeners for the event's current phase.
    fn handle_event(&mut self, node: K, event: &mut Event<K>) -> Result<(), EventError>;

    /// Whether `node` has at least one listener that would run in `phase`.
    fn is_listener(&self, node: K, event_type: EventType, phase: Phase) -> bool;
}

/// Root→target path of `target`.
pub fn path_to<K, D>(ctx: &D, target: K) -> SmallVec<[K; 16]>
where
    K: Copy,
    D: Dispatchable<K> + ?Sized,
{
    let mut out = SmallVec::new();
    let mut cur = target;
    // Collect to root; the tree guarantees acyclic ancestry.
    loop {
        out.push(cur);
        match ctx.parent_of(cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

fn still_below<K, D>(ctx: &D, node: K, root: K) -> bool
where
    K: Copy + PartialEq,
    D: Dispatchable<K> + ?Sized,
{
    if !ctx.is_live(node) {
        return false;
    }
    let mut cur = node;
    loop {
        if cur == root {
            return true;
        }
        match ctx.parent_of(cur) {
            Some(p) => cur = p,
            None => return false,
        }
    }
}

fn visit<K, D>(ctx: &mut D, node: K, phase: Phase, event: &mut Event<K>) -> Result<(), EventError>
where
    K: Copy + PartialEq,
    D: Dispatchable<K> + ?Sized,
{
    event.set_phase(phase);
    event.set_current_target(node);
    ctx.handle_event(node, event)
}

/// Dispatch `event` along the path from the root to its target.
///
/// Returns `Ok(!default_prevented)` if a listener stopped propagation, and
/// `Ok(default_prevented)` if the walk ran to completion.
///
/// The event's phase is reset to [`Phase::None`] on return.
pub fn dispatch<K, D>(ctx: &mut D, event: &mut Event<K>) -> Result<bool, EventError>
where
    K: Copy + PartialEq + core::fmt::Debug,
    D: Dispatchable<K> + ?Sized,
{
    let target = event
        .target()
        .ok_or(EventError::NoTarget(event.event_type()))?;
    let path = path_to(ctx, target);
    let root = path[0];

    let result = walk(ctx, &path, root, target, event);
    event.set_phase(Phase::None);
    result
}

fn walk<K, D>(
    ctx: &mut D,
    path: &[K],
    root: K,
    target: K,
    event: &mut Event<K>,
) -> Result<bool, EventError>
where
    K: Copy + PartialEq + core::fmt::Debug,
    D: Dispatchable<K> + ?Sized,
{
    for &node in path {
        if !still_below(ctx, node, root) {
            log::trace!("`{}`: skipping detached {node:?}", event.event_type());
            continue;
        }
        let phase = if node == target {
            Phase::AtTarget
        } else {
            Phase::Capturing
        };
        visit(ctx, node, phase, event)?;
        if event.is_cancelled() {
            return Ok(!event.default_prevented());
        }
    }

    if path.len() > 1 && event.bubbles() {
        for &node in path.iter().rev().skip(1) {
            if !still_below(ctx, node, root) {
                log::trace!("`{}`: skipping detached {node:?}", event.event_type());
                continue;
            }
            visit(ctx, node, Phase::Bubbling, event)?;
            if event.is_cancelled() {
                return Ok(!event.default_prevented());
            }
        }
    }

    Ok(event.default_prevented())
}

/// Deliver `event` to `node` alone, in [`Phase::AtTarget`].
///
/// Used for direct delivery (captured pointers, hover over/out, structural
/// notifications). Returns whether the default was prevented.
pub fn dispatch_at_target<K, D>(
    ctx: &mut D,
    node: K,
    event: &mut Event<K>,
) -> Result<bool, EventError>
where
    K: Copy + PartialEq,
    D: Dispatchable<K> + ?Sized,
{
    let result = visit(ctx, node, Phase::AtTarget, event);
    event.set_phase(Phase::None);
    result.map(|()| event.default_prevented())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EventRegistry;
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;
    use hashbrown::HashMap;

    /// Nodes are indices; `parents[i]` is the parent of `i`.
    #[derive(Default)]
    struct Ctx {
        parents: Vec<Option<u32>>,
        dead: Vec<u32>,
        registries: HashMap<u32, EventRegistry<Self, u32>>,
        log: Vec<(u32, Phase)>,
    }

    impl core::fmt::Debug for Ctx {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.debug_struct("Ctx").finish_non_exhaustive()
        }
    }

    impl Ctx {
        /// 0 → 1 → 2
        fn chain() -> Self {
            Self {
                parents: vec![None, Some(0), Some(1)],
                ..Self::default()
            }
        }

        fn on(
            &mut self,
            node: u32,
            capture: bool,
            f: impl FnMut(&mut Self, &mut Event<u32>) + 'static,
        ) {
            self.registries
                .entry(node)
                .or_default()
                .add_listener(EventType::PointerDown, capture, Box::new(f))
                .unwrap();
        }

        fn record(&mut self, node: u32, capture: bool) {
            self.on(node, capture, move |ctx: &mut Self, ev: &mut Event<u32>| {
                ctx.log.push((node, ev.phase()));
            });
        }
    }

    impl Dispatchable<u32> for Ctx {
        fn parent_of(&self, node: u32) -> Option<u32> {
            self.parents.get(node as usize).copied().flatten()
        }

        fn is_live(&self, node: u32) -> bool {
            (node as usize) < self.parents.len() && !self.dead.contains(&node)
        }

        fn handle_event(&mut self, node: u32, event: &mut Event<u32>) -> Result<(), EventError> {
            let Some(reg) = self.registries.get(&node) else {
                return Ok(());
            };
            let listeners = reg.listeners_for(event)?;
            listeners.invoke(self, event);
            Ok(())
        }

        fn is_listener(&self, node: u32, event_type: EventType, phase: Phase) -> bool {
            self.registries.get(&node).is_some_and(|r| match phase {
                Phase::Capturing => r.is_listener(event_type, true),
                Phase::Bubbling => r.is_listener(event_type, false),
                Phase::AtTarget => {
                    r.is_listener(event_type, true) || r.is_listener(event_type, false)
                }
                Phase::None => false,
            })
        }
    }

    #[test]
    fn three_phase_order() {
        let mut ctx = Ctx::chain();
        for node in 0..3 {
            ctx.record(node, true);
            ctx.record(node, false);
        }
        let mut ev = Event::new(EventType::PointerDown, 2, 0);
        assert_eq!(dispatch(&mut ctx, &mut ev), Ok(false));
        assert_eq!(
            ctx.log,
            vec![
                (0, Phase::Capturing),
                (1, Phase::Capturing),
                (2, Phase::AtTarget),
                (2, Phase::AtTarget),
                (1, Phase::Bubbling),
                (0, Phase::Bubbling),
            ]
        );
        assert_eq!(ev.phase(), Phase::None);
        assert!(ctx.is_listener(2, EventType::PointerDown, Phase::AtTarget));
    }

    #[test]
    fn stop_at_target_skips_bubble() {
        let mut ctx = Ctx::chain();
        ctx.record(0, true);
        ctx.record(0, false);
        ctx.record(1, false);
        ctx.on(2, false, |ctx: &mut Ctx, ev: &mut Event<u32>| {
            ctx.log.push((2, ev.phase()));
            ev.prevent_default();
            ev.stop_propagation();
        });
        let mut ev = Event::new(EventType::PointerDown, 2, 0);
        // Early stop reports the inverted flag.
        assert_eq!(dispatch(&mut ctx, &mut ev), Ok(false));
        assert_eq!(ctx.log, vec![(0, Phase::Capturing), (2, Phase::AtTarget)]);
        assert!(ev.default_prevented());
    }

    #[test]
    fn stop_without_prevent_returns_true() {
        let mut ctx = Ctx::chain();
        ctx.on(0, true, |_: &mut Ctx, ev: &mut Event<u32>| ev.stop_propagation());
        ctx.record(2, false);
        let mut ev = Event::new(EventType::PointerDown, 2, 0);
        assert_eq!(dispatch(&mut ctx, &mut ev), Ok(true));
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn prevent_default_without_stop_returns_true() {
        let mut ctx = Ctx::chain();
        ctx.on(1, false, |_: &mut Ctx, ev: &mut Event<u32>| ev.prevent_default());
        ctx.record(0, false);
        let mut ev = Event::new(EventType::PointerDown, 2, 0);
        assert_eq!(dispatch(&mut ctx, &mut ev), Ok(true));
        assert_eq!(ctx.log, vec![(0, Phase::Bubbling)]);
    }

    #[test]
    fn single_node_path_has_no_bubble_pass() {
        let mut ctx = Ctx::chain();
        ctx.record(0, true);
        ctx.record(0, false);
        let mut ev = Event::new(EventType::PointerDown, 0, 0);
        dispatch(&mut ctx, &mut ev).unwrap();
        assert_eq!(ctx.log, vec![(0, Phase::AtTarget), (0, Phase::AtTarget)]);
    }

    #[test]
    fn non_bubbling_event_skips_bubble_pass() {
        let mut ctx = Ctx::chain();
        ctx.record(0, false);
        ctx.record(2, false);
        let mut ev = Event::new(EventType::PointerDown, 2, 0).with_bubbles(false);
        dispatch(&mut ctx, &mut ev).unwrap();
        assert_eq!(ctx.log, vec![(2, Phase::AtTarget)]);
    }

    #[test]
    fn nodes_detached_mid_walk_are_skipped() {
        let mut ctx = Ctx::chain();
        // Node 0's capture listener detaches node 1 (and with it node 2).
        ctx.on(0, true, |ctx: &mut Ctx, _: &mut Event<u32>| ctx.parents[1] = None);
        ctx.record(1, true);
        ctx.record(2, false);
        ctx.record(0, false);
        let mut ev = Event::new(EventType::PointerDown, 2, 0);
        dispatch(&mut ctx, &mut ev).unwrap();
        assert_eq!(ctx.log, vec![(0, Phase::Bubbling)]);
    }

    #[test]
    fn dead_nodes_are_skipped() {
        let mut ctx = Ctx::chain();
        ctx.on(0, true, |ctx: &mut Ctx, _: &mut Event<u32>| ctx.dead.push(1));
        ctx.record(1, true);
        ctx.record(2, false);
        let mut ev = Event::new(EventType::PointerDown, 2, 0);
        dispatch(&mut ctx, &mut ev).unwrap();
        // Node 2 still hangs below node 1 by parent link, but node 1 is gone.
        assert_eq!(ctx.log, vec![(2, Phase::AtTarget)]);
    }

    #[test]
    fn at_target_delivery_touches_only_the_node() {
        let mut ctx = Ctx::chain();
        ctx.record(0, true);
        ctx.record(1, true);
        ctx.record(1, false);
        let mut ev = Event::new(EventType::PointerDown, 2, 0);
        assert_eq!(dispatch_at_target(&mut ctx, 1, &mut ev), Ok(false));
        assert_eq!(ctx.log, vec![(1, Phase::AtTarget), (1, Phase::AtTarget)]);
        assert_eq!(ev.current_target(), Some(1));
    }

    #[test]
    fn listener_errors_propagate() {
        let mut ctx = Ctx::chain();
        let tap = EventType::Custom("tap");
        ctx.registries.entry(1).or_default();
        let mut ev = Event::new(tap, 2, 0);
        assert_eq!(
            dispatch(&mut ctx, &mut ev),
            Err(EventError::UnregisteredEvent(tap))
        );
    }
}
