// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document: a tree root that owns listeners and pointer state.

use alloc::boxed::Box;
use core::fmt;
use grove_events::dispatcher::{self, Dispatchable};
use grove_events::{
    Event, EventClass, EventDetail, EventError, EventRegistry, EventType, ListenerId, Phase,
    Timestamp,
};
use grove_pointer::PointerTable;
use grove_tree::{ElementDesc, ElementKind, Mutation, NodeId, Tree};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

use crate::behavior::Behavior;
use crate::config::DocumentConfig;
use crate::error::DomError;

/// Registry type stored per node.
pub type Registry = EventRegistry<Document, NodeId>;

/// A tree of elements with DOM-style event routing.
///
/// The document owns:
///
/// - the element [`Tree`], rooted at [`Document::root`];
/// - one listener registry per node that has listeners;
/// - optional [`Behavior`] hooks per node;
/// - the [`PointerTable`] holding pointer capture, active targets, and last inputs;
/// - the focused node.
///
/// Tree changes made through [`Document::add_child`], [`Document::remove_child`],
/// [`Document::destroy`], or [`Document::mutate`] are turned into structural
/// notifications before the call returns. Changes made directly through
/// [`Document::tree_mut`] are delivered on the next [`Document::flush`], which
/// every input entry point and lifecycle tick runs first.
///
/// ## Example
///
/// ```
/// use grove_document::{Document, DocumentConfig};
/// use grove_events::{EventType, PointerAction, PointerInput};
/// use grove_tree::ElementDesc;
/// use kurbo::{Point, Size};
/// use std::{cell::Cell, rc::Rc};
///
/// let mut doc = Document::new(DocumentConfig::default(), Size::new(400.0, 300.0));
/// let button = doc.create_element(ElementDesc::new("button", 10.0, 10.0, 80.0, 30.0));
/// doc.add_child(doc.root(), button).unwrap();
///
/// let clicks = Rc::new(Cell::new(0));
/// let seen = clicks.clone();
/// doc.add_event_listener(button, EventType::PointerDown, false, move |_, _| {
///     seen.set(seen.get() + 1);
/// })
/// .unwrap();
///
/// let down = PointerInput::mouse(PointerAction::Down, Point::new(20.0, 20.0), 0);
/// assert!(doc.on_pointer_event(down).unwrap());
/// assert_eq!(clicks.get(), 1);
/// ```
pub struct Document {
    pub(crate) config: DocumentConfig,
    pub(crate) tree: Tree,
    pub(crate) root: NodeId,
    pub(crate) registries: HashMap<NodeId, Registry>,
    pub(crate) behaviors: HashMap<NodeId, Box<dyn Behavior>>,
    pub(crate) pointers: PointerTable<NodeId>,
    pub(crate) focused: Option<NodeId>,
    pub(crate) window_size: Size,
    /// Latest host timestamp seen, stamped on synthesized events.
    pub(crate) clock: Timestamp,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("config", &self.config)
            .field("tree", &self.tree)
            .field("root", &self.root)
            .field("registries", &self.registries.len())
            .field("behaviors", &self.behaviors.len())
            .field("pointers", &self.pointers)
            .field("focused", &self.focused)
            .field("window_size", &self.window_size)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentConfig::default(), Size::ZERO)
    }
}

impl Document {
    /// Create a document whose root covers `size` at the origin.
    pub fn new(config: DocumentConfig, size: Size) -> Self {
        let mut tree = Tree::new();
        let root = tree.create(
            ElementDesc::new(config.id.clone(), 0.0, 0.0, size.width, size.height)
                .with_kind(ElementKind::DOCUMENT),
        );
        tree.take_mutations();
        Self {
            config,
            tree,
            root,
            registries: HashMap::new(),
            behaviors: HashMap::new(),
            pointers: PointerTable::new(),
            focused: None,
            window_size: size,
            clock: 0,
        }
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Read access to the element tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Write access to the element tree.
    ///
    /// Notifications for changes made here are delivered on the next [`Document::flush`].
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Pointer bookkeeping (read-only; changes go through the capture API).
    pub fn pointers(&self) -> &PointerTable<NodeId> {
        &self.pointers
    }

    /// Returns `true` if `node` is alive and attached below this document's root.
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.root_of(node) == Some(self.root)
    }

    /// Deepest, topmost enabled and visible element under a screen point.
    pub fn element_at(&self, screen: Point) -> Option<NodeId> {
        self.tree.recursive_hit_test(self.root, screen)
    }

    // --- structure ---

    /// Create a detached element.
    pub fn create_element(&mut self, desc: ElementDesc) -> NodeId {
        self.tree.create(desc)
    }

    /// Create an element and attach it to `parent`.
    pub fn insert(&mut self, parent: NodeId, desc: ElementDesc) -> Result<NodeId, DomError> {
        let id = self.tree.insert(Some(parent), desc)?;
        self.flush()?;
        Ok(id)
    }

    /// Attach `child` as the topmost child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.tree.add_child(parent, child)?;
        self.flush()
    }

    /// Detach `child` from `parent` and hand it back.
    ///
    /// Before this returns, every pointer capture and active target inside
    /// the detached subtree has been dropped.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        let child = self.tree.remove_child(parent, child)?;
        self.flush()?;
        Ok(child)
    }

    /// Destroy an element and its subtree, dropping their listeners and behaviors.
    pub fn destroy(&mut self, node: NodeId) -> Result<(), DomError> {
        if node == self.root {
            return Err(DomError::invalid_state("the document root cannot be destroyed"));
        }
        self.tree.destroy(node)?;
        self.flush()
    }

    /// Run `f` against the tree, then deliver the resulting notifications.
    ///
    /// ```
    /// # use grove_document::Document;
    /// # use grove_tree::ElementDesc;
    /// let mut doc = Document::default();
    /// let a = doc.insert(doc.root(), ElementDesc::new("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
    /// let _b = doc.insert(doc.root(), ElementDesc::new("b", 0.0, 0.0, 10.0, 10.0)).unwrap();
    /// doc.mutate(|tree| tree.move_to_front(a)).unwrap().unwrap();
    /// assert_eq!(doc.tree().children_of(doc.root()).last(), Some(&a));
    /// ```
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Tree) -> R) -> Result<R, DomError> {
        let out = f(&mut self.tree);
        self.flush()?;
        Ok(out)
    }

    // --- listeners ---

    /// Add a listener on `node` for `event_type`.
    ///
    /// `use_capture` selects the capture channel; otherwise the bubble
    /// channel. At the target both channels run, capture first.
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        use_capture: bool,
        listener: impl FnMut(&mut Self, &mut Event<NodeId>) + 'static,
    ) -> Result<ListenerId, DomError> {
        if !self.tree.is_alive(node) {
            return Err(DomError::invalid_state("listener target is not alive"));
        }
        let id = self
            .registries
            .entry(node)
            .or_default()
            .add_listener(event_type, use_capture, Box::new(listener))?;
        Ok(id)
    }

    /// Remove a listener. Returns `false` if it was not found on `node`.
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        self.registries
            .get_mut(&node)
            .is_some_and(|r| r.remove_listener(id))
    }

    /// Returns `true` if `node` has a listener on the given channel.
    pub fn is_event_listener(
        &self,
        node: NodeId,
        event_type: EventType,
        use_capture: bool,
    ) -> bool {
        let phase = if use_capture {
            Phase::Capturing
        } else {
            Phase::Bubbling
        };
        self.is_listener(node, event_type, phase)
    }

    /// Register a channel for a custom event type on `node`.
    pub fn register_event_type(
        &mut self,
        node: NodeId,
        event_type: EventType,
        class: EventClass,
    ) -> Result<(), DomError> {
        if !self.tree.is_alive(node) {
            return Err(DomError::invalid_state("registration target is not alive"));
        }
        self.registries
            .entry(node)
            .or_default()
            .register_event_type(event_type, class)?;
        Ok(())
    }

    /// Dispatch `event` along the path from the root to its target.
    ///
    /// Returns `!default_prevented` if a listener stopped propagation and
    /// `default_prevented` otherwise.
    pub fn dispatch_event(&mut self, event: &mut Event<NodeId>) -> Result<bool, DomError> {
        match event.target() {
            Some(target) if self.tree.is_alive(target) => Ok(dispatcher::dispatch(self, event)?),
            _ => Err(DomError::invalid_state("event target is not alive")),
        }
    }

    // --- behaviors ---

    /// Attach lifecycle hooks to `node`, returning the previous ones.
    pub fn set_behavior(
        &mut self,
        node: NodeId,
        behavior: Box<dyn Behavior>,
    ) -> Result<Option<Box<dyn Behavior>>, DomError> {
        if !self.tree.is_alive(node) {
            return Err(DomError::invalid_state("behavior target is not alive"));
        }
        Ok(self.behaviors.insert(node, behavior))
    }

    /// Detach the lifecycle hooks of `node`.
    pub fn remove_behavior(&mut self, node: NodeId) -> Option<Box<dyn Behavior>> {
        self.behaviors.remove(&node)
    }

    /// Run a behavior hook with the behavior taken out of the document.
    pub(crate) fn with_behavior(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut dyn Behavior, &mut Self),
    ) {
        let Some(mut behavior) = self.behaviors.remove(&node) else {
            return;
        };
        f(behavior.as_mut(), self);
        if self.tree.is_alive(node) && !self.behaviors.contains_key(&node) {
            self.behaviors.insert(node, behavior);
        }
    }

    // --- structural notifications ---

    /// Turn pending tree mutations into notifications and deliver them.
    ///
    /// Listeners that mutate the tree again are handled by the same call.
    pub fn flush(&mut self) -> Result<(), DomError> {
        loop {
            let mutations = self.tree.take_mutations();
            if mutations.is_empty() {
                return Ok(());
            }
            for mutation in mutations {
                self.notify(mutation)?;
            }
        }
    }

    fn notify(&mut self, mutation: Mutation) -> Result<(), DomError> {
        match mutation {
            Mutation::ChildAdded {
                parent,
                child,
                siblings,
            } => {
                self.deliver(child, EventType::AddedTo, Some(parent), EventDetail::None)?;
                self.deliver(parent, EventType::ChildAdded, Some(child), EventDetail::None)?;
                for sibling in siblings {
                    self.deliver(sibling, EventType::SiblingAdded, Some(child), EventDetail::None)?;
                }
            }
            Mutation::ChildRemoved {
                parent,
                child,
                siblings,
            } => {
                self.purge_detached()?;
                self.deliver(child, EventType::RemovedFrom, Some(parent), EventDetail::None)?;
                self.deliver(parent, EventType::ChildRemoved, Some(child), EventDetail::None)?;
                for sibling in siblings {
                    let detail = EventDetail::None;
                    self.deliver(sibling, EventType::SiblingRemoved, Some(child), detail)?;
                }
            }
            Mutation::Reordered {
                parent,
                child,
                old_index,
                new_index,
            } => {
                let detail = EventDetail::Reorder {
                    old_index,
                    new_index,
                };
                self.deliver(child, EventType::Reordered, Some(parent), detail.clone())?;
                self.deliver(parent, EventType::ChildReordered, Some(child), detail.clone())?;
                for sibling in self.tree.siblings_of(child) {
                    let ty = EventType::SiblingReordered;
                    self.deliver(sibling, ty, Some(child), detail.clone())?;
                }
            }
            Mutation::Moved { node, position } => {
                self.deliver(node, EventType::Move, None, EventDetail::Move(position))?;
            }
            Mutation::Resized { node, bounds } => {
                self.deliver(node, EventType::Resize, None, EventDetail::Resize(bounds))?;
            }
            Mutation::AttributeSet { node, key } => {
                self.deliver(node, EventType::AttributeSet, None, EventDetail::Attribute(key))?;
            }
            Mutation::AttributeCleared { node, key } => {
                self.deliver(node, EventType::AttributeCleared, None, EventDetail::Attribute(key))?;
            }
            Mutation::Enabled { node, value } => {
                self.deliver(node, EventType::Enabled, None, EventDetail::Toggle(value))?;
            }
            Mutation::Hidden { node, value } => {
                self.deliver(node, EventType::Hidden, None, EventDetail::Toggle(value))?;
            }
            Mutation::Locked { node, value } => {
                self.deliver(node, EventType::Locked, None, EventDetail::Toggle(value))?;
            }
            Mutation::Destroyed { node } => {
                self.registries.remove(&node);
                self.behaviors.remove(&node);
                self.purge_detached()?;
            }
        }
        Ok(())
    }

    /// Deliver a structural notification at-target, skipping dead nodes.
    fn deliver(
        &mut self,
        node: NodeId,
        event_type: EventType,
        related: Option<NodeId>,
        detail: EventDetail,
    ) -> Result<(), DomError> {
        if !self.tree.is_alive(node) {
            return Ok(());
        }
        let mut event = Event::new(event_type, node, self.clock)
            .with_related_target(related)
            .with_detail(detail);
        dispatcher::dispatch_at_target(self, node, &mut event)?;
        Ok(())
    }

    /// Drop pointer and focus state that refers to nodes outside the document.
    ///
    /// Captures held by nodes that are still alive get a lost-capture event.
    pub(crate) fn purge_detached(&mut self) -> Result<(), DomError> {
        let tree = &self.tree;
        let root = self.root;
        let purged = self
            .pointers
            .purge(|node| tree.root_of(node) != Some(root));

        if let Some(focused) = self.focused
            && !self.contains(focused)
        {
            log::debug!("focused {focused:?} left the document");
            self.tree.set_focused(focused, false);
            self.focused = None;
        }

        for record in purged.captures {
            let element = record.element();
            if !self.tree.is_alive(element) {
                continue;
            }
            let input = self.pointers.last_input(record.pointer_id()).cloned();
            let mut event = Event::new(EventType::LostPointerCapture, element, self.clock)
                .with_detail(input.map_or(EventDetail::None, EventDetail::Pointer));
            dispatcher::dispatch_at_target(self, element, &mut event)?;
        }
        Ok(())
    }

    /// Bounds of the root in screen space.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.root).unwrap_or(Rect::ZERO)
    }
}

impl Dispatchable<NodeId> for Document {
    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent_of(node)
    }

    fn is_live(&self, node: NodeId) -> bool {
        self.tree.is_alive(node)
    }

    fn handle_event(&mut self, node: NodeId, event: &mut Event<NodeId>) -> Result<(), EventError> {
        let listeners = match self.registries.get(&node) {
            Some(registry) => registry.listeners_for(event)?,
            // Nodes without listeners still validate the event's type.
            None => Registry::new().listeners_for(event)?,
        };
        listeners.invoke(self, event);
        Ok(())
    }

    fn is_listener(&self, node: NodeId, event_type: EventType, phase: Phase) -> bool {
        let Some(registry) = self.registries.get(&node) else {
            return false;
        };
        match phase {
            Phase::None => false,
            Phase::Capturing => registry.is_listener(event_type, true),
            Phase::Bubbling => registry.is_listener(event_type, false),
            Phase::AtTarget => {
                registry.is_listener(event_type, true) || registry.is_listener(event_type, false)
            }
        }
    }
}
