//! Shared state of one graph.
//!
//! [`GraphContext`] is owned by the [`crate::Graph`] facade through an `Rc`;
//! every element keeps a weak reference back to it so that element-level
//! mutations can reach the stores and the notification gate.
//!
//! No `RefCell` borrow taken here outlives the method that takes it. Renderers
//! and listeners are always called with every borrow released, so they may
//! call back into the graph.

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;

use trellis_core::{
    group::Group,
    identifier::Id,
    style::{Bypass, StyleSheet},
};

use crate::{allocator::IdAllocator, element::Element, extension::Renderer, gate::NotificationGate};

/// Insertion-ordered element stores, one per group.
#[derive(Default)]
struct Stores {
    nodes: IndexMap<Id, Element>,
    edges: IndexMap<Id, Element>,
}

impl Stores {
    fn group(&self, group: Group) -> &IndexMap<Id, Element> {
        match group {
            Group::Node => &self.nodes,
            Group::Edge => &self.edges,
        }
    }

    fn group_mut(&mut self, group: Group) -> &mut IndexMap<Id, Element> {
        match group {
            Group::Node => &mut self.nodes,
            Group::Edge => &mut self.edges,
        }
    }
}

pub(crate) struct GraphContext {
    stores: RefCell<Stores>,
    allocator: RefCell<IdAllocator>,
    gate: NotificationGate,
    style: RefCell<StyleSheet>,
    bypass: RefCell<Bypass>,
}

impl GraphContext {
    pub(crate) fn new(renderer: Rc<dyn Renderer>, style: StyleSheet, bypass: Bypass) -> Rc<Self> {
        Rc::new(Self {
            stores: RefCell::new(Stores::default()),
            allocator: RefCell::new(IdAllocator::new()),
            gate: NotificationGate::new(renderer),
            style: RefCell::new(style),
            bypass: RefCell::new(bypass),
        })
    }

    pub(crate) fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    pub(crate) fn renderer(&self) -> &Rc<dyn Renderer> {
        self.gate.renderer()
    }

    pub(crate) fn contains(&self, group: Group, id: Id) -> bool {
        self.stores.borrow().group(group).contains_key(&id)
    }

    pub(crate) fn get(&self, group: Group, id: Id) -> Option<Element> {
        self.stores.borrow().group(group).get(&id).cloned()
    }

    /// Live elements of `group` in insertion order.
    pub(crate) fn elements(&self, group: Group) -> Vec<Element> {
        self.stores.borrow().group(group).values().cloned().collect()
    }

    pub(crate) fn len(&self, group: Group) -> usize {
        self.stores.borrow().group(group).len()
    }

    /// Picks the id for a new element of `group`.
    pub(crate) fn allocate_id(&self, group: Group, preferred: Option<&str>) -> Id {
        let stores = self.stores.borrow();
        let taken = stores.group(group);
        self.allocator
            .borrow_mut()
            .generate(group, preferred, |id| taken.contains_key(&id))
    }

    pub(crate) fn insert(&self, element: Element) {
        self.stores
            .borrow_mut()
            .group_mut(element.group())
            .insert(element.id(), element);
    }

    /// Removes `element` from its store if it is the element stored under its id.
    pub(crate) fn remove(&self, element: &Element) -> bool {
        let mut stores = self.stores.borrow_mut();
        let store = stores.group_mut(element.group());
        match store.get(&element.id()) {
            Some(stored) if stored == element => {
                // Keeps insertion order at O(n) per removal.
                store.shift_remove(&element.id());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn style(&self) -> StyleSheet {
        self.style.borrow().clone()
    }

    pub(crate) fn set_style(&self, style: StyleSheet) {
        *self.style.borrow_mut() = style;
    }

    pub(crate) fn bypass(&self) -> Bypass {
        self.bypass.borrow().clone()
    }

    pub(crate) fn set_bypass(&self, bypass: Bypass) {
        *self.bypass.borrow_mut() = bypass;
    }
}
