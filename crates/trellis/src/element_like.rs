//! Operations shared by single elements and collections.
//!
//! Everything that can be done to an [`Element`] can be done to a
//! [`Collection`](crate::Collection) with the same meaning applied to each
//! member. Implementors only provide five combinators; every operation is
//! written once on top of them:
//!
//! - [`ElementLike::map_each`] for operations that return a value. An element
//!   returns the value itself, a collection returns one value per member.
//! - [`ElementLike::batch`] for chained mutations that the renderer must hear
//!   about. An element notifies for itself, a collection suppresses the member
//!   notifications and emits one event for every member that changed.
//! - [`ElementLike::try_each`] and [`ElementLike::for_each_member`] for chained
//!   operations that can fail or do not notify at all.
//! - [`ElementLike::flat_map_elements`] for operations that return elements,
//!   which always come back as a new collection.

use std::rc::Rc;

use trellis_core::{
    group::Group,
    identifier::Id,
    value::{Attributes, Position, Value},
};

use crate::{
    collection::Collection,
    element::{Element, Listener, ListenerId},
    error::{ListenerError, TrellisError},
    event::EventKind,
};

/// Event name triggered on an element's own listeners after `select`.
pub const SELECT_EVENT: &str = "select";

/// Event name triggered on an element's own listeners after `unselect`.
pub const UNSELECT_EVENT: &str = "unselect";

/// Uniform element/collection interface.
pub trait ElementLike {
    /// Result shape of value-returning operations: `T` for one element,
    /// `Vec<T>` for a collection.
    type Each<T>;

    /// Applies `f` to every member and collects the results.
    fn map_each<T>(&self, f: impl FnMut(&Element) -> T) -> Self::Each<T>;

    /// Applies the mutation `f` to every member and notifies the renderer
    /// with a `kind` event covering the members for which `f` returned `true`.
    fn batch(&self, kind: EventKind, f: impl FnMut(&Element) -> bool) -> &Self;

    /// Applies `f` to every member in order, stopping at the first error.
    fn try_each(
        &self,
        f: impl FnMut(&Element) -> Result<(), TrellisError>,
    ) -> Result<&Self, TrellisError>;

    /// Applies `f` to every member without any notification.
    fn for_each_member(&self, f: impl FnMut(&Element)) -> &Self;

    /// Applies `f` to every member and gathers all returned elements.
    fn flat_map_elements(&self, f: impl FnMut(&Element) -> Vec<Element>) -> Collection;

    fn id(&self) -> Self::Each<Id> {
        self.map_each(Element::id)
    }

    fn group(&self) -> Self::Each<Group> {
        self.map_each(Element::group)
    }

    fn is_removed(&self) -> Self::Each<bool> {
        self.map_each(Element::removed_flag)
    }

    fn is_selected(&self) -> Self::Each<bool> {
        self.map_each(Element::selected_flag)
    }

    /// Returns a copy of the data attribute `key`.
    fn data(&self, key: &str) -> Self::Each<Option<Value>> {
        self.map_each(|element| element.read_data(key))
    }

    /// Returns a copy of the whole data map.
    fn data_map(&self) -> Self::Each<Attributes> {
        self.map_each(Element::read_data_map)
    }

    /// Stores a copy of `value` under `key` and emits one `data` event.
    ///
    /// The `id` attribute indexes the element stores and cannot be changed;
    /// such writes are ignored.
    fn set_data(&self, key: &str, value: impl Into<Value>) -> &Self {
        let value = value.into();
        self.batch(EventKind::Data, |element| {
            element.write_data(key, value.clone())
        })
    }

    /// Returns a copy of the position.
    fn position(&self) -> Self::Each<Position> {
        self.map_each(Element::read_position)
    }

    /// Replaces the position wholesale and emits one `position` event.
    fn set_position(&self, position: Position) -> &Self {
        self.batch(EventKind::Position, |element| {
            element.write_position(position.clone())
        })
    }

    /// Returns a copy of the per-element style override.
    fn bypass_style(&self) -> Self::Each<Attributes> {
        self.map_each(Element::read_bypass)
    }

    /// Replaces the per-element style override. Renderers pull style on
    /// demand, so no event is emitted.
    fn set_bypass_style(&self, bypass: Attributes) -> &Self {
        self.for_each_member(|element| element.write_bypass(bypass.clone()))
    }

    /// Computed style as resolved by the active renderer.
    fn style(&self) -> Self::Each<Attributes> {
        self.map_each(Element::computed_style)
    }

    /// Registers `listener` for `event` and returns its handle.
    fn bind(
        &self,
        event: &str,
        listener: impl Fn(&Element, &Value) -> Result<(), ListenerError> + 'static,
    ) -> Self::Each<ListenerId> {
        let listener: Listener = Rc::new(listener);
        self.map_each(|element| element.attach_listener(event, Rc::clone(&listener)))
    }

    /// Shorthand for `bind("click", listener)`.
    fn click(
        &self,
        listener: impl Fn(&Element, &Value) -> Result<(), ListenerError> + 'static,
    ) -> Self::Each<ListenerId> {
        self.bind("click", listener)
    }

    fn mousedown(
        &self,
        listener: impl Fn(&Element, &Value) -> Result<(), ListenerError> + 'static,
    ) -> Self::Each<ListenerId> {
        self.bind("mousedown", listener)
    }

    fn mouseup(
        &self,
        listener: impl Fn(&Element, &Value) -> Result<(), ListenerError> + 'static,
    ) -> Self::Each<ListenerId> {
        self.bind("mouseup", listener)
    }

    fn mousemove(
        &self,
        listener: impl Fn(&Element, &Value) -> Result<(), ListenerError> + 'static,
    ) -> Self::Each<ListenerId> {
        self.bind("mousemove", listener)
    }

    /// Removes the listener `handle` from `event`, or every listener of
    /// `event` when `handle` is `None`.
    fn unbind(&self, event: &str, handle: Option<ListenerId>) -> &Self {
        self.for_each_member(|element| element.detach_listeners(event, handle))
    }

    /// Calls the listeners of `event` synchronously in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Listener`] with the first listener failure;
    /// listeners after it are not called.
    fn trigger(&self, event: &str, payload: &Value) -> Result<&Self, TrellisError> {
        self.try_each(|element| element.fire(event, payload))
    }

    /// Marks the members selected, notifies the renderer, then triggers
    /// [`SELECT_EVENT`] on the members' own listeners.
    fn select(&self) -> Result<&Self, TrellisError> {
        self.batch(EventKind::Select, |element| element.mark_selected(true));
        self.trigger(SELECT_EVENT, &Value::Null)
    }

    /// Clears the selection, notifies the renderer, then triggers
    /// [`UNSELECT_EVENT`] on the members' own listeners.
    fn unselect(&self) -> Result<&Self, TrellisError> {
        self.batch(EventKind::Unselect, |element| element.mark_selected(false));
        self.trigger(UNSELECT_EVENT, &Value::Null)
    }

    /// Detaches the members from the graph. Already removed members are
    /// skipped, so removing twice emits a single `remove` event.
    fn remove(&self) -> &Self {
        self.batch(EventKind::Remove, Element::detach)
    }

    /// Elements adjacent through incident edges.
    ///
    /// For a node: its incident edges followed by the nodes at their other
    /// ends. For an edge: its source and target nodes.
    fn neighbors(&self) -> Collection {
        self.flat_map_elements(Element::adjacent)
    }
}
