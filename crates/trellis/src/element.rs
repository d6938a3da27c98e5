//! Graph elements: nodes and edges.
//!
//! An [`Element`] is a cheap, clonable handle. Clones refer to the same
//! element; equality is identity. Elements are created by the
//! [`Graph`](crate::Graph) facade and keep a weak link to it, so a handle that
//! outlives its graph still answers reads while its mutations notify nobody.
//!
//! Most operations live on [`ElementLike`](crate::ElementLike), which is also
//! implemented by [`Collection`].

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use log::{debug, trace, warn};

use trellis_core::{
    group::Group,
    identifier::Id,
    value::{Attributes, Position, Value},
};

use crate::{
    collection::Collection,
    context::GraphContext,
    data::ElementSpec,
    element_like::ElementLike,
    error::{ListenerError, TrellisError},
    event::{Event, EventKind},
};

/// Data attribute holding the element id.
pub const ID_KEY: &str = "id";

/// Data attribute holding an edge's source node id.
pub const SOURCE_KEY: &str = "source";

/// Data attribute holding an edge's target node id.
pub const TARGET_KEY: &str = "target";

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(0);

/// Callback registered with [`ElementLike::bind`].
pub type Listener = Rc<dyn Fn(&Element, &Value) -> Result<(), ListenerError>>;

/// Handle identifying one registered listener.
///
/// Handles are unique for the whole process, so unbinding a handle through a
/// collection only ever affects the element it was bound on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

struct ElementState {
    data: Attributes,
    position: Position,
    bypass: Attributes,
    selected: bool,
    removed: bool,
    listeners: IndexMap<String, Vec<(ListenerId, Listener)>>,
}

struct ElementInner {
    group: Group,
    id: Id,
    state: RefCell<ElementState>,
    context: Weak<GraphContext>,
}

/// A node or an edge.
#[derive(Clone)]
pub struct Element(Rc<ElementInner>);

impl Element {
    /// Creates an element in `group`, registers it and emits an `add` event.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::DuplicateId`] when `spec.data` names an id that
    /// is already used in `group`. Nothing is inserted or notified then.
    pub(crate) fn create(
        context: &Rc<GraphContext>,
        group: Group,
        spec: ElementSpec,
    ) -> Result<Self, TrellisError> {
        let ElementSpec {
            mut data,
            position,
            bypass,
            ..
        } = spec;

        let preferred = data
            .get(ID_KEY)
            .filter(|value| !value.is_null())
            .map(|value| value.to_key().unwrap_or_else(|| value.to_string()));

        if let Some(preferred) = &preferred {
            if context.contains(group, Id::new(preferred)) {
                return Err(TrellisError::DuplicateId {
                    group,
                    id: preferred.clone(),
                });
            }
        }

        let id = context.allocate_id(group, preferred.as_deref());
        data.insert(ID_KEY.to_string(), Value::String(id.to_string()));

        let element = Self(Rc::new(ElementInner {
            group,
            id,
            state: RefCell::new(ElementState {
                data,
                position,
                bypass,
                selected: false,
                removed: false,
                listeners: IndexMap::new(),
            }),
            context: Rc::downgrade(context),
        }));

        context.insert(element.clone());
        debug!(group:% = group, id:% = id; "Element created");

        context
            .gate()
            .notify(Event::new(EventKind::Add, element.clone()));
        Ok(element)
    }

    pub fn group(&self) -> Group {
        self.0.group
    }

    pub fn id(&self) -> Id {
        self.0.id
    }

    pub fn is_node(&self) -> bool {
        self.0.group == Group::Node
    }

    pub fn is_edge(&self) -> bool {
        self.0.group == Group::Edge
    }

    /// Source node of a live edge, if it exists in the graph.
    pub fn source(&self) -> Option<Element> {
        self.endpoint(SOURCE_KEY)
    }

    /// Target node of a live edge, if it exists in the graph.
    pub fn target(&self) -> Option<Element> {
        self.endpoint(TARGET_KEY)
    }

    /// Returns a spec that recreates this element.
    pub fn to_spec(&self) -> ElementSpec {
        let state = self.0.state.borrow();
        ElementSpec {
            group: Some(self.0.group.plural().to_string()),
            data: state.data.clone(),
            position: state.position.clone(),
            bypass: state.bypass.clone(),
        }
    }

    pub(crate) fn context(&self) -> Option<Rc<GraphContext>> {
        self.0.context.upgrade()
    }

    pub(crate) fn belongs_to(&self, context: &Rc<GraphContext>) -> bool {
        std::ptr::eq(self.0.context.as_ptr(), Rc::as_ptr(context))
    }

    pub(crate) fn removed_flag(&self) -> bool {
        self.0.state.borrow().removed
    }

    pub(crate) fn selected_flag(&self) -> bool {
        self.0.state.borrow().selected
    }

    pub(crate) fn read_data(&self, key: &str) -> Option<Value> {
        self.0.state.borrow().data.get(key).cloned()
    }

    pub(crate) fn read_data_map(&self) -> Attributes {
        self.0.state.borrow().data.clone()
    }

    /// Returns whether the renderer should hear about the write.
    pub(crate) fn write_data(&self, key: &str, value: Value) -> bool {
        if key == ID_KEY {
            warn!(id:% = self.0.id; "Element ids are immutable; ignoring data write");
            return false;
        }
        let mut state = self.0.state.borrow_mut();
        state.data.insert(key.to_string(), value);
        !state.removed
    }

    pub(crate) fn read_position(&self) -> Position {
        self.0.state.borrow().position.clone()
    }

    /// Returns whether the renderer should hear about the write.
    pub(crate) fn write_position(&self, position: Position) -> bool {
        let mut state = self.0.state.borrow_mut();
        state.position = position;
        !state.removed
    }

    pub(crate) fn read_bypass(&self) -> Attributes {
        self.0.state.borrow().bypass.clone()
    }

    pub(crate) fn write_bypass(&self, bypass: Attributes) {
        self.0.state.borrow_mut().bypass = bypass;
    }

    pub(crate) fn computed_style(&self) -> Attributes {
        let Some(context) = self.context() else {
            return Attributes::new();
        };
        let sheet = context.style();
        let bypass = context.bypass();
        context.renderer().style(self, &sheet, &bypass)
    }

    /// Returns whether the renderer should hear about the change.
    pub(crate) fn mark_selected(&self, selected: bool) -> bool {
        let mut state = self.0.state.borrow_mut();
        state.selected = selected;
        !state.removed
    }

    /// Removes the element from its store. Returns `false` if it was already
    /// removed.
    pub(crate) fn detach(&self) -> bool {
        {
            let mut state = self.0.state.borrow_mut();
            if state.removed {
                return false;
            }
            state.removed = true;
        }
        if let Some(context) = self.context() {
            context.remove(self);
        }
        debug!(group:% = self.0.group, id:% = self.0.id; "Element removed");
        true
    }

    pub(crate) fn attach_listener(&self, event: &str, listener: Listener) -> ListenerId {
        let handle = ListenerId::next();
        self.0
            .state
            .borrow_mut()
            .listeners
            .entry(event.to_string())
            .or_default()
            .push((handle, listener));
        handle
    }

    pub(crate) fn detach_listeners(&self, event: &str, handle: Option<ListenerId>) {
        let mut state = self.0.state.borrow_mut();
        match handle {
            None => {
                state.listeners.shift_remove(event);
            }
            Some(handle) => {
                if let Some(entries) = state.listeners.get_mut(event) {
                    entries.retain(|(id, _)| *id != handle);
                }
            }
        }
    }

    /// Calls the listeners of `event` that were bound when dispatch started.
    pub(crate) fn fire(&self, event: &str, payload: &Value) -> Result<(), TrellisError> {
        let listeners: Vec<Listener> = self
            .0
            .state
            .borrow()
            .listeners
            .get(event)
            .map(|entries| entries.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();

        trace!(id:% = self.0.id, event, listeners = listeners.len(); "Triggering event");
        for listener in listeners {
            listener(self, payload).map_err(|source| TrellisError::Listener {
                event: event.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Live node referenced by the data attribute `key`.
    fn endpoint(&self, key: &str) -> Option<Element> {
        if self.0.group != Group::Edge {
            return None;
        }
        let node_id = self.read_data(key)?.to_key()?;
        self.context()?.get(Group::Node, Id::new(&node_id))
    }

    fn endpoint_id(&self, key: &str) -> Option<Id> {
        self.read_data(key)?.to_key().map(Id::from)
    }

    pub(crate) fn adjacent(&self) -> Vec<Element> {
        if self.removed_flag() {
            return Vec::new();
        }
        let Some(context) = self.context() else {
            return Vec::new();
        };

        match self.0.group {
            Group::Edge => {
                let mut ends = Vec::with_capacity(2);
                for end in [self.source(), self.target()].into_iter().flatten() {
                    if !ends.contains(&end) {
                        ends.push(end);
                    }
                }
                ends
            }
            Group::Node => {
                let id = self.0.id;
                let edges: Vec<Element> = context
                    .elements(Group::Edge)
                    .into_iter()
                    .filter(|edge| {
                        edge.endpoint_id(SOURCE_KEY) == Some(id)
                            || edge.endpoint_id(TARGET_KEY) == Some(id)
                    })
                    .collect();

                let mut nodes: Vec<Element> = Vec::new();
                for edge in &edges {
                    for end in [edge.source(), edge.target()].into_iter().flatten() {
                        if end != *self && !nodes.contains(&end) {
                            nodes.push(end);
                        }
                    }
                }

                edges.into_iter().chain(nodes).collect()
            }
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("group", &self.0.group)
            .field("id", &self.0.id.to_string())
            .field("removed", &self.removed_flag())
            .finish()
    }
}

impl ElementLike for Element {
    type Each<T> = T;

    fn map_each<T>(&self, mut f: impl FnMut(&Element) -> T) -> Self::Each<T> {
        f(self)
    }

    fn batch(&self, kind: EventKind, mut f: impl FnMut(&Element) -> bool) -> &Self {
        if f(self) {
            if let Some(context) = self.context() {
                context.gate().notify(Event::new(kind, self.clone()));
            }
        }
        self
    }

    fn try_each(
        &self,
        mut f: impl FnMut(&Element) -> Result<(), TrellisError>,
    ) -> Result<&Self, TrellisError> {
        f(self)?;
        Ok(self)
    }

    fn for_each_member(&self, mut f: impl FnMut(&Element)) -> &Self {
        f(self);
        self
    }

    fn flat_map_elements(&self, mut f: impl FnMut(&Element) -> Vec<Element>) -> Collection {
        Collection::new(f(self))
    }
}
