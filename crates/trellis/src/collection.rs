//! Ordered, fixed-size groups of elements.
//!
//! A [`Collection`] captures its members when it is built. It is not a live
//! view: removing a member from the graph leaves it in the collection, and
//! operations on it become no-ops as far as the renderer is concerned.
//!
//! Every [`ElementLike`] operation works on a collection. Chained mutations
//! are batched: member notifications are suppressed while the operation runs
//! and a single event covering the changed members is emitted afterwards.
//!
//! # Example
//!
//! ```
//! # use trellis::{ElementLike, Graph, Registry};
//! # use trellis::data::{ElementSpec, GraphData};
//! let registry = Registry::with_builtins();
//! let data = GraphData::new(vec![ElementSpec::node("a"), ElementSpec::node("b")], vec![]);
//! let graph = Graph::builder().with_data(data).build(&registry).unwrap();
//!
//! let nodes = graph.nodes();
//! nodes.set_data("weight", 2).set_data("label", "x");
//! assert_eq!(nodes.data("weight").len(), 2);
//! ```

use std::{rc::Rc, slice};

use trellis_core::value::Position;

use crate::{
    context::GraphContext,
    element::Element,
    element_like::ElementLike,
    error::TrellisError,
    event::{Event, EventKind},
};

/// An ordered sequence of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    elements: Vec<Element>,
}

impl Collection {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn first(&self) -> Option<&Element> {
        self.elements.first()
    }

    pub fn iter(&self) -> slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.elements.contains(element)
    }

    pub fn to_vec(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Calls `f(index, element)` for every member in order.
    ///
    /// Members removed from the graph along the way are still visited.
    pub fn each(&self, mut f: impl FnMut(usize, &Element)) -> &Self {
        for (index, element) in self.elements.iter().enumerate() {
            f(index, element);
        }
        self
    }

    /// Members for which `predicate(index, element)` holds, in order.
    pub fn filter(&self, mut predicate: impl FnMut(usize, &Element) -> bool) -> Collection {
        self.elements
            .iter()
            .enumerate()
            .filter(|(index, element)| predicate(*index, *element))
            .map(|(_, element)| element.clone())
            .collect()
    }

    /// This collection followed by the members of `other`. No deduplication.
    pub fn add(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.elements
            .iter()
            .chain(other.elements.iter())
            .cloned()
            .collect()
    }

    /// Sets every member's position to `f(index, element)` and emits a single
    /// `position` event.
    ///
    /// Layouts should apply their results through this method.
    pub fn positions(&self, mut f: impl FnMut(usize, &Element) -> Position) -> &Self {
        let mut index = 0;
        self.batch(EventKind::Position, |element| {
            let position = f(index, element);
            index += 1;
            element.write_position(position)
        })
    }

    /// Distinct graphs the members belong to, in first-seen order.
    fn contexts(&self) -> Vec<Rc<GraphContext>> {
        let mut contexts: Vec<Rc<GraphContext>> = Vec::new();
        for context in self.elements.iter().filter_map(Element::context) {
            if !contexts.iter().any(|seen| Rc::ptr_eq(seen, &context)) {
                contexts.push(context);
            }
        }
        contexts
    }
}

impl ElementLike for Collection {
    type Each<T> = Vec<T>;

    fn map_each<T>(&self, f: impl FnMut(&Element) -> T) -> Self::Each<T> {
        self.elements.iter().map(f).collect()
    }

    fn batch(&self, kind: EventKind, mut f: impl FnMut(&Element) -> bool) -> &Self {
        let contexts = self.contexts();

        let changed: Vec<Element> = {
            let _guards: Vec<_> = contexts
                .iter()
                .map(|context| context.gate().suppress())
                .collect();
            self.elements
                .iter()
                .filter(|element| f(*element))
                .cloned()
                .collect()
        };

        // One event per graph, carrying only that graph's changed members.
        for context in &contexts {
            let members: Collection = changed
                .iter()
                .filter(|element| element.belongs_to(context))
                .cloned()
                .collect();
            if !members.is_empty() {
                context.gate().notify(Event::new(kind, members));
            }
        }
        self
    }

    fn try_each(
        &self,
        mut f: impl FnMut(&Element) -> Result<(), TrellisError>,
    ) -> Result<&Self, TrellisError> {
        for element in &self.elements {
            f(element)?;
        }
        Ok(self)
    }

    fn for_each_member(&self, f: impl FnMut(&Element)) -> &Self {
        self.elements.iter().for_each(f);
        self
    }

    fn flat_map_elements(&self, f: impl FnMut(&Element) -> Vec<Element>) -> Collection {
        self.elements.iter().flat_map(f).collect()
    }
}

impl From<Element> for Collection {
    fn from(element: Element) -> Self {
        Self::new(vec![element])
    }
}

impl From<&Element> for Collection {
    fn from(element: &Element) -> Self {
        Self::new(vec![element.clone()])
    }
}

impl From<&Collection> for Collection {
    fn from(collection: &Collection) -> Self {
        collection.clone()
    }
}

impl From<Vec<Element>> for Collection {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}

impl FromIterator<Element> for Collection {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Element;
    type IntoIter = slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
