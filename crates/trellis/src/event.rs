//! Change notifications delivered to renderers.

use std::fmt;

use trellis_core::{
    identifier::Id,
    style::{Bypass, StyleSheet},
};

use crate::{collection::Collection, element_like::ElementLike};

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Add,
    Remove,
    Data,
    Position,
    Select,
    Unselect,
    Style,
    Bypass,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Data => "data",
            Self::Position => "position",
            Self::Select => "select",
            Self::Unselect => "unselect",
            Self::Style => "style",
            Self::Bypass => "bypass",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single change notification.
///
/// Element-level mutations carry the affected elements; batched operations
/// carry the whole affected collection in one event. Style and bypass
/// replacements carry the new descriptor. A full `load` carries all three.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    elements: Collection,
    style: Option<StyleSheet>,
    bypass: Option<Bypass>,
}

impl Event {
    pub fn new(kind: EventKind, elements: impl Into<Collection>) -> Self {
        Self {
            kind,
            elements: elements.into(),
            style: None,
            bypass: None,
        }
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_bypass(mut self, bypass: Bypass) -> Self {
        self.bypass = Some(bypass);
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn elements(&self) -> &Collection {
        &self.elements
    }

    pub fn style(&self) -> Option<&StyleSheet> {
        self.style.as_ref()
    }

    pub fn bypass(&self) -> Option<&Bypass> {
        self.bypass.as_ref()
    }

    /// Ids of the elements referenced by this event, in order.
    pub fn ids(&self) -> Vec<Id> {
        self.elements.id()
    }
}
