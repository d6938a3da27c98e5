//! Graph-wide style descriptors.
//!
//! A graph carries exactly one [`StyleSheet`] and one [`Bypass`]. Both are
//! replaced as a whole, never merged; renderers read them when resolving the
//! computed style of an element.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{group::Group, value::Attributes};

/// Style rules applied to every element, then per group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default)]
    pub global: Attributes,

    #[serde(default)]
    pub nodes: Attributes,

    #[serde(default)]
    pub edges: Attributes,
}

impl StyleSheet {
    /// Returns the rules for one group.
    pub fn group_rules(&self, group: Group) -> &Attributes {
        match group {
            Group::Node => &self.nodes,
            Group::Edge => &self.edges,
        }
    }
}

/// Per-element style overrides keyed by group and element id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bypass {
    #[serde(default)]
    pub nodes: IndexMap<String, Attributes>,

    #[serde(default)]
    pub edges: IndexMap<String, Attributes>,
}

impl Bypass {
    /// Returns the overrides recorded for the element `id` in `group`.
    pub fn for_element(&self, group: Group, id: &str) -> Option<&Attributes> {
        match group {
            Group::Node => self.nodes.get(id),
            Group::Edge => self.edges.get(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
