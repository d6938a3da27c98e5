//! Plain-data descriptions of elements and graphs.
//!
//! [`ElementSpec`] is what client code hands to the graph to create an
//! element; [`GraphData`] is a whole graph as loaded at construction time,
//! produced by a format's parser and by [`Graph::snapshot`](crate::Graph::snapshot).

use serde::{Deserialize, Serialize};

use trellis_core::{
    group::Group,
    value::{Attributes, Position, Value},
};

use crate::{
    element::{ID_KEY, SOURCE_KEY, TARGET_KEY},
    error::TrellisError,
};

/// Parameters for creating one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// `nodes`/`node` or `edges`/`edge`. Only required when the element is
    /// added without an implied group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Attributes; `id` is generated when missing.
    #[serde(default)]
    pub data: Attributes,

    #[serde(default, skip_serializing_if = "Position::is_empty")]
    pub position: Position,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub bypass: Attributes,
}

impl ElementSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node spec with an explicit id.
    pub fn node(id: &str) -> Self {
        Self::new().with_group(Group::Node).with_id(id)
    }

    /// Edge spec with an explicit id, source and target.
    pub fn edge(id: &str, source: &str, target: &str) -> Self {
        Self::new()
            .with_group(Group::Edge)
            .with_id(id)
            .with_data(SOURCE_KEY, source)
            .with_data(TARGET_KEY, target)
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.group = Some(group.plural().to_string());
        self
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_data(ID_KEY, id)
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_bypass(mut self, bypass: Attributes) -> Self {
        self.bypass = bypass;
        self
    }

    /// Parses the group named by this spec.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::InvalidGroup`] if the group is missing or is not
    /// a node or edge group.
    pub fn resolve_group(&self) -> Result<Group, TrellisError> {
        let name = self.group.as_deref().unwrap_or("undefined");
        Ok(name.parse::<Group>()?)
    }
}

/// A whole graph as plain data, nodes before edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<ElementSpec>,

    #[serde(default)]
    pub edges: Vec<ElementSpec>,
}

impl GraphData {
    pub fn new(nodes: Vec<ElementSpec>, edges: Vec<ElementSpec>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Specs paired with the group their list implies.
    pub(crate) fn into_grouped(self) -> impl Iterator<Item = (Group, ElementSpec)> {
        self.nodes
            .into_iter()
            .map(|spec| (Group::Node, spec))
            .chain(self.edges.into_iter().map(|spec| (Group::Edge, spec)))
    }
}
