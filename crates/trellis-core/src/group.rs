//! Element groups.
//!
//! Every element belongs to exactly one [`Group`]. Groups are separate id
//! namespaces: a node and an edge may share an id.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a group name is neither a node nor an edge group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("an element must be in group `nodes` or `edges`; found `{0}`")]
pub struct InvalidGroup(pub String);

/// The group (namespace) of a graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Node,
    Edge,
}

impl Group {
    /// Both groups, nodes first.
    pub const ALL: [Group; 2] = [Group::Node, Group::Edge];

    /// Singular name, e.g. `"node"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
        }
    }

    /// Plural store name, e.g. `"nodes"`.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Node => "nodes",
            Self::Edge => "edges",
        }
    }

    /// Prefix used for automatically generated ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Node => "n",
            Self::Edge => "e",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = InvalidGroup;

    /// Accepts the singular and plural names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" | "nodes" => Ok(Self::Node),
            "edge" | "edges" => Ok(Self::Edge),
            other => Err(InvalidGroup(other.to_string())),
        }
    }
}

impl PartialEq<str> for Group {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Group {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
