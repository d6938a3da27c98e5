//! Positions supplied up front.

use indexmap::IndexMap;
use log::{debug, warn};

use trellis_core::value::{Attributes, Position};

use crate::{
    error::TrellisError,
    extension::{Layout, LayoutContext},
};

pub(super) const NAME: &str = "preset";

/// Moves nodes to positions given in the `positions` option, a map from node
/// id to a position map. Nodes without an entry keep their position.
#[derive(Debug, Clone, Default)]
pub struct PresetLayout {
    positions: IndexMap<String, Position>,
}

impl PresetLayout {
    pub fn new(positions: IndexMap<String, Position>) -> Self {
        Self { positions }
    }

    pub fn from_options(options: &Attributes) -> Self {
        let Some(entries) = options.get("positions").and_then(|value| value.as_map()) else {
            return Self::default();
        };

        let positions = entries
            .iter()
            .filter_map(|(id, value)| match value.to_position() {
                Some(position) => Some((id.clone(), position)),
                None => {
                    warn!(id; "Preset position is not a map; skipping");
                    None
                }
            })
            .collect();
        Self { positions }
    }
}

impl Layout for PresetLayout {
    fn run(&mut self, context: &LayoutContext<'_>) -> Result<(), TrellisError> {
        let targets = context
            .nodes
            .filter(|_, node| node.id().with_str(|id| self.positions.contains_key(id)));
        debug!(presets = self.positions.len(), matched = targets.len(); "Running preset layout");

        targets.positions(|_, node| {
            node.id()
                .with_str(|id| self.positions.get(id).cloned())
                .unwrap_or_default()
        });
        Ok(())
    }
}
