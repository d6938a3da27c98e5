//! Grid placement.

use log::debug;

use trellis_core::value::{Attributes, Position};

use crate::{
    error::TrellisError,
    extension::{Layout, LayoutContext},
};

pub(super) const NAME: &str = "grid";

const DEFAULT_SPACING: f64 = 100.0;

/// Places nodes row by row on a square-ish grid. Edges are not positioned.
///
/// Options:
/// - `columns`: number of columns, default `ceil(sqrt(node count))`
/// - `spacing`: distance between neighboring cells, default `100`
#[derive(Debug, Clone)]
pub struct GridLayout {
    columns: Option<usize>,
    spacing: f64,
}

impl GridLayout {
    pub fn new() -> Self {
        Self {
            columns: None,
            spacing: DEFAULT_SPACING,
        }
    }

    pub fn from_options(options: &Attributes) -> Self {
        let columns = options
            .get("columns")
            .and_then(|value| value.as_f64())
            .filter(|columns| *columns >= 1.0)
            .map(|columns| columns as usize);
        let spacing = options
            .get("spacing")
            .and_then(|value| value.as_f64())
            .unwrap_or(DEFAULT_SPACING);
        Self { columns, spacing }
    }

    fn columns_for(&self, count: usize) -> usize {
        self.columns
            .unwrap_or_else(|| (count as f64).sqrt().ceil() as usize)
            .max(1)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for GridLayout {
    fn run(&mut self, context: &LayoutContext<'_>) -> Result<(), TrellisError> {
        if !self.spacing.is_finite() {
            return Err(TrellisError::Layout(format!(
                "grid spacing must be finite, got {}",
                self.spacing
            )));
        }

        let columns = self.columns_for(context.nodes.len());
        debug!(nodes = context.nodes.len(), columns, spacing = self.spacing; "Running grid layout");

        let spacing = self.spacing;
        context.nodes.positions(|index, _| {
            let row = index / columns;
            let column = index % columns;
            Position::from([
                ("x".to_string(), column as f64 * spacing),
                ("y".to_string(), row as f64 * spacing),
            ])
        });
        Ok(())
    }
}
