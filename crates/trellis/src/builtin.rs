//! Built-in extensions.
//!
//! These cover the minimum needed to build and inspect a graph without any
//! external collaborator:
//!
//! - renderer `headless`: no output, default style cascade
//! - layout `grid`: row-major grid placement
//! - layout `preset`: positions supplied in the options
//! - format `json`: [`GraphData`](crate::data::GraphData) as JSON

mod grid;
mod headless;
mod json;
mod preset;

pub use grid::GridLayout;
pub use headless::HeadlessRenderer;
pub use json::JsonFormat;
pub use preset::PresetLayout;

use std::rc::Rc;

use crate::extension::{Extension, Registry};

/// Registers every built-in extension in `registry`.
pub fn register_builtins(registry: &mut Registry) {
    registry
        .register(
            headless::NAME,
            Extension::renderer(|_| Rc::new(HeadlessRenderer::new())),
        )
        .register(
            grid::NAME,
            Extension::layout(|options| Box::new(GridLayout::from_options(options))),
        )
        .register(
            preset::NAME,
            Extension::layout(|options| Box::new(PresetLayout::from_options(options))),
        )
        .register(
            json::NAME,
            Extension::format(|options| Box::new(JsonFormat::from_options(options))),
        );
}
