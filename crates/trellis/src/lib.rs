//! Trellis - an in-memory graph model with pluggable renderers and layouts.
//!
//! A [`Graph`] holds nodes and edges, each with free-form data, a position and
//! a style override. Every change is reported to a [`Renderer`] as an
//! [`Event`]; a [`Layout`] computes positions; a [`Format`] converts graphs to
//! and from text. Extensions are found by name in a [`Registry`].
//!
//! Single elements and collections share one interface, [`ElementLike`]:
//!
//! ```
//! use trellis::{ElementLike, Graph, Registry};
//! use trellis::data::{ElementSpec, GraphData};
//!
//! let registry = Registry::with_builtins();
//! let graph = Graph::builder()
//!     .with_data(GraphData::new(
//!         vec![ElementSpec::node("a"), ElementSpec::node("b")],
//!         vec![ElementSpec::edge("ab", "a", "b")],
//!     ))
//!     .build(&registry)
//!     .unwrap();
//!
//! let a = graph.node("a").unwrap();
//! a.set_data("label", "first");
//! graph.nodes().set_data("weight", 1);
//!
//! assert_eq!(a.neighbors().len(), 2);
//! ```

pub mod builtin;
pub mod config;
pub mod data;

mod allocator;
mod collection;
mod context;
mod element;
mod element_like;
mod error;
mod event;
mod extension;
mod gate;
mod graph;

pub use trellis_core::{group, identifier, style, value};

pub use collection::Collection;
pub use element::{Element, ID_KEY, ListenerId, SOURCE_KEY, TARGET_KEY};
pub use element_like::{ElementLike, SELECT_EVENT, UNSELECT_EVENT};
pub use error::{ListenerError, TrellisError};
pub use event::{Event, EventKind};
pub use extension::{
    Extension, ExtensionKind, Format, FormatFactory, Layout, LayoutContext, LayoutFactory,
    Registry, Renderer, RendererFactory, cascade_style,
};
pub use graph::{Additions, Graph, GraphBuilder};

use std::sync::{Mutex, PoisonError};

use log::LevelFilter;

static LEVEL_BEFORE_QUIET: Mutex<Option<LevelFilter>> = Mutex::new(None);

/// Silences all logging, or restores the level active before the last call
/// with `true`.
pub fn set_quiet(quiet: bool) {
    let mut saved = LEVEL_BEFORE_QUIET
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if quiet {
        if saved.is_none() {
            *saved = Some(log::max_level());
        }
        log::set_max_level(LevelFilter::Off);
    } else if let Some(level) = saved.take() {
        log::set_max_level(level);
    }
}
