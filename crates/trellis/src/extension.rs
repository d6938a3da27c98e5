//! Extension points: renderers, layouts and formats.
//!
//! The graph model never draws, places or parses anything itself. It talks to
//! three kinds of collaborators through the traits in this module and finds
//! them by name in a [`Registry`]:
//!
//! - [`Renderer`]: receives change [`Event`]s and resolves element styles.
//! - [`Layout`]: computes positions and applies them with
//!   [`Collection::positions`].
//! - [`Format`]: converts between text and [`GraphData`].

mod registry;

pub use registry::{Extension, FormatFactory, LayoutFactory, Registry, RendererFactory};

use std::{fmt, rc::Rc, str::FromStr};

use trellis_core::{
    style::{Bypass, StyleSheet},
    value::Attributes,
};

use crate::{
    collection::Collection, data::GraphData, element::Element, error::TrellisError, event::Event,
};

/// The kinds of extension a [`Registry`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Format,
    Renderer,
    Layout,
}

impl ExtensionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Renderer => "renderer",
            Self::Layout => "layout",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtensionKind {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "format" => Ok(Self::Format),
            "renderer" => Ok(Self::Renderer),
            "layout" => Ok(Self::Layout),
            _ => Err(TrellisError::Config(format!("unknown extension kind `{s}`"))),
        }
    }
}

/// Receives change notifications and resolves element styles.
///
/// Methods take `&self`: renderers that keep state use interior mutability.
/// They are called with no internal borrow held, so they may read from or
/// mutate the graph while handling an event.
pub trait Renderer {
    /// Handles one change notification.
    fn notify(&self, event: &Event);

    /// Computes the style of `element` from the current style sheet and bypass.
    fn style(&self, element: &Element, sheet: &StyleSheet, bypass: &Bypass) -> Attributes {
        cascade_style(element, sheet, bypass)
    }

    /// Moves the viewport.
    fn pan(&self, _params: &Attributes) {}
}

/// Default style resolution.
///
/// Later layers override earlier ones: global rules, then the element's group
/// rules, then the graph bypass entry for the element, then the element's own
/// bypass style.
pub fn cascade_style(element: &Element, sheet: &StyleSheet, bypass: &Bypass) -> Attributes {
    let group = element.group();
    let mut style = sheet.global.clone();
    style.extend(
        sheet
            .group_rules(group)
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );

    let id = element.id().to_string();
    if let Some(overrides) = bypass.for_element(group, &id) {
        style.extend(overrides.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    style.extend(element.read_bypass());
    style
}

/// Everything a layout run can see.
pub struct LayoutContext<'a> {
    pub nodes: Collection,
    pub edges: Collection,
    pub renderer: Rc<dyn Renderer>,
    pub options: &'a Attributes,
}

/// Places elements.
pub trait Layout {
    /// Computes positions and applies them through
    /// [`Collection::positions`] so that the renderer sees one event.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Layout`] if the layout cannot be computed.
    fn run(&mut self, context: &LayoutContext<'_>) -> Result<(), TrellisError>;
}

/// Converts graphs between text and [`GraphData`].
pub trait Format {
    /// # Errors
    ///
    /// Returns [`TrellisError::Format`] for malformed input.
    fn parse(&self, input: &str) -> Result<GraphData, TrellisError>;

    /// # Errors
    ///
    /// Returns [`TrellisError::Format`] if the data cannot be encoded.
    fn serialize(&self, data: &GraphData) -> Result<String, TrellisError>;
}
