//! The graph facade.
//!
//! A [`Graph`] owns the element stores, the style sheet and bypass, the
//! notification gate and the active renderer and layout. It is built once by a
//! [`GraphBuilder`], which resolves the extensions, loads the initial data and
//! runs the initial layout before handing the graph out.

use std::{fmt, rc::Rc};

use log::{debug, info, warn};

use trellis_core::{
    group::Group,
    identifier::Id,
    style::{Bypass, StyleSheet},
    value::Attributes,
};

use crate::{
    collection::Collection,
    config::{AppConfig, ExtensionConfig},
    context::GraphContext,
    data::{ElementSpec, GraphData},
    element::Element,
    element_like::ElementLike,
    error::TrellisError,
    event::{Event, EventKind},
    extension::{Layout, LayoutContext, Registry, Renderer},
};

/// What [`Graph::add`] accepts.
///
/// Specs must name their group. Existing elements and collections are copied:
/// each member is recreated from its group, data, position and bypass style.
#[derive(Debug, Clone)]
pub enum Additions {
    Specs(Vec<ElementSpec>),
    Elements(Collection),
}

impl From<ElementSpec> for Additions {
    fn from(spec: ElementSpec) -> Self {
        Self::Specs(vec![spec])
    }
}

impl From<Vec<ElementSpec>> for Additions {
    fn from(specs: Vec<ElementSpec>) -> Self {
        Self::Specs(specs)
    }
}

impl From<Element> for Additions {
    fn from(element: Element) -> Self {
        Self::Elements(element.into())
    }
}

impl From<&Element> for Additions {
    fn from(element: &Element) -> Self {
        Self::Elements(element.into())
    }
}

impl From<Collection> for Additions {
    fn from(collection: Collection) -> Self {
        Self::Elements(collection)
    }
}

impl From<&Collection> for Additions {
    fn from(collection: &Collection) -> Self {
        Self::Elements(collection.clone())
    }
}

/// Builder for [`Graph`].
///
/// # Examples
///
/// ```
/// use trellis::{Graph, Registry};
/// use trellis::config::ExtensionConfig;
/// use trellis::data::{ElementSpec, GraphData};
///
/// let registry = Registry::with_builtins();
/// let graph = Graph::builder()
///     .with_layout(ExtensionConfig::new("grid").with_option("columns", 2))
///     .with_data(GraphData::new(
///         vec![ElementSpec::node("a"), ElementSpec::node("b")],
///         vec![ElementSpec::edge("ab", "a", "b")],
///     ))
///     .build(&registry)
///     .unwrap();
///
/// assert_eq!(graph.nodes().len(), 2);
/// assert!(graph.edge("ab").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: AppConfig,
    data: GraphData,
    bypass: Bypass,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the renderer, layout and style settings at once.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_renderer(mut self, renderer: ExtensionConfig) -> Self {
        self.config = self.config.with_renderer(renderer);
        self
    }

    pub fn with_layout(mut self, layout: ExtensionConfig) -> Self {
        self.config = self.config.with_layout(layout);
        self
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.config = self.config.with_style(style);
        self
    }

    pub fn with_bypass(mut self, bypass: Bypass) -> Self {
        self.bypass = bypass;
        self
    }

    /// Elements loaded at construction time.
    pub fn with_data(mut self, data: GraphData) -> Self {
        self.data = data;
        self
    }

    /// Resolves the extensions, loads the data and runs the initial layout.
    ///
    /// The layout and the renderer are resolved before any element exists, so
    /// an unknown name fails without loading anything.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::UnknownExtension`] for unregistered names, the
    /// first element creation error of the data, or the layout's error.
    pub fn build(self, registry: &Registry) -> Result<Graph, TrellisError> {
        let Self {
            config,
            data,
            bypass,
        } = self;

        info!(
            renderer = config.renderer().name(),
            layout = config.layout().name(),
            elements = data.len();
            "Building graph"
        );

        let layout = registry.layout(config.layout())?;
        let renderer = registry.renderer(config.renderer())?;

        let context = GraphContext::new(renderer, config.style().clone(), bypass);
        let mut graph = Graph {
            context,
            registry: registry.clone(),
            layout_config: config.layout().clone(),
            layout,
        };

        graph.load(data)?;
        graph.run_layout()?;

        info!(
            nodes = graph.context.len(Group::Node),
            edges = graph.context.len(Group::Edge);
            "Graph ready"
        );
        Ok(graph)
    }
}

/// A graph of nodes and edges.
pub struct Graph {
    context: Rc<GraphContext>,
    registry: Registry,
    layout_config: ExtensionConfig,
    layout: Box<dyn Layout>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Creates elements and emits a single `add` event for all of them.
    ///
    /// Creation continues past failing members; the event still covers every
    /// element that was created.
    ///
    /// # Errors
    ///
    /// Returns the first creation error: [`TrellisError::InvalidGroup`] for a
    /// spec without a valid group or [`TrellisError::DuplicateId`] for an id
    /// already in use.
    pub fn add(&self, additions: impl Into<Additions>) -> Result<Collection, TrellisError> {
        let items: Vec<Result<(Group, ElementSpec), TrellisError>> = match additions.into() {
            Additions::Specs(specs) => specs
                .into_iter()
                .map(|spec| spec.resolve_group().map(|group| (group, spec)))
                .collect(),
            Additions::Elements(elements) => elements
                .iter()
                .map(|element| Ok((element.group(), element.to_spec())))
                .collect(),
        };

        let (created, error) = self.create_all(items);
        if !created.is_empty() {
            self.context
                .gate()
                .notify(Event::new(EventKind::Add, created.clone()));
        }

        match error {
            Some(err) => Err(err),
            None => Ok(created),
        }
    }

    /// Creates one node. The group of `spec` is ignored.
    pub fn add_node(&self, spec: ElementSpec) -> Result<Element, TrellisError> {
        Element::create(&self.context, Group::Node, spec)
    }

    /// Creates one edge. The group of `spec` is ignored.
    pub fn add_edge(&self, spec: ElementSpec) -> Result<Element, TrellisError> {
        Element::create(&self.context, Group::Edge, spec)
    }

    /// Removes the members of `target` that belong to this graph and returns
    /// them. Elements of other graphs are left alone.
    pub fn remove(&self, target: &impl ElementLike) -> Collection {
        let members = target
            .flat_map_elements(|element| vec![element.clone()])
            .filter(|_, element| element.belongs_to(&self.context));
        members.remove();
        members
    }

    pub fn node(&self, id: &str) -> Option<Element> {
        self.context.get(Group::Node, Id::new(id))
    }

    pub fn edge(&self, id: &str) -> Option<Element> {
        self.context.get(Group::Edge, Id::new(id))
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> Collection {
        self.context.elements(Group::Node).into()
    }

    pub fn nodes_where(&self, predicate: impl FnMut(&Element) -> bool) -> Collection {
        Self::matching(self.context.elements(Group::Node), predicate)
    }

    /// Live edges in insertion order.
    pub fn edges(&self) -> Collection {
        self.context.elements(Group::Edge).into()
    }

    pub fn edges_where(&self, predicate: impl FnMut(&Element) -> bool) -> Collection {
        Self::matching(self.context.elements(Group::Edge), predicate)
    }

    /// Live nodes followed by live edges.
    pub fn elements(&self) -> Collection {
        self.nodes().add(self.edges())
    }

    pub fn elements_where(&self, mut predicate: impl FnMut(&Element) -> bool) -> Collection {
        self.elements().filter(|_, element| predicate(element))
    }

    /// Returns a copy of the style sheet.
    pub fn style(&self) -> StyleSheet {
        self.context.style()
    }

    /// Replaces the style sheet and emits a `style` event carrying it.
    pub fn set_style(&self, style: StyleSheet) -> &Self {
        self.context.set_style(style.clone());
        debug!("Style sheet replaced");
        self.context
            .gate()
            .notify(Event::new(EventKind::Style, Collection::default()).with_style(style));
        self
    }

    /// Returns a copy of the graph-wide bypass.
    pub fn bypass(&self) -> Bypass {
        self.context.bypass()
    }

    /// Replaces the graph-wide bypass and emits a `bypass` event carrying it.
    pub fn set_bypass(&self, bypass: Bypass) -> &Self {
        self.context.set_bypass(bypass.clone());
        debug!("Bypass replaced");
        self.context
            .gate()
            .notify(Event::new(EventKind::Bypass, Collection::default()).with_bypass(bypass));
        self
    }

    /// Runs a layout over the current nodes and edges.
    ///
    /// With `None` the active layout runs again. Otherwise the named layout is
    /// resolved, becomes the active one and runs; if resolution fails the
    /// active layout is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::UnknownExtension`] for an unregistered layout or
    /// the error reported by the layout itself.
    pub fn layout(&mut self, params: Option<ExtensionConfig>) -> Result<&mut Self, TrellisError> {
        if let Some(config) = params {
            self.layout = self.registry.layout(&config)?;
            self.layout_config = config;
        }
        self.run_layout()?;
        Ok(self)
    }

    /// Forwards `params` to the renderer.
    pub fn pan(&self, params: &Attributes) -> &Self {
        self.context.renderer().pan(params);
        self
    }

    /// Creates every element of `data` without per-element notifications,
    /// then emits one `add` event carrying all live elements, the style sheet
    /// and the bypass.
    ///
    /// Existing elements are kept.
    ///
    /// # Errors
    ///
    /// Returns the first creation error after the rest of `data` was loaded.
    pub fn load(&self, data: GraphData) -> Result<Collection, TrellisError> {
        let items = data.into_grouped().map(Ok).collect();
        let (created, error) = self.create_all(items);
        debug!(created = created.len(); "Graph data loaded");

        self.context.gate().notify(
            Event::new(EventKind::Add, self.elements())
                .with_style(self.context.style())
                .with_bypass(self.context.bypass()),
        );

        match error {
            Some(err) => Err(err),
            None => Ok(created),
        }
    }

    /// Live elements as plain data.
    pub fn snapshot(&self) -> GraphData {
        let specs = |group: Group| {
            self.context
                .elements(group)
                .iter()
                .map(|element| ElementSpec {
                    group: None,
                    ..element.to_spec()
                })
                .collect::<Vec<_>>()
        };
        GraphData::new(specs(Group::Node), specs(Group::Edge))
    }

    /// The active renderer.
    pub fn renderer(&self) -> Rc<dyn Renderer> {
        Rc::clone(self.context.renderer())
    }

    /// Name of the active layout.
    pub fn layout_name(&self) -> &str {
        self.layout_config.name()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn run_layout(&mut self) -> Result<(), TrellisError> {
        let context = LayoutContext {
            nodes: self.nodes(),
            edges: self.edges(),
            renderer: Rc::clone(self.context.renderer()),
            options: self.layout_config.options(),
        };
        info!(layout = self.layout_config.name(), nodes = context.nodes.len(); "Running layout");
        self.layout.run(&context)
    }

    /// Creates elements with notifications suppressed. Returns the created
    /// elements and the first error.
    fn create_all(
        &self,
        items: Vec<Result<(Group, ElementSpec), TrellisError>>,
    ) -> (Collection, Option<TrellisError>) {
        let mut first_error = None;
        let created = self.context.gate().suppressed(|| {
            items
                .into_iter()
                .filter_map(|item| {
                    let result = item
                        .and_then(|(group, spec)| Element::create(&self.context, group, spec));
                    match result {
                        Ok(element) => Some(element),
                        Err(err) => {
                            if first_error.is_none() {
                                first_error = Some(err);
                            } else {
                                warn!(err:err; "Element creation failed");
                            }
                            None
                        }
                    }
                })
                .collect::<Collection>()
        });
        (created, first_error)
    }

    fn matching(elements: Vec<Element>, mut predicate: impl FnMut(&Element) -> bool) -> Collection {
        elements.into_iter().filter(|element| predicate(element)).collect()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.context.len(Group::Node))
            .field("edges", &self.context.len(Group::Edge))
            .field("layout", &self.layout_config.name())
            .finish()
    }
}
