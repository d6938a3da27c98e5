//! Name-based lookup of extension implementations.
//!
//! A [`Registry`] is populated by explicit registration before graphs are
//! built and is handed to [`GraphBuilder::build`](crate::GraphBuilder::build).
//! Tests can build an isolated registry per case. Names are case-insensitive
//! and a later registration under the same name replaces the earlier one.

use std::{collections::HashMap, fmt, rc::Rc};

use log::{debug, trace};

use trellis_core::value::Attributes;

use super::{ExtensionKind, Format, Layout, Renderer};
use crate::{builtin, config::ExtensionConfig, error::TrellisError};

/// Builds a renderer from its options.
pub type RendererFactory = Rc<dyn Fn(&Attributes) -> Rc<dyn Renderer>>;

/// Builds a layout from its options.
pub type LayoutFactory = Rc<dyn Fn(&Attributes) -> Box<dyn Layout>>;

/// Builds a format from its options.
pub type FormatFactory = Rc<dyn Fn(&Attributes) -> Box<dyn Format>>;

/// A registered implementation; the variant decides its kind.
#[derive(Clone)]
pub enum Extension {
    Format(FormatFactory),
    Renderer(RendererFactory),
    Layout(LayoutFactory),
}

impl Extension {
    pub fn renderer(factory: impl Fn(&Attributes) -> Rc<dyn Renderer> + 'static) -> Self {
        Self::Renderer(Rc::new(factory))
    }

    pub fn layout(factory: impl Fn(&Attributes) -> Box<dyn Layout> + 'static) -> Self {
        Self::Layout(Rc::new(factory))
    }

    pub fn format(factory: impl Fn(&Attributes) -> Box<dyn Format> + 'static) -> Self {
        Self::Format(Rc::new(factory))
    }

    pub fn kind(&self) -> ExtensionKind {
        match self {
            Self::Format(_) => ExtensionKind::Format,
            Self::Renderer(_) => ExtensionKind::Renderer,
            Self::Layout(_) => ExtensionKind::Layout,
        }
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extension::{}", self.kind())
    }
}

/// Extension implementations indexed by kind and lower-cased name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<(ExtensionKind, String), Extension>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in extensions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_builtins(&mut registry);
        registry
    }

    /// Registers `extension` under `name`, replacing any previous entry of the
    /// same kind and name.
    pub fn register(&mut self, name: &str, extension: Extension) -> &mut Self {
        let kind = extension.kind();
        let key = (kind, name.to_lowercase());
        if self.entries.insert(key, extension).is_some() {
            debug!(kind:% = kind, name; "Replaced registered extension");
        } else {
            trace!(kind:% = kind, name; "Registered extension");
        }
        self
    }

    /// Returns `true` if an extension of `kind` is registered under `name`.
    pub fn contains(&self, kind: ExtensionKind, name: &str) -> bool {
        self.entries.contains_key(&(kind, name.to_lowercase()))
    }

    /// Registered names of `kind`, sorted.
    pub fn names(&self, kind: ExtensionKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .keys()
            .filter(|(entry_kind, _)| *entry_kind == kind)
            .map(|(_, name)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Looks up the extension of `kind` registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::UnknownExtension`] if nothing is registered.
    pub fn resolve(&self, kind: ExtensionKind, name: &str) -> Result<&Extension, TrellisError> {
        self.entries
            .get(&(kind, name.to_lowercase()))
            .ok_or_else(|| TrellisError::unknown_extension(kind, name))
    }

    /// Resolves and builds the renderer described by `config`.
    pub fn renderer(&self, config: &ExtensionConfig) -> Result<Rc<dyn Renderer>, TrellisError> {
        match self.resolve(ExtensionKind::Renderer, config.name())? {
            Extension::Renderer(factory) => Ok(factory(config.options())),
            other => Err(mismatch(other, ExtensionKind::Renderer)),
        }
    }

    /// Resolves and builds the layout described by `config`.
    pub fn layout(&self, config: &ExtensionConfig) -> Result<Box<dyn Layout>, TrellisError> {
        match self.resolve(ExtensionKind::Layout, config.name())? {
            Extension::Layout(factory) => Ok(factory(config.options())),
            other => Err(mismatch(other, ExtensionKind::Layout)),
        }
    }

    /// Resolves and builds the format described by `config`.
    pub fn format(&self, config: &ExtensionConfig) -> Result<Box<dyn Format>, TrellisError> {
        match self.resolve(ExtensionKind::Format, config.name())? {
            Extension::Format(factory) => Ok(factory(config.options())),
            other => Err(mismatch(other, ExtensionKind::Format)),
        }
    }
}

// Entries are keyed by the variant's own kind, so this only fires on a bug.
fn mismatch(found: &Extension, expected: ExtensionKind) -> TrellisError {
    TrellisError::Config(format!(
        "registry entry for a {expected} holds a {}",
        found.kind()
    ))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{event::Event, extension::LayoutContext};

    struct Silent;

    impl Renderer for Silent {
        fn notify(&self, _event: &Event) {}
    }

    struct Counting {
        runs: Rc<Cell<usize>>,
    }

    impl Layout for Counting {
        fn run(&mut self, _context: &LayoutContext<'_>) -> Result<(), TrellisError> {
            self.runs.set(self.runs.get() + 1);
            Ok(())
        }
    }

    fn silent() -> Extension {
        Extension::renderer(|_| Rc::new(Silent))
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = Registry::new();
        registry.register("Stub", silent());

        assert!(registry.contains(ExtensionKind::Renderer, "stub"));
        assert!(registry.contains(ExtensionKind::Renderer, "STUB"));
        assert!(registry.resolve(ExtensionKind::Renderer, "sTuB").is_ok());
        assert!(registry.renderer(&ExtensionConfig::new("stub")).is_ok());
    }

    #[test]
    fn test_kinds_are_separate_namespaces() {
        let mut registry = Registry::new();
        registry.register("shared", silent());

        let err = registry
            .resolve(ExtensionKind::Layout, "shared")
            .unwrap_err();
        assert!(matches!(
            err,
            TrellisError::UnknownExtension {
                kind: ExtensionKind::Layout,
                ..
            }
        ));
    }

    #[test]
    fn test_last_registration_wins() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let mut registry = Registry::new();
        let runs = first.clone();
        registry.register(
            "count",
            Extension::layout(move |_| Box::new(Counting { runs: runs.clone() })),
        );
        let runs = second.clone();
        registry.register(
            "COUNT",
            Extension::layout(move |_| Box::new(Counting { runs: runs.clone() })),
        );

        let mut layout = registry.layout(&ExtensionConfig::new("count")).unwrap();
        let options = Attributes::new();
        layout
            .run(&LayoutContext {
                nodes: Default::default(),
                edges: Default::default(),
                renderer: Rc::new(Silent),
                options: &options,
            })
            .unwrap();

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(registry.names(ExtensionKind::Layout), ["count"]);
    }

    #[test]
    fn test_unknown_name() {
        let registry = Registry::new();
        let err = registry
            .layout(&ExtensionConfig::new("nonexistent"))
            .err()
            .expect("lookup should fail");
        assert_eq!(err.to_string(), "no layout named `nonexistent` is registered");
    }

    #[test]
    fn test_builtins() {
        let registry = Registry::with_builtins();
        assert_eq!(registry.names(ExtensionKind::Renderer), ["headless"]);
        assert_eq!(registry.names(ExtensionKind::Layout), ["grid", "preset"]);
        assert_eq!(registry.names(ExtensionKind::Format), ["json"]);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Layout".parse::<ExtensionKind>().unwrap(), ExtensionKind::Layout);
        assert!("plugin".parse::<ExtensionKind>().is_err());
    }
}
