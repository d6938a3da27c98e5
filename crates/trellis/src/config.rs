//! Configuration types for Trellis graphs.
//!
//! This module provides the configuration structures that choose the renderer
//! and layout of a graph and its initial style sheet. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration: renderer, layout and style.
//! - [`ExtensionConfig`] - A registered extension name plus free-form options.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.renderer().name(), "headless");
//! assert_eq!(config.layout().name(), "grid");
//! ```

use serde::{Deserialize, Serialize};

use trellis_core::{
    style::StyleSheet,
    value::{Attributes, Value},
};

/// Renderer used when none is configured.
pub const DEFAULT_RENDERER: &str = "headless";

/// Layout used when none is configured.
pub const DEFAULT_LAYOUT: &str = "grid";

/// Selects a registered extension and passes it options.
///
/// Options sit next to `name` in the serialized form:
///
/// ```toml
/// [layout]
/// name = "grid"
/// columns = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    name: String,

    #[serde(flatten)]
    options: Attributes,
}

impl ExtensionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Attributes::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Attributes {
        &self.options
    }
}

/// Top-level configuration of a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Renderer section.
    #[serde(default = "default_renderer")]
    renderer: ExtensionConfig,

    /// Layout section.
    #[serde(default = "default_layout")]
    layout: ExtensionConfig,

    /// Initial style sheet.
    #[serde(default)]
    style: StyleSheet,
}

fn default_renderer() -> ExtensionConfig {
    ExtensionConfig::new(DEFAULT_RENDERER)
}

fn default_layout() -> ExtensionConfig {
    ExtensionConfig::new(DEFAULT_LAYOUT)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            renderer: default_renderer(),
            layout: default_layout(),
            style: StyleSheet::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new [`AppConfig`].
    ///
    /// # Arguments
    ///
    /// * `renderer` - Renderer to resolve at graph construction.
    /// * `layout` - Layout to resolve and run at graph construction.
    /// * `style` - Initial style sheet.
    pub fn new(renderer: ExtensionConfig, layout: ExtensionConfig, style: StyleSheet) -> Self {
        Self {
            renderer,
            layout,
            style,
        }
    }

    pub fn with_renderer(mut self, renderer: ExtensionConfig) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_layout(mut self, layout: ExtensionConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    /// Returns the renderer configuration.
    pub fn renderer(&self) -> &ExtensionConfig {
        &self.renderer
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &ExtensionConfig {
        &self.layout
    }

    /// Returns the initial style sheet.
    pub fn style(&self) -> &StyleSheet {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_are_flattened() {
        let config: ExtensionConfig =
            serde_json::from_str(r#"{"name": "grid", "columns": 3, "spacing": 20.5}"#).unwrap();

        assert_eq!(config.name(), "grid");
        assert_eq!(config.options()["columns"], Value::Number(3.0));
        assert_eq!(config.options()["spacing"], Value::Number(20.5));
        assert!(!config.options().contains_key("name"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"layout": {"name": "preset"}}"#).unwrap();

        assert_eq!(config.renderer().name(), DEFAULT_RENDERER);
        assert_eq!(config.layout().name(), "preset");
        assert_eq!(config.style(), &StyleSheet::default());
    }

    #[test]
    fn test_builder_methods() {
        let config = AppConfig::default()
            .with_layout(ExtensionConfig::new("preset").with_option("fit", true))
            .with_renderer(ExtensionConfig::new("stub"));

        assert_eq!(config.layout().options()["fit"], Value::Bool(true));
        assert_eq!(config.renderer().name(), "stub");
    }
}
