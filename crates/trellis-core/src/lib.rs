//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis graph
//! model and its extensions. It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::Id`])
//! - **Groups**: The two element namespaces, nodes and edges ([`group::Group`])
//! - **Values**: Schemaless attribute values and maps ([`value`] module)
//! - **Style**: Graph-wide style sheets and bypass descriptors ([`style`] module)

pub mod group;
pub mod identifier;
pub mod style;
pub mod value;
