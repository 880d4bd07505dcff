//! # xml-forge Library
//!
//! An in-memory XML element tree with validated construction and editing, a
//! deterministic tab-indented renderer, path queries, and a schema-driven
//! engine that maps plain Rust values (or JSON) onto element trees.

pub mod attribute;
pub mod builder;
pub mod bulk;
pub mod cli;
pub mod config;
pub mod error;
pub mod json;
pub mod mapping;
pub mod output;
pub mod persistence;
pub mod query;
pub mod schema;
pub mod serial;
pub mod transform;
pub mod tree;

pub use attribute::Attribute;
pub use builder::ElementBuilder;
pub use cli::{Cli, Rename, VerbosityLevel};
pub use config::{Config, ConfigError, ConfigManager, DocumentConfig, OutputConfig};
pub use error::{ConfigurationError, Error, MappingError, ValidationError};
pub use json::JsonElement;
pub use mapping::{map, validate};
pub use output::{Output, RunSummary};
pub use query::{find_by_path, find_by_path_from};
pub use schema::{AttributeRole, ElementRole, Field, FieldValue, Mappable, Role, Schema};
pub use transform::{ChildComparator, NodeTransform, StringTransform};
pub use tree::{DEFAULT_ENCODING, DEFAULT_VERSION, Document, NodeId, NodeRef};
