//! apiref core - reference data to markdown for the decoders API docs
//!
//! This crate provides:
//! - Registry: typed decoder and method tables built from declarative data
//! - Mining: the source-code collaborator that supplies source links and doc comments
//! - Doc: doc-string normalization, cross-reference linking, signature headings
//!   and page generation

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Site and mining configuration (`apiref.toml`)
pub mod config;

/// Error types shared by the registry and the miner
pub mod error;

/// Source mining - external report of source links and doc comments
pub mod mining;

/// Registry module - decoder and method tables
pub mod registry;

/// Documentation rendering module
pub mod doc;

pub use config::{Config, MiningConfig, SiteConfig};
pub use error::{ConfigError, Error, MiningError, RegistryError, Result};
pub use mining::{CommandMiner, FileMiner, SourceMiner, SourceRecord, SourceReport, StaticMiner};
pub use registry::{
    is_callable, EntryKind, EntryTable, Match, Param, ReferenceData, Registry, RegistryEntry,
    Signature, Table,
};
