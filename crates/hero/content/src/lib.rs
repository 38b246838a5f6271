//! Data-driven content and file formats for the HERO engine.
//!
//! This crate houses everything `hero-core` deliberately leaves out:
//! - the `.hdc` XML codec (document text ⇄ attributed tree)
//! - built-in HERO 6E power and modifier tables (embedded RON)
//! - loaders for user-supplied definitions (RON) and engine options (TOML)
//!
//! Loaded definitions are handed to the engine as a read-only
//! [`DefinitionTable`](hero_core::DefinitionTable) and never appear in the
//! character model.

pub mod hdc;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use hdc::{read_document, write_document};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, DefinitionLoader, LoadResult};
