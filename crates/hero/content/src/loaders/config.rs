//! Engine option loader.

use std::path::Path;

use hero_core::ParseOptions;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`ParseOptions`] from TOML files.
///
/// ```toml
/// preserve_adder_hierarchy = true
/// skip_aggregation = false
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load engine options from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<ParseOptions> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ParseOptions> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse options TOML: {}", e))
    }
}
