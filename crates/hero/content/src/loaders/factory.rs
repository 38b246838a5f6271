//! Content factory: definitions, options and character files from one place.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hero_core::{
    Character, DefinitionTable, ParseOptions, parse_character, serialize_character,
};

use crate::hdc::{read_document, write_document};
use crate::loaders::{ConfigLoader, DefinitionLoader, LoadResult, read_file};

/// Content factory that loads engine inputs from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── options.toml          (optional ParseOptions)
/// └── definitions/          (optional overrides of the built-in tables)
///     ├── powers.ron
///     └── modifiers.ron
/// ```
///
/// A missing directory or file falls back to the built-ins and defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Built-in definitions merged with `definitions/`.
    pub fn load_definitions(&self) -> LoadResult<DefinitionTable> {
        DefinitionLoader::load_dir(&self.data_dir.join("definitions"))
    }

    /// Engine options from `options.toml`, or defaults when absent.
    pub fn load_options(&self) -> LoadResult<ParseOptions> {
        let path = self.data_dir.join("options.toml");
        if path.is_file() {
            ConfigLoader::load(&path)
        } else {
            Ok(ParseOptions::default())
        }
    }

    /// Reads and parses one `.hdc` file.
    pub fn load_character(
        path: &Path,
        definitions: &DefinitionTable,
        options: &ParseOptions,
    ) -> LoadResult<Character> {
        let text = read_file(path)?;
        let root = read_document(&text).with_context(|| format!("reading {}", path.display()))?;
        let character = parse_character(&root, definitions, options)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(character)
    }

    /// Serializes `character` and writes it to `path`.
    pub fn save_character(character: &Character, path: &Path) -> LoadResult<()> {
        let text = write_document(&serialize_character(character));
        std::fs::write(path, text)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_data_dir_uses_builtins_and_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path().join("absent"));
        assert_eq!(factory.load_options().expect("defaults"), ParseOptions::default());
        assert!(!factory.load_definitions().expect("builtins").is_empty());
    }

    #[test]
    fn malformed_files_keep_the_typed_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.hdc");
        std::fs::write(&path, "<CHARACTER><POWERS></CHARACTER>").expect("write");

        let err = ContentFactory::load_character(
            &path,
            &DefinitionTable::new(),
            &ParseOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<hero_core::HeroError>(),
            Some(hero_core::HeroError::MalformedDocument { .. })
        ));
    }
}
