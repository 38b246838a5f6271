//! Command implementations for hdc
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod json;
mod normalize;
mod summary;

pub use json::Json;
pub use normalize::Normalize;
pub use summary::Summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hero_content::ContentFactory;
use hero_core::Character;

use crate::config::CliConfig;

/// Arguments shared by every command.
#[derive(Args, Debug)]
pub struct Input {
    /// Character file to read (.hdc)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Data directory with options.toml and definitions/ (overrides HDC_DATA_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Input {
    /// Loads definitions and options, then reads and parses the file.
    pub fn load(&self, config: &CliConfig) -> Result<Character> {
        let data_dir = self.data_dir.as_ref().unwrap_or(&config.data_dir);
        let factory = ContentFactory::new(data_dir);

        let definitions = factory.load_definitions().context("Failed to load definitions")?;
        let options = factory.load_options().context("Failed to load options")?;
        tracing::info!(
            file = %self.file.display(),
            powers = definitions.power_count(),
            modifiers = definitions.modifier_count(),
            "loading character"
        );

        ContentFactory::load_character(&self.file, &definitions, &options)
    }
}
