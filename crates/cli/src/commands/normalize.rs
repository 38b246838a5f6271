//! Re-serialize a character file.
//!
//! Parsing and writing back drops anything the model does not keep and puts
//! attributes in canonical form (`Yes`/`No` flags, `3.0` numbers, nested
//! compound powers), so two normalized files diff cleanly.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use hero_content::{ContentFactory, write_document};
use hero_core::serialize_character;

use super::Input;
use crate::config::CliConfig;

/// Re-serialize a character file in canonical form
#[derive(Parser, Debug)]
pub struct Normalize {
    #[command(flatten)]
    input: Input,

    /// Output file (defaults to stdout)
    #[arg(value_name = "OUT")]
    output: Option<PathBuf>,
}

impl Normalize {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let character = self.input.load(config)?;

        match self.output {
            Some(path) => {
                ContentFactory::save_character(&character, &path)
                    .with_context(|| format!("Failed to save {}", path.display()))?;
                eprintln!(
                    "{} {} → {}",
                    style("✓").green().bold(),
                    self.input.file.display(),
                    path.display()
                );
            }
            None => print!("{}", write_document(&serialize_character(&character))),
        }
        Ok(())
    }
}
