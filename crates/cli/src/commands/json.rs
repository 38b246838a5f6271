//! Dump a parsed character as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use hero_core::{CostSummary, RuleViolation, check_rules};
use serde::Serialize;

use super::Input;
use crate::config::CliConfig;

/// Dump the parsed character as JSON
#[derive(Parser, Debug)]
pub struct Json {
    #[command(flatten)]
    input: Input,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Include the cost summary and rule violations
    #[arg(long)]
    with_summary: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    character: &'a hero_core::Character,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<CostSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<String>,
}

impl Json {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let character = self.input.load(config)?;

        let (summary, violations) = if self.with_summary {
            let violations = check_rules(&character)
                .iter()
                .map(RuleViolation::to_string)
                .collect();
            (Some(CostSummary::of(&character)), violations)
        } else {
            (None, Vec::new())
        };
        let report = Report {
            character: &character,
            summary,
            violations,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .context("Failed to serialize character")?;
        println!("{json}");
        Ok(())
    }
}
