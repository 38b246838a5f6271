//! Point totals, rule violations and skill rolls for one character.

use anyhow::Result;
use clap::Parser;
use console::style;
use hero_core::{Character, CostEntry, CostSummary, EntryList, check_rules, skill_roll};

use super::Input;
use crate::config::CliConfig;

/// Print point totals, rule violations and skill rolls
#[derive(Parser, Debug)]
pub struct Summary {
    #[command(flatten)]
    input: Input,

    /// Also list every top-level entry with its costs
    #[arg(short, long)]
    entries: bool,
}

impl Summary {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let character = self.input.load(config)?;
        let summary = CostSummary::of(&character);

        let name = character
            .info
            .character_name
            .as_deref()
            .unwrap_or("(unnamed)");
        println!("{} {}", style("Character:").bold().cyan(), name);
        println!("{} {}", style("File:").bold().cyan(), self.input.file.display());
        println!();

        print_totals(&summary);

        if self.entries {
            print_entries("Skills", &character.skills);
            print_entries("Perks", &character.perks);
            print_entries("Talents", &character.talents);
            print_entries("Martial Arts", &character.martial_arts);
            print_entries("Powers", &character.powers);
            print_entries("Complications", &character.disadvantages);
            print_entries("Equipment", &character.equipment);
        }

        print_skill_rolls(&character);
        print_violations(&character);
        Ok(())
    }
}

fn print_totals(summary: &CostSummary) {
    println!("{}", style("=== Points ===").bold().green());
    let rows = [
        ("Characteristics", summary.characteristics),
        ("Skills", summary.skills),
        ("Perks", summary.perks),
        ("Talents", summary.talents),
        ("Martial Arts", summary.martial_arts),
        ("Powers", summary.powers),
        ("Complications", summary.disadvantages),
        ("Equipment (not counted)", summary.equipment),
    ];
    for (label, points) in rows {
        println!("  {label:<24} {points:>5}");
    }
    println!();
    println!("  {:<24} {:>5}", "Available", summary.points_available);
    println!("  {:<24} {:>5}", "Spent", summary.points_spent);
    let remaining = format!("{:>5}", summary.points_remaining);
    let remaining = if summary.points_remaining < 0 {
        style(remaining).red().bold()
    } else {
        style(remaining).green()
    };
    println!("  {:<24} {}", "Remaining", remaining);
    println!();
}

fn print_entries<T: CostEntry>(label: &str, list: &EntryList<T>) {
    if list.is_empty() {
        return;
    }
    println!("{}", style(format!("{label}:")).bold().yellow());
    for item in list.top_level() {
        let entry = item.entry();
        let active = entry
            .active_cost
            .map_or_else(|| "-".to_string(), |a| a.to_string());
        let end = entry
            .end_cost
            .map_or_else(|| "-".to_string(), |e| e.to_string());
        println!(
            "  {:<32} real {:>4}  active {:>4}  END {:>3}",
            entry.display_name(),
            entry.real_cost,
            active,
            end
        );
        for child in list.children_of(&entry.id) {
            println!(
                "    {} {:<28} real {:>4}",
                style("└").dim(),
                child.entry().display_name(),
                child.entry().real_cost
            );
        }
    }
    println!();
}

fn print_skill_rolls(character: &Character) {
    let rolls: Vec<_> = character
        .skills
        .iter()
        .filter_map(|skill| skill_roll(skill, character).map(|roll| (skill, roll)))
        .collect();
    if rolls.is_empty() {
        return;
    }
    println!("{}", style("Skill Rolls:").bold().yellow());
    for (skill, roll) in rolls {
        println!("  {:<32} {}", skill.entry.display_name(), roll);
    }
    println!();
}

fn print_violations(character: &Character) {
    let violations = check_rules(character);
    if violations.is_empty() {
        return;
    }
    println!("{}", style("Rule Violations:").bold().red());
    for violation in &violations {
        println!("  {} {}", style("✗").red().bold(), violation);
    }
}
