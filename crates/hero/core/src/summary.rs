//! Point totals, rule checks and skill rolls derived from a parsed character.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Character, CharacteristicKind, CostEntry, Entry, EntryList, Rules, Skill};

/// Real-point totals per category plus the character's point budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    pub characteristics: i32,
    pub skills: i32,
    pub perks: i32,
    pub talents: i32,
    pub martial_arts: i32,
    pub powers: i32,
    /// Equipment is bought with money, not points; reported for display only.
    pub equipment: i32,
    pub disadvantages: i32,
    pub points_available: i32,
    pub points_spent: i32,
    pub points_remaining: i32,
}

impl CostSummary {
    /// Sums top-level real costs, so children already rolled up into a list
    /// or compound power are counted once.
    pub fn of(character: &Character) -> Self {
        let config = &character.basic_configuration;
        let mut summary = Self {
            characteristics: character.characteristics.iter().map(|c| c.real_cost).sum(),
            skills: top_level_real(&character.skills),
            perks: top_level_real(&character.perks),
            talents: top_level_real(&character.talents),
            martial_arts: top_level_real(&character.martial_arts),
            powers: top_level_real(&character.powers),
            equipment: top_level_real(&character.equipment),
            disadvantages: top_level_real(&character.disadvantages),
            ..Self::default()
        };

        summary.points_available = config.base_points
            + config.experience
            + summary.disadvantages.min(config.disad_points);
        summary.points_spent = summary.characteristics
            + summary.skills
            + summary.perks
            + summary.talents
            + summary.martial_arts
            + summary.powers;
        summary.points_remaining = summary.points_available - summary.points_spent;
        summary
    }
}

fn top_level_real<T: CostEntry>(list: &EntryList<T>) -> i32 {
    list.top_level().map(|item| item.entry().real_cost).sum()
}

/// A breach of the campaign caps in [`Rules`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("{name} has {active} active points (cap {cap})")]
    ActivePointCap { id: String, name: String, active: i32, cap: i32 },

    #[error("{name} has {real} real points (cap {cap})")]
    RealPointCap { id: String, name: String, real: i32, cap: i32 },

    #[error("{kind} is {value} (maximum {max})")]
    CharacteristicMaximum { kind: CharacteristicKind, value: i32, max: i32 },

    #[error("complications total {points} points (cap {cap})")]
    DisadvantageCap { points: i32, cap: i32 },
}

/// Checks every ability against the character's rules, if any.
///
/// Lists are not abilities and are skipped; a compound power is checked as a
/// whole and its owned children are not checked on their own.
pub fn check_rules(character: &Character) -> Vec<RuleViolation> {
    let Some(rules) = &character.rules else {
        return Vec::new();
    };
    let mut violations = Vec::new();

    for entries in [
        ability_entries(&character.skills),
        ability_entries(&character.perks),
        ability_entries(&character.talents),
        ability_entries(&character.martial_arts),
        ability_entries(&character.powers),
        ability_entries(&character.equipment),
    ] {
        for entry in entries {
            check_caps(entry, rules, &mut violations);
        }
    }

    for c in &character.characteristics {
        if let Some(max) = rules.maximum(c.kind)
            && c.total_value > max
        {
            violations.push(RuleViolation::CharacteristicMaximum {
                kind: c.kind,
                value: c.total_value,
                max,
            });
        }
    }

    let points = top_level_real(&character.disadvantages);
    if rules.disad_points > 0 && points > rules.disad_points {
        violations.push(RuleViolation::DisadvantageCap {
            points,
            cap: rules.disad_points,
        });
    }

    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "rule violations found");
    }
    violations
}

fn ability_entries<T: CostEntry>(list: &EntryList<T>) -> Vec<&Entry> {
    list.iter()
        .map(CostEntry::entry)
        .filter(|e| !e.is_group() && !e.is_owned())
        .collect()
}

fn check_caps(entry: &Entry, rules: &Rules, violations: &mut Vec<RuleViolation>) {
    if let (Some(cap), Some(active)) = (rules.active_point_cap, entry.active_cost)
        && active > cap
    {
        violations.push(RuleViolation::ActivePointCap {
            id: entry.id.clone(),
            name: entry.display_name().to_string(),
            active,
            cap,
        });
    }
    if let Some(cap) = rules.real_point_cap
        && entry.real_cost > cap
    {
        violations.push(RuleViolation::RealPointCap {
            id: entry.id.clone(),
            name: entry.display_name().to_string(),
            real: entry.real_cost,
            cap,
        });
    }
}

/// Success roll of a skill (`12-` means roll 12 or less on 3d6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRoll {
    pub characteristic: Option<CharacteristicKind>,
    pub target: i32,
}

impl fmt::Display for SkillRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-", self.target)
    }
}

const FAMILIARITY_ROLL: i32 = 8;
const PROFICIENCY_ROLL: i32 = 10;
const GENERAL_ROLL: i32 = 11;

pub fn skill_roll(skill: &Skill, character: &Character) -> Option<SkillRoll> {
    if skill.levels_only {
        return None;
    }
    if skill.familiarity || skill.everyman {
        return Some(SkillRoll {
            characteristic: None,
            target: FAMILIARITY_ROLL,
        });
    }
    if skill.proficiency {
        return Some(SkillRoll {
            characteristic: None,
            target: PROFICIENCY_ROLL,
        });
    }

    let based_on = skill.characteristic.as_deref()?;
    if based_on.eq_ignore_ascii_case("GENERAL") {
        return Some(SkillRoll {
            characteristic: None,
            target: GENERAL_ROLL + skill.entry.levels,
        });
    }
    let kind = based_on.parse::<CharacteristicKind>().ok()?;
    let value = character.characteristic_value(kind);
    Some(SkillRoll {
        characteristic: Some(kind),
        target: 9 + (f64::from(value) / 5.0).round() as i32 + skill.entry.levels,
    })
}
