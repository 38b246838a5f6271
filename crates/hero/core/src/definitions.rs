//! Definition Registry: read-only power and modifier metadata.
//!
//! Parsers consult a [`DefinitionOracle`] for anything the tree does not
//! carry itself (cost per level, END usage, leveled modifier pricing).
//! Lookups return `None` instead of failing; parsers then fall back to
//! [`PowerDefinition::generic`].
//!
//! [`DefinitionTable`] is the in-memory implementation. It is built once
//! (see `hero-content` for the RON loaders), never mutated afterwards, and
//! is `Send + Sync`, so one table can serve any number of concurrent parses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Read-only access to power and modifier definitions.
pub trait DefinitionOracle: Send + Sync {
    fn power(&self, xml_id: &str) -> Option<&PowerDefinition>;

    fn modifier(&self, xml_id: &str) -> Option<&ModifierDefinition>;
}

/// Broad power classification used for cost special cases and reporting.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PowerType {
    Adjustment,
    Attack,
    BodyAffecting,
    Characteristic,
    Defense,
    Mental,
    Movement,
    Sense,
    Size,
    Special,
    Standard,
    /// Fallback for unknown XMLIDs.
    #[default]
    Generic,
}

/// Option-specific pricing (e.g. Darkness to a whole sense group).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerOption {
    pub id: String,
    #[serde(default)]
    pub base_cost: Option<f64>,
    #[serde(default)]
    pub lvl_cost: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerDefinition {
    pub xml_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub power_type: PowerType,
    #[serde(default)]
    pub base_cost: f64,
    #[serde(default = "default_lvl_cost")]
    pub lvl_cost: f64,
    #[serde(default)]
    pub options: Vec<PowerOption>,
    #[serde(default = "default_true")]
    pub uses_end: bool,
    /// Fixed END cost that replaces the 1-per-10-active-points rule.
    #[serde(default)]
    pub end_cost: Option<i32>,
    #[serde(default)]
    pub does_damage: bool,
    #[serde(default)]
    pub is_killing: bool,
}

fn default_lvl_cost() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

impl PowerDefinition {
    /// Definition used when a lookup misses: one point per level, uses END.
    pub fn generic(xml_id: impl Into<String>) -> Self {
        Self {
            xml_id: xml_id.into(),
            name: String::new(),
            power_type: PowerType::Generic,
            base_cost: 0.0,
            lvl_cost: default_lvl_cost(),
            options: Vec::new(),
            uses_end: true,
            end_cost: None,
            does_damage: false,
            is_killing: false,
        }
    }

    /// Option override by id, case-insensitive.
    pub fn option(&self, id: &str) -> Option<&PowerOption> {
        self.options.iter().find(|o| o.id.eq_ignore_ascii_case(id))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    pub xml_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_cost: f64,
    /// When set, the value is `base_cost + levels * lvl_cost` for `levels > 0`.
    #[serde(default)]
    pub has_levels: bool,
    #[serde(default)]
    pub lvl_cost: f64,
}

/// In-memory definition registry.
#[derive(Clone, Debug, Default)]
pub struct DefinitionTable {
    powers: HashMap<String, PowerDefinition>,
    modifiers: HashMap<String, ModifierDefinition>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_power(&mut self, definition: PowerDefinition) {
        self.powers.insert(definition.xml_id.clone(), definition);
    }

    pub fn insert_modifier(&mut self, definition: ModifierDefinition) {
        self.modifiers.insert(definition.xml_id.clone(), definition);
    }

    /// Adds a power definition (builder pattern).
    #[must_use]
    pub fn with_power(mut self, definition: PowerDefinition) -> Self {
        self.insert_power(definition);
        self
    }

    /// Adds a modifier definition (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, definition: ModifierDefinition) -> Self {
        self.insert_modifier(definition);
        self
    }

    /// Copies every definition of `other` into this table. Entries of
    /// `other` replace entries with the same XMLID.
    pub fn merge(&mut self, other: DefinitionTable) {
        self.powers.extend(other.powers);
        self.modifiers.extend(other.modifiers);
    }

    pub fn power_count(&self) -> usize {
        self.powers.len()
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty() && self.modifiers.is_empty()
    }
}

impl DefinitionOracle for DefinitionTable {
    fn power(&self, xml_id: &str) -> Option<&PowerDefinition> {
        self.powers.get(xml_id)
    }

    fn modifier(&self, xml_id: &str) -> Option<&ModifierDefinition> {
        self.modifiers.get(xml_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_incoming_definitions() {
        let mut table = DefinitionTable::new().with_power(PowerDefinition {
            lvl_cost: 5.0,
            ..PowerDefinition::generic("ENERGYBLAST")
        });
        let overrides = DefinitionTable::new().with_power(PowerDefinition {
            lvl_cost: 4.0,
            ..PowerDefinition::generic("ENERGYBLAST")
        });

        table.merge(overrides);

        assert_eq!(table.power_count(), 1);
        assert_eq!(table.power("ENERGYBLAST").map(|d| d.lvl_cost), Some(4.0));
        assert!(table.power("FLIGHT").is_none());
    }

    #[test]
    fn option_lookup_ignores_case() {
        let darkness = PowerDefinition {
            options: vec![PowerOption {
                id: "SIGHTGROUP".into(),
                base_cost: None,
                lvl_cost: Some(5.0),
            }],
            ..PowerDefinition::generic("DARKNESS")
        };
        assert_eq!(
            darkness.option("sightgroup").and_then(|o| o.lvl_cost),
            Some(5.0)
        );
        assert!(darkness.option("HEARINGGROUP").is_none());
    }

    #[test]
    fn power_type_parses_from_screaming_snake_case() {
        assert_eq!("BODY_AFFECTING".parse::<PowerType>(), Ok(PowerType::BodyAffecting));
        assert_eq!(PowerType::Attack.to_string(), "ATTACK");
    }
}
