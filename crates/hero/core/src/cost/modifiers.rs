use serde::{Deserialize, Serialize};
use tracing::trace;

use super::adders::{Adder, adder_cost, parse_adders};
use crate::definitions::DefinitionOracle;
use crate::tree::{AttributeNode, Element};

const AREA_OF_EFFECT: &str = "AOE";

/// An advantage (positive value) or limitation (negative value).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub xml_id: String,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    /// `BASECOST` as read from the tree.
    pub base_cost: f64,
    /// Effective value after definition, shape and adder adjustments.
    pub value: f64,
    pub is_advantage: bool,
    pub is_limitation: bool,
    #[serde(default)]
    pub levels: i32,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default)]
    pub option_alias: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub adders: Vec<Adder>,
}

impl Modifier {
    /// A modifier classified by the sign of `value`.
    pub fn with_value(xml_id: impl Into<String>, value: f64) -> Self {
        Self {
            xml_id: xml_id.into(),
            base_cost: value,
            value,
            is_advantage: value >= 0.0,
            is_limitation: value < 0.0,
            ..Self::default()
        }
    }

    pub fn is_option(&self, option_id: &str) -> bool {
        self.option_id
            .as_deref()
            .is_some_and(|id| id.eq_ignore_ascii_case(option_id))
    }

    fn from_element(node: &Element, oracle: &dyn DefinitionOracle, preserve: bool) -> Self {
        let xml_id = node.get_string("XMLID", "");
        let base_cost = node.get_number("BASECOST", 0.0);
        let levels = node.get_int("LEVELS", 0);
        let option_id = node.get_opt_string("OPTIONID");
        let adders = parse_adders(node, preserve);

        let mut value = if xml_id == AREA_OF_EFFECT && levels > 0 {
            area_of_effect_value(levels, option_id.as_deref())
        } else {
            match oracle.modifier(&xml_id) {
                Some(def) if def.has_levels && levels > 0 => {
                    def.base_cost + f64::from(levels) * def.lvl_cost
                }
                _ => base_cost,
            }
        };
        value += adder_cost(&adders);

        let is_limitation = if node.has("ISLIMITATION") {
            node.get_bool("ISLIMITATION", false)
        } else {
            value < 0.0
        };
        trace!(xml_id = %xml_id, value, is_limitation, "modifier");

        Self {
            name: node
                .get_opt_string("NAME")
                .or_else(|| node.get_opt_string("ALIAS"))
                .unwrap_or_else(|| xml_id.clone()),
            alias: node.get_opt_string("ALIAS"),
            xml_id,
            base_cost,
            value,
            is_advantage: !is_limitation,
            is_limitation,
            levels,
            option: node.get_opt_string("OPTION"),
            option_id,
            option_alias: node.get_opt_string("OPTION_ALIAS"),
            input: node.get_opt_string("INPUT"),
            adders,
        }
    }
}

/// Area of Effect: `+1/4` per started 4m of effective radius.
///
/// The effective radius is `levels / shape`, with shape multipliers RADIUS 1,
/// CONE 2, LINE 4 and SURFACE 0.5. Unknown shapes count as a radius.
pub fn area_of_effect_value(levels: i32, shape: Option<&str>) -> f64 {
    let multiplier = match shape.map(str::to_ascii_uppercase).as_deref() {
        Some("CONE") => 2.0,
        Some("LINE") => 4.0,
        Some("SURFACE") => 0.5,
        _ => 1.0,
    };
    let effective_radius = f64::from(levels) / multiplier;
    f64::from(super::ceil_cost(effective_radius / 4.0)) * 0.25
}

/// Reads the `MODIFIER` children of `node`.
pub fn parse_modifiers(
    node: &Element,
    oracle: &dyn DefinitionOracle,
    preserve_adders: bool,
) -> Vec<Modifier> {
    node.children_named("MODIFIER")
        .map(|child| Modifier::from_element(child, oracle, preserve_adders))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{DefinitionTable, ModifierDefinition};

    fn modifier(attrs: &[(&str, &str)]) -> Element {
        attrs
            .iter()
            .fold(Element::new("MODIFIER"), |node, (k, v)| node.with_attr(*k, *v))
    }

    fn parse_one(node: Element, oracle: &DefinitionTable) -> Modifier {
        let parent = Element::new("POWER").with_child(node);
        parse_modifiers(&parent, oracle, false).remove(0)
    }

    #[test]
    fn sign_decides_classification_without_flag() {
        let table = DefinitionTable::new();
        let adv = parse_one(modifier(&[("XMLID", "AP"), ("BASECOST", "0.25")]), &table);
        let lim = parse_one(modifier(&[("XMLID", "FOCUS"), ("BASECOST", "-0.5")]), &table);
        assert!(adv.is_advantage && !adv.is_limitation);
        assert!(lim.is_limitation && !lim.is_advantage);

        let zero = parse_one(modifier(&[("XMLID", "NOTHING"), ("BASECOST", "0.0")]), &table);
        assert!(zero.is_advantage);
    }

    #[test]
    fn explicit_flag_overrides_sign() {
        let table = DefinitionTable::new();
        let m = parse_one(
            modifier(&[("XMLID", "ODD"), ("BASECOST", "0.25"), ("ISLIMITATION", "Yes")]),
            &table,
        );
        assert!(m.is_limitation);
        assert!(!m.is_advantage);
    }

    #[test]
    fn leveled_definition_replaces_tree_value() {
        let table = DefinitionTable::new().with_modifier(ModifierDefinition {
            xml_id: "AUTOFIRE".into(),
            name: "Autofire".into(),
            base_cost: 0.25,
            has_levels: true,
            lvl_cost: 0.25,
        });
        let m = parse_one(
            modifier(&[("XMLID", "AUTOFIRE"), ("BASECOST", "0.0"), ("LEVELS", "2")]),
            &table,
        );
        assert_eq!(m.value, 0.75);
        assert_eq!(m.base_cost, 0.0);
    }

    #[test]
    fn area_of_effect_by_shape() {
        assert_eq!(area_of_effect_value(4, Some("RADIUS")), 0.25);
        assert_eq!(area_of_effect_value(8, Some("RADIUS")), 0.5);
        assert_eq!(area_of_effect_value(9, None), 0.75);
        assert_eq!(area_of_effect_value(16, Some("LINE")), 0.25);
        assert_eq!(area_of_effect_value(8, Some("cone")), 0.25);
        assert_eq!(area_of_effect_value(4, Some("SURFACE")), 0.5);
        assert_eq!(area_of_effect_value(4, Some("BLOB")), 0.25);
    }

    #[test]
    fn adders_adjust_modifier_value() {
        let table = DefinitionTable::new();
        let node = modifier(&[("XMLID", "CHARGES"), ("BASECOST", "-1.0")]).with_child(
            Element::new("ADDER")
                .with_attr("XMLID", "RECOVERABLE")
                .with_attr("BASECOST", "0.5"),
        );
        let m = parse_one(node, &table);
        assert_eq!(m.value, -0.5);
        assert!(m.is_limitation);
        assert_eq!(m.adders.len(), 1);
    }
}
