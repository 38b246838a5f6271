use serde::{Deserialize, Serialize};

use crate::tree::{AttributeNode, Element};

/// A fixed or leveled cost component (a Contact's extra, a weapon choice).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Adder {
    pub xml_id: String,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default)]
    pub option_alias: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    pub base_cost: f64,
    #[serde(default)]
    pub levels: i32,
    #[serde(default)]
    pub lvl_cost: f64,
    #[serde(default)]
    pub lvl_val: f64,
    pub selected: bool,
    #[serde(default)]
    pub include_in_base: bool,
    /// Nested adders; empty unless hierarchy preservation was requested.
    #[serde(default)]
    pub adders: Vec<Adder>,
}

impl Adder {
    /// A selected flat adder.
    pub fn flat(xml_id: impl Into<String>, base_cost: f64) -> Self {
        Self {
            xml_id: xml_id.into(),
            base_cost,
            selected: true,
            ..Self::default()
        }
    }

    /// Own contribution, ignoring nested adders.
    pub fn own_cost(&self) -> f64 {
        if self.selected {
            self.base_cost + f64::from(self.levels) * self.lvl_cost
        } else {
            0.0
        }
    }

    fn from_element(node: &Element) -> Self {
        let name = node
            .get_opt_string("NAME")
            .or_else(|| node.get_opt_string("ALIAS"))
            .unwrap_or_default();
        Self {
            xml_id: node.get_string("XMLID", ""),
            name,
            alias: node.get_opt_string("ALIAS"),
            option: node.get_opt_string("OPTION"),
            option_id: node.get_opt_string("OPTIONID"),
            option_alias: node.get_opt_string("OPTION_ALIAS"),
            input: node.get_opt_string("INPUT"),
            base_cost: node.get_number("BASECOST", 0.0),
            levels: node.get_int("LEVELS", 0),
            lvl_cost: node.get_number("LVLCOST", 0.0),
            lvl_val: node.get_number("LVLVAL", 0.0),
            selected: node.get_bool("SELECTED", true),
            include_in_base: node.get_bool("INCLUDEINBASE", false),
            adders: Vec::new(),
        }
    }
}

/// Sum of `base_cost + levels * lvl_cost` over selected adders.
///
/// Nested adders are always visited, so a flattened list and the preserved
/// hierarchy it came from cost the same.
pub fn adder_cost(adders: &[Adder]) -> f64 {
    adders
        .iter()
        .map(|adder| adder.own_cost() + adder_cost(&adder.adders))
        .sum()
}

/// Flat discount carried by a list: the sum of its negative selected adders.
pub fn discount(adders: &[Adder]) -> f64 {
    adders
        .iter()
        .map(|adder| {
            let own = adder.own_cost();
            let own = if own < 0.0 { own } else { 0.0 };
            own + discount(&adder.adders)
        })
        .sum()
}

/// Reads the `ADDER` children of `node`.
///
/// Unless `preserve` is set the hierarchy is flattened depth-first, parents
/// before their children.
pub fn parse_adders(node: &Element, preserve: bool) -> Vec<Adder> {
    let mut out = Vec::new();
    for child in node.children_named("ADDER") {
        let mut adder = Adder::from_element(child);
        let nested = parse_adders(child, preserve);
        if preserve {
            adder.adders = nested;
            out.push(adder);
        } else {
            out.push(adder);
            out.extend(nested);
        }
    }
    out
}
