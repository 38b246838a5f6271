use super::ParseContext;
use crate::cost::round_cost;
use crate::model::{EntryFlags, MartialManeuver};
use crate::tree::{AttributeNode, Element};

const WEAPON_ELEMENT: &str = "WEAPON_ELEMENT";

/// Parses a sign-prefixed combat value (`+2`, `-1`); `--` and garbage read as 0.
pub fn parse_combat_value(raw: &str) -> i32 {
    let raw = raw.trim();
    if raw == "--" {
        return 0;
    }
    raw.parse::<i32>().unwrap_or(0)
}

pub(super) fn parse_maneuver(node: &Element, ctx: &ParseContext<'_>) -> MartialManeuver {
    let weapon_element = node.get_string("XMLID", "") == WEAPON_ELEMENT;
    let preserve = weapon_element || ctx.options.preserve_adder_hierarchy;
    let mut entry = ctx.entry_with_adders(node, preserve);
    if weapon_element {
        entry.flags |= EntryFlags::WEAPON_ELEMENT;
    }

    let cost = round_cost(entry.raw_base_cost);
    entry.base_cost = cost;
    entry.true_base_cost = entry.raw_base_cost;
    entry.real_cost = cost;

    let ocv_text = node.get_string("OCV", "--");
    let dcv_text = node.get_string("DCV", "--");
    MartialManeuver {
        ocv: parse_combat_value(&ocv_text),
        dcv: parse_combat_value(&dcv_text),
        ocv_text,
        dcv_text,
        phase: node.get_opt_string("PHASE"),
        effect: node.get_opt_string("EFFECT"),
        category: node.get_opt_string("CATEGORY"),
        dc: node.get_int("DC", 0),
        use_weapon: node.get_bool("USEWEAPON", false),
        entry,
    }
}
