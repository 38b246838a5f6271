use super::ParseContext;
use super::power::parse_power;
use crate::definitions::PowerType;
use crate::model::{
    CharacteristicKind, CostEntry, EndRule, Entry, EntryFlags, Equipment, Power, lbs_to_kg,
};
use crate::tree::{AttributeNode, Element};

/// Parses an equipment item: a power plus owned characteristic sub-powers.
pub(super) fn parse_equipment(node: &Element, ctx: &ParseContext<'_>) -> Equipment {
    let power = parse_power(node, ctx);
    let sub_powers = node
        .children
        .iter()
        .filter_map(|child| {
            let kind = child.name.parse::<CharacteristicKind>().ok()?;
            Some(sub_power(child, kind, &power.entry.id))
        })
        .collect();

    let weight_lbs = node.get_number("WEIGHT", 0.0);
    let mut item = Equipment {
        weight_kg: lbs_to_kg(weight_lbs),
        weight_lbs,
        price: node.get_number("PRICE", 0.0),
        carried: node.get_bool("CARRIED", false),
        sub_powers,
        power,
    };
    let totals = item.entry().totals();
    item.recompute(totals);
    item
}

/// A characteristic bonus built into an item (`<DCV LEVELS="2"/>`).
fn sub_power(node: &Element, kind: CharacteristicKind, parent_id: &str) -> Power {
    let levels = node.get_int("LEVELS", 0);
    let cost = kind.cost(levels);
    let id = node
        .get_opt_string("ID")
        .unwrap_or_else(|| format!("{parent_id}-{}", node.name.to_ascii_lowercase()));
    let mut entry = Entry::new(node.name.clone(), id, kind.to_string())
        .with_parent(parent_id)
        .with_flags(EntryFlags::OWNED);
    entry.levels = levels;
    entry.alias = node.get_opt_string("ALIAS");
    entry.base_cost = cost;
    entry.true_base_cost = f64::from(cost);
    entry.active_cost = Some(cost);
    entry.real_cost = cost;
    entry.end_cost = Some(0);

    Power {
        entry,
        power_type: PowerType::Characteristic,
        end_rule: EndRule::NoEnd,
        ..Power::default()
    }
}
