use std::borrow::Cow;

use super::ParseContext;
use crate::cost::{adder_cost, round_cost};
use crate::definitions::{PowerDefinition, PowerType};
use crate::model::{CharacteristicKind, EndRule, Entry, ForceWallLevels, Power};
use crate::tree::{AttributeNode, Element};

const FORCE_WALL: &str = "FORCEWALL";

/// Definition lookup with the documented fallbacks.
///
/// Registry hit → as registered. A characteristic XMLID (`STR` bought as a
/// power) → characteristic table pricing without END. Anything else →
/// [`PowerDefinition::generic`].
pub(crate) fn resolve_definition<'a>(
    ctx: &ParseContext<'a>,
    xml_id: &str,
) -> (Cow<'a, PowerDefinition>, Option<CharacteristicKind>) {
    let characteristic = xml_id.parse::<CharacteristicKind>().ok();
    if let Some(def) = ctx.oracle.power(xml_id) {
        return (Cow::Borrowed(def), characteristic);
    }
    match characteristic {
        Some(kind) => (
            Cow::Owned(PowerDefinition {
                power_type: PowerType::Characteristic,
                lvl_cost: kind.cost_per_level(),
                uses_end: false,
                ..PowerDefinition::generic(xml_id)
            }),
            characteristic,
        ),
        None => {
            tracing::debug!("no power definition for {}; using generic pricing", xml_id);
            (Cow::Owned(PowerDefinition::generic(xml_id)), None)
        }
    }
}

pub(super) fn parse_power(node: &Element, ctx: &ParseContext<'_>) -> Power {
    let mut entry = ctx.entry(node);
    let (def, characteristic) = resolve_definition(ctx, &entry.xml_id);
    let option = entry.option_id.as_deref().and_then(|id| def.option(id));

    let lvl_cost = entry
        .lvl_cost
        .or_else(|| option.and_then(|o| o.lvl_cost))
        .unwrap_or(def.lvl_cost);
    let base_cost = if node.has("BASECOST") {
        entry.raw_base_cost
    } else {
        option.and_then(|o| o.base_cost).unwrap_or(def.base_cost)
    };
    let adders = adder_cost(&entry.adders);

    let force_wall = (entry.xml_id == FORCE_WALL).then(|| read_force_wall(node));
    let true_base_cost = match force_wall {
        Some(levels) => base_cost + f64::from(levels.cost()) + adders,
        None if characteristic.is_some() && entry.levels < 0 => 0.0,
        None => base_cost + f64::from(entry.levels) * lvl_cost + adders,
    };

    let end_override = node
        .get_opt_number("ENDCOST")
        .map(|v| v.round() as i32);
    let end_rule = end_rule(&entry, &def, end_override);

    let totals = entry.totals();
    let active = totals.active_cost(true_base_cost);
    // Resolved base cost is written back as BASECOST on serialization.
    entry.raw_base_cost = base_cost;
    entry.true_base_cost = true_base_cost;
    entry.base_cost = round_cost(true_base_cost);
    entry.active_cost = Some(active);
    entry.real_cost = totals.real_cost(active);
    entry.end_cost = Some(end_rule.end_cost(active));

    Power {
        power_type: def.power_type,
        end_rule,
        end_override,
        affects_primary: node.get_bool("AFFECTS_PRIMARY", false),
        affects_total: node.get_bool("AFFECTS_TOTAL", false),
        quantity: node.get_opt_number("QUANTITY").map(|v| v.round() as i32),
        ultra_slot: node.get_bool("ULTRA_SLOT", false),
        force_wall,
        entry,
    }
}

/// END precedence: tree `ENDCOST`, registry fixed END, then the power's own
/// `COSTSEND`/`REDUCEDEND` applied to its registry default.
fn end_rule(entry: &Entry, def: &PowerDefinition, end_override: Option<i32>) -> EndRule {
    if let Some(end) = end_override.or(def.end_cost) {
        return EndRule::Fixed(end);
    }
    let default = if def.uses_end {
        EndRule::Standard
    } else {
        EndRule::NoEnd
    };
    default.under(&entry.modifiers)
}

fn read_force_wall(node: &Element) -> ForceWallLevels {
    ForceWallLevels {
        pd: node.get_int("PDLEVELS", 0),
        ed: node.get_int("EDLEVELS", 0),
        md: node.get_int("MDLEVELS", 0),
        powd: node.get_int("POWDLEVELS", 0),
        length: node.get_int("LENGTHLEVELS", 0),
        height: node.get_int("HEIGHTLEVELS", 0),
        width: node.get_int("WIDTHLEVELS", 0),
        body: node.get_int("BODYLEVELS", 0),
    }
}
