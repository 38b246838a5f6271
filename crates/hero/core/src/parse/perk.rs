use super::ParseContext;
use crate::cost::{ModifierTotals, adder_cost, ceil_cost};
use crate::model::{Entry, Perk, Talent};
use crate::tree::{AttributeNode, Element};

/// Perk cost formulas keyed by XMLID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PerkFormula {
    /// `ceil(|BASECOST + adders + levels|)`.
    Standard,
    /// `ceil(base points / 5)`.
    VehicleBase,
    /// `max(levels, 1)`.
    Contact,
    /// `ceil(|BASECOST| + adders)`; levels describe reach, not cost.
    Reputation,
}

impl PerkFormula {
    fn for_xml_id(xml_id: &str) -> Self {
        match xml_id {
            "VEHICLE_BASE" => Self::VehicleBase,
            "CONTACT" => Self::Contact,
            "REPUTATION" | "POSITIVE_REPUTATION" => Self::Reputation,
            _ => Self::Standard,
        }
    }
}

pub(super) fn parse_perk(node: &Element, ctx: &ParseContext<'_>) -> Perk {
    let mut entry = ctx.entry(node);
    let base_points = node
        .get_opt_number("BASEPOINTS")
        .map(|v| v.round() as i32);
    let adders = adder_cost(&entry.adders);

    let base = match PerkFormula::for_xml_id(&entry.xml_id) {
        PerkFormula::VehicleBase => {
            let points = base_points.unwrap_or(entry.levels);
            ceil_cost(f64::from(points) / 5.0)
        }
        PerkFormula::Contact => entry.levels.max(1),
        PerkFormula::Reputation => ceil_cost(entry.raw_base_cost.abs() + adders),
        PerkFormula::Standard => {
            ceil_cost((entry.raw_base_cost + adders + f64::from(entry.levels)).abs())
        }
    };
    apply_limitations(&mut entry, base);

    Perk { entry, base_points }
}

pub(super) fn parse_talent(node: &Element, ctx: &ParseContext<'_>) -> Talent {
    let mut entry = ctx.entry(node);
    let base = if entry.xml_id == "CUSTOMTALENT" {
        entry.levels
    } else {
        ceil_cost(entry.raw_base_cost + f64::from(entry.levels) + adder_cost(&entry.adders))
    };
    apply_limitations(&mut entry, base);

    Talent { entry }
}

fn apply_limitations(entry: &mut Entry, base: i32) {
    let limitations = ModifierTotals::new(0.0, entry.totals().limitations);
    entry.base_cost = base;
    entry.true_base_cost = f64::from(base);
    entry.real_cost = limitations.real_cost(base);
}
