use super::ParseContext;
use crate::cost::{ModifierTotals, adder_cost, ceil_cost};
use crate::model::{EntryFlags, Skill};
use crate::tree::{AttributeNode, Element};

/// Skills whose children cost one point less.
pub const ENHANCER_SKILLS: [&str; 6] = [
    "JACK_OF_ALL_TRADES",
    "LINGUIST",
    "SCHOLAR",
    "SCIENTIST",
    "TRAVELER",
    "WELL_CONNECTED",
];

/// Cost formula selected by XMLID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SkillFormula {
    /// `ceil(BASECOST + levels + adders)`.
    Standard,
    CombatLevels,
    SkillLevels,
}

impl SkillFormula {
    fn for_xml_id(xml_id: &str) -> Self {
        match xml_id {
            "COMBAT_LEVELS" => Self::CombatLevels,
            "SKILL_LEVELS" => Self::SkillLevels,
            _ => Self::Standard,
        }
    }

    /// Cost per level for the breadth option, if the option is known.
    fn per_level(self, option: &str) -> Option<i32> {
        let option = option.to_ascii_uppercase();
        match self {
            Self::Standard => None,
            Self::CombatLevels => match option.as_str() {
                "SINGLE" => Some(2),
                "TIGHT" | "SMALL" => Some(3),
                "HTH" | "RANGED" | "BROAD" => Some(5),
                "ALL" | "DCV" | "OCV" => Some(8),
                _ => None,
            },
            Self::SkillLevels => match option.as_str() {
                "SINGLE" | "CHARACTERISTIC" => Some(2),
                "THREE" | "TIGHT" => Some(3),
                "GROUP" | "BROAD" => Some(4),
                "OVERALL" | "ALL" => Some(6),
                _ => None,
            },
        }
    }
}

pub(super) fn parse_skill(node: &Element, ctx: &ParseContext<'_>) -> Skill {
    let mut entry = ctx.entry(node);
    let standard = || {
        ceil_cost(entry.raw_base_cost + f64::from(entry.levels) + adder_cost(&entry.adders))
    };

    let formula = SkillFormula::for_xml_id(&entry.xml_id);
    let option = entry
        .option_id
        .as_deref()
        .or(entry.option.as_deref())
        .unwrap_or_default();
    let mut base = match formula.per_level(option) {
        Some(per_level) => entry.levels * per_level,
        None => standard(),
    };

    let familiarity = node.get_bool("FAMILIARITY", false);
    let everyman = node.get_bool("EVERYMAN", false);
    let native_tongue = node.get_bool("NATIVE_TONGUE", false);
    if everyman {
        base = 0;
    } else if familiarity && base == 0 {
        base = 1;
    }
    if native_tongue {
        base = 0;
    }

    if ENHANCER_SKILLS.contains(&entry.xml_id.as_str()) {
        entry.flags |= EntryFlags::ENHANCER;
    }

    let limitations = ModifierTotals::new(0.0, entry.totals().limitations);
    entry.base_cost = base;
    entry.true_base_cost = f64::from(base);
    entry.real_cost = limitations.real_cost(base);

    Skill {
        characteristic: node.get_opt_string("CHARACTERISTIC"),
        familiarity,
        everyman,
        native_tongue,
        proficiency: node.get_bool("PROFICIENCY", false),
        levels_only: node.get_bool("LEVELSONLY", false),
        entry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use crate::definitions::DefinitionTable;

    fn skill(attrs: &[(&str, &str)]) -> Skill {
        let node = attrs
            .iter()
            .fold(Element::new("SKILL"), |n, (k, v)| n.with_attr(*k, *v));
        parse_with(node)
    }

    fn parse_with(node: Element) -> Skill {
        let table = DefinitionTable::new();
        let options = ParseOptions::default();
        parse_skill(&node, &ParseContext::new(&table, &options))
    }

    #[test]
    fn combat_levels_all_cost_eight_per_level() {
        let s = skill(&[("XMLID", "COMBAT_LEVELS"), ("OPTIONID", "ALL"), ("LEVELS", "2")]);
        assert_eq!(s.entry.real_cost, 16);
    }

    #[test]
    fn skill_levels_table() {
        let s = skill(&[("XMLID", "SKILL_LEVELS"), ("OPTIONID", "GROUP"), ("LEVELS", "3")]);
        assert_eq!(s.entry.real_cost, 12);
    }

    #[test]
    fn unknown_level_option_uses_standard_formula() {
        let s = skill(&[
            ("XMLID", "COMBAT_LEVELS"),
            ("OPTIONID", "WEIRD"),
            ("BASECOST", "1.0"),
            ("LEVELS", "2"),
        ]);
        assert_eq!(s.entry.real_cost, 3);
    }

    #[test]
    fn standard_formula_includes_adders() {
        let node = Element::new("SKILL")
            .with_attr("XMLID", "CLIMBING")
            .with_attr("BASECOST", "3.0")
            .with_attr("LEVELS", "1")
            .with_child(
                Element::new("ADDER")
                    .with_attr("XMLID", "EXTRA")
                    .with_attr("BASECOST", "0.5"),
            );
        assert_eq!(parse_with(node).entry.real_cost, 5);
    }

    #[test]
    fn everyman_and_native_tongue_are_free() {
        let everyman = skill(&[
            ("XMLID", "STEALTH"),
            ("BASECOST", "3.0"),
            ("EVERYMAN", "Yes"),
            ("FAMILIARITY", "Yes"),
        ]);
        assert_eq!(everyman.entry.real_cost, 0);

        let native = skill(&[
            ("XMLID", "LANGUAGES"),
            ("BASECOST", "1.0"),
            ("LEVELS", "3"),
            ("NATIVE_TONGUE", "Yes"),
        ]);
        assert_eq!(native.entry.real_cost, 0);
    }

    #[test]
    fn zero_cost_familiarity_costs_one() {
        let s = skill(&[("XMLID", "TRACKING"), ("BASECOST", "0.0"), ("FAMILIARITY", "Yes")]);
        assert_eq!(s.entry.real_cost, 1);
        assert!(s.familiarity);
    }

    #[test]
    fn only_limitations_discount_skills() {
        let node = Element::new("SKILL")
            .with_attr("XMLID", "SECURITY_SYSTEMS")
            .with_attr("BASECOST", "9.0")
            .with_child(
                Element::new("MODIFIER")
                    .with_attr("XMLID", "REQUIRESASKILLROLL")
                    .with_attr("BASECOST", "-0.5"),
            )
            .with_child(
                Element::new("MODIFIER")
                    .with_attr("XMLID", "IGNORED")
                    .with_attr("BASECOST", "1.0"),
            );
        let s = parse_with(node);
        assert_eq!(s.entry.base_cost, 9);
        assert_eq!(s.entry.real_cost, 6);
    }

    #[test]
    fn enhancers_are_flagged() {
        let s = skill(&[("XMLID", "SCHOLAR"), ("BASECOST", "3.0")]);
        assert!(s.entry.is_enhancer());
    }
}
