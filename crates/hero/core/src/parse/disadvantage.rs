use super::ParseContext;
use crate::cost::{adder_cost, round_cost};
use crate::model::{Disadvantage, DisadvantageKind, Entry};
use crate::tree::Element;

pub(super) fn parse_disadvantage(node: &Element, ctx: &ParseContext<'_>) -> Disadvantage {
    let mut entry = ctx.entry(node);
    let kind = DisadvantageKind::from_xml_id(&entry.xml_id);

    let points = round_cost((entry.raw_base_cost + adder_cost(&entry.adders)).abs());
    entry.base_cost = points;
    entry.true_base_cost = f64::from(points);
    entry.real_cost = points;

    Disadvantage {
        display_name: display_name(kind, &entry),
        kind,
        entry,
    }
}

/// `Label: INPUT (alias, alias)` from the selected adders' option aliases.
fn display_name(kind: DisadvantageKind, entry: &Entry) -> String {
    let mut name = kind.label().to_string();
    if let Some(input) = entry.input.as_deref().filter(|i| !i.is_empty()) {
        name.push_str(": ");
        name.push_str(input);
    }
    let aliases: Vec<&str> = entry
        .adders
        .iter()
        .filter(|a| a.selected)
        .filter_map(|a| a.option_alias.as_deref())
        .collect();
    if !aliases.is_empty() {
        name.push_str(" (");
        name.push_str(&aliases.join(", "));
        name.push(')');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use crate::definitions::DefinitionTable;

    fn adder(xml_id: &str, cost: &str, alias: &str) -> Element {
        Element::new("ADDER")
            .with_attr("XMLID", xml_id)
            .with_attr("BASECOST", cost)
            .with_attr("OPTION_ALIAS", alias)
    }

    #[test]
    fn points_and_display_name() {
        let node = Element::new("DISAD")
            .with_attr("XMLID", "PSYCHOLOGICALLIMITATION")
            .with_attr("BASECOST", "0.0")
            .with_attr("INPUT", "Code Against Killing")
            .with_child(adder("SITUATION", "10.0", "Very Common"))
            .with_child(adder("INTENSITY", "5.0", "Strong"));
        let table = DefinitionTable::new();
        let options = ParseOptions::default();
        let d = parse_disadvantage(&node, &ParseContext::new(&table, &options));

        assert_eq!(d.points(), 15);
        assert_eq!(d.entry.real_cost, 15);
        assert_eq!(d.kind, DisadvantageKind::PsychologicalLimitation);
        assert_eq!(
            d.display_name,
            "Psychological Complication: Code Against Killing (Very Common, Strong)"
        );
    }

    #[test]
    fn negative_base_costs_count_as_points() {
        let node = Element::new("DISAD")
            .with_attr("XMLID", "UNLUCK")
            .with_attr("BASECOST", "-5.0");
        let table = DefinitionTable::new();
        let options = ParseOptions::default();
        let d = parse_disadvantage(&node, &ParseContext::new(&table, &options));
        assert_eq!(d.points(), 5);
        assert_eq!(d.display_name, "Unluck");
    }
}
