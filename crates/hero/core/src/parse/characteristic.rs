use crate::model::{Characteristic, CharacteristicKind};
use crate::tree::{AttributeNode, Element};

/// Reads the `CHARACTERISTICS` section; unknown element names are skipped.
pub(super) fn parse_characteristics(section: &Element) -> Vec<Characteristic> {
    section
        .children
        .iter()
        .filter_map(|node| {
            let Ok(kind) = node.name.parse::<CharacteristicKind>() else {
                tracing::debug!("skipping unknown characteristic element {}", node.name);
                return None;
            };
            let mut characteristic = Characteristic::new(kind, node.get_int("LEVELS", 0));
            characteristic.alias = node.get_opt_string("ALIAS");
            characteristic.position = node.get_int("POSITION", 0);
            characteristic.notes = node.get_opt_string("NOTES");
            if let Some(name) = node.get_opt_string("NAME") {
                characteristic.name = name;
            }
            Some(characteristic)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_known_characteristics_in_order() {
        let section = Element::new("CHARACTERISTICS")
            .with_child(Element::new("STR").with_attr("LEVELS", "5"))
            .with_child(Element::new("DEX").with_attr("LEVELS", "-3"))
            .with_child(Element::new("COMELINESS").with_attr("LEVELS", "4"))
            .with_child(Element::new("END").with_attr("LEVELS", "10"));
        let chars = parse_characteristics(&section);

        let kinds: Vec<_> = chars.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [
                CharacteristicKind::Str,
                CharacteristicKind::Dex,
                CharacteristicKind::End
            ]
        );
        assert_eq!(chars[0].real_cost, 5);
        assert_eq!(chars[1].real_cost, 0);
        assert_eq!(chars[1].total_value, 7);
        assert_eq!(chars[2].real_cost, 2);
        assert_eq!(chars[2].total_value, 30);
    }
}
