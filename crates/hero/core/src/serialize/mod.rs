//! Serializer: [`Character`] → attributed tree.
//!
//! Writes inputs, not computed figures: re-parsing the output reproduces the
//! same costs and parent links. This is a best-effort forward mapping; no
//! invariants are checked and tree details the model never retained are not
//! reconstructed.
mod wire;

pub use wire::{AttrWriter, format_number, wire_name};

use crate::cost::{Adder, Modifier};
use crate::model::{
    BasicConfiguration, Character, CharacterInfo, Characteristic, CostEntry, Disadvantage, Entry,
    EntryList, Equipment, Image, MartialManeuver, Perk, Power, Rules, Skill, Talent, lbs_to_kg,
    kg_to_lbs,
};
use crate::tree::Element;

const ROOT: &str = "CHARACTER";

pub fn serialize_character(character: &Character) -> Element {
    let mut root = Element::new(ROOT).with_attr("version", character.version.as_str());

    root.push_child(basic_configuration(&character.basic_configuration));
    if let Some(rules) = &character.rules {
        root.push_child(rules_element(rules));
    }
    root.push_child(character_info(&character.info));
    root.push_child(Element {
        name: "CHARACTERISTICS".into(),
        children: character.characteristics.iter().map(characteristic).collect(),
        ..Element::default()
    });

    root.push_child(section("SKILLS", &character.skills, skill_fields));
    root.push_child(section("PERKS", &character.perks, perk_fields));
    root.push_child(section("TALENTS", &character.talents, |_: &Talent, _| {}));
    root.push_child(section("MARTIALARTS", &character.martial_arts, maneuver_fields));
    root.push_child(section("POWERS", &character.powers, power_fields));
    root.push_child(section(
        "DISADVANTAGES",
        &character.disadvantages,
        |_: &Disadvantage, _| {},
    ));
    root.push_child(section("EQUIPMENT", &character.equipment, equipment_fields));

    if let Some(image) = &character.image {
        root.push_child(image_element(image));
    }
    root
}

fn basic_configuration(config: &BasicConfiguration) -> Element {
    let mut node = Element::new("BASIC_CONFIGURATION")
        .with_attr("BASE_POINTS", config.base_points.to_string())
        .with_attr("DISAD_POINTS", config.disad_points.to_string())
        .with_attr("EXPERIENCE", config.experience.to_string());
    if let Some(template) = &config.export_template {
        node.set_attr("EXPORT_TEMPLATE", template.as_str());
    }
    node
}

fn rules_element(rules: &Rules) -> Element {
    let mut node = Element::new("RULES");
    AttrWriter::new(&mut node)
        .opt_text("name", rules.name.as_deref())
        .int("base_points", rules.base_points)
        .int("disad_points", rules.disad_points)
        .opt_int("active_point_cap", rules.active_point_cap)
        .opt_int("real_point_cap", rules.real_point_cap);
    for (kind, max) in &rules.characteristic_maxima {
        node.set_attr(format!("{kind}_MAX"), max.to_string());
    }
    node
}

fn character_info(info: &CharacterInfo) -> Element {
    let mut node = Element::new("CHARACTER_INFO");
    AttrWriter::new(&mut node)
        .opt_text("character_name", info.character_name.as_deref())
        .opt_text("alternate_identities", info.alternate_identities.as_deref())
        .opt_text("player_name", info.player_name.as_deref())
        .opt_number("height", info.height_inches())
        .opt_number("weight", info.weight_lbs())
        .opt_text("hair_color", info.hair_color.as_deref())
        .opt_text("eye_color", info.eye_color.as_deref())
        .opt_text("campaign_name", info.campaign_name.as_deref())
        .opt_text("genre", info.genre.as_deref())
        .opt_text("gm", info.gm.as_deref());

    let long_text = [
        ("BACKGROUND", &info.background),
        ("PERSONALITY", &info.personality),
        ("QUOTE", &info.quote),
        ("TACTICS", &info.tactics),
        ("CAMPAIGN_USE", &info.campaign_use),
        ("APPEARANCE", &info.appearance),
        ("NOTES1", &info.notes),
    ];
    for (name, text) in long_text {
        if let Some(text) = text {
            node.push_child(Element::new(name).with_text(text.as_str()));
        }
    }
    node
}

fn characteristic(c: &Characteristic) -> Element {
    let name = c.kind.to_string();
    let mut node = Element::new(name.as_str());
    AttrWriter::new(&mut node)
        .text("xml_id", &name)
        .opt_text("alias", c.alias.as_deref())
        .int("position", c.position)
        .int("levels", c.levels);
    if let Some(notes) = &c.notes {
        node.push_child(Element::new("NOTES").with_text(notes.as_str()));
    }
    node
}

fn image_element(image: &Image) -> Element {
    let mut node = Element::new("IMAGE");
    if let Some(name) = &image.file_name {
        node.set_attr("FileName", name.as_str());
    }
    if let Some(path) = &image.file_path {
        node.set_attr("FilePath", path.as_str());
    }
    node.text = image.data.clone();
    node
}

/// Writes one category list.
///
/// Owned children are nested inside their container; every other entry is
/// a direct child of the section and links to its parent with `PARENTID`.
fn section<T, F>(name: &str, list: &EntryList<T>, fields: F) -> Element
where
    T: CostEntry,
    F: Fn(&T, &mut Element) + Copy,
{
    let mut node = Element::new(name);
    for item in list {
        let entry = item.entry();
        let nested = entry.is_owned()
            && entry
                .parent_id
                .as_deref()
                .is_some_and(|p| list.get(p).is_some());
        if !nested {
            node.push_child(entry_tree(item, list, fields));
        }
    }
    node
}

fn entry_tree<T, F>(item: &T, list: &EntryList<T>, fields: F) -> Element
where
    T: CostEntry,
    F: Fn(&T, &mut Element) + Copy,
{
    let entry = item.entry();
    let mut node = entry_element(entry);
    fields(item, &mut node);
    if entry.is_container() {
        for child in list.children_of(&entry.id) {
            if child.entry().is_owned() && child.entry().id != entry.id {
                let mut child_node = entry_tree(child, list, fields);
                child_node.attributes.retain(|(k, _)| k != "PARENTID");
                node.push_child(child_node);
            }
        }
    }
    node
}

/// Shared entry inputs plus nested modifiers and adders.
fn entry_element(entry: &Entry) -> Element {
    let element = if entry.element.is_empty() {
        "POWER"
    } else {
        entry.element.as_str()
    };
    let mut node = Element::new(element);
    let mut w = AttrWriter::new(&mut node);
    if !entry.id.is_empty() {
        w.text("id", &entry.id);
    }
    w.text("xml_id", &entry.xml_id)
        .text("name", &entry.name)
        .opt_text("alias", entry.alias.as_deref())
        .int("position", entry.position)
        .int("levels", entry.levels)
        .number("raw_base_cost", entry.raw_base_cost)
        .opt_number("lvl_cost", entry.lvl_cost)
        .opt_number("lvl_val", entry.lvl_val)
        .opt_text("option", entry.option.as_deref())
        .opt_text("option_id", entry.option_id.as_deref())
        .opt_text("option_alias", entry.option_alias.as_deref())
        .opt_text("input", entry.input.as_deref())
        .opt_text("parent_id", entry.parent_id.as_deref());

    if let Some(notes) = &entry.notes {
        node.push_child(Element::new("NOTES").with_text(notes.as_str()));
    }
    node.children.extend(entry.modifiers.iter().map(modifier_element));
    node.children.extend(entry.adders.iter().map(adder_element));
    node
}

fn modifier_element(modifier: &Modifier) -> Element {
    let mut node = Element::new("MODIFIER");
    AttrWriter::new(&mut node)
        .text("xml_id", &modifier.xml_id)
        .opt_text("alias", modifier.alias.as_deref())
        .opt_text("option", modifier.option.as_deref())
        .opt_text("option_id", modifier.option_id.as_deref())
        .opt_text("option_alias", modifier.option_alias.as_deref())
        .opt_text("input", modifier.input.as_deref())
        .int("levels", modifier.levels)
        .number("base_cost", modifier.base_cost)
        .flag("is_limitation", modifier.is_limitation);
    if modifier.alias.as_deref() != Some(modifier.name.as_str()) && modifier.name != modifier.xml_id
    {
        node.set_attr("NAME", modifier.name.as_str());
    }
    node.children.extend(modifier.adders.iter().map(adder_element));
    node
}

fn adder_element(adder: &Adder) -> Element {
    let mut node = Element::new("ADDER");
    let mut w = AttrWriter::new(&mut node);
    w.text("xml_id", &adder.xml_id)
        .opt_text("alias", adder.alias.as_deref())
        .opt_text("option", adder.option.as_deref())
        .opt_text("option_id", adder.option_id.as_deref())
        .opt_text("option_alias", adder.option_alias.as_deref())
        .opt_text("input", adder.input.as_deref())
        .number("base_cost", adder.base_cost)
        .flag("selected", adder.selected)
        .flag("include_in_base", adder.include_in_base);
    if adder.levels != 0 {
        w.int("levels", adder.levels);
    }
    if adder.lvl_cost != 0.0 {
        w.number("lvl_cost", adder.lvl_cost);
    }
    if adder.lvl_val != 0.0 {
        w.number("lvl_val", adder.lvl_val);
    }
    if !adder.name.is_empty() && adder.alias.as_deref() != Some(adder.name.as_str()) {
        node.set_attr("NAME", adder.name.as_str());
    }
    node.children.extend(adder.adders.iter().map(adder_element));
    node
}

fn skill_fields(skill: &Skill, node: &mut Element) {
    AttrWriter::new(node)
        .opt_text("characteristic", skill.characteristic.as_deref())
        .flag("familiarity", skill.familiarity)
        .flag("everyman", skill.everyman)
        .flag("native_tongue", skill.native_tongue)
        .flag("proficiency", skill.proficiency)
        .flag("levels_only", skill.levels_only);
}

fn perk_fields(perk: &Perk, node: &mut Element) {
    AttrWriter::new(node).opt_int("base_points", perk.base_points);
}

fn maneuver_fields(maneuver: &MartialManeuver, node: &mut Element) {
    let ocv = combat_text(&maneuver.ocv_text, maneuver.ocv);
    let dcv = combat_text(&maneuver.dcv_text, maneuver.dcv);
    AttrWriter::new(node)
        .text("ocv", &ocv)
        .text("dcv", &dcv)
        .opt_text("phase", maneuver.phase.as_deref())
        .opt_text("effect", maneuver.effect.as_deref())
        .opt_text("category", maneuver.category.as_deref())
        .int("dc", maneuver.dc)
        .flag("use_weapon", maneuver.use_weapon);
}

/// Original text while it still encodes `value`, otherwise a signed number.
fn combat_text(text: &str, value: i32) -> String {
    if !text.is_empty() && crate::parse::parse_combat_value(text) == value {
        text.to_string()
    } else {
        format!("{value:+}")
    }
}

fn power_fields(power: &Power, node: &mut Element) {
    AttrWriter::new(node)
        .opt_int("end_override", power.end_override)
        .flag("affects_primary", power.affects_primary)
        .flag("affects_total", power.affects_total)
        .opt_int("quantity", power.quantity)
        .flag("ultra_slot", power.ultra_slot);
    if let Some(levels) = &power.force_wall {
        let pairs = [
            ("PDLEVELS", levels.pd),
            ("EDLEVELS", levels.ed),
            ("MDLEVELS", levels.md),
            ("POWDLEVELS", levels.powd),
            ("LENGTHLEVELS", levels.length),
            ("HEIGHTLEVELS", levels.height),
            ("WIDTHLEVELS", levels.width),
            ("BODYLEVELS", levels.body),
        ];
        for (name, value) in pairs {
            node.set_attr(name, value.to_string());
        }
    }
}

fn equipment_fields(item: &Equipment, node: &mut Element) {
    power_fields(&item.power, node);
    let lbs = if lbs_to_kg(item.weight_lbs) == item.weight_kg {
        item.weight_lbs
    } else {
        kg_to_lbs(item.weight_kg)
    };
    AttrWriter::new(node)
        .number("weight_lbs", lbs)
        .number("price", item.price)
        .flag("carried", item.carried);
    for sub in &item.sub_powers {
        let mut child = Element::new(sub.entry.element.as_str());
        let mut w = AttrWriter::new(&mut child);
        w.text("id", &sub.entry.id).int("levels", sub.entry.levels);
        w.opt_text("alias", sub.entry.alias.as_deref());
        node.push_child(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use crate::definitions::{DefinitionTable, PowerDefinition};
    use crate::parse::parse_character;

    fn registry() -> DefinitionTable {
        DefinitionTable::new()
            .with_power(PowerDefinition {
                lvl_cost: 5.0,
                ..PowerDefinition::generic("ENERGYBLAST")
            })
            .with_power(PowerDefinition {
                base_cost: 10.0,
                uses_end: false,
                ..PowerDefinition::generic("CLINGING")
            })
    }

    fn sample() -> Element {
        let blast = |id: &str| {
            Element::new("POWER")
                .with_attr("XMLID", "ENERGYBLAST")
                .with_attr("ID", id)
                .with_attr("LEVELS", "6")
                .with_attr("BASECOST", "0.0")
        };
        Element::new("CHARACTER")
            .with_attr("version", "6.0")
            .with_child(
                Element::new("CHARACTERISTICS")
                    .with_child(Element::new("DEX").with_attr("LEVELS", "5")),
            )
            .with_child(
                Element::new("SKILLS").with_child(
                    Element::new("SKILL")
                        .with_attr("XMLID", "COMBAT_LEVELS")
                        .with_attr("ID", "s1")
                        .with_attr("OPTIONID", "ALL")
                        .with_attr("LEVELS", "2")
                        .with_attr("FAMILIARITY", "No"),
                ),
            )
            .with_child(
                Element::new("POWERS")
                    .with_child(
                        Element::new("LIST")
                            .with_attr("ID", "l")
                            .with_attr("XMLID", "GENERIC_OBJECT")
                            .with_child(
                                Element::new("MODIFIER")
                                    .with_attr("XMLID", "OAF")
                                    .with_attr("BASECOST", "-1.0"),
                            )
                            .with_child(
                                Element::new("ADDER")
                                    .with_attr("XMLID", "DISCOUNT")
                                    .with_attr("BASECOST", "-1.0"),
                            ),
                    )
                    .with_child(
                        blast("p1").with_attr("PARENTID", "l").with_child(
                            Element::new("MODIFIER")
                                .with_attr("XMLID", "AP")
                                .with_attr("BASECOST", "0.5"),
                        ),
                    )
                    .with_child(
                        Element::new("COMPOUNDPOWER")
                            .with_attr("ID", "c")
                            .with_child(blast("c1"))
                            .with_child(blast("c2").with_attr("ENDCOST", "1")),
                    )
                    .with_child(
                        Element::new("POWER")
                            .with_attr("XMLID", "CLINGING")
                            .with_attr("ID", "p2"),
                    ),
            )
            .with_child(
                Element::new("EQUIPMENT").with_child(
                    Element::new("POWER")
                        .with_attr("XMLID", "SHIELD")
                        .with_attr("ID", "e1")
                        .with_attr("WEIGHT", "10.0")
                        .with_child(Element::new("DCV").with_attr("LEVELS", "1")),
                ),
            )
    }

    fn parse(root: &Element) -> Character {
        parse_character(root, &registry(), &ParseOptions::default()).expect("character root")
    }

    type Figures = (String, i32, Option<i32>, Option<i32>, Option<String>);

    fn figures<T: CostEntry>(list: &EntryList<T>) -> Vec<Figures> {
        list.iter()
            .map(|item| {
                let e = item.entry();
                (e.id.clone(), e.real_cost, e.active_cost, e.end_cost, e.parent_id.clone())
            })
            .collect()
    }

    #[test]
    fn parse_serialize_parse_is_stable() {
        let first = parse(&sample());
        let second = parse(&serialize_character(&first));

        assert_eq!(figures(&first.skills), figures(&second.skills));
        assert_eq!(figures(&first.powers), figures(&second.powers));
        assert_eq!(figures(&first.equipment), figures(&second.equipment));
        assert_eq!(first.characteristics, second.characteristics);

        let owned: Vec<_> = second
            .powers
            .iter()
            .map(|p| p.entry.is_owned())
            .collect();
        assert_eq!(owned, [false, false, false, true, true, false]);
    }

    #[test]
    fn list_child_costs_after_round_trip() {
        let character = parse(&serialize_character(&parse(&sample())));
        let child = character.powers.get("p1").expect("list child");
        // 30 active × 1.5 = 45, ÷ 2 = 22.5 → 22, minus the list discount.
        assert_eq!(child.entry.active_cost, Some(45));
        assert_eq!(child.entry.real_cost, 21);
        let compound = character.powers.get("c").expect("compound");
        assert_eq!(compound.entry.real_cost, 60);
        assert_eq!(compound.entry.end_cost, Some(4));
        // Registry base cost survives even though the source had no BASECOST.
        assert_eq!(character.powers.get("p2").map(|p| p.entry.real_cost), Some(10));
    }

    #[test]
    fn equipment_weight_survives_display_edit() {
        let mut character = parse(&sample());
        if let Some(item) = character.equipment.get_mut("e1") {
            assert_eq!(item.weight_kg, 4.5);
            item.set_weight_kg(4.5);
        }
        let tree = serialize_character(&character);
        let weight = tree
            .child("EQUIPMENT")
            .and_then(|s| s.child("POWER"))
            .and_then(|p| p.attr("WEIGHT"));
        assert_eq!(weight, Some("10.0"));
    }

    #[test]
    fn yes_no_and_exception_names_on_the_wire() {
        let tree = serialize_character(&parse(&sample()));
        let skill = tree
            .child("SKILLS")
            .and_then(|s| s.child("SKILL"))
            .expect("skill written");
        assert_eq!(skill.attr("XMLID"), Some("COMBAT_LEVELS"));
        assert_eq!(skill.attr("OPTIONID"), Some("ALL"));
        assert_eq!(skill.attr("FAMILIARITY"), Some("No"));
        assert_eq!(skill.attr("BASECOST"), Some("0.0"));
    }
}
