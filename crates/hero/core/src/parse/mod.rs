//! Entity parsers: attributed tree → [`Character`].
//!
//! Each category has a pure leaf parser `fn(&Element, &ParseContext) -> T`.
//! The section walker in this module handles what is shared: fallback ids,
//! `LIST` groups, `COMPOUNDPOWER` containers and their nested children, and
//! duplicate ids. Once every section is read the aggregator fixes up
//! parent-dependent costs.
mod characteristic;
mod disadvantage;
mod equipment;
mod info;
mod maneuver;
mod perk;
mod power;
mod skill;

pub use maneuver::parse_combat_value;
pub use skill::ENHANCER_SKILLS;

use crate::aggregate::aggregate_character;
use crate::config::ParseOptions;
use crate::cost::{parse_adders, parse_modifiers};
use crate::definitions::DefinitionOracle;
use crate::error::HeroError;
use crate::model::{Character, CostEntry, Entry, EntryFlags, EntryList};
use crate::tree::{AttributeNode, Element};

const ROOT_NAMES: [&str; 3] = ["CHARACTER", "HERO", "RULES"];
const LIST_ELEMENT: &str = "LIST";
const COMPOUND_ELEMENT: &str = "COMPOUNDPOWER";
const DEFAULT_VERSION: &str = "6.0";

/// Read-only inputs shared by every leaf parser of one call.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub oracle: &'a dyn DefinitionOracle,
    pub options: &'a ParseOptions,
}

impl<'a> ParseContext<'a> {
    pub fn new(oracle: &'a dyn DefinitionOracle, options: &'a ParseOptions) -> Self {
        Self { oracle, options }
    }

    /// Reads the fields every cost-bearing entity shares.
    pub fn entry(&self, node: &Element) -> Entry {
        self.entry_with_adders(node, self.options.preserve_adder_hierarchy)
    }

    /// As [`entry`](Self::entry), choosing adder flattening explicitly.
    pub fn entry_with_adders(&self, node: &Element, preserve_adders: bool) -> Entry {
        Entry {
            element: node.name.clone(),
            id: node.get_string("ID", ""),
            xml_id: node.get_string("XMLID", &node.name),
            name: node.get_string("NAME", ""),
            alias: node.get_opt_string("ALIAS"),
            position: node.get_int("POSITION", 0),
            levels: node.get_int("LEVELS", 0),
            raw_base_cost: node.get_number("BASECOST", 0.0),
            lvl_cost: node.get_opt_number("LVLCOST"),
            lvl_val: node.get_opt_number("LVLVAL"),
            option: node.get_opt_string("OPTION"),
            option_id: node.get_opt_string("OPTIONID"),
            option_alias: node.get_opt_string("OPTION_ALIAS"),
            input: node.get_opt_string("INPUT"),
            notes: node.get_opt_string("NOTES"),
            modifiers: parse_modifiers(node, self.oracle, preserve_adders),
            adders: parse_adders(node, preserve_adders),
            parent_id: node.get_opt_string("PARENTID"),
            ..Entry::default()
        }
    }
}

/// Parses a whole character record.
///
/// Fails only when the root is not a character record; every other defect
/// degrades to defaults.
pub fn parse_character(
    root: &Element,
    oracle: &dyn DefinitionOracle,
    options: &ParseOptions,
) -> Result<Character, HeroError> {
    if !ROOT_NAMES.contains(&root.name.as_str()) {
        return Err(HeroError::UnexpectedRoot(root.name.clone()));
    }
    let ctx = ParseContext::new(oracle, options);

    let version = root
        .get_opt_string("version")
        .or_else(|| root.get_opt_string("VERSION"))
        .unwrap_or_else(|| DEFAULT_VERSION.to_string());

    let rules = if root.is_named("RULES") {
        Some(info::parse_rules(root))
    } else {
        root.child("RULES").map(info::parse_rules)
    };

    let mut character = Character {
        version,
        basic_configuration: info::parse_basic_configuration(
            root.child("BASIC_CONFIGURATION"),
            rules.as_ref(),
        ),
        info: root
            .child("CHARACTER_INFO")
            .map(info::parse_character_info)
            .unwrap_or_default(),
        characteristics: root
            .child("CHARACTERISTICS")
            .map(characteristic::parse_characteristics)
            .unwrap_or_default(),
        image: root.child("IMAGE").map(info::parse_image),
        rules,
        ..Character::default()
    };

    let mut walker = SectionWalker::new(ctx);
    character.skills = walker.section(root.child("SKILLS"), skill::parse_skill);
    character.perks = walker.section(root.child("PERKS"), perk::parse_perk);
    character.talents = walker.section(root.child("TALENTS"), perk::parse_talent);
    character.martial_arts = walker.section(root.child("MARTIALARTS"), maneuver::parse_maneuver);
    character.powers = walker.section(root.child("POWERS"), power::parse_power);
    character.disadvantages =
        walker.section(root.child("DISADVANTAGES"), disadvantage::parse_disadvantage);
    character.equipment = walker.section(root.child("EQUIPMENT"), equipment::parse_equipment);

    tracing::debug!(
        skills = character.skills.len(),
        perks = character.perks.len(),
        talents = character.talents.len(),
        maneuvers = character.martial_arts.len(),
        powers = character.powers.len(),
        disadvantages = character.disadvantages.len(),
        equipment = character.equipment.len(),
        "parsed character sections"
    );

    if !options.skip_aggregation {
        aggregate_character(&mut character);
    }
    Ok(character)
}

/// Walks one section, flattening nested groups into a single list.
struct SectionWalker<'a> {
    ctx: ParseContext<'a>,
    next_fallback: usize,
}

impl<'a> SectionWalker<'a> {
    fn new(ctx: ParseContext<'a>) -> Self {
        Self {
            ctx,
            next_fallback: 0,
        }
    }

    fn section<T, F>(&mut self, section: Option<&Element>, parse: F) -> EntryList<T>
    where
        T: CostEntry,
        F: Fn(&Element, &ParseContext<'_>) -> T,
    {
        let mut list = EntryList::new();
        if let Some(section) = section {
            self.walk(section, None, &parse, &mut list);
        }
        list
    }

    fn walk<T, F>(
        &mut self,
        node: &Element,
        parent: Option<(&str, bool)>,
        parse: &F,
        list: &mut EntryList<T>,
    ) where
        T: CostEntry,
        F: Fn(&Element, &ParseContext<'_>) -> T,
    {
        for child in node.children.iter().filter(|c| is_entry_node(c)) {
            let mut item = parse(child, &self.ctx);
            if item.entry().id.is_empty() {
                item.assign_id(self.fallback_id(&child.name));
            }

            let entry = item.entry_mut();
            if let Some((parent_id, owned)) = parent {
                entry.parent_id = Some(parent_id.to_string());
                if owned {
                    entry.flags |= EntryFlags::OWNED;
                }
            }
            let nested = match child.name.as_str() {
                LIST_ELEMENT => Some(false),
                COMPOUND_ELEMENT => Some(true),
                _ => None,
            };
            if let Some(owned) = nested {
                entry.flags |= if owned {
                    EntryFlags::CONTAINER
                } else {
                    EntryFlags::GROUP
                };
            }
            let id = entry.id.clone();

            if list.get(&id).is_some() {
                let replacement = self.fallback_id(&child.name);
                tracing::warn!(
                    "duplicate id '{}' in {}; renamed to '{}'",
                    id,
                    node.name,
                    replacement
                );
                item.assign_id(replacement);
            }
            let id = item.entry().id.clone();
            if list.push(item).is_err() {
                continue;
            }

            if let Some(owned) = nested {
                self.walk(child, Some((&id, owned)), parse, list);
            }
        }
    }

    fn fallback_id(&mut self, element: &str) -> String {
        self.next_fallback += 1;
        format!("{}-{}", element.to_ascii_lowercase(), self.next_fallback)
    }
}

/// Direct children that describe an entity rather than one of its fields.
fn is_entry_node(node: &Element) -> bool {
    match node.name.as_str() {
        "MODIFIER" | "ADDER" | "NOTES" => false,
        LIST_ELEMENT | COMPOUND_ELEMENT => true,
        _ => node.has("XMLID"),
    }
}
