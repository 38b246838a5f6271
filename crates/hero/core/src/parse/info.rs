use strum::IntoEnumIterator;

use crate::model::{BasicConfiguration, CharacterInfo, CharacteristicKind, Image, Rules};
use crate::tree::{AttributeNode, Element};

/// Point totals from `BASIC_CONFIGURATION`, falling back to `RULES`.
pub(super) fn parse_basic_configuration(
    node: Option<&Element>,
    rules: Option<&Rules>,
) -> BasicConfiguration {
    let defaults = match rules {
        Some(rules) => BasicConfiguration {
            base_points: rules.base_points,
            disad_points: rules.disad_points,
            ..BasicConfiguration::default()
        },
        None => BasicConfiguration::default(),
    };
    let Some(node) = node else {
        return defaults;
    };
    BasicConfiguration {
        base_points: node.get_int("BASE_POINTS", defaults.base_points),
        disad_points: node.get_int("DISAD_POINTS", defaults.disad_points),
        experience: node.get_int("EXPERIENCE", defaults.experience),
        export_template: node.get_opt_string("EXPORT_TEMPLATE"),
    }
}

pub(super) fn parse_character_info(node: &Element) -> CharacterInfo {
    let mut info = CharacterInfo {
        character_name: node.get_opt_string("CHARACTER_NAME"),
        alternate_identities: node.get_opt_string("ALTERNATE_IDENTITIES"),
        player_name: node.get_opt_string("PLAYER_NAME"),
        hair_color: node.get_opt_string("HAIR_COLOR"),
        eye_color: node.get_opt_string("EYE_COLOR"),
        campaign_name: node.get_opt_string("CAMPAIGN_NAME"),
        genre: node.get_opt_string("GENRE"),
        gm: node.get_opt_string("GM"),
        background: node.get_opt_string("BACKGROUND"),
        personality: node.get_opt_string("PERSONALITY"),
        quote: node.get_opt_string("QUOTE"),
        tactics: node.get_opt_string("TACTICS"),
        campaign_use: node.get_opt_string("CAMPAIGN_USE"),
        appearance: node.get_opt_string("APPEARANCE"),
        notes: node.get_opt_string("NOTES1"),
        ..CharacterInfo::default()
    };
    if let Some(inches) = node.get_opt_number("HEIGHT") {
        info.set_height_inches(inches);
    }
    if let Some(lbs) = node.get_opt_number("WEIGHT") {
        info.set_weight_lbs(lbs);
    }
    info
}

pub(super) fn parse_image(node: &Element) -> Image {
    Image {
        file_name: node.get_opt_string("FileName"),
        file_path: node.get_opt_string("FilePath"),
        data: node
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    }
}

pub(super) fn parse_rules(node: &Element) -> Rules {
    let defaults = BasicConfiguration::default();
    Rules {
        name: node.get_opt_string("NAME"),
        base_points: node.get_int("BASEPOINTS", defaults.base_points),
        disad_points: node.get_int("DISADPOINTS", defaults.disad_points),
        active_point_cap: node
            .get_opt_number("ACTIVE_POINT_CAP")
            .map(|v| v.round() as i32),
        real_point_cap: node
            .get_opt_number("REAL_POINT_CAP")
            .map(|v| v.round() as i32),
        characteristic_maxima: CharacteristicKind::iter()
            .filter_map(|kind| {
                node.get_opt_number(&format!("{kind}_MAX"))
                    .map(|max| (kind, max.round() as i32))
            })
            .collect(),
    }
}
