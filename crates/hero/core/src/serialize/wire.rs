//! Field → attribute naming and value formatting.

use std::borrow::Cow;

use crate::tree::Element;

/// Fields whose wire name is not the upper-cased field name.
const WIRE_EXCEPTIONS: &[(&str, &str)] = &[
    ("xml_id", "XMLID"),
    ("option_id", "OPTIONID"),
    ("parent_id", "PARENTID"),
    ("raw_base_cost", "BASECOST"),
    ("base_cost", "BASECOST"),
    ("lvl_cost", "LVLCOST"),
    ("lvl_val", "LVLVAL"),
    ("include_in_base", "INCLUDEINBASE"),
    ("is_limitation", "ISLIMITATION"),
    ("levels_only", "LEVELSONLY"),
    ("base_points", "BASEPOINTS"),
    ("disad_points", "DISADPOINTS"),
    ("weight_lbs", "WEIGHT"),
    ("end_override", "ENDCOST"),
    ("use_weapon", "USEWEAPON"),
];

/// Boolean fields written as `Yes`/`No`; any other boolean is `true`/`false`.
const YES_NO_FIELDS: &[&str] = &[
    "selected",
    "include_in_base",
    "familiarity",
    "everyman",
    "native_tongue",
    "proficiency",
    "levels_only",
    "affects_primary",
    "affects_total",
    "ultra_slot",
    "carried",
    "use_weapon",
];

pub fn wire_name(field: &str) -> Cow<'static, str> {
    WIRE_EXCEPTIONS
        .iter()
        .find(|(name, _)| *name == field)
        .map_or_else(
            || Cow::Owned(field.to_ascii_uppercase()),
            |(_, wire)| Cow::Borrowed(*wire),
        )
}

/// Integral values keep one decimal (`3.0`), others print as-is (`0.25`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub fn format_flag(field: &str, value: bool) -> &'static str {
    match (YES_NO_FIELDS.contains(&field), value) {
        (true, true) => "Yes",
        (true, false) => "No",
        (false, true) => "true",
        (false, false) => "false",
    }
}

/// Writes typed fields onto an element under their wire names.
pub struct AttrWriter<'a> {
    node: &'a mut Element,
}

impl<'a> AttrWriter<'a> {
    pub fn new(node: &'a mut Element) -> Self {
        Self { node }
    }

    pub fn text(&mut self, field: &str, value: &str) -> &mut Self {
        self.node.set_attr(wire_name(field), value);
        self
    }

    pub fn opt_text(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.text(field, value);
        }
        self
    }

    pub fn number(&mut self, field: &str, value: f64) -> &mut Self {
        self.node.set_attr(wire_name(field), format_number(value));
        self
    }

    pub fn opt_number(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        if let Some(value) = value {
            self.number(field, value);
        }
        self
    }

    pub fn int(&mut self, field: &str, value: i32) -> &mut Self {
        self.node.set_attr(wire_name(field), value.to_string());
        self
    }

    pub fn opt_int(&mut self, field: &str, value: Option<i32>) -> &mut Self {
        if let Some(value) = value {
            self.int(field, value);
        }
        self
    }

    pub fn flag(&mut self, field: &str, value: bool) -> &mut Self {
        self.node.set_attr(wire_name(field), format_flag(field, value));
        self
    }
}
