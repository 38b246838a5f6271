use serde::{Deserialize, Serialize};

use super::categories::{
    Disadvantage, Equipment, MartialManeuver, Perk, Power, Skill, Talent, kg_to_lbs, lbs_to_kg,
};
use super::characteristic::{Characteristic, CharacteristicKind};
use super::list::EntryList;

const CM_PER_INCH: f64 = 2.54;

/// Root aggregate of one character record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub version: String,
    #[serde(default)]
    pub basic_configuration: BasicConfiguration,
    #[serde(default)]
    pub info: CharacterInfo,
    #[serde(default)]
    pub characteristics: Vec<Characteristic>,
    #[serde(default)]
    pub skills: EntryList<Skill>,
    #[serde(default)]
    pub perks: EntryList<Perk>,
    #[serde(default)]
    pub talents: EntryList<Talent>,
    #[serde(default)]
    pub martial_arts: EntryList<MartialManeuver>,
    #[serde(default)]
    pub powers: EntryList<Power>,
    #[serde(default)]
    pub disadvantages: EntryList<Disadvantage>,
    #[serde(default)]
    pub equipment: EntryList<Equipment>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub rules: Option<Rules>,
}

impl Character {
    pub fn characteristic(&self, kind: CharacteristicKind) -> Option<&Characteristic> {
        self.characteristics.iter().find(|c| c.kind == kind)
    }

    /// Current total of a characteristic, or its base value if not bought.
    pub fn characteristic_value(&self, kind: CharacteristicKind) -> i32 {
        self.characteristic(kind)
            .map_or(kind.base_value(), |c| c.total_value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicConfiguration {
    pub base_points: i32,
    pub disad_points: i32,
    pub experience: i32,
    #[serde(default)]
    pub export_template: Option<String>,
}

impl Default for BasicConfiguration {
    fn default() -> Self {
        Self {
            base_points: 400,
            disad_points: 75,
            experience: 0,
            export_template: None,
        }
    }
}

/// Free-form biographical fields.
///
/// Height and weight are stored in inches and pounds; the metric values are
/// derived for display and written back only when changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterInfo {
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub alternate_identities: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub eye_color: Option<String>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub gm: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub tactics: Option<String>,
    #[serde(default)]
    pub campaign_use: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub raw_height_in: Option<f64>,
    #[serde(default)]
    pub raw_weight_lbs: Option<f64>,
}

impl CharacterInfo {
    pub fn set_height_inches(&mut self, inches: f64) {
        self.raw_height_in = Some(inches);
        self.height_cm = Some(round_to(inches * CM_PER_INCH, 1));
    }

    pub fn set_weight_lbs(&mut self, lbs: f64) {
        self.raw_weight_lbs = Some(lbs);
        self.weight_kg = Some(lbs_to_kg(lbs));
    }

    /// Height to write back: the original inches while the metric value is
    /// unchanged, otherwise the converted metric value.
    pub fn height_inches(&self) -> Option<f64> {
        match (self.height_cm, self.raw_height_in) {
            (Some(cm), Some(raw)) if round_to(raw * CM_PER_INCH, 1) == cm => Some(raw),
            (Some(cm), _) => Some(round_to(cm / CM_PER_INCH, 2)),
            (None, raw) => raw,
        }
    }

    pub fn weight_lbs(&self) -> Option<f64> {
        match (self.weight_kg, self.raw_weight_lbs) {
            (Some(kg), Some(raw)) if lbs_to_kg(raw) == kg => Some(raw),
            (Some(kg), _) => Some(kg_to_lbs(kg)),
            (None, raw) => raw,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Character portrait.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    /// Encoded image data as stored in the document.
    #[serde(default)]
    pub data: Option<String>,
}

/// Campaign limits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub name: Option<String>,
    pub base_points: i32,
    pub disad_points: i32,
    #[serde(default)]
    pub active_point_cap: Option<i32>,
    #[serde(default)]
    pub real_point_cap: Option<i32>,
    /// Per-characteristic maxima (`STR_MAX`, ...).
    #[serde(default)]
    pub characteristic_maxima: Vec<(CharacteristicKind, i32)>,
}

impl Rules {
    pub fn maximum(&self, kind: CharacteristicKind) -> Option<i32> {
        self.characteristic_maxima
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, max)| *max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_metric_values_keep_original_units() {
        let mut info = CharacterInfo::default();
        info.set_height_inches(72.0);
        info.set_weight_lbs(200.0);
        assert_eq!(info.height_cm, Some(182.9));
        assert_eq!(info.weight_kg, Some(90.7));
        assert_eq!(info.height_inches(), Some(72.0));
        assert_eq!(info.weight_lbs(), Some(200.0));

        info.height_cm = Some(190.0);
        assert_eq!(info.height_inches(), Some(74.8));
    }

    #[test]
    fn unbought_characteristics_report_base_value() {
        let character = Character::default();
        assert_eq!(character.characteristic_value(CharacteristicKind::Spd), 2);
    }
}
