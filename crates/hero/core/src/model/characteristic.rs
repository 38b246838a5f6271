use serde::{Deserialize, Serialize};

use crate::cost::ceil_cost;

/// HERO 6E characteristics with their base value and cost per level.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum CharacteristicKind {
    Str,
    Dex,
    Con,
    Int,
    Ego,
    Pre,
    Ocv,
    Dcv,
    Omcv,
    Dmcv,
    Spd,
    Pd,
    Ed,
    Rec,
    End,
    Body,
    Stun,
    Running,
    Swimming,
    Leaping,
}

impl CharacteristicKind {
    pub const fn base_value(self) -> i32 {
        match self {
            Self::Str | Self::Dex | Self::Con | Self::Int | Self::Ego | Self::Pre => 10,
            Self::Ocv | Self::Dcv | Self::Omcv | Self::Dmcv => 3,
            Self::Spd | Self::Pd | Self::Ed => 2,
            Self::Rec | Self::Swimming | Self::Leaping => 4,
            Self::End | Self::Stun => 20,
            Self::Body => 10,
            Self::Running => 12,
        }
    }

    pub const fn cost_per_level(self) -> f64 {
        match self {
            Self::Dex => 2.0,
            Self::Ocv | Self::Dcv => 5.0,
            Self::Omcv | Self::Dmcv => 3.0,
            Self::Spd => 10.0,
            Self::End => 0.2,
            Self::Stun | Self::Swimming | Self::Leaping => 0.5,
            _ => 1.0,
        }
    }

    /// Cost of `levels` purchased levels; penalties are never refunded.
    pub fn cost(self, levels: i32) -> i32 {
        if levels < 0 {
            0
        } else {
            ceil_cost(f64::from(levels) * self.cost_per_level())
        }
    }

    pub const fn is_movement(self) -> bool {
        matches!(self, Self::Running | Self::Swimming | Self::Leaping)
    }
}

/// One purchased characteristic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    pub kind: CharacteristicKind,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub position: i32,
    pub levels: i32,
    pub base_value: i32,
    pub total_value: i32,
    pub base_cost: i32,
    pub real_cost: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Characteristic {
    pub fn new(kind: CharacteristicKind, levels: i32) -> Self {
        let cost = kind.cost(levels);
        Self {
            kind,
            name: kind.to_string(),
            alias: None,
            position: 0,
            levels,
            base_value: kind.base_value(),
            total_value: kind.base_value() + levels,
            base_cost: cost,
            real_cost: cost,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn penalties_are_free_for_every_kind() {
        for kind in CharacteristicKind::iter() {
            let c = Characteristic::new(kind, -3);
            assert_eq!(c.base_cost, 0, "{kind}");
            assert_eq!(c.real_cost, 0, "{kind}");
            assert_eq!(c.total_value, kind.base_value() - 3);
        }
    }

    #[test]
    fn cost_is_ceiling_of_levels_times_rate() {
        assert_eq!(Characteristic::new(CharacteristicKind::Str, 5).real_cost, 5);
        assert_eq!(Characteristic::new(CharacteristicKind::Dex, 5).real_cost, 10);
        assert_eq!(Characteristic::new(CharacteristicKind::Spd, 2).real_cost, 20);
        assert_eq!(Characteristic::new(CharacteristicKind::End, 5).real_cost, 1);
        assert_eq!(Characteristic::new(CharacteristicKind::End, 6).real_cost, 2);
        assert_eq!(Characteristic::new(CharacteristicKind::Stun, 3).real_cost, 2);
    }

    #[test]
    fn dex_penalty_example() {
        let dex = Characteristic::new(CharacteristicKind::Dex, -3);
        assert_eq!(dex.total_value, 7);
        assert_eq!(dex.real_cost, 0);
    }

    #[test]
    fn kinds_parse_from_tree_names() {
        assert_eq!("omcv".parse(), Ok(CharacteristicKind::Omcv));
        assert_eq!("RUNNING".parse(), Ok(CharacteristicKind::Running));
        assert_eq!(CharacteristicKind::Body.to_string(), "BODY");
    }
}
