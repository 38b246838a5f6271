//! Typed categories built on top of [`Entry`].

use serde::{Deserialize, Serialize};

use super::entry::{CostEntry, Entry};
use crate::cost::{Modifier, ModifierTotals, ceil_cost, round_cost};
use crate::definitions::PowerType;

macro_rules! impl_cost_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CostEntry for $ty {
                fn entry(&self) -> &Entry {
                    &self.entry
                }

                fn entry_mut(&mut self) -> &mut Entry {
                    &mut self.entry
                }
            }
        )*
    };
}

impl_cost_entry!(Skill, Perk, Talent, MartialManeuver, Disadvantage);

const REDUCED_END: &str = "REDUCEDEND";
const COSTS_END: &str = "COSTSEND";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(flatten)]
    pub entry: Entry,
    /// Characteristic the roll is based on (`DEX`, `INT`, or `GENERAL`).
    #[serde(default)]
    pub characteristic: Option<String>,
    #[serde(default)]
    pub familiarity: bool,
    #[serde(default)]
    pub everyman: bool,
    #[serde(default)]
    pub native_tongue: bool,
    #[serde(default)]
    pub proficiency: bool,
    #[serde(default)]
    pub levels_only: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Perk {
    #[serde(flatten)]
    pub entry: Entry,
    /// Vehicle/base points for `VEHICLE_BASE` perks.
    #[serde(default)]
    pub base_points: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Talent {
    #[serde(flatten)]
    pub entry: Entry,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MartialManeuver {
    #[serde(flatten)]
    pub entry: Entry,
    pub ocv: i32,
    pub dcv: i32,
    /// OCV/DCV exactly as written (`+2`, `-1`, `--`).
    #[serde(default)]
    pub ocv_text: String,
    #[serde(default)]
    pub dcv_text: String,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dc: i32,
    #[serde(default)]
    pub use_weapon: bool,
}

/// How a power's END cost follows from its active cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndRule {
    /// One END per 10 active points.
    #[default]
    Standard,
    /// Reduced Endurance (1/2 END): one per 20 active points.
    Half,
    /// Reduced Endurance (0 END).
    Zero,
    /// A power that never costs END unless bought with Costs Endurance.
    NoEnd,
    Fixed(i32),
}

impl EndRule {
    pub fn end_cost(self, active_cost: i32) -> i32 {
        match self {
            Self::Standard => ceil_cost(f64::from(active_cost.max(0)) / 10.0),
            Self::Half => ceil_cost(f64::from(active_cost.max(0)) / 20.0),
            Self::Zero | Self::NoEnd => 0,
            Self::Fixed(end) => end,
        }
    }

    /// The rule once `modifiers` apply on top of it.
    ///
    /// `COSTSEND` turns a no-END power into a standard one; `REDUCEDEND`
    /// then lowers standard END to half or zero. Fixed END never changes.
    #[must_use]
    pub fn under<'a>(self, modifiers: impl IntoIterator<Item = &'a Modifier>) -> Self {
        let modifiers: Vec<&Modifier> = modifiers.into_iter().collect();
        let mut rule = self;
        if rule == Self::NoEnd && modifiers.iter().any(|m| m.xml_id == COSTS_END) {
            rule = Self::Standard;
        }
        match modifiers.iter().find(|m| m.xml_id == REDUCED_END) {
            Some(m) if m.is_option("ZERO") && matches!(rule, Self::Standard | Self::Half) => {
                Self::Zero
            }
            Some(m) if m.is_option("HALFEND") && rule == Self::Standard => Self::Half,
            _ => rule,
        }
    }
}

/// Raw `FORCEWALL` level attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceWallLevels {
    pub pd: i32,
    pub ed: i32,
    pub md: i32,
    pub powd: i32,
    pub length: i32,
    pub height: i32,
    pub width: i32,
    pub body: i32,
}

impl ForceWallLevels {
    /// `ceil(defense * 1.5) + length + height + width + body`.
    pub fn cost(&self) -> i32 {
        let defense = self.pd + self.ed + self.md + self.powd;
        ceil_cost(f64::from(defense) * 1.5) + self.length + self.height + self.width + self.body
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Power {
    #[serde(flatten)]
    pub entry: Entry,
    #[serde(default)]
    pub power_type: PowerType,
    #[serde(default)]
    pub end_rule: EndRule,
    /// `ENDCOST` read from the tree, written back verbatim.
    #[serde(default)]
    pub end_override: Option<i32>,
    #[serde(default)]
    pub affects_primary: bool,
    #[serde(default)]
    pub affects_total: bool,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub ultra_slot: bool,
    #[serde(default)]
    pub force_wall: Option<ForceWallLevels>,
}

impl Power {
    pub fn refresh_end_cost(&mut self) {
        let active = self.entry.active_cost.unwrap_or(0);
        self.entry.end_cost = Some(self.end_rule.end_cost(active));
    }
}

impl CostEntry for Power {
    fn entry(&self) -> &Entry {
        &self.entry
    }

    fn entry_mut(&mut self) -> &mut Entry {
        &mut self.entry
    }

    fn recompute(&mut self, totals: ModifierTotals) {
        let active = totals.active_cost(self.entry.true_base_cost);
        self.entry.active_cost = Some(active);
        self.entry.real_cost = totals.real_cost(active);
        self.refresh_end_cost();
    }

    fn recompute_under(&mut self, totals: ModifierTotals, inherited: &[Modifier]) {
        self.recompute(totals);
        let active = self.entry.active_cost.unwrap_or(0);
        self.entry.end_cost = Some(self.end_rule.under(inherited).end_cost(active));
    }
}

/// 6E complication types, keyed by XMLID.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum DisadvantageKind {
    AccidentalChange,
    Dependence,
    DependentNpc,
    DistinctiveFeatures,
    Enraged,
    Hunted,
    PhysicalLimitation,
    PsychologicalLimitation,
    Reputation,
    Rivalry,
    SocialLimitation,
    Susceptibility,
    Unluck,
    Vulnerability,
    #[default]
    GenericDisadvantage,
}

impl DisadvantageKind {
    pub fn from_xml_id(xml_id: &str) -> Self {
        xml_id.parse().unwrap_or_default()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AccidentalChange => "Accidental Change",
            Self::Dependence => "Dependence",
            Self::DependentNpc => "Dependent NPC",
            Self::DistinctiveFeatures => "Distinctive Features",
            Self::Enraged => "Enraged/Berserk",
            Self::Hunted => "Hunted",
            Self::PhysicalLimitation => "Physical Complication",
            Self::PsychologicalLimitation => "Psychological Complication",
            Self::Reputation => "Negative Reputation",
            Self::Rivalry => "Rivalry",
            Self::SocialLimitation => "Social Complication",
            Self::Susceptibility => "Susceptibility",
            Self::Unluck => "Unluck",
            Self::Vulnerability => "Vulnerability",
            Self::GenericDisadvantage => "Complication",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Disadvantage {
    #[serde(flatten)]
    pub entry: Entry,
    #[serde(default)]
    pub kind: DisadvantageKind,
    /// Assembled label: kind, input and selected option aliases.
    pub display_name: String,
}

impl Disadvantage {
    /// Points the complication is worth, after any list adjustments.
    pub fn points(&self) -> i32 {
        self.entry.real_cost
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(flatten)]
    pub power: Power,
    #[serde(default)]
    pub weight_lbs: f64,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub carried: bool,
    /// Characteristic and DCV sub-powers owned by the item.
    #[serde(default)]
    pub sub_powers: Vec<Power>,
}

impl Equipment {
    /// Sets the weight from kilograms, keeping pounds in step.
    ///
    /// Pounds are left alone while they still convert to `kg`, so a display
    /// value of 4.5 kg keeps an original 10 lbs intact.
    pub fn set_weight_kg(&mut self, kg: f64) {
        self.weight_kg = kg;
        if lbs_to_kg(self.weight_lbs) != kg {
            self.weight_lbs = kg_to_lbs(kg);
        }
    }

    /// Sets the weight from pounds, keeping kilograms in step.
    pub fn set_weight_lbs(&mut self, lbs: f64) {
        self.weight_lbs = lbs;
        self.weight_kg = lbs_to_kg(lbs);
    }
}

impl CostEntry for Equipment {
    fn entry(&self) -> &Entry {
        &self.power.entry
    }

    fn entry_mut(&mut self) -> &mut Entry {
        &mut self.power.entry
    }

    fn assign_id(&mut self, id: String) {
        for sub in &mut self.sub_powers {
            sub.entry.parent_id = Some(id.clone());
        }
        self.power.entry.id = id;
    }

    fn recompute(&mut self, totals: ModifierTotals) {
        self.power.recompute(totals);
        let entry = &mut self.power.entry;
        entry.base_cost = round_cost(entry.true_base_cost);
        for sub in &self.sub_powers {
            entry.base_cost += sub.entry.base_cost;
            entry.active_cost = Some(entry.active_cost.unwrap_or(0) + sub.entry.active_cost.unwrap_or(0));
            entry.real_cost += sub.entry.real_cost;
        }
        self.power.end_rule = EndRule::Standard;
        self.power.refresh_end_cost();
    }
}

const KG_PER_LB: f64 = 0.453592;

/// `round(lbs * 0.453592 * 10) / 10`.
pub fn lbs_to_kg(lbs: f64) -> f64 {
    (lbs * KG_PER_LB * 10.0).round() / 10.0
}

/// Inverse of [`lbs_to_kg`], rounded to two decimals.
pub fn kg_to_lbs(kg: f64) -> f64 {
    (kg / KG_PER_LB * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_rules() {
        assert_eq!(EndRule::Standard.end_cost(45), 5);
        assert_eq!(EndRule::Standard.end_cost(40), 4);
        assert_eq!(EndRule::Half.end_cost(45), 3);
        assert_eq!(EndRule::Zero.end_cost(45), 0);
        assert_eq!(EndRule::NoEnd.end_cost(45), 0);
        assert_eq!(EndRule::Fixed(2).end_cost(45), 2);
        assert_eq!(EndRule::Standard.end_cost(0), 0);
    }

    #[test]
    fn force_wall_cost() {
        let levels = ForceWallLevels {
            pd: 5,
            ed: 5,
            length: 2,
            body: 1,
            ..ForceWallLevels::default()
        };
        assert_eq!(levels.cost(), 18);
    }

    #[test]
    fn weight_round_trip() {
        assert_eq!(lbs_to_kg(10.0), 4.5);
        assert!((kg_to_lbs(4.5) - 10.0).abs() < 0.1);

        let mut item = Equipment::default();
        item.set_weight_lbs(10.0);
        assert_eq!(item.weight_kg, 4.5);
        item.set_weight_kg(4.5);
        assert_eq!(item.weight_lbs, 10.0);
        item.set_weight_kg(9.0);
        assert!((item.weight_lbs - 19.84).abs() < 0.01);
    }

    #[test]
    fn disadvantage_kinds_fall_back_to_generic() {
        assert_eq!(
            DisadvantageKind::from_xml_id("PSYCHOLOGICALLIMITATION"),
            DisadvantageKind::PsychologicalLimitation
        );
        assert_eq!(
            DisadvantageKind::from_xml_id("MADEUP"),
            DisadvantageKind::GenericDisadvantage
        );
        assert_eq!(DisadvantageKind::DependentNpc.to_string(), "DEPENDENTNPC");
    }

    #[test]
    fn end_modifiers_adjust_the_rule() {
        let half = Modifier {
            option_id: Some("HALFEND".into()),
            ..Modifier::with_value("REDUCEDEND", 0.25)
        };
        let zero = Modifier {
            option_id: Some("ZERO".into()),
            ..Modifier::with_value("REDUCEDEND", 0.5)
        };
        let costs_end = Modifier::with_value("COSTSEND", -0.5);

        assert_eq!(EndRule::Standard.under([&half]), EndRule::Half);
        assert_eq!(EndRule::Half.under([&zero]), EndRule::Zero);
        assert_eq!(EndRule::NoEnd.under([&half]), EndRule::NoEnd);
        assert_eq!(EndRule::NoEnd.under([&half, &costs_end]), EndRule::Half);
        assert_eq!(EndRule::Fixed(1).under([&zero]), EndRule::Fixed(1));
        assert_eq!(EndRule::Standard.under(&[] as &[Modifier]), EndRule::Standard);
    }

    #[test]
    fn equipment_recompute_is_repeatable() {
        let mut item = Equipment::default();
        item.power.entry.true_base_cost = 10.0;
        let mut dcv = Power::default();
        dcv.entry.base_cost = 10;
        dcv.entry.active_cost = Some(10);
        dcv.entry.real_cost = 10;
        item.sub_powers.push(dcv);

        item.recompute(ModifierTotals::default());
        let once = item.clone();
        item.recompute(ModifierTotals::default());
        assert_eq!(item, once);
        assert_eq!(item.power.entry.base_cost, 20);
        assert_eq!(item.power.entry.real_cost, 20);
    }

    #[test]
    fn disadvantage_points_follow_real_cost() {
        let mut d = Disadvantage::default();
        d.entry.base_cost = 20;
        d.entry.real_cost = 20;
        d.recompute(ModifierTotals::new(0.0, 1.0));
        assert_eq!(d.points(), 10);
    }

    #[test]
    fn power_recompute_refreshes_end() {
        let mut power = Power::default();
        power.entry.true_base_cost = 30.0;
        power.recompute(ModifierTotals::new(0.5, 0.25));
        assert_eq!(power.entry.active_cost, Some(45));
        assert_eq!(power.entry.real_cost, 36);
        assert_eq!(power.entry.end_cost, Some(5));
    }
}
