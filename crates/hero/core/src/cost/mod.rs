//! Modifier & adder cost engine.
//!
//! Every cost figure in the engine passes through the same stack:
//!
//! ```text
//! true base cost ──(1 + advantages)──▶ active cost ──÷(1 + limitations)──▶ real cost
//! ```
//!
//! Fractional intermediates are rounded at each boundary with [`round_cost`];
//! per-level formulas that must never undercharge use [`ceil_cost`].
mod adders;
mod modifiers;

pub use adders::{Adder, adder_cost, discount, parse_adders};
pub use modifiers::{Modifier, area_of_effect_value, parse_modifiers};

use serde::{Deserialize, Serialize};

/// Tolerance for floating error in cost arithmetic (e.g. `0.1 * 30`).
const EPSILON: f64 = 1e-9;

/// HERO cost rounding: nearest integer, exact halves round down.
///
/// Halves favour the character, so `22.5` becomes `22` and `22.51` becomes `23`.
pub fn round_cost(value: f64) -> i32 {
    (value - 0.5 - EPSILON).ceil() as i32
}

/// Ceiling that ignores floating noise just above an integer.
pub fn ceil_cost(value: f64) -> i32 {
    (value - EPSILON).ceil() as i32
}

/// Summed advantage and limitation values of a modifier set.
///
/// Both totals are non-negative. Modifiers classified as limitations add
/// their magnitude to `limitations` whatever the sign of their value; the
/// remaining positive values are advantages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierTotals {
    pub advantages: f64,
    pub limitations: f64,
}

impl ModifierTotals {
    pub fn new(advantages: f64, limitations: f64) -> Self {
        Self {
            advantages,
            limitations,
        }
    }

    pub fn from_modifiers(modifiers: &[Modifier]) -> Self {
        modifiers
            .iter()
            .fold(Self::default(), |mut totals, modifier| {
                if modifier.is_limitation {
                    totals.limitations += modifier.value.abs();
                } else if modifier.value > 0.0 {
                    totals.advantages += modifier.value;
                }
                totals
            })
    }

    /// Totals of both sets stacked together.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            advantages: self.advantages + other.advantages,
            limitations: self.limitations + other.limitations,
        }
    }

    pub fn active_cost(&self, true_base_cost: f64) -> i32 {
        round_cost(true_base_cost * (1.0 + self.advantages))
    }

    pub fn real_cost(&self, active_cost: i32) -> i32 {
        if self.limitations > 0.0 {
            round_cost(f64::from(active_cost) / (1.0 + self.limitations))
        } else {
            active_cost
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_favours_the_character_on_halves() {
        assert_eq!(round_cost(22.5), 22);
        assert_eq!(round_cost(22.51), 23);
        assert_eq!(round_cost(22.49), 22);
        assert_eq!(round_cost(45.0), 45);
        assert_eq!(round_cost(0.0), 0);
    }

    #[test]
    fn ceiling_tolerates_floating_noise() {
        assert_eq!(ceil_cost(0.1 * 30.0), 3);
        assert_eq!(ceil_cost(3.01), 4);
        assert_eq!(ceil_cost(0.0), 0);
        assert_eq!(ceil_cost(0.2), 1);
    }

    #[test]
    fn advantage_then_limitation_stack() {
        let modifiers = [
            Modifier::with_value("ARMORPIERCING", 0.5),
            Modifier::with_value("FOCUS", -0.25),
        ];
        let totals = ModifierTotals::from_modifiers(&modifiers);
        assert_eq!(totals, ModifierTotals::new(0.5, 0.25));

        let active = totals.active_cost(30.0);
        assert_eq!(active, 45);
        assert_eq!(totals.real_cost(active), 36);
    }

    #[test]
    fn flagged_limitations_count_as_limitations() {
        let mut flagged = Modifier::with_value("CHARGES", 0.25);
        flagged.is_advantage = false;
        flagged.is_limitation = true;
        let totals = ModifierTotals::from_modifiers(&[flagged]);
        assert_eq!(totals, ModifierTotals::new(0.0, 0.25));

        let active = totals.active_cost(30.0);
        assert_eq!(active, 30);
        assert_eq!(totals.real_cost(active), 24);
    }

    #[test]
    fn no_limitations_leaves_real_equal_to_active() {
        let totals = ModifierTotals::new(0.25, 0.0);
        assert_eq!(totals.real_cost(40), 40);
    }

    #[test]
    fn combine_adds_both_columns() {
        let own = ModifierTotals::new(0.25, 0.5);
        let list = ModifierTotals::new(0.5, 0.25);
        assert_eq!(own.combine(list), ModifierTotals::new(0.75, 0.75));
    }
}
