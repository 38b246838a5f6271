use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::cost::{Adder, Modifier, ModifierTotals};

bitflags! {
    /// Structural role of an entry inside its category list.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EntryFlags: u8 {
        /// A `LIST`: shared modifiers and discount for its children.
        const GROUP          = 1 << 0;
        /// A `COMPOUNDPOWER`: cost is the pure sum of its children.
        const CONTAINER      = 1 << 1;
        const WEAPON_ELEMENT = 1 << 2;
        /// A skill enhancer; children cost one point less.
        const ENHANCER       = 1 << 3;
        /// Child of a compound power, deleted together with it.
        const OWNED          = 1 << 4;
    }
}

/// The shape shared by every cost-bearing entity.
///
/// Inputs mirror the tree attributes they were read from so the serializer
/// can write them back; computed figures are derived by the parsers and the
/// aggregator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Tree element name (`SKILL`, `POWER`, `LIST`, ...).
    pub element: String,
    pub id: String,
    pub xml_id: String,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub levels: i32,

    // Inputs.
    #[serde(default)]
    pub raw_base_cost: f64,
    #[serde(default)]
    pub lvl_cost: Option<f64>,
    #[serde(default)]
    pub lvl_val: Option<f64>,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default)]
    pub option_alias: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub adders: Vec<Adder>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub flags: EntryFlags,

    // Computed.
    pub base_cost: i32,
    /// Unrounded pre-modifier cost that list recomputation starts from.
    pub true_base_cost: f64,
    #[serde(default)]
    pub active_cost: Option<i32>,
    pub real_cost: i32,
    #[serde(default)]
    pub end_cost: Option<i32>,
}

impl Entry {
    pub fn new(
        element: impl Into<String>,
        id: impl Into<String>,
        xml_id: impl Into<String>,
    ) -> Self {
        Self {
            element: element.into(),
            id: id.into(),
            xml_id: xml_id.into(),
            ..Self::default()
        }
    }

    /// Sets the parent link (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Adds structural flags (builder pattern).
    #[must_use]
    pub fn with_flags(mut self, flags: EntryFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_group(&self) -> bool {
        self.flags.contains(EntryFlags::GROUP)
    }

    pub fn is_container(&self) -> bool {
        self.flags.contains(EntryFlags::CONTAINER)
    }

    /// Lists and compound powers both roll up their children.
    pub fn rolls_up(&self) -> bool {
        self.flags
            .intersects(EntryFlags::GROUP | EntryFlags::CONTAINER)
    }

    pub fn is_weapon_element(&self) -> bool {
        self.flags.contains(EntryFlags::WEAPON_ELEMENT)
    }

    pub fn is_enhancer(&self) -> bool {
        self.flags.contains(EntryFlags::ENHANCER)
    }

    pub fn is_owned(&self) -> bool {
        self.flags.contains(EntryFlags::OWNED)
    }

    pub fn totals(&self) -> ModifierTotals {
        ModifierTotals::from_modifiers(&self.modifiers)
    }

    pub fn has_modifier(&self, xml_id: &str) -> bool {
        self.modifier(xml_id).is_some()
    }

    pub fn modifier(&self, xml_id: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.xml_id == xml_id)
    }

    /// Alias, falling back to the name, then the XMLID.
    pub fn display_name(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .or_else(|| Some(self.name.as_str()).filter(|n| !n.is_empty()))
            .unwrap_or(self.xml_id.as_str())
    }
}

/// Generic access to the shared entry of a category type.
///
/// The aggregator, the entry lists and the serializer only see this trait.
pub trait CostEntry {
    fn entry(&self) -> &Entry;

    fn entry_mut(&mut self) -> &mut Entry;

    /// Replaces the id, keeping anything that links to it in step.
    fn assign_id(&mut self, id: String) {
        self.entry_mut().id = id;
    }

    /// Recomputes the cost figures from `true_base_cost` under `totals`.
    ///
    /// The default applies limitations only: `real = round(base / (1 + lim))`.
    fn recompute(&mut self, totals: ModifierTotals) {
        let entry = self.entry_mut();
        entry.real_cost = totals.real_cost(entry.base_cost);
    }

    /// Recomputes under enclosing lists.
    ///
    /// `totals` already stacks the lists onto the entry's own values;
    /// `inherited` holds the list modifiers for rules that need more than
    /// the totals.
    fn recompute_under(&mut self, totals: ModifierTotals, _inherited: &[Modifier]) {
        self.recompute(totals);
    }
}

impl CostEntry for Entry {
    fn entry(&self) -> &Entry {
        self
    }

    fn entry_mut(&mut self) -> &mut Entry {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_alias() {
        let mut entry = Entry::new("POWER", "1", "ENERGYBLAST");
        assert_eq!(entry.display_name(), "ENERGYBLAST");
        entry.name = "Blast".into();
        assert_eq!(entry.display_name(), "Blast");
        entry.alias = Some("Fire Bolt".into());
        assert_eq!(entry.display_name(), "Fire Bolt");
    }

    #[test]
    fn rollup_flags() {
        let list = Entry::new("LIST", "l", "GENERIC_OBJECT").with_flags(EntryFlags::GROUP);
        let compound =
            Entry::new("COMPOUNDPOWER", "c", "COMPOUNDPOWER").with_flags(EntryFlags::CONTAINER);
        let enhancer =
            Entry::new("SKILL", "e", "SCHOLAR").with_flags(EntryFlags::ENHANCER);
        assert!(list.rolls_up() && compound.rolls_up());
        assert!(!enhancer.rolls_up());
    }

    #[test]
    fn default_recompute_applies_limitations_only() {
        let mut entry = Entry::new("SKILL", "s", "STEALTH");
        entry.base_cost = 10;
        entry.recompute(ModifierTotals::new(1.0, 1.0));
        assert_eq!(entry.real_cost, 5);
    }
}
