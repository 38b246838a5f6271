//! Typed character model.
//!
//! Every cost-bearing category embeds an [`Entry`] and is stored in a flat
//! [`EntryList`]; containment is expressed with `parent_id` links.
mod categories;
mod character;
mod characteristic;
mod entry;
mod list;

pub use categories::{
    Disadvantage, DisadvantageKind, EndRule, Equipment, ForceWallLevels, MartialManeuver, Perk,
    Power, Skill, Talent, kg_to_lbs, lbs_to_kg,
};
pub use character::{BasicConfiguration, Character, CharacterInfo, Image, Rules};
pub use characteristic::{Characteristic, CharacteristicKind};
pub use entry::{CostEntry, Entry, EntryFlags};
pub use list::EntryList;
