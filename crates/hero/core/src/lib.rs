//! HERO System 6th Edition character rules engine.
//!
//! `hero-core` reads a loosely-typed attributed tree (an `.hdc` character
//! record), reconstructs the typed [`Character`] model, computes every cost
//! figure (base, active, real and END cost) and serializes the model back to
//! the same tree vocabulary.
//!
//! ```text
//! Element tree ──parse──▶ flat entry lists ──aggregate──▶ Character
//!      ▲                                                     │
//!      └──────────────────────── serialize ◀─────────────────┘
//! ```
//!
//! All APIs are pure: definitions are supplied through the read-only
//! [`DefinitionOracle`] and no function performs I/O. File formats live in
//! `hero-content`.
pub mod aggregate;
pub mod config;
pub mod cost;
pub mod definitions;
pub mod error;
pub mod model;
pub mod parse;
pub mod serialize;
pub mod summary;
pub mod tree;

pub use aggregate::{aggregate, aggregate_character};
pub use config::ParseOptions;
pub use cost::{
    Adder, Modifier, ModifierTotals, adder_cost, area_of_effect_value, ceil_cost, round_cost,
};
pub use definitions::{
    DefinitionOracle, DefinitionTable, ModifierDefinition, PowerDefinition, PowerOption,
    PowerType,
};
pub use error::{ErrorSeverity, HeroError, LinkError};
pub use model::{
    BasicConfiguration, Character, CharacterInfo, Characteristic, CharacteristicKind, CostEntry,
    Disadvantage, DisadvantageKind, EndRule, Entry, EntryFlags, EntryList, Equipment, Image,
    MartialManeuver, Perk, Power, Rules, Skill, Talent,
};
pub use parse::parse_character;
pub use serialize::serialize_character;
pub use summary::{CostSummary, RuleViolation, SkillRoll, check_rules, skill_roll};
pub use tree::{AttributeNode, Element};
