//! Power and modifier definition loader.
//!
//! Built-in 6E tables are compiled into the binary; a definitions directory
//! can add to or override them:
//!
//! ```text
//! definitions/
//! ├── powers.ron      (powers: [ (xml_id: "ENERGYBLAST", lvl_cost: 5.0, ...), ... ])
//! └── modifiers.ron   (modifiers: [ (xml_id: "ARMORPIERCING", has_levels: true, ...), ... ])
//! ```

use std::path::Path;

use hero_core::{DefinitionTable, HeroError, ModifierDefinition, PowerDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const BUILTIN_POWERS: &str = include_str!("../../data/definitions/powers.ron");
const BUILTIN_MODIFIERS: &str = include_str!("../../data/definitions/modifiers.ron");

const POWERS_FILE: &str = "powers.ron";
const MODIFIERS_FILE: &str = "modifiers.ron";

/// Power catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerCatalog {
    #[serde(default)]
    pub powers: Vec<PowerDefinition>,
}

/// Modifier catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierCatalog {
    #[serde(default)]
    pub modifiers: Vec<ModifierDefinition>,
}

/// Loader for definition tables from RON files.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// The embedded HERO 6E tables.
    pub fn builtin() -> LoadResult<DefinitionTable> {
        let mut table = DefinitionTable::new();
        for power in parse_powers("builtin powers.ron", BUILTIN_POWERS)?.powers {
            table.insert_power(power);
        }
        for modifier in parse_modifiers("builtin modifiers.ron", BUILTIN_MODIFIERS)?.modifiers {
            table.insert_modifier(modifier);
        }
        Ok(table)
    }

    /// Built-in tables with the files of `dir` merged on top.
    ///
    /// Either file may be missing. Entries from `dir` replace built-ins with
    /// the same XMLID.
    pub fn load_dir(dir: &Path) -> LoadResult<DefinitionTable> {
        let mut table = Self::builtin()?;

        let mut overrides = DefinitionTable::new();
        let powers_path = dir.join(POWERS_FILE);
        if powers_path.is_file() {
            for power in Self::load_powers(&powers_path)? {
                overrides.insert_power(power);
            }
        }
        let modifiers_path = dir.join(MODIFIERS_FILE);
        if modifiers_path.is_file() {
            for modifier in Self::load_modifiers(&modifiers_path)? {
                overrides.insert_modifier(modifier);
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            powers = overrides.power_count(),
            modifiers = overrides.modifier_count(),
            "merging user definitions"
        );
        table.merge(overrides);
        Ok(table)
    }

    /// Load a power catalog from a RON file.
    pub fn load_powers(path: &Path) -> LoadResult<Vec<PowerDefinition>> {
        let content = read_file(path)?;
        Ok(parse_powers(&path.display().to_string(), &content)?.powers)
    }

    /// Load a modifier catalog from a RON file.
    pub fn load_modifiers(path: &Path) -> LoadResult<Vec<ModifierDefinition>> {
        let content = read_file(path)?;
        Ok(parse_modifiers(&path.display().to_string(), &content)?.modifiers)
    }
}

fn parse_powers(source: &str, content: &str) -> Result<PowerCatalog, HeroError> {
    ron::from_str(content).map_err(|e| definition_error(source, e))
}

fn parse_modifiers(source: &str, content: &str) -> Result<ModifierCatalog, HeroError> {
    ron::from_str(content).map_err(|e| definition_error(source, e))
}

fn definition_error(source: &str, error: impl std::fmt::Display) -> HeroError {
    HeroError::DefinitionData {
        source_name: source.to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_core::{DefinitionOracle, PowerType};

    #[test]
    fn builtin_tables_parse() {
        let table = DefinitionLoader::builtin().expect("embedded RON is valid");
        let blast = table.power("ENERGYBLAST").expect("blast defined");
        assert_eq!(blast.lvl_cost, 5.0);
        assert_eq!(blast.power_type, PowerType::Attack);
        assert!(!table.power("FLASHDEFENSE").expect("defined").uses_end);
        let ap = table.modifier("ARMORPIERCING").expect("AP defined");
        assert!(ap.has_levels);
    }

    #[test]
    fn user_files_override_builtins() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(POWERS_FILE),
            r#"(powers: [
                (xml_id: "ENERGYBLAST", name: "House Blast", power_type: Attack, lvl_cost: 4.0),
                (xml_id: "PSIONICSHIELD", lvl_cost: 2.0, uses_end: false),
            ])"#,
        )
        .expect("write powers");

        let table = DefinitionLoader::load_dir(dir.path()).expect("merged");
        assert_eq!(table.power("ENERGYBLAST").map(|p| p.lvl_cost), Some(4.0));
        assert!(table.power("PSIONICSHIELD").is_some());
        assert!(table.modifier("ARMORPIERCING").is_some());
    }

    #[test]
    fn bad_ron_reports_definition_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(MODIFIERS_FILE), "(modifiers: [ (name: 3) ])")
            .expect("write modifiers");

        let err = DefinitionLoader::load_dir(dir.path()).unwrap_err();
        let hero = err.downcast_ref::<HeroError>().expect("typed error");
        assert!(matches!(hero, HeroError::DefinitionData { .. }));
    }
}
