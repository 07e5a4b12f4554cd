//! Species breeding configs loaded from TOML files

use ahash::AHashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::core::config::{species_key, BreedingConfig};
use crate::core::error::{BreedingError, Result};

/// Species known to ship with a preset
pub const PRESET_SPECIES: [&str; 4] = ["wolf", "parrot", "deer", "cow"];

/// Registry of breeding configs by species key
#[derive(Debug, Clone)]
pub struct SpeciesConfigs {
    configs: AHashMap<String, BreedingConfig>,
}

impl SpeciesConfigs {
    /// Empty registry (every lookup falls back to defaults)
    pub fn new() -> Self {
        Self {
            configs: AHashMap::new(),
        }
    }

    /// Registry seeded with the built-in presets
    pub fn with_presets() -> Self {
        let mut registry = Self::new();
        for species in PRESET_SPECIES {
            registry.insert(species, BreedingConfig::for_species(species));
        }
        registry
    }

    pub fn insert(&mut self, species_id: &str, config: BreedingConfig) {
        self.configs.insert(species_key(species_id).to_string(), config);
    }

    /// Config for a species, matched on the last `.` segment of its id
    pub fn get(&self, species_id: &str) -> Option<&BreedingConfig> {
        self.configs.get(species_key(species_id))
    }

    /// Config for a species, or the defaults when unregistered
    pub fn get_or_default(&self, species_id: &str) -> BreedingConfig {
        self.get(species_id).cloned().unwrap_or_default()
    }

    pub fn contains(&self, species_id: &str) -> bool {
        self.configs.contains_key(species_key(species_id))
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Registered species keys, sorted
    pub fn species(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.configs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for SpeciesConfigs {
    fn default() -> Self {
        Self::with_presets()
    }
}

/// Parse and validate one species config
///
/// Fields the file leaves out keep the species preset's values, or the
/// defaults when the species has no preset.
pub fn parse_breeding_toml(content: &str, species: &str) -> Result<BreedingConfig> {
    let overrides: toml::Table = content.parse()?;
    let base = BreedingConfig::preset(species).unwrap_or_default();
    let mut merged = match toml::Value::try_from(&base)? {
        toml::Value::Table(table) => table,
        _ => toml::Table::new(),
    };
    merged.extend(overrides);

    let config: BreedingConfig = toml::Value::Table(merged).try_into()?;
    let config = config.normalized();
    config
        .validate()
        .map_err(|source| BreedingError::InvalidConfig {
            species: species.to_string(),
            source,
        })?;
    Ok(config)
}

/// Load every `<species>.toml` in a directory on top of the presets
///
/// Files override presets of the same name. A missing directory yields
/// the presets alone.
pub fn load_species_configs(dir: &Path) -> Result<SpeciesConfigs> {
    let mut registry = SpeciesConfigs::with_presets();

    if !dir.exists() {
        debug!(dir = %dir.display(), "species config dir missing, using presets");
        return Ok(registry);
    }

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        let Some(species) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = fs::read_to_string(&path)?;
        let config = parse_breeding_toml(&content, species)?;
        debug!(species, mating_system = ?config.mating_system(), "loaded breeding config");
        registry.insert(species, config);
    }

    info!(count = registry.len(), "species breeding configs ready");
    Ok(registry)
}
