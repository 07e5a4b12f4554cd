pub mod calendar;
pub mod config;
pub mod error;
pub mod species;
pub mod types;

pub use calendar::Calendar;
pub use config::{BreedingConfig, DisplayType, MatingSystem};
pub use error::{BreedingError, ConfigError, Result};
pub use species::{load_species_configs, SpeciesConfigs};
pub use types::{EntityId, Tick};
