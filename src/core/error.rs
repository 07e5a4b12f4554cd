use thiserror::Error;

/// Out-of-range configuration detected by `BreedingConfig::validate`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Territory size must be non-negative (got {0})")]
    NegativeTerritorySize(f32),

    #[error("Mate fidelity must be between 0 and 1 (got {0})")]
    MateFidelityOutOfRange(f32),

    #[error("Courtship duration must be positive (got {0})")]
    NonPositiveCourtshipDuration(i32),

    #[error("Display range must be at least 1 (got {0})")]
    DisplayRangeTooSmall(f32),

    #[error("Min health for breeding must be between 0 and 1 (got {0})")]
    MinHealthOutOfRange(f32),

    #[error("Breeding cooldown must be non-negative (got {0})")]
    NegativeCooldown(i64),

    #[error("Parental investment level must be between 0 and 1 (got {0})")]
    InvestmentOutOfRange(f32),
}

#[derive(Error, Debug)]
pub enum BreedingError {
    #[error("Invalid breeding config for {species}: {source}")]
    InvalidConfig {
        species: String,
        #[source]
        source: ConfigError,
    },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BreedingError>;
