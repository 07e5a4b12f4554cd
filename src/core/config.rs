//! Breeding configuration with documented defaults
//!
//! One `BreedingConfig` describes how a species courts, chooses mates,
//! defends territory and raises young. Setters store raw values (only the
//! calendar-style fields are clamped); `validate()` is the single place
//! that rejects out-of-range tuning.

use serde::{Deserialize, Serialize};

use crate::core::calendar::MONTHS_PER_YEAR;
use crate::core::error::ConfigError;

/// How a species forms breeding pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatingSystem {
    /// One partner, often across seasons
    #[default]
    Monogamy,
    /// One male, several females
    Polygyny,
    /// Males gather and display, females choose
    Lekking,
    /// One female, several males
    Polyandry,
    /// No lasting pairing
    Promiscuity,
}

impl MatingSystem {
    pub fn all() -> &'static [MatingSystem] {
        &[
            MatingSystem::Monogamy,
            MatingSystem::Polygyny,
            MatingSystem::Lekking,
            MatingSystem::Polyandry,
            MatingSystem::Promiscuity,
        ]
    }

    /// Whether the previous partner is consulted before scoring strangers
    pub fn favors_pair_bonds(&self) -> bool {
        matches!(self, MatingSystem::Monogamy)
    }

    /// Multiplier on the display-trait term of mate scoring
    pub fn display_emphasis(&self) -> f32 {
        match self {
            MatingSystem::Lekking => 1.5,
            MatingSystem::Polygyny => 1.25,
            MatingSystem::Monogamy | MatingSystem::Polyandry | MatingSystem::Promiscuity => 1.0,
        }
    }
}

/// Kind of courtship display a performer puts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    #[default]
    Dancing,
    Posturing,
    Vocalization,
    Coloration,
    GiftGiving,
    ScentMarking,
}

impl DisplayType {
    pub fn all() -> &'static [DisplayType] {
        &[
            DisplayType::Dancing,
            DisplayType::Posturing,
            DisplayType::Vocalization,
            DisplayType::Coloration,
            DisplayType::GiftGiving,
            DisplayType::ScentMarking,
        ]
    }
}

/// Per-species breeding parameters
///
/// Typical ranges seen across presets:
/// - territory size 16-64 blocks
/// - courtship 20-60 ticks
/// - display range 8-32 blocks
/// - fidelity 0.0-1.0 (weight on re-mating the same partner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingConfig {
    // === PARTNER SELECTION ===
    mating_system: MatingSystem,
    /// Territory radius around the owner's recorded center
    territory_size: f32,
    /// Starting bond strength after breeding with a partner
    mate_fidelity: f32,

    // === COURTSHIP ===
    /// Ticks a display lasts before it is complete
    courtship_duration: i32,
    /// Max ground distance at which a display is started
    display_range: f32,
    display_type: DisplayType,
    display_trait_weight: f32,
    age_preference: f32,

    // === SEASON ===
    /// First month of the season (0-11)
    breeding_season_start: u32,
    /// Month the season closes (0-11, exclusive)
    breeding_season_end: u32,
    year_round_breeding: bool,
    photoperiod_trigger: bool,
    /// Minimum day time (ticks into the day) when the photoperiod gate is on
    min_day_length: u64,

    // === REQUIREMENTS ===
    min_health_for_breeding: f32,
    min_age_for_breeding: u32,
    breeding_cooldown: i64,

    // === PARENTAL CARE ===
    biparental_care: bool,
    parental_investment_level: f32,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            mating_system: MatingSystem::Monogamy,
            territory_size: 32.0,
            mate_fidelity: 0.8,

            courtship_duration: 20,
            display_range: 16.0,
            display_type: DisplayType::Dancing,
            display_trait_weight: 0.5,
            age_preference: 0.3,

            breeding_season_start: 3,
            breeding_season_end: 6,
            year_round_breeding: false,
            photoperiod_trigger: false,
            min_day_length: 1000,

            min_health_for_breeding: 0.7,
            min_age_for_breeding: 0,
            breeding_cooldown: 6000,

            biparental_care: false,
            parental_investment_level: 0.5,
        }
    }
}

fn clamp_month(month: i32) -> u32 {
    month.clamp(0, MONTHS_PER_YEAR as i32 - 1) as u32
}

impl BreedingConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Monogamous pack animal: high fidelity, large territory, both parents care
    pub fn wolf() -> Self {
        Self {
            mating_system: MatingSystem::Monogamy,
            mate_fidelity: 0.95,
            territory_size: 64.0,
            biparental_care: true,
            parental_investment_level: 0.9,
            breeding_cooldown: 12000,
            min_health_for_breeding: 0.8,
            ..Self::default()
        }
    }

    /// Lekking bird: long, heavily weighted dances, breeds year-round
    pub fn parrot() -> Self {
        Self {
            mating_system: MatingSystem::Lekking,
            courtship_duration: 60,
            display_range: 32.0,
            display_type: DisplayType::Dancing,
            display_trait_weight: 0.8,
            mate_fidelity: 0.3,
            year_round_breeding: true,
            ..Self::default()
        }
    }

    /// Antlered herd animal: polygynous autumn rut, mothers raise young alone
    pub fn deer() -> Self {
        Self {
            mating_system: MatingSystem::Polygyny,
            territory_size: 48.0,
            display_type: DisplayType::Posturing,
            breeding_season_start: 9,
            breeding_season_end: 11,
            mate_fidelity: 0.2,
            biparental_care: false,
            ..Self::default()
        }
    }

    /// Year-round herd animal with low fidelity
    pub fn cow() -> Self {
        Self {
            mating_system: MatingSystem::Polygyny,
            mate_fidelity: 0.2,
            min_health_for_breeding: 0.7,
            year_round_breeding: true,
            biparental_care: false,
            parental_investment_level: 0.6,
            ..Self::default()
        }
    }

    /// Preset for a species id, or the defaults for unknown species
    ///
    /// Namespaced ids resolve by their last segment, so
    /// `"entity.minecraft.wolf"` and `"wolf"` are the same species.
    pub fn for_species(species_id: &str) -> Self {
        Self::preset(species_id).unwrap_or_default()
    }

    /// Preset for a species id, if one exists
    pub fn preset(species_id: &str) -> Option<Self> {
        match species_key(species_id) {
            "wolf" => Some(Self::wolf()),
            "parrot" => Some(Self::parrot()),
            "deer" => Some(Self::deer()),
            "cow" => Some(Self::cow()),
            _ => None,
        }
    }

    /// Re-apply setter clamping after deserialization
    pub fn normalized(mut self) -> Self {
        self.breeding_season_start = self.breeding_season_start.min(MONTHS_PER_YEAR - 1);
        self.breeding_season_end = self.breeding_season_end.min(MONTHS_PER_YEAR - 1);
        self
    }

    /// Validate that all parameters are within acceptable ranges
    ///
    /// Reports the first failing field. Display-trait weight and age
    /// preference are free weights and are not range-checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.territory_size.is_nan() || self.territory_size < 0.0 {
            return Err(ConfigError::NegativeTerritorySize(self.territory_size));
        }
        if !(0.0..=1.0).contains(&self.mate_fidelity) {
            return Err(ConfigError::MateFidelityOutOfRange(self.mate_fidelity));
        }
        if self.courtship_duration < 1 {
            return Err(ConfigError::NonPositiveCourtshipDuration(self.courtship_duration));
        }
        if self.display_range.is_nan() || self.display_range < 1.0 {
            return Err(ConfigError::DisplayRangeTooSmall(self.display_range));
        }
        if !(0.0..=1.0).contains(&self.min_health_for_breeding) {
            return Err(ConfigError::MinHealthOutOfRange(self.min_health_for_breeding));
        }
        if self.breeding_cooldown < 0 {
            return Err(ConfigError::NegativeCooldown(self.breeding_cooldown));
        }
        if !(0.0..=1.0).contains(&self.parental_investment_level) {
            return Err(ConfigError::InvestmentOutOfRange(self.parental_investment_level));
        }
        Ok(())
    }

    // ===== Getters =====

    pub fn mating_system(&self) -> MatingSystem {
        self.mating_system
    }

    pub fn territory_size(&self) -> f32 {
        self.territory_size
    }

    pub fn mate_fidelity(&self) -> f32 {
        self.mate_fidelity
    }

    pub fn courtship_duration(&self) -> i32 {
        self.courtship_duration
    }

    pub fn display_range(&self) -> f32 {
        self.display_range
    }

    pub fn display_type(&self) -> DisplayType {
        self.display_type
    }

    pub fn display_trait_weight(&self) -> f32 {
        self.display_trait_weight
    }

    pub fn age_preference(&self) -> f32 {
        self.age_preference
    }

    pub fn breeding_season_start(&self) -> u32 {
        self.breeding_season_start
    }

    pub fn breeding_season_end(&self) -> u32 {
        self.breeding_season_end
    }

    pub fn is_year_round_breeding(&self) -> bool {
        self.year_round_breeding
    }

    pub fn is_photoperiod_trigger(&self) -> bool {
        self.photoperiod_trigger
    }

    pub fn min_day_length(&self) -> u64 {
        self.min_day_length
    }

    pub fn min_health_for_breeding(&self) -> f32 {
        self.min_health_for_breeding
    }

    pub fn min_age_for_breeding(&self) -> u32 {
        self.min_age_for_breeding
    }

    pub fn breeding_cooldown(&self) -> i64 {
        self.breeding_cooldown
    }

    pub fn is_biparental_care(&self) -> bool {
        self.biparental_care
    }

    pub fn parental_investment_level(&self) -> f32 {
        self.parental_investment_level
    }

    // ===== Setters =====

    pub fn set_mating_system(&mut self, mating_system: MatingSystem) -> &mut Self {
        self.mating_system = mating_system;
        self
    }

    pub fn set_territory_size(&mut self, territory_size: f32) -> &mut Self {
        self.territory_size = territory_size;
        self
    }

    pub fn set_mate_fidelity(&mut self, mate_fidelity: f32) -> &mut Self {
        self.mate_fidelity = mate_fidelity;
        self
    }

    pub fn set_courtship_duration(&mut self, courtship_duration: i32) -> &mut Self {
        self.courtship_duration = courtship_duration;
        self
    }

    pub fn set_display_range(&mut self, display_range: f32) -> &mut Self {
        self.display_range = display_range;
        self
    }

    pub fn set_display_type(&mut self, display_type: DisplayType) -> &mut Self {
        self.display_type = display_type;
        self
    }

    pub fn set_display_trait_weight(&mut self, weight: f32) -> &mut Self {
        self.display_trait_weight = weight;
        self
    }

    pub fn set_age_preference(&mut self, age_preference: f32) -> &mut Self {
        self.age_preference = age_preference;
        self
    }

    /// Clamped to 0-11
    pub fn set_breeding_season_start(&mut self, month: i32) -> &mut Self {
        self.breeding_season_start = clamp_month(month);
        self
    }

    /// Clamped to 0-11
    pub fn set_breeding_season_end(&mut self, month: i32) -> &mut Self {
        self.breeding_season_end = clamp_month(month);
        self
    }

    pub fn set_year_round_breeding(&mut self, year_round: bool) -> &mut Self {
        self.year_round_breeding = year_round;
        self
    }

    pub fn set_photoperiod_trigger(&mut self, photoperiod_trigger: bool) -> &mut Self {
        self.photoperiod_trigger = photoperiod_trigger;
        self
    }

    /// Negative values clamp to 0
    pub fn set_min_day_length(&mut self, min_day_length: i64) -> &mut Self {
        self.min_day_length = min_day_length.max(0) as u64;
        self
    }

    pub fn set_min_health_for_breeding(&mut self, min_health: f32) -> &mut Self {
        self.min_health_for_breeding = min_health;
        self
    }

    /// Negative values clamp to 0
    pub fn set_min_age_for_breeding(&mut self, min_age: i64) -> &mut Self {
        self.min_age_for_breeding = min_age.clamp(0, u32::MAX as i64) as u32;
        self
    }

    pub fn set_breeding_cooldown(&mut self, cooldown: i64) -> &mut Self {
        self.breeding_cooldown = cooldown;
        self
    }

    pub fn set_biparental_care(&mut self, biparental_care: bool) -> &mut Self {
        self.biparental_care = biparental_care;
        self
    }

    pub fn set_parental_investment_level(&mut self, level: f32) -> &mut Self {
        self.parental_investment_level = level;
        self
    }
}

/// Last `.`-separated segment of a species id
pub fn species_key(species_id: &str) -> &str {
    species_id.rsplit('.').next().unwrap_or(species_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = BreedingConfig::default();
        assert_eq!(config.mating_system(), MatingSystem::Monogamy);
        assert_eq!(config.territory_size(), 32.0);
        assert_eq!(config.mate_fidelity(), 0.8);
        assert_eq!(config.courtship_duration(), 20);
        assert_eq!(config.display_range(), 16.0);
        assert_eq!(config.display_type(), DisplayType::Dancing);
        assert_eq!(config.breeding_season_start(), 3);
        assert_eq!(config.breeding_season_end(), 6);
        assert!(!config.is_year_round_breeding());
        assert!(!config.is_photoperiod_trigger());
        assert_eq!(config.min_day_length(), 1000);
        assert_eq!(config.min_health_for_breeding(), 0.7);
        assert_eq!(config.min_age_for_breeding(), 0);
        assert_eq!(config.breeding_cooldown(), 6000);
        assert!(!config.is_biparental_care());
        assert_eq!(config.parental_investment_level(), 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enum_variant_counts() {
        assert_eq!(MatingSystem::all().len(), 5);
        assert_eq!(DisplayType::all().len(), 6);
    }

    #[test]
    fn test_only_monogamy_favors_pair_bonds() {
        for system in MatingSystem::all() {
            assert_eq!(system.favors_pair_bonds(), *system == MatingSystem::Monogamy);
        }
        assert!(MatingSystem::Lekking.display_emphasis() > MatingSystem::Monogamy.display_emphasis());
    }

    #[test]
    fn test_setters_store_raw_values() {
        let mut config = BreedingConfig::new();
        config
            .set_territory_size(-10.0)
            .set_mate_fidelity(1.5)
            .set_courtship_duration(-50)
            .set_display_range(0.5)
            .set_display_trait_weight(-0.3)
            .set_age_preference(1.5)
            .set_min_health_for_breeding(-0.3)
            .set_breeding_cooldown(-1000)
            .set_parental_investment_level(1.5);

        assert_eq!(config.territory_size(), -10.0);
        assert_eq!(config.mate_fidelity(), 1.5);
        assert_eq!(config.courtship_duration(), -50);
        assert_eq!(config.display_range(), 0.5);
        assert_eq!(config.display_trait_weight(), -0.3);
        assert_eq!(config.age_preference(), 1.5);
        assert_eq!(config.min_health_for_breeding(), -0.3);
        assert_eq!(config.breeding_cooldown(), -1000);
        assert_eq!(config.parental_investment_level(), 1.5);
    }

    #[test]
    fn test_calendar_fields_clamp_on_write() {
        let mut config = BreedingConfig::new();
        config.set_breeding_season_start(-5).set_breeding_season_end(20);
        assert_eq!(config.breeding_season_start(), 0);
        assert_eq!(config.breeding_season_end(), 11);

        config.set_min_day_length(-100).set_min_age_for_breeding(-1);
        assert_eq!(config.min_day_length(), 0);
        assert_eq!(config.min_age_for_breeding(), 0);
    }

    fn invalid(tweak: impl FnOnce(&mut BreedingConfig)) -> ConfigError {
        let mut config = BreedingConfig::new();
        tweak(&mut config);
        config.validate().unwrap_err()
    }

    #[test]
    fn test_validate_reports_each_field() {
        assert!(matches!(
            invalid(|c| { c.set_territory_size(-1.0); }),
            ConfigError::NegativeTerritorySize(_)
        ));
        assert!(matches!(
            invalid(|c| { c.set_mate_fidelity(1.1); }),
            ConfigError::MateFidelityOutOfRange(_)
        ));
        assert!(matches!(
            invalid(|c| { c.set_mate_fidelity(-0.1); }),
            ConfigError::MateFidelityOutOfRange(_)
        ));
        assert_eq!(
            invalid(|c| { c.set_courtship_duration(0); }),
            ConfigError::NonPositiveCourtshipDuration(0)
        );
        assert!(matches!(
            invalid(|c| { c.set_display_range(0.5); }),
            ConfigError::DisplayRangeTooSmall(_)
        ));
        assert!(matches!(
            invalid(|c| { c.set_min_health_for_breeding(1.2); }),
            ConfigError::MinHealthOutOfRange(_)
        ));
        assert!(matches!(
            invalid(|c| { c.set_min_health_for_breeding(-0.2); }),
            ConfigError::MinHealthOutOfRange(_)
        ));
        assert_eq!(
            invalid(|c| { c.set_breeding_cooldown(-100); }),
            ConfigError::NegativeCooldown(-100)
        );
        assert!(matches!(
            invalid(|c| { c.set_parental_investment_level(1.3); }),
            ConfigError::InvestmentOutOfRange(_)
        ));
        assert!(matches!(
            invalid(|c| { c.set_parental_investment_level(-0.2); }),
            ConfigError::InvestmentOutOfRange(_)
        ));
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let err = invalid(|c| {
            c.set_territory_size(-1.0).set_parental_investment_level(2.0);
        });
        assert!(matches!(err, ConfigError::NegativeTerritorySize(_)));
    }

    #[test]
    fn test_validate_accepts_boundaries() {
        let mut config = BreedingConfig::new();
        config
            .set_territory_size(0.0)
            .set_mate_fidelity(1.0)
            .set_courtship_duration(1)
            .set_display_range(1.0)
            .set_min_health_for_breeding(0.0)
            .set_breeding_cooldown(0)
            .set_parental_investment_level(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wolf_preset() {
        let wolf = BreedingConfig::for_species("entity.minecraft.wolf");
        assert_eq!(wolf.mating_system(), MatingSystem::Monogamy);
        assert_eq!(wolf.mate_fidelity(), 0.95);
        assert_eq!(wolf.territory_size(), 64.0);
        assert!(wolf.is_biparental_care());
        assert_eq!(wolf.parental_investment_level(), 0.9);
        assert_eq!(wolf.breeding_cooldown(), 12000);
        assert_eq!(wolf.min_health_for_breeding(), 0.8);
        assert_eq!(wolf, BreedingConfig::for_species("wolf"));
    }

    #[test]
    fn test_parrot_preset() {
        let parrot = BreedingConfig::for_species("parrot");
        assert_eq!(parrot.mating_system(), MatingSystem::Lekking);
        assert_eq!(parrot.courtship_duration(), 60);
        assert_eq!(parrot.display_range(), 32.0);
        assert_eq!(parrot.display_trait_weight(), 0.8);
        assert_eq!(parrot.mate_fidelity(), 0.3);
        assert!(parrot.is_year_round_breeding());
    }

    #[test]
    fn test_deer_and_cow_presets() {
        let deer = BreedingConfig::for_species("deer");
        assert_eq!(deer.mating_system(), MatingSystem::Polygyny);
        assert_eq!(deer.territory_size(), 48.0);
        assert_eq!(deer.display_type(), DisplayType::Posturing);
        assert_eq!(deer.breeding_season_start(), 9);
        assert_eq!(deer.breeding_season_end(), 11);
        assert!(!deer.is_biparental_care());

        let cow = BreedingConfig::for_species("cow");
        assert_eq!(cow.mating_system(), MatingSystem::Polygyny);
        assert_eq!(cow.mate_fidelity(), 0.2);
        assert!(cow.is_year_round_breeding());
        assert_eq!(cow.parental_investment_level(), 0.6);
    }

    #[test]
    fn test_unknown_species_gets_defaults() {
        assert_eq!(BreedingConfig::for_species("entity.minecraft.axolotl"), BreedingConfig::default());
        assert_eq!(BreedingConfig::for_species(""), BreedingConfig::default());
        assert!(BreedingConfig::preset("griffin").is_none());
    }

    #[test]
    fn test_all_presets_validate() {
        for species in ["wolf", "parrot", "deer", "cow"] {
            assert!(BreedingConfig::for_species(species).validate().is_ok(), "{species}");
        }
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config: BreedingConfig = toml::from_str(
            r#"
            mating_system = "polyandry"
            display_type = "scent_marking"
            breeding_season_start = 14
            "#,
        )
        .unwrap();
        let config = config.normalized();
        assert_eq!(config.mating_system(), MatingSystem::Polyandry);
        assert_eq!(config.display_type(), DisplayType::ScentMarking);
        assert_eq!(config.breeding_season_start(), 11);
        assert_eq!(config.territory_size(), 32.0);
    }
}
