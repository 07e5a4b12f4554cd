//! Breeding season arithmetic
//!
//! Everything here is a pure function of an entity's clock and the config.
//! The season window is half-open, `[start, end)` in months, and wraps
//! across the year boundary when `start > end`. `start == end` is a
//! full-year window.

use crate::core::calendar::{day_of_year, month_of_year, month_start_day, DAYS_PER_MONTH, DAYS_PER_YEAR, MONTHS_PER_YEAR};
use crate::core::config::BreedingConfig;
use crate::entity::capability::BreedingEntity;

/// Season progress reported for year-round breeders
pub const YEAR_ROUND_PROGRESS: f32 = 0.5;

/// Fraction of the breeding health minimum needed to be receptive
const RECEPTIVE_HEALTH_FACTOR: f32 = 0.8;

/// Comfortable temperature band for breeding
const MIN_TEMPERATURE: f32 = 0.3;
const MAX_TEMPERATURE: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct BreedingSeason {
    start: u32,
    end: u32,
    year_round: bool,
    photoperiod_trigger: bool,
    min_day_length: u64,
    min_health: f32,
}

impl BreedingSeason {
    pub fn new(config: &BreedingConfig) -> Self {
        Self {
            start: config.breeding_season_start(),
            end: config.breeding_season_end(),
            year_round: config.is_year_round_breeding(),
            photoperiod_trigger: config.is_photoperiod_trigger(),
            min_day_length: config.min_day_length(),
            min_health: config.min_health_for_breeding(),
        }
    }

    pub fn current_month(&self, entity: &impl BreedingEntity) -> u32 {
        month_of_year(entity.world_time())
    }

    /// Months covered by the window (1-12)
    pub fn season_length_months(&self) -> u32 {
        match (self.end + MONTHS_PER_YEAR - self.start) % MONTHS_PER_YEAR {
            0 => MONTHS_PER_YEAR,
            months => months,
        }
    }

    pub fn season_length_days(&self) -> u32 {
        self.season_length_months() * DAYS_PER_MONTH
    }

    pub fn is_month_in_season(&self, month: u32) -> bool {
        let offset = (month + MONTHS_PER_YEAR - self.start) % MONTHS_PER_YEAR;
        offset < self.season_length_months()
    }

    pub fn is_breeding_season(&self, entity: &impl BreedingEntity) -> bool {
        self.year_round || self.is_month_in_season(self.current_month(entity))
    }

    /// Day-time gate; always open when the photoperiod trigger is off
    pub fn check_photoperiod_trigger(&self, entity: &impl BreedingEntity) -> bool {
        !self.photoperiod_trigger || entity.day_time() >= self.min_day_length
    }

    /// Health and temperature are good enough to breed
    pub fn check_environmental_conditions(&self, entity: &impl BreedingEntity) -> bool {
        let temperature = entity.temperature();
        entity.health_fraction() >= self.min_health * RECEPTIVE_HEALTH_FACTOR
            && (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature)
    }

    /// In season, photoperiod satisfied and conditions favourable
    pub fn is_receptive(&self, entity: &impl BreedingEntity) -> bool {
        self.is_breeding_season(entity)
            && self.check_photoperiod_trigger(entity)
            && self.check_environmental_conditions(entity)
    }

    /// Whole days since the window opened, if currently inside it
    fn days_into_season(&self, entity: &impl BreedingEntity) -> Option<u32> {
        let day = day_of_year(entity.world_time());
        let offset = (day + DAYS_PER_YEAR - month_start_day(self.start)) % DAYS_PER_YEAR;
        (offset < self.season_length_days()).then_some(offset)
    }

    /// Fraction of the season elapsed, counting today (0-1)
    ///
    /// 0.5 for year-round breeders, 0 outside the season.
    pub fn season_progress(&self, entity: &impl BreedingEntity) -> f32 {
        if self.year_round {
            return YEAR_ROUND_PROGRESS;
        }
        match self.days_into_season(entity) {
            Some(offset) => ((offset + 1) as f32 / self.season_length_days() as f32).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    pub fn months_until_season(&self, entity: &impl BreedingEntity) -> u32 {
        if self.is_breeding_season(entity) {
            return 0;
        }
        (self.start + MONTHS_PER_YEAR - self.current_month(entity)) % MONTHS_PER_YEAR
    }

    /// Days left in the season after today (0 on its last day)
    pub fn days_remaining(&self, entity: &impl BreedingEntity) -> Option<u32> {
        if self.year_round {
            return None;
        }
        self.days_into_season(entity)
            .map(|offset| self.season_length_days().saturating_sub(offset + 1))
    }

    pub fn is_season_ending_soon(&self, entity: &impl BreedingEntity, threshold_days: u32) -> bool {
        self.days_remaining(entity)
            .is_some_and(|remaining| remaining <= threshold_days)
    }
}
