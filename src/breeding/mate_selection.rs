//! Mate eligibility filtering and quality scoring

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::trace;

use crate::breeding::territory::TerritorialDefense;
use crate::core::config::{BreedingConfig, MatingSystem};
use crate::entity::capability::BreedingEntity;

/// Age (ticks) at which the age term saturates
const AGE_SATURATION: f32 = 200.0;

/// Weight of the honest-signal term
const HONEST_SIGNAL_WEIGHT: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct MateSelection {
    mating_system: MatingSystem,
    min_health: f32,
    min_age: i64,
    age_preference: f32,
    display_trait_weight: f32,
}

impl MateSelection {
    pub fn new(config: &BreedingConfig) -> Self {
        Self {
            mating_system: config.mating_system(),
            min_health: config.min_health_for_breeding(),
            min_age: config.min_age_for_breeding() as i64,
            age_preference: config.age_preference(),
            display_trait_weight: config.display_trait_weight(),
        }
    }

    /// Whether `candidate` could breed with `chooser` right now
    pub fn is_suitable_mate(&self, chooser: &impl BreedingEntity, candidate: &impl BreedingEntity) -> bool {
        candidate.is_alive()
            && !candidate.is_baby()
            && !candidate.is_in_love()
            && candidate.health_fraction() >= self.min_health
            && candidate.age() >= self.min_age
            && candidate.is_male() != chooser.is_male()
    }

    /// Eligible candidates, in input order
    pub fn filter_suitable_mates<'a, E: BreedingEntity>(
        &self,
        chooser: &impl BreedingEntity,
        candidates: &'a [E],
    ) -> Vec<&'a E> {
        candidates
            .iter()
            .filter(|candidate| self.is_suitable_mate(chooser, *candidate))
            .collect()
    }

    /// Highest-scoring eligible candidate; ties go to the earliest
    pub fn select_best_mate<'a, E: BreedingEntity>(
        &self,
        chooser: &impl BreedingEntity,
        candidates: &'a [E],
    ) -> Option<&'a E> {
        self.select_best_mate_with(chooser, candidates, None)
    }

    /// Like `select_best_mate`, with territory holders scored up
    pub fn select_best_mate_with<'a, E: BreedingEntity>(
        &self,
        chooser: &impl BreedingEntity,
        candidates: &'a [E],
        territory: Option<&TerritorialDefense>,
    ) -> Option<&'a E> {
        self.filter_suitable_mates(chooser, candidates)
            .into_iter()
            .enumerate()
            .map(|(order, candidate)| {
                let score = self.assess_mate_quality(candidate, territory);
                trace!(candidate = %candidate.id(), score, "scored mate");
                (order, candidate, score)
            })
            .max_by_key(|(order, _, score)| (OrderedFloat(*score), Reverse(*order)))
            .map(|(_, candidate, _)| candidate)
    }

    /// Weighted quality score for a candidate
    ///
    /// health fraction
    /// + age term x age preference
    /// + display trait x display weight x mating-system emphasis
    /// + honest signal x 0.3
    /// + territory boost (male territory holders only)
    pub fn assess_mate_quality(
        &self,
        candidate: &impl BreedingEntity,
        territory: Option<&TerritorialDefense>,
    ) -> f32 {
        let health = candidate.health_fraction();
        let age = (candidate.age() as f32 / AGE_SATURATION).min(1.0);
        let display = display_trait_score(candidate);
        let signal = honest_signal_score(candidate);

        let mut quality = health
            + age * self.age_preference
            + display * self.display_trait_weight * self.mating_system.display_emphasis()
            + signal * HONEST_SIGNAL_WEIGHT;

        if candidate.is_male() {
            if let Some(territory) = territory {
                quality += territory.calculate_breeding_success_boost(candidate.id());
            }
        }

        quality
    }
}

/// Body size as a proxy for ornament quality (0-1)
pub fn display_trait_score(entity: &impl BreedingEntity) -> f32 {
    (entity.size() * 0.1).clamp(0.0, 1.0)
}

/// Condition-dependent signal mixing health and size (0-1)
pub fn honest_signal_score(entity: &impl BreedingEntity) -> f32 {
    let size_indicator = entity.size() * 0.15;
    (entity.health_fraction() * 0.6 + size_indicator * 0.4).clamp(0.0, 1.0)
}
