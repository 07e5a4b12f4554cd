//! Offspring registries and care allocation
//!
//! Care is a fixed investment budget split across the brood. Larger broods
//! dilute care per offspring and push the parent into stress once the brood
//! outgrows what the investment level can sustain.

use ahash::AHashMap;
use tracing::debug;

use crate::core::config::BreedingConfig;
use crate::core::types::EntityId;
use crate::entity::capability::BreedingEntity;

/// Hard cap on offspring per parent
pub const MAX_BROOD_SIZE: usize = 10;

/// Per-offspring allocation a parent must keep above to take on more young
pub const MIN_ALLOCATION: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct ParentalInvestment {
    investment: f32,
    biparental: bool,
    broods: AHashMap<EntityId, Vec<EntityId>>,
}

impl ParentalInvestment {
    pub fn new(config: &BreedingConfig) -> Self {
        Self {
            investment: config.parental_investment_level(),
            biparental: config.is_biparental_care(),
            broods: AHashMap::new(),
        }
    }

    /// Add `offspring` to the parent's brood
    ///
    /// Returns false if the brood is full or the offspring is already there.
    pub fn register_offspring(&mut self, parent: EntityId, offspring: EntityId) -> bool {
        let brood = self.broods.entry(parent).or_default();
        if brood.contains(&offspring) {
            return false;
        }
        if brood.len() >= MAX_BROOD_SIZE {
            debug!(parent = %parent, "brood full, offspring refused");
            return false;
        }
        brood.push(offspring);
        debug!(parent = %parent, offspring = %offspring, brood = brood.len(), "offspring registered");
        true
    }

    pub fn remove_offspring(&mut self, parent: EntityId, offspring: EntityId) {
        if let Some(brood) = self.broods.get_mut(&parent) {
            brood.retain(|id| *id != offspring);
        }
    }

    pub fn clear_offspring(&mut self, parent: EntityId) {
        self.broods.remove(&parent);
    }

    pub fn offspring(&self, parent: EntityId) -> &[EntityId] {
        self.broods.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_offspring(&self, parent: EntityId) -> Vec<EntityId> {
        self.offspring(parent).to_vec()
    }

    pub fn offspring_count(&self, parent: EntityId) -> usize {
        self.offspring(parent).len()
    }

    pub fn has_offspring(&self, parent: EntityId) -> bool {
        !self.offspring(parent).is_empty()
    }

    pub fn is_responsible_for(&self, parent: EntityId, offspring: EntityId) -> bool {
        self.offspring(parent).contains(&offspring)
    }

    pub fn can_accept_more_offspring(&self, parent: EntityId) -> bool {
        let count = self.offspring_count(parent);
        if count >= MAX_BROOD_SIZE {
            return false;
        }
        count == 0 || self.calculate_per_offspring_allocation(parent) > MIN_ALLOCATION
    }

    /// Investment diluted by brood size (0-1)
    pub fn calculate_care_level(&self, parent: EntityId) -> f32 {
        let count = self.offspring_count(parent);
        if count == 0 {
            return 0.0;
        }
        (self.investment / (1.0 + count as f32 * 0.2)).clamp(0.0, 1.0)
    }

    pub fn calculate_per_offspring_allocation(&self, parent: EntityId) -> f32 {
        let count = self.offspring_count(parent);
        if count == 0 {
            return 0.0;
        }
        self.investment / count as f32
    }

    /// Brood size the investment level comfortably supports
    pub fn ideal_brood_size(&self) -> f32 {
        2.0 / (self.investment + 0.01)
    }

    /// Overload beyond the ideal brood, relative to it (0-1)
    pub fn calculate_parental_stress(&self, parent: EntityId) -> f32 {
        let count = self.offspring_count(parent) as f32;
        let ideal = self.ideal_brood_size();
        if count <= ideal {
            return 0.0;
        }
        ((count - ideal) / ideal).min(1.0)
    }

    /// How selective this parent is when choosing mates (0-1)
    ///
    /// The sex that invests more is choosier; with shared care both sit in
    /// the middle, nudged up by investment.
    pub fn calculate_mate_choosiness(&self, parent: &impl BreedingEntity) -> f32 {
        if self.biparental {
            0.5 + self.investment * 0.3
        } else if parent.is_male() {
            0.3
        } else {
            0.7 + self.investment * 0.3
        }
    }

    /// Intrasexual competition felt by this entity (0-1)
    pub fn calculate_competition_pressure(&self, entity: &impl BreedingEntity) -> f32 {
        if self.biparental {
            0.5
        } else if entity.is_male() {
            0.8
        } else {
            0.3
        }
    }

    pub fn both_parents_invest(&self, parent_a: EntityId, parent_b: EntityId, offspring: EntityId) -> bool {
        self.biparental
            && self.is_responsible_for(parent_a, offspring)
            && self.is_responsible_for(parent_b, offspring)
    }

    /// Drop parents with empty broods
    pub fn cleanup(&mut self) {
        self.broods.retain(|_, brood| !brood.is_empty());
    }

    pub fn parent_count(&self) -> usize {
        self.broods.len()
    }
}
