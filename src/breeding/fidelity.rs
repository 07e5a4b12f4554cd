//! Pair bonds between previous mates
//!
//! A bond starts at the configured fidelity when two organisms breed and
//! decays exponentially with time since that breeding. Records older than
//! a year are forgotten on cleanup.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::breeding::mate_selection::MateSelection;
use crate::core::calendar::{DAYS_PER_YEAR, TICKS_PER_DAY};
use crate::core::config::BreedingConfig;
use crate::core::types::{EntityId, Tick};
use crate::entity::capability::BreedingEntity;

/// Decay time constant for bond strength, in ticks
pub const BOND_DECAY_TICKS: f32 = 120_000.0;

/// Bond strength above which a bond counts as active
pub const ACTIVE_BOND_THRESHOLD: f32 = 0.3;

/// Age after which a fidelity record is dropped
pub const FIDELITY_HORIZON_TICKS: Tick = DAYS_PER_YEAR as Tick * TICKS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityRecord {
    pub mate: EntityId,
    /// World time of the last breeding with `mate`
    pub last_bred: Tick,
}

#[derive(Debug, Clone)]
pub struct MateFidelity {
    fidelity: f32,
    records: AHashMap<EntityId, FidelityRecord>,
}

impl MateFidelity {
    pub fn new(config: &BreedingConfig) -> Self {
        Self {
            fidelity: config.mate_fidelity(),
            records: AHashMap::new(),
        }
    }

    /// Remember `mate`, stamped with the entity's current world time
    pub fn record_previous_mate(&mut self, entity: &impl BreedingEntity, mate: EntityId) {
        self.records.insert(
            entity.id(),
            FidelityRecord {
                mate,
                last_bred: entity.world_time(),
            },
        );
    }

    pub fn has_previous_mate(&self, entity: EntityId) -> bool {
        self.records.contains_key(&entity)
    }

    pub fn previous_mate(&self, entity: EntityId) -> Option<EntityId> {
        self.records.get(&entity).map(|record| record.mate)
    }

    pub fn clear_previous_mate(&mut self, entity: EntityId) {
        self.records.remove(&entity);
    }

    pub fn record(&self, entity: EntityId) -> Option<&FidelityRecord> {
        self.records.get(&entity)
    }

    pub fn restore_record(&mut self, entity: EntityId, record: FidelityRecord) {
        self.records.insert(entity, record);
    }

    /// Fidelity weight decayed by time since the last breeding
    pub fn calculate_bond_strength(&self, entity: &impl BreedingEntity) -> f32 {
        let Some(record) = self.records.get(&entity.id()) else {
            return 0.0;
        };
        let elapsed = entity.world_time().saturating_sub(record.last_bred) as f32;
        self.fidelity * (-elapsed / BOND_DECAY_TICKS).exp()
    }

    pub fn is_bond_active(&self, entity: &impl BreedingEntity) -> bool {
        self.calculate_bond_strength(entity) > ACTIVE_BOND_THRESHOLD
    }

    pub fn should_prefer_previous_mate(&self, entity: &impl BreedingEntity) -> bool {
        self.has_previous_mate(entity.id()) && self.is_bond_active(entity)
    }

    /// Candidates with an eligible previous mate moved to the front
    pub fn filter_by_fidelity<'a, E: BreedingEntity>(
        &self,
        chooser: &impl BreedingEntity,
        candidates: &'a [E],
        selection: &MateSelection,
    ) -> Vec<&'a E> {
        let mut ordered: Vec<&'a E> = candidates.iter().collect();
        let Some(mate) = self.previous_mate(chooser.id()) else {
            return ordered;
        };
        if let Some(pos) = ordered
            .iter()
            .position(|c| c.id() == mate && selection.is_suitable_mate(chooser, *c))
        {
            let previous = ordered.remove(pos);
            ordered.insert(0, previous);
        }
        ordered
    }

    /// The bonded previous mate, if bonded and present among eligible candidates
    pub fn preferred_mate<'a, E: BreedingEntity>(
        &self,
        chooser: &impl BreedingEntity,
        candidates: &'a [E],
        selection: &MateSelection,
    ) -> Option<&'a E> {
        if !self.should_prefer_previous_mate(chooser) {
            return None;
        }
        let mate = self.previous_mate(chooser.id())?;
        candidates
            .iter()
            .find(|c| c.id() == mate && selection.is_suitable_mate(chooser, *c))
    }

    /// Bonded previous mate first, ordinary scored selection otherwise
    pub fn apply_mate_fidelity<'a, E: BreedingEntity>(
        &self,
        chooser: &impl BreedingEntity,
        candidates: &'a [E],
        selection: &MateSelection,
    ) -> Option<&'a E> {
        if candidates.is_empty() {
            return None;
        }
        self.preferred_mate(chooser, candidates, selection)
            .or_else(|| selection.select_best_mate(chooser, candidates))
    }

    /// Ticks since this entity last bred with its recorded mate
    pub fn time_since_last_breeding(&self, entity: &impl BreedingEntity) -> Option<Tick> {
        self.records
            .get(&entity.id())
            .map(|record| entity.world_time().saturating_sub(record.last_bred))
    }

    /// Forget bonds older than a year, measured at `now`
    pub fn cleanup(&mut self, now: Tick) {
        let before = self.records.len();
        self.records
            .retain(|_, record| now.saturating_sub(record.last_bred) <= FIDELITY_HORIZON_TICKS);
        let forgotten = before - self.records.len();
        if forgotten > 0 {
            debug!(forgotten, "forgot stale pair bonds");
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
