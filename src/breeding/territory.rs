//! Territory centers, rival rosters and confrontation forces
//!
//! Rivals are stored as snapshots (id, last seen position, alive flag), so
//! the roster never outlives or borrows the entities it describes. Calling
//! `add_rival` again with a fresh view of the same rival refreshes it.

use ahash::AHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::BreedingConfig;
use crate::core::types::EntityId;
use crate::entity::capability::BreedingEntity;

/// Arrivals this close to the center count as settled, not intruding
pub const INNER_EXCLUSION_RADIUS: f32 = 2.0;

/// Territory size at which quality saturates
pub const MAX_TERRITORY_SIZE: f32 = 64.0;

/// Snapshot of a tracked rival
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RivalRecord {
    pub id: EntityId,
    pub last_position: Vec3,
    pub alive: bool,
}

impl RivalRecord {
    pub fn observe(rival: &impl BreedingEntity) -> Self {
        Self {
            id: rival.id(),
            last_position: rival.position(),
            alive: rival.is_alive(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TerritorialDefense {
    territory_size: f32,
    centers: AHashMap<EntityId, Vec3>,
    rivals: AHashMap<EntityId, Vec<RivalRecord>>,
}

impl TerritorialDefense {
    pub fn new(config: &BreedingConfig) -> Self {
        Self {
            territory_size: config.territory_size(),
            centers: AHashMap::new(),
            rivals: AHashMap::new(),
        }
    }

    pub fn territory_size(&self) -> f32 {
        self.territory_size
    }

    pub fn set_territory_center(&mut self, owner: EntityId, center: Vec3) {
        self.centers.insert(owner, center);
    }

    /// Claim territory around the owner's current position
    pub fn claim_territory(&mut self, owner: &impl BreedingEntity) {
        self.set_territory_center(owner.id(), owner.position());
    }

    pub fn territory_center(&self, owner: EntityId) -> Option<Vec3> {
        self.centers.get(&owner).copied()
    }

    pub fn has_territory(&self, owner: EntityId) -> bool {
        self.centers.contains_key(&owner)
    }

    /// Drop an owner's center and rival roster
    pub fn remove_territory(&mut self, owner: EntityId) {
        self.centers.remove(&owner);
        self.rivals.remove(&owner);
    }

    /// Straight-line distance from the center, height included
    pub fn is_position_in_territory(&self, owner: EntityId, position: Vec3) -> bool {
        self.centers
            .get(&owner)
            .is_some_and(|center| center.distance(position) <= self.territory_size)
    }

    /// Alive, inside the territory, and outside the inner settled band
    pub fn is_intruder(&self, owner: &impl BreedingEntity, other: &impl BreedingEntity) -> bool {
        if !other.is_alive() {
            return false;
        }
        let Some(center) = self.centers.get(&owner.id()) else {
            return false;
        };
        let distance = center.distance(other.position());
        distance <= self.territory_size && distance > INNER_EXCLUSION_RADIUS
    }

    /// Same species, same sex, not the owner itself
    pub fn is_rival(&self, owner: &impl BreedingEntity, other: &impl BreedingEntity) -> bool {
        owner.id() != other.id()
            && owner.species_id() == other.species_id()
            && owner.is_male() == other.is_male()
    }

    /// Track (or refresh) a rival for an owner
    pub fn add_rival(&mut self, owner: EntityId, rival: &impl BreedingEntity) {
        let record = RivalRecord::observe(rival);
        let roster = self.rivals.entry(owner).or_default();
        match roster.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => roster.push(record),
        }
    }

    pub fn rivals(&self, owner: EntityId) -> &[RivalRecord] {
        self.rivals.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_rivals(&self, owner: EntityId) -> Vec<EntityId> {
        self.rivals(owner).iter().map(|r| r.id).collect()
    }

    pub fn clear_rivals(&mut self, owner: EntityId) {
        if let Some(roster) = self.rivals.get_mut(&owner) {
            roster.clear();
        }
    }

    /// Closer rivals are more threatening; dead ones are no threat
    pub fn calculate_threat_level(&self, owner: &impl BreedingEntity, rival: &impl BreedingEntity) -> f32 {
        if !rival.is_alive() {
            return 0.0;
        }
        threat_at_distance(owner.position().distance(rival.position()))
    }

    /// Sum of unit directions toward every living tracked rival
    pub fn calculate_defense_force(&self, owner: &impl BreedingEntity) -> Vec3 {
        let origin = owner.position();
        self.rivals(owner.id())
            .iter()
            .filter(|r| r.alive)
            .map(|r| r.last_position - origin)
            .filter(|offset| offset.length() >= 0.01)
            .map(Vec3::normalize)
            .sum()
    }

    /// 0-1, saturating at `MAX_TERRITORY_SIZE`; 0 without a territory
    pub fn calculate_territory_quality(&self, owner: EntityId) -> f32 {
        if !self.has_territory(owner) {
            return 0.0;
        }
        (self.territory_size / MAX_TERRITORY_SIZE).clamp(0.0, 1.0)
    }

    /// Bonus added to a territory holder's mate score (0-0.5)
    pub fn calculate_breeding_success_boost(&self, owner: EntityId) -> f32 {
        self.calculate_territory_quality(owner) * 0.5
    }

    /// Mark a rival dead in every roster it appears in
    pub fn mark_rival_dead(&mut self, rival: EntityId) {
        for record in self.rivals.values_mut().flat_map(|roster| roster.iter_mut()) {
            if record.id == rival {
                record.alive = false;
            }
        }
    }

    /// Drop dead rivals and empty rosters
    pub fn cleanup(&mut self) {
        let mut pruned = 0;
        self.rivals.retain(|_, roster| {
            let before = roster.len();
            roster.retain(|r| r.alive);
            pruned += before - roster.len();
            !roster.is_empty()
        });
        if pruned > 0 {
            debug!(pruned, "pruned dead rivals");
        }
    }

    pub fn territory_count(&self) -> usize {
        self.centers.len()
    }
}

fn threat_at_distance(distance: f32) -> f32 {
    1.0 / (1.0 + distance * 0.1)
}
