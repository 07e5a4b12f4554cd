//! Courtship displays
//!
//! Each performer has at most one record. A record is Active while its
//! elapsed ticks are below the configured duration and Complete after;
//! complete records linger until `cleanup()`. Rejection drops the record.

use ahash::AHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::{BreedingConfig, DisplayType};
use crate::core::types::{horizontal_distance, EntityId, Tick};
use crate::entity::capability::BreedingEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtshipPhase {
    Idle,
    Active,
    Complete,
}

/// One performer's display in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtshipRecord {
    /// World time the display began
    pub started_at: Tick,
    pub elapsed: i32,
    /// 1.0 at start, linear to 0.0 at completion
    pub intensity: f32,
}

#[derive(Debug, Clone)]
pub struct CourtshipDisplay {
    duration: i32,
    display_range: f32,
    display_type: DisplayType,
    records: AHashMap<EntityId, CourtshipRecord>,
}

impl CourtshipDisplay {
    pub fn new(config: &BreedingConfig) -> Self {
        Self {
            duration: config.courtship_duration(),
            display_range: config.display_range(),
            display_type: config.display_type(),
            records: AHashMap::new(),
        }
    }

    pub fn display_type(&self) -> DisplayType {
        self.display_type
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    /// Mate is alive, free and within display range on the ground plane
    pub fn should_initiate_courtship(
        &self,
        performer: &impl BreedingEntity,
        mate: &impl BreedingEntity,
    ) -> bool {
        if !mate.is_alive() || mate.is_in_love() {
            return false;
        }
        horizontal_distance(performer.position(), mate.position()) <= self.display_range
    }

    /// Begin (or restart) a display at full intensity
    pub fn start_courtship(&mut self, performer: &impl BreedingEntity) {
        let record = CourtshipRecord {
            started_at: performer.world_time(),
            elapsed: 0,
            intensity: 1.0,
        };
        self.records.insert(performer.id(), record);
        debug!(performer = %performer.id(), display = ?self.display_type, "courtship started");
    }

    /// Advance every active display by one tick
    pub fn tick(&mut self) {
        let duration = self.duration;
        for (id, record) in self.records.iter_mut() {
            if record.elapsed >= duration {
                continue;
            }
            record.elapsed += 1;
            record.intensity = intensity_at(record.elapsed, duration);
            if record.elapsed >= duration {
                debug!(performer = %id, "courtship complete");
            }
        }
    }

    pub fn courtship_phase(&self, performer: EntityId) -> CourtshipPhase {
        match self.records.get(&performer) {
            None => CourtshipPhase::Idle,
            Some(record) if record.elapsed >= self.duration => CourtshipPhase::Complete,
            Some(_) => CourtshipPhase::Active,
        }
    }

    pub fn is_courtship_active(&self, performer: EntityId) -> bool {
        self.courtship_phase(performer) == CourtshipPhase::Active
    }

    pub fn is_courtship_complete(&self, performer: EntityId) -> bool {
        self.courtship_phase(performer) == CourtshipPhase::Complete
    }

    pub fn current_intensity(&self, performer: EntityId) -> f32 {
        self.records
            .get(&performer)
            .map_or(0.0, |record| record.intensity.max(0.0))
    }

    pub fn record(&self, performer: EntityId) -> Option<&CourtshipRecord> {
        self.records.get(&performer)
    }

    /// Put back a record saved elsewhere
    pub fn restore_record(&mut self, performer: EntityId, record: CourtshipRecord) {
        self.records.insert(performer, record);
    }

    pub fn on_rejected(&mut self, performer: EntityId) {
        if let Some(record) = self.records.remove(&performer) {
            debug!(performer = %performer, elapsed = record.elapsed, "courtship rejected");
        }
    }

    /// Movement the performer should add while displaying
    ///
    /// Waveforms are driven by the performer's world time, so the same
    /// entity state always yields the same force.
    pub fn calculate_display_force(&self, performer: &impl BreedingEntity) -> Vec3 {
        if !self.is_courtship_active(performer.id()) {
            return Vec3::ZERO;
        }
        let intensity = self.current_intensity(performer.id());
        if intensity <= 0.0 {
            return Vec3::ZERO;
        }
        display_waveform(self.display_type, performer.world_time(), intensity)
    }

    /// Drop completed displays
    pub fn cleanup(&mut self) {
        let duration = self.duration;
        let before = self.records.len();
        self.records.retain(|_, record| record.elapsed < duration);
        let removed = before - self.records.len();
        if removed > 0 {
            debug!(removed, "cleared completed courtships");
        }
    }

    /// Forget one performer entirely
    pub fn remove(&mut self, performer: EntityId) {
        self.records.remove(&performer);
    }

    pub fn active_count(&self) -> usize {
        self.records
            .values()
            .filter(|record| record.elapsed < self.duration)
            .count()
    }
}

fn intensity_at(elapsed: i32, duration: i32) -> f32 {
    if duration <= 0 {
        return 0.0;
    }
    (1.0 - elapsed as f32 / duration as f32).max(0.0)
}

fn display_waveform(display_type: DisplayType, world_time: Tick, intensity: f32) -> Vec3 {
    let t = world_time as f32;
    match display_type {
        DisplayType::Dancing => Vec3::new(
            (t * 0.1).sin() * 0.15 * intensity,
            (t * 0.05).sin().abs() * 0.1 * intensity,
            (t * 0.1).cos() * 0.15 * intensity,
        ),
        DisplayType::Posturing => Vec3::new(0.0, 0.05 * intensity, 0.0),
        DisplayType::Vocalization => Vec3::new(
            (t * 0.3).sin() * 0.05 * intensity,
            0.0,
            (t * 0.3).cos() * 0.05 * intensity,
        ),
        DisplayType::Coloration | DisplayType::GiftGiving | DisplayType::ScentMarking => Vec3::new(
            (t * 0.2).sin() * 0.05 * intensity,
            0.0,
            (t * 0.2).cos() * 0.05 * intensity,
        ),
    }
}
