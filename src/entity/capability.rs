//! What the breeding engine needs to know about an organism
//!
//! Hosts implement this for their live entity type. The engine only reads
//! through it; every piece of breeding state lives in engine-owned tables
//! keyed by `id()`.

use glam::Vec3;

use crate::core::types::{health_fraction, EntityId, Tick};

pub trait BreedingEntity {
    /// Stable identity, used as the key for all engine records
    fn id(&self) -> EntityId;

    fn position(&self) -> Vec3;

    fn health(&self) -> f32;

    fn max_health(&self) -> f32;

    /// Age in ticks
    fn age(&self) -> i64;

    fn is_alive(&self) -> bool;

    fn is_baby(&self) -> bool;

    /// Already in breeding mode with someone
    fn is_in_love(&self) -> bool;

    fn is_male(&self) -> bool;

    fn species_id(&self) -> &str;

    /// Ticks since world start, as seen by this entity
    fn world_time(&self) -> Tick;

    /// Ticks into the current day (0-23999)
    fn day_time(&self) -> u64;

    /// Body size (roughly bounding-box width x height)
    fn size(&self) -> f32;

    /// Ambient temperature at the entity, 0.0 cold to 1.0 hot
    fn temperature(&self) -> f32;

    fn health_fraction(&self) -> f32 {
        health_fraction(self.health(), self.max_health())
    }
}

impl<T: BreedingEntity + ?Sized> BreedingEntity for &T {
    fn id(&self) -> EntityId {
        (**self).id()
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn health(&self) -> f32 {
        (**self).health()
    }

    fn max_health(&self) -> f32 {
        (**self).max_health()
    }

    fn age(&self) -> i64 {
        (**self).age()
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }

    fn is_baby(&self) -> bool {
        (**self).is_baby()
    }

    fn is_in_love(&self) -> bool {
        (**self).is_in_love()
    }

    fn is_male(&self) -> bool {
        (**self).is_male()
    }

    fn species_id(&self) -> &str {
        (**self).species_id()
    }

    fn world_time(&self) -> Tick {
        (**self).world_time()
    }

    fn day_time(&self) -> u64 {
        (**self).day_time()
    }

    fn size(&self) -> f32 {
        (**self).size()
    }

    fn temperature(&self) -> f32 {
        (**self).temperature()
    }
}
