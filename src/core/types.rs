//! Core type definitions used throughout the codebase

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities
///
/// Every engine-owned record is keyed by this, never by a live reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// World tick counter (simulation time unit)
pub type Tick = u64;

/// Distance on the ground plane (x/z), ignoring height
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

/// Health as a fraction of max health; zero max health counts as empty
pub fn health_fraction(health: f32, max_health: f32) -> f32 {
    if max_health > 0.0 {
        health / max_health
    } else {
        0.0
    }
}
