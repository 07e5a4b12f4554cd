//! Plain-data organism snapshot

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::calendar::TICKS_PER_DAY;
use crate::core::types::{EntityId, Tick};
use crate::entity::capability::BreedingEntity;

/// An organism as a bag of values
///
/// Useful for hosts that snapshot their entities each tick, and for
/// simulations that own their population outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub id: EntityId,
    pub species: String,
    pub position: Vec3,
    pub health: f32,
    pub max_health: f32,
    /// Ticks lived
    pub age: i64,
    pub alive: bool,
    pub baby: bool,
    pub in_love: bool,
    pub male: bool,
    pub world_time: Tick,
    pub size: f32,
    /// 0.0 cold to 1.0 hot
    pub temperature: f32,
}

impl Organism {
    /// Healthy adult at the origin, world time zero
    pub fn new(species: impl Into<String>, male: bool) -> Self {
        Self {
            id: EntityId::new(),
            species: species.into(),
            position: Vec3::ZERO,
            health: 20.0,
            max_health: 20.0,
            age: 1000,
            alive: true,
            baby: false,
            in_love: false,
            male,
            world_time: 0,
            size: 1.0,
            temperature: 0.5,
        }
    }

    pub fn male(species: impl Into<String>) -> Self {
        Self::new(species, true)
    }

    pub fn female(species: impl Into<String>) -> Self {
        Self::new(species, false)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_health(mut self, health: f32, max_health: f32) -> Self {
        self.health = health;
        self.max_health = max_health;
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = age;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn at_time(mut self, world_time: Tick) -> Self {
        self.world_time = world_time;
        self
    }

    pub fn as_baby(mut self) -> Self {
        self.baby = true;
        self
    }

    pub fn in_love(mut self) -> Self {
        self.in_love = true;
        self
    }

    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    /// Step this organism's clock and age forward
    pub fn advance(&mut self, ticks: u64) {
        self.world_time += ticks;
        self.age += ticks as i64;
    }

    pub fn kill(&mut self) {
        self.alive = false;
        self.health = 0.0;
    }
}

impl BreedingEntity for Organism {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn age(&self) -> i64 {
        self.age
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_baby(&self) -> bool {
        self.baby
    }

    fn is_in_love(&self) -> bool {
        self.in_love
    }

    fn is_male(&self) -> bool {
        self.male
    }

    fn species_id(&self) -> &str {
        &self.species
    }

    fn world_time(&self) -> Tick {
        self.world_time
    }

    fn day_time(&self) -> u64 {
        self.world_time % TICKS_PER_DAY
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}
