//! Population growth through breeding
//!
//! A self-contained herd that drives a `BreedingBehavior` the way a host
//! game would: organisms wander, females pick mates, males court, and
//! accepted courtships produce young that grow into adults.

use ahash::AHashMap;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::breeding::behavior::BreedingBehavior;
use crate::core::calendar::{month_start_day, Calendar, TICKS_PER_DAY};
use crate::core::config::BreedingConfig;
use crate::core::types::EntityId;
use crate::entity::organism::Organism;

/// Ticks between mate-search passes
pub const DECISION_INTERVAL: u64 = 20;

/// Ticks from birth until an offspring counts as adult
pub const GROWTH_TICKS: i64 = 24_000;

/// Herd run parameters
#[derive(Debug, Clone)]
pub struct HerdParams {
    pub species: String,
    pub population: usize,
    pub ticks: u64,
    pub seed: u64,
    /// Side length of the square the herd roams
    pub arena_size: f32,
    /// Start at the opening of the breeding season instead of world time zero
    pub start_in_season: bool,
}

impl Default for HerdParams {
    fn default() -> Self {
        Self {
            species: "wolf".into(),
            population: 20,
            ticks: 48_000,
            seed: 42,
            arena_size: 48.0,
            start_in_season: true,
        }
    }
}

/// What happened during a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct HerdSummary {
    pub species: String,
    pub seed: u64,
    pub ticks: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub courtships_started: u32,
    pub courtships_rejected: u32,
    pub pairings: u32,
    pub offspring_born: u32,
    pub offspring_refused: u32,
    pub matured: u32,
    pub bonded: usize,
    pub territories: usize,
}

pub struct Herd {
    behavior: BreedingBehavior,
    members: Vec<Organism>,
    /// Performing male -> courted female
    courting: AHashMap<EntityId, EntityId>,
    calendar: Calendar,
    rng: ChaCha8Rng,
    arena_size: f32,
    summary: HerdSummary,
}

impl Herd {
    pub fn new(config: BreedingConfig, params: &HerdParams) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let start_tick = if params.start_in_season {
            month_start_day(config.breeding_season_start()) as u64 * TICKS_PER_DAY
        } else {
            0
        };

        let members: Vec<Organism> = (0..params.population)
            .map(|i| {
                let position = Vec3::new(
                    rng.gen_range(0.0..params.arena_size),
                    64.0,
                    rng.gen_range(0.0..params.arena_size),
                );
                Organism::new(params.species.clone(), i % 2 == 0)
                    .with_position(position)
                    .with_age(rng.gen_range(200..5_000))
                    .with_size(rng.gen_range(0.6..1.6))
                    .with_health(rng.gen_range(15.0..20.0), 20.0)
                    .at_time(start_tick)
            })
            .collect();

        let mut behavior = BreedingBehavior::new(config);
        for male in members.iter().filter(|m| m.male) {
            behavior.territory_mut().claim_territory(male);
        }

        let summary = HerdSummary {
            species: params.species.clone(),
            seed: params.seed,
            initial_population: members.len(),
            ..HerdSummary::default()
        };

        Self {
            behavior,
            members,
            courting: AHashMap::new(),
            calendar: Calendar::starting_at(start_tick),
            rng,
            arena_size: params.arena_size,
            summary,
        }
    }

    pub fn behavior(&self) -> &BreedingBehavior {
        &self.behavior
    }

    pub fn members(&self) -> &[Organism] {
        &self.members
    }

    /// Advance the herd by one tick
    pub fn step(&mut self) {
        self.calendar.advance();
        let now = self.calendar.current_tick();
        for member in self.members.iter_mut() {
            member.advance(1);
            member.world_time = now;
            let jitter = Vec3::new(self.rng.gen_range(-0.1..0.1), 0.0, self.rng.gen_range(-0.1..0.1));
            let drift = self.behavior.calculate_display_force(&*member) + jitter;
            member.position = (member.position + drift).clamp(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(self.arena_size, 128.0, self.arena_size),
            );
        }

        self.behavior.tick();
        self.resolve_courtships();
        if now % DECISION_INTERVAL == 0 {
            self.track_rivals();
            self.seek_mates();
        }
        self.grow_offspring();
        if now % TICKS_PER_DAY == 0 {
            if let Some(context) = self.members.first() {
                self.behavior.cleanup(context);
            }
        }
        self.summary.ticks += 1;
    }

    pub fn run(&mut self, ticks: u64) -> HerdSummary {
        for _ in 0..ticks {
            self.step();
        }
        self.summarize()
    }

    pub fn summarize(&self) -> HerdSummary {
        let mut summary = self.summary.clone();
        summary.final_population = self.members.len();
        summary.bonded = self
            .members
            .iter()
            .filter(|m| self.behavior.fidelity().is_bond_active(*m))
            .count();
        summary.territories = self.behavior.territory().territory_count();
        summary
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.members.iter().position(|m| m.id == id)
    }

    fn track_rivals(&mut self) {
        let Self { behavior, members, .. } = self;
        for owner in members.iter().filter(|m| m.male && !m.baby) {
            for other in members.iter() {
                let territory = behavior.territory();
                if territory.is_rival(owner, other) && territory.is_intruder(owner, other) {
                    behavior.territory_mut().add_rival(owner.id, other);
                }
            }
        }
    }

    fn seek_mates(&mut self) {
        let females: Vec<usize> = (0..self.members.len())
            .filter(|&i| !self.members[i].male && !self.members[i].baby)
            .collect();

        for fi in females {
            let female = &self.members[fi];
            if self.courting.values().any(|id| *id == female.id) {
                continue;
            }
            let Some(male) = self.behavior.select_best_mate(female, &self.members) else {
                continue;
            };
            if self.courting.contains_key(&male.id)
                || !self.behavior.is_ready_to_breed(male, female)
                || !self.behavior.should_initiate_courtship(male, female)
            {
                continue;
            }
            let (male_id, female_id) = (male.id, female.id);
            self.behavior.start_courtship(male);
            self.courting.insert(male_id, female_id);
            self.summary.courtships_started += 1;
        }
    }

    fn resolve_courtships(&mut self) {
        let mut finished: Vec<(EntityId, EntityId)> = self
            .courting
            .iter()
            .filter(|(male, _)| self.behavior.is_courtship_complete(**male))
            .map(|(male, female)| (*male, *female))
            .collect();
        // Map order is unseeded; resolve in herd order so runs replay
        finished.sort_by_key(|(male, _)| self.index_of(*male));

        for (male_id, female_id) in finished {
            self.courting.remove(&male_id);
            let (Some(mi), Some(fi)) = (self.index_of(male_id), self.index_of(female_id)) else {
                self.behavior.on_rejected(male_id);
                continue;
            };

            let choosiness = self.behavior.parental().calculate_mate_choosiness(&self.members[fi]);
            if self.rng.gen::<f32>() < choosiness * 0.5 {
                self.behavior.on_rejected(male_id);
                self.summary.courtships_rejected += 1;
                continue;
            }

            let (male, female) = (self.members[mi].clone(), self.members[fi].clone());
            self.behavior.record_pair_breeding(&male, &female);
            self.summary.pairings += 1;
            self.bear_young(&male, &female);
        }
    }

    fn bear_young(&mut self, father: &Organism, mother: &Organism) {
        if !self.behavior.parental().can_accept_more_offspring(mother.id) {
            self.summary.offspring_refused += 1;
            return;
        }
        let young = Organism::new(mother.species.clone(), self.rng.gen_bool(0.5))
            .with_position(mother.position)
            .with_age(0)
            .with_size(mother.size * 0.5)
            .at_time(mother.world_time)
            .as_baby();

        self.behavior.register_offspring(mother.id, young.id);
        if self.behavior.config().is_biparental_care() {
            self.behavior.register_offspring(father.id, young.id);
        }
        debug!(mother = %mother.id, young = %young.id, "offspring born");
        self.members.push(young);
        self.summary.offspring_born += 1;
    }

    fn grow_offspring(&mut self) {
        let grown: Vec<EntityId> = self
            .members
            .iter_mut()
            .filter(|m| m.baby && m.age >= GROWTH_TICKS)
            .map(|m| {
                m.baby = false;
                m.id
            })
            .collect();

        if grown.is_empty() {
            return;
        }
        let parents: Vec<EntityId> = self.members.iter().map(|m| m.id).collect();
        for young in grown {
            for parent in &parents {
                if self.behavior.parental().is_responsible_for(*parent, young) {
                    self.behavior.parental_mut().remove_offspring(*parent, young);
                }
            }
            self.summary.matured += 1;
        }
    }
}

/// Run a herd of one species from its preset (or a supplied config)
pub fn run_herd(config: BreedingConfig, params: &HerdParams) -> HerdSummary {
    info!(species = %params.species, population = params.population, ticks = params.ticks, "herd run starting");
    let mut herd = Herd::new(config, params);
    let summary = herd.run(params.ticks);
    info!(
        pairings = summary.pairings,
        offspring = summary.offspring_born,
        "herd run finished"
    );
    summary
}
