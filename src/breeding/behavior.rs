//! Breeding decisions for one species config
//!
//! `BreedingBehavior` is the surface a host tick loop talks to. It owns one
//! instance of every component plus the per-entity breeding clock, and
//! routes each call to the component that answers it.

use ahash::AHashMap;
use glam::Vec3;
use tracing::debug;

use crate::breeding::courtship::CourtshipDisplay;
use crate::breeding::fidelity::MateFidelity;
use crate::breeding::mate_selection::MateSelection;
use crate::breeding::parental::ParentalInvestment;
use crate::breeding::season::BreedingSeason;
use crate::breeding::territory::TerritorialDefense;
use crate::core::config::BreedingConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Tick};
use crate::entity::capability::BreedingEntity;

#[derive(Debug, Clone)]
pub struct BreedingBehavior {
    config: BreedingConfig,
    mate_selection: MateSelection,
    courtship: CourtshipDisplay,
    territory: TerritorialDefense,
    season: BreedingSeason,
    fidelity: MateFidelity,
    parental: ParentalInvestment,
    /// World time of each entity's last breeding
    last_breeding: AHashMap<EntityId, Tick>,
    ticks: u64,
}

impl BreedingBehavior {
    /// Build from a config as given; callers validate beforehand
    pub fn new(config: BreedingConfig) -> Self {
        Self {
            mate_selection: MateSelection::new(&config),
            courtship: CourtshipDisplay::new(&config),
            territory: TerritorialDefense::new(&config),
            season: BreedingSeason::new(&config),
            fidelity: MateFidelity::new(&config),
            parental: ParentalInvestment::new(&config),
            last_breeding: AHashMap::new(),
            ticks: 0,
            config,
        }
    }

    /// Validate, then build
    pub fn try_new(config: BreedingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn for_species(species_id: &str) -> Self {
        Self::new(BreedingConfig::for_species(species_id))
    }

    // ===== Eligibility =====

    /// Both alive, grown, free and healthy enough
    ///
    /// Sex, season and cooldown are separate checks.
    pub fn can_breed(&self, a: &impl BreedingEntity, b: &impl BreedingEntity) -> bool {
        self.is_individually_fit(a) && self.is_individually_fit(b)
    }

    fn is_individually_fit(&self, entity: &impl BreedingEntity) -> bool {
        entity.is_alive()
            && !entity.is_baby()
            && !entity.is_in_love()
            && entity.health_fraction() >= self.config.min_health_for_breeding()
    }

    /// Cooldown since this entity's last breeding has run out
    pub fn can_breed_now(&self, entity: &impl BreedingEntity) -> bool {
        match self.last_breeding.get(&entity.id()) {
            None => true,
            Some(&last) => {
                let elapsed = entity.world_time() as i128 - last as i128;
                elapsed >= self.config.breeding_cooldown() as i128
            }
        }
    }

    /// Every gate at once: fitness, compatibility, receptiveness, cooldown
    pub fn is_ready_to_breed(&self, a: &impl BreedingEntity, b: &impl BreedingEntity) -> bool {
        self.can_breed(a, b)
            && a.is_male() != b.is_male()
            && a.species_id() == b.species_id()
            && self.season.is_receptive(a)
            && self.season.is_receptive(b)
            && self.can_breed_now(a)
            && self.can_breed_now(b)
    }

    // ===== Breeding records =====

    pub fn record_breeding(&mut self, entity: &impl BreedingEntity) {
        self.last_breeding.insert(entity.id(), entity.world_time());
        debug!(entity = %entity.id(), at = entity.world_time(), "breeding recorded");
    }

    /// Stamp both partners and bond them to each other
    pub fn record_pair_breeding(&mut self, a: &impl BreedingEntity, b: &impl BreedingEntity) {
        self.record_breeding(a);
        self.record_breeding(b);
        self.fidelity.record_previous_mate(a, b.id());
        self.fidelity.record_previous_mate(b, a.id());
    }

    pub fn last_breeding_time(&self, entity: EntityId) -> Option<Tick> {
        self.last_breeding.get(&entity).copied()
    }

    /// Rehydrate a breeding time saved by the host
    pub fn restore_breeding_time(&mut self, entity: EntityId, at: Tick) {
        self.last_breeding.insert(entity, at);
    }

    pub fn time_since_last_breeding(&self, entity: &impl BreedingEntity) -> Option<Tick> {
        self.last_breeding
            .get(&entity.id())
            .map(|&last| entity.world_time().saturating_sub(last))
    }

    // ===== Mate choice =====

    /// Bonded previous mate where the mating system values pair bonds,
    /// otherwise the best-scoring eligible candidate
    pub fn select_best_mate<'a, E: BreedingEntity>(
        &self,
        chooser: &impl BreedingEntity,
        candidates: &'a [E],
    ) -> Option<&'a E> {
        if self.config.mating_system().favors_pair_bonds() {
            if let Some(mate) = self
                .fidelity
                .preferred_mate(chooser, candidates, &self.mate_selection)
            {
                debug!(chooser = %chooser.id(), mate = %mate.id(), "returning to bonded mate");
                return Some(mate);
            }
        }
        self.mate_selection
            .select_best_mate_with(chooser, candidates, Some(&self.territory))
    }

    // ===== Courtship =====

    pub fn should_initiate_courtship(&self, performer: &impl BreedingEntity, mate: &impl BreedingEntity) -> bool {
        self.courtship.should_initiate_courtship(performer, mate)
    }

    pub fn start_courtship(&mut self, performer: &impl BreedingEntity) {
        self.courtship.start_courtship(performer);
    }

    /// Advance all time-driven state by one tick
    pub fn tick(&mut self) {
        self.courtship.tick();
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_courtship_active(&self, performer: EntityId) -> bool {
        self.courtship.is_courtship_active(performer)
    }

    pub fn is_courtship_complete(&self, performer: EntityId) -> bool {
        self.courtship.is_courtship_complete(performer)
    }

    pub fn on_rejected(&mut self, performer: EntityId) {
        self.courtship.on_rejected(performer);
    }

    pub fn calculate_display_force(&self, performer: &impl BreedingEntity) -> Vec3 {
        self.courtship.calculate_display_force(performer)
    }

    // ===== Territory =====

    pub fn set_territory_center(&mut self, owner: EntityId, center: Vec3) {
        self.territory.set_territory_center(owner, center);
    }

    pub fn is_intruder(&self, owner: &impl BreedingEntity, other: &impl BreedingEntity) -> bool {
        self.territory.is_intruder(owner, other)
    }

    // ===== Season =====

    pub fn is_breeding_season(&self, entity: &impl BreedingEntity) -> bool {
        self.season.is_breeding_season(entity)
    }

    pub fn season_progress(&self, entity: &impl BreedingEntity) -> f32 {
        self.season.season_progress(entity)
    }

    pub fn is_season_ending_soon(&self, entity: &impl BreedingEntity, threshold_days: u32) -> bool {
        self.season.is_season_ending_soon(entity, threshold_days)
    }

    // ===== Parental care =====

    pub fn register_offspring(&mut self, parent: EntityId, offspring: EntityId) -> bool {
        self.parental.register_offspring(parent, offspring)
    }

    pub fn calculate_care_level(&self, parent: EntityId) -> f32 {
        self.parental.calculate_care_level(parent)
    }

    pub fn both_parents_invest(&self, parent_a: EntityId, parent_b: EntityId, offspring: EntityId) -> bool {
        self.parental.both_parents_invest(parent_a, parent_b, offspring)
    }

    // ===== Housekeeping =====

    /// Periodic cleanup, timed by `context`'s clock
    ///
    /// Finished courtships, dead rivals, year-old bonds and empty broods are
    /// dropped. If `context` itself has died, everything keyed by it goes too.
    pub fn cleanup(&mut self, context: &impl BreedingEntity) {
        if !context.is_alive() {
            self.forget(context.id());
        }
        self.courtship.cleanup();
        self.territory.cleanup();
        self.fidelity.cleanup(context.world_time());
        self.parental.cleanup();
    }

    /// Drop every record keyed by `entity`
    pub fn forget(&mut self, entity: EntityId) {
        self.courtship.remove(entity);
        self.territory.remove_territory(entity);
        self.territory.mark_rival_dead(entity);
        self.fidelity.clear_previous_mate(entity);
        self.parental.clear_offspring(entity);
        self.last_breeding.remove(&entity);
        debug!(entity = %entity, "breeding state forgotten");
    }

    // ===== Accessors =====

    pub fn config(&self) -> &BreedingConfig {
        &self.config
    }

    pub fn mate_selection(&self) -> &MateSelection {
        &self.mate_selection
    }

    pub fn courtship(&self) -> &CourtshipDisplay {
        &self.courtship
    }

    pub fn courtship_mut(&mut self) -> &mut CourtshipDisplay {
        &mut self.courtship
    }

    pub fn territory(&self) -> &TerritorialDefense {
        &self.territory
    }

    pub fn territory_mut(&mut self) -> &mut TerritorialDefense {
        &mut self.territory
    }

    pub fn season(&self) -> &BreedingSeason {
        &self.season
    }

    pub fn fidelity(&self) -> &MateFidelity {
        &self.fidelity
    }

    pub fn fidelity_mut(&mut self) -> &mut MateFidelity {
        &mut self.fidelity
    }

    pub fn parental(&self) -> &ParentalInvestment {
        &self.parental
    }

    pub fn parental_mut(&mut self) -> &mut ParentalInvestment {
        &mut self.parental
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::TICKS_PER_DAY;
    use crate::core::error::{BreedingError, ConfigError};
    use crate::entity::organism::Organism;

    #[test]
    fn test_can_breed_healthy_adults() {
        let behavior = BreedingBehavior::new(BreedingConfig::default());
        let male = Organism::male("wolf");
        let female = Organism::female("wolf");
        assert!(behavior.can_breed(&male, &female));
    }

    #[test]
    fn test_can_breed_rejects_unfit() {
        let behavior = BreedingBehavior::new(BreedingConfig::default());
        let fit = Organism::female("wolf");
        let unfit = [
            Organism::male("wolf").dead(),
            Organism::male("wolf").as_baby(),
            Organism::male("wolf").in_love(),
            Organism::male("wolf").with_health(13.0, 20.0),
        ];
        for other in &unfit {
            assert!(!behavior.can_breed(&fit, other));
            assert!(!behavior.can_breed(other, &fit));
        }
    }

    #[test]
    fn test_can_breed_ignores_season_and_cooldown() {
        let mut behavior = BreedingBehavior::new(BreedingConfig::default());
        let male = Organism::male("wolf").at_time(10 * TICKS_PER_DAY);
        let female = Organism::female("wolf").at_time(10 * TICKS_PER_DAY);
        behavior.record_pair_breeding(&male, &female);
        assert!(!behavior.is_breeding_season(&male));
        assert!(behavior.can_breed(&male, &female));
        assert!(!behavior.can_breed_now(&male));
    }

    #[test]
    fn test_cooldown_boundary() {
        let mut behavior = BreedingBehavior::new(BreedingConfig::default());
        let mut cow = Organism::female("cow").at_time(10_000);
        assert!(behavior.can_breed_now(&cow));

        behavior.record_breeding(&cow);
        assert!(!behavior.can_breed_now(&cow));

        cow.world_time = 15_999;
        assert!(!behavior.can_breed_now(&cow));
        cow.world_time = 16_000;
        assert!(behavior.can_breed_now(&cow));
    }

    #[test]
    fn test_pair_breeding_bonds_both_ways() {
        let mut behavior = BreedingBehavior::new(BreedingConfig::default());
        let male = Organism::male("wolf");
        let female = Organism::female("wolf");
        behavior.record_pair_breeding(&male, &female);

        assert_eq!(behavior.fidelity().previous_mate(male.id), Some(female.id));
        assert_eq!(behavior.fidelity().previous_mate(female.id), Some(male.id));
        assert_eq!(behavior.last_breeding_time(male.id), Some(0));
    }

    #[test]
    fn test_monogamy_returns_to_bonded_mate() {
        let mut behavior = BreedingBehavior::for_species("wolf");
        let female = Organism::female("wolf");
        let old_mate = Organism::male("wolf").with_health(17.0, 20.0);
        behavior.record_pair_breeding(&female, &old_mate);

        let stranger = Organism::male("wolf").with_size(9.0);
        let candidates = vec![stranger.clone(), old_mate.clone()];
        let chosen = behavior.select_best_mate(&female, &candidates).unwrap();
        assert_eq!(chosen.id, old_mate.id);
    }

    #[test]
    fn test_polygyny_scores_strangers_normally() {
        let mut behavior = BreedingBehavior::for_species("deer");
        let doe = Organism::female("deer");
        let old_mate = Organism::male("deer").with_health(17.0, 20.0);
        behavior.record_pair_breeding(&doe, &old_mate);

        let stag = Organism::male("deer").with_size(9.0);
        let candidates = vec![old_mate.clone(), stag.clone()];
        let chosen = behavior.select_best_mate(&doe, &candidates).unwrap();
        assert_eq!(chosen.id, stag.id);
    }

    #[test]
    fn test_try_new_validates() {
        let mut config = BreedingConfig::default();
        config.set_breeding_cooldown(-5);
        let err = BreedingBehavior::try_new(config).unwrap_err();
        assert!(matches!(err, BreedingError::Config(ConfigError::NegativeCooldown(-5))));
        assert!(BreedingBehavior::try_new(BreedingConfig::default()).is_ok());
    }

    #[test]
    fn test_tick_drives_courtship() {
        let mut behavior = BreedingBehavior::for_species("parrot");
        let performer = Organism::male("parrot");
        behavior.start_courtship(&performer);
        for _ in 0..60 {
            behavior.tick();
        }
        assert!(behavior.is_courtship_complete(performer.id));
        assert_eq!(behavior.ticks(), 60);
    }

    #[test]
    fn test_ready_to_breed_combines_gates() {
        let mut config = BreedingConfig::default();
        config.set_year_round_breeding(true);
        let mut behavior = BreedingBehavior::new(config);
        let male = Organism::male("cow");
        let female = Organism::female("cow");

        assert!(behavior.is_ready_to_breed(&male, &female));
        assert!(!behavior.is_ready_to_breed(&male, &Organism::male("cow")));
        assert!(!behavior.is_ready_to_breed(&male, &Organism::female("pig")));
        assert!(!behavior.is_ready_to_breed(&male, &female.clone().with_temperature(0.1)));

        behavior.record_breeding(&male);
        assert!(!behavior.is_ready_to_breed(&male, &female));
    }

    #[test]
    fn test_cleanup_unknown_entity_is_harmless() {
        let mut behavior = BreedingBehavior::new(BreedingConfig::default());
        let ghost = Organism::male("wolf").dead();
        behavior.cleanup(&ghost);
        behavior.forget(EntityId::new());
        assert!(behavior.last_breeding_time(ghost.id).is_none());
    }

    #[test]
    fn test_cleanup_forgets_dead_entity() {
        let mut behavior = BreedingBehavior::for_species("wolf");
        let mut male = Organism::male("wolf");
        let female = Organism::female("wolf");
        behavior.record_pair_breeding(&male, &female);
        behavior.start_courtship(&male);
        behavior.set_territory_center(male.id, Vec3::ZERO);
        behavior.register_offspring(male.id, EntityId::new());

        male.kill();
        behavior.cleanup(&male);

        assert!(behavior.last_breeding_time(male.id).is_none());
        assert!(!behavior.is_courtship_active(male.id));
        assert!(behavior.territory().territory_center(male.id).is_none());
        assert!(!behavior.fidelity().has_previous_mate(male.id));
        assert!(!behavior.parental().has_offspring(male.id));
        // The survivor still remembers its mate
        assert!(behavior.fidelity().has_previous_mate(female.id));
    }

    #[test]
    fn test_restore_breeding_time() {
        let mut behavior = BreedingBehavior::for_species("cow");
        let cow = Organism::female("cow").at_time(20_000);
        behavior.restore_breeding_time(cow.id, 19_000);
        assert_eq!(behavior.time_since_last_breeding(&cow), Some(1_000));
        assert!(!behavior.can_breed_now(&cow));
    }
}
