use breeding_engine::breeding::{BreedingBehavior, BreedingSeason, CourtshipDisplay, MateFidelity, ParentalInvestment};
use breeding_engine::core::calendar::{day_of_year, month_of_year, DAYS_PER_YEAR, MONTHS_PER_YEAR, TICKS_PER_DAY};
use breeding_engine::core::config::BreedingConfig;
use breeding_engine::core::types::EntityId;
use breeding_engine::entity::Organism;
use proptest::prelude::*;

prop_compose! {
    fn arb_world_time()(
        days in 0u64..(DAYS_PER_YEAR as u64 * 5),
        within_day in 0u64..TICKS_PER_DAY
    ) -> u64 {
        days * TICKS_PER_DAY + within_day
    }
}

prop_compose! {
    fn arb_season()(
        start in 0i32..12,
        end in 0i32..12
    ) -> (i32, i32) {
        (start, end)
    }
}

fn season_for(start: i32, end: i32) -> BreedingSeason {
    let mut config = BreedingConfig::new();
    config.set_breeding_season_start(start).set_breeding_season_end(end);
    BreedingSeason::new(&config)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_calendar_ranges(t in arb_world_time()) {
        prop_assert!(month_of_year(t) < MONTHS_PER_YEAR);
        prop_assert!(day_of_year(t) < DAYS_PER_YEAR);
        prop_assert_eq!(month_of_year(t), day_of_year(t) / 30);
    }

    #[test]
    fn test_season_membership_matches_month_window(
        (start, end) in arb_season(),
        t in arb_world_time()
    ) {
        let season = season_for(start, end);
        let organism = Organism::female("deer").at_time(t);
        let month = month_of_year(t) as i32;

        let expected = if start == end {
            true
        } else if start < end {
            month >= start && month < end
        } else {
            month >= start || month < end
        };
        prop_assert_eq!(season.is_breeding_season(&organism), expected,
            "start {} end {} month {}", start, end, month);
    }

    #[test]
    fn test_season_queries_are_consistent(
        (start, end) in arb_season(),
        t in arb_world_time()
    ) {
        let season = season_for(start, end);
        let organism = Organism::female("deer").at_time(t);
        let progress = season.season_progress(&organism);
        let months_until = season.months_until_season(&organism);

        prop_assert!((0.0..=1.0).contains(&progress));
        prop_assert!(months_until < MONTHS_PER_YEAR);
        if season.is_breeding_season(&organism) {
            prop_assert!(progress > 0.0);
            prop_assert_eq!(months_until, 0);
            let remaining = season.days_remaining(&organism).unwrap();
            prop_assert!(remaining < season.season_length_days());
            let expected = season.season_length_days() as f32 * (1.0 - progress);
            prop_assert!((remaining as f32 - expected).abs() < 1e-2);
        } else {
            prop_assert_eq!(progress, 0.0);
            prop_assert!(months_until > 0);
            prop_assert!(!season.is_season_ending_soon(&organism, DAYS_PER_YEAR));
        }
    }

    #[test]
    fn test_bond_strength_never_grows(
        fidelity in 0.0f32..=1.0,
        start in 0u64..1_000_000,
        gap_a in 0u64..500_000,
        gap_b in 0u64..500_000
    ) {
        let mut config = BreedingConfig::new();
        config.set_mate_fidelity(fidelity);
        let mut bonds = MateFidelity::new(&config);
        let mut organism = Organism::female("wolf").at_time(start);
        bonds.record_previous_mate(&organism, EntityId::new());

        organism.world_time = start + gap_a.min(gap_b);
        let earlier = bonds.calculate_bond_strength(&organism);
        organism.world_time = start + gap_a.max(gap_b);
        let later = bonds.calculate_bond_strength(&organism);

        prop_assert!(later <= earlier);
        prop_assert!(later >= 0.0 && earlier <= fidelity + 1e-6);
    }

    #[test]
    fn test_courtship_intensity_decreases(duration in 1i32..200) {
        let mut config = BreedingConfig::new();
        config.set_courtship_duration(duration);
        let mut courtship = CourtshipDisplay::new(&config);
        let performer = Organism::male("parrot");
        courtship.start_courtship(&performer);

        let mut last = courtship.current_intensity(performer.id);
        for step in 1..=duration {
            prop_assert!(!courtship.is_courtship_complete(performer.id));
            courtship.tick();
            let now = courtship.current_intensity(performer.id);
            prop_assert!(now < last, "step {} of {}", step, duration);
            prop_assert!(now >= 0.0);
            last = now;
        }
        prop_assert!(courtship.is_courtship_complete(performer.id));
    }

    #[test]
    fn test_allocation_and_stress_bounds(
        level in 0.05f32..=1.0,
        brood in 1usize..=10
    ) {
        let mut config = BreedingConfig::new();
        config.set_parental_investment_level(level);
        let mut care = ParentalInvestment::new(&config);
        let parent = EntityId::new();

        let mut last_allocation = f32::INFINITY;
        for _ in 0..brood {
            care.register_offspring(parent, EntityId::new());
            let allocation = care.calculate_per_offspring_allocation(parent);
            prop_assert!(allocation < last_allocation);
            last_allocation = allocation;
        }
        let stress = care.calculate_parental_stress(parent);
        let care_level = care.calculate_care_level(parent);
        prop_assert!((0.0..=1.0).contains(&stress));
        prop_assert!(care_level > 0.0 && care_level <= 1.0);
        if brood as f32 <= care.ideal_brood_size() {
            prop_assert_eq!(stress, 0.0);
        }
    }

    #[test]
    fn test_cooldown_boundary(
        last in 0u64..10_000_000,
        cooldown in 0i64..100_000
    ) {
        let mut config = BreedingConfig::new();
        config.set_breeding_cooldown(cooldown);
        let mut behavior = BreedingBehavior::new(config);
        let mut organism = Organism::male("cow").at_time(last);
        behavior.record_breeding(&organism);

        if cooldown > 0 {
            organism.world_time = last + cooldown as u64 - 1;
            prop_assert!(!behavior.can_breed_now(&organism));
        }
        organism.world_time = last + cooldown as u64;
        prop_assert!(behavior.can_breed_now(&organism));
    }
}
