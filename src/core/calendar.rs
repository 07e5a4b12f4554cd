//! Calendar arithmetic for world time
//!
//! A year is 12 months of 30 days; a day is 24000 ticks. Breeding seasons
//! are expressed in month indices (0 = first month) against this calendar.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Number of simulation ticks per day
pub const TICKS_PER_DAY: u64 = 24_000;

/// Number of days in a month
pub const DAYS_PER_MONTH: u32 = 30;

/// Number of months in a year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Number of days in a year
pub const DAYS_PER_YEAR: u32 = DAYS_PER_MONTH * MONTHS_PER_YEAR;

/// Whole days elapsed since world start
pub fn total_days(world_time: Tick) -> u64 {
    world_time / TICKS_PER_DAY
}

/// Day of year (0-359)
pub fn day_of_year(world_time: Tick) -> u32 {
    (total_days(world_time) % DAYS_PER_YEAR as u64) as u32
}

/// Month of year (0-11)
pub fn month_of_year(world_time: Tick) -> u32 {
    day_of_year(world_time) / DAYS_PER_MONTH
}

/// Day within the current month (0-29)
pub fn day_of_month(world_time: Tick) -> u32 {
    day_of_year(world_time) % DAYS_PER_MONTH
}

/// First day-of-year of a month
pub fn month_start_day(month: u32) -> u32 {
    (month % MONTHS_PER_YEAR) * DAYS_PER_MONTH
}

/// Calendar tracks simulation time with day/month granularity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    tick: Tick,
    ticks_per_day: u64,
}

impl Calendar {
    pub fn new(ticks_per_day: u64) -> Self {
        Self {
            tick: 0,
            ticks_per_day: ticks_per_day.max(1),
        }
    }

    /// Start the calendar at a given world time
    pub fn starting_at(tick: Tick) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn advance_by(&mut self, ticks: u64) {
        self.tick += ticks;
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn current_day(&self) -> u64 {
        self.tick / self.ticks_per_day
    }

    /// Ticks into the current day (0 until `ticks_per_day`)
    pub fn day_time(&self) -> u64 {
        self.tick % self.ticks_per_day
    }

    pub fn current_month(&self) -> u32 {
        ((self.current_day() % DAYS_PER_YEAR as u64) as u32) / DAYS_PER_MONTH
    }

    pub fn ticks_per_day(&self) -> u64 {
        self.ticks_per_day
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(TICKS_PER_DAY)
    }
}
