//! Breeding Engine - mate choice, courtship, territory, seasons, pair bonds
//! and parental care for simulated organisms

pub mod breeding;
pub mod core;
pub mod entity;
pub mod simulation;
