//! Breeding decision engine
//!
//! One module per concern, composed by `BreedingBehavior`:
//! - mate_selection: eligibility and scoring
//! - courtship: timed displays
//! - territory: centers, rivals, defense
//! - season: calendar windows and photoperiod
//! - fidelity: decaying pair bonds
//! - parental: broods and care allocation

pub mod behavior;
pub mod courtship;
pub mod fidelity;
pub mod mate_selection;
pub mod parental;
pub mod season;
pub mod territory;

pub use behavior::BreedingBehavior;
pub use courtship::{CourtshipDisplay, CourtshipPhase, CourtshipRecord};
pub use fidelity::{FidelityRecord, MateFidelity};
pub use mate_selection::MateSelection;
pub use parental::ParentalInvestment;
pub use season::BreedingSeason;
pub use territory::{RivalRecord, TerritorialDefense};
