pub mod capability;
pub mod organism;

pub use capability::BreedingEntity;
pub use organism::Organism;
