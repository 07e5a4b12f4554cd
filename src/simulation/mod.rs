pub mod population;

pub use population::{run_herd, Herd, HerdParams, HerdSummary};
