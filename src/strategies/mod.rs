pub mod probability;
pub mod random;
pub mod registry;

pub use probability::ProbabilityStrategy;
pub use random::RandomStrategy;
pub use registry::{create_strategy_from_spec, label_for_spec};
