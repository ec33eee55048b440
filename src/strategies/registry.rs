use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Strategy;
use crate::strategies::probability::ProbabilityStrategy;
use crate::strategies::random::RandomStrategy;

/// Returns a normalized label for a strategy spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a strategy instance from a CLI-style spec.
/// Supported specs:
/// - probability[:seed]
/// - random[:seed]
pub fn create_strategy_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Strategy>, Box<dyn Error>> {
    let spec_lower = spec.to_ascii_lowercase();
    let custom_seed = spec
        .split_once(':')
        .and_then(|(_, value)| value.parse::<u64>().ok())
        .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
    if spec_lower.starts_with("probability") {
        Ok(Box::new(ProbabilityStrategy::seeded(custom_seed)))
    } else if spec_lower.starts_with("random") {
        Ok(Box::new(RandomStrategy::new(StdRng::seed_from_u64(
            custom_seed,
        ))))
    } else {
        Err(format!("unrecognized strategy spec: {spec}").into())
    }
}
