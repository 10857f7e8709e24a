use crate::{genetic::Individual, operators::GeneticOperator, random::RandomGenerator};

pub mod bitflip;
pub mod swap;

pub use bitflip::BitFlipMutation;
pub use swap::SwapMutation;

/// MutationOperator defines an in-place mutation where the individual is modified directly.
///
/// Whenever the chromosome changes the implementation must call
/// `Individual::invalidate` so the engine knows the cached objectives are stale.
pub trait MutationOperator<V>: GeneticOperator {
    /// Mutates a single individual in place.
    ///
    /// # Arguments
    ///
    /// * `individual` - The individual to mutate.
    /// * `rng` - A random number generator.
    fn mutate(&self, individual: &mut Individual<V>, rng: &mut dyn RandomGenerator);
}
