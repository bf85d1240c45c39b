//! Seeded random networks for tests and benchmarks.
//!
//! The weights carry no chess knowledge. They only give the loader and the
//! forward pass realistic magnitudes to work on.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::architecture::padded;
use super::{AffineTransform, Architecture, FeatureTransformer, NetworkError, NetworkWeights};

/// Network of shape `arch` with weights drawn from a generator seeded by `seed`.
///
/// Equal seeds give equal networks. The description is `random {seed}`.
pub fn random_network(arch: &Architecture, seed: u64) -> Result<NetworkWeights, NetworkError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = arch.half_dims();

    let biases = (0..half).map(|_| rng.gen_range(-100..=100)).collect();
    let weights = (0..half * arch.input_dims())
        .map(|_| rng.gen_range(-40..=40))
        .collect();
    let transformer = FeatureTransformer::from_parts(half, biases, weights)?;

    let layers = arch
        .layer_shapes()
        .map(|(input, output)| {
            let biases = (0..output).map(|_| rng.gen_range(-4000..=4000)).collect();
            let weights = (0..output * padded(input))
                .map(|_| rng.gen_range(-100..=100))
                .collect();
            AffineTransform::from_parts(input, output, biases, weights)
        })
        .collect::<Result<Vec<_>, _>>()?;

    NetworkWeights::from_parts(arch.clone(), format!("random {seed}"), transformer, layers)
}

/// `HalfKP -> 8x2 -> 4 -> 4 -> 1`
#[cfg(test)]
pub(crate) fn small_architecture() -> Architecture {
    Architecture::new(8, &[4, 4]).unwrap()
}

#[cfg(test)]
pub(crate) fn small_network(seed: u64) -> NetworkWeights {
    random_network(&small_architecture(), seed).unwrap()
}
