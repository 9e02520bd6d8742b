//! Helpers for generating ceremony states in tests. Kept public so
//! downstream crates can drive their own integration tests against small
//! synthetic circuits.

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use rand::{CryptoRng, Rng};

use ark_ff::UniformRand;
use setup_utils::{GenericArray, Result, U64};

use crate::protocol::{compute_challenge, compute_response, initial_challenge, Challenge};
use crate::{Accumulator, LayerL1};

/// Generates a vector of random points on the curve.
pub fn random_point_vec<C: AffineCurve, R: Rng>(length: usize, rng: &mut R) -> Vec<C> {
    (0..length)
        .map(|_| C::Projective::rand(rng).into_affine())
        .collect()
}

/// A synthetic linear-combination output for a circuit of the given degree
/// and variable count: `degree - 1` H terms and `num_variables + 1` L terms.
pub fn random_layer_l1<E: PairingEngine, R: Rng>(
    degree: usize,
    num_variables: usize,
    rng: &mut R,
) -> LayerL1<E> {
    LayerL1 {
        h_g1: random_point_vec(degree - 1, rng),
        l_g1: random_point_vec(num_variables + 1, rng),
    }
}

/// A freshly initialized accumulator over a synthetic circuit, with the
/// blank digest standing in for the constraint system hash.
pub fn test_accumulator<E: PairingEngine, R: Rng>(
    degree: usize,
    num_variables: usize,
    num_inputs: usize,
    rng: &mut R,
) -> Accumulator<E> {
    let layer_l1 = random_layer_l1::<E, _>(degree, num_variables, rng);
    Accumulator::begin(&setup_utils::blank_hash(), &layer_l1, num_inputs)
        .expect("synthetic layer-L1 dimensions are valid")
}

/// Runs Phase 2 with a single locally chosen secret: initialization, one
/// contribution, and the resulting next challenge. Not a substitute for a
/// real multi-party ceremony with an auditable transcript, but convenient
/// for exercising consumers of the final parameters.
pub fn dummy_phase2<E: PairingEngine, R: Rng + CryptoRng>(
    cs_hash: &GenericArray<u8, U64>,
    layer_l1: &LayerL1<E>,
    delta: &E::Fr,
    num_inputs: usize,
    rng: &mut R,
) -> Result<Challenge<E>> {
    let accumulator = Accumulator::begin(cs_hash, layer_l1, num_inputs)?;
    let challenge = initial_challenge(accumulator);
    let response = compute_response(&challenge, delta, rng)?;
    compute_challenge(response)
}
