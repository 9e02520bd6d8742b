//! "Phase 2" of the SRS generation MPC for Groth16-style proof systems,
//! following the scheme of \[BoweGM17].
//!
//! An [`Accumulator`] holds the circuit-specific terms of the SRS that depend
//! on the trapdoor `delta`. Participants take turns applying a secret scalar
//! `delta_j` to the accumulator, publishing a [`PublicKey`] that proves
//! knowledge of `delta_j` and binds the contribution to the hash chain of all
//! prior contributions. Anyone can replay the resulting transcript of public
//! keys against the initial accumulator and confirm the final parameters
//! without learning any of the secrets involved.
//!
//! References:
//!
//! \[BoweGM17]
//!  "Scalable Multi-party Computation for zk-SNARK Parameters in the Random
//!  Beacon Model"
//!  Sean Bowe and Ariel Gabizon and Ian Miers,
//!  IACR Cryptology ePrint Archive 2017,
//!  <http://eprint.iacr.org/2017/1050>

pub mod keypair;
pub mod protocol;
pub mod testing;
pub mod transcript;

mod computation;
mod initialization;
mod serialization;
mod verification;

pub use initialization::LayerL1;
pub use keypair::{compute_public_key, PublicKey};
pub use protocol::{
    compute_challenge, compute_response, initial_challenge, verify_response, Challenge, Response,
    COMPRESS_CHALLENGE, COMPRESS_RESPONSE,
};
pub use transcript::{verify_transcript, TranscriptSummary};

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{Field, Zero};
use setup_utils::{
    batch_mul, check_same_ratio, check_subgroup, check_vectors_same_ratio, compute_g2_r,
    read_element, read_vec, write_element, write_vec, CheckForCorrectness, Error, GenericArray,
    Result, UseCompression, VerificationError, U64,
};
use tracing::{debug, info, info_span};

/// The accumulator is the object that participants of the ceremony contribute
/// randomness to: the current encoding of `delta` in both groups, plus the H
/// and L vectors of the SRS, which carry a factor of `1/delta`. After the
/// contribution of participants `1..=j` the accumulator holds, for
/// `delta = delta_1 * ... * delta_j`:
///
/// * [ δ ]<sub>1</sub>, [ δ ]<sub>2</sub>
/// * { [ t(x) . x<sup>i</sup> / δ ]<sub>1</sub> }  for i in 0..n-1
/// * { [ ABC<sub>j</sub> / δ ]<sub>1</sub> }  for each non-public variable j
#[derive(Debug)]
pub struct Accumulator<E: PairingEngine> {
    /// Hash of the state before any contribution was applied. Constant over
    /// the whole MPC, and used to detect challenges and responses belonging
    /// to an unrelated ceremony.
    pub cs_hash: GenericArray<u8, U64>,
    /// The current delta in G1.
    pub delta_g1: E::G1Affine,
    /// The current delta in G2. Encodes the same scalar as `delta_g1`.
    pub delta_g2: E::G2Affine,
    /// The H terms, scaled by `1/delta`. One entry per power up to the
    /// circuit degree minus two.
    pub h_g1: Vec<E::G1Affine>,
    /// The L terms, scaled by `1/delta`. One entry per non-public variable.
    pub l_g1: Vec<E::G1Affine>,
}

impl<E: PairingEngine> PartialEq for Accumulator<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cs_hash == other.cs_hash
            && self.delta_g1 == other.delta_g1
            && self.delta_g2 == other.delta_g2
            && self.h_g1 == other.h_g1
            && self.l_g1 == other.l_g1
    }
}

impl<E: PairingEngine> Clone for Accumulator<E> {
    fn clone(&self) -> Self {
        Self {
            cs_hash: self.cs_hash.clone(),
            delta_g1: self.delta_g1,
            delta_g2: self.delta_g2,
            h_g1: self.h_g1.clone(),
            l_g1: self.l_g1.clone(),
        }
    }
}
