//! Public keys proving knowledge of a contribution's secret scalar.

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{UniformRand, Zero};
use ark_serialize::CanonicalSerialize;
use rand::{CryptoRng, Rng};

use setup_utils::{
    calculate_hash, compute_g2_r, read_element, write_element, CheckForCorrectness, Error,
    GenericArray, Result, UseCompression, DIGEST_SIZE, U64,
};

use std::io::{Read, Write};

/// A single contribution to the MPC. Contains a proof-of-knowledge of the
/// contributor's secret `delta_j`: a random `s` in G1, `s * delta_j`, a point
/// `r` in G2 derived by hashing `s`, `s * delta_j` and the current transcript
/// digest, and `r * delta_j`.
///
/// The key also tracks the value of delta after this contribution and the
/// transcript digest before it, so a transcript of public keys alone is
/// enough to verify the whole ceremony. The secret `delta_j` itself never
/// appears.
#[derive(Debug)]
pub struct PublicKey<E: PairingEngine> {
    /// Digest of the transcript up to, and excluding, this contribution.
    pub transcript_digest: GenericArray<u8, U64>,
    /// The contributor's claimed delta_g1, i.e. `delta_j * last_delta_g1`.
    pub new_delta_g1: E::G1Affine,
    /// The proof-of-knowledge nonce.
    pub s_g1: E::G1Affine,
    /// `s_g1 * delta_j`.
    pub s_delta_j_g1: E::G1Affine,
    /// `r_g2 * delta_j`, for the deterministically derived `r_g2`.
    pub r_delta_j_g2: E::G2Affine,
}

impl<E: PairingEngine> PartialEq for PublicKey<E> {
    fn eq(&self, other: &Self) -> bool {
        self.transcript_digest == other.transcript_digest
            && self.new_delta_g1 == other.new_delta_g1
            && self.s_g1 == other.s_g1
            && self.s_delta_j_g1 == other.s_delta_j_g1
            && self.r_delta_j_g2 == other.r_delta_j_g2
    }
}

impl<E: PairingEngine> Clone for PublicKey<E> {
    fn clone(&self) -> Self {
        Self {
            transcript_digest: self.transcript_digest.clone(),
            new_delta_g1: self.new_delta_g1,
            s_g1: self.s_g1,
            s_delta_j_g1: self.s_delta_j_g1,
            r_delta_j_g2: self.r_delta_j_g2,
        }
    }
}

impl<E: PairingEngine> PublicKey<E> {
    /// The serialized size of a public key. Fixed per curve, which lets a
    /// coordinator grow a transcript file by exactly one record.
    pub fn size() -> usize {
        let g1 = E::G1Affine::zero().uncompressed_size();
        let g2 = E::G2Affine::zero().uncompressed_size();
        DIGEST_SIZE + 3 * g1 + g2
    }

    /// Writes the key in its canonical encoding: the digest, then every
    /// element uncompressed. This encoding is what the transcript hash chain
    /// is computed over.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.transcript_digest.as_slice())?;
        write_element(writer, &self.new_delta_g1, UseCompression::No)?;
        write_element(writer, &self.s_g1, UseCompression::No)?;
        write_element(writer, &self.s_delta_j_g1, UseCompression::No)?;
        write_element(writer, &self.r_delta_j_g2, UseCompression::No)?;
        Ok(())
    }

    /// Reads a key from its canonical encoding, validating every element.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut transcript_digest = GenericArray::<u8, U64>::default();
        reader.read_exact(transcript_digest.as_mut_slice())?;
        Self::read_after_digest(reader, transcript_digest)
    }

    /// Reads the remainder of a key once its digest has been consumed from
    /// the stream. Used by the transcript verifier, which reads the digest
    /// itself to detect a clean end-of-stream.
    pub(crate) fn read_after_digest<R: Read>(
        reader: &mut R,
        transcript_digest: GenericArray<u8, U64>,
    ) -> Result<Self> {
        Ok(Self {
            transcript_digest,
            new_delta_g1: read_element(reader, UseCompression::No, CheckForCorrectness::Full)?,
            s_g1: read_element(reader, UseCompression::No, CheckForCorrectness::Full)?,
            s_delta_j_g1: read_element(reader, UseCompression::No, CheckForCorrectness::Full)?,
            r_delta_j_g2: read_element(reader, UseCompression::No, CheckForCorrectness::Full)?,
        })
    }

    /// The digest identifying this contribution: the hash of the canonical
    /// encoding. Since the encoding starts with the previous transcript
    /// digest, this is the hash chain advancing by one record.
    pub fn compute_digest(&self) -> Result<GenericArray<u8, U64>> {
        let mut encoded = vec![];
        self.write(&mut encoded)?;
        Ok(calculate_hash(&encoded))
    }
}

/// Produces the public key for a contribution of `delta_j` on top of
/// `last_delta_g1`, bound to `transcript_digest`. A key computed for one
/// transcript digest cannot be replayed against any other.
pub fn compute_public_key<E: PairingEngine, R: Rng + CryptoRng>(
    transcript_digest: &GenericArray<u8, U64>,
    last_delta_g1: &E::G1Affine,
    delta_j: &E::Fr,
    rng: &mut R,
) -> Result<PublicKey<E>> {
    if delta_j.is_zero() {
        return Err(Error::DegenerateSecret);
    }

    let s = E::Fr::rand(rng);
    let s_g1 = E::G1Affine::prime_subgroup_generator().mul(s).into_affine();
    let s_delta_j_g1 = s_g1.mul(*delta_j).into_affine();
    let r_g2 = compute_g2_r::<E>(transcript_digest.as_slice(), &s_g1, &s_delta_j_g1)?;

    Ok(PublicKey {
        transcript_digest: transcript_digest.clone(),
        new_delta_g1: last_delta_g1.mul(*delta_j).into_affine(),
        s_g1,
        s_delta_j_g1,
        r_delta_j_g2: r_g2.mul(*delta_j).into_affine(),
    })
}
