use blake2::{Blake2b, Digest};

pub use blake2::digest::generic_array::{typenum::U64, GenericArray};

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;

use std::io::{self, Read, Write};

use crate::Result;

/// Byte length of the BLAKE2b transcript digests used across the ceremony.
pub const DIGEST_SIZE: usize = 64;

/// Domain tag separating the proof-of-knowledge generator derivation from
/// plain transcript hashing.
const POK_PERSONALIZATION: u8 = 0;

/// BLAKE2b-512 of the input bytes.
pub fn calculate_hash(input: &[u8]) -> GenericArray<u8, U64> {
    Blake2b::digest(input)
}

/// BLAKE2b-512 of the empty string. Transcripts start from this digest.
pub fn blank_hash() -> GenericArray<u8, U64> {
    Blake2b::digest(&[])
}

/// Interprets a digest as a scalar by little-endian reduction modulo the
/// field order.
pub fn fr_from_digest<F: PrimeField>(digest: &[u8]) -> F {
    F::from_le_bytes_mod_order(digest)
}

/// Derives the second generator of the proof-of-knowledge: the pair
/// `(s_g1, s_delta_g1)` and the transcript digest are hashed under a distinct
/// domain tag, the digest is mapped to a scalar `r`, and `r * g2` is returned.
///
/// The verifier recomputes this value with the same inputs, so the derivation
/// must match the contributor's bit for bit.
pub fn compute_g2_r<E: PairingEngine>(
    digest: &[u8],
    s_g1: &E::G1Affine,
    s_delta_g1: &E::G1Affine,
) -> Result<E::G2Affine> {
    let mut hasher = Blake2b::new();
    hasher.update(&[POK_PERSONALIZATION]);
    hasher.update(digest);
    let mut encoded = vec![];
    s_g1.serialize_uncompressed(&mut encoded)?;
    s_delta_g1.serialize_uncompressed(&mut encoded)?;
    hasher.update(&encoded);

    let r = fr_from_digest::<E::Fr>(hasher.finalize().as_slice());
    Ok(E::G2Affine::prime_subgroup_generator().mul(r).into_affine())
}

/// Wraps a writer and hashes every byte passing through it.
pub struct HashWriter<W: Write> {
    writer: W,
    hasher: Blake2b,
}

impl<W: Write> HashWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            hasher: Blake2b::new(),
        }
    }

    /// Consumes the wrapper and returns the digest of the bytes written.
    pub fn into_hash(self) -> GenericArray<u8, U64> {
        self.hasher.finalize()
    }
}

impl<W: Write> Write for HashWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.writer.write(buf)?;
        self.hasher.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Wraps a reader and hashes every byte passing through it.
pub struct HashReader<R: Read> {
    reader: R,
    hasher: Blake2b,
}

impl<R: Read> HashReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            hasher: Blake2b::new(),
        }
    }

    /// Consumes the wrapper and returns the digest of the bytes read.
    pub fn into_hash(self) -> GenericArray<u8, U64> {
        self.hasher.finalize()
    }
}

impl<R: Read> Read for HashReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.reader.read(buf)?;
        self.hasher.update(&buf[..read]);
        Ok(read)
    }
}
