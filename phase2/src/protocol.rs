//! Challenge and response envelopes exchanged between the coordinator and
//! the contributors.

use ark_ec::PairingEngine;
use rand::{CryptoRng, Rng};

use setup_utils::{
    blank_hash, CheckForCorrectness, GenericArray, Result, UseCompression, VerificationError, U64,
};
use tracing::{info, info_span};

use crate::keypair::{compute_public_key, PublicKey};
use crate::Accumulator;

use std::io::{Read, Write};

/// Challenges ship the full accumulator uncompressed so contributors can
/// start working without a decompression pass.
pub const COMPRESS_CHALLENGE: UseCompression = UseCompression::No;
/// Responses travel back compressed to halve the upload.
pub const COMPRESS_RESPONSE: UseCompression = UseCompression::Yes;

/// What a contributor receives: the current transcript digest and the
/// accumulator to apply a secret to.
#[derive(Debug)]
pub struct Challenge<E: PairingEngine> {
    pub transcript_digest: GenericArray<u8, U64>,
    pub accumulator: Accumulator<E>,
}

impl<E: PairingEngine> PartialEq for Challenge<E> {
    fn eq(&self, other: &Self) -> bool {
        self.transcript_digest == other.transcript_digest && self.accumulator == other.accumulator
    }
}

impl<E: PairingEngine> Clone for Challenge<E> {
    fn clone(&self) -> Self {
        Self {
            transcript_digest: self.transcript_digest.clone(),
            accumulator: self.accumulator.clone(),
        }
    }
}

impl<E: PairingEngine> Challenge<E> {
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.transcript_digest.as_slice())?;
        self.accumulator.write(writer, COMPRESS_CHALLENGE)?;
        Ok(())
    }

    pub fn read<R: Read>(reader: &mut R, check_for_correctness: CheckForCorrectness) -> Result<Self> {
        let mut transcript_digest = GenericArray::<u8, U64>::default();
        reader.read_exact(transcript_digest.as_mut_slice())?;
        Ok(Self {
            transcript_digest,
            accumulator: Accumulator::read(reader, COMPRESS_CHALLENGE, check_for_correctness)?,
        })
    }

    pub fn is_well_formed(&self) -> bool {
        self.accumulator.is_well_formed()
    }
}

/// What a contributor returns: the updated accumulator and the public key
/// attesting the contribution.
#[derive(Debug)]
pub struct Response<E: PairingEngine> {
    pub accumulator: Accumulator<E>,
    pub publickey: PublicKey<E>,
}

impl<E: PairingEngine> PartialEq for Response<E> {
    fn eq(&self, other: &Self) -> bool {
        self.accumulator == other.accumulator && self.publickey == other.publickey
    }
}

impl<E: PairingEngine> Clone for Response<E> {
    fn clone(&self) -> Self {
        Self {
            accumulator: self.accumulator.clone(),
            publickey: self.publickey.clone(),
        }
    }
}

impl<E: PairingEngine> Response<E> {
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.accumulator.write(writer, COMPRESS_RESPONSE)?;
        self.publickey.write(writer)?;
        Ok(())
    }

    pub fn read<R: Read>(reader: &mut R, check_for_correctness: CheckForCorrectness) -> Result<Self> {
        Ok(Self {
            accumulator: Accumulator::read(reader, COMPRESS_RESPONSE, check_for_correctness)?,
            publickey: PublicKey::read(reader)?,
        })
    }

    pub fn is_well_formed(&self) -> bool {
        self.accumulator.is_well_formed() && self.publickey.is_well_formed()
    }
}

/// Wraps the initial accumulator into the first challenge. The transcript
/// starts from the hash of the empty string.
pub fn initial_challenge<E: PairingEngine>(accumulator: Accumulator<E>) -> Challenge<E> {
    Challenge {
        transcript_digest: blank_hash(),
        accumulator,
    }
}

/// The contributor side of one round: computes the public key for `delta_j`
/// against the challenge digest, and applies `delta_j` to the accumulator.
pub fn compute_response<E: PairingEngine, R: Rng + CryptoRng>(
    challenge: &Challenge<E>,
    delta_j: &E::Fr,
    rng: &mut R,
) -> Result<Response<E>> {
    let span = info_span!("phase2-contribute");
    let _enter = span.enter();

    let publickey = compute_public_key::<E, _>(
        &challenge.transcript_digest,
        &challenge.accumulator.delta_g1,
        delta_j,
        rng,
    )?;
    let accumulator = challenge.accumulator.update(delta_j)?;

    info!("response computed");
    Ok(Response {
        accumulator,
        publickey,
    })
}

/// Verifies a response against the challenge it answers: the public key must
/// be bound to the challenge digest, and the claimed update must hold.
pub fn verify_response<E: PairingEngine>(
    challenge: &Challenge<E>,
    response: &Response<E>,
) -> Result<()> {
    if response.publickey.transcript_digest != challenge.transcript_digest {
        return Err(VerificationError::DigestMismatch.into());
    }
    Accumulator::verify_update(
        &challenge.accumulator,
        &response.accumulator,
        &response.publickey,
    )
}

/// Turns a verified response into the challenge for the next contributor.
/// The transcript digest advances to the digest of the appended public key.
pub fn compute_challenge<E: PairingEngine>(response: Response<E>) -> Result<Challenge<E>> {
    Ok(Challenge {
        transcript_digest: response.publickey.compute_digest()?,
        accumulator: response.accumulator,
    })
}
