//! Streaming verification of a full transcript of contributions.

use ark_ec::PairingEngine;

use setup_utils::{Error, GenericArray, Result, VerificationError, U64};
use tracing::{debug, info, info_span};

use crate::keypair::PublicKey;

use std::io::{self, Read};

/// Outcome of a successful transcript verification: the running state after
/// the last record, plus the result of the optional contribution search.
#[derive(Debug)]
pub struct TranscriptSummary<E: PairingEngine> {
    /// The delta encoding after every contribution, i.e. the product of all
    /// contributed secrets applied to the initial delta.
    pub final_delta_g1: E::G1Affine,
    /// The transcript digest after the last contribution.
    pub final_digest: GenericArray<u8, U64>,
    /// Number of contributions processed.
    pub contributions: usize,
    /// Whether a record matching the searched-for digest was seen. Always
    /// false when no search was requested.
    pub contribution_found: bool,
}

/// Verifies a transcript of public-key records read as a stream.
///
/// The transcript is the concatenation of the canonical encodings of every
/// contribution's public key. Each record must chain to the digest before it
/// and carry a valid proof-of-knowledge against the running delta; only the
/// constant-size state `(digest, delta_g1)` is held in memory, so transcripts
/// with thousands of contributions verify without being materialized.
///
/// Note that this checks the delta chain only. The H and L vectors are
/// validated separately by the caller, comparing the initial and final
/// accumulators under the aggregate ratio via
/// [`Accumulator::update_is_consistent`](crate::Accumulator::update_is_consistent).
///
/// If `check_for_contribution` is given, the summary reports whether any
/// record's digest matched it. Verification is fail-fast: the first invalid
/// record aborts with its index.
pub fn verify_transcript<E: PairingEngine, R: Read>(
    initial_digest: &GenericArray<u8, U64>,
    initial_delta_g1: &E::G1Affine,
    mut reader: R,
    check_for_contribution: Option<&GenericArray<u8, U64>>,
) -> Result<TranscriptSummary<E>> {
    let span = info_span!("phase2-verify-transcript");
    let _enter = span.enter();

    let mut current_digest = initial_digest.clone();
    let mut current_delta_g1 = *initial_delta_g1;
    let mut contributions = 0;
    let mut contribution_found = false;

    while let Some(record_digest) = read_digest_or_eof(&mut reader)? {
        debug!(contribution = contributions, "verifying record");

        let publickey = PublicKey::<E>::read_after_digest(&mut reader, record_digest)?;
        if publickey.transcript_digest != current_digest {
            return Err(Error::InvalidContribution {
                index: contributions,
                source: VerificationError::DigestMismatch,
            });
        }
        publickey
            .verify(&current_delta_g1)
            .map_err(|e| at_contribution(contributions, e))?;

        let digest = publickey.compute_digest()?;
        if let Some(check) = check_for_contribution {
            if digest == *check {
                contribution_found = true;
            }
        }
        current_digest = digest;
        current_delta_g1 = publickey.new_delta_g1;
        contributions += 1;
    }

    info!(contributions, "transcript verified");
    Ok(TranscriptSummary {
        final_delta_g1: current_delta_g1,
        final_digest: current_digest,
        contributions,
        contribution_found,
    })
}

/// Attaches the failing contribution's index to a verification failure.
/// IO and serialization errors pass through untouched.
fn at_contribution(index: usize, error: Error) -> Error {
    match error {
        Error::VerificationFailed(source) => Error::InvalidContribution { index, source },
        other => other,
    }
}

/// Reads the 64-byte digest opening the next record, or `None` on a clean
/// end-of-stream at a record boundary. An end-of-stream mid-digest is a
/// truncated transcript and surfaces as an IO error.
fn read_digest_or_eof<R: Read>(reader: &mut R) -> Result<Option<GenericArray<u8, U64>>> {
    let mut bytes = [0u8; 64];
    let mut filled = 0;
    while filled < bytes.len() {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
            Ok(read) => filled += read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Some(GenericArray::clone_from_slice(&bytes)))
}
