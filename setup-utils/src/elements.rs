#[cfg(feature = "parallel")]
use rayon::prelude::*;

use ark_ec::{AffineCurve, ProjectiveCurve};
use ark_ff::{FpParameters, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::cfg_iter;

use std::fmt;
use std::io::{Read, Write};

use crate::{Error, Result};

/// Determines if point compression should be used.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum UseCompression {
    Yes,
    No,
}

impl fmt::Display for UseCompression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UseCompression::Yes => write!(f, "Yes"),
            UseCompression::No => write!(f, "No"),
        }
    }
}

/// Determines if points should be validated (curve membership and prime-order
/// subgroup) while being read. Compressed points are always validated, since
/// decompression must solve for a curve point anyway.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CheckForCorrectness {
    Full,
    No,
}

impl fmt::Display for CheckForCorrectness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CheckForCorrectness::Full => write!(f, "Full"),
            CheckForCorrectness::No => write!(f, "No"),
        }
    }
}

/// Writes a single element in its canonical encoding.
pub fn write_element<G: CanonicalSerialize, W: Write>(
    writer: &mut W,
    element: &G,
    compressed: UseCompression,
) -> Result<()> {
    match compressed {
        UseCompression::Yes => element.serialize(writer)?,
        UseCompression::No => element.serialize_uncompressed(writer)?,
    };
    Ok(())
}

/// Reads a single element from its canonical encoding.
pub fn read_element<G: CanonicalDeserialize, R: Read>(
    reader: &mut R,
    compressed: UseCompression,
    check_for_correctness: CheckForCorrectness,
) -> Result<G> {
    let element = match (compressed, check_for_correctness) {
        (UseCompression::Yes, _) => G::deserialize(reader)?,
        (UseCompression::No, CheckForCorrectness::Full) => G::deserialize_uncompressed(reader)?,
        (UseCompression::No, CheckForCorrectness::No) => G::deserialize_unchecked(reader)?,
    };
    Ok(element)
}

/// Writes a vector of elements, prefixed by its little-endian u64 length.
pub fn write_vec<G: CanonicalSerialize, W: Write>(
    writer: &mut W,
    elements: &[G],
    compressed: UseCompression,
) -> Result<()> {
    writer.write_all(&(elements.len() as u64).to_le_bytes())?;
    for element in elements {
        write_element(writer, element, compressed)?;
    }
    Ok(())
}

/// Reads a length-prefixed vector of elements written by `write_vec`.
pub fn read_vec<G: CanonicalDeserialize, R: Read>(
    reader: &mut R,
    compressed: UseCompression,
    check_for_correctness: CheckForCorrectness,
) -> Result<Vec<G>> {
    let mut length = [0u8; 8];
    reader.read_exact(&mut length)?;
    let length = u64::from_le_bytes(length) as usize;
    let mut elements = Vec::with_capacity(length);
    for _ in 0..length {
        elements.push(read_element(reader, compressed, check_for_correctness)?);
    }
    Ok(elements)
}

/// Multiplies every element of the slice by the scalar field order, which must
/// yield the identity for members of the prime-order subgroup.
pub fn check_subgroup<C: AffineCurve>(elements: &[C]) -> Result<()> {
    let modulus = <C::ScalarField as PrimeField>::Params::MODULUS;
    match cfg_iter!(elements).all(|p| p.mul(modulus).is_zero()) {
        true => Ok(()),
        false => Err(Error::IncorrectSubgroup),
    }
}

/// Multiplies every element of the slice by the same scalar, returning the
/// batch-normalized affine results.
pub fn batch_mul<C: AffineCurve>(elements: &[C], coeff: &C::ScalarField) -> Vec<C> {
    let scaled = cfg_iter!(elements).map(|el| el.mul(*coeff)).collect::<Vec<_>>();
    C::Projective::batch_normalization_into_affine(&scaled)
}
