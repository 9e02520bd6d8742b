#[cfg(feature = "parallel")]
use rayon::prelude::*;

use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{UniformRand, Zero};

use rand::thread_rng;

use crate::{Error, Result, VerificationError};

/// Checks via a pairing that both pairs encode the same scalar ratio, i.e.
/// `e(g1.0, g2.1) == e(g1.1, g2.0)`, without recovering the scalar.
pub fn check_same_ratio<E: PairingEngine>(
    g1: &(E::G1Affine, E::G1Affine),
    g2: &(E::G2Affine, E::G2Affine),
    err: &'static str,
) -> Result<()> {
    if E::pairing(g1.0, g2.1) != E::pairing(g1.1, g2.0) {
        return Err(Error::VerificationFailed(VerificationError::InvalidRatio(
            err,
        )));
    }
    Ok(())
}

/// Collapses two equal-length windows into a single pair by taking a random
/// linear combination of each with shared coefficients.
///
/// The resulting pair has a common scalar ratio iff every `lhs[i]`/`rhs[i]`
/// pair has that ratio, except with negligible probability over the sampled
/// coefficients, so one pairing check covers the whole vector.
pub fn merge_pairs<C: AffineCurve>(lhs: &[C], rhs: &[C]) -> Result<(C, C)> {
    if lhs.len() != rhs.len() {
        return Err(Error::InvalidLength {
            expected: lhs.len(),
            got: rhs.len(),
        });
    }
    let mut rng = thread_rng();
    let coeffs = (0..lhs.len())
        .map(|_| C::ScalarField::rand(&mut rng))
        .collect::<Vec<_>>();

    #[cfg(feature = "parallel")]
    let s1 = lhs
        .par_iter()
        .zip(coeffs.par_iter())
        .map(|(el, coeff)| el.mul(*coeff))
        .reduce(C::Projective::zero, |a, b| a + b);
    #[cfg(not(feature = "parallel"))]
    let s1 = lhs
        .iter()
        .zip(coeffs.iter())
        .map(|(el, coeff)| el.mul(*coeff))
        .fold(C::Projective::zero(), |a, b| a + b);

    #[cfg(feature = "parallel")]
    let s2 = rhs
        .par_iter()
        .zip(coeffs.par_iter())
        .map(|(el, coeff)| el.mul(*coeff))
        .reduce(C::Projective::zero, |a, b| a + b);
    #[cfg(not(feature = "parallel"))]
    let s2 = rhs
        .iter()
        .zip(coeffs.iter())
        .map(|(el, coeff)| el.mul(*coeff))
        .fold(C::Projective::zero(), |a, b| a + b);

    Ok((s1.into_affine(), s2.into_affine()))
}

/// Checks that every `lhs[i]`/`rhs[i]` pair shares the ratio encoded by the
/// `check` pair, using a single merged pairing equation.
pub fn check_vectors_same_ratio<E: PairingEngine>(
    lhs: &[E::G1Affine],
    rhs: &[E::G1Affine],
    check: &(E::G2Affine, E::G2Affine),
    err: &'static str,
) -> Result<()> {
    check_same_ratio::<E>(&merge_pairs(lhs, rhs)?, check, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_377::{Bls12_377, Fr, G1Projective, G2Affine};
    use ark_ec::ProjectiveCurve;
    use crate::batch_mul;
    use rand::thread_rng;

    #[test]
    fn test_check_same_ratio() {
        let mut rng = thread_rng();
        let k = Fr::rand(&mut rng);
        let g1 = G1Projective::rand(&mut rng).into_affine();
        let g2 = G2Affine::prime_subgroup_generator();
        check_same_ratio::<Bls12_377>(
            &(g1, g1.mul(k).into_affine()),
            &(g2, g2.mul(k).into_affine()),
            "same k",
        )
        .unwrap();

        let other = Fr::rand(&mut rng);
        let res = check_same_ratio::<Bls12_377>(
            &(g1, g1.mul(k).into_affine()),
            &(g2, g2.mul(other).into_affine()),
            "different k",
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_merged_vector_ratio_check() {
        let mut rng = thread_rng();
        let k = Fr::rand(&mut rng);
        let lhs = (0..16)
            .map(|_| G1Projective::rand(&mut rng).into_affine())
            .collect::<Vec<_>>();
        let mut rhs = batch_mul(&lhs, &k);

        let g2 = G2Affine::prime_subgroup_generator();
        let check = (g2, g2.mul(k).into_affine());
        check_vectors_same_ratio::<Bls12_377>(&lhs, &rhs, &check, "vector k").unwrap();

        // a single tampered entry must break the merged check
        rhs[7] = G1Projective::rand(&mut rng).into_affine();
        let res = check_vectors_same_ratio::<Bls12_377>(&lhs, &rhs, &check, "tampered");
        assert!(res.is_err());
    }

    #[test]
    fn test_merge_pairs_rejects_length_mismatch() {
        let mut rng = thread_rng();
        let lhs = (0..4)
            .map(|_| G1Projective::rand(&mut rng).into_affine())
            .collect::<Vec<_>>();
        assert!(merge_pairs(&lhs, &lhs[..3]).is_err());
    }
}
