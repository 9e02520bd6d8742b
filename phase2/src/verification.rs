use super::*;

impl<E: PairingEngine> PublicKey<E> {
    /// Every element lies in the prime-order subgroup.
    pub fn is_well_formed(&self) -> bool {
        check_subgroup(&[self.new_delta_g1, self.s_g1, self.s_delta_j_g1]).is_ok()
            && check_subgroup(&[self.r_delta_j_g2]).is_ok()
    }

    /// Verifies the key against the delta it claims to build on: recomputes
    /// the deterministic `r_g2`, checks the proof-of-knowledge ratio
    /// `s : s*delta_j == r : r*delta_j`, and checks that `new_delta_g1`
    /// scales `last_delta_g1` by that same `delta_j`.
    ///
    /// The caller is responsible for checking that `transcript_digest`
    /// corresponds to the challenge being answered.
    pub fn verify(&self, last_delta_g1: &E::G1Affine) -> Result<()> {
        if !self.is_well_formed() {
            return Err(VerificationError::MalformedElement.into());
        }

        let r_g2 = compute_g2_r::<E>(
            self.transcript_digest.as_slice(),
            &self.s_g1,
            &self.s_delta_j_g1,
        )?;
        let r_check = &(r_g2, self.r_delta_j_g2);

        check_same_ratio::<E>(&(self.s_g1, self.s_delta_j_g1), r_check, "PublicKey: s G1<>G2")?;
        check_same_ratio::<E>(
            &(*last_delta_g1, self.new_delta_g1),
            r_check,
            "PublicKey: delta G1<>G2",
        )?;
        Ok(())
    }
}

impl<E: PairingEngine> Accumulator<E> {
    /// Every element lies in the prime-order subgroup. Fails closed: one bad
    /// element invalidates the whole accumulator.
    pub fn is_well_formed(&self) -> bool {
        check_subgroup(&[self.delta_g1]).is_ok()
            && check_subgroup(&[self.delta_g2]).is_ok()
            && check_subgroup(&self.h_g1).is_ok()
            && check_subgroup(&self.l_g1).is_ok()
    }

    /// Assuming `last` is fully verified and the delta ratio between the two
    /// accumulators is attested by a valid public key, checks that all other
    /// elements of `updated` are correct: `delta_g2` scales like `delta_g1`,
    /// and every H and L term scales by the inverse factor. The scalar itself
    /// is never recovered; everything goes through pairing ratio checks, with
    /// each vector collapsed into a single merged equation.
    ///
    /// Also used on the (initial, final) pair when auditing a whole
    /// transcript, where the factor is the product of every contribution.
    pub fn update_is_consistent(last: &Self, updated: &Self) -> Result<()> {
        let span = info_span!("phase2-consistency");
        let _enter = span.enter();

        if last.cs_hash != updated.cs_hash {
            return Err(VerificationError::InitialHashMismatch.into());
        }
        if last.h_g1.len() != updated.h_g1.len() {
            return Err(Error::InvalidLength {
                expected: last.h_g1.len(),
                got: updated.h_g1.len(),
            });
        }
        if last.l_g1.len() != updated.l_g1.len() {
            return Err(Error::InvalidLength {
                expected: last.l_g1.len(),
                got: updated.l_g1.len(),
            });
        }

        // e(delta_g1, delta_g2') == e(delta_g1', delta_g2): both groups moved
        // by the same factor
        let delta_g2_pair = (last.delta_g2, updated.delta_g2);
        check_same_ratio::<E>(
            &(last.delta_g1, updated.delta_g1),
            &delta_g2_pair,
            "Accumulator: delta G1<>G2",
        )?;

        // e(h', delta_g2') == e(h, delta_g2): the H and L terms moved by the
        // inverse factor
        debug!(
            h = last.h_g1.len(),
            l = last.l_g1.len(),
            "checking vector ratios"
        );
        check_vectors_same_ratio::<E>(
            &updated.h_g1,
            &last.h_g1,
            &delta_g2_pair,
            "Accumulator: H 1/delta",
        )?;
        check_vectors_same_ratio::<E>(
            &updated.l_g1,
            &last.l_g1,
            &delta_g2_pair,
            "Accumulator: L 1/delta",
        )?;

        Ok(())
    }

    /// Full verification of a single contribution: the public key is
    /// self-consistent against `last.delta_g1`, the updated accumulator
    /// carries exactly the delta the key claims, and every other element
    /// moved consistently.
    pub fn verify_update(last: &Self, updated: &Self, publickey: &PublicKey<E>) -> Result<()> {
        let span = info_span!("phase2-verify-update");
        let _enter = span.enter();

        publickey.verify(&last.delta_g1)?;
        if updated.delta_g1 != publickey.new_delta_g1 {
            return Err(VerificationError::DeltaMismatch.into());
        }
        Self::update_is_consistent(last, updated)?;

        info!("contribution verified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::compute_public_key;
    use crate::testing::test_accumulator;
    use ark_bls12_377::Bls12_377;
    use ark_bw6_761::BW6_761;
    use ark_ff::{One, UniformRand};
    use setup_utils::{blank_hash, calculate_hash};

    use rand::thread_rng;

    fn verify_update_test<E: PairingEngine>() {
        let mut rng = thread_rng();
        let digest = blank_hash();
        let last = test_accumulator::<E, _>(8, 6, 2, &mut rng);
        let delta_j = E::Fr::rand(&mut rng);

        let updated = last.update(&delta_j).unwrap();
        let key = compute_public_key::<E, _>(&digest, &last.delta_g1, &delta_j, &mut rng).unwrap();

        Accumulator::verify_update(&last, &updated, &key).unwrap();
    }

    #[test]
    fn test_verify_update_bls12_377() {
        verify_update_test::<Bls12_377>();
    }

    #[test]
    fn test_verify_update_bw6_761() {
        verify_update_test::<BW6_761>();
    }

    #[test]
    fn test_identity_contribution_is_consistent() {
        let mut rng = thread_rng();
        let accumulator = test_accumulator::<Bls12_377, _>(4, 3, 1, &mut rng);
        let updated = accumulator
            .update(&<Bls12_377 as PairingEngine>::Fr::one())
            .unwrap();
        Accumulator::update_is_consistent(&accumulator, &updated).unwrap();
        Accumulator::update_is_consistent(&accumulator, &accumulator).unwrap();
    }

    #[test]
    fn test_tampered_h_element_is_detected() {
        let mut rng = thread_rng();
        let last = test_accumulator::<Bls12_377, _>(8, 6, 2, &mut rng);
        let delta_j = <Bls12_377 as PairingEngine>::Fr::rand(&mut rng);

        let mut updated = last.update(&delta_j).unwrap();
        Accumulator::update_is_consistent(&last, &updated).unwrap();

        updated.h_g1[3] = ark_bls12_377::G1Projective::rand(&mut rng).into_affine();
        assert!(Accumulator::update_is_consistent(&last, &updated).is_err());
    }

    #[test]
    fn test_tampered_l_element_is_detected() {
        let mut rng = thread_rng();
        let last = test_accumulator::<Bls12_377, _>(8, 6, 2, &mut rng);
        let delta_j = <Bls12_377 as PairingEngine>::Fr::rand(&mut rng);

        let mut updated = last.update(&delta_j).unwrap();
        updated.l_g1[1] = ark_bls12_377::G1Projective::rand(&mut rng).into_affine();
        assert!(Accumulator::update_is_consistent(&last, &updated).is_err());
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let mut rng = thread_rng();
        let last = test_accumulator::<Bls12_377, _>(8, 6, 2, &mut rng);
        let delta_j = <Bls12_377 as PairingEngine>::Fr::rand(&mut rng);

        let mut updated = last.update(&delta_j).unwrap();
        updated.h_g1.pop();
        assert!(Accumulator::update_is_consistent(&last, &updated).is_err());
    }

    #[test]
    fn test_replayed_key_is_rejected() {
        let mut rng = thread_rng();
        let last = test_accumulator::<Bls12_377, _>(8, 6, 2, &mut rng);
        let delta_j = <Bls12_377 as PairingEngine>::Fr::rand(&mut rng);

        // key computed for a different transcript digest than the verifier's
        let other_digest = calculate_hash(b"a different challenge");
        let key = compute_public_key::<Bls12_377, _>(
            &other_digest,
            &last.delta_g1,
            &delta_j,
            &mut rng,
        )
        .unwrap();

        // self-consistency still holds under its own digest
        key.verify(&last.delta_g1).unwrap();

        // but a verifier recomputing r_g2 for the expected digest rejects it
        let mut replayed = key.clone();
        replayed.transcript_digest = blank_hash();
        assert!(replayed.verify(&last.delta_g1).is_err());
    }

    #[test]
    fn test_wrong_claimed_delta_is_rejected() {
        let mut rng = thread_rng();
        let last = test_accumulator::<Bls12_377, _>(8, 6, 2, &mut rng);
        let delta_j = <Bls12_377 as PairingEngine>::Fr::rand(&mut rng);

        let updated = last.update(&delta_j).unwrap();
        let mut key =
            compute_public_key::<Bls12_377, _>(&blank_hash(), &last.delta_g1, &delta_j, &mut rng)
                .unwrap();
        key.new_delta_g1 = ark_bls12_377::G1Projective::rand(&mut rng).into_affine();

        assert!(Accumulator::verify_update(&last, &updated, &key).is_err());
    }
}
