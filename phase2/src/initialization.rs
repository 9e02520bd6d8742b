use super::*;

use std::io::{Read, Write};

/// Output of the linear-combination layer that feeds Phase 2, reduced to the
/// two vectors the MPC operates on. Produced by earlier stages of the
/// ceremony and treated as opaque input here.
#[derive(Debug)]
pub struct LayerL1<E: PairingEngine> {
    /// { [ t(x) . x^i ]_1 }, one entry per power up to the circuit degree
    /// minus two.
    pub h_g1: Vec<E::G1Affine>,
    /// { [ beta . A_j(x) + alpha . B_j(x) + C_j(x) ]_1 }, one entry per
    /// variable including the constant one.
    pub l_g1: Vec<E::G1Affine>,
}

impl<E: PairingEngine> PartialEq for LayerL1<E> {
    fn eq(&self, other: &Self) -> bool {
        self.h_g1 == other.h_g1 && self.l_g1 == other.l_g1
    }
}

impl<E: PairingEngine> Clone for LayerL1<E> {
    fn clone(&self) -> Self {
        Self {
            h_g1: self.h_g1.clone(),
            l_g1: self.l_g1.clone(),
        }
    }
}

impl<E: PairingEngine> LayerL1<E> {
    pub fn write<W: Write>(&self, writer: &mut W, compressed: UseCompression) -> Result<()> {
        write_vec(writer, &self.h_g1, compressed)?;
        write_vec(writer, &self.l_g1, compressed)?;
        Ok(())
    }

    pub fn read<R: Read>(
        reader: &mut R,
        compressed: UseCompression,
        check_for_correctness: CheckForCorrectness,
    ) -> Result<Self> {
        Ok(Self {
            h_g1: read_vec(reader, compressed, check_for_correctness)?,
            l_g1: read_vec(reader, compressed, check_for_correctness)?,
        })
    }

    pub fn is_well_formed(&self) -> bool {
        check_subgroup(&self.h_g1).is_ok() && check_subgroup(&self.l_g1).is_ok()
    }
}

impl<E: PairingEngine> Accumulator<E> {
    /// Builds the starting accumulator from the linear-combination output.
    /// Both deltas are the group generators (the identity scaling), the H
    /// terms are taken whole, and the L terms are restricted to the
    /// non-public variables - the MPC never touches the terms for public
    /// inputs.
    pub fn begin(
        cs_hash: &GenericArray<u8, U64>,
        layer_l1: &LayerL1<E>,
        num_inputs: usize,
    ) -> Result<Self> {
        if layer_l1.l_g1.len() < num_inputs + 1 {
            return Err(Error::InvalidLength {
                expected: num_inputs + 1,
                got: layer_l1.l_g1.len(),
            });
        }
        info!(
            h = layer_l1.h_g1.len(),
            l = layer_l1.l_g1.len() - num_inputs - 1,
            "building initial accumulator"
        );
        Ok(Self {
            cs_hash: cs_hash.clone(),
            delta_g1: E::G1Affine::prime_subgroup_generator(),
            delta_g2: E::G2Affine::prime_subgroup_generator(),
            h_g1: layer_l1.h_g1.clone(),
            l_g1: layer_l1.l_g1[num_inputs + 1..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::random_layer_l1;
    use ark_bls12_377::Bls12_377;
    use setup_utils::blank_hash;

    use rand::thread_rng;

    #[test]
    fn test_begin_slices_public_inputs() {
        let mut rng = thread_rng();
        // degree 8 circuit: 7 H terms; 6 variables plus the constant one
        let layer_l1 = random_layer_l1::<Bls12_377, _>(8, 6, &mut rng);
        let num_inputs = 2;

        let accumulator = Accumulator::begin(&blank_hash(), &layer_l1, num_inputs).unwrap();
        assert_eq!(accumulator.h_g1.len(), 7);
        assert_eq!(accumulator.l_g1.len(), 6 - num_inputs);
        assert_eq!(
            accumulator.delta_g1,
            <Bls12_377 as PairingEngine>::G1Affine::prime_subgroup_generator()
        );
        assert_eq!(
            accumulator.delta_g2,
            <Bls12_377 as PairingEngine>::G2Affine::prime_subgroup_generator()
        );
        assert_eq!(&accumulator.l_g1[..], &layer_l1.l_g1[num_inputs + 1..]);
    }

    #[test]
    fn test_layer_l1_roundtrip() {
        let mut rng = thread_rng();
        let layer_l1 = random_layer_l1::<Bls12_377, _>(6, 4, &mut rng);
        assert!(layer_l1.is_well_formed());

        for compressed in &[UseCompression::Yes, UseCompression::No] {
            let mut encoded = vec![];
            layer_l1.write(&mut encoded, *compressed).unwrap();
            let deserialized = LayerL1::<Bls12_377>::read(
                &mut &encoded[..],
                *compressed,
                CheckForCorrectness::Full,
            )
            .unwrap();
            assert_eq!(deserialized, layer_l1);
        }
    }

    #[test]
    fn test_begin_rejects_short_l_terms() {
        let mut rng = thread_rng();
        let layer_l1 = random_layer_l1::<Bls12_377, _>(4, 2, &mut rng);
        // only 3 L terms available, so 3 declared inputs cannot fit
        let res = Accumulator::begin(&blank_hash(), &layer_l1, 3);
        assert!(res.is_err());
    }
}
