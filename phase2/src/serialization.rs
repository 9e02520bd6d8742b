use super::*;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde_json::{json, Value};

use std::io::{Read, Write};

impl<E: PairingEngine> Accumulator<E> {
    /// Writes the accumulator in its canonical byte encoding: the initial
    /// state hash, both deltas, then the length-prefixed H and L vectors.
    pub fn write<W: Write>(&self, writer: &mut W, compressed: UseCompression) -> Result<()> {
        writer.write_all(self.cs_hash.as_slice())?;
        write_element(writer, &self.delta_g1, compressed)?;
        write_element(writer, &self.delta_g2, compressed)?;
        write_vec(writer, &self.h_g1, compressed)?;
        write_vec(writer, &self.l_g1, compressed)?;
        Ok(())
    }

    /// Reads an accumulator written by [`Accumulator::write`].
    pub fn read<R: Read>(
        reader: &mut R,
        compressed: UseCompression,
        check_for_correctness: CheckForCorrectness,
    ) -> Result<Self> {
        let mut cs_hash = GenericArray::<u8, U64>::default();
        reader.read_exact(cs_hash.as_mut_slice())?;
        Ok(Self {
            cs_hash,
            delta_g1: read_element(reader, compressed, check_for_correctness)?,
            delta_g2: read_element(reader, compressed, check_for_correctness)?,
            h_g1: read_vec(reader, compressed, check_for_correctness)?,
            l_g1: read_vec(reader, compressed, check_for_correctness)?,
        })
    }

    /// The human-auditable JSON form: every element hex-encoded from its
    /// uncompressed canonical bytes. Display and debugging only - transcript
    /// digests are always computed over the byte encoding.
    pub fn to_json(&self) -> Result<Value> {
        Ok(json!({
            "cs_hash": hex::encode(self.cs_hash.as_slice()),
            "delta_g1": element_to_hex(&self.delta_g1)?,
            "delta_g2": element_to_hex(&self.delta_g2)?,
            "h_g1": elements_to_hex(&self.h_g1)?,
            "l_g1": elements_to_hex(&self.l_g1)?,
        }))
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            cs_hash: json_digest(value, "cs_hash")?,
            delta_g1: json_element(value, "delta_g1")?,
            delta_g2: json_element(value, "delta_g2")?,
            h_g1: json_element_vec(value, "h_g1")?,
            l_g1: json_element_vec(value, "l_g1")?,
        })
    }

    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_json()?)?;
        Ok(())
    }

    pub fn read_json<R: Read>(reader: &mut R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json(&value)
    }
}

impl<E: PairingEngine> PublicKey<E> {
    pub fn to_json(&self) -> Result<Value> {
        Ok(json!({
            "transcript_digest": hex::encode(self.transcript_digest.as_slice()),
            "new_delta_g1": element_to_hex(&self.new_delta_g1)?,
            "s_g1": element_to_hex(&self.s_g1)?,
            "s_delta_j_g1": element_to_hex(&self.s_delta_j_g1)?,
            "r_delta_j_g2": element_to_hex(&self.r_delta_j_g2)?,
        }))
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self {
            transcript_digest: json_digest(value, "transcript_digest")?,
            new_delta_g1: json_element(value, "new_delta_g1")?,
            s_g1: json_element(value, "s_g1")?,
            s_delta_j_g1: json_element(value, "s_delta_j_g1")?,
            r_delta_j_g2: json_element(value, "r_delta_j_g2")?,
        })
    }

    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_json()?)?;
        Ok(())
    }

    pub fn read_json<R: Read>(reader: &mut R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json(&value)
    }
}

fn element_to_hex<G: CanonicalSerialize>(element: &G) -> Result<String> {
    let mut bytes = vec![];
    element.serialize_uncompressed(&mut bytes)?;
    Ok(hex::encode(bytes))
}

fn elements_to_hex<G: CanonicalSerialize>(elements: &[G]) -> Result<Vec<String>> {
    elements.iter().map(element_to_hex).collect()
}

fn element_from_hex<G: CanonicalDeserialize>(encoded: &str) -> Result<G> {
    let bytes = hex::decode(encoded)?;
    Ok(G::deserialize_uncompressed(&bytes[..])?)
}

fn json_field<'a>(value: &'a Value, key: &'static str) -> Result<&'a Value> {
    value.get(key).ok_or(Error::InvalidJson(key))
}

fn json_str<'a>(value: &'a Value, key: &'static str) -> Result<&'a str> {
    json_field(value, key)?
        .as_str()
        .ok_or(Error::InvalidJson(key))
}

fn json_element<G: CanonicalDeserialize>(value: &Value, key: &'static str) -> Result<G> {
    element_from_hex(json_str(value, key)?)
}

fn json_element_vec<G: CanonicalDeserialize>(value: &Value, key: &'static str) -> Result<Vec<G>> {
    json_field(value, key)?
        .as_array()
        .ok_or(Error::InvalidJson(key))?
        .iter()
        .map(|entry| element_from_hex(entry.as_str().ok_or(Error::InvalidJson(key))?))
        .collect()
}

fn json_digest(value: &Value, key: &'static str) -> Result<GenericArray<u8, U64>> {
    let bytes = hex::decode(json_str(value, key)?)?;
    if bytes.len() != setup_utils::DIGEST_SIZE {
        return Err(Error::InvalidLength {
            expected: setup_utils::DIGEST_SIZE,
            got: bytes.len(),
        });
    }
    Ok(GenericArray::clone_from_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::compute_public_key;
    use crate::testing::test_accumulator;
    use ark_bls12_377::Bls12_377;
    use ark_bw6_761::BW6_761;
    use ark_ff::UniformRand;
    use setup_utils::blank_hash;

    use rand::thread_rng;

    fn accumulator_roundtrip_test<E: PairingEngine>() {
        let mut rng = thread_rng();
        let accumulator = test_accumulator::<E, _>(6, 4, 1, &mut rng);

        for compressed in &[UseCompression::Yes, UseCompression::No] {
            let mut encoded = vec![];
            accumulator.write(&mut encoded, *compressed).unwrap();
            let deserialized =
                Accumulator::<E>::read(&mut &encoded[..], *compressed, CheckForCorrectness::Full)
                    .unwrap();
            assert_eq!(deserialized, accumulator);
        }
    }

    #[test]
    fn test_accumulator_roundtrip_bls12_377() {
        accumulator_roundtrip_test::<Bls12_377>();
    }

    #[test]
    fn test_accumulator_roundtrip_bw6_761() {
        accumulator_roundtrip_test::<BW6_761>();
    }

    #[test]
    fn test_accumulator_json_roundtrip() {
        let mut rng = thread_rng();
        let accumulator = test_accumulator::<Bls12_377, _>(6, 4, 1, &mut rng);

        let mut encoded = vec![];
        accumulator.write_json(&mut encoded).unwrap();
        let deserialized = Accumulator::<Bls12_377>::read_json(&mut &encoded[..]).unwrap();
        assert_eq!(deserialized, accumulator);
    }

    #[test]
    fn test_publickey_json_roundtrip() {
        let mut rng = thread_rng();
        let delta_j = <Bls12_377 as PairingEngine>::Fr::rand(&mut rng);
        let key = compute_public_key::<Bls12_377, _>(
            &blank_hash(),
            &<Bls12_377 as PairingEngine>::G1Affine::prime_subgroup_generator(),
            &delta_j,
            &mut rng,
        )
        .unwrap();

        let mut encoded = vec![];
        key.write_json(&mut encoded).unwrap();
        let deserialized = PublicKey::<Bls12_377>::read_json(&mut &encoded[..]).unwrap();
        assert_eq!(deserialized, key);
    }

    #[test]
    fn test_truncated_accumulator_is_rejected() {
        let mut rng = thread_rng();
        let accumulator = test_accumulator::<Bls12_377, _>(6, 4, 1, &mut rng);

        let mut encoded = vec![];
        accumulator.write(&mut encoded, UseCompression::No).unwrap();
        encoded.truncate(encoded.len() - 7);
        let res = Accumulator::<Bls12_377>::read(
            &mut &encoded[..],
            UseCompression::No,
            CheckForCorrectness::Full,
        );
        assert!(res.is_err());
    }
}
