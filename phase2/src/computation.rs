use super::*;

impl<E: PairingEngine> Accumulator<E> {
    /// Applies the secret `delta_j` to the accumulator, producing the next
    /// snapshot: both deltas are scaled by `delta_j`, and every H and L term
    /// by its inverse. The input is untouched.
    ///
    /// This is the only operation that sees a contribution secret. The secret
    /// must be destroyed once the response has been produced.
    pub fn update(&self, delta_j: &E::Fr) -> Result<Self> {
        let span = info_span!("phase2-update");
        let _enter = span.enter();

        // a zero delta_j has no inverse and would destroy the SRS terms
        if delta_j.is_zero() {
            return Err(Error::DegenerateSecret);
        }
        let delta_j_inv = delta_j.inverse().ok_or(Error::DegenerateSecret)?;

        info!(
            h = self.h_g1.len(),
            l = self.l_g1.len(),
            "applying contribution"
        );

        let delta_g1 = self.delta_g1.mul(*delta_j).into_affine();
        let delta_g2 = self.delta_g2.mul(*delta_j).into_affine();
        let h_g1 = batch_mul(&self.h_g1, &delta_j_inv);
        let l_g1 = batch_mul(&self.l_g1, &delta_j_inv);

        debug!("contribution applied");

        Ok(Self {
            cs_hash: self.cs_hash.clone(),
            delta_g1,
            delta_g2,
            h_g1,
            l_g1,
        })
    }
}
