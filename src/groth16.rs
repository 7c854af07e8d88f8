//! Groth16 over any pairing-friendly curve.
//!
//! These are the per-curve entry points that [`crate::dispatch`] routes to.

use crate::circuits::{ConstraintSystem, QAP};
use crate::error::{Error, Result};
use crate::helpers::{linear_combination, rand_point, rand_scalar};
use crate::solution::Solution;
use ark_ec::PrimeGroup;
use ark_ec::pairing::Pairing;
use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use itertools::izip;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof<E: Pairing> {
    pub a: E::G1,
    pub b: E::G2,
    pub c: E::G1,
}

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProvingKey<E: Pairing> {
    pub alpha_g1: E::G1,
    pub beta_g1: E::G1,
    pub beta_g2: E::G2,
    pub delta_g1: E::G1,
    pub delta_g2: E::G2,
    /// `[u_i(tau)]_1` for every variable
    pub a_query: Vec<E::G1>,
    /// `[v_i(tau)]_1` for every variable
    pub b_g1_query: Vec<E::G1>,
    /// `[v_i(tau)]_2` for every variable
    pub b_g2_query: Vec<E::G2>,
    /// `[tau^i * t(tau) / delta]_1` for `i < n - 1`
    pub h_query: Vec<E::G1>,
    /// `[(beta * u_i(tau) + alpha * v_i(tau) + w_i(tau)) / delta]_1` for every private variable
    pub l_query: Vec<E::G1>,
}

impl<E: Pairing> ProvingKey<E> {
    fn check_shape(&self, r1cs: &ConstraintSystem<E::ScalarField>) -> Result<()> {
        let num_variables = r1cs.num_variables();
        let expected = [
            ("a_query", self.a_query.len(), num_variables),
            ("b_g1_query", self.b_g1_query.len(), num_variables),
            ("b_g2_query", self.b_g2_query.len(), num_variables),
            (
                "h_query",
                self.h_query.len(),
                r1cs.num_constraints().saturating_sub(1),
            ),
            ("l_query", self.l_query.len(), num_variables - r1cs.num_public()),
        ];
        for (query, found, wanted) in expected {
            if found != wanted {
                return Err(Error::KeyMismatch(format!(
                    "{query} has {found} elements, the constraint system needs {wanted}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct VerifyingKey<E: Pairing> {
    pub alpha_g1: E::G1,
    pub beta_g2: E::G2,
    pub gamma_g2: E::G2,
    pub delta_g2: E::G2,
    /// `[(beta * u_i(tau) + alpha * v_i(tau) + w_i(tau)) / gamma]_1` for `ONE` and each public input
    pub gamma_abc_g1: Vec<E::G1>,
    /// Names looked up in the solution, in the order of `gamma_abc_g1[1..]`
    pub public_inputs: Vec<String>,
}

/// `[tau^0]_1, [tau^1]_1, ...`
fn group_1_srs<E: Pairing>(length: usize, tau: E::ScalarField) -> Vec<E::G1> {
    (0..length)
        .map(|i| E::G1::generator() * tau.pow([i as u64]))
        .collect()
}

/// Runs the trusted setup for `r1cs`, sampling fresh toxic waste.
pub fn setup<E: Pairing>(
    r1cs: &ConstraintSystem<E::ScalarField>,
) -> Result<(ProvingKey<E>, VerifyingKey<E>)> {
    debug!(
        "Starting trusted setup for {} constraints over {} variables",
        r1cs.num_constraints(),
        r1cs.num_variables()
    );
    let qap = QAP::from(r1cs);
    let t = qap.t()?;
    debug!("Derived QAP");

    let mut rng = StdRng::from_os_rng();
    let tau: E::ScalarField = rand_scalar(&mut rng);
    let alpha: E::ScalarField = rand_scalar(&mut rng);
    let beta: E::ScalarField = rand_scalar(&mut rng);
    let gamma: E::ScalarField = rand_scalar(&mut rng);
    let delta: E::ScalarField = rand_scalar(&mut rng);
    let gamma_inverse = E::ScalarField::ONE / gamma;
    let delta_inverse = E::ScalarField::ONE / delta;

    let u_tau: Vec<_> = qap.u.iter().map(|u_i| u_i.evaluate(&tau)).collect();
    let v_tau: Vec<_> = qap.v.iter().map(|v_i| v_i.evaluate(&tau)).collect();
    let w_tau: Vec<_> = qap.w.iter().map(|w_i| w_i.evaluate(&tau)).collect();
    let psi: Vec<E::ScalarField> = izip!(&u_tau, &v_tau, &w_tau)
        .map(|(u_i, v_i, w_i)| beta * u_i + alpha * v_i + w_i)
        .collect();
    debug!("Evaluated QAP at tau");

    let g1 = E::G1::generator();
    let g2 = E::G2::generator();
    let (public, private) = psi.split_at(qap.num_public);

    let t_tau_over_delta = t.evaluate(&tau) * delta_inverse;
    let h_query = group_1_srs::<E>(qap.num_constraints - 1, tau)
        .into_iter()
        .map(|power| power * t_tau_over_delta)
        .collect();
    debug!("Generated h query");

    let pk = ProvingKey {
        alpha_g1: g1 * alpha,
        beta_g1: g1 * beta,
        beta_g2: g2 * beta,
        delta_g1: g1 * delta,
        delta_g2: g2 * delta,
        a_query: u_tau.iter().map(|u_i| g1 * *u_i).collect(),
        b_g1_query: v_tau.iter().map(|v_i| g1 * *v_i).collect(),
        b_g2_query: v_tau.iter().map(|v_i| g2 * *v_i).collect(),
        h_query,
        l_query: private.iter().map(|l_i| g1 * (*l_i * delta_inverse)).collect(),
    };
    let vk = VerifyingKey {
        alpha_g1: pk.alpha_g1,
        beta_g2: pk.beta_g2,
        gamma_g2: g2 * gamma,
        delta_g2: pk.delta_g2,
        gamma_abc_g1: public.iter().map(|ic_i| g1 * (*ic_i * gamma_inverse)).collect(),
        public_inputs: r1cs.public_inputs().to_vec(),
    };
    debug!("Trusted setup complete");
    Ok((pk, vk))
}

/// A proving key of the right shape for `r1cs` filled with unrelated random points.
///
/// Proofs made with it have the right structure but never verify. Benchmarks and tests only.
pub fn dummy_setup<E: Pairing>(r1cs: &ConstraintSystem<E::ScalarField>) -> ProvingKey<E> {
    let mut rng = StdRng::from_os_rng();
    let num_variables = r1cs.num_variables();
    let mut g1_points = |count: usize| -> Vec<E::G1> {
        (0..count).map(|_| rand_point(&mut rng)).collect()
    };
    let a_query = g1_points(num_variables);
    let b_g1_query = g1_points(num_variables);
    let h_query = g1_points(r1cs.num_constraints().saturating_sub(1));
    let l_query = g1_points(num_variables - r1cs.num_public());

    ProvingKey {
        alpha_g1: rand_point(&mut rng),
        beta_g1: rand_point(&mut rng),
        beta_g2: rand_point(&mut rng),
        delta_g1: rand_point(&mut rng),
        delta_g2: rand_point(&mut rng),
        a_query,
        b_g1_query,
        b_g2_query: (0..num_variables).map(|_| rand_point(&mut rng)).collect(),
        h_query,
        l_query,
    }
}

pub fn prove<E: Pairing>(
    r1cs: &ConstraintSystem<E::ScalarField>,
    pk: &ProvingKey<E>,
    solution: &Solution,
) -> Result<Proof<E>> {
    pk.check_shape(r1cs)?;
    let witness = r1cs.solve(solution)?;
    debug!("Solved witness of {} values", witness.len());

    let qap = QAP::from(r1cs);
    let ht = qap.quotient(&witness)?;
    let ht_tau = ht.evaluate_over_srs(&pk.h_query)?;

    let mut rng = StdRng::from_os_rng();
    let r: E::ScalarField = rand_scalar(&mut rng);
    let s: E::ScalarField = rand_scalar(&mut rng);

    let a = pk.alpha_g1 + linear_combination(&pk.a_query, &witness) + pk.delta_g1 * r;
    let b = pk.beta_g2 + linear_combination(&pk.b_g2_query, &witness) + pk.delta_g2 * s;
    let b_1 = pk.beta_g1 + linear_combination(&pk.b_g1_query, &witness) + pk.delta_g1 * s;

    let private_witness = &witness[r1cs.num_public()..];
    let c = linear_combination(&pk.l_query, private_witness) + ht_tau + a * s + b_1 * r
        - pk.delta_g1 * (r * s);
    debug!("Proof generated");
    Ok(Proof { a, b, c })
}

/// Checks `proof` against the public inputs that `vk` names in `solution`.
pub fn verify<E: Pairing>(
    proof: &Proof<E>,
    vk: &VerifyingKey<E>,
    solution: &Solution,
) -> Result<()> {
    let inputs = vk
        .public_inputs
        .iter()
        .map(|name| solution.field_value::<E::ScalarField>(name))
        .collect::<Result<Vec<_>>>()?;
    debug!("Verifying with public inputs: {:?}", inputs);

    let Some((ic_0, ic)) = vk.gamma_abc_g1.split_first() else {
        return Err(Error::KeyMismatch(
            "verifying key has no input commitments".to_string(),
        ));
    };
    if ic.len() != inputs.len() {
        return Err(Error::KeyMismatch(format!(
            "verifying key commits to {} public inputs but names {}",
            ic.len(),
            inputs.len()
        )));
    }
    let x = *ic_0 + linear_combination(ic, &inputs);

    let lhs = E::pairing(proof.a, proof.b);
    let rhs = E::pairing(vk.alpha_g1, vk.beta_g2)
        + E::pairing(x, vk.gamma_g2)
        + E::pairing(proof.c, vk.delta_g2);
    if lhs == rhs {
        Ok(())
    } else {
        debug!("Pairing check failed");
        Err(Error::VerificationFailed)
    }
}
