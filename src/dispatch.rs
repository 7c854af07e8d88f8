//! Curve-agnostic Setup / DummySetup / Prove / Verify.
//!
//! Every entry point matches on the curve tag of its inputs and hands the
//! unwrapped concrete artifacts to the [`groth16`] backend for that curve. Inputs
//! from different curves are rejected by comparing tags before anything is
//! unwrapped.

use crate::artifacts::{Proof, ProvingKey, R1CS, VerifyingKey};
use crate::error::{Error, Result};
use crate::groth16;
use crate::registry::for_each_curve;
use crate::solution::Solution;
use log::debug;

macro_rules! dispatch {
    ($($feature:literal => $variant:ident($engine:ty)),* $(,)?) => {
        /// Runs the trusted setup for the curve `r1cs` was compiled for.
        pub fn setup(r1cs: &R1CS) -> Result<(ProvingKey, VerifyingKey)> {
            debug!("setup on {}", r1cs.curve());
            match r1cs {
                $(
                    #[cfg(feature = $feature)]
                    R1CS::$variant(r1cs) => {
                        let (pk, vk) = groth16::setup::<$engine>(r1cs)?;
                        Ok((ProvingKey::$variant(pk), VerifyingKey::$variant(vk)))
                    }
                )*
            }
        }

        /// Produces a random proving key with the right shape for `r1cs`.
        ///
        /// It has no matching verifying key and must never stand in for a real
        /// key; it exists for benchmarks and tests.
        pub fn dummy_setup(r1cs: &R1CS) -> ProvingKey {
            debug!("dummy setup on {}", r1cs.curve());
            match r1cs {
                $(
                    #[cfg(feature = $feature)]
                    R1CS::$variant(r1cs) => {
                        ProvingKey::$variant(groth16::dummy_setup::<$engine>(r1cs))
                    }
                )*
            }
        }

        /// Proves that `solution` satisfies `r1cs` under `pk`.
        ///
        /// `pk` must come from the same curve as `r1cs`, otherwise
        /// [`Error::CurveMismatch`] is returned.
        pub fn prove(r1cs: &R1CS, pk: &ProvingKey, solution: &Solution) -> Result<Proof> {
            debug!("prove on {}", r1cs.curve());
            match (r1cs, pk) {
                $(
                    #[cfg(feature = $feature)]
                    (R1CS::$variant(r1cs), ProvingKey::$variant(pk)) => {
                        Ok(Proof::$variant(groth16::prove::<$engine>(r1cs, pk, solution)?))
                    }
                )*
                #[allow(unreachable_patterns)]
                (r1cs, pk) => Err(Error::CurveMismatch {
                    expected: r1cs.curve(),
                    found: pk.curve(),
                }),
            }
        }

        /// Checks `proof` against `vk` and the public inputs found in `solution`.
        ///
        /// A proof that does not verify is reported as [`Error::VerificationFailed`].
        pub fn verify(proof: &Proof, vk: &VerifyingKey, solution: &Solution) -> Result<()> {
            debug!("verify on {}", proof.curve());
            match (proof, vk) {
                $(
                    #[cfg(feature = $feature)]
                    (Proof::$variant(proof), VerifyingKey::$variant(vk)) => {
                        groth16::verify::<$engine>(proof, vk, solution)
                    }
                )*
                #[allow(unreachable_patterns)]
                (proof, vk) => Err(Error::CurveMismatch {
                    expected: proof.curve(),
                    found: vk.curve(),
                }),
            }
        }
    };
}
for_each_curve!(dispatch);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::{Circuit, LinearCombination};
    use crate::curve::CurveId;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// a * b = c with `c` public.
    fn product_circuit() -> Result<Circuit> {
        let mut circuit = Circuit::new();
        let c = circuit.public_input("c")?;
        let a = circuit.secret_input("a")?;
        let b = circuit.secret_input("b")?;
        circuit.assert_product(a, b, c);
        Ok(circuit)
    }

    /// out = x^3 + x + 5, with two solver-computed wires.
    fn cubic_circuit() -> Result<Circuit> {
        let mut circuit = Circuit::new();
        let out = circuit.public_input("out")?;
        let x = circuit.secret_input("x")?;
        let x_squared = circuit.mul(x, x);
        let x_cubed = circuit.mul(x_squared, x);
        circuit.assert_equal(
            LinearCombination::from(x_cubed) + x + LinearCombination::constant(5),
            out,
        );
        Ok(circuit)
    }

    fn solution(pairs: &[(&str, i64)]) -> Solution {
        pairs.iter().map(|(name, value)| (*name, *value)).collect()
    }

    #[cfg(feature = "bn254")]
    #[test]
    fn bn254_product_scenario() -> Result<()> {
        init();
        let r1cs = product_circuit()?.compile("BN256".parse()?)?;
        let (pk, vk) = setup(&r1cs)?;

        let proof = prove(&r1cs, &pk, &solution(&[("a", 3), ("b", 4), ("c", 12)]))?;
        assert_eq!(proof.curve(), CurveId::Bn254);
        verify(&proof, &vk, &solution(&[("a", 3), ("b", 4), ("c", 12)]))?;

        let forged = verify(&proof, &vk, &solution(&[("a", 3), ("b", 4), ("c", 13)]));
        assert!(matches!(forged, Err(Error::VerificationFailed)));
        Ok(())
    }

    #[test]
    fn completeness_on_every_compiled_curve() -> Result<()> {
        init();
        let circuit = cubic_circuit()?;
        for curve in CurveId::compiled() {
            debug!("completeness on {curve}");
            let r1cs = circuit.compile(curve)?;
            let (pk, vk) = setup(&r1cs)?;
            let good = solution(&[("x", 3), ("out", 35)]);
            let proof = prove(&r1cs, &pk, &good)?;
            verify(&proof, &vk, &good)?;

            // The verifier only reads public inputs.
            verify(&proof, &vk, &solution(&[("out", 35)]))?;
            assert!(matches!(
                verify(&proof, &vk, &solution(&[("out", 36)])),
                Err(Error::VerificationFailed)
            ));
        }
        Ok(())
    }

    #[test]
    fn negative_and_large_values() -> Result<()> {
        init();
        let circuit = product_circuit()?;
        for curve in CurveId::compiled() {
            let r1cs = circuit.compile(curve)?;
            let (pk, vk) = setup(&r1cs)?;
            let mut assignment = Solution::new();
            assignment.insert("a", -7);
            assignment.insert("b", "18446744073709551616");
            assignment.insert("c", "-129127208515966861312");
            let proof = prove(&r1cs, &pk, &assignment)?;
            verify(&proof, &vk, &assignment)?;
        }
        Ok(())
    }

    #[test]
    fn unsatisfied_solutions_are_never_proven() -> Result<()> {
        init();
        let circuit = product_circuit()?;
        for curve in CurveId::compiled() {
            let r1cs = circuit.compile(curve)?;
            let (pk, _) = setup(&r1cs)?;
            let bad = solution(&[("a", 3), ("b", 4), ("c", 13)]);
            assert!(matches!(
                prove(&r1cs, &pk, &bad),
                Err(Error::UnsatisfiedConstraint(0))
            ));
            assert!(matches!(
                prove(&r1cs, &pk, &solution(&[("a", 3), ("c", 12)])),
                Err(Error::MissingAssignment(name)) if name == "b"
            ));
        }
        Ok(())
    }

    #[test]
    fn empty_circuit_has_no_setup() -> Result<()> {
        let mut circuit = Circuit::new();
        circuit.public_input("unused")?;
        for curve in CurveId::compiled() {
            let r1cs = circuit.compile(curve)?;
            assert!(matches!(setup(&r1cs), Err(Error::Backend(_))));
        }
        Ok(())
    }

    #[test]
    fn key_for_another_circuit_is_rejected() -> Result<()> {
        init();
        for curve in CurveId::compiled() {
            let product = product_circuit()?.compile(curve)?;
            let cubic = cubic_circuit()?.compile(curve)?;
            let (cubic_pk, _) = setup(&cubic)?;
            assert!(matches!(
                prove(&product, &cubic_pk, &solution(&[("a", 3), ("b", 4), ("c", 12)])),
                Err(Error::KeyMismatch(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn dummy_keys_prove_but_never_verify() -> Result<()> {
        init();
        let circuit = cubic_circuit()?;
        for curve in CurveId::compiled() {
            let r1cs = circuit.compile(curve)?;
            let (_, vk) = setup(&r1cs)?;
            let dummy = dummy_setup(&r1cs);
            assert_eq!(dummy.curve(), curve);

            let good = solution(&[("x", 3), ("out", 35)]);
            let proof = prove(&r1cs, &dummy, &good)?;
            assert!(matches!(
                verify(&proof, &vk, &good),
                Err(Error::VerificationFailed)
            ));
        }
        Ok(())
    }

    #[cfg(all(feature = "bn254", feature = "bls12-381"))]
    #[test]
    fn cross_curve_inputs_are_rejected() -> Result<()> {
        init();
        let circuit = product_circuit()?;
        let bn = circuit.compile(CurveId::Bn254)?;
        let bls = circuit.compile(CurveId::Bls12_381)?;
        let (bn_pk, bn_vk) = setup(&bn)?;
        let (bls_pk, bls_vk) = setup(&bls)?;
        let good = solution(&[("a", 3), ("b", 4), ("c", 12)]);

        assert!(matches!(
            prove(&bn, &bls_pk, &good),
            Err(Error::CurveMismatch {
                expected: CurveId::Bn254,
                found: CurveId::Bls12_381
            })
        ));

        let bn_proof = prove(&bn, &bn_pk, &good)?;
        let bls_proof = prove(&bls, &bls_pk, &good)?;
        assert!(matches!(
            verify(&bn_proof, &bls_vk, &good),
            Err(Error::CurveMismatch { .. })
        ));
        assert!(matches!(
            verify(&bls_proof, &bn_vk, &good),
            Err(Error::CurveMismatch {
                expected: CurveId::Bls12_381,
                found: CurveId::Bn254
            })
        ));
        Ok(())
    }
}
