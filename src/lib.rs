//!# Groth16 over several curves
//!
//!This crate runs Groth16 setup, proving and verification behind a single API that does not care which
//!pairing-friendly curve is underneath. Every key, proof and compiled constraint system carries a `CurveId`, and each
//!call routes to the arkworks backend for that curve.
//!
//!Curves are selected at build time with Cargo features: `bn254`, `bls12-381` and `bls12-377` are on by default,
//!`mnt6-753` is opt-in. `CurveId::compiled()` lists what the current build supports.
//!
//!The general flow is:
//!
//!- Describe the constraints once with a curve-agnostic `Circuit`
//!- Lower it for a curve with `circuit.compile(curve)`, giving an `R1CS`
//!- Generate keys with `setup(&r1cs)`
//!- Generate a proof with `prove(&r1cs, &pk, &solution)`
//!- Verify it with `verify(&proof, &vk, &solution)`, which only reads the public inputs
//!
//!Keys and proofs are written with `write_proving_key` and friends. Each file starts with a small header naming the
//!artifact kind and curve, so `read_proving_key` and friends pick the right decoder on their own, and `peek_curve_id`
//!tells you the curve without decoding anything. Opening a file for a curve that exists but was not compiled into
//!this build is treated as a broken build and panics; every other failure is an `Error`.
//!
//!Internally the polynomial and QAP code reports failures with the `rootcause` crate, which keeps context and
//!backtraces; these surface as `Error::Backend`. Set `RUST_LOG=debug` to trace each step through the `log` facade.
//!
//!```no_run
//!use groth16_multicurve::{Circuit, CurveId, Solution, prove, setup, verify};
//!
//!# fn main() -> groth16_multicurve::Result<()> {
//!let mut circuit = Circuit::new();
//!let c = circuit.public_input("c")?;
//!let a = circuit.secret_input("a")?;
//!let b = circuit.secret_input("b")?;
//!circuit.assert_product(a, b, c);
//!
//!let r1cs = circuit.compile(CurveId::Bn254)?;
//!let (pk, vk) = setup(&r1cs)?;
//!let solution: Solution = [("a", 3), ("b", 4), ("c", 12)].into_iter().collect();
//!let proof = prove(&r1cs, &pk, &solution)?;
//!verify(&proof, &vk, &solution)?;
//!# Ok(())
//!# }
//!```

/// Curve-tagged R1CS, keys and proofs.
pub mod artifacts;
/// Contains the types for Rank 1 Constraint Systems and Quadratic Arithmetic Programs.
pub mod circuits;
pub mod curve;
pub mod dispatch;
/// Reading and writing artifact files.
pub mod encoding;
pub mod error;
/// Contains the generic Groth16 algorithm, one instance per curve.
pub mod groth16;
mod helpers;
/// Contains types for polynomials.
pub mod polynomial;
mod registry;
pub mod solution;

pub use artifacts::{Proof, ProvingKey, R1CS, VerifyingKey};
pub use circuits::{Circuit, LinearCombination, Variable};
pub use curve::CurveId;
pub use dispatch::{dummy_setup, prove, setup, verify};
pub use encoding::{
    Artifact, ArtifactKind, Header, peek_curve_id, peek_header, read_proof, read_proving_key,
    read_verifying_key, write_proof, write_proving_key, write_verifying_key,
};
pub use error::{Error, Result};
pub use solution::{Solution, Value};
