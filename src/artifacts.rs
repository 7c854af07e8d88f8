//! Curve-tagged artifacts.
//!
//! Each type wraps exactly one curve's concrete representation, so the curve of
//! an artifact is always known and cross-curve mixing is a tag comparison.

use crate::circuits::{Circuit, ConstraintSystem};
use crate::curve::CurveId;
use crate::error::{Error, Result};
use crate::groth16;
use crate::registry::for_each_curve;
use crate::solution::Solution;
use ark_ec::pairing::Pairing;

macro_rules! artifacts {
    ($($feature:literal => $variant:ident($engine:ty)),* $(,)?) => {
        /// A constraint system compiled for one curve's scalar field.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum R1CS {
            $(
                #[cfg(feature = $feature)]
                $variant(ConstraintSystem<<$engine as Pairing>::ScalarField>),
            )*
        }

        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum ProvingKey {
            $(
                #[cfg(feature = $feature)]
                $variant(groth16::ProvingKey<$engine>),
            )*
        }

        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum VerifyingKey {
            $(
                #[cfg(feature = $feature)]
                $variant(groth16::VerifyingKey<$engine>),
            )*
        }

        /// A Groth16 proof; pass it to [`verify`](crate::verify) or serialize it.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum Proof {
            $(
                #[cfg(feature = $feature)]
                $variant(groth16::Proof<$engine>),
            )*
        }

        impl R1CS {
            /// Lowers `circuit` into the scalar field of `curve`.
            pub fn compile(circuit: &Circuit, curve: CurveId) -> Result<R1CS> {
                match curve {
                    $(
                        #[cfg(feature = $feature)]
                        CurveId::$variant => Ok(R1CS::$variant(circuit.build()?)),
                    )*
                    other => Err(Error::CurveNotCompiled(other)),
                }
            }

            pub fn curve(&self) -> CurveId {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        R1CS::$variant(_) => CurveId::$variant,
                    )*
                }
            }

            pub fn num_constraints(&self) -> usize {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        R1CS::$variant(r1cs) => r1cs.num_constraints(),
                    )*
                }
            }

            pub fn num_variables(&self) -> usize {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        R1CS::$variant(r1cs) => r1cs.num_variables(),
                    )*
                }
            }

            /// Public variables including the constant `ONE` wire.
            pub fn num_public(&self) -> usize {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        R1CS::$variant(r1cs) => r1cs.num_public(),
                    )*
                }
            }

            /// Checks that `solution` satisfies every constraint without proving.
            pub fn solve(&self, solution: &Solution) -> Result<()> {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        R1CS::$variant(r1cs) => r1cs.solve(solution).map(|_| ()),
                    )*
                }
            }
        }

        impl ProvingKey {
            pub fn curve(&self) -> CurveId {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        ProvingKey::$variant(_) => CurveId::$variant,
                    )*
                }
            }

            /// False only when `other` is for the same curve and has identical content.
            pub fn is_different(&self, other: &ProvingKey) -> bool {
                match (self, other) {
                    $(
                        #[cfg(feature = $feature)]
                        (ProvingKey::$variant(a), ProvingKey::$variant(b)) => a != b,
                    )*
                    #[allow(unreachable_patterns)]
                    _ => true,
                }
            }
        }

        impl VerifyingKey {
            pub fn curve(&self) -> CurveId {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        VerifyingKey::$variant(_) => CurveId::$variant,
                    )*
                }
            }

            /// False only when `other` is for the same curve and has identical content.
            pub fn is_different(&self, other: &VerifyingKey) -> bool {
                match (self, other) {
                    $(
                        #[cfg(feature = $feature)]
                        (VerifyingKey::$variant(a), VerifyingKey::$variant(b)) => a != b,
                    )*
                    #[allow(unreachable_patterns)]
                    _ => true,
                }
            }

            /// Names of the public inputs `verify` reads from a solution.
            pub fn public_inputs(&self) -> &[String] {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        VerifyingKey::$variant(vk) => &vk.public_inputs,
                    )*
                }
            }
        }

        impl Proof {
            pub fn curve(&self) -> CurveId {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        Proof::$variant(_) => CurveId::$variant,
                    )*
                }
            }
        }
    };
}
for_each_curve!(artifacts);

impl Circuit {
    /// Lowers the circuit for `curve`; see [`R1CS::compile`].
    pub fn compile(&self, curve: CurveId) -> Result<R1CS> {
        R1CS::compile(self, curve)
    }
}
