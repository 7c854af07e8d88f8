//! The table of curves that have a Groth16 backend.
//!
//! Every per-curve enum and every dispatch `match` in the crate is generated by
//! handing a macro to [`for_each_curve!`]. Each row names the Cargo feature that
//! compiles the curve in, the [`CurveId`] variant it is tagged with, and its
//! arkworks pairing engine. Supporting a new curve means adding a row here and a
//! variant to [`CurveId`]; nothing else changes.

use crate::curve::CurveId;
use log::error;

#[cfg(not(any(
    feature = "bn254",
    feature = "bls12-381",
    feature = "bls12-377",
    feature = "mnt6-753"
)))]
compile_error!("at least one curve feature must be enabled");

macro_rules! for_each_curve {
    ($callback:ident) => {
        $callback! {
            "bn254" => Bn254(ark_bn254::Bn254),
            "bls12-377" => Bls12_377(ark_bls12_377::Bls12_377),
            "bls12-381" => Bls12_381(ark_bls12_381::Bls12_381),
            "mnt6-753" => Mnt6_753(ark_mnt6_753::MNT6_753),
        }
    };
}
pub(crate) use for_each_curve;

macro_rules! compiled_curves {
    ($($feature:literal => $variant:ident($engine:ty)),* $(,)?) => {
        impl CurveId {
            /// Whether this build carries a backend for the curve.
            pub fn is_compiled(self) -> bool {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        CurveId::$variant => true,
                    )*
                    _ => false,
                }
            }

            /// Curves with a backend in this build, in tag order.
            pub fn compiled() -> Vec<CurveId> {
                let mut curves = Vec::new();
                $(
                    #[cfg(feature = $feature)]
                    curves.push(CurveId::$variant);
                )*
                curves.sort();
                curves
            }
        }
    };
}
for_each_curve!(compiled_curves);

/// Aborts on a curve that is a valid [`CurveId`] but has no backend in this build.
///
/// Only an incomplete build can get here, so it is not reported as an [`Error`](crate::Error).
pub(crate) fn unimplemented_curve(curve: CurveId) -> ! {
    error!("no groth16 backend compiled in for curve {curve}");
    panic!("groth16: curve {curve} not implemented in this build")
}
