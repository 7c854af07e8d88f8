use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Identifies the elliptic curve family an artifact was produced under.
///
/// The discriminant is the tag written into every artifact header. Tag `0` is
/// never assigned. A curve being listed here does not mean this build can prove
/// over it, see [`CurveId::is_compiled`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum CurveId {
    Bn254 = 1,
    Bls12_377 = 2,
    Bls12_381 = 3,
    /// Reserved: no backend exists for it.
    Bw6_761 = 4,
    Mnt6_753 = 5,
}

impl CurveId {
    pub const ALL: [CurveId; 5] = [
        CurveId::Bn254,
        CurveId::Bls12_377,
        CurveId::Bls12_381,
        CurveId::Bw6_761,
        CurveId::Mnt6_753,
    ];

    pub fn tag(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            CurveId::Bn254 => "bn254",
            CurveId::Bls12_377 => "bls12-377",
            CurveId::Bls12_381 => "bls12-381",
            CurveId::Bw6_761 => "bw6-761",
            CurveId::Mnt6_753 => "mnt6-753",
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u16> for CurveId {
    type Error = Error;

    fn try_from(tag: u16) -> Result<Self, Self::Error> {
        CurveId::ALL
            .into_iter()
            .find(|curve| curve.tag() == tag)
            .ok_or(Error::UnknownCurve(tag))
    }
}

impl FromStr for CurveId {
    type Err = Error;

    /// Accepts the canonical names plus the older gnark spellings (`bn256`, `bls381`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "bn254" | "bn256" => Ok(CurveId::Bn254),
            "bls12-377" | "bls377" => Ok(CurveId::Bls12_377),
            "bls12-381" | "bls381" => Ok(CurveId::Bls12_381),
            "bw6-761" | "bw761" => Ok(CurveId::Bw6_761),
            "mnt6-753" | "mnt6753" => Ok(CurveId::Mnt6_753),
            _ => Err(Error::UnknownCurveName(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for curve in CurveId::ALL {
            assert_eq!(CurveId::try_from(curve.tag()).unwrap(), curve);
        }
    }

    #[test]
    fn unknown_tags_are_errors() {
        assert!(matches!(CurveId::try_from(0), Err(Error::UnknownCurve(0))));
        assert!(matches!(
            CurveId::try_from(0xbeef),
            Err(Error::UnknownCurve(0xbeef))
        ));
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("BN256".parse::<CurveId>().unwrap(), CurveId::Bn254);
        assert_eq!("bls12_381".parse::<CurveId>().unwrap(), CurveId::Bls12_381);
        assert_eq!("bls377".parse::<CurveId>().unwrap(), CurveId::Bls12_377);
        for curve in CurveId::ALL {
            assert_eq!(curve.to_string().parse::<CurveId>().unwrap(), curve);
        }
        assert!(matches!(
            "secp256k1".parse::<CurveId>(),
            Err(Error::UnknownCurveName(_))
        ));
    }

    #[test]
    fn reserved_curve_is_never_compiled() {
        assert!(!CurveId::Bw6_761.is_compiled());
        assert!(!CurveId::compiled().contains(&CurveId::Bw6_761));
    }
}
