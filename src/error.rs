use crate::curve::CurveId;
use crate::encoding::ArtifactKind;
use ark_serialize::SerializationError;
use rootcause::Report;
use std::path::PathBuf;
use thiserror::Error;

/// Recoverable failures returned by setup, proving, verification and artifact I/O.
///
/// Invariant violations that only an incomplete build can produce (a known curve
/// tag whose backend was not compiled in) are not represented here; they panic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid artifact header: {0}")]
    InvalidHeader(String),

    #[error("unsupported artifact format version {0}")]
    UnsupportedVersion(u8),

    /// The curve tag is not part of [`CurveId`] at all (newer, older or corrupt file).
    #[error("unknown curve id {0}")]
    UnknownCurve(u16),

    #[error("unknown curve name '{0}'")]
    UnknownCurveName(String),

    #[error("expected a {expected} artifact, found a {found}")]
    ArtifactKind {
        expected: ArtifactKind,
        found: ArtifactKind,
    },

    #[error("artifact is corrupted: {0}")]
    Corrupted(String),

    #[error("artifact codec error")]
    Codec(#[from] SerializationError),

    /// Artifacts from two different curves were combined in one call.
    #[error("curve mismatch: expected {expected}, found {found}")]
    CurveMismatch { expected: CurveId, found: CurveId },

    #[error("curve {0} is not compiled into this build")]
    CurveNotCompiled(CurveId),

    #[error("missing assignment for variable '{0}'")]
    MissingAssignment(String),

    #[error("invalid value for '{name}': {value}")]
    InvalidValue { name: String, value: String },

    #[error("constraint #{0} is not satisfied")]
    UnsatisfiedConstraint(usize),

    #[error("key does not match the constraint system: {0}")]
    KeyMismatch(String),

    #[error("proof verification failed")]
    VerificationFailed,

    #[error("variable '{0}' is declared twice")]
    DuplicateVariable(String),

    #[error("variable {0} does not belong to this circuit")]
    UnknownVariable(String),

    #[error("failed to parse solution")]
    Solution(#[from] serde_json::Error),

    #[error("backend failure: {0}")]
    Backend(Report),
}

impl From<Report> for Error {
    fn from(report: Report) -> Self {
        Error::Backend(report)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
