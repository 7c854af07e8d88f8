//! On-disk artifact format.
//!
//! ```text
//! 0..4     magic "GR16"
//! 4        format version
//! 5        artifact kind
//! 6..8     curve tag, u16 little-endian
//! 8..n     ark-serialize compressed payload
//! n..n+32  SHA-256 of everything before it
//! ```
//!
//! Readers look at the header first and only then pick the decoder for the
//! curve it names, so a file can be opened without knowing its curve up front.

use crate::artifacts::{Proof, ProvingKey, VerifyingKey};
use crate::curve::CurveId;
use crate::error::{Error, Result};
use crate::registry::{for_each_curve, unimplemented_curve};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

pub const MAGIC: [u8; 4] = *b"GR16";
pub const FORMAT_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 8;
pub const DIGEST_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ArtifactKind {
    ProvingKey = 1,
    VerifyingKey = 2,
    Proof = 3,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::ProvingKey => "proving key",
            ArtifactKind::VerifyingKey => "verifying key",
            ArtifactKind::Proof => "proof",
        })
    }
}

impl TryFrom<u8> for ArtifactKind {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            1 => Ok(ArtifactKind::ProvingKey),
            2 => Ok(ArtifactKind::VerifyingKey),
            3 => Ok(ArtifactKind::Proof),
            other => Err(Error::InvalidHeader(format!("unknown artifact kind {other}"))),
        }
    }
}

/// The fixed-size prefix of every artifact file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub kind: ArtifactKind,
    pub curve: CurveId,
}

impl Header {
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let [tag_low, tag_high] = self.curve.tag().to_le_bytes();
        [
            MAGIC[0],
            MAGIC[1],
            MAGIC[2],
            MAGIC[3],
            FORMAT_VERSION,
            self.kind as u8,
            tag_low,
            tag_high,
        ]
    }

    /// Parses the first [`HEADER_LEN`] bytes of `bytes`; anything after is ignored.
    pub fn parse(bytes: &[u8]) -> Result<Header> {
        let Some(header) = bytes.get(..HEADER_LEN) else {
            return Err(Error::InvalidHeader(format!(
                "need {HEADER_LEN} bytes, found {}",
                bytes.len()
            )));
        };
        if header[..4] != MAGIC {
            return Err(Error::InvalidHeader(format!(
                "bad magic {:02x?}",
                &header[..4]
            )));
        }
        if header[4] != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(header[4]));
        }
        let kind = ArtifactKind::try_from(header[5])?;
        let curve = CurveId::try_from(u16::from_le_bytes([header[6], header[7]]))?;
        Ok(Header { kind, curve })
    }
}

/// A curve-tagged artifact that can be written to and read from the file format.
pub trait Artifact: Sized {
    const KIND: ArtifactKind;

    fn curve(&self) -> CurveId;

    /// Appends the compressed encoding of the concrete artifact to `out`.
    fn encode_payload(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Decodes a payload known to belong to `curve`.
    ///
    /// Panics if `curve` has no backend in this build.
    fn decode_payload(curve: CurveId, payload: &[u8]) -> Result<Self>;
}

/// Decodes a `T` that must span the whole of `payload`.
fn decode_exact<T: CanonicalDeserialize>(payload: &[u8]) -> Result<T> {
    let mut reader = payload;
    let value = T::deserialize_compressed(&mut reader)?;
    if !reader.is_empty() {
        return Err(Error::Corrupted(format!(
            "{} trailing bytes after the payload",
            reader.len()
        )));
    }
    Ok(value)
}

macro_rules! codec {
    (@artifact $artifact:ident [$($feature:literal => $variant:ident($engine:ty)),*]) => {
        impl Artifact for $artifact {
            const KIND: ArtifactKind = ArtifactKind::$artifact;

            fn curve(&self) -> CurveId {
                $artifact::curve(self)
            }

            fn encode_payload(&self, out: &mut Vec<u8>) -> Result<()> {
                match self {
                    $(
                        #[cfg(feature = $feature)]
                        $artifact::$variant(inner) => inner.serialize_compressed(&mut *out)?,
                    )*
                }
                Ok(())
            }

            fn decode_payload(curve: CurveId, payload: &[u8]) -> Result<Self> {
                debug!("decoding {} payload for {curve}", Self::KIND);
                match curve {
                    $(
                        #[cfg(feature = $feature)]
                        CurveId::$variant => Ok($artifact::$variant(decode_exact(payload)?)),
                    )*
                    other => unimplemented_curve(other),
                }
            }
        }
    };
    ($($feature:literal => $variant:ident($engine:ty)),* $(,)?) => {
        codec!(@artifact ProvingKey [$($feature => $variant($engine)),*]);
        codec!(@artifact VerifyingKey [$($feature => $variant($engine)),*]);
        codec!(@artifact Proof [$($feature => $variant($engine)),*]);
    };
}
for_each_curve!(codec);

pub fn to_bytes<A: Artifact>(artifact: &A) -> Result<Vec<u8>> {
    let header = Header {
        kind: A::KIND,
        curve: artifact.curve(),
    };
    let mut bytes = header.to_bytes().to_vec();
    artifact.encode_payload(&mut bytes)?;
    let digest = Sha256::digest(&bytes);
    bytes.extend_from_slice(&digest);
    Ok(bytes)
}

pub fn from_bytes<A: Artifact>(bytes: &[u8]) -> Result<A> {
    let header = Header::parse(bytes)?;
    if !header.curve.is_compiled() {
        unimplemented_curve(header.curve);
    }
    if header.kind != A::KIND {
        return Err(Error::ArtifactKind {
            expected: A::KIND,
            found: header.kind,
        });
    }

    let Some(body_len) = bytes
        .len()
        .checked_sub(DIGEST_LEN)
        .filter(|len| *len >= HEADER_LEN)
    else {
        return Err(Error::Corrupted(format!(
            "{} bytes is too short for a {}",
            bytes.len(),
            header.kind
        )));
    };
    let (body, digest) = bytes.split_at(body_len);
    if Sha256::digest(body).as_slice() != digest {
        return Err(Error::Corrupted("digest mismatch".to_string()));
    }

    A::decode_payload(header.curve, &body[HEADER_LEN..])
}

pub fn write<A: Artifact>(path: impl AsRef<Path>, artifact: &A) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(artifact)?;
    std::fs::write(path, &bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "wrote {} for {} ({} bytes) to {}",
        A::KIND,
        artifact.curve(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

pub fn read<A: Artifact>(path: impl AsRef<Path>) -> Result<A> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    from_bytes(&bytes)
}

/// Reads only the header of the artifact at `path`.
pub fn peek_header(path: impl AsRef<Path>) -> Result<Header> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_error)?;
    let mut header = [0u8; HEADER_LEN];
    match file.read_exact(&mut header) {
        Ok(()) => Header::parse(&header),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(Error::InvalidHeader(format!(
            "{} is shorter than the {HEADER_LEN} byte header",
            path.display()
        ))),
        Err(e) => Err(io_error(e)),
    }
}

pub fn peek_curve_id(path: impl AsRef<Path>) -> Result<CurveId> {
    Ok(peek_header(path)?.curve)
}

pub fn read_proving_key(path: impl AsRef<Path>) -> Result<ProvingKey> {
    read(path)
}

pub fn read_verifying_key(path: impl AsRef<Path>) -> Result<VerifyingKey> {
    read(path)
}

pub fn read_proof(path: impl AsRef<Path>) -> Result<Proof> {
    read(path)
}

pub fn write_proving_key(path: impl AsRef<Path>, pk: &ProvingKey) -> Result<()> {
    write(path, pk)
}

pub fn write_verifying_key(path: impl AsRef<Path>, vk: &VerifyingKey) -> Result<()> {
    write(path, vk)
}

pub fn write_proof(path: impl AsRef<Path>, proof: &Proof) -> Result<()> {
    write(path, proof)
}
