//! Commitment chain over board states.
//!
//! Every [`BoardState`](crate::BoardState) carries a 32-byte digest that
//! binds all of its fields and, after genesis, the commitment of the state
//! it was derived from. The digest primitive is pluggable through
//! [`CommitmentScheme`] so the reference transition can be matched against
//! whatever hash the verifying counterpart uses.

mod chain;

pub use chain::{GENESIS_DOMAIN, TURN_DOMAIN, chained_commitment, genesis_commitment};
pub(crate) use chain::expected_commitment;

use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;

use sha2::Digest;

/// 32-byte commitment digest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commitment([u8; 32]);

impl Commitment {
    pub const LEN: usize = 32;
    pub const ZERO: Self = Self([0; 32]);

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Leading 8 bytes as hex, for compact log lines.
    pub fn short(&self) -> ShortCommitment<'_> {
        ShortCommitment(self)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({self})")
    }
}

impl FromStr for Commitment {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for Commitment {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Display adapter returned by [`Commitment::short`].
pub struct ShortCommitment<'a>(&'a Commitment);

impl fmt::Display for ShortCommitment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0.0[..8]))
    }
}

/// Hash primitive used to build commitments.
///
/// Implementations must be deterministic and collision resistant; the
/// input is a domain tag, an optional prior commitment, and a fixed-order
/// list of 64-bit words.
pub trait CommitmentScheme: Send + Sync {
    fn digest(&self, domain: &str, prior: Option<&Commitment>, words: &[u64]) -> Commitment;
}

impl<T: CommitmentScheme + ?Sized> CommitmentScheme for &T {
    fn digest(&self, domain: &str, prior: Option<&Commitment>, words: &[u64]) -> Commitment {
        (**self).digest(domain, prior, words)
    }
}

#[cfg(feature = "std")]
impl<T: CommitmentScheme + ?Sized> CommitmentScheme for std::sync::Arc<T> {
    fn digest(&self, domain: &str, prior: Option<&Commitment>, words: &[u64]) -> Commitment {
        (**self).digest(domain, prior, words)
    }
}

/// [`CommitmentScheme`] backed by any RustCrypto [`Digest`].
///
/// Words are absorbed big-endian after the domain tag and the prior
/// commitment. Outputs longer than 32 bytes are truncated.
pub struct DigestScheme<D> {
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestScheme<D> {
    pub const fn new() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for DigestScheme<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for DigestScheme<D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<D> Copy for DigestScheme<D> {}

impl<D> fmt::Debug for DigestScheme<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(core::any::type_name::<Self>())
    }
}

impl<D: Digest> CommitmentScheme for DigestScheme<D> {
    fn digest(&self, domain: &str, prior: Option<&Commitment>, words: &[u64]) -> Commitment {
        let mut hasher = D::new();
        hasher.update(domain.as_bytes());
        if let Some(prior) = prior {
            hasher.update(prior.as_bytes());
        }
        for word in words {
            hasher.update(word.to_be_bytes());
        }
        let output = hasher.finalize();

        let mut bytes = [0u8; 32];
        let len = output.len().min(Commitment::LEN);
        bytes[..len].copy_from_slice(&output[..len]);
        Commitment(bytes)
    }
}

pub type Sha256Scheme = DigestScheme<sha2::Sha256>;
pub type Sha512_256Scheme = DigestScheme<sha2::Sha512_256>;

/// Built-in hash primitives, selectable from configuration.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    #[strum(serialize = "sha512_256", serialize = "sha512-256")]
    Sha512_256,
}

impl CommitmentScheme for HashAlgorithm {
    fn digest(&self, domain: &str, prior: Option<&Commitment>, words: &[u64]) -> Commitment {
        match self {
            HashAlgorithm::Sha256 => Sha256Scheme::new().digest(domain, prior, words),
            HashAlgorithm::Sha512_256 => Sha512_256Scheme::new().digest(domain, prior, words),
        }
    }
}
