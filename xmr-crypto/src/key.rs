use std::fmt;
use std::ops::Deref;

use xmr_codec::{Archive, Message, Result};

/// An opaque fixed-size byte blob.
///
/// Every elliptic-curve point, scalar and digest in the domain schema is
/// carried as one of these — this crate never validates curve membership
/// or performs arithmetic, it only moves bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blob<const N: usize>(pub [u8; N]);

impl<const N: usize> Blob<N> {
    pub const fn zero() -> Self {
        Self([0u8; N])
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let mut out = [0u8; N];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Self(out))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl<const N: usize> Default for Blob<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Deref for Blob<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> AsRef<[u8]> for Blob<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Blob<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> fmt::Debug for Blob<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob<{N}>({})", self.to_hex())
    }
}

impl<const N: usize> fmt::Display for Blob<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl<const N: usize> Message for Blob<N> {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        ar.blob_fixed(&mut self.0)
    }
}

/// A 32-byte elliptic-curve point, scalar, key image or digest.
///
/// The domain schema never distinguishes public keys, secret keys, key
/// images or hashes at the type level — all four are just `Key` on the
/// wire, matching the source format's own lack of distinction.
pub type Key = Blob<32>;
