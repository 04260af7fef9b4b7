//! Content digests for cell sources
//!
//! Provides [`ContentDigest`], a 32-byte Blake3 digest. Its short form names
//! artifacts derived from cell content, so identical sources always map to
//! the same file.

use std::fmt::{self, Display, Formatter};

/// A 32-byte content digest (Blake3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Number of bytes kept by [`ContentDigest::short`]
    pub const SHORT_BYTES: usize = 8;

    /// Create a digest from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Compute the Blake3 digest of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self::new(*blake3::hash(data).as_bytes())
    }

    /// Digest of a cell's source text
    #[inline]
    #[must_use]
    pub fn of_source(source: &str) -> Self {
        Self::compute(source.as_bytes())
    }

    /// Fixed-width short form (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..Self::SHORT_BYTES])
    }
}

impl Display for ContentDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
