//! Opaque cryptographic byte blobs.
//!
//! Elliptic-curve points, scalars, key images and hash digests are all
//! 32-byte blobs at the wire level; this crate carries exactly that, and
//! nothing about curve arithmetic or hash functions.

pub mod key;

pub use key::{Blob, Key};
