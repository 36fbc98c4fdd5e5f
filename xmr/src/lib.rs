//! Rust-native (de)serialization for Monero's transaction wire formats.
//!
//! Monero encodes the same transaction and wallet types three different
//! ways depending on where the bytes travel: the tagless binary format
//! blocks are stored in, the Boost `portable_binary_archive` format
//! wallet files and IPC payloads use, and the tagged portable-storage
//! format RPC requests and responses use. This crate does not pick one —
//! every domain type in [`types`] implements a single direction-polymorphic
//! walk that any of the three [`archives`] can drive.
//!
//! This facade crate re-exports the workspace's member crates under one
//! dependency; reach for a member crate directly if only one layer is
//! needed (e.g. a build that only ever talks the RPC codec has no reason
//! to pull in the wallet schema).

#[doc(inline)]
pub use xmr_codec as codec;

#[doc(inline)]
pub use xmr_crypto as crypto;

pub mod archives {
    //! Concrete wire formats: on-chain blockchain, Boost portable-binary,
    //! and RPC portable-storage.

    #[doc(inline)]
    pub use xmr_archives::*;
}

pub mod types {
    //! The transaction, RingCT and wallet domain schema.

    #[doc(inline)]
    pub use xmr_tx_types::*;
}

#[doc(inline)]
pub use xmr_codec::{Archive, Message};
