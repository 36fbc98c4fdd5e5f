//! Concrete wire-format archives: the on-chain blockchain format, the
//! Boost portable-binary format, and the RPC portable-storage format.
//!
//! This crate owns everything a [`xmr_codec::Archive`] implementation
//! needs beyond the bare primitive contract: archive preambles,
//! per-archive version bookkeeping, and the hard-fork profile the
//! blockchain archive consults in place of an on-wire version.

pub mod blockchain;
pub mod boost;
pub mod profile;
pub mod rpc;
pub mod version_registry;

pub use blockchain::BlockchainArchive;
pub use boost::BoostArchive;
pub use profile::HardForkProfile;
pub use rpc::{Array, RpcPortableArchive, Section, Value, ValueKind};
pub use version_registry::VersionRegistry;
