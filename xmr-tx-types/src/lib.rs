//! The confidential-transaction and wallet domain schema.
//!
//! This crate owns every type named in the schema catalog — transaction
//! prefixes and inputs/outputs, the ring-confidential signature objects,
//! and the wallet/multisig/key-file message types that ride on top of
//! them — plus the version-conditional field sets and custom
//! `serialize_*` hooks each of them needs. It knows nothing about how
//! bytes are framed (that's `xmr-codec`) or which concrete wire format is
//! in play (that's `xmr-archives`); every type here is generic over any
//! [`xmr_codec::Archive`] implementation.

pub(crate) mod container_ext;
pub mod extra;
pub mod keyfile;
pub mod rct;
pub mod transaction;
pub mod txio;
pub mod wallet;

pub use extra::TxExtraPadding;
pub use keyfile::{AccountKeys, KeyImageExportEntry, KeyImageExportFile};
pub use rct::{
    Bulletproof, BulletproofPlus, Clsag, CtKey, EcdhTuple, MgSig, RangeSig, RctSigBase,
    RctSigPrunable, RctType,
};
pub use transaction::{Signature, Transaction};
pub use txio::{
    TransactionPrefix, TxInV, TxOut, TxinGen, TxinToKey, TxinToScript, TxinToScriptHash,
    TxoutTargetV, TxoutToKey, TxoutToScript, TxoutToScriptHash,
};
pub use wallet::{
    AccountPublicAddress, MultisigInfo, MultisigKLRki, MultisigLR, MultisigTxSet,
    PendingTransaction, SignedTxSet, SubaddressIndex, TxConstructionData, TxDestinationEntry,
    TxSourceEntry, TransferDetails, UnsignedTxSet,
};

/// The on-wire width every `size_t`-typed field in the original uses: a
/// plain unsigned varint, identical to [`xmr_codec::Archive::uvarint`].
pub type SizeT = u64;
