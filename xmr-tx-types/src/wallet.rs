//! Wallet-side types: addresses, transfer bookkeeping, transaction
//! construction data, and the multisig/unsigned/signed transaction sets
//! that ride a Boost archive rooted at its header.

use xmr_codec::archive::{container, container_versioned, Archive, Versioned};
use xmr_codec::error::{Context, Result};
use xmr_codec::Message;
use xmr_crypto::Key;

use crate::container_ext::{container_u8, container_uvarint64};
use crate::rct::CtKey;
use crate::transaction::Transaction;
use crate::txio::TransactionPrefix;

/// A wallet's public spend/view key pair, as handed out to senders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPublicAddress {
    pub spend_public_key: Key,
    pub view_public_key: Key,
}

impl Message for AccountPublicAddress {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.spend_public_key.serialize(ar).ctx_field("m_spend_public_key")?;
        self.view_public_key.serialize(ar).ctx_field("m_view_public_key")
    }
}

/// A subaddress's major/minor account indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubaddressIndex {
    pub major: u32,
    pub minor: u32,
}

impl Message for SubaddressIndex {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        ar.u32(&mut self.major).ctx_field("major")?;
        ar.u32(&mut self.minor).ctx_field("minor")
    }
}

/// One spend destination in a transaction under construction: how much,
/// and to whom.
///
/// Versioned 1..=2 (current 2): version 1 is the original `amount, addr,
/// is_subaddress` triple; version 2 prepends the human-entered `original`
/// address string and appends an `is_integrated` flag, both added once
/// integrated addresses existed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxDestinationEntry {
    pub original: String,
    pub amount: u64,
    pub addr: AccountPublicAddress,
    pub is_subaddress: bool,
    pub is_integrated: bool,
}

impl Versioned for TxDestinationEntry {
    const TYPE_NAME: &'static str = "TxDestinationEntry";
    const CURRENT_VERSION: u32 = 2;
}

impl Message for TxDestinationEntry {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let version = ar.version::<Self>()?;
        if version >= 2 {
            ar.string(&mut self.original).ctx_field("original")?;
        }
        ar.uvarint(&mut self.amount).ctx_field("amount")?;
        self.addr.serialize(ar).ctx_field("account_public_address")?;
        ar.boolean(&mut self.is_subaddress).ctx_field("is_subaddress")?;
        if version >= 2 {
            ar.boolean(&mut self.is_integrated).ctx_field("is_integrated")?;
        }
        Ok(())
    }
}

/// One output index paired with the ring-member key/mask it names — an
/// element of [`TxSourceEntry::outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputEntry(pub u64, pub CtKey);

impl Message for OutputEntry {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let mut arity = 2usize;
        ar.tuple_arity(&mut arity)?;
        ar.uvarint(&mut self.0).ctx_index(0)?;
        self.1.serialize(ar).ctx_index(1)
    }
}

/// The four keys a multisig cosigner contributes toward one ring
/// signature: their own key image share plus the `K`/`L`/`R` nonces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultisigKLRki {
    pub k: Key,
    pub l: Key,
    pub r: Key,
    pub ki: Key,
}

impl Message for MultisigKLRki {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.k.serialize(ar).ctx_field("K")?;
        self.l.serialize(ar).ctx_field("L")?;
        self.r.serialize(ar).ctx_field("R")?;
        self.ki.serialize(ar).ctx_field("ki")
    }
}

/// One candidate input to a transaction under construction: the ring it
/// draws from, which member is the real spend, and the amount/mask it
/// commits to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxSourceEntry {
    pub outputs: Vec<OutputEntry>,
    pub real_output: u64,
    pub real_out_tx_key: Key,
    pub real_out_additional_tx_keys: Vec<Key>,
    pub real_output_in_tx_index: u64,
    pub amount: u64,
    pub rct: bool,
    pub mask: Key,
    pub multisig_klrki: MultisigKLRki,
}

impl Versioned for TxSourceEntry {
    const TYPE_NAME: &'static str = "TxSourceEntry";
    const CURRENT_VERSION: u32 = 1;
}

impl Message for TxSourceEntry {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let _version = ar.version::<Self>()?;
        container(ar, &mut self.outputs).ctx_field("outputs")?;
        ar.uvarint(&mut self.real_output).ctx_field("real_output")?;
        self.real_out_tx_key.serialize(ar).ctx_field("real_out_tx_key")?;
        container(ar, &mut self.real_out_additional_tx_keys)
            .ctx_field("real_out_additional_tx_keys")?;
        ar.uvarint(&mut self.real_output_in_tx_index)
            .ctx_field("real_output_in_tx_index")?;
        ar.uvarint(&mut self.amount).ctx_field("amount")?;
        ar.boolean(&mut self.rct).ctx_field("rct")?;
        self.mask.serialize(ar).ctx_field("mask")?;
        self.multisig_klrki.serialize(ar).ctx_field("multisig_kLRki")
    }
}

/// Two nonce commitments (`L`, `R`) one multisig cosigner publishes
/// before signing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultisigLR {
    pub l: Key,
    pub r: Key,
}

impl Versioned for MultisigLR {
    const TYPE_NAME: &'static str = "MultisigLR";
    const CURRENT_VERSION: u32 = 1;
}

impl Message for MultisigLR {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let _version = ar.version::<Self>()?;
        self.l.serialize(ar).ctx_field("L")?;
        self.r.serialize(ar).ctx_field("R")
    }
}

/// One cosigner's contribution to an in-progress multisig signing round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultisigInfo {
    pub signer: Key,
    pub lr: Vec<MultisigLR>,
    pub partial_key_images: Vec<Key>,
}

impl Versioned for MultisigInfo {
    const TYPE_NAME: &'static str = "MultisigInfo";
    const CURRENT_VERSION: u32 = 1;
}

impl Message for MultisigInfo {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let _version = ar.version::<Self>()?;
        self.signer.serialize(ar).ctx_field("signer")?;
        container_versioned(ar, &mut self.lr).ctx_field("LR")?;
        container(ar, &mut self.partial_key_images).ctx_field("partial_key_images")
    }
}

/// A wallet's local record of one received output: where it came from,
/// whether it's been spent, and the multisig bookkeeping layered on top.
///
/// Versioned 9..=11 (current 11) — the version numbers match the wallet
/// cache format's own generation counter rather than starting from 1, so
/// the gaps below 9 are simply versions this crate never needs to read.
/// Version 10 adds `m_key_image_requested`; version 11 further adds
/// `m_uses`. Both are appended fields, defaulted when absent on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDetails {
    pub block_height: u64,
    pub tx: TransactionPrefix,
    pub txid: Key,
    pub internal_output_index: u64,
    pub global_output_index: u64,
    pub spent: bool,
    pub spent_height: u64,
    pub key_image: Key,
    pub mask: Key,
    pub amount: u64,
    pub rct: bool,
    pub key_image_known: bool,
    pub pk_index: u64,
    pub subaddr_index: SubaddressIndex,
    pub key_image_partial: bool,
    pub multisig_k: Vec<Key>,
    pub multisig_info: Vec<MultisigInfo>,
    pub key_image_requested: bool,
    pub uses: Vec<(u64, Key)>,
}

impl Versioned for TransferDetails {
    const TYPE_NAME: &'static str = "TransferDetails";
    const CURRENT_VERSION: u32 = 11;
}

impl Message for TransferDetails {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let version = ar.version::<Self>()?;
        ar.u64(&mut self.block_height).ctx_field("m_block_height")?;
        self.tx.serialize(ar).ctx_field("m_tx")?;
        self.txid.serialize(ar).ctx_field("m_txid")?;
        ar.uvarint(&mut self.internal_output_index)
            .ctx_field("m_internal_output_index")?;
        ar.u64(&mut self.global_output_index).ctx_field("m_global_output_index")?;
        ar.boolean(&mut self.spent).ctx_field("m_spent")?;
        ar.u64(&mut self.spent_height).ctx_field("m_spent_height")?;
        self.key_image.serialize(ar).ctx_field("m_key_image")?;
        self.mask.serialize(ar).ctx_field("m_mask")?;
        ar.u64(&mut self.amount).ctx_field("m_amount")?;
        ar.boolean(&mut self.rct).ctx_field("m_rct")?;
        ar.boolean(&mut self.key_image_known).ctx_field("m_key_image_known")?;
        ar.uvarint(&mut self.pk_index).ctx_field("m_pk_index")?;
        self.subaddr_index.serialize(ar).ctx_field("m_subaddr_index")?;
        ar.boolean(&mut self.key_image_partial)
            .ctx_field("m_key_image_partial")?;
        container(ar, &mut self.multisig_k).ctx_field("m_multisig_k")?;
        container(ar, &mut self.multisig_info).ctx_field("m_multisig_info")?;

        if version >= 10 {
            ar.boolean(&mut self.key_image_requested)
                .ctx_field("m_key_image_requested")?;
        }
        if version >= 11 {
            let mut len = self.uses.len();
            ar.container_len(&mut len).ctx_field("m_uses")?;
            if ar.dir().is_load() {
                self.uses = Vec::with_capacity(len.min(1 << 16));
                for i in 0..len {
                    let mut arity = 2usize;
                    ar.tuple_arity(&mut arity).ctx_index(i)?;
                    let mut idx = 0u64;
                    let mut hash = Key::default();
                    ar.uvarint(&mut idx).ctx_index(i)?;
                    hash.serialize(ar).ctx_index(i)?;
                    self.uses.push((idx, hash));
                }
            } else {
                for (i, (idx, hash)) in self.uses.iter_mut().enumerate() {
                    let mut arity = 2usize;
                    ar.tuple_arity(&mut arity).ctx_index(i)?;
                    ar.uvarint(idx).ctx_index(i)?;
                    hash.serialize(ar).ctx_index(i)?;
                }
            }
        }
        Ok(())
    }
}

/// The Bulletproof range-proof configuration a transaction under
/// construction will use, replacing the plain `use_bulletproofs` flag as
/// of [`TxConstructionData`] version 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RctConfig {
    pub range_proof_type: u64,
    pub bp_version: u64,
}

impl Message for RctConfig {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        ar.uvarint(&mut self.range_proof_type).ctx_field("range_proof_type")?;
        ar.uvarint(&mut self.bp_version).ctx_field("bp_version")
    }
}

/// Everything a wallet recorded about how it built one not-yet-signed
/// transaction — enough to resume signing later (e.g. on an offline
/// signer) without re-deriving the spend plan.
///
/// Versioned 2..=4 (current 4): version 3 appended `use_bulletproofs`;
/// version 4 replaced it with the richer [`RctConfig`]. Both in-memory
/// fields are always kept mutually consistent regardless of which one
/// the wire actually carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxConstructionData {
    pub sources: Vec<TxSourceEntry>,
    pub change_dts: TxDestinationEntry,
    pub splitted_dsts: Vec<TxDestinationEntry>,
    pub selected_transfers: Vec<u64>,
    pub extra: Vec<u8>,
    pub unlock_time: u64,
    pub use_rct: bool,
    pub dests: Vec<TxDestinationEntry>,
    pub subaddr_account: u32,
    pub subaddr_indices: Vec<u64>,
    pub use_bulletproofs: bool,
    pub rct_config: RctConfig,
}

impl Versioned for TxConstructionData {
    const TYPE_NAME: &'static str = "TxConstructionData";
    const CURRENT_VERSION: u32 = 4;
}

impl Message for TxConstructionData {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let version = ar.version::<Self>()?;
        container(ar, &mut self.sources).ctx_field("sources")?;
        self.change_dts.serialize(ar).ctx_field("change_dts")?;
        container(ar, &mut self.splitted_dsts).ctx_field("splitted_dsts")?;
        container_uvarint64(ar, &mut self.selected_transfers).ctx_field("selected_transfers")?;
        container_u8(ar, &mut self.extra).ctx_field("extra")?;
        ar.u64(&mut self.unlock_time).ctx_field("unlock_time")?;
        ar.boolean(&mut self.use_rct).ctx_field("use_rct")?;
        container(ar, &mut self.dests).ctx_field("dests")?;
        ar.u32(&mut self.subaddr_account).ctx_field("subaddr_account")?;
        container_uvarint64(ar, &mut self.subaddr_indices).ctx_field("subaddr_indices")?;

        if version == 3 {
            ar.boolean(&mut self.use_bulletproofs).ctx_field("use_bulletproofs")?;
            if ar.dir().is_load() {
                self.rct_config = RctConfig {
                    range_proof_type: u64::from(self.use_bulletproofs),
                    bp_version: 0,
                };
            }
        } else if version >= 4 {
            self.rct_config.serialize(ar).ctx_field("rct_config")?;
            if ar.dir().is_load() {
                self.use_bulletproofs = self.rct_config.range_proof_type != 0;
            }
        }
        Ok(())
    }
}

/// A fully-built, not-yet-broadcast transaction plus the bookkeeping
/// needed to sign or re-derive it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTransaction {
    pub tx: Transaction,
    pub dust: u64,
    pub fee: u64,
    pub dust_added_to_fee: bool,
    pub change_dts: TxDestinationEntry,
    pub selected_transfers: Vec<u64>,
    pub key_images: String,
    pub tx_key: Key,
    pub additional_tx_keys: Vec<Key>,
    pub dests: Vec<TxDestinationEntry>,
    pub construction_data: TxConstructionData,
}

impl Versioned for PendingTransaction {
    const TYPE_NAME: &'static str = "PendingTransaction";
    const CURRENT_VERSION: u32 = 1;
}

impl PendingTransaction {
    /// `Transaction` walks with a custom method rather than [`Message`],
    /// so `PendingTransaction` can't derive a [`Message`] impl purely
    /// from field declarations — this mirrors it by hand.
    pub fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let _version = ar.version::<Self>()?;
        self.tx.serialize(ar).ctx_field("tx")?;
        ar.uvarint(&mut self.dust).ctx_field("dust")?;
        ar.uvarint(&mut self.fee).ctx_field("fee")?;
        ar.boolean(&mut self.dust_added_to_fee).ctx_field("dust_added_to_fee")?;
        self.change_dts.serialize(ar).ctx_field("change_dts")?;
        container_uvarint64(ar, &mut self.selected_transfers).ctx_field("selected_transfers")?;
        ar.string(&mut self.key_images).ctx_field("key_images")?;
        self.tx_key.serialize(ar).ctx_field("tx_key")?;
        container(ar, &mut self.additional_tx_keys).ctx_field("additional_tx_keys")?;
        container(ar, &mut self.dests).ctx_field("dests")?;
        self.construction_data.serialize(ar).ctx_field("construction_data")
    }
}

/// An exported bundle of not-yet-signed transactions plus the transfer
/// cache slice they were built against, ready to move to an offline
/// signer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsignedTxSet {
    pub txes: Vec<TxConstructionData>,
    /// The cache index the following `transfers` slice starts at —
    /// incremental exports only ship the transfers the recipient doesn't
    /// already have.
    pub transfers_base_index: u64,
    pub transfers: Vec<TransferDetails>,
}

impl Versioned for UnsignedTxSet {
    const TYPE_NAME: &'static str = "UnsignedTxSet";
    const CURRENT_VERSION: u32 = 1;
}

impl Message for UnsignedTxSet {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let _version = ar.version::<Self>()?;
        container(ar, &mut self.txes).ctx_field("txes")?;
        let mut arity = 2usize;
        ar.tuple_arity(&mut arity).ctx_field("transfers")?;
        ar.uvarint(&mut self.transfers_base_index)
            .ctx_index(0)
            .ctx_field("transfers")?;
        container(ar, &mut self.transfers).ctx_index(1).ctx_field("transfers")
    }
}

/// A signed, ready-to-broadcast transaction bundle: every
/// [`PendingTransaction`] plus the key images its inputs now commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedTxSet {
    pub ptx: Vec<PendingTransaction>,
    pub key_images: Vec<Key>,
}

impl Versioned for SignedTxSet {
    const TYPE_NAME: &'static str = "SignedTxSet";
    const CURRENT_VERSION: u32 = 1;
}

impl SignedTxSet {
    /// Hand-rolled for the same reason as [`PendingTransaction::serialize`]
    /// — its `ptx` elements don't implement [`Message`].
    pub fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let _version = ar.version::<Self>()?;
        let mut len = self.ptx.len();
        ar.container_len(&mut len).ctx_field("ptx")?;
        if ar.dir().is_load() {
            self.ptx = Vec::with_capacity(len.min(1 << 16));
            for i in 0..len {
                let mut ptx = PendingTransaction::default();
                ptx.serialize(ar).ctx_index(i)?;
                self.ptx.push(ptx);
            }
        } else {
            for (i, ptx) in self.ptx.iter_mut().enumerate() {
                ptx.serialize(ar).ctx_index(i)?;
            }
        }
        container(ar, &mut self.key_images).ctx_field("key_images")
    }
}

/// An in-progress multisig transaction bundle, shared among cosigners
/// until enough signatures accumulate to broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultisigTxSet {
    pub txes: Vec<TxConstructionData>,
    pub sign_count: u64,
    pub signers: Vec<Key>,
}

impl Versioned for MultisigTxSet {
    const TYPE_NAME: &'static str = "MultisigTxSet";
    const CURRENT_VERSION: u32 = 1;
}

impl Message for MultisigTxSet {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let _version = ar.version::<Self>()?;
        container(ar, &mut self.txes).ctx_field("txes")?;
        ar.uvarint(&mut self.sign_count).ctx_field("m_sign_count")?;
        container(ar, &mut self.signers).ctx_field("m_signers")
    }
}
