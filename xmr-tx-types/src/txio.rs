//! Transaction inputs, outputs, and the unversioned prefix they sit in.

use xmr_codec::archive::{Archive, TagKind};
use xmr_codec::error::{Context, Error, Result, Traced};
use xmr_codec::{container, Message};
use xmr_crypto::Key;

use crate::container_ext::{container_u8, container_uvarint128};

/// A block height, carried by the single no-input-required "generation"
/// input every coinbase transaction has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxinGen {
    pub height: u64,
}

impl Message for TxinGen {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        ar.uvarint(&mut self.height).ctx_field("height")
    }
}

/// Legacy script input kind. Never populated by any transaction on the
/// live network; carried only because the variant dispatch tables name
/// it, matching the source's own empty-bodied stub.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxinToScript;

impl Message for TxinToScript {
    fn serialize<A: Archive>(&mut self, _ar: &mut A) -> Result<()> {
        Ok(())
    }
}

/// Legacy script-hash input kind; see [`TxinToScript`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxinToScriptHash;

impl Message for TxinToScriptHash {
    fn serialize<A: Archive>(&mut self, _ar: &mut A) -> Result<()> {
        Ok(())
    }
}

/// A ring-signed key input: the real output's amount (zero once RingCT
/// hides amounts), the ring member offsets (relative, not absolute —
/// see the wide varint below), and the key image preventing double spend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxinToKey {
    pub amount: u64,
    /// Ring member offsets. These are occasionally observed beyond 64
    /// bits (absolute offsets before the relative-delta transform can
    /// exceed it for very large output sets), so each offset is decoded
    /// into a `u128` rather than truncated.
    pub key_offsets: Vec<u128>,
    pub k_image: Key,
}

impl Message for TxinToKey {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        ar.uvarint(&mut self.amount).ctx_field("amount")?;
        container_uvarint128(ar, &mut self.key_offsets).ctx_field("key_offsets")?;
        self.k_image.serialize(ar).ctx_field("k_image")
    }
}

/// The number of ring signatures a version-1 transaction must carry for
/// one input: zero for the script/generation kinds, one per ring member
/// for a key input.
fn expected_signature_count(input: &TxInV) -> usize {
    match input {
        TxInV::Gen(_) | TxInV::ToScript(_) | TxInV::ToScriptHash(_) => 0,
        TxInV::ToKey(k) => k.key_offsets.len(),
    }
}

/// The tagged union of transaction input kinds.
///
/// Both the blockchain and the Boost archive write exactly one tag byte
/// naming the active alternative then its body; the two formats disagree
/// on which byte value names which alternative (see [`Self::blockchain_tag`]
/// / [`Self::boost_tag`]), so every load/dump consults [`Archive::tag_kind`]
/// before picking a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxInV {
    Gen(TxinGen),
    ToScript(TxinToScript),
    ToScriptHash(TxinToScriptHash),
    ToKey(TxinToKey),
}

impl Default for TxInV {
    fn default() -> Self {
        TxInV::ToKey(TxinToKey::default())
    }
}

impl TxInV {
    fn blockchain_tag(&self) -> u8 {
        match self {
            TxInV::Gen(_) => 0xff,
            TxInV::ToScript(_) => 0x00,
            TxInV::ToScriptHash(_) => 0x01,
            TxInV::ToKey(_) => 0x02,
        }
    }

    fn boost_tag(&self) -> u8 {
        match self {
            TxInV::Gen(_) => 0x00,
            TxInV::ToScript(_) => 0x01,
            TxInV::ToScriptHash(_) => 0x02,
            TxInV::ToKey(_) => 0x03,
        }
    }

    fn tag_for(&self, kind: TagKind) -> u8 {
        match kind {
            TagKind::Blockchain => self.blockchain_tag(),
            TagKind::Boost => self.boost_tag(),
        }
    }

    fn from_tag(kind: TagKind, tag: u8) -> Result<Self> {
        let matched = match kind {
            TagKind::Blockchain => match tag {
                0xff => Some(TxInV::Gen(TxinGen::default())),
                0x00 => Some(TxInV::ToScript(TxinToScript)),
                0x01 => Some(TxInV::ToScriptHash(TxinToScriptHash)),
                0x02 => Some(TxInV::ToKey(TxinToKey::default())),
                _ => None,
            },
            TagKind::Boost => match tag {
                0x00 => Some(TxInV::Gen(TxinGen::default())),
                0x01 => Some(TxInV::ToScript(TxinToScript)),
                0x02 => Some(TxInV::ToScriptHash(TxinToScriptHash)),
                0x03 => Some(TxInV::ToKey(TxinToKey::default())),
                _ => None,
            },
        };
        matched.ok_or_else(|| Traced::new(Error::UnknownVariantTag(tag, "TxInV")))
    }
}

impl Message for TxInV {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let mut tag = self.tag_for(ar.tag_kind());
        ar.variant_tag(&mut tag)?;
        if ar.dir().is_load() {
            *self = Self::from_tag(ar.tag_kind(), tag)?;
        }
        match self {
            TxInV::Gen(v) => v.serialize(ar).ctx_alt("txin_gen"),
            TxInV::ToScript(v) => v.serialize(ar).ctx_alt("txin_to_script"),
            TxInV::ToScriptHash(v) => v.serialize(ar).ctx_alt("txin_to_scripthash"),
            TxInV::ToKey(v) => v.serialize(ar).ctx_alt("txin_to_key"),
        }
    }
}

/// An output destined for a one-time public key — the only output kind a
/// modern transaction ever actually carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxoutToKey {
    pub key: Key,
}

impl Message for TxoutToKey {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.key.serialize(ar).ctx_field("key")
    }
}

/// Legacy script output kind; see [`TxinToScript`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxoutToScript {
    pub keys: Vec<Key>,
    pub script: Vec<u8>,
}

impl Message for TxoutToScript {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        container(ar, &mut self.keys).ctx_field("keys")?;
        container_u8(ar, &mut self.script).ctx_field("script")
    }
}

/// Legacy script-hash output kind; see [`TxinToScript`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxoutToScriptHash {
    pub hash: Key,
}

impl Message for TxoutToScriptHash {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.hash.serialize(ar).ctx_field("hash")
    }
}

/// The tagged union of transaction output targets. See [`TxInV`] for the
/// two-tag-table dispatch this mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxoutTargetV {
    ToScript(TxoutToScript),
    ToScriptHash(TxoutToScriptHash),
    ToKey(TxoutToKey),
}

impl Default for TxoutTargetV {
    fn default() -> Self {
        TxoutTargetV::ToKey(TxoutToKey::default())
    }
}

impl TxoutTargetV {
    fn blockchain_tag(&self) -> u8 {
        match self {
            TxoutTargetV::ToScript(_) => 0x00,
            TxoutTargetV::ToScriptHash(_) => 0x01,
            TxoutTargetV::ToKey(_) => 0x02,
        }
    }

    fn boost_tag(&self) -> u8 {
        // Declared in the same order under both codecs, so the sequential
        // Boost assignment happens to coincide with the blockchain tags —
        // unlike TxInV, where the generation input's blockchain tag 0xff
        // breaks the pattern.
        self.blockchain_tag()
    }

    fn tag_for(&self, kind: TagKind) -> u8 {
        match kind {
            TagKind::Blockchain => self.blockchain_tag(),
            TagKind::Boost => self.boost_tag(),
        }
    }

    fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0x00 => Ok(TxoutTargetV::ToScript(TxoutToScript::default())),
            0x01 => Ok(TxoutTargetV::ToScriptHash(TxoutToScriptHash::default())),
            0x02 => Ok(TxoutTargetV::ToKey(TxoutToKey::default())),
            other => Err(Traced::new(Error::UnknownVariantTag(other, "TxoutTargetV"))),
        }
    }
}

impl Message for TxoutTargetV {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let mut tag = self.tag_for(ar.tag_kind());
        ar.variant_tag(&mut tag)?;
        if ar.dir().is_load() {
            *self = Self::from_tag(tag)?;
        }
        match self {
            TxoutTargetV::ToScript(v) => v.serialize(ar).ctx_alt("txout_to_script"),
            TxoutTargetV::ToScriptHash(v) => v.serialize(ar).ctx_alt("txout_to_scripthash"),
            TxoutTargetV::ToKey(v) => v.serialize(ar).ctx_alt("txout_to_key"),
        }
    }
}

/// One transaction output: an amount (zero once RingCT hides it in
/// `RctSigBase::ecdh_info`) and its target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxOut {
    pub amount: u64,
    pub target: TxoutTargetV,
}

impl Message for TxOut {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        ar.uvarint(&mut self.amount).ctx_field("amount")?;
        self.target.serialize(ar).ctx_field("target")
    }
}

/// The unconditional, unversioned part of a transaction shared by every
/// protocol era: version tag, unlock time, inputs, outputs and the opaque
/// `extra` byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPrefix {
    pub version: u64,
    pub unlock_time: u64,
    pub vin: Vec<TxInV>,
    pub vout: Vec<TxOut>,
    pub extra: Vec<u8>,
}

impl TransactionPrefix {
    /// The per-input expected ring-signature count a version-1
    /// transaction must satisfy — see [`crate::Transaction`]'s custom
    /// serialize routine.
    pub(crate) fn expected_signature_counts(&self) -> Vec<usize> {
        self.vin.iter().map(expected_signature_count).collect()
    }
}

impl Message for TransactionPrefix {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        ar.uvarint(&mut self.version).ctx_field("version")?;
        ar.uvarint(&mut self.unlock_time).ctx_field("unlock_time")?;
        container(ar, &mut self.vin).ctx_field("vin")?;
        container(ar, &mut self.vout).ctx_field("vout")?;
        container_u8(ar, &mut self.extra).ctx_field("extra")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmr_archives::{BlockchainArchive, HardForkProfile};
    use xmr_codec::io::{SliceReader, VecWriter};

    #[test]
    fn transaction_prefix_round_trips() {
        let mut prefix = TransactionPrefix {
            version: 2,
            unlock_time: 0,
            vin: vec![TxInV::ToKey(TxinToKey {
                amount: 0,
                key_offsets: vec![5, 9, 1u128 << 76],
                k_image: Key::from([3u8; 32]),
            })],
            vout: vec![TxOut {
                amount: 1000,
                target: TxoutTargetV::ToKey(TxoutToKey { key: Key::from([4u8; 32]) }),
            }],
            extra: vec![1, 2, 3],
        };

        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            prefix.serialize(&mut ar).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = TransactionPrefix::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        loaded.serialize(&mut ar).unwrap();

        assert_eq!(loaded, prefix);
    }

    #[test]
    fn unknown_blockchain_variant_tag_is_rejected() {
        let bytes = [0x05u8];
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        let mut input = TxInV::default();
        assert!(input.serialize(&mut ar).is_err());
    }
}
