//! Ring-confidential transaction signatures: the per-output amount
//! commitments and the ring signatures proving a spend without revealing
//! which ring member is real.
//!
//! [`RctSigBase`] and [`RctSigPrunable`] are not ordinary [`Message`]
//! implementations — their shape depends on a `type` byte and on the
//! caller-supplied `inputs`/`outputs`/`mixin` counts, so each carries a
//! custom `serialize_rctsig_*` method instead, called directly by
//! [`crate::transaction::Transaction`].

use xmr_codec::archive::Archive;
use xmr_codec::error::{Context, Error, Result, Traced};
use xmr_codec::{container, Message};
use xmr_crypto::Key;

use crate::container_ext::fixed_key_vec;

/// A Pedersen commitment to an output's amount, plus the one-time
/// destination key it pairs with.
///
/// `dest` never actually rides the wire inside [`RctSigBase::out_pk`] —
/// only `mask` does, with `dest` synthesized as `0x01` followed by 31
/// zero bytes on load (see [`RctSigBase::serialize_rctsig_base`]) — so
/// this type's own [`Message`] impl, which serializes both fields, is
/// only ever exercised directly by callers outside that custom routine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtKey {
    pub dest: Key,
    pub mask: Key,
}

impl CtKey {
    /// The fixed placeholder `dest` every `outPk` entry is assigned when
    /// loaded off the wire, since only `mask` is ever transmitted there.
    pub fn synthetic_dest() -> Key {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        Key::from(bytes)
    }
}

impl Message for CtKey {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.dest.serialize(ar).ctx_field("dest")?;
        self.mask.serialize(ar).ctx_field("mask")
    }
}

/// The encrypted amount and blinding mask attached to one output.
///
/// Only ever fully round-tripped this way for [`RctType::Full`] and
/// [`RctType::Simple`]; the newer rct flavors truncate `amount` to its
/// first 8 bytes on the wire, which [`RctSigBase::serialize_rctsig_base`]
/// handles directly rather than through this type's [`Message`] impl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcdhTuple {
    pub mask: Key,
    pub amount: Key,
}

impl Message for EcdhTuple {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.mask.serialize(ar).ctx_field("mask")?;
        self.amount.serialize(ar).ctx_field("amount")
    }
}

/// A Borromean ring signature over 64 bits, used by the original
/// (non-Bulletproof) range proof.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoroSig {
    pub s0: Vec<Key>,
    pub s1: Vec<Key>,
    pub ee: Key,
}

impl Message for BoroSig {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        fixed_key_vec(ar, &mut self.s0, 64).ctx_field("s0")?;
        fixed_key_vec(ar, &mut self.s1, 64).ctx_field("s1")?;
        self.ee.serialize(ar).ctx_field("ee")
    }
}

/// The pre-Bulletproof range proof: one [`BoroSig`] per bit, plus the 64
/// per-bit commitments it's proving over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSig {
    pub asig: BoroSig,
    pub ci: Vec<Key>,
}

impl Message for RangeSig {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.asig.serialize(ar).ctx_field("asig")?;
        fixed_key_vec(ar, &mut self.ci, 64).ctx_field("Ci")
    }
}

/// A single Bulletproof range proof, batched across every output of a
/// `Bulletproof`/`Bulletproof2` transaction. `v` (the committed values) is
/// never transmitted — it's recomputed from the outputs' commitments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bulletproof {
    pub a: Key,
    pub s: Key,
    pub t1: Key,
    pub t2: Key,
    pub taux: Key,
    pub mu: Key,
    pub l: Vec<Key>,
    pub r: Vec<Key>,
    pub a_scalar: Key,
    pub b: Key,
    pub t: Key,
}

impl Message for Bulletproof {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.a.serialize(ar).ctx_field("A")?;
        self.s.serialize(ar).ctx_field("S")?;
        self.t1.serialize(ar).ctx_field("T1")?;
        self.t2.serialize(ar).ctx_field("T2")?;
        self.taux.serialize(ar).ctx_field("taux")?;
        self.mu.serialize(ar).ctx_field("mu")?;
        container(ar, &mut self.l).ctx_field("L")?;
        container(ar, &mut self.r).ctx_field("R")?;
        self.a_scalar.serialize(ar).ctx_field("a")?;
        self.b.serialize(ar).ctx_field("b")?;
        self.t.serialize(ar).ctx_field("t")
    }
}

/// A Bulletproof+ range proof — the successor format to [`Bulletproof`],
/// with a smaller proof size. `v` is likewise never on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletproofPlus {
    pub a: Key,
    pub a1: Key,
    pub b: Key,
    pub r1: Key,
    pub s1: Key,
    pub d1: Key,
    pub l: Vec<Key>,
    pub r: Vec<Key>,
}

impl Message for BulletproofPlus {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.a.serialize(ar).ctx_field("A")?;
        self.a1.serialize(ar).ctx_field("A1")?;
        self.b.serialize(ar).ctx_field("B")?;
        self.r1.serialize(ar).ctx_field("r1")?;
        self.s1.serialize(ar).ctx_field("s1")?;
        self.d1.serialize(ar).ctx_field("d1")?;
        container(ar, &mut self.l).ctx_field("L")?;
        container(ar, &mut self.r).ctx_field("R")
    }
}

/// One MLSAG ring signature. Its `ss` matrix has a shape (`mixin+1` rows
/// of `m` columns each) that depends on the enclosing [`RctType`] and
/// input/output counts, so it cannot be walked by a plain [`Message`]
/// impl — see [`serialize_mg_sig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MgSig {
    pub ss: Vec<Vec<Key>>,
    pub cc: Key,
}

/// Walk one [`MgSig`] with `rows` (`mixin+1`) rows of `cols` keys each,
/// each row written back-to-back with no per-row length prefix — the
/// shape is implied entirely by `rows`/`cols`, never carried on the wire.
pub fn serialize_mg_sig<A: Archive>(
    ar: &mut A,
    sig: &mut MgSig,
    rows: usize,
    cols: usize,
) -> Result<()> {
    if ar.dir().is_load() {
        sig.ss = Vec::with_capacity(rows.min(1 << 16));
        for r in 0..rows {
            let mut row = Vec::new();
            fixed_key_vec(ar, &mut row, cols).ctx_index(r).ctx_field("ss")?;
            sig.ss.push(row);
        }
    } else {
        if sig.ss.len() != rows {
            return Err(Traced::new(Error::SizeMismatch {
                expected: rows,
                found: sig.ss.len(),
            })
            .with_step(xmr_codec::error::PathStep::Field("ss")));
        }
        for (r, row) in sig.ss.iter_mut().enumerate() {
            fixed_key_vec(ar, row, cols).ctx_index(r).ctx_field("ss")?;
        }
    }
    sig.cc.serialize(ar).ctx_field("cc")
}

/// A CLSAG ring signature — the successor to [`MgSig`], carrying one
/// scalar per ring member instead of a full matrix. Like [`MgSig`], its
/// `s` vector's length depends on the enclosing `mixin`, so it needs
/// [`serialize_clsag`] rather than a plain [`Message`] impl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clsag {
    pub s: Vec<Key>,
    pub c1: Key,
    pub d: Key,
}

/// Walk one [`Clsag`] whose `s` vector has exactly `mixin + 1` entries,
/// written back-to-back with no length prefix — the count follows from
/// the ring size alone, same as [`serialize_mg_sig`]'s rows.
pub fn serialize_clsag<A: Archive>(ar: &mut A, clsag: &mut Clsag, mixin: usize) -> Result<()> {
    fixed_key_vec(ar, &mut clsag.s, mixin + 1).ctx_field("s")?;
    clsag.c1.serialize(ar).ctx_field("c1")?;
    clsag.d.serialize(ar).ctx_field("D")
}

/// Which ring-confidential signature flavor a transaction uses.
///
/// `Bulletproof`/`Bulletproof2` keep the historical `FullBulletproof`/
/// `SimpleBulletproof` names as aliases — the underlying numeric values
/// never changed when the newer names were introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RctType {
    Null = 0,
    Full = 1,
    Simple = 2,
    Bulletproof = 3,
    Bulletproof2 = 4,
    Clsag = 5,
    BulletproofPlus = 6,
}

impl RctType {
    pub const FULL_BULLETPROOF: RctType = RctType::Bulletproof;
    pub const SIMPLE_BULLETPROOF: RctType = RctType::Bulletproof2;

    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(RctType::Null),
            1 => Ok(RctType::Full),
            2 => Ok(RctType::Simple),
            3 => Ok(RctType::Bulletproof),
            4 => Ok(RctType::Bulletproof2),
            5 => Ok(RctType::Clsag),
            6 => Ok(RctType::BulletproofPlus),
            other => Err(Traced::new(Error::UnknownRctType(other))),
        }
    }

    fn uses_truncated_ecdh(self) -> bool {
        matches!(self, RctType::Bulletproof2 | RctType::Clsag | RctType::BulletproofPlus)
    }
}

impl Default for RctType {
    fn default() -> Self {
        RctType::Null
    }
}

/// The unconditionally-transmitted half of a ring-confidential signature:
/// the transaction fee, the ring members every input draws from, and the
/// per-output amount commitments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RctSigBase {
    pub rct_type: RctType,
    pub txn_fee: u64,
    pub message: Key,
    pub mix_ring: Vec<Vec<CtKey>>,
    pub pseudo_outs: Vec<Key>,
    pub ecdh_info: Vec<EcdhTuple>,
    pub out_pk: Vec<CtKey>,
}

impl RctSigBase {
    /// Walk this half of the signature for a transaction with `inputs`
    /// ring-signed inputs and `outputs` outputs. `message` and `mix_ring`
    /// are never written here — the wire format reconstructs them from
    /// the surrounding transaction, so only the fields this routine
    /// itself names ever move.
    pub fn serialize_rctsig_base<A: Archive>(
        &mut self,
        ar: &mut A,
        inputs: usize,
        outputs: usize,
    ) -> Result<()> {
        let mut type_byte = self.rct_type as u8;
        ar.u8(&mut type_byte).ctx_field("type")?;
        if ar.dir().is_load() {
            self.rct_type = RctType::from_u8(type_byte)?;
        }
        if self.rct_type == RctType::Null {
            return Ok(());
        }
        if !matches!(
            self.rct_type,
            RctType::Full
                | RctType::Simple
                | RctType::Bulletproof
                | RctType::Bulletproof2
                | RctType::Clsag
                | RctType::BulletproofPlus
        ) {
            return Err(Traced::new(Error::UnknownRctType(type_byte)));
        }

        ar.uvarint(&mut self.txn_fee).ctx_field("txnFee")?;

        if self.rct_type == RctType::Simple {
            fixed_key_vec(ar, &mut self.pseudo_outs, inputs).ctx_field("pseudoOuts")?;
        }

        if ar.dir().is_load() {
            self.ecdh_info = Vec::with_capacity(outputs.min(1 << 16));
        } else if self.ecdh_info.len() != outputs {
            return Err(Traced::new(Error::SizeMismatch {
                expected: outputs,
                found: self.ecdh_info.len(),
            })
            .with_step(xmr_codec::error::PathStep::Field("ecdhInfo")));
        }
        for i in 0..outputs {
            if ar.dir().is_load() {
                let mut tuple = EcdhTuple::default();
                if self.rct_type.uses_truncated_ecdh() {
                    let mut amount = [0u8; 8];
                    ar.blob_fixed(&mut amount).ctx_index(i)?;
                    let mut full = [0u8; 32];
                    full[..8].copy_from_slice(&amount);
                    tuple.amount = Key::from(full);
                } else {
                    tuple.serialize(ar).ctx_index(i)?;
                }
                self.ecdh_info.push(tuple);
            } else {
                let tuple = &mut self.ecdh_info[i];
                if self.rct_type.uses_truncated_ecdh() {
                    let mut amount = [0u8; 8];
                    amount.copy_from_slice(&tuple.amount.as_bytes()[..8]);
                    ar.blob_fixed(&mut amount).ctx_index(i)?;
                } else {
                    tuple.serialize(ar).ctx_index(i)?;
                }
            }
        }

        if ar.dir().is_load() {
            self.out_pk = Vec::with_capacity(outputs.min(1 << 16));
        } else if self.out_pk.len() != outputs {
            return Err(Traced::new(Error::SizeMismatch {
                expected: outputs,
                found: self.out_pk.len(),
            })
            .with_step(xmr_codec::error::PathStep::Field("outPk")));
        }
        for i in 0..outputs {
            if ar.dir().is_load() {
                let mut mask = Key::default();
                mask.serialize(ar).ctx_index(i)?;
                self.out_pk.push(CtKey {
                    dest: CtKey::synthetic_dest(),
                    mask,
                });
            } else {
                self.out_pk[i].mask.serialize(ar).ctx_index(i)?;
            }
        }
        Ok(())
    }
}

/// The prunable half of a ring-confidential signature: the range proofs
/// and ring signatures themselves. Absent entirely once `rct_type ==
/// Null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RctSigPrunable {
    pub range_sigs: Vec<RangeSig>,
    pub bulletproofs: Vec<Bulletproof>,
    pub bulletproofs_plus: Vec<BulletproofPlus>,
    pub mgs: Vec<MgSig>,
    pub clsags: Vec<Clsag>,
    pub pseudo_outs: Vec<Key>,
}

impl RctSigPrunable {
    /// Walk this half of the signature. `mixin` is the ring size minus
    /// one, taken from the transaction's first `TxinToKey` input.
    pub fn serialize_rctsig_prunable<A: Archive>(
        &mut self,
        ar: &mut A,
        rct_type: RctType,
        inputs: usize,
        outputs: usize,
        mixin: usize,
    ) -> Result<()> {
        if rct_type == RctType::Null {
            return Ok(());
        }

        match rct_type {
            RctType::BulletproofPlus => {
                let mut count = self.bulletproofs_plus.len();
                ar.container_len(&mut count).ctx_field("bp")?;
                if ar.dir().is_load() {
                    self.bulletproofs_plus = Vec::with_capacity(count.min(1 << 16));
                    for i in 0..count {
                        let mut bp = BulletproofPlus::default();
                        bp.serialize(ar).ctx_index(i)?;
                        self.bulletproofs_plus.push(bp);
                    }
                } else {
                    for (i, bp) in self.bulletproofs_plus.iter_mut().enumerate() {
                        bp.serialize(ar).ctx_index(i)?;
                    }
                }
            }
            RctType::Bulletproof | RctType::Bulletproof2 | RctType::Clsag => {
                let mut count64 = self.bulletproofs.len() as u64;
                if rct_type == RctType::Bulletproof {
                    let mut count32 = count64 as u32;
                    ar.u32(&mut count32).ctx_field("bp")?;
                    count64 = count32 as u64;
                } else {
                    ar.uvarint(&mut count64).ctx_field("bp")?;
                }
                let count = count64 as usize;
                if ar.dir().is_load() {
                    self.bulletproofs = Vec::with_capacity(count.min(1 << 16));
                    for i in 0..count {
                        let mut bp = Bulletproof::default();
                        bp.serialize(ar).ctx_index(i)?;
                        self.bulletproofs.push(bp);
                    }
                } else {
                    for (i, bp) in self.bulletproofs.iter_mut().enumerate() {
                        bp.serialize(ar).ctx_index(i)?;
                    }
                }
            }
            _ => {
                if ar.dir().is_load() {
                    self.range_sigs = Vec::with_capacity(outputs.min(1 << 16));
                    for i in 0..outputs {
                        let mut rs = RangeSig::default();
                        rs.serialize(ar).ctx_index(i)?;
                        self.range_sigs.push(rs);
                    }
                } else {
                    if self.range_sigs.len() != outputs {
                        return Err(Traced::new(Error::SizeMismatch {
                            expected: outputs,
                            found: self.range_sigs.len(),
                        })
                        .with_step(xmr_codec::error::PathStep::Field("rangeSigs")));
                    }
                    for (i, rs) in self.range_sigs.iter_mut().enumerate() {
                        rs.serialize(ar).ctx_index(i)?;
                    }
                }
            }
        }

        if matches!(rct_type, RctType::Clsag | RctType::BulletproofPlus) {
            if ar.dir().is_load() {
                self.clsags = Vec::with_capacity(inputs.min(1 << 16));
                for i in 0..inputs {
                    let mut clsag = Clsag::default();
                    serialize_clsag(ar, &mut clsag, mixin).ctx_index(i)?;
                    self.clsags.push(clsag);
                }
            } else {
                if self.clsags.len() != inputs {
                    return Err(Traced::new(Error::SizeMismatch {
                        expected: inputs,
                        found: self.clsags.len(),
                    })
                    .with_step(xmr_codec::error::PathStep::Field("CLSAGs")));
                }
                for (i, clsag) in self.clsags.iter_mut().enumerate() {
                    serialize_clsag(ar, clsag, mixin).ctx_index(i)?;
                }
            }
        } else {
            // MLSAG Full columns: inputs + 1 (xmrtypes.py:387), not inputs.
            let mg_count = if rct_type == RctType::Full { 1 } else { inputs };
            let cols = if rct_type == RctType::Full { inputs + 1 } else { 2 };
            if ar.dir().is_load() {
                self.mgs = Vec::with_capacity(mg_count.min(1 << 16));
                for i in 0..mg_count {
                    let mut mg = MgSig::default();
                    serialize_mg_sig(ar, &mut mg, mixin + 1, cols).ctx_index(i)?;
                    self.mgs.push(mg);
                }
            } else {
                if self.mgs.len() != mg_count {
                    return Err(Traced::new(Error::SizeMismatch {
                        expected: mg_count,
                        found: self.mgs.len(),
                    })
                    .with_step(xmr_codec::error::PathStep::Field("MGs")));
                }
                for (i, mg) in self.mgs.iter_mut().enumerate() {
                    serialize_mg_sig(ar, mg, mixin + 1, cols).ctx_index(i)?;
                }
            }
        }

        if matches!(
            rct_type,
            RctType::Bulletproof | RctType::Bulletproof2 | RctType::Clsag | RctType::BulletproofPlus
        ) {
            fixed_key_vec(ar, &mut self.pseudo_outs, inputs).ctx_field("pseudoOuts")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmr_archives::{BlockchainArchive, HardForkProfile};
    use xmr_codec::io::{SliceReader, VecWriter};

    fn sample_base(inputs: usize, outputs: usize, rct_type: RctType) -> RctSigBase {
        RctSigBase {
            rct_type,
            txn_fee: 26_000_000_000,
            message: Key::default(),
            mix_ring: Vec::new(),
            pseudo_outs: if rct_type == RctType::Simple {
                (0..inputs).map(|i| Key::from([i as u8; 32])).collect()
            } else {
                Vec::new()
            },
            ecdh_info: (0..outputs)
                .map(|i| EcdhTuple {
                    mask: Key::from([0u8; 32]),
                    amount: Key::from([i as u8 + 1; 32]),
                })
                .collect(),
            out_pk: (0..outputs)
                .map(|i| CtKey {
                    dest: Key::default(),
                    mask: Key::from([i as u8 + 0x80; 32]),
                })
                .collect(),
        }
    }

    #[test]
    fn rct_sig_base_simple_round_trips() {
        let mut base = sample_base(2, 2, RctType::Simple);
        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            base.serialize_rctsig_base(&mut ar, 2, 2).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = RctSigBase::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        loaded.serialize_rctsig_base(&mut ar, 2, 2).unwrap();

        assert_eq!(loaded.rct_type, RctType::Simple);
        assert_eq!(loaded.txn_fee, 26_000_000_000);
        assert_eq!(loaded.pseudo_outs, base.pseudo_outs);
        for (got, want) in loaded.out_pk.iter().zip(base.out_pk.iter()) {
            assert_eq!(got.mask, want.mask);
            assert_eq!(got.dest, CtKey::synthetic_dest());
        }
    }

    #[test]
    fn rct_sig_base_truncates_ecdh_amount_for_clsag() {
        let mut base = sample_base(1, 1, RctType::Clsag);
        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            base.serialize_rctsig_base(&mut ar, 1, 1).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = RctSigBase::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        loaded.serialize_rctsig_base(&mut ar, 1, 1).unwrap();

        assert_eq!(&loaded.ecdh_info[0].amount.as_bytes()[..8], &base.ecdh_info[0].amount.as_bytes()[..8]);
        assert_eq!(&loaded.ecdh_info[0].amount.as_bytes()[8..], &[0u8; 24]);
        assert_eq!(loaded.ecdh_info[0].mask, Key::default());
    }

    #[test]
    fn null_rct_sig_base_stops_after_type_byte() {
        let mut base = RctSigBase {
            rct_type: RctType::Null,
            ..Default::default()
        };
        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            base.serialize_rctsig_base(&mut ar, 0, 0).unwrap();
        }
        assert_eq!(writer.into_bytes(), vec![0u8]);
    }

    #[test]
    fn mg_sig_round_trips_full_shape() {
        let mut sig = MgSig {
            ss: (0..3)
                .map(|r| (0..2).map(|c| Key::from([(r * 2 + c) as u8; 32])).collect())
                .collect(),
            cc: Key::from([9u8; 32]),
        };
        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            serialize_mg_sig(&mut ar, &mut sig, 3, 2).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = MgSig::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        serialize_mg_sig(&mut ar, &mut loaded, 3, 2).unwrap();

        assert_eq!(loaded, sig);
    }

    #[test]
    fn clsag_round_trips() {
        let mut clsag = Clsag {
            s: vec![Key::from([1u8; 32]), Key::from([2u8; 32]), Key::from([3u8; 32])],
            c1: Key::from([4u8; 32]),
            d: Key::from([5u8; 32]),
        };
        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            serialize_clsag(&mut ar, &mut clsag, 2).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = Clsag::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        serialize_clsag(&mut ar, &mut loaded, 2).unwrap();

        assert_eq!(loaded, clsag);
    }

    #[test]
    fn rct_type_rejects_unknown_byte() {
        assert!(RctType::from_u8(7).is_err());
    }
}
