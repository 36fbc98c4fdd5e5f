//! The top-level transaction message: a prefix plus whichever signature
//! scheme its version selects.

use xmr_codec::archive::Archive;
use xmr_codec::error::{Context, Error, Result, Traced};
use xmr_codec::Message;
use xmr_crypto::Key;

use crate::rct::{RctSigBase, RctSigPrunable, RctType};
use crate::txio::{TxInV, TxOut, TransactionPrefix};

/// A single ring signature, as carried by every input of a version-1
/// (pre-RingCT) transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub c: Key,
    pub r: Key,
}

impl Message for Signature {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.c.serialize(ar).ctx_field("c")?;
        self.r.serialize(ar).ctx_field("r")
    }
}

/// A full transaction: the unversioned prefix, plus either a per-input
/// ring-signature array (`version == 1`) or a ring-confidential signature
/// pair (`version >= 2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub prefix: TransactionPrefix,
    /// Populated only for `prefix.version == 1`; one entry per input,
    /// each sized to that input's expected ring-signature count.
    pub signatures: Vec<Vec<Signature>>,
    /// Populated only for `prefix.version >= 2`.
    pub rct_signatures: RctSigBase,
    /// The prunable half of the ring-confidential signature, present only
    /// alongside `rct_signatures` when its type is not [`RctType::Null`].
    pub rct_signatures_prunable: RctSigPrunable,
}

impl Transaction {
    /// Walk a transaction's full wire representation: the prefix, then
    /// whichever signature scheme `prefix.version` selects. This is not a
    /// generic [`Message`] body because the legacy-signature branch needs
    /// per-input expected sizes, and the RingCT branch needs the input and
    /// output counts threaded through to [`RctSigBase`]/[`RctSigPrunable`].
    pub fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.prefix.serialize(ar).ctx_field("prefix")?;

        if self.prefix.version == 1 {
            self.serialize_legacy_signatures(ar)
        } else {
            self.serialize_rct_signatures(ar)
        }
    }

    /// Neither the outer per-input array nor each input's own signature row
    /// carries a length prefix — `prepare_container` in the source never
    /// emits one here, since both counts are already implied by `vin`.
    fn serialize_legacy_signatures<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        let expected = self.prefix.expected_signature_counts();
        let all_zero = expected.iter().all(|&n| n == 0);

        if ar.dir().is_load() {
            if all_zero {
                self.signatures = Vec::new();
                return Ok(());
            }
            self.signatures = Vec::with_capacity(expected.len());
            for (i, &sig_size) in expected.iter().enumerate() {
                let mut row = Vec::with_capacity(sig_size);
                for j in 0..sig_size {
                    let mut sig = Signature::default();
                    sig.serialize(ar).ctx_index(j).ctx_index(i)?;
                    row.push(sig);
                }
                self.signatures.push(row);
            }
            Ok(())
        } else {
            let signatures_not_expected = self.signatures.is_empty();
            if signatures_not_expected {
                if !all_zero {
                    return Err(Traced::new(Error::MissingField("signatures")));
                }
                return Ok(());
            }
            if self.signatures.len() != expected.len() {
                return Err(Traced::new(Error::SizeMismatch {
                    expected: expected.len(),
                    found: self.signatures.len(),
                }));
            }
            for (i, &sig_size) in expected.iter().enumerate() {
                let row = &mut self.signatures[i];
                if row.len() != sig_size {
                    return Err(Traced::new(Error::SizeMismatch {
                        expected: sig_size,
                        found: row.len(),
                    })
                    .with_step(xmr_codec::error::PathStep::Index(i)));
                }
                for (j, sig) in row.iter_mut().enumerate() {
                    sig.serialize(ar).ctx_index(j).ctx_index(i)?;
                }
            }
            Ok(())
        }
    }

    fn serialize_rct_signatures<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        if self.prefix.vin.is_empty() {
            return Ok(());
        }

        self.rct_signatures
            .serialize_rctsig_base(ar, self.prefix.vin.len(), self.prefix.vout.len())
            .ctx_field("rct_signatures")?;

        if self.rct_signatures.rct_type == RctType::Null {
            return Ok(());
        }

        let mixin = match &self.prefix.vin[0] {
            TxInV::ToKey(k) => k.key_offsets.len().saturating_sub(1),
            _ => 0,
        };

        self.rct_signatures_prunable
            .serialize_rctsig_prunable(
                ar,
                self.rct_signatures.rct_type,
                self.prefix.vin.len(),
                self.prefix.vout.len(),
                mixin,
            )
            .ctx_field("rctsig_prunable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::txio::{TxinToKey, TxoutToKey, TxoutTargetV};
    use xmr_archives::{BlockchainArchive, HardForkProfile};
    use xmr_codec::io::{SliceReader, VecWriter};

    fn input(offsets: Vec<u128>) -> TxInV {
        TxInV::ToKey(TxinToKey {
            amount: 0,
            key_offsets: offsets,
            k_image: Key::from([1u8; 32]),
        })
    }

    fn output() -> TxOut {
        TxOut {
            amount: 0,
            target: TxoutTargetV::ToKey(TxoutToKey { key: Key::from([2u8; 32]) }),
        }
    }

    #[test]
    fn version_one_round_trips_legacy_signatures() {
        let mut tx = Transaction {
            prefix: TransactionPrefix {
                version: 1,
                unlock_time: 0,
                vin: vec![input(vec![1, 2]), input(vec![3])],
                vout: vec![output()],
                extra: vec![],
            },
            signatures: vec![
                vec![Signature::default(), Signature::default()],
                vec![Signature::default()],
            ],
            rct_signatures: RctSigBase::default(),
            rct_signatures_prunable: RctSigPrunable::default(),
        };

        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            tx.serialize(&mut ar).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = Transaction::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        loaded.serialize(&mut ar).unwrap();

        assert_eq!(loaded.prefix, tx.prefix);
        assert_eq!(loaded.signatures.len(), 2);
        assert_eq!(loaded.signatures[0].len(), 2);
        assert_eq!(loaded.signatures[1].len(), 1);
    }

    #[test]
    fn version_two_stops_after_null_rct_type() {
        let mut tx = Transaction {
            prefix: TransactionPrefix {
                version: 2,
                unlock_time: 0,
                vin: vec![input(vec![1, 2, 3])],
                vout: vec![output()],
                extra: vec![],
            },
            signatures: Vec::new(),
            rct_signatures: RctSigBase {
                rct_type: RctType::Null,
                ..Default::default()
            },
            rct_signatures_prunable: RctSigPrunable::default(),
        };

        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            tx.serialize(&mut ar).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = Transaction::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        loaded.serialize(&mut ar).unwrap();

        assert_eq!(loaded.rct_signatures.rct_type, RctType::Null);
    }
}
