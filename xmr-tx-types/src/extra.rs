//! `tx_extra`'s padding tag: a run of zero bytes with no length prefix,
//! whose size is simply "how many zero bytes follow before the next tag
//! (or end of the field)".

use xmr_codec::archive::Archive;
use xmr_codec::direction::Dir;
use xmr_codec::error::{Error, Result, Traced};

/// A run of `size` zero bytes inside `tx_extra`.
///
/// This has no ordinary length prefix: on dump it writes exactly `size`
/// zero bytes (rejecting a `size` over 255, the largest padding a real
/// transaction ever carries), and on load it keeps consuming zero bytes
/// until input runs out, a non-zero byte appears, or it's read 256 of
/// them without stopping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxExtraPadding {
    pub size: usize,
}

impl TxExtraPadding {
    pub fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        match ar.dir() {
            Dir::Dump => {
                if self.size > 255 {
                    return Err(Traced::new(Error::PaddingTooLong));
                }
                for _ in 0..self.size {
                    let mut zero = 0u8;
                    ar.u8(&mut zero)?;
                }
                Ok(())
            }
            Dir::Load => {
                let mut count = 0usize;
                loop {
                    if count == 256 {
                        return Err(Traced::new(Error::PaddingTooLong));
                    }
                    let mut byte = 0u8;
                    match ar.u8(&mut byte) {
                        Ok(()) => {
                            if byte != 0 {
                                return Err(Traced::new(Error::InvalidPadding(byte)));
                            }
                            count += 1;
                        }
                        Err(traced) => {
                            if matches!(traced.error, Error::EndOfInput(_)) {
                                break;
                            }
                            return Err(traced);
                        }
                    }
                }
                self.size = count;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmr_archives::{BlockchainArchive, HardForkProfile};
    use xmr_codec::io::{SliceReader, VecWriter};

    #[test]
    fn dump_then_load_round_trips_padding_size() {
        let mut padding = TxExtraPadding { size: 5 };
        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            padding.serialize(&mut ar).unwrap();
        }
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0u8; 5]);

        let mut loaded = TxExtraPadding::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        loaded.serialize(&mut ar).unwrap();
        assert_eq!(loaded.size, 5);
    }

    #[test]
    fn load_stops_at_nonzero_byte() {
        let bytes = [0u8, 0u8, 7u8];
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        let mut padding = TxExtraPadding::default();
        assert!(padding.serialize(&mut ar).is_err());
    }

    #[test]
    fn dump_rejects_oversized_padding() {
        let mut padding = TxExtraPadding { size: 256 };
        let mut writer = VecWriter::new();
        let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
        assert!(padding.serialize(&mut ar).is_err());
    }
}
