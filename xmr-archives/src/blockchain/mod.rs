//! The tagless, schema-directed binary format used on-chain.
//!
//! No message, field or type ever carries an on-wire tag or version; every
//! version-conditional layout is resolved against a caller-supplied
//! [`HardForkProfile`] instead.

use xmr_codec::archive::{Archive, TagKind};
use xmr_codec::direction::Dir;
use xmr_codec::error::{Error, Result, Traced};
use xmr_codec::io::{Reader, Writer};
use xmr_codec::varint::continuation;
use xmr_codec::Versioned;

use crate::profile::HardForkProfile;

enum Io<'a> {
    Read(&'a mut dyn Reader),
    Write(&'a mut dyn Writer),
}

/// Walks a message against the on-chain wire format.
pub struct BlockchainArchive<'a> {
    dir: Dir,
    io: Io<'a>,
    profile: HardForkProfile,
}

impl<'a> BlockchainArchive<'a> {
    pub fn reader(reader: &'a mut dyn Reader, profile: HardForkProfile) -> Self {
        Self {
            dir: Dir::Load,
            io: Io::Read(reader),
            profile,
        }
    }

    pub fn writer(writer: &'a mut dyn Writer, profile: HardForkProfile) -> Self {
        Self {
            dir: Dir::Dump,
            io: Io::Write(writer),
            profile,
        }
    }

    /// `root()` is a no-op: the blockchain format has no preamble.
    pub fn root(&mut self) -> Result<()> {
        Ok(())
    }

    fn reader_mut(&mut self) -> &mut dyn Reader {
        match &mut self.io {
            Io::Read(r) => *r,
            Io::Write(_) => unreachable!("primitive op dispatched on wrong direction"),
        }
    }

    fn writer_mut(&mut self) -> &mut dyn Writer {
        match &mut self.io {
            Io::Write(w) => *w,
            Io::Read(_) => unreachable!("primitive op dispatched on wrong direction"),
        }
    }

    fn fixed_width<const N: usize>(&mut self, bytes: &mut [u8; N]) -> Result<()> {
        match self.dir {
            Dir::Load => self.reader_mut().read_exact(bytes),
            Dir::Dump => self.writer_mut().write_all(bytes),
        }
    }
}

impl Archive for BlockchainArchive<'_> {
    fn dir(&self) -> Dir {
        self.dir
    }

    fn tag_kind(&self) -> TagKind {
        TagKind::Blockchain
    }

    fn boolean(&mut self, slot: &mut bool) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let byte = self.reader_mut().read_u8()?;
                *slot = match byte {
                    0 => false,
                    1 => true,
                    other => return Err(Traced::new(Error::InvalidBool(other))),
                };
            }
            Dir::Dump => self.writer_mut().write_u8(*slot as u8)?,
        }
        Ok(())
    }

    fn u8(&mut self, slot: &mut u8) -> Result<()> {
        let mut bytes = [*slot];
        self.fixed_width(&mut bytes)?;
        *slot = bytes[0];
        Ok(())
    }

    fn u16(&mut self, slot: &mut u16) -> Result<()> {
        let mut bytes = slot.to_le_bytes();
        self.fixed_width(&mut bytes)?;
        *slot = u16::from_le_bytes(bytes);
        Ok(())
    }

    fn u32(&mut self, slot: &mut u32) -> Result<()> {
        let mut bytes = slot.to_le_bytes();
        self.fixed_width(&mut bytes)?;
        *slot = u32::from_le_bytes(bytes);
        Ok(())
    }

    fn u64(&mut self, slot: &mut u64) -> Result<()> {
        let mut bytes = slot.to_le_bytes();
        self.fixed_width(&mut bytes)?;
        *slot = u64::from_le_bytes(bytes);
        Ok(())
    }

    fn i8(&mut self, slot: &mut i8) -> Result<()> {
        let mut bytes = slot.to_le_bytes();
        self.fixed_width(&mut bytes)?;
        *slot = i8::from_le_bytes(bytes);
        Ok(())
    }

    fn i16(&mut self, slot: &mut i16) -> Result<()> {
        let mut bytes = slot.to_le_bytes();
        self.fixed_width(&mut bytes)?;
        *slot = i16::from_le_bytes(bytes);
        Ok(())
    }

    fn i32(&mut self, slot: &mut i32) -> Result<()> {
        let mut bytes = slot.to_le_bytes();
        self.fixed_width(&mut bytes)?;
        *slot = i32::from_le_bytes(bytes);
        Ok(())
    }

    fn i64(&mut self, slot: &mut i64) -> Result<()> {
        let mut bytes = slot.to_le_bytes();
        self.fixed_width(&mut bytes)?;
        *slot = i64::from_le_bytes(bytes);
        Ok(())
    }

    fn uvarint(&mut self, slot: &mut u64) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let value = continuation::read(self.reader_mut())?;
                *slot = u64::try_from(value)
                    .map_err(|_| Traced::new(Error::VarintOverflow("uvarint exceeds 64 bits")))?;
            }
            Dir::Dump => continuation::write(self.writer_mut(), *slot as u128)?,
        }
        Ok(())
    }

    fn uvarint128(&mut self, slot: &mut u128) -> Result<()> {
        match self.dir {
            Dir::Load => *slot = continuation::read(self.reader_mut())?,
            Dir::Dump => continuation::write(self.writer_mut(), *slot)?,
        }
        Ok(())
    }

    fn string(&mut self, slot: &mut String) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let len = continuation::read(self.reader_mut())?;
                let len = usize::try_from(len)
                    .map_err(|_| Traced::new(Error::VarintOverflow("string length")))?;
                let mut bytes = vec![0u8; len];
                self.reader_mut().read_exact(&mut bytes)?;
                *slot = String::from_utf8(bytes).map_err(|_| Traced::new(Error::InvalidUtf8))?;
            }
            Dir::Dump => {
                continuation::write(self.writer_mut(), slot.len() as u128)?;
                self.writer_mut().write_all(slot.as_bytes())?;
            }
        }
        Ok(())
    }

    fn blob_var(&mut self, slot: &mut Vec<u8>) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let len = continuation::read(self.reader_mut())?;
                let len = usize::try_from(len)
                    .map_err(|_| Traced::new(Error::VarintOverflow("blob length")))?;
                let mut bytes = vec![0u8; len];
                self.reader_mut().read_exact(&mut bytes)?;
                *slot = bytes;
            }
            Dir::Dump => {
                continuation::write(self.writer_mut(), slot.len() as u128)?;
                self.writer_mut().write_all(slot)?;
            }
        }
        Ok(())
    }

    fn blob_fixed(&mut self, slot: &mut [u8]) -> Result<()> {
        match self.dir {
            Dir::Load => self.reader_mut().read_exact(slot),
            Dir::Dump => self.writer_mut().write_all(slot),
        }
    }

    fn container_len(&mut self, len: &mut usize) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let value = continuation::read(self.reader_mut())?;
                *len = usize::try_from(value)
                    .map_err(|_| Traced::new(Error::VarintOverflow("container length")))?;
            }
            Dir::Dump => continuation::write(self.writer_mut(), *len as u128)?,
        }
        Ok(())
    }

    fn tuple_arity(&mut self, arity: &mut usize) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let value = continuation::read(self.reader_mut())?;
                *arity = usize::try_from(value)
                    .map_err(|_| Traced::new(Error::VarintOverflow("tuple arity")))?;
            }
            Dir::Dump => continuation::write(self.writer_mut(), *arity as u128)?,
        }
        Ok(())
    }

    fn variant_tag(&mut self, slot: &mut u8) -> Result<()> {
        self.u8(slot)
    }

    fn version<T: Versioned>(&mut self) -> Result<u32> {
        Ok(self.profile.version_of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmr_codec::io::{SliceReader, VecWriter};
    use xmr_codec::Message;

    #[derive(Default)]
    struct Pair {
        a: u64,
        b: bool,
    }

    impl Message for Pair {
        fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
            ar.uvarint(&mut self.a)?;
            ar.boolean(&mut self.b)?;
            Ok(())
        }
    }

    #[test]
    fn roundtrips_through_blockchain_wire_format() {
        let mut pair = Pair { a: 300, b: true };
        let mut writer = VecWriter::new();
        {
            let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
            pair.serialize(&mut ar).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = Pair::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        loaded.serialize(&mut ar).unwrap();

        assert_eq!(loaded.a, 300);
        assert!(loaded.b);
    }

    #[test]
    fn invalid_bool_byte_is_rejected() {
        let bytes = [2u8];
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
        let mut slot = false;
        assert!(ar.boolean(&mut slot).is_err());
    }

    proptest::proptest! {
        #[test]
        fn pair_roundtrips_for_any_value(a: u64, b: bool) {
            let mut pair = Pair { a, b };
            let mut writer = VecWriter::new();
            {
                let mut ar = BlockchainArchive::writer(&mut writer, HardForkProfile::v9());
                pair.serialize(&mut ar).unwrap();
            }
            let bytes = writer.into_bytes();

            let mut loaded = Pair::default();
            let mut reader = SliceReader::new(&bytes);
            let mut ar = BlockchainArchive::reader(&mut reader, HardForkProfile::v9());
            loaded.serialize(&mut ar).unwrap();

            prop_assert_eq!(loaded.a, a);
            prop_assert_eq!(loaded.b, b);
        }
    }
}
