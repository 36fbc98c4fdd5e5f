//! The Boost portable-binary archive: a signed-varint, self-versioning
//! format used for wallet caches and multisig/unsigned/signed transaction
//! sets.

use xmr_codec::archive::{Archive, TagKind};
use xmr_codec::direction::Dir;
use xmr_codec::error::{Error, Result, Traced};
use xmr_codec::io::{Reader, Writer};
use xmr_codec::varint::boost_signed;
use xmr_codec::Versioned;

use crate::version_registry::VersionRegistry;

const HEADER_MAGIC: [u8; 2] = [0x01, 0x16];
const HEADER_LABEL: &[u8; 22] = b"serialization::archive";

enum Io<'a> {
    Read(&'a mut dyn Reader),
    Write(&'a mut dyn Writer),
}

/// Walks a message against the Boost portable-binary wire format.
pub struct BoostArchive<'a> {
    dir: Dir,
    io: Io<'a>,
    registry: VersionRegistry,
}

impl<'a> BoostArchive<'a> {
    pub fn reader(reader: &'a mut dyn Reader) -> Self {
        Self {
            dir: Dir::Load,
            io: Io::Read(reader),
            registry: VersionRegistry::new(),
        }
    }

    pub fn writer(writer: &'a mut dyn Writer) -> Self {
        Self {
            dir: Dir::Dump,
            io: Io::Write(writer),
            registry: VersionRegistry::new(),
        }
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

    /// Reads or writes the fixed 26-byte archive header: the `01 16`
    /// signature, the literal `serialization::archive` label, then two
    /// zero signed varints (tracking, format version).
    pub fn root(&mut self) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let mut magic = [0u8; 2];
                self.reader_mut().read_exact(&mut magic)?;
                if magic != HEADER_MAGIC {
                    return Err(Traced::new(Error::BadHeader));
                }
                let mut label = [0u8; 22];
                self.reader_mut().read_exact(&mut label)?;
                if &label != HEADER_LABEL {
                    return Err(Traced::new(Error::BadHeader));
                }
                let tracking = boost_signed::read(self.reader_mut())?;
                let format_version = boost_signed::read(self.reader_mut())?;
                if tracking != 0 || format_version != 0 {
                    return Err(Traced::new(Error::BadHeader));
                }
            }
            Dir::Dump => {
                self.writer_mut().write_all(&HEADER_MAGIC)?;
                self.writer_mut().write_all(HEADER_LABEL)?;
                boost_signed::write(self.writer_mut(), 0)?;
                boost_signed::write(self.writer_mut(), 0)?;
            }
        }
        Ok(())
    }

    fn signed_int(&mut self, value: i128) -> Result<i128> {
        match self.dir {
            Dir::Load => boost_signed::read(self.reader_mut()),
            Dir::Dump => {
                boost_signed::write(self.writer_mut(), value)?;
                Ok(value)
            }
        }
    }
}

impl Archive for BoostArchive<'_> {
    fn dir(&self) -> Dir {
        self.dir
    }

    fn tag_kind(&self) -> TagKind {
        TagKind::Boost
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
        match self.dir {
            Dir::Load => *slot = self.reader_mut().read_u8()?,
            Dir::Dump => self.writer_mut().write_u8(*slot)?,
        }
        Ok(())
    }

    fn u16(&mut self, slot: &mut u16) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = u16::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("u16 out of range")))?;
        }
        Ok(())
    }

    fn u32(&mut self, slot: &mut u32) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = u32::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("u32 out of range")))?;
        }
        Ok(())
    }

    fn u64(&mut self, slot: &mut u64) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = u64::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("u64 out of range")))?;
        }
        Ok(())
    }

    fn i8(&mut self, slot: &mut i8) -> Result<()> {
        match self.dir {
            Dir::Load => *slot = self.reader_mut().read_u8()? as i8,
            Dir::Dump => self.writer_mut().write_u8(*slot as u8)?,
        }
        Ok(())
    }

    fn i16(&mut self, slot: &mut i16) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = i16::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("i16 out of range")))?;
        }
        Ok(())
    }

    fn i32(&mut self, slot: &mut i32) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = i32::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("i32 out of range")))?;
        }
        Ok(())
    }

    fn i64(&mut self, slot: &mut i64) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = i64::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("i64 out of range")))?;
        }
        Ok(())
    }

    fn uvarint(&mut self, slot: &mut u64) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = u64::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("boost uvarint must be non-negative")))?;
        }
        Ok(())
    }

    fn uvarint128(&mut self, slot: &mut u128) -> Result<()> {
        let value = self.signed_int(*slot as i128)?;
        if self.dir.is_load() {
            *slot = u128::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("boost uvarint must be non-negative")))?;
        }
        Ok(())
    }

    fn string(&mut self, slot: &mut String) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let len = boost_signed::read(self.reader_mut())?;
                let len = usize::try_from(len)
                    .map_err(|_| Traced::new(Error::VarintOverflow("string length")))?;
                let mut bytes = vec![0u8; len];
                self.reader_mut().read_exact(&mut bytes)?;
                *slot = String::from_utf8(bytes).map_err(|_| Traced::new(Error::InvalidUtf8))?;
            }
            Dir::Dump => {
                boost_signed::write(self.writer_mut(), slot.len() as i128)?;
                self.writer_mut().write_all(slot.as_bytes())?;
            }
        }
        Ok(())
    }

    fn blob_var(&mut self, slot: &mut Vec<u8>) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let len = boost_signed::read(self.reader_mut())?;
                let len = usize::try_from(len)
                    .map_err(|_| Traced::new(Error::VarintOverflow("blob length")))?;
                let mut bytes = vec![0u8; len];
                self.reader_mut().read_exact(&mut bytes)?;
                *slot = bytes;
            }
            Dir::Dump => {
                boost_signed::write(self.writer_mut(), slot.len() as i128)?;
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
        let value = self.signed_int(*len as i128)?;
        if self.dir.is_load() {
            *len = usize::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("container length")))?;
        }
        Ok(())
    }

    fn tuple_arity(&mut self, arity: &mut usize) -> Result<()> {
        let value = self.signed_int(*arity as i128)?;
        if self.dir.is_load() {
            *arity = usize::try_from(value)
                .map_err(|_| Traced::new(Error::VarintOverflow("tuple arity")))?;
        }
        Ok(())
    }

    fn variant_tag(&mut self, slot: &mut u8) -> Result<()> {
        self.u8(slot)
    }

    fn version<T: Versioned>(&mut self) -> Result<u32> {
        if let Some((_track, version)) = self.registry.get(T::TYPE_NAME) {
            return Ok(version);
        }
        match self.dir {
            Dir::Load => {
                let track = boost_signed::read(self.reader_mut())?;
                if track != 0 {
                    return Err(Traced::new(Error::UnsupportedTracking(track)));
                }
                let version = boost_signed::read(self.reader_mut())?;
                let version = u32::try_from(version)
                    .map_err(|_| Traced::new(Error::VarintOverflow("type version")))?;
                self.registry.record(T::TYPE_NAME, 0, version);
                Ok(version)
            }
            Dir::Dump => {
                let version = T::CURRENT_VERSION;
                boost_signed::write(self.writer_mut(), 0)?;
                boost_signed::write(self.writer_mut(), version as i128)?;
                self.registry.record(T::TYPE_NAME, 0, version);
                Ok(version)
            }
        }
    }

    fn container_element_version<T: Versioned>(&mut self) -> Result<()> {
        match self.dir {
            Dir::Load => {
                boost_signed::read(self.reader_mut())?;
            }
            Dir::Dump => {
                boost_signed::write(self.writer_mut(), T::CURRENT_VERSION as i128)?;
            }
        }
        Ok(())
    }
}
