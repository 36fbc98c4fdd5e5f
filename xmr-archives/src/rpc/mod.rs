//! The RPC "portable storage" key-value codec: a typed, self-describing
//! binary format used for node RPC bodies and some on-disk wallet caches.
//!
//! This archive does not plug into the generic [`xmr_codec::Message`]
//! walker the way the blockchain and Boost archives do — a portable-storage
//! body is a dynamically-typed dictionary, not a fixed schema, so it is
//! modeled directly as a tree of [`Value`]s instead. The source material
//! marks its own dump direction for compound types as unfinished; this
//! archive implements load and dump symmetrically only for the subset the
//! format is actually exercised with: sections, integers, strings, arrays
//! of primitives, and nested sections.

pub mod value;

pub use value::{Array, Section, Value, ValueKind};

use xmr_codec::direction::Dir;
use xmr_codec::error::{Error, Result, Traced};
use xmr_codec::io::{Reader, Writer};
use xmr_codec::varint::tagged;

use value::ARRAY_FLAG;

const SIGNATURE_A: u32 = 0x0101_1101;
const SIGNATURE_B: u32 = 0x0102_0101;
const FORMAT_VERSION: u8 = 1;

enum Io<'a> {
    Read(&'a mut dyn Reader),
    Write(&'a mut dyn Writer),
}

/// Walks a [`Section`] tree against the portable-storage wire format.
pub struct RpcPortableArchive<'a> {
    dir: Dir,
    io: Io<'a>,
}

impl<'a> RpcPortableArchive<'a> {
    pub fn reader(reader: &'a mut dyn Reader) -> Self {
        Self {
            dir: Dir::Load,
            io: Io::Read(reader),
        }
    }

    pub fn writer(writer: &'a mut dyn Writer) -> Self {
        Self {
            dir: Dir::Dump,
            io: Io::Write(writer),
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

    fn read_u32_le(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.reader_mut().read_exact(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn write_u32_le(&mut self, value: u32) -> Result<()> {
        self.writer_mut().write_all(&value.to_le_bytes())
    }

    /// Reads or writes the 9-byte preamble: two magic `u32`s then a
    /// one-byte format version.
    pub fn root(&mut self) -> Result<()> {
        match self.dir {
            Dir::Load => {
                let sig_a = self.read_u32_le()?;
                let sig_b = self.read_u32_le()?;
                let version = self.reader_mut().read_u8()?;
                if sig_a != SIGNATURE_A || sig_b != SIGNATURE_B {
                    return Err(Traced::new(Error::BadHeader));
                }
                if version != FORMAT_VERSION {
                    return Err(Traced::new(Error::UnsupportedFormatVersion(version)));
                }
            }
            Dir::Dump => {
                self.write_u32_le(SIGNATURE_A)?;
                self.write_u32_le(SIGNATURE_B)?;
                self.writer_mut().write_u8(FORMAT_VERSION)?;
            }
        }
        Ok(())
    }

    fn section_name_write(&mut self, name: &str) -> Result<()> {
        if name.len() > 255 {
            return Err(Traced::new(Error::SectionKeyTooLong(name.to_owned())));
        }
        self.writer_mut().write_u8(name.len() as u8)?;
        self.writer_mut().write_all(name.as_bytes())
    }

    fn section_name_read(&mut self) -> Result<String> {
        let len = self.reader_mut().read_u8()? as usize;
        let mut bytes = vec![0u8; len];
        self.reader_mut().read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| Traced::new(Error::InvalidUtf8))
    }

    /// Reads or writes an entire section: an entry count, then that many
    /// `(name, typed value)` pairs.
    pub fn section(&mut self, section: &mut Section) -> Result<()> {
        match self.dir {
            Dir::Dump => self.section_write(section),
            Dir::Load => {
                *section = self.section_read()?;
                Ok(())
            }
        }
    }

    fn section_write(&mut self, section: &Section) -> Result<()> {
        tagged::write(self.writer_mut(), section.0.len() as u64)?;
        for (name, value) in &section.0 {
            self.section_name_write(name)?;
            self.storage_entry_write(value)?;
        }
        Ok(())
    }

    fn section_read(&mut self) -> Result<Section> {
        let count = tagged::read(self.reader_mut())? as usize;
        let mut out = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            let name = self.section_name_read()?;
            let value = self.storage_entry_read()?;
            out.push((name, value));
        }
        Ok(Section(out))
    }

    fn storage_entry_write(&mut self, value: &Value) -> Result<()> {
        if let Value::Array(array) = value {
            let tag = array.element_kind.wire_code() | ARRAY_FLAG;
            self.writer_mut().write_u8(tag)?;
            self.array_write(array)
        } else {
            self.writer_mut().write_u8(value.kind().wire_code())?;
            self.entry_write(value)
        }
    }

    fn storage_entry_read(&mut self) -> Result<Value> {
        let tag = self.reader_mut().read_u8()?;
        if tag & ARRAY_FLAG != 0 {
            self.array_read(tag & !ARRAY_FLAG).map(Value::Array)
        } else {
            self.entry_read(tag)
        }
    }

    fn entry_write(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Int64(v) => self.writer_mut().write_all(&v.to_le_bytes()),
            Value::Int32(v) => self.writer_mut().write_all(&v.to_le_bytes()),
            Value::Int16(v) => self.writer_mut().write_all(&v.to_le_bytes()),
            Value::Int8(v) => self.writer_mut().write_u8(*v as u8),
            Value::UInt64(v) => self.writer_mut().write_all(&v.to_le_bytes()),
            Value::UInt32(v) => self.writer_mut().write_all(&v.to_le_bytes()),
            Value::UInt16(v) => self.writer_mut().write_all(&v.to_le_bytes()),
            Value::UInt8(v) => self.writer_mut().write_u8(*v),
            Value::Double(v) => self.writer_mut().write_all(&v.to_le_bytes()),
            Value::Bool(v) => self.writer_mut().write_u8(*v as u8),
            Value::Str(s) => {
                tagged::write(self.writer_mut(), s.len() as u64)?;
                self.writer_mut().write_all(s)
            }
            Value::Section(sec) => self.section_write(sec),
            Value::Array(_) => unreachable!("arrays are written through storage_entry_write"),
        }
    }

    fn entry_read(&mut self, tag: u8) -> Result<Value> {
        let kind = ValueKind::from_wire_code(tag)
            .ok_or_else(|| Traced::new(Error::UnknownVariantTag(tag, "rpc-storage-entry")))?;
        Ok(match kind {
            ValueKind::Int64 => {
                let mut b = [0u8; 8];
                self.reader_mut().read_exact(&mut b)?;
                Value::Int64(i64::from_le_bytes(b))
            }
            ValueKind::Int32 => {
                let mut b = [0u8; 4];
                self.reader_mut().read_exact(&mut b)?;
                Value::Int32(i32::from_le_bytes(b))
            }
            ValueKind::Int16 => {
                let mut b = [0u8; 2];
                self.reader_mut().read_exact(&mut b)?;
                Value::Int16(i16::from_le_bytes(b))
            }
            ValueKind::Int8 => Value::Int8(self.reader_mut().read_u8()? as i8),
            ValueKind::UInt64 => {
                let mut b = [0u8; 8];
                self.reader_mut().read_exact(&mut b)?;
                Value::UInt64(u64::from_le_bytes(b))
            }
            ValueKind::UInt32 => {
                let mut b = [0u8; 4];
                self.reader_mut().read_exact(&mut b)?;
                Value::UInt32(u32::from_le_bytes(b))
            }
            ValueKind::UInt16 => {
                let mut b = [0u8; 2];
                self.reader_mut().read_exact(&mut b)?;
                Value::UInt16(u16::from_le_bytes(b))
            }
            ValueKind::UInt8 => Value::UInt8(self.reader_mut().read_u8()?),
            ValueKind::Double => {
                let mut b = [0u8; 8];
                self.reader_mut().read_exact(&mut b)?;
                Value::Double(f64::from_le_bytes(b))
            }
            ValueKind::Bool => {
                let byte = self.reader_mut().read_u8()?;
                match byte {
                    0 => Value::Bool(false),
                    1 => Value::Bool(true),
                    other => return Err(Traced::new(Error::InvalidBool(other))),
                }
            }
            ValueKind::Str => {
                let len = tagged::read(self.reader_mut())? as usize;
                let mut bytes = vec![0u8; len];
                self.reader_mut().read_exact(&mut bytes)?;
                Value::Str(bytes)
            }
            ValueKind::Section => Value::Section(self.section_read()?),
        })
    }

    fn array_write(&mut self, array: &Array) -> Result<()> {
        tagged::write(self.writer_mut(), array.items.len() as u64)?;
        for item in &array.items {
            self.entry_write(item)?;
        }
        Ok(())
    }

    fn array_read(&mut self, element_tag: u8) -> Result<Array> {
        let element_kind = ValueKind::from_wire_code(element_tag)
            .ok_or_else(|| Traced::new(Error::UnknownVariantTag(element_tag, "rpc-storage-array-element")))?;
        let count = tagged::read(self.reader_mut())? as usize;
        let mut items = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            items.push(self.entry_read(element_tag)?);
        }
        Ok(Array { element_kind, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmr_codec::io::{SliceReader, VecWriter};

    #[test]
    fn root_preamble_roundtrips() {
        let mut writer = VecWriter::new();
        {
            let mut ar = RpcPortableArchive::writer(&mut writer);
            ar.root().unwrap();
        }
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 9);
        let mut reader = SliceReader::new(&bytes);
        let mut ar = RpcPortableArchive::reader(&mut reader);
        ar.root().unwrap();
    }

    #[test]
    fn section_with_mixed_entries_roundtrips() {
        let mut section = Section::new();
        section.insert("status", Value::Str(b"OK".to_vec()));
        section.insert("height", Value::UInt64(12345));
        section.insert("untrusted", Value::Bool(false));
        let mut nested = Section::new();
        nested.insert("count", Value::UInt32(3));
        section.insert("nested", Value::Section(nested));
        section.insert(
            "heights",
            Value::Array(Array {
                element_kind: ValueKind::UInt64,
                items: vec![Value::UInt64(1), Value::UInt64(2), Value::UInt64(3)],
            }),
        );

        let mut writer = VecWriter::new();
        {
            let mut ar = RpcPortableArchive::writer(&mut writer);
            ar.section_write(&section).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut reader = SliceReader::new(&bytes);
        let mut ar = RpcPortableArchive::reader(&mut reader);
        let mut loaded = Section::new();
        ar.section(&mut loaded).unwrap();

        assert_eq!(loaded, section);
    }

    #[test]
    fn double_entry_roundtrips() {
        let mut section = Section::new();
        section.insert("difficulty", Value::Double(1.7e9));

        let mut writer = VecWriter::new();
        {
            let mut ar = RpcPortableArchive::writer(&mut writer);
            ar.section_write(&section).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut reader = SliceReader::new(&bytes);
        let mut ar = RpcPortableArchive::reader(&mut reader);
        let mut loaded = Section::new();
        ar.section(&mut loaded).unwrap();

        assert_eq!(loaded, section);
    }

    #[test]
    fn bad_signature_is_rejected() {
        let bytes = [0u8; 9];
        let mut reader = SliceReader::new(&bytes);
        let mut ar = RpcPortableArchive::reader(&mut reader);
        assert!(ar.root().is_err());
    }

    #[test]
    fn section_key_over_255_bytes_is_rejected() {
        let mut section = Section::new();
        section.insert("x".repeat(256), Value::Bool(true));
        let mut writer = VecWriter::new();
        let mut ar = RpcPortableArchive::writer(&mut writer);
        assert!(ar.section(&mut section).is_err());
    }
}
