//! The direction-polymorphic walker contract.
//!
//! An [`Archive`] is a slot machine: every primitive method takes a
//! `&mut T` and either fills it from the wire (load) or reads it onto the
//! wire (dump), picking its behavior from [`Archive::dir`]. A [`Message`]
//! implementation calls these methods in schema order; because the method
//! bodies already branch on direction, the same `serialize` body is both
//! the decoder and the encoder.

use crate::direction::Dir;
use crate::error::{Context, Result};

/// Which on-wire variant tag table an archive uses.
///
/// The blockchain and Boost wire formats assign different 1-byte tags to
/// the same set of alternatives (see the two tag tables carried by every
/// tagged union in the domain schema); a [`Message`] consults this to pick
/// the right table before calling [`Archive::variant_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Blockchain,
    Boost,
}

/// A type that can walk itself against any archive, in either direction.
pub trait Message {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()>;
}

/// A domain type that participates in archive-level versioning.
///
/// `TYPE_NAME` need only be unique within one archive run; it is the key
/// a [`Archive::version`] implementation uses to cache or look up a
/// version number, never anything written to the wire itself.
pub trait Versioned {
    const TYPE_NAME: &'static str;
    const CURRENT_VERSION: u32;
}

/// The primitive operations every wire format implements.
///
/// Concrete archives (the blockchain archive, the Boost archive) live in
/// the crate that also owns the domain schema's notion of a hard-fork
/// profile; this trait only fixes the shape they must share.
pub trait Archive {
    fn dir(&self) -> Dir;
    fn tag_kind(&self) -> TagKind;

    fn boolean(&mut self, slot: &mut bool) -> Result<()>;

    fn u8(&mut self, slot: &mut u8) -> Result<()>;
    fn u16(&mut self, slot: &mut u16) -> Result<()>;
    fn u32(&mut self, slot: &mut u32) -> Result<()>;
    fn u64(&mut self, slot: &mut u64) -> Result<()>;
    fn i8(&mut self, slot: &mut i8) -> Result<()>;
    fn i16(&mut self, slot: &mut i16) -> Result<()>;
    fn i32(&mut self, slot: &mut i32) -> Result<()>;
    fn i64(&mut self, slot: &mut i64) -> Result<()>;

    /// An unsigned varint that fits in 64 bits; the common case.
    fn uvarint(&mut self, slot: &mut u64) -> Result<()>;
    /// An unsigned varint wide enough for the occasional oversized
    /// blockchain value (ring key-offsets can exceed 64 bits).
    fn uvarint128(&mut self, slot: &mut u128) -> Result<()>;

    fn string(&mut self, slot: &mut String) -> Result<()>;
    fn blob_var(&mut self, slot: &mut Vec<u8>) -> Result<()>;
    fn blob_fixed(&mut self, slot: &mut [u8]) -> Result<()>;

    /// Length prefix for a variable-size container.
    fn container_len(&mut self, len: &mut usize) -> Result<()>;
    /// Arity prefix for a tuple; always equal to the tuple's known field
    /// count, but still framed on the wire per the schema.
    fn tuple_arity(&mut self, arity: &mut usize) -> Result<()>;
    /// One tag byte selecting a variant's active alternative, taken from
    /// whichever table [`Archive::tag_kind`] names.
    fn variant_tag(&mut self, slot: &mut u8) -> Result<()>;

    /// The version to use for a versioned type: either consulted from a
    /// hard-fork profile (blockchain archive) or read/written once and
    /// cached thereafter (Boost archive).
    fn version<T: Versioned>(&mut self) -> Result<u32>;

    /// The per-container element-version prefix some Boost arrays carry
    /// ahead of their elements, separate from the type's own first-occurrence
    /// tracking pair. A no-op everywhere except the Boost archive.
    fn container_element_version<T: Versioned>(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Walk a homogeneous container of messages, threading the length prefix
/// and per-element index context through both directions.
pub fn container<A: Archive, T: Message + Default>(
    ar: &mut A,
    items: &mut Vec<T>,
) -> Result<()> {
    let mut len = items.len();
    ar.container_len(&mut len)?;
    if ar.dir().is_load() {
        items.clear();
        items.reserve(len.min(1 << 16));
        for i in 0..len {
            let mut item = T::default();
            item.serialize(ar).ctx_index(i)?;
            items.push(item);
        }
    } else {
        for (i, item) in items.iter_mut().enumerate() {
            item.serialize(ar).ctx_index(i)?;
        }
    }
    Ok(())
}

/// Walk a homogeneous container whose element type is itself versioned,
/// threading the extra per-container element-version prefix some Boost
/// arrays carry ahead of the length-prefixed element sequence.
pub fn container_versioned<A: Archive, T: Message + Default + Versioned>(
    ar: &mut A,
    items: &mut Vec<T>,
) -> Result<()> {
    let mut len = items.len();
    ar.container_len(&mut len)?;
    ar.container_element_version::<T>()?;
    if ar.dir().is_load() {
        items.clear();
        items.reserve(len.min(1 << 16));
        for i in 0..len {
            let mut item = T::default();
            item.serialize(ar).ctx_index(i)?;
            items.push(item);
        }
    } else {
        for (i, item) in items.iter_mut().enumerate() {
            item.serialize(ar).ctx_index(i)?;
        }
    }
    Ok(())
}

/// Walk a fixed-arity two-element tuple `(A, B)` the way the domain schema
/// needs it: arity prefix, then each field serialized in order.
pub fn tuple2<Ar, A, B>(ar: &mut Ar, first: &mut A, second: &mut B) -> Result<()>
where
    Ar: Archive,
    A: Message,
    B: Message,
{
    let mut arity = 2usize;
    ar.tuple_arity(&mut arity)?;
    first.serialize(ar).ctx_index(0)?;
    second.serialize(ar).ctx_index(1)?;
    Ok(())
}
