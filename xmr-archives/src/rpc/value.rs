//! The typed value model a portable-storage section is built from.

use std::ops::{Deref, DerefMut};

/// One entry's wire type code, without the array flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int64,
    Int32,
    Int16,
    Int8,
    UInt64,
    UInt32,
    UInt16,
    UInt8,
    Double,
    Str,
    Bool,
    Section,
}

impl ValueKind {
    pub(crate) fn wire_code(self) -> u8 {
        match self {
            ValueKind::Int64 => 1,
            ValueKind::Int32 => 2,
            ValueKind::Int16 => 3,
            ValueKind::Int8 => 4,
            ValueKind::UInt64 => 5,
            ValueKind::UInt32 => 6,
            ValueKind::UInt16 => 7,
            ValueKind::UInt8 => 8,
            ValueKind::Double => 9,
            ValueKind::Str => 10,
            ValueKind::Bool => 11,
            ValueKind::Section => 12,
        }
    }

    pub(crate) fn from_wire_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => ValueKind::Int64,
            2 => ValueKind::Int32,
            3 => ValueKind::Int16,
            4 => ValueKind::Int8,
            5 => ValueKind::UInt64,
            6 => ValueKind::UInt32,
            7 => ValueKind::UInt16,
            8 => ValueKind::UInt8,
            9 => ValueKind::Double,
            10 => ValueKind::Str,
            11 => ValueKind::Bool,
            12 => ValueKind::Section,
            _ => return None,
        })
    }
}

/// Bit OR'd into an entry's type byte to mark it as an array of that type.
pub(crate) const ARRAY_FLAG: u8 = 0x80;

/// A single typed value stored in a [`Section`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int64(i64),
    Int32(i32),
    Int16(i16),
    Int8(i8),
    UInt64(u64),
    UInt32(u32),
    UInt16(u16),
    UInt8(u8),
    Double(f64),
    /// Wire type `STRING`. Holds raw bytes, not validated UTF-8: the format
    /// uses this type both for text (`"status": "OK"`) and for opaque
    /// binary blobs (public keys, hashes) that are not valid UTF-8.
    Str(Vec<u8>),
    Bool(bool),
    Section(Section),
    Array(Array),
}

impl Value {
    /// The scalar/section kind of this value. Panics on `Array`, whose
    /// wire framing is driven by `Array::element_kind` instead — callers
    /// must special-case arrays before asking for a plain kind.
    pub(crate) fn kind(&self) -> ValueKind {
        match self {
            Value::Int64(_) => ValueKind::Int64,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int16(_) => ValueKind::Int16,
            Value::Int8(_) => ValueKind::Int8,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::UInt16(_) => ValueKind::UInt16,
            Value::UInt8(_) => ValueKind::UInt8,
            Value::Double(_) => ValueKind::Double,
            Value::Str(_) => ValueKind::Str,
            Value::Bool(_) => ValueKind::Bool,
            Value::Section(_) => ValueKind::Section,
            Value::Array(_) => unreachable!("callers special-case Array before calling kind()"),
        }
    }
}

/// A homogeneous array of primitive values (object arrays are out of scope,
/// matching the subset of the portable-storage format this crate supports).
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub element_kind: ValueKind,
    pub items: Vec<Value>,
}

/// An ordered key-value dictionary, insertion order preserved — the
/// portable-storage equivalent of a struct, and the root object of every
/// request/response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section(pub Vec<(String, Value)>);

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.push((key.into(), value));
    }
}

impl Deref for Section {
    type Target = Vec<(String, Value)>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Section {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(String, Value)> for Section {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
