//! Direction-polymorphic byte codec engine.
//!
//! This crate fixes the vocabulary shared by every wire format in the
//! workspace — bytes in and out ([`io`]), the three variable-length integer
//! encodings ([`varint`]), and the walker contract a schema type implements
//! once and every archive drives ([`archive`]). It does not know what a
//! transaction or a key image is; that lives in `xmr-tx-types`. It does not
//! know how bytes are framed into an archive preamble, type version or
//! section; that lives in `xmr-archives`.

pub mod archive;
pub mod direction;
pub mod error;
pub mod io;
pub mod varint;

pub use archive::{container, container_versioned, tuple2, Archive, Message, TagKind, Versioned};
pub use direction::Dir;
pub use error::{Context, Error, PathStep, Result, Traced};
pub use io::{Reader, SliceReader, VecWriter, Writer};
