//! Small container helpers for primitive element types that don't
//! implement [`xmr_codec::Message`] themselves (plain integers), so the
//! domain types don't each hand-roll the same length-prefix-then-loop
//! pattern `xmr_codec::container` already gives [`xmr_codec::Message`]
//! element types.

use xmr_codec::archive::Archive;
use xmr_codec::error::{Context, Result};

/// A container of unsigned varints wide enough for the occasional
/// oversized blockchain value — used for `TxinToKey::key_offsets`, whose
/// ring member offsets have been observed beyond 64 bits.
pub fn container_uvarint128<A: Archive>(ar: &mut A, items: &mut Vec<u128>) -> Result<()> {
    let mut len = items.len();
    ar.container_len(&mut len)?;
    if ar.dir().is_load() {
        items.clear();
        items.reserve(len.min(1 << 16));
        for i in 0..len {
            let mut value = 0u128;
            ar.uvarint128(&mut value).ctx_index(i)?;
            items.push(value);
        }
    } else {
        for (i, value) in items.iter_mut().enumerate() {
            ar.uvarint128(value).ctx_index(i)?;
        }
    }
    Ok(())
}

/// A container of ordinary 64-bit unsigned varints (`size_t`-typed
/// fields, `subaddr_indices`, and similar).
pub fn container_uvarint64<A: Archive>(ar: &mut A, items: &mut Vec<u64>) -> Result<()> {
    let mut len = items.len();
    ar.container_len(&mut len)?;
    if ar.dir().is_load() {
        items.clear();
        items.reserve(len.min(1 << 16));
        for i in 0..len {
            let mut value = 0u64;
            ar.uvarint(&mut value).ctx_index(i)?;
            items.push(value);
        }
    } else {
        for (i, value) in items.iter_mut().enumerate() {
            ar.uvarint(value).ctx_index(i)?;
        }
    }
    Ok(())
}

/// A container of raw `u8` bytes (the `extra` field and similar).
pub fn container_u8<A: Archive>(ar: &mut A, items: &mut Vec<u8>) -> Result<()> {
    ar.blob_var(items)
}

/// A sequence of exactly `len` [`xmr_crypto::Key`]s with no length prefix of
/// its own — the "raw boost array" shape the ring-signature fixed vectors
/// (`BoroSig::s0`/`s1`, `RangeSig::Ci`) and the custom MG/CLSAG matrix rows
/// use, where the element count is always implied by an enclosing field
/// rather than carried on the wire.
pub fn fixed_key_vec<A: Archive>(
    ar: &mut A,
    items: &mut Vec<xmr_crypto::Key>,
    len: usize,
) -> Result<()> {
    use xmr_codec::error::Error;
    use xmr_codec::Message;

    if ar.dir().is_load() {
        items.clear();
        items.reserve(len);
        for _ in 0..len {
            let mut key = xmr_crypto::Key::default();
            key.serialize(ar)?;
            items.push(key);
        }
    } else {
        if items.len() != len {
            return Err(xmr_codec::Traced::new(Error::SizeMismatch {
                expected: len,
                found: items.len(),
            }));
        }
        for key in items.iter_mut() {
            key.serialize(ar)?;
        }
    }
    Ok(())
}
