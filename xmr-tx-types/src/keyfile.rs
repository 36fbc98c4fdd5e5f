//! Wallet key-file payloads and the key-image export bundle a wallet
//! hands to a view-only companion for spend tracking.

use xmr_codec::archive::{container, Archive};
use xmr_codec::error::{Context, Result};
use xmr_codec::Message;
use xmr_crypto::Key;

use crate::wallet::AccountPublicAddress;

/// The plaintext payload encrypted inside a `.keys` wallet file: the
/// public address plus both secret keys. Decrypting the file is a
/// cryptographic concern handled elsewhere; this only walks the
/// structure once the caller already has the plaintext bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountKeys {
    pub account_address: AccountPublicAddress,
    pub spend_secret_key: Key,
    pub view_secret_key: Key,
}

impl Message for AccountKeys {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.account_address.serialize(ar).ctx_field("m_account_address")?;
        self.spend_secret_key.serialize(ar).ctx_field("m_spend_secret_key")?;
        self.view_secret_key.serialize(ar).ctx_field("m_view_secret_key")
    }
}

/// One key image a view-only wallet could not derive itself, exported by
/// its spend-capable counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyImageExportEntry {
    pub key_image: Key,
    pub tx_public_key: Key,
    pub out_index: u64,
}

impl Message for KeyImageExportEntry {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.key_image.serialize(ar).ctx_field("key_image")?;
        self.tx_public_key.serialize(ar).ctx_field("tx_public_key")?;
        ar.uvarint(&mut self.out_index).ctx_field("out_index")
    }
}

/// A Boost-archive-rooted bundle of exported key images, analogous to
/// [`crate::wallet::UnsignedTxSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyImageExportFile {
    pub spend_public_key: Key,
    pub view_public_key: Key,
    pub signatures: Vec<KeyImageExportEntry>,
}

impl Message for KeyImageExportFile {
    fn serialize<A: Archive>(&mut self, ar: &mut A) -> Result<()> {
        self.spend_public_key.serialize(ar).ctx_field("m_spend_public_key")?;
        self.view_public_key.serialize(ar).ctx_field("m_view_public_key")?;
        container(ar, &mut self.signatures).ctx_field("signatures")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmr_archives::BoostArchive;
    use xmr_codec::io::{SliceReader, VecWriter};

    #[test]
    fn key_image_export_file_round_trips() {
        let mut file = KeyImageExportFile {
            spend_public_key: Key::from([1u8; 32]),
            view_public_key: Key::from([2u8; 32]),
            signatures: vec![KeyImageExportEntry {
                key_image: Key::from([3u8; 32]),
                tx_public_key: Key::from([4u8; 32]),
                out_index: 9,
            }],
        };

        let mut writer = VecWriter::new();
        {
            let mut ar = BoostArchive::writer(&mut writer);
            ar.root().unwrap();
            file.serialize(&mut ar).unwrap();
        }
        let bytes = writer.into_bytes();

        let mut loaded = KeyImageExportFile::default();
        let mut reader = SliceReader::new(&bytes);
        let mut ar = BoostArchive::reader(&mut reader);
        ar.root().unwrap();
        loaded.serialize(&mut ar).unwrap();

        assert_eq!(loaded, file);
    }
}
