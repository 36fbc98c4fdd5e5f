//! The hard-fork profile the blockchain archive consults instead of an
//! on-wire version prefix.

use std::collections::HashMap;

use xmr_codec::Versioned;

/// An immutable, caller-supplied table of `type name -> version` used by a
/// [`crate::blockchain::BlockchainArchive`] to resolve the layout of a
/// version-conditional type. A type absent from the table falls back to
/// its own [`Versioned::CURRENT_VERSION`].
#[derive(Debug, Clone, Default)]
pub struct HardForkProfile {
    versions: HashMap<&'static str, u32>,
}

impl HardForkProfile {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, type_name: &'static str, version: u32) -> Self {
        self.versions.insert(type_name, version);
        self
    }

    pub fn version_of<T: Versioned>(&self) -> u32 {
        self.versions
            .get(T::TYPE_NAME)
            .copied()
            .unwrap_or(T::CURRENT_VERSION)
    }

    /// The profile in force at hard fork v9, where `TxDestinationEntry`
    /// still uses its original one-field layout. Every other
    /// version-conditional type falls back to its own current version,
    /// since the source material only documents a hard-fork-dependent
    /// layout change for `TxDestinationEntry` itself.
    pub fn v9() -> Self {
        Self::new().with("TxDestinationEntry", 1)
    }

    /// The profile in force at hard forks v10 and v11, where
    /// `TxDestinationEntry` gained its `is_subaddress` field.
    pub fn v10_11() -> Self {
        Self::new().with("TxDestinationEntry", 2)
    }
}
