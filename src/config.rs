//! Scan parameters and their reference values

use crate::{
    address::TableGeometry,
    error::ConfigError,
    hash::MultiplicativeHash,
    keyspace::KeySpace,
};

/// Initial accumulator value
pub const DEFAULT_SEED: u64 = 19_780_211;
/// Factor applied to the accumulator before each character is added
pub const DEFAULT_MULTIPLIER: u64 = 37;
/// Number of slots in the simulated table (`0x1ffff`)
pub const DEFAULT_BUCKET_COUNT: u64 = 131_071;
/// Bytes per slot
pub const DEFAULT_SLOT_STRIDE: u64 = 4;
/// Bytes before the first slot (`0x100`)
pub const DEFAULT_BASE_OFFSET: u64 = 256;
/// Characters per candidate key
pub const DEFAULT_KEY_LENGTH: usize = 2;

/// Conditions that end a scan before the key space is exhausted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanLimits {
    /// Stop after hashing this many keys
    pub max_keys: Option<u64>,
    /// Stop after reporting this many collisions
    pub max_collisions: Option<u64>,
}

/// Everything a scan needs
///
/// `ScanConfig::default()` is the reference run: 52 ASCII letters, two
/// characters per key, 131071 buckets of 4 bytes after a 256 byte header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanConfig {
    pub hash: MultiplicativeHash,
    pub geometry: TableGeometry,
    pub key_space: KeySpace,
    pub limits: ScanLimits,
}

impl ScanConfig {
    /// Checks the parts against each other; each part validates itself on
    /// construction
    pub fn validate(&self) -> Result<(), ConfigError> {
        let encoding = self.hash.encoding();
        if let Some(&symbol) = self
            .key_space
            .alphabet()
            .symbols()
            .iter()
            .find(|&&ch| encoding.unit(ch).is_none())
        {
            return Err(ConfigError::UnrepresentableSymbol(symbol, encoding.name()));
        }
        Ok(())
    }
}
