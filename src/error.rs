use std::io;

use thiserror::Error;

/// Rejected scan parameters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bucket count must be at least 1")]
    ZeroBucketCount,
    #[error("slot stride must be at least 1")]
    ZeroSlotStride,
    #[error(
        "last bucket address overflows u64 (bucket_count={bucket_count}, \
         slot_stride={slot_stride}, base_offset={base_offset})"
    )]
    AddressOverflow {
        bucket_count: u64,
        slot_stride: u64,
        base_offset: u64,
    },
    #[error("alphabet is empty")]
    EmptyAlphabet,
    #[error("alphabet lists {0:?} more than once")]
    DuplicateSymbol(char),
    #[error("key length must be at least 1")]
    ZeroKeyLength,
    #[error("alphabet symbol {0:?} cannot be folded with the {1} encoding")]
    UnrepresentableSymbol(char, &'static str),
    #[error("unknown {kind} {name:?}")]
    UnknownName { kind: &'static str, name: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("character U+{code_point:04X} at position {position} is outside the hashable domain")]
    InvalidCharacter { code_point: u32, position: usize },
    #[error("keys must contain at least one character")]
    EmptyKey,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("report sink error")]
    Report(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_character_message() {
        let err = Error::InvalidCharacter {
            code_point: 0x20AC,
            position: 3,
        };
        assert_eq!(
            err.to_string(),
            "character U+20AC at position 3 is outside the hashable domain"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::ZeroBucketCount.into();
        assert!(matches!(err, Error::Config(ConfigError::ZeroBucketCount)));
    }
}
