//! Multiplicative string hash
//!
//! The accumulator starts at a seed and folds every character in with
//! `acc = acc * multiplier + unit`, wrapping at 64 bits.

use std::{fmt, str::FromStr};

use crate::{
    config::{DEFAULT_MULTIPLIER, DEFAULT_SEED},
    error::{ConfigError, Error, Result},
};

/// Hashes a whole key into a 64-bit value
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> Result<u64>;
}

/// How a character becomes the unit folded into the accumulator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Unicode scalar value
    #[default]
    CodePoint,
    /// Single byte; characters above U+00FF are rejected, never truncated
    Byte,
}

impl Encoding {
    /// Fold unit for `ch`, or `None` if the encoding cannot represent it
    #[inline]
    pub fn unit(self, ch: char) -> Option<u64> {
        match self {
            Encoding::CodePoint => Some(u64::from(u32::from(ch))),
            Encoding::Byte => u8::try_from(ch).ok().map(u64::from),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::CodePoint => "code-point",
            Encoding::Byte => "byte",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "code-point" | "codepoint" => Ok(Encoding::CodePoint),
            "byte" => Ok(Encoding::Byte),
            other => Err(ConfigError::UnknownName {
                kind: "encoding",
                name: other.to_string(),
            }),
        }
    }
}

/// Seeded multiply-add fold with modulo 2^64 wraparound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiplicativeHash {
    seed: u64,
    multiplier: u64,
    encoding: Encoding,
}

impl MultiplicativeHash {
    #[inline]
    pub const fn new(seed: u64, multiplier: u64) -> Self {
        Self {
            seed,
            multiplier,
            encoding: Encoding::CodePoint,
        }
    }

    #[inline]
    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub const fn multiplier(&self) -> u64 {
        self.multiplier
    }

    #[inline]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// One step of the recurrence. Overflow wraps, it is not an error.
    #[inline]
    pub const fn step(&self, acc: u64, unit: u64) -> u64 {
        acc.wrapping_mul(self.multiplier).wrapping_add(unit)
    }

    #[inline]
    fn fold_char(&self, acc: u64, ch: char, position: usize) -> Result<u64> {
        let unit = self
            .encoding
            .unit(ch)
            .ok_or(Error::InvalidCharacter {
                code_point: u32::from(ch),
                position,
            })?;
        Ok(self.step(acc, unit))
    }

    /// Hashes raw code points, rejecting values that are not Unicode scalars
    pub fn hash_code_points<I>(&self, code_points: I) -> Result<u64>
    where
        I: IntoIterator<Item = u32>,
    {
        code_points
            .into_iter()
            .enumerate()
            .try_fold(self.seed, |acc, (position, code_point)| {
                let ch = char::from_u32(code_point).ok_or(Error::InvalidCharacter {
                    code_point,
                    position,
                })?;
                self.fold_char(acc, ch, position)
            })
    }
}

impl Default for MultiplicativeHash {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_MULTIPLIER)
    }
}

impl KeyHasher for MultiplicativeHash {
    fn hash_key(&self, key: &str) -> Result<u64> {
        key.chars()
            .enumerate()
            .try_fold(self.seed, |acc, (position, ch)| {
                self.fold_char(acc, ch, position)
            })
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    fn hash_key(&self, key: &str) -> Result<u64> {
        (**self).hash_key(key)
    }
}
