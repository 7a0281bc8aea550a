//! Candidate keys and the order they are enumerated in

use std::{borrow::Borrow, collections::HashSet, fmt, iter::FusedIterator, str::FromStr};

use crate::{
    config::DEFAULT_KEY_LENGTH,
    error::{ConfigError, Error, Result},
};

/// A non-empty candidate key
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        Ok(Self(key))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Ordered, duplicate-free set of key symbols
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new<I>(symbols: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = char>,
    {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        if let Some(&dup) = symbols.iter().find(|&&ch| !seen.insert(ch)) {
            return Err(ConfigError::DuplicateSymbol(dup));
        }

        Ok(Self { symbols })
    }

    /// `a`..`z` followed by `A`..`Z`
    pub fn ascii_letters() -> Self {
        Self {
            symbols: ('a'..='z').chain('A'..='Z').collect(),
        }
    }

    pub fn ascii_lowercase() -> Self {
        Self {
            symbols: ('a'..='z').collect(),
        }
    }

    pub fn ascii_uppercase() -> Self {
        Self {
            symbols: ('A'..='Z').collect(),
        }
    }

    pub fn digits() -> Self {
        Self {
            symbols: ('0'..='9').collect(),
        }
    }

    /// Digits, then lowercase, then uppercase
    pub fn ascii_alphanumeric() -> Self {
        Self {
            symbols: ('0'..='9').chain('a'..='z').chain('A'..='Z').collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Position of `ch` in enumeration order
    #[inline]
    pub fn position(&self, ch: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == ch)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::ascii_letters()
    }
}

/// Accepts a named set or a literal list of symbols
impl FromStr for Alphabet {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "letters" => Ok(Self::ascii_letters()),
            "lower" => Ok(Self::ascii_lowercase()),
            "upper" => Ok(Self::ascii_uppercase()),
            "digits" => Ok(Self::digits()),
            "alnum" => Ok(Self::ascii_alphanumeric()),
            literal => Self::new(literal.chars()),
        }
    }
}

/// Every key of a fixed length over an alphabet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySpace {
    alphabet: Alphabet,
    key_length: usize,
}

impl KeySpace {
    pub fn new(alphabet: Alphabet, key_length: usize) -> std::result::Result<Self, ConfigError> {
        if key_length == 0 {
            return Err(ConfigError::ZeroKeyLength);
        }
        Ok(Self {
            alphabet,
            key_length,
        })
    }

    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// Number of keys, or `None` if it does not fit in a `u64`
    pub fn len(&self) -> Option<u64> {
        let exp = u32::try_from(self.key_length).ok()?;
        (self.alphabet.len() as u64).checked_pow(exp)
    }

    /// A key space always holds at least one key
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lazily enumerates the space; each call starts over
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self)
    }

    /// Position of `key` in enumeration order
    pub fn rank(&self, key: &str) -> Option<u64> {
        let radix = self.alphabet.len() as u64;
        let mut rank = 0u64;
        let mut length = 0;
        for ch in key.chars() {
            let digit = self.alphabet.position(ch)? as u64;
            rank = rank.checked_mul(radix)?.checked_add(digit)?;
            length += 1;
        }
        (length == self.key_length).then_some(rank)
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            key_length: DEFAULT_KEY_LENGTH,
        }
    }
}

impl<'a> IntoIterator for &'a KeySpace {
    type Item = Key;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

/// Iterator over a `KeySpace`, first character outermost
///
/// Works like an odometer over alphabet positions: the last position
/// advances fastest and carries into the one before it.
#[derive(Clone, Debug)]
pub struct Keys<'a> {
    symbols: &'a [char],
    digits: Vec<usize>,
    remaining: Option<u64>,
    done: bool,
}

impl<'a> Keys<'a> {
    fn new(space: &'a KeySpace) -> Self {
        Self {
            symbols: space.alphabet.symbols(),
            digits: vec![0; space.key_length],
            remaining: space.len(),
            done: false,
        }
    }

    fn advance(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.symbols.len() {
                return;
            }
            *digit = 0;
        }
        // every position wrapped
        self.done = true;
    }
}

impl Iterator for Keys<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let key: String = self.digits.iter().map(|&d| self.symbols[d]).collect();
        self.advance();
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }

        Some(Key(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining.map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Keys<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_space() {
        let space = KeySpace::default();
        assert_eq!(space.len(), Some(2704));

        let keys: Vec<Key> = space.keys().collect();
        assert_eq!(keys.len(), 2704);
        assert_eq!(keys[0].as_str(), "aa");
        assert_eq!(keys[1].as_str(), "ab");
        assert_eq!(keys[25].as_str(), "az");
        assert_eq!(keys[26].as_str(), "aA");
        assert_eq!(keys[52].as_str(), "ba");
        assert_eq!(keys[2703].as_str(), "ZZ");

        let unique: HashSet<&str> = keys.iter().map(Key::as_str).collect();
        assert_eq!(unique.len(), 2704);
    }

    #[test]
    fn test_restartable() {
        let space = KeySpace::default();
        assert!(space.keys().eq(space.keys()));

        let mut keys = space.keys();
        keys.next();
        let resumed = keys.clone();
        assert!(keys.eq(resumed));
    }

    #[test]
    fn test_size_hint_counts_down() {
        let space = KeySpace::new(Alphabet::digits(), 3).unwrap();
        let mut keys = space.keys();
        assert_eq!(keys.size_hint(), (1000, Some(1000)));
        keys.next();
        assert_eq!(keys.size_hint(), (999, Some(999)));
        assert_eq!(keys.count(), 999);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let space = KeySpace::new(Alphabet::new(['x']).unwrap(), 1).unwrap();
        let mut keys = space.keys();
        assert_eq!(keys.next().map(Key::into_string), Some("x".to_string()));
        assert!(keys.next().is_none());
        assert!(keys.next().is_none());
    }

    #[test]
    fn test_rank_matches_enumeration() {
        let space = KeySpace::default();
        for (i, key) in space.keys().enumerate() {
            assert_eq!(space.rank(key.as_str()), Some(i as u64));
        }
        assert_eq!(space.rank("abc"), None);
        assert_eq!(space.rank("a1"), None);
        assert_eq!(space.rank(""), None);
    }

    #[test]
    fn test_len_overflow() {
        let space = KeySpace::new(Alphabet::ascii_letters(), 20).unwrap();
        assert_eq!(space.len(), None);
        assert_eq!(space.keys().size_hint(), (usize::MAX, None));
        assert_eq!(space.keys().next().map(Key::into_string), Some("a".repeat(20)));
    }

    #[test]
    fn test_alphabet_validation() {
        assert_eq!(Alphabet::new("".chars()), Err(ConfigError::EmptyAlphabet));
        assert_eq!(
            Alphabet::new("abca".chars()),
            Err(ConfigError::DuplicateSymbol('a'))
        );
        assert_eq!(
            KeySpace::new(Alphabet::default(), 0),
            Err(ConfigError::ZeroKeyLength)
        );
    }

    #[test]
    fn test_alphabet_from_str() {
        assert_eq!("letters".parse::<Alphabet>(), Ok(Alphabet::ascii_letters()));
        assert_eq!("lower".parse::<Alphabet>().unwrap().len(), 26);
        assert_eq!("alnum".parse::<Alphabet>().unwrap().len(), 62);
        let literal: Alphabet = "xyz".parse().unwrap();
        assert_eq!(literal.symbols(), &['x', 'y', 'z']);
        assert_eq!(literal.position('z'), Some(2));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(Key::new(""), Err(Error::EmptyKey)));
        assert_eq!(Key::new("aa").unwrap().to_string(), "aa");
    }
}
