//! First-occupant bookkeeping for bucket addresses

use std::{
    collections::{hash_map, HashMap},
    hash::{BuildHasher, RandomState},
};

use crate::{address::BucketAddress, keyspace::Key};

/// Two distinct keys that resolve to the same bucket address
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Collision {
    /// First key seen at `address`
    pub existing_key: Key,
    /// Later key that landed on the occupied address
    pub new_key: Key,
    pub address: BucketAddress,
}

/// Result of `CollisionTracker::check_and_insert`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoCollision,
    Collision(Collision),
}

impl Outcome {
    #[inline]
    pub fn is_collision(&self) -> bool {
        matches!(self, Outcome::Collision(_))
    }

    #[inline]
    pub fn into_collision(self) -> Option<Collision> {
        match self {
            Outcome::Collision(collision) => Some(collision),
            Outcome::NoCollision => None,
        }
    }
}

/// Records the first key seen at each bucket address
///
/// Entries are never replaced or removed: once an address is claimed, every
/// later distinct key that maps there is reported as a collision against the
/// first.
pub struct CollisionTracker<S = RandomState> {
    seen: HashMap<BucketAddress, Key, S>,
    collisions: u64,
}

impl CollisionTracker<RandomState> {
    /// Create an empty tracker
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Create an empty tracker with room for `capacity` addresses
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<S> CollisionTracker<S> {
    /// Create an empty tracker with provided hasher
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            seen: HashMap::with_hasher(hash_builder),
            collisions: 0,
        }
    }

    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            seen: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            collisions: 0,
        }
    }

    /// Returns the number of occupied addresses
    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if no address has been claimed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Returns the number of collisions recorded so far
    #[inline]
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Returns a reference to the hasher
    #[inline]
    pub fn hasher(&self) -> &S {
        self.seen.hasher()
    }

    /// Occupied addresses and their first keys, in arbitrary order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.seen.iter(),
        }
    }
}

impl<S: BuildHasher> CollisionTracker<S> {
    /// Claims `address` for `key`, or reports the key already holding it
    ///
    /// Offering the occupant itself again is not a collision.
    pub fn check_and_insert(&mut self, address: BucketAddress, key: Key) -> Outcome {
        match self.entry(address) {
            Entry::Vacant(entry) => {
                entry.claim(key);
                Outcome::NoCollision
            }
            Entry::Occupied(entry) if entry.occupant() == &key => Outcome::NoCollision,
            Entry::Occupied(entry) => Outcome::Collision(entry.collide(key)),
        }
    }

    /// Gets the entry for `address` for in-place inspection
    pub fn entry(&mut self, address: BucketAddress) -> Entry<'_> {
        match self.seen.entry(address) {
            hash_map::Entry::Occupied(inner) => Entry::Occupied(OccupiedEntry {
                inner,
                collisions: &mut self.collisions,
            }),
            hash_map::Entry::Vacant(inner) => Entry::Vacant(VacantEntry { inner }),
        }
    }

    /// Returns the first key that claimed `address`
    #[inline]
    pub fn occupant(&self, address: BucketAddress) -> Option<&Key> {
        self.seen.get(&address)
    }

    #[inline]
    pub fn contains_address(&self, address: BucketAddress) -> bool {
        self.seen.contains_key(&address)
    }
}

impl Default for CollisionTracker<RandomState> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// A view into a single address of a `CollisionTracker`
pub enum Entry<'a> {
    Occupied(OccupiedEntry<'a>),
    Vacant(VacantEntry<'a>),
}

impl Entry<'_> {
    pub fn address(&self) -> BucketAddress {
        match self {
            Entry::Occupied(entry) => entry.address(),
            Entry::Vacant(entry) => entry.address(),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Entry::Occupied(_))
    }
}

/// An address that already has a first occupant
pub struct OccupiedEntry<'a> {
    inner: hash_map::OccupiedEntry<'a, BucketAddress, Key>,
    collisions: &'a mut u64,
}

impl<'a> OccupiedEntry<'a> {
    pub fn address(&self) -> BucketAddress {
        *self.inner.key()
    }

    /// Gets a reference to the first key seen at this address
    pub fn occupant(&self) -> &Key {
        self.inner.get()
    }

    /// Records `key` as colliding with the occupant, which stays in place
    pub fn collide(self, key: Key) -> Collision {
        *self.collisions += 1;
        Collision {
            existing_key: self.inner.get().clone(),
            new_key: key,
            address: *self.inner.key(),
        }
    }
}

/// An address nobody has claimed yet
pub struct VacantEntry<'a> {
    inner: hash_map::VacantEntry<'a, BucketAddress, Key>,
}

impl<'a> VacantEntry<'a> {
    pub fn address(&self) -> BucketAddress {
        *self.inner.key()
    }

    /// Makes `key` the first occupant and returns a reference to it
    pub fn claim(self, key: Key) -> &'a Key {
        self.inner.insert(key)
    }
}

/// An iterator over the claimed addresses of a `CollisionTracker`
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, BucketAddress, Key>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BucketAddress, &'a Key);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&address, key)| (address, key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a, S> IntoIterator for &'a CollisionTracker<S> {
    type Item = (BucketAddress, &'a Key);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
