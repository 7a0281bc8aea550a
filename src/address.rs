//! Hash to bucket address transform.
//!
//! A table of `bucket_count` slots, each `slot_stride` bytes wide, starting
//! `base_offset` bytes into the file:
//!
//! `address = (hash % bucket_count) * slot_stride + base_offset`

use std::fmt;

use crate::{
    config::{DEFAULT_BASE_OFFSET, DEFAULT_BUCKET_COUNT, DEFAULT_SLOT_STRIDE},
    error::ConfigError,
};

/// Maps a hash value to the slot it lands in
pub trait AddressMapper {
    fn address_of(&self, hash: u64) -> BucketAddress;
}

/// Location of a bucket slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketAddress(u64);

impl BucketAddress {
    #[inline]
    pub const fn new(address: u64) -> Self {
        Self(address)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<BucketAddress> for u64 {
    #[inline]
    fn from(address: BucketAddress) -> Self {
        address.0
    }
}

impl fmt::Display for BucketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for BucketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for BucketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Shape of the simulated slot table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableGeometry {
    bucket_count: u64,
    slot_stride: u64,
    base_offset: u64,
}

impl TableGeometry {
    /// Validates the geometry so that every address fits in a `u64`
    pub fn new(bucket_count: u64, slot_stride: u64, base_offset: u64) -> Result<Self, ConfigError> {
        if bucket_count == 0 {
            return Err(ConfigError::ZeroBucketCount);
        }
        if slot_stride == 0 {
            return Err(ConfigError::ZeroSlotStride);
        }
        (bucket_count - 1)
            .checked_mul(slot_stride)
            .and_then(|span| span.checked_add(base_offset))
            .ok_or(ConfigError::AddressOverflow {
                bucket_count,
                slot_stride,
                base_offset,
            })?;

        Ok(Self {
            bucket_count,
            slot_stride,
            base_offset,
        })
    }

    #[inline]
    pub const fn bucket_count(&self) -> u64 {
        self.bucket_count
    }

    #[inline]
    pub const fn slot_stride(&self) -> u64 {
        self.slot_stride
    }

    #[inline]
    pub const fn base_offset(&self) -> u64 {
        self.base_offset
    }

    #[inline]
    pub const fn bucket_index(&self, hash: u64) -> u64 {
        hash % self.bucket_count
    }

    /// Address of bucket `index`; `index` must be below `bucket_count`
    #[inline]
    const fn address_at(&self, index: u64) -> BucketAddress {
        BucketAddress(index * self.slot_stride + self.base_offset)
    }

    #[inline]
    pub const fn first_address(&self) -> BucketAddress {
        self.address_at(0)
    }

    #[inline]
    pub const fn last_address(&self) -> BucketAddress {
        self.address_at(self.bucket_count - 1)
    }

    /// Bucket index behind `address`, or `None` if no bucket lives there
    pub fn index_of(&self, address: BucketAddress) -> Option<u64> {
        let relative = address.0.checked_sub(self.base_offset)?;
        if relative % self.slot_stride != 0 {
            return None;
        }
        let index = relative / self.slot_stride;
        (index < self.bucket_count).then_some(index)
    }

    #[inline]
    pub fn contains(&self, address: BucketAddress) -> bool {
        self.index_of(address).is_some()
    }
}

impl AddressMapper for TableGeometry {
    #[inline]
    fn address_of(&self, hash: u64) -> BucketAddress {
        self.address_at(self.bucket_index(hash))
    }
}

impl<M: AddressMapper + ?Sized> AddressMapper for &M {
    #[inline]
    fn address_of(&self, hash: u64) -> BucketAddress {
        (**self).address_of(hash)
    }
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            slot_stride: DEFAULT_SLOT_STRIDE,
            base_offset: DEFAULT_BASE_OFFSET,
        }
    }
}
