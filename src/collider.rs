//! Scan driver: keys -> hash -> address -> tracker -> reporter

use std::ops::ControlFlow;

use slog::{debug, info, o, Logger};

use crate::{
    address::{AddressMapper, BucketAddress, TableGeometry},
    config::{ScanConfig, ScanLimits},
    error::Result,
    hash::{KeyHasher, MultiplicativeHash},
    keyspace::KeySpace,
    report::Reporter,
    tracker::{CollisionTracker, Outcome},
};

/// Upper bound on the tracker capacity reserved up front
const MAX_PREALLOCATED_ADDRESSES: u64 = 1 << 20;

/// What a finished scan saw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub keys_scanned: u64,
    pub collisions: u64,
    /// Distinct addresses claimed by the keys scanned
    pub distinct_addresses: u64,
    /// A limit or the reporter ended the scan before the key space ran out
    pub stopped_early: bool,
}

/// Exhaustively searches a key space for bucket address collisions
pub struct Collider<H = MultiplicativeHash, M = TableGeometry> {
    hasher: H,
    mapper: M,
    key_space: KeySpace,
    limits: ScanLimits,
    logger: Logger,
}

impl Collider {
    /// Builds a collider from a validated configuration
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let ScanConfig {
            hash,
            geometry,
            key_space,
            limits,
        } = config;
        Ok(Self::with_parts(hash, geometry, key_space).with_limits(limits))
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::with_parts(
            MultiplicativeHash::default(),
            TableGeometry::default(),
            KeySpace::default(),
        )
    }
}

impl<H, M> Collider<H, M>
where
    H: KeyHasher,
    M: AddressMapper,
{
    pub fn with_parts(hasher: H, mapper: M, key_space: KeySpace) -> Self {
        Self {
            hasher,
            mapper,
            key_space,
            limits: ScanLimits::default(),
            logger: Logger::root(slog::Discard, o!()),
        }
    }

    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    #[inline]
    pub fn key_space(&self) -> &KeySpace {
        &self.key_space
    }

    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    #[inline]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Hash and bucket address of a single key
    pub fn locate(&self, key: &str) -> Result<(u64, BucketAddress)> {
        let hash = self.hasher.hash_key(key)?;
        Ok((hash, self.mapper.address_of(hash)))
    }

    /// Runs one pass over the key space with a fresh tracker
    ///
    /// Every collision goes to `reporter` as soon as it is found. The
    /// reporter is finished even when the scan stops early.
    pub fn scan<R>(&self, reporter: &mut R) -> Result<ScanSummary>
    where
        R: Reporter + ?Sized,
    {
        let capacity = self
            .key_space
            .len()
            .unwrap_or(u64::MAX)
            .min(MAX_PREALLOCATED_ADDRESSES) as usize;
        let mut tracker = CollisionTracker::with_capacity(capacity);

        info!(self.logger, "starting scan";
            "keys" => ?self.key_space.len(),
            "alphabet" => self.key_space.alphabet().len(),
            "key_length" => self.key_space.key_length());

        let mut summary = ScanSummary::default();
        let flow = self.run(&mut tracker, reporter, &mut summary);
        summary.distinct_addresses = tracker.len() as u64;

        // flush whatever was reported, even if the pass failed
        let finished = reporter.finish();
        flow?;
        finished?;

        info!(self.logger, "scan finished";
            "keys_scanned" => summary.keys_scanned,
            "collisions" => summary.collisions,
            "distinct_addresses" => summary.distinct_addresses,
            "stopped_early" => summary.stopped_early);

        Ok(summary)
    }

    fn run<R>(
        &self,
        tracker: &mut CollisionTracker,
        reporter: &mut R,
        summary: &mut ScanSummary,
    ) -> Result<()>
    where
        R: Reporter + ?Sized,
    {
        for key in self.key_space.keys() {
            if self.limits.max_keys.is_some_and(|max| summary.keys_scanned >= max) {
                debug!(self.logger, "key limit reached"; "next_key" => %key);
                summary.stopped_early = true;
                break;
            }
            if self
                .limits
                .max_collisions
                .is_some_and(|max| summary.collisions >= max)
            {
                debug!(self.logger, "collision limit reached"; "next_key" => %key);
                summary.stopped_early = true;
                break;
            }

            let hash = self.hasher.hash_key(key.as_str())?;
            let address = self.mapper.address_of(hash);
            summary.keys_scanned += 1;

            let collision = match tracker.check_and_insert(address, key) {
                Outcome::NoCollision => continue,
                Outcome::Collision(collision) => collision,
            };
            summary.collisions += 1;

            debug!(self.logger, "collision";
                "existing" => %collision.existing_key,
                "new" => %collision.new_key,
                "address" => address.get());

            if let ControlFlow::Break(()) = reporter.report(&collision)? {
                debug!(self.logger, "reporter stopped the scan");
                summary.stopped_early = true;
                break;
            }
        }
        Ok(())
    }
}
