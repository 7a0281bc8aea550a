//! Exhaustive collision search for a seeded multiplicative string hash
//! addressing a fixed-size bucket table.
//!
//! ```
//! use bucket_collider::{collider::Collider, tracker::Collision};
//!
//! let mut found: Vec<Collision> = Vec::new();
//! let summary = Collider::default().scan(&mut found).unwrap();
//! assert_eq!(summary.collisions, found.len() as u64);
//! ```

pub mod address;
pub mod collider;
pub mod config;
pub mod error;
pub mod hash;
pub mod keyspace;
pub mod report;
pub mod tracker;

pub use address::{AddressMapper, BucketAddress, TableGeometry};
pub use collider::{Collider, ScanSummary};
pub use config::{ScanConfig, ScanLimits};
pub use error::{ConfigError, Error, Result};
pub use hash::{Encoding, KeyHasher, MultiplicativeHash};
pub use keyspace::{Alphabet, Key, KeySpace};
pub use report::{AddressFormat, RecordStyle, Reporter, TextReporter};
pub use tracker::{Collision, CollisionTracker, Outcome};
