//! Cuckoo filter with 4-slot buckets and 7-bit fingerprints
pub mod config;
pub mod error;
pub mod filter;
pub mod traits;

pub use config::{
    CuckooFilterConfig, CuckooFilterConfigBuilder,
    CuckooFilterConfigBuilderError, DEFAULT_MAX_KICKS,
};
pub use error::{CuckooError, CuckooResult};
pub use filter::{
    Bucket, CuckooFilter, InsertOutcome, Membership, SLOTS_PER_BUCKET,
};
pub use traits::{BulkCuckooFilterOps, CuckooFilterOps, CuckooFilterStats};
