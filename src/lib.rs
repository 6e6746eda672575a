//! Cuckoo filter with a per-user registry and a command-file driver.
//!
//! HowTo:
//!    * Buckets: the filter owns `m` buckets of 4 one-byte slots, where `m` is
//!      `ceil(expected_items * 1.06)` rounded up to a power of two.
//!    * Fingerprints: every item is reduced to a 7 bit djb2 fingerprint in
//!      `1..=127`; `0` marks an empty slot.
//!
//! Insertion:
//!     * The primary bucket `i` is the murmur3 hash of the item modulo `m`, the
//!       partner bucket is `i XOR hash(decimal text of fingerprint)`.
//!     * When both buckets are full a random resident is kicked to its own
//!       partner bucket, at most 500 times. If that bound is hit every kick is
//!       undone and the insertion is reported as failed.
//! Query:
//!     * An item is probably present if its fingerprint sits in either bucket,
//!       and definitely absent otherwise.
//!
//! Obvious problems:
//!     * False Positives: 127 fingerprint values and 8 candidate slots give
//!       roughly a 6% false positive rate at full load.
//!     * Since 32 bit bucket hashes are used, at most 2**32 buckets are
//!       addressable.
//!     * No deletion.

pub mod command;
pub mod common;
pub mod cuckoo;
mod error;
mod hash;
pub mod registry;

pub use command::{
    Command, CommandFile, CommandProcessor, Operation, Report, Response,
    parse_commands, process_file, run_commands,
};
pub use cuckoo::{
    CuckooError, CuckooFilter, CuckooFilterConfig, CuckooFilterConfigBuilder,
    CuckooFilterOps, CuckooFilterStats, CuckooResult, InsertOutcome,
    Membership,
};
pub use error::{CommandError, Result};
pub use hash::{
    bucket_hash, fingerprint, fingerprint_hash, optimal_bucket_count,
    round_up_pow2,
};
pub use registry::FilterRegistry;
