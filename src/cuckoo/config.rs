use crate::hash::optimal_bucket_count;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::{CuckooError, CuckooResult};

/// Eviction rounds before an insertion is abandoned.
pub const DEFAULT_MAX_KICKS: usize = 500;

/// 32 bit bucket hashes can't address more buckets than this.
const MAX_BUCKET_COUNT: u64 = 1 << 32;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(pattern = "owned")]
pub struct CuckooFilterConfig {
    /// Number of items the filter is sized for
    #[builder(default = "1_000")]
    pub expected_items: usize,

    /// Maximum number of evictions per insertion
    #[builder(default = "DEFAULT_MAX_KICKS")]
    pub max_kicks: usize,

    /// Seed for the eviction RNG, OS entropy when unset
    #[builder(default = "None")]
    pub seed: Option<u64>,
}

impl Default for CuckooFilterConfig {
    fn default() -> Self {
        Self {
            expected_items: 1_000,
            max_kicks: DEFAULT_MAX_KICKS,
            seed: None,
        }
    }
}

impl CuckooFilterConfig {
    pub fn with_expected_items(expected_items: usize) -> Self {
        Self {
            expected_items,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CuckooResult<()> {
        if self.max_kicks == 0 {
            return Err(CuckooError::InvalidConfig(
                "max_kicks must be greater than 0".into(),
            ));
        }
        self.bucket_count().map(|_| ())
    }

    /// `roundUpPow2(ceil(expected_items * 1.06))`, at least one bucket.
    pub fn bucket_count(&self) -> CuckooResult<usize> {
        let count = optimal_bucket_count(self.expected_items).ok_or(
            CuckooError::CapacityOverflow {
                expected_items: self.expected_items,
            },
        )?;
        if count as u64 > MAX_BUCKET_COUNT {
            return Err(CuckooError::InvalidConfig(format!(
                "{} buckets exceed the addressable maximum of {}",
                count, MAX_BUCKET_COUNT
            )));
        }
        Ok(count)
    }

    pub fn to_bytes(&self) -> CuckooResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> CuckooResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
