use crate::cuckoo::{
    CuckooFilter, CuckooFilterConfig, CuckooFilterOps, CuckooFilterStats,
    CuckooResult, InsertOutcome, Membership,
};
use fnv::FnvHashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Owned map of user identifier to that user's filter.
///
/// Every filter is built from the same config template. When the template
/// carries a seed, the n-th filter created is seeded with `seed + n` so a run
/// over the same input is reproducible.
pub struct FilterRegistry {
    template: CuckooFilterConfig,
    filters: FnvHashMap<Vec<u8>, CuckooFilter>,
    created: u64,
}

impl FilterRegistry {
    pub fn new(template: CuckooFilterConfig) -> CuckooResult<Self> {
        template.validate()?;
        Ok(Self {
            template,
            filters: FnvHashMap::default(),
            created: 0,
        })
    }

    pub fn template(&self) -> &CuckooFilterConfig {
        &self.template
    }

    /// Insert `item` into the filter of `user`, creating it on first use.
    pub fn add(
        &mut self,
        user: &[u8],
        item: &[u8],
    ) -> CuckooResult<InsertOutcome> {
        let filter = match self.filters.entry(user.to_vec()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut config = self.template.clone();
                config.seed =
                    config.seed.map(|seed| seed.wrapping_add(self.created));
                let filter = CuckooFilter::new(config)?;
                self.created += 1;
                debug!(
                    user = %String::from_utf8_lossy(user),
                    bucket_count = filter.bucket_count(),
                    "new user filter"
                );
                entry.insert(filter)
            }
        };
        filter.insert(item)
    }

    /// Unknown users have never added anything.
    pub fn check(&self, user: &[u8], item: &[u8]) -> Membership {
        self.filters
            .get(user)
            .map_or(Membership::Absent, |filter| filter.contains(item))
    }

    pub fn get(&self, user: &[u8]) -> Option<&CuckooFilter> {
        self.filters.get(user)
    }

    pub fn users(&self) -> impl Iterator<Item = &[u8]> {
        self.filters.keys().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn approx_memory_bytes(&self) -> usize {
        self.filters.values().map(|f| f.approx_memory_bytes()).sum()
    }
}
