use super::{CuckooResult, InsertOutcome, Membership};

/// Core operations for a cuckoo filter
pub trait CuckooFilterOps {
    /// Insert an item, relocating fingerprints when both buckets are full
    fn insert(&mut self, item: &[u8]) -> CuckooResult<InsertOutcome>;

    /// Check whether an item may have been inserted
    fn contains(&self, item: &[u8]) -> Membership;
}

pub trait BulkCuckooFilterOps {
    fn insert_bulk(&mut self, items: &[&[u8]]) -> CuckooResult<()>;
    fn contains_bulk(&self, items: &[&[u8]]) -> Vec<Membership>;
}

pub trait CuckooFilterStats {
    fn bucket_count(&self) -> usize;
    fn slot_capacity(&self) -> usize;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn load_factor(&self) -> f64;
    fn max_kicks(&self) -> usize;
    fn approx_memory_bytes(&self) -> usize;
}
