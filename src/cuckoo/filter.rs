use super::{
    BulkCuckooFilterOps, CuckooError, CuckooFilterConfig, CuckooFilterOps,
    CuckooFilterStats, CuckooResult,
};
use crate::hash::{bucket_hash, fingerprint, fingerprint_hash};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, warn};

pub const SLOTS_PER_BUCKET: usize = 4;

const EMPTY: u8 = 0;

/// Four fingerprint slots, `0` marks an empty slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    slots: [u8; SLOTS_PER_BUCKET],
}

impl Bucket {
    /// Store `fp` in the first empty slot.
    pub fn insert(&mut self, fp: u8) -> bool {
        match self.slots.iter_mut().find(|slot| **slot == EMPTY) {
            Some(slot) => {
                *slot = fp;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, fp: u8) -> bool {
        self.slots.contains(&fp)
    }

    /// Put `fp` into `slot` and hand back the previous occupant.
    pub fn swap(&mut self, slot: usize, fp: u8) -> u8 {
        std::mem::replace(&mut self.slots[slot], fp)
    }

    pub fn is_full(&self) -> bool {
        !self.slots.contains(&EMPTY)
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|&&fp| fp != EMPTY).count()
    }

    pub fn slots(&self) -> &[u8; SLOTS_PER_BUCKET] {
        &self.slots
    }
}

/// Result of a successful insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Fingerprint went straight into one of its two buckets
    Stored,
    /// Room was made by relocating `kicks` fingerprints
    Relocated { kicks: usize },
}

impl InsertOutcome {
    pub fn kicks(&self) -> usize {
        match self {
            InsertOutcome::Stored => 0,
            InsertOutcome::Relocated { kicks } => *kicks,
        }
    }
}

/// Answer of a membership query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Item may have been inserted
    Probable,
    /// Item was definitely never inserted
    Absent,
}

impl Membership {
    pub fn is_probable(&self) -> bool {
        matches!(self, Membership::Probable)
    }
}

impl From<bool> for Membership {
    fn from(found: bool) -> Self {
        if found {
            Membership::Probable
        } else {
            Membership::Absent
        }
    }
}

pub struct CuckooFilter {
    config: CuckooFilterConfig,
    buckets: Vec<Bucket>,
    bucket_mask: usize,
    len: usize,
    rng: StdRng,
}

impl CuckooFilter {
    pub fn new(config: CuckooFilterConfig) -> CuckooResult<Self> {
        config.validate()?;

        let bucket_count = config.bucket_count()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        debug!(
            expected_items = config.expected_items,
            bucket_count,
            max_kicks = config.max_kicks,
            "created cuckoo filter"
        );

        Ok(Self {
            config,
            buckets: vec![Bucket::default(); bucket_count],
            bucket_mask: bucket_count - 1,
            len: 0,
            rng,
        })
    }

    /// Filter sized for `expected_items` with default settings
    pub fn with_capacity(expected_items: usize) -> CuckooResult<Self> {
        Self::new(CuckooFilterConfig::with_expected_items(expected_items))
    }

    pub fn config(&self) -> &CuckooFilterConfig {
        &self.config
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Fingerprint plus primary and partner bucket of `item`.
    pub fn locate(&self, item: &[u8]) -> (u8, usize, usize) {
        let fp = fingerprint(item);
        let i = self.index_of(item);
        (fp, i, self.alt_index(i, fp))
    }

    fn index_of(&self, item: &[u8]) -> usize {
        bucket_hash(item) as usize & self.bucket_mask
    }

    // Symmetric: alt_index(alt_index(i, fp), fp) == i
    fn alt_index(&self, index: usize, fp: u8) -> usize {
        (index ^ fingerprint_hash(fp) as usize) & self.bucket_mask
    }

    // Tries slot k of both buckets before moving on to slot k + 1
    fn place(&mut self, fp: u8, i: usize, j: usize) -> bool {
        for slot in 0..SLOTS_PER_BUCKET {
            for index in [i, j] {
                let bucket = &mut self.buckets[index];
                if bucket.slots[slot] == EMPTY {
                    bucket.slots[slot] = fp;
                    return true;
                }
            }
        }
        false
    }

    fn pick_victim(&mut self, a: usize, b: usize) -> usize {
        if self.rng.random_bool(0.5) { a } else { b }
    }

    /// Evict fingerprints until one lands in a free slot. Each round the
    /// victim bucket is drawn from the carried fingerprint's two candidates.
    /// Returns the number of kicks, or `None` after rolling back when the
    /// bound is hit.
    fn kick(&mut self, fp: u8, i: usize, j: usize) -> Option<usize> {
        let mut path: Vec<(usize, usize)> = Vec::new();
        let mut carried = fp;
        let mut victim = self.pick_victim(i, j);

        for kick in 1..=self.config.max_kicks {
            let slot = self.rng.random_range(0..SLOTS_PER_BUCKET);
            carried = self.buckets[victim].swap(slot, carried);
            path.push((victim, slot));

            let alt = self.alt_index(victim, carried);
            if self.buckets[alt].insert(carried) {
                debug!(kicks = kick, bucket = alt, "fingerprint relocated");
                return Some(kick);
            }
            victim = self.pick_victim(victim, alt);
        }

        // Undo every swap so no stored fingerprint is lost
        for &(bucket, slot) in path.iter().rev() {
            carried = self.buckets[bucket].swap(slot, carried);
        }
        debug_assert_eq!(carried, fp);
        None
    }
}

impl CuckooFilterOps for CuckooFilter {
    fn insert(&mut self, item: &[u8]) -> CuckooResult<InsertOutcome> {
        let (fp, i, j) = self.locate(item);

        if self.place(fp, i, j) {
            self.len += 1;
            return Ok(InsertOutcome::Stored);
        }

        match self.kick(fp, i, j) {
            Some(kicks) => {
                self.len += 1;
                Ok(InsertOutcome::Relocated { kicks })
            }
            None => {
                let kicks = self.config.max_kicks;
                warn!(
                    kicks,
                    bucket_count = self.buckets.len(),
                    stored = self.len,
                    "cuckoo filter full, insertion abandoned"
                );
                Err(CuckooError::CapacityExhausted {
                    kicks,
                    item_len: item.len(),
                })
            }
        }
    }

    fn contains(&self, item: &[u8]) -> Membership {
        let (fp, i, j) = self.locate(item);
        Membership::from(
            self.buckets[i].contains(fp) || self.buckets[j].contains(fp),
        )
    }
}

impl BulkCuckooFilterOps for CuckooFilter {
    fn insert_bulk(&mut self, items: &[&[u8]]) -> CuckooResult<()> {
        for item in items {
            self.insert(item)?;
        }
        Ok(())
    }

    fn contains_bulk(&self, items: &[&[u8]]) -> Vec<Membership> {
        items.iter().map(|item| self.contains(item)).collect()
    }
}

impl CuckooFilterStats for CuckooFilter {
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn slot_capacity(&self) -> usize {
        self.buckets.len() * SLOTS_PER_BUCKET
    }

    fn len(&self) -> usize {
        self.len
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.slot_capacity() as f64
    }

    fn max_kicks(&self) -> usize {
        self.config.max_kicks
    }

    fn approx_memory_bytes(&self) -> usize {
        self.buckets.len() * std::mem::size_of::<Bucket>()
    }
}
