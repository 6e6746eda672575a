use murmur3::murmur3_32;
use std::io::Cursor;

/// Number of bits in a fingerprint. Values live in `1..=FINGERPRINT_MAX`.
pub const FINGERPRINT_BITS: u32 = 7;

/// Largest fingerprint value; `0` is reserved for empty slots.
pub const FINGERPRINT_MAX: u8 = (1u8 << FINGERPRINT_BITS) - 1;

const DJB2_SEED: u64 = 5381;

pub(crate) fn hash_murmur32(key: &[u8]) -> u32 {
    let mut cursor = Cursor::new(key);
    murmur3_32(&mut cursor, 0).expect("Failed to compute Murmur3 hash")
}

pub(crate) fn hash_djb2(key: &[u8]) -> u64 {
    key.iter().fold(DJB2_SEED, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(byte as u64)
    })
}

/// djb2 folded into `1..=127`, never colliding with the empty sentinel.
pub fn fingerprint(item: &[u8]) -> u8 {
    (hash_djb2(item) % FINGERPRINT_MAX as u64) as u8 + 1
}

/// General purpose bucket hash; callers reduce it modulo the bucket count.
pub fn bucket_hash(item: &[u8]) -> u32 {
    hash_murmur32(item)
}

/// Hash of a fingerprint's decimal text, used to derive the partner bucket.
pub fn fingerprint_hash(fp: u8) -> u32 {
    bucket_hash(fp.to_string().as_bytes())
}

/// Smallest power of two `>= n`, with `round_up_pow2(0) == 1`.
pub fn round_up_pow2(n: usize) -> Option<usize> {
    n.checked_next_power_of_two()
}

/// Bucket count for `expected_items` including the 6% load margin.
pub fn optimal_bucket_count(expected_items: usize) -> Option<usize> {
    let with_margin = (expected_items as f64 * 1.06).ceil();
    if !with_margin.is_finite() || with_margin >= usize::MAX as f64 {
        return None;
    }
    round_up_pow2(with_margin as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_never_zero() {
        for i in 0..10_000 {
            let fp = fingerprint(format!("item_{i}").as_bytes());
            assert!((1..=FINGERPRINT_MAX).contains(&fp));
        }
        assert_eq!(fingerprint(b""), (DJB2_SEED % 127) as u8 + 1);
    }

    #[test]
    fn test_djb2_known_value() {
        // 5381 * 33 + 'a'
        assert_eq!(hash_djb2(b"a"), 177_670);
        assert_eq!(fingerprint(b"a"), (177_670 % 127) as u8 + 1);
    }

    #[test]
    fn test_fingerprint_hash_uses_decimal_text() {
        assert_eq!(fingerprint_hash(42), bucket_hash(b"42"));
        assert_ne!(fingerprint_hash(42), bucket_hash(&[42]));
    }

    #[test]
    fn test_round_up_pow2() {
        assert_eq!(round_up_pow2(0), Some(1));
        assert_eq!(round_up_pow2(1), Some(1));
        assert_eq!(round_up_pow2(11), Some(16));
        assert_eq!(round_up_pow2(16), Some(16));
        assert_eq!(round_up_pow2(usize::MAX), None);
    }

    #[test]
    fn test_optimal_bucket_count() {
        assert_eq!(optimal_bucket_count(0), Some(1));
        // ceil(10 * 1.06) = 11
        assert_eq!(optimal_bucket_count(10), Some(16));
        // ceil(100 * 1.06) = 106
        assert_eq!(optimal_bucket_count(100), Some(128));
        for n in [1usize, 7, 63, 1000, 123_456] {
            let m = optimal_bucket_count(n).unwrap();
            assert!(m.is_power_of_two());
            assert!(m as f64 >= (n as f64 * 1.06).ceil());
        }
        assert_eq!(optimal_bucket_count(usize::MAX), None);
    }
}
