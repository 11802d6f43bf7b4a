//! String hash functions used to derive bucket indices.
//!
//! Both algorithms are total over byte sequences and keep no state between
//! calls. All arithmetic wraps at the width of the algorithm.

/// A table never has fewer buckets than this at construction.
pub const MIN_CAPACITY: usize = 8;

/// 64-bit FNV prime.
pub const FNV_PRIME: u64 = 1_099_511_628_211;

/// 64-bit FNV offset basis.
pub const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;

const DJB2_SEED: u32 = 5381;

/// FNV-1, 64-bit: multiply then xor, for every byte in order.
#[inline]
pub fn fnv1(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= u64::from(b);
    }
    hash
}

/// DJB2, 32-bit: `hash * 33 + b` computed as `(hash << 5) + hash + b`.
#[inline]
pub fn djb2(bytes: &[u8]) -> u32 {
    let mut hash = DJB2_SEED;
    for &b in bytes {
        hash = (hash << 5).wrapping_add(hash).wrapping_add(u32::from(b));
    }
    hash
}

/// Maps a key's byte encoding to an unsigned integer. Implementations must
/// be deterministic: the same bytes always produce the same value.
pub trait StringHasher {
    fn hash(&self, bytes: &[u8]) -> u64;
}

/// Selects [`fnv1`]. This is the default for `HashTable`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Fnv1;

impl StringHasher for Fnv1 {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u64 {
        fnv1(bytes)
    }
}

/// Selects [`djb2`], widened to `u64`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Djb2;

impl StringHasher for Djb2 {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u64 {
        u64::from(djb2(bytes))
    }
}

impl<H: StringHasher + ?Sized> StringHasher for &H {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u64 {
        (**self).hash(bytes)
    }
}
