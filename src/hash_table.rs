//! HashTable: bucket array with separately chained entries and explicit resizing.

use crate::chain::{self, NodeKey, Nodes};
use crate::error::{HashTableError, Result};
use crate::hash::{Fnv1, StringHasher, MIN_CAPACITY};
use core::fmt;
use core::ops::Index;

/// How `resize` treats a target below [`MIN_CAPACITY`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ResizePolicy {
    /// Any non-zero bucket count is accepted, including ones below the
    /// construction floor.
    #[default]
    Relaxed,
    /// Targets below [`MIN_CAPACITY`] fail with `InvalidCapacity`.
    EnforceMinimum,
}

/// String-keyed table of `V` with `capacity` buckets.
///
/// Lookups come in two flavours: lenient ([`get`](Self::get),
/// [`delete`](Self::delete)) report absence through `Option`, strict ones
/// ([`get_or_fail`](Self::get_or_fail), [`delete_or_fail`](Self::delete_or_fail),
/// and `table["key"]`) fail with `KeyNotFound`.
pub struct HashTable<V, H = Fnv1> {
    hasher: H,
    capacity: usize,
    size: usize,
    buckets: Vec<Option<NodeKey>>, // chain heads
    nodes: Nodes<V>,
    resize_policy: ResizePolicy,
}

impl<V> HashTable<V> {
    /// Creates a table with `capacity` empty buckets hashed with FNV-1.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, Fnv1)
    }
}

impl<V, H> Default for HashTable<V, H>
where
    H: StringHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher_unchecked(MIN_CAPACITY, H::default())
    }
}

impl<V, H> HashTable<V, H>
where
    H: StringHasher + Default,
{
    /// Creates a table with `capacity` empty buckets and `H::default()`.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, H::default())
    }
}

impl<V, H> HashTable<V, H>
where
    H: StringHasher,
{
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self> {
        if capacity < MIN_CAPACITY {
            return Err(HashTableError::InvalidCapacity {
                capacity,
                minimum: MIN_CAPACITY,
            });
        }
        Ok(Self::with_hasher_unchecked(capacity, hasher))
    }

    fn with_hasher_unchecked(capacity: usize, hasher: H) -> Self {
        Self {
            hasher,
            capacity,
            size: 0,
            buckets: vec![None; capacity],
            nodes: Nodes::with_key(),
            resize_policy: ResizePolicy::default(),
        }
    }

    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    pub fn set_resize_policy(&mut self, policy: ResizePolicy) {
        self.resize_policy = policy;
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored key/value pairs.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the bucket array, independent of how many entries it holds.
    pub fn get_num_slots(&self) -> usize {
        self.buckets.len()
    }

    pub fn get_load_factor(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Bucket that `key` belongs to under the current capacity.
    pub fn hash_index(&self, key: &str) -> usize {
        (self.hasher.hash(key.as_bytes()) % self.capacity as u64) as usize
    }

    #[cfg(test)]
    pub(crate) fn nodes_len(&self) -> usize {
        self.nodes.len()
    }

    fn locate(&self, key: &str) -> Option<NodeKey> {
        chain::find(&self.nodes, self.buckets[self.hash_index(key)], key)
    }

    /// Stores `value` under `key`. Returns the previous value when the key
    /// was already present; size only grows when it was not.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let i = self.hash_index(&key);
        let prev = chain::upsert(&mut self.nodes, &mut self.buckets[i], key, value);
        if prev.is_none() {
            self.size += 1;
        }
        prev
    }

    /// Lenient lookup: `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.locate(key).map(|k| &self.nodes[k].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.locate(key)?;
        self.nodes.get_mut(k).map(|e| &mut e.value)
    }

    /// Strict lookup: fails with `KeyNotFound` when the key is absent.
    pub fn get_or_fail(&self, key: &str) -> Result<&V> {
        self.get(key).ok_or_else(|| HashTableError::key_not_found(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Lenient delete. A missing key is reported through the log and leaves
    /// the table untouched.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let removed = self.remove_entry(key);
        if removed.is_none() {
            log::warn!("key not found: {:?}", key);
        }
        removed
    }

    /// Strict delete: fails with `KeyNotFound` when the key is absent.
    pub fn delete_or_fail(&mut self, key: &str) -> Result<V> {
        self.remove_entry(key).ok_or_else(|| HashTableError::key_not_found(key))
    }

    fn remove_entry(&mut self, key: &str) -> Option<V> {
        let i = self.hash_index(key);
        let entry = chain::unlink(&mut self.nodes, &mut self.buckets[i], key)?;
        self.size -= 1;
        Some(entry.value)
    }

    /// Reallocates the bucket array with `new_capacity` slots and re-puts
    /// every entry, walking the old buckets in index order and each chain
    /// head to tail. Size is unchanged on success; on error nothing changes.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        let minimum = match self.resize_policy {
            ResizePolicy::Relaxed => 1,
            ResizePolicy::EnforceMinimum => MIN_CAPACITY,
        };
        if new_capacity < minimum {
            return Err(HashTableError::InvalidCapacity {
                capacity: new_capacity,
                minimum,
            });
        }

        log::debug!(
            "resizing from {} to {} buckets ({} entries)",
            self.capacity,
            new_capacity,
            self.size
        );
        let old_buckets = core::mem::replace(&mut self.buckets, vec![None; new_capacity]);
        let mut old_nodes =
            core::mem::replace(&mut self.nodes, Nodes::with_capacity_and_key(self.size));
        let expected = self.size;
        self.capacity = new_capacity;
        self.size = 0;

        for head in old_buckets {
            for (key, value) in chain::drain(&mut old_nodes, head) {
                self.put(key, value);
            }
        }
        debug_assert_eq!(self.size, expected);
        debug_assert!(old_nodes.is_empty());
        log::debug!("resized to {} buckets", self.capacity);
        Ok(())
    }

    /// Iterates `(key, value)` pairs in bucket-index order, then chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            nodes: &self.nodes,
            cur: None,
            remaining: self.size,
        }
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// All pairs collected in enumeration order.
    pub fn items(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V, H: StringHasher> Index<&str> for HashTable<V, H> {
    type Output = V;

    /// Panics with the `KeyNotFound` message when the key is absent.
    fn index(&self, key: &str) -> &V {
        match self.get_or_fail(key) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<K, V, H> Extend<(K, V)> for HashTable<V, H>
where
    K: Into<String>,
    H: StringHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V: fmt::Debug, H: StringHasher> fmt::Debug for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, H: StringHasher> IntoIterator for &'a HashTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(&str, &V)` in bucket order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Option<NodeKey>>,
    nodes: &'a Nodes<V>,
    cur: Option<NodeKey>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let e = &self.nodes[k];
                self.cur = e.next;
                self.remaining -= 1;
                return Some((e.key.as_str(), &e.value));
            }
            self.cur = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
