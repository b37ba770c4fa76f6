//! Open-chaining hash table with a deterministic polynomial hash
//!
//! Buckets are plain vectors of `(key, value)` pairs. The table only grows:
//! whenever an insert of a new key would push the load factor to 0.7 or
//! above, the bucket count doubles and every entry is rehashed.

use std::borrow::Borrow;

use tracing::debug;

/// Bucket count used by [`ChainedTable::new`]
pub const DEFAULT_BUCKETS: usize = 64;

/// Load factor (as a fraction of 10) at which the table grows
const GROW_AT_TENTHS: usize = 7;

/// Keys that can be placed in a [`ChainedTable`]
///
/// The hash depends on the bucket count, so it is recomputed for every
/// entry after a resize.
pub trait PolyHash {
    fn poly_hash(&self, buckets: usize) -> usize;
}

impl PolyHash for str {
    /// `h = (h * 31 + code(c)) mod buckets` over the characters of the string
    fn poly_hash(&self, buckets: usize) -> usize {
        let modulus = buckets as u64;
        let mut h: u64 = 0;
        for c in self.chars() {
            h = (h * 31 + u64::from(u32::from(c))) % modulus;
        }
        h as usize
    }
}

impl PolyHash for String {
    fn poly_hash(&self, buckets: usize) -> usize {
        self.as_str().poly_hash(buckets)
    }
}

#[derive(Debug, Clone)]
pub struct ChainedTable<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
}

impl<K: PolyHash + Eq, V> Default for ChainedTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PolyHash + Eq, V> ChainedTable<K, V> {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Create a table with `buckets` chains (at least one)
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(1);
        Self {
            buckets: empty_buckets(buckets),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Insert or overwrite, returning the previous value for `key`
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let prospective = if self.contains_key(&key) {
            self.len
        } else {
            self.len + 1
        };
        while prospective * 10 >= self.buckets.len() * GROW_AT_TENTHS {
            self.grow();
        }

        let idx = key.poly_hash(self.buckets.len());
        let chain = &mut self.buckets[idx];
        if let Some(slot) = chain.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        chain.push((key, value));
        self.len += 1;
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PolyHash + Eq + ?Sized,
    {
        let idx = key.poly_hash(self.buckets.len());
        self.buckets[idx]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PolyHash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PolyHash + Eq + ?Sized,
    {
        let idx = key.poly_hash(self.buckets.len());
        let chain = &mut self.buckets[idx];
        let pos = chain.iter().position(|(k, _)| k.borrow() == key)?;
        self.len -= 1;
        Some(chain.remove(pos).1)
    }

    /// Entries in bucket order, not insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|(k, v)| (k, v)))
    }

    fn grow(&mut self) {
        let new_size = self.buckets.len() * 2;
        debug!(from = self.buckets.len(), to = new_size, entries = self.len, "resizing table");

        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_size));
        for (key, value) in old.into_iter().flatten() {
            let idx = key.poly_hash(new_size);
            self.buckets[idx].push((key, value));
        }
    }
}

fn empty_buckets<K, V>(n: usize) -> Vec<Vec<(K, V)>> {
    (0..n).map(|_| Vec::new()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_poly_hash_known_values() {
        // 'a' = 97, 'b' = 98: (97 * 31 + 98) % 64 = 3105 % 64 = 33
        assert_eq!("ab".poly_hash(64), 33);
        assert_eq!("".poly_hash(64), 0);
        assert_eq!("a".poly_hash(64), 97 % 64);
        assert_eq!(String::from("ab").poly_hash(128), "ab".poly_hash(128));
    }

    #[test]
    fn test_poly_hash_in_range() {
        for name in ["Iron Ore", "Kula Duda I", "Usurper's Growl+", "Xeno'jiiva Horn"] {
            for buckets in [1, 7, 64, 1024] {
                assert!(name.poly_hash(buckets) < buckets);
            }
        }
    }

    #[test]
    fn test_insert_get_overwrite() {
        let mut table: ChainedTable<String, u32> = ChainedTable::new();
        assert_eq!(table.insert("Iron Sword".to_string(), 1), None);
        assert_eq!(table.insert("Iron Sword".to_string(), 2), Some(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Iron Sword"), Some(&2));
        assert_eq!(table.get("Bone Club"), None);
    }

    #[test]
    fn test_remove() {
        let mut table: ChainedTable<String, u32> = ChainedTable::new();
        table.insert("a".to_string(), 1);
        table.insert("b".to_string(), 2);
        assert_eq!(table.remove("a"), Some(1));
        assert_eq!(table.remove("a"), None);
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("b"));
    }

    #[test]
    fn test_collisions_share_a_chain() {
        // single bucket: every key collides until the first resize
        let mut table: ChainedTable<String, usize> = ChainedTable::with_buckets(1);
        for i in 0..20 {
            table.insert(format!("item {i}"), i);
        }
        for i in 0..20 {
            assert_eq!(table.get(format!("item {i}").as_str()), Some(&i));
        }
    }

    #[test]
    fn test_grows_before_threshold() {
        let mut table: ChainedTable<String, usize> = ChainedTable::with_buckets(10);
        for i in 0..6 {
            table.insert(format!("k{i}"), i);
        }
        assert_eq!(table.bucket_count(), 10);
        // 7 / 10 would reach the threshold
        table.insert("k6".to_string(), 6);
        assert_eq!(table.bucket_count(), 20);
        assert!(table.load_factor() < 0.7);
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let mut table: ChainedTable<String, usize> = ChainedTable::with_buckets(10);
        for i in 0..6 {
            table.insert(format!("k{i}"), i);
        }
        table.insert("k0".to_string(), 100);
        assert_eq!(table.bucket_count(), 10);
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_iter_yields_every_entry() {
        let mut table: ChainedTable<String, usize> = ChainedTable::with_buckets(2);
        for i in 0..50 {
            table.insert(format!("k{i}"), i);
        }
        let mut seen: Vec<usize> = table.iter().map(|(_, v)| *v).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_matches_hashmap(ops in prop::collection::vec(("[a-e]{1,3}", 0u32..100, any::<bool>()), 0..200)) {
            let mut table: ChainedTable<String, u32> = ChainedTable::with_buckets(1);
            let mut model: HashMap<String, u32> = HashMap::new();

            for (key, value, is_insert) in ops {
                if is_insert {
                    prop_assert_eq!(table.insert(key.clone(), value), model.insert(key, value));
                    prop_assert!(table.load_factor() < 0.7);
                } else {
                    prop_assert_eq!(table.remove(key.as_str()), model.remove(&key));
                }
                prop_assert_eq!(table.len(), model.len());
            }

            for (key, value) in &model {
                prop_assert_eq!(table.get(key.as_str()), Some(value));
            }
        }
    }
}
