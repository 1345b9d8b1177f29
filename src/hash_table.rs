//! A chained hash table with a fixed number of buckets.
//!
//! Colliding keys share a bucket, which is just a `Vec` of pairs scanned
//! linearly. The table never grows: pick a capacity that suits the expected
//! number of keys, because a high load factor degrades every lookup into a
//! bucket scan.

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    mem,
};

use log::{debug, trace};

use crate::error::{Error, Result};

/// A run of pairs whose keys hash to the same index.
type Bucket<K, V> = Vec<(K, V)>;

/// Maps a 64-bit hash onto `0..capacity`.
///
/// The hash is read as a signed value and its magnitude is reduced, so keys
/// land where an `abs(hash) % capacity` would put them. `unsigned_abs` is used
/// instead of `abs` because `i64::MIN` has no positive counterpart.
fn bucket_index(hash: u64, capacity: usize) -> usize {
    ((hash as i64).unsigned_abs() % capacity as u64) as usize
}

/// A hash table which resolves collisions by chaining pairs into a fixed
/// array of buckets.
pub struct HashTable<K, V, S = RandomState>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    buckets: Vec<Bucket<K, V>>,
    count: usize,
    hash_builder: S,
}

/// Iterates a table's pairs in bucket order.
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    bucket: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<K, V> HashTable<K, V, RandomState>
where
    K: Eq + Hash,
{
    /// Makes a new HashTable with a fixed number of buckets.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero. Use [`HashTable::try_with_capacity`] to get an
    /// error instead.
    pub fn with_capacity(capacity: usize) -> Self {
        HashTable::with_capacity_and_hash_builder(capacity, Default::default())
    }

    /// Makes a new HashTable with a fixed number of buckets, or returns
    /// [`Error::ZeroCapacity`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        HashTable::try_with_capacity_and_hash_builder(capacity, Default::default())
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Makes a new HashTable with a fixed number of buckets and a hasher.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero.
    pub fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        match HashTable::try_with_capacity_and_hash_builder(capacity, hash_builder) {
            Ok(table) => table,
            Err(e) => panic!("{}", e),
        }
    }

    /// Makes a new HashTable with a fixed number of buckets and a hasher, or
    /// returns [`Error::ZeroCapacity`].
    pub fn try_with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        debug!("creating hash table with {} buckets", capacity);

        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);

        Ok(HashTable {
            buckets,
            count: 0,
            hash_builder,
        })
    }

    /// Gets the value stored at a key, if there is one.
    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.index_for(k)]
            .iter()
            .find(|(key, _)| key.borrow() == k)
            .map(|(_, v)| v)
    }

    /// Gets a mutable reference to the value stored at a key.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index_for(k);
        self.buckets[idx]
            .iter_mut()
            .find(|(key, _)| key.borrow() == k)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(k).is_some()
    }

    /// Stores a value at a key. If the key already had a value it is replaced
    /// in place and the previous value is returned; otherwise the pair is
    /// chained onto the end of its bucket.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        let idx = self.index_for(&k);
        let bucket = &mut self.buckets[idx];

        if let Some((_, existing)) = bucket.iter_mut().find(|(key, _)| *key == k) {
            trace!("replacing value in bucket {}", idx);
            return Some(mem::replace(existing, v));
        }

        bucket.push((k, v));
        self.count += 1;
        trace!("chained new pair into bucket {} ({} pairs)", idx, bucket.len());

        None
    }

    /// Removes a key from the table, returning whatever was there.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index_for(k);
        let bucket = &mut self.buckets[idx];
        let position = bucket.iter().position(|(key, _)| key.borrow() == k)?;

        // Vec::remove rather than swap_remove so the bucket keeps its
        // insertion order.
        let (_, v) = bucket.remove(position);
        self.count -= 1;
        trace!("removed pair from bucket {}", idx);

        Some(v)
    }

    /// Writes through to [`HashTable::insert`] for `Some` and to
    /// [`HashTable::remove`] for `None`, returning the previous value either
    /// way.
    pub fn update(&mut self, k: K, v: Option<V>) -> Option<V> {
        match v {
            Some(v) => self.insert(k, v),
            None => self.remove(&k),
        }
    }

    /// Empties every bucket. The number of buckets doesn't change.
    pub fn clear(&mut self) {
        debug!("clearing {} pairs from hash table", self.count);

        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.count = 0;
    }

    /// The bucket a key belongs in.
    pub fn index_for<Q>(&self, k: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut h = self.hash_builder.build_hasher();
        k.hash(&mut h);
        bucket_index(h.finish(), self.buckets.len())
    }

    /// The number of pairs stored right now.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The number of buckets, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Pairs per bucket. Nothing acts on this; it's here so callers can tell
    /// when they've outgrown their capacity.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            bucket: [].iter(),
            remaining: self.count,
        }
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let stored: usize = self.buckets.iter().map(|b| b.len()).sum();
        assert_eq!(self.count, stored);

        for (idx, bucket) in self.buckets.iter().enumerate() {
            for (i, (k, _)) in bucket.iter().enumerate() {
                assert_eq!(idx, self.index_for(k));
                // no key is chained twice
                assert!(bucket[i + 1..].iter().all(|(other, _)| other != k));
            }
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.bucket.next() {
                self.remaining -= 1;
                return Some((k, v));
            }

            self.bucket = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> fmt::Display for HashTable<K, V, S>
where
    K: Eq + Hash + fmt::Display,
    V: fmt::Display,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", k, v)?;
        }

        Ok(())
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, bucket) in self.buckets.iter().enumerate() {
            write!(f, "bucket {}: ", idx)?;
            for (i, (k, v)) in bucket.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?} = {:?}", k, v)?;
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{bucket_index, HashTable};
    use crate::{error::Error, null_hasher::BuildNullHasher};

    fn null_table(capacity: usize) -> HashTable<i64, &'static str, BuildNullHasher> {
        // a nullhasher makes bucket placement obvious: key k lives in bucket
        // |k| % capacity.
        HashTable::with_capacity_and_hash_builder(capacity, BuildNullHasher)
    }

    #[test]
    fn test_table() {
        let mut table: HashTable<&str, i32> = HashTable::with_capacity(5);

        assert_eq!(None, table.insert("a", 1));
        assert_eq!(None, table.insert("b", 2));
        assert_eq!(Some(&1), table.get("a"));

        assert_eq!(Some(1), table.remove("a"));
        assert_eq!(None, table.get("a"));
        assert_eq!(1, table.len());
        table.continuity_test();
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut table = null_table(3);

        assert_eq!(None, table.insert(7, "x"));
        assert_eq!(Some("x"), table.insert(7, "y"));
        assert_eq!(Some(&"y"), table.get(&7));
        assert_eq!(1, table.len());
        table.continuity_test();
    }

    #[test]
    fn test_collisions_chain_in_order() {
        let mut table = null_table(4);

        // 1, 5 and 9 all land in bucket 1
        table.insert(1, "one");
        table.insert(5, "five");
        table.insert(9, "nine");

        assert_eq!(1, table.index_for(&5));
        assert_eq!(3, table.buckets[1].len());
        assert_eq!(
            vec![1, 5, 9],
            table.buckets[1].iter().map(|(k, _)| *k).collect::<Vec<_>>()
        );

        // removing from the middle of a chain keeps the rest reachable
        assert_eq!(Some("five"), table.remove(&5));
        assert_eq!(Some(&"one"), table.get(&1));
        assert_eq!(Some(&"nine"), table.get(&9));
        assert_eq!(
            vec![1, 9],
            table.buckets[1].iter().map(|(k, _)| *k).collect::<Vec<_>>()
        );
        table.continuity_test();
    }

    #[test]
    fn test_negative_hashes() {
        let mut table = null_table(5);

        assert_eq!(2, table.index_for(&-7i64));
        assert_eq!(bucket_index(i64::MIN as u64, 5), table.index_for(&i64::MIN));
        assert!(table.index_for(&i64::MIN) < 5);

        table.insert(i64::MIN, "min");
        table.insert(i64::MAX, "max");
        assert_eq!(Some(&"min"), table.get(&i64::MIN));
        assert_eq!(Some(&"max"), table.get(&i64::MAX));
        table.continuity_test();
    }

    #[test]
    fn test_bucket_index_extremes() {
        // 2^63 % 7 == 1
        assert_eq!(1, bucket_index(i64::MIN as u64, 7));
        assert_eq!(0, bucket_index(u64::MAX, 1));
        assert_eq!(1, bucket_index(u64::MAX, 10));
        assert_eq!(3, bucket_index(3, usize::MAX));
    }

    #[test]
    fn test_update_removes_on_none() {
        let mut table = null_table(2);

        assert_eq!(None, table.update(4, Some("four")));
        assert_eq!(Some("four"), table.update(4, Some("FOUR")));
        assert_eq!(Some("FOUR"), table.update(4, None));
        assert_eq!(None, table.update(4, None));
        assert!(table.is_empty());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut table = null_table(3);
        for k in 0..10 {
            table.insert(k, "v");
        }
        assert_eq!(10, table.len());

        table.clear();
        assert!(table.is_empty());
        assert_eq!(3, table.capacity());
        assert_eq!(None, table.get(&4));
        table.continuity_test();
    }

    #[test]
    fn test_zero_capacity() {
        assert_eq!(
            Some(Error::ZeroCapacity),
            HashTable::<u8, u8>::try_with_capacity(0).err()
        );
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn test_zero_capacity_panics() {
        let _table: HashTable<u8, u8> = HashTable::with_capacity(0);
    }

    #[test]
    fn test_rendering() {
        let mut table = null_table(3);
        table.insert(1, "a");
        table.insert(4, "b");
        table.insert(2, "c");

        assert_eq!("1 = a, 4 = b, 2 = c", format!("{}", table));
        assert_eq!(
            "bucket 0: \nbucket 1: 1 = \"a\", 4 = \"b\"\nbucket 2: 2 = \"c\"\n",
            format!("{:?}", table)
        );
    }

    #[test]
    fn test_load_factor() {
        let mut table = null_table(4);
        table.insert(0, "a");
        table.insert(1, "b");
        assert!((table.load_factor() - 0.5).abs() < f64::EPSILON);
    }
}
