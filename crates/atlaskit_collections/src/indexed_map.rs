use std::hash::Hash;
use std::{borrow::Borrow, collections::HashMap, ops::Index};

/// A map which hands out a stable numeric index for every key.
///
/// Values can be reached either by key or by the index returned on insertion.
/// Inserting an existing key replaces the value in place and keeps its index,
/// so indices held elsewhere keep pointing at the newest value.
///
/// Removal leaves a hole instead of shifting later entries, which means
/// an index never starts pointing at a different key. Holes are only
/// reclaimed when the map itself is dropped.
#[derive(Debug, Clone)]
pub struct IndexedMap<K, V> {
    entries: Vec<Option<(K, V)>>,
    key_to_index: HashMap<K, usize>,
}

impl<K, V> Default for IndexedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Default::default(),
            key_to_index: Default::default(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> IndexedMap<K, V> {
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
        self.key_to_index.reserve(additional);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.key_to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_index.is_empty()
    }

    /// Inserts or replaces a value, returning its index and the replaced value if any.
    pub fn insert(&mut self, key: K, value: V) -> (usize, Option<V>) {
        match self.key_to_index.get(&key) {
            Some(&index) => {
                let previous = self.entries[index].replace((key, value));
                (index, previous.map(|(_, v)| v))
            }
            None => {
                let index = self.entries.len();
                self.entries.push(Some((key.clone(), value)));
                self.key_to_index.insert(key, index);
                (index, None)
            }
        }
    }

    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        let index = self.key_to_index.remove(key)?;
        self.entries[index].take().map(|(_, v)| v)
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.entries.get(index)?.as_ref().map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.entries.get_mut(index)?.as_mut().map(|(_, v)| v)
    }

    pub fn get_index<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.key_to_index.get(key).cloned()
    }

    pub fn get_by_key<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.get_index(key).and_then(|index| self.get(index))
    }

    pub fn get_by_key_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        let index = self.get_index(key)?;
        self.get_mut(index)
    }

    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.key_to_index.contains_key(key)
    }

    /// Live entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &K, &V)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|(k, v)| (i, k, v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &K, &mut V)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(i, e)| e.as_mut().map(|(k, v)| (i, &*k, v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(_, k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, _, v)| v)
    }
}

impl<K: Eq + Hash + Clone, V> Index<usize> for IndexedMap<K, V> {
    type Output = V;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("no entry at index {index}"),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Index<&K> for IndexedMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        let index = self.key_to_index[key];
        &self[index]
    }
}
