/*!
# Generalized Maps

Abstractions over `Map` data structures, allowing algorithms to choose the
most efficient implementation based on context:

- Sparse maps -> `HashMap` / `FxHashMap`
- Dense indexed maps -> `[Option<T>]`
*/

use std::{
    collections::HashMap,
    hash::{BuildHasher, Hash},
};

use num::ToPrimitive;

/// Minimalist trait for map-like collections.
pub trait Map<K, V> {
    /// Inserts a `(key, value)` pair into the map.
    /// If the key was present before, returns the previous value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes a key from the map and returns the associated value if it existed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns a reference to the value for the given key, if present.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value for the given key, inserting
    /// `V::default()` first if the key is not present.
    fn get_mut_or_default(&mut self, key: K) -> &mut V
    where
        V: Default;

    /// Returns the number of elements currently stored in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, S> Map<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn get_mut_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

/// `[Option<T>]` usable as `Map` over integral keys
impl<I, T> Map<I, T> for [Option<T>]
where
    I: ToPrimitive,
{
    fn insert(&mut self, key: I, value: T) -> Option<T> {
        self[key.to_usize().unwrap()].replace(value)
    }

    fn remove(&mut self, key: &I) -> Option<T> {
        self[key.to_usize().unwrap()].take()
    }

    fn get(&self, key: &I) -> Option<&T> {
        self[key.to_usize().unwrap()].as_ref()
    }

    fn get_mut_or_default(&mut self, key: I) -> &mut T
    where
        T: Default,
    {
        self[key.to_usize().unwrap()].get_or_insert_with(T::default)
    }

    fn len(&self) -> usize {
        self.iter().filter(|x| x.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashMap;

    #[test]
    fn hash_backend() {
        let mut map = FxHashMap::default();
        assert!(Map::is_empty(&map));
        assert_eq!(Map::insert(&mut map, 3u64, 7i64), None);
        assert_eq!(Map::insert(&mut map, 3, 9), Some(7));
        *map.get_mut_or_default(5) += 4;
        assert_eq!(Map::get(&map, &5), Some(&4));
        assert_eq!(Map::remove(&mut map, &3), Some(9));
        assert_eq!(Map::len(&map), 1);
    }

    #[test]
    fn slice_backend() {
        let mut storage = vec![None::<i64>; 8];
        let map: &mut [Option<i64>] = &mut storage;
        assert_eq!(Map::insert(map, 2u32, 5), None);
        *map.get_mut_or_default(2) += 1;
        assert_eq!(Map::get(map, &2), Some(&6));
        assert_eq!(Map::remove(map, &2), Some(6));
        assert_eq!(Map::len(map), 0);
    }
}
