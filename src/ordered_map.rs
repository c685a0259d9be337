use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Index;

use indexmap::IndexMap;

use crate::error::{Error, Result};

mod capacity;
mod position;

pub use indexmap::map::{
    Entry, IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, OccupiedEntry, VacantEntry, Values, ValuesMut,
};

/// An insertion-ordered map.
///
/// Keys are unique and hashed; iteration visits entries in the order their
/// keys were first inserted. Overwriting the value of an existing key keeps
/// the entry where it is, and removing a key shifts every later entry one
/// position toward the front, so the relative order of the remaining entries
/// never changes unless a method explicitly says so (for example
/// [`Collection::reverse`] or [`OrderedMap::move_position`]).
///
/// Besides the usual map operations the entries can be addressed by
/// position, counting from the front with non-negative indices or from the
/// back with negative ones. See [`Position`] and [`Collection::at`].
///
/// The array-like algorithms (sampling, directional search, filtering) are
/// provided by the [`Collection`] trait, which `OrderedMap` implements and
/// which specialized wrappers around an `OrderedMap` can implement too.
///
/// # Examples
///
/// ```
/// use ordered_collection::{Collection, OrderedMap};
///
/// let mut planets = OrderedMap::new();
/// planets.insert("Mercury", 0.4);
/// planets.insert("Venus", 0.7);
/// planets.insert("Earth", 1.0);
/// planets.insert("Mars", 1.5);
///
/// // iteration follows insertion order
/// let names: Vec<_> = planets.keys().copied().collect();
/// assert_eq!(names, ["Mercury", "Venus", "Earth", "Mars"]);
///
/// // overwriting keeps the position
/// planets.insert("Venus", 0.72);
/// assert_eq!(planets.position_of("Venus"), Some(1));
///
/// // positional and directional queries
/// assert_eq!(planets.at(-1), Some(&1.5));
/// assert_eq!(planets.find_key(|&au, _, _| au >= 1.0), Some(&"Earth"));
///
/// // look up a value by key (panics if the key is missing)
/// assert_eq!(planets["Mercury"], 0.4);
/// ```
///
/// An `OrderedMap` with a known list of items can be initialized from an array:
///
/// ```
/// use ordered_collection::OrderedMap;
///
/// let solar_distance = OrderedMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.len(), 4);
/// ```
///
/// [`Collection`]: crate::Collection
/// [`Collection::reverse`]: crate::Collection::reverse
/// [`Collection::at`]: crate::Collection::at
/// [`Position`]: crate::Position
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    raw: IndexMap<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty `OrderedMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> OrderedMap<K, V> {
        OrderedMap { raw: IndexMap::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// Keeps the allocated memory for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first entry in iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.first(), None);
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.first(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.raw.first()
    }

    /// Returns the last entry in iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.last(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.raw.last()
    }

    /// Gets an iterator over the entries of the map, in insertion order.
    ///
    /// The iterator is double-ended, so `iter().rev()` walks the map from the
    /// back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([(3, "c"), (1, "a"), (2, "b")]);
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (3, "c"));
    ///
    /// let (last_key, _) = map.iter().next_back().unwrap();
    /// assert_eq!(*last_key, 2);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.raw.iter()
    }

    /// Gets a mutable iterator over the entries of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([
    ///    ("a", 1),
    ///    ("b", 2),
    ///    ("c", 3),
    /// ]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map["c"], 13);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.raw.iter_mut()
    }

    /// Gets an iterator over the keys of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [2, 1]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.raw.keys()
    }

    /// Gets an iterator over the values of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        self.raw.values()
    }

    /// Gets a mutable iterator over the values of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.insert(1, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"),
    ///                     String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        self.raw.values_mut()
    }

    /// Creates a consuming iterator visiting all the keys, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<i32> = map.into_keys().collect();
    /// assert_eq!(keys, [2, 1]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        self.raw.into_keys()
    }

    /// Creates a consuming iterator visiting all the values, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        self.raw.into_values()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Reverses the iteration order in place.
    pub(crate) fn reverse_order(&mut self) {
        self.raw.reverse();
    }
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get(key)
    }

    /// Returns the stored key and the value corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([(String::from("a"), 1)]);
    /// assert_eq!(map.get_key_value("a"), Some((&String::from("a"), &1)));
    /// assert_eq!(map.get_key_value("b"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, the pair is appended at the
    /// back and `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place,
    /// the entry keeps its position, and the old value is returned. The key
    /// itself is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(12, "b");
    /// assert_eq!(map.insert(37, "c"), Some("a"));
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [37, 12]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Inserts a key-value pair only if the key is not already present.
    ///
    /// On success the pair is appended at the back and a mutable reference to
    /// the new value is returned. If the key exists the map is left untouched
    /// and [`Error::Occupied`] reports where the existing entry lives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Occupied`] if `key` is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.try_insert("a", 1).map(|v| *v), Ok(1));
    /// assert_eq!(map.try_insert("a", 2), Err(Error::Occupied { position: 0 }));
    /// assert_eq!(map["a"], 1);
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V> {
        if let Some(position) = self.raw.get_index_of(&key) {
            log::debug!("try_insert rejected: key already present at position {position}");
            return Err(Error::Occupied { position });
        }
        let (position, _) = self.raw.insert_full(key, value);
        Ok(&mut self.raw[position])
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Later entries shift one position toward the front; their relative
    /// order is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([(1, "a"), (2, "b"), (3, "c")]);
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n), since every later entry moves.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.shift_remove(key)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.shift_remove_entry(key)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)` returns `false`.
    /// The elements are visited in iteration order and the survivors keep it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = (0..8).rev().map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(6, 60), (4, 40), (2, 20), (0, 0)]));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let before = self.raw.len();
        self.raw.retain(f);
        log::trace!("retain kept {} of {before} entries", self.raw.len());
    }

    /// Gets the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// A vacant entry inserts at the back of the map. Removing through an
    /// [`OccupiedEntry`] should use `shift_remove` so the remaining entries
    /// keep their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut count: OrderedMap<&str, usize> = OrderedMap::new();
    ///
    /// // count the number of occurrences of letters in the vec
    /// for x in ["a", "b", "a", "c", "a", "b"] {
    ///     count.entry(x).and_modify(|curr| *curr += 1).or_insert(1);
    /// }
    ///
    /// assert_eq!(count["a"], 3);
    /// assert_eq!(count["b"], 2);
    /// assert_eq!(count["c"], 1);
    /// assert_eq!(count.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        self.raw.entry(key)
    }
}

impl<K: Hash, V: Hash> Hash for OrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

/// Two maps are equal when they hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for OrderedMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for OrderedMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        OrderedMap::new()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        OrderedMap {
            raw: IndexMap::from_iter(iter),
        }
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.raw.extend(iter);
    }
}

impl<'a, K: Hash + Eq + Copy, V: Copy> Extend<(&'a K, &'a V)> for OrderedMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.raw.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((2, "b")));
    /// assert_eq!(iter.next_back(), Some((1, "a")));
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        self.raw.into_iter()
    }
}

/// Indexes the map by key.
///
/// # Panics
///
/// Panics if the key is not present in the map.
impl<K, Q, V> Index<&Q> for OrderedMap<K, V>
where
    K: Borrow<Q> + Hash + Eq,
    Q: ?Sized + Hash + Eq,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}
