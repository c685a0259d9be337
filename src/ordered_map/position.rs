use core::borrow::Borrow;
use core::hash::Hash;
use core::ops::{Index, IndexMut};

use super::OrderedMap;
use crate::error::{Error, Result};
use crate::{IntoPosition, Position};

impl<K, V> OrderedMap<K, V> {
    /// Returns the key-value pair at the given position in iteration order.
    ///
    /// Non-negative positions count from the front, negative ones from the
    /// back (`-1` is the last entry). Floating-point positions are truncated
    /// toward zero. Returns `None` if the position is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 10), ("c", 30), ("b", 20)]);
    ///
    /// assert_eq!(map.get_position(1), Some((&"c", &30)));
    /// assert_eq!(map.get_position(-1), Some((&"b", &20)));
    /// assert_eq!(map.get_position(1.9), Some((&"c", &30)));
    /// assert!(map.get_position(3).is_none());
    /// assert!(map.get_position(-4).is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn get_position<P: IntoPosition>(&self, index: P) -> Option<(&K, &V)> {
        let offset = index.into_position().resolve(self.raw.len())?;
        self.raw.get_index(offset)
    }

    /// Returns the key and a mutable reference to the value at the given
    /// position in iteration order.
    ///
    /// The key is returned as a shared reference because changing it would
    /// invalidate the map's hash index.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([(10, "a"), (5, "b")]);
    ///
    /// if let Some((key, value)) = map.get_position_mut(-1) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_position_mut<P: IntoPosition>(&mut self, index: P) -> Option<(&K, &mut V)> {
        let offset = index.into_position().resolve(self.raw.len())?;
        self.raw.get_index_mut(offset)
    }

    fn resolve_or_err(&self, position: Position) -> Result<usize> {
        let len = self.raw.len();
        position.resolve(len).ok_or_else(|| {
            log::debug!("position {} rejected for length {len}", position.0);
            Error::OutOfBounds {
                index: position.0,
                len,
            }
        })
    }
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    /// Returns the zero-based position of `key` in iteration order, or `None`
    /// if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let map = OrderedMap::from([(20, "b"), (10, "a")]);
    ///
    /// assert_eq!(map.position_of(&10), Some(1));
    /// assert_eq!(map.position_of(&15), None);
    /// ```
    #[must_use]
    pub fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get_index_of(key)
    }

    /// Moves the entry at position `from` so that it ends up at position `to`,
    /// shifting the entries in between by one.
    ///
    /// Both positions may be negative. They are resolved against the current
    /// length before anything moves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if either position is out of bounds; the
    /// map is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// map.move_position(0, -1).unwrap();
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "c", "a"]);
    ///
    /// assert!(map.move_position(0, 3).is_err());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) in the distance between the two positions.
    pub fn move_position<F, T>(&mut self, from: F, to: T) -> Result<()>
    where
        F: IntoPosition,
        T: IntoPosition,
    {
        let from = self.resolve_or_err(from.into_position())?;
        let to = self.resolve_or_err(to.into_position())?;
        self.raw.move_index(from, to);
        Ok(())
    }

    /// Swaps the entries at positions `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if either position is out of bounds; the
    /// map is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// map.swap_positions(0, -1).unwrap();
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [3, 2, 1]);
    ///
    /// assert_eq!(map.swap_positions(0, -4), Err(Error::OutOfBounds { index: -4, len: 3 }));
    /// ```
    pub fn swap_positions<A, B>(&mut self, a: A, b: B) -> Result<()>
    where
        A: IntoPosition,
        B: IntoPosition,
    {
        let a = self.resolve_or_err(a.into_position())?;
        let b = self.resolve_or_err(b.into_position())?;
        self.raw.swap_indices(a, b);
        Ok(())
    }
}

/// Indexes into the map by position.
///
/// # Panics
///
/// Panics if the position is out of bounds.
///
/// # Examples
///
/// ```
/// use ordered_collection::{OrderedMap, Position};
///
/// let map = OrderedMap::from([("a", 1), ("b", 2)]);
///
/// assert_eq!(map[Position(0)], 1);
/// assert_eq!(map[Position::LAST], 2);
/// ```
impl<K, V> Index<Position> for OrderedMap<K, V> {
    type Output = V;

    fn index(&self, position: Position) -> &Self::Output {
        self.get_position(position).map(|(_, v)| v).expect("position out of bounds")
    }
}

/// Mutably indexes into the map by position.
///
/// # Panics
///
/// Panics if the position is out of bounds.
///
/// # Examples
///
/// ```
/// use ordered_collection::{OrderedMap, Position};
///
/// let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
/// map[Position(-2)] = 5;
///
/// assert_eq!(map.get(&"a"), Some(&5));
/// ```
impl<K, V> IndexMut<Position> for OrderedMap<K, V> {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        self.get_position_mut(position).map(|(_, v)| v).expect("position out of bounds")
    }
}
