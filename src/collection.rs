use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::Hash;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{IntoPosition, OrderedMap};

/// Array-like algorithms over an insertion-ordered map.
///
/// Every method is provided in terms of [`as_map`](Collection::as_map),
/// [`as_map_mut`](Collection::as_map_mut) and
/// [`new_empty`](Collection::new_empty), so a specialized container only has
/// to expose its inner [`OrderedMap`] and say how to make an empty instance of
/// itself. Operations that build a new container, such as
/// [`filter`](Collection::filter), go through `new_empty` and therefore
/// return the implementing type rather than a plain `OrderedMap`.
///
/// Predicates receive `(value, key, collection)` and the collection argument
/// is the implementing type as well.
///
/// # Examples
///
/// A wrapper that carries its own configuration across `filter`:
///
/// ```
/// use ordered_collection::{Collection, OrderedMap};
///
/// #[derive(Debug)]
/// struct Scoreboard {
///     title: &'static str,
///     scores: OrderedMap<&'static str, u32>,
/// }
///
/// impl Collection for Scoreboard {
///     type Key = &'static str;
///     type Value = u32;
///
///     fn as_map(&self) -> &OrderedMap<&'static str, u32> {
///         &self.scores
///     }
///
///     fn as_map_mut(&mut self) -> &mut OrderedMap<&'static str, u32> {
///         &mut self.scores
///     }
///
///     fn new_empty(&self) -> Self {
///         Scoreboard { title: self.title, scores: OrderedMap::new() }
///     }
/// }
///
/// let board = Scoreboard {
///     title: "finals",
///     scores: OrderedMap::from([("ann", 12), ("bo", 7), ("cy", 15)]),
/// };
///
/// let leaders: Scoreboard = board.filter(|&score, _, _| score > 10);
/// assert_eq!(leaders.title, "finals");
/// assert_eq!(leaders.scores.keys().copied().collect::<Vec<_>>(), ["ann", "cy"]);
/// assert_eq!(board.scores.len(), 3);
/// ```
pub trait Collection: Sized {
    /// The key type of the underlying map.
    type Key: Hash + Eq;
    /// The value type of the underlying map.
    type Value;

    /// Borrows the underlying map.
    fn as_map(&self) -> &OrderedMap<Self::Key, Self::Value>;

    /// Mutably borrows the underlying map.
    fn as_map_mut(&mut self) -> &mut OrderedMap<Self::Key, Self::Value>;

    /// Creates a new, empty container of the same concrete type as `self`.
    ///
    /// Implementations may copy any per-instance configuration from `self`.
    #[must_use]
    fn new_empty(&self) -> Self;

    /// Returns `true` if at least one of `keys` is present.
    ///
    /// Stops at the first key found. An empty `keys` returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    ///
    /// assert!(map.has_any(["z", "b"]));
    /// assert!(!map.has_any(["x", "y"]));
    /// assert!(!map.has_any::<str, _>([]));
    /// ```
    fn has_any<'q, Q, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'q Q>,
        Q: ?Sized + Hash + Eq + 'q,
        Self::Key: Borrow<Q>,
    {
        let map = self.as_map();
        keys.into_iter().any(|key| map.contains_key(key))
    }

    /// Reverses the iteration order in place and returns `self` for chaining.
    ///
    /// The set of entries and the length are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// let last = map.reverse().at(0).copied();
    ///
    /// assert_eq!(last, Some(3));
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["c", "b", "a"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    fn reverse(&mut self) -> &mut Self {
        let map = self.as_map_mut();
        map.reverse_order();
        log::trace!("reversed {} entries", map.len());
        self
    }

    /// Returns the value at the given position in iteration order.
    ///
    /// Negative positions count from the back (`-1` is the last value) and
    /// floating-point positions are truncated toward zero. Returns `None` when
    /// the position falls outside `[-len, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// assert_eq!(map.at(0), Some(&1));
    /// assert_eq!(map.at(-1), Some(&3));
    /// assert_eq!(map.at(1.5), Some(&2));
    /// assert_eq!(map.at(5), None);
    /// assert_eq!(map.at(-4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) in the worst case. The current backing store answers in O(1);
    /// callers should not depend on that.
    fn at<P: IntoPosition>(&self, index: P) -> Option<&Self::Value> {
        self.as_map().get_position(index).map(|(_, value)| value)
    }

    /// Returns one uniformly chosen value using `rng`, or `None` if the
    /// collection is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// let picked = map.random_with(&mut rng).unwrap();
    /// assert!(map.values().any(|v| v == picked));
    ///
    /// let empty: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert_eq!(empty.random_with(&mut rng), None);
    /// ```
    fn random_with<R>(&self, rng: &mut R) -> Option<&Self::Value>
    where
        R: Rng + ?Sized,
    {
        let len = self.as_map().len();
        if len == 0 {
            return None;
        }
        self.at(rng.random_range(0..len))
    }

    /// Returns one uniformly chosen value using the thread-local generator,
    /// or `None` if the collection is empty.
    fn random(&self) -> Option<&Self::Value> {
        self.random_with(&mut rand::rng())
    }

    /// Returns up to `amount` distinct values chosen uniformly without
    /// replacement using `rng`.
    ///
    /// The result has `min(amount, len)` elements, in random order. No entry
    /// is returned twice. Asking for zero values, or sampling an empty
    /// collection, returns an empty vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let map: OrderedMap<u32, u32> = (0..10).map(|i| (i, i * i)).collect();
    ///
    /// let mut sample = map.random_many_with(4, &mut rng);
    /// assert_eq!(sample.len(), 4);
    /// sample.sort();
    /// sample.dedup();
    /// assert_eq!(sample.len(), 4);
    ///
    /// assert_eq!(map.random_many_with(50, &mut rng).len(), 10);
    /// assert!(map.random_many_with(0, &mut rng).is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) to collect the values, then O(amount) swaps.
    fn random_many_with<R>(&self, amount: usize, rng: &mut R) -> Vec<&Self::Value>
    where
        R: Rng + ?Sized,
    {
        let map = self.as_map();
        let amount = amount.min(map.len());
        if amount == 0 {
            return Vec::new();
        }

        // A Fisher-Yates pass stopped after `amount` swaps.
        let mut values: Vec<&Self::Value> = map.values().collect();
        let (chosen, _) = values.partial_shuffle(rng, amount);
        let chosen = chosen.to_vec();
        log::trace!("sampled {} of {} values", chosen.len(), map.len());
        chosen
    }

    /// Returns up to `amount` distinct values chosen uniformly without
    /// replacement using the thread-local generator.
    ///
    /// See [`random_many_with`](Collection::random_many_with).
    fn random_many(&self, amount: usize) -> Vec<&Self::Value> {
        self.random_many_with(amount, &mut rand::rng())
    }

    /// Returns the first value, in iteration order, for which `predicate`
    /// returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 4)]);
    ///
    /// assert_eq!(map.find(|v, _, _| v % 2 == 0), Some(&2));
    /// assert_eq!(map.find(|_, k, _| *k == "z"), None);
    /// ```
    fn find<F>(&self, mut predicate: F) -> Option<&Self::Value>
    where
        F: FnMut(&Self::Value, &Self::Key, &Self) -> bool,
    {
        self.as_map()
            .iter()
            .find(|&(key, value)| predicate(value, key, self))
            .map(|(_, value)| value)
    }

    /// Returns the last value, in iteration order, for which `predicate`
    /// returns `true`. Entries are tested from the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 4)]);
    ///
    /// assert_eq!(map.find_last(|v, _, _| v % 2 == 0), Some(&4));
    /// ```
    fn find_last<F>(&self, mut predicate: F) -> Option<&Self::Value>
    where
        F: FnMut(&Self::Value, &Self::Key, &Self) -> bool,
    {
        self.as_map()
            .iter()
            .rev()
            .find(|&(key, value)| predicate(value, key, self))
            .map(|(_, value)| value)
    }

    /// Returns the key of the first entry for which `predicate` returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let map = OrderedMap::from([("x", 1), ("y", 2), ("z", 4)]);
    ///
    /// assert_eq!(map.find_key(|v, _, _| v % 2 == 0), Some(&"y"));
    /// ```
    fn find_key<F>(&self, mut predicate: F) -> Option<&Self::Key>
    where
        F: FnMut(&Self::Value, &Self::Key, &Self) -> bool,
    {
        self.as_map()
            .iter()
            .find(|&(key, value)| predicate(value, key, self))
            .map(|(key, _)| key)
    }

    /// Returns the key of the last entry for which `predicate` returns `true`.
    /// Entries are tested from the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let map = OrderedMap::from([("x", 1), ("y", 2), ("z", 4)]);
    ///
    /// assert_eq!(map.find_last_key(|v, _, _| v % 2 == 0), Some(&"z"));
    /// ```
    fn find_last_key<F>(&self, mut predicate: F) -> Option<&Self::Key>
    where
        F: FnMut(&Self::Value, &Self::Key, &Self) -> bool,
    {
        self.as_map()
            .iter()
            .rev()
            .find(|&(key, value)| predicate(value, key, self))
            .map(|(key, _)| key)
    }

    /// Returns a new container of the same type holding clones of every entry
    /// for which `predicate` returns `true`, in their original order.
    ///
    /// The new container comes from [`new_empty`](Collection::new_empty).
    /// `self` is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// let big = map.filter(|&v, _, _| v > 1);
    ///
    /// assert_eq!(big, OrderedMap::from([("b", 2), ("c", 3)]));
    /// assert_eq!(map.len(), 3);
    /// ```
    #[must_use]
    fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Self::Value, &Self::Key, &Self) -> bool,
        Self::Key: Clone,
        Self::Value: Clone,
    {
        let mut results = self.new_empty();
        let source = self.as_map();
        let target = results.as_map_mut();
        for (key, value) in source {
            if predicate(value, key, self) {
                target.insert(key.clone(), value.clone());
            }
        }
        log::trace!("filter kept {} of {} entries", target.len(), source.len());
        results
    }

    /// Like [`find`](Collection::find), with `context` passed as the first
    /// argument of every predicate call.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// struct Limits {
    ///     min: i32,
    /// }
    ///
    /// let limits = Limits { min: 2 };
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// assert_eq!(map.find_with(&limits, |l, v, _, _| *v >= l.min), Some(&2));
    /// ```
    fn find_with<T, F>(&self, context: &T, mut predicate: F) -> Option<&Self::Value>
    where
        T: ?Sized,
        F: FnMut(&T, &Self::Value, &Self::Key, &Self) -> bool,
    {
        self.find(|value, key, collection| predicate(context, value, key, collection))
    }

    /// Like [`find_last`](Collection::find_last), with `context` passed as the
    /// first argument of every predicate call.
    fn find_last_with<T, F>(&self, context: &T, mut predicate: F) -> Option<&Self::Value>
    where
        T: ?Sized,
        F: FnMut(&T, &Self::Value, &Self::Key, &Self) -> bool,
    {
        self.find_last(|value, key, collection| predicate(context, value, key, collection))
    }

    /// Like [`find_key`](Collection::find_key), with `context` passed as the
    /// first argument of every predicate call.
    fn find_key_with<T, F>(&self, context: &T, mut predicate: F) -> Option<&Self::Key>
    where
        T: ?Sized,
        F: FnMut(&T, &Self::Value, &Self::Key, &Self) -> bool,
    {
        self.find_key(|value, key, collection| predicate(context, value, key, collection))
    }

    /// Like [`find_last_key`](Collection::find_last_key), with `context`
    /// passed as the first argument of every predicate call.
    fn find_last_key_with<T, F>(&self, context: &T, mut predicate: F) -> Option<&Self::Key>
    where
        T: ?Sized,
        F: FnMut(&T, &Self::Value, &Self::Key, &Self) -> bool,
    {
        self.find_last_key(|value, key, collection| predicate(context, value, key, collection))
    }

    /// Like [`filter`](Collection::filter), with `context` passed as the first
    /// argument of every predicate call.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, OrderedMap};
    ///
    /// let banned = ["b"];
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// let allowed = map.filter_with(&banned[..], |banned, _, k, _| !banned.contains(k));
    /// assert_eq!(allowed.keys().copied().collect::<Vec<_>>(), ["a", "c"]);
    /// ```
    #[must_use]
    fn filter_with<T, F>(&self, context: &T, mut predicate: F) -> Self
    where
        T: ?Sized,
        F: FnMut(&T, &Self::Value, &Self::Key, &Self) -> bool,
        Self::Key: Clone,
        Self::Value: Clone,
    {
        self.filter(|value, key, collection| predicate(context, value, key, collection))
    }
}

impl<K: Hash + Eq, V> Collection for OrderedMap<K, V> {
    type Key = K;
    type Value = V;

    fn as_map(&self) -> &OrderedMap<K, V> {
        self
    }

    fn as_map_mut(&mut self) -> &mut OrderedMap<K, V> {
        self
    }

    fn new_empty(&self) -> Self {
        OrderedMap::new()
    }
}
