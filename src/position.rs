/// A signed position into the iteration order of an [`OrderedMap`].
///
/// Non-negative positions count from the front (`0` is the first entry),
/// negative positions count from the back (`-1` is the last entry), the same
/// way sequence indexing works in most scripting languages.
///
/// # Examples
///
/// ```
/// use ordered_collection::{OrderedMap, Position};
///
/// let map = OrderedMap::from([("a", 10), ("b", 20), ("c", 30)]);
///
/// assert_eq!(map[Position(0)], 10);
/// assert_eq!(map[Position(-1)], 30);
/// ```
///
/// [`OrderedMap`]: crate::OrderedMap
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position(pub isize);

impl Position {
    /// The first entry.
    pub const FIRST: Self = Self(0);
    /// The last entry.
    pub const LAST: Self = Self(-1);

    /// Resolves this position against a collection of `len` entries.
    ///
    /// Returns the zero-based offset from the front, or `None` when the
    /// position falls outside `[-len, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Position;
    ///
    /// assert_eq!(Position(1).resolve(3), Some(1));
    /// assert_eq!(Position(-1).resolve(3), Some(2));
    /// assert_eq!(Position(-3).resolve(3), Some(0));
    /// assert_eq!(Position(-4).resolve(3), None);
    /// assert_eq!(Position(3).resolve(3), None);
    /// assert_eq!(Position(0).resolve(0), None);
    /// ```
    #[must_use]
    pub const fn resolve(self, len: usize) -> Option<usize> {
        if self.0 >= 0 {
            #[allow(clippy::cast_sign_loss)]
            let offset = self.0 as usize;
            if offset < len { Some(offset) } else { None }
        } else {
            let back = self.0.unsigned_abs();
            if back <= len { Some(len - back) } else { None }
        }
    }
}

/// Conversion into a [`Position`].
///
/// Implemented for every primitive integer and for `f32`/`f64`. Values that
/// do not fit in an `isize` saturate, which always resolves out of range.
/// Floats are truncated toward zero; `NaN` becomes position `0`.
pub trait IntoPosition {
    /// Performs the conversion.
    fn into_position(self) -> Position;
}

impl IntoPosition for Position {
    #[inline]
    fn into_position(self) -> Position {
        self
    }
}

macro_rules! lossless_position {
    ($($t:ty),*) => {$(
        impl IntoPosition for $t {
            #[inline]
            fn into_position(self) -> Position {
                Position(isize::from(self))
            }
        }
    )*};
}

macro_rules! saturating_position {
    (signed: $($s:ty),*; unsigned: $($u:ty),*) => {
        $(
            impl IntoPosition for $s {
                #[inline]
                fn into_position(self) -> Position {
                    Position(isize::try_from(self).unwrap_or(if self < 0 { isize::MIN } else { isize::MAX }))
                }
            }
        )*
        $(
            impl IntoPosition for $u {
                #[inline]
                fn into_position(self) -> Position {
                    Position(isize::try_from(self).unwrap_or(isize::MAX))
                }
            }
        )*
    };
}

macro_rules! truncating_position {
    ($($t:ty),*) => {$(
        impl IntoPosition for $t {
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn into_position(self) -> Position {
                // `as` truncates toward zero, saturates, and maps NaN to 0.
                Position(self as isize)
            }
        }
    )*};
}

lossless_position!(i8, i16, u8);
saturating_position!(signed: isize, i32, i64, i128; unsigned: usize, u16, u32, u64, u128);
truncating_position!(f32, f64);
