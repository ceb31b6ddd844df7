use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    hash::Hash,
};

use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    selector::{KeySelector, Resolved},
};

/// One value, or several of them in order.
///
/// This is what [`UDict::get`] returns, and what [`UDict::set`] takes: a
/// selector that designates exactly one key reads as [`Selection::One`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Selection<T> {
    fn from_vec(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Selection::One(value);
            }
        }

        Selection::Many(values)
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::One(_) => 1,
            Selection::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single value, if this is a [`Selection::One`].
    pub fn one(self) -> Option<T> {
        match self {
            Selection::One(value) => Some(value),
            Selection::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Selection::One(value) => vec![value],
            Selection::Many(values) => values,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Selection<U> {
        match self {
            Selection::One(value) => Selection::One(f(value)),
            Selection::Many(values) => Selection::Many(values.into_iter().map(f).collect()),
        }
    }

    /// Lines the values up with `count` keys. A single value is repeated for
    /// every key.
    fn broadcast(self, count: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        match self {
            Selection::One(value) => Ok(vec![value; count]),
            Selection::Many(values) if values.len() == count => Ok(values),
            Selection::Many(values) => Err(Error::LengthMismatch {
                keys: count,
                values: values.len(),
            }),
        }
    }
}

impl<T: Clone> Selection<&T> {
    pub fn cloned(self) -> Selection<T> {
        self.map(T::clone)
    }
}

/// An insertion-ordered dictionary with positional access and a default value.
///
/// Besides plain key lookups, entries can be addressed by their 1-based
/// position in insertion order, or by inclusive ranges of positions (see
/// [`KeySelector`]). Reads that miss fall back to the default value, if one
/// is set.
///
/// Equality only looks at the entries: neither their order nor the default
/// value are taken into account.
#[derive(Clone)]
pub struct UDict<K, V> {
    entries: IndexMap<K, V>,
    default: Option<V>,
}

impl<K, V> UDict<K, V> {
    /// An empty dictionary without default value.
    pub fn new() -> Self {
        UDict {
            entries: IndexMap::new(),
            default: None,
        }
    }

    /// Wraps an existing mapping, keeping its order.
    pub fn from_map(entries: IndexMap<K, V>) -> Self {
        UDict {
            entries,
            default: None,
        }
    }

    pub fn with_default(mut self, default: V) -> Self {
        self.default = Some(default);
        self
    }

    pub fn builder() -> UDictBuilder<K, V> {
        UDictBuilder::default()
    }

    pub fn entries(&self) -> &IndexMap<K, V> {
        &self.entries
    }

    pub fn into_entries(self) -> IndexMap<K, V> {
        self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut IndexMap<K, V> {
        &mut self.entries
    }

    /// Replaces every entry at once. The default value is left as it was.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ufpy_udict::UDict;
    /// let mut dict = UDict::from_pairs([("a", 1)]).with_default(0);
    /// dict.set_entries(UDict::from_pairs([("b", 2)]));
    /// assert_eq!(dict.get_or_default(&"b"), Some(&2));
    /// assert_eq!(dict.get_or_default(&"a"), Some(&0));
    /// ```
    pub fn set_entries(&mut self, entries: impl Into<IndexMap<K, V>>) {
        self.entries = entries.into();
        log::trace!("replaced entries, now holding {} keys", self.entries.len());
    }

    pub fn default_value(&self) -> Option<&V> {
        self.default.as_ref()
    }

    pub fn set_default_value(&mut self, default: Option<V>) {
        self.default = default;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.entries.values()
    }

    /// Reverses the insertion order in place.
    pub fn reverse(&mut self) {
        self.entries.reverse();
    }

    /// Returns a copy of this dictionary with the insertion order reversed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ufpy_udict::UDict;
    /// let dict = UDict::from_pairs([("x", 1), ("y", 2), ("z", 3)]);
    /// let keys: Vec<_> = dict.reversed().keys().copied().collect();
    /// assert_eq!(keys, ["z", "y", "x"]);
    /// ```
    pub fn reversed(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let mut result = self.clone();
        result.reverse();
        result
    }

    /// `len(self) - len(other)`.
    ///
    /// This only compares sizes, it says nothing about the entries themselves.
    pub fn size_difference(&self, other: &Self) -> isize {
        self.len() as isize - other.len() as isize
    }

    pub fn cmp_size(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len())
    }
}

impl<K: Hash + Eq, V> UDict<K, V> {
    /// Builds a dictionary out of key/value pairs. A repeated key keeps the
    /// position of its first occurrence and the value of its last one.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        UDict::from_map(pairs.into_iter().collect())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// The value of `key`, ignoring the default value.
    pub fn get_key(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// The value of `key`, or the default value if `key` is absent.
    pub fn get_or_default(&self, key: &K) -> Option<&V> {
        self.entries.get(key).or(self.default.as_ref())
    }

    /// Sets the value of `key`. A new key goes last.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.shift_remove(key)
    }

    /// The keys designated by `selector`, in the order they are addressed.
    ///
    /// A [`KeySelector::Key`] resolves to its key even if the dictionary
    /// doesn't contain it.
    pub fn resolve_keys<'a>(&'a self, selector: &'a KeySelector<K>) -> Result<Vec<&'a K>> {
        match selector.resolve(self.len())? {
            Resolved::Key(key) => Ok(vec![key]),
            Resolved::Indices(indices) => indices
                .into_iter()
                .map(|idx| self.entry_at(idx).map(|(key, _)| key))
                .collect(),
        }
    }

    /// Reads the values designated by `selector`.
    ///
    /// Absent keys read as the default value, or fail with
    /// [`Error::MissingKey`] if there is none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ufpy_udict::{KeySelector, Selection, UDict};
    /// let dict = UDict::from_pairs([("x", 1), ("y", 2), ("z", 3)]);
    /// assert_eq!(dict.get(&KeySelector::Position(2)), Ok(Selection::One(&2)));
    /// assert_eq!(dict.get(&(2..=3).into()), Ok(Selection::Many(vec![&2, &3])));
    /// assert!(dict.get(&KeySelector::Key("w")).is_err());
    /// ```
    pub fn get(&self, selector: &KeySelector<K>) -> Result<Selection<&V>>
    where
        K: Debug,
    {
        match selector.resolve(self.len())? {
            Resolved::Key(key) => self
                .get_or_default(key)
                .map(Selection::One)
                .ok_or_else(|| Error::missing_key(key)),
            Resolved::Indices(indices) => indices
                .into_iter()
                .map(|idx| self.entry_at(idx).map(|(_, value)| value))
                .collect::<Result<Vec<_>>>()
                .map(Selection::from_vec),
        }
    }

    /// Writes `values` to the entries designated by `selector`.
    ///
    /// A [`Selection::One`] is written to every designated entry, a
    /// [`Selection::Many`] must have one value per entry. Nothing is written
    /// if the selector or the values are invalid.
    pub fn set(&mut self, selector: KeySelector<K>, values: Selection<V>) -> Result<()>
    where
        V: Clone,
    {
        match selector.into_resolved(self.len())? {
            Resolved::Key(key) => {
                if let Some(value) = values.broadcast(1)?.pop() {
                    self.entries.insert(key, value);
                }
            }
            Resolved::Indices(indices) => {
                let values = values.broadcast(indices.len())?;
                log::trace!("writing {} values by position", values.len());

                for (idx, value) in indices.into_iter().zip(values) {
                    if let Some((_, slot)) = self.entries.get_index_mut(idx) {
                        *slot = value;
                    }
                }
            }
        }

        Ok(())
    }

    /// `idx` comes from a [`Resolved::Indices`], which is always in bounds, so
    /// the error is never returned in practice.
    fn entry_at(&self, idx: usize) -> Result<(&K, &V)> {
        self.entries
            .get_index(idx)
            .ok_or(Error::PositionOutOfRange {
                position: idx as isize + 1,
                len: self.len(),
            })
    }
}

impl<K, V> Default for UDict<K, V> {
    fn default() -> Self {
        UDict::new()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for UDict<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Hash + Eq, V: Eq> Eq for UDict<K, V> {}

impl<K: Hash + Eq, V: PartialEq> PartialEq<IndexMap<K, V>> for UDict<K, V> {
    fn eq(&self, other: &IndexMap<K, V>) -> bool {
        &self.entries == other
    }
}

impl<K: Debug, V: Debug> Debug for UDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UDict")
            .field("entries", &self.entries)
            .field("default", &self.default)
            .finish()
    }
}

/// `u` followed by the entries, e.g. `u{"x": 1, "y": 2}`.
impl<K: Debug, V: Debug> fmt::Display for UDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{:?}", self.entries)
    }
}

impl<K, V> From<IndexMap<K, V>> for UDict<K, V> {
    fn from(entries: IndexMap<K, V>) -> Self {
        UDict::from_map(entries)
    }
}

impl<K, V> From<UDict<K, V>> for IndexMap<K, V> {
    fn from(dict: UDict<K, V>) -> Self {
        dict.entries
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for UDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        UDict::from_pairs(iter)
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for UDict<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a, K, V> IntoIterator for &'a UDict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> IntoIterator for UDict<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for UDict<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, K, V> serde::Deserialize<'de> for UDict<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = <IndexMap<K, V> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(UDict::from_map(entries))
    }
}

/// Builds a [`UDict`] from either a mapping or key/value pairs, and an
/// optional default value.
#[derive(Debug)]
pub struct UDictBuilder<K, V> {
    map: Option<IndexMap<K, V>>,
    pairs: Option<Vec<(K, V)>>,
    default: Option<V>,
}

impl<K, V> Default for UDictBuilder<K, V> {
    fn default() -> Self {
        UDictBuilder {
            map: None,
            pairs: None,
            default: None,
        }
    }
}

impl<K: Hash + Eq, V> UDictBuilder<K, V> {
    pub fn map(mut self, map: IndexMap<K, V>) -> Self {
        self.map = Some(map);
        self
    }

    pub fn pairs(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        self.pairs = Some(pairs.into_iter().collect());
        self
    }

    pub fn default_value(mut self, default: V) -> Self {
        self.default = Some(default);
        self
    }

    /// Fails with [`Error::ConflictingSources`] if both a mapping and pairs
    /// were given.
    pub fn build(self) -> Result<UDict<K, V>> {
        let entries = match (self.map, self.pairs) {
            (Some(_), Some(_)) => return Err(Error::ConflictingSources),
            (Some(map), None) => map,
            (None, Some(pairs)) => pairs.into_iter().collect(),
            (None, None) => IndexMap::new(),
        };

        Ok(UDict {
            entries,
            default: self.default,
        })
    }
}
