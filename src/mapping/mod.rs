//! Ordered key/value mappings that lookup functions are built from.

mod key;

pub use key::{is_numeric, Exhaustive, MapKey};

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::Error;

/// A partial association from keys to values that remembers insertion order.
///
/// Order matters for reverse lookups: when several keys share a value, the
/// key inserted first is the one found. Re-inserting an existing key replaces
/// its value but keeps its original position.
///
/// ## Example
///
/// ```
/// use mapping_fn::Mapping;
///
/// let mapping = Mapping::new()
///     .with("foo", "FOO")
///     .with("bar", "BAR");
///
/// assert_eq!(mapping.get("foo"), Some(&"FOO"));
/// assert_eq!(mapping.keys().collect::<Vec<_>>(), [&"foo", &"bar"]);
/// ```
#[derive(Debug, Clone)]
pub struct Mapping<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for Mapping<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Mapping<K, V> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Builds a mapping that covers every value of an [`Exhaustive`] key type.
    ///
    /// Entries follow the order of [`Exhaustive::ALL`].
    pub fn total(mut f: impl FnMut(&K) -> V) -> Self
    where
        K: Exhaustive,
    {
        K::ALL.iter().map(|key| (key.clone(), f(key))).collect()
    }

    /// Inserts an entry, returning the value it replaced.
    ///
    /// A replaced entry keeps its position in iteration order.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Builds the value-to-key mapping.
    ///
    /// When several keys share a value, the first one in iteration order wins.
    pub fn invert(&self) -> Mapping<V, K>
    where
        V: Eq + Hash + Clone,
    {
        let mut inverted = Mapping::with_capacity(self.len());
        for (key, value) in &self.entries {
            if inverted.contains_key(value) {
                tracing::trace!("skipping duplicate value while inverting mapping");
                continue;
            }
            inverted.insert(value.clone(), key.clone());
        }
        inverted
    }
}

impl<K, V> Mapping<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K, V> Mapping<K, V>
where
    K: DeserializeOwned + Eq + Hash + Clone,
    V: DeserializeOwned,
{
    /// Parses a TOML document whose top-level table is the mapping.
    ///
    /// Entries keep the order they appear in the document.
    ///
    /// ```
    /// use mapping_fn::{MapKey, Mapping};
    ///
    /// let mapping: Mapping<MapKey, String> = Mapping::from_toml_str(r#"
    ///     1 = "active"
    ///     2 = "archived"
    /// "#)?;
    ///
    /// let archived = mapping.get(&MapKey::Int(2)).map(String::as_str);
    /// assert_eq!(archived, Some("archived"));
    /// # Ok::<(), mapping_fn::Error>(())
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Mapping<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for Mapping<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        mapping.extend(iter);
        mapping
    }
}

impl<K: Eq + Hash + Clone, V> Extend<(K, V)> for Mapping<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for Mapping<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Mapping<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::iter::Map<std::slice::Iter<'a, (K, V)>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        let split: fn(&'a (K, V)) -> (&'a K, &'a V) = |(k, v)| (k, v);
        self.entries.iter().map(split)
    }
}

impl<'de, K, V> Deserialize<'de> for Mapping<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor(PhantomData))
    }
}

struct MappingVisitor<K, V>(PhantomData<fn() -> Mapping<K, V>>);

impl<'de, K, V> Visitor<'de> for MappingVisitor<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de>,
{
    type Value = Mapping<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of keys to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut mapping = Mapping::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(mapping)
    }
}
