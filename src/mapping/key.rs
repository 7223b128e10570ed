use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};

/// A key that is either an integer identifier or a name.
///
/// Text made only of ASCII digits is treated as an integer, so a mapping
/// declared with keys `"1"` and `"2"` hands back `MapKey::Int(1)` and
/// `MapKey::Int(2)` from reverse lookups. Only the canonical spelling of an
/// integer converts: `"01"` stays a distinct `MapKey::Str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Int(u64),
    Str(String),
}

impl MapKey {
    /// Builds a key from text, recovering integer identifiers.
    pub fn parse(s: &str) -> Self {
        match canonical_int(s) {
            Some(i) => MapKey::Int(i),
            None => MapKey::Str(s.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            MapKey::Int(i) => Some(*i),
            MapKey::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MapKey::Int(_) => None,
            MapKey::Str(s) => Some(s),
        }
    }
}

/// Returns true if `s` is a non-empty run of ASCII digits.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses `s` only if it is the exact decimal spelling of a `u64`.
///
/// Leading zeros and digit strings that overflow are rejected, so distinct
/// texts never collapse into one key.
fn canonical_int(s: &str) -> Option<u64> {
    if !is_numeric(s) {
        return None;
    }
    s.parse::<u64>().ok().filter(|i| i.to_string() == s)
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Int(i) => write!(f, "{i}"),
            MapKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::parse(s)
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(i) => MapKey::Int(i),
            None => MapKey::Str(s),
        }
    }
}

impl From<u64> for MapKey {
    fn from(i: u64) -> Self {
        MapKey::Int(i)
    }
}

impl From<u32> for MapKey {
    fn from(i: u32) -> Self {
        MapKey::Int(u64::from(i))
    }
}

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

struct MapKeyVisitor;

impl Visitor<'_> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MapKey, E> {
        Ok(MapKey::parse(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MapKey, E> {
        Ok(MapKey::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MapKey, E> {
        Ok(MapKey::Int(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MapKey, E> {
        // Negative numbers never look numeric as keys.
        match u64::try_from(v) {
            Ok(i) => Ok(MapKey::Int(i)),
            Err(_) => Ok(MapKey::Str(v.to_string())),
        }
    }
}

/// A finite key type that can list every one of its values.
///
/// Strict lookups take a total function over such a key; an exhaustive
/// `match` in that function is what guarantees full coverage.
pub trait Exhaustive: Sized + 'static {
    const ALL: &'static [Self];
}
