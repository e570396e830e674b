use super::error::ModelError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest id a local key space can hand out
pub const MAX_LOCAL_ID: u16 = i16::MAX as u16;

/// Draws made before allocation gives up
///
/// Random allocation degrades once a key space nears its 32767 entries; the
/// bound turns that into an error instead of an endless loop.
pub const MAX_ID_ATTEMPTS: u32 = 64;

/// A small positive id, unique within one aggregate's key space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalId(u16);

impl LocalId {
    pub fn new(value: u16) -> Option<Self> {
        (1..=MAX_LOCAL_ID).contains(&value).then_some(LocalId(value))
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(LocalId::new)
            .ok_or_else(|| format!("Invalid id '{}'. Ids are integers in 1..={}", s, MAX_LOCAL_ID))
    }
}

/// Draw a random id for which `is_taken` is false
///
/// Freed ids are eligible again, so a deleted entry's id may be reused.
pub fn allocate_local_id<R, F>(rng: &mut R, is_taken: F) -> Result<LocalId, ModelError>
where
    R: Rng + ?Sized,
    F: Fn(LocalId) -> bool,
{
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = LocalId(rng.gen_range(1..=MAX_LOCAL_ID));
        if !is_taken(candidate) {
            return Ok(candidate);
        }
    }
    log::warn!(
        "local id allocation gave up after {} attempts",
        MAX_ID_ATTEMPTS
    );
    Err(ModelError::IdSpaceExhausted {
        attempts: MAX_ID_ATTEMPTS,
    })
}

/// Serde helpers for maps keyed by `LocalId`
///
/// Keys are written as decimal strings so that formats with string-only table
/// keys (TOML) can hold them.
pub mod keyed_map {
    use super::LocalId;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S, V>(map: &BTreeMap<LocalId, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(map.iter().map(|(id, value)| (id.to_string(), value)))
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<LocalId, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                key.parse::<LocalId>()
                    .map(|id| (id, value))
                    .map_err(D::Error::custom)
            })
            .collect()
    }
}
