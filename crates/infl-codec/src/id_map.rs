//! Serde adapter for maps keyed by numeric type ids.
//!
//! TOML and JSON only allow string keys, so `{ "7" = 50 }` is read into a
//! `BTreeMap<u64, V>`. Ordered maps keep encodings in ascending id order.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S, V>(map: &BTreeMap<u64, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let keyed: BTreeMap<String, &V> = map.iter().map(|(k, v)| (k.to_string(), v)).collect();
    keyed.serialize(serializer)
}

pub fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<u64, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| {
            k.trim()
                .parse::<u64>()
                .map(|id| (id, v))
                .map_err(|_| D::Error::custom(format!("map key '{k}' is not a type id")))
        })
        .collect()
}
