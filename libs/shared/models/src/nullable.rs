//! Serde support for patch fields that distinguish "leave alone" from "clear".
//!
//! Use on an `Option<Option<T>>` together with `#[serde(default)]`: a missing key
//! stays `None`, an explicit `null` becomes `Some(None)`.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
