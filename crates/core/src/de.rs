//! Deserialization helpers shared by the resource models.

use serde::{Deserialize, Deserializer};

/// Decode an explicit JSON `null` as the type's default value.
///
/// The service sends `null` for unset lists and objects on fields that are
/// otherwise always present.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
