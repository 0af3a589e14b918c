use serde::{Deserialize, Deserializer};

pub mod figment;
pub mod sensitive;
pub mod validator;

pub use sensitive::Sensitive;

/// Deserializes a field that tells apart "missing" (`None`, needs
/// `#[serde(default)]` on the field) from "explicitly null" (`Some(None)`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}
