use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize};
use std::borrow::Cow;

const MESSAGES_KEY: &str = "_errors";

/// Collects human readable messages about a single value.
pub struct MessageBuilder(Vec<Cow<'static, str>>);

impl MessageBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) {
    self.0.push(message.into());
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Messages(self.0)
  }
}

/// Collects errors of each element of a sequence, keeping
/// their positions so clients know which element failed.
pub struct SliceBuilder(Vec<Option<ValidateError>>);

impl SliceBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert_empty(&mut self) {
    self.0.push(None);
  }

  pub fn insert(&mut self, value: ValidateError) {
    self.0.push(if value.is_empty() { None } else { Some(value) });
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Slice(self.0)
  }
}

/// Collects errors keyed by field name. Empty errors are dropped.
pub struct FieldBuilder(IndexMap<Cow<'static, str>, ValidateError>);

#[allow(clippy::new_without_default)]
impl FieldBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self(IndexMap::default())
  }

  pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: ValidateError) {
    if !value.is_empty() {
      self.0.insert(key.into(), value);
    }
  }

  /// Shorthand for inserting a field with exactly one message.
  pub fn insert_message(
    &mut self,
    key: impl Into<Cow<'static, str>>,
    message: impl Into<Cow<'static, str>>,
  ) {
    let mut msg = MessageBuilder::new();
    msg.insert(message);
    self.insert(key, msg.build());
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Fields(self.0)
  }
}

#[derive(PartialEq, Eq)]
pub enum ValidateError {
  Fields(IndexMap<Cow<'static, str>, ValidateError>),
  Messages(Vec<Cow<'static, str>>),
  Slice(Vec<Option<ValidateError>>),
}

impl ValidateError {
  #[must_use]
  pub fn field_builder() -> FieldBuilder {
    FieldBuilder::new()
  }

  #[must_use]
  pub fn msg_builder() -> MessageBuilder {
    MessageBuilder::new()
  }

  #[must_use]
  pub fn slice_builder() -> SliceBuilder {
    SliceBuilder::new()
  }

  /// Creates an error pointing at one field with one message.
  #[must_use]
  pub fn field(
    key: impl Into<Cow<'static, str>>,
    message: impl Into<Cow<'static, str>>,
  ) -> Self {
    let mut fields = FieldBuilder::new();
    fields.insert_message(key, message);
    fields.build()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    match self {
      ValidateError::Fields(n) => n.is_empty(),
      ValidateError::Messages(n) => n.is_empty(),
      ValidateError::Slice(n) => n.iter().all(Option::is_none),
    }
  }

  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}

impl std::fmt::Display for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("Invalid data occurred")
  }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidateError::Fields(n) => n.fmt(f),
      ValidateError::Messages(n) => f.debug_map().entry(&MESSAGES_KEY, &n).finish(),
      ValidateError::Slice(n) => n.fmt(f),
    }
  }
}

impl Serialize for ValidateError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    match self {
      ValidateError::Fields(fields) => {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in fields {
          map.serialize_entry(key, value)?;
        }
        map.end()
      },
      ValidateError::Messages(n) => {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(MESSAGES_KEY, &n)?;
        map.end()
      },
      ValidateError::Slice(n) => n.serialize(serializer),
    }
  }
}

impl<'de> serde::Deserialize<'de> for ValidateError {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    struct Visitor;

    impl<'de> serde::de::Visitor<'de> for Visitor {
      type Value = ValidateError;

      fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValidateError type")
      }

      fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
      where
        A: serde::de::MapAccess<'de>,
      {
        let mut fields = IndexMap::new();
        let mut messages = None;

        while let Some(key) = map.next_key::<String>()? {
          if key == MESSAGES_KEY {
            if messages.is_some() {
              return Err(serde::de::Error::duplicate_field(MESSAGES_KEY));
            }
            messages = Some(map.next_value::<Vec<Cow<'static, str>>>()?);
          } else {
            fields.insert(Cow::Owned(key), map.next_value()?);
          }
        }

        match messages {
          Some(data) => Ok(ValidateError::Messages(data)),
          None if !fields.is_empty() => Ok(ValidateError::Fields(fields)),
          None => Err(serde::de::Error::custom("error fields must not be empty")),
        }
      }

      fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
      where
        A: serde::de::SeqAccess<'de>,
      {
        let mut list = Vec::new();
        while let Some(element) = seq.next_element()? {
          list.push(element);
        }
        Ok(ValidateError::Slice(list))
      }
    }

    deserializer.deserialize_any(Visitor)
  }
}
