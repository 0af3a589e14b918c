use crate::{HasLength, Validate, ValidateError};
use std::borrow::Cow;

impl HasLength for str {
  fn length(&self) -> usize {
    self.chars().count()
  }
}

impl HasLength for String {
  fn length(&self) -> usize {
    self.as_str().length()
  }
}

impl<'a> HasLength for &'a str {
  fn length(&self) -> usize {
    (**self).length()
  }
}

impl<'a> HasLength for Cow<'a, str> {
  fn length(&self) -> usize {
    self.as_ref().length()
  }
}

impl<T> HasLength for [T] {
  fn length(&self) -> usize {
    self.len()
  }
}

impl<T> HasLength for Vec<T> {
  fn length(&self) -> usize {
    self.len()
  }
}

// ------------------------------------------------ //

impl<T: Validate> Validate for Option<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    match self {
      Some(inner) => inner.validate(),
      None => Ok(()),
    }
  }
}

impl<T: Validate> Validate for [T] {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut slice = ValidateError::slice_builder();
    for element in self {
      match element.validate() {
        Ok(()) => slice.insert_empty(),
        Err(err) => slice.insert(err),
      }
    }
    slice.build().into_result()
  }
}

impl<T: Validate> Validate for Vec<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    self.as_slice().validate()
  }
}

impl<T: Validate + ?Sized> Validate for &T {
  fn validate(&self) -> Result<(), ValidateError> {
    (**self).validate()
  }
}
