use quote::ToTokens;
use std::{cell::RefCell, fmt::Display};

/// Collects every problem found in the derive input so they can
/// be reported together instead of one compile run at a time.
#[derive(Default)]
pub struct Context {
  errors: RefCell<Vec<syn::Error>>,
}

impl Context {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn spanned_error<A: ToTokens, T: Display>(&self, obj: A, msg: T) {
    self.errors.borrow_mut().push(syn::Error::new_spanned(obj, msg));
  }

  pub fn error(&self, err: syn::Error) {
    self.errors.borrow_mut().push(err);
  }

  /// Combines every collected error into one, if any.
  pub fn check(self) -> syn::Result<()> {
    let mut errors = self.errors.into_inner().into_iter();
    let Some(mut combined) = errors.next() else {
      return Ok(());
    };

    for rest in errors {
      combined.combine(rest);
    }
    Err(combined)
  }
}
