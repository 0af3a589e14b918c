use quote::ToTokens;
use syn::meta::ParseNestedMeta;

use crate::internals::{
  utils::{get_lit_int, get_lit_str, parse_lit_into_path},
  Context,
};

pub const PATH_OPTIONAL: &str = "optional";
pub const PATH_LENGTH: &str = "length";
pub const PATH_NESTED: &str = "nested";
pub const PATH_RANGES: &str = "ranges";
pub const PATH_WITH: &str = "with";
pub const PATH_ERROR: &str = "error";

pub const PATH_MAX: &str = "max";
pub const PATH_MIN: &str = "min";
pub const PATH_EQUAL: &str = "equal";

pub const VALIDATE: &str = "validate";

struct Attribute<'a, T> {
  ctx: &'a Context,
  name: &'static str,
  value: Option<T>,
}

impl<'a, T> Attribute<'a, T> {
  fn new(ctx: &'a Context, name: &'static str) -> Self {
    Self {
      ctx,
      name,
      value: None,
    }
  }

  fn set<A: ToTokens>(&mut self, obj: A, value: T) {
    if self.value.is_some() {
      let msg = format!("duplicated validator attribute `{}`", self.name);
      self.ctx.spanned_error(obj, msg);
    } else {
      self.value = Some(value);
    }
  }

  fn get(self) -> Option<T> {
    self.value
  }
}

// #[validate(ranges([min = ...] [max = ...]))]
#[derive(Default, Clone)]
pub struct Ranges {
  pub min: Option<syn::LitInt>,
  pub max: Option<syn::LitInt>,
}

impl Ranges {
  fn from_parsed_meta(ctx: &Context, meta: &ParseNestedMeta<'_>) -> syn::Result<Self> {
    let mut field = Self::default();
    meta.parse_nested_meta(|meta| {
      if meta.path.is_ident(PATH_MIN) {
        field.min = get_lit_int(ctx, PATH_RANGES, PATH_MIN, &meta)?;
      } else if meta.path.is_ident(PATH_MAX) {
        field.max = get_lit_int(ctx, PATH_RANGES, PATH_MAX, &meta)?;
      } else {
        return Err(meta.error(format_args!(
          "invalid attribute for {PATH_RANGES}, expected `{PATH_RANGES}({PATH_MIN} = ..., {PATH_MAX} = ...)`"
        )));
      }
      Ok(())
    })?;
    Ok(field)
  }
}

// #[validate(length([min = ...] [max = ...] [equal = ...]))]
#[derive(Default, Clone)]
pub struct Length {
  pub min: Option<syn::LitInt>,
  pub max: Option<syn::LitInt>,
  pub equal: Option<syn::LitInt>,
}

impl Length {
  fn from_parsed_meta(ctx: &Context, meta: &ParseNestedMeta<'_>) -> syn::Result<Self> {
    let mut field = Self::default();
    meta.parse_nested_meta(|meta| {
      if meta.path.is_ident(PATH_MIN) {
        field.min = get_lit_int(ctx, PATH_LENGTH, PATH_MIN, &meta)?;
      } else if meta.path.is_ident(PATH_MAX) {
        field.max = get_lit_int(ctx, PATH_LENGTH, PATH_MAX, &meta)?;
      } else if meta.path.is_ident(PATH_EQUAL) {
        field.equal = get_lit_int(ctx, PATH_LENGTH, PATH_EQUAL, &meta)?;
      } else {
        return Err(meta.error(format_args!(
          "invalid attribute for {PATH_LENGTH}, expected `{PATH_LENGTH}({PATH_MIN} = ..., {PATH_MAX} = ...)` or `{PATH_LENGTH}({PATH_EQUAL} = ...)`"
        )));
      }
      Ok(())
    })?;
    Ok(field)
  }
}

/// Everything written in the `#[validate(...)]` attributes of a
/// single field.
pub struct Field {
  // #[validate(error = "Invalid ISBN")]
  custom_error_msg: Option<syn::LitStr>,
  // #[validate(length(min = 1, max = 100))]
  length: Option<Length>,
  // #[validate(ranges(min = 1, max = 100))]
  ranges: Option<Ranges>,
  // #[validate(with = "validation::is_valid_email")]
  checker: Option<syn::ExprPath>,
  // #[validate(nested)]
  nested: Option<()>,
  // Field is an `Option` and is only checked when present
  optional: Option<()>,
}

impl Field {
  pub fn has_checks(&self) -> bool {
    self.allow_nested() || self.length.is_some() || self.ranges.is_some() || self.checker.is_some()
  }

  pub fn allow_optional(&self) -> bool {
    self.optional.is_some()
  }

  pub fn allow_nested(&self) -> bool {
    self.nested.is_some()
  }

  pub fn custom_error_msg(&self) -> Option<&syn::LitStr> {
    self.custom_error_msg.as_ref()
  }

  pub fn length(&self) -> Option<&Length> {
    self.length.as_ref()
  }

  pub fn ranges(&self) -> Option<&Ranges> {
    self.ranges.as_ref()
  }

  pub fn with(&self) -> Option<&syn::ExprPath> {
    self.checker.as_ref()
  }
}

impl Field {
  pub fn from_ast(ctx: &Context, field: &syn::Field) -> Self {
    let mut error_attr = Attribute::<syn::LitStr>::new(ctx, PATH_ERROR);
    let mut length_attr = Attribute::<Length>::new(ctx, PATH_LENGTH);
    let mut nested_attr = Attribute::<()>::new(ctx, PATH_NESTED);
    let mut ranges_attr = Attribute::<Ranges>::new(ctx, PATH_RANGES);
    let mut with_attr = Attribute::<syn::ExprPath>::new(ctx, PATH_WITH);
    let mut optional_attr = Attribute::<()>::new(ctx, PATH_OPTIONAL);

    for attr in &field.attrs {
      if !attr.path().is_ident(VALIDATE) {
        continue;
      }

      let result = attr.parse_nested_meta(|meta| {
        let meta_path = &meta.path;
        if meta_path.is_ident(PATH_WITH) {
          if let Some(path) = parse_lit_into_path(ctx, PATH_WITH, &meta)? {
            with_attr.set(meta_path, path);
          }
        } else if meta_path.is_ident(PATH_LENGTH) {
          length_attr.set(meta_path, Length::from_parsed_meta(ctx, &meta)?);
        } else if meta_path.is_ident(PATH_RANGES) {
          ranges_attr.set(meta_path, Ranges::from_parsed_meta(ctx, &meta)?);
        } else if meta_path.is_ident(PATH_NESTED) {
          nested_attr.set(meta_path, ());
        } else if meta_path.is_ident(PATH_ERROR) {
          if let Some(value) = get_lit_str(ctx, PATH_ERROR, &meta)? {
            error_attr.set(meta_path, value);
          }
        } else if meta_path.is_ident(PATH_OPTIONAL) {
          optional_attr.set(meta_path, ());
        } else {
          let path = meta_path.to_token_stream().to_string().replace(' ', "");
          return Err(meta.error(format_args!("unknown validator field attribute `{path}`")));
        }
        Ok(())
      });

      if let Err(err) = result {
        ctx.error(err);
      }
    }

    Self {
      custom_error_msg: error_attr.get(),
      length: length_attr.get(),
      nested: nested_attr.get(),
      ranges: ranges_attr.get(),
      checker: with_attr.get(),
      optional: optional_attr.get(),
    }
  }
}
