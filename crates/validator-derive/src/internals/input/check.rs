use std::cmp::Ordering;

use super::{attr, Field, Input};
use crate::internals::Context;

pub fn input(ctx: &Context, input: &Input<'_>) {
  for field in &input.fields {
    check_conflicting_attrs(ctx, &field.attrs, field.original);
  }
}

fn check_range_like_params(
  ctx: &Context,
  original: &syn::Field,
  min: Option<&syn::LitInt>,
  max: Option<&syn::LitInt>,
) {
  let parse = |lit: Option<&syn::LitInt>| lit.and_then(|lit| lit.base10_parse::<i128>().ok());
  let (Some(min), Some(max)) = (parse(min), parse(max)) else {
    return;
  };

  match min.cmp(&max) {
    Ordering::Equal => ctx.spanned_error(
      original,
      "the minimum value is equal to the maximum value, do you mean to use `equal = ...`?",
    ),
    Ordering::Greater => ctx.spanned_error(
      original,
      format_args!("the minimum value ({min}) is greater than its maximum value ({max})"),
    ),
    Ordering::Less => {},
  }
}

fn check_conflicting_attrs(ctx: &Context, attrs: &attr::Field, original: &syn::Field) {
  let has_length_attr = attrs.length().is_some();
  let has_ranges_attr = attrs.ranges().is_some();

  // Nested values report their own errors
  if attrs.allow_nested() && (has_length_attr || has_ranges_attr || attrs.with().is_some()) {
    return ctx.spanned_error(
      original,
      "#[validate(nested)] cannot be combined with other checks",
    );
  }

  if has_length_attr && has_ranges_attr {
    return ctx.spanned_error(
      original,
      "#[validate(length(...))] and #[validate(ranges(...))] cannot be used at the same time",
    );
  }

  if attrs.custom_error_msg().is_some() && !attrs.has_checks() {
    return ctx.spanned_error(original, "#[validate(error = \"...\")] requires a check to report");
  }

  if let Some(params) = attrs.ranges() {
    check_range_like_params(ctx, original, params.min.as_ref(), params.max.as_ref());
  }

  if let Some(params) = attrs.length() {
    if params.equal.is_some() {
      if params.min.is_some() || params.max.is_some() {
        ctx.spanned_error(
          original,
          format_args!(
            "length attribute has conflicting requirements, either set `{}` and/or `{}`, or `{}`",
            attr::PATH_MIN,
            attr::PATH_MAX,
            attr::PATH_EQUAL
          ),
        );
      }
    } else {
      check_range_like_params(ctx, original, params.min.as_ref(), params.max.as_ref());
    }
  }
}
