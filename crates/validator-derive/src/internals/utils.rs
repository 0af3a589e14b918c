use proc_macro2::Span;
use std::fmt::Display;
use syn::meta::ParseNestedMeta;

use super::Context;

pub fn make_lit_str(value: impl Display) -> syn::LitStr {
  syn::LitStr::new(&value.to_string(), Span::call_site())
}

/// Parses `name = <integer>`, keeping the literal as written so the
/// generated code lets the compiler pick its type.
pub fn get_lit_int(
  ctx: &Context,
  attr_name: &'static str,
  meta_item_name: &'static str,
  meta: &ParseNestedMeta<'_>,
) -> syn::Result<Option<syn::LitInt>> {
  let value = meta.value()?.parse::<syn::LitInt>()?;
  if value.base10_parse::<i128>().is_err() {
    ctx.spanned_error(
      &value,
      format!("expected validator {attr_name} attribute to be a valid integer: `{meta_item_name} = ...`"),
    );
    return Ok(None);
  }
  Ok(Some(value))
}

pub fn parse_lit_into_path(
  ctx: &Context,
  attr_name: &'static str,
  meta: &ParseNestedMeta<'_>,
) -> syn::Result<Option<syn::ExprPath>> {
  let Some(string) = get_lit_str(ctx, attr_name, meta)? else {
    return Ok(None);
  };

  Ok(if let Ok(path) = string.parse() {
    Some(path)
  } else {
    ctx.spanned_error(&string, format!("failed to parse path: {:?}", string.value()));
    None
  })
}

pub fn get_lit_str(
  ctx: &Context,
  attr_name: &'static str,
  meta: &ParseNestedMeta<'_>,
) -> syn::Result<Option<syn::LitStr>> {
  let expr: syn::Expr = meta.value()?.parse()?;
  let mut value = &expr;
  while let syn::Expr::Group(e) = value {
    value = &e.expr;
  }

  if let syn::Expr::Lit(syn::ExprLit {
    lit: syn::Lit::Str(lit),
    ..
  }) = value
  {
    if !lit.suffix().is_empty() {
      ctx.spanned_error(lit, format!("unexpected suffix `{}` on string literal", lit.suffix()));
    }
    Ok(Some(lit.clone()))
  } else {
    ctx.spanned_error(
      &expr,
      format!("expected validator {attr_name} attribute to be a string: `{attr_name} = \"...\"`"),
    );
    Ok(None)
  }
}
