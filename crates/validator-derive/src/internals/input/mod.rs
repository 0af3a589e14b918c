use super::Context;

pub mod attr;
pub mod check;

pub struct Input<'a> {
  pub ident: &'a syn::Ident,
  pub generics: &'a syn::Generics,
  pub fields: Vec<Field<'a>>,
}

impl<'a> Input<'a> {
  /// Only structs with named fields are supported, since every
  /// error is reported under the name of its field.
  pub fn from_derive(ctx: &Context, input: &'a syn::DeriveInput) -> Option<Self> {
    let syn::Data::Struct(data) = &input.data else {
      ctx.spanned_error(input, "validator can only be derived for structs");
      return None;
    };

    let syn::Fields::Named(fields) = &data.fields else {
      ctx.spanned_error(input, "validator can only be derived for structs with named fields");
      return None;
    };

    Some(Self {
      ident: &input.ident,
      generics: &input.generics,
      fields: fields
        .named
        .iter()
        .filter_map(|field| Field::from_ast(ctx, field))
        .collect(),
    })
  }
}

pub struct Field<'a> {
  pub ident: &'a syn::Ident,
  pub attrs: attr::Field,
  pub original: &'a syn::Field,
}

impl<'a> Field<'a> {
  fn from_ast(ctx: &Context, field: &'a syn::Field) -> Option<Self> {
    Some(Field {
      ident: field.ident.as_ref()?,
      attrs: attr::Field::from_ast(ctx, field),
      original: field,
    })
  }

  /// Key of the field in the resulting errors, without the `r#`
  /// prefix of raw identifiers.
  pub fn key(&self) -> String {
    self.ident.to_string().trim_start_matches("r#").to_owned()
  }
}
