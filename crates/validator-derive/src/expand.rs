use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::internals::{
  input::{attr, check, Field, Input},
  utils, Context, ExpandResult,
};

pub fn derive_validate(input: &DeriveInput) -> ExpandResult {
  let ctx = Context::new();
  let Some(input) = Input::from_derive(&ctx, input) else {
    ctx.check()?;
    return Ok(TokenStream::new());
  };
  check::input(&ctx, &input);
  ctx.check()?;

  let body = generate_body(&input);
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
  let name = input.ident;

  Ok(quote! {
    impl #impl_generics ::validator::Validate for #name #ty_generics #where_clause {
      fn validate(&self) -> ::std::result::Result<(), ::validator::ValidateError> {
        #body
      }
    }
  })
}

fn generate_body(input: &Input<'_>) -> TokenStream {
  let checkers = input
    .fields
    .iter()
    .filter(|field| field.attrs.has_checks())
    .map(generate_field_checker)
    .collect::<TokenStream>();

  if checkers.is_empty() {
    return quote!(::std::result::Result::Ok(()));
  }

  quote! {
    let mut err = ::validator::ValidateError::field_builder();
    #checkers
    err.build().into_result()
  }
}

fn option_of(value: Option<&syn::LitInt>) -> TokenStream {
  match value {
    Some(value) => quote!(::std::option::Option::Some(#value)),
    None => quote!(::std::option::Option::None),
  }
}

/// Builds the list of `(condition, message)` pairs of a field. The
/// first failing condition is the only one reported.
fn field_conditions(field: &Field<'_>) -> Vec<(TokenStream, syn::LitStr)> {
  let attrs = &field.attrs;
  let custom = attrs.custom_error_msg();
  let mut conditions = Vec::new();

  if let Some(attr::Length { min, max, equal }) = attrs.length() {
    let (min, max, equal) = (
      option_of(min.as_ref()),
      option_of(max.as_ref()),
      option_of(equal.as_ref()),
    );
    let message = custom
      .cloned()
      .unwrap_or_else(|| utils::make_lit_str("Value must be in between the required length"));

    conditions.push((
      quote!(::validator::extras::validate_length(value, #min, #max, #equal)),
      message,
    ));
  }

  if let Some(attr::Ranges { min, max }) = attrs.ranges() {
    let (min, max) = (option_of(min.as_ref()), option_of(max.as_ref()));
    let message = custom
      .cloned()
      .unwrap_or_else(|| utils::make_lit_str("Value is out of the allowed range"));

    conditions.push((
      quote!(::validator::extras::validate_range(value, #min, #max)),
      message,
    ));
  }

  if let Some(with) = attrs.with() {
    let message = custom.cloned().unwrap_or_else(|| {
      utils::make_lit_str(format_args!("Invalid value for `{}` field", field.key()))
    });
    conditions.push((quote!(#with(value)), message));
  }

  conditions
}

fn generate_field_checker(field: &Field<'_>) -> TokenStream {
  let ident = field.ident;
  let key = utils::make_lit_str(field.key());

  let body = if field.attrs.allow_nested() {
    quote! {
      if let ::std::result::Result::Err(nested) = ::validator::Validate::validate(value) {
        err.insert(#key, nested);
      }
    }
  } else {
    let mut chain = TokenStream::new();
    for (idx, (condition, message)) in field_conditions(field).into_iter().enumerate() {
      if idx > 0 {
        chain.extend(quote!(else));
      }
      chain.extend(quote! {
        if !#condition {
          msg.insert(#message);
        }
      });
    }

    quote! {
      let mut msg = ::validator::ValidateError::msg_builder();
      #chain
      err.insert(#key, msg.build());
    }
  };

  if field.attrs.allow_optional() {
    quote! {
      if let ::std::option::Option::Some(value) = self.#ident.as_ref() {
        #body
      }
    }
  } else {
    quote! {{
      let value = &self.#ident;
      #body
    }}
  }
}
