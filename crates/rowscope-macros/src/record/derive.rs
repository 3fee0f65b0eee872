//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates a `Record` implementation plus one name constant per exposed
//! field. `Option<T>` fields expose `Value::None` when empty.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result, Type};

use super::attrs::{parse_field_attrs, FieldKind};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => return Err(Error::new(input.span(), "Record can only be derived for structs")),
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        // Unannotated fields are not exposed.
        let Some(kind) = attrs.kind else {
            continue;
        };

        let record_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&record_name));

        field_constants.push(quote! {
            /// Record field name.
            pub const #const_name: &'static str = #record_name;
        });

        let value_expr = if is_option(&field.ty) {
            let inner = value_tokens(kind, quote! { __v });
            quote! {
                match &self.#field_name {
                    ::std::option::Option::Some(__v) => #inner,
                    ::std::option::Option::None => ::rowscope::Value::None,
                }
            }
        } else {
            value_tokens(kind, quote! { &self.#field_name })
        };

        field_matches.push(quote! {
            #record_name => #value_expr,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::rowscope::Record for #struct_name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::rowscope::Value<'_> {
                match name {
                    #(#field_matches)*
                    _ => ::rowscope::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Value construction for a reference expression `r` to the field value.
fn value_tokens(kind: FieldKind, r: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! {
            ::rowscope::Value::str(::std::convert::AsRef::<str>::as_ref(#r))
        },
        FieldKind::Number => quote! {
            ::rowscope::Value::Number(::rowscope::Number::from(*#r))
        },
        FieldKind::Bool => quote! {
            ::rowscope::Value::Bool(*#r)
        },
        FieldKind::Display => quote! {
            ::rowscope::Value::from(::std::string::ToString::to_string(#r))
        },
    }
}

/// Whether `ty` is spelled `Option<_>` (possibly path-qualified).
fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(last) = path.path.segments.last() else {
        return false;
    };
    last.ident == "Option"
        && matches!(
            &last.arguments,
            PathArguments::AngleBracketed(args)
                if matches!(args.args.first(), Some(GenericArgument::Type(_)))
        )
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("login_time"), "LOGIN_TIME");
        assert_eq!(to_screaming_snake_case("totalHours"), "TOTAL_HOURS");
        assert_eq!(to_screaming_snake_case("work-mode"), "WORK_MODE");
    }

    #[test]
    fn test_is_option() {
        assert!(is_option(&syn::parse_str("Option<f64>").unwrap()));
        assert!(is_option(&syn::parse_str("std::option::Option<String>").unwrap()));
        assert!(!is_option(&syn::parse_str("f64").unwrap()));
        assert!(!is_option(&syn::parse_str("Vec<String>").unwrap()));
    }

    #[test]
    fn test_generates_option_match() {
        let input: DeriveInput = syn::parse_str(
            "struct Row { #[field(Number, rename = \"totalHours\")] total_hours: Option<f64>, #[field(skip)] id: u32, note: String }",
        )
        .unwrap();
        let out = record_derive_impl(input).unwrap().to_string();
        assert!(out.contains("TOTAL_HOURS"));
        assert!(out.contains("\"totalHours\""));
        assert!(out.contains("Option :: None"));
        assert!(!out.contains("\"id\""));
        assert!(!out.contains("\"note\""));
    }

    #[test]
    fn test_rejects_enums() {
        let input: DeriveInput = syn::parse_str("enum E { A }").unwrap();
        assert!(record_derive_impl(input).is_err());
    }
}
