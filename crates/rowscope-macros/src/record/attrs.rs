//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[field(...)]` attributes on struct fields.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed as a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Borrowed text: `#[field(String)]`. The field must be `AsRef<str>`.
    String,
    /// Numeric: `#[field(Number)]`. The field must be `Copy + Into<Number>`.
    Number,
    /// Boolean: `#[field(Bool)]`
    Bool,
    /// Owned text via `ToString`: `#[field(Display)]`
    Display,
}

impl FieldKind {
    /// Parse a field kind from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "String" | "string" | "str" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Bool" | "boolean" => Ok(FieldKind::Bool),
            "Display" | "display" => Ok(FieldKind::Display),
            other => Err(Error::new(
                ident.span(),
                format!(
                    "unknown field kind: '{}'. Expected one of: String, Number, Bool, Display",
                    other
                ),
            )),
        }
    }
}

/// Field-level attributes from `#[field(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    pub kind: Option<FieldKind>,
    /// Exclude the field from the record.
    pub skip: bool,
    /// Name the engine uses for the field (default: the Rust field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            kind: None,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.kind = Some(FieldKind::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected field kind: String, Number, Bool, Display, or skip",
                        ));
                    }
                }

                Meta::NameValue(nv) => {
                    if !nv.path.is_ident("rename") {
                        return Err(Error::new(nv.path.span(), "unknown attribute. Expected: rename"));
                    }
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(nv.value.span(), "rename must be a string literal"));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown field attribute. Expected: String, Number, Bool, Display, skip, or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[field(...)]` attributes from a field's attributes.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    for attr in attrs {
        if attr.path().is_ident("field") {
            return attr.parse_args::<FieldAttr>();
        }
    }
    Ok(FieldAttr::default())
}
