//! `#[derive(Document)]`.
//!
//! Reads the serde attributes that change a field's serialized name so the
//! generated field list matches what `DocumentSnapshot::from_record` produces.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, LitStr, Token, ext::IdentExt,
    meta::ParseNestedMeta, parse_macro_input,
};

/// Serde attributes relevant to one field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
    flatten: bool,
}

/// Implementation of `#[derive(Document)]`.
pub fn derive_document_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Document can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Document can only be derived for structs",
            ));
        }
    };

    let rename_all = container_rename_all(&input.attrs)?;

    let mut names = Vec::new();
    for field in fields {
        let attrs = field_attrs(&field.attrs)?;
        if attrs.flatten {
            return Err(syn::Error::new_spanned(
                field,
                "Document does not support #[serde(flatten)] fields",
            ));
        }
        if attrs.skip {
            continue;
        }
        let serialized = match attrs.rename {
            Some(rename) => rename,
            None => {
                // Named fields always carry an ident.
                let Some(ident) = &field.ident else { continue };
                let raw = ident.unraw().to_string();
                match &rename_all {
                    Some(rule) => apply_rename_rule(rule, &raw),
                    None => raw,
                }
            }
        };
        names.push(serialized);
    }

    let name_str = name.to_string();
    Ok(quote! {
        impl #impl_generics ::fieldwatch::Document for #name #ty_generics #where_clause {
            const NAME: &'static str = #name_str;
            const FIELDS: &'static [&'static str] = &[#(#names),*];
        }
    })
}

/// Consume and discard a nested meta item we do not interpret.
fn ignore(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| ignore(&inner))?;
    }
    Ok(())
}

fn container_rename_all(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rule = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    rule = Some(checked_rule(&lit)?);
                } else {
                    meta.parse_nested_meta(|inner| {
                        if inner.path.is_ident("serialize") {
                            let lit: LitStr = inner.value()?.parse()?;
                            rule = Some(checked_rule(&lit)?);
                            Ok(())
                        } else {
                            ignore(&inner)
                        }
                    })?;
                }
                Ok(())
            } else {
                ignore(&meta)
            }
        })?;
    }
    Ok(rule)
}

fn field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                } else {
                    meta.parse_nested_meta(|inner| {
                        if inner.path.is_ident("serialize") {
                            let lit: LitStr = inner.value()?.parse()?;
                            out.rename = Some(lit.value());
                            Ok(())
                        } else {
                            ignore(&inner)
                        }
                    })?;
                }
                Ok(())
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                out.skip = true;
                Ok(())
            } else if meta.path.is_ident("flatten") {
                out.flatten = true;
                Ok(())
            } else {
                ignore(&meta)
            }
        })?;
    }
    Ok(out)
}

const RULES: &[&str] = &[
    "lowercase",
    "UPPERCASE",
    "PascalCase",
    "camelCase",
    "snake_case",
    "SCREAMING_SNAKE_CASE",
    "kebab-case",
    "SCREAMING-KEBAB-CASE",
];

fn checked_rule(lit: &LitStr) -> syn::Result<String> {
    let rule = lit.value();
    if RULES.contains(&rule.as_str()) {
        Ok(rule)
    } else {
        Err(syn::Error::new(
            lit.span(),
            format!("unknown rename rule: {}", rule),
        ))
    }
}

/// Apply a serde `rename_all` rule to a snake_case field name.
fn apply_rename_rule(rule: &str, field: &str) -> String {
    match rule {
        "lowercase" | "snake_case" => field.to_owned(),
        "UPPERCASE" => field.to_ascii_uppercase(),
        "PascalCase" => pascal_case(field),
        "camelCase" => {
            let pascal = pascal_case(field);
            let mut chars = pascal.chars();
            match chars.next() {
                Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                None => pascal,
            }
        }
        "SCREAMING_SNAKE_CASE" => field.to_ascii_uppercase(),
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.to_ascii_uppercase().replace('_', "-"),
        _ => field.to_owned(),
    }
}

fn pascal_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            out.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            out.push(ch);
        }
    }
    out
}
