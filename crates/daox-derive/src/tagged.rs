//! Tagged derive macro implementation

use std::collections::HashMap;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Error, Expr, ExprLit, Fields, Lit, Meta, Result, Token};

/// One `key = "value"` pair from a field attribute.
struct Tag {
    key: String,
    value: String,
    span: Span,
}

impl Tag {
    /// `"-"` and `""` hide the field from this key's mapper.
    fn is_mapped(&self) -> bool {
        !self.value.is_empty() && self.value != "-"
    }
}

struct TaggedFieldInfo {
    ident: syn::Ident,
    name: String,
    tags: Vec<Tag>,
    /// `#[daox(skip_value)]`: mapped for column names only, no `Value` conversion.
    skip_value: bool,
}

/// Everything parsed from a field's `#[daox(...)]` attributes.
struct FieldAttrs {
    tags: Vec<Tag>,
    skip_value: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "Tagged can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "Tagged can only be derived for structs",
            ));
        }
    };

    let mut infos = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let attrs = parse_field_attrs(field)?;
        if attrs.tags.is_empty() {
            continue;
        }
        infos.push(TaggedFieldInfo {
            name: ident.unraw().to_string(),
            ident,
            tags: attrs.tags,
            skip_value: attrs.skip_value,
        });
    }
    check_duplicate_columns(&infos)?;

    let field_entries = infos.iter().map(|info| {
        let field_name = &info.name;
        let keys = info.tags.iter().map(|t| &t.key);
        let values = info.tags.iter().map(|t| &t.value);
        quote! {
            ::daox::TaggedField {
                name: #field_name,
                tags: &[#((#keys, #values)),*],
            }
        }
    });

    let value_arms = infos
        .iter()
        .filter(|info| !info.skip_value && info.tags.iter().any(Tag::is_mapped))
        .map(|info| {
            let field_name = &info.name;
            let ident = &info.ident;
            quote! {
                #field_name => ::core::option::Option::Some(
                    ::daox::Value::from(::core::clone::Clone::clone(&self.#ident)),
                ),
            }
        });

    Ok(quote! {
        impl #impl_generics ::daox::Tagged for #name #ty_generics #where_clause {
            fn tagged_fields() -> &'static [::daox::TaggedField] {
                &[#(#field_entries),*]
            }

            fn field_value(&self, field: &str) -> ::core::option::Option<::daox::Value> {
                match field {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Collect every `#[daox(key = "value", ...)]` pair and `skip_value` flag on a field.
fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut tags: Vec<Tag> = Vec::new();
    let mut skip_value = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("daox") {
            continue;
        }
        let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for meta in metas {
            let pair = match meta {
                Meta::Path(path) if path.is_ident("skip_value") => {
                    skip_value = true;
                    continue;
                }
                Meta::NameValue(pair) => pair,
                other => {
                    return Err(Error::new_spanned(
                        other,
                        "expected `key = \"value\"` or `skip_value`",
                    ));
                }
            };
            let Some(key) = pair.path.get_ident() else {
                return Err(Error::new_spanned(
                    &pair.path,
                    "tag key must be a plain identifier",
                ));
            };
            let Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) = &pair.value
            else {
                return Err(Error::new_spanned(
                    &pair.value,
                    "tag value must be a string literal",
                ));
            };

            let key = key.unraw().to_string();
            if tags.iter().any(|t| t.key == key) {
                return Err(Error::new_spanned(
                    &pair.path,
                    format!("duplicate tag key '{key}'"),
                ));
            }
            tags.push(Tag {
                key,
                value: lit.value().trim().to_string(),
                span: lit.span(),
            });
        }
    }

    Ok(FieldAttrs { tags, skip_value })
}

/// Two fields must not map to the same name under one tag key.
fn check_duplicate_columns(infos: &[TaggedFieldInfo]) -> Result<()> {
    let mut seen = HashMap::<(&str, &str), &str>::new();
    for info in infos {
        for tag in info.tags.iter().filter(|t| t.is_mapped()) {
            if let Some(other) = seen.insert((tag.key.as_str(), tag.value.as_str()), &info.name) {
                return Err(Error::new(
                    tag.span,
                    format!(
                        "fields '{other}' and '{}' both map to '{}' under tag '{}'",
                        info.name, tag.value, tag.key
                    ),
                ));
            }
        }
    }
    Ok(())
}
