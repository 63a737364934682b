//! Input parsing for the `Model` derive macro.
//!
//! This module gathers the struct identifier, its fields and all attribute
//! metadata in one pass so expansion can fail fast with useful errors.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use super::{FieldAttrs, Storage, StructAttrs, infer_storage, parse_field_attrs, parse_struct_attrs};

/// A declared field, with its storage and default wire key resolved.
pub(crate) struct ModelField {
    pub ident: Ident,
    pub ty: Type,
    pub attrs: FieldAttrs,
    pub storage: Storage,
    pub wire_key: String,
}

/// Everything code generation needs to know about the struct.
pub(crate) struct ModelInput {
    pub ident: Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<ModelField>,
}

/// Gathers information from the user-provided struct.
///
/// Skipped fields are dropped here. The remaining fields keep declaration
/// order.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ModelInput> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Model cannot be derived for generic structs",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Model requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Model can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let field_attrs = parse_field_attrs(field)?;
        if field_attrs.skip {
            continue;
        }
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Model requires named fields"));
        };
        let storage = field_attrs
            .storage
            .unwrap_or_else(|| infer_storage(&field.ty));
        if storage == Storage::Weak && field_attrs.key_path.is_some() {
            return Err(syn::Error::new_spanned(field, "weak fields cannot be mapped"));
        }
        let name = field_ident.unraw().to_string();
        let wire_key = attrs
            .rename_all
            .map_or_else(|| name.clone(), |rule| rule.apply(&name));
        fields.push(ModelField {
            storage,
            ident: field_ident,
            ty: field.ty.clone(),
            attrs: field_attrs,
            wire_key,
        });
    }
    Ok(ModelInput {
        ident,
        attrs,
        fields,
    })
}
