//! Code generation for `#[derive(Model)]`.
//!
//! The generated `declare` calls `extend` for every embedded supertype
//! first, so inherited fields precede the model's own. Each remaining field
//! becomes one fluent `FieldDescriptor` chain.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use super::parse::{MergeKind, ModelField, ModelInput, Storage};

/// Emit `impl Model for <struct>`.
///
/// Generated paths are rooted at `::modelmap` unless the struct names
/// another path with `#[model(crate = "...")]`.
pub(crate) fn model_impl(model: &ModelInput) -> TokenStream {
    let root = model
        .attrs
        .crate_path
        .as_ref()
        .map_or_else(|| quote! { ::modelmap }, |path| quote! { #path });
    let krate = &root;
    let ident = &model.ident;
    let extends = model
        .fields
        .iter()
        .filter(|field| field.attrs.extends)
        .map(extend_tokens);
    let descriptors = model
        .fields
        .iter()
        .filter(|field| !field.attrs.extends)
        .map(|field| descriptor_tokens(field, krate));
    let validate = model
        .attrs
        .validate
        .as_ref()
        .map(|hook| quote! { table.validate_with(#hook); });
    let post_build = model
        .attrs
        .post_build
        .as_ref()
        .map(|hook| quote! { table.post_build(#hook); });

    quote! {
        impl #krate::Model for #ident {
            fn declare(table: &mut #krate::descriptor::TableBuilder<Self>) {
                #( #extends )*
                #( table.field(#descriptors); )*
                #validate
                #post_build
            }
        }
    }
}

fn extend_tokens(field: &ModelField) -> TokenStream {
    let ident = &field.ident;
    let ty = &field.ty;
    quote! {
        table.extend::<#ty>(|model| &model.#ident, |model| &mut model.#ident);
    }
}

fn descriptor_tokens(field: &ModelField, krate: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let name = ident.unraw().to_string();
    let accessor = accessor_tokens(field, krate);
    let storage = storage_tokens(field.storage, krate);
    let mapping = mapping_tokens(field);
    let transformer = transformer_tokens(field);
    let read_only = field.attrs.read_only.then(|| quote! { .read_only() });
    let merge = merge_tokens(field, krate);
    let validations = field.attrs.validations.iter().map(|validation| {
        let predicate = &validation.predicate;
        let message = &validation.message;
        quote! {
            .validate(#krate::descriptor::FieldValidation::new(
                |model: &Self| #predicate(&model.#ident),
                #message,
            ))
        }
    });
    quote! {
        #krate::descriptor::FieldDescriptor::new(#name, #accessor)
            .storage(#storage)
            #mapping
            #transformer
            #read_only
            #merge
            #( #validations )*
    }
}

fn accessor_tokens(field: &ModelField, krate: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let constructor = if field.storage == Storage::Weak {
        quote! { opaque }
    } else {
        quote! { stored }
    };
    quote! {
        #krate::descriptor::FieldAccessor::<Self>::#constructor(
            |model| &model.#ident,
            |model| &mut model.#ident,
        )
    }
}

fn storage_tokens(storage: Storage, krate: &TokenStream) -> TokenStream {
    let variant = match storage {
        Storage::Value => quote! { Value },
        Storage::Owned => quote! { Owned },
        Storage::Shared => quote! { Shared },
        Storage::Weak => quote! { Weak },
    };
    quote! { #krate::descriptor::StoragePolicy::#variant }
}

fn mapping_tokens(field: &ModelField) -> Option<TokenStream> {
    if field.attrs.unmapped {
        return Some(quote! { .unmapped() });
    }
    if field.storage == Storage::Weak {
        return None;
    }
    let path = field
        .attrs
        .key_path
        .as_ref()
        .map_or_else(|| field.wire_key.clone(), syn::LitStr::value);
    Some(quote! { .key_path(#path) })
}

fn transformer_tokens(field: &ModelField) -> Option<TokenStream> {
    if let Some(name) = &field.attrs.transformer {
        return Some(quote! { .transformer_named(#name) });
    }
    field
        .attrs
        .with
        .as_ref()
        .map(|build| quote! { .transformer(#build()) })
}

fn merge_tokens(field: &ModelField, krate: &TokenStream) -> Option<TokenStream> {
    let ident = &field.ident;
    let combine = match field.attrs.merge.as_ref()? {
        MergeKind::Replace => return None,
        MergeKind::Add => quote! { #krate::merge::add },
        MergeKind::With(path) => quote! { #path },
    };
    Some(quote! {
        .merge(#krate::descriptor::MergeStrategy::combine(
            |base: &mut Self, other: &Self| #combine(&mut base.#ident, &other.#ident),
        ))
    })
}
