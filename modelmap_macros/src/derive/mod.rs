//! Expansion of `#[derive(Model)]`.

mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse the struct and emit its `Model` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let model = parse::parse_input(input)?;
    Ok(generate::model_impl(&model))
}
