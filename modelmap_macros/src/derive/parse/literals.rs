//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses a literal from an attribute using `extractor`.
fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from an attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a string literal holding a path, such as `crate = "my_alias"`.
pub(crate) fn lit_path(meta: &ParseNestedMeta, key: &str) -> syn::Result<syn::Path> {
    let s = lit_str(meta, key)?;
    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))
}
