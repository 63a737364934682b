//! Parsing of `#[model(...)]` attributes.
//!
//! Struct-level and field-level attributes are collected into plain data
//! structures in one pass. Conflicting or malformed declarations are
//! rejected here, with a span pointing at the offending attribute, so code
//! generation never has to second-guess its input.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Path};

mod input;
mod literals;
mod rename;
mod type_utils;

pub(crate) use input::{ModelField, ModelInput, parse_input};
use literals::{lit_path, lit_str};
pub(crate) use rename::RenameAll;
pub(crate) use type_utils::infer_storage;

/// Struct-level attributes recognised by `#[derive(Model)]`.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<Path>,
    pub rename_all: Option<RenameAll>,
    pub validate: Option<Path>,
    pub post_build: Option<Path>,
}

/// How a field stores its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Storage {
    Value,
    Owned,
    Shared,
    Weak,
}

impl Storage {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "value" => Ok(Self::Value),
            "owned" => Ok(Self::Owned),
            "shared" => Ok(Self::Shared),
            "weak" => Ok(Self::Weak),
            other => Err(syn::Error::new(
                value.span(),
                format!(
                    "unknown storage '{other}'; expected one of \"value\", \"owned\", \"shared\", or \"weak\""
                ),
            )),
        }
    }
}

/// How a field merges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MergeKind {
    Replace,
    Add,
    With(Path),
}

impl MergeKind {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "replace" => Ok(Self::Replace),
            "add" => Ok(Self::Add),
            other => Err(syn::Error::new(
                value.span(),
                format!("unknown merge '{other}'; expected \"replace\" or \"add\""),
            )),
        }
    }
}

/// One `validate(predicate = ..., message = ...)` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Validation {
    pub predicate: Path,
    pub message: LitStr,
}

/// Field-level attributes recognised by `#[derive(Model)]`.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub key_path: Option<LitStr>,
    pub unmapped: bool,
    pub skip: bool,
    pub transformer: Option<LitStr>,
    pub with: Option<Path>,
    pub storage: Option<Storage>,
    pub read_only: bool,
    pub merge: Option<MergeKind>,
    pub validations: Vec<Validation>,
    pub extends: bool,
}

/// Iterate all `#[model(...)]` attributes once and apply a callback.
fn parse_model_attr<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| "attribute".to_owned(), ToString::to_string);
    meta.error(format!("unknown model attribute '{key}'"))
}

/// Extracts `#[model(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_model_attr(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("crate") => out.crate_path = Some(lit_path(meta, "crate")?),
            Some("rename_all") => {
                out.rename_all = Some(RenameAll::parse(&lit_str(meta, "rename_all")?)?);
            }
            Some("validate") => out.validate = Some(meta.value()?.parse()?),
            Some("post_build") => out.post_build = Some(meta.value()?.parse()?),
            _ => return Err(unknown_key(meta)),
        }
        Ok(())
    })?;
    Ok(out)
}

/// Parses field-level `#[model(...)]` attributes and rejects conflicting
/// combinations.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_model_attr(&field.attrs, |meta| apply_field_attr(meta, &mut out))?;
    check_conflicts(field, &out)?;
    Ok(out)
}

fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    let Some(ident) = meta.path.get_ident() else {
        return Err(unknown_key(meta));
    };
    match ident.to_string().as_str() {
        "key_path" => {
            let path = lit_str(meta, "key_path")?;
            check_key_path(&path)?;
            out.key_path = Some(path);
        }
        "unmapped" => out.unmapped = true,
        "skip" => out.skip = true,
        "read_only" => out.read_only = true,
        "extends" => out.extends = true,
        "transformer" => out.transformer = Some(lit_str(meta, "transformer")?),
        "with" => out.with = Some(meta.value()?.parse()?),
        "storage" => out.storage = Some(Storage::parse(&lit_str(meta, "storage")?)?),
        "merge" => out.merge = Some(MergeKind::parse(&lit_str(meta, "merge")?)?),
        "merge_with" => out.merge = Some(MergeKind::With(meta.value()?.parse()?)),
        "validate" => out.validations.push(parse_validation(meta)?),
        _ => return Err(unknown_key(meta)),
    }
    Ok(())
}

fn parse_validation(meta: &ParseNestedMeta) -> syn::Result<Validation> {
    let mut predicate = None;
    let mut message = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("predicate") {
            predicate = Some(nested.value()?.parse::<Path>()?);
        } else if nested.path.is_ident("message") {
            message = Some(lit_str(&nested, "message")?);
        } else {
            return Err(nested.error("expected `predicate` or `message`"));
        }
        Ok(())
    })?;
    match (predicate, message) {
        (Some(predicate), Some(message)) => Ok(Validation { predicate, message }),
        _ => Err(meta.error("validate requires both `predicate` and `message`")),
    }
}

/// Rejects key paths that are empty or contain an empty segment.
pub(crate) fn check_key_path(path: &LitStr) -> syn::Result<()> {
    let value = path.value();
    if value.is_empty() {
        return Err(syn::Error::new(path.span(), "key_path must not be empty"));
    }
    if value.split('.').any(str::is_empty) {
        return Err(syn::Error::new(
            path.span(),
            format!("key_path '{value}' contains an empty segment"),
        ));
    }
    Ok(())
}

fn check_conflicts(field: &syn::Field, attrs: &FieldAttrs) -> syn::Result<()> {
    let conflict = |message: &str| Err(syn::Error::new_spanned(field, message));
    if attrs.key_path.is_some() && attrs.unmapped {
        return conflict("`key_path` and `unmapped` cannot be combined");
    }
    if attrs.transformer.is_some() && attrs.with.is_some() {
        return conflict("`transformer` and `with` cannot be combined");
    }
    if attrs.extends
        && (attrs.key_path.is_some()
            || attrs.unmapped
            || attrs.transformer.is_some()
            || attrs.with.is_some()
            || attrs.storage.is_some()
            || attrs.merge.is_some()
            || !attrs.validations.is_empty())
    {
        return conflict("`extends` cannot be combined with other field attributes");
    }
    Ok(())
}
