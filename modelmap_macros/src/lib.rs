//! Procedural macros for `modelmap`.
//!
//! `#[derive(Model)]` writes a model's `declare` function from `#[model(...)]`
//! attributes, so the descriptor table is declared once, statically, next to
//! the struct it describes.
//!
//! Struct attributes:
//!
//! | Key          | Meaning |
//! |--------------|---------|
//! | `crate`      | Path to the `modelmap` crate when it is renamed. |
//! | `rename_all` | Case rule for default wire keys, as in serde. |
//! | `validate`   | `fn(&Self, &mut ValidationReport)` run after field checks. |
//! | `post_build` | `fn(&mut Self)` run after mapping, before validation. |
//!
//! Field attributes:
//!
//! | Key          | Meaning |
//! |--------------|---------|
//! | `key_path`   | Dotted wire path. Defaults to the (renamed) field name. |
//! | `unmapped`   | Keep the field out of wire mapping. |
//! | `skip`       | Do not declare the field at all. |
//! | `transformer`| Name of a registered transformer. |
//! | `with`       | `fn() -> Transformer` building the field's transformer. |
//! | `storage`    | `"value"`, `"owned"`, `"shared"` or `"weak"`. Inferred when absent. |
//! | `read_only`  | Merge keeps the base value. |
//! | `merge`      | `"replace"` (default) or `"add"`. |
//! | `merge_with` | `fn(&mut T, &T)` combining two values. |
//! | `validate`   | `validate(predicate = path, message = "...")`. Repeatable. |
//! | `extends`    | Inherit the declarations of the embedded model. |

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `modelmap::Model` for a struct with named fields.
///
/// ```rust,ignore
/// use modelmap::Model;
///
/// #[derive(Clone, Default, Model)]
/// #[model(rename_all = "camelCase")]
/// struct Pull {
///     #[model(validate(predicate = is_positive, message = "must be positive"))]
///     number: u64,
///     #[model(key_path = "head.ref")]
///     branch: Option<String>,
///     #[model(unmapped)]
///     seen: bool,
/// }
///
/// fn is_positive(number: &u64) -> bool {
///     *number > 0
/// }
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
