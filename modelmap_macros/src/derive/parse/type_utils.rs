//! Type introspection helpers.
//!
//! These utilities perform shallow inspection of `syn::Type` values to infer
//! a field's storage policy when none is declared.

use syn::Type;

use super::Storage;

const VALUE_TYPES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64",
];

/// The final path segment of `ty`, ignoring any generic arguments.
///
/// The check is shallow, so `std::sync::Weak<T>` and `Weak<T>` both yield
/// `Weak`.
fn last_ident(ty: &Type) -> Option<String> {
    let Type::Path(p) = ty else {
        return None;
    };
    p.path.segments.last().map(|segment| segment.ident.to_string())
}

/// Storage implied by the field's type.
///
/// `Weak<_>` is weak, `Arc<_>` and `Rc<_>` are shared, primitive scalars are
/// plain values and everything else is owned.
pub(crate) fn infer_storage(ty: &Type) -> Storage {
    match last_ident(ty).as_deref() {
        Some("Weak") => Storage::Weak,
        Some("Arc" | "Rc") => Storage::Shared,
        Some(name) if VALUE_TYPES.contains(&name) => Storage::Value,
        _ => Storage::Owned,
    }
}
