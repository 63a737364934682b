//! Case rules for deriving default wire keys from field names.
//!
//! Rule names match serde's, so a model can mirror the casing of the
//! service it talks to with the same spelling used elsewhere.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};
use syn::LitStr;

/// A `#[model(rename_all = "...")]` rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
}

const RULES: [(&str, RenameAll); 7] = [
    ("lowercase", RenameAll::Lower),
    ("UPPERCASE", RenameAll::Upper),
    ("PascalCase", RenameAll::Pascal),
    ("camelCase", RenameAll::Camel),
    ("snake_case", RenameAll::Snake),
    ("SCREAMING_SNAKE_CASE", RenameAll::ScreamingSnake),
    ("kebab-case", RenameAll::Kebab),
];

impl RenameAll {
    pub(crate) fn parse(value: &LitStr) -> syn::Result<Self> {
        let wanted = value.value();
        RULES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, rule)| *rule)
            .ok_or_else(|| {
                let known: Vec<String> = RULES
                    .iter()
                    .map(|(name, _)| format!("\"{name}\""))
                    .collect();
                syn::Error::new(
                    value.span(),
                    format!(
                        "unknown rename_all rule '{wanted}'; expected one of {}",
                        known.join(", ")
                    ),
                )
            })
    }

    /// The wire key for a (raw-stripped) field name.
    ///
    /// Field names are already snake case, so `snake_case` leaves them as
    /// they are.
    pub(crate) fn apply(self, field_name: &str) -> String {
        match self {
            Self::Snake => field_name.to_owned(),
            Self::Lower => field_name.to_lowercase(),
            Self::Upper => field_name.to_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
        }
    }
}
