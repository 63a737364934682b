//! Core crate for the `modelmap` model-mapping layer.
//!
//! `modelmap` converts loosely typed, already decoded wire dictionaries
//! (`serde_json` maps) into strongly typed model structs and back. Each
//! model declares its fields once; the declaration is normalized into a
//! cached descriptor table that drives decoding, encoding, merging and
//! validation. The derive macro lives in the companion `modelmap_macros`
//! crate and is re-exported here.
//!
//! ```
//! use modelmap::{MappingError, Model};
//! use serde_json::json;
//!
//! #[derive(Clone, Debug, Default, Model)]
//! #[model(rename_all = "camelCase")]
//! struct Repository {
//!     full_name: String,
//!     #[model(key_path = "owner.login")]
//!     owner: Option<String>,
//!     #[model(merge = "add")]
//!     star_count: u64,
//!     #[model(unmapped)]
//!     fetched_at: Option<u64>,
//! }
//!
//! let wire = json!({
//!     "fullName": "rust-lang/rust",
//!     "owner": {"login": "rust-lang"},
//!     "starCount": 10,
//! });
//! let repo = Repository::from_wire_value(&wire)?;
//! assert_eq!(repo.owner.as_deref(), Some("rust-lang"));
//!
//! let merged = repo.merged_with(&repo);
//! assert_eq!(merged.star_count, 20);
//! assert_eq!(serde_json::Value::Object(repo.to_wire()?), wire);
//! # Ok::<_, MappingError>(())
//! ```

pub use modelmap_macros::Model;

mod error;
mod model;
mod value;

pub mod descriptor;
pub mod key_path;
pub mod mapper;
pub mod merge;
pub mod transform;
pub mod validate;

pub use descriptor::{
    FieldAccessor, FieldDescriptor, FieldDescriptorTable, MergeStrategy, StorageBehavior,
    StoragePolicy, TableBuilder, TableError, describe,
};
pub use error::{FieldResultExt, IntoFieldError, MapResult, MappingError};
pub use key_path::{KeyPath, KeyPathError, PathError};
pub use model::Model;
pub use transform::{RegistryError, ReverseUnsupported, TransformError, Transformer};
pub use validate::{ValidationError, ValidationReport};
pub use value::ValueKind;
