//! Conversion between wire dictionaries and models.
//!
//! Decoding starts from the model's default value and fills in every mapped
//! field found on the wire, in declaration order. The first field failure
//! aborts the whole decode; no partially built model escapes. A finished
//! model goes through its post-build hooks and then through validation.
//!
//! ```
//! use modelmap::{MappingError, Model, mapper};
//! use modelmap::descriptor::{FieldAccessor, FieldDescriptor, TableBuilder};
//! use serde_json::json;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Issue {
//!     number: u64,
//!     author: Option<String>,
//! }
//!
//! impl Model for Issue {
//!     fn declare(table: &mut TableBuilder<Self>) {
//!         table
//!             .field(FieldDescriptor::new(
//!                 "number",
//!                 FieldAccessor::<Self>::stored(|issue| &issue.number, |issue| &mut issue.number),
//!             ))
//!             .field(
//!                 FieldDescriptor::new(
//!                     "author",
//!                     FieldAccessor::<Self>::stored(|issue| &issue.author, |issue| &mut issue.author),
//!                 )
//!                 .key_path("user.login"),
//!             );
//!     }
//! }
//!
//! let wire = json!({"number": 7, "user": {"login": "octocat"}});
//! let issue: Issue = mapper::from_wire_value(&wire)?;
//! assert_eq!(issue.author.as_deref(), Some("octocat"));
//! assert_eq!(serde_json::Value::Object(mapper::to_wire(&issue)?), wire);
//! # Ok::<_, MappingError>(())
//! ```

mod decode;
mod dictionary;
mod encode;

pub use decode::{from_wire, from_wire_array, from_wire_value, with_defaults};
pub use dictionary::{dictionary_value, equivalent, from_dictionary};
pub use encode::{to_wire, to_wire_array};
