//! Field descriptors and the per-type descriptor table.
//!
//! A model declares its fields once through a [`TableBuilder`]. The builder
//! normalizes the declarations into a [`FieldDescriptorTable`]: computed
//! fields are dropped, key paths are parsed, named transformers are
//! resolved and the configuration is checked. The result is cached per
//! type by [`describe`] and shared by every mapping, merge and validation
//! of that type.
//!
//! Models usually get their declarations from `#[derive(Model)]`. The
//! builder can also be driven by hand:
//!
//! ```
//! use modelmap::Model;
//! use modelmap::descriptor::{FieldAccessor, FieldDescriptor, TableBuilder, describe};
//!
//! #[derive(Clone, Default)]
//! struct Label {
//!     name: String,
//!     colour: String,
//! }
//!
//! impl Model for Label {
//!     fn declare(table: &mut TableBuilder<Self>) {
//!         table
//!             .field(FieldDescriptor::new(
//!                 "name",
//!                 FieldAccessor::<Self>::stored(|label| &label.name, |label| &mut label.name),
//!             ))
//!             .field(
//!                 FieldDescriptor::new(
//!                     "colour",
//!                     FieldAccessor::<Self>::stored(|label| &label.colour, |label| &mut label.colour),
//!                 )
//!                 .key_path("style.colour"),
//!             )
//!             .computed("display_name");
//!     }
//! }
//!
//! let table = describe::<Label>();
//! assert_eq!(table.field_names(), ["name", "colour"]);
//! ```

mod accessor;
mod builder;
mod cache;
mod field;
mod table;

pub use accessor::{AccessorKind, FieldAccessor};
pub use builder::{TableBuilder, TableError};
pub use cache::{describe, try_describe};
pub use field::{FieldDescriptor, FieldValidation, MergeStrategy, StorageBehavior, StoragePolicy};
pub use table::FieldDescriptorTable;

#[cfg(test)]
mod tests;
