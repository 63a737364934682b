//! Error types produced while mapping models.

mod result_ext;
mod types;

pub use result_ext::{FieldResultExt, IntoFieldError};
pub use types::{MapResult, MappingError};
