//! SQL SDK
//!
//! Typed requests for each statement, turned into options values that are
//! validated and rendered through static descriptor tables, then executed
//! over an injected [`Connection`].
//!
//! - `identifier` - Qualified object names and their persisted form
//! - `options` - Descriptor tables (`Field`, `QueryStruct`)
//! - `validation` - Options validation
//! - `render` - SQL rendering
//! - `client` - Execution and query adapter
//! - `rows` - Result rows and entity conversion
//! - `compute_pools`, `image_repositories` - Resource statements

pub mod client;
pub mod common;
pub mod compute_pools;
pub mod error;
pub mod identifier;
pub mod image_repositories;
pub mod options;
pub mod render;
pub mod rows;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{Client, Connection};
pub use error::{ConnectionError, SdkError, SdkResult};
pub use identifier::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, DecodedIdentifier, ObjectIdentifier,
    SchemaObjectIdentifier, decode_id, encode_id,
};
pub use rows::{Cell, Row};
pub use validation::{OptionsError, ValidationErrors};
