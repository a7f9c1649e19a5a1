//! Schema engine for UI component specs
//!
//! Turns raw, author-supplied configuration objects into fully populated
//! records, or into a structured list of everything that is wrong with them.
//!
//! # Design Principles
//!
//! - Schemas are declarative and built once
//! - All field errors are collected in one pass
//! - Errors are data; only a broken schema is FATAL
//! - Inputs are never mutated

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{
    DetailKind, SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationDetails,
};
pub use loader::{BranchDef, FieldDef, PresenceDef, SchemaDef, SchemaDefinition, SchemaRegistry};
pub use types::{FieldPresence, FieldSpec, Thunk, ValidatorFn, ValueSchema};
pub use validator::{as_raw, validate};
