//! Schema registry and declarative schema definition files
//!
//! Definition files are JSON, one schema per file:
//!
//! ```json
//! {
//!   "name": "button",
//!   "schema": {
//!     "type": "obj_of",
//!     "fields": [
//!       { "key": "type", "presence": "strict", "schema": { "type": "string" } },
//!       { "key": "primary", "presence": { "defaulted": false }, "schema": { "type": "boolean" } },
//!       { "key": "name", "presence": { "generated": "button-name" }, "schema": { "type": "string" } }
//!     ]
//!   }
//! }
//! ```
//!
//! Custom validators cannot be expressed in files; register those in code.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldPresence, FieldSpec, ValueSchema};
use super::validator;
use crate::ids;
use crate::observability::Event;

/// Declarative form of a [`ValueSchema`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaDef {
    #[default]
    Any,
    String,
    Boolean,
    Number,
    Integer,
    ArrayOf {
        element: Box<SchemaDef>,
    },
    ObjOf {
        fields: Vec<FieldDef>,
        #[serde(default)]
        closed: bool,
    },
    Choose {
        tag: String,
        branches: Vec<BranchDef>,
    },
}

/// One union branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

/// Declarative form of a [`FieldSpec`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
    pub presence: PresenceDef,
    #[serde(default)]
    pub schema: SchemaDef,
}

/// Declarative form of a [`FieldPresence`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceDef {
    Strict,
    Option,
    Defaulted(Value),
    /// Default is a fresh identifier with the given prefix
    Generated(String),
    Output(Value),
}

/// Contents of one definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: SchemaDef,
}

impl SchemaDef {
    /// Validates that the definition is usable as written.
    ///
    /// Rejects duplicate field keys within one object or branch, unions with
    /// no branches or with a repeated branch name, and static `defaulted` or
    /// `output` values that do not fit their own field schema.
    pub fn validate_structure(&self) -> Result<(), String> {
        self.check_structure("")
    }

    fn check_structure(&self, path: &str) -> Result<(), String> {
        match self {
            SchemaDef::ArrayOf { element } => element.check_structure(&format!("{}[]", path)),
            SchemaDef::ObjOf { fields, .. } => check_fields(fields, path),
            SchemaDef::Choose { tag, branches } => {
                if branches.is_empty() {
                    return Err(format!(
                        "union on '{}' at {} declares no branches",
                        tag,
                        display_path(path)
                    ));
                }
                let mut names = HashSet::new();
                for branch in branches {
                    if !names.insert(branch.name.as_str()) {
                        return Err(format!(
                            "union on '{}' at {} declares branch '{}' more than once",
                            tag,
                            display_path(path),
                            branch.name
                        ));
                    }
                    check_fields(&branch.fields, path)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Builds the executable schema.
    pub fn to_schema(&self) -> ValueSchema {
        match self {
            SchemaDef::Any => ValueSchema::Any,
            SchemaDef::String => ValueSchema::String,
            SchemaDef::Boolean => ValueSchema::Boolean,
            SchemaDef::Number => ValueSchema::Number,
            SchemaDef::Integer => ValueSchema::Integer,
            SchemaDef::ArrayOf { element } => ValueSchema::array_of(element.to_schema()),
            SchemaDef::ObjOf { fields, closed } => ValueSchema::ObjOf {
                fields: fields.iter().map(FieldDef::to_field).collect(),
                closed: *closed,
            },
            SchemaDef::Choose { tag, branches } => ValueSchema::choose(
                tag.clone(),
                branches
                    .iter()
                    .map(|b| (b.name.clone(), b.fields.iter().map(FieldDef::to_field).collect())),
            ),
        }
    }
}

impl FieldDef {
    /// Builds the executable field spec.
    pub fn to_field(&self) -> FieldSpec {
        let presence = match &self.presence {
            PresenceDef::Strict => FieldPresence::Strict,
            PresenceDef::Option => FieldPresence::AsOption,
            PresenceDef::Defaulted(v) => FieldPresence::Defaulted(v.clone()),
            PresenceDef::Generated(prefix) => {
                let prefix = prefix.clone();
                FieldPresence::DefaultedThunk(std::sync::Arc::new(move || {
                    Ok(Value::String(ids::generate(&prefix)))
                }))
            }
            PresenceDef::Output(v) => FieldPresence::Output(v.clone()),
        };
        let output_key = self.output_key.clone().unwrap_or_else(|| self.key.clone());
        FieldSpec::field(self.key.clone(), output_key, presence, self.schema.to_schema())
    }
}

fn check_fields(fields: &[FieldDef], path: &str) -> Result<(), String> {
    let mut keys = HashSet::new();
    for field in fields {
        let field_path = if path.is_empty() {
            field.key.clone()
        } else {
            format!("{}.{}", path, field.key)
        };
        if !keys.insert(field.key.as_str()) {
            return Err(format!("field '{}' is declared more than once", field_path));
        }

        field.schema.check_structure(&field_path)?;

        if let PresenceDef::Defaulted(value) | PresenceDef::Output(value) = &field.presence {
            validator::conforms(&field.schema.to_schema(), value).map_err(|reason| {
                format!("value of field '{}' does not fit its schema: {}", field_path, reason)
            })?;
        }
    }
    Ok(())
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "$root"
    } else {
        path
    }
}

/// Reads, parses and structurally checks one definition file.
fn read_definition(path: &Path) -> SchemaResult<SchemaDefinition> {
    let content = fs::read_to_string(path).map_err(|e| {
        SchemaError::malformed_definition(
            path.display().to_string(),
            format!("Failed to read file: {}", e),
        )
    })?;

    let definition: SchemaDefinition = serde_json::from_str(&content).map_err(|e| {
        SchemaError::malformed_definition(path.display().to_string(), format!("Invalid JSON: {}", e))
    })?;

    definition
        .schema
        .validate_structure()
        .map_err(|e| SchemaError::malformed_definition(path.display().to_string(), e))?;

    Ok(definition)
}

/// Named schemas available for validation.
///
/// Registration is write-once: a name cannot be rebound.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ValueSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` definition file in `dir`.
    ///
    /// Returns the number of schemas loaded. Every file is read and checked
    /// before any is registered, so a failed load registers nothing.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_definition(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_definition(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        // Directory iteration order is platform dependent.
        paths.sort();

        let definitions = paths
            .iter()
            .map(|path| read_definition(path))
            .collect::<SchemaResult<Vec<_>>>()?;

        let mut batch = HashSet::new();
        for definition in &definitions {
            if self.contains(&definition.name) || !batch.insert(definition.name.as_str()) {
                return Err(SchemaError::duplicate_schema(definition.name.clone()));
            }
        }

        for definition in definitions {
            self.register(definition.name, definition.schema.to_schema())?;
        }

        tracing::info!(
            event = %Event::SchemasLoaded,
            count = paths.len(),
            dir = %dir.display(),
            "schema definitions loaded"
        );
        Ok(paths.len())
    }

    /// Loads a single definition file.
    pub fn load_file(&mut self, path: &Path) -> SchemaResult<()> {
        let definition = read_definition(path)?;
        self.register(definition.name, definition.schema.to_schema())
    }

    /// Registers a schema under `name`.
    pub fn register(&mut self, name: impl Into<String>, schema: ValueSchema) -> SchemaResult<()> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(SchemaError::duplicate_schema(name));
        }

        tracing::debug!(event = %Event::SchemaRegistered, schema = %name, "schema registered");
        self.schemas.insert(name, schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ValueSchema> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validates `input` against the schema registered under `name`.
    ///
    /// # Errors
    ///
    /// EK_SCHEMA_UNKNOWN if nothing is registered under `name`, otherwise the
    /// errors of [`validator::validate`] labelled with `name`.
    pub fn validate(&self, name: &str, input: &Value) -> SchemaResult<Value> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::unknown_schema(name))?;
        validator::as_raw(name, schema, input)
    }
}
