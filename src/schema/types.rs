//! Schema type definitions
//!
//! A [`ValueSchema`] describes one JSON value. Object schemas are built from
//! [`FieldSpec`]s, each pairing a key with a [`FieldPresence`] policy and a
//! nested value schema.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Lazily computed default. `Err` means the schema itself is broken.
pub type Thunk = Arc<dyn Fn() -> Result<Value, String> + Send + Sync>;

/// Custom validator or coercion. `Err` carries the rejection reason.
pub type ValidatorFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// Presence policy for one field
#[derive(Clone)]
pub enum FieldPresence {
    /// Must be present in the input
    Strict,
    /// Filled with the given value when absent
    Defaulted(Value),
    /// Filled by invoking the thunk when absent
    DefaultedThunk(Thunk),
    /// Optional; absence omits the key from the output
    AsOption,
    /// Ignores the input and always outputs the given value
    Output(Value),
}

impl fmt::Debug for FieldPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPresence::Strict => write!(f, "Strict"),
            FieldPresence::Defaulted(v) => f.debug_tuple("Defaulted").field(v).finish(),
            FieldPresence::DefaultedThunk(_) => write!(f, "DefaultedThunk(<fn>)"),
            FieldPresence::AsOption => write!(f, "AsOption"),
            FieldPresence::Output(v) => f.debug_tuple("Output").field(v).finish(),
        }
    }
}

/// Validator over a single JSON value
#[derive(Clone)]
pub enum ValueSchema {
    /// Accepts anything
    Any,
    /// UTF-8 string
    String,
    /// Boolean
    Boolean,
    /// Any JSON number
    Number,
    /// Integral JSON number
    Integer,
    /// Homogeneous array
    ArrayOf(Box<ValueSchema>),
    /// Object with declared fields
    ObjOf {
        /// Field specs in declaration order
        fields: Vec<FieldSpec>,
        /// Reject keys that no field declares
        closed: bool,
    },
    /// Discriminated union selected by the string value of `tag`
    Choose {
        /// Name of the discriminating field
        tag: String,
        /// Branch name and its field list, in declaration order
        branches: Vec<(String, Vec<FieldSpec>)>,
    },
    /// Named custom validator
    Custom {
        /// Shown in error details as the expected condition
        name: String,
        /// The validator itself
        validate: ValidatorFn,
    },
}

impl ValueSchema {
    /// Open object: undeclared keys pass through to the output.
    pub fn obj_of(fields: Vec<FieldSpec>) -> Self {
        ValueSchema::ObjOf {
            fields,
            closed: false,
        }
    }

    /// Closed object: undeclared keys are validation errors.
    pub fn obj_of_only(fields: Vec<FieldSpec>) -> Self {
        ValueSchema::ObjOf {
            fields,
            closed: true,
        }
    }

    /// Discriminated union over `tag`.
    pub fn choose<I, S>(tag: impl Into<String>, branches: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<FieldSpec>)>,
        S: Into<String>,
    {
        ValueSchema::Choose {
            tag: tag.into(),
            branches: branches
                .into_iter()
                .map(|(name, fields)| (name.into(), fields))
                .collect(),
        }
    }

    pub fn array_of(element: ValueSchema) -> Self {
        ValueSchema::ArrayOf(Box::new(element))
    }

    pub fn custom<F>(name: impl Into<String>, validate: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        ValueSchema::Custom {
            name: name.into(),
            validate: Arc::new(validate),
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &str {
        match self {
            ValueSchema::Any => "any",
            ValueSchema::String => "string",
            ValueSchema::Boolean => "boolean",
            ValueSchema::Number => "number",
            ValueSchema::Integer => "integer",
            ValueSchema::ArrayOf(_) => "array",
            ValueSchema::ObjOf { .. } | ValueSchema::Choose { .. } => "object",
            ValueSchema::Custom { name, .. } => name,
        }
    }

    /// Declared branch names of a union, in order. Empty for other schemas.
    pub fn branch_names(&self) -> Vec<&str> {
        match self {
            ValueSchema::Choose { branches, .. } => {
                branches.iter().map(|(name, _)| name.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for ValueSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSchema::ArrayOf(inner) => f.debug_tuple("ArrayOf").field(inner).finish(),
            ValueSchema::ObjOf { fields, closed } => f
                .debug_struct("ObjOf")
                .field("fields", fields)
                .field("closed", closed)
                .finish(),
            ValueSchema::Choose { tag, branches } => f
                .debug_struct("Choose")
                .field("tag", tag)
                .field("branches", branches)
                .finish(),
            ValueSchema::Custom { name, .. } => write!(f, "Custom({})", name),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

/// One named field of a target object
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Key read from the input
    pub key: String,
    /// Key written to the output
    pub output_key: String,
    /// Presence policy
    pub presence: FieldPresence,
    /// Schema applied to the resolved value
    pub schema: ValueSchema,
}

impl FieldSpec {
    /// Fully explicit field; reads `key` and writes `output_key`.
    pub fn field(
        key: impl Into<String>,
        output_key: impl Into<String>,
        presence: FieldPresence,
        schema: ValueSchema,
    ) -> Self {
        Self {
            key: key.into(),
            output_key: output_key.into(),
            presence,
            schema,
        }
    }

    fn same_key(key: impl Into<String>, presence: FieldPresence, schema: ValueSchema) -> Self {
        let key = key.into();
        Self {
            output_key: key.clone(),
            key,
            presence,
            schema,
        }
    }

    pub fn strict(key: impl Into<String>) -> Self {
        Self::same_key(key, FieldPresence::Strict, ValueSchema::Any)
    }

    pub fn strict_of(key: impl Into<String>, schema: ValueSchema) -> Self {
        Self::same_key(key, FieldPresence::Strict, schema)
    }

    pub fn strict_string(key: impl Into<String>) -> Self {
        Self::strict_of(key, ValueSchema::String)
    }

    pub fn strict_boolean(key: impl Into<String>) -> Self {
        Self::strict_of(key, ValueSchema::Boolean)
    }

    pub fn defaulted(key: impl Into<String>, default: Value) -> Self {
        Self::same_key(key, FieldPresence::Defaulted(default), ValueSchema::Any)
    }

    pub fn defaulted_of(key: impl Into<String>, default: Value, schema: ValueSchema) -> Self {
        Self::same_key(key, FieldPresence::Defaulted(default), schema)
    }

    pub fn defaulted_boolean(key: impl Into<String>, default: bool) -> Self {
        Self::defaulted_of(key, Value::Bool(default), ValueSchema::Boolean)
    }

    /// Field whose default is computed by `thunk` each time it is missing.
    pub fn defaulted_thunk<F>(key: impl Into<String>, schema: ValueSchema, thunk: F) -> Self
    where
        F: Fn() -> Result<Value, String> + Send + Sync + 'static,
    {
        Self::same_key(key, FieldPresence::DefaultedThunk(Arc::new(thunk)), schema)
    }

    pub fn option(key: impl Into<String>) -> Self {
        Self::same_key(key, FieldPresence::AsOption, ValueSchema::Any)
    }

    pub fn option_of(key: impl Into<String>, schema: ValueSchema) -> Self {
        Self::same_key(key, FieldPresence::AsOption, schema)
    }

    pub fn option_string(key: impl Into<String>) -> Self {
        Self::option_of(key, ValueSchema::String)
    }

    /// Constant field; the input is not consulted.
    pub fn output(key: impl Into<String>, value: Value) -> Self {
        Self::same_key(key, FieldPresence::Output(value), ValueSchema::Any)
    }

    /// Writes the field under a different output key.
    pub fn rename(mut self, output_key: impl Into<String>) -> Self {
        self.output_key = output_key.into();
        self
    }
}
