//! Schema error types
//!
//! Error codes:
//! - EK_SCHEMA_VALIDATION_FAILED (REJECT)
//! - EK_SCHEMA_DEFAULT_FAILED (FATAL)
//! - EK_SCHEMA_MALFORMED_DEFINITION (FATAL)
//! - EK_SCHEMA_DUPLICATE (FATAL)
//! - EK_SCHEMA_UNKNOWN (REJECT)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The input was rejected; fixing the input fixes the error
    Reject,
    /// The schema itself is broken; no input can succeed
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Input violates the schema
    ValidationFailed,
    /// A default value or default thunk misbehaved
    DefaultFailed,
    /// A schema definition file could not be read or parsed
    MalformedDefinition,
    /// A schema name was registered twice
    DuplicateSchema,
    /// No schema registered under the requested name
    UnknownSchema,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ValidationFailed => "EK_SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::DefaultFailed => "EK_SCHEMA_DEFAULT_FAILED",
            SchemaErrorCode::MalformedDefinition => "EK_SCHEMA_MALFORMED_DEFINITION",
            SchemaErrorCode::DuplicateSchema => "EK_SCHEMA_DUPLICATE",
            SchemaErrorCode::UnknownSchema => "EK_SCHEMA_UNKNOWN",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::ValidationFailed | SchemaErrorCode::UnknownSchema => Severity::Reject,
            SchemaErrorCode::DefaultFailed
            | SchemaErrorCode::MalformedDefinition
            | SchemaErrorCode::DuplicateSchema => Severity::Fatal,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What went wrong with a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    /// A required field is absent
    Missing,
    /// The value has the wrong JSON type
    TypeMismatch,
    /// A union tag is absent or names no declared branch
    UnknownVariant,
    /// A closed object carries a key the schema does not declare
    Undeclared,
    /// A custom validator rejected the value
    Rejected,
}

/// Validation failure details for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "movement.rowSelector", "items[2].type")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
    /// Failure category
    pub kind: DetailKind,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        kind: DetailKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
            kind,
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, DetailKind::Missing, "field to be present", "missing")
    }

    pub fn undeclared_field(field: impl Into<String>) -> Self {
        Self::new(
            field,
            DetailKind::Undeclared,
            "no undeclared fields",
            "extra field present",
        )
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, DetailKind::TypeMismatch, expected, actual)
    }

    pub fn unknown_variant(
        field: impl Into<String>,
        declared: &[&str],
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            DetailKind::UnknownVariant,
            format!("one of [{}]", declared.join(", ")),
            actual,
        )
    }

    pub fn rejected(field: impl Into<String>, validator: &str, reason: impl Into<String>) -> Self {
        Self::new(field, DetailKind::Rejected, validator, reason)
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// What was being validated (e.g. "button", "menu.spec item")
    label: Option<String>,
    /// Field-level failures, in schema declaration order
    details: Vec<ValidationDetails>,
}

impl SchemaError {
    /// Create a validation failed error from the collected field details
    pub fn validation_failed(details: Vec<ValidationDetails>) -> Self {
        let summary = details
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            code: SchemaErrorCode::ValidationFailed,
            message: format!("Validation failed: {}", summary),
            label: None,
            details,
        }
    }

    /// Create an error for a default thunk that failed or produced an invalid value
    pub fn default_failed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::DefaultFailed,
            message: format!(
                "Default for field '{}' failed: {}",
                field.into(),
                reason.into()
            ),
            label: None,
            details: Vec::new(),
        }
    }

    /// Create an error for a malformed schema definition file
    pub fn malformed_definition(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedDefinition,
            message: format!(
                "Malformed schema definition '{}': {}",
                path.into(),
                reason.into()
            ),
            label: None,
            details: Vec::new(),
        }
    }

    /// Create a duplicate registration error
    pub fn duplicate_schema(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::DuplicateSchema,
            message: format!("Schema '{}' is already registered", name),
            label: Some(name),
            details: Vec::new(),
        }
    }

    /// Create an unknown schema error
    pub fn unknown_schema(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::UnknownSchema,
            message: format!("Schema '{}' not found", name),
            label: Some(name),
            details: Vec::new(),
        }
    }

    /// Attaches a label naming what was being validated
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns true for schema-definition bugs rather than bad input
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the label if one was attached
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the field-level details
    pub fn details(&self) -> &[ValidationDetails] {
        &self.details
    }

    /// Returns the paths of every failing field, in order
    pub fn fields(&self) -> Vec<&str> {
        self.details.iter().map(|d| d.field.as_str()).collect()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity(), self.code)?;
        if let Some(ref label) = self.label {
            write!(f, " ({})", label)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            SchemaErrorCode::ValidationFailed.code(),
            "EK_SCHEMA_VALIDATION_FAILED"
        );
        assert_eq!(SchemaErrorCode::DefaultFailed.code(), "EK_SCHEMA_DEFAULT_FAILED");
        assert_eq!(SchemaErrorCode::DuplicateSchema.code(), "EK_SCHEMA_DUPLICATE");
        assert_eq!(SchemaErrorCode::UnknownSchema.code(), "EK_SCHEMA_UNKNOWN");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(SchemaErrorCode::ValidationFailed.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::UnknownSchema.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::DefaultFailed.severity(), Severity::Fatal);
        assert_eq!(SchemaErrorCode::MalformedDefinition.severity(), Severity::Fatal);
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::type_mismatch("primary", "boolean", "string");
        let display = format!("{}", details);
        assert!(display.contains("primary"));
        assert!(display.contains("boolean"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_validation_failed_lists_every_field() {
        let err = SchemaError::validation_failed(vec![
            ValidationDetails::missing_field("type"),
            ValidationDetails::missing_field("text"),
        ]);
        assert_eq!(err.fields(), vec!["type", "text"]);
        assert!(err.message().contains("type"));
        assert!(err.message().contains("text"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_label_in_display() {
        let err = SchemaError::validation_failed(vec![ValidationDetails::missing_field("type")])
            .with_label("button");
        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("(button)"));
        assert_eq!(err.label(), Some("button"));
    }

    #[test]
    fn test_unknown_variant_lists_branches() {
        let details = ValidationDetails::unknown_variant("mode", &["grid", "menu"], "'list'");
        assert_eq!(details.kind, DetailKind::UnknownVariant);
        assert_eq!(details.expected, "one of [grid, menu]");
    }
}
