//! Dialog button spec

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

use crate::ids;
use crate::schema::{FieldSpec, SchemaResult, ValueSchema};

/// A fully populated dialog button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub primary: bool,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Button fields, in validation order.
pub fn button_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::strict_string("type"),
        FieldSpec::strict_string("text"),
        FieldSpec::defaulted_boolean("primary", false),
        FieldSpec::defaulted_thunk("name", ValueSchema::String, || {
            Ok(Value::String(ids::generate("button-name")))
        }),
        FieldSpec::option_string("icon"),
    ]
}

pub fn button_schema() -> &'static ValueSchema {
    static SCHEMA: OnceLock<ValueSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| ValueSchema::obj_of(button_fields()))
}

/// Builds a [`Button`] from a raw spec.
pub fn create_button(spec: &Value) -> SchemaResult<Button> {
    super::build("button", button_schema(), spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;
    use serde_json::json;

    #[test]
    fn test_minimal_button_gets_defaults() {
        let button = create_button(&json!({"type": "button", "text": "OK"})).unwrap();
        assert_eq!(button.kind, "button");
        assert!(!button.primary);
        assert!(button.name.starts_with("button-name_"));
        assert_eq!(button.icon, None);
    }

    #[test]
    fn test_each_button_gets_its_own_name() {
        let spec = json!({"type": "button", "text": "OK"});
        let a = create_button(&spec).unwrap();
        let b = create_button(&spec).unwrap();
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_explicit_values_kept() {
        let button = create_button(&json!({
            "type": "button",
            "text": "Save",
            "primary": true,
            "name": "save",
            "icon": "checkmark"
        }))
        .unwrap();
        assert!(button.primary);
        assert_eq!(button.name, "save");
        assert_eq!(button.icon.as_deref(), Some("checkmark"));
    }

    #[test]
    fn test_empty_spec_lists_required_fields() {
        let err = create_button(&json!({})).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::ValidationFailed);
        assert_eq!(err.fields(), vec!["type", "text"]);
        assert_eq!(err.label(), Some("button"));
    }

    #[test]
    fn test_wrong_types_reported() {
        let err = create_button(&json!({"type": "button", "text": "OK", "primary": "yes"}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["primary"]);
    }
}
