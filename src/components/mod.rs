//! UI component specs built on the schema engine
//!
//! Each component validates a raw spec into a normalized value, then reads the
//! normalized value into a typed record.

pub mod button;
pub mod menu;

pub use button::{create_button, Button};
pub use menu::{create_item, create_menu, GridSize, Markers, Menu, MenuItem, Movement};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::schema::{as_raw, SchemaError, SchemaRegistry, SchemaResult, ValueSchema};

/// Validates `spec` and deserializes the normalized value into `T`.
///
/// A normalized value that does not fit `T` means the schema and the record
/// disagree, which is reported as a malformed definition.
fn build<T: DeserializeOwned>(label: &str, schema: &ValueSchema, spec: &Value) -> SchemaResult<T> {
    let normalized = as_raw(label, schema, spec)?;
    serde_json::from_value(normalized)
        .map_err(|e| SchemaError::malformed_definition(label, e.to_string()).with_label(label))
}

/// Registers the built-in component schemas: `button`, `menu` and `menu-item`.
pub fn register_builtins(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register("button", button::button_schema().clone())?;
    registry.register("menu", menu::menu_schema().clone())?;
    registry.register("menu-item", menu::item_schema().clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtins_registered() {
        let mut registry = SchemaRegistry::new();
        register_builtins(&mut registry).unwrap();
        assert_eq!(registry.names(), vec!["button", "menu", "menu-item"]);

        let item = registry
            .validate("menu-item", &json!({"type": "separator", "dom": {}}))
            .unwrap();
        assert_eq!(item["type"], json!("separator"));
        assert!(item["uid"].as_str().unwrap().starts_with("item_"));
    }
}
