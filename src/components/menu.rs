//! Menu spec: items, movement modes and item markers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::OnceLock;

use crate::ids;
use crate::schema::{FieldSpec, SchemaResult, ValueSchema};

/// One entry of a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MenuItem {
    Item {
        uid: String,
        dom: Value,
        components: Vec<Value>,
        data: Value,
    },
    Widget {
        uid: String,
        dom: Value,
        components: Vec<Value>,
        autofocus: bool,
    },
    Separator {
        uid: String,
        dom: Value,
        components: Vec<Value>,
    },
}

/// Keyboard movement between items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Movement {
    Grid {
        #[serde(rename = "initSize")]
        init_size: GridSize,
    },
    Matrix {
        #[serde(rename = "rowSelector")]
        row_selector: String,
    },
    Menu {
        #[serde(rename = "moveOnTab")]
        move_on_tab: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    #[serde(rename = "numColumns")]
    pub num_columns: u32,
    #[serde(rename = "numRows")]
    pub num_rows: u32,
}

/// CSS classes marking items and the selected item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub item: String,
    #[serde(rename = "selectedItem")]
    pub selected_item: String,
}

/// A fully populated menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub value: Value,
    pub items: Vec<MenuItem>,
    pub dom: Value,
    pub components: Vec<Value>,
    #[serde(rename = "eventOrder")]
    pub event_order: Value,
    pub movement: Movement,
    pub markers: Markers,
    #[serde(rename = "fakeFocus")]
    pub fake_focus: bool,
}

fn uid_field() -> FieldSpec {
    FieldSpec::defaulted_thunk("uid", ValueSchema::String, || {
        Ok(Value::String(ids::generate("item")))
    })
}

fn components_field() -> FieldSpec {
    FieldSpec::defaulted_of("components", json!([]), ValueSchema::array_of(ValueSchema::Any))
}

/// Union over the `type` of a menu entry.
pub fn item_schema() -> &'static ValueSchema {
    static SCHEMA: OnceLock<ValueSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ValueSchema::choose(
            "type",
            vec![
                (
                    "widget",
                    vec![
                        uid_field(),
                        FieldSpec::strict("dom"),
                        FieldSpec::strict_of("components", ValueSchema::array_of(ValueSchema::Any)),
                        FieldSpec::defaulted_boolean("autofocus", false),
                    ],
                ),
                (
                    "item",
                    vec![
                        uid_field(),
                        FieldSpec::strict("dom"),
                        components_field(),
                        FieldSpec::strict("data"),
                    ],
                ),
                ("separator", vec![uid_field(), FieldSpec::strict("dom"), components_field()]),
            ],
        )
    })
}

/// Grid dimension; must fit [`GridSize`]'s `u32` fields.
fn dimension_field(key: &str) -> FieldSpec {
    FieldSpec::strict_of(
        key,
        ValueSchema::custom("non-negative u32", |value| match value.as_u64() {
            Some(n) if u32::try_from(n).is_ok() => Ok(value.clone()),
            _ => Err(value.to_string()),
        }),
    )
}

/// Union over the movement `mode`, defaulting to tab-aware menu movement.
fn movement_field() -> FieldSpec {
    let grid_size =
        ValueSchema::obj_of(vec![dimension_field("numColumns"), dimension_field("numRows")]);

    FieldSpec::defaulted_of(
        "movement",
        json!({"mode": "menu", "moveOnTab": true}),
        ValueSchema::choose(
            "mode",
            vec![
                ("grid", vec![FieldSpec::strict_of("initSize", grid_size)]),
                ("matrix", vec![FieldSpec::strict_string("rowSelector")]),
                ("menu", vec![FieldSpec::defaulted_boolean("moveOnTab", true)]),
            ],
        ),
    )
}

pub fn menu_schema() -> &'static ValueSchema {
    static SCHEMA: OnceLock<ValueSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ValueSchema::obj_of(vec![
            FieldSpec::strict("value"),
            FieldSpec::strict_of("items", ValueSchema::array_of(item_schema().clone())),
            FieldSpec::strict("dom"),
            FieldSpec::strict_of("components", ValueSchema::array_of(ValueSchema::Any)),
            FieldSpec::defaulted("eventOrder", json!({})),
            movement_field(),
            FieldSpec::strict_of(
                "markers",
                ValueSchema::obj_of(vec![
                    FieldSpec::strict_string("item"),
                    FieldSpec::strict_string("selectedItem"),
                ]),
            ),
            FieldSpec::defaulted_boolean("fakeFocus", false),
        ])
    })
}

/// Builds a [`Menu`] from a raw spec.
pub fn create_menu(spec: &Value) -> SchemaResult<Menu> {
    super::build("menu", menu_schema(), spec)
}

/// Builds a single [`MenuItem`] from a raw spec.
pub fn create_item(spec: &Value) -> SchemaResult<MenuItem> {
    super::build("menu.spec item", item_schema(), spec)
}
