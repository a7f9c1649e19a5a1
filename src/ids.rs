//! Unique identifier generation for defaulted fields (button names, item uids).

use uuid::Uuid;

/// Returns a fresh identifier of the form `<prefix>_<32 hex digits>`.
pub fn generate(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
