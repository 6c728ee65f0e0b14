use serde::{Deserialize, Serialize};

/// An alert record as handed to the plugin by the host engine.
///
/// The plugin never mutates alerts; it only reads the fields that
/// drive suppression and message construction. Wire names are the
/// engine's camelCase, and fields the engine may omit default to
/// empty so a partial record still deserializes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    pub id: String,
    pub status: String,
    pub previous_status: String,
    pub severity: String,
    pub previous_severity: String,
    pub environment: String,
    pub event: String,
    pub resource: String,
    pub service: Vec<String>,
    pub text: String,
    pub repeat: bool,
    /// Opaque serialized form of the original alert as received by the
    /// engine. Carries the `"labels": {...}` block used for the
    /// silence link.
    pub raw_data: String,
}

impl Alert {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
