use serde::{Deserialize, Serialize};

/// User-facing text and export settings for a `LibraryManager`.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```ignore
/// let config = ManagerConfig::from_json(r#"{"export_file_name":"catalog.csv"}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Shown when a failed call carries no usable message.
    pub generic_error_message: String,
    pub export_file_name: String,
    pub export_mime_type: String,
    pub export_success_message: String,
    /// Shown for any export failure, regardless of the underlying error.
    pub export_failed_message: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            generic_error_message: "An unexpected error occurred".to_string(),
            export_file_name: "Books.csv".to_string(),
            export_mime_type: "text/csv".to_string(),
            export_success_message: "Books exported successfully".to_string(),
            export_failed_message: "Failed to export books".to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
