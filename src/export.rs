use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CatalogError;

/// A decoded export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Decode a base64 payload from the export service.
    pub fn from_base64(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        payload: &str,
    ) -> Result<Self, CatalogError> {
        let bytes = STANDARD.decode(payload.trim())?;
        Ok(Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        })
    }

    /// `data:<mime>;base64,<payload>` for a browser download link.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}
