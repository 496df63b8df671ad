//! Export and import of progress backups

use serde_json::Value;

use super::document::ProgressDocument;
use crate::error::{Result, TrackerError};

/// Serialize the whole document as pretty-printed JSON
pub fn export_progress(document: &ProgressDocument) -> Result<String> {
    document.to_json_pretty()
}

/// Parse a backup produced by [`export_progress`] (or by the web tracker).
///
/// The text must be JSON with a top-level `days` array and must form a valid
/// document; anything else is rejected as a whole.
pub fn import_progress(text: &str) -> Result<ProgressDocument> {
    let value: Value = serde_json::from_str(text)?;

    if !value.get("days").is_some_and(Value::is_array) {
        return Err(TrackerError::InvalidImport("expected a top-level \"days\" array".into()));
    }

    let document: ProgressDocument = serde_json::from_value(value)?;
    document.validate()?;
    Ok(document)
}
