use serde::Serialize;

/// In-memory state of the update flow, bound by the settings view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    pub available: bool,
    pub current_version: String,
    pub version: Option<String>,
    pub downloading: bool,
    pub progress: u8,
    pub error: Option<String>,
}
