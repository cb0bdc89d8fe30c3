use serde::{Deserialize, Serialize};

use super::media::Image;

/// One cow logger entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logger {
    pub id: u64,
    pub document_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Numeric id of an uploaded image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<u64>,
}
