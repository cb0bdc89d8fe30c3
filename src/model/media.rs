//! Uploaded media as returned by the Strapi upload plugin.

use serde::Deserialize;

/// An uploaded image with its generated size variants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: u64,
    #[serde(default)]
    pub document_id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub formats: Option<ImageFormats>,
}

/// The four fixed variants. Small originals skip the larger ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageFormats {
    #[serde(default)]
    pub large: Option<ImageFormat>,
    #[serde(default)]
    pub medium: Option<ImageFormat>,
    #[serde(default)]
    pub small: Option<ImageFormat>,
    #[serde(default)]
    pub thumbnail: Option<ImageFormat>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageFormat {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub size: Option<f64>,
}

impl Image {
    /// Smallest available rendition, falling back to the original.
    pub fn thumbnail_url(&self) -> &str {
        self.formats
            .as_ref()
            .and_then(|f| {
                f.thumbnail
                    .as_ref()
                    .or(f.small.as_ref())
                    .or(f.medium.as_ref())
                    .or(f.large.as_ref())
            })
            .map_or(self.url.as_str(), |format| format.url.as_str())
    }
}

/// A local file to send to `/api/upload`.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Build from a path, guessing the mime type from the extension.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        };
        Ok(Self {
            file_name,
            mime: mime.to_string(),
            bytes,
        })
    }
}
