use serde::{Deserialize, Serialize};

use super::media::Image;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advert {
    pub id: u64,
    pub document_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub cover: Option<Image>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub document_id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Fields sent when creating or updating an advert.
///
/// `category` and `cover` are relation keys: the category's document id
/// and the numeric id of an uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvertInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<u64>,
}
