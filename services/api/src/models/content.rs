//! Site content models: albums, gallery items, packages, logos, settings
//!
//! Image references are opaque URLs produced by the upload pipeline; the
//! backend only stores and returns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Portfolio album
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub category: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image inside an album
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: Uuid,
    pub album_id: Uuid,
    pub image_url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Service package offered on the site
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub features: serde_json::Value,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client logo shown on the home page
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientLogo {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Album with its gallery items, for the public detail view
#[derive(Debug, Serialize)]
pub struct AlbumDetailResponse {
    #[serde(flatten)]
    pub album: Album,
    pub items: Vec<GalleryItem>,
}

/// Request for album creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
}

/// Partial album update; absent fields keep their stored values
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
}

/// Request to add an image to an album
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItemRequest {
    pub image_url: String,
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}

/// Request for package creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub features: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Partial package update; absent fields keep their stored values
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub features: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Request for client logo creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogoRequest {
    pub name: String,
    pub image_url: String,
    pub sort_order: Option<i32>,
}
