//! Content repository: albums, gallery items, packages, logos, settings
//!
//! Plain CRUD over simple records. Rows decode through `FromRow`, and the
//! partial updates use COALESCE so absent fields keep their stored values.

use anyhow::Result;
use serde_json::Value;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::content::{
    Album, ClientLogo, CreateAlbumRequest, CreateGalleryItemRequest, CreateLogoRequest,
    CreatePackageRequest, GalleryItem, Package, UpdateAlbumRequest, UpdatePackageRequest,
};

/// Content repository
#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    /// Create a new content repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Albums

    /// All albums in display order
    pub async fn list_albums(&self) -> Result<Vec<Album>> {
        let albums = sqlx::query_as::<_, Album>(
            r#"
            SELECT id, title, description, cover_url, category, sort_order,
                   created_at, updated_at
            FROM albums
            ORDER BY sort_order, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(albums)
    }

    /// Find an album by ID
    pub async fn find_album(&self, id: Uuid) -> Result<Option<Album>> {
        let album = sqlx::query_as::<_, Album>(
            r#"
            SELECT id, title, description, cover_url, category, sort_order,
                   created_at, updated_at
            FROM albums
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(album)
    }

    /// Create a new album
    pub async fn create_album(&self, payload: &CreateAlbumRequest) -> Result<Album> {
        let album = sqlx::query_as::<_, Album>(
            r#"
            INSERT INTO albums (title, description, cover_url, category, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, cover_url, category, sort_order,
                      created_at, updated_at
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.cover_url)
        .bind(&payload.category)
        .bind(payload.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(album)
    }

    /// Apply a partial album update; returns `None` for an unknown id
    pub async fn update_album(
        &self,
        id: Uuid,
        payload: &UpdateAlbumRequest,
    ) -> Result<Option<Album>> {
        let album = sqlx::query_as::<_, Album>(
            r#"
            UPDATE albums
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                cover_url = COALESCE($4, cover_url),
                category = COALESCE($5, category),
                sort_order = COALESCE($6, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, cover_url, category, sort_order,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.cover_url)
        .bind(&payload.category)
        .bind(payload.sort_order)
        .fetch_optional(&self.pool)
        .await?;

        Ok(album)
    }

    /// Delete an album and, through the cascade, its gallery items
    pub async fn delete_album(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Gallery items

    /// Images of one album in display order
    pub async fn list_gallery_items(&self, album_id: Uuid) -> Result<Vec<GalleryItem>> {
        let items = sqlx::query_as::<_, GalleryItem>(
            r#"
            SELECT id, album_id, image_url, caption, sort_order, created_at
            FROM gallery_items
            WHERE album_id = $1
            ORDER BY sort_order, created_at
            "#,
        )
        .bind(album_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Add an image to an album; returns `None` when the album does not exist
    pub async fn add_gallery_item(
        &self,
        album_id: Uuid,
        payload: &CreateGalleryItemRequest,
    ) -> Result<Option<GalleryItem>> {
        let result = sqlx::query_as::<_, GalleryItem>(
            r#"
            INSERT INTO gallery_items (album_id, image_url, caption, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING id, album_id, image_url, caption, sort_order, created_at
            "#,
        )
        .bind(album_id)
        .bind(&payload.image_url)
        .bind(&payload.caption)
        .bind(payload.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(item) => Ok(Some(item)),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a gallery item
    pub async fn delete_gallery_item(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM gallery_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Packages

    /// All packages in display order
    pub async fn list_packages(&self) -> Result<Vec<Package>> {
        let packages = sqlx::query_as::<_, Package>(
            r#"
            SELECT id, name, description, price_cents, features, is_featured,
                   sort_order, created_at, updated_at
            FROM packages
            ORDER BY sort_order, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(packages)
    }

    /// Create a new package
    pub async fn create_package(&self, payload: &CreatePackageRequest) -> Result<Package> {
        let package = sqlx::query_as::<_, Package>(
            r#"
            INSERT INTO packages (name, description, price_cents, features, is_featured, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, price_cents, features, is_featured,
                      sort_order, created_at, updated_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price_cents.unwrap_or(0))
        .bind(payload.features.clone().unwrap_or_else(|| Value::Array(vec![])))
        .bind(payload.is_featured.unwrap_or(false))
        .bind(payload.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(package)
    }

    /// Apply a partial package update; returns `None` for an unknown id
    pub async fn update_package(
        &self,
        id: Uuid,
        payload: &UpdatePackageRequest,
    ) -> Result<Option<Package>> {
        let package = sqlx::query_as::<_, Package>(
            r#"
            UPDATE packages
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price_cents = COALESCE($4, price_cents),
                features = COALESCE($5, features),
                is_featured = COALESCE($6, is_featured),
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, price_cents, features, is_featured,
                      sort_order, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price_cents)
        .bind(&payload.features)
        .bind(payload.is_featured)
        .bind(payload.sort_order)
        .fetch_optional(&self.pool)
        .await?;

        Ok(package)
    }

    /// Delete a package
    pub async fn delete_package(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Client logos

    /// All client logos in display order
    pub async fn list_logos(&self) -> Result<Vec<ClientLogo>> {
        let logos = sqlx::query_as::<_, ClientLogo>(
            r#"
            SELECT id, name, image_url, sort_order, created_at
            FROM client_logos
            ORDER BY sort_order, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(logos)
    }

    /// Create a new client logo
    pub async fn create_logo(&self, payload: &CreateLogoRequest) -> Result<ClientLogo> {
        let logo = sqlx::query_as::<_, ClientLogo>(
            r#"
            INSERT INTO client_logos (name, image_url, sort_order)
            VALUES ($1, $2, $3)
            RETURNING id, name, image_url, sort_order, created_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.image_url)
        .bind(payload.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(logo)
    }

    /// Delete a client logo
    pub async fn delete_logo(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM client_logos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Site settings

    /// The whole settings object
    pub async fn get_settings(&self) -> Result<serde_json::Map<String, Value>> {
        let rows = sqlx::query("SELECT key, value FROM site_settings ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        let settings = rows
            .into_iter()
            .map(|row| (row.get("key"), row.get("value")))
            .collect();

        Ok(settings)
    }

    /// Upsert every key of the given settings object
    pub async fn upsert_settings(&self, settings: &serde_json::Map<String, Value>) -> Result<()> {
        for (key, value) in settings {
            sqlx::query(
                r#"
                INSERT INTO site_settings (key, value)
                VALUES ($1, $2)
                ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
