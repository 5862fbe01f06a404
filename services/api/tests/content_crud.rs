//! Integration tests for site content
//!
//! Covers album/gallery CRUD with the delete cascade, COALESCE partial
//! updates and the settings upsert against a live database. They need a
//! provisioned DATABASE_URL and are ignored by default.

use api::models::content::{
    CreateAlbumRequest, CreateGalleryItemRequest, CreateLogoRequest, CreatePackageRequest,
    UpdateAlbumRequest, UpdatePackageRequest,
};
use api::repositories::content::ContentRepository;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

async fn setup() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    run_migrations(&pool).await?;

    Ok(pool)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_album_crud_and_gallery_cascade() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup().await?;
    let content = ContentRepository::new(pool.clone());

    let album = content
        .create_album(&CreateAlbumRequest {
            title: format!("Weddings {}", Uuid::new_v4().simple()),
            description: Some("Our wedding work".to_string()),
            cover_url: None,
            category: Some("events".to_string()),
            sort_order: Some(2),
        })
        .await?;
    assert_eq!(album.category.as_deref(), Some("events"));
    assert_eq!(album.sort_order, 2);

    let found = content.find_album(album.id).await?.expect("album exists");
    assert_eq!(found.title, album.title);

    // A sparse update touches only the fields it names.
    let updated = content
        .update_album(
            album.id,
            &UpdateAlbumRequest {
                cover_url: Some("https://cdn.example.com/cover.jpg".to_string()),
                ..Default::default()
            },
        )
        .await?
        .expect("album exists");
    assert_eq!(updated.cover_url.as_deref(), Some("https://cdn.example.com/cover.jpg"));
    assert_eq!(updated.title, album.title);
    assert_eq!(updated.description.as_deref(), Some("Our wedding work"));
    assert!(updated.updated_at >= album.updated_at);

    let second = content
        .add_gallery_item(
            album.id,
            &CreateGalleryItemRequest {
                image_url: "https://cdn.example.com/2.jpg".to_string(),
                caption: None,
                sort_order: Some(1),
            },
        )
        .await?
        .expect("album exists");
    let first = content
        .add_gallery_item(
            album.id,
            &CreateGalleryItemRequest {
                image_url: "https://cdn.example.com/1.jpg".to_string(),
                caption: Some("Opening shot".to_string()),
                sort_order: Some(0),
            },
        )
        .await?
        .expect("album exists");

    let items = content.list_gallery_items(album.id).await?;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, first.id, "items come back in display order");
    assert_eq!(items[1].id, second.id);

    // An image cannot be attached to an album that does not exist.
    let orphan = content
        .add_gallery_item(
            Uuid::new_v4(),
            &CreateGalleryItemRequest {
                image_url: "https://cdn.example.com/x.jpg".to_string(),
                caption: None,
                sort_order: None,
            },
        )
        .await?;
    assert!(orphan.is_none());

    assert!(content.delete_album(album.id).await?);
    assert!(content.find_album(album.id).await?.is_none());

    let leftover: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM gallery_items WHERE album_id = $1")
            .bind(album.id)
            .fetch_one(&pool)
            .await?;
    assert_eq!(leftover, 0, "gallery items go with their album");

    assert!(!content.delete_album(album.id).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_package_partial_update_preserves_other_fields()
-> Result<(), Box<dyn std::error::Error>> {
    let pool = setup().await?;
    let content = ContentRepository::new(pool.clone());

    let package = content
        .create_package(&CreatePackageRequest {
            name: format!("Gold {}", Uuid::new_v4().simple()),
            description: Some("Full day coverage".to_string()),
            price_cents: Some(125_000),
            features: Some(json!(["8 hours", "Printed album"])),
            is_featured: None,
            sort_order: None,
        })
        .await?;
    assert!(!package.is_featured);

    let updated = content
        .update_package(
            package.id,
            &UpdatePackageRequest {
                is_featured: Some(true),
                ..Default::default()
            },
        )
        .await?
        .expect("package exists");
    assert!(updated.is_featured);
    assert_eq!(updated.name, package.name);
    assert_eq!(updated.price_cents, 125_000);
    assert_eq!(updated.features, json!(["8 hours", "Printed album"]));

    let missing = content
        .update_package(Uuid::new_v4(), &UpdatePackageRequest::default())
        .await?;
    assert!(missing.is_none());

    assert!(content.delete_package(package.id).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_logo_create_list_delete() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup().await?;
    let content = ContentRepository::new(pool.clone());

    let logo = content
        .create_logo(&CreateLogoRequest {
            name: format!("Client {}", Uuid::new_v4().simple()),
            image_url: "https://cdn.example.com/logo.svg".to_string(),
            sort_order: Some(3),
        })
        .await?;

    let logos = content.list_logos().await?;
    assert!(logos.iter().any(|l| l.id == logo.id));

    assert!(content.delete_logo(logo.id).await?);
    assert!(!content.delete_logo(logo.id).await?);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_settings_upsert_merges_keys() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup().await?;
    let content = ContentRepository::new(pool.clone());

    let hero_key = format!("heroTitle-{}", Uuid::new_v4().simple());
    let insta_key = format!("instagram-{}", Uuid::new_v4().simple());

    let mut initial = serde_json::Map::new();
    initial.insert(hero_key.clone(), json!("Lumera"));
    initial.insert(insta_key.clone(), json!("@lumera"));
    content.upsert_settings(&initial).await?;

    // Writing one key again leaves the others alone.
    let mut update = serde_json::Map::new();
    update.insert(hero_key.clone(), json!("Lumera Studio"));
    content.upsert_settings(&update).await?;

    let settings = content.get_settings().await?;
    assert_eq!(settings.get(&hero_key), Some(&Value::String("Lumera Studio".to_string())));
    assert_eq!(settings.get(&insta_key), Some(&Value::String("@lumera".to_string())));

    sqlx::query("DELETE FROM site_settings WHERE key = $1 OR key = $2")
        .bind(&hero_key)
        .bind(&insta_key)
        .execute(&pool)
        .await?;
    Ok(())
}
