//! Site content routes: albums, gallery items, packages, logos, settings
//!
//! Reads are public; every mutation sits behind a validated admin session.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AdminSession,
    models::content::{
        AlbumDetailResponse, CreateAlbumRequest, CreateGalleryItemRequest, CreateLogoRequest,
        CreatePackageRequest, UpdateAlbumRequest, UpdatePackageRequest,
    },
    state::AppState,
};

/// Content routes, merged at the application root
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/albums", get(list_albums))
        .route("/api/albums", post(create_album))
        .route("/api/albums/:id", get(get_album))
        .route("/api/albums/:id", patch(update_album))
        .route("/api/albums/:id", delete(delete_album))
        .route("/api/albums/:id/items", post(add_gallery_item))
        .route("/api/gallery-items/:id", delete(delete_gallery_item))
        .route("/api/packages", get(list_packages))
        .route("/api/packages", post(create_package))
        .route("/api/packages/:id", patch(update_package))
        .route("/api/packages/:id", delete(delete_package))
        .route("/api/logos", get(list_logos))
        .route("/api/logos", post(create_logo))
        .route("/api/logos/:id", delete(delete_logo))
        .route("/api/settings", get(get_settings))
        .route("/api/settings", put(update_settings))
}

/// All albums, in display order
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let albums = state.content_repository.list_albums().await?;

    Ok(Json(albums))
}

/// One album with its gallery items
pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let album = state
        .content_repository
        .find_album(id)
        .await?
        .ok_or(ApiError::NotFound("Album"))?;
    let items = state.content_repository.list_gallery_items(id).await?;

    Ok(Json(AlbumDetailResponse { album, items }))
}

/// Create an album
pub async fn create_album(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateAlbumRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }

    let album = state.content_repository.create_album(&payload).await?;
    info!("Album {} created by {}", album.id, admin.email);

    Ok((StatusCode::CREATED, Json(album)))
}

/// Partially update an album
pub async fn update_album(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAlbumRequest>,
) -> ApiResult<impl IntoResponse> {
    let album = state
        .content_repository
        .update_album(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Album"))?;
    info!("Album {} updated by {}", album.id, admin.email);

    Ok(Json(album))
}

/// Delete an album and its gallery items
pub async fn delete_album(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !state.content_repository.delete_album(id).await? {
        return Err(ApiError::NotFound("Album"));
    }
    info!("Album {} deleted by {}", id, admin.email);

    Ok(Json(json!({"message": "Album deleted"})))
}

/// Add an image to an album
pub async fn add_gallery_item(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(album_id): Path<Uuid>,
    Json(payload): Json<CreateGalleryItemRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.image_url.trim().is_empty() {
        return Err(ApiError::Validation("Image URL is required".to_string()));
    }

    let item = state
        .content_repository
        .add_gallery_item(album_id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Album"))?;
    info!("Gallery item {} added by {}", item.id, admin.email);

    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove an image from its album
pub async fn delete_gallery_item(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !state.content_repository.delete_gallery_item(id).await? {
        return Err(ApiError::NotFound("Gallery item"));
    }
    info!("Gallery item {} deleted by {}", id, admin.email);

    Ok(Json(json!({"message": "Gallery item deleted"})))
}

/// All packages, in display order
pub async fn list_packages(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let packages = state.content_repository.list_packages().await?;

    Ok(Json(packages))
}

/// Create a package
pub async fn create_package(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreatePackageRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }

    let package = state.content_repository.create_package(&payload).await?;
    info!("Package {} created by {}", package.id, admin.email);

    Ok((StatusCode::CREATED, Json(package)))
}

/// Partially update a package
pub async fn update_package(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePackageRequest>,
) -> ApiResult<impl IntoResponse> {
    let package = state
        .content_repository
        .update_package(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Package"))?;
    info!("Package {} updated by {}", package.id, admin.email);

    Ok(Json(package))
}

/// Delete a package
pub async fn delete_package(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !state.content_repository.delete_package(id).await? {
        return Err(ApiError::NotFound("Package"));
    }
    info!("Package {} deleted by {}", id, admin.email);

    Ok(Json(json!({"message": "Package deleted"})))
}

/// All client logos, in display order
pub async fn list_logos(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let logos = state.content_repository.list_logos().await?;

    Ok(Json(logos))
}

/// Create a client logo
pub async fn create_logo(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateLogoRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.image_url.trim().is_empty() {
        return Err(ApiError::Validation("Image URL is required".to_string()));
    }

    let logo = state.content_repository.create_logo(&payload).await?;
    info!("Logo {} created by {}", logo.id, admin.email);

    Ok((StatusCode::CREATED, Json(logo)))
}

/// Delete a client logo
pub async fn delete_logo(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !state.content_repository.delete_logo(id).await? {
        return Err(ApiError::NotFound("Logo"));
    }
    info!("Logo {} deleted by {}", id, admin.email);

    Ok(Json(json!({"message": "Logo deleted"})))
}

/// Site settings as one JSON object
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let settings = state.content_repository.get_settings().await?;

    Ok(Json(Value::Object(settings)))
}

/// Upsert site settings
///
/// Keys present in the body are written; keys absent from the body are left
/// alone. The response is the full settings object after the write.
pub async fn update_settings(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Map<String, Value>>,
) -> ApiResult<impl IntoResponse> {
    state.content_repository.upsert_settings(&payload).await?;
    info!("Site settings updated by {}", admin.email);

    let settings = state.content_repository.get_settings().await?;

    Ok(Json(Value::Object(settings)))
}
