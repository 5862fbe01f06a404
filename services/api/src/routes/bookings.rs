//! Booking intake and admin booking management

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_extra::{TypedHeader, headers::UserAgent};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AdminSession,
    models::{
        availability::{BlockDayRequest, BlockedDayResponse, UnavailableDatesResponse},
        booking::{
            BookingResponse, BookingStatus, NewBooking, SubmitBookingRequest, UpdateStatusRequest,
        },
    },
    state::AppState,
};

/// Routes nested under `/api/bookings`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_booking))
        .route("/admin", get(list_bookings))
        .route("/:id/status", patch(update_booking_status))
        .route("/unavailable-dates", get(unavailable_dates))
        .route("/unavailable-dates", post(block_date))
        .route("/unavailable-dates/:date_ms", delete(unblock_date))
}

/// Public booking submission
///
/// The availability pre-check only exists to answer the common case quickly;
/// the INSERT itself re-checks blocked days and the unique day constraint, so
/// two racing submissions for the same day cannot both succeed.
pub async fn submit_booking(
    State(state): State<AppState>,
    agent: Option<TypedHeader<UserAgent>>,
    Json(payload): Json<SubmitBookingRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }

    let email = payload.email.trim().to_lowercase();
    if !email.contains('@') || email.len() < 5 {
        return Err(ApiError::Validation(
            "A valid email address is required".to_string(),
        ));
    }

    let phone = payload.phone.trim().to_string();
    if phone.is_empty() {
        return Err(ApiError::Validation("Phone number is required".to_string()));
    }

    let day = state
        .day_keys
        .day_from_millis(payload.desired_date)
        .ok_or_else(|| {
            ApiError::Validation("desiredDate must be an epoch-millisecond timestamp".to_string())
        })?;

    if !state.availability_repository.is_day_available(day).await? {
        return Err(ApiError::DateUnavailable);
    }

    let package_name = payload
        .package_name
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    // Body value wins; the request header is only a fallback.
    let user_agent = payload
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(str::to_string)
        .or_else(|| agent.map(|TypedHeader(ua)| ua.as_str().to_string()));

    let booking = state
        .booking_repository
        .insert_pending(&NewBooking {
            name,
            email,
            phone,
            day_key: day,
            package_name,
            user_agent,
        })
        .await?
        .ok_or(ApiError::DateUnavailable)?;

    info!("Booking {} received for {}", booking.id, booking.day_key);

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse::from_booking(&booking, &state.day_keys)),
    ))
}

/// All bookings, newest first
pub async fn list_bookings(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let bookings = state.booking_repository.list_all().await?;
    let response: Vec<BookingResponse> = bookings
        .iter()
        .map(|booking| BookingResponse::from_booking(booking, &state.day_keys))
        .collect();

    Ok(Json(response))
}

/// Set a booking's status
///
/// Any of the four statuses may replace any other; the vocabulary itself is
/// the only constraint.
pub async fn update_booking_status(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let status = BookingStatus::parse(&payload.status)
        .ok_or_else(|| ApiError::InvalidStatus(payload.status.clone()))?;

    let booking = state
        .booking_repository
        .update_status(id, status)
        .await?
        .ok_or(ApiError::NotFound("Booking"))?;

    info!(
        "Booking {} status set to {} by {}",
        booking.id, booking.status, admin.email
    );

    Ok(Json(BookingResponse::from_booking(&booking, &state.day_keys)))
}

/// Public calendar of days that cannot be booked
pub async fn unavailable_dates(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let days = state.availability_repository.unavailable_days().await?;
    let dates = days
        .into_iter()
        .map(|day| state.day_keys.millis_from_day(day))
        .collect();

    Ok(Json(UnavailableDatesResponse { dates }))
}

/// Block a day against new bookings
///
/// Blocking an already-blocked day answers with the existing row.
pub async fn block_date(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<BlockDayRequest>,
) -> ApiResult<impl IntoResponse> {
    let day = state.day_keys.day_from_millis(payload.date_ms).ok_or_else(|| {
        ApiError::Validation("dateMs must be an epoch-millisecond timestamp".to_string())
    })?;

    let blocked = state
        .availability_repository
        .block_day(day, payload.reason.as_deref())
        .await?;

    info!("Day {} blocked by {}", blocked.day_key, admin.email);

    Ok((
        StatusCode::CREATED,
        Json(BlockedDayResponse::from_blocked_day(&blocked, &state.day_keys)),
    ))
}

/// Remove a block
///
/// Unblocking a day that is not blocked is not an error; the response says
/// whether a row was removed.
pub async fn unblock_date(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Path(date_ms): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let day = state.day_keys.day_from_millis(date_ms).ok_or_else(|| {
        ApiError::Validation("Date must be an epoch-millisecond timestamp".to_string())
    })?;

    let removed = state.availability_repository.unblock_day(day).await?;
    if removed {
        info!("Day {} unblocked by {}", day, admin.email);
    }

    Ok(Json(json!({ "removed": removed })))
}
