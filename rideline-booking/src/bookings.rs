use crate::error::AppError;
use crate::service::CreateBookingError;
use crate::state::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::get,
    Router,
};
use rideline_domain::booking::{Booking, CreateBookingInput};

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", get(list_bookings).post(create_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<CreateBookingInput>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    match state.bookings.create_booking(input).await {
        Ok(booking) => Ok((StatusCode::CREATED, Json(booking))),
        Err(CreateBookingError::Validation(e)) => Err(AppError::Validation(e.to_string())),
        Err(other) => Err(AppError::Internal(other.into())),
    }
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.bookings.list_bookings().await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("failed to list bookings: {e}"))
    })?;
    Ok(Json(bookings))
}
