use axum::{
    extract::{Extension, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::gate::AuthenticatedUser,
    error::AppError,
    forms::{dto::BookingRequest, repo_types::FormDetails, services::RECENT_FORMS_LIMIT},
    state::AppState,
};

pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/api/forms/book", post(book_ride))
        .route("/api/forms/recent", get(recent))
}

#[instrument(skip(state, caller, body))]
pub async fn book_ride(
    State(state): State<AppState>,
    caller: Option<Extension<AuthenticatedUser>>,
    Json(body): Json<BookingRequest>,
) -> Result<Json<FormDetails>, AppError> {
    info!(
        booked_by = caller.as_ref().map(|Extension(u)| u.id),
        booked_by_email = caller.as_ref().map(|Extension(u)| u.email.as_str()),
        pickup_location = ?body.pickup_location,
        dropoff_location = ?body.dropoff_location,
        pickup_date_time = ?body.pickup_date_time,
        return_date_time = ?body.return_date_time,
        car_type = ?body.car_type,
        full_name = ?body.full_name,
        email = ?body.email,
        "received booking"
    );
    let saved = state.forms.save(body).await?;
    info!(id = saved.id, "saved booking");
    Ok(Json(saved))
}

#[instrument(skip(state))]
pub async fn recent(State(state): State<AppState>) -> Result<Json<Vec<FormDetails>>, AppError> {
    let forms = state.forms.find_recent(RECENT_FORMS_LIMIT).await?;
    Ok(Json(forms))
}
