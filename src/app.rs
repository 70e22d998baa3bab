use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/calendar/next", post(handlers::nav_next))
        .route("/calendar/prev", post(handlers::nav_prev))
        .route("/calendar/today", post(handlers::nav_today))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/next", post(handlers::next_month))
        .route("/api/calendar/prev", post(handlers::prev_month))
        .route("/api/booked-dates", get(handlers::get_booked_dates))
        .route("/api/booked-dates/reload", post(handlers::reload_booked_dates))
        .with_state(state)
}
