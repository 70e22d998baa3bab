use crate::calendar::{CalendarDate, CalendarViewState};
use crate::errors::AppError;
use crate::models::{CalendarQuery, CalendarView, LoadOutcome};
use crate::source::BookedDatesSource;
use crate::state::AppState;
use crate::ui::render_calendar;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let controller = state.controller.lock().await;
    Html(render_calendar(&controller.view()))
}

pub async fn nav_next(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.next();
    Redirect::to("/")
}

pub async fn nav_prev(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.prev();
    Redirect::to("/")
}

pub async fn nav_today(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.reset_to(&state.clock);
    Redirect::to("/")
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarView>, AppError> {
    let controller = state.controller.lock().await;
    let view = match (query.year, query.month) {
        (None, None) => controller.view(),
        (Some(year), Some(month)) => {
            if !(0..12).contains(&month) {
                return Err(AppError::bad_request("month must be between 0 and 11"));
            }
            if !(1..=9999).contains(&year) {
                return Err(AppError::bad_request("year must be between 1 and 9999"));
            }
            controller.view_of(CalendarViewState::new(year, month))
        }
        _ => return Err(AppError::bad_request("year and month must be given together")),
    };

    Ok(Json(view))
}

pub async fn next_month(State(state): State<AppState>) -> Json<CalendarView> {
    Json(state.controller.lock().await.next())
}

pub async fn prev_month(State(state): State<AppState>) -> Json<CalendarView> {
    Json(state.controller.lock().await.prev())
}

pub async fn get_booked_dates(State(state): State<AppState>) -> Json<Vec<CalendarDate>> {
    Json(state.controller.lock().await.booked_dates())
}

pub async fn reload_booked_dates(State(state): State<AppState>) -> Json<LoadOutcome> {
    let fetched = state.source.fetch().await;
    let outcome = state.controller.lock().await.install(fetched);
    Json(outcome)
}
