use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/logout", post(handlers::logout))
        .route("/tasks", post(handlers::add_task))
        .route("/tasks/:id/status", post(handlers::update_status))
        .route("/tasks/:id/move", post(handlers::move_task))
        .route("/tasks/:id/delete", post(handlers::delete_task))
        .route("/calendar/more", post(handlers::load_more_history))
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/tasks", get(handlers::get_tasks))
        .route("/health", get(handlers::health))
        .with_state(state)
}
