use crate::api::ApiError;
use crate::calendar::build_calendar;
use crate::errors::AppError;
use crate::models::{
    CalendarResponse, Credentials, IndexQuery, NewTaskForm, StatusForm, SuggestQuery,
    SuggestResponse, TaskList, TaskStatus, TasksResponse,
};
use crate::session::Session;
use crate::state::AppState;
use crate::ui::{render_auth, render_index, AuthView};
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let mut session = state.session.lock().await;
    let message = session.take_message();

    if !session.is_logged_in() {
        let view = AuthView::from_query(query.view.as_deref());
        return Html(render_auth(view, message.as_deref()));
    }

    let calendar = build_calendar(session.range.earliest(), &session.completed_dates);
    Html(render_index(&session, &calendar, &state.emoji, message.as_deref()))
}

pub async fn login(State(state): State<AppState>, Form(credentials): Form<Credentials>) -> Redirect {
    let token = match state.api.login(&credentials).await {
        Ok(token) => token,
        Err(err) => {
            warn!(username = %credentials.username, error = %err, "login failed");
            state.session.lock().await.flash(err.to_string());
            return Redirect::to("/");
        }
    };
    let tasks = state.api.list_tasks(&token).await;

    let mut session = state.session.lock().await;
    info!(username = %credentials.username, "logged in");
    session.login(credentials.username, token);
    match tasks {
        Ok(tasks) => {
            session.load_tasks(tasks, today());
            session.flash("Login successful!");
        }
        Err(err) => report(&mut session, err),
    }

    Redirect::to("/")
}

pub async fn register(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Redirect {
    let result = state.api.register(&credentials).await;
    let mut session = state.session.lock().await;

    match result {
        Ok(()) => {
            info!(username = %credentials.username, "registered");
            session.flash("Registration successful! Please login.");
            Redirect::to("/")
        }
        Err(err) => {
            warn!(username = %credentials.username, error = %err, "registration failed");
            session.flash(err.to_string());
            Redirect::to("/?view=register")
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.logout("Logged out.");
    info!("logged out");
    Redirect::to("/")
}

pub async fn add_task(
    State(state): State<AppState>,
    Form(form): Form<NewTaskForm>,
) -> Result<Redirect, AppError> {
    let list = TaskList::parse(&form.list)
        .ok_or_else(|| AppError::bad_request("list must be 'daily' or 'today'"))?;
    let text = form.text.trim();

    let Some(token) = current_token(&state).await else {
        return Ok(Redirect::to("/"));
    };
    if text.is_empty() {
        return Ok(Redirect::to("/"));
    }

    let result = state.api.create_task(&token, text, list).await;
    settle(&state, &token, result, |session, task| session.add_task(task)).await;
    Ok(Redirect::to("/"))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let status = TaskStatus::parse(&form.status)
        .ok_or_else(|| AppError::bad_request("status must be 'done', 'not_done' or 'pending'"))?;

    let Some(token) = current_token(&state).await else {
        return Ok(Redirect::to("/"));
    };

    let result = state.api.update_status(&token, &id, status).await;
    settle(&state, &token, result, |session, updated| {
        session.apply_status(updated, today())
    })
    .await;
    Ok(Redirect::to("/"))
}

pub async fn move_task(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let (token, task) = {
        let mut session = state.session.lock().await;
        let Some(token) = session.token.clone() else {
            return Redirect::to("/");
        };
        let Some(task) = session.find(&id).cloned() else {
            session.flash("Task not found.");
            return Redirect::to("/");
        };
        (token, task)
    };

    let from = task.list();
    let result = state.api.move_task(&token, &task, from.other()).await;
    settle(&state, &token, result, |session, moved| session.apply_move(from, moved)).await;
    Redirect::to("/")
}

pub async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let Some(token) = current_token(&state).await else {
        return Redirect::to("/");
    };

    let result = state.api.delete_task(&token, &id).await;
    settle(&state, &token, result, |session, ()| session.remove_task(&id)).await;
    Redirect::to("/")
}

pub async fn load_more_history(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.lock().await;
    session.range.load_more();
    info!(earliest = %session.range.earliest(), "extended calendar history");
    Redirect::to("/")
}

pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    Json(state.suggester.suggest(&query.q).into())
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let session = state.session.lock().await;
    let earliest = session.range.earliest();
    Json(CalendarResponse {
        earliest: earliest.to_string(),
        calendar: build_calendar(earliest, &session.completed_dates),
    })
}

pub async fn get_tasks(State(state): State<AppState>) -> Result<Json<TasksResponse>, AppError> {
    let session = state.session.lock().await;
    if !session.is_logged_in() {
        return Err(AppError::unauthorized("not logged in"));
    }

    Ok(Json(TasksResponse {
        daily: session.daily.clone(),
        today: session.today.clone(),
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn current_token(state: &AppState) -> Option<String> {
    state.session.lock().await.token.clone()
}

/// Backend calls run without the session lock held. The result is dropped
/// when the session was logged out or replaced in the meantime.
async fn settle<T>(
    state: &AppState,
    token: &str,
    result: Result<T, ApiError>,
    apply: impl FnOnce(&mut Session, T),
) {
    let mut session = state.session.lock().await;
    if session.token.as_deref() != Some(token) {
        warn!("session changed during a task api call, discarding the result");
        return;
    }

    match result {
        Ok(value) => apply(&mut *session, value),
        Err(err) => report(&mut *session, err),
    }
}

fn report(session: &mut Session, err: ApiError) {
    match err {
        ApiError::Unauthorized => {
            warn!("session expired, logging out");
            session.expire();
        }
        other => {
            warn!(error = %other, "task api call failed");
            session.flash(other.to_string());
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
