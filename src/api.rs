use crate::models::{
    BackendMessage, Credentials, LoginResponse, NewTask, StatusUpdate, Task, TaskList, TaskStatus,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const SESSION_EXPIRED: &str = "Unauthorized or session expired. Please log in again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", SESSION_EXPIRED)]
    Unauthorized,

    #[error("{0}")]
    Rejected(String),

    #[error("Network error or server unavailable.")]
    Transport(#[from] reqwest::Error),
}

/// Client for the remote task store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Every request, including the response body, must finish within `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(credentials)
            .send()
            .await?;
        expect_success(response, "Error during register.").await?;
        Ok(())
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(credentials)
            .send()
            .await?;
        let body: LoginResponse = read_json(response, "Error during login.").await?;
        Ok(body.access_token)
    }

    pub async fn list_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        let response = self.send(self.authed(Method::GET, "/tasks", token)).await?;
        read_json(response, "Failed to fetch tasks.").await
    }

    pub async fn create_task(
        &self,
        token: &str,
        text: &str,
        list: TaskList,
    ) -> Result<Task, ApiError> {
        let body = NewTask {
            text,
            is_daily: list.is_daily(),
            status: TaskStatus::Pending,
        };
        let request = self.authed(Method::POST, "/tasks", token).json(&body);
        let response = self.send(request).await?;
        read_json(response, "Failed to add task.").await
    }

    pub async fn update_status(
        &self,
        token: &str,
        id: &str,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let request = self
            .authed(Method::PUT, &task_path(id), token)
            .json(&StatusUpdate { status });
        let response = self.send(request).await?;
        read_json(response, "Failed to update task.").await
    }

    /// Moving resets the task to pending.
    pub async fn move_task(&self, token: &str, task: &Task, to: TaskList) -> Result<Task, ApiError> {
        let moved = Task {
            is_daily: to.is_daily(),
            status: TaskStatus::Pending,
            ..task.clone()
        };
        let request = self
            .authed(Method::PUT, &task_path(&task.id), token)
            .json(&moved);
        let response = self.send(request).await?;
        read_json(response, "Failed to move task.").await
    }

    pub async fn delete_task(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let response = self
            .send(self.authed(Method::DELETE, &task_path(id), token))
            .await?;
        expect_success(response, "Failed to delete task.").await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).bearer_auth(token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        debug!(status = %response.status(), url = %response.url(), "task api response");
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            warn!("task api rejected the session token");
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }
}

fn task_path(id: &str) -> String {
    format!("/tasks/{}", urlencoding::encode(id))
}

async fn expect_success(response: Response, fallback: &str) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let message = response
        .json::<BackendMessage>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(ApiError::Rejected(message))
}

async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ApiError> {
    let response = expect_success(response, fallback).await?;
    Ok(response.json().await?)
}
