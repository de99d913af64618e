use crate::api::{ApiClient, ApiError};
use crate::calendar::CalendarRange;
use crate::config::Config;
use crate::emoji::EmojiTable;
use crate::fuzzy::Suggester;
use crate::session::Session;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub suggester: Arc<Suggester>,
    pub emoji: Arc<EmojiTable>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let range = CalendarRange::recent(Local::now().date_naive(), config.history_days);
        Ok(Self {
            api: ApiClient::new(config.api_url.clone(), config.api_timeout)?,
            suggester: Arc::new(config.suggester()),
            emoji: Arc::new(config.emoji.clone()),
            session: Arc::new(Mutex::new(Session::new(range))),
        })
    }
}
