use crate::calendar::{DEFAULT_HISTORY_DAYS, MAX_HISTORY_DAYS};
use crate::emoji::EmojiTable;
use crate::fuzzy::{Suggester, DEFAULT_THRESHOLD};
use std::{env, net::SocketAddr, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SUGGESTIONS: [&str; 7] =
    ["Gym", "Study", "Groceries", "Work", "Meeting", "Read", "Clean"];

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub api_timeout: Duration,
    pub history_days: i64,
    pub suggest_threshold: f64,
    pub suggestions: Vec<String>,
    pub emoji: EmojiTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            history_days: DEFAULT_HISTORY_DAYS,
            suggest_threshold: DEFAULT_THRESHOLD,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            emoji: EmojiTable::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`; missing or invalid values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            api_url: lookup("TODO_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            api_timeout: parse_var(&lookup, "TODO_API_TIMEOUT_SECS")
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.api_timeout),
            history_days: parse_var(&lookup, "TODO_HISTORY_DAYS")
                .filter(|days: &i64| (0..=MAX_HISTORY_DAYS).contains(days))
                .unwrap_or(defaults.history_days),
            suggest_threshold: parse_var(&lookup, "TODO_SUGGEST_THRESHOLD")
                .filter(|value: &f64| (0.0..=1.0).contains(value))
                .unwrap_or(defaults.suggest_threshold),
            suggestions: lookup("TODO_SUGGESTIONS")
                .map(|raw| parse_list(&raw))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.suggestions),
            emoji: defaults.emoji,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn suggester(&self) -> Suggester {
        Suggester::new(self.suggestions.clone(), self.suggest_threshold)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid {name}={raw}");
            None
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn parse_list_skips_blanks() {
        assert_eq!(parse_list(" Yoga, ,Piano ,"), vec!["Yoga", "Piano"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn defaults_match_suggestion_policy() {
        let config = config_with(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.suggestions.len(), 7);
        assert_eq!(config.suggest_threshold, 0.6);
        assert_eq!(config.api_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = config_with(&[
            ("PORT", "9000"),
            ("TODO_API_URL", "http://tasks.local"),
            ("TODO_API_TIMEOUT_SECS", "2"),
            ("TODO_HISTORY_DAYS", "30"),
            ("TODO_SUGGESTIONS", "Yoga,Piano"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_url, "http://tasks.local");
        assert_eq!(config.api_timeout, Duration::from_secs(2));
        assert_eq!(config.history_days, 30);
        assert_eq!(config.suggestions, vec!["Yoga", "Piano"]);
    }

    #[test]
    fn out_of_range_values_fall_back() {
        let config = config_with(&[
            ("PORT", "not-a-port"),
            ("TODO_API_TIMEOUT_SECS", "0"),
            ("TODO_HISTORY_DAYS", "100000000"),
            ("TODO_SUGGEST_THRESHOLD", "1.5"),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_timeout, Duration::from_secs(DEFAULT_API_TIMEOUT_SECS));
        assert_eq!(config.history_days, DEFAULT_HISTORY_DAYS);
        assert_eq!(config.suggest_threshold, DEFAULT_THRESHOLD);

        let negative = config_with(&[("TODO_HISTORY_DAYS", "-5")]);
        assert_eq!(negative.history_days, DEFAULT_HISTORY_DAYS);
    }
}
