use std::time::Duration;

pub const PLACEMENT_TABLE_ENV: &str = "GameSessionPlacementTableName";
pub const MATCHMAKING_REQUEST_TABLE_ENV: &str = "MatchmakingRequestTableName";
pub const STORAGE_TIMEOUT_ENV: &str = "STORAGE_TIMEOUT_MS";
pub const PLAYER_SESSION_CONCURRENCY_ENV: &str = "PLAYER_SESSION_CONCURRENCY";

const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_PLAYER_SESSION_CONCURRENCY: usize = 4;

/// Runtime settings for the placement recorder, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    pub placement_table: String,
    pub matchmaking_request_table: String,
    /// Upper bound for any single DynamoDB call.
    pub storage_timeout: Duration,
    /// How many players are propagated at once.
    pub player_session_concurrency: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} environment variable must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl RecorderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let placement_table = required(PLACEMENT_TABLE_ENV)?;
        let matchmaking_request_table = required(MATCHMAKING_REQUEST_TABLE_ENV)?;

        let storage_timeout_ms = match lookup(STORAGE_TIMEOUT_ENV) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid {
                    key: STORAGE_TIMEOUT_ENV,
                    value,
                })?,
            None => DEFAULT_STORAGE_TIMEOUT_MS,
        };

        let player_session_concurrency = match lookup(PLAYER_SESSION_CONCURRENCY_ENV) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    key: PLAYER_SESSION_CONCURRENCY_ENV,
                    value,
                })?,
            None => DEFAULT_PLAYER_SESSION_CONCURRENCY,
        };

        Ok(RecorderConfig {
            placement_table,
            matchmaking_request_table,
            storage_timeout: Duration::from_millis(storage_timeout_ms),
            player_session_concurrency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_optional_settings_absent() {
        let config = RecorderConfig::from_lookup(lookup_from(&[
            (PLACEMENT_TABLE_ENV, "placements"),
            (MATCHMAKING_REQUEST_TABLE_ENV, "requests"),
        ]))
        .unwrap();

        assert_eq!(config.placement_table, "placements");
        assert_eq!(config.matchmaking_request_table, "requests");
        assert_eq!(config.storage_timeout, Duration::from_millis(5_000));
        assert_eq!(config.player_session_concurrency, 4);
    }

    #[test]
    fn test_optional_settings_override_defaults() {
        let config = RecorderConfig::from_lookup(lookup_from(&[
            (PLACEMENT_TABLE_ENV, "placements"),
            (MATCHMAKING_REQUEST_TABLE_ENV, "requests"),
            (STORAGE_TIMEOUT_ENV, "250"),
            (PLAYER_SESSION_CONCURRENCY_ENV, "1"),
        ]))
        .unwrap();

        assert_eq!(config.storage_timeout, Duration::from_millis(250));
        assert_eq!(config.player_session_concurrency, 1);
    }

    #[test]
    fn test_missing_table_names_are_reported() {
        let result = RecorderConfig::from_lookup(lookup_from(&[(
            MATCHMAKING_REQUEST_TABLE_ENV,
            "requests",
        )]));
        assert_eq!(result, Err(ConfigError::Missing(PLACEMENT_TABLE_ENV)));

        let result = RecorderConfig::from_lookup(lookup_from(&[
            (PLACEMENT_TABLE_ENV, "placements"),
            (MATCHMAKING_REQUEST_TABLE_ENV, "  "),
        ]));
        assert_eq!(
            result,
            Err(ConfigError::Missing(MATCHMAKING_REQUEST_TABLE_ENV))
        );
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let result = RecorderConfig::from_lookup(lookup_from(&[
            (PLACEMENT_TABLE_ENV, "placements"),
            (MATCHMAKING_REQUEST_TABLE_ENV, "requests"),
            (PLAYER_SESSION_CONCURRENCY_ENV, "0"),
        ]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                key: PLAYER_SESSION_CONCURRENCY_ENV,
                value: "0".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_error_names_variable() {
        let message = ConfigError::Missing(PLACEMENT_TABLE_ENV).to_string();
        assert!(message.contains("GameSessionPlacementTableName"));
    }
}
