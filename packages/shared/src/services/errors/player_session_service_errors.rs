use std::time::Duration;

use crate::repositories::errors::matchmaking_request_repository_errors::MatchmakingRequestRepositoryError;

#[derive(Debug)]
pub enum PlayerSessionServiceError {
    RequestNotFound(String),
    ValidationError(String),
    RepositoryError(MatchmakingRequestRepositoryError),
    Timeout(Duration),
}

impl std::fmt::Display for PlayerSessionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerSessionServiceError::RequestNotFound(player_id) => {
                write!(f, "No matchmaking request found for player {}", player_id)
            }
            PlayerSessionServiceError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            PlayerSessionServiceError::RepositoryError(err) => {
                write!(f, "Repository error: {}", err)
            }
            PlayerSessionServiceError::Timeout(limit) => {
                write!(f, "Matchmaking request operation timed out after {:?}", limit)
            }
        }
    }
}

impl std::error::Error for PlayerSessionServiceError {}

impl From<MatchmakingRequestRepositoryError> for PlayerSessionServiceError {
    fn from(err: MatchmakingRequestRepositoryError) -> Self {
        PlayerSessionServiceError::RepositoryError(err)
    }
}
