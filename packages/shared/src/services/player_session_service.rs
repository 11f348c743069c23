use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::{
    models::matchmaking_request::MatchmakingRequest,
    repositories::errors::matchmaking_request_repository_errors::MatchmakingRequestRepositoryError,
    repositories::matchmaking_request_repository::MatchmakingRequestRepository,
    services::errors::player_session_service_errors::PlayerSessionServiceError,
};

/// Copies the player session id assigned by a placement onto the player's
/// latest matchmaking request, so result polling can join the two.
#[derive(Clone)]
pub struct PlayerSessionService {
    repository: Arc<dyn MatchmakingRequestRepository + Send + Sync>,
    timeout: Duration,
}

impl PlayerSessionService {
    pub fn new(
        repository: Arc<dyn MatchmakingRequestRepository + Send + Sync>,
        timeout: Duration,
    ) -> Self {
        PlayerSessionService {
            repository,
            timeout,
        }
    }

    pub async fn update_player_session_id(
        &self,
        player_id: &str,
        player_session_id: &str,
    ) -> Result<MatchmakingRequest, PlayerSessionServiceError> {
        if player_id.is_empty() {
            return Err(PlayerSessionServiceError::ValidationError(
                "Player ID cannot be empty".to_string(),
            ));
        }
        if player_session_id.is_empty() {
            return Err(PlayerSessionServiceError::ValidationError(format!(
                "Player session ID for player {} cannot be empty",
                player_id
            )));
        }

        let mut latest = self
            .bounded(self.repository.find_latest_request(player_id))
            .await?
            .ok_or_else(|| PlayerSessionServiceError::RequestNotFound(player_id.to_string()))?;
        debug!(
            "Latest matchmaking request for {} started at {}",
            player_id, latest.start_time
        );

        self.bounded(
            self.repository
                .set_player_session_id(&latest, player_session_id),
        )
        .await
        .map_err(|e| match e {
            PlayerSessionServiceError::RepositoryError(
                MatchmakingRequestRepositoryError::NotFound,
            ) => PlayerSessionServiceError::RequestNotFound(player_id.to_string()),
            other => other,
        })?;

        info!(
            "Set player session {} on matchmaking request {}@{}",
            player_session_id, latest.player_id, latest.start_time
        );
        latest.player_session_id = Some(player_session_id.to_string());
        Ok(latest)
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, MatchmakingRequestRepositoryError>>,
    ) -> Result<T, PlayerSessionServiceError> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| PlayerSessionServiceError::Timeout(self.timeout))?
            .map_err(PlayerSessionServiceError::from)
    }
}
