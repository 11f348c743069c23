use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use shared::models::events::{EventError, PlacedPlayerSession, PlacementDetail, SnsEnvelope};
use shared::services::errors::placement_service_errors::PlacementServiceError;
use shared::services::errors::player_session_service_errors::PlayerSessionServiceError;
use shared::services::placement_service::PlacementService;
use shared::services::player_session_service::PlayerSessionService;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub struct PlayerSessionFailure {
    pub player_id: String,
    pub error: PlayerSessionServiceError,
}

#[derive(Debug)]
pub enum ProcessorError {
    MalformedEvent(EventError),
    /// A placement write failed. Player failures from records handled
    /// before it are carried along.
    Placement {
        error: PlacementServiceError,
        player_failures: Vec<PlayerSessionFailure>,
    },
    PlayerSessions(Vec<PlayerSessionFailure>),
}

fn write_player_failures(
    f: &mut std::fmt::Formatter<'_>,
    failures: &[PlayerSessionFailure],
) -> std::fmt::Result {
    write!(
        f,
        "Failed to update player session for {} player(s):",
        failures.len()
    )?;
    for failure in failures {
        write!(f, " [{}: {}]", failure.player_id, failure.error)?;
    }
    Ok(())
}

impl std::fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessorError::MalformedEvent(err) => write!(f, "Malformed event: {}", err),
            ProcessorError::Placement {
                error,
                player_failures,
            } => {
                write!(f, "Failed to record placement: {}", error)?;
                if !player_failures.is_empty() {
                    write!(f, "; ")?;
                    write_player_failures(f, player_failures)?;
                }
                Ok(())
            }
            ProcessorError::PlayerSessions(failures) => write_player_failures(f, failures),
        }
    }
}

impl std::error::Error for ProcessorError {}

impl From<EventError> for ProcessorError {
    fn from(err: EventError) -> Self {
        ProcessorError::MalformedEvent(err)
    }
}

#[derive(Clone)]
pub struct PlacementEventProcessor {
    placement_service: PlacementService,
    player_session_service: PlayerSessionService,
    concurrency: usize,
}

impl PlacementEventProcessor {
    pub fn new(
        placement_service: PlacementService,
        player_session_service: PlayerSessionService,
        concurrency: usize,
    ) -> Self {
        Self {
            placement_service,
            player_session_service,
            concurrency: concurrency.max(1),
        }
    }

    /// Records every placement notification in the envelope and propagates the
    /// placed player sessions. A player whose propagation fails does not stop
    /// the others; all such failures are returned together once every player
    /// has been attempted.
    pub async fn process_event(&self, event: SnsEnvelope) -> Result<(), ProcessorError> {
        let received_at = Utc::now();

        if event.records.len() != 1 {
            warn!(
                "Unexpected batch size: expected 1 record, got {}",
                event.records.len()
            );
        }

        let notifications = event.notifications().map_err(|e| {
            error!("Rejecting malformed placement event: {}", e);
            ProcessorError::from(e)
        })?;

        let mut failures = Vec::new();
        for notification in notifications {
            match self
                .process_placement(&notification.detail, received_at)
                .await
            {
                Ok(player_failures) => failures.extend(player_failures),
                Err(error) => {
                    error!(
                        "Failed to record placement {}: {}",
                        notification.detail.placement_id, error
                    );
                    return Err(ProcessorError::Placement {
                        error,
                        player_failures: failures,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ProcessorError::PlayerSessions(failures))
        }
    }

    async fn process_placement(
        &self,
        detail: &PlacementDetail,
        received_at: DateTime<Utc>,
    ) -> Result<Vec<PlayerSessionFailure>, PlacementServiceError> {
        info!(
            "Handling game session event. StartTime: {}. Placement: {} ({})",
            received_at.timestamp(),
            detail.placement_id,
            detail.status
        );

        self.placement_service
            .record_placement(detail, received_at)
            .await?;

        let player_sessions = detail.player_sessions();
        if player_sessions.is_empty() {
            debug!("No placed player sessions for {}", detail.placement_id);
            return Ok(Vec::new());
        }

        let failures: Vec<PlayerSessionFailure> = stream::iter(player_sessions)
            .map(|session| self.propagate(session))
            .buffer_unordered(self.concurrency)
            .filter_map(|result| futures::future::ready(result.err()))
            .collect()
            .await;

        info!(
            "Propagated {} of {} player session(s) for placement {}",
            player_sessions.len() - failures.len(),
            player_sessions.len(),
            detail.placement_id
        );

        Ok(failures)
    }

    async fn propagate(&self, session: &PlacedPlayerSession) -> Result<(), PlayerSessionFailure> {
        match self
            .player_session_service
            .update_player_session_id(&session.player_id, &session.player_session_id)
            .await
        {
            Ok(_) => Ok(()),
            Err(PlayerSessionServiceError::RequestNotFound(player_id)) => {
                warn!("No matchmaking request found for player {}", player_id);
                Err(PlayerSessionFailure {
                    player_id: session.player_id.clone(),
                    error: PlayerSessionServiceError::RequestNotFound(player_id),
                })
            }
            Err(e) => {
                error!(
                    "Failed to update player session for {}: {}",
                    session.player_id, e
                );
                Err(PlayerSessionFailure {
                    player_id: session.player_id.clone(),
                    error: e,
                })
            }
        }
    }
}
