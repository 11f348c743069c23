use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    models::{events::PlacementDetail, placement::GameSessionPlacement},
    repositories::placement_repository::PlacementRepository,
    services::errors::placement_service_errors::PlacementServiceError,
};

#[derive(Clone)]
pub struct PlacementService {
    repository: Arc<dyn PlacementRepository + Send + Sync>,
    timeout: Duration,
}

impl PlacementService {
    pub fn new(repository: Arc<dyn PlacementRepository + Send + Sync>, timeout: Duration) -> Self {
        PlacementService {
            repository,
            timeout,
        }
    }

    /// Builds the placement row for `detail` and upserts it. The row expires
    /// `DEFAULT_TTL_SECONDS` after `received_at`.
    pub async fn record_placement(
        &self,
        detail: &PlacementDetail,
        received_at: DateTime<Utc>,
    ) -> Result<GameSessionPlacement, PlacementServiceError> {
        let placement = GameSessionPlacement::from_detail(detail, received_at);
        debug!("Writing placement record: {:?}", placement);

        tokio::time::timeout(self.timeout, self.repository.put_placement(&placement))
            .await
            .map_err(|_| PlacementServiceError::Timeout(self.timeout))??;

        info!(
            "Recorded placement {} with status {} (expires at {})",
            placement.placement_id, placement.status, placement.expiration_time
        );
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::placement::PlacementStatus;
    use crate::repositories::errors::placement_repository_errors::PlacementRepositoryError;
    use crate::repositories::in_memory::InMemoryPlacementRepository;
    use crate::repositories::placement_repository::MockPlacementRepository;
    use chrono::TimeZone;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn detail(placement_id: &str) -> PlacementDetail {
        serde_json::from_value(serde_json::json!({
            "type": "PlacementFulfilled",
            "placementId": placement_id,
            "ipAddress": "10.0.0.1",
            "port": "7777"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_placement_writes_once() {
        let mut mock_repo = MockPlacementRepository::new();
        mock_repo
            .expect_put_placement()
            .withf(|placement| {
                placement.placement_id == "placement-1"
                    && placement.status == PlacementStatus::Fulfilled
                    && placement.expiration_time == 1_000_600
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = PlacementService::new(Arc::new(mock_repo), TIMEOUT);
        let received_at = Utc.timestamp_opt(1_000_000, 0).unwrap();

        let placement = service
            .record_placement(&detail("placement-1"), received_at)
            .await
            .unwrap();

        assert_eq!(placement.port, Some(7777));
    }

    #[tokio::test]
    async fn test_record_placement_surfaces_repository_error() {
        let mut mock_repo = MockPlacementRepository::new();
        mock_repo
            .expect_put_placement()
            .returning(|_| Err(PlacementRepositoryError::DynamoDb("throttled".to_string())));

        let service = PlacementService::new(Arc::new(mock_repo), TIMEOUT);

        let result = service
            .record_placement(&detail("placement-1"), Utc::now())
            .await;

        assert!(matches!(
            result,
            Err(PlacementServiceError::RepositoryError(
                PlacementRepositoryError::DynamoDb(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_recording_twice_is_idempotent() {
        let repository = Arc::new(InMemoryPlacementRepository::new());
        let service = PlacementService::new(repository.clone(), TIMEOUT);
        let received_at = Utc.timestamp_opt(1_000_000, 0).unwrap();

        let first = service
            .record_placement(&detail("placement-1"), received_at)
            .await
            .unwrap();
        let second = service
            .record_placement(&detail("placement-1"), received_at)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(repository.len().await, 1);
        assert_eq!(repository.get("placement-1").await, Some(first));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_write_times_out() {
        let repository =
            Arc::new(InMemoryPlacementRepository::new().with_latency(Duration::from_secs(30)));
        let service = PlacementService::new(repository.clone(), Duration::from_secs(1));

        let result = service
            .record_placement(&detail("placement-1"), Utc::now())
            .await;

        assert!(matches!(result, Err(PlacementServiceError::Timeout(_))));
        assert!(repository.is_empty().await);
    }
}
