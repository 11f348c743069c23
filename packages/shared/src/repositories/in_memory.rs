//! In-memory repositories used to exercise services and the processor without DynamoDB.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::matchmaking_request::MatchmakingRequest;
use crate::models::placement::GameSessionPlacement;
use crate::repositories::errors::matchmaking_request_repository_errors::MatchmakingRequestRepositoryError;
use crate::repositories::errors::placement_repository_errors::PlacementRepositoryError;
use crate::repositories::matchmaking_request_repository::MatchmakingRequestRepository;
use crate::repositories::placement_repository::PlacementRepository;

#[derive(Default)]
pub struct InMemoryPlacementRepository {
    placements: Mutex<HashMap<String, GameSessionPlacement>>,
    writes: AtomicUsize,
    failure: Option<String>,
    failing_placements: HashSet<String>,
    latency: Option<Duration>,
}

impl InMemoryPlacementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails with a DynamoDB error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Writes of `placement_id` fail; other placements are stored normally.
    pub fn failing_for(mut self, placement_id: &str) -> Self {
        self.failing_placements.insert(placement_id.to_string());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn get(&self, placement_id: &str) -> Option<GameSessionPlacement> {
        self.placements.lock().await.get(placement_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.placements.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.placements.lock().await.is_empty()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacementRepository for InMemoryPlacementRepository {
    async fn put_placement(
        &self,
        placement: &GameSessionPlacement,
    ) -> Result<(), PlacementRepositoryError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = &self.failure {
            return Err(PlacementRepositoryError::DynamoDb(message.clone()));
        }
        if self.failing_placements.contains(&placement.placement_id) {
            return Err(PlacementRepositoryError::DynamoDb(format!(
                "put failed for {}",
                placement.placement_id
            )));
        }

        self.placements
            .lock()
            .await
            .insert(placement.placement_id.clone(), placement.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMatchmakingRequestRepository {
    requests: Mutex<Vec<MatchmakingRequest>>,
    updates: AtomicUsize,
    failing_players: HashSet<String>,
    latency: Option<Duration>,
}

impl InMemoryMatchmakingRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requests(requests: Vec<MatchmakingRequest>) -> Self {
        Self {
            requests: Mutex::new(requests),
            ..Self::default()
        }
    }

    /// Lookups for `player_id` fail with a DynamoDB error.
    pub fn failing_for(mut self, player_id: &str) -> Self {
        self.failing_players.insert(player_id.to_string());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// All requests of a player, newest first.
    pub async fn requests_for(&self, player_id: &str) -> Vec<MatchmakingRequest> {
        let mut requests: Vec<MatchmakingRequest> = self
            .requests
            .lock()
            .await
            .iter()
            .filter(|request| request.player_id == player_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        requests
    }

    pub async fn len(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.requests.lock().await.is_empty()
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MatchmakingRequestRepository for InMemoryMatchmakingRequestRepository {
    async fn find_latest_request(
        &self,
        player_id: &str,
    ) -> Result<Option<MatchmakingRequest>, MatchmakingRequestRepositoryError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing_players.contains(player_id) {
            return Err(MatchmakingRequestRepositoryError::DynamoDb(format!(
                "query failed for {}",
                player_id
            )));
        }

        Ok(self
            .requests
            .lock()
            .await
            .iter()
            .filter(|request| request.player_id == player_id)
            .max_by_key(|request| request.start_time)
            .cloned())
    }

    async fn set_player_session_id(
        &self,
        request: &MatchmakingRequest,
        player_session_id: &str,
    ) -> Result<(), MatchmakingRequestRepositoryError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut requests = self.requests.lock().await;
        let row = requests
            .iter_mut()
            .find(|row| row.player_id == request.player_id && row.start_time == request.start_time)
            .ok_or(MatchmakingRequestRepositoryError::NotFound)?;

        row.player_session_id = Some(player_session_id.to_string());
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
