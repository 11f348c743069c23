use crate::models::matchmaking_request::MatchmakingRequest;
use crate::repositories::errors::matchmaking_request_repository_errors::MatchmakingRequestRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::from_item;

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbMatchmakingRequestRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbMatchmakingRequestRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MatchmakingRequestRepository: Send + Sync {
    /// Returns the player's request with the greatest start time, if any.
    async fn find_latest_request(
        &self,
        player_id: &str,
    ) -> Result<Option<MatchmakingRequest>, MatchmakingRequestRepositoryError>;

    /// Sets `PlayerSessionId` on the row addressed by the request's own
    /// (`PlayerId`, `StartTime`) key. Never creates a row.
    async fn set_player_session_id(
        &self,
        request: &MatchmakingRequest,
        player_session_id: &str,
    ) -> Result<(), MatchmakingRequestRepositoryError>;
}

#[async_trait]
impl MatchmakingRequestRepository for DynamoDbMatchmakingRequestRepository {
    async fn find_latest_request(
        &self,
        player_id: &str,
    ) -> Result<Option<MatchmakingRequest>, MatchmakingRequestRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PlayerId = :player_id")
            .expression_attribute_values(":player_id", AttributeValue::S(player_id.to_string()))
            .scan_index_forward(false)
            .limit(1)
            .send()
            .await
            .map_err(|e| MatchmakingRequestRepositoryError::DynamoDb(e.to_string()))?;

        match output.items.and_then(|items| items.into_iter().next()) {
            Some(item) => {
                let request: MatchmakingRequest = from_item(item).map_err(|e| {
                    MatchmakingRequestRepositoryError::Serialization(e.to_string())
                })?;
                Ok(Some(request))
            }
            None => Ok(None),
        }
    }

    async fn set_player_session_id(
        &self,
        request: &MatchmakingRequest,
        player_session_id: &str,
    ) -> Result<(), MatchmakingRequestRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PlayerId", AttributeValue::S(request.player_id.clone()))
            .key(
                "StartTime",
                AttributeValue::N(request.start_time.to_string()),
            )
            .update_expression("SET PlayerSessionId = :player_session_id")
            .condition_expression("attribute_exists(PlayerId)")
            .expression_attribute_values(
                ":player_session_id",
                AttributeValue::S(player_session_id.to_string()),
            )
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                // The row disappeared between the query and the update
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(MatchmakingRequestRepositoryError::NotFound);
                    }
                }
                Err(MatchmakingRequestRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }
}
