use crate::models::placement::GameSessionPlacement;
use crate::repositories::errors::placement_repository_errors::PlacementRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbPlacementRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbPlacementRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlacementRepository: Send + Sync {
    /// Unconditional upsert keyed by placement id.
    async fn put_placement(
        &self,
        placement: &GameSessionPlacement,
    ) -> Result<(), PlacementRepositoryError>;
}

#[async_trait]
impl PlacementRepository for DynamoDbPlacementRepository {
    async fn put_placement(
        &self,
        placement: &GameSessionPlacement,
    ) -> Result<(), PlacementRepositoryError> {
        let item = to_item(placement)
            .map_err(|e| PlacementRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| PlacementRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }
}
