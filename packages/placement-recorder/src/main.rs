use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::info;

mod processor;

use processor::PlacementEventProcessor;
use shared::{
    config::RecorderConfig,
    models::events::SnsEnvelope,
    repositories::{
        matchmaking_request_repository::DynamoDbMatchmakingRequestRepository,
        placement_repository::DynamoDbPlacementRepository,
    },
    services::{placement_service::PlacementService, player_session_service::PlayerSessionService},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = RecorderConfig::from_env()?;
    info!(
        "Placement recorder starting (placements: {}, matchmaking requests: {})",
        config.placement_table, config.matchmaking_request_table
    );

    // Set up AWS configuration and repositories
    let aws_config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&aws_config);

    let placement_repository = Arc::new(DynamoDbPlacementRepository::new(
        client.clone(),
        &config.placement_table,
    ));
    let matchmaking_request_repository = Arc::new(DynamoDbMatchmakingRequestRepository::new(
        client,
        &config.matchmaking_request_table,
    ));

    let processor = PlacementEventProcessor::new(
        PlacementService::new(placement_repository, config.storage_timeout),
        PlayerSessionService::new(matchmaking_request_repository, config.storage_timeout),
        config.player_session_concurrency,
    );

    // Run the Lambda function
    run(service_fn(move |event: LambdaEvent<SnsEnvelope>| {
        let processor = processor.clone();
        async move {
            processor
                .process_event(event.payload)
                .await
                .map_err(Error::from)
        }
    }))
    .await
}
