pub mod events;
pub mod matchmaking_request;
pub mod placement;
