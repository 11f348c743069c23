pub mod matchmaking_request_repository_errors;
pub mod placement_repository_errors;
