pub mod errors;
#[cfg(any(test, feature = "test-util"))]
pub mod in_memory;
pub mod matchmaking_request_repository;
pub mod placement_repository;
