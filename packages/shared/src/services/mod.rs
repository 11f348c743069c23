pub mod errors;
pub mod placement_service;
pub mod player_session_service;
