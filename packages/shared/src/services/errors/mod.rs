pub mod placement_service_errors;
pub mod player_session_service_errors;
