use serde::{Deserialize, Serialize};

/// A player's request to be matched, written by the matchmaking start flow.
/// PK: `PlayerId`, SK: `StartTime` (epoch seconds). The newest row for a player
/// is the one with the greatest `StartTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchmakingRequest {
    pub player_id: String,
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_session_id: Option<String>,
}

impl MatchmakingRequest {
    pub fn new(player_id: &str, start_time: i64) -> Self {
        MatchmakingRequest {
            player_id: player_id.to_string(),
            start_time,
            player_session_id: None,
        }
    }
}
