#[derive(Debug)]
pub enum MatchmakingRequestRepositoryError {
    NotFound,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for MatchmakingRequestRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchmakingRequestRepositoryError::NotFound => {
                write!(f, "MatchmakingRequest not found")
            }
            MatchmakingRequestRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            MatchmakingRequestRepositoryError::DynamoDb(msg) => {
                write!(f, "DynamoDB error: {}", msg)
            }
        }
    }
}

impl std::error::Error for MatchmakingRequestRepositoryError {}
