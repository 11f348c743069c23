#[derive(Debug)]
pub enum PlacementRepositoryError {
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for PlacementRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            PlacementRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for PlacementRepositoryError {}
