use std::time::Duration;

use crate::repositories::errors::placement_repository_errors::PlacementRepositoryError;

#[derive(Debug)]
pub enum PlacementServiceError {
    RepositoryError(PlacementRepositoryError),
    Timeout(Duration),
}

impl std::fmt::Display for PlacementServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementServiceError::RepositoryError(err) => {
                write!(f, "Repository error: {}", err)
            }
            PlacementServiceError::Timeout(limit) => {
                write!(f, "Placement write timed out after {:?}", limit)
            }
        }
    }
}

impl std::error::Error for PlacementServiceError {}

impl From<PlacementRepositoryError> for PlacementServiceError {
    fn from(err: PlacementRepositoryError) -> Self {
        PlacementServiceError::RepositoryError(err)
    }
}
