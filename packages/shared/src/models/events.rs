use serde::{Deserialize, Deserializer};

use crate::models::placement::PlacementStatus;

/// Lambda payload delivered by SNS. Only the fields the recorder reads are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsMessage {
    #[serde(rename = "Message")]
    pub message: String,
}

/// The GameLift queue notification carried as the SNS message body.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementNotification {
    pub detail: PlacementDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDetail {
    #[serde(rename = "type")]
    pub status: PlacementStatus,
    pub placement_id: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub dns_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_port")]
    pub port: Option<u16>,
    #[serde(default)]
    pub game_session_arn: Option<String>,
    #[serde(default)]
    pub placed_player_sessions: Option<Vec<PlacedPlayerSession>>,
}

impl PlacementDetail {
    pub fn player_sessions(&self) -> &[PlacedPlayerSession] {
        self.placed_player_sessions.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlayerSession {
    pub player_id: String,
    pub player_session_id: String,
}

#[derive(Debug)]
pub enum EventError {
    NoRecords,
    InvalidMessage(String),
    MissingField(&'static str),
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::NoRecords => write!(f, "Event contains no records"),
            EventError::InvalidMessage(msg) => write!(f, "Invalid notification message: {}", msg),
            EventError::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

impl std::error::Error for EventError {}

impl SnsEnvelope {
    /// Parses every record's message. Fails on the first malformed one so that
    /// nothing is written for an envelope that cannot be fully understood.
    pub fn notifications(&self) -> Result<Vec<PlacementNotification>, EventError> {
        if self.records.is_empty() {
            return Err(EventError::NoRecords);
        }

        self.records
            .iter()
            .map(|record| PlacementNotification::from_message(&record.sns.message))
            .collect()
    }
}

impl PlacementNotification {
    pub fn from_message(message: &str) -> Result<Self, EventError> {
        let notification: PlacementNotification =
            serde_json::from_str(message).map_err(|e| EventError::InvalidMessage(e.to_string()))?;
        notification.validate()?;
        Ok(notification)
    }

    fn validate(&self) -> Result<(), EventError> {
        if self.detail.status.as_str().is_empty() {
            return Err(EventError::MissingField("detail.type"));
        }
        if self.detail.placement_id.is_empty() {
            return Err(EventError::MissingField("detail.placementId"));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

// GameLift sends the port as a string; accept a plain number as well.
fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PortValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PortValue::Number(port)) => Ok(Some(port)),
        Some(PortValue::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(PortValue::Text(text)) => text
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid port: {}", text))),
    }
}
