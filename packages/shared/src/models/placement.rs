use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::events::PlacementDetail;

/// How long a placement record lives before the table's TTL evicts it.
pub const DEFAULT_TTL_SECONDS: i64 = 10 * 60;

/// Placement outcome as reported by the GameLift queue (`detail.type`).
/// Unrecognised values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlacementStatus {
    Fulfilled,
    Cancelled,
    TimedOut,
    Failed,
    Other(String),
}

impl PlacementStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PlacementStatus::Fulfilled => "PlacementFulfilled",
            PlacementStatus::Cancelled => "PlacementCancelled",
            PlacementStatus::TimedOut => "PlacementTimedOut",
            PlacementStatus::Failed => "PlacementFailed",
            PlacementStatus::Other(status) => status,
        }
    }
}

impl From<String> for PlacementStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "PlacementFulfilled" => PlacementStatus::Fulfilled,
            "PlacementCancelled" => PlacementStatus::Cancelled,
            "PlacementTimedOut" => PlacementStatus::TimedOut,
            "PlacementFailed" => PlacementStatus::Failed,
            _ => PlacementStatus::Other(status),
        }
    }
}

impl From<PlacementStatus> for String {
    fn from(status: PlacementStatus) -> Self {
        match status {
            PlacementStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the game session placement table, looked up by clients polling
/// for their match result. PK: `PlacementId`.
///
/// `ExpirationTime` is the table's TTL attribute. Eviction is done by DynamoDB,
/// nothing in this crate deletes placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameSessionPlacement {
    pub placement_id: String,
    pub status: PlacementStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_arn: Option<String>,
    pub expiration_time: i64,
}

impl GameSessionPlacement {
    pub fn from_detail(detail: &PlacementDetail, received_at: DateTime<Utc>) -> Self {
        GameSessionPlacement {
            placement_id: detail.placement_id.clone(),
            status: detail.status.clone(),
            ip_address: detail.ip_address.clone(),
            dns_name: detail.dns_name.clone(),
            port: detail.port,
            game_session_arn: detail.game_session_arn.clone(),
            expiration_time: received_at.timestamp() + DEFAULT_TTL_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fulfilled_detail() -> PlacementDetail {
        serde_json::from_value(serde_json::json!({
            "type": "PlacementFulfilled",
            "placementId": "placement-1",
            "ipAddress": "10.0.0.1",
            "dnsName": "ec2-10-0-0-1.compute.amazonaws.com",
            "port": 7777,
            "gameSessionArn": "arn:aws:gamelift:us-west-2::gamesession/fleet-1/gs-1"
        }))
        .unwrap()
    }

    #[test]
    fn test_from_detail_copies_fields() {
        let received_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let placement = GameSessionPlacement::from_detail(&fulfilled_detail(), received_at);

        assert_eq!(placement.placement_id, "placement-1");
        assert_eq!(placement.status, PlacementStatus::Fulfilled);
        assert_eq!(placement.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(
            placement.dns_name.as_deref(),
            Some("ec2-10-0-0-1.compute.amazonaws.com")
        );
        assert_eq!(placement.port, Some(7777));
        assert_eq!(
            placement.game_session_arn.as_deref(),
            Some("arn:aws:gamelift:us-west-2::gamesession/fleet-1/gs-1")
        );
        assert_eq!(placement.expiration_time, 1_700_000_600);
    }

    #[test]
    fn test_status_round_trips_unknown_values() {
        let status = PlacementStatus::from("PlacementSomethingNew".to_string());
        assert_eq!(status, PlacementStatus::Other("PlacementSomethingNew".to_string()));

        let serialized = serde_json::to_string(&status).unwrap();
        assert_eq!(serialized, "\"PlacementSomethingNew\"");
    }

    #[test]
    fn test_known_status_serializes_as_gamelift_name() {
        assert_eq!(
            serde_json::to_string(&PlacementStatus::TimedOut).unwrap(),
            "\"PlacementTimedOut\""
        );
        assert_eq!(PlacementStatus::Cancelled.to_string(), "PlacementCancelled");
    }

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let detail: PlacementDetail = serde_json::from_value(serde_json::json!({
            "type": "PlacementTimedOut",
            "placementId": "placement-2"
        }))
        .unwrap();
        let placement = GameSessionPlacement::from_detail(&detail, Utc::now());

        let value = serde_json::to_value(&placement).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["PlacementId"], "placement-2");
        assert_eq!(object["Status"], "PlacementTimedOut");
        assert!(object.contains_key("ExpirationTime"));
        assert!(!object.contains_key("IpAddress"));
        assert!(!object.contains_key("Port"));
        assert!(!object.contains_key("GameSessionArn"));
    }
}
