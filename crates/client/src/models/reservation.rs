//! Table reservation payloads.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Wire format for reservation times (`2024-06-01T19:30`).
pub const RESERVATION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Body of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationPayload {
    #[serde(serialize_with = "serialize_minutes")]
    pub time: NaiveDateTime,
    pub party_size: u8,
    pub requests: Option<String>,
}

fn serialize_minutes<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(RESERVATION_TIME_FORMAT))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_time_serialized_without_seconds() {
        let payload = ReservationPayload {
            time: NaiveDateTime::parse_from_str("2024-06-01T19:30", RESERVATION_TIME_FORMAT)
                .unwrap(),
            party_size: 4,
            requests: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["time"], "2024-06-01T19:30");
        assert_eq!(json["party_size"], 4);
        assert!(json["requests"].is_null());
    }
}
