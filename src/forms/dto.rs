use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::forms::datetime;

/// Body of `POST /api/forms/book`. Required fields are optional here so a
/// missing one becomes a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default, with = "datetime::booking::option")]
    pub pickup_date_time: Option<PrimitiveDateTime>,
    #[serde(default, with = "datetime::booking::option")]
    pub return_date_time: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub car_type: Option<String>,
    #[serde(default, with = "datetime::created::option")]
    pub created_at: Option<PrimitiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn minimal_booking_parses() {
        let req: BookingRequest = serde_json::from_str(
            r#"{"pickupLocation":"Airport","pickupDateTime":"2025-03-01T09:30:00"}"#,
        )
        .unwrap();
        assert_eq!(req.pickup_location.as_deref(), Some("Airport"));
        assert_eq!(req.pickup_date_time, Some(datetime!(2025-03-01 09:30:00)));
        assert!(req.created_at.is_none());
        assert!(req.car_type.is_none());
    }

    #[test]
    fn full_booking_parses() {
        let req: BookingRequest = serde_json::from_str(
            r#"{
                "fullName": "Ana Lima",
                "email": "a@b.com",
                "pickupLocation": "Airport",
                "dropoffLocation": "Hotel",
                "pickupDateTime": "2025-03-01T09:30:00",
                "returnDateTime": "2025-03-04T18:00:00",
                "carType": "SUV",
                "createdAt": null
            }"#,
        )
        .unwrap();
        assert_eq!(req.full_name.as_deref(), Some("Ana Lima"));
        assert_eq!(req.return_date_time, Some(datetime!(2025-03-04 18:00:00)));
        assert!(req.created_at.is_none());
    }
}
