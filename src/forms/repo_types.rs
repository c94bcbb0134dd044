use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::forms::datetime;

pub const FULL_NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 150;
pub const LOCATION_MAX: usize = 200;
pub const CAR_TYPE_MAX: usize = 50;

/// Booking form row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FormDetails {
    pub id: i64,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    #[sqlx(rename = "pickup_datetime")]
    #[serde(with = "datetime::booking")]
    pub pickup_date_time: PrimitiveDateTime,
    #[sqlx(rename = "return_datetime")]
    #[serde(default, with = "datetime::booking::option")]
    pub return_date_time: Option<PrimitiveDateTime>,
    pub car_type: Option<String>,
    #[serde(with = "datetime::created")]
    pub created_at: PrimitiveDateTime,
}

/// Validated insert payload. `created_at` is always set by the time it
/// reaches a store.
#[derive(Debug, Clone)]
pub struct NewFormDetails {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub pickup_date_time: PrimitiveDateTime,
    pub return_date_time: Option<PrimitiveDateTime>,
    pub car_type: Option<String>,
    pub created_at: PrimitiveDateTime,
}

/// Server clock as an offset-less value, truncated to the microsecond
/// precision of a Postgres `TIMESTAMP`.
pub fn server_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    let now = now
        .replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now);
    PrimitiveDateTime::new(now.date(), now.time())
}
