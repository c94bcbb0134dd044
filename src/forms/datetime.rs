//! Serde adapters for the offset-less date-times used by booking forms.

use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

/// `yyyy-MM-dd'T'HH:mm:ss`, the format the booking form sends.
const BOOKING: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Same with an optional fraction; always written with one.
const CREATED: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

fn write<S: serde::Serializer>(
    value: &PrimitiveDateTime,
    format: &[FormatItem<'_>],
    s: S,
) -> Result<S::Ok, S::Error> {
    let text = value.format(format).map_err(serde::ser::Error::custom)?;
    s.serialize_str(&text)
}

fn read<'de, D: serde::Deserializer<'de>>(
    format: &[FormatItem<'_>],
    d: D,
) -> Result<PrimitiveDateTime, D::Error> {
    let text = <String as serde::Deserialize>::deserialize(d)?;
    PrimitiveDateTime::parse(&text, format).map_err(serde::de::Error::custom)
}

fn read_opt<'de, D: serde::Deserializer<'de>>(
    format: &[FormatItem<'_>],
    d: D,
) -> Result<Option<PrimitiveDateTime>, D::Error> {
    match <Option<String> as serde::Deserialize>::deserialize(d)? {
        Some(text) => PrimitiveDateTime::parse(&text, format)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn write_opt<S: serde::Serializer>(
    value: &Option<PrimitiveDateTime>,
    format: &[FormatItem<'_>],
    s: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => write(v, format, s),
        None => s.serialize_none(),
    }
}

pub mod booking {
    use super::*;

    pub fn serialize<S: serde::Serializer>(v: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        write(v, BOOKING, s)
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<PrimitiveDateTime, D::Error> {
        read(BOOKING, d)
    }

    pub mod option {
        use super::super::*;

        pub fn serialize<S: serde::Serializer>(
            v: &Option<PrimitiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            write_opt(v, BOOKING, s)
        }

        pub fn deserialize<'de, D: serde::Deserializer<'de>>(
            d: D,
        ) -> Result<Option<PrimitiveDateTime>, D::Error> {
            read_opt(BOOKING, d)
        }
    }
}

pub mod created {
    use super::*;

    pub fn serialize<S: serde::Serializer>(v: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        write(v, CREATED, s)
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<PrimitiveDateTime, D::Error> {
        read(CREATED, d)
    }

    pub mod option {
        use super::super::*;

        pub fn serialize<S: serde::Serializer>(
            v: &Option<PrimitiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            write_opt(v, CREATED, s)
        }

        pub fn deserialize<'de, D: serde::Deserializer<'de>>(
            d: D,
        ) -> Result<Option<PrimitiveDateTime>, D::Error> {
            read_opt(CREATED, d)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::macros::datetime;
    use time::PrimitiveDateTime;

    #[derive(Debug, Serialize, Deserialize)]
    struct Probe {
        #[serde(with = "super::booking")]
        at: PrimitiveDateTime,
        #[serde(default, with = "super::created::option")]
        created: Option<PrimitiveDateTime>,
    }

    #[test]
    fn booking_format_has_no_fraction() {
        let probe = Probe {
            at: datetime!(2025-03-01 09:30:00),
            created: None,
        };
        let json = serde_json::to_value(&probe).unwrap();
        assert_eq!(json["at"], "2025-03-01T09:30:00");
        assert!(json["created"].is_null());
    }

    #[test]
    fn created_accepts_with_and_without_fraction() {
        let a: Probe =
            serde_json::from_str(r#"{"at":"2025-03-01T09:30:00","created":"2025-01-01T00:00:00"}"#)
                .unwrap();
        assert_eq!(a.created, Some(datetime!(2025-01-01 00:00:00)));

        let b: Probe = serde_json::from_str(
            r#"{"at":"2025-03-01T09:30:00","created":"2025-01-01T00:00:00.123456"}"#,
        )
        .unwrap();
        assert_eq!(b.created, Some(datetime!(2025-01-01 00:00:00.123456)));

        let c: Probe = serde_json::from_str(r#"{"at":"2025-03-01T09:30:00"}"#).unwrap();
        assert!(c.created.is_none());
    }

    #[test]
    fn booking_rejects_other_shapes() {
        assert!(serde_json::from_str::<Probe>(r#"{"at":"2025-03-01 09:30"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"at":"2025-03-01T09:30:00Z"}"#).is_err());
    }
}
