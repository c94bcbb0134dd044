use std::sync::Arc;

use crate::error::AppError;
use crate::forms::{
    dto::BookingRequest,
    repo::FormRepo,
    repo_types::{
        server_now, FormDetails, NewFormDetails, CAR_TYPE_MAX, EMAIL_MAX, FULL_NAME_MAX,
        LOCATION_MAX,
    },
};

/// Page size of `GET /api/forms/recent`.
pub const RECENT_FORMS_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct FormService {
    forms: Arc<dyn FormRepo>,
}

impl FormService {
    pub fn new(forms: Arc<dyn FormRepo>) -> Self {
        Self { forms }
    }

    /// Validates, stamps `created_at` when the caller left it empty, and
    /// inserts. A supplied `created_at` is stored as is.
    pub async fn save(&self, req: BookingRequest) -> Result<FormDetails, AppError> {
        let form = validate(req)?;
        let created_at = form.created_at.unwrap_or_else(server_now);

        let stored = self
            .forms
            .insert(NewFormDetails {
                full_name: form.full_name,
                email: form.email,
                pickup_location: form.pickup_location,
                dropoff_location: form.dropoff_location,
                pickup_date_time: form.pickup_date_time,
                return_date_time: form.return_date_time,
                car_type: form.car_type,
                created_at,
            })
            .await?;
        Ok(stored)
    }

    /// At most `max(1, limit)` records, newest first.
    pub async fn find_recent(&self, limit: i64) -> Result<Vec<FormDetails>, AppError> {
        Ok(self.forms.find_recent(limit.max(1)).await?)
    }
}

struct ValidForm {
    full_name: Option<String>,
    email: Option<String>,
    pickup_location: String,
    dropoff_location: Option<String>,
    pickup_date_time: time::PrimitiveDateTime,
    return_date_time: Option<time::PrimitiveDateTime>,
    car_type: Option<String>,
    created_at: Option<time::PrimitiveDateTime>,
}

fn validate(req: BookingRequest) -> Result<ValidForm, AppError> {
    let pickup_location = req
        .pickup_location
        .ok_or_else(|| AppError::validation("pickupLocation is required"))?;
    let pickup_date_time = req
        .pickup_date_time
        .ok_or_else(|| AppError::validation("pickupDateTime is required"))?;

    check_len("fullName", req.full_name.as_deref(), FULL_NAME_MAX)?;
    check_len("email", req.email.as_deref(), EMAIL_MAX)?;
    check_len("pickupLocation", Some(&pickup_location), LOCATION_MAX)?;
    check_len("dropoffLocation", req.dropoff_location.as_deref(), LOCATION_MAX)?;
    check_len("carType", req.car_type.as_deref(), CAR_TYPE_MAX)?;

    Ok(ValidForm {
        full_name: req.full_name,
        email: req.email,
        pickup_location,
        dropoff_location: req.dropoff_location,
        pickup_date_time,
        return_date_time: req.return_date_time,
        car_type: req.car_type,
        created_at: req.created_at,
    })
}

fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::repo::InMemoryFormRepo;
    use time::macros::datetime;
    use time::PrimitiveDateTime;

    fn service() -> FormService {
        FormService::new(Arc::new(InMemoryFormRepo::default()))
    }

    fn booking(location: &str, created_at: Option<PrimitiveDateTime>) -> BookingRequest {
        BookingRequest {
            pickup_location: Some(location.into()),
            pickup_date_time: Some(datetime!(2025-03-01 09:30:00)),
            created_at,
            ..BookingRequest::default()
        }
    }

    #[tokio::test]
    async fn save_assigns_created_at_when_absent() {
        let forms = service();
        let before = server_now();
        let saved = forms.save(booking("Airport", None)).await.unwrap();
        assert!(saved.id > 0);
        assert!(saved.created_at >= before);
    }

    #[tokio::test]
    async fn save_keeps_a_supplied_created_at() {
        let forms = service();
        let at = datetime!(2024-12-31 23:59:59);
        let saved = forms.save(booking("Airport", Some(at))).await.unwrap();
        assert_eq!(saved.created_at, at);
    }

    #[tokio::test]
    async fn saving_the_same_payload_twice_leaves_the_first_untouched() {
        let forms = service();
        let first = forms.save(booking("Airport", None)).await.unwrap();
        let second = forms.save(booking("Airport", None)).await.unwrap();
        assert_ne!(first.id, second.id);

        let all = forms.find_recent(10).await.unwrap();
        let again = all.iter().find(|f| f.id == first.id).unwrap();
        assert_eq!(again.created_at, first.created_at);
    }

    #[tokio::test]
    async fn find_recent_returns_top_k_newest_first() {
        let forms = service();
        let stamps = [
            datetime!(2025-01-03 00:00:00),
            datetime!(2025-01-01 00:00:00),
            datetime!(2025-01-05 00:00:00),
            datetime!(2025-01-02 00:00:00),
            datetime!(2025-01-04 00:00:00),
        ];
        for (i, at) in stamps.iter().enumerate() {
            forms.save(booking(&format!("loc-{i}"), Some(*at))).await.unwrap();
        }

        let top = forms.find_recent(3).await.unwrap();
        let got: Vec<_> = top.iter().map(|f| f.created_at).collect();
        assert_eq!(
            got,
            vec![
                datetime!(2025-01-05 00:00:00),
                datetime!(2025-01-04 00:00:00),
                datetime!(2025-01-03 00:00:00),
            ]
        );

        assert_eq!(forms.find_recent(50).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn non_positive_limit_returns_only_the_newest() {
        let forms = service();
        forms
            .save(booking("old", Some(datetime!(2025-01-01 00:00:00))))
            .await
            .unwrap();
        forms
            .save(booking("new", Some(datetime!(2025-02-01 00:00:00))))
            .await
            .unwrap();

        for limit in [0, -1, i64::MIN] {
            let recent = forms.find_recent(limit).await.unwrap();
            assert_eq!(recent.len(), 1);
            assert_eq!(recent[0].pickup_location, "new");
        }
    }

    #[tokio::test]
    async fn missing_required_fields_are_rejected() {
        let forms = service();
        let no_location = BookingRequest {
            pickup_date_time: Some(datetime!(2025-03-01 09:30:00)),
            ..BookingRequest::default()
        };
        assert!(matches!(
            forms.save(no_location).await,
            Err(AppError::Validation(_))
        ));

        let no_pickup_time = BookingRequest {
            pickup_location: Some("Airport".into()),
            ..BookingRequest::default()
        };
        assert!(matches!(
            forms.save(no_pickup_time).await,
            Err(AppError::Validation(_))
        ));

        assert!(forms.find_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn overlong_columns_are_rejected() {
        let forms = service();
        let mut req = booking("Airport", None);
        req.car_type = Some("x".repeat(CAR_TYPE_MAX + 1));
        assert!(matches!(forms.save(req).await, Err(AppError::Validation(_))));

        let mut ok = booking("Airport", None);
        ok.car_type = Some("x".repeat(CAR_TYPE_MAX));
        assert!(forms.save(ok).await.is_ok());
    }
}
