use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use base64ct::{Base64, Encoding};
use tracing::{debug, warn};

use crate::{config::GateMode, error::AppError, state::AppState};

/// Inserted into request extensions once the gate has verified the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
}

/// Splits `Authorization: Basic base64(email:password)`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = auth.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = Base64::decode_vec(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// Public paths and CORS preflights pass untouched; everything else is
/// handled according to the configured `GateMode`.
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let security = &state.config.security;
    if req.method() == Method::OPTIONS || security.is_public(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    match security.gate {
        GateMode::Off => {
            debug!(path = %req.uri().path(), "protected path, gate not enforced");
        }
        GateMode::Basic => {
            let Some((email, password)) = basic_credentials(req.headers()) else {
                debug!(path = %req.uri().path(), "missing basic credentials");
                return Err(AppError::Unauthenticated);
            };
            let Some(user) = state.auth.login(&email, &password).await? else {
                warn!(path = %req.uri().path(), %email, "basic credentials rejected");
                return Err(AppError::Unauthenticated);
            };
            req.extensions_mut().insert(AuthenticatedUser {
                id: user.id,
                email: user.email,
            });
        }
    }

    Ok(next.run(req).await)
}
