//! Acting-user extractor for Axum handlers.
//!
//! Identity and permission management are external concerns: the gateway
//! in front of this service authenticates the caller and forwards the
//! resolved user id in the `x-user-id` header. Every orchestrated call
//! threads this id explicitly; nothing reads ambient identity state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// The user performing the request, from the `x-user-id` header.
///
/// Use this as an extractor parameter in any handler that acts on behalf
/// of a user:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Unauthenticated("Missing x-user-id header".into()))?;

        Ok(AuthUser {
            user_id: user_id.to_string(),
        })
    }
}
