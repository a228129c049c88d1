use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;

/// Authenticated caller identity for invoice-service.
///
/// Extracted from the `X-User-Id` / `X-User-Name` / `X-User-Email` headers
/// propagated by the trusted auth gateway. Token issuance and verification
/// live upstream; this service only consumes the resolved identity, which it
/// stamps onto every invoice record it creates.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

fn required_header(parts: &Parts, name: &'static str) -> Result<String, AppError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!(
                "Missing {} header (required from auth gateway)",
                name
            ))
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = required_header(parts, "X-User-Id")?;
        let name = required_header(parts, "X-User-Name")?;
        let email = required_header(parts, "X-User-Email")?;

        // Add to tracing span for observability
        tracing::Span::current().record("user_id", id.as_str());

        Ok(AuthUser { id, name, email })
    }
}
