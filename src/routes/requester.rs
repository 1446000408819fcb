//! `User` header extractor.
//!
//! The chat has no authentication: callers identify themselves by name in
//! the `User` header. Handlers that act on behalf of a participant take a
//! [`Requester`] parameter.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

pub const USER_HEADER: &str = "user";

/// Participant name taken from the `User` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester(pub String);

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();
        if name.is_empty() {
            return Err(StatusCode::BAD_REQUEST);
        }
        Ok(Self(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Requester, StatusCode> {
        let (mut parts, ()) = request.into_parts();
        Requester::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_and_trims_user_header() {
        let request = Request::builder().header("User", " alice ").body(()).unwrap();
        assert_eq!(extract(request).await, Ok(Requester("alice".into())));
    }

    #[tokio::test]
    async fn missing_header_is_bad_request() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, Err(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn blank_header_is_bad_request() {
        let request = Request::builder().header("User", "   ").body(()).unwrap();
        assert_eq!(extract(request).await, Err(StatusCode::BAD_REQUEST));
    }
}
