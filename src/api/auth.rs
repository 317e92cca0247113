//! Caller identity extraction
//!
//! Sessions are issued upstream; this service trusts the identity headers
//! forwarded by the gateway and rejects requests without them.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::handlers::ErrorResponse;
use crate::access::Role;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ROLE_HEADER: &str = "x-user-role";
pub const RESTAURANT_HEADER: &str = "x-restaurant-id";

/// Authenticated caller as forwarded by the gateway
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
    pub restaurant_id: Option<String>,
}

/// Rejection for requests carrying no caller identity
#[derive(Debug)]
pub struct AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "unauthorized".to_string(),
            }),
        )
            .into_response()
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_str(parts, USER_ID_HEADER).ok_or(AuthError)?.to_string();
        // A missing or unknown role degrades to the most restricted one
        let role = header_str(parts, ROLE_HEADER)
            .map(Role::parse)
            .unwrap_or(Role::Staff);
        let restaurant_id = header_str(parts, RESTAURANT_HEADER).map(str::to_string);

        Ok(Identity {
            user_id,
            role,
            restaurant_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Identity, AuthError> {
        let (mut parts, _) = request.into_parts();
        Identity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_full_identity() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "u-17")
            .header(ROLE_HEADER, "MANAGER")
            .header(RESTAURANT_HEADER, "R1")
            .body(())
            .unwrap();

        let identity = extract(request).await.unwrap();
        assert_eq!(identity.user_id, "u-17");
        assert_eq!(identity.role, Role::Manager);
        assert_eq!(identity.restaurant_id.as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn test_missing_role_defaults_to_staff() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "u-17")
            .body(())
            .unwrap();

        let identity = extract(request).await.unwrap();
        assert_eq!(identity.role, Role::Staff);
        assert_eq!(identity.restaurant_id, None);
    }

    #[tokio::test]
    async fn test_missing_user_id_is_rejected() {
        let request = Request::builder()
            .header(ROLE_HEADER, "GM")
            .body(())
            .unwrap();

        assert!(extract(request).await.is_err());
    }

    #[tokio::test]
    async fn test_blank_user_id_is_rejected() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "")
            .body(())
            .unwrap();

        assert!(extract(request).await.is_err());
    }
}
