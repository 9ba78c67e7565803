//! Caller identity
//!
//! Authentication happens upstream; the authenticated user id arrives in
//! the `x-user-id` header and is passed explicitly into whatever needs it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const USER_HEADER: &str = "x-user-id";

/// The caller, if signed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Option<String>);

impl CurrentUser {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// A signed-in caller; rejects anonymous requests with 401
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredUser(pub String);

impl RequiredUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

fn user_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(user_from_parts(parts)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequiredUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_parts(parts)
            .map(RequiredUser)
            .ok_or_else(|| AppError::Unauthorized("Sign in to continue".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_current_user() {
        let user = CurrentUser::from_request_parts(&mut parts(Some("bob")), &())
            .await
            .unwrap();
        assert_eq!(user.id(), Some("bob"));

        let anonymous = CurrentUser::from_request_parts(&mut parts(Some("  ")), &())
            .await
            .unwrap();
        assert_eq!(anonymous.id(), None);
    }

    #[tokio::test]
    async fn test_required_user_rejects_anonymous() {
        let err = RequiredUser::from_request_parts(&mut parts(None), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
