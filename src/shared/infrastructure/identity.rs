use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::log_debug;
use crate::shared::domain::value_objects::UserId;
use crate::shared::errors::AppError;
use crate::shared::infrastructure::config::AuthConfig;

/// Header set by the upstream proxy after it authenticated the caller.
pub const USER_HEADER: &str = "X-Forwarded-User";

/// The caller resolved by [`require_identity`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

/// Resolves the caller from the proxy header, or the configured debug user.
///
/// Requests with no usable identity are rejected with 401.
pub async fn require_identity(
    State(auth): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let from_header = request
        .headers()
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| UserId::new(value).ok());

    let user = match from_header {
        Some(user) => user,
        None => match auth.debug_user.as_deref().map(UserId::new) {
            Some(Ok(user)) => {
                log_debug!("No {} header, running as debug user {}", USER_HEADER, user);
                user
            }
            _ => {
                return AppError::Unauthorized(format!("missing {} header", USER_HEADER))
                    .into_response()
            }
        },
    };

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            AppError::Unauthorized("identity middleware not configured".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn whoami(CurrentUser(user): CurrentUser) -> String {
        user.to_string()
    }

    fn app(debug_user: Option<&str>) -> Router {
        let auth = Arc::new(AuthConfig {
            debug_user: debug_user.map(str::to_string),
        });
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(auth, require_identity))
    }

    async fn call(app: Router, user: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(user) = user {
            builder = builder.header(USER_HEADER, user);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_header_sets_current_user() {
        let (status, body) = call(app(None), Some("alice")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "alice");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let (status, _) = call(app(None), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_blank_header_is_unauthorized() {
        let (status, _) = call(app(None), Some("  ")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_debug_user_fallback() {
        let (status, body) = call(app(Some("debug-user")), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "debug-user");

        let (_, body) = call(app(Some("debug-user")), Some("bob")).await;
        assert_eq!(body, "bob");
    }
}
