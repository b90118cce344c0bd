//! HTTP Basic authentication middleware.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::api::AppState;
use crate::domain::User;
use crate::errors::AppError;
use crate::services::Credentials;

/// Authenticated user resolved from the Basic-Auth header
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
        }
    }
}

/// Decode `Authorization: Basic <base64 name:secret>`.
///
/// Returns `None` when the header is absent, uses another scheme, or is not
/// valid base64 `name:secret`.
pub fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let Authorization(basic) = headers.typed_get::<Authorization<Basic>>()?;
    Some(Credentials::new(basic.username(), basic.password()))
}

/// Basic authentication middleware.
///
/// Verifies the credentials and injects the `CurrentUser` into the request
/// extensions. Any failure short-circuits with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = credentials_from_headers(request.headers());
    let user = state.auth_service.authenticate(credentials).await?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, HeaderValue};

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_decodes_basic_credentials() {
        // joe@smith.com:joepassword
        let headers = headers_with("Basic am9lQHNtaXRoLmNvbTpqb2VwYXNzd29yZA==");

        let credentials = credentials_from_headers(&headers).unwrap();
        assert_eq!(credentials.email, "joe@smith.com");
        assert_eq!(credentials.password, "joepassword");
    }

    #[test]
    fn test_missing_header() {
        assert!(credentials_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_bearer_scheme_is_not_basic() {
        let headers = headers_with("Bearer am9lQHNtaXRoLmNvbTpqb2VwYXNzd29yZA==");
        assert!(credentials_from_headers(&headers).is_none());
    }

    #[test]
    fn test_malformed_base64() {
        let headers = headers_with("Basic not*base64");
        assert!(credentials_from_headers(&headers).is_none());
    }
}
