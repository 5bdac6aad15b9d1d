use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;

/// Failures outside the token itself: configuration and key set retrieval.
///
/// Problems with a presented token are never reported through this type, see
/// [`VerificationOutcome`](crate::VerificationOutcome) instead.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing configuration value `{name}`")]
    MissingConfig { name: &'static str },
    #[error("invalid issuer base URI")]
    InvalidIssuerUri(#[source] url::ParseError),
    #[error("failed to fetch JWK set")]
    FailedJwkSetRequest(#[from] reqwest::Error),
    #[error("received error response when fetching JWK set: {status_code}")]
    JwkSetResponseError { status_code: StatusCode },
    #[error("JWK set response is not a valid JWK set")]
    MalformedJwkSet(#[source] serde_json::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "key_set_unavailable",
        }));
        (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
    }
}
