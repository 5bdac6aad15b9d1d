use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;

/// Result of verifying a single request.
///
/// Every variant except [`VerificationOutcome::Verified`] names the first check that failed. Outcomes deliberately
/// carry no further detail.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerificationOutcome {
    /// All checks passed.
    Verified,
    /// The request has no `Authorization` header.
    NoAuthHeader,
    /// The `Authorization` header does not contain a token. A header value that is not visible ASCII text counts as
    /// containing none.
    NilToken,
    /// The token is malformed, or its signature could not be verified against the pool's key set.
    InvalidTokenError,
    /// `iss` is not the configured user pool.
    IssuerError,
    /// `token_use` is not `id`.
    TokenUseError,
    /// `aud` is not the configured app client.
    ClientIdError,
    /// `sub` is missing or blank.
    NoSubjectError,
    /// The token was issued in the future or has expired.
    ExpiredError,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }

    /// Stable machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationOutcome::Verified => "verified",
            VerificationOutcome::NoAuthHeader => "no_auth_header",
            VerificationOutcome::NilToken => "nil_token",
            VerificationOutcome::InvalidTokenError => "invalid_token_error",
            VerificationOutcome::IssuerError => "issuer_error",
            VerificationOutcome::TokenUseError => "token_use_error",
            VerificationOutcome::ClientIdError => "client_id_error",
            VerificationOutcome::NoSubjectError => "no_subject_error",
            VerificationOutcome::ExpiredError => "expired_error",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IntoResponse for VerificationOutcome {
    fn into_response(self) -> Response {
        if self.is_verified() {
            return StatusCode::OK.into_response();
        }
        let body = Json(json!({
            "error": self.as_str(),
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
