//! Verification of [Amazon Cognito](https://docs.aws.amazon.com/cognito/latest/developerguide/amazon-cognito-user-pools-using-tokens-verifying-a-jwt.html)
//! ID tokens presented as bearer tokens, with an optional [`tower`] layer for `axum` applications.
//!
//! ## Overview
//!
//! A Cognito user pool signs the ID tokens it issues with RSA keys published as a
//! [JSON Web Key Set](https://datatracker.ietf.org/doc/html/rfc7517) at
//! `https://cognito-idp.<region>.amazonaws.com/<pool_id>/.well-known/jwks.json`. A [`TokenVerifier`] takes the token
//! from a request's `Authorization` header, fetches that key set, verifies the token's signature and then checks the
//! claims, in this order:
//!
//! 1. `iss` is the configured user pool,
//! 2. `token_use` is `id`,
//! 3. `aud` is the configured app client,
//! 4. `sub` is present,
//! 5. `iat` is not in the future and `exp` has not passed.
//!
//! The result is a [`VerificationOutcome`] naming the first check that failed, or
//! [`VerificationOutcome::Verified`]. Failing to retrieve the key set is not an outcome but an [`Error`].
//!
//! The key set is fetched for every verification; nothing is cached.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use axum::{routing::get, Extension, Router};
//! use axum_cognito::{CognitoAuthLayer, CognitoClaims, CognitoConfig, TokenVerifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads `AWS_REGION`, `AWS_COGNITO_POOL_ID` and `AWS_COGNITO_CLIENT_ID`.
//!     let verifier = TokenVerifier::new(CognitoConfig::from_env()?)?;
//!
//!     let router = Router::new()
//!         .route(
//!             "/protected",
//!             get(|Extension(CognitoClaims(claims)): Extension<CognitoClaims>| async move {
//!                 format!("Hello {}!", claims.subject().unwrap_or_default())
//!             }),
//!         )
//!         .layer(CognitoAuthLayer::new(verifier));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```
//!
//! Without the layer, call [`TokenVerifier::verify`] and map the outcome yourself:
//!
//! ```rust,no_run
//! # async fn handle(verifier: &axum_cognito::TokenVerifier, request: http::Request<()>) -> Result<(), axum_cognito::Error> {
//! if !verifier.verify(&request).await?.is_verified() {
//!     // reject the request
//! }
//! # Ok(())
//! # }
//! ```

pub mod authorization;
pub mod config;
pub use error::Error;

pub use authorization::{CognitoAuthLayer, CognitoClaims};
pub use claims::IdTokenClaims;
pub use clock::{Clock, SystemClock};
pub use config::CognitoConfig;
pub use jwk_set::KeySetFetcher;
pub use outcome::VerificationOutcome;
pub use remote_jwk_set::{RemoteJwkSet, RemoteJwkSetBuilder};
pub use verifier::TokenVerifier;

mod claims;
mod clock;
mod codec;
mod error;
mod jwk_set;
mod outcome;
mod remote_jwk_set;
mod verifier;

#[cfg(test)]
mod test_support;
