use http::header::AUTHORIZATION;
use http::{HeaderMap, Request};
use jsonwebtoken::Algorithm;

use crate::claims::IdTokenClaims;
use crate::clock::{Clock, SystemClock};
use crate::codec::TokenCodec;
use crate::config::CognitoConfig;
use crate::jwk_set::KeySetFetcher;
use crate::outcome::VerificationOutcome;
use crate::remote_jwk_set::RemoteJwkSet;
use crate::Error;

/// The only `token_use` accepted; Cognito access tokens carry `access`.
const ID_TOKEN_USE: &str = "id";

/// Verifies Cognito ID tokens presented as bearer tokens.
///
/// The signing keys are fetched from `F` on every call, so a verifier holds no mutable state and can be shared
/// freely between requests.
pub struct TokenVerifier<F = RemoteJwkSet, C = SystemClock> {
    config: CognitoConfig,
    issuer: String,
    key_set: F,
    clock: C,
    codec: TokenCodec,
}

impl TokenVerifier {
    /// Creates a verifier that fetches the user pool's published JWK set over HTTP.
    pub fn new(config: CognitoConfig) -> Result<Self, Error> {
        let key_set = RemoteJwkSet::builder(config.jwks_url()?).build();
        Self::with_key_set(config, key_set)
    }
}

impl<F> TokenVerifier<F, SystemClock>
where
    F: KeySetFetcher,
{
    pub fn with_key_set(config: CognitoConfig, key_set: F) -> Result<Self, Error> {
        let issuer = config.issuer()?.to_string();
        Ok(Self {
            config,
            issuer,
            key_set,
            clock: SystemClock,
            codec: TokenCodec::new(vec![Algorithm::RS256]),
        })
    }
}

impl<F, C> TokenVerifier<F, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> TokenVerifier<F, C2> {
        TokenVerifier {
            config: self.config,
            issuer: self.issuer,
            key_set: self.key_set,
            clock,
            codec: self.codec,
        }
    }

    /// Replaces the accepted signature algorithms, `RS256` by default.
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.codec = TokenCodec::new(algorithms);
        self
    }

    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    /// The exact `iss` value tokens must carry.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}

impl<F, C> TokenVerifier<F, C>
where
    F: KeySetFetcher,
    C: Clock,
{
    /// Verifies the bearer token in `request`'s `Authorization` header.
    ///
    /// Returns `Err` only if the key set could not be retrieved. Every problem with the request or its token is an
    /// `Ok` outcome.
    pub async fn verify<B>(&self, request: &Request<B>) -> Result<VerificationOutcome, Error> {
        self.verify_headers(request.headers()).await
    }

    pub async fn verify_headers(&self, headers: &HeaderMap) -> Result<VerificationOutcome, Error> {
        Ok(match self.verify_claims(headers).await? {
            Ok(_) => VerificationOutcome::Verified,
            Err(outcome) => outcome,
        })
    }

    /// Like [`TokenVerifier::verify_headers`], but hands out the verified claims on success.
    pub async fn verify_claims(
        &self,
        headers: &HeaderMap,
    ) -> Result<Result<IdTokenClaims, VerificationOutcome>, Error> {
        let token = match bearer_token(headers) {
            Ok(token) => token,
            Err(outcome) => return Ok(Err(reject(outcome))),
        };

        let jwk_set = self.key_set.fetch().await.inspect_err(|error| {
            tracing::warn!(%error, "failed to fetch JWK set");
        })?;

        let claims = match self.codec.decode(token, &jwk_set) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::debug!(%error, "token signature verification failed");
                return Ok(Err(reject(VerificationOutcome::InvalidTokenError)));
            }
        };

        Ok(self.check_claims(&claims).map(|()| claims).map_err(reject))
    }

    /// Checks run in a fixed order and the first failure wins.
    fn check_claims(&self, claims: &IdTokenClaims) -> Result<(), VerificationOutcome> {
        if claims.issuer() != Some(self.issuer.as_str()) {
            return Err(VerificationOutcome::IssuerError);
        }
        if claims.token_use() != Some(ID_TOKEN_USE) {
            return Err(VerificationOutcome::TokenUseError);
        }
        if claims.audience() != Some(self.config.client_id()) {
            return Err(VerificationOutcome::ClientIdError);
        }
        if !claims.subject().is_some_and(|sub| !sub.trim().is_empty()) {
            return Err(VerificationOutcome::NoSubjectError);
        }

        let now = self.clock.now_secs();
        match (claims.issued_at(), claims.expires_at()) {
            (Some(iat), Some(exp)) if iat <= now && exp > now => Ok(()),
            _ => Err(VerificationOutcome::ExpiredError),
        }
    }
}

/// Takes the last whitespace separated segment of the `Authorization` header, whatever scheme precedes it.
fn bearer_token(headers: &HeaderMap) -> Result<&str, VerificationOutcome> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(VerificationOutcome::NoAuthHeader)?;
    let value = value.to_str().map_err(|_| VerificationOutcome::NilToken)?;

    let mut segments = value.split_whitespace();
    let first = segments.next().ok_or(VerificationOutcome::NilToken)?;
    match segments.next_back() {
        Some(token) => Ok(token),
        // A lone `Bearer` is a scheme without credentials.
        None if first.eq_ignore_ascii_case("bearer") => Err(VerificationOutcome::NilToken),
        None => Ok(first),
    }
}

fn reject(outcome: VerificationOutcome) -> VerificationOutcome {
    tracing::debug!(%outcome, "rejected request");
    outcome
}
