use jsonwebtoken::jwk::{Jwk, JwkSet, KeyAlgorithm};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use crate::claims::IdTokenClaims;

/// Reasons a token fails signature verification. Only used for logging, callers see a single outcome.
#[derive(thiserror::Error, Debug)]
pub(crate) enum DecodeError {
    #[error("missing kid in token header")]
    MissingKid,
    #[error("token header contains unknown kid")]
    UnknownKid,
    #[error("token algorithm {0:?} is not allowed")]
    AlgorithmNotAllowed(Algorithm),
    #[error("token algorithm {0:?} does not match the JWK")]
    AlgorithmMismatch(Algorithm),
    #[error("failed to decode JWK into key")]
    InvalidJwk(#[source] jsonwebtoken::errors::Error),
    #[error("JWT validation failed")]
    InvalidJwt(#[source] jsonwebtoken::errors::Error),
}

/// Verifies compact JWS tokens against a JWK set and decodes their claims.
///
/// Only the signature is checked here. Registered claims, including `exp`, are left to the caller so that each
/// failing claim can be reported separately.
#[derive(Clone, Debug)]
pub(crate) struct TokenCodec {
    algorithms: Vec<Algorithm>,
}

impl TokenCodec {
    pub fn new(algorithms: Vec<Algorithm>) -> Self {
        Self { algorithms }
    }

    pub fn decode(&self, token: &str, jwk_set: &JwkSet) -> Result<IdTokenClaims, DecodeError> {
        // First, just decode the header part of the token, without validating the token, to get the kid.
        let header = decode_header(token).map_err(DecodeError::InvalidJwt)?;
        if !self.algorithms.contains(&header.alg) {
            return Err(DecodeError::AlgorithmNotAllowed(header.alg));
        }
        let kid = header.kid.as_deref().ok_or(DecodeError::MissingKid)?;

        let jwk = jwk_set.find(kid).ok_or(DecodeError::UnknownKid)?;
        if !key_allows(jwk, header.alg) {
            return Err(DecodeError::AlgorithmMismatch(header.alg));
        }
        let decoding_key = DecodingKey::from_jwk(jwk).map_err(DecodeError::InvalidJwk)?;

        let mut validation = Validation::new(header.alg);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        let token = decode::<Map<String, Value>>(token, &decoding_key, &validation)
            .map_err(DecodeError::InvalidJwt)?;
        Ok(token.claims.into())
    }
}

/// A JWK without an `alg` may be used with any algorithm of its key type.
fn key_allows(jwk: &Jwk, alg: Algorithm) -> bool {
    match &jwk.common.key_algorithm {
        Some(key_algorithm) => signing_algorithm(key_algorithm) == Some(alg),
        None => true,
    }
}

/// Encryption algorithms have no signing counterpart.
fn signing_algorithm(key_algorithm: &KeyAlgorithm) -> Option<Algorithm> {
    match key_algorithm {
        KeyAlgorithm::HS256 => Some(Algorithm::HS256),
        KeyAlgorithm::HS384 => Some(Algorithm::HS384),
        KeyAlgorithm::HS512 => Some(Algorithm::HS512),
        KeyAlgorithm::ES256 => Some(Algorithm::ES256),
        KeyAlgorithm::ES384 => Some(Algorithm::ES384),
        KeyAlgorithm::RS256 => Some(Algorithm::RS256),
        KeyAlgorithm::RS384 => Some(Algorithm::RS384),
        KeyAlgorithm::RS512 => Some(Algorithm::RS512),
        KeyAlgorithm::PS256 => Some(Algorithm::PS256),
        KeyAlgorithm::PS384 => Some(Algorithm::PS384),
        KeyAlgorithm::PS512 => Some(Algorithm::PS512),
        KeyAlgorithm::EdDSA => Some(Algorithm::EdDSA),
        _ => None,
    }
}
