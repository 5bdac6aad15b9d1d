//! Fake identity provider and collaborators for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use jsonwebtoken::{
    jwk::{AlgorithmParameters, CommonParameters, Jwk, JwkSet, KeyAlgorithm, RSAKeyParameters, RSAKeyType},
    Algorithm, EncodingKey, Header,
};
use openssl::rsa::Rsa;

use crate::{Clock, CognitoConfig, Error, KeySetFetcher};

pub const REGION: &str = "us-east-1";
pub const POOL_ID: &str = "us-east-1_TestPool";
pub const CLIENT_ID: &str = "test-app-client";

pub fn config() -> CognitoConfig {
    CognitoConfig::new(REGION, POOL_ID, CLIENT_ID).unwrap()
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Holds an RSA signing key and publishes its public half as a JWK set.
pub struct TestIdentityProvider {
    rsa_private_key: Rsa<openssl::pkey::Private>,
}

impl TestIdentityProvider {
    pub const KID: &'static str = "test-key-1";

    pub fn new() -> Self {
        Self {
            rsa_private_key: Rsa::generate(2048).unwrap(),
        }
    }

    pub fn jwk(&self, kid: &str) -> Jwk {
        Jwk {
            common: CommonParameters {
                key_algorithm: Some(KeyAlgorithm::RS256),
                key_id: Some(kid.to_string()),
                ..CommonParameters::default()
            },
            algorithm: AlgorithmParameters::RSA(RSAKeyParameters {
                n: base64_url::encode(&self.rsa_private_key.n().to_vec()),
                e: base64_url::encode(&self.rsa_private_key.e().to_vec()),
                key_type: RSAKeyType::RSA,
            }),
        }
    }

    pub fn jwk_set(&self) -> JwkSet {
        JwkSet {
            keys: vec![self.jwk(Self::KID)],
        }
    }

    /// Signs `claims` with RS256 under [`TestIdentityProvider::KID`].
    pub fn sign(&self, claims: &serde_json::Value) -> String {
        self.sign_with_kid(Self::KID, claims)
    }

    pub fn sign_with_kid(&self, kid: &str, claims: &serde_json::Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        jsonwebtoken::encode(
            &header,
            claims,
            &EncodingKey::from_rsa_der(&self.rsa_private_key.private_key_to_der().unwrap()),
        )
        .unwrap()
    }

    /// Claims of a well-formed ID token for [`config`], issued at `now` and valid for an hour.
    pub fn id_token_claims(issuer: &str, now: u64) -> serde_json::Value {
        serde_json::json!({
            "sub": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee",
            "aud": CLIENT_ID,
            "iss": issuer,
            "token_use": "id",
            "email": "jane@example.com",
            "auth_time": now,
            "iat": now,
            "exp": now + 3600,
        })
    }
}

/// Serves a fixed key set and counts how often it was asked for it.
pub struct CountingKeySet {
    jwk_set: JwkSet,
    fetches: AtomicUsize,
}

impl CountingKeySet {
    pub fn new(jwk_set: JwkSet) -> Self {
        Self {
            jwk_set,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeySetFetcher for CountingKeySet {
    async fn fetch(&self) -> Result<JwkSet, Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.jwk_set.clone())
    }
}

/// Mock clock with a fixed timestamp
pub struct MockClock(pub f64);

impl Clock for MockClock {
    fn now_secs(&self) -> f64 {
        self.0
    }
}
