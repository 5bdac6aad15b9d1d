use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims of a token whose signature has been verified.
///
/// Kept as a raw claim map so that a missing or mistyped claim surfaces as the matching verification outcome
/// rather than as a decoding failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdTokenClaims(Map<String, Value>);

impl IdTokenClaims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The claim `name` if it is a JSON string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The claim `name` if it is a JSON number, as seconds for timestamp claims.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    pub fn token_use(&self) -> Option<&str> {
        self.get_str("token_use")
    }

    pub fn audience(&self) -> Option<&str> {
        self.get_str("aud")
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    pub fn issued_at(&self) -> Option<f64> {
        self.get_number("iat")
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.get_number("exp")
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }
}

impl From<Map<String, Value>> for IdTokenClaims {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}
