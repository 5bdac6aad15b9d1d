use url::Url;

use crate::Error;

pub const REGION_VAR: &str = "AWS_REGION";
pub const POOL_ID_VAR: &str = "AWS_COGNITO_POOL_ID";
pub const CLIENT_ID_VAR: &str = "AWS_COGNITO_CLIENT_ID";

/// Path of the user pool's key set, relative to the pool's issuer.
const JWKS_PATH: &str = ".well-known/jwks.json";

/// Identifies the Cognito user pool and app client whose ID tokens are accepted.
#[derive(Clone, Debug)]
pub struct CognitoConfig {
    region: String,
    pool_id: String,
    client_id: String,
    issuer_base_uri: Url,
}

impl CognitoConfig {
    /// Creates a configuration for the user pool `pool_id` in `region`, accepting tokens issued to `client_id`.
    ///
    /// The issuer base URI is derived as `https://cognito-idp.<region>.amazonaws.com`.
    pub fn new(
        region: impl Into<String>,
        pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, Error> {
        let region = region.into();
        let issuer_base_uri = Url::parse(&format!("https://cognito-idp.{region}.amazonaws.com"))
            .map_err(Error::InvalidIssuerUri)?;
        Ok(Self {
            region,
            pool_id: pool_id.into(),
            client_id: client_id.into(),
            issuer_base_uri,
        })
    }

    /// Reads `AWS_REGION`, `AWS_COGNITO_POOL_ID` and `AWS_COGNITO_CLIENT_ID` from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`CognitoConfig::from_env`], but resolves variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingConfig { name })
        };
        Self::new(
            require(REGION_VAR)?,
            require(POOL_ID_VAR)?,
            require(CLIENT_ID_VAR)?,
        )
    }

    /// Replaces the derived issuer base URI, e.g. to point at a local test server.
    pub fn with_issuer_base_uri(mut self, issuer_base_uri: &str) -> Result<Self, Error> {
        self.issuer_base_uri = Url::parse(issuer_base_uri).map_err(Error::InvalidIssuerUri)?;
        Ok(self)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn pool_id(&self) -> &str {
        &self.pool_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn issuer_base_uri(&self) -> &Url {
        &self.issuer_base_uri
    }

    /// The exact `iss` value expected in tokens from this pool.
    pub fn issuer(&self) -> Result<Url, Error> {
        self.issuer_base_uri
            .join(&format!("/{}", self.pool_id))
            .map_err(Error::InvalidIssuerUri)
    }

    /// Where the pool publishes its signing keys.
    pub fn jwks_url(&self) -> Result<Url, Error> {
        self.issuer_base_uri
            .join(&format!("/{}/{JWKS_PATH}", self.pool_id))
            .map_err(Error::InvalidIssuerUri)
    }
}
