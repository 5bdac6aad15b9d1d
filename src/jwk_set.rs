use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;

use crate::{remote_jwk_set::RemoteJwkSet, Error};

/// Source of the user pool's signing keys.
///
/// The verifier asks for the key set once per verification and never holds on to it.
#[async_trait]
pub trait KeySetFetcher: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, Error>;
}

/// A fixed, locally provided key set.
#[async_trait]
impl KeySetFetcher for JwkSet {
    async fn fetch(&self) -> Result<JwkSet, Error> {
        Ok(self.clone())
    }
}

#[async_trait]
impl KeySetFetcher for RemoteJwkSet {
    async fn fetch(&self) -> Result<JwkSet, Error> {
        self.jwk_set().await
    }
}

#[async_trait]
impl<F> KeySetFetcher for Arc<F>
where
    F: KeySetFetcher + ?Sized,
{
    async fn fetch(&self) -> Result<JwkSet, Error> {
        (**self).fetch().await
    }
}
