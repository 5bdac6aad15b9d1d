use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use tower::Layer;
use tower_service::Service;

use crate::claims::IdTokenClaims;
use crate::clock::{Clock, SystemClock};
use crate::jwk_set::KeySetFetcher;
use crate::remote_jwk_set::RemoteJwkSet;
use crate::verifier::TokenVerifier;

/// Protects the wrapped service with a [`TokenVerifier`].
///
/// Rejected requests are answered with `401 Unauthorized` and `{"error": "<outcome>"}`. If the user pool's key set
/// cannot be fetched, the answer is `503 Service Unavailable`.
pub struct CognitoAuthLayer<F = RemoteJwkSet, C = SystemClock> {
    verifier: Arc<TokenVerifier<F, C>>,
}

impl<F, C> CognitoAuthLayer<F, C> {
    pub fn new(verifier: TokenVerifier<F, C>) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }
}

// Derived `Clone` would require `F: Clone` and `C: Clone`.
impl<F, C> Clone for CognitoAuthLayer<F, C> {
    fn clone(&self) -> Self {
        Self {
            verifier: self.verifier.clone(),
        }
    }
}

impl<S, F, C> Layer<S> for CognitoAuthLayer<F, C> {
    type Service = CognitoAuthService<S, F, C>;

    fn layer(&self, inner: S) -> Self::Service {
        CognitoAuthService {
            inner,
            verifier: self.verifier.clone(),
        }
    }
}

pub struct CognitoAuthService<S, F = RemoteJwkSet, C = SystemClock> {
    inner: S,
    verifier: Arc<TokenVerifier<F, C>>,
}

impl<S: Clone, F, C> Clone for CognitoAuthService<S, F, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            verifier: self.verifier.clone(),
        }
    }
}

/// Claims of the verified ID token, available as a request extension behind a [`CognitoAuthLayer`].
#[derive(Clone, Debug)]
pub struct CognitoClaims(pub IdTokenClaims);

impl<S, F, C> Service<Request> for CognitoAuthService<S, F, C>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    F: KeySetFetcher + 'static,
    C: Clock + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // Move the original service into the closure instead of its clone. This makes sure that the original service is
        // `call`ed instead of the cloned one, which might not be ready yet (`poll_ready` hasn't been called on the
        // clone yet).
        // See [docs](https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services).
        let inner_clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, inner_clone);

        let verifier = self.verifier.clone();
        Box::pin(async move {
            // Only the headers are needed, the body stays untouched.
            let (mut parts, body) = req.into_parts();
            let verify_result = verifier.verify_claims(&parts.headers).await;
            match verify_result {
                Ok(Ok(claims)) => {
                    parts.extensions.insert(CognitoClaims(claims));
                    inner.call(Request::from_parts(parts, body)).await
                }
                Ok(Err(outcome)) => Ok(outcome.into_response()),
                Err(error) => Ok(error.into_response()),
            }
        })
    }
}
