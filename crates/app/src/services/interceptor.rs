//! Request interceptor: attaches the bearer credential to outgoing POSTs.

use std::future::Future;

use benchhub_domain::error::TransportError;
use benchhub_domain::http::{AUTHORIZATION, HttpMethod, HttpRequest, HttpResponse};

use crate::ports::{CredentialSource, HttpTransport};
use crate::services::token_accessor::TokenAccessor;

/// Adds `Authorization: Bearer …` to POST requests when a credential exists.
#[derive(Debug, Clone)]
pub struct AuthInterceptor<S> {
    tokens: TokenAccessor<S>,
}

impl<S: CredentialSource> AuthInterceptor<S> {
    pub fn new(tokens: TokenAccessor<S>) -> Self {
        Self { tokens }
    }

    /// Decorate `request` in place. Returns whether a header was set.
    pub fn intercept(&self, request: &mut HttpRequest) -> bool {
        if request.method != HttpMethod::Post {
            return false;
        }
        let Some(cred) = self.tokens.get_token() else {
            return false;
        };
        request.set_header(AUTHORIZATION, cred.bearer());
        true
    }
}

/// A transport that runs every request through an [`AuthInterceptor`].
///
/// Wrapping the page's single transport makes the interception global.
#[derive(Debug, Clone)]
pub struct AuthorizedTransport<T, S> {
    inner: T,
    interceptor: AuthInterceptor<S>,
}

impl<T, S> AuthorizedTransport<T, S> {
    pub fn new(inner: T, interceptor: AuthInterceptor<S>) -> Self {
        Self { inner, interceptor }
    }
}

impl<T: HttpTransport, S: CredentialSource> HttpTransport for AuthorizedTransport<T, S> {
    fn send(
        &self,
        mut request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        self.interceptor.intercept(&mut request);
        self.inner.send(request)
    }
}
