//! HTTP transport port: executes requests built by the services.

use std::future::Future;
use std::rc::Rc;

use benchhub_domain::error::TransportError;
use benchhub_domain::http::{HttpRequest, HttpResponse};

/// Sends an [`HttpRequest`] and returns whatever response came back.
///
/// Any status code is an `Ok` response; only failures to obtain a response
/// at all (network, CORS, aborted) are errors.
pub trait HttpTransport {
    /// Execute `request`.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

impl<T: HttpTransport> HttpTransport for Rc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        (**self).send(request)
    }
}
