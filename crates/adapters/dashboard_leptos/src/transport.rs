//! HTTP transport wrapping `gloo-net`.

use std::future::Future;

use benchhub_app::ports::HttpTransport;
use benchhub_domain::error::TransportError;
use benchhub_domain::http::{HttpMethod, HttpRequest, HttpResponse};
use gloo_net::http::{Request, RequestBuilder};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Marks the request as script-initiated; the server answers such requests
/// with JSON instead of a rendered page.
const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

fn network(err: gloo_net::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

fn request_builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

async fn execute(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut builder = request_builder(request.method, &request.full_url())
        .header(REQUESTED_WITH.0, REQUESTED_WITH.1);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let outgoing = match request.form_body() {
        Some(body) => builder.header("Content-Type", FORM_CONTENT_TYPE).body(body),
        None => builder.build(),
    }
    .map_err(network)?;
    let response = outgoing.send().await.map_err(network)?;
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    Ok(HttpResponse::new(status, body))
}

/// Sends requests with the browser's `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        execute(request)
    }
}
