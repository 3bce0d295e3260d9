//! HTTP 传输模块
//!
//! 基于 `gloo-net` 的 fetch 实现 `Transport`，并用 `gloo-timers` 实现请求超时。

use futures::future::{Either, select};
use gloo_net::http::{Method, RequestBuilder};
use gloo_timers::future::TimeoutFuture;

use feedapp_shared::protocol::HttpMethod;

use crate::api::{HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
    }
}

/// 浏览器 fetch 传输
#[derive(Debug, Clone, Copy)]
pub struct FetchTransport {
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = RequestBuilder::new(&req.url).method(to_method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::new(format!("Failed to build request: {}", e)))?;

        // fetch 与超时竞速，超时后放弃等待（请求本身不会被中止）
        let sent = Box::pin(request.send());
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));
        let response = match select(sent, timeout).await {
            Either::Left((result, _)) => result.map_err(|e| TransportError::new(e.to_string()))?,
            Either::Right(_) => {
                return Err(TransportError::new(format!(
                    "timeout of {}ms exceeded",
                    self.timeout_ms
                )));
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
