//! API 客户端模块
//!
//! - `Transport`: HTTP 传输抽象，浏览器实现见 `web::FetchTransport`
//! - `ApiClient`: 绑定基础地址的 JSON 客户端，负责错误归一化与状态码提示

use std::collections::BTreeMap;
use std::sync::Arc;

use feedapp_shared::protocol::{ApiRequest, HttpMethod};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ApiError, ConfigError, TransportError};
use crate::toast::{Notifier, ToastLevel};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 传输特性 (Trait)
///
/// (?Send) 是因为浏览器中的 fetch Future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// 状态码对应的提示文案
pub fn status_notification(status: u16) -> String {
    match status {
        401 => "Unauthorized.".to_string(),
        403 => "Forbidden.".to_string(),
        404 => "Not Found.".to_string(),
        other => format!("API Error: {}", other),
    }
}

// =========================================================
// API 客户端
// =========================================================

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// 创建客户端，基础地址为空时立即失败
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }

        Ok(Self {
            base_url: base_url.to_string(),
            token: None,
            transport,
            notifier,
        })
    }

    /// 返回携带 Bearer 令牌的副本
    pub fn with_token(&self, token: &str) -> Self {
        let mut client = self.clone();
        client.token = Some(token.to_string());
        client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(HttpMethod::Get, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(HttpMethod::Post, path, Some(encode(body)?)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(HttpMethod::Put, path, Some(encode(body)?)).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(HttpMethod::Patch, path, Some(encode(body)?)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(HttpMethod::Delete, path, None).await
    }

    /// 按 `ApiRequest` 声明的方法与路径发送请求
    pub async fn call<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let body = if R::METHOD.has_body() {
            Some(encode(request)?)
        } else {
            None
        };
        self.execute(R::METHOD, R::PATH, body).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let mut req = HttpRequest::new(&self.url(path), method)
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json");
        if let Some(token) = &self.token {
            req = req.with_header("Authorization", &format!("Bearer {}", token));
        }
        if let Some(body) = body {
            req = req.with_body(body);
        }

        let res = match self.transport.send(req).await {
            Ok(res) => res,
            Err(e) => {
                log::error!("[Api] {} {} failed: {}", method.as_str(), path, e);
                return Err(e.into());
            }
        };

        if !res.ok() {
            log::warn!("[Api] {} {} -> {}", method.as_str(), path, res.status);
            self.notifier
                .notify(ToastLevel::Error, status_notification(res.status));
            return Err(ApiError::from_status(res.status, &res.body));
        }

        decode(&res)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json_wasm::to_string(body)
        .map_err(|e| ApiError::new(format!("Failed to encode request body: {}", e)))
}

/// 空响应体按 JSON `null` 解析，使 `()` / `Option<T>` 可以接收 204
fn decode<T: DeserializeOwned>(res: &HttpResponse) -> Result<T, ApiError> {
    let text = if res.body.trim().is_empty() {
        "null"
    } else {
        res.body.as_str()
    };
    serde_json_wasm::from_str(text).map_err(|e| ApiError::decode(res.status, &res.body, e))
}

#[cfg(test)]
pub(crate) mod tests;
