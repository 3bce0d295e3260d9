//! 错误类型模块
//!
//! - `ConfigError`: 启动时的配置错误
//! - `ApiError`: 统一的 HTTP 调用错误 `{message, status?, data?}`
//! - `AuthError`: 认证操作的失败结果
//! - `TransportError`: 传输层（fetch）错误

use std::fmt;

use crate::config::{API_TIMEOUT_VAR, API_URL_VAR, LOG_LEVEL_VAR};

// =========================================================
// 配置错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 未配置 API 地址
    MissingApiUrl,
    /// 超时配置不是正整数
    InvalidTimeout(String),
    /// 无法识别的日志级别
    InvalidLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiUrl => {
                write!(f, "Missing API URL: set {} at build time", API_URL_VAR)
            }
            ConfigError::InvalidTimeout(raw) => {
                write!(f, "{} must be a positive integer, got '{}'", API_TIMEOUT_VAR, raw)
            }
            ConfigError::InvalidLogLevel(raw) => {
                write!(f, "{} is not a valid log level: '{}'", LOG_LEVEL_VAR, raw)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =========================================================
// 传输层错误
// =========================================================

/// 请求未能得到任何响应（网络中断、超时、请求构建失败）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

// =========================================================
// API 错误
// =========================================================

/// 归一化后的 API 错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    /// HTTP 状态码（网络错误时为 None）
    pub status: Option<u16>,
    /// 响应体原文
    pub data: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// 非 2xx 响应
    pub fn from_status(status: u16, body: &str) -> Self {
        Self {
            message: format!("Request failed with status code {}", status),
            status: Some(status),
            data: non_empty(body),
        }
    }

    /// 成功响应但响应体无法解析
    pub fn decode(status: u16, body: &str, reason: impl fmt::Display) -> Self {
        Self {
            message: format!("Invalid response body: {}", reason),
            status: Some(status),
            data: non_empty(body),
        }
    }

    pub fn is_status(&self, status: u16) -> bool {
        self.status == Some(status)
    }
}

fn non_empty(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::new(e.message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

// =========================================================
// 认证错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 登录凭据不合法（邮箱为空或密码过短）
    InvalidCredentials,
    /// 注册输入不合法
    InvalidInput,
    /// 两次输入的密码不一致
    PasswordMismatch,
    /// 服务端调用失败
    Api(ApiError),
}

impl AuthError {
    /// 是否为应在表单内联显示的校验错误
    pub fn is_validation(&self) -> bool {
        !matches!(self, AuthError::Api(_))
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => f.write_str("Invalid credentials"),
            AuthError::InvalidInput => f.write_str("Invalid input"),
            AuthError::PasswordMismatch => f.write_str("Passwords do not match"),
            AuthError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        AuthError::Api(e)
    }
}
