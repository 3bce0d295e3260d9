//! 运行配置模块
//!
//! 配置在构建时通过环境变量注入（`option_env!`），与 Trunk 的构建流程配合：
//!
//! ```text
//! FEEDAPP_API_URL=https://api.example.com trunk build --release
//! ```

use std::str::FromStr;

use crate::error::ConfigError;

/// API 基础地址（必填）
pub const API_URL_VAR: &str = "FEEDAPP_API_URL";
/// 请求超时（毫秒）
pub const API_TIMEOUT_VAR: &str = "FEEDAPP_API_TIMEOUT_MS";
/// 日志级别（error / warn / info / debug / trace）
pub const LOG_LEVEL_VAR: &str = "FEEDAPP_LOG_LEVEL";

pub const DEFAULT_TIMEOUT_MS: u32 = 60_000;
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端 API 地址（已去除末尾的 `/`）
    pub api_url: String,
    /// 单个请求的超时时间
    pub request_timeout_ms: u32,
}

impl AppConfig {
    /// 从构建时环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("FEEDAPP_API_URL"), option_env!("FEEDAPP_API_TIMEOUT_MS"))
    }

    /// 从原始值构建配置
    ///
    /// API 地址缺失或为空时立即失败；超时未设置时使用默认值。
    pub fn from_values(api_url: Option<&str>, timeout_ms: Option<&str>) -> Result<Self, ConfigError> {
        let api_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingApiUrl)?
            .to_string();

        let request_timeout_ms = match timeout_ms.map(str::trim).filter(|v| !v.is_empty()) {
            None => DEFAULT_TIMEOUT_MS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(ms) if ms > 0 => ms,
                _ => return Err(ConfigError::InvalidTimeout(raw.to_string())),
            },
        };

        Ok(Self {
            api_url,
            request_timeout_ms,
        })
    }
}

/// 读取日志级别
///
/// 日志在配置校验之前就需要初始化，因此单独提供。
/// 无效取值回退到默认级别，错误一并返回，由调用方在日志就绪后输出。
pub fn log_level() -> (log::Level, Option<ConfigError>) {
    level_or_default(option_env!("FEEDAPP_LOG_LEVEL"))
}

pub fn level_or_default(raw: Option<&str>) -> (log::Level, Option<ConfigError>) {
    match parse_log_level(raw) {
        Ok(level) => (level, None),
        Err(e) => (DEFAULT_LOG_LEVEL, Some(e)),
    }
}

pub fn parse_log_level(raw: Option<&str>) -> Result<log::Level, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_LOG_LEVEL),
        Some(value) => {
            log::Level::from_str(value).map_err(|_| ConfigError::InvalidLogLevel(value.to_string()))
        }
    }
}
