use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 存储与传输形式为 `"admin"` / `"user"`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// 解析存储中的角色字符串，无法识别时返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// 登录响应只携带 `is_admin` 标志
    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin { Role::Admin } else { Role::User }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 情感分类标签
///
/// 后端返回的大小写并不统一（例如 `"Unknown"`），
/// 因此通过字符串做宽松解析，无法识别的标签一律归为 `Unknown`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    #[default]
    Unknown,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::Unknown,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Unknown => "unknown",
        }
    }

    /// 面向界面的标题形式
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::Unknown => "Unknown",
        }
    }
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        Sentiment::parse(&value)
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单条反馈记录（只读，由服务端创建）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    pub email: String,
    pub comment: String,
    /// 1-5 的整数评分
    pub rating: u8,
    #[serde(default)]
    pub sentiment: Sentiment,
    pub created_at: String,
}

/// 服务端预先聚合的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total_reviews: u64,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    #[serde(default)]
    pub unknown: u64,
}

impl ReviewSummary {
    pub fn count_of(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
            Sentiment::Unknown => self.unknown,
        }
    }

    /// 各分类之和是否等于总数（客户端不强制，仅用于诊断）
    ///
    /// 计数来自服务端，求和溢出同样视为不一致。
    pub fn is_consistent(&self) -> bool {
        [self.positive, self.neutral, self.negative, self.unknown]
            .into_iter()
            .try_fold(0u64, u64::checked_add)
            .is_some_and(|sum| sum == self.total_reviews)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewsApiResponse {
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
}

// =========================================================
// 请求 / 响应体
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl LoginResponse {
    pub fn role(&self) -> Role {
        Role::from_is_admin(self.is_admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub predicted_sentiment: Sentiment,
}
