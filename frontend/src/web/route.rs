//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问规则。

use std::fmt::Display;

use feedapp_shared::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 注册页面
    Signup,
    /// 反馈表单 (仅 user)
    Feedback,
    /// 管理面板 (仅 admin)
    Dashboard,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 未知路径（包括 `/`）返回 `None`，由兜底规则决定去向。
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/login" => Some(Self::Login),
            "/signup" => Some(Self::Signup),
            "/feedback" => Some(Self::Feedback),
            "/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Feedback => "/feedback",
            Self::Dashboard => "/dashboard",
        }
    }

    /// **核心守卫规则：该路由允许访问的角色**
    ///
    /// `None` 表示公开路由。
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Dashboard => Some(&[Role::Admin]),
            Self::Feedback => Some(&[Role::User]),
            Self::Login | Self::Signup => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.allowed_roles().is_some()
    }

    /// 已登录用户是否应该离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 角色的默认页面
    pub fn home_for(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => Self::Dashboard,
            Some(Role::User) => Self::Feedback,
            None => Self::Login,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
