//! 用户反馈前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::guard`: 路由守卫（纯函数）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth` / `session`: 认证状态与标签页会话存储
//! - `api`: HTTP 客户端与状态码提示
//! - `components`: UI 组件层

pub mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod feedback_form;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod signup;
}
pub mod config;
pub mod error;
mod session;
mod toast;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::{AuthContext, Authenticator};
use crate::components::dashboard::DashboardPage;
use crate::components::feedback_form::FeedbackPage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::signup::SignupPage;
use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::session::SessionStore;
use crate::toast::{ToastContext, Toaster};

use leptos::prelude::*;

// 浏览器 API 封装模块
// 只有这里直接接触 window / history / fetch / sessionStorage。
pub(crate) mod web {
    pub mod guard;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchTransport;
    pub use storage::SessionStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};
use web::{FetchTransport, SessionStorage};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
/// 到达这里的路由都已经过守卫。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Feedback => view! {
            <Layout>
                <FeedbackPage />
            </Layout>
        }
        .into_any(),
        AppRoute::Dashboard => view! {
            <Layout>
                <DashboardPage />
            </Layout>
        }
        .into_any(),
    }
}

/// 组装认证上下文：配置 -> HTTP 客户端 -> 会话存储 -> 认证服务
fn build_auth(config: &AppConfig, toasts: ToastContext) -> Result<AuthContext, ConfigError> {
    let api = ApiClient::new(
        &config.api_url,
        Arc::new(FetchTransport::new(config.request_timeout_ms)),
        Arc::new(toasts),
    )?;
    let store = SessionStore::new(Arc::new(SessionStorage));

    Ok(AuthContext::new(Authenticator::new(api, store)))
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 提示上下文最先提供，HTTP 客户端会用到它
    let toasts = ToastContext::new();
    provide_context(toasts);

    // 2. 读取配置并创建认证上下文（会话从 sessionStorage 恢复）
    let auth_ctx = match AppConfig::from_env().and_then(|config| {
        log::info!(
            "[App] API {} (timeout {}ms)",
            config.api_url,
            config.request_timeout_ms
        );
        build_auth(&config, toasts)
    }) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("[App] Invalid configuration: {}", e);
            return view! { <ConfigErrorPage message=e.to_string() /> }.into_any();
        }
    };
    provide_context(auth_ctx.clone());

    // 3. 获取会话信号，用于注入路由服务（解耦！）
    let session = auth_ctx.session_signal();

    view! {
        <Toaster />
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
    .into_any()
}

/// 配置错误页面
#[component]
fn ConfigErrorPage(message: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div role="alert" class="alert alert-error max-w-lg">
                <div>
                    <h1 class="font-bold">"Configuration error"</h1>
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}
