//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的会话信号来检查访问权限。
//!
//! - `Authenticator`: 不依赖 Signal 的认证逻辑（校验、登录请求、会话持久化）
//! - `AuthContext`: 在组件间共享的响应式状态

use std::sync::Arc;

use feedapp_shared::LoginRequest;
use leptos::prelude::*;

use crate::api::ApiClient;
use crate::error::AuthError;
use crate::session::{Session, SessionStore};

/// 密码最小长度
pub const MIN_PASSWORD_LEN: usize = 6;

/// 当前用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
}

impl User {
    /// 用户名取邮箱 `@` 之前的部分
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            email: email.to_string(),
            name,
        }
    }
}

/// 凭据基本校验：邮箱非空且密码不少于 `MIN_PASSWORD_LEN` 个字符
pub fn credentials_valid(email: &str, password: &str) -> bool {
    !email.trim().is_empty() && password.chars().count() >= MIN_PASSWORD_LEN
}

/// 登录成功的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user: User,
    pub session: Session,
}

/// 认证服务
#[derive(Clone)]
pub struct Authenticator {
    api: ApiClient,
    store: SessionStore,
}

impl Authenticator {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// 当前存储中的会话
    pub fn restore(&self) -> Session {
        self.store.load()
    }

    /// 登录：先本地校验，再请求 `POST /login`，成功后写入会话存储
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, AuthError> {
        if !credentials_valid(email, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let email = email.trim();
        let resp = self
            .api
            .call(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        let session = Session::new(resp.token.clone(), resp.role());
        if !self.store.save(&session) {
            log::warn!("[Auth] Session for {} is kept in memory only.", email);
        }
        log::info!("[Auth] Signed in as {} ({})", email, resp.role());

        Ok(SignedIn {
            user: User::from_email(email),
            session,
        })
    }

    /// 注册：后端未提供注册接口，仅做本地校验并返回用户身份（不产生令牌）
    pub fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if !credentials_valid(email, password) {
            return Err(AuthError::InvalidInput);
        }
        Ok(User::from_email(email.trim()))
    }

    /// 注销：清空标签页存储
    pub fn logout(&self) {
        self.store.clear();
    }

    /// 按会话绑定令牌的 API 客户端
    pub fn api_for(&self, session: &Session) -> ApiClient {
        match session.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => self.api.with_token(token),
            None => self.api.clone(),
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
/// 唯一的写入方是本模块的 login / signup / logout。
#[derive(Clone)]
pub struct AuthContext {
    /// 当前用户（仅内存）
    pub user: RwSignal<Option<User>>,
    /// 当前会话（与 sessionStorage 同步）
    pub session: RwSignal<Session>,
    authenticator: Arc<Authenticator>,
}

impl AuthContext {
    /// 创建新的认证上下文，会话从存储中恢复，用户身份为空
    pub fn new(authenticator: Authenticator) -> Self {
        let session = authenticator.restore();
        Self {
            user: RwSignal::new(None),
            session: RwSignal::new(session),
            authenticator: Arc::new(authenticator),
        }
    }

    /// 获取会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        let session = self.session;
        Signal::derive(move || session.get())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let signed_in = self.authenticator.login(email, password).await?;
        self.user.set(Some(signed_in.user.clone()));
        self.session.set(signed_in.session);
        Ok(signed_in.user)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.authenticator.signup(email, password)?;
        self.user.set(Some(user.clone()));
        Ok(user)
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的会话监听自动处理。
    pub fn logout(&self) {
        self.authenticator.logout();
        self.user.set(None);
        self.session.set(Session::default());
        log::info!("[Auth] Signed out.");
    }

    /// 携带当前令牌的 API 客户端
    pub fn api(&self) -> ApiClient {
        self.authenticator.api_for(&self.session.get_untracked())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{MockTransport, setup};
    use crate::session::memory::{MemoryStorage, UnavailableStorage};
    use crate::session::{ROLE_KEY, SessionBackend, TOKEN_KEY};
    use feedapp_shared::Role;

    fn authenticator(transport: MockTransport) -> (Arc<MockTransport>, Arc<MemoryStorage>, Authenticator) {
        let (transport, _, api) = setup(transport);
        let storage = Arc::new(MemoryStorage::default());
        let auth = Authenticator::new(api, SessionStore::new(storage.clone()));
        (transport, storage, auth)
    }

    #[test]
    fn credential_rules() {
        assert!(!credentials_valid("", "x"));
        assert!(!credentials_valid("", "123456"));
        assert!(!credentials_valid("   ", "123456"));
        assert!(!credentials_valid("a@b.com", "12345"));
        assert!(credentials_valid("a@b.com", "123456"));
    }

    #[tokio::test]
    async fn invalid_credentials_fail_without_a_request() {
        let (transport, storage, auth) = authenticator(MockTransport::default());

        assert_eq!(auth.login("", "x").await, Err(AuthError::InvalidCredentials));
        assert_eq!(
            auth.login("a@b.com", "12345").await,
            Err(AuthError::InvalidCredentials)
        );

        assert!(transport.requests().is_empty());
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn login_sets_user_and_persists_session() {
        let (transport, storage, auth) = authenticator(
            MockTransport::default().respond(200, "{\"token\":\"abc\",\"is_admin\":false}"),
        );

        let signed_in = auth.login("a@b.com", "123456").await.unwrap();

        assert_eq!(signed_in.user.email, "a@b.com");
        assert_eq!(signed_in.user.name, "a");
        assert_eq!(signed_in.session, Session::new("abc", Role::User));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("user"));
        assert_eq!(auth.restore(), signed_in.session);

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "https://api.test/login");
        assert_eq!(
            sent.body.as_deref(),
            Some("{\"email\":\"a@b.com\",\"password\":\"123456\"}")
        );
    }

    #[tokio::test]
    async fn admin_flag_maps_to_admin_role() {
        let (_, storage, auth) = authenticator(
            MockTransport::default().respond(200, "{\"token\":\"t\",\"is_admin\":true}"),
        );

        let signed_in = auth.login("root@b.com", "secret!").await.unwrap();

        assert_eq!(signed_in.session.role, Some(Role::Admin));
        assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn rejected_login_leaves_session_untouched() {
        let (_, storage, auth) = authenticator(MockTransport::default().respond(401, ""));

        let err = auth.login("a@b.com", "123456").await.unwrap_err();

        assert!(matches!(err, AuthError::Api(ref e) if e.is_status(401)));
        assert!(!err.is_validation());
        assert_eq!(storage.len(), 0);
    }

    #[test]
    fn signup_validates_input() {
        let (transport, _, auth) = authenticator(MockTransport::default());

        assert_eq!(auth.signup("", "123456"), Err(AuthError::InvalidInput));
        assert_eq!(auth.signup("a@b.com", "123"), Err(AuthError::InvalidInput));
        assert_eq!(auth.signup("new@b.com", "123456").unwrap(), User::from_email("new@b.com"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn logout_clears_storage() {
        let (_, storage, auth) = authenticator(MockTransport::default());
        storage.set(TOKEN_KEY, "abc");
        storage.set(ROLE_KEY, "admin");

        auth.logout();

        assert_eq!(auth.restore(), Session::default());
    }

    #[tokio::test]
    async fn api_client_carries_session_token() {
        let (transport, _, auth) = authenticator(
            MockTransport::default()
                .respond(200, "null")
                .respond(200, "null"),
        );

        auth.api_for(&Session::new("abc", Role::User))
            .get::<()>("/me")
            .await
            .unwrap();
        auth.api_for(&Session::default()).get::<()>("/me").await.unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert_eq!(requests[1].headers.get("Authorization"), None);
    }

    fn context(transport: MockTransport) -> (Arc<MemoryStorage>, AuthContext) {
        let (_, storage, auth) = authenticator(transport);
        (storage, AuthContext::new(auth))
    }

    #[tokio::test]
    async fn context_login_updates_shared_state() {
        let (_, ctx) = context(
            MockTransport::default().respond(200, "{\"token\":\"abc\",\"is_admin\":true}"),
        );
        assert_eq!(ctx.user.get_untracked(), None);

        let user = ctx.login("a@b.com", "123456").await.unwrap();

        assert_eq!(user.email, "a@b.com");
        assert_eq!(ctx.user.get_untracked().map(|u| u.email), Some("a@b.com".to_string()));
        assert_eq!(ctx.session.get_untracked(), Session::new("abc", Role::Admin));
    }

    #[tokio::test]
    async fn context_logout_clears_user_and_session() {
        let (storage, ctx) = context(
            MockTransport::default().respond(200, "{\"token\":\"abc\",\"is_admin\":false}"),
        );
        ctx.login("a@b.com", "123456").await.unwrap();
        assert_eq!(storage.len(), 2);

        ctx.logout();

        assert_eq!(ctx.user.get_untracked(), None);
        assert_eq!(ctx.session.get_untracked(), Session::default());
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn context_failed_login_keeps_state() {
        let (_, ctx) = context(MockTransport::default());

        assert_eq!(ctx.login("", "x").await, Err(AuthError::InvalidCredentials));
        assert_eq!(ctx.user.get_untracked(), None);
        assert!(!ctx.session.get_untracked().has_token());
    }

    #[tokio::test]
    async fn context_restores_session_from_storage() {
        let (transport, _, api) = setup(MockTransport::default());
        let storage = Arc::new(MemoryStorage::with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "user")]));
        let ctx = AuthContext::new(Authenticator::new(api, SessionStore::new(storage)));

        assert_eq!(ctx.session.get_untracked(), Session::new("abc", Role::User));
        assert_eq!(ctx.user.get_untracked(), None);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn login_succeeds_when_storage_is_unavailable() {
        let (_, _, api) = setup(
            MockTransport::default().respond(200, "{\"token\":\"abc\",\"is_admin\":false}"),
        );
        let auth = Authenticator::new(api, SessionStore::new(Arc::new(UnavailableStorage)));

        let signed_in = auth.login("a@b.com", "123456").await.unwrap();

        assert_eq!(signed_in.session, Session::new("abc", Role::User));
        assert_eq!(auth.restore(), Session::default());
    }
}
