//! 会话模块
//!
//! 会话 = 令牌 + 角色，生命周期与浏览器标签页一致（`sessionStorage`）。
//! 存储后端通过 `SessionBackend` 注入，浏览器实现见 `web::SessionStorage`。

use std::sync::Arc;

use feedapp_shared::Role;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";

/// 当前会话
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
        }
    }

    /// 空令牌视为未登录
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// 键值存储后端
pub trait SessionBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
    fn clear(&self) -> bool;
}

/// 会话存储
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// 读取当前会话，无法识别的角色按"无角色"处理
    pub fn load(&self) -> Session {
        let token = self.backend.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let role = self.backend.get(ROLE_KEY).and_then(|r| Role::parse(&r));
        Session { token, role }
    }

    /// 写入会话，任一键写入失败时返回 `false`
    ///
    /// 写入失败（配额不足、隐私模式等）不会中断登录，会话仅保留在内存中。
    pub fn save(&self, session: &Session) -> bool {
        let token_saved = match &session.token {
            Some(token) => self.backend.set(TOKEN_KEY, token),
            None => self.backend.remove(TOKEN_KEY),
        };
        if !token_saved {
            log::warn!("[Session] Failed to persist '{}'.", TOKEN_KEY);
        }

        let role_saved = match session.role {
            Some(role) => self.backend.set(ROLE_KEY, role.as_str()),
            None => self.backend.remove(ROLE_KEY),
        };
        if !role_saved {
            log::warn!("[Session] Failed to persist '{}'.", ROLE_KEY);
        }

        token_saved && role_saved
    }

    /// 清空整个标签页存储
    pub fn clear(&self) {
        if !self.backend.clear() {
            log::warn!("[Session] Failed to clear session storage.");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::memory::{MemoryStorage, UnavailableStorage};
    use super::*;

    #[test]
    fn save_then_load_uses_raw_keys() {
        let backend = Arc::new(MemoryStorage::default());
        let store = SessionStore::new(backend.clone());

        assert!(store.save(&Session::new("abc", Role::Admin)));

        assert_eq!(backend.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(backend.get(ROLE_KEY).as_deref(), Some("admin"));
        assert_eq!(store.load(), Session::new("abc", Role::Admin));
    }

    #[test]
    fn empty_storage_is_anonymous() {
        let store = SessionStore::new(Arc::new(MemoryStorage::default()));
        let session = store.load();
        assert!(!session.has_token());
        assert_eq!(session.role, None);
    }

    #[test]
    fn empty_token_and_unknown_role_are_ignored() {
        let backend = MemoryStorage::with(&[(TOKEN_KEY, ""), (ROLE_KEY, "superuser")]);
        let store = SessionStore::new(Arc::new(backend));
        assert_eq!(store.load(), Session::default());
    }

    #[test]
    fn clear_removes_everything() {
        let backend = Arc::new(MemoryStorage::with(&[("unrelated", "1")]));
        let store = SessionStore::new(backend.clone());
        store.save(&Session::new("abc", Role::User));

        store.clear();

        assert_eq!(backend.len(), 0);
        assert_eq!(store.load(), Session::default());
    }

    #[test]
    fn failed_writes_are_reported() {
        let store = SessionStore::new(Arc::new(UnavailableStorage));

        assert!(!store.save(&Session::new("abc", Role::User)));
        assert!(!store.save(&Session::default()));
        assert_eq!(store.load(), Session::default());
        store.clear();
    }
}
