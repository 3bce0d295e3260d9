//! 通知提示模块
//!
//! `Notifier` 是对"弹出一条提示"的抽象，API 客户端只依赖该 trait；
//! `ToastContext` 是基于 Signal 的浏览器实现，由 `Toaster` 组件渲染在右上角。

use std::time::Duration;

use leptos::prelude::*;

/// 提示自动消失的时间
const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "alert alert-success shadow-lg",
            ToastLevel::Error => "alert alert-error shadow-lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// 提示发送者
pub trait Notifier: Send + Sync {
    fn notify(&self, level: ToastLevel, message: String);

    fn success(&self, message: &str) {
        self.notify(ToastLevel::Success, message.to_string());
    }

    fn error(&self, message: &str) {
        self.notify(ToastLevel::Error, message.to_string());
    }
}

/// 提示上下文
#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for ToastContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastContext {
    fn notify(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        log::debug!("[Toast] {:?}: {}", level, message);
        self.toasts.update(|list| list.push(Toast { id, level, message }));

        let ctx = *self;
        set_timeout(move || ctx.dismiss(id), TOAST_DURATION);
    }
}

/// 从 Context 获取提示上下文
pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 提示渲染组件（右上角）
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toasts();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.level.alert_class() on:click=move |_| ctx.dismiss(id)>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
