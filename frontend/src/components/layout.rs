//! 受保护页面的外壳：导航栏 + 内容区

use feedapp_shared::Role;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{LogOut, Logs, User};
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 页面布局
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <NavBar />
            <main class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">{children()}</main>
        </div>
    }
}

/// 导航栏
///
/// 注销后的跳转由路由服务的会话监听完成。
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;

    let role = move || session.with(|s| s.role);
    let role_label = move || role().map(|r| r.as_str()).unwrap_or("guest");
    // 用户身份只在本次登录后存在于内存中，刷新页面后仅显示角色
    let user = auth.user;
    let user_name = move || user.with(|u| u.as_ref().map(|u| u.name.clone()));

    let on_logout = {
        let auth = auth.clone();
        move |_| auth.logout()
    };

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1 gap-2">
                <Logs attr:class="text-primary h-6 w-6" />
                <span class="text-xl font-bold px-2">"Feedback Portal"</span>
                {move || match role() {
                    Some(Role::Admin) => view! {
                        <Link to=AppRoute::Dashboard class="btn btn-ghost btn-sm" active_class="btn-active">
                            "Dashboard"
                        </Link>
                    }
                    .into_any(),
                    Some(Role::User) => view! {
                        <Link to=AppRoute::Feedback class="btn btn-ghost btn-sm" active_class="btn-active">
                            "Feedback"
                        </Link>
                    }
                    .into_any(),
                    None => ().into_any(),
                }}
            </div>
            <div class="flex-none gap-2">
                {move || user_name().map(|name| view! {
                    <span class="text-sm font-medium hidden md:inline">{name}</span>
                })}
                <span class="badge badge-neutral gap-1">
                    <User attr:class="h-3 w-3" />
                    "Role: " {role_label}
                </span>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" />
                    "Logout"
                </button>
            </div>
        </div>
    }
}
