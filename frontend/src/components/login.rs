use crate::auth::use_auth;
use crate::components::icons::{Eye, EyeOff, Lock, Mail, User};
use crate::toast::{Notifier, use_toasts};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_is_submitting.set(true);
            set_error_msg.set(None);

            let auth = auth.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match auth.login(&email.get_untracked(), &password.get_untracked()).await {
                    Ok(_) => {
                        toasts.success("Login Successfully");
                        let home = AppRoute::home_for(auth.session.get_untracked().role);
                        navigate(home.to_path());
                    }
                    // 本地校验失败：就地提示，不弹窗
                    Err(e) if e.is_validation() => set_error_msg.set(Some(e.to_string())),
                    Err(e) => {
                        log::error!("[Auth] Login error: {}", e);
                        toasts.error("Login failed. Please try again.");
                    }
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary rounded-full text-primary-content">
                            <User attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                        <p class="text-base-content/70">"Sign in to your account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email Address"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Mail attr:class="h-5 w-5 opacity-50" />
                                <input
                                    id="email"
                                    type="email"
                                    class="grow"
                                    placeholder="Enter your email"
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                    required
                                />
                            </label>
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Lock attr:class="h-5 w-5 opacity-50" />
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    class="grow"
                                    placeholder="Enter your password"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    required
                                />
                                <button
                                    type="button"
                                    class="btn btn-ghost btn-xs btn-circle"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() {
                                        view! { <EyeOff attr:class="h-5 w-5 opacity-50" /> }.into_any()
                                    } else {
                                        view! { <Eye attr:class="h-5 w-5 opacity-50" /> }.into_any()
                                    }}
                                </button>
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing In..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-sm text-base-content/70">
                    "Don't have an account? "
                    <button class="link link-primary font-medium" on:click=move |_| navigate(AppRoute::Signup.to_path())>
                        "Sign up"
                    </button>
                </p>
            </div>
        </div>
    }
}
