//! 反馈表单
//!
//! 评分 1-5 + 评论，提交后展示服务端预测的情感。

use feedapp_shared::{FeedbackRequest, Sentiment};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::Star;
use crate::toast::{Notifier, use_toasts};

const RATINGS: [u8; 5] = [1, 2, 3, 4, 5];

/// 表单校验：评分必须在 1-5 之间，评论不能为空白
pub fn validate_feedback(rating: u8, comment: &str) -> Result<FeedbackRequest, &'static str> {
    if !RATINGS.contains(&rating) {
        return Err("Please select a rating.");
    }
    if comment.trim().is_empty() {
        return Err("Please enter a comment.");
    }
    Ok(FeedbackRequest {
        rating,
        comment: comment.trim().to_string(),
    })
}

/// 情感结果的配色
pub fn sentiment_class(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "alert alert-success",
        Sentiment::Negative => "alert alert-error",
        Sentiment::Neutral | Sentiment::Unknown => "alert",
    }
}

/// 表单状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，方便在闭包间传递。
#[derive(Clone, Copy)]
struct FeedbackFormState {
    rating: RwSignal<u8>,
    comment: RwSignal<String>,
}

impl FeedbackFormState {
    fn new() -> Self {
        Self {
            rating: RwSignal::new(0),
            comment: RwSignal::new(String::new()),
        }
    }

    fn to_request(&self) -> Result<FeedbackRequest, &'static str> {
        self.comment
            .with_untracked(|comment| validate_feedback(self.rating.get_untracked(), comment))
    }
}

#[component]
pub fn FeedbackPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let form = FeedbackFormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<&'static str>::None);
    let (predicted, set_predicted) = signal(Option::<Sentiment>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let request = match form.to_request() {
            Ok(req) => req,
            Err(msg) => {
                set_error_msg.set(Some(msg));
                return;
            }
        };
        set_error_msg.set(None);
        set_is_submitting.set(true);

        let api = auth.api();
        spawn_local(async move {
            match api.call(&request).await {
                Ok(resp) => {
                    toasts.success(&resp.message);
                    set_predicted.set(Some(resp.predicted_sentiment));
                }
                Err(e) => {
                    log::error!("[Feedback] Submit failed: {}", e);
                    toasts.error("Failed to submit feedback. Please try again.");
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title text-2xl mb-4">"Share Your Feedback"</h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-warning text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="form-control">
                    <label class="label">
                        <span class="label-text font-medium">"How would you rate your experience?"</span>
                    </label>
                    <div class="flex gap-2">
                        {RATINGS
                            .into_iter()
                            .map(|star| {
                                let class = move || {
                                    if form.rating.get() >= star {
                                        "btn btn-circle btn-warning"
                                    } else {
                                        "btn btn-circle btn-ghost bg-base-200"
                                    }
                                };
                                view! {
                                    <button type="button" class=class on:click=move |_| form.rating.set(star)>
                                        {star}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                <div class="form-control">
                    <label class="label" for="comment">
                        <span class="label-text font-medium">"Your Comments"</span>
                    </label>
                    <textarea
                        id="comment"
                        rows="5"
                        class="textarea textarea-bordered"
                        on:input=move |ev| form.comment.set(event_target_value(&ev))
                        prop:value=form.comment
                    ></textarea>
                </div>

                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                        } else {
                            "Submit Feedback".into_any()
                        }}
                    </button>
                </div>

                {move || predicted.get().map(|sentiment| view! {
                    <div class=format!("{} mt-6 font-semibold", sentiment_class(sentiment))>
                        <Star attr:class="h-5 w-5" />
                        <span>"Predicted Sentiment: " {sentiment.as_str().to_uppercase()}</span>
                    </div>
                })}
            </form>
        </div>
    }
}
