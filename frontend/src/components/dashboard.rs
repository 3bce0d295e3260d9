use crate::auth::use_auth;
use crate::components::icons::{Logs, Star};
use feedapp_shared::date::format_date;
use feedapp_shared::protocol::ListFeedbackRequest;
use feedapp_shared::{Review, ReviewsApiResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

mod stats;

use stats::{DashboardStats, rating_badge_class, sentiment_badge_class, sentiment_bar_class};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let (data, set_data) = signal(ReviewsApiResponse::default());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    // 挂载时加载一次，不自动刷新
    let api = auth.api();
    spawn_local(async move {
        match api.call(&ListFeedbackRequest).await {
            Ok(resp) => {
                log::info!("[Dashboard] Loaded {} reviews", resp.reviews.len());
                set_data.set(resp);
            }
            Err(e) => {
                log::error!("[Dashboard] Failed to load feedback: {}", e);
                set_load_error.set(Some(e.message));
            }
        }
        set_loading.set(false);
    });

    let stats = Memo::new(move |_| data.with(DashboardStats::from_response));

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-[50vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <h1 class="text-3xl font-bold">"Feedback Analytics Dashboard"</h1>

            <Show when=move || load_error.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>"Failed to load feedback: " {move || load_error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <StatCards stats=stats />

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                <SentimentBreakdown stats=stats />
                <RatingDistribution stats=stats />
            </div>

            <ReviewsTable reviews=Signal::derive(move || data.with(|d| d.reviews.clone())) />
        </Show>
    }
}

/// 统计卡片
#[component]
fn StatCards(stats: Memo<DashboardStats>) -> impl IntoView {
    let summary = move || stats.with(|s| s.summary);

    view! {
        <div class="stats shadow w-full stats-vertical lg:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-figure text-primary">
                    <Logs attr:class="h-8 w-8" />
                </div>
                <div class="stat-title">"Total Reviews"</div>
                <div class="stat-value text-primary">{move || summary().total_reviews}</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-warning">
                    <Star attr:class="h-8 w-8" />
                </div>
                <div class="stat-title">"Average Rating"</div>
                <div class="stat-value">{move || stats.with(DashboardStats::average_label)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Positive"</div>
                <div class="stat-value text-success">{move || summary().positive}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Neutral"</div>
                <div class="stat-value text-warning">{move || summary().neutral}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Negative"</div>
                <div class="stat-value text-error">{move || summary().negative}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Unknown"</div>
                <div class="stat-value text-base-content/60">{move || summary().unknown}</div>
            </div>
        </div>
    }
}

/// 情感分布（占比条）
#[component]
fn SentimentBreakdown(stats: Memo<DashboardStats>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Sentiment Distribution"</h3>
                {move || {
                    stats
                        .with(DashboardStats::sentiment_breakdown)
                        .into_iter()
                        .map(|(sentiment, count, pct)| view! {
                            <div class="space-y-1">
                                <div class="flex justify-between text-sm">
                                    <span class="font-medium">{sentiment.label()}</span>
                                    <span class="text-base-content/70">
                                        {format!("{} reviews ({:.1}%)", count, pct)}
                                    </span>
                                </div>
                                <progress class=format!("{} w-full", sentiment_bar_class(sentiment)) value=pct max="100"></progress>
                            </div>
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// 评分分布（柱状图）
#[component]
fn RatingDistribution(stats: Memo<DashboardStats>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Rating Distribution"</h3>
                <div class="flex items-end justify-around h-48 gap-4">
                    {move || {
                        let (distribution, max) = stats.with(|s| (s.rating_distribution, s.max_rating_count()));
                        distribution
                            .into_iter()
                            .map(|(rating, count)| {
                                let height = if max == 0 { 0 } else { count * 100 / max };
                                view! {
                                    <div class="flex flex-col items-center justify-end h-full flex-1 gap-1">
                                        <span class="text-xs text-base-content/70">{count}</span>
                                        <div class="w-full bg-primary rounded-t" style=format!("height: {}%", height)></div>
                                        <span class="text-sm font-medium">{rating}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}

/// 评论列表
#[component]
fn ReviewsTable(reviews: Signal<Vec<Review>>) -> impl IntoView {
    let is_empty = move || reviews.with(|r| r.is_empty());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="p-6 pb-2">
                    <h3 class="card-title">"Recent Reviews"</h3>
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"User"</th>
                                <th>"Rating"</th>
                                <th>"Comment"</th>
                                <th>"Sentiment"</th>
                                <th class="hidden md:table-cell">"Date"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=is_empty>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No feedback yet."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || reviews.get()
                                key=|review| review.id
                                children=move |review| {
                                    view! {
                                        <tr>
                                            <td class="font-mono text-sm">{review.email}</td>
                                            <td>
                                                <span class=rating_badge_class(review.rating)>
                                                    {review.rating} "/5"
                                                </span>
                                            </td>
                                            <td class="max-w-md">{review.comment}</td>
                                            <td>
                                                <span class=sentiment_badge_class(review.sentiment)>
                                                    {review.sentiment.label()}
                                                </span>
                                            </td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {format_date(&review.created_at)}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
