//! 面板统计数据
//!
//! 计数直接采用服务端汇总，平均分由客户端根据列表计算。
//! 所有派生值只用于展示。

use feedapp_shared::{Review, ReviewSummary, ReviewsApiResponse, Sentiment};

/// 评分取值范围
pub const RATING_SCALE: [u8; 5] = [1, 2, 3, 4, 5];

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub summary: ReviewSummary,
    /// 客户端计算的平均分，列表为空时为 0.0
    pub average_rating: f64,
    /// 每个评分（1-5）对应的评论数
    pub rating_distribution: [(u8, usize); 5],
}

impl DashboardStats {
    pub fn from_response(resp: &ReviewsApiResponse) -> Self {
        if let Some(warning) = consistency_warning(resp) {
            log::warn!("[Dashboard] {}", warning);
        }

        Self {
            summary: resp.summary,
            average_rating: average_rating(&resp.reviews),
            rating_distribution: rating_distribution(&resp.reviews),
        }
    }

    /// `x.x/5`
    pub fn average_label(&self) -> String {
        format!("{:.1}/5", self.average_rating)
    }

    /// 情感分布：(分类, 数量, 占总数百分比)
    pub fn sentiment_breakdown(&self) -> Vec<(Sentiment, u64, f64)> {
        Sentiment::ALL
            .into_iter()
            .map(|sentiment| {
                let count = self.summary.count_of(sentiment);
                (sentiment, count, percent(count, self.summary.total_reviews))
            })
            .collect()
    }

    /// 评分分布中的最大值，用于柱状图缩放
    pub fn max_rating_count(&self) -> usize {
        self.rating_distribution
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0)
    }
}

pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    sum as f64 / reviews.len() as f64
}

pub fn rating_distribution(reviews: &[Review]) -> [(u8, usize); 5] {
    RATING_SCALE.map(|rating| (rating, reviews.iter().filter(|r| r.rating == rating).count()))
}

/// 百分比，总数为 0 时为 0
pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// 汇总与列表不一致时的诊断信息
pub fn consistency_warning(resp: &ReviewsApiResponse) -> Option<String> {
    let summary = &resp.summary;
    if !summary.is_consistent() {
        return Some(format!(
            "Summary counts ({} + {} + {} + {}) do not add up to total {}",
            summary.positive, summary.neutral, summary.negative, summary.unknown, summary.total_reviews
        ));
    }
    if summary.total_reviews != resp.reviews.len() as u64 {
        return Some(format!(
            "Summary total {} differs from {} fetched reviews",
            summary.total_reviews,
            resp.reviews.len()
        ));
    }
    None
}

/// 评分徽章颜色：>=4 绿，>=3 黄，其余红
pub fn rating_badge_class(rating: u8) -> &'static str {
    match rating {
        4.. => "badge badge-success",
        3 => "badge badge-warning",
        _ => "badge badge-error",
    }
}

pub fn sentiment_badge_class(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "badge badge-success badge-outline",
        Sentiment::Neutral => "badge badge-warning badge-outline",
        Sentiment::Negative => "badge badge-error badge-outline",
        Sentiment::Unknown => "badge badge-ghost",
    }
}

pub fn sentiment_bar_class(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "progress progress-success",
        Sentiment::Neutral => "progress progress-warning",
        Sentiment::Negative => "progress progress-error",
        Sentiment::Unknown => "progress",
    }
}
