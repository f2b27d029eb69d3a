use crate::{extract::shorts_url, record::VideoRecord};
use chrono::NaiveDateTime;
use teloxide::utils::markdown::{escape, escape_link_url};

/// Number of videos listed in the ranking.
pub const TOP_N: usize = 5;

const TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopVideo {
    pub id: String,
    pub title: String,
    pub views: u64,
}

/// Aggregated statistics of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    /// Processed videos with no views. Still part of the totals.
    pub zero_views: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub avg_views: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    pub top: Vec<TopVideo>,
}

impl AggregateReport {
    /// Aggregate records in extraction order.
    #[must_use]
    pub fn build(records: &[VideoRecord]) -> Self {
        let processed = records
            .iter()
            .filter_map(|r| r.stats().map(|s| (r.id.as_str(), s)))
            .collect::<Vec<_>>();

        let total_views = sum(processed.iter().map(|(_, s)| s.views));
        let total_likes = sum(processed.iter().map(|(_, s)| s.likes));
        let total_comments = sum(processed.iter().map(|(_, s)| s.comments));
        let count = processed.len() as u64;
        let avg = |total: u64| total.checked_div(count).unwrap_or(0);

        // stable sort: equal view counts keep extraction order
        let mut ranked = processed.clone();
        ranked.sort_by(|(_, a), (_, b)| b.views.cmp(&a.views));
        let top = ranked
            .into_iter()
            .take(TOP_N)
            .map(|(id, s)| TopVideo {
                id: id.to_string(),
                title: s.title.clone(),
                views: s.views,
            })
            .collect();

        Self {
            total: records.len(),
            processed: processed.len(),
            failed: records.len() - processed.len(),
            zero_views: processed.iter().filter(|(_, s)| s.views == 0).count(),
            total_views,
            total_likes,
            total_comments,
            avg_views: avg(total_views),
            avg_likes: avg(total_likes),
            avg_comments: avg(total_comments),
            top,
        }
    }

    /// Render the report as Telegram `MarkdownV2`.
    #[must_use]
    pub fn render(&self, now: NaiveDateTime) -> String {
        let mut lines = vec![
            format!(
                "📊 *Statistics* \\({} of {} successful\\) 📈",
                self.processed, self.total
            ),
            String::new(),
            field("📌", "Processed", self.processed),
            field("ℹ️", "Not found / failed", self.failed),
            field("⛔", "Zero views", self.zero_views),
            field("👁️", "Total views", self.total_views),
            field("❤️", "Total likes", self.total_likes),
            field("💬", "Total comments", self.total_comments),
            String::new(),
            "📈 *Average per video:*".to_string(),
            format!(
                "👁️ {}  ❤️ {}  💬 {}",
                self.avg_views, self.avg_likes, self.avg_comments
            ),
            String::new(),
            format!("🌐 *Top {TOP_N} videos:*"),
        ];

        if self.top.is_empty() {
            lines.push(escape("No videos."));
        }
        lines.extend(self.top.iter().enumerate().map(|(rank, video)| {
            format!(
                "{}\\. [{}]({}) 👁️ {}",
                rank + 1,
                escape(&video.title),
                escape_link_url(&shorts_url(&video.id)),
                video.views
            )
        }));

        lines.push(String::new());
        lines.push(format!(
            "_Updated: {}_",
            escape(&now.format(TIME_FORMAT).to_string())
        ));
        lines.join("\n")
    }
}

/// Counts come straight from the API, so clamp instead of overflowing.
fn sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

fn field(icon: &str, label: &str, value: impl std::fmt::Display) -> String {
    format!("{icon} *{}:* {value}", escape(label))
}
