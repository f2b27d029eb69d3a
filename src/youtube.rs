use crate::{
    config::YoutubeConfig,
    error::{Error, Result},
    fetch::StatsSource,
    record::VideoStats,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const PARTS: &str = "snippet,statistics";
const NO_TITLE: &str = "No title";
const UNKNOWN_DATE: &str = "Unknown date";
const DATE_LEN: usize = 10;

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

/// `YouTube Data API v3` client for the `videos` endpoint.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: Client,
    api_url: Url,
    api_key: String,
}

impl YoutubeClient {
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be built.
    pub fn new(config: &YoutubeConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait::async_trait]
impl StatsSource for YoutubeClient {
    async fn lookup(&self, id: &str) -> Result<Option<VideoStats>> {
        debug!(id = %id, "requesting video statistics");
        let response = self
            .http
            .get(self.api_url.clone())
            .query(&[("part", PARTS), ("id", id), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_video_list(status, &body)
    }
}

/// Map a `videos.list` response body to the stats of its first item.
fn parse_video_list(status: reqwest::StatusCode, body: &str) -> Result<Option<VideoStats>> {
    let parsed = serde_json::from_str::<VideoListResponse>(body);

    let response = match parsed {
        Ok(VideoListResponse {
            error: Some(err), ..
        }) => return Err(Error::Api(err.message)),
        _ if !status.is_success() => return Err(Error::Status(status)),
        parsed => parsed?,
    };

    response
        .items
        .into_iter()
        .next()
        .map(video_stats)
        .transpose()
}

fn video_stats(item: VideoItem) -> Result<VideoStats> {
    let Snippet {
        title,
        published_at,
    } = item.snippet;

    let published_date = published_at.map_or_else(
        || UNKNOWN_DATE.to_string(),
        |date| date.chars().take(DATE_LEN).collect(),
    );

    Ok(VideoStats {
        title: title.unwrap_or_else(|| NO_TITLE.to_string()),
        published_date,
        views: parse_count("viewCount", item.statistics.view_count)?,
        likes: parse_count("likeCount", item.statistics.like_count)?,
        comments: parse_count("commentCount", item.statistics.comment_count)?,
    })
}

fn parse_count(field: &str, value: Option<String>) -> Result<u64> {
    value.map_or(Ok(0), |v| {
        v.parse()
            .map_err(|_| Error::parse(format!("invalid {field}: {v:?}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn full_item() {
        let body = r#"{
            "items": [{
                "id": "aaaaaaaaaaa",
                "snippet": {"title": "Cat *jumps*", "publishedAt": "2024-03-05T12:00:00Z"},
                "statistics": {"viewCount": "1500", "likeCount": "30", "commentCount": "4"}
            }]
        }"#;
        let stats = parse_video_list(StatusCode::OK, body)
            .expect("parse")
            .expect("found");
        assert_eq!(
            stats,
            VideoStats {
                title: "Cat *jumps*".into(),
                published_date: "2024-03-05".into(),
                views: 1500,
                likes: 30,
                comments: 4,
            }
        );
    }

    #[test]
    fn missing_fields_default() {
        let body = r#"{"items": [{"snippet": {}, "statistics": {}}]}"#;
        let stats = parse_video_list(StatusCode::OK, body)
            .expect("parse")
            .expect("found");
        assert_eq!(stats.title, NO_TITLE);
        assert_eq!(stats.published_date, UNKNOWN_DATE);
        assert_eq!((stats.views, stats.likes, stats.comments), (0, 0, 0));
    }

    #[test]
    fn empty_or_missing_items() {
        assert_eq!(
            parse_video_list(StatusCode::OK, r#"{"items": []}"#).expect("parse"),
            None
        );
        assert_eq!(
            parse_video_list(StatusCode::OK, r#"{"kind": "youtube#videoListResponse"}"#)
                .expect("parse"),
            None
        );
    }

    #[test]
    fn api_error_body() {
        let body = r#"{"error": {"code": 403, "message": "quota exceeded"}}"#;
        let err = parse_video_list(StatusCode::FORBIDDEN, body).unwrap_err();
        assert!(matches!(err, Error::Api(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn bad_status_without_error_body() {
        let err = parse_video_list(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
        assert!(matches!(err, Error::Status(code) if code == StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn malformed_shapes() {
        let err = parse_video_list(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let body = r#"{"items": [{"snippet": {"title": "x"}}]}"#;
        assert!(matches!(
            parse_video_list(StatusCode::OK, body),
            Err(Error::Parse(_))
        ));

        let body = r#"{"items": [{"snippet": {}, "statistics": {"viewCount": "many"}}]}"#;
        assert!(matches!(
            parse_video_list(StatusCode::OK, body),
            Err(Error::Parse(_))
        ));
    }
}
