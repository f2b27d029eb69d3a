use crate::{
    error::Result,
    record::{VideoRecord, VideoStats},
};
use futures::{StreamExt, stream};
use tracing::{info, warn};

/// Source of per-video statistics.
#[async_trait::async_trait]
pub trait StatsSource: Send + Sync {
    /// Look up a single video.
    ///
    /// `Ok(None)` means the video does not exist (or is private/deleted);
    /// any other failure is an `Err`.
    async fn lookup(&self, id: &str) -> Result<Option<VideoStats>>;
}

/// Fetch one video and fold every outcome into a [`VideoRecord`].
pub async fn fetch_video_stats<S>(source: &S, id: &str) -> VideoRecord
where
    S: StatsSource + ?Sized,
{
    match source.lookup(id).await {
        Ok(Some(stats)) => VideoRecord::found(id, stats),
        Ok(None) => {
            info!(id = %id, "video not found");
            VideoRecord::not_found(id)
        }
        Err(err) => {
            warn!(id = %id, %err, "failed to fetch video");
            VideoRecord::failed(id, err.to_string())
        }
    }
}

/// Fetch a batch of videos with at most `concurrency` requests in flight.
///
/// Records are returned in the order of `ids`, regardless of which request
/// finishes first.
pub async fn fetch_batch<S>(source: &S, ids: &[String], concurrency: usize) -> Vec<VideoRecord>
where
    S: StatsSource + ?Sized,
{
    info!(videos = ids.len(), concurrency, "fetching batch");
    let lookups: Vec<_> = ids.iter().map(|id| fetch_video_stats(source, id)).collect();
    stream::iter(lookups)
        .buffered(concurrency.max(1))
        .collect()
        .await
}
