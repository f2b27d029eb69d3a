/// Statistics of a video that was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStats {
    pub title: String,
    /// `YYYY-MM-DD`, or a placeholder when the API omits it.
    pub published_date: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// Outcome of fetching a single video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Found(VideoStats),
    /// Deleted, private or nonexistent.
    NotFound,
    Failed { error: String },
}

/// Per-video result fed to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: String,
    pub status: FetchStatus,
}

impl VideoRecord {
    #[must_use]
    pub fn found(id: impl Into<String>, stats: VideoStats) -> Self {
        Self {
            id: id.into(),
            status: FetchStatus::Found(stats),
        }
    }

    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: FetchStatus::NotFound,
        }
    }

    #[must_use]
    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: FetchStatus::Failed {
                error: error.into(),
            },
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, FetchStatus::Found(_))
    }

    #[inline]
    #[must_use]
    pub const fn stats(&self) -> Option<&VideoStats> {
        match &self.status {
            FetchStatus::Found(stats) => Some(stats),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed { error } => Some(error),
            _ => None,
        }
    }
}
