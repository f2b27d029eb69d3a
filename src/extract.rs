use regex::Regex;
use std::{collections::HashSet, sync::OnceLock};

/// Maximum number of distinct videos processed from a single message.
pub const MAX_LINKS: usize = 100;

/// Length of a `YouTube` video id.
pub const SHORT_ID_LEN: usize = 11;

static SHORTS_RE: OnceLock<Regex> = OnceLock::new();

fn shorts_regex() -> &'static Regex {
    SHORTS_RE.get_or_init(|| {
        Regex::new(r"(?:https?://)?(?:www\.)?youtube\.com/shorts/([A-Za-z0-9_-]{11})")
            .expect("failed to compile regex")
    })
}

/// Extract distinct `YouTube Shorts` ids from arbitrary text.
///
/// Ids are returned in the order they first appear, capped at [`MAX_LINKS`].
/// Text that does not look like a Shorts link is ignored.
#[must_use]
pub fn extract_short_ids(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    shorts_regex()
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|id| seen.insert(*id))
        .take(MAX_LINKS)
        .map(ToString::to_string)
        .collect()
}

/// Canonical link to a Short.
#[inline]
#[must_use]
pub fn shorts_url(id: &str) -> String {
    format!("https://youtube.com/shorts/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_links() {
        assert!(extract_short_ids("no links here").is_empty());
        assert!(extract_short_ids("").is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let ids = extract_short_ids(
            "https://youtube.com/shorts/aaaaaaaaaaa and www.youtube.com/shorts/aaaaaaaaaaa",
        );
        assert_eq!(ids, vec!["aaaaaaaaaaa"]);
    }

    #[test]
    fn first_seen_order() {
        let ids = extract_short_ids(
            "youtube.com/shorts/bbbbbbbbbbb\n\
             http://www.youtube.com/shorts/aaaaaaaaaaa?feature=share\n\
             https://youtube.com/shorts/bbbbbbbbbbb\n\
             https://youtube.com/shorts/A-b_C1d2E3f",
        );
        assert_eq!(ids, vec!["bbbbbbbbbbb", "aaaaaaaaaaa", "A-b_C1d2E3f"]);
    }

    #[test]
    fn short_ids_ignored() {
        assert!(extract_short_ids("https://youtube.com/shorts/tooshort").is_empty());
        assert!(extract_short_ids("https://youtube.com/watch?v=aaaaaaaaaaa").is_empty());
    }

    #[test]
    fn capped_and_unique() {
        let text = (0..150)
            .map(|i| format!("https://youtube.com/shorts/{i:0>11} "))
            .collect::<String>()
            .repeat(2);

        let ids = extract_short_ids(&text);
        assert_eq!(ids.len(), MAX_LINKS);
        assert!(ids.iter().all(|id| id.len() == SHORT_ID_LEN));
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
        assert_eq!(ids[0], "00000000000");
        assert_eq!(ids[99], "00000000099");
    }

    #[test]
    fn canonical_url() {
        assert_eq!(
            shorts_url("aaaaaaaaaaa"),
            "https://youtube.com/shorts/aaaaaaaaaaa"
        );
    }
}
