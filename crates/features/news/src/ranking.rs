use crate::article::Article;
use crate::theme::ThemeBuckets;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::cmp::Reverse;
use std::sync::Arc;

const MAJOR_COMPANIES: [&str; 7] =
    ["apple", "microsoft", "google", "amazon", "tesla", "meta", "nvidia"];
const IMPACT_WORDS: [&str; 6] =
    ["billion", "million", "record", "historic", "breakthrough", "crisis"];
const URGENT_WORDS: [&str; 4] = ["breaking", "just in", "urgent", "alert"];

const COMPANY_POINTS: u32 = 5;
const IMPACT_POINTS: u32 = 3;
const URGENT_POINTS: u32 = 4;
const RECENT_POINTS: u32 = 5;
const RECENT_WINDOW_HOURS: i64 = 24;

/// Heuristic weight of an article for the recap.
#[must_use]
pub fn importance(article: &Article, now: DateTime<Utc>) -> u32 {
    let text = article.search_text();
    let hits = |words: &[&str]| {
        let count = words.iter().filter(|word| text.contains(*word)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    };

    let mut score = hits(&MAJOR_COMPANIES) * COMPANY_POINTS
        + hits(&IMPACT_WORDS) * IMPACT_POINTS
        + hits(&URGENT_WORDS) * URGENT_POINTS;

    let window = Duration::hours(RECENT_WINDOW_HOURS);
    let recent = article
        .created
        .as_deref()
        .and_then(parse_created)
        .is_some_and(|created| now.signed_duration_since(created) < window);
    if recent {
        score += RECENT_POINTS;
    }
    score
}

fn parse_created(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw).or_else(|_| DateTime::parse_from_rfc2822(raw)).ok()
}

/// Keeps the `limit` highest scoring articles of every non-empty theme.
/// Ties keep their original order.
#[must_use]
pub fn key_stories(buckets: &ThemeBuckets, limit: usize, now: DateTime<Utc>) -> ThemeBuckets {
    let mut stories = ThemeBuckets::default();
    for (theme, articles) in buckets.iter() {
        let mut ranked: Vec<Arc<Article>> = articles.to_vec();
        ranked.sort_by_cached_key(|article| Reverse(importance(article, now)));
        ranked.truncate(limit);
        stories.insert(theme, ranked);
    }
    stories
}
