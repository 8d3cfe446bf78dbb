use crate::theme::ThemeBuckets;

const STORIES_PER_THEME: usize = 3;
const TEASER_CHARS: usize = 200;
const SOURCE_NAME: &str = "Benzinga";
const SOURCE_DISCLAIMER: &str =
    "This is a third-party news source. Please verify independently.";

/// Renders ranked stories as the news block of the report prompt.
///
/// Each theme opens with a blank line and its upper-cased title; at most three
/// stories follow. Source attribution lines are emitted only when
/// `include_sources` is set.
#[must_use]
pub fn news_digest(stories: &ThemeBuckets, include_sources: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (theme, articles) in stories.iter() {
        lines.push(format!("\n{}:", theme.title().to_uppercase()));

        for (index, article) in articles.iter().take(STORIES_PER_THEME).enumerate() {
            let title = article.title.as_deref().unwrap_or("No title");
            let created = article.created.as_deref().unwrap_or("Date unknown");
            let teaser = shorten(article.teaser.as_deref().unwrap_or_default());

            lines.push(format!("{}. TITLE: {title}", index + 1));
            lines.push(format!("   DATE: {created}"));
            lines.push(format!("   SUMMARY: {teaser}"));
            if include_sources {
                let url = article.url.as_deref().unwrap_or("No URL available");
                lines.push(format!("   SOURCE: {SOURCE_NAME}"));
                lines.push(format!("   FULL ARTICLE: {url}"));
                lines.push(format!("   DISCLAIMER: {SOURCE_DISCLAIMER}"));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn shorten(teaser: &str) -> String {
    if teaser.chars().count() > TEASER_CHARS {
        let mut short: String = teaser.chars().take(TEASER_CHARS).collect();
        short.push_str("...");
        short
    } else {
        teaser.to_owned()
    }
}
