use crate::article::Article;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// News themes in digest order. `Other` collects articles no keyword matched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Earnings,
    FedPolicy,
    TradeTensions,
    TechDevelopments,
    Geopolitical,
    MarketMovements,
    DealsMa,
    ChinaSea,
    Crypto,
    Other,
}

impl Theme {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Earnings => "Earnings Reports",
            Self::FedPolicy => "Federal Reserve & Monetary Policy",
            Self::TradeTensions => "Trade & Tariffs",
            Self::TechDevelopments => "Technology Developments",
            Self::Geopolitical => "Geopolitical Events",
            Self::MarketMovements => "Major Market Movements",
            Self::DealsMa => "Mergers & Acquisitions",
            Self::ChinaSea => "China & Asia-Pacific",
            Self::Crypto => "Cryptocurrency",
            Self::Other => "Other Notable News",
        }
    }

    /// Lowercase substrings that place an article in this theme.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Earnings => &["earnings", "revenue", "profit", "quarterly", "eps"],
            Self::FedPolicy => &["fed", "federal reserve", "interest rates", "powell", "monetary"],
            Self::TradeTensions => &["tariff", "trade war", "trade deal", "import", "export"],
            Self::TechDevelopments => {
                &["ai", "artificial intelligence", "tech", "semiconductor", "chip"]
            },
            Self::Geopolitical => &["trump", "election", "government", "policy", "regulation"],
            Self::MarketMovements => &["surge", "plunge", "rally", "crash", "soar", "tumble"],
            Self::DealsMa => &["merger", "acquisition", "deal", "buyout", "takeover"],
            Self::ChinaSea => &["china", "chinese", "asia", "singapore", "hong kong"],
            Self::Crypto => &["bitcoin", "crypto", "blockchain", "ethereum"],
            Self::Other => &[],
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Articles grouped by theme. One article may sit in several themes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeBuckets {
    buckets: BTreeMap<Theme, Vec<Arc<Article>>>,
}

impl ThemeBuckets {
    #[must_use]
    pub fn get(&self, theme: Theme) -> &[Arc<Article>] {
        self.buckets.get(&theme).map_or(&[], Vec::as_slice)
    }

    /// Non-empty themes in digest order.
    pub fn iter(&self) -> impl Iterator<Item = (Theme, &[Arc<Article>])> {
        self.buckets
            .iter()
            .filter(|(_, articles)| !articles.is_empty())
            .map(|(theme, articles)| (*theme, articles.as_slice()))
    }

    /// Number of themes holding at least one article.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub(crate) fn push(&mut self, theme: Theme, article: Arc<Article>) {
        self.buckets.entry(theme).or_default().push(article);
    }

    pub(crate) fn insert(&mut self, theme: Theme, articles: Vec<Arc<Article>>) {
        self.buckets.insert(theme, articles);
    }
}

/// Assigns every article to each theme with a keyword hit, or to
/// [`Theme::Other`] when nothing matches.
#[must_use]
pub fn categorize(articles: impl IntoIterator<Item = Article>) -> ThemeBuckets {
    let mut buckets = ThemeBuckets::default();

    for article in articles {
        let text = article.search_text();
        let article = Arc::new(article);
        let mut matched = false;

        for theme in Theme::iter() {
            if theme.keywords().iter().any(|keyword| text.contains(keyword)) {
                buckets.push(theme, Arc::clone(&article));
                matched = true;
            }
        }
        if !matched {
            buckets.push(Theme::Other, article);
        }
    }

    buckets
}
