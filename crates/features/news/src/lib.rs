//! News slice.
//!
//! Fetches articles for a period, sorts them into themes, ranks the stories
//! of every theme and renders the digest fed to the report prompt.

mod article;
mod benzinga;
mod digest;
mod error;
mod ranking;
mod source;
mod theme;

pub use article::{Article, Tag};
pub use benzinga::BenzingaClient;
pub use digest::news_digest;
pub use error::{NewsError, NewsErrorExt};
pub use ranking::{importance, key_stories};
pub use source::NewsSource;
pub use theme::{Theme, ThemeBuckets, categorize};
