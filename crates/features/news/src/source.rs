use crate::article::Article;
use crate::error::NewsError;
use recap_kernel::period::ReportPeriod;
use std::future::Future;

/// Provider of news articles published within a period.
pub trait NewsSource: Send + Sync {
    /// At most `limit` articles, newest first as the provider returns them.
    fn articles(
        &self,
        period: &ReportPeriod,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Article>, NewsError>> + Send;
}
