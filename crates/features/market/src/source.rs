use crate::error::MarketError;
use recap_kernel::period::ReportPeriod;
use std::future::Future;

/// Provider of daily closing prices.
pub trait QuoteSource: Send + Sync {
    /// Closes from the first trading day on or after `period.start()` through
    /// `period.end()`, oldest first.
    fn daily_closes(
        &self,
        symbol: &str,
        period: &ReportPeriod,
    ) -> impl Future<Output = Result<Vec<f64>, MarketError>> + Send;
}
