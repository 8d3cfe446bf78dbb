use crate::source::QuoteSource;
use crate::watchlist::{self, AssetClass, Instrument};
use futures::StreamExt;
use recap_kernel::period::ReportPeriod;
use serde::Serialize;
use tracing::{debug, info};

/// Price move over a period, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Performance {
    pub start_price: f64,
    pub current_price: f64,
    pub change_pct: f64,
}

impl Performance {
    /// First and last close of a daily series; `None` with fewer than two closes
    /// or a non-positive starting price.
    #[must_use]
    pub fn from_closes(closes: &[f64]) -> Option<Self> {
        let (&first, &last) = match closes {
            [first, .., last] => (first, last),
            _ => return None,
        };
        if first <= 0.0 || !first.is_finite() || !last.is_finite() {
            return None;
        }
        let change_pct = (last - first) / first * 100.0;

        Some(Self {
            start_price: round2(first),
            current_price: round2(last),
            change_pct: round2(change_pct),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One instrument's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    #[serde(flatten)]
    pub performance: Performance,
}

impl Quote {
    #[must_use]
    pub fn new(instrument: Instrument, performance: Performance) -> Self {
        Self { symbol: instrument.symbol.to_owned(), name: instrument.name.to_owned(), performance }
    }

    #[must_use]
    pub const fn change_pct(&self) -> f64 {
        self.performance.change_pct
    }
}

/// Performance of the whole watchlist; instruments without data are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub indices: Vec<Quote>,
    pub sectors: Vec<Quote>,
    pub stocks: Vec<Quote>,
}

impl MarketSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len() + self.sectors.len() + self.stocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, class: AssetClass, quote: Quote) {
        match class {
            AssetClass::Index => self.indices.push(quote),
            AssetClass::Sector => self.sectors.push(quote),
            AssetClass::Stock => self.stocks.push(quote),
        }
    }
}

/// Fetches every watchlist instrument, at most `concurrency` at a time.
///
/// Watchlist order is preserved. Failed or too-short series are skipped.
pub async fn collect_snapshot<Q>(
    source: &Q,
    period: &ReportPeriod,
    concurrency: usize,
) -> MarketSnapshot
where
    Q: QuoteSource,
{
    let results = futures::stream::iter(watchlist::all())
        .map(|(class, instrument)| async move {
            let outcome = source.daily_closes(instrument.symbol, period).await;
            (class, instrument, outcome)
        })
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut snapshot = MarketSnapshot::default();
    for (class, instrument, outcome) in results {
        match outcome {
            Ok(closes) => match Performance::from_closes(&closes) {
                Some(performance) => snapshot.push(class, Quote::new(instrument, performance)),
                None => {
                    debug!(symbol = instrument.symbol, points = closes.len(), "Not enough closes");
                },
            },
            Err(err) => debug!(symbol = instrument.symbol, error = %err, "Skipping instrument"),
        }
    }

    info!(
        indices = snapshot.indices.len(),
        sectors = snapshot.sectors.len(),
        stocks = snapshot.stocks.len(),
        period = %period,
        "Market snapshot collected"
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn needs_two_closes() {
        assert!(Performance::from_closes(&[]).is_none());
        assert!(Performance::from_closes(&[100.0]).is_none());
    }

    #[test]
    fn uses_first_and_last_close() {
        let perf = Performance::from_closes(&[200.0, 150.0, 210.0]).unwrap();
        assert_eq!(perf.start_price, 200.0);
        assert_eq!(perf.current_price, 210.0);
        assert_eq!(perf.change_pct, 5.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let perf = Performance::from_closes(&[3.0, 3.123_456]).unwrap();
        assert_eq!(perf.current_price, 3.12);
        assert_eq!(perf.change_pct, 4.12);
    }

    #[test]
    fn zero_start_price_is_rejected() {
        assert!(Performance::from_closes(&[0.0, 5.0]).is_none());
    }

    proptest! {
        #[test]
        fn sign_follows_direction(first in 1.0f64..10_000.0, last in 1.0f64..10_000.0) {
            let perf = Performance::from_closes(&[first, last]).unwrap();
            if last > first * 1.0001 {
                prop_assert!(perf.change_pct >= 0.0);
            }
            if last < first * 0.9999 {
                prop_assert!(perf.change_pct <= 0.0);
            }
        }
    }
}
