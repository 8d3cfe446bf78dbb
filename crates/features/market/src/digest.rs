use crate::performance::{MarketSnapshot, Quote};
use recap_kernel::period::ReportPeriod;
use std::cmp::Ordering;

const NOTABLE_STOCKS: usize = 10;

/// Plain-text performance block fed to the report prompt.
///
/// Indices keep watchlist order, sectors are ranked best first and stocks by
/// the size of their move.
#[must_use]
pub fn performance_digest(
    snapshot: &MarketSnapshot,
    period: &ReportPeriod,
    include_sectors: bool,
) -> String {
    let label = period.label();
    let mut lines = vec![format!("MARKET PERFORMANCE ({label}):")];
    lines.extend(snapshot.indices.iter().map(|quote| bullet(&quote.name, quote)));

    if include_sectors {
        lines.push(String::new());
        lines.push(format!("SECTOR PERFORMANCE ({label}):"));
        let mut sectors: Vec<&Quote> = snapshot.sectors.iter().collect();
        sectors.sort_by(|a, b| descending(a.change_pct(), b.change_pct()));
        lines.extend(sectors.into_iter().map(|quote| bullet(&quote.name, quote)));
    }

    lines.push(String::new());
    lines.push(format!("NOTABLE STOCK MOVEMENTS ({label}):"));
    let mut stocks: Vec<&Quote> = snapshot.stocks.iter().collect();
    stocks.sort_by(|a, b| descending(a.change_pct().abs(), b.change_pct().abs()));
    lines.extend(
        stocks.into_iter().take(NOTABLE_STOCKS).map(|quote| bullet(&quote.symbol, quote)),
    );

    lines.join("\n")
}

fn bullet(label: &str, quote: &Quote) -> String {
    format!("• {label}: {:+.2}%", quote.change_pct())
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
