//! Instruments tracked in every report, in display order.

/// A tracked symbol and the name shown in digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    pub symbol: &'static str,
    pub name: &'static str,
}

const fn instrument(symbol: &'static str, name: &'static str) -> Instrument {
    Instrument { symbol, name }
}

/// Equity indices, FX pairs, commodities and rates.
pub const INDICES: &[Instrument] = &[
    instrument("^GSPC", "S&P 500"),
    instrument("^DJI", "Dow Jones"),
    instrument("^IXIC", "NASDAQ"),
    instrument("^RUT", "Russell 2000"),
    instrument("^VIX", "VIX"),
    instrument("^STOXX50E", "Euro Stoxx 50"),
    instrument("^FTSE", "FTSE 100"),
    instrument("^GDAXI", "DAX"),
    instrument("^FCHI", "CAC 40"),
    instrument("^HSI", "Hang Seng"),
    instrument("^N225", "Nikkei 225"),
    instrument("000001.SS", "Shanghai Composite"),
    instrument("^STI", "Straits Times Index"),
    instrument("EURUSD=X", "EUR/USD"),
    instrument("GBPUSD=X", "GBP/USD"),
    instrument("USDJPY=X", "USD/JPY"),
    instrument("USDCNY=X", "USD/CNY"),
    instrument("GC=F", "Gold"),
    instrument("CL=F", "Crude Oil"),
    instrument("^TNX", "10-Year Treasury"),
];

/// SPDR sector ETFs.
pub const SECTORS: &[Instrument] = &[
    instrument("XLK", "Technology"),
    instrument("XLF", "Financials"),
    instrument("XLV", "Healthcare"),
    instrument("XLE", "Energy"),
    instrument("XLI", "Industrials"),
    instrument("XLP", "Consumer Staples"),
    instrument("XLY", "Consumer Discretionary"),
    instrument("XLU", "Utilities"),
    instrument("XLB", "Materials"),
    instrument("XLRE", "Real Estate"),
    instrument("XLC", "Communication Services"),
];

/// US large caps followed by Asia-Pacific names; stocks are shown by ticker.
pub const STOCKS: &[Instrument] = &[
    instrument("AAPL", "AAPL"),
    instrument("MSFT", "MSFT"),
    instrument("GOOGL", "GOOGL"),
    instrument("AMZN", "AMZN"),
    instrument("TSLA", "TSLA"),
    instrument("META", "META"),
    instrument("NVDA", "NVDA"),
    instrument("JPM", "JPM"),
    instrument("JNJ", "JNJ"),
    instrument("V", "V"),
    instrument("WMT", "WMT"),
    instrument("UNH", "UNH"),
    instrument("HD", "HD"),
    instrument("PG", "PG"),
    instrument("MA", "MA"),
    instrument("BABA", "BABA"),
    instrument("JD", "JD"),
    instrument("TCEHY", "TCEHY"),
    instrument("PDD", "PDD"),
    instrument("BIDU", "BIDU"),
    instrument("GRAB", "GRAB"),
    instrument("SEA", "SEA"),
];

/// Which part of the snapshot an instrument belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Index,
    Sector,
    Stock,
}

/// Every tracked instrument with its class, indices first.
pub fn all() -> impl Iterator<Item = (AssetClass, Instrument)> {
    let tag = |class| move |instrument: &Instrument| (class, *instrument);
    INDICES
        .iter()
        .map(tag(AssetClass::Index))
        .chain(SECTORS.iter().map(tag(AssetClass::Sector)))
        .chain(STOCKS.iter().map(tag(AssetClass::Stock)))
}
