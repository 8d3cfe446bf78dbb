use std::borrow::Cow;

#[recap_derive::recap_error]
pub enum MarketError {
    #[error("Market data request failed{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Market data provider rejected {symbol}{}: {message}", format_context(.context))]
    Provider { symbol: String, message: String, context: Option<Cow<'static, str>> },

    #[error("Invalid market data configuration{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal market error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
