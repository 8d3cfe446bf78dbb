use std::borrow::Cow;

#[recap_derive::recap_error]
pub enum NewsError {
    #[error("News request failed{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("News provider answered {status}{}: {message}", format_context(.context))]
    Provider { status: u16, message: String, context: Option<Cow<'static, str>> },

    #[error("Invalid news configuration{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal news error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
