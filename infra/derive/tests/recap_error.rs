use recap_derive::recap_error;
use std::borrow::Cow;

#[derive(Debug)]
struct UpstreamFault(&'static str);

impl std::fmt::Display for UpstreamFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upstream said {}", self.0)
    }
}

impl std::error::Error for UpstreamFault {}

#[recap_error]
pub enum SampleError {
    #[error("Upstream failed{}: {source}", format_context(.context))]
    Upstream { source: UpstreamFault, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {what}", format_context(.context))]
    NotFound { what: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn upstream() -> std::result::Result<(), UpstreamFault> {
    Err(UpstreamFault("no"))
}

#[test]
fn source_errors_convert_with_question_mark() {
    fn run() -> Result<()> {
        upstream()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(err, SampleError::Upstream { context: None, .. }));
    assert_eq!(err.to_string(), "Upstream failed: upstream said no");
}

#[test]
fn context_on_foreign_result_wraps_into_variant() {
    let err = upstream().context("fetching quotes").unwrap_err();
    assert_eq!(err.to_string(), "Upstream failed (fetching quotes): upstream said no");
}

#[test]
fn context_on_own_result_overwrites_slot() {
    let result: Result<()> =
        Err(SampleError::NotFound { what: "report".to_owned(), context: None });
    let err = result.context("latest").unwrap_err();
    assert_eq!(err.to_string(), "Not found (latest): report");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: SampleError = "boom".into();
    let from_owned: SampleError = String::from("bang").into();

    assert_eq!(from_static.to_string(), "Internal error: boom");
    assert_eq!(from_owned.to_string(), "Internal error: bang");
}
