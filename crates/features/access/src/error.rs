use std::borrow::Cow;

#[recap_derive::recap_error]
pub enum AccessError {
    #[error("Invalid access code. Please verify and try again.")]
    InvalidPassword { context: Option<Cow<'static, str>> },

    #[error("Session expired or unknown{}", format_context(.context))]
    UnknownSession { context: Option<Cow<'static, str>> },

    #[error("Access configuration error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal access error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
impl From<AccessError> for recap_kernel::server::ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::InvalidPassword { .. } | AccessError::UnknownSession { .. } => {
                Self::unauthorized(err.to_string())
            },
            AccessError::Config { .. } | AccessError::Internal { .. } => {
                Self::internal(err.to_string())
            },
        }
    }
}
