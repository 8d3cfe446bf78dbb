#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Recap derive
//!
//! Attribute macros shared by the market recap crates: error enums with context
//! support, API models and handlers documented through `utoipa`, feature slice
//! handles, and the runtime bootstrap for binaries.
//!
//! Examples are `ignore`d here because the expansions refer to crates that a
//! proc-macro crate cannot depend on.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a blocking `main` running on a preset runtime.
///
/// Profiles:
/// * `service` - multi-threaded runtime for the long-running HTTP server.
/// * `batch` - small runtime for one-shot command line runs.
/// * `default` (or no argument) - worker count follows available parallelism.
///
/// ```rust,ignore
/// #[recap_runtime::main(service)]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a request/response model.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when they are not derived already,
/// derives `utoipa::ToSchema` under the consuming crate's `server` feature, and
/// applies `rename_all = "camelCase"` plus `deny_unknown_fields` unless overridden.
///
/// ```rust,ignore
/// #[api_model(deny_unknown_fields = false)]
/// pub struct LoginRequest {
///     pub password: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(args.into(), input).into()
}

/// Attaches `utoipa::path` metadata to an axum handler when the `server` feature is on.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)), tag = "System")]
/// pub async fn health() -> Json<HealthResponse> { ... }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Builds a crate error enum on top of `thiserror`.
///
/// Generates, next to the enum:
/// * a `Result<T, E = Error>` alias,
/// * an `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant carrying a source,
/// * `From<Source>` for those variants,
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists,
/// * a private `format_context` helper for `#[error(..)]` strings.
///
/// Variants must use named fields. A variant with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[recap_error]
/// pub enum NewsError {
///     #[error("Request failed{}: {source}", format_context(.context))]
///     Http { source: reqwest::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn recap_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Declares a feature slice handle registered with the kernel.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `FeatureSlice`.
///
/// ```rust,ignore
/// #[recap_slice]
/// pub struct AccessSlice {
///     pub gatekeeper: Gatekeeper,
/// }
///
/// let slice = AccessSlice::new(AccessSliceInner { gatekeeper });
/// ```
#[proc_macro_attribute]
pub fn recap_slice(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
