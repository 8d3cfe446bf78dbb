use super::derived_traits;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::{Attribute, ItemFn, ItemStruct, LitBool, LitStr};

/// Options accepted by `#[api_model(...)]`.
#[derive(Default)]
struct ModelOptions {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

/// What the struct already declares through its own `#[serde(...)]` attributes.
#[derive(Default)]
struct ExistingSerde {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

/// Expands the `#[api_model]` attribute macro.
///
/// Adds the missing `Debug`/`Serialize`/`Deserialize` derives, a `ToSchema` derive
/// behind the consumer's `server` feature, and the serde naming/strictness policy.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(err) => return err.to_compile_error(),
    };
    let existing = match existing_serde(&input.attrs) {
        Ok(existing) => existing,
        Err(err) => return err.to_compile_error(),
    };
    let derives = derived_traits(&input.attrs);

    let mut missing = Vec::new();
    if !derives.contains("Debug") {
        missing.push(quote! { Debug });
    }
    if !derives.contains("Serialize") {
        missing.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        missing.push(quote! { ::serde::Deserialize });
    }
    let derive_attr = if missing.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#missing),*)] }
    };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename = options.rename_all.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));
    let rename_attr = match &existing.rename_all {
        Some(declared) if declared.value() != rename.value() => {
            return syn::Error::new_spanned(
                declared,
                "Conflicting serde rename_all; remove it or pass the same value to api_model",
            )
            .to_compile_error();
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename)] },
    };

    let deny = options.deny_unknown_fields.unwrap_or(true);
    if existing.deny_unknown_fields && !deny {
        return syn::Error::new_spanned(
            &input.ident,
            "deny_unknown_fields is already set via serde; remove it before disabling",
        )
        .to_compile_error();
    }
    let deny_attr = if deny && !existing.deny_unknown_fields {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };

    quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    }
}

/// Expands the `#[api_handler]` attribute macro into a `utoipa::path` annotated handler.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_options(args: TokenStream) -> syn::Result<ModelOptions> {
    let mut options = ModelOptions::default();

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("rename_all") {
            if options.rename_all.is_some() {
                return Err(meta.error("Duplicate argument"));
            }
            options.rename_all = Some(meta.value()?.parse::<LitStr>()?);
            return Ok(());
        }
        if meta.path.is_ident("deny_unknown_fields") {
            if options.deny_unknown_fields.is_some() {
                return Err(meta.error("Duplicate argument"));
            }
            options.deny_unknown_fields = Some(meta.value()?.parse::<LitBool>()?.value);
            return Ok(());
        }
        Err(meta.error("Unsupported argument; expected rename_all or deny_unknown_fields"))
    });
    parser.parse2(args)?;

    Ok(options)
}

fn existing_serde(attrs: &[Attribute]) -> syn::Result<ExistingSerde> {
    let mut existing = ExistingSerde::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                existing.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                existing.deny_unknown_fields = true;
            } else if meta.input.peek(syn::Token![=]) {
                // Unrelated `key = value` entries still have to be consumed.
                let _: syn::Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(existing)
}
