//! Benchpress Macros
//!
//! Procedural macros for benchmark file registration.
//!
//! ## Macros
//!
//! - `#[bench_file]` - Register a function that declares suites and benches

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{FnArg, ItemFn, ReturnType, parse_macro_input};

/// Register a benchmark file
///
/// The function receives the suite builder positioned at the root suite and
/// declares its suites through it. Every registered function linked into the
/// binary is collected when the run starts.
///
/// # Example
///
/// ```ignore
/// #[bench_file]
/// fn sorting(s: &mut SuiteBuilder<'_>) {
///     s.describe("Array Sorting", |s| {
///         s.bench("sort", || { /* ... */ });
///     });
/// }
///
/// // With an explicit display name
/// #[bench_file(name = "sorting benches")]
/// fn sorting_v2(s: &mut SuiteBuilder<'_>) { ... }
/// ```
#[proc_macro_attribute]
pub fn bench_file(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = TokenStream2::from(args);
    let func = parse_macro_input!(item as ItemFn);

    bench_file_impl(args, func)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn bench_file_impl(args: TokenStream2, func: ItemFn) -> Result<TokenStream2, syn::Error> {
    validate_signature(&func)?;

    let fn_name = &func.sig.ident;
    let name = parse_name(args)?.unwrap_or_else(|| fn_name.to_string());

    Ok(quote! {
        #func

        ::benchpress::internal::inventory::submit! {
            ::benchpress::BenchFileDef {
                name: #name,
                file: file!(),
                line: line!(),
                module_path: module_path!(),
                register_fn: #fn_name,
            }
        }
    })
}

fn parse_name(args: TokenStream2) -> Result<Option<String>, syn::Error> {
    let mut name = None;
    if args.is_empty() {
        return Ok(name);
    }

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            let value: syn::LitStr = meta.value()?.parse()?;
            name = Some(value.value());
            Ok(())
        } else {
            let attr = meta
                .path
                .get_ident()
                .map(|i| i.to_string())
                .unwrap_or_default();
            Err(meta.error(format!("unknown attribute: {}", attr)))
        }
    });
    syn::parse::Parser::parse2(parser, args)?;
    Ok(name)
}

fn validate_signature(func: &ItemFn) -> syn::Result<()> {
    let sig = &func.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "Benchpress: bench files declare suites synchronously; register async benches with `bench_async` instead",
        ));
    }
    if sig.generics.type_params().next().is_some() || sig.generics.const_params().next().is_some() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "Benchpress: bench file functions cannot be generic",
        ));
    }
    if sig.inputs.len() != 1 || matches!(sig.inputs.first(), Some(FnArg::Receiver(_))) {
        return Err(syn::Error::new_spanned(
            sig,
            "Benchpress: Function must take exactly one argument: `&mut SuiteBuilder<'_>`",
        ));
    }
    if let ReturnType::Type(_, ty) = &sig.output {
        return Err(syn::Error::new_spanned(
            ty,
            "Benchpress: bench file functions must not return a value",
        ));
    }
    Ok(())
}
