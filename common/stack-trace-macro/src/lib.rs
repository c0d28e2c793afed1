//! `#[stack_trace_debug]`: derive a `Debug` impl that prints the full error
//! chain instead of the default structural dump.
//!
//! Error enums in this workspace derive [`snafu::Snafu`] for `Display` and
//! carry an implicit `Location` field per variant. The default `#[derive(Debug)]`
//! output on such an enum is a wall of field names that is rarely what you want
//! in a log line. This attribute replaces it with a walk of the `Display`
//! message followed by each `std::error::Error::source()` in the chain, which
//! is what actually helps you find where a multi-hop error originated.
//!
//! ```ignore
//! #[derive(Snafu)]
//! #[stack_trace_debug]
//! pub enum ExecutorError {
//!     #[snafu(display("unknown tool: {name}"))]
//!     UnknownTool { name: String, location: Location },
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;
use syn::parse_macro_input;

#[proc_macro_attribute]
pub fn stack_trace_debug(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let debug_impl = quote! {
        impl #impl_generics ::std::fmt::Debug for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{self}")?;
                let mut cause = ::std::error::Error::source(self);
                while let Some(err) = cause {
                    write!(f, "\ncaused by: {err}")?;
                    cause = ::std::error::Error::source(err);
                }
                Ok(())
            }
        }
    };

    let output = quote! {
        #input
        #debug_impl
    };
    output.into()
}
