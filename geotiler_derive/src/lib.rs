//! Procedural macros shared by the geotiler crates.
//!
//! [`macro@context`] wraps the error of a function returning `anyhow::Result`
//! with a formatted message, so call chains read like a stack of what was
//! being attempted:
//!
//! ```ignore
//! #[context("decoding elevation tile {coord}")]
//! fn decode_and_store(&self, coord: &TileCoord, raw: RawRaster) -> Result<ElevationRaster> {
//!     ...
//! }
//! ```

mod args;

use crate::args::ContextArgs;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::parse_macro_input;

/// Attach a context message to the `anyhow::Error` returned by a function.
///
/// Works on sync and `async` functions. The arguments are passed to
/// `format!` and evaluated only on the error path. Prefix them with `move,`
/// when the body has to take ownership of captured arguments.
#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let ContextArgs { move_token, message } = parse_macro_input!(args);
	let mut input = parse_macro_input!(input as syn::ItemFn);

	let body = &input.block;
	let return_type = &input.sig.output;
	let err = Ident::new("err", Span::mixed_site());

	let new_body = if input.sig.asyncness.is_some() {
		let syn::ReturnType::Type(_, return_type) = return_type else {
			return syn::Error::new_spanned(&input.sig, "#[context] requires a function returning Result")
				.to_compile_error()
				.into();
		};
		let result = Ident::new("result", Span::mixed_site());
		quote! {
			let #result: #return_type = async #move_token { #body }.await;
			#result.map_err(|#err| #err.context(format!(#message)).into())
		}
	} else {
		// The closure captures a non-Copy value so borrowck treats it as FnOnce.
		let once = Ident::new("once", Span::mixed_site());
		quote! {
			let #once = ::core::iter::empty::<()>();
			(#move_token || #return_type {
				::core::mem::drop(#once);
				#body
			})().map_err(|#err| #err.context(format!(#message)).into())
		}
	};
	input.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(new_body), None)];

	input.into_token_stream().into()
}
