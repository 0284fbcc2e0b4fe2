use proc_macro2::TokenStream as TokenStream2;
use syn::Token;
use syn::parse::{self, Parse, ParseStream};

/// Arguments of `#[context(...)]`: an optional leading `move,` followed by
/// the `format!` arguments of the context message.
#[derive(Debug)]
pub struct ContextArgs {
	pub move_token: Option<Token![move]>,
	pub message: TokenStream2,
}

impl Parse for ContextArgs {
	fn parse(input: ParseStream<'_>) -> parse::Result<Self> {
		let move_token: Option<Token![move]> = input.parse()?;
		if move_token.is_some() {
			input.parse::<Token![,]>()?;
		}
		let message: TokenStream2 = input.parse()?;
		if message.is_empty() {
			return Err(input.error("expected a context message"));
		}
		Ok(Self { move_token, message })
	}
}

#[cfg(test)]
mod tests {
	use super::ContextArgs;
	use rstest::rstest;
	use syn::parse_str;

	#[rstest]
	#[case::literal("\"loading\"", false, "\"loading\"")]
	#[case::positional("\"tile {}\", coord", false, "\"tile {}\" , coord")]
	#[case::method_call("\"{} bytes\", blob.len()", false, "\"{} bytes\" , blob . len ()")]
	#[case::moved("move, \"decoding {url}\"", true, "\"decoding {url}\"")]
	fn parses(#[case] input: &str, #[case] moved: bool, #[case] message: &str) {
		let args: ContextArgs = parse_str(input).unwrap();
		assert_eq!(args.move_token.is_some(), moved);
		assert_eq!(args.message.to_string(), message);
	}

	#[rstest]
	#[case::empty("", "context message")]
	#[case::only_move("move,", "context message")]
	#[case::move_without_comma("move \"x\"", ",")]
	fn rejects(#[case] input: &str, #[case] expected: &str) {
		let err = parse_str::<ContextArgs>(input).unwrap_err();
		assert!(err.to_string().contains(expected), "unexpected error: {err}");
	}
}
