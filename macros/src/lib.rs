mod route;

use proc_macro::TokenStream;

/// Generates an `aide` documentation function for a handler, named after the handler
/// with the suffix `_docs`.
///
/// The first line of the doc comment becomes the operation summary and the remaining
/// lines its description.
///
/// ```rust,ignore
/// /// Get post
/// /// Returns a single post by its id.
/// #[route(tag = tag::POST, response(status = 404, description = "Unknown post."))]
/// pub async fn get_post() {}
/// ```
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}
