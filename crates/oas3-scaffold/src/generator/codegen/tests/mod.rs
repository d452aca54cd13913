mod api_tests;
mod layout_tests;

use proc_macro2::TokenStream;

fn format(tokens: TokenStream) -> String {
  prettyplease::unparse(&syn::parse2(tokens).expect("generated tokens should parse"))
}
