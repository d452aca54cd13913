use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// `mod.rs` body declaring every module of a package and re-exporting its items.
pub(crate) fn generate_mod_file(modules: &[String]) -> TokenStream {
  let declarations = modules.iter().map(|module| {
    let ident = format_ident!("{}", module);
    quote! {
      mod #ident;
      pub use #ident::*;
    }
  });

  quote! {
    #(#declarations)*
  }
}
