extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derive an `AsUrlParams` implementation rendering the struct as `field=value` pairs joined
/// by `&`, in field declaration order. Null fields are skipped.
///
/// The expansion names the trait unqualified, so an `AsUrlParams` trait with a
/// `fn to_url_params(&self) -> String` method must be in scope at the derive site, and the
/// struct must implement `serde::Serialize`.
#[proc_macro_derive(AsUrlParams)]
pub fn as_url_params_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let fields = match &input.data {
        syn::Data::Struct(data) => data
            .fields
            .iter()
            .filter_map(|f| f.ident.as_ref().map(|ident| ident.to_string()))
            .collect::<Vec<_>>(),
        _ => {
            return syn::Error::new_spanned(name, "AsUrlParams can only be derived for structs")
                .to_compile_error()
                .into()
        }
    };

    let expanded = quote! {
        impl AsUrlParams for #name {
            fn to_url_params(&self) -> String {
                let mut params = Vec::new();

                let keys: &[&str] = &[#(#fields),*];

                if let serde_json::Value::Object(map) = serde_json::json!(self) {
                    for key in keys {
                        match map.get(*key) {
                            None | Some(serde_json::Value::Null) => {}
                            Some(serde_json::Value::String(value)) => params.push(format!("{}={}", key, value)),
                            Some(value) => params.push(format!("{}={}", key, value)),
                        }
                    }
                }

                params.join("&")
            }
        }
    };

    TokenStream::from(expanded)
}
