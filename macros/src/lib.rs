//! Macros shared by the Conecta crates.
//!
//! `#[into_configfile]` turns a plain `serde` struct into something `ConfigFile<T>` can load:
//! it adds a public `version` field and implements both `Versioned` and `IntoConfig`.  The
//! traits live in `conecta-common` and must be in scope where the macro is used.
//!

use darling::ast::NestedMeta;
use darling::FromMeta;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Default configuration filename when none is given.
const DEFAULT_FILENAME: &str = "config.hcl";

/// Arguments of `#[into_configfile(version = N, filename = "name.hcl")]`
///
#[derive(Debug, FromMeta)]
struct ConfigArgs {
    #[darling(default)]
    version: Option<usize>,
    #[darling(default)]
    filename: Option<String>,
}

/// Add a `version: usize` field to the struct and implement `Versioned` and `IntoConfig`.
///
/// ```ignore
/// use conecta_common::{IntoConfig, Versioned};
/// use conecta_macros::into_configfile;
///
/// #[into_configfile(version = 2, filename = "conecta.hcl")]
/// #[derive(Debug, Default, Deserialize)]
/// struct Config {
///     name: String,
/// }
/// ```
///
#[proc_macro_attribute]
pub fn into_configfile(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(args.into()) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(darling::Error::from(e).write_errors()),
    };
    let args = match ConfigArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };
    let version = args.version.unwrap_or(1);
    let filename = args.filename.unwrap_or_else(|| DEFAULT_FILENAME.to_string());

    let mut input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident.clone();

    match input.data {
        Data::Struct(ref mut data) => match &mut data.fields {
            Fields::Named(fields) => {
                let field = syn::Field::parse_named.parse2(quote! { pub version: usize });
                match field {
                    Ok(field) => fields.named.push(field),
                    Err(e) => return TokenStream::from(e.to_compile_error()),
                }
            }
            _ => {
                return syn::Error::new_spanned(&ident, "#[into_configfile] needs named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&ident, "#[into_configfile] is only for structs")
                .to_compile_error()
                .into()
        }
    }

    let output = quote! {
        #input

        impl Versioned for #ident {
            fn version(&self) -> usize {
                self.version
            }
        }

        impl IntoConfig for #ident {
            const VERSION: usize = #version;
            const FILENAME: &'static str = #filename;
        }
    };
    output.into()
}
