use locus_core::LocaleTag;
use locus_core::template::{TemplatePart, parse_template};
use proc_macro::TokenStream;
use quote::quote;
use std::collections::BTreeMap;
use std::path::Path;
use syn::{LitStr, parse_macro_input};

/// Embeds every `<locale>.toml` catalog of a directory (relative to the
/// calling crate's manifest) and installs them at startup.
///
/// ```ignore
/// catalog_assets!("locales");
/// ```
#[proc_macro]
pub fn catalog_assets(input: TokenStream) -> TokenStream {
    let dir = parse_macro_input!(input as LitStr);
    match expand(&dir.value()) {
        Ok(tokens) => tokens.into(),
        Err(message) => syn::Error::new(dir.span(), message).to_compile_error().into(),
    }
}

fn expand(dir: &str) -> Result<proc_macro2::TokenStream, String> {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").map_err(|e| format!("CARGO_MANIFEST_DIR: {e}"))?;

    let dir_path = Path::new(&manifest_dir).join(dir);
    if !dir_path.is_dir() {
        return Err(format!("catalog directory not found: {}", dir_path.display()));
    }

    let pattern = format!("{}/*.toml", dir_path.display());
    let entries = glob::glob(&pattern).map_err(|e| format!("bad catalog pattern: {e}"))?;

    let mut locale_inits = Vec::new();
    let mut tracked_files = Vec::new();

    for entry in entries {
        let path = entry.map_err(|e| format!("unreadable catalog path: {e}"))?;
        if path.is_dir() {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| format!("non UTF-8 catalog name: {}", path.display()))?;
        let locale = LocaleTag::parse(stem).map_err(|e| format!("{}: {e}", path.display()))?;
        let locale = locale.as_str();

        // rebuild when a catalog changes
        let abs_path = path
            .canonicalize()
            .map_err(|e| format!("{}: {e}", path.display()))?;
        let abs_path = abs_path.to_string_lossy().into_owned();
        tracked_files.push(quote! { const _: &[u8] = include_bytes!(#abs_path); });

        let content =
            std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
        // sorted for reproducible expansion
        let messages: BTreeMap<String, String> =
            toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;

        let inserts = messages.iter().map(|(key, value)| {
            let parts = parse_template(value).into_iter().map(|part| match part {
                TemplatePart::Static(s) => quote! {
                    ::locus_axum::TemplatePart::Static(::std::string::String::from(#s))
                },
                TemplatePart::Placeholder(p) => quote! {
                    ::locus_axum::TemplatePart::Placeholder(::std::string::String::from(#p))
                },
            });
            quote! {
                messages.insert(::std::string::String::from(#key), vec![ #(#parts),* ]);
            }
        });

        locale_inits.push(quote! {
            let mut messages = ::std::collections::HashMap::new();
            #(#inserts)*
            catalogs.insert(::std::string::String::from(#locale), messages);
        });
    }

    if locale_inits.is_empty() {
        return Err(format!("no *.toml catalogs in {}", dir_path.display()));
    }

    Ok(quote! {
        #(#tracked_files)*

        #[::locus_axum::ctor::ctor(crate_path = ::locus_axum::ctor)]
        fn auto_init_catalogs() {
            let mut catalogs: ::locus_axum::CatalogMap = ::std::collections::HashMap::new();
            #(#locale_inits)*
            ::locus_axum::internal_init_catalog(catalogs);
        }
    })
}
