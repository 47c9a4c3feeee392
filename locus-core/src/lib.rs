pub mod config;
pub mod locale;
pub mod template;

pub use locale::navigation::{
    Navigator, PrefixPolicy, build_localized_path, strip_locale_prefix, switch_locale_path,
};
pub use locale::path::{classify, split_locale};
pub use locale::preference::{Preference, PreferenceList, parse_accept_language, resolve};
pub use locale::registry::{LocaleRegistry, LocaleTag, RegistryError};
pub use locale::routing::{LocaleRouter, RedirectKind, RoutingDecision};
