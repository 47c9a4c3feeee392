//! Locale resolution and routing rules.
//!
//! ```text
//! request path ──► path::classify ──► Some(tag) ──► Localized { tag }
//!                        │
//!                        └─► None ──► preference::resolve(Accept-Language)
//!                                          └─► Redirect { /{tag}{path}?{query} }
//! ```
//!
//! Paths matched by [`matcher`] rules (API routes, framework assets, static
//! files) never enter the flow above.

pub mod matcher;
pub mod navigation;
pub mod path;
pub mod preference;
pub mod registry;
pub mod routing;
