//! Registry of JavaScript libraries and externs for the Closure builder.
//!
//! Building a [`Library`] (scanning its sources, computing dependencies,
//! stripping files) is expensive, and many projects in a workspace tend to
//! share the same ones. [`LibraryRegistry`] memoizes them by location and
//! shares one instance between every caller that still holds a handle. Once
//! nobody does, the entry disappears on its own; the registry is never the
//! reason a library stays in memory.
//!
//! # Architecture
//! - **Libraries** are keyed by [`LibraryKey`] (library path + Closure base
//!   path) and built with the [`CacheSettings`] in effect.
//! - **Externs** are keyed by their path and need no settings.
//! - **Settings** come from a [`PreferenceSource`](jsinc_config::PreferenceSource),
//!   read lazily on the first library build and kept until the registry is
//!   cleared. Unreadable preferences quietly fall back to their defaults.
//!
//! Hosts that only need the lookups can depend on the [`IncludesProvider`]
//! trait instead of the concrete registry.

mod key;
mod provider;
mod registry;
mod settings;
mod value;

pub use crate::key::LibraryKey;
pub use crate::provider::{ExternHandle, IncludesProvider, LibraryHandle};
pub use crate::registry::LibraryRegistry;
pub use crate::settings::{CacheSettings, SettingsState};
pub use crate::value::{Extern, Library};
