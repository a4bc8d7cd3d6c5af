//! Preference loading for the library registry.
//!
//! Preferences are plain booleans identified by a [`BoolOption`] (a dotted
//! key plus a compiled-in default) and read through the [`PreferenceSource`]
//! trait. [`Preferences`] is the real implementation, layering defaults, a
//! configuration file and environment variables with [figment]. With the
//! `mock` feature, [`MockPreferences`] offers a scripted source for tests.
//!
//! A preference that is simply not set is never an error; reads fail only
//! when the store itself can't answer (see [`ErrorKind::Access`](error::ErrorKind::Access)).

pub mod error;
#[cfg(feature = "mock")]
mod mock;
mod option;
mod preferences;

#[cfg(feature = "mock")]
pub use crate::mock::MockPreferences;
pub use crate::option::{
    ALL_OPTIONS, BoolOption, CACHE_LIBRARY_DEPS_FILES, CACHE_LIBRARY_STRIPPED_FILES, PreferenceSource,
};
pub use crate::preferences::Preferences;
