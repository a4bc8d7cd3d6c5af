//! What the registry needs from the values it caches.
//!
//! The registry never looks inside a library or an extern; it only knows how
//! to build one. Parsing and compiling them is up to the implementor.

use crate::settings::CacheSettings;
use std::path::Path;

/// A JavaScript library on disk, interpreted relative to a Closure base.
///
/// Built in two steps: [`new()`](Self::new) captures the location and the
/// caching policy, then [`populate()`](Self::populate) fills it in using the
/// active compiler session. The registry calls `populate()` exactly once per
/// instance and treats the library as immutable afterwards.
pub trait Library {
    /// The compiler or analysis session passed through to
    /// [`populate()`](Self::populate). Opaque to the registry.
    type Context: ?Sized;

    fn new(library_path: &Path, closure_base_path: &Path, settings: CacheSettings) -> Self;

    fn populate(&mut self, context: &Self::Context);
}

/// An extern declaration file. Complete as soon as it is constructed.
pub trait Extern {
    fn new(path: &Path) -> Self;
}
