//! Host-facing interface of the registry.

use crate::key::LibraryKey;
use crate::value::{Extern, Library};
use jsinc_cache::Cached;
use std::path::{Path, PathBuf};

/// Shared handle to a library owned by a registry.
pub type LibraryHandle<L> = Cached<LibraryKey, L>;
/// Shared handle to an extern owned by a registry.
pub type ExternHandle<E> = Cached<PathBuf, E>;

/// Supplies the libraries and externs a build needs.
///
/// Values are shared between callers while they are in use: asking twice for
/// the same location returns the same instance, as long as a handle from the
/// first request is still alive. Callers must keep their handles for as long
/// as they need the value.
pub trait IncludesProvider {
    type Library: Library;
    type Extern: Extern;

    /// Get the library at `library_path`, interpreted against
    /// `closure_base_path`, constructing and populating it with `context`
    /// if no live instance exists.
    fn get_library(
        &self,
        context: &<Self::Library as Library>::Context,
        library_path: &Path,
        closure_base_path: &Path,
    ) -> LibraryHandle<Self::Library>;

    /// Get the extern at `path`, constructing it if no live instance exists.
    /// `context` is accepted for symmetry with
    /// [`get_library()`](Self::get_library) and is not used.
    fn get_extern(&self, context: &<Self::Library as Library>::Context, path: &Path) -> ExternHandle<Self::Extern>;

    /// Forget every cached value and the resolved settings. Handles already
    /// handed out stay valid.
    fn clear(&self);
}
