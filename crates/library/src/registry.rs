//! Registry of libraries and externs, shared while in use.

use crate::key::LibraryKey;
use crate::provider::{ExternHandle, IncludesProvider, LibraryHandle};
use crate::settings::{CacheSettings, SettingsState};
use crate::value::{Extern, Library};
use jsinc_cache::WeakCache;
use jsinc_config::{PreferenceSource, Preferences};
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Caches libraries and externs by location, holding them weakly.
///
/// A library is keyed by its path *and* the Closure base it is interpreted
/// against; an extern by its path alone. The two live in separate caches, so
/// the same path can be both without interference.
///
/// Caching policy ([`CacheSettings`]) is read from the preference source the
/// first time a library has to be built, then reused until [`clear()`](Self::clear).
///
/// # Concurrency
/// Safe to share between threads. Lookups are check-then-create: when two
/// threads miss on the same key at once, both build a value and the cache
/// keeps the one inserted last. Each caller still receives a complete,
/// correctly configured value.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use jsinc_config::{MockPreferences, CACHE_LIBRARY_DEPS_FILES};
/// use jsinc_library::{CacheSettings, Extern, Library, LibraryRegistry};
///
/// struct Lib(CacheSettings);
/// impl Library for Lib {
///     type Context = ();
///     fn new(_: &Path, _: &Path, settings: CacheSettings) -> Self { Lib(settings) }
///     fn populate(&mut self, _: &()) {}
/// }
/// struct Ext;
/// impl Extern for Ext {
///     fn new(_: &Path) -> Self { Ext }
/// }
///
/// let prefs = MockPreferences::default().with_value(&CACHE_LIBRARY_DEPS_FILES, false);
/// let registry: LibraryRegistry<Lib, Ext, _> = LibraryRegistry::new(prefs);
/// let lib = registry.get_library(&(), Path::new("/proj/lib.js"), Path::new("/proj/closure"));
/// assert!(!lib.0.cache_deps_files);
/// ```
pub struct LibraryRegistry<L, E, P = Preferences> {
    libraries: WeakCache<LibraryKey, L>,
    externs: WeakCache<PathBuf, E>,
    preferences: P,
    settings: Mutex<SettingsState>,
}
impl<L, E, P> LibraryRegistry<L, E, P>
where
    L: Library,
    E: Extern,
    P: PreferenceSource,
{
    pub fn new(preferences: P) -> Self {
        Self {
            libraries: WeakCache::new(),
            externs: WeakCache::new(),
            preferences,
            settings: Mutex::new(SettingsState::Unresolved),
        }
    }

    /// Return the live library for this location, or build, populate and
    /// cache a new one.
    ///
    /// A hit has no side effects: the cached instance is returned as is and
    /// never populated again.
    #[instrument(
        level = "debug",
        skip_all,
        fields(library = %library_path.display(), base = %closure_base_path.display())
    )]
    pub fn get_library(&self, context: &L::Context, library_path: &Path, closure_base_path: &Path) -> LibraryHandle<L> {
        let key = LibraryKey::new(library_path, closure_base_path);
        if let Some(library) = self.libraries.get(&key) {
            tracing::debug!("Library cache hit");
            return library;
        }
        let settings = self.settings();
        tracing::debug!(?settings, "Library cache miss; constructing");
        let mut library = L::new(library_path, closure_base_path, settings);
        library.populate(context);
        self.libraries.insert(key, library)
    }

    /// Return the live extern for `path`, or build and cache a new one.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn get_extern(&self, path: &Path) -> ExternHandle<E> {
        if let Some(extern_) = self.externs.get(path) {
            tracing::debug!("Extern cache hit");
            return extern_;
        }
        tracing::debug!("Extern cache miss; constructing");
        self.externs.insert(path.to_path_buf(), E::new(path))
    }

    /// Settings used for newly built libraries, resolving them on first use.
    ///
    /// Resolution happens under a lock, so threads that miss concurrently
    /// still read the preferences only once.
    pub fn settings(&self) -> CacheSettings {
        self.settings.lock().resolve(&self.preferences)
    }

    /// Empty both caches and forget the resolved settings, so that the next
    /// library build reads the preferences again. Idempotent.
    ///
    /// Handles already handed out remain valid; the registry just stops
    /// sharing them.
    #[instrument(level = "debug", skip_all)]
    pub fn clear(&self) {
        self.libraries.clear();
        self.externs.clear();
        self.settings.lock().reset();
    }

    /// Number of live libraries and externs.
    pub fn cached_counts(&self) -> (usize, usize) {
        (self.libraries.len(), self.externs.len())
    }
}

impl<L, E, P> IncludesProvider for LibraryRegistry<L, E, P>
where
    L: Library,
    E: Extern,
    P: PreferenceSource,
{
    type Library = L;
    type Extern = E;

    fn get_library(&self, context: &L::Context, library_path: &Path, closure_base_path: &Path) -> LibraryHandle<L> {
        LibraryRegistry::get_library(self, context, library_path, closure_base_path)
    }

    fn get_extern(&self, _context: &L::Context, path: &Path) -> ExternHandle<E> {
        LibraryRegistry::get_extern(self, path)
    }

    fn clear(&self) {
        LibraryRegistry::clear(self)
    }
}

impl<L, E, P: fmt::Debug> fmt::Debug for LibraryRegistry<L, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryRegistry")
            .field("libraries", &self.libraries)
            .field("externs", &self.externs)
            .field("preferences", &self.preferences)
            .field("settings", &*self.settings.lock())
            .finish()
    }
}
