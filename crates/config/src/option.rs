//! Typed preference options and the source they are read from.

use crate::error::Result;

/// A boolean preference with a compiled-in default.
///
/// The key is a dotted path into the configuration tree (`library.cache_deps_files`
/// lives under the `[library]` table of a TOML file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolOption {
    pub key: &'static str,
    pub default: bool,
}
impl BoolOption {
    pub const fn new(key: &'static str, default: bool) -> Self {
        Self { key, default }
    }
}

/// Whether constructed libraries keep the dependency files they discovered.
pub const CACHE_LIBRARY_DEPS_FILES: BoolOption = BoolOption::new("library.cache_deps_files", true);
/// Whether constructed libraries keep their stripped source files.
pub const CACHE_LIBRARY_STRIPPED_FILES: BoolOption = BoolOption::new("library.cache_stripped_files", true);

/// Every option this crate knows about.
pub const ALL_OPTIONS: [BoolOption; 2] = [CACHE_LIBRARY_DEPS_FILES, CACHE_LIBRARY_STRIPPED_FILES];

/// Read-only access to user preferences.
///
/// An unset option is not an error: implementations return the option's
/// default for it. [`get()`](Self::get) fails only with
/// [`Access`](crate::error::ErrorKind::Access), when the store itself cannot
/// answer.
pub trait PreferenceSource: Send + Sync {
    /// Read the current value of `option`.
    fn get(&self, option: &BoolOption) -> Result<bool>;

    /// The compiled-in default of `option`. Never fails.
    fn default_value(&self, option: &BoolOption) -> bool {
        option.default
    }

    /// Read `option`, substituting its default on failure.
    fn get_or_default(&self, option: &BoolOption) -> bool {
        match self.get(option) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(option = option.key, error = ?err, "Preference unreadable; falling back to default");
                self.default_value(option)
            },
        }
    }
}

impl<P: PreferenceSource + ?Sized> PreferenceSource for &P {
    fn get(&self, option: &BoolOption) -> Result<bool> {
        (**self).get(option)
    }

    fn default_value(&self, option: &BoolOption) -> bool {
        (**self).default_value(option)
    }
}

impl<P: PreferenceSource + ?Sized> PreferenceSource for std::sync::Arc<P> {
    fn get(&self, option: &BoolOption) -> Result<bool> {
        (**self).get(option)
    }

    fn default_value(&self, option: &BoolOption) -> bool {
        (**self).default_value(option)
    }
}
