//! Library caching policy and its lazy resolution from preferences.

use jsinc_config::{CACHE_LIBRARY_DEPS_FILES, CACHE_LIBRARY_STRIPPED_FILES, PreferenceSource};

/// Which derived artifacts a constructed library keeps around.
///
/// Frozen into each library at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheSettings {
    pub cache_deps_files: bool,
    pub cache_stripped_files: bool,
}
impl CacheSettings {
    /// Read both flags from `preferences`, independently falling back to
    /// each option's default when the store can't answer.
    pub fn from_preferences<P: PreferenceSource + ?Sized>(preferences: &P) -> Self {
        Self {
            cache_deps_files: preferences.get_or_default(&CACHE_LIBRARY_DEPS_FILES),
            cache_stripped_files: preferences.get_or_default(&CACHE_LIBRARY_STRIPPED_FILES),
        }
    }
}
impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cache_deps_files: CACHE_LIBRARY_DEPS_FILES.default,
            cache_stripped_files: CACHE_LIBRARY_STRIPPED_FILES.default,
        }
    }
}

/// Lifecycle of the settings held by a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsState {
    /// Not read yet, or forgotten by a clear.
    #[default]
    Unresolved,
    Resolved(CacheSettings),
}
impl SettingsState {
    /// Return the resolved settings, reading `preferences` first if needed.
    pub fn resolve<P: PreferenceSource + ?Sized>(&mut self, preferences: &P) -> CacheSettings {
        match *self {
            Self::Resolved(settings) => settings,
            Self::Unresolved => {
                let settings = CacheSettings::from_preferences(preferences);
                tracing::debug!(?settings, "Resolved library cache settings");
                *self = Self::Resolved(settings);
                settings
            },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Unresolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsinc_config::{MockPreferences, Preferences};
    use rstest::rstest;

    #[rstest]
    #[case(true, false)]
    #[case(false, true)]
    #[case(false, false)]
    fn test_from_preferences(#[case] deps: bool, #[case] stripped: bool) {
        let prefs = MockPreferences::default()
            .with_value(&CACHE_LIBRARY_DEPS_FILES, deps)
            .with_value(&CACHE_LIBRARY_STRIPPED_FILES, stripped);
        let settings = CacheSettings::from_preferences(&prefs);
        assert_eq!(settings, CacheSettings { cache_deps_files: deps, cache_stripped_files: stripped });
    }

    #[test]
    fn test_failures_fall_back_independently() {
        let prefs = MockPreferences::default()
            .with_failure(&CACHE_LIBRARY_DEPS_FILES)
            .with_value(&CACHE_LIBRARY_STRIPPED_FILES, false);
        let settings = CacheSettings::from_preferences(&prefs);
        assert_eq!(settings.cache_deps_files, CACHE_LIBRARY_DEPS_FILES.default);
        assert!(!settings.cache_stripped_files);
    }

    #[test]
    fn test_unparsable_preferences_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "[library\ncache_deps_files = = false").unwrap();
        let prefs = Preferences::load(Some(path.as_path())).unwrap();
        assert_eq!(CacheSettings::from_preferences(&prefs), CacheSettings::default());
    }

    #[test]
    fn test_resolve_reads_once() {
        let prefs = MockPreferences::default().with_values(&CACHE_LIBRARY_DEPS_FILES, [false, true]);
        let mut state = SettingsState::default();
        let first = state.resolve(&prefs);
        let second = state.resolve(&prefs);
        assert_eq!(first, second);
        assert!(!second.cache_deps_files);
        assert_eq!(prefs.reads(&CACHE_LIBRARY_DEPS_FILES), 1);
    }

    #[test]
    fn test_reset_rereads() {
        let prefs = MockPreferences::default().with_values(&CACHE_LIBRARY_DEPS_FILES, [false, true]);
        let mut state = SettingsState::default();
        assert!(!state.resolve(&prefs).cache_deps_files);
        state.reset();
        assert_eq!(state, SettingsState::Unresolved);
        assert!(state.resolve(&prefs).cache_deps_files);
        assert_eq!(prefs.reads(&CACHE_LIBRARY_DEPS_FILES), 2);
    }
}
