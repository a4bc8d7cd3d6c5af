//! Layered preference loading backed by [figment].
//!
//! Layers, lowest priority first:
//!
//! 1. compiled-in defaults of every known [`BoolOption`],
//! 2. the configuration file (explicit path, or `config.toml` in the
//!    platform configuration directory),
//! 3. environment variables prefixed with `JSINC_`, using `__` to separate
//!    nested keys (`JSINC_LIBRARY__CACHE_DEPS_FILES=false`).

use crate::error::{ErrorKind, Result};
use crate::option::{BoolOption, CACHE_LIBRARY_DEPS_FILES, CACHE_LIBRARY_STRIPPED_FILES, PreferenceSource};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "JSINC_";
const ENV_SEPARATOR: &str = "__";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Compiled-in defaults, shaped like the configuration file.
#[derive(Debug, Serialize)]
struct Defaults {
    library: LibraryDefaults,
}

#[derive(Debug, Serialize)]
struct LibraryDefaults {
    cache_deps_files: bool,
    cache_stripped_files: bool,
}
impl Default for Defaults {
    fn default() -> Self {
        Self {
            library: LibraryDefaults {
                cache_deps_files: CACHE_LIBRARY_DEPS_FILES.default,
                cache_stripped_files: CACHE_LIBRARY_STRIPPED_FILES.default,
            },
        }
    }
}

/// User preferences, read-only.
///
/// Build one per session and hand it to whatever needs it; nothing in this
/// crate keeps a global instance.
///
/// # Examples
///
/// ```
/// use figment::{Figment, providers::{Format, Toml}};
/// use jsinc_config::{CACHE_LIBRARY_DEPS_FILES, PreferenceSource, Preferences};
///
/// let prefs = Preferences::from_figment(Figment::from(Toml::string(
///     "[library]\ncache_deps_files = false",
/// )));
/// assert!(!prefs.get(&CACHE_LIBRARY_DEPS_FILES).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Preferences {
    figment: Figment,
}
impl Preferences {
    /// Wrap an already assembled provider stack.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    /// Load the full layered stack.
    ///
    /// An explicit `path` must exist, or [`Load`](ErrorKind::Load) is
    /// returned. Without one, the platform default location is used when
    /// present and silently skipped otherwise.
    #[instrument(level = "debug")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::Load(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        let mut figment = Figment::from(Serialized::defaults(Defaults::default()));
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "Merging preferences file");
            figment = merge_file(figment, &file);
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));
        Ok(Self::from_figment(figment))
    }

    /// Location of the per-user configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "jsinc").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}

impl PreferenceSource for Preferences {
    fn get(&self, option: &BoolOption) -> Result<bool> {
        match self.figment.extract_inner::<bool>(option.key) {
            Ok(value) => Ok(value),
            Err(err) if err.missing() => Ok(option.default),
            Err(err) => Err(err).or_raise(|| ErrorKind::Access(option.key.to_string())),
        }
    }
}
