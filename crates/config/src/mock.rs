//! Scripted preference source for testing.

use crate::error::{ErrorKind, Result};
use crate::option::{BoolOption, PreferenceSource};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Copy)]
enum Answer {
    Value(bool),
    Fail,
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<Answer>,
    reads: usize,
}

/// Preference source whose answers are scripted per option.
///
/// Each option holds a queue of answers. Every read consumes the front of the
/// queue, except the last answer which repeats forever. Options without a
/// script read as unset (their default). Reads are counted, which lets tests
/// assert how often a consumer went back to the store.
///
/// # Examples
///
/// ```
/// use jsinc_config::{CACHE_LIBRARY_DEPS_FILES, MockPreferences, PreferenceSource};
///
/// let prefs = MockPreferences::default()
///     .with_values(&CACHE_LIBRARY_DEPS_FILES, [false, true]);
/// assert!(!prefs.get(&CACHE_LIBRARY_DEPS_FILES).unwrap());
/// assert!(prefs.get(&CACHE_LIBRARY_DEPS_FILES).unwrap());
/// assert!(prefs.get(&CACHE_LIBRARY_DEPS_FILES).unwrap());
/// assert_eq!(prefs.reads(&CACHE_LIBRARY_DEPS_FILES), 3);
/// ```
#[derive(Debug, Default)]
pub struct MockPreferences {
    scripts: Mutex<HashMap<&'static str, Script>>,
}
impl MockPreferences {
    /// Answer `value` for every read of `option`.
    pub fn with_value(self, option: &BoolOption, value: bool) -> Self {
        self.with_values(option, [value])
    }

    /// Answer each of `values` in turn, then keep repeating the last one.
    pub fn with_values(self, option: &BoolOption, values: impl IntoIterator<Item = bool>) -> Self {
        self.script(option, values.into_iter().map(Answer::Value))
    }

    /// Fail every read of `option` with an access error.
    pub fn with_failure(self, option: &BoolOption) -> Self {
        self.script(option, [Answer::Fail])
    }

    /// Replace the value answered for `option` from now on.
    pub fn set(&self, option: &BoolOption, value: bool) {
        let mut scripts = self.scripts.lock();
        let script = scripts.entry(option.key).or_default();
        script.answers = VecDeque::from([Answer::Value(value)]);
    }

    /// Number of times `option` has been read.
    pub fn reads(&self, option: &BoolOption) -> usize {
        self.scripts.lock().get(option.key).map_or(0, |script| script.reads)
    }

    fn script(self, option: &BoolOption, answers: impl IntoIterator<Item = Answer>) -> Self {
        self.scripts.lock().entry(option.key).or_default().answers.extend(answers);
        self
    }
}

impl PreferenceSource for MockPreferences {
    fn get(&self, option: &BoolOption) -> Result<bool> {
        let answer = {
            let mut scripts = self.scripts.lock();
            let script = scripts.entry(option.key).or_default();
            script.reads += 1;
            match script.answers.len() {
                0 => None,
                1 => script.answers.front().copied(),
                _ => script.answers.pop_front(),
            }
        };
        match answer {
            None => Ok(option.default),
            Some(Answer::Value(value)) => Ok(value),
            Some(Answer::Fail) => exn::bail!(ErrorKind::Access(option.key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{CACHE_LIBRARY_DEPS_FILES, CACHE_LIBRARY_STRIPPED_FILES};

    #[test]
    fn test_unscripted_option_reads_default() {
        let prefs = MockPreferences::default();
        assert_eq!(prefs.get(&CACHE_LIBRARY_DEPS_FILES).unwrap(), CACHE_LIBRARY_DEPS_FILES.default);
        assert_eq!(prefs.reads(&CACHE_LIBRARY_DEPS_FILES), 1);
        assert_eq!(prefs.reads(&CACHE_LIBRARY_STRIPPED_FILES), 0);
    }

    #[test]
    fn test_failure_is_access_error() {
        let prefs = MockPreferences::default().with_failure(&CACHE_LIBRARY_STRIPPED_FILES);
        let err = prefs.get(&CACHE_LIBRARY_STRIPPED_FILES).unwrap_err();
        assert_eq!(*err, ErrorKind::Access(CACHE_LIBRARY_STRIPPED_FILES.key.to_string()));
        assert!(prefs.get(&CACHE_LIBRARY_DEPS_FILES).is_ok());
    }

    #[test]
    fn test_set_replaces_script() {
        let prefs = MockPreferences::default().with_failure(&CACHE_LIBRARY_DEPS_FILES);
        prefs.set(&CACHE_LIBRARY_DEPS_FILES, false);
        assert!(!prefs.get(&CACHE_LIBRARY_DEPS_FILES).unwrap());
    }
}
