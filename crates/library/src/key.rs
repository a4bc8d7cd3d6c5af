//! Cache key for libraries.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Identifies a library by where it lives and the Closure base it is
/// interpreted against.
///
/// Equality is purely structural: both paths must be equal. Paths are taken
/// as given, without resolving symlinks or folding case, so callers that
/// care should canonicalize first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryKey {
    library_path: PathBuf,
    closure_base_path: PathBuf,
}
impl LibraryKey {
    pub fn new(library_path: impl Into<PathBuf>, closure_base_path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: library_path.into(),
            closure_base_path: closure_base_path.into(),
        }
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    pub fn closure_base_path(&self) -> &Path {
        &self.closure_base_path
    }
}
impl Hash for LibraryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `h1 * h2 + h1 + h2`. Swapped pairs collide; `Eq` still tells them apart.
        let h1 = path_hash(&self.library_path);
        let h2 = path_hash(&self.closure_base_path);
        state.write_u64(h1.wrapping_mul(h2).wrapping_add(h1).wrapping_add(h2));
    }
}

fn path_hash(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}
