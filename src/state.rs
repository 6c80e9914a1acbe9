//! Observed file state.

use std::fmt;
use std::path::Path;

/// Snapshot of a path's existence and size at one point in time.
///
/// Two states are equal when both `exists` and `size` match. The size of a
/// missing file is always `0`, so every missing state compares equal to every
/// other missing state.
///
/// # Examples
///
/// ```rust
/// use pollwatch::state::FileState;
///
/// assert_eq!(FileState::missing(), FileState::missing());
/// assert_ne!(FileState::present(0), FileState::missing());
/// assert_ne!(FileState::present(5), FileState::present(9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileState {
    exists: bool,
    size: u64,
}

impl FileState {
    /// State of a path that does not resolve to a readable file.
    pub const fn missing() -> Self {
        Self {
            exists: false,
            size: 0,
        }
    }

    /// State of an existing file with the given length in bytes.
    pub const fn present(size: u64) -> Self {
        Self { exists: true, size }
    }

    /// Read the current state of `path` from filesystem metadata.
    ///
    /// Only regular files count as existing. Any failure to stat the path
    /// (not found, permission denied, other I/O faults) yields
    /// [`FileState::missing`].
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Self::present(meta.len()),
            Ok(_) => {
                tracing::trace!(path = %path.display(), "path is not a regular file");
                Self::missing()
            }
            Err(err) => {
                tracing::trace!(path = %path.display(), kind = ?err.kind(), "stat failed");
                Self::missing()
            }
        }
    }

    /// Whether the file existed when this state was read.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// File length in bytes, `0` when the file does not exist.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Default for FileState {
    fn default() -> Self {
        Self::missing()
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exists {
            write!(f, "exists, {} bytes", self.size)
        } else {
            write!(f, "missing")
        }
    }
}
