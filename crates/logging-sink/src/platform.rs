//! crates/logging-sink/src/platform.rs
//! Operating-system dependent pieces of sink construction.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Prefix that anchors a configured path at the executable's directory.
pub const EXECUTABLE_DIR_PREFIX: char = '$';

/// Directory containing the running executable.
pub fn executable_dir() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("executable path {} has no parent directory", exe.display()),
        )
    })
}

/// Replaces a leading `$` in `raw` with the executable's directory.
///
/// A lone `$` is an ordinary file name.
pub fn expand_executable_dir(raw: &str) -> io::Result<PathBuf> {
    match raw.strip_prefix(EXECUTABLE_DIR_PREFIX) {
        Some(rest) if !rest.is_empty() => {
            let rest = rest.trim_start_matches(['/', '\\']);
            Ok(executable_dir()?.join(rest))
        }
        _ => Ok(PathBuf::from(raw)),
    }
}

/// Makes `path` absolute and removes `.` and `..` components without
/// touching the filesystem.
pub fn normalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Name tried after the `attempt`-th failed open of `path`.
pub fn alternate_name(path: &Path, attempt: u32) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}-{attempt}", std::process::id()));
    PathBuf::from(name)
}

/// Whether an open failure may succeed under a different file name.
///
/// Covers files held by another process or user: permission problems,
/// exclusive-create collisions, non-blocking lock contention and, on Windows,
/// sharing and lock violations.
pub fn is_retryable_open_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::AlreadyExists | io::ErrorKind::WouldBlock
    ) || is_sharing_violation(err)
}

#[cfg(windows)]
fn is_sharing_violation(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    matches!(err.raw_os_error(), Some(32 | 33))
}

#[cfg(not(windows))]
const fn is_sharing_violation(_err: &io::Error) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(expand_executable_dir("logs/app").unwrap(), PathBuf::from("logs/app"));
        assert_eq!(expand_executable_dir("$").unwrap(), PathBuf::from("$"));
    }

    #[test]
    fn dollar_prefix_uses_executable_dir() {
        let expanded = expand_executable_dir("$/logs/app").unwrap();
        assert_eq!(expanded, executable_dir().unwrap().join("logs/app"));

        let bare = expand_executable_dir("$app").unwrap();
        assert_eq!(bare, executable_dir().unwrap().join("app"));
    }

    #[test]
    fn normalize_resolves_dots() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(normalize(Path::new("./a.log")).unwrap(), cwd.join("a.log"));
        assert_eq!(normalize(Path::new("a.log")).unwrap(), cwd.join("a.log"));
        assert_eq!(normalize(&cwd.join("x/../y/./z")).unwrap(), cwd.join("y/z"));
    }

    #[cfg(unix)]
    #[test]
    fn normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../../a")).unwrap(), PathBuf::from("/a"));
    }

    #[test]
    fn alternate_name_appends_pid_and_attempt() {
        let name = alternate_name(Path::new("/tmp/app"), 3);
        assert_eq!(name, PathBuf::from(format!("/tmp/app.{}-3", std::process::id())));
    }

    #[test]
    fn retry_classification() {
        let retryable = io::Error::from(io::ErrorKind::PermissionDenied);
        let fatal = io::Error::from(io::ErrorKind::NotFound);
        assert!(is_retryable_open_error(&retryable));
        assert!(is_retryable_open_error(&io::Error::from(io::ErrorKind::WouldBlock)));
        assert!(!is_retryable_open_error(&fatal));
    }
}
