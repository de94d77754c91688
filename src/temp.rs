//! Locations for scratch and download directories.
//!
//! Temp dirs are never created under the current working directory (e.g. when
//! TMPDIR=tmp or TMPDIR=./tmp).

use std::env;
use std::path::PathBuf;

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Parent directory for per-invocation wheel downloads.
///
/// Prefers the user cache directory (`~/.cache/pychub/downloads` on Linux),
/// falling back to the temp base.
pub fn download_dir_base() -> PathBuf {
    dirs::cache_dir()
        .filter(|p| p.is_absolute())
        .map(|p| p.join("pychub").join("downloads"))
        .unwrap_or_else(|| temp_dir_base().join("pychub-downloads"))
}
