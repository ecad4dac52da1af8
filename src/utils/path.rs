//! Path utilities: expand `~` in configured paths.

use std::path::PathBuf;

/// `~` and `~/…` resolve against the home directory; anything else is kept.
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    match path.strip_prefix('~') {
        Some("") => home,
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => {
            home.join(&rest[1..])
        }
        _ => PathBuf::from(path),
    }
}
