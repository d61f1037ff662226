use std::path::PathBuf;
use directories::BaseDirs;

/// Collapses every run of whitespace (newlines included) into one space and
/// trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Expands a leading `~` to the current user's home directory. Paths are
/// returned unchanged when there is no `~` or no home directory is known.
pub fn expand_home(path: &str) -> PathBuf {
    let home = match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().to_path_buf(),
        None => return PathBuf::from(path)
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
