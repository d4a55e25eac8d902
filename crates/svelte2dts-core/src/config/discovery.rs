//! Configuration file discovery from a starting directory upwards

use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "tsconfig.json";

/// Find the nearest `tsconfig.json` in `start_dir` or any of its ancestors
#[must_use]
pub fn find_nearest_config(start_dir: &Path) -> Option<PathBuf> {
    find_up(start_dir, CONFIG_FILE_NAME)
}

/// Find a regular file called `name` in `start_dir` or the closest ancestor
#[must_use]
pub fn find_up(start_dir: &Path, name: &str) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let candidate = current.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        if !current.pop() {
            break;
        }
    }

    None
}
