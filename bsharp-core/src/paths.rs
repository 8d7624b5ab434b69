//! Filesystem locations for user data and bundled assets.

use std::path::PathBuf;

/// Resolve the clip assets directory.
///
/// Fallback chain:
/// 1. `BSHARP_CLIPS_DIR` env var (runtime override)
/// 2. `./assets` relative to CWD
pub fn clips_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BSHARP_CLIPS_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("assets")
}

/// Location of the scores database (`<data dir>/bsharp/scores.sqlite`).
pub fn scores_db_path() -> PathBuf {
    if let Some(dir) = dirs::data_dir() {
        dir.join("bsharp").join("scores.sqlite")
    } else {
        PathBuf::from("scores.sqlite")
    }
}
