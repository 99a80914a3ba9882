use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recorder files with the given extension directly under `dir`
///
/// Sorted by file name, newest first (recorder file names start with a
/// timestamp). A missing directory yields no files.
pub(crate) fn recorder_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| path.extension().is_some_and(|e| e == extension))
        .collect();

    files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    files
}
