//! Custom test assertions for pulled files

use std::path::Path;

/// Assert that `path` exists and holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &str) {
    match std::fs::read_to_string(path) {
        Ok(content) => assert_eq!(
            content,
            expected,
            "unexpected content in {}",
            path.display()
        ),
        Err(e) => panic!("expected {} to be readable: {e}", path.display()),
    }
}

/// Count regular files below `dir`, recursively
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| {
            let path = e.path();
            if path.is_dir() { count_files(&path) } else { 1 }
        })
        .sum()
}
