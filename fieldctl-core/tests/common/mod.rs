use std::fs;
use std::path::Path;

use tempfile::TempDir;
use walkdir::WalkDir;

/// Copy the fixture forms project into a fresh temp dir
pub fn fixture_project() -> TempDir {
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project");
    let temp = TempDir::new().unwrap();

    for entry in WalkDir::new(&source) {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = temp.path().join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }

    temp
}
