//! Locating committed grid files and scratch directories for tests.

use std::path::PathBuf;

/// Crates whose `testdata/` directories hold committed Envira grids, searched
/// in this order.
const TESTDATA_CRATES: [&str; 2] = ["grid-engine", "envira-parser"];

/// Environment variable pointing at an extra directory of grid files.
pub const TEST_DATA_ENV: &str = "TEST_DATA_DIR";

/// The workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(|p| p.to_path_buf())
        .unwrap_or(manifest_dir)
}

/// `crates/<crate_name>/testdata` under the workspace root.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join(crate_name)
        .join("testdata")
}

/// Find a committed grid file by name.
///
/// Looks in `$TEST_DATA_DIR` first, then in the `testdata/` directory of
/// `grid-engine` and `envira-parser`. Returns `None` when no candidate
/// exists, which [`require_test_file!`](crate::require_test_file) turns into
/// a skipped test.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let from_env = std::env::var_os(TEST_DATA_ENV).map(|dir| PathBuf::from(dir).join(name));
    let committed = TESTDATA_CRATES
        .iter()
        .map(|krate| crate_testdata_dir(krate).join(name));

    from_env.into_iter().chain(committed).find(|path| path.is_file())
}

/// A scratch directory, removed when the handle is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("noise-grid-")
        .tempdir()
        .expect("Failed to create scratch directory")
}
