use assert_fs::TempDir;
use coverage_paths::fs_op::MemoryFs;
use coverage_paths::PathResolver;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Materialise `entries` under `root`: names ending in `/` become
/// directories and are returned as candidates, anything else becomes an
/// empty file.
fn build_layout(root: &Path, entries: &[&str]) -> Vec<String> {
    let mut dirs = Vec::new();
    for entry in entries {
        let path = root.join(entry);
        if entry.ends_with('/') {
            fs::create_dir_all(&path).expect("create dir");
            dirs.push(entry.to_string());
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create parent");
            }
            fs::write(&path, b"").expect("create file");
        }
    }
    dirs
}

fn expected(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(f, d)| (f.to_string(), d.to_string()))
        .collect()
}

fn check(entries: &[&str], filenames: &[&str], want: &[(&str, &str)]) {
    let temp = TempDir::new().expect("temp dir");
    let dirs = build_layout(temp.path(), entries);
    let chosen = PathResolver::new(temp.path(), dirs).choose(filenames);
    assert_eq!(chosen, expected(want), "layout {:?}", entries);
}

#[test]
fn no_candidates_resolves_nothing() {
    check(&[], &["dir/file"], &[]);
}

#[test]
fn nested_candidate_loses_to_workspace_root() {
    check(
        &["workspace/", "workspace/dir/", "workspace/dir/file"],
        &["dir/file"],
        &[("dir/file", "workspace/")],
    );
}

#[test]
fn doubly_nested_candidates_still_pick_workspace() {
    check(
        &[
            "workspace/",
            "workspace/dir/",
            "workspace/dir/dir/",
            "workspace/dir/file",
        ],
        &["dir/file"],
        &[("dir/file", "workspace/")],
    );
}

#[test]
fn two_workspaces_each_resolve_their_own_file() {
    check(
        &[
            "workspace/",
            "workspace/dir/",
            "workspace/dir/dir/",
            "workspace/dir/file",
            "workspace2/dir/",
            "workspace2/dir/file2",
        ],
        &["dir/file", "file2"],
        &[("dir/file", "workspace/"), ("file2", "workspace2/dir/")],
    );
}

#[test]
fn files_present_under_two_roots_pick_shallowest_then_first() {
    check(
        &["a/", "a/x/", "b/", "a/x/f.rs", "b/f.rs", "a/f.rs"],
        &["f.rs"],
        &[("f.rs", "a/")],
    );
}

#[test]
fn directories_never_count_as_matches() {
    check(&["ws/", "ws/dir/file/"], &["dir/file"], &[]);
}

#[test]
fn missing_root_resolves_nothing() {
    let temp = TempDir::new().expect("temp dir");
    let chosen = PathResolver::new(temp.path().join("gone"), ["ws/"]).choose(["f.rs"]);
    assert!(chosen.is_empty());
}

#[test]
fn same_inputs_same_answer() {
    let temp = TempDir::new().expect("temp dir");
    let dirs = build_layout(temp.path(), &["p/", "q/", "q/z.rs", "p/y.rs"]);
    let resolver = PathResolver::new(temp.path(), dirs);
    let first = resolver.choose(["y.rs", "z.rs", "w.rs"]);
    let again = resolver.choose(["w.rs", "z.rs", "y.rs"]);
    assert_eq!(first, again);
    assert_eq!(first, expected(&[("y.rs", "p/"), ("z.rs", "q/")]));
}

#[test]
fn in_memory_probe_matches_real_filesystem() {
    let probe = MemoryFs::new()
        .with_file("workspace/dir/file")
        .with_file("workspace2/dir/file2");
    let candidates = [
        "workspace/",
        "workspace/dir/",
        "workspace/dir/dir/",
        "workspace2/dir/",
    ];
    let chosen = PathResolver::with_probe(probe, candidates).choose(["dir/file", "file2"]);
    assert_eq!(
        chosen,
        expected(&[("dir/file", "workspace/"), ("file2", "workspace2/dir/")])
    );
}

#[test]
fn file_in_the_way_falls_through_to_next_candidate() {
    // a/blocker is a file, so a/blocker/f fails with ENOTDIR
    check(
        &["a/", "b/", "a/blocker", "b/blocker/f"],
        &["blocker/f"],
        &[("blocker/f", "b/")],
    );
}

#[cfg(unix)]
#[test]
fn unsearchable_candidate_falls_through_to_next_candidate() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().expect("temp dir");
    let dirs = build_layout(temp.path(), &["locked/", "open/", "open/f.rs"]);
    let locked = temp.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    let chosen = PathResolver::new(temp.path(), dirs).choose(["f.rs"]);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");
    assert_eq!(chosen, expected(&[("f.rs", "open/")]));
}

#[cfg(unix)]
#[test]
fn backslash_filenames_match_literal_unix_names() {
    let temp = TempDir::new().expect("temp dir");
    let dirs = build_layout(temp.path(), &["ws/", "ws/a/", "ws/a/b", "real/", "real/x\\y"]);
    let chosen = PathResolver::new(temp.path(), dirs).choose(["a\\b", "x\\y"]);
    assert_eq!(chosen, expected(&[("x\\y", "real/")]));
}
