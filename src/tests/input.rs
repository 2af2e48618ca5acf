use super::{find_documents, open_session};
use crate::formats::rst::RstFormat;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn extensions() -> Vec<String> {
    vec!["rst".to_string(), "txt".to_string()]
}

fn tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("guide/deep")).unwrap();
    fs::write(dir.path().join("index.rst"), "Index\n=====\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "Notes\n-----\n").unwrap();
    fs::write(dir.path().join("readme.md"), "# Readme\n").unwrap();
    fs::write(dir.path().join("guide/setup.rst"), "Setup\n=====\n").unwrap();
    fs::write(dir.path().join("guide/deep/more.rst"), "More\n====\n").unwrap();
    dir
}

#[test]
fn test_directories_are_filtered_by_extension() {
    let dir = tree();
    let found = find_documents(vec![dir.path().to_path_buf()], &extensions()).unwrap();

    let expected: Vec<PathBuf> = [
        "guide/deep/more.rst",
        "guide/setup.rst",
        "index.rst",
        "notes.txt",
    ]
    .iter()
    .map(|name| dir.path().join(name))
    .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_explicit_files_are_always_kept() {
    let dir = tree();
    let readme = dir.path().join("readme.md");

    let found = find_documents(vec![readme.clone()], &extensions()).unwrap();
    assert_eq!(found, vec![readme]);
}

#[test]
fn test_overlapping_paths_are_deduplicated() {
    let dir = tree();
    let guide = dir.path().join("guide");
    let setup = guide.join("setup.rst");

    let found = find_documents(vec![setup.clone(), guide.clone()], &extensions()).unwrap();
    assert_eq!(found, vec![guide.join("deep/more.rst"), setup]);
}

#[test]
fn test_missing_path_is_an_error() {
    let dir = tree();
    let missing = dir.path().join("missing.rst");

    let err = find_documents(vec![missing], &extensions()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_open_session_labels_path() {
    let dir = tree();
    let path = dir.path().join("index.rst");

    let mut session = open_session(&path, RstFormat::default()).unwrap();
    assert_eq!(session.file_path, path.to_string_lossy());
    assert_eq!(session.outline().headings()[0].title, "Index");
}

#[test]
fn test_open_session_missing_file() {
    let dir = tree();

    assert!(open_session(&dir.path().join("gone.rst"), RstFormat::default()).is_err());
}
