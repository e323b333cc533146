use std::fs;
use std::io::Cursor;

use pretty_assertions::assert_eq;
use sync_fs::{NormalizedPath, io};
use tempfile::tempdir;

#[test]
fn test_write_atomic_creates_file_and_parents() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("nested/deep/config.xml"));

    io::write_atomic(&path, b"<settings/>").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "<settings/>");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("config.xml"));

    io::write_atomic(&path, b"old").unwrap();
    io::write_atomic(&path, b"new").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "new");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("config.xml"));

    io::write_atomic(&path, b"content").unwrap();

    let names = io::list_children(&NormalizedPath::new(dir.path()));
    assert_eq!(names, vec!["config.xml".to_string()]);
}

#[test]
fn test_copy_stream_writes_reader_content() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("options/editor.xml"));

    let written = io::copy_stream(&path, Cursor::new(b"<editor/>".to_vec())).unwrap();

    assert_eq!(written, 9);
    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "<editor/>");
}

#[test]
fn test_copy_stream_overwrites_longer_existing_content() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("config.xml"));

    io::write_atomic(&path, b"a much longer original payload").unwrap();
    io::copy_stream(&path, Cursor::new(b"short".to_vec())).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "short");
}

#[test]
fn test_list_children_missing_directory_is_empty() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("does-not-exist"));

    assert!(io::list_children(&path).is_empty());
}

#[test]
fn test_list_children_returns_names_not_paths() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("options")).unwrap();
    fs::write(dir.path().join("options/editor.xml"), "<x/>").unwrap();
    fs::write(dir.path().join("options/keymap.xml"), "<y/>").unwrap();

    let mut names = io::list_children(&NormalizedPath::new(dir.path().join("options")));
    names.sort();

    assert_eq!(names, vec!["editor.xml".to_string(), "keymap.xml".to_string()]);
}

#[test]
fn test_list_children_empty_directory() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path());

    assert!(io::list_children(&path).is_empty());
}
