//! End-to-end connector scenarios across the full host contract

use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use sync_git::Connector;
use sync_test_utils::git::{add_local_remote, configure_identity};
use tempfile::TempDir;

fn open_connector() -> (TempDir, Connector) {
    let temp = TempDir::new().unwrap();
    let connector = Connector::open(temp.path()).unwrap();
    configure_identity(temp.path());
    (temp, connector)
}

#[test]
fn test_write_publish_read_delete_roundtrip() {
    let (_temp, connector) = open_connector();

    connector
        .write("a/b.xml", Cursor::new(b"<x/>".to_vec()))
        .unwrap();
    connector.publish().unwrap();
    assert_eq!(connector.read("a/b.xml").unwrap(), Some(b"<x/>".to_vec()));

    connector.delete("a/b.xml").unwrap();
    connector.publish().unwrap();
    assert_eq!(connector.read("a/b.xml").unwrap(), None);
}

#[test]
fn test_list_children_tracks_working_tree() {
    let (_temp, connector) = open_connector();

    connector
        .write("options/editor.xml", Cursor::new(b"<x/>".to_vec()))
        .unwrap();
    connector
        .write("options/keymap.xml", Cursor::new(b"<y/>".to_vec()))
        .unwrap();

    let mut names = connector.list_children("options");
    names.sort();
    assert_eq!(names, vec!["editor.xml".to_string(), "keymap.xml".to_string()]);

    assert!(connector.list_children("absent").is_empty());
}

#[test]
fn test_refresh_without_remote_is_ok() {
    let (_temp, connector) = open_connector();

    connector.refresh().unwrap();
    connector
        .write("a.xml", Cursor::new(b"<x/>".to_vec()))
        .unwrap();
    connector.refresh().unwrap();

    // Nothing published yet, so history is still empty
    assert_eq!(connector.read("a.xml").unwrap(), None);
}

#[test]
fn test_two_connectors_share_history_through_remote() {
    let (publisher_dir, publisher) = open_connector();
    let remote_dir = TempDir::new().unwrap();
    add_local_remote(publisher_dir.path(), remote_dir.path());

    publisher
        .write("options/editor.xml", Cursor::new(b"<editor/>".to_vec()))
        .unwrap();
    publisher.publish().unwrap();

    let (subscriber_dir, subscriber) = open_connector();
    {
        let repo = git2::Repository::open(subscriber_dir.path()).unwrap();
        repo.remote("origin", &remote_dir.path().display().to_string())
            .unwrap();
    }
    subscriber.refresh().unwrap();

    // Refresh only updates remote-tracking history; local HEAD stays put
    assert_eq!(subscriber.read("options/editor.xml").unwrap(), None);

    let repo = git2::Repository::open(subscriber_dir.path()).unwrap();
    let fetched = repo
        .references()
        .unwrap()
        .filter_map(|r| r.ok())
        .any(|r| r.name().is_some_and(|n| n.starts_with("refs/remotes/origin/")));
    assert!(fetched);
}

#[test]
fn test_concurrent_host_threads() {
    let (_temp, connector) = open_connector();
    let connector = Arc::new(connector);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let connector = Arc::clone(&connector);
            thread::spawn(move || {
                connector
                    .write(
                        &format!("component-{i}.xml"),
                        Cursor::new(format!("<c id=\"{i}\"/>").into_bytes()),
                    )
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    connector.publish().unwrap();

    for i in 0..8 {
        assert_eq!(
            connector.read(&format!("component-{i}.xml")).unwrap(),
            Some(format!("<c id=\"{i}\"/>").into_bytes())
        );
    }
}
