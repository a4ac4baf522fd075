// End-to-end scenario: write, stat, list, read, move, delete through the
// store, consuming every outcome through reply handles.
use stashfs_core::{CODE_ERR, CODE_OK, ListHandle, LocalConfig, ReplyHandle, Store};
use tempfile::tempdir;

#[test]
fn test_store_showcase_scenario() {
    let dir = tempdir().unwrap();
    let store = Store::local(LocalConfig {
        base_path: dir.path().join("data"),
    })
    .unwrap();

    // Seed two files.
    store.write_str("filetest1.txt", "Test content 1\r\nEnd").unwrap();
    store.write_str("filetest2.txt", "Test content 2\r\nEnd").unwrap();

    // Stat the first file: path, mtime, etag, content type, size.
    let stat = store.stat_reply("filetest1.txt");
    assert_eq!(stat.code(), CODE_OK);
    assert_eq!(stat.count(), 5);
    assert_eq!(stat.get(0), b"filetest1.txt");
    assert_eq!(stat.get(3), b"text/plain");
    assert_eq!(stat.get(4), b"19");

    // List everything.
    let listing = store.list_reply("", true);
    assert_eq!(listing.code(), CODE_OK);
    assert_eq!(listing.count(), 2);

    // Read the first file back.
    let read = store.read_reply("filetest1.txt");
    assert_eq!(read.code(), CODE_OK);
    assert_eq!(read.get(0), b"Test content 1\r\nEnd");
    assert_eq!(read.len_at(0), 19);

    // Move it and confirm it shows up under the new prefix only.
    store.rename("filetest1.txt", "moved/filetest.txt").unwrap();

    let moved = store.list_reply("moved/", true);
    assert_eq!(moved.count(), 1);
    assert_eq!(moved.get(0), b"filetest.txt");

    let read_old = store.read_reply("filetest1.txt");
    assert_eq!(read_old.code(), CODE_ERR);

    // Delete and confirm only the second file remains.
    store.delete("moved/filetest.txt").unwrap();

    let mut remaining = store.list_reply("", true);
    assert_eq!(remaining.count(), 1);
    assert_eq!(remaining.get(0), b"filetest2.txt");

    // Consumers may destroy handles redundantly.
    remaining.destroy();
    remaining.destroy();
    assert_eq!(remaining.count(), 0);
    assert_eq!(remaining.code(), 0);
}
