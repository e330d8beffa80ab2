//! Filesystem facade tests
//!
//! Exercises `Filesystem` on top of `CloudinaryAdapter` with the in-memory
//! resource API: path cleaning, scoped listings and the operations that only
//! the facade guards.

use cloudinary_fs::api::{ApiCall, MockResourceApi};
use cloudinary_fs::{CloudinaryAdapter, Filesystem, FsError, Metadata, WriteOptions};
use yare::parameterized;

type MockFs = Filesystem<CloudinaryAdapter<MockResourceApi>>;

fn filesystem(files: &[(&str, &str)]) -> MockFs {
    let api = MockResourceApi::new();
    for (path, contents) in files {
        api.insert(*path, *contents);
    }
    Filesystem::new(CloudinaryAdapter::new(api))
}

fn entries(listing: &[Metadata]) -> Vec<(String, bool)> {
    listing
        .iter()
        .map(|m| (m.path.clone(), m.is_dir()))
        .collect()
}

fn tree() -> MockFs {
    filesystem(&[
        ("a/b/c.txt", "c"),
        ("a/d.txt", "d"),
        ("a/x/y/z.txt", "z"),
        ("top.txt", "t"),
    ])
}

#[tokio::test]
async fn test_paths_are_cleaned_before_reaching_adapter() {
    let fs = filesystem(&[]);

    fs.write("/docs//a.txt", b"a".to_vec(), &WriteOptions::default())
        .await
        .unwrap();

    assert!(fs.adapter().api().contains("docs/a.txt"));
    assert_eq!(fs.read("docs/a.txt").await.unwrap(), b"a");
}

#[parameterized(
    parent = { "../etc/passwd" },
    current = { "a/./b.txt" },
    empty = { "" },
    root = { "///" },
    control = { "a/\u{0}b" },
)]
#[test_macro(tokio::test)]
async fn test_invalid_file_paths_rejected(path: &str) {
    let fs = filesystem(&[]);

    let result = fs.write(path, b"x".to_vec(), &WriteOptions::default()).await;

    assert!(matches!(result, Err(FsError::InvalidPath { .. })));
    assert!(fs.adapter().api().calls().is_empty());
}

#[tokio::test]
async fn test_root_listing_non_recursive() {
    let fs = tree();

    let listing = fs.list_contents("", false).await.unwrap();

    assert_eq!(
        entries(&listing),
        vec![("a".to_string(), true), ("top.txt".to_string(), false)]
    );
}

#[tokio::test]
async fn test_subdirectory_listing_non_recursive() {
    let fs = tree();

    let listing = fs.list_contents("a", false).await.unwrap();

    assert_eq!(
        entries(&listing),
        vec![
            ("a/b".to_string(), true),
            ("a/d.txt".to_string(), false),
            ("a/x".to_string(), true),
        ]
    );

    let calls = fs.adapter().api().calls();
    match &calls[0] {
        ApiCall::Resources(request) => assert_eq!(request.prefix, "a/"),
        other => panic!("Expected a listing call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_subdirectory_listing_recursive() {
    let fs = tree();

    let listing = fs.list_contents("/a/", true).await.unwrap();

    assert_eq!(
        entries(&listing),
        vec![
            ("a/b".to_string(), true),
            ("a/b/c.txt".to_string(), false),
            ("a/d.txt".to_string(), false),
            ("a/x".to_string(), true),
            ("a/x/y".to_string(), true),
            ("a/x/y/z.txt".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn test_listing_does_not_match_sibling_prefix() {
    let fs = filesystem(&[("docs/a.txt", "a"), ("docs-old/b.txt", "b")]);

    let listing = fs.list_contents("docs", true).await.unwrap();

    assert_eq!(entries(&listing), vec![("docs/a.txt".to_string(), false)]);
}

#[tokio::test]
async fn test_delete_root_refused() {
    let fs = tree();

    let result = fs.delete_directory("/").await;

    assert!(matches!(result, Err(FsError::InvalidPath { .. })));
    assert!(fs.adapter().api().contains("top.txt"));
}

#[tokio::test]
async fn test_delete_directory() {
    let fs = tree();

    fs.delete_directory("a").await.unwrap();

    let listing = fs.list_contents("", true).await.unwrap();
    assert_eq!(entries(&listing), vec![("top.txt".to_string(), false)]);
}

#[tokio::test]
async fn test_create_directory_then_exists() {
    let fs = filesystem(&[]);

    let dir = fs
        .create_directory("/photos/2024/", &WriteOptions::default())
        .await
        .unwrap();
    assert_eq!(dir, Metadata::dir("photos/2024/"));

    // Empty directories do not exist until something is stored below them
    assert!(!fs.directory_exists("photos/2024").await.unwrap());

    fs.write("photos/2024/cat.jpg", b"meow".to_vec(), &WriteOptions::default())
        .await
        .unwrap();
    assert!(fs.directory_exists("photos/2024").await.unwrap());
    assert!(fs.directory_exists("photos").await.unwrap());
}

#[tokio::test]
async fn test_move_and_copy_through_facade() {
    let fs = filesystem(&[("in/a.txt", "a")]);

    fs.copy("in/a.txt", "/backup/a.txt").await.unwrap();
    fs.move_file("in//a.txt", "out/a.txt").await.unwrap();

    assert!(fs.file_exists("out/a.txt").await.unwrap());
    assert!(fs.file_exists("backup/a.txt").await.unwrap());
    assert!(!fs.file_exists("in/a.txt").await.unwrap());
}

#[tokio::test]
async fn test_update_and_metadata_through_facade() {
    let fs = filesystem(&[("data.json", "{}")]);

    fs.update("/data.json", b"{\"k\": 1}".to_vec()).await.unwrap();

    let metadata = fs.metadata("data.json").await.unwrap();
    assert_eq!(metadata.size, Some(8));
    assert_eq!(metadata.mime_type.as_deref(), Some("application/json"));
    assert_eq!(fs.file_size("data.json").await.unwrap(), Some(8));
    assert_eq!(
        fs.mime_type("data.json").await.unwrap().as_deref(),
        Some("application/json")
    );
    assert_eq!(
        fs.last_modified("data.json").await.unwrap(),
        metadata.timestamp
    );
}

#[tokio::test]
async fn test_visibility_unsupported_through_facade() {
    let fs = filesystem(&[("a.txt", "a")]);

    assert!(fs
        .set_visibility("a.txt", cloudinary_fs::Visibility::Public)
        .await
        .unwrap_err()
        .is_unsupported());
    assert!(fs.visibility("a.txt").await.unwrap_err().is_unsupported());
}

#[tokio::test]
async fn test_into_adapter_keeps_state() {
    let fs = filesystem(&[("a.txt", "a")]);
    fs.delete("a.txt").await.unwrap();

    let adapter = fs.into_adapter();
    assert!(adapter.api().is_empty());
}

#[parameterized(
    empty = { "" },
    separator = { "/" },
    repeated = { "///" },
)]
#[test_macro(tokio::test)]
async fn test_root_directory_exists(path: &str) {
    let fs = filesystem(&[("a.txt", "a")]);

    assert!(fs.directory_exists(path).await.unwrap());

    let calls = fs.adapter().api().calls();
    match &calls[0] {
        ApiCall::Resources(request) => assert_eq!(request.prefix, ""),
        other => panic!("Expected a listing call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_root_directory_missing_when_store_empty() {
    let fs = filesystem(&[]);
    assert!(!fs.directory_exists("/").await.unwrap());
}

#[parameterized(
    empty = { "" },
    separator = { "/" },
)]
#[test_macro(tokio::test)]
async fn test_create_root_directory(path: &str) {
    let fs = filesystem(&[]);

    let dir = fs
        .create_directory(path, &WriteOptions::default())
        .await
        .unwrap();

    assert_eq!(dir, Metadata::dir("/"));
    assert!(fs.adapter().api().calls().is_empty());
}

#[tokio::test]
async fn test_create_directory_rejects_relative_segments() {
    let fs = filesystem(&[]);

    let result = fs
        .create_directory("a/../b", &WriteOptions::default())
        .await;

    assert!(matches!(result, Err(FsError::InvalidPath { .. })));
}
