//! Property tests for content snapshots.

use std::collections::BTreeMap;
use std::path::Path;

use gazette::cache::ContentSnapshot;
use proptest::prelude::*;

/// Slug-shaped file stems, deduplicated by the BTreeMap collection
fn post_files() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    proptest::collection::btree_map(
        proptest::string::string_regex("[a-z][a-z0-9-]{0,12}").unwrap(),
        proptest::collection::vec(any::<u8>(), 0..256),
        1..8,
    )
}

fn write_posts(root: &Path, posts: &BTreeMap<String, Vec<u8>>) {
    let posts_dir = root.join("posts");
    std::fs::create_dir_all(&posts_dir).unwrap();
    for (stem, bytes) in posts {
        std::fs::write(posts_dir.join(format!("{stem}.json")), bytes).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 24,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: capturing an unchanged tree twice yields identical
    /// snapshots.
    #[test]
    fn property_capture_is_deterministic(posts in post_files()) {
        let dir = tempfile::tempdir().unwrap();
        write_posts(dir.path(), &posts);

        let first = ContentSnapshot::capture(dir.path()).unwrap();
        let second = ContentSnapshot::capture(dir.path()).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.posts.len(), posts.len());
    }

    /// PROPERTY: appending one byte to one post produces exactly one
    /// change, naming exactly that file.
    #[test]
    fn property_single_edit_isolates_one_change(
        posts in post_files(),
        pick in any::<proptest::sample::Index>(),
        extra in any::<u8>(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        write_posts(dir.path(), &posts);
        let before = ContentSnapshot::capture(dir.path()).unwrap();

        let stems: Vec<&String> = posts.keys().collect();
        let stem = stems[pick.index(stems.len())];
        let path = dir.path().join("posts").join(format!("{stem}.json"));
        let mut bytes = posts[stem].clone();
        bytes.push(extra);
        std::fs::write(path, bytes).unwrap();

        let after = ContentSnapshot::capture(dir.path()).unwrap();
        let changes = before.diff(&after);

        prop_assert_eq!(changes.len(), 1);
        prop_assert_eq!(changes[0].to_string(), format!("post:{stem}.json"));
    }

    /// PROPERTY: a snapshot survives a JSON round trip unchanged, so a
    /// persisted record compares exactly like a fresh capture.
    #[test]
    fn property_snapshot_round_trips_through_json(posts in post_files()) {
        let dir = tempfile::tempdir().unwrap();
        write_posts(dir.path(), &posts);

        let snapshot = ContentSnapshot::capture(dir.path()).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ContentSnapshot = serde_json::from_str(&json).unwrap();

        prop_assert!(snapshot.diff(&back).is_empty());
        prop_assert_eq!(back, snapshot);
    }
}
