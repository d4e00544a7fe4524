//! Property tests for marker-scoped region rewriting.

use std::collections::BTreeSet;

use proptest::prelude::*;

use scssync::domain::services::marker_region::{
    locate, region_body, remove, strip_floating_imports, synchronize,
};
use scssync::domain::services::Located;
use scssync::{ImportId, OwnerId};

fn owner() -> OwnerId {
    OwnerId::new("x").unwrap()
}

/// Non-blank stylesheet lines that never contain a marker
fn plain_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z.{};:$@][a-z0-9.{};:$@ ]{0,24}").unwrap()
}

/// Lines drawn from plain text, blanks and every marker of two owners
fn any_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => plain_line(),
        1 => Just(String::new()),
        1 => Just("/* x import start */".to_string()),
        1 => Just("/* x import end */".to_string()),
        1 => Just("/* y import start */".to_string()),
        1 => Just("/* y import end */".to_string()),
        1 => Just("@import \"a\";".to_string()),
    ]
}

fn body() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,6}(/[a-z]{1,6})?", 0..=5).prop_map(|ids| {
        ids.into_iter()
            .map(|id| ImportId::new(id).to_directive())
            .collect()
    })
}

fn text(lines: &[String], trailing_newline: bool) -> String {
    let mut out = lines.join("\n");
    if trailing_newline && !lines.is_empty() {
        out.push('\n');
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Synchronizing twice with the same body changes nothing the second time.
    #[test]
    fn property_synchronize_is_idempotent(
        lines in proptest::collection::vec(any_line(), 0..=16),
        trailing in any::<bool>(),
        body in body(),
        insertion_line in 1usize..=20,
    ) {
        let original = text(&lines, trailing);
        let once = synchronize(&original, &owner(), &body, insertion_line);
        let twice = synchronize(&once, &owner(), &body, insertion_line);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(region_body(&once, &owner()), Some(body));
    }

    /// PROPERTY: Only the lines between the markers change.
    #[test]
    fn property_synchronize_is_local(
        prefix in proptest::collection::vec(plain_line(), 0..=8),
        old_body in proptest::collection::vec(plain_line(), 0..=4),
        suffix in proptest::collection::vec(plain_line(), 0..=8),
        body in body(),
        insertion_line in 1usize..=20,
    ) {
        let mut lines = prefix.clone();
        lines.push(owner().start_marker());
        lines.extend(old_body);
        lines.push(owner().end_marker());
        lines.extend(suffix.clone());

        let updated = synchronize(&text(&lines, true), &owner(), &body, insertion_line);

        let mut expected = prefix;
        expected.push(owner().start_marker());
        expected.extend(body);
        expected.push(owner().end_marker());
        expected.extend(suffix);
        prop_assert_eq!(updated, text(&expected, true));
    }

    /// PROPERTY: Seeding a region and deleting it again restores the file.
    #[test]
    fn property_synchronize_then_remove_round_trips(
        lines in proptest::collection::vec(plain_line(), 0..=12),
        trailing in any::<bool>(),
        body in body(),
        insertion_line in 1usize..=20,
    ) {
        let original = text(&lines, trailing);
        let synced = synchronize(&original, &owner(), &body, insertion_line);
        prop_assert_eq!(remove(&synced, &owner(), true), original);
    }

    /// PROPERTY: Another owner's region is never modified.
    #[test]
    fn property_other_owner_region_survives(
        before in proptest::collection::vec(plain_line(), 0..=6),
        other_body in proptest::collection::vec(plain_line(), 0..=4),
        after in proptest::collection::vec(plain_line(), 0..=6),
        body in body(),
    ) {
        let other = OwnerId::new("y").unwrap();
        let mut lines = before;
        lines.push(other.start_marker());
        lines.extend(other_body.clone());
        lines.push(other.end_marker());
        lines.extend(after);
        let original = text(&lines, true);

        // Seeding at the very end cannot land inside y's region
        let updated = synchronize(&original, &owner(), &body, usize::MAX);

        prop_assert_eq!(region_body(&updated, &other), Some(other_body));
        prop_assert!(updated.starts_with(&original));
    }

    /// PROPERTY: Seeding a second owner at any line keeps both regions intact.
    #[test]
    fn property_regions_seeded_at_any_line_stay_separate(
        lines in proptest::collection::vec(plain_line(), 0..=8),
        other_body in body(),
        other_line in 1usize..=12,
        body in body(),
        insertion_line in 1usize..=16,
    ) {
        let other = OwnerId::new("y").unwrap();
        let original = text(&lines, true);

        let seeded = synchronize(&original, &other, &other_body, other_line);
        let both = synchronize(&seeded, &owner(), &body, insertion_line);
        let resynced = synchronize(&both, &other, &other_body, other_line);

        prop_assert_eq!(&resynced, &both);
        prop_assert_eq!(region_body(&both, &other), Some(other_body));
        prop_assert_eq!(region_body(&both, &owner()), Some(body));
    }

    /// PROPERTY: Dropping only the markers, then syncing the same body again,
    /// rebuilds the region and leaves the released lines where they were.
    #[test]
    fn property_keep_body_removal_then_sync_round_trips(
        prefix in proptest::collection::vec(plain_line(), 0..=6),
        suffix in proptest::collection::vec(plain_line(), 0..=6),
        body in body(),
        insertion_line in 1usize..=16,
    ) {
        let mut lines = prefix.clone();
        lines.push(owner().start_marker());
        lines.extend(body.clone());
        lines.push(owner().end_marker());
        lines.extend(suffix.clone());
        let original = text(&lines, true);

        let released = remove(&original, &owner(), false);
        prop_assert_eq!(locate(&released, &owner()), Located::Missing);

        let resynced = synchronize(&released, &owner(), &body, insertion_line);
        let region = region_body(&resynced, &owner()).unwrap_or_default();
        let expected: BTreeSet<&String> = body.iter().collect();
        prop_assert_eq!(region.iter().collect::<BTreeSet<_>>(), expected);

        // Everything that floated out is still present, outside the region.
        let floating = remove(&resynced, &owner(), true);
        let mut remaining = prefix;
        remaining.extend(body);
        remaining.extend(suffix);
        prop_assert_eq!(floating, text(&remaining, true));
    }

    /// PROPERTY: Region operations never panic on arbitrary input.
    #[test]
    fn property_region_operations_never_panic(
        input in "(?s).{0,256}",
        insertion_line in 0usize..=40,
    ) {
        let _ = locate(&input, &owner());
        let _ = synchronize(&input, &owner(), &["@import \"a\";".to_string()], insertion_line);
        let _ = remove(&input, &owner(), false);
        let ids: BTreeSet<ImportId> = [ImportId::new("a")].into_iter().collect();
        let _ = strip_floating_imports(&input, &ids);
    }

    /// PROPERTY: After a sync the owner's region is always well formed.
    #[test]
    fn property_synchronize_leaves_a_locatable_region(
        lines in proptest::collection::vec(any_line(), 0..=16),
        body in body(),
        insertion_line in 1usize..=20,
    ) {
        let synced = synchronize(&text(&lines, true), &owner(), &body, insertion_line);
        prop_assert!(matches!(locate(&synced, &owner()), Located::Found(_)));
    }
}
