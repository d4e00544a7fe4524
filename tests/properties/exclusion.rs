//! Property tests for cross-watcher exclusion.

use std::collections::BTreeMap;
use std::path::PathBuf;

use proptest::prelude::*;

use scssync::domain::services::exclusion::compute;

/// Short paths from a tiny alphabet so nesting and shared prefixes are common
fn watch_dir() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(prop_oneof![Just("a"), Just("ab"), Just("b")], 0..=3)
        .prop_map(|segments| {
            let mut dir = PathBuf::from("/r");
            dir.extend(segments);
            dir
        })
}

fn is_below(path: &PathBuf, ancestor: &PathBuf) -> bool {
    path != ancestor && path.starts_with(ancestor)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A watcher excludes exactly the other watchers strictly below it.
    #[test]
    fn property_exclusions_are_strict_descendants(
        dirs in proptest::collection::btree_map("[a-e]", watch_dir(), 1..=5),
    ) {
        let computed = compute(&dirs);

        prop_assert_eq!(computed.len(), dirs.len());
        for (name, dir) in &dirs {
            let expected: Vec<&PathBuf> = dirs
                .iter()
                .filter(|(other, other_dir)| *other != name && is_below(other_dir, dir))
                .map(|(_, other_dir)| other_dir)
                .collect();
            let actual: Vec<&PathBuf> = computed[name].iter().collect();
            let mut expected = expected;
            expected.sort();
            expected.dedup();
            prop_assert_eq!(actual, expected);
            prop_assert!(!computed[name].contains(dir));
        }
    }

    /// PROPERTY: Nesting is never mutual.
    #[test]
    fn property_exclusion_is_antisymmetric(
        dirs in proptest::collection::btree_map("[a-e]", watch_dir(), 1..=5),
    ) {
        let computed: BTreeMap<String, _> = compute(&dirs);
        for (a, a_dir) in &dirs {
            for (b, b_dir) in &dirs {
                if computed[a].contains(b_dir) {
                    prop_assert!(!computed[b].contains(a_dir));
                }
            }
        }
    }
}
